//! A canvas that records draw calls instead of rasterizing them.

use std::cell::RefCell;
use std::rc::Rc;

use crate::surface::{BoxSize, Canvas, Context2d, Fill, Rgba, Vec2};

/// One recorded context call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    SetScale { scale: f64 },
    ClearRect { x: f64, y: f64, width: f64, height: f64 },
    Line { from: Vec2, to: Vec2, color: Rgba, width: f64 },
    Circle { center: Vec2, radius: f64, fill: Fill },
}

/// Shared handle to a canvas's command log. Stays readable after the
/// canvas has been moved into a mounted globe.
pub type CommandLog = Rc<RefCell<Vec<DrawCommand>>>;

#[derive(Debug)]
struct RecordingContext {
    log: CommandLog,
}

impl Context2d for RecordingContext {
    fn set_scale(&mut self, scale: f64) {
        self.log.borrow_mut().push(DrawCommand::SetScale { scale });
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.log
            .borrow_mut()
            .push(DrawCommand::ClearRect { x, y, width, height });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Rgba, width: f64) {
        self.log
            .borrow_mut()
            .push(DrawCommand::Line { from, to, color, width });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f64, fill: Fill) {
        self.log
            .borrow_mut()
            .push(DrawCommand::Circle { center, radius, fill });
    }
}

/// Canvas backed by a [`CommandLog`].
#[derive(Debug)]
pub struct RecordingCanvas {
    box_size: Rc<RefCell<BoxSize>>,
    backing: (u32, u32),
    context: Option<RecordingContext>,
    log: CommandLog,
}

impl RecordingCanvas {
    pub fn new(box_size: BoxSize) -> Self {
        let log = CommandLog::default();
        Self {
            box_size: Rc::new(RefCell::new(box_size)),
            backing: (0, 0),
            context: Some(RecordingContext { log: Rc::clone(&log) }),
            log,
        }
    }

    /// A canvas whose 2-D context is unavailable.
    pub fn without_context(box_size: BoxSize) -> Self {
        Self {
            context: None,
            ..Self::new(box_size)
        }
    }

    pub fn log(&self) -> CommandLog {
        Rc::clone(&self.log)
    }

    /// Handle for changing the layout box from outside, the way a page
    /// reflow would.
    pub fn box_handle(&self) -> Rc<RefCell<BoxSize>> {
        Rc::clone(&self.box_size)
    }

    /// Backing buffer size in device pixels.
    pub fn backing_size(&self) -> (u32, u32) {
        self.backing
    }
}

impl Canvas for RecordingCanvas {
    fn box_size(&self) -> BoxSize {
        *self.box_size.borrow()
    }

    fn set_backing_size(&mut self, width: u32, height: u32) {
        self.backing = (width, height);
    }

    fn context_2d(&mut self) -> Option<&mut dyn Context2d> {
        self.context.as_mut().map(|c| c as &mut dyn Context2d)
    }
}

/// A context that only counts calls. Used by the benchmark so the log
/// does not grow without bound.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CommandCounter {
    pub clears: u64,
    pub lines: u64,
    pub circles: u64,
}

impl CommandCounter {
    pub fn total(&self) -> u64 {
        self.clears + self.lines + self.circles
    }
}

impl Context2d for CommandCounter {
    fn set_scale(&mut self, _scale: f64) {}

    fn clear_rect(&mut self, _x: f64, _y: f64, _width: f64, _height: f64) {
        self.clears += 1;
    }

    fn stroke_line(&mut self, _from: Vec2, _to: Vec2, _color: Rgba, _width: f64) {
        self.lines += 1;
    }

    fn fill_circle(&mut self, _center: Vec2, _radius: f64, _fill: Fill) {
        self.circles += 1;
    }
}

// =============================================================================
// Tests
// =============================================================================
