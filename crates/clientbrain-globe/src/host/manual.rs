//! A host driven by hand, for tests, headless rendering and benches.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use super::{FrameCallback, FrameHandle, Host, ListenerId, PointerCallback, PointerSample, ResizeCallback};
use crate::surface::BoxSize;

/// Nominal frame spacing for generated timestamps (60 Hz).
const FRAME_INTERVAL_MS: f64 = 1000.0 / 60.0;

struct Inner {
    next_id: u64,
    now_ms: f64,
    frames: VecDeque<(FrameHandle, FrameCallback)>,
    resize: Vec<(ListenerId, Rc<RefCell<ResizeCallback>>)>,
    pointer: Vec<(ListenerId, Rc<RefCell<PointerCallback>>)>,
    device_pixel_ratio: f64,
    window: (f64, f64),
}

/// Deterministic host: frames only fire when [`ManualHost::run_frame`] is
/// called, and resize or pointer events only when emitted explicitly.
pub struct ManualHost {
    inner: RefCell<Inner>,
    honor_cancel: bool,
}

impl ManualHost {
    pub fn new() -> Self {
        Self {
            inner: RefCell::new(Inner {
                next_id: 1,
                now_ms: 0.0,
                frames: VecDeque::new(),
                resize: Vec::new(),
                pointer: Vec::new(),
                device_pixel_ratio: 1.0,
                window: (1024.0, 768.0),
            }),
            honor_cancel: true,
        }
    }

    /// A host whose `cancel_frame` does nothing, as if the frame had
    /// already been dequeued when teardown ran.
    pub fn ignoring_cancellation() -> Self {
        Self {
            honor_cancel: false,
            ..Self::new()
        }
    }

    pub fn with_device_pixel_ratio(self, ratio: f64) -> Self {
        self.inner.borrow_mut().device_pixel_ratio = ratio;
        self
    }

    pub fn set_device_pixel_ratio(&self, ratio: f64) {
        self.inner.borrow_mut().device_pixel_ratio = ratio;
    }

    pub fn set_window_size(&self, width: f64, height: f64) {
        self.inner.borrow_mut().window = (width, height);
    }

    fn next_id(&self) -> u64 {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        id
    }

    /// Fire the oldest pending frame. Returns `false` when none is queued.
    pub fn run_frame(&self) -> bool {
        let next = {
            let mut inner = self.inner.borrow_mut();
            inner.now_ms += FRAME_INTERVAL_MS;
            let now = inner.now_ms;
            inner.frames.pop_front().map(|(_, cb)| (cb, now))
        };
        match next {
            Some((callback, now)) => {
                callback(now);
                true
            }
            None => false,
        }
    }

    /// Fire up to `count` frames; returns how many actually ran.
    pub fn run_frames(&self, count: usize) -> usize {
        (0..count).take_while(|_| self.run_frame()).count()
    }

    pub fn pending_frames(&self) -> usize {
        self.inner.borrow().frames.len()
    }

    pub fn resize_observers(&self) -> usize {
        self.inner.borrow().resize.len()
    }

    pub fn pointer_listeners(&self) -> usize {
        self.inner.borrow().pointer.len()
    }

    /// Notify every resize observer of a new surface box.
    pub fn resize(&self, size: BoxSize) {
        let observers: Vec<_> = self.inner.borrow().resize.iter().map(|(_, cb)| Rc::clone(cb)).collect();
        for cb in observers {
            let mut observer = cb.borrow_mut();
            (*observer)(size);
        }
    }

    /// Dispatch a pointer move at window coordinates.
    pub fn move_pointer(&self, client_x: f64, client_y: f64) {
        let (window_width, window_height) = self.inner.borrow().window;
        let sample = PointerSample {
            client_x,
            client_y,
            window_width,
            window_height,
        };
        let listeners: Vec<_> = self.inner.borrow().pointer.iter().map(|(_, cb)| Rc::clone(cb)).collect();
        for cb in listeners {
            let mut listener = cb.borrow_mut();
            (*listener)(sample);
        }
    }
}

impl Default for ManualHost {
    fn default() -> Self {
        Self::new()
    }
}

impl Host for ManualHost {
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle {
        let handle = FrameHandle(self.next_id());
        self.inner.borrow_mut().frames.push_back((handle, callback));
        handle
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        if self.honor_cancel {
            self.inner.borrow_mut().frames.retain(|(h, _)| *h != handle);
        }
    }

    fn observe_resize(&self, callback: ResizeCallback) -> ListenerId {
        let id = ListenerId(self.next_id());
        self.inner
            .borrow_mut()
            .resize
            .push((id, Rc::new(RefCell::new(callback))));
        id
    }

    fn unobserve_resize(&self, id: ListenerId) {
        self.inner.borrow_mut().resize.retain(|(i, _)| *i != id);
    }

    fn add_pointer_listener(&self, callback: PointerCallback) -> ListenerId {
        let id = ListenerId(self.next_id());
        self.inner
            .borrow_mut()
            .pointer
            .push((id, Rc::new(RefCell::new(callback))));
        id
    }

    fn remove_pointer_listener(&self, id: ListenerId) {
        self.inner.borrow_mut().pointer.retain(|(i, _)| *i != id);
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.inner.borrow().device_pixel_ratio
    }
}

// =============================================================================
// Tests
// =============================================================================
