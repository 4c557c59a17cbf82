//! Mounting a globe onto a host and tearing it down again.
//!
//! A mounted globe owns its canvas, rotation and pointer state. Every
//! callback it hands to the host holds only a weak reference and checks
//! the liveness flag before touching anything, so nothing draws after
//! teardown even if the host fires a frame it was asked to cancel.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use tracing::debug;

use super::{FrameHandle, Host, ListenerId};
use crate::params::GlobeParams;
use crate::renderer::{FrameStats, GlobeRenderer};
use crate::sphere::{PointerOffset, RotationState, Viewport};
use crate::surface::{backing_pixels, BoxSize, Canvas};

struct GlobeState<C> {
    canvas: C,
    renderer: GlobeRenderer,
    rotation: RotationState,
    viewport: Viewport,
    last_frame: Option<FrameStats>,
    frames_drawn: u64,
}

struct Shared<H, C> {
    host: Rc<H>,
    state: RefCell<GlobeState<C>>,
    pointer: Cell<PointerOffset>,
    alive: Cell<bool>,
    pending: Cell<Option<FrameHandle>>,
    resize_id: Cell<Option<ListenerId>>,
    pointer_id: Cell<Option<ListenerId>>,
}

impl<H: Host + 'static, C: Canvas + 'static> Shared<H, C> {
    fn resize(&self, size: BoxSize) {
        let ratio = self.host.device_pixel_ratio();
        let mut state = self.state.borrow_mut();
        let viewport = Viewport::from_box(size.width, size.height);
        state.viewport = viewport;

        let px = backing_pixels(viewport.size, ratio);
        state.canvas.set_backing_size(px, px);
        if let Some(ctx) = state.canvas.context_2d() {
            ctx.set_scale(ratio);
        }
        debug!(size = viewport.size, ratio, "globe resized");
    }

    fn draw(&self) {
        let mut state = self.state.borrow_mut();
        let GlobeState {
            canvas,
            renderer,
            rotation,
            viewport,
            last_frame,
            frames_drawn,
        } = &mut *state;
        let Some(ctx) = canvas.context_2d() else {
            return;
        };
        let stats = renderer.render_frame(ctx, rotation, self.pointer.get(), *viewport);
        *last_frame = Some(stats);
        *frames_drawn += 1;
    }

    fn teardown(&self) {
        if !self.alive.replace(false) {
            return;
        }
        if let Some(handle) = self.pending.take() {
            self.host.cancel_frame(handle);
        }
        if let Some(id) = self.resize_id.take() {
            self.host.unobserve_resize(id);
        }
        if let Some(id) = self.pointer_id.take() {
            self.host.remove_pointer_listener(id);
        }
        debug!("globe unmounted");
    }
}

/// Draw one frame and queue the next.
fn tick<H: Host + 'static, C: Canvas + 'static>(shared: &Rc<Shared<H, C>>) {
    if !shared.alive.get() {
        return;
    }
    shared.pending.set(None);
    shared.draw();
    schedule(shared);
}

fn schedule<H: Host + 'static, C: Canvas + 'static>(shared: &Rc<Shared<H, C>>) {
    let weak: Weak<Shared<H, C>> = Rc::downgrade(shared);
    let handle = shared.host.request_frame(Box::new(move |_now| {
        if let Some(shared) = weak.upgrade() {
            tick(&shared);
        }
    }));
    shared.pending.set(Some(handle));
}

/// Mount a globe onto `canvas`, driven by `host`.
///
/// Returns `None` without registering anything when the canvas has no 2-D
/// context. Otherwise sizes the backing buffer, subscribes to resize and
/// pointer events, draws the first frame immediately and keeps one frame
/// queued until the returned handle is unmounted or dropped.
pub fn mount<H, C>(host: Rc<H>, mut canvas: C, params: GlobeParams) -> Option<MountedGlobe<H, C>>
where
    H: Host + 'static,
    C: Canvas + 'static,
{
    if canvas.context_2d().is_none() {
        debug!("2d context unavailable, globe not mounted");
        return None;
    }
    let initial = canvas.box_size();

    let shared = Rc::new(Shared {
        host: Rc::clone(&host),
        state: RefCell::new(GlobeState {
            canvas,
            renderer: GlobeRenderer::new(params),
            rotation: RotationState::default(),
            viewport: Viewport::default(),
            last_frame: None,
            frames_drawn: 0,
        }),
        pointer: Cell::new(PointerOffset::CENTER),
        alive: Cell::new(true),
        pending: Cell::new(None),
        resize_id: Cell::new(None),
        pointer_id: Cell::new(None),
    });

    shared.resize(initial);

    let weak = Rc::downgrade(&shared);
    let resize_id = host.observe_resize(Box::new(move |size| {
        if let Some(shared) = weak.upgrade() {
            if shared.alive.get() {
                shared.resize(size);
            }
        }
    }));
    shared.resize_id.set(Some(resize_id));

    let weak = Rc::downgrade(&shared);
    let pointer_id = host.add_pointer_listener(Box::new(move |sample| {
        if let Some(shared) = weak.upgrade() {
            shared.pointer.set(PointerOffset::from_client(
                sample.client_x,
                sample.client_y,
                sample.window_width,
                sample.window_height,
            ));
        }
    }));
    shared.pointer_id.set(Some(pointer_id));

    debug!(size = initial.width.min(initial.height), "globe mounted");
    tick(&shared);

    Some(MountedGlobe { shared })
}

/// Handle to a mounted globe. Dropping it unmounts.
pub struct MountedGlobe<H: Host + 'static, C: Canvas + 'static> {
    shared: Rc<Shared<H, C>>,
}

impl<H: Host + 'static, C: Canvas + 'static> MountedGlobe<H, C> {
    /// Stop the animation and unregister from the host. Idempotent.
    pub fn unmount(&self) {
        self.shared.teardown();
    }

    pub fn is_alive(&self) -> bool {
        self.shared.alive.get()
    }

    pub fn frames_drawn(&self) -> u64 {
        self.shared.state.borrow().frames_drawn
    }

    pub fn last_frame(&self) -> Option<FrameStats> {
        self.shared.state.borrow().last_frame
    }

    pub fn rotation(&self) -> RotationState {
        self.shared.state.borrow().rotation
    }

    pub fn viewport(&self) -> Viewport {
        self.shared.state.borrow().viewport
    }

    pub fn pointer(&self) -> PointerOffset {
        self.shared.pointer.get()
    }

    /// Inspect the canvas.
    pub fn with_canvas<R>(&self, f: impl FnOnce(&C) -> R) -> R {
        f(&self.shared.state.borrow().canvas)
    }
}

impl<H: Host + 'static, C: Canvas + 'static> Drop for MountedGlobe<H, C> {
    fn drop(&mut self) {
        self.shared.teardown();
    }
}

// =============================================================================
// Tests
// =============================================================================
