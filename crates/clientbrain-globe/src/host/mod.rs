//! Host environment abstraction.
//!
//! A host supplies what an embedded animated surface needs from its page:
//! a cancelable next-frame scheduler, a resize observer for the surface
//! box, window pointer events and the device pixel ratio. Everything is
//! single-threaded; callbacks run on the host's own loop.

mod manual;
mod mount;

pub use manual::ManualHost;
pub use mount::{mount, MountedGlobe};

use crate::surface::BoxSize;

/// Runs once when the scheduled frame fires, with a timestamp in ms.
pub type FrameCallback = Box<dyn FnOnce(f64)>;

/// Runs whenever the observed surface box changes.
pub type ResizeCallback = Box<dyn FnMut(BoxSize)>;

/// Runs on every pointer move.
pub type PointerCallback = Box<dyn FnMut(PointerSample)>;

/// Token for a scheduled frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Token for a registered observer or listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// A raw pointer position with the window extent it was measured in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub client_x: f64,
    pub client_y: f64,
    pub window_width: f64,
    pub window_height: f64,
}

/// Services a host provides to a mounted surface.
pub trait Host {
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle;

    /// Cancel a frame that has not fired yet. Unknown handles are ignored.
    fn cancel_frame(&self, handle: FrameHandle);

    fn observe_resize(&self, callback: ResizeCallback) -> ListenerId;

    fn unobserve_resize(&self, id: ListenerId);

    fn add_pointer_listener(&self, callback: PointerCallback) -> ListenerId;

    fn remove_pointer_listener(&self, id: ListenerId);

    fn device_pixel_ratio(&self) -> f64;
}
