//! Contract between the window runtime and applications.
//!
//! The runtime calls [`App`] hooks; each frame receives a [`FrameCtx`] that
//! owns the acquire → clear → draw → present sequence.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
