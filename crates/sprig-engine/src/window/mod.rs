//! Window + runtime loop.
//!
//! Owns the `winit` event loop and windows, and gives each window its own
//! [`Gpu`](crate::device::Gpu) and frame clock.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig, RuntimeCtx};
