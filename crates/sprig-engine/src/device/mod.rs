//! GPU device + surface management.
//!
//! - creates the wgpu Instance/Adapter/Device/Queue for a window
//! - configures the surface and acquires/presents frames
//!
//! Renderers such as the sprite batch get `Device`/`Queue` handles from here
//! and record their own command encoders.

mod gpu;
mod surface;

pub use gpu::{Gpu, GpuFrame, GpuInit, SurfaceErrorAction};
