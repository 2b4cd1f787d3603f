//! GPU rendering subsystem.
//!
//! Convention:
//! - CPU geometry is in logical pixels (top-left origin, +Y down).
//! - The sprite batch's projection matrix maps it to clip space.

mod ctx;
pub mod sprite;

pub use ctx::{RenderCtx, RenderTarget};
