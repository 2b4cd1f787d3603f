//! Coordinate and geometry types shared by the runtime and the sprite batch.
//!
//! Canonical CPU space:
//! - Logical pixels (DPI-aware)
//! - Origin top-left
//! - +X right, +Y down
//!
//! The sprite batch maps this space to clip space with an orthographic
//! projection built by [`Viewport::ortho_projection`].

mod vec2;
mod viewport;

pub use vec2::Vec2;
pub use viewport::Viewport;
