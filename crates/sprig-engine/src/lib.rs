//! Sprig engine crate.
//!
//! A small wgpu runtime whose centerpiece is the sprite batch in
//! [`render::sprite`]: quads are packed into one shared vertex buffer and
//! drawn with a single indexed call per run of sprites sharing GPU state.

pub mod device;
pub mod window;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod paint;
