//! Paint model shared by the runtime and the sprite batch.
//!
//! Colors are linear and premultiplied on the CPU side, and packed to RGBA8
//! when they become a vertex attribute.

pub mod color;

pub use color::Color;
