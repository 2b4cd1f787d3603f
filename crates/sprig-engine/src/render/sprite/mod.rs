//! Sprite batching.
//!
//! - [`SpriteBatch`] buffers quads and decides when to flush
//! - [`Mesh`] is the fixed-capacity vertex staging area with its quad index pattern
//! - [`GraphicsBackend`] is the device seam; [`WgpuSpriteDevice`] implements it over wgpu

mod backend;
mod batch;
mod mesh;
mod quad;
mod slice;
mod vertex;
mod wgpu_backend;

#[cfg(test)]
mod testing;

pub use backend::{BatchTexture, BlendMode, GraphicsBackend, TextureId};
pub use batch::{BatchConfig, SpriteBatch, MAX_SPRITES};
pub use mesh::{Mesh, INDICES_PER_QUAD, VERTICES_PER_QUAD};
pub use quad::{DrawParams, Quad, UvRect};
pub use slice::TextureSlice;
pub use vertex::SpriteVertex;
pub use wgpu_backend::{ShaderId, WgpuShader, WgpuSpriteDevice, WgpuTexture};
