use std::sync::atomic::{AtomicU64, Ordering};

use glam::Mat4;

use super::vertex::SpriteVertex;

/// Process-unique texture identity.
///
/// The batch compares ids, not handles, to decide whether a draw starts a new
/// texture run.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(u64);

impl TextureId {
    /// Allocates a fresh id.
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// What the batch needs to know about a texture.
pub trait BatchTexture {
    fn id(&self) -> TextureId;
    fn width(&self) -> u32;
    fn height(&self) -> u32;
}

/// Blend equation used when a flush is drawn.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum BlendMode {
    /// `src + dst * (1 - src.a)`; expects premultiplied texels and tint.
    #[default]
    Premultiplied,
    /// `src * src.a + dst * (1 - src.a)` on color and alpha; straight-alpha texels.
    Alpha,
    /// `src * src.a + dst`.
    Additive,
}

/// Graphics-device seam consumed by [`SpriteBatch`](super::SpriteBatch).
///
/// Call order within a session is always:
/// `begin_session` → `bind_shader` → `set_proj_trans` →
/// (`bind_texture` | `set_blend_mode` | `draw_indexed` | `bind_shader` | `set_proj_trans`)* →
/// `end_session`.
///
/// Implementations own every GPU resource they create and release them when
/// told to (`release_mesh`, `release_shader`), on the thread that created them.
pub trait GraphicsBackend {
    type Texture: BatchTexture;
    type Shader;

    /// Creates the shader used when the caller does not supply one.
    fn default_shader(&mut self) -> Self::Shader;

    /// Allocates GPU storage for `max_vertices` and uploads the static index pattern.
    fn prepare_mesh(&mut self, max_vertices: usize, indices: &[u16]);

    /// Starts recording a batch session.
    fn begin_session(&mut self);

    fn bind_shader(&mut self, shader: &Self::Shader);

    /// Sets the combined `projection * transform` matrix for subsequent draws.
    fn set_proj_trans(&mut self, combined: Mat4);

    fn bind_texture(&mut self, texture: &Self::Texture);

    fn set_blend_mode(&mut self, mode: BlendMode);

    /// Draws `index_count` indices of the prepared index pattern over `vertices`.
    fn draw_indexed(&mut self, vertices: &[SpriteVertex], index_count: u32);

    /// Finishes the session: restores default blend/depth state and submits work.
    fn end_session(&mut self);

    fn release_shader(&mut self, shader: Self::Shader);

    fn release_mesh(&mut self);
}
