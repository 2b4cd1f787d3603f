//! Headless backend that records every call, for batch tests.

use glam::Mat4;

use super::backend::{BatchTexture, BlendMode, GraphicsBackend, TextureId};
use super::vertex::SpriteVertex;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    PrepareMesh { max_vertices: usize, indices: usize },
    BeginSession,
    BindShader(u32),
    SetProjTrans(Mat4),
    BindTexture(TextureId),
    SetBlendMode(BlendMode),
    DrawIndexed { vertices: usize, indices: u32 },
    EndSession,
    ReleaseShader(u32),
    ReleaseMesh,
}

#[derive(Debug, Clone)]
pub(crate) struct FakeTexture {
    pub id: TextureId,
    pub width: u32,
    pub height: u32,
}

impl FakeTexture {
    pub fn new(width: u32, height: u32) -> Self {
        Self { id: TextureId::next(), width, height }
    }
}

impl BatchTexture for FakeTexture {
    fn id(&self) -> TextureId {
        self.id
    }
    fn width(&self) -> u32 {
        self.width
    }
    fn height(&self) -> u32 {
        self.height
    }
}

/// Shaders are plain numbers; the default one is `0`.
#[derive(Debug, Default)]
pub(crate) struct RecordingBackend {
    pub calls: Vec<Call>,
    /// Vertex data of every draw, in order.
    pub draws: Vec<Vec<SpriteVertex>>,
}

impl RecordingBackend {
    pub fn draw_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, Call::DrawIndexed { .. }))
            .count()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
        self.draws.clear();
    }
}

impl GraphicsBackend for RecordingBackend {
    type Texture = FakeTexture;
    type Shader = u32;

    fn default_shader(&mut self) -> u32 {
        0
    }

    fn prepare_mesh(&mut self, max_vertices: usize, indices: &[u16]) {
        self.calls.push(Call::PrepareMesh { max_vertices, indices: indices.len() });
    }

    fn begin_session(&mut self) {
        self.calls.push(Call::BeginSession);
    }

    fn bind_shader(&mut self, shader: &u32) {
        self.calls.push(Call::BindShader(*shader));
    }

    fn set_proj_trans(&mut self, combined: Mat4) {
        self.calls.push(Call::SetProjTrans(combined));
    }

    fn bind_texture(&mut self, texture: &FakeTexture) {
        self.calls.push(Call::BindTexture(texture.id));
    }

    fn set_blend_mode(&mut self, mode: BlendMode) {
        self.calls.push(Call::SetBlendMode(mode));
    }

    fn draw_indexed(&mut self, vertices: &[SpriteVertex], index_count: u32) {
        self.calls.push(Call::DrawIndexed { vertices: vertices.len(), indices: index_count });
        self.draws.push(vertices.to_vec());
    }

    fn end_session(&mut self) {
        self.calls.push(Call::EndSession);
    }

    fn release_shader(&mut self, shader: u32) {
        self.calls.push(Call::ReleaseShader(shader));
    }

    fn release_mesh(&mut self) {
        self.calls.push(Call::ReleaseMesh);
    }
}
