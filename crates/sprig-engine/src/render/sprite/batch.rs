use glam::Mat4;

use crate::coords::{Vec2, Viewport};
use crate::paint::Color;

use super::backend::{BatchTexture, BlendMode, GraphicsBackend, TextureId};
use super::mesh::{Mesh, INDICES_PER_QUAD, VERTICES_PER_QUAD};
use super::quad::{DrawParams, Quad, UvRect};
use super::slice::TextureSlice;

/// Largest sprite count 16-bit indices can address.
pub const MAX_SPRITES: usize = (u16::MAX as usize + 1) / VERTICES_PER_QUAD;

/// Sprite batch configuration.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Quads buffered before a forced flush. Must be in `1..=MAX_SPRITES`.
    pub max_sprites: usize,

    /// Blend mode at construction time; change later with
    /// [`SpriteBatch::set_blend_mode`].
    pub blend_mode: BlendMode,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_sprites: 1000,
            blend_mode: BlendMode::Premultiplied,
        }
    }
}

/// Packs sprite quads into one vertex buffer and draws them in as few calls as possible.
///
/// Usage is bracketed by [`begin`](Self::begin) / [`end`](Self::end). Within a
/// session, buffered quads are flushed (one indexed draw) when:
/// - the next sprite uses a different texture,
/// - the mesh has no room for another quad,
/// - the shader, transform, projection or blend mode changes,
/// - the session ends.
///
/// Calling `draw`/`end` outside a session, or `begin` inside one, is a bug in
/// the caller and panics.
pub struct SpriteBatch<B: GraphicsBackend> {
    backend: B,
    mesh: Mesh,

    shader: B::Shader,
    transform: Mat4,
    projection: Mat4,
    blend_mode: BlendMode,

    color: Color,
    color_packed: u32,

    drawing: bool,
    last_texture: Option<TextureId>,

    render_calls: u32,
    total_render_calls: u64,
    max_sprites_in_batch: usize,
}

impl<B: GraphicsBackend> SpriteBatch<B> {
    /// Creates a batch drawing into `viewport` with an orthographic projection.
    ///
    /// # Panics
    /// If `config.max_sprites` is zero or above [`MAX_SPRITES`].
    pub fn new(mut backend: B, viewport: Viewport, config: BatchConfig) -> Self {
        assert!(
            (1..=MAX_SPRITES).contains(&config.max_sprites),
            "SpriteBatch max_sprites must be in 1..={MAX_SPRITES}, got {}",
            config.max_sprites
        );

        let mut mesh = Mesh::new(config.max_sprites * VERTICES_PER_QUAD);
        mesh.set_indices_as_triangle();
        backend.prepare_mesh(mesh.max_vertices(), mesh.indices());

        let shader = backend.default_shader();

        log::debug!(
            "sprite batch created: {} sprites, viewport {}x{}",
            config.max_sprites,
            viewport.width,
            viewport.height
        );

        Self {
            backend,
            mesh,
            shader,
            transform: Mat4::IDENTITY,
            projection: viewport.ortho_projection(),
            blend_mode: config.blend_mode,
            color: Color::WHITE,
            color_packed: Color::WHITE.pack(),
            drawing: false,
            last_texture: None,
            render_calls: 0,
            total_render_calls: 0,
            max_sprites_in_batch: 0,
        }
    }

    // ── session ───────────────────────────────────────────────────────────

    /// Starts a session, optionally replacing the projection matrix first.
    ///
    /// # Panics
    /// If a session is already active.
    pub fn begin(&mut self, projection: Option<Mat4>) {
        assert!(!self.drawing, "SpriteBatch::end must be called before begin");

        self.render_calls = 0;
        if let Some(p) = projection {
            self.projection = p;
        }

        self.backend.begin_session();
        self.backend.bind_shader(&self.shader);
        self.upload_matrices();

        self.drawing = true;
    }

    /// Flushes what is left and closes the session.
    ///
    /// # Panics
    /// If no session is active.
    pub fn end(&mut self) {
        assert!(self.drawing, "SpriteBatch::begin must be called before end");

        self.flush();
        self.last_texture = None;
        self.drawing = false;
        self.backend.end_session();
    }

    /// Runs `f` inside a `begin`/`end` pair.
    pub fn run<R>(&mut self, projection: Option<Mat4>, f: impl FnOnce(&mut Self) -> R) -> R {
        self.begin(projection);
        let out = f(self);
        self.end();
        out
    }

    // ── drawing ───────────────────────────────────────────────────────────

    /// Draws `texture` with its top-left corner at `(x, y)`.
    ///
    /// # Panics
    /// If no session is active.
    pub fn draw(&mut self, texture: &B::Texture, x: f32, y: f32, params: DrawParams) {
        assert!(self.drawing, "SpriteBatch::begin must be called before draw");

        let size = params.size.unwrap_or_else(|| {
            Vec2::new(texture.width() as f32, texture.height() as f32)
        });
        self.prepare_quad(texture);
        self.push_quad(Quad::layout(x, y, size, &params, UvRect::FULL));
    }

    /// Draws a sub-rectangle of a texture with its top-left corner at `(x, y)`.
    ///
    /// # Panics
    /// If no session is active.
    pub fn draw_slice(
        &mut self,
        slice: &TextureSlice<'_, B::Texture>,
        x: f32,
        y: f32,
        params: DrawParams,
    ) {
        assert!(self.drawing, "SpriteBatch::begin must be called before draw");

        let size = params
            .size
            .unwrap_or_else(|| Vec2::new(slice.width() as f32, slice.height() as f32));
        self.prepare_quad(slice.texture());
        self.push_quad(Quad::layout(x, y, size, &params, slice.uv()));
    }

    /// Draws every buffered quad with one indexed call and resets the buffer.
    pub fn flush(&mut self) {
        if self.mesh.is_empty() {
            return;
        }

        let sprites = self.mesh.len() / VERTICES_PER_QUAD;
        self.render_calls += 1;
        self.total_render_calls += 1;
        self.max_sprites_in_batch = self.max_sprites_in_batch.max(sprites);

        log::trace!("sprite batch flush: {sprites} sprites");

        self.backend.set_blend_mode(self.blend_mode);
        self.mesh.render(&mut self.backend, sprites * INDICES_PER_QUAD);
        self.mesh.clear();
    }

    fn prepare_quad(&mut self, texture: &B::Texture) {
        if self.last_texture != Some(texture.id()) {
            self.switch_texture(texture);
        } else if self.mesh.remaining() < VERTICES_PER_QUAD {
            self.flush();
        }
    }

    fn switch_texture(&mut self, texture: &B::Texture) {
        self.flush();
        self.last_texture = Some(texture.id());
        self.backend.bind_texture(texture);
    }

    fn push_quad(&mut self, quad: Quad) {
        let color = self.color_packed;
        for (corner, uv) in quad.corners.iter().zip(quad.uvs) {
            self.mesh.set_vertex(|v| {
                v.pos = [corner.x, corner.y];
                v.color = color;
                v.uv = uv;
            });
        }
    }

    // ── state ─────────────────────────────────────────────────────────────

    /// Replaces the shader and returns the previous one.
    ///
    /// Buffered quads are drawn with the old shader first.
    pub fn set_shader(&mut self, shader: B::Shader) -> B::Shader {
        if self.drawing {
            self.flush();
        }
        let previous = std::mem::replace(&mut self.shader, shader);
        if self.drawing {
            self.backend.bind_shader(&self.shader);
            self.upload_matrices();
        }
        previous
    }

    /// Replaces the model transform; flushes first while drawing.
    pub fn set_transform_matrix(&mut self, transform: Mat4) {
        if self.drawing {
            self.flush();
        }
        self.transform = transform;
        if self.drawing {
            self.upload_matrices();
        }
    }

    /// Replaces the projection; flushes first while drawing.
    pub fn set_projection_matrix(&mut self, projection: Mat4) {
        if self.drawing {
            self.flush();
        }
        self.projection = projection;
        if self.drawing {
            self.upload_matrices();
        }
    }

    /// Changes the blend mode; flushes first while drawing if it differs.
    pub fn set_blend_mode(&mut self, mode: BlendMode) {
        if self.drawing && mode != self.blend_mode {
            self.flush();
        }
        self.blend_mode = mode;
    }

    /// Sets the tint for quads appended from now on. Does not flush.
    pub fn set_color(&mut self, color: Color) {
        if self.color == color {
            return;
        }
        self.color = color;
        self.color_packed = color.pack();
    }

    fn upload_matrices(&mut self) {
        self.backend.set_proj_trans(self.projection * self.transform);
    }

    // ── accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn shader(&self) -> &B::Shader {
        &self.shader
    }

    #[inline]
    pub fn transform_matrix(&self) -> Mat4 {
        self.transform
    }

    #[inline]
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    #[inline]
    pub fn blend_mode(&self) -> BlendMode {
        self.blend_mode
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// Draw calls issued since the last `begin`.
    #[inline]
    pub fn render_calls(&self) -> u32 {
        self.render_calls
    }

    /// Draw calls issued over the lifetime of the batch.
    #[inline]
    pub fn total_render_calls(&self) -> u64 {
        self.total_render_calls
    }

    /// Largest number of sprites a single draw call has covered.
    #[inline]
    pub fn max_sprites_in_batch(&self) -> usize {
        self.max_sprites_in_batch
    }

    /// Quads currently buffered and not yet drawn.
    #[inline]
    pub fn pending_sprites(&self) -> usize {
        self.mesh.len() / VERTICES_PER_QUAD
    }

    #[inline]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutable backend access, e.g. to retarget between sessions.
    #[inline]
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Releases the mesh and shader and returns the backend.
    ///
    /// # Panics
    /// If a session is still active.
    pub fn dispose(self) -> B {
        assert!(!self.drawing, "SpriteBatch::end must be called before dispose");

        let Self { mut backend, shader, total_render_calls, .. } = self;
        backend.release_mesh();
        backend.release_shader(shader);
        log::debug!("sprite batch disposed after {total_render_calls} draw calls");
        backend
    }
}
