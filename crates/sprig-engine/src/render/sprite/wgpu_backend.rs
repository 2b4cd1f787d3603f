use std::collections::HashMap;
use std::num::NonZeroU64;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::{ensure, Result};
use glam::Mat4;
use wgpu::util::DeviceExt;

use crate::render::{RenderCtx, RenderTarget};

use super::backend::{BatchTexture, BlendMode, GraphicsBackend, TextureId};
use super::vertex::SpriteVertex;

const PROJ_TRANS_SIZE: u64 = std::mem::size_of::<[f32; 16]>() as u64;

/// Matrix slots allocated per session before the uniform arena grows.
const INITIAL_UNIFORM_SLOTS: u64 = 64;

/// Mesh-sized vertex uploads that fit in the vertex arena before it grows.
const INITIAL_VERTEX_FLUSHES: u64 = 4;

// ── shader ────────────────────────────────────────────────────────────────

/// Identity of a [`WgpuShader`], used to key cached pipelines.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ShaderId(u64);

impl ShaderId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// A WGSL module with `vs_main`/`fs_main` entry points matching the sprite
/// vertex layout and bind groups (see `shaders/sprite.wgsl`).
#[derive(Debug, Clone)]
pub struct WgpuShader {
    id: ShaderId,
    module: Arc<wgpu::ShaderModule>,
}

impl WgpuShader {
    #[inline]
    pub fn id(&self) -> ShaderId {
        self.id
    }
}

// ── texture ───────────────────────────────────────────────────────────────

#[derive(Debug)]
struct TextureInner {
    /// Storage behind the bind group's view.
    _texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
}

/// GPU texture with its sprite bind group. Cheap to clone.
#[derive(Debug, Clone)]
pub struct WgpuTexture {
    id: TextureId,
    width: u32,
    height: u32,
    inner: Arc<TextureInner>,
}

impl BatchTexture for WgpuTexture {
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

// ── arena ─────────────────────────────────────────────────────────────────

/// Buffer written at increasing offsets during one session.
///
/// Every flush recorded into the session's encoder needs its own byte range:
/// `queue.write_buffer` lands before the encoder executes, so reusing a range
/// would make earlier passes read later data.
struct Arena {
    label: &'static str,
    usage: wgpu::BufferUsages,
    buffer: wgpu::Buffer,
    capacity: u64,
    cursor: u64,
}

impl Arena {
    fn new(device: &wgpu::Device, label: &'static str, usage: wgpu::BufferUsages, capacity: u64) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: capacity,
            usage: usage | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        Self { label, usage, buffer, capacity, cursor: 0 }
    }

    fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Reserves `size` bytes at an `align`-ed offset. Returns the offset and
    /// whether the backing buffer was replaced.
    ///
    /// A replaced buffer stays alive as long as passes recorded against it.
    fn alloc(&mut self, device: &wgpu::Device, size: u64, align: u64) -> (u64, bool) {
        let (offset, cursor, grew) = place(self.cursor, self.capacity, size, align);
        if grew {
            let capacity = grown_capacity(self.capacity, size);
            log::debug!("{}: growing {} -> {} bytes", self.label, self.capacity, capacity);
            *self = Self::new(device, self.label, self.usage, capacity);
        }
        self.cursor = cursor;
        (offset, grew)
    }

    fn destroy(self) {
        self.buffer.destroy();
    }
}

/// Places `size` bytes after `cursor` in an arena of `capacity` bytes.
///
/// Returns `(offset, new_cursor, grew)`. When the range does not fit, the
/// allocation moves to offset 0 of a fresh, larger buffer.
fn place(cursor: u64, capacity: u64, size: u64, align: u64) -> (u64, u64, bool) {
    let offset = align_to(cursor, align);
    if offset + size <= capacity {
        (offset, offset + size, false)
    } else {
        (0, size, true)
    }
}

#[inline]
fn align_to(value: u64, align: u64) -> u64 {
    debug_assert!(align.is_power_of_two());
    (value + align - 1) & !(align - 1)
}

#[inline]
fn grown_capacity(current: u64, required: u64) -> u64 {
    (current * 2).max(required).next_power_of_two()
}

/// First piece of state a flush needs that is not bound.
fn missing_flush_state(session: bool, texture: bool, shader: bool) -> Option<&'static str> {
    if !session {
        Some("session")
    } else if !texture {
        Some("texture")
    } else if !shader {
        Some("shader")
    } else {
        None
    }
}

// ── blend ─────────────────────────────────────────────────────────────────

fn blend_state(mode: BlendMode) -> wgpu::BlendState {
    match mode {
        BlendMode::Premultiplied => wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING,
        BlendMode::Alpha => {
            let c = wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::SrcAlpha,
                dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
                operation: wgpu::BlendOperation::Add,
            };
            wgpu::BlendState { color: c, alpha: c }
        }
        BlendMode::Additive => wgpu::BlendState {
            color: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::SrcAlpha,
                dst_factor: wgpu::BlendFactor::One,
                operation: wgpu::BlendOperation::Add,
            },
            alpha: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::One,
                dst_factor: wgpu::BlendFactor::One,
                operation: wgpu::BlendOperation::Add,
            },
        },
    }
}

// ── device ────────────────────────────────────────────────────────────────

/// [`GraphicsBackend`] over wgpu.
///
/// Each session records into its own command encoder and is submitted by
/// `end_session`; every flush becomes one render pass with one `draw_indexed`.
/// Call [`set_target`](Self::set_target) before a session to choose the view.
pub struct WgpuSpriteDevice {
    device: wgpu::Device,
    queue: wgpu::Queue,
    target_format: wgpu::TextureFormat,

    proj_bgl: wgpu::BindGroupLayout,
    texture_bgl: wgpu::BindGroupLayout,
    pipeline_layout: wgpu::PipelineLayout,
    sampler: wgpu::Sampler,
    pipelines: HashMap<(ShaderId, BlendMode), wgpu::RenderPipeline>,

    uniform_stride: u64,
    uniform_arena: Arena,
    proj_bind_group: wgpu::BindGroup,

    index_buffer: Option<wgpu::Buffer>,
    vertex_arena: Option<Arena>,

    target: Option<wgpu::TextureView>,
    encoder: Option<wgpu::CommandEncoder>,

    shader: Option<WgpuShader>,
    texture: Option<WgpuTexture>,
    blend_mode: BlendMode,
    proj_trans: Mat4,
    /// Dynamic offset of the uploaded `proj_trans`; `None` when it must be re-uploaded.
    proj_offset: Option<u32>,

    warned_no_target: bool,
    warned_dropped_flush: bool,
}

impl WgpuSpriteDevice {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue, target_format: wgpu::TextureFormat) -> Self {
        let proj_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("sprig sprite proj bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: NonZeroU64::new(PROJ_TRANS_SIZE),
                },
                count: None,
            }],
        });

        let texture_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("sprig sprite texture bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("sprig sprite pipeline layout"),
            bind_group_layouts: &[&proj_bgl, &texture_bgl],
            immediate_size: 0,
        });

        // Pixel art friendly: no filtering between texels.
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("sprig sprite sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let align = device.limits().min_uniform_buffer_offset_alignment.max(1) as u64;
        let uniform_stride = align_to(PROJ_TRANS_SIZE, align);
        let uniform_arena = Arena::new(
            device,
            "sprig sprite uniform arena",
            wgpu::BufferUsages::UNIFORM,
            uniform_stride * INITIAL_UNIFORM_SLOTS,
        );
        let proj_bind_group = create_proj_bind_group(device, &proj_bgl, &uniform_arena.buffer);

        Self {
            device: device.clone(),
            queue: queue.clone(),
            target_format,
            proj_bgl,
            texture_bgl,
            pipeline_layout,
            sampler,
            pipelines: HashMap::new(),
            uniform_stride,
            uniform_arena,
            proj_bind_group,
            index_buffer: None,
            vertex_arena: None,
            target: None,
            encoder: None,
            shader: None,
            texture: None,
            blend_mode: BlendMode::default(),
            proj_trans: Mat4::IDENTITY,
            proj_offset: None,
            warned_no_target: false,
            warned_dropped_flush: false,
        }
    }

    /// Selects the color view that following sessions draw into.
    ///
    /// Pipelines are rebuilt lazily when the surface format changed.
    pub fn set_target(&mut self, ctx: &RenderCtx<'_>, target: &RenderTarget<'_>) {
        if ctx.surface_format != self.target_format {
            log::debug!(
                "sprite target format changed {:?} -> {:?}; dropping {} pipelines",
                self.target_format,
                ctx.surface_format,
                self.pipelines.len()
            );
            self.target_format = ctx.surface_format;
            self.pipelines.clear();
        }
        self.target = Some(target.color_view.clone());
        self.warned_no_target = false;
    }

    /// Forgets the current target, e.g. once the frame has been presented.
    pub fn clear_target(&mut self) {
        self.target = None;
    }

    /// Uploads premultiplied, row-major RGBA8 pixels (sRGB) as a sprite texture.
    pub fn create_texture(&self, label: &str, width: u32, height: u32, rgba: &[u8]) -> Result<WgpuTexture> {
        ensure!(width > 0 && height > 0, "texture '{label}' has zero size ({width}x{height})");
        let max = self.device.limits().max_texture_dimension_2d;
        ensure!(
            width <= max && height <= max,
            "texture '{label}' is {width}x{height}; device limit is {max}"
        );
        let expected = width as usize * height as usize * 4;
        ensure!(
            rgba.len() == expected,
            "texture '{label}' expects {expected} bytes of RGBA8, got {}",
            rgba.len()
        );

        let size = wgpu::Extent3d { width, height, depth_or_array_layers: 1 };
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("sprig sprite texture bind group"),
            layout: &self.texture_bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        });

        Ok(WgpuTexture {
            id: TextureId::next(),
            width,
            height,
            inner: Arc::new(TextureInner { _texture: texture, bind_group }),
        })
    }

    /// Compiles a WGSL sprite shader.
    pub fn create_shader(&self, label: &str, wgsl: &str) -> WgpuShader {
        let module = self.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Wgsl(wgsl.into()),
        });
        WgpuShader { id: ShaderId::next(), module: Arc::new(module) }
    }

    fn upload_proj_trans(&mut self) -> u32 {
        let (offset, grew) =
            self.uniform_arena
                .alloc(&self.device, self.uniform_stride, self.uniform_stride);
        if grew {
            self.proj_bind_group =
                create_proj_bind_group(&self.device, &self.proj_bgl, &self.uniform_arena.buffer);
        }
        self.queue.write_buffer(
            &self.uniform_arena.buffer,
            offset,
            bytemuck::cast_slice(&self.proj_trans.to_cols_array()),
        );
        // Arena capacity is far below 4 GiB.
        offset as u32
    }
}

fn create_proj_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    buffer: &wgpu::Buffer,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("sprig sprite proj bind group"),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                buffer,
                offset: 0,
                size: NonZeroU64::new(PROJ_TRANS_SIZE),
            }),
        }],
    })
}

fn create_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    format: wgpu::TextureFormat,
    shader: &WgpuShader,
    blend: BlendMode,
) -> wgpu::RenderPipeline {
    log::debug!("creating sprite pipeline for {:?} / {blend:?} / {format:?}", shader.id);

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("sprig sprite pipeline"),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: &shader.module,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &[SpriteVertex::layout()],
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader.module,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(blend_state(blend)),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            // Flipped and rotated sprites change winding.
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}

impl GraphicsBackend for WgpuSpriteDevice {
    type Texture = WgpuTexture;
    type Shader = WgpuShader;

    fn default_shader(&mut self) -> WgpuShader {
        self.create_shader("sprig sprite shader", include_str!("shaders/sprite.wgsl"))
    }

    fn prepare_mesh(&mut self, max_vertices: usize, indices: &[u16]) {
        self.index_buffer = Some(self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("sprig sprite ibo"),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        }));

        let mesh_bytes = (max_vertices * SpriteVertex::SIZE) as u64;
        self.vertex_arena = Some(Arena::new(
            &self.device,
            "sprig sprite vertex arena",
            wgpu::BufferUsages::VERTEX,
            mesh_bytes * INITIAL_VERTEX_FLUSHES,
        ));
    }

    fn begin_session(&mut self) {
        self.encoder = Some(self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("sprig sprite batch encoder"),
        }));
        self.uniform_arena.reset();
        if let Some(arena) = self.vertex_arena.as_mut() {
            arena.reset();
        }
        self.proj_offset = None;
    }

    fn bind_shader(&mut self, shader: &WgpuShader) {
        self.shader = Some(shader.clone());
    }

    fn set_proj_trans(&mut self, combined: Mat4) {
        self.proj_trans = combined;
        self.proj_offset = None;
    }

    fn bind_texture(&mut self, texture: &WgpuTexture) {
        self.texture = Some(texture.clone());
    }

    fn set_blend_mode(&mut self, mode: BlendMode) {
        self.blend_mode = mode;
    }

    fn draw_indexed(&mut self, vertices: &[SpriteVertex], index_count: u32) {
        if self.target.is_none() {
            if !self.warned_no_target {
                log::warn!("sprite flush without a render target; call set_target first");
                self.warned_no_target = true;
            }
            return;
        }
        if vertices.is_empty() {
            return;
        }
        if let Some(missing) = missing_flush_state(
            self.encoder.is_some(),
            self.texture.is_some(),
            self.shader.is_some(),
        ) {
            // The batch already counted this flush as a render call.
            if !self.warned_dropped_flush {
                log::warn!("sprite flush dropped: missing {missing}");
                self.warned_dropped_flush = true;
            }
            return;
        }

        let proj_offset = match self.proj_offset {
            Some(offset) => offset,
            None => {
                let offset = self.upload_proj_trans();
                self.proj_offset = Some(offset);
                offset
            }
        };

        let bytes: &[u8] = bytemuck::cast_slice(vertices);
        let len = bytes.len() as u64;
        let Some(arena) = self.vertex_arena.as_mut() else { return };
        let (vertex_offset, _) = arena.alloc(&self.device, len, wgpu::COPY_BUFFER_ALIGNMENT);
        self.queue.write_buffer(&arena.buffer, vertex_offset, bytes);

        let Some(shader) = self.shader.as_ref() else { return };
        let key = (shader.id, self.blend_mode);
        let pipeline = self.pipelines.entry(key).or_insert_with(|| {
            create_pipeline(&self.device, &self.pipeline_layout, self.target_format, shader, key.1)
        });

        let (Some(encoder), Some(target), Some(texture), Some(index_buffer), Some(arena)) = (
            self.encoder.as_mut(),
            self.target.as_ref(),
            self.texture.as_ref(),
            self.index_buffer.as_ref(),
            self.vertex_arena.as_ref(),
        ) else {
            return;
        };

        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("sprig sprite batch pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, &self.proj_bind_group, &[proj_offset]);
        rpass.set_bind_group(1, &texture.inner.bind_group, &[]);
        rpass.set_vertex_buffer(0, arena.buffer.slice(vertex_offset..vertex_offset + len));
        rpass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..index_count, 0, 0..1);
    }

    fn end_session(&mut self) {
        if let Some(encoder) = self.encoder.take() {
            self.queue.submit(std::iter::once(encoder.finish()));
        }
        self.texture = None;
        self.blend_mode = BlendMode::default();
    }

    fn release_shader(&mut self, shader: WgpuShader) {
        self.pipelines.retain(|(id, _), _| *id != shader.id);
        if self.shader.as_ref().is_some_and(|s| s.id == shader.id) {
            self.shader = None;
        }
    }

    fn release_mesh(&mut self) {
        if let Some(ibo) = self.index_buffer.take() {
            ibo.destroy();
        }
        if let Some(arena) = self.vertex_arena.take() {
            arena.destroy();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn align_to_rounds_up_to_power_of_two() {
        assert_eq!(align_to(0, 256), 0);
        assert_eq!(align_to(1, 256), 256);
        assert_eq!(align_to(256, 256), 256);
        assert_eq!(align_to(20, 4), 20);
        assert_eq!(align_to(21, 4), 24);
    }

    #[test]
    fn grown_capacity_at_least_doubles_and_fits_request() {
        assert_eq!(grown_capacity(1024, 100), 2048);
        assert_eq!(grown_capacity(1024, 5000), 8192);
    }

    #[test]
    fn consecutive_placements_do_not_overlap() {
        let (a, cursor, grew_a) = place(0, 4096, 100, wgpu::COPY_BUFFER_ALIGNMENT);
        let (b, end, grew_b) = place(cursor, 4096, 200, wgpu::COPY_BUFFER_ALIGNMENT);
        assert!(!grew_a && !grew_b);
        assert_eq!((a, cursor), (0, 100));
        assert_eq!(b, 100);
        assert!(a + 100 <= b);
        assert_eq!(end, 300);
    }

    #[test]
    fn vertex_placements_are_copy_aligned() {
        let (_, cursor, _) = place(0, 4096, 20, wgpu::COPY_BUFFER_ALIGNMENT);
        let (offset, _, _) = place(cursor, 4096, 20, wgpu::COPY_BUFFER_ALIGNMENT);
        assert_eq!(offset % wgpu::COPY_BUFFER_ALIGNMENT, 0);
        assert!(offset >= 20);
    }

    #[test]
    fn uniform_placements_land_on_stride_multiples() {
        let stride = align_to(PROJ_TRANS_SIZE, 256);
        let capacity = stride * 4;
        let mut cursor = 0;
        for slot in 0..4 {
            let (offset, next, grew) = place(cursor, capacity, stride, stride);
            assert!(!grew);
            assert_eq!(offset, slot * stride);
            assert_eq!(offset % stride, 0);
            cursor = next;
        }
        // Fifth matrix no longer fits.
        assert_eq!(place(cursor, capacity, stride, stride), (0, stride, true));
    }

    #[test]
    fn reset_cursor_places_at_start() {
        let (_, cursor, _) = place(0, 1024, 512, 4);
        assert_eq!(cursor, 512);
        // `Arena::reset` zeroes the cursor.
        assert_eq!(place(0, 1024, 512, 4), (0, 512, false));
    }

    #[test]
    fn overflow_moves_to_start_of_grown_buffer() {
        let (offset, cursor, grew) = place(1000, 1024, 100, 4);
        assert!(grew);
        assert_eq!((offset, cursor), (0, 100));
        assert!(grown_capacity(1024, 100) >= 100);
    }

    #[test]
    fn exact_fit_does_not_grow() {
        assert_eq!(place(1000, 1024, 24, 4), (1000, 1024, false));
    }

    #[test]
    fn flush_state_reports_first_missing_piece() {
        assert_eq!(missing_flush_state(true, true, true), None);
        assert_eq!(missing_flush_state(false, true, true), Some("session"));
        assert_eq!(missing_flush_state(true, false, true), Some("texture"));
        assert_eq!(missing_flush_state(true, true, false), Some("shader"));
        assert_eq!(missing_flush_state(false, false, false), Some("session"));
    }

    #[test]
    fn premultiplied_is_default_blend() {
        assert_eq!(
            blend_state(BlendMode::default()),
            wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING
        );
    }

    #[test]
    fn alpha_blend_uses_src_alpha_for_color_and_alpha() {
        let s = blend_state(BlendMode::Alpha);
        assert_eq!(s.color.src_factor, wgpu::BlendFactor::SrcAlpha);
        assert_eq!(s.alpha.dst_factor, wgpu::BlendFactor::OneMinusSrcAlpha);
    }

    #[test]
    fn additive_blend_keeps_destination() {
        let s = blend_state(BlendMode::Additive);
        assert_eq!(s.color.dst_factor, wgpu::BlendFactor::One);
        assert_eq!(s.alpha.dst_factor, wgpu::BlendFactor::One);
    }
}
