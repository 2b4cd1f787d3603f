use bytemuck::{Pod, Zeroable};

/// Interleaved sprite vertex: position, packed premultiplied RGBA8, UV.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct SpriteVertex {
    pub pos: [f32; 2],
    pub color: u32,
    pub uv: [f32; 2],
}

impl SpriteVertex {
    /// Size of one vertex in bytes (20).
    pub const SIZE: usize = std::mem::size_of::<SpriteVertex>();

    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x2, // pos
        1 => Unorm8x4,  // color
        2 => Float32x2  // uv
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: Self::SIZE as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_is_tightly_packed() {
        assert_eq!(SpriteVertex::SIZE, 20);
        assert_eq!(std::mem::align_of::<SpriteVertex>(), 4);
    }
}
