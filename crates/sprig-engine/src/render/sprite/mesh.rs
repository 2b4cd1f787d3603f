use super::backend::GraphicsBackend;
use super::vertex::SpriteVertex;

/// Vertices per quad.
pub const VERTICES_PER_QUAD: usize = 4;

/// Indices per quad (two triangles).
pub const INDICES_PER_QUAD: usize = 6;

/// Fixed-capacity vertex staging buffer plus its static quad index pattern.
///
/// Vertices are appended one at a time with [`set_vertex`](Self::set_vertex);
/// [`render`](Self::render) hands the appended range to the backend. The GPU
/// copy of the index pattern is uploaded once by the owner via
/// [`GraphicsBackend::prepare_mesh`].
#[derive(Debug, Clone)]
pub struct Mesh {
    vertices: Vec<SpriteVertex>,
    max_vertices: usize,
    indices: Vec<u16>,
}

impl Mesh {
    /// # Panics
    /// If `max_vertices` is zero, not a multiple of four, or exceeds what
    /// 16-bit indices can address.
    pub fn new(max_vertices: usize) -> Self {
        assert!(
            max_vertices > 0 && max_vertices % VERTICES_PER_QUAD == 0,
            "mesh capacity must be a positive multiple of {VERTICES_PER_QUAD}, got {max_vertices}"
        );
        assert!(
            max_vertices <= u16::MAX as usize + 1,
            "mesh capacity {max_vertices} exceeds the 16-bit index range"
        );
        Self {
            vertices: Vec::with_capacity(max_vertices),
            max_vertices,
            indices: Vec::new(),
        }
    }

    /// Fills the index buffer with two triangles per quad:
    /// `j, j+1, j+2, j+2, j+3, j` for `j = 4 * quad`.
    pub fn set_indices_as_triangle(&mut self) {
        let quads = self.max_vertices / VERTICES_PER_QUAD;
        self.indices.clear();
        self.indices.reserve(quads * INDICES_PER_QUAD);
        for quad in 0..quads {
            // Capacity is bounded by `u16::MAX + 1`, so `j + 3` fits.
            let j = (quad * VERTICES_PER_QUAD) as u16;
            self.indices
                .extend_from_slice(&[j, j + 1, j + 2, j + 2, j + 3, j]);
        }
    }

    /// Appends one vertex, letting `set` fill its attributes.
    ///
    /// # Panics
    /// If the mesh is full.
    #[inline]
    pub fn set_vertex(&mut self, set: impl FnOnce(&mut SpriteVertex)) {
        assert!(
            self.vertices.len() < self.max_vertices,
            "mesh is full ({} vertices); flush before appending",
            self.max_vertices
        );
        let mut v = SpriteVertex::default();
        set(&mut v);
        self.vertices.push(v);
    }

    /// Issues the draw for indices `[0, index_count)` over the appended vertices.
    /// A zero count draws nothing.
    ///
    /// # Panics
    /// If the range reaches past the indices the appended quads cover.
    pub fn render<B: GraphicsBackend>(&self, backend: &mut B, index_count: usize) {
        let available = self.vertices.len() / VERTICES_PER_QUAD * INDICES_PER_QUAD;
        assert!(
            index_count <= available && index_count <= self.indices.len(),
            "mesh render range 0..{index_count} exceeds the {available} indices covered by {} vertices",
            self.vertices.len()
        );
        if index_count == 0 {
            return;
        }
        backend.draw_indexed(&self.vertices, index_count as u32);
    }

    /// Resets the write cursor. Keeps the allocation.
    #[inline]
    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    #[inline]
    pub fn max_vertices(&self) -> usize {
        self.max_vertices
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.max_vertices - self.vertices.len()
    }

    #[inline]
    pub fn vertices(&self) -> &[SpriteVertex] {
        &self.vertices
    }

    #[inline]
    pub fn indices(&self) -> &[u16] {
        &self.indices
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{Call, RecordingBackend};
    use super::*;

    #[test]
    fn triangle_pattern_for_two_quads() {
        let mut mesh = Mesh::new(8);
        mesh.set_indices_as_triangle();
        assert_eq!(mesh.indices(), &[0, 1, 2, 2, 3, 0, 4, 5, 6, 6, 7, 4]);
    }

    #[test]
    fn triangle_pattern_reaches_u16_limit() {
        let mut mesh = Mesh::new(u16::MAX as usize + 1);
        mesh.set_indices_as_triangle();
        assert_eq!(mesh.indices().last(), Some(&65532));
        assert_eq!(mesh.indices()[mesh.indices().len() - 4], 65534);
    }

    #[test]
    fn set_vertex_applies_setter() {
        let mut mesh = Mesh::new(4);
        mesh.set_vertex(|v| {
            v.pos = [1.0, 2.0];
            v.color = 7;
            v.uv = [0.5, 0.25];
        });
        assert_eq!(mesh.len(), 1);
        assert_eq!(mesh.remaining(), 3);
        assert_eq!(
            mesh.vertices()[0],
            SpriteVertex { pos: [1.0, 2.0], color: 7, uv: [0.5, 0.25] }
        );
    }

    #[test]
    #[should_panic(expected = "mesh is full")]
    fn set_vertex_on_full_mesh_panics() {
        let mut mesh = Mesh::new(4);
        for _ in 0..5 {
            mesh.set_vertex(|_| {});
        }
    }

    #[test]
    #[should_panic(expected = "multiple of 4")]
    fn capacity_must_hold_whole_quads() {
        let _ = Mesh::new(6);
    }

    #[test]
    fn render_draws_requested_range() {
        let mut mesh = Mesh::new(8);
        mesh.set_indices_as_triangle();
        for _ in 0..8 {
            mesh.set_vertex(|_| {});
        }
        let mut backend = RecordingBackend::default();
        mesh.render(&mut backend, 6);
        assert_eq!(
            backend.calls,
            vec![Call::DrawIndexed { vertices: 8, indices: 6 }]
        );
    }

    #[test]
    fn render_of_empty_mesh_is_skipped() {
        let mut mesh = Mesh::new(8);
        mesh.set_indices_as_triangle();
        let mut backend = RecordingBackend::default();
        mesh.render(&mut backend, 0);
        assert!(backend.calls.is_empty());
    }

    #[test]
    #[should_panic(expected = "exceeds the 6 indices covered by 4 vertices")]
    fn render_past_appended_quads_panics() {
        let mut mesh = Mesh::new(8);
        mesh.set_indices_as_triangle();
        for _ in 0..4 {
            mesh.set_vertex(|_| {});
        }
        mesh.render(&mut RecordingBackend::default(), 12);
    }

    #[test]
    #[should_panic(expected = "mesh render range")]
    fn render_on_empty_mesh_with_count_panics() {
        let mut mesh = Mesh::new(8);
        mesh.set_indices_as_triangle();
        mesh.render(&mut RecordingBackend::default(), 6);
    }

    #[test]
    fn clear_resets_cursor() {
        let mut mesh = Mesh::new(4);
        mesh.set_vertex(|_| {});
        mesh.clear();
        assert!(mesh.is_empty());
        assert_eq!(mesh.remaining(), 4);
    }
}
