use glam::Mat4;

/// Viewport size in logical pixels.
///
/// The default sprite projection maps `(0, 0)` to the top-left corner and
/// `(width, height)` to the bottom-right corner of this viewport.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Orthographic projection from logical pixels (+Y down) to wgpu clip space.
    ///
    /// Degenerate sizes are clamped to one pixel so the matrix stays invertible.
    pub fn ortho_projection(self) -> Mat4 {
        let w = if self.width.is_finite() { self.width.max(1.0) } else { 1.0 };
        let h = if self.height.is_finite() { self.height.max(1.0) } else { 1.0 };
        Mat4::orthographic_rh(0.0, w, h, 0.0, -1.0, 1.0)
    }
}
