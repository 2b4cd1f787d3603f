use crate::coords::Vec2;

/// Per-draw placement of a sprite.
///
/// `origin` is the pivot, relative to the sprite's top-left corner, that
/// scale and rotation are applied around. The sprite's top-left corner lands
/// on the `(x, y)` passed to the draw call.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DrawParams {
    pub origin: Vec2,
    /// Size in logical pixels. `None` uses the texture (or slice) size.
    pub size: Option<Vec2>,
    pub scale: Vec2,
    /// Radians, clockwise on screen (+Y down).
    pub rotation: f32,
    pub flip_x: bool,
    pub flip_y: bool,
}

impl Default for DrawParams {
    fn default() -> Self {
        Self {
            origin: Vec2::ZERO,
            size: None,
            scale: Vec2::ONE,
            rotation: 0.0,
            flip_x: false,
            flip_y: false,
        }
    }
}

impl DrawParams {
    #[inline]
    pub fn origin(mut self, x: f32, y: f32) -> Self {
        self.origin = Vec2::new(x, y);
        self
    }

    #[inline]
    pub fn size(mut self, width: f32, height: f32) -> Self {
        self.size = Some(Vec2::new(width, height));
        self
    }

    #[inline]
    pub fn scale(mut self, sx: f32, sy: f32) -> Self {
        self.scale = Vec2::new(sx, sy);
        self
    }

    #[inline]
    pub fn rotation(mut self, radians: f32) -> Self {
        self.rotation = radians;
        self
    }

    #[inline]
    pub fn flip(mut self, flip_x: bool, flip_y: bool) -> Self {
        self.flip_x = flip_x;
        self.flip_y = flip_y;
        self
    }
}

/// Texture-space bounds: `(u, v)` is the top-left texel edge, `(u2, v2)` the bottom-right.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct UvRect {
    pub u: f32,
    pub v: f32,
    pub u2: f32,
    pub v2: f32,
}

impl UvRect {
    pub const FULL: UvRect = UvRect { u: 0.0, v: 0.0, u2: 1.0, v2: 1.0 };

    /// Swaps the horizontal and/or vertical bounds.
    #[inline]
    pub fn flipped(self, flip_x: bool, flip_y: bool) -> Self {
        let (u, u2) = if flip_x { (self.u2, self.u) } else { (self.u, self.u2) };
        let (v, v2) = if flip_y { (self.v2, self.v) } else { (self.v, self.v2) };
        Self { u, v, u2, v2 }
    }
}

/// Four corners of a sprite in world space with their texture coordinates.
///
/// Corner order: top-left, bottom-left, bottom-right, top-right (before rotation).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Quad {
    pub corners: [Vec2; 4],
    pub uvs: [[f32; 2]; 4],
}

impl Quad {
    /// Lays out a sprite of `size` at `(x, y)`.
    ///
    /// Rotated quads compute the fourth corner by completing the parallelogram
    /// spanned by the first three instead of rotating it, which saves one
    /// rotation and is exact as long as the rotated edges stay perpendicular.
    pub fn layout(x: f32, y: f32, size: Vec2, params: &DrawParams, uv: UvRect) -> Self {
        let world_origin = Vec2::new(x + params.origin.x, y + params.origin.y);

        let mut p1 = -params.origin;
        let mut p3 = size - params.origin;
        if params.scale != Vec2::ONE {
            p1 = p1.scaled(params.scale);
            p3 = p3.scaled(params.scale);
        }
        let p2 = Vec2::new(p1.x, p3.y);
        let p4 = Vec2::new(p3.x, p1.y);

        let corners = if params.rotation == 0.0 {
            [p1, p2, p3, p4]
        } else {
            let (sin, cos) = params.rotation.sin_cos();
            let r1 = p1.rotated(sin, cos);
            let r2 = p2.rotated(sin, cos);
            let r3 = p3.rotated(sin, cos);
            let r4 = Vec2::new(r1.x + (r3.x - r2.x), r3.y - (r2.y - r1.y));
            [r1, r2, r3, r4]
        }
        .map(|c| c + world_origin);

        let uv = uv.flipped(params.flip_x, params.flip_y);
        Self {
            corners,
            uvs: [[uv.u, uv.v], [uv.u, uv.v2], [uv.u2, uv.v2], [uv.u2, uv.v]],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < 1e-4 && (a.y - b.y).abs() < 1e-4
    }

    #[test]
    fn unrotated_corners_are_offsets_plus_world_origin() {
        let params = DrawParams::default().origin(4.0, 2.0);
        let q = Quad::layout(10.0, 20.0, Vec2::new(16.0, 8.0), &params, UvRect::FULL);
        // world origin (14, 22); offsets (-4,-2) (-4,6) (12,6) (12,-2)
        assert_eq!(
            q.corners,
            [
                Vec2::new(10.0, 20.0),
                Vec2::new(10.0, 28.0),
                Vec2::new(26.0, 28.0),
                Vec2::new(26.0, 20.0),
            ]
        );
    }

    #[test]
    fn scale_applies_around_origin() {
        let params = DrawParams::default().origin(5.0, 5.0).scale(2.0, 3.0);
        let q = Quad::layout(0.0, 0.0, Vec2::new(10.0, 10.0), &params, UvRect::FULL);
        assert_eq!(q.corners[0], Vec2::new(-5.0, -10.0));
        assert_eq!(q.corners[2], Vec2::new(15.0, 20.0));
    }

    #[test]
    fn quarter_turn_rotates_around_origin() {
        let params = DrawParams::default()
            .origin(5.0, 5.0)
            .rotation(std::f32::consts::FRAC_PI_2);
        let q = Quad::layout(0.0, 0.0, Vec2::new(10.0, 10.0), &params, UvRect::FULL);
        // Rotating (x, y) -> (-y, x) around (5, 5).
        assert!(close(q.corners[0], Vec2::new(10.0, 0.0)));
        assert!(close(q.corners[1], Vec2::new(0.0, 0.0)));
        assert!(close(q.corners[2], Vec2::new(0.0, 10.0)));
        assert!(close(q.corners[3], Vec2::new(10.0, 10.0)));
    }

    #[test]
    fn fourth_corner_matches_full_rotation_for_rectangles() {
        let params = DrawParams::default().origin(3.0, 1.0).rotation(0.7);
        let q = Quad::layout(2.0, 2.0, Vec2::new(12.0, 5.0), &params, UvRect::FULL);
        let (sin, cos) = 0.7f32.sin_cos();
        let expected = Vec2::new(9.0, -1.0).rotated(sin, cos) + Vec2::new(5.0, 3.0);
        assert!(close(q.corners[3], expected));
    }

    #[test]
    fn uvs_unflipped_follow_corner_order() {
        let q = Quad::layout(0.0, 0.0, Vec2::ONE, &DrawParams::default(), UvRect::FULL);
        assert_eq!(q.uvs, [[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0]]);
    }

    #[test]
    fn flip_flags_swap_each_axis() {
        let q = Quad::layout(0.0, 0.0, Vec2::ONE, &DrawParams::default().flip(true, false), UvRect::FULL);
        assert_eq!(q.uvs, [[1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]]);

        let q = Quad::layout(0.0, 0.0, Vec2::ONE, &DrawParams::default().flip(false, true), UvRect::FULL);
        assert_eq!(q.uvs, [[0.0, 1.0], [0.0, 0.0], [1.0, 0.0], [1.0, 1.0]]);
    }
}
