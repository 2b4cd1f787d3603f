/// Linear premultiplied RGBA color.
///
/// Invariant:
/// - `rgb` components are expected to be multiplied by `a` (premultiplied alpha).
///
/// The sprite batch packs this into one `u32` per vertex (see [`Color::pack`]),
/// which the vertex layout reads back as `Unorm8x4`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Color {
    pub r: f32, // premultiplied
    pub g: f32, // premultiplied
    pub b: f32, // premultiplied
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::from_premul(1.0, 1.0, 1.0, 1.0);

    /// Creates a premultiplied color from premultiplied components.
    #[inline]
    pub const fn from_premul(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a premultiplied color from straight alpha components.
    #[inline]
    pub fn from_straight(r: f32, g: f32, b: f32, a: f32) -> Self {
        let a = a.clamp(0.0, 1.0);
        Self {
            r: r.clamp(0.0, 1.0) * a,
            g: g.clamp(0.0, 1.0) * a,
            b: b.clamp(0.0, 1.0) * a,
            a,
        }
    }

    /// Quantizes to premultiplied RGBA8, clamping out-of-range channels.
    #[inline]
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |c: f32| {
            if c.is_nan() {
                0
            } else {
                (c.clamp(0.0, 1.0) * 255.0 + 0.5) as u8
            }
        };
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    /// Packs into a `u32` whose little-endian bytes are `r, g, b, a`.
    #[inline]
    pub fn pack(self) -> u32 {
        u32::from_le_bytes(self.to_rgba8())
    }

    /// Converts to the clear color expected by a wgpu load op.
    #[inline]
    pub fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: self.r as f64,
            g: self.g as f64,
            b: self.b as f64,
            a: self.a as f64,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn white_packs_to_all_ones() {
        assert_eq!(Color::WHITE.pack(), 0xFFFF_FFFF);
    }

    #[test]
    fn pack_byte_order_is_rgba() {
        let c = Color::from_premul(1.0, 0.0, 0.0, 1.0);
        assert_eq!(c.pack().to_le_bytes(), [255, 0, 0, 255]);
    }

    #[test]
    fn from_straight_premultiplies() {
        let c = Color::from_straight(1.0, 0.5, 0.0, 0.5);
        assert_eq!(c.to_rgba8(), [128, 64, 0, 128]);
    }

    #[test]
    fn to_rgba8_clamps_and_maps_nan_to_zero() {
        let c = Color::from_premul(2.0, -1.0, f32::NAN, 1.0);
        assert_eq!(c.to_rgba8(), [255, 0, 0, 255]);
    }
}
