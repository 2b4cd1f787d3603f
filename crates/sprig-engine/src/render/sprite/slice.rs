use super::backend::BatchTexture;
use super::quad::UvRect;

/// A pixel rectangle inside a texture, e.g. one frame of a sprite sheet.
#[derive(Debug)]
pub struct TextureSlice<'t, T> {
    texture: &'t T,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    uv: UvRect,
}

// Manual impls: the slice only borrows `T`, so it is `Copy` regardless of `T`.
impl<T> Clone for TextureSlice<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TextureSlice<'_, T> {}

impl<'t, T: BatchTexture> TextureSlice<'t, T> {
    /// Slices `width x height` pixels starting at `(x, y)` (top-left origin).
    ///
    /// # Panics
    /// If the rectangle is empty or not contained in the texture.
    pub fn new(texture: &'t T, x: u32, y: u32, width: u32, height: u32) -> Self {
        let (tw, th) = (texture.width(), texture.height());
        assert!(
            width > 0 && height > 0,
            "texture slice must not be empty ({width}x{height})"
        );
        assert!(
            x.checked_add(width).is_some_and(|r| r <= tw)
                && y.checked_add(height).is_some_and(|b| b <= th),
            "texture slice {x},{y} {width}x{height} exceeds texture {tw}x{th}"
        );

        let inv_w = 1.0 / tw as f32;
        let inv_h = 1.0 / th as f32;
        Self {
            texture,
            x,
            y,
            width,
            height,
            uv: UvRect {
                u: x as f32 * inv_w,
                v: y as f32 * inv_h,
                u2: (x + width) as f32 * inv_w,
                v2: (y + height) as f32 * inv_h,
            },
        }
    }

    /// The whole texture.
    pub fn full(texture: &'t T) -> Self {
        Self::new(texture, 0, 0, texture.width(), texture.height())
    }

    /// Cuts the texture into a row-major grid of `tile_width x tile_height` cells.
    ///
    /// Partial cells on the right and bottom edges are skipped.
    pub fn split(texture: &'t T, tile_width: u32, tile_height: u32) -> Vec<Self> {
        if tile_width == 0 || tile_height == 0 {
            return Vec::new();
        }
        let cols = texture.width() / tile_width;
        let rows = texture.height() / tile_height;
        let mut out = Vec::with_capacity((cols * rows) as usize);
        for row in 0..rows {
            for col in 0..cols {
                out.push(Self::new(
                    texture,
                    col * tile_width,
                    row * tile_height,
                    tile_width,
                    tile_height,
                ));
            }
        }
        out
    }
}

impl<'t, T> TextureSlice<'t, T> {
    #[inline]
    pub fn texture(&self) -> &'t T {
        self.texture
    }

    #[inline]
    pub fn x(&self) -> u32 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> u32 {
        self.y
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn uv(&self) -> UvRect {
        self.uv
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::FakeTexture;
    use super::*;

    #[test]
    fn full_slice_covers_unit_uv() {
        let tex = FakeTexture::new(64, 32);
        assert_eq!(TextureSlice::full(&tex).uv(), UvRect::FULL);
    }

    #[test]
    fn sub_rect_uvs_are_normalized() {
        let tex = FakeTexture::new(64, 32);
        let s = TextureSlice::new(&tex, 16, 8, 16, 8);
        assert_eq!(s.uv(), UvRect { u: 0.25, v: 0.25, u2: 0.5, v2: 0.5 });
    }

    #[test]
    fn split_is_row_major_and_skips_partial_cells() {
        let tex = FakeTexture::new(40, 20);
        let tiles = TextureSlice::split(&tex, 16, 16);
        assert_eq!(tiles.len(), 2);
        assert_eq!((tiles[0].x(), tiles[0].y()), (0, 0));
        assert_eq!((tiles[1].x(), tiles[1].y()), (16, 0));
    }

    #[test]
    #[should_panic(expected = "exceeds texture")]
    fn out_of_bounds_slice_panics() {
        let tex = FakeTexture::new(8, 8);
        let _ = TextureSlice::new(&tex, 4, 4, 8, 8);
    }
}
