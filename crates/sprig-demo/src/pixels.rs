//! Procedural RGBA8 images so the demo ships without asset files.

/// Premultiplied RGBA8 pixel.
pub type Rgba = [u8; 4];

/// Two-color checkerboard, `cell` pixels per square.
pub fn checkerboard(width: u32, height: u32, cell: u32, a: Rgba, b: Rgba) -> Vec<u8> {
    let cell = cell.max(1);
    let mut out = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            let even = ((x / cell) + (y / cell)) % 2 == 0;
            out.extend_from_slice(if even { &a } else { &b });
        }
    }
    out
}

/// A `cols` x `rows` sheet of solid tiles with a one-pixel transparent border,
/// tinted along a fixed palette. Tile `i` is row-major.
pub fn tile_sheet(tile: u32, cols: u32, rows: u32) -> Vec<u8> {
    const PALETTE: [Rgba; 6] = [
        [230, 80, 70, 255],
        [240, 180, 60, 255],
        [110, 200, 90, 255],
        [70, 170, 220, 255],
        [150, 100, 220, 255],
        [235, 235, 235, 255],
    ];

    let width = tile * cols;
    let height = tile * rows;
    let mut out = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            let (tx, ty) = (x % tile, y % tile);
            let border = tx == 0 || ty == 0 || tx == tile - 1 || ty == tile - 1;
            if border {
                out.extend_from_slice(&[0, 0, 0, 0]);
            } else {
                let index = (y / tile) * cols + (x / tile);
                out.extend_from_slice(&PALETTE[index as usize % PALETTE.len()]);
            }
        }
    }
    out
}

/// Soft round dot; alpha falls off toward the edge. Premultiplied white.
pub fn dot(size: u32) -> Vec<u8> {
    let r = size as f32 * 0.5;
    let mut out = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let dx = x as f32 + 0.5 - r;
            let dy = y as f32 + 0.5 - r;
            let d = (dx * dx + dy * dy).sqrt() / r;
            let a = ((1.0 - d).clamp(0.0, 1.0) * 255.0).round() as u8;
            out.extend_from_slice(&[a, a, a, a]);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn px(buf: &[u8], width: u32, x: u32, y: u32) -> Rgba {
        let i = ((y * width + x) * 4) as usize;
        [buf[i], buf[i + 1], buf[i + 2], buf[i + 3]]
    }

    #[test]
    fn checkerboard_alternates_cells() {
        let a = [255, 255, 255, 255];
        let b = [0, 0, 0, 255];
        let img = checkerboard(4, 4, 2, a, b);
        assert_eq!(img.len(), 4 * 4 * 4);
        assert_eq!(px(&img, 4, 0, 0), a);
        assert_eq!(px(&img, 4, 2, 0), b);
        assert_eq!(px(&img, 4, 0, 2), b);
        assert_eq!(px(&img, 4, 3, 3), a);
    }

    #[test]
    fn tile_sheet_has_transparent_borders() {
        let img = tile_sheet(8, 3, 2);
        let width = 24;
        assert_eq!(img.len(), (24 * 16 * 4) as usize);
        assert_eq!(px(&img, width, 0, 0)[3], 0);
        assert_eq!(px(&img, width, 7, 4)[3], 0);
        assert_eq!(px(&img, width, 4, 4)[3], 255);
        // Second tile uses the second palette entry.
        assert_ne!(px(&img, width, 4, 4), px(&img, width, 12, 4));
    }

    #[test]
    fn dot_is_premultiplied_and_fades_out() {
        let img = dot(16);
        let center = px(&img, 16, 8, 8);
        let corner = px(&img, 16, 0, 0);
        assert!(center[3] > 200);
        assert_eq!(corner[3], 0);
        for p in img.chunks_exact(4) {
            assert!(p[0] <= p[3]);
        }
    }
}
