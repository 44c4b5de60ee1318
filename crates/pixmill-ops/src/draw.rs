//! Minimal raster drawing used by the histogram plot.
//!
//! Coordinates are `(x, y)` = `(col, row)` and may fall outside the buffer;
//! anything off-canvas is clipped.

use pixmill_core::PixelBuffer;

/// Sets one pixel to `color` on the first `color.len()` channels, clipped.
pub fn render_point(dst: &mut PixelBuffer, x: i64, y: i64, color: &[u8]) {
    if x < 0 || y < 0 {
        return;
    }
    let (col, row) = (x as usize, y as usize);
    if col >= dst.width() || row >= dst.height() {
        return;
    }
    for (c, &v) in color.iter().enumerate().take(dst.channels()) {
        dst.set(c, row, col, v);
    }
}

/// Draws a line with Bresenham's algorithm, both endpoints inclusive.
///
/// ```rust
/// use pixmill_core::PixelBuffer;
/// use pixmill_ops::draw::render_line;
///
/// let mut img = PixelBuffer::rgb(4, 4).unwrap();
/// render_line(&mut img, 0, 0, 3, 3, &[255, 0, 0]);
/// assert_eq!(img.get(0, 2, 2), 255);
/// assert_eq!(img.get(1, 2, 2), 0);
/// ```
pub fn render_line(dst: &mut PixelBuffer, x1: i64, y1: i64, x2: i64, y2: i64, color: &[u8]) {
    let dx = (x2 - x1).abs();
    let dy = -(y2 - y1).abs();
    let sx = if x1 < x2 { 1 } else { -1 };
    let sy = if y1 < y2 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut x = x1;
    let mut y = y1;

    loop {
        render_point(dst, x, y, color);

        if x == x2 && y == y2 {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(img: &PixelBuffer) -> Vec<(usize, usize)> {
        let mut out = Vec::new();
        for row in 0..img.height() {
            for col in 0..img.width() {
                if img.get(0, row, col) != 0 {
                    out.push((col, row));
                }
            }
        }
        out
    }

    #[test]
    fn test_horizontal_and_vertical() {
        let mut img = PixelBuffer::rgb(5, 5).unwrap();
        render_line(&mut img, 1, 2, 3, 2, &[9, 9, 9]);
        assert_eq!(lit(&img), vec![(1, 2), (2, 2), (3, 2)]);

        let mut img = PixelBuffer::rgb(5, 5).unwrap();
        render_line(&mut img, 4, 3, 4, 1, &[9, 9, 9]);
        assert_eq!(lit(&img), vec![(4, 1), (4, 2), (4, 3)]);
    }

    #[test]
    fn test_steep_line_hits_endpoints() {
        let mut img = PixelBuffer::rgb(3, 8).unwrap();
        render_line(&mut img, 0, 7, 1, 0, &[1, 2, 3]);
        let pts = lit(&img);
        assert_eq!(pts.len(), 8);
        assert!(pts.contains(&(0, 7)));
        assert!(pts.contains(&(1, 0)));
        assert_eq!([img.get(0, 0, 1), img.get(1, 0, 1), img.get(2, 0, 1)], [1, 2, 3]);
    }

    #[test]
    fn test_clipping() {
        let mut img = PixelBuffer::rgb(4, 4).unwrap();
        render_line(&mut img, -2, 0, 6, 0, &[7, 7, 7]);
        render_point(&mut img, 2, 256, &[7, 7, 7]);
        assert_eq!(lit(&img), vec![(0, 0), (1, 0), (2, 0), (3, 0)]);
    }
}
