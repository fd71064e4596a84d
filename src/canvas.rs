//! Canvas: raster primitives over a narrow pixel-surface capability.
//!
//! Drawing code never touches buffer storage directly. It sees a
//! [`PixelSurface`]: a size in the current rotation frame plus strict
//! per-pixel access. [`Draw`] layers the primitives on top and clips
//! anything that falls outside the surface, so shapes may hang off an edge.

use crate::buffer::{PixelBuffer, Rgb};
use crate::error::{Error, Result};

/// Minimal capability raster primitives need.
///
/// Coordinates are in the surface's current rotation frame.
pub trait PixelSurface {
    /// Drawable `(width, height)`.
    fn surface_size(&self) -> (u16, u16);

    /// Write one pixel; fails with [`Error::OutOfRange`] outside the surface.
    fn put_pixel(&mut self, x: u16, y: u16, color: Rgb) -> Result<()>;

    /// Read one pixel; fails with [`Error::OutOfRange`] outside the surface.
    fn pixel_at(&self, x: u16, y: u16) -> Result<Rgb>;
}

impl PixelSurface for PixelBuffer {
    #[inline]
    fn surface_size(&self) -> (u16, u16) {
        (self.reported_width(), self.reported_height())
    }

    #[inline]
    fn put_pixel(&mut self, x: u16, y: u16, color: Rgb) -> Result<()> {
        self.set_cell(x, y, color)
    }

    #[inline]
    fn pixel_at(&self, x: u16, y: u16) -> Result<Rgb> {
        self.get_cell(x, y)
    }
}

/// Clip the run `start..start + len` to `0..limit`.
///
/// Returns the visible half-open range, or `None` if nothing is visible.
fn clip_span(start: i32, len: i32, limit: u16) -> Option<(u16, u16)> {
    let lo = i64::from(start).max(0);
    let hi = (i64::from(start) + i64::from(len)).min(i64::from(limit));
    if lo >= hi {
        return None;
    }
    // Both lie in 0..=limit, which fits in u16.
    Some((u16::try_from(lo).ok()?, u16::try_from(hi).ok()?))
}

/// Clip the segment (x0, y0)-(x1, y1) to a `width` x `height` surface.
///
/// Liang-Barsky over the pixel centres; the clipped endpoints are rounded
/// back onto the grid.
#[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
fn clip_segment(
    (x0, y0): (i32, i32),
    (x1, y1): (i32, i32),
    width: u16,
    height: u16,
) -> Option<(i32, i32, i32, i32)> {
    let (fx0, fy0) = (f64::from(x0), f64::from(y0));
    let (dx, dy) = (f64::from(x1) - fx0, f64::from(y1) - fy0);
    let (max_x, max_y) = (f64::from(width) - 1.0, f64::from(height) - 1.0);

    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;
    for (p, q) in [(-dx, fx0), (dx, max_x - fx0), (-dy, fy0), (dy, max_y - fy0)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    let snap = |v: f64, max: f64| v.round().clamp(0.0, max) as i32;
    Some((
        snap(fx0 + t0 * dx, max_x),
        snap(fy0 + t0 * dy, max_y),
        snap(fx0 + t1 * dx, max_x),
        snap(fy0 + t1 * dy, max_y),
    ))
}

/// Raster primitives for any [`PixelSurface`].
///
/// All coordinates are signed and clipped to the surface. Work is bounded
/// by the visible area, however far a shape extends off the edges.
pub trait Draw: PixelSurface {
    /// Plot one pixel if it is on the surface. Returns whether it was drawn.
    fn plot(&mut self, x: i32, y: i32, color: Rgb) -> bool {
        let (width, height) = self.surface_size();
        match (u16::try_from(x), u16::try_from(y)) {
            (Ok(x), Ok(y)) if x < width && y < height => self.put_pixel(x, y, color).is_ok(),
            _ => false,
        }
    }

    /// Fill the whole surface.
    fn fill(&mut self, color: Rgb) {
        let (width, height) = self.surface_size();
        self.fill_rect(0, 0, i32::from(width), i32::from(height), color);
    }

    /// Horizontal line of `width` pixels starting at (x, y).
    fn hline(&mut self, x: i32, y: i32, width: i32, color: Rgb) {
        self.fill_rect(x, y, width, 1, color);
    }

    /// Vertical line of `height` pixels starting at (x, y).
    fn vline(&mut self, x: i32, y: i32, height: i32, color: Rgb) {
        self.fill_rect(x, y, 1, height, color);
    }

    /// Line from (x0, y0) to (x1, y1), both ends inclusive.
    fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgb) {
        let (width, height) = self.surface_size();
        let on_surface = |x: i32, y: i32| {
            (0..i32::from(width)).contains(&x) && (0..i32::from(height)).contains(&y)
        };
        let (x0, y0, x1, y1) = if on_surface(x0, y0) && on_surface(x1, y1) {
            (x0, y0, x1, y1)
        } else {
            match clip_segment((x0, y0), (x1, y1), width, height) {
                Some(segment) => segment,
                None => return,
            }
        };

        // Bresenham, all octants. Endpoints are on the surface, so the
        // error terms stay well inside i32.
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);

        loop {
            self.plot(x, y, color);
            if x == x1 && y == y1 {
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

    /// One-pixel rectangle outline.
    fn rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Rgb) {
        if width <= 0 || height <= 0 {
            return;
        }
        self.hline(x, y, width, color);
        self.vline(x, y, height, color);
        // Far edges beyond i32 are off any surface.
        if let Ok(bottom) = i32::try_from(i64::from(y) + i64::from(height) - 1) {
            self.hline(x, bottom, width, color);
        }
        if let Ok(right) = i32::try_from(i64::from(x) + i64::from(width) - 1) {
            self.vline(right, y, height, color);
        }
    }

    /// Solid rectangle.
    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Rgb) {
        let (surface_width, surface_height) = self.surface_size();
        let (Some((x_lo, x_hi)), Some((y_lo, y_hi))) = (
            clip_span(x, width, surface_width),
            clip_span(y, height, surface_height),
        ) else {
            return;
        };
        for row in y_lo..y_hi {
            for col in x_lo..x_hi {
                // In bounds by construction.
                let _ = self.put_pixel(col, row, color);
            }
        }
    }

    /// One-pixel circle outline centred on (cx, cy).
    fn circle(&mut self, cx: i32, cy: i32, radius: i32, color: Rgb) {
        if radius < 0 {
            return;
        }
        let (width, height) = self.surface_size();
        let (cx, cy, radius) = (i64::from(cx), i64::from(cy), i64::from(radius));
        if cx + radius < 0
            || cy + radius < 0
            || cx - radius >= i64::from(width)
            || cy - radius >= i64::from(height)
        {
            return;
        }

        // Midpoint algorithm, one octant mirrored eight ways.
        let (mut x, mut y) = (radius, 0_i64);
        let mut err = 1 - radius;
        while x >= y {
            for (px, py) in [
                (x, y),
                (y, x),
                (-y, x),
                (-x, y),
                (-x, -y),
                (-y, -x),
                (y, -x),
                (x, -y),
            ] {
                if let (Ok(px), Ok(py)) = (i32::try_from(cx + px), i32::try_from(cy + py)) {
                    self.plot(px, py, color);
                }
            }
            y += 1;
            if err < 0 {
                err += 2 * y + 1;
            } else {
                x -= 1;
                err += 2 * (y - x) + 1;
            }
        }
    }

    /// Copy a row-major image exactly the size of the surface.
    ///
    /// # Errors
    ///
    /// [`Error::ImageSize`] if `image` does not hold `width * height` pixels.
    fn blit(&mut self, image: &[Rgb]) -> Result<()> {
        let (width, height) = self.surface_size();
        let expected = usize::from(width) * usize::from(height);
        if image.len() != expected {
            return Err(Error::ImageSize {
                expected,
                actual: image.len(),
            });
        }
        for (row, y) in image.chunks(usize::from(width)).zip(0..height) {
            for (color, x) in row.iter().zip(0..width) {
                self.put_pixel(x, y, *color)?;
            }
        }
        Ok(())
    }
}

impl<S: PixelSurface + ?Sized> Draw for S {}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(buffer: &PixelBuffer) -> Vec<(u16, u16)> {
        let (w, h) = buffer.surface_size();
        let mut out = Vec::new();
        for y in 0..h {
            for x in 0..w {
                if buffer.pixel_at(x, y).unwrap() != Rgb::BLACK {
                    out.push((x, y));
                }
            }
        }
        out
    }

    #[test]
    fn test_plot_clips() {
        let mut buffer = PixelBuffer::new(4, 4);
        assert!(buffer.plot(3, 3, Rgb::RED));
        assert!(!buffer.plot(-1, 0, Rgb::RED));
        assert!(!buffer.plot(4, 0, Rgb::RED));
        assert_eq!(lit(&buffer), vec![(3, 3)]);
    }

    #[test]
    fn test_hline_vline() {
        let mut buffer = PixelBuffer::new(5, 5);
        buffer.hline(-2, 0, 4, Rgb::RED);
        buffer.vline(4, 3, 10, Rgb::RED);
        assert_eq!(lit(&buffer), vec![(0, 0), (1, 0), (4, 3), (4, 4)]);
    }

    #[test]
    fn test_line_diagonal_and_reverse() {
        let mut buffer = PixelBuffer::new(4, 4);
        buffer.line(3, 3, 0, 0, Rgb::GREEN);
        assert_eq!(lit(&buffer), vec![(0, 0), (1, 1), (2, 2), (3, 3)]);
    }

    #[test]
    fn test_line_shallow() {
        let mut buffer = PixelBuffer::new(5, 2);
        buffer.line(0, 0, 4, 1, Rgb::GREEN);
        let points = lit(&buffer);
        assert_eq!(points.len(), 5);
        assert!(points.contains(&(0, 0)));
        assert!(points.contains(&(4, 1)));
    }

    #[test]
    fn test_rect_outline() {
        let mut buffer = PixelBuffer::new(4, 4);
        buffer.rect(0, 0, 3, 3, Rgb::BLUE);
        assert_eq!(
            lit(&buffer),
            vec![(0, 0), (1, 0), (2, 0), (0, 1), (2, 1), (0, 2), (1, 2), (2, 2)]
        );
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut buffer = PixelBuffer::new(4, 4);
        buffer.fill_rect(2, 2, 5, 5, Rgb::WHITE);
        assert_eq!(lit(&buffer), vec![(2, 2), (3, 2), (2, 3), (3, 3)]);
    }

    #[test]
    fn test_fill_respects_rotation() {
        let mut buffer = PixelBuffer::new(4, 2);
        buffer.set_rotation(1).unwrap();
        Draw::fill(&mut buffer, Rgb::RED);
        assert!(buffer.cells().iter().all(|c| *c == Rgb::RED));
    }

    #[test]
    fn test_circle_outline() {
        let mut buffer = PixelBuffer::new(7, 7);
        buffer.circle(3, 3, 2, Rgb::RED);
        let points = lit(&buffer);
        for p in [(5, 3), (1, 3), (3, 5), (3, 1), (5, 4), (4, 5)] {
            assert!(points.contains(&p), "missing {p:?}");
        }
        assert!(!points.contains(&(3, 3)));
    }

    #[test]
    fn test_circle_radius_zero_is_a_dot() {
        let mut buffer = PixelBuffer::new(3, 3);
        buffer.circle(1, 1, 0, Rgb::RED);
        assert_eq!(lit(&buffer), vec![(1, 1)]);
    }

    #[test]
    fn test_line_with_far_endpoint_is_clipped() {
        let mut buffer = PixelBuffer::new(4, 4);
        buffer.line(0, 0, 2_000_000_000, 0, Rgb::RED);
        assert_eq!(lit(&buffer), vec![(0, 0), (1, 0), (2, 0), (3, 0)]);
    }

    #[test]
    fn test_line_crossing_surface_from_extremes() {
        let mut buffer = PixelBuffer::new(4, 4);
        buffer.line(
            -2_000_000_000,
            -2_000_000_000,
            2_000_000_000,
            2_000_000_000,
            Rgb::GREEN,
        );
        assert_eq!(lit(&buffer), vec![(0, 0), (1, 1), (2, 2), (3, 3)]);

        let mut buffer = PixelBuffer::new(4, 4);
        buffer.line(i32::MIN, 1, i32::MAX, 1, Rgb::GREEN);
        assert_eq!(lit(&buffer), vec![(0, 1), (1, 1), (2, 1), (3, 1)]);
    }

    #[test]
    fn test_line_entirely_off_surface() {
        let mut buffer = PixelBuffer::new(4, 4);
        buffer.line(-10, -10, -1, -5, Rgb::RED);
        buffer.line(i32::MAX, 0, i32::MAX, i32::MAX, Rgb::RED);
        assert!(lit(&buffer).is_empty());
    }

    #[test]
    fn test_circle_near_i32_limits() {
        let mut buffer = PixelBuffer::new(4, 4);
        buffer.circle(i32::MAX - 1, 0, 5, Rgb::RED);
        buffer.circle(i32::MIN, i32::MIN, 5, Rgb::RED);
        assert!(lit(&buffer).is_empty());

        // Centre far off to the left, edge just reaching column 0.
        buffer.circle(-1_000_000, 1, 1_000_000, Rgb::RED);
        assert!(lit(&buffer).contains(&(0, 1)));
    }

    #[test]
    fn test_huge_spans_touch_only_visible_cells() {
        let mut buffer = PixelBuffer::new(4, 4);
        buffer.hline(-300_000_000, 0, 300_000_004, Rgb::RED);
        assert_eq!(lit(&buffer), vec![(0, 0), (1, 0), (2, 0), (3, 0)]);

        let mut buffer = PixelBuffer::new(4, 4);
        buffer.vline(2, i32::MIN, i32::MAX, Rgb::RED);
        assert!(lit(&buffer).is_empty());
        buffer.vline(2, -5, i32::MAX, Rgb::RED);
        assert_eq!(lit(&buffer), vec![(2, 0), (2, 1), (2, 2), (2, 3)]);

        let mut buffer = PixelBuffer::new(3, 2);
        buffer.fill_rect(i32::MIN, i32::MIN, i32::MAX, i32::MAX, Rgb::BLUE);
        assert!(lit(&buffer).is_empty());
        buffer.fill_rect(-1_000_000_000, -1_000_000_000, i32::MAX, i32::MAX, Rgb::BLUE);
        assert_eq!(lit(&buffer).len(), 6);
    }

    #[test]
    fn test_rect_with_extreme_extent() {
        let mut buffer = PixelBuffer::new(4, 4);
        buffer.rect(1, 1, i32::MAX, i32::MAX, Rgb::WHITE);
        assert_eq!(
            lit(&buffer),
            vec![(1, 1), (2, 1), (3, 1), (1, 2), (1, 3)]
        );
    }

    #[test]
    fn test_blit_in_rotated_frame() {
        let mut buffer = PixelBuffer::new(2, 1);
        buffer.set_rotation(1).unwrap();
        // Rotated frame is 1x2.
        buffer.blit(&[Rgb::RED, Rgb::BLUE]).unwrap();
        assert_eq!(buffer.get_cell(0, 0).unwrap(), Rgb::RED);
        assert_eq!(buffer.get_cell(0, 1).unwrap(), Rgb::BLUE);
        assert!(matches!(
            buffer.blit(&[Rgb::RED]),
            Err(Error::ImageSize {
                expected: 2,
                actual: 1
            })
        ));
    }
}
