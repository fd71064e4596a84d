//! `PixelGrid`: a strip folded into rows and columns.

use log::debug;

use super::layout::{GridLayout, Span};
use super::GridAdapter;
use crate::buffer::Rgb;
use crate::error::{DeviceError, Error, Result};
use crate::strip::PixelStrip;

/// Grid adapter that resolves (x, y) to a strip index through a [`GridLayout`].
///
/// The wiring is `width` x `height`; margins in the layout shrink the
/// addressable window, and grid coordinate (0, 0) is the window's first cell.
#[derive(Debug)]
pub struct PixelGrid<S> {
    strip: S,
    layout: GridLayout,
    /// Wiring width.
    wiring_width: u16,
    /// Wiring height.
    wiring_height: u16,
    span: Span,
}

impl<S: PixelStrip> PixelGrid<S> {
    /// Wrap `strip` as a `width` x `height` grid.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLayout`] for zero dimensions or margins that
    /// leave nothing addressable, and [`Error::StripTooShort`] if the strip
    /// cannot hold `width * height` pixels.
    pub fn new(strip: S, width: u16, height: u16, layout: GridLayout) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidLayout(format!(
                "grid dimensions must be non-zero, got {width}x{height}"
            )));
        }
        let span = layout.span(width, height)?;
        let required = usize::from(width) * usize::from(height);
        if strip.len() < required {
            return Err(Error::StripTooShort {
                required,
                available: strip.len(),
            });
        }
        debug!(
            "pixel grid {width}x{height} ({:?}, {:?}), addressable {}x{} at ({}, {})",
            layout.orientation, layout.flags, span.width, span.height, span.x_start, span.y_start
        );

        Ok(Self {
            strip,
            layout,
            wiring_width: width,
            wiring_height: height,
            span,
        })
    }

    /// Addressable width.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.span.width
    }

    /// Addressable height.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.span.height
    }

    /// The wiring description.
    #[inline]
    pub const fn layout(&self) -> &GridLayout {
        &self.layout
    }

    /// Strip index for grid coordinate (x, y), `None` outside the window.
    pub fn index_of(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.span.width || y >= self.span.height {
            return None;
        }
        Some(self.layout.strip_index(
            x + self.span.x_start,
            y + self.span.y_start,
            self.wiring_width,
            self.wiring_height,
        ))
    }

    /// Borrow the strip.
    #[inline]
    pub const fn strip(&self) -> &S {
        &self.strip
    }

    /// Borrow the strip mutably.
    #[inline]
    pub fn strip_mut(&mut self) -> &mut S {
        &mut self.strip
    }

    /// Unwrap the strip.
    pub fn into_strip(self) -> S {
        self.strip
    }
}

impl<S: PixelStrip> GridAdapter for PixelGrid<S> {
    fn set(&mut self, x: u16, y: u16, color: Rgb) -> Result<(), DeviceError> {
        let index = self
            .index_of(x, y)
            .ok_or(DeviceError::CoordinateOutOfRange { x, y })?;
        self.strip.set_pixel(index, color)
    }

    fn show(&mut self) -> Result<(), DeviceError> {
        self.strip.show()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{LayoutFlags, Orientation};
    use crate::strip::MemoryStrip;

    #[test]
    fn test_serpentine_grid_writes_strip() {
        let mut grid = PixelGrid::new(MemoryStrip::new(8), 4, 2, GridLayout::default()).unwrap();
        grid.set(0, 1, Rgb::RED).unwrap();
        grid.show().unwrap();
        // Row 1 runs right-to-left, so its x = 0 is the last pixel.
        assert_eq!(grid.strip().latched()[7], Rgb::RED);
    }

    #[test]
    fn test_progressive_grid_writes_strip() {
        let layout = GridLayout::new().with_flags(LayoutFlags::empty());
        let mut grid = PixelGrid::new(MemoryStrip::new(8), 4, 2, layout).unwrap();
        grid.set(0, 1, Rgb::RED).unwrap();
        assert_eq!(grid.strip().staged()[4], Rgb::RED);
    }

    #[test]
    fn test_margins_offset_coordinates() {
        let layout = GridLayout::new()
            .with_flags(LayoutFlags::empty())
            .with_margins(1, 0);
        let mut grid = PixelGrid::new(MemoryStrip::new(12), 4, 3, layout).unwrap();
        assert_eq!((grid.width(), grid.height()), (4, 2));
        grid.set(0, 0, Rgb::GREEN).unwrap();
        assert_eq!(grid.strip().staged()[4], Rgb::GREEN);
        assert!(matches!(
            grid.set(0, 2, Rgb::GREEN),
            Err(DeviceError::CoordinateOutOfRange { x: 0, y: 2 })
        ));
    }

    #[test]
    fn test_vertical_margins() {
        let layout = GridLayout::new()
            .with_orientation(Orientation::Vertical)
            .with_margins(1, 3);
        let grid = PixelGrid::new(MemoryStrip::new(12), 4, 3, layout).unwrap();
        assert_eq!((grid.width(), grid.height()), (2, 3));
        // Grid x = 0 is wiring column 1, which runs bottom-to-top.
        assert_eq!(grid.index_of(0, 0), Some(5));
    }

    #[test]
    fn test_strip_too_short() {
        let result = PixelGrid::new(MemoryStrip::new(7), 4, 2, GridLayout::default());
        assert!(matches!(
            result,
            Err(Error::StripTooShort {
                required: 8,
                available: 7
            })
        ));
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let result = PixelGrid::new(MemoryStrip::new(8), 0, 2, GridLayout::default());
        assert!(matches!(result, Err(Error::InvalidLayout(_))));
    }
}
