//! `PixelBuffer`: the logical framebuffer.
//!
//! The buffer uses contiguous memory allocation for cache efficiency.
//! Pixels are stored in row-major order in the *unrotated* frame; rotation
//! only changes the reported size and how coordinates are interpreted.

use super::pixel::{Rgb, Rotation};
use crate::error::{Error, Result};

/// A grid of RGB cells plus the rotation applied to logical coordinates.
///
/// Access is in row-major order: `index = y * width + x`, where `width` and
/// `height` are the stored dimensions fixed at construction.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    /// Contiguous cell storage (row-major order, unrotated).
    cells: Vec<Rgb>,
    /// Stored width in cells.
    width: u16,
    /// Stored height in cells.
    height: u16,
    /// Rotation of the logical drawing frame.
    rotation: Rotation,
}

impl PixelBuffer {
    /// Create a new buffer with the given dimensions.
    ///
    /// All cells start black.
    ///
    /// # Panics
    /// Panics if width or height is 0.
    pub fn new(width: u16, height: u16) -> Self {
        assert!(width > 0 && height > 0, "Buffer dimensions must be non-zero");
        let size = usize::from(width) * usize::from(height);
        Self {
            cells: vec![Rgb::BLACK; size],
            width,
            height,
            rotation: Rotation::Rotate0,
        }
    }

    /// Stored (unrotated) width.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Stored (unrotated) height.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Width as seen from the current rotation.
    #[inline]
    pub const fn reported_width(&self) -> u16 {
        self.rotation.rotated_size(self.width, self.height).0
    }

    /// Height as seen from the current rotation.
    #[inline]
    pub const fn reported_height(&self) -> u16 {
        self.rotation.rotated_size(self.width, self.height).1
    }

    /// Current rotation.
    #[inline]
    pub const fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Set the rotation from a quarter-turn count.
    ///
    /// Existing pixel data is left where it is.
    pub fn set_rotation(&mut self, quarter_turns: u8) -> Result<()> {
        self.rotation = Rotation::try_from(quarter_turns)?;
        Ok(())
    }

    /// Set the rotation from an already-validated value.
    #[inline]
    pub fn set_rotation_value(&mut self, rotation: Rotation) {
        self.rotation = rotation;
    }

    /// Get the total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the buffer is empty (should never be true after construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Get the stored cells in row-major order.
    #[inline]
    pub fn cells(&self) -> &[Rgb] {
        &self.cells
    }

    /// Get the stored cells mutably, for bulk writers.
    #[inline]
    pub fn cells_mut(&mut self) -> &mut [Rgb] {
        &mut self.cells
    }

    /// Convert stored (x, y) coordinates to a linear index.
    ///
    /// Returns `None` if coordinates are out of bounds.
    #[inline]
    pub fn index_of(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(usize::from(y) * usize::from(self.width) + usize::from(x))
        } else {
            None
        }
    }

    /// Convert a linear index to stored (x, y) coordinates.
    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    pub fn coords_of(&self, index: usize) -> Option<(u16, u16)> {
        if index < self.cells.len() {
            let width = usize::from(self.width);
            // Both fit in u16 because index < width * height.
            Some(((index % width) as u16, (index / width) as u16))
        } else {
            None
        }
    }

    /// Resolve a logical coordinate in the current rotation to a linear index.
    fn logical_index(&self, x: u16, y: u16) -> Result<usize> {
        let (width, height) = (self.reported_width(), self.reported_height());
        if x >= width || y >= height {
            return Err(Error::OutOfRange {
                x,
                y,
                width,
                height,
            });
        }
        let (sx, sy) = self.rotation.to_stored(x, y, self.width, self.height);
        Ok(usize::from(sy) * usize::from(self.width) + usize::from(sx))
    }

    /// Write a color at logical position (x, y) in the current rotation.
    pub fn set_cell(&mut self, x: u16, y: u16, color: Rgb) -> Result<()> {
        let idx = self.logical_index(x, y)?;
        self.cells[idx] = color;
        Ok(())
    }

    /// Read the color at logical position (x, y) in the current rotation.
    pub fn get_cell(&self, x: u16, y: u16) -> Result<Rgb> {
        let idx = self.logical_index(x, y)?;
        Ok(self.cells[idx])
    }

    /// Read a cell by stored (unrotated) coordinates.
    #[inline]
    pub fn get_raw(&self, x: u16, y: u16) -> Option<Rgb> {
        self.index_of(x, y).map(|i| self.cells[i])
    }

    /// Fill every cell with one color.
    pub fn fill(&mut self, color: Rgb) {
        self.cells.fill(color);
    }

    /// Clear the buffer to black.
    pub fn clear(&mut self) {
        self.fill(Rgb::BLACK);
    }

    /// Copy content from another buffer.
    ///
    /// The buffers must have the same stored dimensions; rotation is not copied.
    pub fn copy_from(&mut self, other: &Self) {
        debug_assert_eq!(self.width, other.width);
        debug_assert_eq!(self.height, other.height);
        self.cells.copy_from_slice(&other.cells);
    }

    /// Get an iterator over stored rows.
    pub fn rows(&self) -> impl Iterator<Item = &[Rgb]> {
        self.cells.chunks(usize::from(self.width))
    }
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("rotation", &self.rotation)
            .finish_non_exhaustive()
    }
}
