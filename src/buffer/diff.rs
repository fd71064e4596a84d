//! Change tracking: the shadow copy of what the grid is currently showing.
//!
//! This module implements the core minimal-update logic:
//! 1. Keep a shadow of every color last pushed to the grid
//! 2. Compare the live buffer against the shadow, cell by cell, row-major
//! 3. Commit a cell to the shadow only after the grid accepted it
//!
//! The tracker does no I/O. The sync engine in [`crate::sync`] drives it.

use super::{PixelBuffer, Rgb};

/// One cell whose live color differs from the shadow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Change {
    /// Stored (unrotated) column.
    pub x: u16,
    /// Stored (unrotated) row.
    pub y: u16,
    /// Color in the live buffer.
    pub color: Rgb,
}

/// Shadow buffer holding the colors last published to the grid.
///
/// A `None` entry means the physical state is unknown (after
/// [`ChangeTracker::invalidate`]) and the cell counts as changed whatever
/// the live color is.
#[derive(Clone, PartialEq, Eq)]
pub struct ChangeTracker {
    /// Last published colors (row-major order, unrotated).
    shadow: Vec<Option<Rgb>>,
    /// Stored width in cells.
    width: u16,
    /// Stored height in cells.
    height: u16,
}

impl ChangeTracker {
    /// Create a tracker whose shadow is all black.
    ///
    /// # Panics
    /// Panics if width or height is 0.
    pub fn new(width: u16, height: u16) -> Self {
        assert!(width > 0 && height > 0, "Tracker dimensions must be non-zero");
        let size = usize::from(width) * usize::from(height);
        Self {
            shadow: vec![Some(Rgb::BLACK); size],
            width,
            height,
        }
    }

    /// Create a tracker shaped like `buffer`.
    pub fn for_buffer(buffer: &PixelBuffer) -> Self {
        Self::new(buffer.width(), buffer.height())
    }

    /// Stored width.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Stored height.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// The shadow value at stored (x, y), `None` if unknown or out of bounds.
    #[inline]
    pub fn shadow_at(&self, x: u16, y: u16) -> Option<Rgb> {
        if x < self.width && y < self.height {
            self.shadow[usize::from(y) * usize::from(self.width) + usize::from(x)]
        } else {
            None
        }
    }

    /// Lazily yield every cell of `current` that differs from the shadow.
    ///
    /// Order is row-major (y outer, x inner). Each call starts a fresh walk.
    pub fn diff<'a>(&'a self, current: &'a PixelBuffer) -> Changes<'a> {
        Changes {
            tracker: self,
            current,
            next_index: 0,
        }
    }

    /// Whether this tracker shadows buffers of `current`'s stored size.
    #[inline]
    pub fn matches(&self, current: &PixelBuffer) -> bool {
        (self.width, self.height) == (current.width(), current.height())
    }

    /// Find the first change at or after linear index `from`.
    ///
    /// Returns the change and its linear index. The sync engine uses this to
    /// walk the buffer while committing between steps. A tracker of another
    /// shape reports nothing; see [`ChangeTracker::matches`].
    pub fn next_change(&self, current: &PixelBuffer, from: usize) -> Option<(usize, Change)> {
        if !self.matches(current) {
            return None;
        }

        let cells = current.cells();
        let start = from.min(cells.len());

        let index = cells[start..]
            .iter()
            .zip(&self.shadow[start..])
            .position(|(live, shadow)| *shadow != Some(*live))
            .map(|offset| start + offset)?;
        let (x, y) = current.coords_of(index)?;
        Some((
            index,
            Change {
                x,
                y,
                color: cells[index],
            },
        ))
    }

    /// Record that `color` is now showing at stored (x, y).
    ///
    /// Call exactly once per diffed cell, after the grid accepted it.
    /// Out-of-range coordinates are ignored.
    pub fn commit(&mut self, x: u16, y: u16, color: Rgb) {
        if x < self.width && y < self.height {
            let idx = usize::from(y) * usize::from(self.width) + usize::from(x);
            self.shadow[idx] = Some(color);
        }
    }

    /// Forget what the grid shows, so the next sync republishes every cell.
    pub fn invalidate(&mut self) {
        self.shadow.fill(None);
    }

    /// Reset the shadow to the all-black startup state.
    pub fn reset(&mut self) {
        self.shadow.fill(Some(Rgb::BLACK));
    }

    /// Whether the shadow matches `current` cell for cell.
    pub fn is_synced_with(&self, current: &PixelBuffer) -> bool {
        self.next_change(current, 0).is_none()
    }
}

impl std::fmt::Debug for ChangeTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let unknown = self.shadow.iter().filter(|c| c.is_none()).count();
        f.debug_struct("ChangeTracker")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("unknown_cells", &unknown)
            .finish()
    }
}

/// Lazy, finite iterator over the cells that differ from the shadow.
#[derive(Debug, Clone)]
pub struct Changes<'a> {
    tracker: &'a ChangeTracker,
    current: &'a PixelBuffer,
    next_index: usize,
}

impl Iterator for Changes<'_> {
    type Item = Change;

    fn next(&mut self) -> Option<Self::Item> {
        let (index, change) = self.tracker.next_change(self.current, self.next_index)?;
        self.next_index = index + 1;
        Some(change)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.current.len().saturating_sub(self.next_index)))
    }
}

impl std::iter::FusedIterator for Changes<'_> {}
