//! Layout: how a linear LED strip is folded into a rectangular grid.
//!
//! ```text
//! Horizontal, ALTERNATING (serpentine)      Vertical, ALTERNATING
//!
//!   0 →  1 →  2 →  3                          0    5 ←  6   11
//!                   ↓                         ↓    ↑    ↓    ↑
//!   7 ←  6 ←  5 ←  4                          1    4    7   10
//!   ↓                                         ↓    ↑    ↓    ↑
//!   8 →  9 → 10 → 11                          2 →  3    8 →  9
//! ```

use bitflags::bitflags;

use crate::error::{Error, Result};

/// Direction the strip runs before it folds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    /// The strip runs along rows.
    #[default]
    Horizontal,
    /// The strip runs along columns.
    Vertical,
}

bitflags! {
    /// Wiring options.
    ///
    /// These can be combined using bitwise OR.
    ///
    /// # Example
    /// ```
    /// use pixel_framebuf::LayoutFlags;
    /// let wiring = LayoutFlags::ALTERNATING | LayoutFlags::REVERSE_X;
    /// ```
    #[derive(Clone, Copy, PartialEq, Eq, Hash)]
    pub struct LayoutFlags: u8 {
        /// Every other row (or column) runs backwards.
        const ALTERNATING = 0b0000_0001;
        /// Mirror the x axis before mapping.
        const REVERSE_X = 0b0000_0010;
        /// Mirror the y axis before mapping.
        const REVERSE_Y = 0b0000_0100;
    }
}

impl Default for LayoutFlags {
    fn default() -> Self {
        Self::ALTERNATING
    }
}

impl std::fmt::Debug for LayoutFlags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

/// Full wiring description of a grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct GridLayout {
    /// Direction of the strip.
    pub orientation: Orientation,
    /// Serpentine and mirroring options.
    pub flags: LayoutFlags,
    /// Leading rows (horizontal) or columns (vertical) to skip.
    pub top: u16,
    /// Exclusive end row (horizontal) or column (vertical); 0 means the full extent.
    pub bottom: u16,
}

/// The addressable window a layout leaves on a `width` x `height` wiring.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Span {
    pub(crate) x_start: u16,
    pub(crate) y_start: u16,
    pub(crate) width: u16,
    pub(crate) height: u16,
}

impl GridLayout {
    /// Horizontal serpentine wiring with no margins.
    pub const fn new() -> Self {
        Self {
            orientation: Orientation::Horizontal,
            flags: LayoutFlags::ALTERNATING,
            top: 0,
            bottom: 0,
        }
    }

    /// Set the strip direction.
    #[must_use]
    pub const fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Replace the wiring flags.
    #[must_use]
    pub const fn with_flags(mut self, flags: LayoutFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Set the leading and trailing margins.
    #[must_use]
    pub const fn with_margins(mut self, top: u16, bottom: u16) -> Self {
        self.top = top;
        self.bottom = bottom;
        self
    }

    /// Resolve margins against the wiring dimensions.
    pub(crate) fn span(&self, width: u16, height: u16) -> Result<Span> {
        let extent = match self.orientation {
            Orientation::Horizontal => height,
            Orientation::Vertical => width,
        };
        let end = if self.bottom == 0 { extent } else { self.bottom };
        if end > extent {
            return Err(Error::InvalidLayout(format!(
                "bottom {end} exceeds grid extent {extent}"
            )));
        }
        if self.top >= end {
            return Err(Error::InvalidLayout(format!(
                "top {} leaves no addressable lines before {end}",
                self.top
            )));
        }
        Ok(match self.orientation {
            Orientation::Horizontal => Span {
                x_start: 0,
                y_start: self.top,
                width,
                height: end - self.top,
            },
            Orientation::Vertical => Span {
                x_start: self.top,
                y_start: 0,
                width: end - self.top,
                height,
            },
        })
    }

    /// Strip index of wiring coordinate (x, y) on a `width` x `height` grid.
    ///
    /// Margins are not applied here.
    ///
    /// # Panics
    /// Panics if `(x, y)` is outside the `width` x `height` wiring.
    pub fn strip_index(&self, x: u16, y: u16, width: u16, height: u16) -> usize {
        assert!(
            x < width && y < height,
            "wiring coordinate ({x}, {y}) outside {width}x{height}"
        );
        let x = if self.flags.contains(LayoutFlags::REVERSE_X) {
            width - 1 - x
        } else {
            x
        };
        let y = if self.flags.contains(LayoutFlags::REVERSE_Y) {
            height - 1 - y
        } else {
            y
        };
        let alternating = self.flags.contains(LayoutFlags::ALTERNATING);
        let (x, y) = (usize::from(x), usize::from(y));
        let (width, height) = (usize::from(width), usize::from(height));

        match self.orientation {
            Orientation::Horizontal if alternating && y % 2 == 1 => y * width + (width - 1 - x),
            Orientation::Horizontal => y * width + x,
            Orientation::Vertical if alternating && x % 2 == 1 => x * height + (height - 1 - y),
            Orientation::Vertical => x * height + y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map_all(layout: &GridLayout, width: u16, height: u16) -> Vec<Vec<usize>> {
        (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| layout.strip_index(x, y, width, height))
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_horizontal_progressive() {
        let layout = GridLayout::new().with_flags(LayoutFlags::empty());
        assert_eq!(
            map_all(&layout, 4, 2),
            vec![vec![0, 1, 2, 3], vec![4, 5, 6, 7]]
        );
    }

    #[test]
    fn test_horizontal_serpentine() {
        let layout = GridLayout::default();
        assert_eq!(
            map_all(&layout, 4, 3),
            vec![vec![0, 1, 2, 3], vec![7, 6, 5, 4], vec![8, 9, 10, 11]]
        );
    }

    #[test]
    fn test_vertical_serpentine() {
        let layout = GridLayout::new().with_orientation(Orientation::Vertical);
        assert_eq!(
            map_all(&layout, 4, 3),
            vec![vec![0, 5, 6, 11], vec![1, 4, 7, 10], vec![2, 3, 8, 9]]
        );
    }

    #[test]
    #[should_panic(expected = "outside 4x2")]
    fn test_strip_index_outside_wiring_panics() {
        GridLayout::default().strip_index(4, 0, 4, 2);
    }

    #[test]
    fn test_reverse_axes() {
        let plain = GridLayout::default();
        let mirrored = plain.with_flags(
            LayoutFlags::ALTERNATING | LayoutFlags::REVERSE_X | LayoutFlags::REVERSE_Y,
        );
        assert_eq!(
            mirrored.strip_index(0, 0, 4, 2),
            plain.strip_index(3, 1, 4, 2)
        );
        // (3, 1) on a serpentine is the start of the second run.
        assert_eq!(mirrored.strip_index(0, 0, 4, 2), 4);
    }

    #[test]
    fn test_mapping_is_a_permutation() {
        for orientation in [Orientation::Horizontal, Orientation::Vertical] {
            for bits in 0..8u8 {
                let layout = GridLayout::new()
                    .with_orientation(orientation)
                    .with_flags(LayoutFlags::from_bits_truncate(bits));
                let mut all: Vec<usize> = map_all(&layout, 5, 3).into_iter().flatten().collect();
                all.sort_unstable();
                assert_eq!(all, (0..15).collect::<Vec<_>>(), "{layout:?}");
            }
        }
    }

    #[test]
    fn test_span_margins() {
        let span = GridLayout::new().with_margins(1, 3).span(8, 4).unwrap();
        assert_eq!(
            span,
            Span {
                x_start: 0,
                y_start: 1,
                width: 8,
                height: 2
            }
        );

        let span = GridLayout::new()
            .with_orientation(Orientation::Vertical)
            .with_margins(2, 0)
            .span(8, 4)
            .unwrap();
        assert_eq!(
            span,
            Span {
                x_start: 2,
                y_start: 0,
                width: 6,
                height: 4
            }
        );
    }

    #[test]
    fn test_span_rejects_bad_margins() {
        assert!(matches!(
            GridLayout::new().with_margins(0, 9).span(8, 4),
            Err(Error::InvalidLayout(_))
        ));
        assert!(matches!(
            GridLayout::new().with_margins(4, 0).span(8, 4),
            Err(Error::InvalidLayout(_))
        ));
    }

    #[test]
    fn test_flags_debug() {
        let flags = LayoutFlags::ALTERNATING | LayoutFlags::REVERSE_Y;
        assert_eq!(format!("{flags:?}"), "ALTERNATING | REVERSE_Y");
    }
}
