//! `TerminalGrid`: preview an LED grid on a true-color terminal.
//!
//! Each pixel is drawn as a two-column block so the grid keeps roughly
//! square proportions. Writes are queued and flushed in one go on show.

use std::io::{self, Stdout, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};

use crate::buffer::Rgb;
use crate::error::DeviceError;
use crate::grid::GridAdapter;

/// Glyph used for one pixel.
const PIXEL_GLYPH: &str = "██";

/// Terminal columns per pixel.
const PIXEL_COLUMNS: u16 = 2;

/// A [`GridAdapter`] that renders onto a terminal through crossterm.
pub struct TerminalGrid<W: Write> {
    out: W,
    width: u16,
    height: u16,
    /// Terminal cell of the grid's top-left pixel.
    origin: (u16, u16),
}

impl TerminalGrid<Stdout> {
    /// Preview on stdout, top-left corner of the screen.
    pub fn stdout(width: u16, height: u16) -> Self {
        Self::new(io::stdout(), width, height)
    }
}

impl<W: Write> TerminalGrid<W> {
    /// Preview a `width` x `height` grid on `out`.
    pub const fn new(out: W, width: u16, height: u16) -> Self {
        Self {
            out,
            width,
            height,
            origin: (0, 0),
        }
    }

    /// Place the grid's top-left pixel at terminal cell (column, row).
    #[must_use]
    pub fn with_origin(mut self, column: u16, row: u16) -> Self {
        self.origin = (column, row);
        self
    }

    /// Grid width in pixels.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Grid height in pixels.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Borrow the writer.
    #[inline]
    pub const fn get_ref(&self) -> &W {
        &self.out
    }

    /// Unwrap the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> GridAdapter for TerminalGrid<W> {
    fn set(&mut self, x: u16, y: u16, color: Rgb) -> Result<(), DeviceError> {
        if x >= self.width || y >= self.height {
            return Err(DeviceError::CoordinateOutOfRange { x, y });
        }
        // Cursor positions are 1-based on the wire, so u16::MAX is unreachable.
        let column = x
            .checked_mul(PIXEL_COLUMNS)
            .and_then(|offset| offset.checked_add(self.origin.0))
            .filter(|column| *column < u16::MAX);
        let row = y.checked_add(self.origin.1).filter(|row| *row < u16::MAX);
        let (Some(column), Some(row)) = (column, row) else {
            return Err(DeviceError::CoordinateOutOfRange { x, y });
        };
        queue!(
            self.out,
            MoveTo(column, row),
            SetForegroundColor(Color::Rgb {
                r: color.r,
                g: color.g,
                b: color.b,
            }),
            Print(PIXEL_GLYPH)
        )?;
        Ok(())
    }

    fn show(&mut self) -> Result<(), DeviceError> {
        queue!(self.out, ResetColor)?;
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> std::fmt::Debug for TerminalGrid<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalGrid")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}
