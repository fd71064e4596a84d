//! Strip module: linear chains of addressable LEDs.
//!
//! A [`PixelStrip`] is what a [`PixelGrid`](crate::grid::PixelGrid) folds into
//! rows and columns. Implementations stage writes and latch them on
//! [`PixelStrip::show`], the way NeoPixel/DotStar drivers do.

pub mod threaded;

pub use threaded::{ThreadedStrip, ThreadedStripConfig};

use crate::buffer::Rgb;
use crate::error::DeviceError;

/// Hardware-agnostic LED strip.
pub trait PixelStrip {
    /// Number of pixels on the strip.
    fn len(&self) -> usize;

    /// Whether the strip has no pixels.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stage `color` for the pixel at `index`.
    fn set_pixel(&mut self, index: usize, color: Rgb) -> Result<(), DeviceError>;

    /// Clock the staged colors out to the LEDs.
    fn show(&mut self) -> Result<(), DeviceError>;
}

impl<S: PixelStrip + ?Sized> PixelStrip for &mut S {
    #[inline]
    fn len(&self) -> usize {
        (**self).len()
    }

    #[inline]
    fn set_pixel(&mut self, index: usize, color: Rgb) -> Result<(), DeviceError> {
        (**self).set_pixel(index, color)
    }

    #[inline]
    fn show(&mut self) -> Result<(), DeviceError> {
        (**self).show()
    }
}

/// In-memory strip: stages into one buffer and copies it on show.
///
/// Useful as a virtual device and for inspecting what a grid layout does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryStrip {
    /// Colors written since the last show.
    staged: Vec<Rgb>,
    /// Colors as of the last show.
    latched: Vec<Rgb>,
    /// Number of completed shows.
    shows: u64,
}

impl MemoryStrip {
    /// Create a strip of `len` black pixels.
    pub fn new(len: usize) -> Self {
        Self {
            staged: vec![Rgb::BLACK; len],
            latched: vec![Rgb::BLACK; len],
            shows: 0,
        }
    }

    /// Colors staged but not necessarily shown.
    #[inline]
    pub fn staged(&self) -> &[Rgb] {
        &self.staged
    }

    /// Colors visible as of the last show.
    #[inline]
    pub fn latched(&self) -> &[Rgb] {
        &self.latched
    }

    /// Number of times [`PixelStrip::show`] completed.
    #[inline]
    pub const fn show_count(&self) -> u64 {
        self.shows
    }
}

impl PixelStrip for MemoryStrip {
    fn len(&self) -> usize {
        self.staged.len()
    }

    fn set_pixel(&mut self, index: usize, color: Rgb) -> Result<(), DeviceError> {
        let len = self.staged.len();
        let slot = self
            .staged
            .get_mut(index)
            .ok_or(DeviceError::IndexOutOfRange { index, len })?;
        *slot = color;
        Ok(())
    }

    fn show(&mut self) -> Result<(), DeviceError> {
        self.latched.copy_from_slice(&self.staged);
        self.shows += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_strip_latches_on_show() {
        let mut strip = MemoryStrip::new(4);
        strip.set_pixel(2, Rgb::RED).unwrap();
        assert_eq!(strip.staged()[2], Rgb::RED);
        assert_eq!(strip.latched()[2], Rgb::BLACK);

        strip.show().unwrap();
        assert_eq!(strip.latched()[2], Rgb::RED);
        assert_eq!(strip.show_count(), 1);
    }

    #[test]
    fn test_memory_strip_rejects_bad_index() {
        let mut strip = MemoryStrip::new(4);
        assert!(matches!(
            strip.set_pixel(4, Rgb::RED),
            Err(DeviceError::IndexOutOfRange { index: 4, len: 4 })
        ));
        assert!(!strip.is_empty());
    }

    #[test]
    fn test_strip_through_mut_ref() {
        fn paint<S: PixelStrip>(mut strip: S) {
            strip.set_pixel(0, Rgb::BLUE).unwrap();
            strip.show().unwrap();
        }
        let mut strip = MemoryStrip::new(1);
        paint(&mut strip);
        assert_eq!(strip.latched()[0], Rgb::BLUE);
    }
}
