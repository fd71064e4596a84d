//! Grid module: where logical coordinates meet physical LEDs.
//!
//! This module contains:
//! - [`GridAdapter`]: the capability the sync engine publishes through
//! - [`GridLayout`]: how a strip is wired into rows and columns
//! - [`PixelGrid`]: a [`GridAdapter`] over a linear [`PixelStrip`](crate::strip::PixelStrip)

mod layout;
mod pixel_grid;

pub use layout::{GridLayout, LayoutFlags, Orientation};
pub use pixel_grid::PixelGrid;

use crate::buffer::Rgb;
use crate::error::DeviceError;

/// A physical (or simulated) grid of addressable pixels.
///
/// Coordinates are unrotated grid coordinates. Writes may be buffered by
/// the implementation; nothing is required to become visible before
/// [`GridAdapter::show`].
pub trait GridAdapter {
    /// Stage `color` for the pixel at (x, y).
    fn set(&mut self, x: u16, y: u16, color: Rgb) -> Result<(), DeviceError>;

    /// Latch every staged write onto the device.
    fn show(&mut self) -> Result<(), DeviceError>;
}

impl<G: GridAdapter + ?Sized> GridAdapter for &mut G {
    #[inline]
    fn set(&mut self, x: u16, y: u16, color: Rgb) -> Result<(), DeviceError> {
        (**self).set(x, y, color)
    }

    #[inline]
    fn show(&mut self) -> Result<(), DeviceError> {
        (**self).show()
    }
}

impl<G: GridAdapter + ?Sized> GridAdapter for Box<G> {
    #[inline]
    fn set(&mut self, x: u16, y: u16, color: Rgb) -> Result<(), DeviceError> {
        (**self).set(x, y, color)
    }

    #[inline]
    fn show(&mut self) -> Result<(), DeviceError> {
        (**self).show()
    }
}
