//! Buffer module: the framebuffer and its shadow for minimal updates.
//!
//! This module contains:
//! - [`Rgb`]: True-color representation
//! - [`Rotation`]: Quarter-turn rotation of the drawing frame
//! - [`PixelBuffer`]: A grid of colors representing the logical display
//! - [`diff`]: Shadow buffer and change detection

mod pixel;
#[allow(clippy::module_inception)]
mod buffer;
pub mod diff;

pub use pixel::{Rgb, Rotation};
pub use buffer::PixelBuffer;
pub use diff::{Change, ChangeTracker, Changes};
