//! # pixel-framebuf
//!
//! A logical RGB framebuffer for grids of individually addressable LEDs.
//!
//! Applications draw onto an (x, y) grid, optionally rotated; the framebuffer
//! publishes only the pixels that changed since the previous frame and then
//! signals the grid to show.
//!
//! ## Core Concepts
//!
//! - **Shadow buffer**: the last published frame, used to compute minimal updates
//! - **Sync sweep**: row-major walk forwarding changed pixels, then one show
//! - **Grid adapter**: injected capability that owns wiring and transport
//! - **Rotation**: quarter turns change reported size, never stored data
//!
//! ## Example
//!
//! ```rust
//! use pixel_framebuf::{Draw, GridLayout, MemoryStrip, PixelFramebuffer, PixelGrid, Rgb};
//!
//! // An 8x4 serpentine matrix on a 32-pixel strip.
//! let grid = PixelGrid::new(MemoryStrip::new(32), 8, 4, GridLayout::default())?;
//! let mut fb = PixelFramebuffer::new(grid, 8, 4);
//!
//! fb.line(0, 0, 7, 3, Rgb::RED);
//! let report = fb.display()?;
//! assert_eq!(report.cells_changed, 8);
//!
//! // Nothing changed: only the show signal goes out.
//! assert_eq!(fb.display()?.cells_changed, 0);
//! # Ok::<(), pixel_framebuf::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod buffer;
pub mod canvas;
pub mod config;
pub mod error;
pub mod framebuf;
pub mod grid;
pub mod strip;
pub mod sync;
pub mod terminal;

// Re-exports for convenience
pub use buffer::{Change, ChangeTracker, Changes, PixelBuffer, Rgb, Rotation};
pub use canvas::{Draw, PixelSurface};
pub use config::FramebufferConfig;
pub use error::{DeviceError, Error, Result};
pub use framebuf::PixelFramebuffer;
pub use grid::{GridAdapter, GridLayout, LayoutFlags, Orientation, PixelGrid};
pub use strip::{MemoryStrip, PixelStrip, ThreadedStrip, ThreadedStripConfig};
pub use sync::{sync_frame, SyncReport};
pub use terminal::TerminalGrid;
