//! `PixelFramebuffer`: draw into memory, publish only what changed.
//!
//! The framebuffer composes three parts:
//! - a [`PixelBuffer`] the application draws into (via [`Draw`](crate::Draw))
//! - a [`ChangeTracker`] remembering what the grid currently shows
//! - an injected [`GridAdapter`] that owns wiring and transport
//!
//! [`PixelFramebuffer::display`] runs one sync sweep between them.

use log::debug;

use crate::buffer::{ChangeTracker, Changes, PixelBuffer, Rgb, Rotation};
use crate::canvas::PixelSurface;
use crate::config::FramebufferConfig;
use crate::error::Result;
use crate::grid::GridAdapter;
use crate::sync::{sync_frame, SyncReport};

/// Rotation-aware framebuffer in front of a physical pixel grid.
pub struct PixelFramebuffer<G> {
    /// Live drawing buffer.
    buffer: PixelBuffer,
    /// Shadow of the last published frame.
    tracker: ChangeTracker,
    /// Physical grid.
    grid: G,
    /// Completed display calls.
    frames: u64,
}

impl<G: GridAdapter> PixelFramebuffer<G> {
    /// Create a `width` x `height` framebuffer publishing to `grid`.
    ///
    /// # Panics
    /// Panics if width or height is 0.
    pub fn new(grid: G, width: u16, height: u16) -> Self {
        Self::with_config(grid, FramebufferConfig::new(width, height))
    }

    /// Create a framebuffer from a configuration.
    ///
    /// # Panics
    /// Panics if the configured width or height is 0.
    pub fn with_config(grid: G, config: FramebufferConfig) -> Self {
        let mut buffer = PixelBuffer::new(config.width, config.height);
        buffer.set_rotation_value(config.rotation);
        let mut tracker = ChangeTracker::for_buffer(&buffer);
        if config.full_refresh_on_start {
            tracker.invalidate();
        }
        Self {
            buffer,
            tracker,
            grid,
            frames: 0,
        }
    }

    /// Width in the current rotation.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.buffer.reported_width()
    }

    /// Height in the current rotation.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.buffer.reported_height()
    }

    /// Current rotation.
    #[inline]
    pub const fn rotation(&self) -> Rotation {
        self.buffer.rotation()
    }

    /// Set the rotation (0-3 quarter turns). Pixels already drawn stay put.
    pub fn set_rotation(&mut self, quarter_turns: u8) -> Result<()> {
        self.buffer.set_rotation(quarter_turns)?;
        debug!("framebuffer rotation set to {:?}", self.buffer.rotation());
        Ok(())
    }

    /// Read the pixel at (x, y) in the current rotation.
    pub fn pixel(&self, x: u16, y: u16) -> Result<Rgb> {
        self.buffer.get_cell(x, y)
    }

    /// Write the pixel at (x, y) in the current rotation.
    pub fn set_pixel(&mut self, x: u16, y: u16, color: Rgb) -> Result<()> {
        self.buffer.set_cell(x, y, color)
    }

    /// Cells that the next display would publish, in publish order.
    pub fn pending_changes(&self) -> Changes<'_> {
        self.tracker.diff(&self.buffer)
    }

    /// Publish changed pixels to the grid and show the frame.
    ///
    /// On error the shadow reflects exactly the pixels the grid accepted;
    /// calling `display` again retries the rest.
    pub fn display(&mut self) -> Result<SyncReport> {
        let report = sync_frame(&self.buffer, &mut self.tracker, &mut self.grid)?;
        self.frames += 1;
        Ok(report)
    }

    /// Forget what the grid shows so the next display pushes every pixel.
    pub fn invalidate(&mut self) {
        debug!("framebuffer invalidated, next display is a full refresh");
        self.tracker.invalidate();
    }

    /// Completed display calls.
    #[inline]
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    /// The drawing buffer.
    #[inline]
    pub const fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    /// The drawing buffer, mutably.
    #[inline]
    pub fn buffer_mut(&mut self) -> &mut PixelBuffer {
        &mut self.buffer
    }

    /// The shadow of the last published frame.
    #[inline]
    pub const fn tracker(&self) -> &ChangeTracker {
        &self.tracker
    }

    /// The grid adapter.
    #[inline]
    pub const fn grid(&self) -> &G {
        &self.grid
    }

    /// The grid adapter, mutably.
    #[inline]
    pub fn grid_mut(&mut self) -> &mut G {
        &mut self.grid
    }

    /// Tear down and return the grid adapter.
    pub fn into_grid(self) -> G {
        self.grid
    }
}

impl<G> PixelSurface for PixelFramebuffer<G> {
    #[inline]
    fn surface_size(&self) -> (u16, u16) {
        self.buffer.surface_size()
    }

    #[inline]
    fn put_pixel(&mut self, x: u16, y: u16, color: Rgb) -> Result<()> {
        self.buffer.set_cell(x, y, color)
    }

    #[inline]
    fn pixel_at(&self, x: u16, y: u16) -> Result<Rgb> {
        self.buffer.get_cell(x, y)
    }
}

impl<G> std::fmt::Debug for PixelFramebuffer<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelFramebuffer")
            .field("buffer", &self.buffer)
            .field("tracker", &self.tracker)
            .field("frames", &self.frames)
            .finish_non_exhaustive()
    }
}
