//! Framebuffer configuration.

use crate::buffer::Rotation;

/// Configuration for a [`PixelFramebuffer`](crate::PixelFramebuffer).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramebufferConfig {
    /// Stored width in pixels.
    pub width: u16,
    /// Stored height in pixels.
    pub height: u16,
    /// Initial rotation of the drawing frame.
    pub rotation: Rotation,
    /// Push every pixel on the first display instead of assuming the
    /// device starts black.
    pub full_refresh_on_start: bool,
}

impl FramebufferConfig {
    /// Configuration for a `width` x `height` grid, unrotated.
    pub const fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            rotation: Rotation::Rotate0,
            full_refresh_on_start: false,
        }
    }

    /// Set the initial rotation.
    #[must_use]
    pub const fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Push every pixel on the first display.
    #[must_use]
    pub const fn with_full_refresh_on_start(mut self, enabled: bool) -> Self {
        self.full_refresh_on_start = enabled;
        self
    }
}
