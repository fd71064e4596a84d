//! Error types for buffer access, grid construction and publishing.
//!
//! Two layers:
//! - [`DeviceError`]: what a transport (strip, terminal, grid adapter) reports
//! - [`Error`]: what the framebuffer reports to its caller, wrapping device
//!   errors with the coordinate that was being published

use std::fmt;
use std::io;

/// Convenience alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failure reported by a grid adapter or pixel strip transport.
#[derive(Debug)]
pub enum DeviceError {
    /// The underlying writer or bus failed.
    Io(io::Error),
    /// The transport worker is gone (thread exited or channel closed).
    Disconnected,
    /// A strip index past the end of the strip was addressed.
    IndexOutOfRange {
        /// Requested strip index.
        index: usize,
        /// Strip length.
        len: usize,
    },
    /// A grid coordinate outside the adapter's addressable area was addressed.
    CoordinateOutOfRange {
        /// Column.
        x: u16,
        /// Row.
        y: u16,
    },
    /// The device refused the write for a transport-specific reason.
    Rejected(String),
}

impl fmt::Display for DeviceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "device I/O error: {err}"),
            Self::Disconnected => write!(f, "device transport disconnected"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "strip index {index} out of range for strip of {len} pixels")
            }
            Self::CoordinateOutOfRange { x, y } => {
                write!(f, "grid coordinate ({x}, {y}) is not addressable")
            }
            Self::Rejected(msg) => write!(f, "device rejected write: {msg}"),
        }
    }
}

impl std::error::Error for DeviceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for DeviceError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

/// Errors raised by the framebuffer and its helpers.
#[derive(Debug)]
pub enum Error {
    /// Coordinate outside the buffer's current (rotated) bounds.
    OutOfRange {
        /// Requested column.
        x: u16,
        /// Requested row.
        y: u16,
        /// Reported width at the time of the call.
        width: u16,
        /// Reported height at the time of the call.
        height: u16,
    },
    /// Rotation value outside `0..=3`.
    InvalidRotation(u8),
    /// Forwarding a changed cell to the grid adapter failed mid-sweep.
    ///
    /// Cells before `(x, y)` were published and committed; this cell and
    /// everything after it were not.
    SyncFailure {
        /// Column of the cell that failed.
        x: u16,
        /// Row of the cell that failed.
        y: u16,
        /// Transport error.
        source: DeviceError,
    },
    /// Every changed cell was forwarded but the show/latch signal failed.
    ShowFailure(DeviceError),
    /// The change tracker was built for a buffer of a different size.
    ShapeMismatch {
        /// Stored `(width, height)` of the buffer.
        buffer: (u16, u16),
        /// `(width, height)` of the tracker's shadow.
        tracker: (u16, u16),
    },
    /// An image handed to `blit` does not match the display size.
    ImageSize {
        /// Cells required (reported width * reported height).
        expected: usize,
        /// Cells supplied.
        actual: usize,
    },
    /// Grid layout parameters are inconsistent with the grid dimensions.
    InvalidLayout(String),
    /// The strip is shorter than the grid wired onto it.
    StripTooShort {
        /// Pixels the layout addresses.
        required: usize,
        /// Pixels the strip has.
        available: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange {
                x,
                y,
                width,
                height,
            } => write!(f, "coordinate ({x}, {y}) outside {width}x{height} buffer"),
            Self::InvalidRotation(value) => {
                write!(f, "invalid rotation {value}, expected one of 0, 1, 2, 3")
            }
            Self::SyncFailure { x, y, source } => {
                write!(f, "sync failed at ({x}, {y}): {source}")
            }
            Self::ShowFailure(source) => write!(f, "show failed: {source}"),
            Self::ShapeMismatch { buffer, tracker } => write!(
                f,
                "tracker is {}x{} but buffer is {}x{}",
                tracker.0, tracker.1, buffer.0, buffer.1
            ),
            Self::ImageSize { expected, actual } => {
                write!(f, "image has {actual} pixels, display needs {expected}")
            }
            Self::InvalidLayout(msg) => write!(f, "invalid grid layout: {msg}"),
            Self::StripTooShort {
                required,
                available,
            } => write!(
                f,
                "strip has {available} pixels but the grid needs {required}"
            ),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::SyncFailure { source, .. } | Self::ShowFailure(source) => Some(source),
            _ => None,
        }
    }
}

impl Error {
    /// The coordinate a [`Error::SyncFailure`] stopped at, if this is one.
    pub const fn failed_at(&self) -> Option<(u16, u16)> {
        match self {
            Self::SyncFailure { x, y, .. } => Some((*x, *y)),
            _ => None,
        }
    }
}
