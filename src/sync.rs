//! Sync engine: publish one frame as a minimal set of grid writes.
//!
//! One sweep:
//! 1. Walk the buffer row-major, asking the tracker for the next change
//! 2. Forward each changed cell to the grid, then commit it to the shadow
//! 3. After the full walk, signal the grid to show the frame
//!
//! Unchanged cells cost a comparison and nothing else. A failed forward
//! aborts the sweep without showing; the shadow then covers exactly the
//! cells that made it, so calling [`sync_frame`] again resumes where it failed.

use log::{debug, trace, warn};

use crate::buffer::{ChangeTracker, PixelBuffer};
use crate::error::{Error, Result};
use crate::grid::GridAdapter;

/// Result of a completed sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Cells forwarded to the grid.
    pub cells_changed: usize,
    /// Cells in the buffer.
    pub cells_total: usize,
}

impl SyncReport {
    /// Whether the sweep forwarded nothing.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.cells_changed == 0
    }
}

/// Run one publish sweep from `buffer` to `grid`.
///
/// `show` is signaled exactly once on success, even when nothing changed;
/// some transports need the periodic latch to hold their state.
///
/// # Errors
///
/// [`Error::ShapeMismatch`] if `tracker` was built for another buffer size
/// (nothing is forwarded), [`Error::SyncFailure`] if forwarding a cell fails
/// (show is not called), [`Error::ShowFailure`] if the final latch fails.
pub fn sync_frame<G>(
    buffer: &PixelBuffer,
    tracker: &mut ChangeTracker,
    grid: &mut G,
) -> Result<SyncReport>
where
    G: GridAdapter + ?Sized,
{
    if !tracker.matches(buffer) {
        warn!(
            "sync refused: tracker {}x{} does not match buffer {}x{}",
            tracker.width(),
            tracker.height(),
            buffer.width(),
            buffer.height()
        );
        return Err(Error::ShapeMismatch {
            buffer: (buffer.width(), buffer.height()),
            tracker: (tracker.width(), tracker.height()),
        });
    }

    let mut report = SyncReport {
        cells_changed: 0,
        cells_total: buffer.len(),
    };

    let mut cursor = 0;
    while let Some((index, change)) = tracker.next_change(buffer, cursor) {
        trace!("forward ({}, {}) = {:?}", change.x, change.y, change.color);
        if let Err(source) = grid.set(change.x, change.y, change.color) {
            warn!(
                "sync aborted at ({}, {}) after {} cells: {source}",
                change.x, change.y, report.cells_changed
            );
            return Err(Error::SyncFailure {
                x: change.x,
                y: change.y,
                source,
            });
        }
        tracker.commit(change.x, change.y, change.color);
        report.cells_changed += 1;
        cursor = index + 1;
    }

    grid.show().map_err(|source| {
        warn!("show failed after {} cells: {source}", report.cells_changed);
        Error::ShowFailure(source)
    })?;

    debug!(
        "sync complete: {}/{} cells changed",
        report.cells_changed, report.cells_total
    );
    Ok(report)
}
