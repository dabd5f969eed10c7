// SPDX-License-Identifier: MPL-2.0
//! The review cursor: which batch is active and which image within it.
//!
//! All moves are pure: they take the current batches and return the new
//! cursor. Moves within a batch wrap at the batch's real length; moves between
//! batches wrap over the whole batch list.

use super::batcher::{Batches, BATCH_SIZE};

/// Position of the selected image, as a batch index and a local index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    batch: usize,
    image: usize,
}

impl Cursor {
    /// Cursor on global index `index`, or `None` if it is out of range.
    #[must_use]
    pub fn at(batches: &Batches, index: usize) -> Option<Self> {
        let batch = batches.batch_of(index)?;
        Some(Self {
            batch,
            image: index - Batches::start_of(batch),
        })
    }

    /// Cursor on the first image of batch `batch`.
    #[must_use]
    pub fn first_of(batches: &Batches, batch: usize) -> Option<Self> {
        batches.get(batch).filter(|b| !b.is_empty())?;
        Some(Self { batch, image: 0 })
    }

    /// Cursor on the first image overall, or `None` when nothing is loaded.
    #[must_use]
    pub fn start(batches: &Batches) -> Option<Self> {
        Self::first_of(batches, 0)
    }

    #[must_use]
    pub fn batch(self) -> usize {
        self.batch
    }

    /// Index within the active batch.
    #[must_use]
    pub fn image(self) -> usize {
        self.image
    }

    /// Index over all remaining images.
    #[must_use]
    pub fn global(self) -> usize {
        self.batch * BATCH_SIZE + self.image
    }

    /// Selects global index `index`; out-of-range indices keep `self`.
    #[must_use]
    pub fn select(self, batches: &Batches, index: usize) -> Self {
        Self::at(batches, index).unwrap_or(self)
    }

    #[must_use]
    pub fn step_left(self, batches: &Batches) -> Self {
        let len = self.batch_len(batches);
        if len == 0 {
            return self;
        }
        Self {
            image: (self.image + len - 1) % len,
            ..self
        }
    }

    #[must_use]
    pub fn step_right(self, batches: &Batches) -> Self {
        let len = self.batch_len(batches);
        if len == 0 {
            return self;
        }
        Self {
            image: (self.image + 1) % len,
            ..self
        }
    }

    /// Moves one batch forward, wrapping to the first batch.
    ///
    /// Bound to the "previous set" control; the labels are inverted relative
    /// to the direction of travel.
    #[must_use]
    pub fn previous_set(self, batches: &Batches) -> Self {
        let count = batches.len();
        if count == 0 {
            return self;
        }
        Self::first_of(batches, (self.batch + 1) % count).unwrap_or(self)
    }

    /// Moves one batch toward the first, wrapping to the last batch.
    #[must_use]
    pub fn next_set(self, batches: &Batches) -> Self {
        let count = batches.len();
        if count == 0 {
            return self;
        }
        Self::first_of(batches, (self.batch + count - 1) % count).unwrap_or(self)
    }

    /// Cursor after batch `removed` was taken out and `batches` recomputed.
    ///
    /// Lands on the first image of the batch that now occupies the removed
    /// slot, or wraps to the start when that slot is past the end.
    #[must_use]
    pub fn after_removal(batches: &Batches, removed: usize) -> Option<Self> {
        Self::at(batches, Batches::start_of(removed)).or_else(|| Self::start(batches))
    }

    fn batch_len(self, batches: &Batches) -> usize {
        batches.get(self.batch).map_or(0, |b| b.len())
    }
}
