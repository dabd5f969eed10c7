// SPDX-License-Identifier: MPL-2.0
//! Fixed-size partitioning of the remaining images into review batches.
//!
//! Batches are always recomputed from a flat image list, so every batch is
//! full except possibly the last one. That keeps global indices and
//! `(batch, local)` pairs interchangeable with plain arithmetic.

use super::image_store::{Image, ImageSequence};
use std::sync::Arc;

/// Number of images presented together for one decision.
pub const BATCH_SIZE: usize = 8;

/// A contiguous group of at most [`BATCH_SIZE`] images.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    images: Arc<[Image]>,
}

impl Batch {
    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Image> {
        self.images.get(index)
    }

    #[must_use]
    pub fn images(&self) -> &[Image] {
        &self.images
    }

    pub fn iter(&self) -> impl Iterator<Item = &Image> {
        self.images.iter()
    }
}

impl From<&[Image]> for Batch {
    fn from(images: &[Image]) -> Self {
        Self {
            images: images.into(),
        }
    }
}

/// The ordered batches covering exactly the images still under review.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Batches {
    batches: Vec<Batch>,
    image_count: usize,
}

impl Batches {
    /// Splits `images` into consecutive batches of [`BATCH_SIZE`].
    #[must_use]
    pub fn partition(images: &[Image]) -> Self {
        Self {
            batches: images.chunks(BATCH_SIZE).map(Batch::from).collect(),
            image_count: images.len(),
        }
    }

    #[must_use]
    pub fn from_sequence(sequence: &ImageSequence) -> Self {
        Self::partition(sequence.as_slice())
    }

    /// Returns the batches recomputed over every image except those of batch
    /// `index`. An out-of-range index leaves the batches unchanged.
    #[must_use]
    pub fn remove(&self, index: usize) -> Self {
        if index >= self.batches.len() {
            return self.clone();
        }
        let remaining: Vec<Image> = self
            .batches
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .flat_map(|(_, batch)| batch.iter().cloned())
            .collect();
        Self::partition(&remaining)
    }

    /// Number of batches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.batches.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Batch> {
        self.batches.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Batch> {
        self.batches.iter()
    }

    /// Total number of images across all batches.
    #[must_use]
    pub fn image_count(&self) -> usize {
        self.image_count
    }

    /// All images in global order.
    pub fn images(&self) -> impl Iterator<Item = &Image> {
        self.batches.iter().flat_map(Batch::iter)
    }

    /// Image at global index `index`.
    #[must_use]
    pub fn image(&self, index: usize) -> Option<&Image> {
        self.batches
            .get(index / BATCH_SIZE)
            .and_then(|batch| batch.get(index % BATCH_SIZE))
    }

    /// Batch containing global index `index`, if it is in range.
    #[must_use]
    pub fn batch_of(&self, index: usize) -> Option<usize> {
        (index < self.image_count).then_some(index / BATCH_SIZE)
    }

    /// Global index of the first image of batch `batch`.
    #[must_use]
    pub fn start_of(batch: usize) -> usize {
        batch * BATCH_SIZE
    }
}
