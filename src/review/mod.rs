// SPDX-License-Identifier: MPL-2.0
//! Batch review: loading, partitioning, navigation and batch writes.

pub mod batcher;
pub mod controller;
pub mod image_store;
pub mod selection;
pub mod state;

pub use batcher::{Batch, Batches, BATCH_SIZE};
pub use controller::{run_job, JobOutcome, WriteReport};
pub use image_store::{Image, ImageId, ImageSequence};
pub use selection::Cursor;
pub use state::{BatchJob, Command, Effect, JobKind, Phase, ReviewState};
