// SPDX-License-Identifier: MPL-2.0
//! Review session state and its transitions.
//!
//! [`ReviewState`] is an immutable snapshot. Every transition takes the
//! current snapshot and returns the next one together with an [`Effect`]
//! describing the asynchronous work the caller has to start. Nothing in here
//! performs I/O.

use super::batcher::{Batch, Batches};
use super::controller::WriteReport;
use super::image_store::{Image, ImageId, ImageSequence};
use super::selection::Cursor;
use crate::destination::Destination;
use crate::error::DestinationError;
use crate::media::metadata::ApertureDisplay;
use std::path::PathBuf;

/// Name of the subfolder rejected batches are written to.
pub const REJECT_FOLDER: &str = "Reject";

/// User intents that act on the review session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    PreviousSet,
    NextSet,
    /// Select an image by its global index.
    Select(usize),
    Accept,
    Reject,
    Save,
}

/// The three batch operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobKind {
    Accept,
    Reject,
    Save,
}

impl JobKind {
    /// Destination binding the operation writes through.
    #[must_use]
    pub fn destination(self) -> Destination {
        match self {
            JobKind::Accept | JobKind::Save => Destination::Accept,
            JobKind::Reject => Destination::Reject,
        }
    }

    /// Whether a successful write consumes the batch.
    #[must_use]
    pub fn removes_batch(self) -> bool {
        matches!(self, JobKind::Accept | JobKind::Reject)
    }

    /// Whether a successful write advances the accepted counter.
    #[must_use]
    pub fn advances_counter(self) -> bool {
        matches!(self, JobKind::Accept | JobKind::Save)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Writing(JobKind),
}

/// Identifies one selection event. Aperture results carry the key they were
/// requested for and are dropped once it is no longer current.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionKey {
    generation: u64,
    image: ImageId,
    serial: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApertureRequest {
    pub key: SelectionKey,
    pub path: PathBuf,
}

/// A batch write to perform.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchJob {
    pub kind: JobKind,
    /// Load generation the batch was taken from.
    pub generation: u64,
    pub batch_index: usize,
    /// Subfolder under the destination root.
    pub folder_name: String,
    pub batch: Batch,
}

/// Work requested by a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    FetchAperture(ApertureRequest),
    Write(BatchJob),
    /// The operation was requested with no batch to act on.
    NothingToWrite(JobKind),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReviewState {
    generation: u64,
    batches: Batches,
    cursor: Option<Cursor>,
    phase: Phase,
    accepted_counter: u32,
    serial: u64,
    aperture: ApertureDisplay,
}

impl Default for ReviewState {
    fn default() -> Self {
        Self {
            generation: 0,
            batches: Batches::default(),
            cursor: None,
            phase: Phase::Idle,
            accepted_counter: 1,
            serial: 0,
            aperture: ApertureDisplay::Empty,
        }
    }
}

impl ReviewState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn batches(&self) -> &Batches {
        &self.batches
    }

    #[must_use]
    pub fn cursor(&self) -> Option<Cursor> {
        self.cursor
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn is_writing(&self) -> bool {
        matches!(self.phase, Phase::Writing(_))
    }

    /// Number used to name the next accepted or saved batch folder.
    #[must_use]
    pub fn accepted_counter(&self) -> u32 {
        self.accepted_counter
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn aperture(&self) -> &ApertureDisplay {
        &self.aperture
    }

    #[must_use]
    pub fn current_batch(&self) -> Option<&Batch> {
        self.cursor.and_then(|c| self.batches.get(c.batch()))
    }

    #[must_use]
    pub fn selected_image(&self) -> Option<&Image> {
        self.cursor.and_then(|c| self.batches.image(c.global()))
    }

    /// Replaces the loaded images with `sequence` and selects its first image.
    ///
    /// Counter and phase carry over: a write already in flight keeps running
    /// but can no longer consume batches of the new sequence.
    #[must_use]
    pub fn load(&self, sequence: &ImageSequence) -> (Self, Effect) {
        let batches = Batches::from_sequence(sequence);
        let cursor = Cursor::start(&batches);
        let next = Self {
            generation: self.generation + 1,
            batches,
            cursor: None,
            ..self.clone()
        };
        next.reselect(cursor, true)
    }

    /// Applies a user command. Every command is ignored while writing.
    #[must_use]
    pub fn dispatch(&self, command: Command) -> (Self, Effect) {
        if self.is_writing() {
            return (self.clone(), Effect::None);
        }

        match command {
            Command::MoveLeft => self.navigate(|c, b| c.step_left(b)),
            Command::MoveRight => self.navigate(|c, b| c.step_right(b)),
            Command::PreviousSet => self.navigate(|c, b| c.previous_set(b)),
            Command::NextSet => self.navigate(|c, b| c.next_set(b)),
            Command::Select(index) => self.navigate(|c, b| c.select(b, index)),
            Command::Accept => self.begin_write(JobKind::Accept),
            Command::Reject => self.begin_write(JobKind::Reject),
            Command::Save => self.begin_write(JobKind::Save),
        }
    }

    /// Ends the write started for `job`.
    ///
    /// On success the counter advances for accepted and saved batches, and
    /// accepted or rejected batches are removed with the cursor moved to the
    /// slot they left. Batches are only removed if no other folder was loaded
    /// since the job started. On failure only the phase changes.
    #[must_use]
    pub fn finish_write(
        &self,
        job: &BatchJob,
        outcome: &Result<WriteReport, DestinationError>,
    ) -> (Self, Effect) {
        let mut next = Self {
            phase: Phase::Idle,
            ..self.clone()
        };

        if outcome.is_err() {
            return (next, Effect::None);
        }

        if job.kind.advances_counter() {
            next.accepted_counter += 1;
        }

        if !job.kind.removes_batch() || job.generation != self.generation {
            return (next, Effect::None);
        }

        next.batches = self.batches.remove(job.batch_index);
        let cursor = Cursor::after_removal(&next.batches, job.batch_index);
        next.reselect(cursor, false)
    }

    /// Shows a resolved aperture if `key` still identifies the selection.
    #[must_use]
    pub fn resolve_aperture(&self, key: SelectionKey, text: String) -> Self {
        if self.selection_key() != Some(key) {
            return self.clone();
        }
        Self {
            aperture: ApertureDisplay::Ready(text),
            ..self.clone()
        }
    }

    fn selection_key(&self) -> Option<SelectionKey> {
        self.selected_image().map(|image| SelectionKey {
            generation: self.generation,
            image: image.id(),
            serial: self.serial,
        })
    }

    fn navigate(&self, step: impl FnOnce(Cursor, &Batches) -> Cursor) -> (Self, Effect) {
        match self.cursor {
            Some(cursor) => {
                let moved = step(cursor, &self.batches);
                self.clone().reselect(Some(moved), false)
            }
            None => (self.clone(), Effect::None),
        }
    }

    /// Moves to `cursor`. A new aperture request is issued when the selected
    /// image changes, or always when `force` is set.
    fn reselect(mut self, cursor: Option<Cursor>, force: bool) -> (Self, Effect) {
        let before = self.selected_image().map(Image::id);
        self.cursor = cursor;
        let after = self.selected_image().map(Image::id);

        if !force && before == after {
            return (self, Effect::None);
        }

        self.serial += 1;
        let request = self
            .selection_key()
            .zip(self.selected_image().map(|img| img.path().to_path_buf()));

        match request {
            Some((key, path)) => {
                self.aperture = ApertureDisplay::Pending;
                (self, Effect::FetchAperture(ApertureRequest { key, path }))
            }
            None => {
                self.aperture = ApertureDisplay::Empty;
                (self, Effect::None)
            }
        }
    }

    fn begin_write(&self, kind: JobKind) -> (Self, Effect) {
        let Some((batch_index, batch)) = self
            .cursor
            .and_then(|c| self.batches.get(c.batch()).map(|b| (c.batch(), b.clone())))
        else {
            return (self.clone(), Effect::NothingToWrite(kind));
        };

        let folder_name = match kind.destination() {
            Destination::Accept => format!("Batch_{}", self.accepted_counter),
            Destination::Reject => REJECT_FOLDER.to_string(),
        };

        let job = BatchJob {
            kind,
            generation: self.generation,
            batch_index,
            folder_name,
            batch,
        };
        let next = Self {
            phase: Phase::Writing(kind),
            ..self.clone()
        };
        (next, Effect::Write(job))
    }
}
