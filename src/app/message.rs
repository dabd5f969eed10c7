// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::destination::dialog::FsRoot;
use crate::error::Error;
use crate::review::state::SelectionKey;
use crate::review::{ImageSequence, JobOutcome};
use crate::ui::notifications;
use crate::ui::review;
use std::path::PathBuf;
use std::time::Instant;

/// Top-level messages consumed by `App::update`. Completions of asynchronous
/// work come back through the dedicated variants.
#[derive(Debug, Clone)]
pub enum Message {
    Review(review::Message),
    Notification(notifications::NotificationMessage),
    /// Result from the open folder dialog.
    FolderPicked(Option<PathBuf>),
    /// Result from the open files dialog.
    FilesPicked(Option<Vec<PathBuf>>),
    /// A scan finished. `label` names the source shown in the window title.
    FolderLoaded {
        label: Option<String>,
        result: Result<ImageSequence, Error>,
    },
    ApertureLoaded {
        key: SelectionKey,
        text: String,
    },
    BatchWritten(JobOutcome<FsRoot>),
    Tick(Instant), // Periodic tick for toast auto-dismiss
}

/// Runtime flags passed in from the command line.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    /// Folder to load on startup.
    pub folder: Option<String>,
}
