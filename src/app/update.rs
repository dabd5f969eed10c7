// SPDX-License-Identifier: MPL-2.0
//! Update logic for the application.
//!
//! Each handler receives an [`UpdateContext`] borrowing the parts of `App`
//! it needs and returns the follow-up [`Task`].

use super::Message;
use crate::destination::dialog::{DialogWriter, FsRoot};
use crate::destination::Bindings;
use crate::error::Error;
use crate::i18n::fluent::I18n;
use crate::media::{metadata, IMAGE_EXTENSIONS};
use crate::review::image_store::{load_files, load_folder};
use crate::review::state::SelectionKey;
use crate::review::{run_job, Command, Effect, ImageSequence, JobKind, JobOutcome, ReviewState};
use crate::ui::notifications::{self, Notification};
use crate::ui::review;
use iced::Task;
use std::path::PathBuf;

/// Mutable references to application state needed by update handlers.
pub struct UpdateContext<'a> {
    pub i18n: &'a I18n,
    pub review: &'a mut ReviewState,
    pub writer: &'a DialogWriter,
    pub bindings: &'a mut Bindings<FsRoot>,
    pub recursive: bool,
    pub source_label: &'a mut Option<String>,
    pub notifications: &'a mut notifications::Manager,
}

/// Turns a transition effect into the task that performs it.
pub fn run_effect(ctx: &mut UpdateContext<'_>, effect: Effect) -> Task<Message> {
    match effect {
        Effect::None => Task::none(),
        Effect::FetchAperture(request) => {
            let key = request.key;
            Task::perform(metadata::fetch_aperture(request.path), move |text| {
                Message::ApertureLoaded { key, text }
            })
        }
        Effect::Write(job) => {
            let root = ctx.bindings.get(job.kind.destination());
            Task::perform(
                run_job(ctx.writer.clone(), root, job),
                Message::BatchWritten,
            )
        }
        Effect::NothingToWrite(kind) => {
            ctx.notifications
                .push(Notification::info(nothing_to_write_key(kind)));
            Task::none()
        }
    }
}

fn nothing_to_write_key(kind: JobKind) -> &'static str {
    match kind {
        JobKind::Accept => "notice-nothing-to-accept",
        JobKind::Reject => "notice-nothing-to-reject",
        JobKind::Save => "notice-nothing-to-save",
    }
}

fn written_key(kind: JobKind) -> &'static str {
    match kind {
        JobKind::Accept => "notification-batch-accepted",
        JobKind::Reject => "notification-batch-rejected",
        JobKind::Save => "notification-batch-saved",
    }
}

pub fn handle_review_message(
    ctx: &mut UpdateContext<'_>,
    message: review::Message,
) -> Task<Message> {
    match message {
        review::Message::OpenFolder => handle_open_folder_dialog(ctx),
        review::Message::OpenFiles => handle_open_files_dialog(ctx),
        review::Message::Command(command) => handle_command(ctx, command),
    }
}

pub fn handle_command(ctx: &mut UpdateContext<'_>, command: Command) -> Task<Message> {
    let (next, effect) = ctx.review.dispatch(command);
    *ctx.review = next;
    run_effect(ctx, effect)
}

/// Opens the folder picker. Ignored while a batch is being written.
pub fn handle_open_folder_dialog(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    if ctx.review.is_writing() {
        return Task::none();
    }
    let title = ctx.i18n.tr("picker-title-open-folder");
    Task::perform(
        async move {
            rfd::AsyncFileDialog::new()
                .set_title(title)
                .pick_folder()
                .await
                .map(|h| h.path().to_path_buf())
        },
        Message::FolderPicked,
    )
}

/// Opens the multi-file picker. Ignored while a batch is being written.
pub fn handle_open_files_dialog(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    if ctx.review.is_writing() {
        return Task::none();
    }
    let title = ctx.i18n.tr("picker-title-open-files");
    let filter = ctx.i18n.tr("picker-filter-images");
    Task::perform(
        async move {
            rfd::AsyncFileDialog::new()
                .set_title(title)
                .add_filter(filter, IMAGE_EXTENSIONS)
                .pick_files()
                .await
                .map(|handles| {
                    handles
                        .iter()
                        .map(|h| h.path().to_path_buf())
                        .collect::<Vec<_>>()
                })
        },
        Message::FilesPicked,
    )
}

/// Starts scanning the picked folder.
pub fn handle_folder_picked(ctx: &mut UpdateContext<'_>, path: Option<PathBuf>) -> Task<Message> {
    let Some(path) = path else {
        // User cancelled the dialog
        return Task::none();
    };
    load_folder_task(path, ctx.recursive)
}

/// Builds the task scanning `path` for images.
pub fn load_folder_task(path: PathBuf, recursive: bool) -> Task<Message> {
    let label = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned());
    Task::perform(load_folder(path, recursive), move |result| {
        Message::FolderLoaded { label, result }
    })
}

pub fn handle_files_picked(
    _ctx: &mut UpdateContext<'_>,
    paths: Option<Vec<PathBuf>>,
) -> Task<Message> {
    let Some(paths) = paths.filter(|paths| !paths.is_empty()) else {
        return Task::none();
    };
    let label = paths
        .first()
        .and_then(|path| path.parent())
        .and_then(|parent| parent.file_name())
        .map(|name| name.to_string_lossy().into_owned());
    Task::perform(load_files(paths), move |result| Message::FolderLoaded {
        label,
        result,
    })
}

/// Replaces the session sequence with a freshly scanned one.
///
/// A scan failure keeps the previous sequence. A scan that completes while a
/// batch is being written still replaces it; the write then leaves the new
/// batches alone.
pub fn handle_folder_loaded(
    ctx: &mut UpdateContext<'_>,
    label: Option<String>,
    result: Result<ImageSequence, Error>,
) -> Task<Message> {
    let sequence = match result {
        Ok(sequence) => sequence,
        Err(err) => {
            log::warn!("Failed to load images: {err}");
            ctx.notifications.push(
                Notification::warning("notification-load-error").with_arg("reason", err.to_string()),
            );
            return Task::none();
        }
    };

    if sequence.is_empty() {
        ctx.notifications
            .push(Notification::info("notification-folder-empty"));
    } else {
        ctx.notifications.push(
            Notification::info("notification-folder-loaded")
                .with_arg("count", sequence.len().to_string()),
        );
    }

    log::info!("Loaded {} image(s)", sequence.len());
    *ctx.source_label = label;
    let (next, effect) = ctx.review.load(&sequence);
    *ctx.review = next;
    run_effect(ctx, effect)
}

pub fn handle_aperture_loaded(
    ctx: &mut UpdateContext<'_>,
    key: SelectionKey,
    text: String,
) -> Task<Message> {
    *ctx.review = ctx.review.resolve_aperture(key, text);
    Task::none()
}

/// Applies a finished batch write: binds the root it used, updates the
/// session and reports the outcome.
pub fn handle_batch_written(
    ctx: &mut UpdateContext<'_>,
    outcome: JobOutcome<FsRoot>,
) -> Task<Message> {
    let JobOutcome { job, root, result } = outcome;

    if let Some(root) = root {
        ctx.bindings.bind(job.kind.destination(), root);
    }

    let (next, effect) = ctx.review.finish_write(&job, &result);
    *ctx.review = next;

    let notification = match &result {
        Ok(report) => {
            Notification::success(written_key(job.kind)).with_arg("location", report.location.clone())
        }
        Err(err) => Notification::from(err),
    };
    ctx.notifications.push(notification);

    run_effect(ctx, effect)
}
