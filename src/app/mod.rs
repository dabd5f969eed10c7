// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration of the review session.
//!
//! The `App` struct owns the [`ReviewState`] snapshot, the destination
//! bindings acquired during the session and the toast queue. Messages are
//! turned into state transitions and the effects those transitions request
//! become `Task`s.

pub mod config;
mod message;
pub mod paths;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};
pub use subscription::command_for_key;

use crate::destination::dialog::{DialogWriter, FsRoot};
use crate::destination::Bindings;
use crate::i18n::fluent::I18n;
use crate::review::ReviewState;
use crate::ui::notifications;
use crate::ui::theming::AppTheme;
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;
use std::path::PathBuf;

/// Root Iced application state.
pub struct App {
    pub i18n: I18n,
    review: ReviewState,
    writer: DialogWriter,
    /// Destination roots bound so far; each is acquired at most once.
    bindings: Bindings<FsRoot>,
    recursive: bool,
    /// Name of the loaded folder, shown in the window title.
    source_label: Option<String>,
    theme: AppTheme,
    notifications: notifications::Manager,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("images", &self.review.batches().image_count())
            .field("phase", &self.review.phase())
            .finish()
    }
}

pub const WINDOW_DEFAULT_HEIGHT: u32 = 720;
pub const WINDOW_DEFAULT_WIDTH: u32 = 1024;
pub const MIN_WINDOW_HEIGHT: u32 = 560;
pub const MIN_WINDOW_WIDTH: u32 = 880;

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced 0.14 requires a Fn boot closure; flags are consumed on the first call
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Loads the configuration and optionally starts scanning the folder
    /// given on the command line.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (config, config_warning) = config::load();
        Self::with_config(flags, &config, config_warning)
    }

    fn with_config(
        flags: Flags,
        config: &config::Config,
        config_warning: Option<String>,
    ) -> (Self, Task<Message>) {
        let i18n = I18n::new(flags.lang.clone(), config);
        let writer = DialogWriter::new(
            config.destinations.accept_root.clone(),
            config.destinations.reject_root.clone(),
        )
        .with_titles(
            i18n.tr("picker-title-accept"),
            i18n.tr("picker-title-reject"),
        );

        let mut app = App {
            i18n,
            review: ReviewState::new(),
            writer,
            bindings: Bindings::default(),
            recursive: config.review.recursive,
            source_label: None,
            theme: AppTheme::new(config.general.theme_mode),
            notifications: notifications::Manager::new(),
        };

        if let Some(key) = config_warning {
            app.notifications
                .push(notifications::Notification::warning(&key));
        }

        let task = match flags.folder {
            Some(folder) => update::load_folder_task(PathBuf::from(folder), app.recursive),
            None => Task::none(),
        };

        (app, task)
    }

    fn title(&self) -> String {
        match &self.source_label {
            Some(folder) => self
                .i18n
                .tr_with_args("window-title-folder", &[("folder", folder.as_str())]),
            None => self.i18n.tr("window-title"),
        }
    }

    fn theme(&self) -> Theme {
        self.theme.iced_theme()
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            subscription::create_event_subscription(),
            subscription::create_tick_subscription(self.notifications.has_notifications()),
        ])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        let mut ctx = update::UpdateContext {
            i18n: &self.i18n,
            review: &mut self.review,
            writer: &self.writer,
            bindings: &mut self.bindings,
            recursive: self.recursive,
            source_label: &mut self.source_label,
            notifications: &mut self.notifications,
        };

        match message {
            Message::Review(review_message) => {
                update::handle_review_message(&mut ctx, review_message)
            }
            Message::Notification(notification_message) => {
                ctx.notifications.handle_message(&notification_message);
                Task::none()
            }
            Message::FolderPicked(path) => update::handle_folder_picked(&mut ctx, path),
            Message::FilesPicked(paths) => update::handle_files_picked(&mut ctx, paths),
            Message::FolderLoaded { label, result } => {
                update::handle_folder_loaded(&mut ctx, label, result)
            }
            Message::ApertureLoaded { key, text } => {
                update::handle_aperture_loaded(&mut ctx, key, text)
            }
            Message::BatchWritten(outcome) => update::handle_batch_written(&mut ctx, outcome),
            Message::Tick(_instant) => {
                ctx.notifications.tick();
                Task::none()
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            i18n: &self.i18n,
            review: &self.review,
            colors: &self.theme.colors,
            notifications: &self.notifications,
        })
    }
}
