// SPDX-License-Identifier: MPL-2.0
//! Core notification data structures.

use crate::app::config::{TOAST_DURATION, WARNING_TOAST_DURATION};
use crate::error::DestinationError;
use crate::ui::design_tokens::palette;
use iced::Color;
use std::time::{Duration, Instant};

/// Unique identifier for a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(u64);

impl NotificationId {
    /// Creates a new unique notification ID.
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

/// Severity level determines display duration and visual styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Success,
    Info,
    Warning,
    /// Stays until dismissed.
    Error,
}

impl Severity {
    #[must_use]
    pub fn color(&self) -> Color {
        match self {
            Severity::Success => palette::SUCCESS_500,
            Severity::Info => palette::INFO_500,
            Severity::Warning => palette::WARNING_500,
            Severity::Error => palette::ERROR_500,
        }
    }

    /// Returns the auto-dismiss duration, or `None` for errors.
    #[must_use]
    pub fn auto_dismiss_duration(&self) -> Option<Duration> {
        match self {
            Severity::Success | Severity::Info => Some(TOAST_DURATION),
            Severity::Warning => Some(WARNING_TOAST_DURATION),
            Severity::Error => None,
        }
    }

    /// Glyph shown at the start of the toast.
    #[must_use]
    pub fn glyph(&self) -> &'static str {
        match self {
            Severity::Success => "✓",
            Severity::Info => "i",
            Severity::Warning | Severity::Error => "!",
        }
    }
}

/// A notification to be displayed to the user.
#[derive(Debug, Clone)]
pub struct Notification {
    id: NotificationId,
    severity: Severity,
    /// The i18n key, resolved at render time.
    message_key: String,
    message_args: Vec<(String, String)>,
    created_at: Instant,
}

impl Notification {
    pub fn new(severity: Severity, message_key: impl Into<String>) -> Self {
        Self {
            id: NotificationId::new(),
            severity,
            message_key: message_key.into(),
            message_args: Vec::new(),
            created_at: Instant::now(),
        }
    }

    pub fn success(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Success, message_key)
    }

    pub fn info(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Info, message_key)
    }

    pub fn warning(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message_key)
    }

    pub fn error(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Error, message_key)
    }

    /// Adds an argument for message interpolation.
    #[must_use]
    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.message_args.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub fn message_key(&self) -> &str {
        &self.message_key
    }

    #[must_use]
    pub fn message_args(&self) -> &[(String, String)] {
        &self.message_args
    }

    #[must_use]
    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }

    #[must_use]
    pub fn should_auto_dismiss(&self) -> bool {
        self.severity
            .auto_dismiss_duration()
            .is_some_and(|d| self.age() >= d)
    }
}

impl From<&DestinationError> for Notification {
    /// A cancelled picker is a warning; anything else is an error.
    fn from(err: &DestinationError) -> Self {
        let severity = match err {
            DestinationError::Cancelled => Severity::Warning,
            _ => Severity::Error,
        };
        err.i18n_args()
            .into_iter()
            .fold(Self::new(severity, err.i18n_key()), |n, (k, v)| {
                n.with_arg(k, v)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_ids_are_unique() {
        let n1 = Notification::success("test");
        let n2 = Notification::success("test");
        assert_ne!(n1.id(), n2.id());
    }

    #[test]
    fn error_severity_has_no_auto_dismiss() {
        assert!(Severity::Error.auto_dismiss_duration().is_none());
        assert!(!Notification::error("e").should_auto_dismiss());
    }

    #[test]
    fn warning_duration_is_longer_than_success() {
        let success_duration = Severity::Success.auto_dismiss_duration().unwrap();
        let warning_duration = Severity::Warning.auto_dismiss_duration().unwrap();
        assert!(warning_duration > success_duration);
    }

    #[test]
    fn notification_builder_pattern_works() {
        let notification = Notification::info("notification-folder-loaded").with_arg("count", "12");

        assert_eq!(notification.severity(), Severity::Info);
        assert_eq!(notification.message_key(), "notification-folder-loaded");
        assert_eq!(
            notification.message_args(),
            &[("count".to_string(), "12".to_string())]
        );
    }

    #[test]
    fn destination_errors_map_to_toasts() {
        let cancelled = Notification::from(&DestinationError::Cancelled);
        assert_eq!(cancelled.severity(), Severity::Warning);
        assert_eq!(cancelled.message_key(), "error-destination-cancelled");

        let partial = Notification::from(&DestinationError::PartialWrite {
            written: 2,
            total: 8,
            first_error: "disk full".into(),
        });
        assert_eq!(partial.severity(), Severity::Error);
        assert_eq!(partial.message_key(), "error-destination-partial-write");
        assert_eq!(partial.message_args().len(), 3);
    }
}
