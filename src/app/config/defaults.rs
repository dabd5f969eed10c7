// SPDX-License-Identifier: MPL-2.0
//! Default values for configuration and notification timing.

use std::time::Duration;

// ==========================================================================
// Review Defaults
// ==========================================================================

/// Whether "Open folder" walks subfolders by default.
pub const DEFAULT_RECURSIVE_SCAN: bool = true;

// ==========================================================================
// Relay Defaults
// ==========================================================================

/// Address the upload relay binds to.
pub const DEFAULT_RELAY_ADDRESS: &str = "127.0.0.1";

/// Port the upload relay listens on.
pub const DEFAULT_RELAY_PORT: u16 = 3001;

/// Directory uploads are staged in before being moved to their destination.
pub const DEFAULT_RELAY_STAGING_DIR: &str = "uploads";

// ==========================================================================
// Notification Defaults
// ==========================================================================

/// Auto-dismiss delay for success and info toasts.
pub const TOAST_DURATION: Duration = Duration::from_secs(3);

/// Auto-dismiss delay for warning toasts.
pub const WARNING_TOAST_DURATION: Duration = Duration::from_secs(5);

/// Maximum number of toasts shown at once.
pub const MAX_VISIBLE_TOASTS: usize = 3;

/// Interval of the tick that expires toasts.
pub const TOAST_TICK: Duration = Duration::from_millis(100);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warnings_stay_longer_than_info() {
        assert!(WARNING_TOAST_DURATION > TOAST_DURATION);
    }

    #[test]
    fn tick_is_finer_than_shortest_toast() {
        assert!(TOAST_TICK < TOAST_DURATION);
    }
}
