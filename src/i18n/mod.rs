// SPDX-License-Identifier: MPL-2.0
//! Localization with Fluent.
//!
//! Translation files live in `assets/i18n/` and are embedded at build time.
//! The locale is chosen from the CLI, then the config file, then the system,
//! falling back to English.

pub mod fluent;
