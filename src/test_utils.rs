// SPDX-License-Identifier: MPL-2.0
//! Test utilities for float comparisons and scratch image folders.
//!
//! This module re-exports the `approx` crate's assertion macros for float comparison,
//! which properly handle floating-point precision issues that `assert_eq!` cannot.

// Re-export approx macros for convenient use in tests
pub use approx::{assert_abs_diff_eq, assert_relative_eq};

use std::fs;
use std::path::{Path, PathBuf};

/// Default epsilon for f64 comparisons.
pub const F64_EPSILON: f64 = 1e-10;

/// Smallest byte sequence recognised as a PNG by content sniffing.
pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

/// Writes `count` fake PNG files named `img_00.png`, `img_01.png`, ... into `dir`.
///
/// Each file carries its own index after the signature so written copies can
/// be told apart.
pub fn create_png_files(dir: &Path, count: usize) -> Vec<PathBuf> {
    (0..count)
        .map(|i| {
            let path = dir.join(format!("img_{i:02}.png"));
            let mut bytes = PNG_BYTES.to_vec();
            bytes.extend_from_slice(format!("#{i}").as_bytes());
            fs::write(&path, bytes).expect("failed to write test image");
            path
        })
        .collect()
}
