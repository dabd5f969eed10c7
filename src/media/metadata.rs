// SPDX-License-Identifier: MPL-2.0
//! Aperture extraction from EXIF data.
//!
//! The review screen shows the f-number of the selected image for reference.
//! Anything that goes wrong here degrades to [`NOT_APPLICABLE`]; it is never
//! reported to the user as an error.

use std::fmt;
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Display value used when no aperture can be determined.
pub const NOT_APPLICABLE: &str = "N/A";

/// Errors that can occur while reading the aperture.
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataError {
    /// The file could not be read.
    IoError(String),

    /// The EXIF block is missing or unreadable.
    ReadFailed(String),

    /// The EXIF block has no usable `FNumber` field.
    FieldNotFound(&'static str),
}

impl fmt::Display for MetadataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataError::IoError(msg) => write!(f, "I/O error: {msg}"),
            MetadataError::ReadFailed(msg) => write!(f, "Failed to read metadata: {msg}"),
            MetadataError::FieldNotFound(field) => write!(f, "Metadata field not found: {field}"),
        }
    }
}

impl std::error::Error for MetadataError {}

/// What the aperture label currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ApertureDisplay {
    /// No image selected.
    #[default]
    Empty,
    /// A request for the selected image is in flight.
    Pending,
    /// Final display text (`f/2.8` or `N/A`).
    Ready(String),
}

impl ApertureDisplay {
    /// Returns the final text, if the request has resolved.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            ApertureDisplay::Ready(text) => Some(text),
            ApertureDisplay::Empty | ApertureDisplay::Pending => None,
        }
    }
}

/// Parses the f-number out of an image's bytes.
///
/// A zero f-number is treated as missing.
pub fn parse_aperture(bytes: &[u8]) -> Result<f64, MetadataError> {
    let mut reader = Cursor::new(bytes);
    let exif = exif::Reader::new()
        .read_from_container(&mut reader)
        .map_err(|e| MetadataError::ReadFailed(e.to_string()))?;

    let field = exif
        .get_field(exif::Tag::FNumber, exif::In::PRIMARY)
        .ok_or(MetadataError::FieldNotFound("FNumber"))?;

    let value = match field.value {
        exif::Value::Rational(ref v) => v.first().map(exif::Rational::to_f64),
        _ => field.value.get_uint(0).map(f64::from),
    };

    match value {
        Some(aperture) if aperture.is_finite() && aperture > 0.0 => Ok(aperture),
        _ => Err(MetadataError::FieldNotFound("FNumber")),
    }
}

/// Reads the file at `path` and parses its f-number.
pub fn read_aperture<P: AsRef<Path>>(path: P) -> Result<f64, MetadataError> {
    let bytes = std::fs::read(path.as_ref()).map_err(|e| MetadataError::IoError(e.to_string()))?;
    parse_aperture(&bytes)
}

/// Formats an aperture for display: `f/<one decimal>` or `N/A`.
#[must_use]
pub fn format_aperture(aperture: Result<f64, MetadataError>) -> String {
    match aperture {
        Ok(value) => format!("f/{value:.1}"),
        Err(_) => NOT_APPLICABLE.to_string(),
    }
}

/// Fetches the display-ready aperture of the image at `path`.
///
/// Runs the file read and EXIF parse on the blocking pool. Failures are
/// logged and returned as `N/A`.
pub async fn fetch_aperture(path: PathBuf) -> String {
    let display_path = path.display().to_string();
    let result = tokio::task::spawn_blocking(move || read_aperture(&path))
        .await
        .unwrap_or_else(|e| Err(MetadataError::ReadFailed(e.to_string())));

    if let Err(err) = &result {
        log::debug!("No aperture for {display_path}: {err}");
    }
    format_aperture(result)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::test_utils::{assert_abs_diff_eq, F64_EPSILON};

    /// Builds a minimal JPEG whose EXIF block carries `FNumber = num/den`.
    pub(crate) fn jpeg_with_f_number(num: u32, den: u32) -> Vec<u8> {
        let mut tiff = Vec::new();
        // Little-endian TIFF header, IFD0 at offset 8
        tiff.extend_from_slice(b"II*\0");
        tiff.extend_from_slice(&8u32.to_le_bytes());
        // IFD0: one entry pointing at the Exif IFD (offset 26)
        tiff.extend_from_slice(&1u16.to_le_bytes());
        tiff.extend_from_slice(&0x8769u16.to_le_bytes());
        tiff.extend_from_slice(&4u16.to_le_bytes());
        tiff.extend_from_slice(&1u32.to_le_bytes());
        tiff.extend_from_slice(&26u32.to_le_bytes());
        tiff.extend_from_slice(&0u32.to_le_bytes());
        // Exif IFD: FNumber rational stored at offset 44
        tiff.extend_from_slice(&1u16.to_le_bytes());
        tiff.extend_from_slice(&0x829Du16.to_le_bytes());
        tiff.extend_from_slice(&5u16.to_le_bytes());
        tiff.extend_from_slice(&1u32.to_le_bytes());
        tiff.extend_from_slice(&44u32.to_le_bytes());
        tiff.extend_from_slice(&0u32.to_le_bytes());
        tiff.extend_from_slice(&num.to_le_bytes());
        tiff.extend_from_slice(&den.to_le_bytes());

        let segment_len = (2 + 6 + tiff.len()) as u16;
        let mut jpeg = vec![0xFF, 0xD8, 0xFF, 0xE1];
        jpeg.extend_from_slice(&segment_len.to_be_bytes());
        jpeg.extend_from_slice(b"Exif\0\0");
        jpeg.extend_from_slice(&tiff);
        jpeg.extend_from_slice(&[0xFF, 0xD9]);
        jpeg
    }

    #[test]
    fn parses_f_number_from_exif() {
        let bytes = jpeg_with_f_number(28, 10);
        let aperture = parse_aperture(&bytes).expect("aperture should parse");
        assert_abs_diff_eq!(aperture, 2.8, epsilon = F64_EPSILON);
    }

    #[test]
    fn formats_to_one_decimal() {
        assert_eq!(format_aperture(Ok(2.8)), "f/2.8");
        assert_eq!(format_aperture(Ok(4.0)), "f/4.0");
        assert_eq!(format_aperture(Ok(11.0)), "f/11.0");
    }

    #[test]
    fn missing_exif_is_not_applicable() {
        let result = parse_aperture(b"\x89PNG\r\n\x1a\nnot much else");
        assert!(result.is_err());
        assert_eq!(format_aperture(result), NOT_APPLICABLE);
    }

    #[test]
    fn zero_f_number_counts_as_missing() {
        let bytes = jpeg_with_f_number(0, 1);
        assert_eq!(
            parse_aperture(&bytes),
            Err(MetadataError::FieldNotFound("FNumber"))
        );
    }

    #[test]
    fn unreadable_file_is_io_error() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let result = read_aperture(dir.path().join("gone.jpg"));
        assert!(matches!(result, Err(MetadataError::IoError(_))));
    }

    #[tokio::test]
    async fn fetch_aperture_reads_file() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("shot.jpg");
        std::fs::write(&path, jpeg_with_f_number(56, 10)).expect("failed to write file");

        assert_eq!(fetch_aperture(path).await, "f/5.6");
    }

    #[tokio::test]
    async fn fetch_aperture_degrades_to_not_applicable() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("plain.jpg");
        std::fs::write(&path, b"no exif here").expect("failed to write file");

        assert_eq!(fetch_aperture(path).await, NOT_APPLICABLE);
    }

    #[test]
    fn aperture_display_text() {
        assert_eq!(ApertureDisplay::Pending.text(), None);
        assert_eq!(ApertureDisplay::Ready("f/2.0".into()).text(), Some("f/2.0"));
    }
}
