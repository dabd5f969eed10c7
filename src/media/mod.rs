// SPDX-License-Identifier: MPL-2.0
//! Image file detection and metadata.
//!
//! Files are admitted into a review session by their content, not their name:
//! the first bytes of each candidate are sniffed and only recognised image
//! formats are kept.

pub mod metadata;

use crate::error::Result;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Number of leading bytes read when sniffing a file's format.
const SNIFF_LEN: u64 = 64;

/// Image file extensions offered as a filter in the open-files dialog.
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "tiff", "tif", "webp", "bmp", "ico",
];

/// Returns the MIME content type for a buffer holding the start of a file,
/// or `None` when the bytes are not a recognised image.
#[must_use]
pub fn content_type(header: &[u8]) -> Option<&'static str> {
    let format = image_rs::guess_format(header).ok()?;
    let mime = format.to_mime_type();
    mime.starts_with("image/").then_some(mime)
}

/// Reads the start of the file at `path` and returns its image content type.
///
/// Returns `Ok(None)` for readable files that are not images and an error
/// when the file cannot be opened.
pub fn sniff_content_type<P: AsRef<Path>>(path: P) -> Result<Option<&'static str>> {
    let file = File::open(path.as_ref())?;
    let mut header = Vec::with_capacity(SNIFF_LEN as usize);
    file.take(SNIFF_LEN).read_to_end(&mut header)?;
    Ok(content_type(&header))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const PNG_HEADER: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";
    const JPEG_HEADER: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F'];

    #[test]
    fn png_signature_is_an_image() {
        assert_eq!(content_type(PNG_HEADER), Some("image/png"));
    }

    #[test]
    fn jpeg_signature_is_an_image() {
        assert_eq!(content_type(JPEG_HEADER), Some("image/jpeg"));
    }

    #[test]
    fn plain_text_is_not_an_image() {
        assert_eq!(content_type(b"hello, this is not a picture"), None);
        assert_eq!(content_type(&[]), None);
    }

    #[test]
    fn sniffing_ignores_misleading_extension() {
        let dir = tempdir().expect("failed to create temp dir");
        let fake = dir.path().join("notes.jpg");
        fs::write(&fake, b"just some text").expect("failed to write file");
        let real = dir.path().join("picture.dat");
        fs::write(&real, PNG_HEADER).expect("failed to write file");

        assert_eq!(sniff_content_type(&fake).expect("sniff failed"), None);
        assert_eq!(
            sniff_content_type(&real).expect("sniff failed"),
            Some("image/png")
        );
    }

    #[test]
    fn sniffing_missing_file_errors() {
        let dir = tempdir().expect("failed to create temp dir");
        assert!(sniff_content_type(dir.path().join("missing.png")).is_err());
    }
}
