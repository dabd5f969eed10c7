// SPDX-License-Identifier: MPL-2.0
//! The ordered sequence of images loaded for review.
//!
//! A sequence is built once per folder (or file) selection and replaced
//! wholesale by the next one. Images keep their load order and each file is
//! admitted at most once.

use crate::error::{Error, Result};
use crate::media;
use iced::widget::image::Handle;
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Identifier of an image within one loaded sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageId(u64);

impl ImageId {
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A loaded image: identity, display handle and the file its bytes come from.
#[derive(Debug, Clone)]
pub struct Image {
    id: ImageId,
    path: PathBuf,
    file_name: String,
    content_type: &'static str,
    handle: Handle,
}

impl Image {
    fn new(id: ImageId, path: PathBuf, content_type: &'static str) -> Self {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let handle = Handle::from_path(&path);
        Self {
            id,
            path,
            file_name,
            content_type,
            handle,
        }
    }

    #[must_use]
    pub fn id(&self) -> ImageId {
        self.id
    }

    /// Source file of the image.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Original file name, used as the name of written copies.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Content type detected when the image was loaded (e.g. `image/jpeg`).
    #[must_use]
    pub fn content_type(&self) -> &'static str {
        self.content_type
    }

    /// Handle used by the renderer to display the image.
    #[must_use]
    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    /// Reads the image's bytes from its source file.
    pub async fn fetch_bytes(&self) -> Result<Vec<u8>> {
        Ok(tokio::fs::read(&self.path).await?)
    }
}

impl PartialEq for Image {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.path == other.path
    }
}

/// Images in load order, without duplicates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageSequence {
    images: Vec<Image>,
}

impl ImageSequence {
    /// Creates an empty sequence.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a sequence from already-classified files.
    ///
    /// Ids follow load order. A path that appears more than once is kept at
    /// its first position only.
    pub fn from_classified<I>(files: I) -> Self
    where
        I: IntoIterator<Item = (PathBuf, &'static str)>,
    {
        let mut seen = HashSet::new();
        let images = files
            .into_iter()
            .filter(|(path, _)| seen.insert(path.clone()))
            .enumerate()
            .map(|(index, (path, content_type))| {
                Image::new(ImageId(index as u64), path, content_type)
            })
            .collect();
        Self { images }
    }

    /// Builds a sequence from arbitrary files, keeping only those whose
    /// content is a recognised image.
    pub fn from_files<I>(paths: I) -> Self
    where
        I: IntoIterator<Item = PathBuf>,
    {
        Self::from_classified(paths.into_iter().filter_map(classify))
    }

    /// Scans `directory` for images, in file-name order.
    ///
    /// With `recursive` set, subfolders are walked too (depth-first, each
    /// level sorted by name). Returns an error if `directory` cannot be read.
    pub fn scan_folder(directory: &Path, recursive: bool) -> Result<Self> {
        if !directory.is_dir() {
            return Err(Error::Io(format!(
                "Not a directory: {}",
                directory.display()
            )));
        }

        let max_depth = if recursive { usize::MAX } else { 1 };
        let mut paths = Vec::new();
        for entry in WalkDir::new(directory)
            .max_depth(max_depth)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| Error::Io(e.to_string()))?;
            if entry.file_type().is_file() {
                paths.push(entry.into_path());
            }
        }

        Ok(Self::from_files(paths))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Image> {
        self.images.get(index)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Image] {
        &self.images
    }

    pub fn iter(&self) -> impl Iterator<Item = &Image> {
        self.images.iter()
    }
}

/// Sniffs `path` and pairs it with its content type, skipping non-images.
fn classify(path: PathBuf) -> Option<(PathBuf, &'static str)> {
    match media::sniff_content_type(&path) {
        Ok(Some(content_type)) => Some((path, content_type)),
        Ok(None) => {
            log::debug!("Skipping non-image file {}", path.display());
            None
        }
        Err(err) => {
            log::warn!("Skipping unreadable file {}: {err}", path.display());
            None
        }
    }
}

/// Scans a folder on the blocking pool.
pub async fn load_folder(directory: PathBuf, recursive: bool) -> Result<ImageSequence> {
    tokio::task::spawn_blocking(move || ImageSequence::scan_folder(&directory, recursive))
        .await
        .map_err(|e| Error::Io(e.to_string()))?
}

/// Classifies a set of picked files on the blocking pool.
pub async fn load_files(paths: Vec<PathBuf>) -> Result<ImageSequence> {
    tokio::task::spawn_blocking(move || ImageSequence::from_files(paths))
        .await
        .map_err(|e| Error::Io(e.to_string()))
}
