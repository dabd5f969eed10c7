// SPDX-License-Identifier: MPL-2.0
//! Destination roots on the local file system, chosen with a folder picker.

use super::{Destination, DestinationWriter, FolderHandle, RootHandle};
use crate::error::DestinationError;
use std::path::{Path, PathBuf};

/// Binds destinations to folders on disk.
///
/// A destination with a configured root is bound to it without asking.
/// Otherwise the user picks a folder, and closing the picker cancels.
#[derive(Debug, Clone, Default)]
pub struct DialogWriter {
    accept_root: Option<PathBuf>,
    reject_root: Option<PathBuf>,
    accept_title: String,
    reject_title: String,
}

impl DialogWriter {
    #[must_use]
    pub fn new(accept_root: Option<PathBuf>, reject_root: Option<PathBuf>) -> Self {
        Self {
            accept_root,
            reject_root,
            accept_title: "Choose the folder for accepted batches".to_string(),
            reject_title: "Choose the folder for rejected batches".to_string(),
        }
    }

    /// Sets the picker window titles.
    #[must_use]
    pub fn with_titles(mut self, accept: String, reject: String) -> Self {
        self.accept_title = accept;
        self.reject_title = reject;
        self
    }

    fn configured_root(&self, destination: Destination) -> Option<&Path> {
        match destination {
            Destination::Accept => self.accept_root.as_deref(),
            Destination::Reject => self.reject_root.as_deref(),
        }
    }

    fn title(&self, destination: Destination) -> &str {
        match destination {
            Destination::Accept => &self.accept_title,
            Destination::Reject => &self.reject_title,
        }
    }
}

impl DestinationWriter for DialogWriter {
    type Root = FsRoot;

    async fn acquire_root(&self, destination: Destination) -> Result<FsRoot, DestinationError> {
        if let Some(path) = self.configured_root(destination) {
            tokio::fs::create_dir_all(path)
                .await
                .map_err(|e| DestinationError::Unavailable(format!("{}: {e}", path.display())))?;
            log::info!("Using configured {destination} root {}", path.display());
            return Ok(FsRoot::new(path.to_path_buf()));
        }

        let picked = rfd::AsyncFileDialog::new()
            .set_title(self.title(destination))
            .pick_folder()
            .await
            .ok_or(DestinationError::Cancelled)?;

        let path = picked.path().to_path_buf();
        log::info!("Bound {destination} root to {}", path.display());
        Ok(FsRoot::new(path))
    }
}

/// A destination root directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsRoot {
    path: PathBuf,
}

impl FsRoot {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RootHandle for FsRoot {
    type Folder = FsFolder;

    async fn get_or_create_subfolder(&self, name: &str) -> Result<FsFolder, DestinationError> {
        let path = self.path.join(name);
        tokio::fs::create_dir_all(&path)
            .await
            .map_err(|e| DestinationError::Unavailable(format!("{}: {e}", path.display())))?;
        Ok(FsFolder { path })
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// A subfolder under an [`FsRoot`].
#[derive(Debug, Clone)]
pub struct FsFolder {
    path: PathBuf,
}

impl FolderHandle for FsFolder {
    async fn write(&self, file_name: &str, bytes: Vec<u8>) -> Result<(), DestinationError> {
        tokio::fs::write(self.path.join(file_name), bytes)
            .await
            .map_err(|e| DestinationError::WriteFailed {
                file_name: file_name.to_string(),
                message: e.to_string(),
            })
    }
}
