// SPDX-License-Identifier: MPL-2.0
//! In-memory destinations for tests and dry runs.

use super::{Destination, DestinationWriter, FolderHandle, RootHandle};
use crate::error::DestinationError;
use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

type FileKey = (Destination, String, String);

#[derive(Debug, Default)]
struct Store {
    files: BTreeMap<FileKey, Vec<u8>>,
    folders: HashSet<(Destination, String)>,
    acquisitions: usize,
    cancel_next: bool,
    failing: HashSet<String>,
}

/// A [`DestinationWriter`] that keeps written files in memory.
///
/// Clones share the same store, so a test can keep one handle for
/// inspection while the job owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryWriter {
    store: Arc<Mutex<Store>>,
}

impl MemoryWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next root acquisition behave like a cancelled picker.
    pub fn cancel_next_acquire(&self) {
        self.lock().cancel_next = true;
    }

    /// Makes every write of `file_name` fail.
    pub fn fail_writes_of(&self, file_name: &str) {
        self.lock().failing.insert(file_name.to_string());
    }

    /// Number of roots handed out so far.
    #[must_use]
    pub fn acquisitions(&self) -> usize {
        self.lock().acquisitions
    }

    /// Names of the files in `folder`, sorted.
    #[must_use]
    pub fn files(&self, destination: Destination, folder: &str) -> Vec<String> {
        self.lock()
            .files
            .keys()
            .filter(|(dest, dir, _)| *dest == destination && dir == folder)
            .map(|(_, _, name)| name.clone())
            .collect()
    }

    /// Whether `folder` has been created under `destination`.
    #[must_use]
    pub fn has_folder(&self, destination: Destination, folder: &str) -> bool {
        self.lock()
            .folders
            .contains(&(destination, folder.to_string()))
    }

    /// Contents of a written file.
    #[must_use]
    pub fn read(&self, destination: Destination, folder: &str, file_name: &str) -> Option<Vec<u8>> {
        self.lock()
            .files
            .get(&(destination, folder.to_string(), file_name.to_string()))
            .cloned()
    }

    fn lock(&self) -> MutexGuard<'_, Store> {
        lock(&self.store)
    }
}

// A panic while holding the lock cannot leave the store half-updated.
fn lock(store: &Mutex<Store>) -> MutexGuard<'_, Store> {
    store.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

impl DestinationWriter for MemoryWriter {
    type Root = MemoryRoot;

    async fn acquire_root(&self, destination: Destination) -> Result<MemoryRoot, DestinationError> {
        let mut store = self.lock();
        if store.cancel_next {
            store.cancel_next = false;
            return Err(DestinationError::Cancelled);
        }
        store.acquisitions += 1;
        Ok(MemoryRoot {
            destination,
            store: Arc::clone(&self.store),
        })
    }
}

#[derive(Debug, Clone)]
pub struct MemoryRoot {
    destination: Destination,
    store: Arc<Mutex<Store>>,
}

impl RootHandle for MemoryRoot {
    type Folder = MemoryFolder;

    async fn get_or_create_subfolder(&self, name: &str) -> Result<MemoryFolder, DestinationError> {
        lock(&self.store)
            .folders
            .insert((self.destination, name.to_string()));
        Ok(MemoryFolder {
            destination: self.destination,
            name: name.to_string(),
            store: Arc::clone(&self.store),
        })
    }

    fn location(&self) -> String {
        format!("memory:{}", self.destination)
    }
}

#[derive(Debug)]
pub struct MemoryFolder {
    destination: Destination,
    name: String,
    store: Arc<Mutex<Store>>,
}

impl FolderHandle for MemoryFolder {
    async fn write(&self, file_name: &str, bytes: Vec<u8>) -> Result<(), DestinationError> {
        let mut store = lock(&self.store);
        if store.failing.contains(file_name) {
            return Err(DestinationError::WriteFailed {
                file_name: file_name.to_string(),
                message: "injected failure".to_string(),
            });
        }
        store
            .files
            .insert((self.destination, self.name.clone(), file_name.to_string()), bytes);
        Ok(())
    }
}
