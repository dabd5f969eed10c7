// SPDX-License-Identifier: MPL-2.0
//! Where reviewed batches are written.
//!
//! Writing goes through three small capabilities: a [`DestinationWriter`]
//! hands out a root folder for a destination (possibly by asking the user),
//! a [`RootHandle`] opens named subfolders, and a [`FolderHandle`] stores
//! files by name. [`dialog::DialogWriter`] is the desktop implementation and
//! [`memory::MemoryWriter`] keeps everything in memory.

pub mod dialog;
pub mod memory;

use crate::error::DestinationError;
use std::fmt;
use std::future::Future;

/// The two independent destination bindings of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Destination {
    Accept,
    Reject,
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Accept => write!(f, "accept"),
            Destination::Reject => write!(f, "reject"),
        }
    }
}

/// The roots bound so far in a session, one slot per [`Destination`].
#[derive(Debug, Clone)]
pub struct Bindings<R> {
    accept: Option<R>,
    reject: Option<R>,
}

impl<R> Default for Bindings<R> {
    fn default() -> Self {
        Self {
            accept: None,
            reject: None,
        }
    }
}

impl<R: Clone> Bindings<R> {
    #[must_use]
    pub fn get(&self, destination: Destination) -> Option<R> {
        match destination {
            Destination::Accept => self.accept.clone(),
            Destination::Reject => self.reject.clone(),
        }
    }

    /// Binds `destination` to `root` unless it is bound already.
    pub fn bind(&mut self, destination: Destination, root: R) {
        let slot = match destination {
            Destination::Accept => &mut self.accept,
            Destination::Reject => &mut self.reject,
        };
        if slot.is_none() {
            *slot = Some(root);
        }
    }

    #[must_use]
    pub fn is_bound(&self, destination: Destination) -> bool {
        self.get(destination).is_some()
    }
}

/// Source of destination roots.
pub trait DestinationWriter: Send + Sync + 'static {
    type Root: RootHandle;

    /// Obtains a writable root for `destination`.
    ///
    /// May prompt the user. Returns [`DestinationError::Cancelled`] if the
    /// user declines.
    fn acquire_root(
        &self,
        destination: Destination,
    ) -> impl Future<Output = Result<Self::Root, DestinationError>> + Send;
}

/// A bound destination root.
pub trait RootHandle: Clone + fmt::Debug + Send + Sync + 'static {
    type Folder: FolderHandle;

    /// Opens the subfolder `name`, creating it if needed.
    fn get_or_create_subfolder(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Self::Folder, DestinationError>> + Send;

    /// Location shown to the user.
    fn location(&self) -> String;
}

/// A folder files can be written into.
pub trait FolderHandle: Send + Sync {
    /// Stores `bytes` as `file_name`, replacing any existing file.
    fn write(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> impl Future<Output = Result<(), DestinationError>> + Send;
}
