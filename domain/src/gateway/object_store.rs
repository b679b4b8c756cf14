//! Storage gateway for uploaded document files.
//!
//! The rest of the domain layer only sees the [`ObjectStore`] trait, so the
//! backing store can be swapped (local filesystem in development, an in-memory
//! store in tests) without touching the upload or document logic.
use crate::error::{DomainErrorKind, Error, ExternalErrorKind, InternalErrorKind};
use async_trait::async_trait;
#[cfg(any(test, feature = "mock"))]
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
#[cfg(any(test, feature = "mock"))]
use std::sync::Mutex;
use tokio::fs;

use log::*;

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Writes the file bytes at `path`, creating any missing intermediate
    /// directories/prefixes.
    async fn put(&self, path: &str, bytes: &[u8]) -> Result<(), Error>;

    /// Removes the file at `path`.
    async fn delete(&self, path: &str) -> Result<(), Error>;
}

/// Local filesystem store rooted at a configured directory.
pub struct FsObjectStore {
    root: PathBuf,
}

impl FsObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, Error> {
        let root = root.into();

        std::fs::create_dir_all(&root).map_err(|err| {
            error!("Failed to create object store root {root:?}: {err:?}");
            Error {
                source: Some(Box::new(err)),
                error_kind: DomainErrorKind::Internal(InternalErrorKind::Config),
            }
        })?;

        Ok(Self { root })
    }
}

#[async_trait]
impl ObjectStore for FsObjectStore {
    async fn put(&self, path: &str, bytes: &[u8]) -> Result<(), Error> {
        let full_path = self.root.join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&full_path, bytes).await?;

        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<(), Error> {
        fs::remove_file(self.root.join(path)).await?;
        Ok(())
    }
}

/// In-memory store used by tests. `fail_on` holds file name suffixes whose
/// writes are rejected, to simulate storage outages for individual files.
#[cfg(any(test, feature = "mock"))]
#[derive(Default)]
pub struct InMemoryObjectStore {
    objects: Mutex<HashMap<String, Vec<u8>>>,
    fail_on: HashSet<String>,
}

#[cfg(any(test, feature = "mock"))]
impl InMemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(file_names: impl IntoIterator<Item = String>) -> Self {
        Self {
            objects: Mutex::new(HashMap::new()),
            fail_on: file_names.into_iter().collect(),
        }
    }

    pub fn contains(&self, path: &str) -> bool {
        self.objects.lock().unwrap().contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(any(test, feature = "mock"))]
#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn put(&self, path: &str, bytes: &[u8]) -> Result<(), Error> {
        if self.fail_on.iter().any(|name| path.ends_with(name)) {
            return Err(Error {
                source: None,
                error_kind: DomainErrorKind::External(ExternalErrorKind::ObjectStore),
            });
        }

        self.objects
            .lock()
            .unwrap()
            .insert(path.to_string(), bytes.to_vec());

        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<(), Error> {
        self.objects.lock().unwrap().remove(path);
        Ok(())
    }
}
