// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared JSON document persistence.
//!
//! Each collection lives in one JSON file guarded by one mutex. A store
//! method takes the lock once and holds it across its whole
//! read-modify-write cycle, so every call is atomic with respect to other
//! calls on the same collection. There is no atomicity across collections.

use serde::{de::DeserializeOwned, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

/// Storage errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed document: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("{0} already exists")]
    Conflict(String),
}

/// One JSON document on disk plus the mutex serializing access to it.
///
/// `lock()` must be held for the duration of a read-modify-write cycle;
/// `load`/`save` do the raw I/O and assume the caller holds the guard.
#[derive(Clone)]
pub struct JsonDocument {
    path: Arc<PathBuf>,
    lock: Arc<Mutex<()>>,
}

impl JsonDocument {
    /// Open a document, creating the parent directory and an empty document
    /// if the file does not exist yet.
    pub fn open(path: PathBuf) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let doc = Self {
            path: Arc::new(path),
            lock: Arc::new(Mutex::new(())),
        };
        if !doc.path.exists() {
            doc.save(&serde_json::json!({}))?;
        }
        Ok(doc)
    }

    pub fn lock(&self) -> MutexGuard<'_, ()> {
        // A poisoned lock only means another thread panicked mid-write;
        // the document on disk is still the last complete write.
        self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn load<T: DeserializeOwned>(&self) -> Result<T, StoreError> {
        let bytes = fs::read(self.path.as_ref())?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub fn save<T: Serialize>(&self, value: &T) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(value)?;
        fs::write(self.path.as_ref(), json)?;
        Ok(())
    }
}
