// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User storage keyed by username.

use super::json::{JsonDocument, StoreError};
use crate::models::User;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Default, Serialize, Deserialize)]
struct UsersDocument {
    #[serde(default)]
    users: Vec<User>,
}

/// User store backed by a single JSON document.
#[derive(Clone)]
pub struct UserStore {
    doc: JsonDocument,
}

impl UserStore {
    pub fn open(path: PathBuf) -> Result<Self, StoreError> {
        Ok(Self {
            doc: JsonDocument::open(path)?,
        })
    }

    pub fn get_all(&self) -> Result<Vec<User>, StoreError> {
        let _guard = self.doc.lock();
        let doc: UsersDocument = self.doc.load()?;
        Ok(doc.users)
    }

    pub fn get_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .get_all()?
            .into_iter()
            .find(|u| u.username == username))
    }

    pub fn exists(&self, username: &str) -> Result<bool, StoreError> {
        Ok(self.get_by_username(username)?.is_some())
    }

    /// Create a user; fails with `Conflict` when the username is taken.
    pub fn create(&self, user: User) -> Result<User, StoreError> {
        let _guard = self.doc.lock();
        let mut doc: UsersDocument = self.doc.load()?;
        if doc.users.iter().any(|u| u.username == user.username) {
            return Err(StoreError::Conflict(format!("user {}", user.username)));
        }
        doc.users.push(user.clone());
        self.doc.save(&doc)?;
        Ok(user)
    }

    /// Replace a user record; returns `None` when the username is unknown.
    pub fn update(&self, username: &str, user: User) -> Result<Option<User>, StoreError> {
        let _guard = self.doc.lock();
        let mut doc: UsersDocument = self.doc.load()?;
        let Some(slot) = doc.users.iter_mut().find(|u| u.username == username) else {
            return Ok(None);
        };
        *slot = user.clone();
        self.doc.save(&doc)?;
        Ok(Some(user))
    }

    pub fn delete(&self, username: &str) -> Result<bool, StoreError> {
        let _guard = self.doc.lock();
        let mut doc: UsersDocument = self.doc.load()?;
        let before = doc.users.len();
        doc.users.retain(|u| u.username != username);
        if doc.users.len() == before {
            return Ok(false);
        }
        self.doc.save(&doc)?;
        Ok(true)
    }
}
