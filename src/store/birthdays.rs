// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Birthday storage keyed by generated id.

use super::json::{JsonDocument, StoreError};
use crate::models::Birthday;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Debug, Default, Serialize, Deserialize)]
struct BirthdaysDocument {
    #[serde(default)]
    birthdays: Vec<Birthday>,
}

/// Birthday store backed by a single JSON document.
#[derive(Clone)]
pub struct BirthdayStore {
    doc: JsonDocument,
}

impl BirthdayStore {
    pub fn open(path: PathBuf) -> Result<Self, StoreError> {
        Ok(Self {
            doc: JsonDocument::open(path)?,
        })
    }

    /// All records in insertion order. Legacy records without an id get one
    /// assigned in the returned list; `migrate_add_ids` persists them.
    pub fn get_all(&self) -> Result<Vec<Birthday>, StoreError> {
        let _guard = self.doc.lock();
        let doc: BirthdaysDocument = self.doc.load()?;
        Ok(doc
            .birthdays
            .into_iter()
            .map(|mut b| {
                if b.id.is_empty() {
                    b.id = Uuid::new_v4().to_string();
                }
                b
            })
            .collect())
    }

    pub fn get_by_id(&self, id: &str) -> Result<Option<Birthday>, StoreError> {
        Ok(self.get_all()?.into_iter().find(|b| b.id == id))
    }

    /// Create a record, assigning an id when none was provided. A caller-
    /// supplied id that already exists is a conflict.
    pub fn create(&self, mut birthday: Birthday) -> Result<Birthday, StoreError> {
        let _guard = self.doc.lock();
        let mut doc: BirthdaysDocument = self.doc.load()?;
        if birthday.id.is_empty() {
            birthday.id = Uuid::new_v4().to_string();
        } else if doc.birthdays.iter().any(|b| b.id == birthday.id) {
            return Err(StoreError::Conflict(format!("birthday {}", birthday.id)));
        }
        doc.birthdays.push(birthday.clone());
        self.doc.save(&doc)?;
        Ok(birthday)
    }

    /// Replace a record in place, preserving its id. Returns `None` when the
    /// id is unknown.
    pub fn update(&self, id: &str, mut birthday: Birthday) -> Result<Option<Birthday>, StoreError> {
        let _guard = self.doc.lock();
        let mut doc: BirthdaysDocument = self.doc.load()?;
        let Some(slot) = doc.birthdays.iter_mut().find(|b| b.id == id) else {
            return Ok(None);
        };
        birthday.id = id.to_string();
        *slot = birthday.clone();
        self.doc.save(&doc)?;
        Ok(Some(birthday))
    }

    pub fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let _guard = self.doc.lock();
        let mut doc: BirthdaysDocument = self.doc.load()?;
        let before = doc.birthdays.len();
        doc.birthdays.retain(|b| b.id != id);
        if doc.birthdays.len() == before {
            return Ok(false);
        }
        self.doc.save(&doc)?;
        Ok(true)
    }

    /// One-time startup migration: persist ids for records that predate
    /// them. Returns how many records were backfilled; the document is only
    /// rewritten when that count is non-zero, so re-running is a no-op.
    pub fn migrate_add_ids(&self) -> Result<usize, StoreError> {
        let _guard = self.doc.lock();
        let mut doc: BirthdaysDocument = self.doc.load()?;
        let mut backfilled = 0;
        for birthday in &mut doc.birthdays {
            if birthday.id.is_empty() {
                birthday.id = Uuid::new_v4().to_string();
                backfilled += 1;
            }
        }
        if backfilled > 0 {
            self.doc.save(&doc)?;
        }
        Ok(backfilled)
    }
}
