// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Notification settings storage (a single record, not keyed).

use super::json::{JsonDocument, StoreError};
use crate::models::EmailSettings;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Default, Serialize, Deserialize)]
struct SettingsDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<EmailSettings>,
}

/// Settings store backed by a single JSON document.
#[derive(Clone)]
pub struct SettingsStore {
    doc: JsonDocument,
}

impl SettingsStore {
    pub fn open(path: PathBuf) -> Result<Self, StoreError> {
        Ok(Self {
            doc: JsonDocument::open(path)?,
        })
    }

    /// Current settings; defaults (notifications disabled) when never saved.
    pub fn get_email_settings(&self) -> Result<EmailSettings, StoreError> {
        let _guard = self.doc.lock();
        let doc: SettingsDocument = self.doc.load()?;
        Ok(doc.email.unwrap_or_default())
    }

    /// Overwrite the settings record wholesale.
    pub fn save_email_settings(&self, settings: &EmailSettings) -> Result<(), StoreError> {
        let _guard = self.doc.lock();
        let mut doc: SettingsDocument = self.doc.load()?;
        doc.email = Some(settings.clone());
        self.doc.save(&doc)
    }
}
