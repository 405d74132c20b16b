// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Email notification settings.

use serde::{Deserialize, Serialize};

fn default_smtp_port() -> u16 {
    587
}

fn default_reminder_time() -> String {
    "09:00".to_string()
}

/// Notification settings, stored as a single record and overwritten
/// wholesale on update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailSettings {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub smtp_server: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    #[serde(default)]
    pub smtp_username: String,
    #[serde(default)]
    pub smtp_password: String,
    #[serde(default)]
    pub from_email: String,
    #[serde(default)]
    pub recipients: Vec<String>,
    /// Daily reminder time in HH:MM (local time)
    #[serde(default = "default_reminder_time")]
    pub reminder_time: String,
    /// When set, the reminder job logs the composed email instead of sending
    #[serde(default)]
    pub test_mode: bool,
    /// Enable AI-generated gift ideas and messages
    #[serde(default)]
    pub ai_enabled: bool,
    #[serde(default)]
    pub openai_api_key: String,
}

impl Default for EmailSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            smtp_server: String::new(),
            smtp_port: default_smtp_port(),
            smtp_username: String::new(),
            smtp_password: String::new(),
            from_email: String::new(),
            recipients: Vec::new(),
            reminder_time: default_reminder_time(),
            test_mode: false,
            ai_enabled: false,
            openai_api_key: String::new(),
        }
    }
}
