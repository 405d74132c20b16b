// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Birthday record models.

use serde::{Deserialize, Deserializer, Serialize};

/// Contact category for a birthday record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ContactType {
    #[default]
    Friend,
    Business,
}

/// Birthday record stored in the birthdays document.
///
/// `day` may be unset when only the month is known; such records are never
/// picked up by the reminder scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Birthday {
    /// Stable identifier, assigned once at creation. Records written before
    /// identifiers existed deserialize with an empty string and are
    /// backfilled by the startup migration.
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub birth_year: Option<i32>,
    /// 1-12
    pub month: u32,
    /// 1-31 when present; no per-month or leap-year validation
    pub day: Option<u32>,
    pub note: Option<String>,
    #[serde(default)]
    pub contact_type: ContactType,
}

/// Request body for creating a birthday. The day is required here even
/// though stored records may lack one (legacy data).
#[derive(Debug, Deserialize)]
pub struct BirthdayCreate {
    pub name: String,
    pub birth_year: Option<i32>,
    pub month: u32,
    pub day: u32,
    pub note: Option<String>,
    #[serde(default)]
    pub contact_type: ContactType,
}

impl BirthdayCreate {
    /// Range checks that must pass before the record reaches storage.
    pub fn validate(&self) -> Result<(), String> {
        validate_month(self.month)?;
        validate_day(self.day)
    }

    pub fn into_record(self) -> Birthday {
        Birthday {
            id: String::new(),
            name: self.name,
            birth_year: self.birth_year,
            month: self.month,
            day: Some(self.day),
            note: self.note,
            contact_type: self.contact_type,
        }
    }
}

/// Partial update for a birthday record: only fields present in the request
/// overwrite the stored record. Nullable fields use a double `Option` so
/// "absent" (leave alone) and "null" (clear) stay distinguishable.
#[derive(Debug, Default, Deserialize)]
pub struct BirthdayUpdate {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "some_if_present")]
    pub birth_year: Option<Option<i32>>,
    pub month: Option<u32>,
    #[serde(default, deserialize_with = "some_if_present")]
    pub day: Option<Option<u32>>,
    #[serde(default, deserialize_with = "some_if_present")]
    pub note: Option<Option<String>>,
    pub contact_type: Option<ContactType>,
}

fn some_if_present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

impl BirthdayUpdate {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(month) = self.month {
            validate_month(month)?;
        }
        if let Some(Some(day)) = self.day {
            validate_day(day)?;
        }
        Ok(())
    }

    /// Overlay the present fields onto an existing record.
    pub fn apply(&self, record: &mut Birthday) {
        if let Some(name) = &self.name {
            record.name = name.clone();
        }
        if let Some(birth_year) = self.birth_year {
            record.birth_year = birth_year;
        }
        if let Some(month) = self.month {
            record.month = month;
        }
        if let Some(day) = self.day {
            record.day = day;
        }
        if let Some(note) = &self.note {
            record.note = note.clone();
        }
        if let Some(contact_type) = self.contact_type {
            record.contact_type = contact_type;
        }
    }
}

fn validate_month(month: u32) -> Result<(), String> {
    if (1..=12).contains(&month) {
        Ok(())
    } else {
        Err(format!("month must be between 1 and 12, got {month}"))
    }
}

fn validate_day(day: u32) -> Result<(), String> {
    if (1..=31).contains(&day) {
        Ok(())
    } else {
        Err(format!("day must be between 1 and 31, got {day}"))
    }
}
