// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JSON file storage, one document per collection.

pub mod birthdays;
pub mod json;
pub mod settings;
pub mod users;

pub use birthdays::BirthdayStore;
pub use json::{JsonDocument, StoreError};
pub use settings::SettingsStore;
pub use users::UserStore;
