// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod ai;
pub mod credentials;
pub mod mailer;
pub mod reminder;

pub use ai::{AiClient, AiSuggestions};
pub use credentials::{authenticate_user, ensure_default_admin, hash_password, verify_password};
pub use mailer::Mailer;
pub use reminder::{ReminderContext, ReminderScheduler};
