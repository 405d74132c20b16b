// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod birthday;
pub mod settings;
pub mod user;

pub use birthday::{Birthday, BirthdayCreate, BirthdayUpdate, ContactType};
pub use settings::EmailSettings;
pub use user::{User, UserCreate, UserResponse};
