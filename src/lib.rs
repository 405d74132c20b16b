// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Birthday Tracker: store birthdays, get daily email reminders
//!
//! This crate provides the backend API for a small personal birthday
//! tracker: JSON-file storage, token-authenticated REST endpoints, and a
//! daily reminder job that emails upcoming birthdays, optionally
//! embellished with AI-generated messages and gift ideas.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;

use config::Config;
use services::{AiClient, Mailer, ReminderScheduler};
use store::{BirthdayStore, SettingsStore, UserStore};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub users: UserStore,
    pub birthdays: BirthdayStore,
    pub settings: SettingsStore,
    pub mailer: Mailer,
    pub ai: AiClient,
    pub scheduler: ReminderScheduler,
}
