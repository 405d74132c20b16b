// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Password hashing and account bootstrap.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::config::Config;
use crate::models::User;
use crate::store::{StoreError, UserStore};

/// Hash a password with Argon2id and a fresh random salt.
///
/// Two hashes of the same input differ (random salt); `verify_password` is
/// the only way back.
pub fn hash_password(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Password hashing error: {e}"))?;
    Ok(hash.to_string())
}

/// Verify a password against a stored PHC hash string.
pub fn verify_password(password: &str, hashed: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hashed) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Look up a user and check their password. `None` covers both unknown
/// usernames and wrong passwords.
pub fn authenticate_user(
    users: &UserStore,
    username: &str,
    password: &str,
) -> Result<Option<User>, StoreError> {
    let Some(user) = users.get_by_username(username)? else {
        return Ok(None);
    };
    if verify_password(password, &user.hashed_password) {
        Ok(Some(user))
    } else {
        Ok(None)
    }
}

/// Create the configured admin account if it does not exist yet.
/// Safe to call on every startup.
pub fn ensure_default_admin(users: &UserStore, config: &Config) -> anyhow::Result<()> {
    if users.exists(&config.admin_username)? {
        return Ok(());
    }

    users.create(User {
        username: config.admin_username.clone(),
        hashed_password: hash_password(&config.admin_password)?,
        disabled: false,
        is_admin: true,
    })?;

    tracing::info!(
        username = %config.admin_username,
        "Created default admin user - change the password in production"
    );
    Ok(())
}
