//! User model for storage and API.

use serde::{Deserialize, Serialize};

/// User account stored in the users document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique username (also the storage key)
    pub username: String,
    /// Argon2id hash in PHC string format
    pub hashed_password: String,
    /// Disabled accounts cannot log in or use existing tokens
    #[serde(default)]
    pub disabled: bool,
    /// Admins manage users and notification settings
    #[serde(default)]
    pub is_admin: bool,
}

/// Request body for creating a user (admin only).
#[derive(Debug, Deserialize)]
pub struct UserCreate {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub is_admin: bool,
}

/// User as returned by the API (never includes the password hash).
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub username: String,
    pub disabled: bool,
    pub is_admin: bool,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            disabled: user.disabled,
            is_admin: user.is_admin,
        }
    }
}
