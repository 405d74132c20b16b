//! Application configuration loaded from environment variables.
//!
//! Every variable has a development default so the server starts with no
//! environment at all. The secret key and admin credentials defaults are
//! insecure and must be changed in production.

use std::env;
use std::path::PathBuf;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the JSON data files
    pub data_dir: PathBuf,
    /// JWT signing key for session tokens (raw bytes)
    pub jwt_signing_key: Vec<u8>,
    /// Username of the bootstrap admin account
    pub admin_username: String,
    /// Password of the bootstrap admin account (change in production!)
    pub admin_password: String,
    /// Server port
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok(); // Load .env file if present

        Self {
            data_dir: env::var("BIRTHDAYS_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data")),
            jwt_signing_key: env::var("BIRTHDAYS_SECRET_KEY")
                .unwrap_or_else(|_| {
                    "change-this-in-production-use-a-real-secret-key".to_string()
                })
                .into_bytes(),
            admin_username: env::var("BIRTHDAYS_ADMIN_USERNAME")
                .unwrap_or_else(|_| "admin".to_string()),
            admin_password: env::var("BIRTHDAYS_ADMIN_PASSWORD")
                .unwrap_or_else(|_| "changeme".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
        }
    }

    /// Default config for testing only.
    pub fn test_default(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!".to_vec(),
            admin_username: "admin".to_string(),
            admin_password: "changeme".to_string(),
            port: 8080,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test for both defaults and overrides: parallel tests poking the
    // same env vars would race.
    #[test]
    fn test_config_from_env() {
        env::remove_var("BIRTHDAYS_DATA_DIR");
        env::remove_var("BIRTHDAYS_SECRET_KEY");
        env::remove_var("BIRTHDAYS_ADMIN_USERNAME");
        env::remove_var("BIRTHDAYS_ADMIN_PASSWORD");
        env::remove_var("PORT");

        let config = Config::from_env();
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.admin_username, "admin");
        assert_eq!(config.port, 8080);

        env::set_var("BIRTHDAYS_DATA_DIR", "/tmp/bday-test");
        env::set_var("BIRTHDAYS_SECRET_KEY", "test-secret");

        let config = Config::from_env();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/bday-test"));
        assert_eq!(config.jwt_signing_key, b"test-secret".to_vec());

        env::remove_var("BIRTHDAYS_DATA_DIR");
        env::remove_var("BIRTHDAYS_SECRET_KEY");
    }
}
