// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JWT authentication tests.
//!
//! These tests verify that tokens issued by the login route can be decoded
//! by the auth middleware, catching compatibility issues early.

use birthday_tracker::middleware::auth::{create_jwt, Claims};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use std::time::{SystemTime, UNIX_EPOCH};

const SIGNING_KEY: &[u8] = b"test_signing_key_32_bytes_long!!";

#[test]
fn test_jwt_roundtrip() {
    let token = create_jwt("alice", SIGNING_KEY).expect("Failed to create JWT");

    let key = DecodingKey::from_secret(SIGNING_KEY);
    let validation = Validation::new(Algorithm::HS256);

    let token_data = decode::<Claims>(&token, &key, &validation)
        .expect("Failed to decode JWT - check Claims struct compatibility");

    assert_eq!(token_data.claims.sub, "alice");
    assert!(token_data.claims.exp > token_data.claims.iat);
}

#[test]
fn test_jwt_expires_in_24_hours() {
    let token = create_jwt("alice", SIGNING_KEY).unwrap();

    let key = DecodingKey::from_secret(SIGNING_KEY);
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false; // We'll check manually

    let token_data = decode::<Claims>(&token, &key, &validation).unwrap();

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize;

    // Expiry should land within a minute of now + 24h.
    let expected = now + 24 * 60 * 60;
    assert!(token_data.claims.exp >= expected - 60);
    assert!(token_data.claims.exp <= expected + 60);
}

#[test]
fn test_wrong_key_fails_closed() {
    let token = create_jwt("alice", SIGNING_KEY).unwrap();

    let key = DecodingKey::from_secret(b"a_different_signing_key_entirely");
    let validation = Validation::new(Algorithm::HS256);

    assert!(decode::<Claims>(&token, &key, &validation).is_err());
}

#[test]
fn test_garbage_token_fails_closed() {
    let key = DecodingKey::from_secret(SIGNING_KEY);
    let validation = Validation::new(Algorithm::HS256);

    assert!(decode::<Claims>("not.a.token", &key, &validation).is_err());
    assert!(decode::<Claims>("", &key, &validation).is_err());
}
