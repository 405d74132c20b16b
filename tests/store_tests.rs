// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JSON store tests: CRUD per collection, conflict handling, and the
//! id-backfill migration.

use birthday_tracker::models::{Birthday, ContactType, EmailSettings, User};
use birthday_tracker::store::{BirthdayStore, SettingsStore, StoreError, UserStore};
use tempfile::TempDir;

fn user(username: &str) -> User {
    User {
        username: username.to_string(),
        hashed_password: "hash123".to_string(),
        disabled: false,
        is_admin: false,
    }
}

fn birthday(name: &str, month: u32, day: u32) -> Birthday {
    Birthday {
        id: String::new(),
        name: name.to_string(),
        birth_year: None,
        month,
        day: Some(day),
        note: None,
        contact_type: ContactType::Friend,
    }
}

#[test]
fn user_create_and_get() {
    let dir = TempDir::new().unwrap();
    let store = UserStore::open(dir.path().join("users.json")).unwrap();

    store.create(user("alice")).unwrap();

    let fetched = store.get_by_username("alice").unwrap().unwrap();
    assert_eq!(fetched.username, "alice");
    assert_eq!(fetched.hashed_password, "hash123");
    assert!(store.get_by_username("nobody").unwrap().is_none());
}

#[test]
fn user_duplicate_username_conflicts() {
    let dir = TempDir::new().unwrap();
    let store = UserStore::open(dir.path().join("users.json")).unwrap();

    store.create(user("alice")).unwrap();
    let err = store.create(user("alice")).unwrap_err();
    assert!(matches!(err, StoreError::Conflict(_)));
}

#[test]
fn user_update_and_delete() {
    let dir = TempDir::new().unwrap();
    let store = UserStore::open(dir.path().join("users.json")).unwrap();

    store.create(user("alice")).unwrap();

    let mut changed = user("alice");
    changed.hashed_password = "new_hash".to_string();
    let updated = store.update("alice", changed).unwrap().unwrap();
    assert_eq!(updated.hashed_password, "new_hash");
    assert_eq!(
        store
            .get_by_username("alice")
            .unwrap()
            .unwrap()
            .hashed_password,
        "new_hash"
    );

    assert!(store.update("ghost", user("ghost")).unwrap().is_none());

    assert!(store.delete("alice").unwrap());
    assert!(!store.delete("alice").unwrap());
    assert!(!store.exists("alice").unwrap());
}

#[test]
fn empty_store_returns_empty_list() {
    let dir = TempDir::new().unwrap();
    let store = UserStore::open(dir.path().join("users.json")).unwrap();
    assert!(store.get_all().unwrap().is_empty());
}

#[test]
fn birthday_create_generates_stable_id() {
    let dir = TempDir::new().unwrap();
    let store = BirthdayStore::open(dir.path().join("birthdays.json")).unwrap();

    let created = store.create(birthday("Alice", 3, 15)).unwrap();
    assert!(!created.id.is_empty());

    // Stable across reads.
    let first = store.get_by_id(&created.id).unwrap().unwrap();
    let second = store.get_by_id(&created.id).unwrap().unwrap();
    assert_eq!(first.id, second.id);
    assert_eq!(first.name, "Alice");
    assert_eq!(first.month, 3);
    assert_eq!(first.day, Some(15));
    assert_eq!(first.contact_type, ContactType::Friend);
}

#[test]
fn birthday_create_preserves_given_id_and_conflicts_on_duplicate() {
    let dir = TempDir::new().unwrap();
    let store = BirthdayStore::open(dir.path().join("birthdays.json")).unwrap();

    let mut record = birthday("Bob", 6, 1);
    record.id = "custom-id".to_string();
    let created = store.create(record.clone()).unwrap();
    assert_eq!(created.id, "custom-id");

    let err = store.create(record).unwrap_err();
    assert!(matches!(err, StoreError::Conflict(_)));
}

#[test]
fn birthday_update_preserves_id() {
    let dir = TempDir::new().unwrap();
    let store = BirthdayStore::open(dir.path().join("birthdays.json")).unwrap();

    let created = store.create(birthday("Alice", 3, 15)).unwrap();

    let mut replacement = birthday("Alice Smith", 3, 16);
    replacement.note = Some("New note".to_string());
    let updated = store.update(&created.id, replacement).unwrap().unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "Alice Smith");
    assert_eq!(updated.day, Some(16));

    assert!(store
        .update("nonexistent", birthday("X", 1, 1))
        .unwrap()
        .is_none());
}

#[test]
fn birthday_delete() {
    let dir = TempDir::new().unwrap();
    let store = BirthdayStore::open(dir.path().join("birthdays.json")).unwrap();

    let created = store.create(birthday("Alice", 3, 15)).unwrap();
    assert!(store.delete(&created.id).unwrap());
    assert!(!store.delete(&created.id).unwrap());
    assert!(store.get_all().unwrap().is_empty());
}

#[test]
fn birthday_order_is_insertion_order() {
    let dir = TempDir::new().unwrap();
    let store = BirthdayStore::open(dir.path().join("birthdays.json")).unwrap();

    store.create(birthday("A", 1, 1)).unwrap();
    store.create(birthday("B", 2, 2)).unwrap();
    store.create(birthday("C", 3, 3)).unwrap();

    let names: Vec<String> = store
        .get_all()
        .unwrap()
        .into_iter()
        .map(|b| b.name)
        .collect();
    assert_eq!(names, vec!["A", "B", "C"]);
}

#[test]
fn migration_backfills_missing_ids_once() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("birthdays.json");

    // Legacy document: records without ids.
    std::fs::write(
        &path,
        serde_json::json!({
            "birthdays": [
                {"name": "Old One", "month": 1, "day": 1, "birth_year": null, "note": null},
                {"name": "Old Two", "month": 2, "day": 2, "birth_year": null, "note": null},
            ]
        })
        .to_string(),
    )
    .unwrap();

    let store = BirthdayStore::open(path.clone()).unwrap();
    assert_eq!(store.migrate_add_ids().unwrap(), 2);

    let all = store.get_all().unwrap();
    assert!(all.iter().all(|b| !b.id.is_empty()));

    // Second run changes nothing, including the bytes on disk.
    let before = std::fs::read(&path).unwrap();
    assert_eq!(store.migrate_add_ids().unwrap(), 0);
    let after = std::fs::read(&path).unwrap();
    assert_eq!(before, after);
}

#[test]
fn settings_default_until_saved() {
    let dir = TempDir::new().unwrap();
    let store = SettingsStore::open(dir.path().join("settings.json")).unwrap();

    let settings = store.get_email_settings().unwrap();
    assert!(!settings.enabled);
    assert_eq!(settings.smtp_port, 587);
    assert_eq!(settings.reminder_time, "09:00");
}

#[test]
fn settings_saved_wholesale() {
    let dir = TempDir::new().unwrap();
    let store = SettingsStore::open(dir.path().join("settings.json")).unwrap();

    let settings = EmailSettings {
        enabled: true,
        smtp_server: "smtp.example.com".to_string(),
        recipients: vec!["a@example.com".to_string()],
        reminder_time: "07:30".to_string(),
        ..EmailSettings::default()
    };
    store.save_email_settings(&settings).unwrap();

    let loaded = store.get_email_settings().unwrap();
    assert!(loaded.enabled);
    assert_eq!(loaded.smtp_server, "smtp.example.com");
    assert_eq!(loaded.recipients, vec!["a@example.com".to_string()]);
    assert_eq!(loaded.reminder_time, "07:30");

    // Overwrite drops everything not in the new record.
    store
        .save_email_settings(&EmailSettings::default())
        .unwrap();
    let reset = store.get_email_settings().unwrap();
    assert!(!reset.enabled);
    assert!(reset.recipients.is_empty());
}
