//! Integration tests for loading and saving vault files.

use std::fs;

use pwdvault::commands::{AddEntry, Operation, RemoveEntry, ShowEntry};
use pwdvault::crypto::{Argon2Params, Passthrough, PassphraseSymmetric};
use pwdvault::vault::{Entry, VaultFile};
use tempfile::TempDir;
use zeroize::Zeroizing;

/// Helper: create a temporary vault file path inside a fresh temp dir.
fn vault_path() -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("test.pwdvault");
    (dir, path)
}

/// Helper: an encrypted vault handle with fast KDF params.
fn encrypted(path: &std::path::Path, passphrase: &str) -> VaultFile {
    let transform = PassphraseSymmetric::with_params(
        Zeroizing::new(passphrase.to_string()),
        Argon2Params::minimum(),
    );
    VaultFile::new(path, Box::new(transform))
}

// ---------------------------------------------------------------------------
// Encrypted round-trip
// ---------------------------------------------------------------------------

#[test]
fn save_and_reopen_encrypted_vault() {
    let (_dir, path) = vault_path();
    let vault = encrypted(&path, "correct horse");

    let mut store = vault.load().expect("init empty store");
    AddEntry::new("github", "alice", "s3cr3t")
        .aliases(["gh"])
        .tags(["work"])
        .login_alias("alice@example.com")
        .execute(&mut store)
        .unwrap();
    store.add(Entry::new("bank", "bob", "hunter2"));
    assert!(vault.save_if_needed(&mut store).unwrap());

    // The file must not contain any plaintext.
    let raw = fs::read(&path).unwrap();
    assert!(raw.starts_with(b"PWDV"));
    let haystack = String::from_utf8_lossy(&raw);
    assert!(!haystack.contains("s3cr3t"));
    assert!(!haystack.contains("github"));

    let reopened = encrypted(&path, "correct horse").load().expect("reopen");
    assert_eq!(reopened.len(), 2);
    for original in store.entries() {
        assert_eq!(reopened.lookup(&original.name), Some(original));
    }
    assert_eq!(reopened.lookup("gh").unwrap().name, "github");
}

#[test]
fn wrong_passphrase_fails_to_load() {
    let (_dir, path) = vault_path();
    let vault = encrypted(&path, "correct horse");
    let mut store = vault.load().unwrap();
    store.add(Entry::new("n", "l", "p"));
    vault.save(&mut store).unwrap();

    let err = encrypted(&path, "battery staple").load().unwrap_err();
    assert!(err.is_crypto(), "wrong passphrase must be a crypto error: {err}");
}

#[test]
fn tampered_file_is_rejected() {
    let (_dir, path) = vault_path();
    let vault = encrypted(&path, "tamper-pw");
    let mut store = vault.load().unwrap();
    store.add(Entry::new("n", "l", "p"));
    vault.save(&mut store).unwrap();

    let mut data = fs::read(&path).unwrap();
    let last = data.len() - 1;
    data[last] ^= 0xFF;
    fs::write(&path, &data).unwrap();

    assert!(vault.load().unwrap_err().is_crypto());
}

#[test]
fn truncated_file_is_rejected() {
    let (_dir, path) = vault_path();
    let vault = encrypted(&path, "pw");
    let mut store = vault.load().unwrap();
    store.add(Entry::new("n", "l", "p"));
    vault.save(&mut store).unwrap();

    let data = fs::read(&path).unwrap();
    fs::write(&path, &data[..20]).unwrap();

    assert!(vault.load().unwrap_err().is_crypto());
}

#[test]
fn each_save_reencrypts_with_fresh_salt() {
    let (_dir, path) = vault_path();
    let vault = encrypted(&path, "pw");
    let mut store = vault.load().unwrap();
    store.add(Entry::new("n", "l", "p"));

    vault.save(&mut store).unwrap();
    let first = fs::read(&path).unwrap();
    vault.save(&mut store).unwrap();
    let second = fs::read(&path).unwrap();

    assert_ne!(first, second);
}

// ---------------------------------------------------------------------------
// Plain vaults
// ---------------------------------------------------------------------------

#[test]
fn passthrough_vault_is_readable_json() {
    let (_dir, path) = vault_path();
    let vault = VaultFile::new(&path, Box::new(Passthrough));
    let mut store = vault.load().unwrap();
    store.add(Entry::new("github", "alice", "s3cr3t"));
    vault.save(&mut store).unwrap();

    let doc: serde_json::Value = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
    assert_eq!(doc["github"]["pwd"], "s3cr3t");
    assert_eq!(doc["github"]["login"], "alice");
    assert!(doc["github"]["creation_date"].is_string());
    assert!(doc["github"]["last_update_date"].is_string());
}

#[test]
fn encrypted_vault_is_not_readable_as_plain() {
    let (_dir, path) = vault_path();
    let vault = encrypted(&path, "pw");
    let mut store = vault.load().unwrap();
    store.add(Entry::new("n", "l", "p"));
    vault.save(&mut store).unwrap();

    let err = VaultFile::new(&path, Box::new(Passthrough)).load().unwrap_err();
    assert!(err.is_crypto());
}

#[test]
fn auxiliary_data_survives_a_save() {
    let (_dir, path) = vault_path();
    fs::write(
        &path,
        r#"{ "meta": { "owner": "alice", "items": [1, 2] } }"#,
    )
    .unwrap();

    let vault = VaultFile::new(&path, Box::new(Passthrough));
    let mut store = vault.load().unwrap();
    assert!(store.is_empty());
    store.add(Entry::new("n", "l", "p"));
    vault.save(&mut store).unwrap();

    let doc: serde_json::Value = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
    assert_eq!(doc["meta"]["owner"], "alice");
    assert_eq!(doc["meta"]["items"][1], 2);
    assert_eq!(doc["n"]["login"], "l");
}

// ---------------------------------------------------------------------------
// Dirty tracking across a full invocation
// ---------------------------------------------------------------------------

#[test]
fn read_only_command_does_not_rewrite_vault() {
    let (_dir, path) = vault_path();
    let vault = VaultFile::new(&path, Box::new(Passthrough));
    let mut store = vault.load().unwrap();
    store.add(Entry::new("n", "l", "p"));
    vault.save(&mut store).unwrap();
    let before = fs::read(&path).unwrap();

    let mut store = vault.load().unwrap();
    ShowEntry::new("n").execute(&mut store).unwrap();
    RemoveEntry::new("missing").execute(&mut store).unwrap();
    assert!(!vault.save_if_needed(&mut store).unwrap());

    assert_eq!(fs::read(&path).unwrap(), before);
}

#[test]
fn failed_validation_leaves_vault_untouched() {
    let (_dir, path) = vault_path();
    let vault = VaultFile::new(&path, Box::new(Passthrough));
    let mut store = vault.load().unwrap();
    store.add(Entry::new("github", "l", "p"));
    vault.save(&mut store).unwrap();

    let mut store = vault.load().unwrap();
    let err = AddEntry::new("github", "x", "y").execute(&mut store).unwrap_err();
    assert!(err.is_validation());
    assert!(!store.is_dirty());
    assert_eq!(store.lookup("github").unwrap().login, "l");
}
