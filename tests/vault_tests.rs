//! Integration tests for the ApiVault vault module.

use std::fs;

use apivault::errors::ApiVaultError;
use apivault::vault::{Vault, MAIN_PROVISIONING_KEY_NAME};
use tempfile::TempDir;

/// Helper: a vault handle rooted in a fresh temp dir.
fn new_vault() -> (TempDir, Vault) {
    let dir = TempDir::new().expect("create temp dir");
    let vault = Vault::new(dir.path().join("vault"));
    (dir, vault)
}

// ---------------------------------------------------------------------------
// Init
// ---------------------------------------------------------------------------

#[test]
fn init_creates_vault_holding_only_the_provisioning_key() {
    let (_dir, vault) = new_vault();

    vault.init("prov-secret").expect("init");

    assert!(vault.list_secrets().unwrap().is_empty());
    assert_eq!(vault.main_provisioning_key().unwrap(), "prov-secret");
}

#[test]
fn init_twice_fails_and_preserves_the_first_vault() {
    let (_dir, vault) = new_vault();

    vault.init("first-secret").expect("first init");
    vault.add_secret("my-key", "v1", "id1").expect("add");

    let result = vault.init("second-secret");
    assert!(matches!(result, Err(ApiVaultError::AlreadyInitialized(_))));

    // The first vault's contents are unmodified.
    assert_eq!(vault.main_provisioning_key().unwrap(), "first-secret");
    assert_eq!(vault.get_secret("my-key").unwrap(), "v1");
}

#[test]
fn init_is_rejected_when_only_the_key_file_survived() {
    let (_dir, vault) = new_vault();
    vault.init("prov").expect("init");

    // Simulate a partial prior failure: vault file gone, key file left.
    fs::remove_file(vault.vault_dir().join("secrets.vault")).unwrap();

    let result = vault.init("prov");
    assert!(matches!(result, Err(ApiVaultError::AlreadyInitialized(_))));
}

#[test]
fn is_initialized_tracks_the_files_on_disk() {
    let (_dir, vault) = new_vault();
    assert!(!vault.is_initialized());

    vault.init("prov").expect("init");
    assert!(vault.is_initialized());

    // Still initialized when only one of the two files survived.
    fs::remove_file(vault.vault_dir().join("secrets.vault")).unwrap();
    assert!(vault.is_initialized());
}

// ---------------------------------------------------------------------------
// CRUD consistency
// ---------------------------------------------------------------------------

#[test]
fn add_get_and_get_id_roundtrip() {
    let (_dir, vault) = new_vault();
    vault.init("prov").expect("init");

    vault.add_secret("k", "v", "id1").expect("add");

    assert_eq!(vault.get_secret("k").unwrap(), "v");
    assert_eq!(vault.get_secret_id("k").unwrap(), "id1");
}

#[test]
fn add_duplicate_name_is_a_conflict() {
    let (_dir, vault) = new_vault();
    vault.init("prov").expect("init");

    vault.add_secret("k", "v", "").expect("add");
    let result = vault.add_secret("k", "other", "");
    assert!(matches!(result, Err(ApiVaultError::SecretAlreadyExists(_))));

    // Original value still in place.
    assert_eq!(vault.get_secret("k").unwrap(), "v");
}

#[test]
fn update_replaces_value_and_id() {
    let (_dir, vault) = new_vault();
    vault.init("prov").expect("init");

    vault.add_secret("k", "v1", "id1").expect("add");
    vault.update_secret("k", "v2", "id2").expect("update");

    assert_eq!(vault.get_secret("k").unwrap(), "v2");
    assert_eq!(vault.get_secret_id("k").unwrap(), "id2");
}

#[test]
fn update_missing_secret_fails() {
    let (_dir, vault) = new_vault();
    vault.init("prov").expect("init");

    let result = vault.update_secret("missing", "v", "");
    assert!(matches!(result, Err(ApiVaultError::SecretNotFound(_))));
}

#[test]
fn remove_then_get_is_not_found() {
    let (_dir, vault) = new_vault();
    vault.init("prov").expect("init");

    vault.add_secret("k", "v", "").expect("add");
    vault.remove_secret("k").expect("remove");

    let result = vault.get_secret("k");
    assert!(matches!(result, Err(ApiVaultError::SecretNotFound(_))));
}

#[test]
fn remove_missing_secret_fails() {
    let (_dir, vault) = new_vault();
    vault.init("prov").expect("init");

    let result = vault.remove_secret("missing");
    assert!(matches!(result, Err(ApiVaultError::SecretNotFound(_))));
}

#[test]
fn list_returns_all_names_except_the_reserved_one() {
    let (_dir, vault) = new_vault();
    vault.init("prov").expect("init");

    vault.add_secret("alpha", "a", "").expect("add alpha");
    vault.add_secret("beta", "b", "").expect("add beta");

    let mut names = vault.list_secrets().unwrap();
    names.sort();
    assert_eq!(names, vec!["alpha".to_string(), "beta".to_string()]);
}

#[test]
fn empty_id_roundtrips_as_empty() {
    let (_dir, vault) = new_vault();
    vault.init("prov").expect("init");

    vault.add_secret("k", "v", "").expect("add");
    assert_eq!(vault.get_secret_id("k").unwrap(), "");
}

// ---------------------------------------------------------------------------
// Reserved-name protection
// ---------------------------------------------------------------------------

#[test]
fn reserved_name_cannot_be_removed() {
    let (_dir, vault) = new_vault();
    vault.init("prov").expect("init");

    let result = vault.remove_secret(MAIN_PROVISIONING_KEY_NAME);
    assert!(matches!(result, Err(ApiVaultError::ReservedName(_))));

    // Still retrievable afterwards.
    assert_eq!(vault.main_provisioning_key().unwrap(), "prov");
}

#[test]
fn reserved_name_cannot_be_added_or_updated() {
    let (_dir, vault) = new_vault();
    vault.init("prov").expect("init");

    let add = vault.add_secret(MAIN_PROVISIONING_KEY_NAME, "x", "");
    assert!(matches!(add, Err(ApiVaultError::ReservedName(_))));

    let update = vault.update_secret(MAIN_PROVISIONING_KEY_NAME, "x", "");
    assert!(matches!(update, Err(ApiVaultError::ReservedName(_))));

    assert_eq!(vault.main_provisioning_key().unwrap(), "prov");
}

#[test]
fn secret_names_are_opaque() {
    let (_dir, vault) = new_vault();
    vault.init("prov").expect("init");

    // Names are map keys, nothing more: spaces, unicode, and length
    // all pass through unchanged.
    let names = ["my key", "prod/api key #2", "clé-été", &"n".repeat(1000)];
    for (i, name) in names.iter().enumerate() {
        vault
            .add_secret(name, &format!("value-{i}"), "")
            .expect("add");
        assert_eq!(vault.get_secret(name).unwrap(), format!("value-{i}"));
    }

    let mut listed = vault.list_secrets().unwrap();
    listed.sort();
    let mut expected: Vec<String> = names.iter().map(|n| n.to_string()).collect();
    expected.sort();
    assert_eq!(listed, expected);
}

// ---------------------------------------------------------------------------
// Master key rotation
// ---------------------------------------------------------------------------

#[test]
fn rotation_preserves_content_and_replaces_the_key_file() {
    let (_dir, vault) = new_vault();
    vault.init("prov").expect("init");

    vault.add_secret("one", "value-1", "id-1").expect("add one");
    vault.add_secret("two", "value-2", "id-2").expect("add two");

    let key_file = vault.vault_dir().join("master.key");
    let key_before = fs::read(&key_file).unwrap();
    let blob_before = fs::read_to_string(vault.vault_dir().join("secrets.vault")).unwrap();

    vault.rotate_master_key().expect("rotate");

    // The on-disk master key and vault blob both changed.
    let key_after = fs::read(&key_file).unwrap();
    assert_ne!(key_before, key_after, "master key must be replaced");
    let blob_after = fs::read_to_string(vault.vault_dir().join("secrets.vault")).unwrap();
    assert_ne!(blob_before, blob_after, "vault must be re-encrypted");

    // Every secret is still retrievable with an unchanged value.
    assert_eq!(vault.get_secret("one").unwrap(), "value-1");
    assert_eq!(vault.get_secret("two").unwrap(), "value-2");
    assert_eq!(vault.get_secret_id("one").unwrap(), "id-1");
    assert_eq!(vault.main_provisioning_key().unwrap(), "prov");
}

#[test]
fn old_key_no_longer_decrypts_after_rotation() {
    let (_dir, vault) = new_vault();
    vault.init("prov").expect("init");

    let key_file = vault.vault_dir().join("master.key");
    let old_key = fs::read(&key_file).unwrap();

    vault.rotate_master_key().expect("rotate");

    // Put the old key back: the vault must now fail to decrypt.
    fs::write(&key_file, &old_key).unwrap();
    let result = vault.main_provisioning_key();
    assert!(matches!(result, Err(ApiVaultError::DecryptionFailed)));
}

// ---------------------------------------------------------------------------
// Corruption and missing-file handling
// ---------------------------------------------------------------------------

#[test]
fn corrupted_vault_file_fails_every_operation() {
    let (_dir, vault) = new_vault();
    vault.init("prov").expect("init");
    vault.add_secret("k", "v", "").expect("add");

    fs::write(vault.vault_dir().join("secrets.vault"), "garbage bytes").unwrap();

    assert!(matches!(
        vault.get_secret("k"),
        Err(ApiVaultError::DecryptionFailed)
    ));
    assert!(matches!(
        vault.list_secrets(),
        Err(ApiVaultError::DecryptionFailed)
    ));
    assert!(matches!(
        vault.add_secret("other", "v", ""),
        Err(ApiVaultError::DecryptionFailed)
    ));
}

#[test]
fn wrong_master_key_on_disk_is_an_integrity_error() {
    let (_dir, vault) = new_vault();
    vault.init("prov").expect("init");

    fs::write(vault.vault_dir().join("master.key"), [0x5Au8; 32]).unwrap();

    let result = vault.get_secret("anything");
    assert!(matches!(result, Err(ApiVaultError::DecryptionFailed)));
}

#[test]
fn missing_vault_file_is_reported() {
    let (_dir, vault) = new_vault();
    vault.init("prov").expect("init");

    fs::remove_file(vault.vault_dir().join("secrets.vault")).unwrap();

    let result = vault.list_secrets();
    assert!(matches!(result, Err(ApiVaultError::VaultNotFound(_))));
}

#[test]
fn missing_key_file_is_reported() {
    let (_dir, vault) = new_vault();
    vault.init("prov").expect("init");

    fs::remove_file(vault.vault_dir().join("master.key")).unwrap();

    let result = vault.list_secrets();
    assert!(matches!(result, Err(ApiVaultError::MasterKeyNotFound(_))));
}

// ---------------------------------------------------------------------------
// File permissions
// ---------------------------------------------------------------------------

#[cfg(unix)]
#[test]
fn vault_files_are_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let (_dir, vault) = new_vault();
    vault.init("prov").expect("init");

    let dir_mode = fs::metadata(vault.vault_dir()).unwrap().permissions().mode();
    assert_eq!(dir_mode & 0o777, 0o700);

    for file in ["secrets.vault", "master.key"] {
        let mode = fs::metadata(vault.vault_dir().join(file))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600, "{file} must be owner-only");
    }
}
