use super::*;

fn temp_path(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("portal-storage-{}-{name}.json", std::process::id()));
    let _ = std::fs::remove_file(&path);
    path
}

// =============================================================
// MemoryStorage
// =============================================================

#[test]
fn memory_set_get_remove() {
    let storage = MemoryStorage::new();
    assert_eq!(storage.get(REDIRECT_AFTER_LOGIN_KEY), None);

    storage.set(REDIRECT_AFTER_LOGIN_KEY, "/perfil").unwrap();
    assert_eq!(storage.get(REDIRECT_AFTER_LOGIN_KEY).as_deref(), Some("/perfil"));

    storage.set(REDIRECT_AFTER_LOGIN_KEY, "/favoritos").unwrap();
    assert_eq!(storage.get(REDIRECT_AFTER_LOGIN_KEY).as_deref(), Some("/favoritos"));

    storage.remove(REDIRECT_AFTER_LOGIN_KEY).unwrap();
    assert_eq!(storage.get(REDIRECT_AFTER_LOGIN_KEY), None);
}

#[test]
fn memory_remove_missing_key_is_ok() {
    let storage = MemoryStorage::new();
    assert!(storage.remove("nothing").is_ok());
}

// =============================================================
// FileStorage
// =============================================================

#[test]
fn file_missing_starts_empty() {
    let path = temp_path("missing");
    let storage = FileStorage::open(&path).unwrap();
    assert_eq!(storage.get(REDIRECT_AFTER_LOGIN_KEY), None);
    assert!(!path.exists());
}

#[test]
fn file_values_survive_reopen() {
    let path = temp_path("reopen");
    {
        let storage = FileStorage::open(&path).unwrap();
        storage.set(REDIRECT_AFTER_LOGIN_KEY, "/mis-resenas?page=2").unwrap();
    }

    let reopened = FileStorage::open(&path).unwrap();
    assert_eq!(reopened.get(REDIRECT_AFTER_LOGIN_KEY).as_deref(), Some("/mis-resenas?page=2"));

    reopened.remove(REDIRECT_AFTER_LOGIN_KEY).unwrap();
    let again = FileStorage::open(&path).unwrap();
    assert_eq!(again.get(REDIRECT_AFTER_LOGIN_KEY), None);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn file_corrupt_contents_error() {
    let path = temp_path("corrupt");
    std::fs::write(&path, "[1, 2, 3]").unwrap();

    let err = FileStorage::open(&path).unwrap_err();
    assert!(matches!(err, StorageError::Corrupt { .. }));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn file_blank_contents_start_empty() {
    let path = temp_path("blank");
    std::fs::write(&path, "  \n").unwrap();

    let storage = FileStorage::open(&path).unwrap();
    assert_eq!(storage.get("anything"), None);
    assert_eq!(storage.path(), path.as_path());

    let _ = std::fs::remove_file(&path);
}
