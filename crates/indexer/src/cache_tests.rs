use super::*;
use serial_test::serial;
use std::io::Write as _;
use tempfile::tempdir;

fn set_cache_home(dir: &Path) {
    // sniff_runtime::cache_dir() honors XDG_CACHE_HOME on non-macOS/Windows
    // targets; CI for this crate runs on Linux, so this is sufficient to
    // sandbox the cache path used by load/store in tests.
    unsafe {
        std::env::set_var("XDG_CACHE_HOME", dir);
    }
}

#[test]
#[serial]
fn round_trip_save_then_load_preserves_paths_and_timestamp() {
    let cache_home = tempdir().unwrap();
    set_cache_home(cache_home.path());
    let root = tempdir().unwrap();

    let mut index = PathIndex::new();
    index.add("src/main.rs");
    index.add("src/lib.rs");
    index.add("docs/readme.md");

    store(root.path(), &index, 1_700_000_000).unwrap();

    let loaded = load(root.path()).unwrap();
    assert_eq!(loaded.timestamp, 1_700_000_000);
    assert_eq!(loaded.paths.len(), 3);
    assert!(loaded.paths.contains(&"src/main.rs".to_string()));
    assert!(loaded.paths.contains(&"docs/readme.md".to_string()));

    let mut fresh = PathIndex::new();
    apply(&mut fresh, &loaded);
    assert_eq!(fresh.count(), 3);
}

#[test]
#[serial]
fn missing_cache_file_is_a_miss() {
    let cache_home = tempdir().unwrap();
    set_cache_home(cache_home.path());
    let root = tempdir().unwrap();

    let err = load(root.path()).unwrap_err();
    assert!(matches!(err, CacheError::Missing));
}

#[test]
#[serial]
fn bad_magic_is_rejected() {
    let cache_home = tempdir().unwrap();
    set_cache_home(cache_home.path());
    let root = tempdir().unwrap();

    let path = index_cache_path(root.path());
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, [0u8; 32]).unwrap();

    let err = load(root.path()).unwrap_err();
    assert!(matches!(err, CacheError::BadMagic));
}

#[test]
#[serial]
fn version_mismatch_is_rejected() {
    let cache_home = tempdir().unwrap();
    set_cache_home(cache_home.path());
    let root = tempdir().unwrap();

    let index = PathIndex::new();
    store(root.path(), &index, 0).unwrap();

    let path = index_cache_path(root.path());
    let mut bytes = std::fs::read(&path).unwrap();
    // Version sits right after the 4-byte magic.
    bytes[4] = 0xFF;
    bytes[5] = 0xFF;
    std::fs::write(&path, &bytes).unwrap();

    let err = load(root.path()).unwrap_err();
    assert!(matches!(err, CacheError::VersionMismatch { .. }));
}

#[test]
#[serial]
fn root_mismatch_is_rejected() {
    let cache_home = tempdir().unwrap();
    set_cache_home(cache_home.path());
    let root_a = tempdir().unwrap();
    let root_b = tempdir().unwrap();

    let index = PathIndex::new();
    store(root_a.path(), &index, 0).unwrap();

    // root_b hashes to a different cache file, so force the collision by
    // writing root_a's cache bytes under root_b's expected path.
    let path_a = index_cache_path(root_a.path());
    let path_b = index_cache_path(root_b.path());
    std::fs::copy(&path_a, &path_b).unwrap();

    let err = load(root_b.path()).unwrap_err();
    assert!(matches!(err, CacheError::RootMismatch));
}

#[test]
#[serial]
fn truncated_file_is_rejected() {
    let cache_home = tempdir().unwrap();
    set_cache_home(cache_home.path());
    let root = tempdir().unwrap();

    let mut index = PathIndex::new();
    index.add("a/b.rs");
    store(root.path(), &index, 0).unwrap();

    let path = index_cache_path(root.path());
    let bytes = std::fs::read(&path).unwrap();
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(&bytes[..bytes.len() - 2]).unwrap();

    let err = load(root.path()).unwrap_err();
    assert!(matches!(err, CacheError::Truncated));
}
