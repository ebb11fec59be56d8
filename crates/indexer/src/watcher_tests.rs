use super::*;
use std::fs;
use std::thread::sleep;
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn first_poll_reports_existing_entries_as_created() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), b"hi").unwrap();

    let mut watcher = PollingWatcher::new(dir.path().to_path_buf());
    let events = watcher.poll();

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].path, "a.txt");
    assert!(matches!(events[0].kind, WatchEventKind::Created));
}

#[test]
fn second_poll_with_no_changes_reports_nothing() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), b"hi").unwrap();

    let mut watcher = PollingWatcher::new(dir.path().to_path_buf());
    watcher.poll();
    let events = watcher.poll();

    assert!(events.is_empty());
}

#[test]
fn new_file_is_reported_as_created_on_next_poll() {
    let dir = tempdir().unwrap();
    let mut watcher = PollingWatcher::new(dir.path().to_path_buf());
    watcher.poll();

    fs::write(dir.path().join("new.txt"), b"hi").unwrap();
    let events = watcher.poll();

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].path, "new.txt");
    assert!(matches!(events[0].kind, WatchEventKind::Created));
}

#[test]
fn deleted_file_is_reported() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("gone.txt");
    fs::write(&file, b"hi").unwrap();

    let mut watcher = PollingWatcher::new(dir.path().to_path_buf());
    watcher.poll();

    fs::remove_file(&file).unwrap();
    let events = watcher.poll();

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].path, "gone.txt");
    assert!(matches!(events[0].kind, WatchEventKind::Deleted));
}

#[test]
fn modified_mtime_is_reported() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("a.txt");
    fs::write(&file, b"hi").unwrap();

    let mut watcher = PollingWatcher::new(dir.path().to_path_buf());
    watcher.poll();

    // Ensure the mtime actually advances on filesystems with coarse
    // resolution before rewriting the file.
    sleep(Duration::from_millis(20));
    fs::write(&file, b"hello, longer").unwrap();

    let events = watcher.poll();
    assert!(
        events
            .iter()
            .any(|e| e.path == "a.txt" && matches!(e.kind, WatchEventKind::Modified))
    );
}

#[test]
fn stat_is_dir_reflects_directory_vs_file_vs_missing() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("f.txt"), b"hi").unwrap();
    fs::create_dir(dir.path().join("d")).unwrap();

    let watcher = PollingWatcher::new(dir.path().to_path_buf());
    assert_eq!(watcher.stat_is_dir("f.txt"), Some(false));
    assert_eq!(watcher.stat_is_dir("d"), Some(true));
    assert_eq!(watcher.stat_is_dir("missing"), None);
}
