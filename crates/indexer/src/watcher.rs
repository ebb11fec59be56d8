//! Concrete, non-blocking poll implementation of the Watcher collaborator.
//!
//! Per §9's cross-platform abstraction, real backends would dispatch over
//! kqueue/inotify/directory-change-notifications; this crate ships the
//! always-available fallback described there — periodic mtime comparison —
//! behind the same poll contract, so a future fd-based backend can replace
//! it without touching callers.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use log::warn;
use sniff_engine::{WatchEvent, WatchEventKind};

/// Snapshot of one watched entry's last-seen modification time, used to
/// detect created/modified/deleted entries between polls.
struct Snapshot {
    mtime: SystemTime,
    is_dir: bool,
}

/// A non-blocking, polling-based watcher over a single root directory.
///
/// `poll()` walks the root's immediate children (non-recursively — nested
/// directories are discovered as `created` events and left to the caller's
/// sub-scan) and diffs against the previous snapshot.
pub struct PollingWatcher {
    root: PathBuf,
    seen: HashMap<PathBuf, Snapshot>,
}

impl PollingWatcher {
    pub fn new(root: PathBuf) -> Self {
        PollingWatcher {
            root,
            seen: HashMap::new(),
        }
    }

    /// Returns `Some(true)` for a directory, `Some(false)` for anything
    /// else, `None` if the path can no longer be stat'd. Matches the
    /// `is_dir` callback shape `sniff_engine::apply_watch_events` expects.
    pub fn stat_is_dir(&self, rel_path: &str) -> Option<bool> {
        std::fs::symlink_metadata(self.root.join(rel_path))
            .ok()
            .map(|m| m.is_dir())
    }

    /// Drains zero or more events accumulated since the last call.
    pub fn poll(&mut self) -> Vec<WatchEvent> {
        let mut current = HashMap::new();
        let mut events = Vec::new();

        let entries = match std::fs::read_dir(&self.root) {
            Ok(rd) => rd,
            Err(e) => {
                warn!("[watch] read_dir({:?}) failed: {e}", self.root);
                return events;
            }
        };

        for entry in entries.flatten() {
            let path = entry.path();
            let Ok(meta) = entry.metadata() else { continue };
            let Some(rel) = rel_path(&self.root, &path) else {
                continue;
            };

            let mtime = meta.modified().unwrap_or(SystemTime::UNIX_EPOCH);
            let is_dir = meta.is_dir();

            match self.seen.get(&path) {
                None => events.push(WatchEvent {
                    path: rel.clone(),
                    kind: WatchEventKind::Created,
                }),
                Some(prev) if prev.mtime != mtime => events.push(WatchEvent {
                    path: rel.clone(),
                    kind: WatchEventKind::Modified,
                }),
                Some(_) => {}
            }

            current.insert(path, Snapshot { mtime, is_dir });
        }

        for path in self.seen.keys() {
            if !current.contains_key(path)
                && let Some(rel) = rel_path(&self.root, path)
            {
                events.push(WatchEvent {
                    path: rel,
                    kind: WatchEventKind::Deleted,
                });
            }
        }

        self.seen = current;
        events
    }
}

fn rel_path(root: &Path, full: &Path) -> Option<String> {
    let rel = full.strip_prefix(root).ok()?;
    let mut out = String::new();
    for component in rel.components() {
        let piece = component.as_os_str().to_str()?;
        if !out.is_empty() {
            out.push('/');
        }
        out.push_str(piece);
    }
    Some(out)
}

#[cfg(test)]
#[path = "watcher_tests.rs"]
mod tests;
