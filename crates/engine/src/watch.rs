//! Translation of filesystem watch events into Index mutations.
//!
//! The engine core has no filesystem access, so the caller supplies two
//! callbacks: `is_dir` (a non-blocking stat, returning `None` when the path
//! no longer exists) and `rescan` (triggers a sub-scan of a directory,
//! re-populating the index under that prefix). This keeps the translation
//! rules in §4.5/§4.8 unit-testable against the Index directly, without the
//! core depending on any real Scanner or OS watcher backend.

use crate::path_index::PathIndex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchEventKind {
    Created,
    Deleted,
    Modified,
    Renamed,
}

#[derive(Debug, Clone)]
pub struct WatchEvent {
    pub path: String,
    pub kind: WatchEventKind,
}

fn prefix_of(path: &str) -> String {
    let mut prefix = path.to_owned();
    prefix.push('/');
    prefix
}

/// Applies one batch of watch events to `index`, in order. Non-atomic across
/// events, matching §4.5: a crash partway through leaves the index
/// partially updated rather than rolled back.
pub fn apply_watch_events(
    index: &mut PathIndex,
    events: &[WatchEvent],
    mut is_dir: impl FnMut(&str) -> Option<bool>,
    mut rescan: impl FnMut(&mut PathIndex, &str),
) {
    for event in events {
        apply_one(index, event, &mut is_dir, &mut rescan);
    }
}

fn apply_one(
    index: &mut PathIndex,
    event: &WatchEvent,
    is_dir: &mut impl FnMut(&str) -> Option<bool>,
    rescan: &mut impl FnMut(&mut PathIndex, &str),
) {
    match event.kind {
        WatchEventKind::Created => match is_dir(&event.path) {
            Some(true) => rescan(index, &event.path),
            Some(false) => {
                index.add(&event.path);
            }
            None => {}
        },
        WatchEventKind::Deleted => {
            index.remove(&event.path);
            index.remove_with_prefix(&prefix_of(&event.path));
        }
        WatchEventKind::Modified => {
            // File contents are never indexed, so a plain-file modification
            // carries no index-relevant change. A directory modification (or
            // a path that can no longer be stat'd, erring on the side of
            // rescanning per §9) triggers a prefix rescan.
            match is_dir(&event.path) {
                Some(false) => {}
                Some(true) | None => {
                    index.remove_with_prefix(&prefix_of(&event.path));
                    rescan(index, &event.path);
                }
            }
        }
        WatchEventKind::Renamed => {
            // A rename is reported as a removal of the old path; the engine
            // waits for a matching `created` event at the new path rather
            // than trying to pair them up itself.
            index.remove(&event.path);
            index.remove_with_prefix(&prefix_of(&event.path));
        }
    }
}
