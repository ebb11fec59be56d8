//! Cache-or-scan dispatch: builds or refreshes a `sniff_engine::PathIndex`
//! from either the on-disk cache (`cache`) or a fresh filesystem walk
//! (`sniff_fs`), and exposes the polling Watcher backend (`watcher`).

pub mod cache;
pub mod watcher;

use std::path::Path;
use std::sync::Arc;
use std::thread;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use crossbeam::channel;
use log::{debug, warn};

use sniff_engine::PathIndex;
use sniff_fs::{IgnoreEngine, ScanContext, TrashConfig, UserExcludes, walk_parallel};

pub use cache::CacheError;
pub use watcher::PollingWatcher;

/// Outcome of `index_directory`: whether the cache was used, and how many
/// files ended up in the index.
#[derive(Debug, Clone, Copy)]
pub struct IndexStats {
    pub file_count: usize,
    pub from_cache: bool,
}

fn now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

fn scan_context(root: &Path) -> Result<Arc<ScanContext>> {
    let ignore = IgnoreEngine::with_defaults(root).context("building ignore matcher")?;
    Ok(Arc::new(ScanContext::new(
        TrashConfig::new(),
        ignore,
        UserExcludes::with_system_defaults(),
    )))
}

/// Walks `root` in parallel and populates `index` with every regular file
/// found, skipping directories, symlinks, and special files. Per §7, a
/// directory that cannot be opened or read is logged and skipped; it never
/// aborts the rest of the walk.
fn scan_into(root: &Path, index: &mut PathIndex) -> Result<usize> {
    let ctx = scan_context(root)?;
    let (tx, rx) = channel::unbounded();
    let num_threads = thread::available_parallelism().map(|n| n.get()).unwrap_or(4);

    let root_owned = root.to_path_buf();
    let handle = thread::spawn(move || walk_parallel(root_owned, tx, ctx, num_threads));

    let mut count = 0;
    while let Ok(batch) = rx.recv() {
        for record in batch {
            if record.is_dir || record.is_symlink || record.is_special {
                continue;
            }
            index.add(&record.rel_path);
            count += 1;
        }
    }

    handle
        .join()
        .map_err(|_| anyhow::anyhow!("filesystem walker thread panicked"))?
        .context("walking directory tree")?;

    Ok(count)
}

/// Cache-or-scan dispatcher per §4.5/§4.7: attempts a cache load first; any
/// integrity failure (§7's cache-integrity category) is treated as a miss,
/// falling back to a full scan and writing the result back to cache.
pub fn index_directory(root: &Path, index: &mut PathIndex) -> Result<IndexStats> {
    match cache::load(root) {
        Ok(loaded) => {
            debug!(
                "[index] cache hit for {:?}: {} entries",
                root,
                loaded.paths.len()
            );
            let file_count = loaded.paths.len();
            cache::apply(index, &loaded);
            Ok(IndexStats {
                file_count,
                from_cache: true,
            })
        }
        Err(err) => {
            debug!("[index] cache miss for {:?}: {err}", root);
            index.clear();
            let file_count = scan_into(root, index)?;
            if let Err(e) = cache::store(root, index, now_secs()) {
                warn!("[index] failed to write cache for {:?}: {e}", root);
            }
            Ok(IndexStats {
                file_count,
                from_cache: false,
            })
        }
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
