use std::{
    fs::{self, read_dir},
    io::Result,
    path::{Path, PathBuf},
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    thread,
    time::Duration,
};

use crossbeam::channel::{self, RecvTimeoutError, Sender};
use log::{debug, warn};

use crate::{
    config::BATCH_SIZE,
    excludes::{IgnoreEngine, TrashConfig, UserExcludes},
    record::ScanRecord,
};

pub struct ScanContext {
    pub trash: TrashConfig,
    pub ignore: IgnoreEngine,
    pub user_excludes: UserExcludes,
    /// When true (the default), entries whose basename starts with `.` are
    /// skipped unless a caller ignore rule explicitly un-ignores them.
    pub skip_hidden: bool,
    /// Maximum recursion depth below `root`, counted in directory separators.
    /// `None` (the default) means unbounded.
    pub max_depth: Option<usize>,
}

impl ScanContext {
    pub fn new(trash: TrashConfig, ignore: IgnoreEngine, user_excludes: UserExcludes) -> Self {
        ScanContext {
            trash,
            ignore,
            user_excludes,
            skip_hidden: true,
            max_depth: None,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }
}

/// Multi-threaded parallel walk using crossbeam for improved performance.
///
/// Uses a work-stealing approach where multiple threads process directories
/// concurrently. Records are batched before sending to reduce channel overhead.
pub fn walk_parallel(
    root: PathBuf,
    file_tx: Sender<Vec<ScanRecord>>,
    ctx: Arc<ScanContext>,
    num_threads: usize,
) -> Result<()> {
    let (work_tx, work_rx) = channel::unbounded::<(PathBuf, usize)>();

    // Track pending work items to know when to terminate.
    let pending = Arc::new(AtomicUsize::new(1));
    let _ = work_tx.send((root.clone(), 0));

    debug!("[walk_parallel] starting with {} threads at {:?}", num_threads, root);

    thread::scope(|s| {
        for _thread_id in 0..num_threads {
            let work_rx = work_rx.clone();
            let work_tx = work_tx.clone();
            let file_tx = file_tx.clone();
            let ctx = Arc::clone(&ctx);
            let pending = Arc::clone(&pending);
            let root = root.clone();

            s.spawn(move || {
                worker_loop(&root, work_rx, work_tx, file_tx, &ctx, &pending);
            });
        }
    });

    Ok(())
}

/// Worker loop for parallel walking.
/// Each worker processes directories from the work queue and sends batched records.
fn worker_loop(
    root: &Path,
    work_rx: channel::Receiver<(PathBuf, usize)>,
    work_tx: channel::Sender<(PathBuf, usize)>,
    file_tx: Sender<Vec<ScanRecord>>,
    ctx: &ScanContext,
    pending: &AtomicUsize,
) {
    let mut batch = Vec::with_capacity(BATCH_SIZE);

    loop {
        // Use timeout to periodically check if all work is done.
        match work_rx.recv_timeout(Duration::from_millis(50)) {
            Ok((dir, depth)) => {
                if let Err(e) =
                    scan_dir_parallel(root, &dir, depth, &work_tx, &mut batch, ctx, pending)
                {
                    warn!("[walk] scan_dir_parallel({:?}) failed: {e}", dir);
                }
                if batch.len() >= BATCH_SIZE {
                    let to_send = std::mem::take(&mut batch);
                    if file_tx.send(to_send).is_err() {
                        return;
                    }
                }

                if pending.fetch_sub(1, Ordering::AcqRel) == 1 {
                    break;
                }
            }
            Err(RecvTimeoutError::Timeout) => {
                if pending.load(Ordering::Acquire) == 0 {
                    break;
                }
            }
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    if !batch.is_empty() {
        let _ = file_tx.send(batch);
    }
}

/// Scan a directory for the parallel walker.
/// Pushes subdirectories to the work queue and collects records in a batch.
fn scan_dir_parallel(
    root: &Path,
    dir: &Path,
    depth: usize,
    work_tx: &channel::Sender<(PathBuf, usize)>,
    batch: &mut Vec<ScanRecord>,
    ctx: &ScanContext,
    pending: &AtomicUsize,
) -> Result<()> {
    let rd = match read_dir(dir) {
        Ok(rd) => rd,
        Err(e) => {
            warn!("[walk] read_dir({:?}) failed: {e}", dir);
            return Ok(());
        }
    };

    for entry_res in rd {
        let entry = match entry_res {
            Ok(e) => e,
            Err(e) => {
                warn!("[walk] error reading entry in {:?}: {e}", dir);
                continue;
            }
        };

        match inspect_fs_entry(root, &entry, ctx) {
            Ok(Some((outcome, full_path))) => {
                if should_recurse(&outcome) && ctx.max_depth.is_none_or(|max| depth < max) {
                    pending.fetch_add(1, Ordering::AcqRel);
                    let _ = work_tx.send((full_path, depth + 1));
                }
                batch.push(outcome);
            }
            Ok(None) => {}
            Err(e) => warn!("[walk] inspect_entry error in {:?}: {e}", dir),
        }
    }

    Ok(())
}

fn should_recurse(r: &ScanRecord) -> bool {
    r.is_dir && !r.is_symlink
}

/// Joins path components with `/`, regardless of the host platform's native separator.
fn to_rel_unix_path(root: &Path, full: &Path) -> Option<String> {
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

fn inspect_fs_entry(
    root: &Path,
    entry: &fs::DirEntry,
    ctx: &ScanContext,
) -> Result<Option<(ScanRecord, PathBuf)>> {
    let metadata = entry.metadata()?;
    let full_path = entry.path();

    let is_dir = metadata.is_dir();
    let is_symlink = metadata.is_symlink();
    let is_file = metadata.is_file();
    let is_special = !is_dir && !is_symlink && !is_file;

    let name_os = entry.file_name();
    let name = match name_os.to_str() {
        Some(s) => s,
        None => return Ok(None),
    };

    let hidden = name.starts_with('.');
    if hidden && ctx.skip_hidden {
        return Ok(None);
    }

    if ctx.trash.is_in_trash(&full_path) {
        return Ok(None);
    }

    if ctx.ignore.is_ignored(&full_path, is_dir) {
        return Ok(None);
    }

    if ctx.user_excludes.is_excluded(&full_path) {
        return Ok(None);
    }

    let rel_path = match to_rel_unix_path(root, &full_path) {
        Some(p) => p,
        None => return Ok(None),
    };

    Ok(Some((
        ScanRecord {
            rel_path,
            is_dir,
            is_symlink,
            is_special,
        },
        full_path,
    )))
}

#[cfg(test)]
#[path = "walker_tests.rs"]
mod tests;
