//! Shared setup used by all three CLI modes: resolve the directory argument,
//! build the index (cache-or-scan), and wrap a `SearchEngine` plus the
//! optional history store around it.

use std::path::{Path, PathBuf};
use std::time::Instant;

use sniff_engine::SearchEngine;
use sniff_indexer::IndexStats;
use sniff_runtime::history::{HistoryStore, QueryEvent};

pub struct Session {
    pub engine: SearchEngine,
    pub stats: IndexStats,
    pub index_time_ms: u64,
    history: Option<HistoryStore>,
}

/// Resolves a directory argument to a canonical, existing directory path.
/// Per §7's user-input error category, an empty or unresolvable directory
/// is reported to the caller rather than treated as a fatal error.
pub fn resolve_directory(raw: Option<&str>) -> Result<PathBuf, String> {
    let raw = raw.filter(|s| !s.is_empty()).ok_or_else(|| "no directory given".to_string())?;
    let path = Path::new(raw);
    path.canonicalize()
        .map_err(|e| format!("cannot resolve directory {raw:?}: {e}"))
        .and_then(|p| {
            if p.is_dir() {
                Ok(p)
            } else {
                Err(format!("not a directory: {raw:?}"))
            }
        })
}

impl Session {
    pub fn open(root: &Path) -> Result<Session, String> {
        let mut engine = SearchEngine::new();
        let start = Instant::now();
        let stats = sniff_indexer::index_directory(root, engine.index_mut())
            .map_err(|e| format!("failed to index {root:?}: {e:#}"))?;
        let index_time_ms = start.elapsed().as_millis() as u64;

        Ok(Session {
            engine,
            stats,
            index_time_ms,
            history: HistoryStore::new(),
        })
    }

    pub fn search(&mut self, query: &str) -> (Vec<sniff_engine::SearchHit>, u64) {
        let start = Instant::now();
        let hits = self.engine.search(query);
        let elapsed_ms = start.elapsed().as_millis() as u64;

        if let Some(history) = &self.history {
            history.log_query(QueryEvent::new(query.to_string(), hits.len(), elapsed_ms as u32));
        }

        (hits, elapsed_ms)
    }

    pub fn recent_queries(&self, limit: usize) -> Vec<QueryEvent> {
        self.history
            .as_ref()
            .map(|h| h.recent_queries(limit))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn empty_directory_argument_is_reported_as_an_error() {
        assert!(resolve_directory(None).is_err());
        assert!(resolve_directory(Some("")).is_err());
    }

    #[test]
    fn unresolvable_directory_is_reported_as_an_error() {
        assert!(resolve_directory(Some("/no/such/path/at/all")).is_err());
    }

    #[test]
    fn resolving_a_file_path_instead_of_a_directory_is_an_error() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("f.txt");
        std::fs::write(&file, b"x").unwrap();
        assert!(resolve_directory(Some(file.to_str().unwrap())).is_err());
    }

    #[test]
    fn resolving_a_real_directory_succeeds() {
        let dir = tempdir().unwrap();
        let resolved = resolve_directory(Some(dir.path().to_str().unwrap())).unwrap();
        assert!(resolved.is_dir());
    }
}
