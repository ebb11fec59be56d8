//! Query-time fuzzy search core: path index, scorer, selector, and the
//! `search()`/`apply_watch_events()` glue that wires them together.
//!
//! No I/O happens in this crate: directory scanning, cache persistence, and
//! real OS watcher backends are ambient collaborators layered on top (see
//! the `sniff-fs` and `sniff-indexer` crates).

mod engine;
mod path_index;
mod query;
mod scorer;
mod selector;
mod watch;

pub use engine::{SearchEngine, SearchHit};
pub use path_index::{Entry, EntryId, PathIndex};
pub use query::Query;
pub use scorer::{MatchResult, MAX_LEN, Scorer, is_subsequence};
pub use selector::{CAPACITY, Candidate, Selector};
pub use watch::{WatchEvent, WatchEventKind, apply_watch_events};
