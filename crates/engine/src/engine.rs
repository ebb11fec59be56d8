//! Wires Query -> Index iteration -> Scorer -> Selector into a single
//! `search()` call, per the core's data-flow contract.

use crate::path_index::PathIndex;
use crate::query::Query;
use crate::scorer::Scorer;
use crate::selector::{Candidate, Selector};

/// One ranked (query, path) match, with positions relative to the full path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub path: String,
    pub score: i32,
    pub positions: Vec<usize>,
}

/// Owns the path index and the scratch state a search needs (the DP
/// matrices), so repeated searches never reallocate them.
#[derive(Default)]
pub struct SearchEngine {
    index: PathIndex,
    scorer: Scorer,
}

impl SearchEngine {
    pub fn new() -> Self {
        SearchEngine {
            index: PathIndex::new(),
            scorer: Scorer::new(),
        }
    }

    pub fn index(&self) -> &PathIndex {
        &self.index
    }

    pub fn index_mut(&mut self) -> &mut PathIndex {
        &mut self.index
    }

    /// Runs one search. Empty queries return an empty slice without visiting
    /// the index at all.
    pub fn search(&mut self, query_str: &str) -> Vec<SearchHit> {
        if query_str.is_empty() {
            return Vec::new();
        }

        let query = Query::new(query_str);
        let mut selector = Selector::new();

        for (id, entry) in self.index.iter_entries() {
            let (text, text_lower, offset) = if query.uses_full_path {
                (entry.path.as_str(), entry.path_lower.as_str(), 0usize)
            } else {
                (
                    entry.basename(),
                    entry.basename_lower(),
                    entry.basename_start as usize,
                )
            };

            let matched = match selector.cutoff() {
                Some(min) => self.scorer.score_with_threshold(
                    query.raw,
                    &query.lower,
                    text,
                    text_lower,
                    min + 1,
                ),
                None => self.scorer.score(query.raw, &query.lower, text, text_lower),
            };

            let Some(matched) = matched else { continue };

            let positions = matched.positions.iter().map(|p| p + offset).collect();
            selector.insert(Candidate {
                entry: id,
                score: matched.score,
                depth: entry.depth,
                basename_len: entry.basename().len() as u32,
                path: entry.path.clone(),
                positions,
            });
        }

        selector
            .finalize()
            .into_iter()
            .map(|c| SearchHit {
                path: c.path,
                score: c.score,
                positions: c.positions,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_with(paths: &[&str]) -> SearchEngine {
        let mut engine = SearchEngine::new();
        for p in paths {
            engine.index_mut().add(p);
        }
        engine
    }

    #[test]
    fn empty_query_returns_no_work() {
        let mut engine = engine_with(&["src/main.rs"]);
        assert!(engine.search("").is_empty());
    }

    #[test]
    fn scenario_main_matches_basename_with_absolute_positions() {
        let mut engine = engine_with(&["src/main.zig", "src/scorer.zig", "docs/README.md"]);
        let hits = engine.search("main");
        assert_eq!(hits[0].path, "src/main.zig");
        assert_eq!(hits[0].positions, vec![4, 5, 6, 7]);
    }

    #[test]
    fn full_path_query_prefers_shallower_path_via_selector_tiebreak() {
        let mut engine = engine_with(&["src/main.zig", "other/src/main.zig"]);
        let hits = engine.search("src/main");
        assert_eq!(hits[0].path, "src/main.zig");
        assert_eq!(hits[1].path, "other/src/main.zig");
    }

    #[test]
    fn removing_top_result_and_rerunning_yields_the_rest_unchanged() {
        let mut engine = engine_with(&["a/main.rs", "b/main.rs", "c/main.rs"]);
        let before = engine.search("main");
        let top_path = before[0].path.clone();

        engine.index_mut().remove(&top_path);
        let after = engine.search("main");

        assert_eq!(after.len(), before.len() - 1);
        assert!(after.iter().all(|h| h.path != top_path));
    }

    #[test]
    fn identical_queries_without_mutation_return_identical_results() {
        let mut engine = engine_with(&["src/main.rs", "src/lib.rs", "docs/main.md"]);
        let first = engine.search("main");
        let second = engine.search("main");
        assert_eq!(first, second);
    }
}
