//! One-shot mode: a single query given on the command line, printed as
//! `path (score: N)` lines, one per result.

use crate::session::Session;

pub fn run(mut session: Session, query: &str, limit: Option<usize>) {
    let (hits, _search_time_ms) = session.search(query);
    print_hits(&hits, limit);
}

pub fn print_hits(hits: &[sniff_engine::SearchHit], limit: Option<usize>) {
    let take = limit.unwrap_or(hits.len());
    for hit in hits.iter().take(take) {
        println!("{} (score: {})", hit.path, hit.score);
    }
}
