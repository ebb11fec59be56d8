//! JSON-stdio mode: one query per line on stdin, one NDJSON event per line on
//! stdout, per §6.2.

use std::io::{self, BufRead, Write};

use sniff_protocol::{Event, ResultHit, strip_trailing_cr};

use crate::session::Session;

pub fn run(mut session: Session) {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    emit(
        &mut out,
        &Event::Ready {
            files: session.stats.file_count,
            index_time_ms: session.index_time_ms,
        },
    );

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        let query = strip_trailing_cr(&line);
        if query.is_empty() {
            continue;
        }

        let (hits, search_time_ms) = session.search(query);
        let results = hits
            .into_iter()
            .map(|h| ResultHit {
                path: h.path,
                score: h.score,
                positions: h.positions,
            })
            .collect();

        emit(
            &mut out,
            &Event::Results {
                query: query.to_string(),
                search_time_ms,
                results,
            },
        );
    }
}

fn emit(out: &mut impl Write, event: &Event) {
    let _ = writeln!(out, "{}", event.to_line());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ready_event_is_one_json_line() {
        let mut buf = Vec::new();
        emit(
            &mut buf,
            &Event::Ready {
                files: 3,
                index_time_ms: 1,
            },
        );
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "{\"type\":\"ready\",\"files\":3,\"indexTime\":1}\n");
    }
}
