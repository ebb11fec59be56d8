//! Interactive REPL mode: prompts with `> `, prints `path (score: N)` lines
//! per query. A `:history` command (an interactive-only convenience, not
//! part of the protocol surface) lists recent queries from the history log.

use std::io::{self, BufRead, Write};

use crate::modes::oneshot::print_hits;
use crate::session::Session;

pub fn run(mut session: Session, limit: Option<usize>) {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        let _ = stdout.flush();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).unwrap_or(0) == 0 {
            break;
        }
        let line = line.trim_end_matches(['\n', '\r']);
        if line.is_empty() {
            continue;
        }

        if line == ":history" {
            print_history(&session);
            continue;
        }

        let (hits, _search_time_ms) = session.search(line);
        print_hits(&hits, limit);
    }
}

fn print_history(session: &Session) {
    let recent = session.recent_queries(20);
    if recent.is_empty() {
        println!("(no query history)");
        return;
    }
    for event in recent {
        println!("{} -> {} hits ({} ms)", event.raw_query, event.hits, event.duration_ms);
    }
}
