//! Hand-rolled argument parsing for the `sniff` CLI surface.
//!
//! A strict options parser (`clap`, `pico-args`, …) would reject unrecognized
//! flags outright. The surface requires the opposite: unknown arguments are
//! silently ignored, and the first two positionals win regardless of where
//! they appear among the flags, so parsing is done by hand.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub help: bool,
    pub json: bool,
    pub limit: Option<usize>,
    pub directory: Option<String>,
    pub query: Option<String>,
}

impl Args {
    /// Parses `argv` (excluding `argv[0]`), per §6.3: `--help`, `--json`,
    /// `--limit N` are recognized flags; the first positional seen becomes
    /// `directory`, the second becomes `query`; everything else (including
    /// a malformed `--limit` with no following number, or a stray flag) is
    /// silently ignored.
    pub fn parse<I, S>(argv: I) -> Args
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut help = false;
        let mut json = false;
        let mut limit = None;
        let mut positionals: Vec<String> = Vec::new();

        let mut iter = argv.into_iter().map(|s| s.as_ref().to_string());
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--help" | "-h" => help = true,
                "--json" => json = true,
                "--limit" => {
                    if let Some(n) = iter.next().and_then(|v| v.parse::<usize>().ok()) {
                        limit = Some(n);
                    }
                }
                _ if arg.starts_with("--limit=") => {
                    if let Ok(n) = arg["--limit=".len()..].parse::<usize>() {
                        limit = Some(n);
                    }
                }
                _ if arg.starts_with('-') => {
                    // Unrecognized flag: silently ignored.
                }
                _ => positionals.push(arg),
            }
        }

        let mut positionals = positionals.into_iter();
        Args {
            help,
            json,
            limit,
            directory: positionals.next(),
            query: positionals.next(),
        }
    }
}

pub const USAGE: &str = "\
Usage: sniff [--json] [--limit N] [--help] <directory> [query]

  --json        JSON-line protocol mode, stdin-driven, no interactive prompt
  --limit N     cap the number of reported results
  --help        print this message and exit

With no query: interactive mode (or JSON mode with --json).
With a query: one-shot search, printing `path (score: N)` lines.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_two_positionals_win_regardless_of_flag_placement() {
        let args = Args::parse(["--json", "/some/dir", "--limit", "5", "needle"]);
        assert_eq!(args.directory.as_deref(), Some("/some/dir"));
        assert_eq!(args.query.as_deref(), Some("needle"));
        assert!(args.json);
        assert_eq!(args.limit, Some(5));
    }

    #[test]
    fn unrecognized_arguments_are_silently_ignored() {
        let args = Args::parse(["--bogus", "/dir", "--also-bogus", "query", "--trailing"]);
        assert!(!args.help);
        assert!(!args.json);
        assert_eq!(args.directory.as_deref(), Some("/dir"));
        assert_eq!(args.query.as_deref(), Some("query"));
    }

    #[test]
    fn third_positional_is_dropped() {
        let args = Args::parse(["/dir", "query", "extra"]);
        assert_eq!(args.directory.as_deref(), Some("/dir"));
        assert_eq!(args.query.as_deref(), Some("query"));
    }

    #[test]
    fn help_flag_is_recognized_anywhere() {
        let args = Args::parse(["/dir", "--help", "query"]);
        assert!(args.help);
    }

    #[test]
    fn limit_without_a_following_number_is_ignored() {
        let args = Args::parse(["/dir", "--limit"]);
        assert_eq!(args.limit, None);
        assert_eq!(args.directory.as_deref(), Some("/dir"));
    }

    #[test]
    fn limit_equals_form_is_accepted() {
        let args = Args::parse(["/dir", "--limit=3"]);
        assert_eq!(args.limit, Some(3));
    }

    #[test]
    fn no_arguments_yields_all_defaults() {
        let args = Args::parse(Vec::<String>::new());
        assert_eq!(args, Args {
            help: false,
            json: false,
            limit: None,
            directory: None,
            query: None,
        });
    }
}
