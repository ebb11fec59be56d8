use std::env;
use std::process::ExitCode;

mod args;
mod modes;
mod session;

use args::{Args, USAGE};
use session::{resolve_directory, Session};
use sniff_protocol::Event;

fn main() -> ExitCode {
    sniff_runtime::init().ok();

    let argv: Vec<String> = env::args().skip(1).collect();
    let args = Args::parse(&argv);

    if args.help {
        println!("{USAGE}");
        return ExitCode::SUCCESS;
    }

    let root = match resolve_directory(args.directory.as_deref()) {
        Ok(root) => root,
        Err(err) => {
            report_error(&args, &err);
            return ExitCode::SUCCESS;
        }
    };

    let session = match Session::open(&root) {
        Ok(session) => session,
        Err(err) => {
            report_error(&args, &err);
            return ExitCode::SUCCESS;
        }
    };

    match args.query.as_deref() {
        Some(query) => modes::oneshot::run(session, query, args.limit),
        None if args.json => modes::json::run(session),
        None => modes::interactive::run(session, args.limit),
    }

    ExitCode::SUCCESS
}

fn report_error(args: &Args, message: &str) {
    if args.json {
        println!(
            "{}",
            Event::Error {
                message: message.to_string(),
            }
            .to_line()
        );
    } else {
        eprintln!("sniff: {message}");
    }
}
