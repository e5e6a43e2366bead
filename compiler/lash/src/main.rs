//! Lash CLI
//!
//! Starts the REPL when run without arguments.

use lash::commands::{lex_file, parse_file, run_file};
use lash::{init_tracing, repl, Session};

fn main() {
    init_tracing();
    let args: Vec<String> = std::env::args().collect();

    let Some(command) = args.get(1) else {
        let session = Session::builder().build();
        if let Err(err) = repl::run(&session) {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
        return;
    };

    match command.as_str() {
        "run" | "lex" | "parse" => {
            let Some(path) = args.get(2) else {
                eprintln!("Usage: lash {command} <file.lash>");
                std::process::exit(1);
            };
            match command.as_str() {
                "run" => run_file(path),
                "lex" => lex_file(path),
                _ => parse_file(path),
            }
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-v" => {
            println!("lash {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            // If it looks like a file path, try to run it
            if std::path::Path::new(command)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("lash"))
            {
                run_file(command);
            } else {
                eprintln!("Unknown command: {command}");
                eprintln!();
                print_usage();
                std::process::exit(1);
            }
        }
    }
}

fn print_usage() {
    println!("lash - a shell with a lisp");
    println!();
    println!("Usage: lash [command] [file]");
    println!();
    println!("Commands:");
    println!("  (none)                Start the interactive shell");
    println!("  run <file.lash>       Evaluate a lash file");
    println!("  lex <file.lash>       Tokenize and display tokens");
    println!("  parse <file.lash>     Display the forms after every transform pass");
    println!("  help                  Show this help message");
    println!("  version               Show version information");
    println!();
    println!("Environment:");
    println!("  RUST_LOG              Enable tracing, e.g. RUST_LOG=lash_eval=debug");
    println!("  LASH_HISTORY          REPL history file (default: ~/.lash_history)");
    println!();
    println!("Examples:");
    println!("  lash");
    println!("  lash run build.lash");
    println!("  lash parse lib.lash");
}
