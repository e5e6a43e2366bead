//! Lash - an interactive shell with a small lisp for a language.
//!
//! The language itself lives in the `lash_*` crates. This crate connects it
//! to a real machine:
//!
//! - [`FileLoader`]: reads source files and REPL lines through the front end
//! - [`os`]: environment variables and `PATH` executables per platform
//! - [`ThreadedProcessRunner`]: spawns child processes for `execute` and
//!   shell functions
//! - [`Session`]: the Global, Environment and Shell scopes of one shell
//! - [`repl`] and [`commands`]: the interactive loop and the CLI commands

pub mod commands;
mod errors;
mod loader;
pub mod os;
mod process;
pub mod repl;
mod session;

use std::sync::Once;

pub use loader::FileLoader;
pub use process::ThreadedProcessRunner;
pub use session::{Session, SessionBuilder};

static TRACING_INIT: Once = Once::new();

/// Install the tracing subscriber.
///
/// Does nothing unless `RUST_LOG` is set, e.g. `RUST_LOG=lash_eval=debug`.
/// Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(EnvFilter::from_default_env())
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    });
}
