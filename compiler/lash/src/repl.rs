//! The interactive loop.
//!
//! Prints the working directory, reads a line after the `λ ` prompt and
//! evaluates it. Errors are printed and the loop carries on; `(exit)` or
//! end of input stops it.

use std::env;
use std::path::PathBuf;

use lash_eval::Value;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::Session;

const PROMPT: &str = "λ ";

/// `LASH_HISTORY`, or `.lash_history` in the home directory.
fn history_path() -> Option<PathBuf> {
    if let Some(path) = env::var_os("LASH_HISTORY") {
        return Some(PathBuf::from(path));
    }
    env::var_os("HOME")
        .or_else(|| env::var_os("USERPROFILE"))
        .map(|home| PathBuf::from(home).join(".lash_history"))
}

/// How a stored result is shown: `$result0: value`. Multi-line strings
/// start on their own line.
pub fn render_result(name: &str, value: &Value) -> String {
    match value.as_str() {
        Some(text) if text.contains('\n') => format!("${name}:\n{text}"),
        Some(text) => format!("${name}: {text}"),
        None => format!("${name}: {value}"),
    }
}

pub fn run(session: &Session) -> Result<(), ReadlineError> {
    let mut editor = DefaultEditor::new()?;
    let history = history_path();
    if let Some(path) = &history {
        if editor.load_history(path).is_err() {
            tracing::debug!(path = %path.display(), "no history loaded");
        }
    }

    while !session.exit_requested() {
        println!();
        println!("{}", session.cwd().display());
        let line = match editor.readline(PROMPT) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err),
        };
        if !line.trim().is_empty() {
            editor.add_history_entry(line.as_str())?;
        }
        match session.eval_line(&line) {
            Ok(Some((name, value))) => println!("{}", render_result(&name, &value)),
            Ok(None) => {}
            Err(err) => println!("{err}"),
        }
    }

    if let Some(path) = &history {
        if let Err(err) = editor.save_history(path) {
            tracing::warn!(path = %path.display(), %err, "could not save history");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn results_render_with_their_name() {
        assert_eq!(render_result("result0", &Value::Number(3.0)), "$result0: 3");
        assert_eq!(
            render_result("result1", &Value::from("a\nb")),
            "$result1:\na\nb"
        );
        assert_eq!(
            render_result("result2", &Value::list([Value::from("x")])),
            "$result2: [\"x\"]"
        );
    }
}
