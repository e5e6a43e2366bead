use std::fs;
use std::path::Path;

use lash_eval::host::SourceLoader;
use lash_ir::{Expr, ExprRef, LashError, Location};
use lash_transform::Pipeline;

use crate::errors;

/// Runs source text through the front end: lex, parse and every transform
/// pass. No-op forms are dropped.
pub struct FileLoader {
    pipeline: Pipeline,
}

impl FileLoader {
    pub fn new() -> Self {
        FileLoader {
            pipeline: Pipeline::standard(),
        }
    }

    pub fn with_pipeline(pipeline: Pipeline) -> Self {
        FileLoader { pipeline }
    }

    /// Forms of a whole file, ready to evaluate in order.
    pub fn load_source(&self, source: &str, file: &str) -> Result<Vec<ExprRef>, LashError> {
        let tokens = lash_lexer::lex(source, file)?;
        let forms = lash_parse::parse(&tokens)?;
        let forms = self.pipeline.transform_all(&forms)?;
        Ok(forms.into_iter().filter(|form| !form.is_noop()).collect())
    }

    /// One REPL line as a single expression, or `None` for a blank line.
    ///
    /// The forms of the line become one call with the first form as its
    /// head, so `ls -la` runs `(ls -la)`. A line holding a single form that
    /// is not a bare word is taken as written.
    pub fn load_line(&self, line: &str, index: usize) -> Result<Option<ExprRef>, LashError> {
        let file = format!("repl input {index}");
        let tokens = lash_lexer::lex(line, &file)?;
        let mut forms = lash_parse::parse(&tokens)?;
        let expr = match forms.as_slice() {
            [] => return Ok(None),
            [single] if single.as_word().is_none() => single.clone(),
            [first, ..] => {
                let loc = Location::new(file.as_str(), first.loc.line, first.loc.col);
                let head = forms.remove(0);
                Expr::sexpr(loc, head, forms)
            }
        };
        let expr = self.pipeline.transform(&expr)?;
        Ok((!expr.is_noop()).then_some(expr))
    }
}

impl Default for FileLoader {
    fn default() -> Self {
        FileLoader::new()
    }
}

impl SourceLoader for FileLoader {
    #[tracing::instrument(level = "debug", skip_all, fields(path = %path.display()))]
    fn load_file(&self, path: &Path, loc: &Location) -> Result<Vec<ExprRef>, LashError> {
        let source =
            fs::read_to_string(path).map_err(|err| errors::unreadable_file(loc, path, &err))?;
        self.load_source(&source, &path.to_string_lossy())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use pretty_assertions::assert_eq;

    fn line(source: &str) -> Option<String> {
        FileLoader::new()
            .load_line(source, 0)
            .unwrap()
            .map(|expr| expr.to_string())
    }

    #[test]
    fn blank_lines_load_nothing() {
        assert_eq!(line("   "), None);
    }

    #[test]
    fn words_on_a_line_become_one_call() {
        let loader = FileLoader::new();
        let wrapped = loader.load_line("echo hi 1", 0).unwrap().unwrap();
        let written = loader.load_source("(echo hi 1)", "repl input 0").unwrap();
        assert_eq!(wrapped.to_string(), written[0].to_string());
        assert_eq!(line("ls"), line("(ls)"));
    }

    #[test]
    fn a_single_form_is_taken_as_written() {
        assert_eq!(line("(+ 1 2)"), Some("($+ 1 2)".to_string()));
        assert_eq!(line("$x"), Some("$x".to_string()));
        assert_eq!(line("$f 1"), Some("($f 1)".to_string()));
    }

    #[test]
    fn line_locations_name_the_input() {
        let err = FileLoader::new().load_line("(echo", 7).unwrap_err();
        assert_eq!(err.location.file.as_ref(), "repl input 7");
    }

    #[test]
    fn missing_files_fail_at_the_import_site() {
        let loc = Location::new("main.lash", 2, 3);
        let err = FileLoader::new()
            .load_file(Path::new("/definitely/not/here.lash"), &loc)
            .unwrap_err();
        assert_eq!(
            err.message,
            "Cannot read /definitely/not/here.lash: file not found"
        );
        assert_eq!(err.location, loc);
    }
}
