//! Fakes for the host traits and a harness that runs source text end to end.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use lash_ir::{ErrorKind, ExprRef, LashError, Location};
use lash_transform::Pipeline;
use rustc_hash::FxHashMap;

use crate::host::{ExecOutput, ExecRequest, OsHandler, ProcessRunner, SourceLoader, StreamMode};
use crate::{buffer_handler, global_scope, EvalResult, Interpreter, Scope, SharedPrintHandler};

pub(crate) const CWD: &str = "/work";

/// A unix-like host whose `PATH` directories hold a fixed set of programs.
pub(crate) struct FakeOs;

impl OsHandler for FakeOs {
    fn load_env(&self) -> Vec<(String, String)> {
        vec![
            ("HOME".to_string(), "/home/tester".to_string()),
            ("PATH".to_string(), "/bin".to_string()),
        ]
    }

    fn path_var(&self) -> String {
        "/bin".to_string()
    }

    fn scan_path(&self, path: &str) -> Vec<(String, PathBuf)> {
        path.split(':')
            .flat_map(|dir| {
                let programs: &[&str] = match dir {
                    "/bin" => &["greet", "fail"],
                    "/opt/bin" => &["tool"],
                    _ => &[],
                };
                programs
                    .iter()
                    .map(move |name| (name.to_string(), Path::new(dir).join(name)))
            })
            .collect()
    }
}

/// Records every request. Programs print `ran <program> <args>` to stdout;
/// `/bin/fail` exits with 3 and `/bin/crash` dies without an exit code.
#[derive(Default)]
pub(crate) struct RecordingRunner {
    pub requests: RefCell<Vec<ExecRequest>>,
}

impl ProcessRunner for RecordingRunner {
    fn run(&self, request: &ExecRequest) -> Result<ExecOutput, String> {
        self.requests.borrow_mut().push(request.clone());
        if request.program == "/bin/crash" {
            return Err("Execution of shell command failed.".to_string());
        }
        let printed = format!("ran {} {}", request.program, request.args.join(" "));
        let keep = |mode: StreamMode, text: &str| (mode == StreamMode::Keep).then(|| text.to_string());
        Ok(ExecOutput {
            stdout: keep(request.out, printed.trim_end()),
            stderr: keep(request.err, "warning"),
            code: if request.program == "/bin/fail" { 3 } else { 0 },
        })
    }
}

/// Source files held in memory and run through the real front end.
#[derive(Default)]
pub(crate) struct MemoryLoader {
    files: FxHashMap<PathBuf, String>,
    pub loads: RefCell<Vec<PathBuf>>,
}

impl MemoryLoader {
    pub(crate) fn with(files: &[(&str, &str)]) -> Self {
        MemoryLoader {
            files: files
                .iter()
                .map(|(path, source)| (PathBuf::from(path), (*source).to_string()))
                .collect(),
            loads: RefCell::default(),
        }
    }
}

pub(crate) fn compile(source: &str, file: &str) -> Result<Vec<ExprRef>, LashError> {
    let tokens = lash_lexer::lex(source, file)?;
    let forms = lash_parse::parse(&tokens)?;
    let forms = Pipeline::standard().transform_all(&forms)?;
    Ok(forms.into_iter().filter(|form| !form.is_noop()).collect())
}

impl SourceLoader for MemoryLoader {
    fn load_file(&self, path: &Path, loc: &Location) -> Result<Vec<ExprRef>, LashError> {
        self.loads.borrow_mut().push(path.to_path_buf());
        let source = self
            .files
            .get(path)
            .ok_or_else(|| loc.fail(ErrorKind::Runtime, format!("Cannot read {}", path.display())))?;
        compile(source, &path.to_string_lossy())
    }
}

/// An interpreter wired to the fakes, with a shell on top of a fake environment.
pub(crate) struct Harness {
    pub interpreter: Interpreter,
    pub shell: Scope,
    pub top: Scope,
    pub runner: Rc<RecordingRunner>,
    pub loader: Rc<MemoryLoader>,
    pub print: SharedPrintHandler,
}

impl Harness {
    pub(crate) fn new() -> Self {
        Harness::with_files(&[])
    }

    pub(crate) fn with_files(files: &[(&str, &str)]) -> Self {
        let runner = Rc::new(RecordingRunner::default());
        let loader = Rc::new(MemoryLoader::with(files));
        let print = buffer_handler();
        let interpreter = Interpreter::builder()
            .process_runner(runner.clone())
            .source_loader(loader.clone())
            .print_handler(print.clone())
            .build();
        let shell = global_scope()
            .environment(Rc::new(FakeOs), Path::new(CWD))
            .shell();
        let top = shell.child();
        Harness {
            interpreter,
            shell,
            top,
            runner,
            loader,
            print,
        }
    }

    pub(crate) fn eval(&self, source: &str) -> EvalResult {
        let forms = compile(source, "test")?;
        self.interpreter.evaluate_all(&forms, &self.top)
    }

    pub(crate) fn error(&self, source: &str) -> LashError {
        self.eval(source).expect_err("expected evaluation to fail")
    }

    pub(crate) fn cwd(&self) -> PathBuf {
        self.top.cwd(&Location::builtin()).unwrap()
    }
}
