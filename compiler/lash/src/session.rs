use std::cell::Cell;
use std::env;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use lash_eval::host::{OsHandler, ProcessRunner, SourceLoader};
use lash_eval::{
    global_scope, stdout_handler, EvalResult, Interpreter, Scope, SharedPrintHandler, Value,
};
use lash_ir::{LashError, Location};

use crate::os::default_os;
use crate::{FileLoader, ThreadedProcessRunner};

/// One running shell: a Global, Environment and Shell scope plus the local
/// frame REPL lines are evaluated in.
pub struct Session {
    interpreter: Interpreter,
    loader: Rc<FileLoader>,
    shell: Scope,
    top: Scope,
    lines: Cell<usize>,
}

/// Builder for [`Session`]. Anything left unset talks to the real host.
#[derive(Default)]
pub struct SessionBuilder {
    os: Option<Rc<dyn OsHandler>>,
    runner: Option<Rc<dyn ProcessRunner>>,
    print: Option<SharedPrintHandler>,
    cwd: Option<PathBuf>,
}

impl SessionBuilder {
    #[must_use]
    pub fn os(mut self, os: Rc<dyn OsHandler>) -> Self {
        self.os = Some(os);
        self
    }

    #[must_use]
    pub fn process_runner(mut self, runner: Rc<dyn ProcessRunner>) -> Self {
        self.runner = Some(runner);
        self
    }

    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print = Some(handler);
        self
    }

    /// Starting directory. Defaults to the process's working directory.
    #[must_use]
    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn build(self) -> Session {
        let loader = Rc::new(FileLoader::new());
        let runner: Rc<dyn ProcessRunner> = match self.runner {
            Some(runner) => runner,
            None => Rc::new(ThreadedProcessRunner),
        };
        let interpreter = Interpreter::builder()
            .source_loader(loader.clone())
            .process_runner(runner)
            .print_handler(self.print.unwrap_or_else(stdout_handler))
            .build();
        let cwd = self.cwd.unwrap_or_else(|| {
            env::current_dir().unwrap_or_else(|err| {
                tracing::warn!(%err, "working directory unavailable, using /");
                PathBuf::from("/")
            })
        });
        let os = self.os.unwrap_or_else(default_os);
        let shell = global_scope().environment(os, &cwd).shell();
        let top = shell.child();
        Session {
            interpreter,
            loader,
            shell,
            top,
            lines: Cell::new(0),
        }
    }
}

impl Session {
    pub fn builder() -> SessionBuilder {
        SessionBuilder::default()
    }

    /// Evaluate one REPL line.
    ///
    /// A result other than `null` or the empty string is stored as the next
    /// `resultN`, and the name is returned with it.
    pub fn eval_line(&self, line: &str) -> Result<Option<(String, Value)>, LashError> {
        let index = self.lines.get();
        self.lines.set(index + 1);
        let Some(expr) = self.loader.load_line(line, index)? else {
            return Ok(None);
        };
        let value = self.interpreter.evaluate(&expr, &self.top)?;
        if matches!(&value, Value::Null) || value.as_str() == Some("") {
            return Ok(None);
        }
        Ok(self
            .shell
            .record_result(value.clone())
            .map(|name| (name, value)))
    }

    /// Evaluate a whole file at the shell's top level. Relative paths are
    /// taken from the current directory.
    pub fn run_file(&self, path: &Path) -> EvalResult {
        let path = self.cwd().join(path);
        let loc = Location::new(path.to_string_lossy(), 0, 0);
        let forms = self.loader.load_file(&path, &loc)?;
        self.interpreter.evaluate_all(&forms, &self.top)
    }

    pub fn cwd(&self) -> PathBuf {
        self.top
            .cwd(&Location::builtin())
            .unwrap_or_else(|_| PathBuf::from("/"))
    }

    /// Whether `(exit)` has been called.
    pub fn exit_requested(&self) -> bool {
        self.shell.exit_requested()
    }

    /// The frame REPL lines run in.
    pub fn scope(&self) -> &Scope {
        &self.top
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        self.interpreter.print_handler()
    }
}
