//! `InterpreterBuilder` for choosing the interpreter's collaborators.

use std::rc::Rc;

use super::Interpreter;
use crate::host::{NoProcessRunner, NoSourceLoader, ProcessRunner, SourceLoader};
use crate::{stdout_handler, SharedPrintHandler};

/// Builder for [`Interpreter`].
///
/// Anything left unset gets an inert default: imports and process execution
/// fail with a runtime error, `echo` prints to stdout.
#[derive(Default)]
pub struct InterpreterBuilder {
    loader: Option<Rc<dyn SourceLoader>>,
    runner: Option<Rc<dyn ProcessRunner>>,
    print_handler: Option<SharedPrintHandler>,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        InterpreterBuilder::default()
    }

    /// Set how `import` reads files.
    #[must_use]
    pub fn source_loader(mut self, loader: Rc<dyn SourceLoader>) -> Self {
        self.loader = Some(loader);
        self
    }

    /// Set how `execute` and PATH executables run.
    #[must_use]
    pub fn process_runner(mut self, runner: Rc<dyn ProcessRunner>) -> Self {
        self.runner = Some(runner);
        self
    }

    /// Set where `echo` writes.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    pub fn build(self) -> Interpreter {
        let loader: Rc<dyn SourceLoader> = match self.loader {
            Some(loader) => loader,
            None => Rc::new(NoSourceLoader),
        };
        let runner: Rc<dyn ProcessRunner> = match self.runner {
            Some(runner) => runner,
            None => Rc::new(NoProcessRunner),
        };
        Interpreter {
            loader,
            runner,
            print: self.print_handler.unwrap_or_else(stdout_handler),
        }
    }
}
