//! Lash Eval - the runtime of the lash language.
//!
//! This crate provides the tree-walking interpreter that runs the lowered
//! expression trees produced by `lash_transform`.
//!
//! # Architecture
//!
//! - [`Value`]: runtime values; persistent lists and maps, lazy [`SeqValue`]s
//!   and [`Callable`]s
//! - [`Scope`]: the Global, Environment, Shell/Library and Local layers
//! - [`Interpreter`]: evaluation, calls, `try`, `cd`, `import` and `execute`
//! - [`builtins`]: the packs registered into the Global layer
//! - [`host`]: traits for what the interpreter asks of the outside world
//!   (reading sources, running programs, platform specifics)
//!
//! Errors are [`LashError`](lash_ir::LashError)s raised through the factories
//! in [`errors`].

pub mod builtins;
mod callable;
pub mod errors;
pub mod host;
pub mod interpreter;
mod print_handler;
mod scope;
mod seq;
mod value;

#[cfg(test)]
mod test_support;

pub use builtins::{global_scope, global_table};
pub use callable::{CallSite, Callable, Closure, MacroFunction, NativeFunction};
pub use errors::EvalResult;
pub use interpreter::{Interpreter, InterpreterBuilder};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl,
    SharedPrintHandler,
};
pub use scope::Scope;
pub use seq::SeqValue;
pub use value::{MapValue, Value};
