//! Centralized error constructors for the evaluator.
//!
//! Every runtime failure goes through one of these factories, so the wording
//! scripts can match on lives in one place.

use lash_ir::{ErrorKind, LashError, Location};

use crate::Value;

pub type EvalResult = Result<Value, LashError>;

#[cold]
fn runtime(loc: &Location, message: impl Into<String>) -> LashError {
    loc.fail(ErrorKind::Runtime, message)
}

// Lookup and calls

#[cold]
pub fn undefined_variable(loc: &Location, name: &str) -> LashError {
    runtime(loc, format!("Undefined variable {name}"))
}

#[cold]
pub fn not_callable(loc: &Location, value: &Value) -> LashError {
    runtime(loc, format!("Not callable. Type is {}", value.type_name()))
}

#[cold]
pub fn macro_as_function(loc: &Location, name: &str) -> LashError {
    runtime(loc, format!("Macro {name} cannot be called with evaluated arguments"))
}

#[cold]
pub fn thrown(loc: &Location, message: String) -> LashError {
    loc.fail(ErrorKind::Thrown, message)
}

// Definitions and exports

#[cold]
pub fn define_outside_module(loc: &Location, name: &str) -> LashError {
    runtime(loc, format!("Cannot define {name} outside of a shell or library"))
}

#[cold]
pub fn export_outside_module(loc: &Location, name: &str) -> LashError {
    runtime(loc, format!("Cannot export {name} outside of a shell or library"))
}

#[cold]
pub fn export_non_string(loc: &Location) -> LashError {
    runtime(loc, "Cannot export anything but a string from the shell")
}

#[cold]
pub fn not_exported(loc: &Location, name: &str) -> LashError {
    runtime(loc, format!("Cannot import {name} as it is not exported"))
}

#[cold]
pub fn import_path_not_string(loc: &Location, found: &Value) -> LashError {
    runtime(
        loc,
        format!(
            "import's last argument expected to be string but found {}",
            found.type_name()
        ),
    )
}

#[cold]
pub fn imports_unavailable(loc: &Location) -> LashError {
    runtime(loc, "Imports are not available in this interpreter")
}

// Environment

#[cold]
pub fn no_environment(loc: &Location) -> LashError {
    runtime(loc, "No environment scope is available here")
}

#[cold]
pub fn cd_path_not_string(loc: &Location) -> LashError {
    runtime(loc, "Expected first argument to cd to be a string")
}

#[cold]
pub fn global_cd_in_library(loc: &Location) -> LashError {
    runtime(
        loc,
        "Cannot use global cd inside a library. Use (cd path body) instead",
    )
}

// Processes

#[cold]
pub fn execute_program_not_string(loc: &Location) -> LashError {
    runtime(
        loc,
        "Expected first argument to execute to be a path to the program to run",
    )
}

#[cold]
pub fn execute_args_not_list(loc: &Location) -> LashError {
    runtime(
        loc,
        "Expected second argument to execute to be a list of arguments to the program",
    )
}

#[cold]
pub fn execute_options_not_map(loc: &Location) -> LashError {
    runtime(loc, "Expected third argument to execute to be a map of flags")
}

#[cold]
pub fn invalid_stream_option(loc: &Location, flag: &str) -> LashError {
    runtime(
        loc,
        format!(
            r#"execute argument "{flag}" is invalid. Valid options are: "ignore", "keep", or "forward""#
        ),
    )
}

#[cold]
pub fn process_failed(loc: &Location, message: String) -> LashError {
    runtime(loc, message)
}

// Builtin arguments

fn count_word(n: usize) -> String {
    match n {
        0 => "no arguments".to_string(),
        1 => "one argument".to_string(),
        2 => "two arguments".to_string(),
        3 => "three arguments".to_string(),
        n => format!("{n} arguments"),
    }
}

/// `"{name} expected exactly two arguments, a list and an index"`.
#[cold]
pub fn wrong_arity(loc: &Location, name: &str, expected: usize, shape: &str) -> LashError {
    let mut message = format!("{name} expected exactly {}", count_word(expected));
    if !shape.is_empty() {
        message.push_str(", ");
        message.push_str(shape);
    }
    runtime(loc, message)
}

#[cold]
pub fn wrong_arity_range(loc: &Location, name: &str, min: usize, max: usize) -> LashError {
    runtime(
        loc,
        format!("{name} expected between {min} and {max} arguments"),
    )
}

/// `"{name} expected first argument to be a list"`.
#[cold]
pub fn wrong_argument(loc: &Location, name: &str, index: usize, expected: &str) -> LashError {
    let ordinal = match index {
        0 => "first",
        1 => "second",
        2 => "third",
        _ => "an",
    };
    runtime(
        loc,
        format!("{name} expected {ordinal} argument to be {expected}"),
    )
}

#[cold]
pub fn index_out_of_range(loc: &Location, name: &str, index: f64, len: usize) -> LashError {
    runtime(
        loc,
        format!(
            "{name} index {} is out of range for a list of size {len}",
            lash_ir::format_number(index)
        ),
    )
}

#[cold]
pub fn incomparable(loc: &Location, name: &str, left: &Value, right: &Value) -> LashError {
    runtime(
        loc,
        format!(
            "{name} expected two numbers or two strings but found {} and {}",
            left.type_name(),
            right.type_name()
        ),
    )
}

#[cold]
pub fn flat_map_result(loc: &Location, name: &str, found: &Value) -> LashError {
    runtime(
        loc,
        format!(
            "{name} expected function to return a list or a seq but found {}",
            found.type_name()
        ),
    )
}

#[cold]
pub fn invalid_json(loc: &Location, reason: &str) -> LashError {
    runtime(loc, format!("parse/json could not parse input: {reason}"))
}

#[cold]
pub fn delete_arity(loc: &Location) -> LashError {
    runtime(loc, "Expected exactly one argument to delete")
}

#[cold]
pub fn delete_not_variable(loc: &Location) -> LashError {
    runtime(loc, "Expected first argument to delete to be a variable")
}
