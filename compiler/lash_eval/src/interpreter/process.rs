use lash_ir::{Expr, LashError, Location};

use super::Interpreter;
use crate::host::{ExecOutput, ExecRequest, StreamMode};
use crate::{errors, EvalResult, MapValue, Scope, Value};

fn stream_mode(
    options: &MapValue,
    flag: &str,
    default: StreamMode,
    loc: &Location,
) -> Result<StreamMode, LashError> {
    match options.get(&Value::from(flag)) {
        None | Some(Value::Null) => Ok(default),
        Some(value) => value
            .as_str()
            .and_then(StreamMode::parse)
            .ok_or_else(|| errors::invalid_stream_option(loc, flag)),
    }
}

fn optional_text(text: Option<String>) -> Value {
    text.map_or(Value::Null, Value::from)
}

impl Interpreter {
    /// `(execute path [args] {out err})`, returning `{stdout stderr errCode}`.
    pub(super) fn eval_execute(
        &self,
        loc: &Location,
        path: &Expr,
        args: Option<&Expr>,
        options: Option<&Expr>,
        scope: &Scope,
    ) -> EvalResult {
        let Value::Str(program) = self.evaluate(path, scope)? else {
            return Err(errors::execute_program_not_string(loc));
        };
        let args = match args {
            None => Vec::new(),
            Some(args) => match self.evaluate(args, scope)? {
                Value::List(items) => items.iter().map(Value::to_string).collect(),
                _ => return Err(errors::execute_args_not_list(loc)),
            },
        };
        let options = match options {
            None => MapValue::new(),
            Some(options) => match self.evaluate(options, scope)? {
                Value::Map(map) => map,
                _ => return Err(errors::execute_options_not_map(loc)),
            },
        };
        let out = stream_mode(&options, "out", StreamMode::Keep, loc)?;
        let err = stream_mode(&options, "err", StreamMode::Forward, loc)?;

        let output = self.run_program(&program, args, out, err, loc, scope)?;
        Ok(Value::Map(
            MapValue::new()
                .insert(Value::from("stdout"), optional_text(output.stdout))
                .insert(Value::from("stderr"), optional_text(output.stderr))
                .insert(Value::from("errCode"), Value::Number(f64::from(output.code))),
        ))
    }

    /// Run a program in the environment's working directory with its
    /// variables, blocking until it exits.
    pub(crate) fn run_program(
        &self,
        program: &str,
        args: Vec<String>,
        out: StreamMode,
        err: StreamMode,
        loc: &Location,
        scope: &Scope,
    ) -> Result<ExecOutput, LashError> {
        let request = ExecRequest {
            program: program.to_string(),
            args,
            env: scope.process_env(loc)?,
            cwd: scope.cwd(loc)?,
            out,
            err,
        };
        tracing::debug!(program, args = ?request.args, cwd = %request.cwd.display(), "running");
        let output = self
            .runner
            .run(&request)
            .map_err(|message| errors::process_failed(loc, message))?;
        tracing::debug!(program, code = output.code, "finished");
        Ok(output)
    }
}
