use std::path::PathBuf;

use lash_ir::{Expr, LashError, Location};

use super::import::normalize;
use super::Interpreter;
use crate::{errors, EvalResult, MapValue, Scope, Value};

/// The map a `catch` handler receives: `{message stack name}`.
pub(crate) fn error_record(err: &LashError) -> Value {
    Value::Map(
        [
            ("message", Value::str(err.message.as_str())),
            ("stack", Value::str(err.to_string())),
            ("name", Value::str(err.kind.name())),
        ]
        .into_iter()
        .map(|(k, v)| (Value::from(k), v))
        .collect::<MapValue>(),
    )
}

/// Puts the previous working directory back when dropped, however the
/// scoped `cd` body exits.
struct RestoreCwd<'a> {
    scope: &'a Scope,
    previous: PathBuf,
    loc: &'a Location,
}

impl Drop for RestoreCwd<'_> {
    fn drop(&mut self) {
        if let Err(err) = self.scope.set_cwd(&self.previous, self.loc) {
            tracing::warn!(%err, "could not restore working directory");
        }
    }
}

impl Interpreter {
    /// Body, then the catch handler on failure, then `finally` on every path.
    /// An error raised by `finally` replaces whatever the try produced.
    pub(super) fn eval_try(
        &self,
        body: &Expr,
        catch_name: &str,
        catch_body: &Expr,
        finally_body: &Expr,
        scope: &Scope,
    ) -> EvalResult {
        let outcome = match self.evaluate(body, scope) {
            Err(err) if !catch_body.is_noop() => {
                tracing::debug!(%err, "caught");
                let frame = scope.child();
                frame.bind(catch_name, error_record(&err));
                self.evaluate(catch_body, &frame)
            }
            other => other,
        };
        if !finally_body.is_noop() {
            self.evaluate(finally_body, scope)?;
        }
        outcome
    }

    /// Without a body the change is permanent, which libraries may not do.
    /// With a body the previous directory is restored on every exit.
    pub(super) fn eval_cd(
        &self,
        loc: &Location,
        path: &Expr,
        body: Option<&Expr>,
        scope: &Scope,
    ) -> EvalResult {
        let Value::Str(target) = self.evaluate(path, scope)? else {
            return Err(errors::cd_path_not_string(loc));
        };
        let previous = scope.cwd(loc)?;
        let next = normalize(&previous.join(&*target));

        let Some(body) = body else {
            if scope.in_library() {
                return Err(errors::global_cd_in_library(loc));
            }
            scope.set_cwd(&next, loc)?;
            return Ok(Value::Null);
        };

        scope.set_cwd(&next, loc)?;
        let _restore = RestoreCwd {
            scope,
            previous,
            loc,
        };
        self.evaluate(body, scope)
    }
}
