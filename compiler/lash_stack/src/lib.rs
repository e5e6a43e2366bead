//! Stack safety for deeply nested scripts.
//!
//! Lexing interpolations, parsing, every transform pass and evaluation all
//! recurse on the shape of the source. A script with a few thousand nested
//! forms (or a recursive user function) would overflow the default thread
//! stack, so each recursive entry point wraps itself in
//! [`ensure_sufficient_stack`].
//!
//! # Platform Support
//!
//! - **Native targets**: `stacker` grows the stack on demand.
//! - **WASM targets**: plain passthrough.

/// Grow when less than this remains (100KB).
const RED_ZONE: usize = 100 * 1024;

/// Size of each new stack segment (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, first growing the stack if the remaining space is below the red zone.
///
/// ```text
/// fn evaluate(&self, expr: &Expr, scope: &Scope) -> EvalResult {
///     ensure_sufficient_stack(|| self.eval_inner(expr, scope))
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
