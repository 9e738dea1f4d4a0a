//! Runtime values for the Rook interpreter.
//!
//! This crate holds everything a builtin needs to be written without
//! depending on the evaluator: [`Value`], the error and control-signal types,
//! operator semantics, and the [`Executor`] capability through which a
//! builtin calls back into the interpreter.

pub mod errors;
mod operators;
mod scope_id;
mod value;

pub use errors::{
    BacktraceFrame, ControlAction, EvalBacktrace, EvalError, EvalErrorKind, EvalResult,
};
pub use operators::{evaluate_binary, evaluate_prefix};
pub use scope_id::ScopeId;
pub use value::{
    Builtin, BuiltinFn, FunctionValue, HashKey, IterEntry, IteratorValue, Module, Value,
    ValueIterator,
};

/// What the interpreter offers to builtins while they run.
///
/// Passed as `&mut dyn Executor`, so builtins stay independent of the
/// interpreter's concrete type and lifetimes.
pub trait Executor {
    /// Call a function or builtin value with already evaluated arguments.
    fn call(&mut self, func: &Value, args: Vec<Value>) -> EvalResult;

    /// Whether the current run has been cancelled.
    fn is_cancelled(&self) -> bool;

    /// Emit one line of program output.
    fn print(&self, line: &str);
}
