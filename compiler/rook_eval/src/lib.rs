//! Rook Eval - tree-walking evaluator for the Rook scripting language.
//!
//! # Architecture
//!
//! - [`Interpreter`]: recursive dispatch over [`rook_ir::NodeKind`], built
//!   with [`InterpreterBuilder`]
//! - [`Environment`]: arena of lexical scopes addressed by [`ScopeId`]
//! - [`BuiltinRegistry`]: host functions keyed by `name` or `module.name`
//! - [`Breakpoint`] / [`Debugger`]: per-statement breakpoint hook
//! - [`CancelToken`]: cooperative cancellation checked before every node
//!
//! Values, errors and control signals come from `rook_value` and are
//! re-exported here.
//!
//! # Example
//!
//! ```ignore
//! let interner = StringInterner::new();
//! let mut b = TreeBuilder::new(&interner, "main.rk");
//! let one = b.int(1);
//! let program = b.program(vec![one]);
//! let arena = b.finish();
//! let value = Interpreter::new(&interner, &arena).run(program)?;
//! ```

pub mod breakpoint;
pub mod builtins;
mod cancel;
pub mod diagnostics;
pub mod environment;
pub mod errors;
pub mod exec;
mod importer;
pub mod interpreter;
mod print_handler;
mod tracing_init;

pub use breakpoint::{
    Breakpoint, BreakpointHit, BreakpointTable, ConsoleDebugger, Debugger, LogDebugger,
    RecordingDebugger,
};
pub use builtins::{default_builtins, BuiltinRegistry};
pub use cancel::CancelToken;
pub use environment::{Environment, Mutability};
pub use importer::{Importer, ModuleTable};
pub use interpreter::{Interpreter, InterpreterBuilder};
pub use print_handler::{
    buffer_handler, silent_handler, stderr_handler, stdout_handler, BufferPrintHandler,
    PrintHandlerImpl, SharedPrintHandler,
};
pub use tracing_init::init_tracing;

pub use rook_value::{
    Builtin, ControlAction, EvalError, EvalErrorKind, EvalResult, Executor, FunctionValue,
    IterEntry, IteratorValue, Module, ScopeId, Value, ValueIterator,
};
