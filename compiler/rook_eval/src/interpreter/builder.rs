//! `InterpreterBuilder` for creating Interpreter instances with various configurations.

use rook_ir::{NodeArena, StringInterner};
use rook_value::Builtin;

use super::Interpreter;
use crate::breakpoint::{Breakpoint, BreakpointTable, Debugger, LogDebugger};
use crate::builtins::{default_builtins, BuiltinRegistry};
use crate::cancel::CancelToken;
use crate::diagnostics::{CallStack, ExecStack};
use crate::environment::Environment;
use crate::importer::Importer;
use crate::print_handler::{stdout_handler, SharedPrintHandler};

/// Default limit on nested user function calls.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 1000;

/// Builder for creating Interpreter instances.
///
/// Everything set here is fixed for the interpreter's lifetime: the builtin
/// registry and breakpoint table are indexed once in [`build`](Self::build)
/// and only read during evaluation.
pub struct InterpreterBuilder<'a> {
    interner: &'a StringInterner,
    arena: &'a NodeArena,
    env: Option<Environment>,
    default_builtins: bool,
    builtins: Vec<Builtin>,
    breakpoints: Vec<Breakpoint>,
    debugger: Option<Box<dyn Debugger>>,
    importer: Option<Box<dyn Importer>>,
    cancel: Option<CancelToken>,
    print_handler: Option<SharedPrintHandler>,
    max_call_depth: usize,
}

impl<'a> InterpreterBuilder<'a> {
    pub fn new(interner: &'a StringInterner, arena: &'a NodeArena) -> Self {
        Self {
            interner,
            arena,
            env: None,
            default_builtins: true,
            builtins: Vec::new(),
            breakpoints: Vec::new(),
            debugger: None,
            importer: None,
            cancel: None,
            print_handler: None,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }

    /// Start from an existing environment instead of an empty one.
    #[must_use]
    pub fn env(mut self, env: Environment) -> Self {
        self.env = Some(env);
        self
    }

    /// Whether to register `len`, `print` and the other default builtins.
    /// On by default.
    #[must_use]
    pub fn default_builtins(mut self, enabled: bool) -> Self {
        self.default_builtins = enabled;
        self
    }

    /// Add a builtin. Replaces a default or earlier builtin with the same
    /// qualified name.
    #[must_use]
    pub fn builtin(mut self, builtin: Builtin) -> Self {
        self.builtins.push(builtin);
        self
    }

    #[must_use]
    pub fn builtins(mut self, builtins: impl IntoIterator<Item = Builtin>) -> Self {
        self.builtins.extend(builtins);
        self
    }

    /// Later breakpoints replace earlier ones at the same `file:line`.
    #[must_use]
    pub fn breakpoints(mut self, breakpoints: impl IntoIterator<Item = Breakpoint>) -> Self {
        self.breakpoints.extend(breakpoints);
        self
    }

    /// Receiver for breakpoint hits. Defaults to [`LogDebugger`].
    #[must_use]
    pub fn debugger(mut self, debugger: impl Debugger + 'static) -> Self {
        self.debugger = Some(Box::new(debugger));
        self
    }

    /// Module resolution for `import`. Without one, imports fail.
    #[must_use]
    pub fn importer(mut self, importer: impl Importer + 'static) -> Self {
        self.importer = Some(Box::new(importer));
        self
    }

    /// Share a cancellation token with the host.
    #[must_use]
    pub fn cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Where `print` writes. Defaults to stdout.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Maximum nesting of user function calls.
    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    pub fn build(self) -> Interpreter<'a> {
        let mut registry = BuiltinRegistry::new();
        if self.default_builtins {
            for builtin in default_builtins() {
                registry.register(builtin);
            }
        }
        for builtin in self.builtins {
            registry.register(builtin);
        }

        let breakpoints: BreakpointTable = self.breakpoints.into_iter().collect();
        tracing::debug!(
            builtins = registry.len(),
            breakpoints = breakpoints.len(),
            "interpreter built"
        );

        Interpreter {
            interner: self.interner,
            arena: self.arena,
            env: self.env.unwrap_or_default(),
            builtins: registry,
            breakpoints,
            debugger: self.debugger.unwrap_or_else(|| Box::new(LogDebugger)),
            importer: self.importer,
            cancel: self.cancel.unwrap_or_default(),
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
            call_stack: CallStack::new(self.max_call_depth),
            exec_stack: ExecStack::new(),
        }
    }
}
