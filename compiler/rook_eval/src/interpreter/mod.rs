//! Tree-walking interpreter for Rook.
//!
//! # Architecture
//!
//! All evaluation goes through [`Interpreter::evaluate`], which checks the
//! cancellation token, grows the native stack when needed and dispatches on
//! the closed [`NodeKind`] sum. Each node produces exactly one signal: a
//! value, or a [`ControlAction`] (error, break, continue, return) that the
//! enclosing constructs either consume or pass outward with `?`.
//!
//! The direct children of a program or block are *statements*; they get an
//! execution stack frame and are the only nodes breakpoints can match.
//!
//! Helper modules in `crate::exec` hold the construct logic that does not
//! need the interpreter itself:
//!
//! - `exec::control` - loop signals, if/else, switch case selection
//! - `exec::pipe` - pipe stage shapes
//! - `exec::template` - string template assembly
//!
//! # Scopes
//!
//! Blocks do not open scopes. Function calls open a `call` scope under the
//! function's defining scope; loops open a `for` scope for loop-carried state
//! and a `for-loop` scope that is cleared before every iteration.

mod builder;
mod calls;
mod expressions;
mod loops;
mod pipe;
mod statements;

pub use builder::{InterpreterBuilder, DEFAULT_MAX_CALL_DEPTH};

use rook_ir::{ControlKind, NodeArena, NodeId, NodeKind, StringInterner};
use rook_stack::ensure_sufficient_stack;
use rook_value::errors::{cancelled, control_outside_loop, not_iterable};
use rook_value::{ControlAction, EvalError, EvalResult, Executor, ScopeId, Value};

use crate::breakpoint::{BreakpointTable, Debugger};
use crate::builtins::BuiltinRegistry;
use crate::cancel::CancelToken;
use crate::diagnostics::{CallStack, ExecStack};
use crate::environment::{Environment, Mutability};
use crate::exec::control::eval_if;
use crate::importer::Importer;
use crate::print_handler::SharedPrintHandler;

/// Tree-walking interpreter over one node arena.
pub struct Interpreter<'a> {
    pub(crate) interner: &'a StringInterner,
    pub(crate) arena: &'a NodeArena,
    pub(crate) env: Environment,
    /// Read-only during evaluation.
    pub(crate) builtins: BuiltinRegistry,
    /// Read-only during evaluation.
    pub(crate) breakpoints: BreakpointTable,
    pub(crate) debugger: Box<dyn Debugger>,
    /// `None` disables `import`.
    pub(crate) importer: Option<Box<dyn Importer>>,
    pub(crate) cancel: CancelToken,
    pub(crate) print_handler: SharedPrintHandler,
    /// User function calls, for the depth limit and error backtraces.
    pub(crate) call_stack: CallStack,
    /// Executing statements, for breakpoint traces.
    pub(crate) exec_stack: ExecStack,
}

impl<'a> Interpreter<'a> {
    /// An interpreter with the default configuration.
    pub fn new(interner: &'a StringInterner, arena: &'a NodeArena) -> Self {
        InterpreterBuilder::new(interner, arena).build()
    }

    /// Run a program in the root scope.
    ///
    /// A top-level `return` ends the program with its value; `break` or
    /// `continue` outside a loop is an error.
    pub fn run(&mut self, program: NodeId) -> Result<Value, EvalError> {
        let root = self.env.root();
        tracing::debug!(?program, "run");
        consume_return(self.evaluate(program, root))
    }

    /// Evaluate `node` in `scope`.
    ///
    /// Checks cancellation first, so a cancelled run stops before the next
    /// node has any effect. Errors get this node's position unless an inner
    /// node already supplied one.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn evaluate(&mut self, node: NodeId, scope: ScopeId) -> EvalResult {
        let pos = self.arena.pos(node);
        if self.cancel.is_cancelled() {
            tracing::debug!(?node, "evaluation cancelled");
            return Err(ControlAction::from(cancelled()).or_position(pos));
        }
        ensure_sufficient_stack(|| self.eval_inner(node, scope)).map_err(|a| a.or_position(pos))
    }

    fn eval_inner(&mut self, node: NodeId, scope: ScopeId) -> EvalResult {
        let arena = self.arena;
        match arena.kind(node) {
            NodeKind::Program { statements } => {
                consume_return(self.eval_statements(statements, scope)).map_err(ControlAction::from)
            }
            NodeKind::Block { statements } => self.eval_statements(statements, scope),

            // Literals
            NodeKind::Nil => Ok(Value::Nil),
            NodeKind::Bool(b) => Ok(Value::Bool(*b)),
            NodeKind::Int(n) => Ok(Value::Int(*n)),
            NodeKind::Float(f) => Ok(Value::Float(*f)),
            NodeKind::Str(literal) => self.eval_string(literal, scope),
            NodeKind::List(items) => self.eval_list(items, scope),
            NodeKind::Map(entries) => self.eval_map(entries, scope),
            NodeKind::Set(items) => self.eval_set(items, scope),

            // Names and access
            NodeKind::Ident(name) => self.eval_ident(*name, scope),
            NodeKind::Index { object, index } => {
                let object = self.evaluate(*object, scope)?;
                let index = self.evaluate(*index, scope)?;
                Ok(object.index(&index)?)
            }
            NodeKind::Slice { object, low, high } => self.eval_slice(*object, *low, *high, scope),
            NodeKind::GetAttr { object, attr } => self.eval_get_attr(*object, *attr, scope),

            // Operators
            NodeKind::Prefix { op, operand } => {
                let operand = self.evaluate(*operand, scope)?;
                Ok(rook_value::evaluate_prefix(*op, &operand)?)
            }
            NodeKind::Postfix { op, target } => self.eval_postfix(*op, *target, scope),
            NodeKind::Infix { op, left, right } => self.eval_infix(*op, *left, *right, scope),
            NodeKind::Ternary {
                condition,
                if_true,
                if_false,
            } => eval_if(*condition, *if_true, Some(*if_false), |n| {
                self.evaluate(n, scope)
            }),
            NodeKind::In { item, container } => {
                let item = self.evaluate(*item, scope)?;
                let container = self.evaluate(*container, scope)?;
                Ok(Value::Bool(container.contains(&item)?))
            }

            // Declarations and assignment
            NodeKind::Var { name, value } => {
                self.eval_declaration(*name, *value, Mutability::Mutable, scope)
            }
            NodeKind::Const { name, value } => {
                self.eval_declaration(*name, *value, Mutability::Constant, scope)
            }
            NodeKind::MultiVar { names, value } => self.eval_multi_var(names, *value, scope),
            NodeKind::Assign { target, op, value } => {
                self.eval_assign(target, *op, *value, scope)
            }
            NodeKind::Import { module, alias } => self.eval_import(*module, *alias, scope),

            // Functions
            NodeKind::Func(literal) => self.eval_function_literal(literal, scope),
            NodeKind::Call { callee, args } => self.eval_call(node, *callee, args, scope),
            NodeKind::ObjectCall {
                object,
                method,
                args,
            } => self.eval_method_call(node, *object, *method, args, None, scope),

            // Control flow
            NodeKind::If {
                condition,
                consequence,
                alternative,
            } => eval_if(*condition, *consequence, *alternative, |n| {
                self.evaluate(n, scope)
            }),
            NodeKind::For(for_loop) => self.eval_for(for_loop, scope),
            NodeKind::Switch { subject, cases } => self.eval_switch(*subject, cases, scope),
            NodeKind::Pipe { stages } => self.eval_pipe(stages, scope),
            NodeKind::Control(kind) => self.eval_control(*kind, scope),
            NodeKind::Range { container } => {
                let container = self.evaluate(*container, scope)?;
                range_iterator(container)
            }
        }
    }

    fn eval_control(&mut self, kind: ControlKind, scope: ScopeId) -> EvalResult {
        match kind {
            ControlKind::Break => Err(ControlAction::Break),
            ControlKind::Continue => Err(ControlAction::Continue),
            ControlKind::Return(None) => Err(ControlAction::Return(Value::Nil)),
            ControlKind::Return(Some(value)) => {
                let value = self.evaluate(value, scope)?;
                Err(ControlAction::Return(value))
            }
        }
    }

    /// Bind `name` in the root scope, e.g. to hand values to a script.
    pub fn declare_global(&mut self, name: &str, value: Value) -> Result<(), EvalError> {
        let root = self.env.root();
        let name = self.interner.intern(name);
        self.declare(root, name, value, Mutability::Mutable)
    }

    /// Value of `name` in the root scope, if bound.
    pub fn global(&self, name: &str) -> Option<Value> {
        let name = self.interner.get(name)?;
        self.env.lookup(self.env.root(), name).ok()
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn env_mut(&mut self) -> &mut Environment {
        &mut self.env
    }

    pub fn builtins(&self) -> &BuiltinRegistry {
        &self.builtins
    }

    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    pub fn interner(&self) -> &'a StringInterner {
        self.interner
    }
}

/// Settle a program or function body: `return` yields its value, a stray
/// `break` or `continue` becomes an error.
pub(crate) fn consume_return(result: EvalResult) -> Result<Value, EvalError> {
    match result {
        Ok(value) | Err(ControlAction::Return(value)) => Ok(value),
        Err(ControlAction::Error(err)) => Err(err),
        Err(ControlAction::Break) => Err(control_outside_loop("break")),
        Err(ControlAction::Continue) => Err(control_outside_loop("continue")),
    }
}

/// `range x`: an iterator over a container, or `x` itself if it already is one.
fn range_iterator(container: Value) -> EvalResult {
    match container {
        Value::Iter(_) => Ok(container),
        other => other
            .iter()
            .map(Value::Iter)
            .ok_or_else(|| not_iterable(other.type_name()).into()),
    }
}

impl Executor for Interpreter<'_> {
    fn call(&mut self, func: &Value, args: Vec<Value>) -> EvalResult {
        let call_pos = self
            .exec_stack
            .top()
            .map_or(rook_ir::Position::UNKNOWN, |frame| frame.pos);
        self.apply_function(func, args, call_pos)
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    fn print(&self, line: &str) {
        self.print_handler.println(line);
    }
}
