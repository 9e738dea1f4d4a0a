//! Function literals, calls and method calls.

use std::sync::Arc;

use rook_ir::{FunctionLiteral, Name, NodeId, Position};
use rook_value::errors::{not_callable, wrong_arg_count};
use rook_value::{ControlAction, EvalResult, FunctionValue, ScopeId, Value};

use super::{consume_return, Interpreter};
use crate::diagnostics::CallFrame;
use crate::environment::Mutability;
use crate::exec::pipe::prepend_arg;

impl Interpreter<'_> {
    /// Build a function value closing over `scope`. Named literals are also
    /// declared in `scope`.
    pub(crate) fn eval_function_literal(
        &mut self,
        literal: &FunctionLiteral,
        scope: ScopeId,
    ) -> EvalResult {
        let defaults = literal
            .params
            .iter()
            .map(|param| param.default.map(|d| self.evaluate(d, scope)).transpose())
            .collect::<Result<Vec<_>, _>>()?;
        self.env.mark_captured(scope);
        let func = Value::function(FunctionValue {
            name: literal.name.map(|n| Arc::from(self.interner.lookup(n))),
            params: literal.params.iter().map(|p| p.name).collect(),
            defaults,
            body: literal.body,
            scope,
        });
        if let Some(name) = literal.name {
            self.declare(scope, name, func.clone(), Mutability::Mutable)?;
        }
        Ok(func)
    }

    /// `callee(args...)`
    pub(crate) fn eval_call(
        &mut self,
        node: NodeId,
        callee: NodeId,
        args: &[NodeId],
        scope: ScopeId,
    ) -> EvalResult {
        let func = self.evaluate(callee, scope)?;
        let args = self.eval_args(args, scope)?;
        let pos = self.arena.pos(node);
        self.apply_function(&func, args, pos)
    }

    /// `object.method(args...)`, with `piped` as a leading argument when the
    /// call is a pipe stage. `object` is evaluated before the arguments and
    /// the method is looked up after them.
    pub(crate) fn eval_method_call(
        &mut self,
        node: NodeId,
        object: NodeId,
        method: Name,
        args: &[NodeId],
        piped: Option<Value>,
        scope: ScopeId,
    ) -> EvalResult {
        let receiver = self.eval_receiver(object, method, scope)?;
        let args = self.eval_args(args, scope)?;
        let args = match piped {
            Some(value) => prepend_arg(value, args),
            None => args,
        };
        let func = self.lookup_attr(receiver, method)?;
        let pos = self.arena.pos(node);
        self.apply_function(&func, args, pos)
    }

    /// Call a function or builtin value.
    pub(crate) fn apply_function(
        &mut self,
        func: &Value,
        args: Vec<Value>,
        call_pos: Position,
    ) -> EvalResult {
        match func {
            Value::Builtin(builtin) => {
                tracing::trace!(builtin = builtin.name(), "call builtin");
                builtin.call(self, args)
            }
            Value::Function(func) => self.call_function(func, args, call_pos),
            other => Err(not_callable(other.type_name()).into()),
        }
    }

    /// Run a user function in a fresh `call` scope under its defining scope.
    ///
    /// The body's `return` is consumed here; `break`/`continue` may not
    /// escape. Errors leaving the body carry a backtrace of the calls active
    /// when they were raised.
    fn call_function(
        &mut self,
        func: &FunctionValue,
        args: Vec<Value>,
        call_pos: Position,
    ) -> EvalResult {
        let got = args.len();
        if got > func.params.len() || got < func.required_params() {
            return Err(wrong_arg_count(func.display_name(), func.params.len(), got).into());
        }
        let mut args = args.into_iter();
        let mut bound = Vec::with_capacity(func.params.len());
        for (param, default) in func.params.iter().zip(&func.defaults) {
            let value = match (args.next(), default) {
                (Some(arg), _) => arg,
                (None, Some(default)) => default.clone(),
                (None, None) => {
                    return Err(wrong_arg_count(func.display_name(), func.params.len(), got).into())
                }
            };
            bound.push((*param, value));
        }

        self.call_stack.push(CallFrame {
            name: func.name.as_deref().map(|n| self.interner.intern(n)),
            call_pos,
        })?;
        tracing::debug!(
            function = func.display_name(),
            depth = self.call_stack.depth(),
            "call"
        );

        let call_scope = self.env.new_child(func.scope, "call");
        let mut result = Ok(Value::Nil);
        for (param, value) in bound {
            if let Err(err) = self.declare(call_scope, param, value, Mutability::Mutable) {
                result = Err(err);
                break;
            }
        }
        if result.is_ok() {
            result = consume_return(self.evaluate(func.body, call_scope));
        }
        let result = result.map_err(|err| {
            let err = err.or_position(call_pos);
            if err.backtrace.is_some() || err.is_cancelled() {
                err
            } else {
                err.with_backtrace(self.call_stack.capture(self.interner))
            }
        });

        self.call_stack.pop();
        self.env.release(call_scope);
        result.map_err(ControlAction::from)
    }
}
