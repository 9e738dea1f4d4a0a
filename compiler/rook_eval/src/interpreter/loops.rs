//! `for` in its three forms.
//!
//! Every loop opens a `for` scope (init bindings and other loop-carried
//! state) and inside it a `for-loop` scope for the body, cleared before each
//! iteration. Both are released when the loop ends. A loop evaluates to the
//! last value its body produced, or nil if the body never finished.

use rook_ir::{ForLoop, Name, NodeId};
use rook_value::errors::{invalid_for_binding, not_iterable};
use rook_value::{EvalResult, ScopeId, Value};

use super::Interpreter;
use crate::environment::Mutability;
use crate::exec::control::{to_loop_action, LoopAction};

impl Interpreter<'_> {
    pub(crate) fn eval_for(&mut self, for_loop: &ForLoop, scope: ScopeId) -> EvalResult {
        let for_scope = self.env.new_child(scope, "for");
        let loop_scope = self.env.new_child(for_scope, "for-loop");
        let result = match for_loop {
            ForLoop::Simple { body } => self.eval_simple_loop(*body, loop_scope),
            ForLoop::Iterator {
                names,
                iterable,
                body,
            } => self.eval_iterator_loop(names, *iterable, *body, for_scope, loop_scope),
            ForLoop::Condition {
                init,
                condition,
                post,
                body,
            } => self.eval_condition_loop(*init, *condition, *post, *body, for_scope, loop_scope),
        };
        self.env.release(loop_scope);
        self.env.release(for_scope);
        result
    }

    /// `for { ... }`
    fn eval_simple_loop(&mut self, body: NodeId, loop_scope: ScopeId) -> EvalResult {
        let mut latest = Value::Nil;
        loop {
            self.env.clear(loop_scope);
            match to_loop_action(self.evaluate(body, loop_scope)) {
                LoopAction::Next(value) => latest = value,
                LoopAction::Continue => {}
                LoopAction::Break => return Ok(latest),
                LoopAction::Exit(action) => return Err(action),
            }
        }
    }

    /// `for k := range x { ... }` / `for k, v := range x { ... }`
    ///
    /// The first name binds each entry's key (the index, for lists and
    /// strings), the second its value.
    fn eval_iterator_loop(
        &mut self,
        names: &[Name],
        iterable: NodeId,
        body: NodeId,
        for_scope: ScopeId,
        loop_scope: ScopeId,
    ) -> EvalResult {
        if !(1..=2).contains(&names.len()) {
            return Err(invalid_for_binding(names.len()).into());
        }
        let mut iter = match self.evaluate(iterable, for_scope)? {
            Value::Iter(iter) => iter,
            other => return Err(not_iterable(other.type_name()).into()),
        };

        let mut latest = Value::Nil;
        loop {
            self.env.clear(loop_scope);
            let (entry, rest) = iter.next();
            let Some(entry) = entry else {
                return Ok(latest);
            };
            iter = rest;
            self.declare(loop_scope, names[0], entry.key, Mutability::Mutable)?;
            if let Some(&value_name) = names.get(1) {
                let value = entry.value.unwrap_or_default();
                self.declare(loop_scope, value_name, value, Mutability::Mutable)?;
            }
            match to_loop_action(self.evaluate(body, loop_scope)) {
                LoopAction::Next(value) => latest = value,
                LoopAction::Continue => {}
                LoopAction::Break => return Ok(latest),
                LoopAction::Exit(action) => return Err(action),
            }
        }
    }

    /// `for init; condition; post { ... }`
    ///
    /// `init`, `condition` and `post` run in the `for` scope, the body in the
    /// `for-loop` scope. A missing condition is always true.
    fn eval_condition_loop(
        &mut self,
        init: Option<NodeId>,
        condition: Option<NodeId>,
        post: Option<NodeId>,
        body: NodeId,
        for_scope: ScopeId,
        loop_scope: ScopeId,
    ) -> EvalResult {
        if let Some(init) = init {
            self.evaluate(init, for_scope)?;
        }
        let mut latest = Value::Nil;
        loop {
            self.env.clear(loop_scope);
            if let Some(condition) = condition {
                if !self.evaluate(condition, for_scope)?.is_truthy() {
                    return Ok(latest);
                }
            }
            match to_loop_action(self.evaluate(body, loop_scope)) {
                LoopAction::Next(value) => latest = value,
                LoopAction::Continue => {}
                LoopAction::Break => return Ok(latest),
                LoopAction::Exit(action) => return Err(action),
            }
            if let Some(post) = post {
                self.evaluate(post, for_scope)?;
            }
        }
    }
}
