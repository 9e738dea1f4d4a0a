//! Literals, names, attribute access and operators.

use std::collections::{BTreeMap, BTreeSet};

use rook_ir::{BinaryOp, Name, NodeId, NodeKind, StringLiteral};
use rook_value::errors::{map_key_not_string, no_such_attribute, type_mismatch, undefined_variable};
use rook_value::{evaluate_binary, ControlAction, EvalError, EvalResult, HashKey, ScopeId, Value};

use super::Interpreter;
use crate::exec::template;

/// An evaluated `object` in `object.attr`, or the builtin it names.
pub(crate) enum Receiver {
    Qualified(Value),
    Object(Value),
}

impl Interpreter<'_> {
    /// Plain text, or a template whose slots are evaluated here.
    pub(crate) fn eval_string(&mut self, literal: &StringLiteral, scope: ScopeId) -> EvalResult {
        let interner = self.interner;
        match &literal.template {
            None => Ok(Value::string(interner.lookup(literal.value))),
            Some(t) => {
                let text = template::render(t, interner, |n| self.evaluate(n, scope))?;
                Ok(Value::string(text))
            }
        }
    }

    pub(crate) fn eval_list(&mut self, items: &[NodeId], scope: ScopeId) -> EvalResult {
        Ok(Value::list(self.eval_args(items, scope)?))
    }

    pub(crate) fn eval_map(&mut self, entries: &[(NodeId, NodeId)], scope: ScopeId) -> EvalResult {
        let mut map = BTreeMap::new();
        for &(key, value) in entries {
            let key = match self.evaluate(key, scope)? {
                Value::Str(s) => s,
                other => return Err(map_key_not_string(other.type_name()).into()),
            };
            let value = self.evaluate(value, scope)?;
            map.insert(key, value);
        }
        Ok(Value::map(map))
    }

    pub(crate) fn eval_set(&mut self, items: &[NodeId], scope: ScopeId) -> EvalResult {
        let mut set = BTreeSet::new();
        for &item in items {
            let item = self.evaluate(item, scope)?;
            set.insert(HashKey::try_from(&item)?);
        }
        Ok(Value::set(set))
    }

    /// Scope chain first, then the builtin registry.
    pub(crate) fn eval_ident(&mut self, name: Name, scope: ScopeId) -> EvalResult {
        if let Ok(value) = self.env.lookup(scope, name) {
            return Ok(value);
        }
        let text = self.interner.lookup(name);
        self.builtins
            .get(text)
            .cloned()
            .ok_or_else(|| undefined_variable(text).into())
    }

    /// `object[low:high]`; absent bounds default to the ends.
    pub(crate) fn eval_slice(
        &mut self,
        object: NodeId,
        low: Option<NodeId>,
        high: Option<NodeId>,
        scope: ScopeId,
    ) -> EvalResult {
        let object = self.evaluate(object, scope)?;
        let low = self.eval_bound(low, scope)?;
        let high = self.eval_bound(high, scope)?;
        Ok(object.slice(low, high)?)
    }

    fn eval_bound(
        &mut self,
        bound: Option<NodeId>,
        scope: ScopeId,
    ) -> Result<Option<i64>, rook_value::ControlAction> {
        let Some(bound) = bound else {
            return Ok(None);
        };
        match self.evaluate(bound, scope)? {
            Value::Nil => Ok(None),
            Value::Int(n) => Ok(Some(n)),
            other => Err(type_mismatch("int", other.type_name()).into()),
        }
    }

    /// `object.attr`.
    pub(crate) fn eval_get_attr(&mut self, object: NodeId, attr: Name, scope: ScopeId) -> EvalResult {
        let receiver = self.eval_receiver(object, attr, scope)?;
        Ok(self.lookup_attr(receiver, attr)?)
    }

    /// The left side of `object.attr`.
    ///
    /// When `object` is a name with no binding in scope, `object.attr` is
    /// first tried as the builtin `object.attr`.
    pub(crate) fn eval_receiver(
        &mut self,
        object: NodeId,
        attr: Name,
        scope: ScopeId,
    ) -> Result<Receiver, ControlAction> {
        let arena = self.arena;
        if let NodeKind::Ident(module) = arena.kind(object) {
            if !self.env.is_declared(scope, *module) {
                let module = self.interner.lookup(*module);
                let attr = self.interner.lookup(attr);
                if let Some(builtin) = self.builtins.get_qualified(module, attr) {
                    return Ok(Receiver::Qualified(builtin.clone()));
                }
            }
        }
        Ok(Receiver::Object(self.evaluate(object, scope)?))
    }

    pub(crate) fn lookup_attr(&self, receiver: Receiver, attr: Name) -> Result<Value, EvalError> {
        match receiver {
            Receiver::Qualified(builtin) => Ok(builtin),
            Receiver::Object(object) => {
                let attr = self.interner.lookup(attr);
                object
                    .get_attr(attr)
                    .ok_or_else(|| no_such_attribute(object.type_name(), attr))
            }
        }
    }

    /// Binary operators. `&&` and `||` skip the right operand when the left
    /// one decides the result.
    pub(crate) fn eval_infix(
        &mut self,
        op: BinaryOp,
        left: NodeId,
        right: NodeId,
        scope: ScopeId,
    ) -> EvalResult {
        let left = self.evaluate(left, scope)?;
        if op.is_short_circuit() {
            let decided = match op {
                BinaryOp::And => !left.is_truthy(),
                _ => left.is_truthy(),
            };
            if decided {
                return Ok(Value::Bool(left.is_truthy()));
            }
        }
        let right = self.evaluate(right, scope)?;
        Ok(evaluate_binary(left, right, op)?)
    }

    /// Evaluate argument expressions left to right.
    pub(crate) fn eval_args(
        &mut self,
        args: &[NodeId],
        scope: ScopeId,
    ) -> Result<Vec<Value>, ControlAction> {
        args.iter().map(|&arg| self.evaluate(arg, scope)).collect()
    }
}
