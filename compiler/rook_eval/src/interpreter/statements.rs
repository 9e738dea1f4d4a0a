//! Statements: sequencing, breakpoints, declarations, assignment, import and
//! switch.

use rook_ir::{AssignOp, AssignTarget, Name, NodeId, PostfixOp, Position, SwitchCase};
use rook_value::errors::{
    cancelled, constant_assignment, constant_redeclared, imports_disabled, type_mismatch,
    undeclared_assignment, undefined_variable, unpack_mismatch,
};
use rook_value::{evaluate_binary, EvalError, EvalResult, ScopeId, Value};

use super::Interpreter;
use crate::breakpoint::BreakpointHit;
use crate::diagnostics::ExecFrame;
use crate::environment::{AssignError, DeclareError, Mutability};
use crate::exec::control::select_case;

impl Interpreter<'_> {
    /// Run statements in order; the last value is the result.
    pub(crate) fn eval_statements(&mut self, statements: &[NodeId], scope: ScopeId) -> EvalResult {
        let mut last = Value::Nil;
        for &statement in statements {
            last = self.eval_statement(statement, scope)?;
        }
        Ok(last)
    }

    /// Evaluate one statement inside an execution stack frame, reporting a
    /// breakpoint on its line first.
    fn eval_statement(&mut self, statement: NodeId, scope: ScopeId) -> EvalResult {
        let arena = self.arena;
        let node = arena.get(statement);
        if self.cancel.is_cancelled() {
            return Err(cancelled().or_position(node.pos).into());
        }
        self.exec_stack.push(ExecFrame {
            node: statement,
            label: node.kind.label(),
            pos: node.pos,
            scope,
        });
        if !self.breakpoints.is_empty() {
            self.check_breakpoint(node.pos, scope);
        }
        let result = self.evaluate(statement, scope);
        self.exec_stack.pop();
        result
    }

    fn check_breakpoint(&mut self, pos: Position, scope: ScopeId) {
        if pos.is_unknown() {
            return;
        }
        let location = pos.line_key(self.interner);
        let Some(breakpoint) = self.breakpoints.get(&location) else {
            return;
        };
        if breakpoint.disabled {
            return;
        }
        let (trace, stop) = (breakpoint.trace, breakpoint.stop);
        let hit = BreakpointHit {
            trace: trace.then(|| self.exec_stack.render(self.interner)),
            locals: stop.then(|| self.locals(scope)),
            location,
            stop,
        };
        tracing::debug!(location = %hit.location, trace, stop, "breakpoint hit");
        self.debugger.on_hit(&hit);
    }

    /// `(name, inspected value)` for the bindings of `scope` itself.
    fn locals(&self, scope: ScopeId) -> Vec<(String, String)> {
        self.env
            .contents(scope)
            .into_iter()
            .map(|(name, value)| (self.interner.lookup(name).to_string(), value.inspect()))
            .collect()
    }

    pub(crate) fn declare(
        &mut self,
        scope: ScopeId,
        name: Name,
        value: Value,
        mutability: Mutability,
    ) -> Result<(), EvalError> {
        self.env
            .declare(scope, name, value, mutability)
            .map_err(|DeclareError::ConstantExists| constant_redeclared(self.interner.lookup(name)))
    }

    pub(crate) fn assign(&mut self, scope: ScopeId, name: Name, value: Value) -> Result<(), EvalError> {
        self.env.assign(scope, name, value).map_err(|err| {
            let name = self.interner.lookup(name);
            match err {
                AssignError::Constant => constant_assignment(name),
                AssignError::Undefined => undeclared_assignment(name),
            }
        })
    }

    fn lookup_local(&self, scope: ScopeId, name: Name) -> Result<Value, EvalError> {
        self.env
            .lookup(scope, name)
            .map_err(|_| undefined_variable(self.interner.lookup(name)))
    }

    /// `x := v` / `const x = v`
    pub(crate) fn eval_declaration(
        &mut self,
        name: Name,
        value: NodeId,
        mutability: Mutability,
        scope: ScopeId,
    ) -> EvalResult {
        let value = self.evaluate(value, scope)?;
        self.declare(scope, name, value, mutability)?;
        Ok(Value::Nil)
    }

    /// `a, b := list`
    pub(crate) fn eval_multi_var(&mut self, names: &[Name], value: NodeId, scope: ScopeId) -> EvalResult {
        let value = self.evaluate(value, scope)?;
        let Value::List(items) = &value else {
            return Err(type_mismatch("list", value.type_name()).into());
        };
        if items.len() != names.len() {
            return Err(unpack_mismatch(names.len(), items.len()).into());
        }
        for (name, item) in names.iter().zip(items.iter()) {
            self.declare(scope, *name, item.clone(), Mutability::Mutable)?;
        }
        Ok(Value::Nil)
    }

    /// `x = v`, `x += v`, `a[i] = v`, `a[i] += v`
    pub(crate) fn eval_assign(
        &mut self,
        target: &AssignTarget,
        op: AssignOp,
        value: NodeId,
        scope: ScopeId,
    ) -> EvalResult {
        match target {
            AssignTarget::Name(name) => {
                let mut value = self.evaluate(value, scope)?;
                if let Some(op) = op.binary_op() {
                    let current = self.lookup_local(scope, *name)?;
                    value = evaluate_binary(current, value, op)?;
                }
                self.assign(scope, *name, value)?;
            }
            AssignTarget::Index { name, index } => {
                let container = self.lookup_local(scope, *name)?;
                let index = self.evaluate(*index, scope)?;
                let mut value = self.evaluate(value, scope)?;
                if let Some(op) = op.binary_op() {
                    value = evaluate_binary(container.index(&index)?, value, op)?;
                }
                let updated = container.with_index(&index, value)?;
                self.assign(scope, *name, updated)?;
            }
        }
        Ok(Value::Nil)
    }

    /// `x++` / `x--`
    pub(crate) fn eval_postfix(&mut self, op: PostfixOp, target: Name, scope: ScopeId) -> EvalResult {
        let current = self.lookup_local(scope, target)?;
        let updated = evaluate_binary(current, Value::Int(1), op.binary_op())?;
        self.assign(scope, target, updated)?;
        Ok(Value::Nil)
    }

    /// `import name` / `import name as alias`, bound as a constant.
    pub(crate) fn eval_import(&mut self, module: Name, alias: Option<Name>, scope: ScopeId) -> EvalResult {
        let module_name = self.interner.lookup(module);
        let Some(importer) = self.importer.as_mut() else {
            return Err(imports_disabled(module_name).into());
        };
        tracing::debug!(module = module_name, "import");
        let value = importer.import(module_name)?;
        self.declare(scope, alias.unwrap_or(module), value, Mutability::Constant)?;
        Ok(Value::Nil)
    }

    /// Evaluate the subject once, then the first matching case (or the
    /// default). No match and no default yields nil.
    pub(crate) fn eval_switch(
        &mut self,
        subject: NodeId,
        cases: &[SwitchCase],
        scope: ScopeId,
    ) -> EvalResult {
        let subject = self.evaluate(subject, scope)?;
        match select_case(&subject, cases, |n| self.evaluate(n, scope))? {
            Some(case) => self.evaluate(case.body, scope),
            None => Ok(Value::Nil),
        }
    }
}
