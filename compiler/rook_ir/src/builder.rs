//! Programmatic tree construction.
//!
//! The interpreter consumes trees produced elsewhere; `TreeBuilder` is how
//! hosts and tests produce them without a parser. Every node is stamped with
//! the builder's current file and line, which [`at`](TreeBuilder::at) moves.

use crate::{
    AssignOp, AssignTarget, BinaryOp, ControlKind, ForLoop, Fragment, FunctionLiteral, Name,
    NodeArena, NodeId, NodeKind, Param, Position, PostfixOp, PrefixOp, StringInterner,
    StringLiteral, SwitchCase, Template,
};

/// A piece of a template literal.
#[derive(Copy, Clone, Debug)]
pub enum TemplatePart<'s> {
    Text(&'s str),
    /// A `{...}` slot; `None` for an empty slot.
    Slot(Option<NodeId>),
}

pub struct TreeBuilder<'i> {
    interner: &'i StringInterner,
    arena: NodeArena,
    pos: Position,
}

impl<'i> TreeBuilder<'i> {
    /// Start building nodes attributed to `file`, line 1.
    pub fn new(interner: &'i StringInterner, file: &str) -> Self {
        TreeBuilder {
            interner,
            arena: NodeArena::new(),
            pos: Position::new(interner.intern(file), 1, 1),
        }
    }

    /// Continue adding nodes to an existing arena.
    pub fn extend(interner: &'i StringInterner, arena: NodeArena, file: &str) -> Self {
        TreeBuilder {
            interner,
            arena,
            pos: Position::new(interner.intern(file), 1, 1),
        }
    }

    /// Subsequent nodes are on `line`, column 1.
    pub fn at(&mut self, line: u32) -> &mut Self {
        self.pos.line = line;
        self.pos.column = 1;
        self
    }

    /// Subsequent nodes are at `line:column`.
    pub fn at_column(&mut self, line: u32, column: u32) -> &mut Self {
        self.pos.line = line;
        self.pos.column = column;
        self
    }

    /// Subsequent nodes belong to `file`.
    pub fn in_file(&mut self, file: &str) -> &mut Self {
        self.pos.file = self.interner.intern(file);
        self
    }

    pub fn position(&self) -> Position {
        self.pos
    }

    pub fn name(&self, s: &str) -> Name {
        self.interner.intern(s)
    }

    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    pub fn finish(self) -> NodeArena {
        self.arena
    }

    pub fn node(&mut self, kind: NodeKind) -> NodeId {
        self.arena.alloc(kind, self.pos)
    }

    // Containers

    pub fn program(&mut self, statements: Vec<NodeId>) -> NodeId {
        self.node(NodeKind::Program { statements })
    }

    pub fn block(&mut self, statements: Vec<NodeId>) -> NodeId {
        self.node(NodeKind::Block { statements })
    }

    // Literals

    pub fn nil(&mut self) -> NodeId {
        self.node(NodeKind::Nil)
    }

    pub fn bool(&mut self, value: bool) -> NodeId {
        self.node(NodeKind::Bool(value))
    }

    pub fn int(&mut self, value: i64) -> NodeId {
        self.node(NodeKind::Int(value))
    }

    pub fn float(&mut self, value: f64) -> NodeId {
        self.node(NodeKind::Float(value))
    }

    pub fn str(&mut self, value: &str) -> NodeId {
        let value = self.name(value);
        self.node(NodeKind::Str(StringLiteral {
            value,
            template: None,
        }))
    }

    /// A template literal such as `"x = {x}"`.
    pub fn template(&mut self, parts: &[TemplatePart<'_>]) -> NodeId {
        let mut source = String::new();
        let mut fragments = Vec::with_capacity(parts.len());
        let mut exprs = Vec::new();
        for part in parts {
            match *part {
                TemplatePart::Text(text) => {
                    source.push_str(text);
                    fragments.push(Fragment::Text(self.name(text)));
                }
                TemplatePart::Slot(expr) => {
                    source.push_str("{}");
                    fragments.push(Fragment::Slot);
                    exprs.push(expr);
                }
            }
        }
        let value = self.name(&source);
        self.node(NodeKind::Str(StringLiteral {
            value,
            template: Some(Template { fragments, exprs }),
        }))
    }

    pub fn list(&mut self, items: Vec<NodeId>) -> NodeId {
        self.node(NodeKind::List(items))
    }

    pub fn map(&mut self, entries: Vec<(NodeId, NodeId)>) -> NodeId {
        self.node(NodeKind::Map(entries))
    }

    pub fn set(&mut self, items: Vec<NodeId>) -> NodeId {
        self.node(NodeKind::Set(items))
    }

    // Names and access

    pub fn ident(&mut self, name: &str) -> NodeId {
        let name = self.name(name);
        self.node(NodeKind::Ident(name))
    }

    pub fn index(&mut self, object: NodeId, index: NodeId) -> NodeId {
        self.node(NodeKind::Index { object, index })
    }

    pub fn slice(&mut self, object: NodeId, low: Option<NodeId>, high: Option<NodeId>) -> NodeId {
        self.node(NodeKind::Slice { object, low, high })
    }

    pub fn get_attr(&mut self, object: NodeId, attr: &str) -> NodeId {
        let attr = self.name(attr);
        self.node(NodeKind::GetAttr { object, attr })
    }

    // Operators

    pub fn prefix(&mut self, op: PrefixOp, operand: NodeId) -> NodeId {
        self.node(NodeKind::Prefix { op, operand })
    }

    pub fn postfix(&mut self, target: &str, op: PostfixOp) -> NodeId {
        let target = self.name(target);
        self.node(NodeKind::Postfix { op, target })
    }

    pub fn infix(&mut self, left: NodeId, op: BinaryOp, right: NodeId) -> NodeId {
        self.node(NodeKind::Infix { op, left, right })
    }

    pub fn ternary(&mut self, condition: NodeId, if_true: NodeId, if_false: NodeId) -> NodeId {
        self.node(NodeKind::Ternary {
            condition,
            if_true,
            if_false,
        })
    }

    pub fn contains(&mut self, item: NodeId, container: NodeId) -> NodeId {
        self.node(NodeKind::In { item, container })
    }

    // Declarations

    pub fn var(&mut self, name: &str, value: NodeId) -> NodeId {
        let name = self.name(name);
        self.node(NodeKind::Var { name, value })
    }

    pub fn constant(&mut self, name: &str, value: NodeId) -> NodeId {
        let name = self.name(name);
        self.node(NodeKind::Const { name, value })
    }

    pub fn multi_var(&mut self, names: &[&str], value: NodeId) -> NodeId {
        let names = names.iter().map(|n| self.name(n)).collect();
        self.node(NodeKind::MultiVar { names, value })
    }

    pub fn assign(&mut self, name: &str, value: NodeId) -> NodeId {
        self.assign_op(name, AssignOp::Assign, value)
    }

    pub fn assign_op(&mut self, name: &str, op: AssignOp, value: NodeId) -> NodeId {
        let target = AssignTarget::Name(self.name(name));
        self.node(NodeKind::Assign { target, op, value })
    }

    pub fn assign_index(&mut self, name: &str, index: NodeId, value: NodeId) -> NodeId {
        let target = AssignTarget::Index {
            name: self.name(name),
            index,
        };
        self.node(NodeKind::Assign {
            target,
            op: AssignOp::Assign,
            value,
        })
    }

    pub fn import(&mut self, module: &str, alias: Option<&str>) -> NodeId {
        let module = self.name(module);
        let alias = alias.map(|a| self.name(a));
        self.node(NodeKind::Import { module, alias })
    }

    // Functions

    /// `func [name](params) body`; each param may carry a default expression.
    pub fn func(
        &mut self,
        name: Option<&str>,
        params: &[(&str, Option<NodeId>)],
        body: NodeId,
    ) -> NodeId {
        let name = name.map(|n| self.name(n));
        let params = params
            .iter()
            .map(|&(param, default)| Param {
                name: self.name(param),
                default,
            })
            .collect();
        self.node(NodeKind::Func(FunctionLiteral { name, params, body }))
    }

    pub fn call(&mut self, callee: NodeId, args: Vec<NodeId>) -> NodeId {
        self.node(NodeKind::Call { callee, args })
    }

    /// Shorthand for calling a named function or builtin.
    pub fn call_named(&mut self, callee: &str, args: Vec<NodeId>) -> NodeId {
        let callee = self.ident(callee);
        self.call(callee, args)
    }

    pub fn object_call(&mut self, object: NodeId, method: &str, args: Vec<NodeId>) -> NodeId {
        let method = self.name(method);
        self.node(NodeKind::ObjectCall {
            object,
            method,
            args,
        })
    }

    // Control flow

    pub fn if_(
        &mut self,
        condition: NodeId,
        consequence: NodeId,
        alternative: Option<NodeId>,
    ) -> NodeId {
        self.node(NodeKind::If {
            condition,
            consequence,
            alternative,
        })
    }

    pub fn for_ever(&mut self, body: NodeId) -> NodeId {
        self.node(NodeKind::For(ForLoop::Simple { body }))
    }

    pub fn for_each(&mut self, names: &[&str], iterable: NodeId, body: NodeId) -> NodeId {
        let names = names.iter().map(|n| self.name(n)).collect();
        self.node(NodeKind::For(ForLoop::Iterator {
            names,
            iterable,
            body,
        }))
    }

    pub fn for_cond(
        &mut self,
        init: Option<NodeId>,
        condition: Option<NodeId>,
        post: Option<NodeId>,
        body: NodeId,
    ) -> NodeId {
        self.node(NodeKind::For(ForLoop::Condition {
            init,
            condition,
            post,
            body,
        }))
    }

    pub fn switch(&mut self, subject: NodeId, cases: Vec<SwitchCase>) -> NodeId {
        self.node(NodeKind::Switch { subject, cases })
    }

    pub fn case(exprs: Vec<NodeId>, body: NodeId) -> SwitchCase {
        SwitchCase {
            exprs,
            body,
            is_default: false,
        }
    }

    pub fn default_case(body: NodeId) -> SwitchCase {
        SwitchCase {
            exprs: Vec::new(),
            body,
            is_default: true,
        }
    }

    pub fn pipe(&mut self, stages: Vec<NodeId>) -> NodeId {
        self.node(NodeKind::Pipe { stages })
    }

    pub fn break_(&mut self) -> NodeId {
        self.node(NodeKind::Control(ControlKind::Break))
    }

    pub fn continue_(&mut self) -> NodeId {
        self.node(NodeKind::Control(ControlKind::Continue))
    }

    pub fn return_(&mut self, value: Option<NodeId>) -> NodeId {
        self.node(NodeKind::Control(ControlKind::Return(value)))
    }

    pub fn range(&mut self, container: NodeId) -> NodeId {
        self.node(NodeKind::Range { container })
    }
}
