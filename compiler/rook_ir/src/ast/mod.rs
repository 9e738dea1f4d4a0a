//! Syntax tree node kinds.
//!
//! The tree is flat: every child is a [`NodeId`] into a
//! [`NodeArena`](crate::NodeArena). `NodeKind` is closed, so the evaluator's
//! dispatch is an exhaustive `match` and a new kind cannot be added without
//! the compiler pointing at every place that must handle it.

mod operators;

pub use operators::{AssignOp, BinaryOp, PostfixOp, PrefixOp};

use crate::{Name, NodeId, Position};

/// A node: what it is and where it came from.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub pos: Position,
}

#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    /// Top-level statement list.
    Program { statements: Vec<NodeId> },
    /// `{ ... }` statement list. Does not open a scope.
    Block { statements: Vec<NodeId> },

    // Literals
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(StringLiteral),
    List(Vec<NodeId>),
    Map(Vec<(NodeId, NodeId)>),
    Set(Vec<NodeId>),

    // Names and access
    Ident(Name),
    Index { object: NodeId, index: NodeId },
    Slice {
        object: NodeId,
        low: Option<NodeId>,
        high: Option<NodeId>,
    },
    /// `object.attr`
    GetAttr { object: NodeId, attr: Name },

    // Operators
    Prefix { op: PrefixOp, operand: NodeId },
    /// `name++` / `name--`
    Postfix { op: PostfixOp, target: Name },
    Infix {
        op: BinaryOp,
        left: NodeId,
        right: NodeId,
    },
    /// `condition ? if_true : if_false`
    Ternary {
        condition: NodeId,
        if_true: NodeId,
        if_false: NodeId,
    },
    /// `item in container`
    In { item: NodeId, container: NodeId },

    // Declarations and assignment
    /// `name := value`
    Var { name: Name, value: NodeId },
    /// `const name = value`
    Const { name: Name, value: NodeId },
    /// `a, b := value`
    MultiVar { names: Vec<Name>, value: NodeId },
    /// `target op value`
    Assign {
        target: AssignTarget,
        op: AssignOp,
        value: NodeId,
    },
    /// `import module [as alias]`
    Import { module: Name, alias: Option<Name> },

    // Functions
    Func(FunctionLiteral),
    Call { callee: NodeId, args: Vec<NodeId> },
    /// `object.method(args)`
    ObjectCall {
        object: NodeId,
        method: Name,
        args: Vec<NodeId>,
    },

    // Control flow
    If {
        condition: NodeId,
        consequence: NodeId,
        alternative: Option<NodeId>,
    },
    For(ForLoop),
    Switch {
        subject: NodeId,
        cases: Vec<SwitchCase>,
    },
    /// `a |> f(b) |> g`
    Pipe { stages: Vec<NodeId> },
    Control(ControlKind),
    /// `range container`
    Range { container: NodeId },
}

impl NodeKind {
    /// Short label used when rendering execution stacks.
    pub const fn label(&self) -> &'static str {
        match self {
            NodeKind::Program { .. } => "program",
            NodeKind::Block { .. } => "block",
            NodeKind::Nil => "nil",
            NodeKind::Bool(_) => "bool",
            NodeKind::Int(_) => "int",
            NodeKind::Float(_) => "float",
            NodeKind::Str(_) => "string",
            NodeKind::List(_) => "list",
            NodeKind::Map(_) => "map",
            NodeKind::Set(_) => "set",
            NodeKind::Ident(_) => "ident",
            NodeKind::Index { .. } => "index",
            NodeKind::Slice { .. } => "slice",
            NodeKind::GetAttr { .. } => "getattr",
            NodeKind::Prefix { .. } => "prefix",
            NodeKind::Postfix { .. } => "postfix",
            NodeKind::Infix { .. } => "infix",
            NodeKind::Ternary { .. } => "ternary",
            NodeKind::In { .. } => "in",
            NodeKind::Var { .. } => "var",
            NodeKind::Const { .. } => "const",
            NodeKind::MultiVar { .. } => "multi-var",
            NodeKind::Assign { .. } => "assign",
            NodeKind::Import { .. } => "import",
            NodeKind::Func(_) => "func",
            NodeKind::Call { .. } => "call",
            NodeKind::ObjectCall { .. } => "object-call",
            NodeKind::If { .. } => "if",
            NodeKind::For(_) => "for",
            NodeKind::Switch { .. } => "switch",
            NodeKind::Pipe { .. } => "pipe",
            NodeKind::Control(_) => "control",
            NodeKind::Range { .. } => "range",
        }
    }
}

/// Left-hand side of an assignment.
#[derive(Clone, Debug, PartialEq)]
pub enum AssignTarget {
    /// `name = value`
    Name(Name),
    /// `name[index] = value`; rebinds `name` to the updated container.
    Index { name: Name, index: NodeId },
}

/// A string literal, optionally a template with `{expr}` slots.
#[derive(Clone, Debug, PartialEq)]
pub struct StringLiteral {
    /// Raw source text.
    pub value: Name,
    pub template: Option<Template>,
}

/// Parsed template: fragments in order, with one expression slot per
/// [`Fragment::Slot`].
///
/// A slot may have no expression (an empty `{}`); it renders as nothing.
#[derive(Clone, Debug, PartialEq)]
pub struct Template {
    pub fragments: Vec<Fragment>,
    pub exprs: Vec<Option<NodeId>>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Fragment {
    /// Literal text.
    Text(Name),
    /// Placeholder filled by the next entry of [`Template::exprs`].
    Slot,
}

/// `func [name](params) { body }`
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionLiteral {
    /// Named literals also bind themselves in the enclosing scope.
    pub name: Option<Name>,
    pub params: Vec<Param>,
    pub body: NodeId,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Param {
    pub name: Name,
    /// Evaluated once, when the function literal is evaluated.
    pub default: Option<NodeId>,
}

/// The three loop shapes.
#[derive(Clone, Debug, PartialEq)]
pub enum ForLoop {
    /// `for { body }`
    Simple { body: NodeId },
    /// `for k[, v] := iterable { body }`
    Iterator {
        names: Vec<Name>,
        iterable: NodeId,
        body: NodeId,
    },
    /// `for init; condition; post { body }`; a missing condition is `true`.
    Condition {
        init: Option<NodeId>,
        condition: Option<NodeId>,
        post: Option<NodeId>,
        body: NodeId,
    },
}

impl ForLoop {
    pub const fn body(&self) -> NodeId {
        match self {
            ForLoop::Simple { body }
            | ForLoop::Iterator { body, .. }
            | ForLoop::Condition { body, .. } => *body,
        }
    }
}

/// One `case a, b:` or `default:` arm.
#[derive(Clone, Debug, PartialEq)]
pub struct SwitchCase {
    /// Candidate expressions; empty for `default`.
    pub exprs: Vec<NodeId>,
    pub body: NodeId,
    pub is_default: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ControlKind {
    Break,
    Continue,
    /// `return [value]`; a bare `return` yields nil.
    Return(Option<NodeId>),
}

impl ControlKind {
    pub const fn keyword(self) -> &'static str {
        match self {
            ControlKind::Break => "break",
            ControlKind::Continue => "continue",
            ControlKind::Return(_) => "return",
        }
    }
}
