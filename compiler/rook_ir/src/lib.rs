//! Syntax tree for the Rook interpreter.
//!
//! - [`Name`] / [`StringInterner`]: interned identifiers and literal text
//! - [`Position`]: file, line and column of a node
//! - [`NodeId`] / [`NodeArena`]: flat node storage
//! - [`NodeKind`]: the closed set of node kinds the evaluator dispatches on
//! - [`TreeBuilder`]: programmatic construction
//!
//! Parsing is not part of this crate; trees are produced by a front end or
//! built directly.

mod arena;
pub mod ast;
mod builder;
mod interner;
mod name;
mod node_id;
mod position;

pub use arena::NodeArena;
pub use ast::{
    AssignOp, AssignTarget, BinaryOp, ControlKind, ForLoop, Fragment, FunctionLiteral, Node,
    NodeKind, Param, PostfixOp, PrefixOp, StringLiteral, SwitchCase, Template,
};
pub use builder::{TemplatePart, TreeBuilder};
pub use interner::{SharedInterner, StringInterner};
pub use name::Name;
pub use node_id::NodeId;
pub use position::Position;
