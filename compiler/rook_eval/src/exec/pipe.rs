//! Pipe stages: `source |> f(a) |> obj.m(b) |> g`.
//!
//! Each stage after the source receives the previous result as its first
//! argument. How it is passed depends only on the stage's syntactic shape.

use rook_ir::{Name, NodeId, NodeKind};
use rook_value::Value;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipeStage<'n> {
    /// `f(args...)`: called with the piped value prepended.
    Call { callee: NodeId, args: &'n [NodeId] },
    /// `obj.m(args...)`: method called with the piped value prepended.
    MethodCall {
        object: NodeId,
        method: Name,
        args: &'n [NodeId],
    },
    /// Any other expression; must evaluate to something callable, except in
    /// the first stage where a plain value replaces the piped one.
    Bare(NodeId),
}

impl<'n> PipeStage<'n> {
    pub fn classify(id: NodeId, kind: &'n NodeKind) -> Self {
        match kind {
            NodeKind::Call { callee, args } => PipeStage::Call {
                callee: *callee,
                args,
            },
            NodeKind::ObjectCall {
                object,
                method,
                args,
            } => PipeStage::MethodCall {
                object: *object,
                method: *method,
                args,
            },
            _ => PipeStage::Bare(id),
        }
    }
}

/// `piped` becomes argument 0; explicit arguments keep their order.
pub fn prepend_arg(piped: Value, explicit: Vec<Value>) -> Vec<Value> {
    let mut args = Vec::with_capacity(explicit.len() + 1);
    args.push(piped);
    args.extend(explicit);
    args
}

/// Arguments for a bare callable stage: the piped value, unless it is nil.
pub fn bare_args(piped: Value) -> Vec<Value> {
    if piped.is_nil() {
        Vec::new()
    } else {
        vec![piped]
    }
}
