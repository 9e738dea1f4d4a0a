use rook_ir::{Name, NodeId};
use std::sync::Arc;

use super::Value;
use crate::ScopeId;

/// A user-defined function: parameters, body and the scope it closes over.
#[derive(Clone, Debug)]
pub struct FunctionValue {
    /// `None` for anonymous literals.
    pub name: Option<Arc<str>>,
    pub params: Vec<Name>,
    /// Default per parameter, evaluated when the literal was evaluated.
    pub defaults: Vec<Option<Value>>,
    pub body: NodeId,
    pub scope: ScopeId,
}

impl FunctionValue {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<anonymous>")
    }

    /// Parameters without a default.
    pub fn required_params(&self) -> usize {
        self.defaults.iter().filter(|d| d.is_none()).count()
    }
}
