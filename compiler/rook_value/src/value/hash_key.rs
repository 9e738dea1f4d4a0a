use std::sync::Arc;

use super::Value;
use crate::errors::{unhashable, EvalError};

/// A value that can live in a set.
///
/// Only scalars hash; lists, maps and callables are rejected when a set is
/// built or probed.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HashKey {
    Nil,
    Bool(bool),
    Int(i64),
    Str(Arc<str>),
}

impl HashKey {
    pub fn to_value(&self) -> Value {
        match self {
            HashKey::Nil => Value::Nil,
            HashKey::Bool(b) => Value::Bool(*b),
            HashKey::Int(n) => Value::Int(*n),
            HashKey::Str(s) => Value::Str(Arc::clone(s)),
        }
    }
}

impl TryFrom<&Value> for HashKey {
    type Error = EvalError;

    fn try_from(value: &Value) -> Result<Self, EvalError> {
        match value {
            Value::Nil => Ok(HashKey::Nil),
            Value::Bool(b) => Ok(HashKey::Bool(*b)),
            Value::Int(n) => Ok(HashKey::Int(*n)),
            Value::Str(s) => Ok(HashKey::Str(Arc::clone(s))),
            other => Err(unhashable(other.type_name())),
        }
    }
}
