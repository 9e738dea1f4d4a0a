//! Runtime values.
//!
//! Compound values are immutable behind `Arc`: cloning a list or map is a
//! reference-count bump, and index assignment builds an updated copy
//! (see [`Value::with_index`]).

mod builtin;
mod container;
mod function;
mod hash_key;
mod iterator;
mod module;

pub use builtin::{Builtin, BuiltinFn};
pub use function::FunctionValue;
pub use hash_key::HashKey;
pub use iterator::{IterEntry, IteratorValue, ValueIterator};
pub use module::Module;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Arc<str>),
    List(Arc<Vec<Value>>),
    Map(Arc<BTreeMap<Arc<str>, Value>>),
    Set(Arc<BTreeSet<HashKey>>),
    Function(Arc<FunctionValue>),
    Builtin(Arc<Builtin>),
    Module(Arc<Module>),
    Iter(IteratorValue),
}

impl Value {
    pub fn string(s: impl Into<Arc<str>>) -> Self {
        Value::Str(s.into())
    }

    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Arc::new(items))
    }

    pub fn map(entries: BTreeMap<Arc<str>, Value>) -> Self {
        Value::Map(Arc::new(entries))
    }

    /// Build a map from string keys.
    pub fn map_from<K: Into<Arc<str>>>(entries: impl IntoIterator<Item = (K, Value)>) -> Self {
        Value::map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn set(items: BTreeSet<HashKey>) -> Self {
        Value::Set(Arc::new(items))
    }

    pub fn function(func: FunctionValue) -> Self {
        Value::Function(Arc::new(func))
    }

    pub fn builtin(builtin: Builtin) -> Self {
        Value::Builtin(Arc::new(builtin))
    }

    pub fn module(module: Module) -> Self {
        Value::Module(Arc::new(module))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Set(_) => "set",
            Value::Function(_) => "function",
            Value::Builtin(_) => "builtin",
            Value::Module(_) => "module",
            Value::Iter(_) => "iterator",
        }
    }

    /// Zero, empty and nil are false; everything else is true.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Nil => false,
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Float(f) => *f != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::List(items) => !items.is_empty(),
            Value::Map(entries) => !entries.is_empty(),
            Value::Set(items) => !items.is_empty(),
            Value::Function(_) | Value::Builtin(_) | Value::Module(_) | Value::Iter(_) => true,
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Function(_) | Value::Builtin(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Source-like representation: strings quoted, containers expanded.
    pub fn inspect(&self) -> String {
        self.to_string()
    }

    /// Text form: strings as-is, everything else as [`inspect`](Self::inspect).
    pub fn to_text(&self) -> String {
        match self {
            Value::Str(s) => s.to_string(),
            other => other.inspect(),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::list(items)
    }
}

/// Structural equality; ints and floats compare numerically, callables and
/// modules by identity, iterators never.
impl PartialEq for Value {
    #[expect(
        clippy::cast_precision_loss,
        reason = "mixed int/float comparison follows float semantics"
    )]
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => *a as f64 == *b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Set(a), Value::Set(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => Arc::ptr_eq(a, b),
            (Value::Builtin(a), Value::Builtin(b)) => Arc::ptr_eq(a, b),
            (Value::Module(a), Value::Module(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

fn fmt_float(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        write!(f, "{value:.1}")
    } else {
        write!(f, "{value}")
    }
}

fn fmt_seq<'v>(
    f: &mut fmt::Formatter<'_>,
    open: &str,
    items: impl Iterator<Item = &'v Value>,
    close: &str,
) -> fmt::Result {
    f.write_str(open)?;
    for (i, item) in items.enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    f.write_str(close)
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("nil"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => fmt_float(f, *x),
            Value::Str(s) => write!(f, "{:?}", &**s),
            Value::List(items) => fmt_seq(f, "[", items.iter(), "]"),
            Value::Map(entries) => {
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{:?}: {value}", &**key)?;
                }
                f.write_str("}")
            }
            Value::Set(items) => {
                let values: Vec<Value> = items.iter().map(HashKey::to_value).collect();
                fmt_seq(f, "{", values.iter(), "}")
            }
            Value::Function(func) => write!(f, "<function {}>", func.display_name()),
            Value::Builtin(builtin) => write!(f, "<builtin {}>", builtin.key()),
            Value::Module(module) => write!(f, "<module {}>", module.name),
            Value::Iter(_) => f.write_str("<iterator>"),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Iter(iter) => write!(f, "Iter({iter:?})"),
            Value::Function(func) => write!(f, "Function({})", func.display_name()),
            Value::Builtin(builtin) => write!(f, "Builtin({})", builtin.key()),
            other => write!(f, "{other}"),
        }
    }
}

#[cfg(test)]
mod tests;
