//! Container capabilities: iteration, membership, indexing, slicing and
//! attribute access.

use std::sync::Arc;

use super::{HashKey, IteratorValue, Value};
use crate::errors::{
    cannot_index, index_out_of_bounds, map_key_not_string, not_a_container, EvalError,
};

/// Map a possibly negative index onto `0..len`.
fn resolve_index(index: i64, len: usize) -> Option<usize> {
    let len = i64::try_from(len).ok()?;
    let resolved = if index < 0 { len + index } else { index };
    if (0..len).contains(&resolved) {
        usize::try_from(resolved).ok()
    } else {
        None
    }
}

/// Map a possibly negative slice bound onto `0..=len`, clamping.
fn resolve_bound(bound: Option<i64>, default: usize, len: usize) -> usize {
    let Some(bound) = bound else {
        return default;
    };
    let len_i = i64::try_from(len).unwrap_or(i64::MAX);
    let resolved = if bound < 0 { len_i + bound } else { bound };
    usize::try_from(resolved.clamp(0, len_i)).unwrap_or(len)
}

impl Value {
    /// Element count for containers.
    pub fn len(&self) -> Option<usize> {
        match self {
            Value::Str(s) => Some(s.chars().count()),
            Value::List(items) => Some(items.len()),
            Value::Map(entries) => Some(entries.len()),
            Value::Set(items) => Some(items.len()),
            _ => None,
        }
    }

    /// A fresh iterator over a container, `None` for non-containers.
    pub fn iter(&self) -> Option<IteratorValue> {
        match self {
            Value::List(items) => Some(IteratorValue::from_list(Arc::clone(items))),
            Value::Map(entries) => Some(IteratorValue::from_map(
                entries
                    .iter()
                    .map(|(k, v)| (Arc::clone(k), v.clone()))
                    .collect(),
            )),
            Value::Set(items) => Some(IteratorValue::from_set(
                items.iter().map(HashKey::to_value).collect(),
            )),
            Value::Str(s) => Some(IteratorValue::from_string(Arc::clone(s))),
            _ => None,
        }
    }

    /// `item in self`.
    ///
    /// Lists compare elements, maps test keys, sets test members and strings
    /// test substrings.
    pub fn contains(&self, item: &Value) -> Result<bool, EvalError> {
        match self {
            Value::List(items) => Ok(items.contains(item)),
            Value::Map(entries) => Ok(item.as_str().is_some_and(|k| entries.contains_key(k))),
            Value::Set(items) => Ok(HashKey::try_from(item).is_ok_and(|k| items.contains(&k))),
            Value::Str(s) => match item {
                Value::Str(needle) => Ok(s.contains(&**needle)),
                other => Err(cannot_index("string", other.type_name())),
            },
            other => Err(not_a_container(other.type_name())),
        }
    }

    /// `self[index]`. Negative indices count from the end; a missing map key
    /// yields nil.
    pub fn index(&self, index: &Value) -> Result<Value, EvalError> {
        match (self, index) {
            (Value::List(items), Value::Int(i)) => resolve_index(*i, items.len())
                .map(|i| items[i].clone())
                .ok_or_else(|| index_out_of_bounds(*i)),
            (Value::Str(s), Value::Int(i)) => resolve_index(*i, s.chars().count())
                .and_then(|i| s.chars().nth(i))
                .map(|c| Value::string(c.to_string()))
                .ok_or_else(|| index_out_of_bounds(*i)),
            (Value::Map(entries), Value::Str(key)) => {
                Ok(entries.get(&**key).cloned().unwrap_or(Value::Nil))
            }
            (Value::Map(_), other) => Err(map_key_not_string(other.type_name())),
            (receiver, index) => Err(cannot_index(receiver.type_name(), index.type_name())),
        }
    }

    /// `self[low:high]` on lists and strings.
    pub fn slice(&self, low: Option<i64>, high: Option<i64>) -> Result<Value, EvalError> {
        match self {
            Value::List(items) => {
                let start = resolve_bound(low, 0, items.len());
                let end = resolve_bound(high, items.len(), items.len()).max(start);
                Ok(Value::list(items[start..end].to_vec()))
            }
            Value::Str(s) => {
                let len = s.chars().count();
                let start = resolve_bound(low, 0, len);
                let end = resolve_bound(high, len, len).max(start);
                Ok(Value::string(
                    s.chars().skip(start).take(end - start).collect::<String>(),
                ))
            }
            other => Err(cannot_index(other.type_name(), "slice")),
        }
    }

    /// A copy of `self` with `self[index] = value`.
    ///
    /// Other holders of the original keep seeing the old contents.
    pub fn with_index(&self, index: &Value, value: Value) -> Result<Value, EvalError> {
        match (self, index) {
            (Value::List(items), Value::Int(i)) => {
                let pos = resolve_index(*i, items.len()).ok_or_else(|| index_out_of_bounds(*i))?;
                let mut items = Arc::clone(items);
                Arc::make_mut(&mut items)[pos] = value;
                Ok(Value::List(items))
            }
            (Value::Map(entries), Value::Str(key)) => {
                let mut entries = Arc::clone(entries);
                Arc::make_mut(&mut entries).insert(Arc::clone(key), value);
                Ok(Value::Map(entries))
            }
            (Value::Map(_), other) => Err(map_key_not_string(other.type_name())),
            (receiver, index) => Err(cannot_index(receiver.type_name(), index.type_name())),
        }
    }

    /// `self.attr` for modules, maps, builtins and functions.
    pub fn get_attr(&self, attr: &str) -> Option<Value> {
        match self {
            Value::Module(module) => module.get(attr).cloned(),
            Value::Map(entries) => entries.get(attr).cloned(),
            Value::Builtin(builtin) => builtin.get_attr(attr),
            Value::Function(func) if attr == "__name__" => Some(
                func.name
                    .as_ref()
                    .map_or(Value::Nil, |n| Value::Str(Arc::clone(n))),
            ),
            _ => None,
        }
    }
}
