//! Builtin registry and the default builtin set.
//!
//! Builtins are looked up by key: `name` for global builtins, `module.name`
//! for builtins grouped under a module. An identifier that is not bound in
//! any scope falls back to the registry, and `module.name` resolves here
//! when `module` is not a variable.

use rustc_hash::FxHashMap;

use rook_value::errors::{type_mismatch, wrong_arg_count};
use rook_value::{Builtin, ControlAction, EvalError, EvalResult, Executor, Value};

#[derive(Clone, Debug, Default)]
pub struct BuiltinRegistry {
    by_key: FxHashMap<String, Value>,
}

impl BuiltinRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for builtin in default_builtins() {
            registry.register(builtin);
        }
        registry
    }

    /// Add a builtin, replacing any with the same key.
    pub fn register(&mut self, builtin: Builtin) {
        self.by_key.insert(builtin.key(), Value::builtin(builtin));
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.by_key.get(key)
    }

    /// Look up `module.name`.
    pub fn get_qualified(&self, module: &str, name: &str) -> Option<&Value> {
        self.by_key.get(&format!("{module}.{name}"))
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

fn expect_args(name: &str, args: &[Value], expected: usize) -> Result<(), EvalError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(wrong_arg_count(name, expected, args.len()))
    }
}

/// Items of a container or iterator: values where entries have them, keys
/// otherwise. Maps yield their keys.
fn items_of(name: &str, value: &Value) -> Result<Vec<Value>, EvalError> {
    let iter = match value {
        Value::Map(entries) => {
            return Ok(entries.keys().map(|k| Value::Str(k.clone())).collect());
        }
        Value::Iter(iter) => iter.clone(),
        other => other
            .iter()
            .ok_or_else(|| type_mismatch(&format!("container for {name}"), other.type_name()))?,
    };
    Ok(iter
        .collect_entries()
        .into_iter()
        .map(|entry| entry.value.unwrap_or(entry.key))
        .collect())
}

fn builtin_len(_: &mut dyn Executor, args: Vec<Value>) -> EvalResult {
    expect_args("len", &args, 1)?;
    let len = args[0]
        .len()
        .ok_or_else(|| type_mismatch("container", args[0].type_name()))?;
    Ok(Value::Int(i64::try_from(len).unwrap_or(i64::MAX)))
}

fn builtin_print(exec: &mut dyn Executor, args: Vec<Value>) -> EvalResult {
    let line = args
        .iter()
        .map(Value::to_text)
        .collect::<Vec<_>>()
        .join(" ");
    exec.print(&line);
    Ok(Value::Nil)
}

fn builtin_type(_: &mut dyn Executor, args: Vec<Value>) -> EvalResult {
    expect_args("type", &args, 1)?;
    Ok(Value::string(args[0].type_name()))
}

fn builtin_string(_: &mut dyn Executor, args: Vec<Value>) -> EvalResult {
    expect_args("string", &args, 1)?;
    Ok(Value::string(args[0].to_text()))
}

fn builtin_error(_: &mut dyn Executor, args: Vec<Value>) -> EvalResult {
    let message = args
        .iter()
        .map(Value::to_text)
        .collect::<Vec<_>>()
        .join(" ");
    Err(EvalError::new(message).into())
}

fn builtin_list(_: &mut dyn Executor, args: Vec<Value>) -> EvalResult {
    expect_args("list", &args, 1)?;
    Ok(Value::list(items_of("list", &args[0])?))
}

fn builtin_keys(_: &mut dyn Executor, args: Vec<Value>) -> EvalResult {
    expect_args("keys", &args, 1)?;
    match &args[0] {
        Value::Map(entries) => Ok(Value::list(
            entries.keys().map(|k| Value::Str(k.clone())).collect(),
        )),
        other => {
            let iter = other
                .iter()
                .ok_or_else(|| type_mismatch("container", other.type_name()))?;
            Ok(Value::list(
                iter.collect_entries().into_iter().map(|e| e.key).collect(),
            ))
        }
    }
}

/// `map(items, fn)`: calls `fn(item)` for each item.
fn builtin_map(exec: &mut dyn Executor, args: Vec<Value>) -> EvalResult {
    expect_args("map", &args, 2)?;
    let func = &args[1];
    if !func.is_callable() {
        return Err(type_mismatch("function", func.type_name()).into());
    }
    let items = items_of("map", &args[0])?;
    let mut mapped = Vec::with_capacity(items.len());
    for item in items {
        mapped.push(exec.call(func, vec![item])?);
    }
    Ok(Value::list(mapped))
}

/// `try(fn, fallback)`: calls `fn()`; on error, returns `fallback(message)`
/// if `fallback` is callable, else `fallback` itself. Cancellation and
/// control signals are never caught.
fn builtin_try(exec: &mut dyn Executor, args: Vec<Value>) -> EvalResult {
    expect_args("try", &args, 2)?;
    match exec.call(&args[0], Vec::new()) {
        Err(ControlAction::Error(err)) if !err.is_cancelled() => {
            tracing::debug!(error = %err, "try caught error");
            let fallback = &args[1];
            if fallback.is_callable() {
                exec.call(fallback, vec![Value::string(err.message())])
            } else {
                Ok(fallback.clone())
            }
        }
        other => other,
    }
}

/// `len`, `print`, `type`, `string`, `error`, `list`, `keys`, `map`, `try`.
pub fn default_builtins() -> Vec<Builtin> {
    vec![
        Builtin::new("len", builtin_len).with_doc("Number of items in a container."),
        Builtin::new("print", builtin_print).with_doc("Print arguments separated by spaces."),
        Builtin::new("type", builtin_type).with_doc("Name of a value's type."),
        Builtin::new("string", builtin_string).with_doc("Text form of a value."),
        Builtin::new("error", builtin_error).with_doc("Raise an error with a message."),
        Builtin::new("list", builtin_list).with_doc("Collect a container's items into a list."),
        Builtin::new("keys", builtin_keys).with_doc("Keys or indices of a container."),
        Builtin::new("map", builtin_map).with_doc("Apply a function to every item."),
        Builtin::new("try", builtin_try).with_doc("Call a function, recovering from errors."),
    ]
}
