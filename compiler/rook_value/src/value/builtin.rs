//! Host-provided functions.

use std::fmt;
use std::sync::Arc;

use super::Value;
use crate::{EvalResult, Executor};

/// Native implementation of a builtin.
///
/// Receives the calling interpreter, so a builtin can call back into script
/// functions it was handed (`map(items, fn)`, `try(fn, fallback)`).
pub type BuiltinFn = Arc<dyn Fn(&mut dyn Executor, Vec<Value>) -> EvalResult + Send + Sync>;

/// A named native function, optionally grouped under a module.
#[derive(Clone)]
pub struct Builtin {
    name: String,
    module: Option<String>,
    doc: Option<String>,
    func: BuiltinFn,
}

impl Builtin {
    pub fn new(
        name: impl Into<String>,
        func: impl Fn(&mut dyn Executor, Vec<Value>) -> EvalResult + Send + Sync + 'static,
    ) -> Self {
        Builtin {
            name: name.into(),
            module: None,
            doc: None,
            func: Arc::new(func),
        }
    }

    /// A builtin reachable as `module.name`.
    pub fn in_module(
        module: impl Into<String>,
        name: impl Into<String>,
        func: impl Fn(&mut dyn Executor, Vec<Value>) -> EvalResult + Send + Sync + 'static,
    ) -> Self {
        Builtin {
            module: Some(module.into()),
            ..Builtin::new(name, func)
        }
    }

    /// A builtin that ignores its arguments and returns nil.
    pub fn noop(name: impl Into<String>, module: Option<&str>) -> Self {
        Builtin {
            module: module.map(str::to_string),
            ..Builtin::new(name, |_, _| Ok(Value::Nil))
        }
    }

    #[must_use]
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn module(&self) -> Option<&str> {
        self.module.as_deref()
    }

    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    /// Registry key: `name`, or `module.name` for module builtins.
    pub fn key(&self) -> String {
        match &self.module {
            Some(module) => format!("{module}.{}", self.name),
            None => self.name.clone(),
        }
    }

    pub fn call(&self, exec: &mut dyn Executor, args: Vec<Value>) -> EvalResult {
        (self.func)(exec, args)
    }

    /// `__name__`, `__module__` and `__doc__`.
    pub fn get_attr(&self, attr: &str) -> Option<Value> {
        match attr {
            "__name__" => Some(Value::string(self.name.as_str())),
            "__module__" => Some(self.module.as_deref().map_or(Value::Nil, Value::string)),
            "__doc__" => Some(self.doc.as_deref().map_or(Value::Nil, Value::string)),
            _ => None,
        }
    }
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builtin").field("key", &self.key()).finish()
    }
}
