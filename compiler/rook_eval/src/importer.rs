//! Module resolution for `import` statements.

use rustc_hash::FxHashMap;

use rook_value::errors::import_failed;
use rook_value::{EvalError, Module, Value};

/// Resolves a module name to the value `import` binds.
///
/// How a module is found, loaded or compiled is the host's business; the
/// interpreter only binds the result as a constant.
pub trait Importer {
    fn import(&mut self, name: &str) -> Result<Value, EvalError>;
}

/// Importer backed by a fixed set of pre-built modules.
#[derive(Clone, Debug, Default)]
pub struct ModuleTable {
    modules: FxHashMap<String, Value>,
}

impl ModuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_module(mut self, module: Module) -> Self {
        self.insert(module);
        self
    }

    pub fn insert(&mut self, module: Module) {
        self.modules.insert(module.name.clone(), Value::module(module));
    }
}

impl Importer for ModuleTable {
    fn import(&mut self, name: &str) -> Result<Value, EvalError> {
        tracing::debug!(module = name, "import");
        self.modules
            .get(name)
            .cloned()
            .ok_or_else(|| import_failed(name, "module not found"))
    }
}
