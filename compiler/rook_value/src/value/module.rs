use std::collections::BTreeMap;

use super::Value;

/// A named bag of values produced by an import.
#[derive(Clone, Debug, Default)]
pub struct Module {
    pub name: String,
    pub members: BTreeMap<String, Value>,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Module {
            name: name.into(),
            members: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_member(mut self, name: impl Into<String>, value: Value) -> Self {
        self.members.insert(name.into(), value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.members.get(name)
    }
}
