//! Lexical scopes.
//!
//! Scopes live in an arena owned by [`Environment`] and are addressed by
//! [`ScopeId`]. Each scope has a name (for diagnostics), its own bindings and
//! an optional parent; lookups walk the parent chain.
//!
//! A function value keeps the `ScopeId` it was defined in. Defining a
//! function marks that scope and its ancestors *captured*; captured scopes
//! are never recycled. Every other scope is returned to a free list by
//! [`Environment::release`] when the construct that opened it finishes.

use rustc_hash::FxHashMap;

use rook_ir::Name;
use rook_value::{ScopeId, Value};

/// Whether a binding can be reassigned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mutability {
    /// `x := ...`
    Mutable,
    /// `const x = ...`
    Constant,
}

impl Mutability {
    #[inline]
    pub fn is_mutable(self) -> bool {
        matches!(self, Mutability::Mutable)
    }
}

/// Returned by [`Environment::declare`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DeclareError {
    /// The scope already holds a constant with this name.
    #[error("constant already declared in this scope")]
    ConstantExists,
}

/// Returned by [`Environment::assign`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AssignError {
    /// The nearest binding is a constant.
    #[error("binding is constant")]
    Constant,
    /// No scope on the chain binds the name.
    #[error("name is not declared")]
    Undefined,
}

/// Returned by [`Environment::lookup`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("name is not declared")]
pub struct NotFound;

#[derive(Clone, Debug)]
struct Binding {
    value: Value,
    mutability: Mutability,
}

#[derive(Debug)]
struct ScopeRecord {
    name: &'static str,
    parent: Option<ScopeId>,
    bindings: FxHashMap<Name, Binding>,
    /// Declaration order, for `keys` and `contents`.
    order: Vec<Name>,
    captured: bool,
    live: bool,
}

impl ScopeRecord {
    fn new(name: &'static str, parent: Option<ScopeId>) -> Self {
        ScopeRecord {
            name,
            parent,
            bindings: FxHashMap::default(),
            order: Vec::new(),
            captured: false,
            live: true,
        }
    }
}

/// Arena of scopes.
#[derive(Debug)]
pub struct Environment {
    scopes: Vec<ScopeRecord>,
    free: Vec<ScopeId>,
    root: ScopeId,
}

impl Environment {
    /// An environment with a single root scope named `global`.
    pub fn new() -> Self {
        Environment {
            scopes: vec![ScopeRecord::new("global", None)],
            free: Vec::new(),
            root: ScopeId::new(0),
        }
    }

    #[inline]
    pub fn root(&self) -> ScopeId {
        self.root
    }

    #[inline]
    fn record(&self, scope: ScopeId) -> &ScopeRecord {
        let record = &self.scopes[scope.index()];
        debug_assert!(record.live, "use of released scope {scope:?}");
        record
    }

    #[inline]
    fn record_mut(&mut self, scope: ScopeId) -> &mut ScopeRecord {
        let record = &mut self.scopes[scope.index()];
        debug_assert!(record.live, "use of released scope {scope:?}");
        record
    }

    /// Open a scope whose lookups fall back to `parent`.
    pub fn new_child(&mut self, parent: ScopeId, name: &'static str) -> ScopeId {
        if let Some(id) = self.free.pop() {
            self.scopes[id.index()] = ScopeRecord::new(name, Some(parent));
            return id;
        }
        let index = u32::try_from(self.scopes.len())
            .unwrap_or_else(|_| panic!("scope arena exceeded u32::MAX scopes"));
        self.scopes.push(ScopeRecord::new(name, Some(parent)));
        ScopeId::new(index)
    }

    /// Bind `name` in `scope` itself.
    ///
    /// Redeclaring a mutable binding replaces it; redeclaring a constant
    /// fails.
    pub fn declare(
        &mut self,
        scope: ScopeId,
        name: Name,
        value: Value,
        mutability: Mutability,
    ) -> Result<(), DeclareError> {
        let record = self.record_mut(scope);
        match record.bindings.get_mut(&name) {
            Some(existing) if !existing.mutability.is_mutable() => Err(DeclareError::ConstantExists),
            Some(existing) => {
                *existing = Binding { value, mutability };
                Ok(())
            }
            None => {
                record.bindings.insert(name, Binding { value, mutability });
                record.order.push(name);
                Ok(())
            }
        }
    }

    /// Rebind the nearest existing `name` on the chain starting at `scope`.
    pub fn assign(&mut self, scope: ScopeId, name: Name, value: Value) -> Result<(), AssignError> {
        let owner = self.find_owner(scope, name).ok_or(AssignError::Undefined)?;
        let binding = self
            .record_mut(owner)
            .bindings
            .get_mut(&name)
            .ok_or(AssignError::Undefined)?;
        if !binding.mutability.is_mutable() {
            return Err(AssignError::Constant);
        }
        binding.value = value;
        Ok(())
    }

    /// Resolve `name`, searching `scope` then its ancestors.
    pub fn lookup(&self, scope: ScopeId, name: Name) -> Result<Value, NotFound> {
        let owner = self.find_owner(scope, name).ok_or(NotFound)?;
        self.record(owner)
            .bindings
            .get(&name)
            .map(|b| b.value.clone())
            .ok_or(NotFound)
    }

    /// Whether `name` resolves anywhere on the chain.
    pub fn is_declared(&self, scope: ScopeId, name: Name) -> bool {
        self.find_owner(scope, name).is_some()
    }

    fn find_owner(&self, scope: ScopeId, name: Name) -> Option<ScopeId> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let record = self.record(id);
            if record.bindings.contains_key(&name) {
                return Some(id);
            }
            current = record.parent;
        }
        None
    }

    /// Remove every binding from `scope`, keeping the scope itself.
    pub fn clear(&mut self, scope: ScopeId) {
        let record = self.record_mut(scope);
        record.bindings.clear();
        record.order.clear();
    }

    /// Names bound directly in `scope`, in declaration order.
    pub fn keys(&self, scope: ScopeId) -> Vec<Name> {
        self.record(scope).order.clone()
    }

    /// Bindings made directly in `scope`, in declaration order.
    pub fn contents(&self, scope: ScopeId) -> Vec<(Name, Value)> {
        let record = self.record(scope);
        record
            .order
            .iter()
            .filter_map(|name| record.bindings.get(name).map(|b| (*name, b.value.clone())))
            .collect()
    }

    pub fn name(&self, scope: ScopeId) -> &'static str {
        self.record(scope).name
    }

    pub fn parent(&self, scope: ScopeId) -> Option<ScopeId> {
        self.record(scope).parent
    }

    /// Pin `scope` and its ancestors: a function now refers to them.
    pub fn mark_captured(&mut self, scope: ScopeId) {
        let mut current = Some(scope);
        while let Some(id) = current {
            let record = self.record_mut(id);
            if record.captured {
                return;
            }
            record.captured = true;
            current = record.parent;
        }
    }

    pub fn is_captured(&self, scope: ScopeId) -> bool {
        self.record(scope).captured
    }

    /// Recycle `scope` unless it is the root or captured.
    pub fn release(&mut self, scope: ScopeId) {
        if scope == self.root {
            return;
        }
        let record = self.record_mut(scope);
        if record.captured {
            return;
        }
        record.bindings = FxHashMap::default();
        record.order = Vec::new();
        record.live = false;
        self.free.push(scope);
    }

    /// Scopes currently in use, including the root.
    pub fn live_scopes(&self) -> usize {
        self.scopes.len() - self.free.len()
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
