//! The symbol table: constant name → evaluated value.

use crate::Value;
use indexmap::IndexMap;

/// Insertion-ordered mapping from constant names to their values.
///
/// Re-inserting an existing name replaces its value but keeps its original
/// position. Entries are never removed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SymbolTable {
    bindings: IndexMap<String, Value>,
}

impl SymbolTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a constant by exact name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Bind `name` to `value`, returning the previous value if the name was
    /// already defined.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.bindings.insert(name.into(), value)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Iterate entries in first-declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.bindings.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, Value)> for SymbolTable {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut table = SymbolTable::new();
        for (name, value) in iter {
            table.insert(name, value);
        }
        table
    }
}
