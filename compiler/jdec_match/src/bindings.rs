//! Variable bindings captured during one match.

use rustc_hash::FxHashMap;

/// Values bound to `$name$` variables.
///
/// The first occurrence of a name binds it; every later occurrence must
/// carry an equal value. `V` is whatever the target tree binds, typically a
/// node or a rendered property.
#[derive(Clone, Debug)]
pub struct VariableBindings<V> {
    values: FxHashMap<String, V>,
}

impl<V: PartialEq> VariableBindings<V> {
    pub fn new() -> Self {
        VariableBindings {
            values: FxHashMap::default(),
        }
    }

    /// Bind `name` to `value`, or check it against the existing binding.
    ///
    /// Returns `false` only when `name` is already bound to a different
    /// value; the existing binding is left untouched in that case.
    pub fn check_and_set(&mut self, name: &str, value: V) -> bool {
        match self.values.get(name) {
            Some(bound) => *bound == value,
            None => {
                self.values.insert(name.to_owned(), value);
                true
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&V> {
        self.values.get(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Bound names and values, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl<V: PartialEq> Default for VariableBindings<V> {
    fn default() -> Self {
        Self::new()
    }
}
