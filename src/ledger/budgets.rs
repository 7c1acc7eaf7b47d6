use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Monthly spending limits keyed by category name.
///
/// Keys keep the casing of the first write; lookups and updates match
/// case-insensitively so `groceries` and `Groceries` are the same budget.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryBudgets {
    limits: BTreeMap<String, f64>,
}

impl CategoryBudgets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers or updates the monthly limit for a category, preserving
    /// the stored casing if the category already exists.
    pub fn set(&mut self, name: &str, limit: f64) {
        let key = self
            .canonical(name)
            .map(str::to_string)
            .unwrap_or_else(|| name.to_string());
        self.limits.insert(key, limit);
    }

    /// Case-insensitive limit lookup.
    pub fn limit(&self, name: &str) -> Option<f64> {
        self.canonical(name).and_then(|key| self.limits.get(key)).copied()
    }

    /// Returns the stored casing for a category, if present.
    pub fn canonical(&self, name: &str) -> Option<&str> {
        self.limits
            .keys()
            .find(|key| key.eq_ignore_ascii_case(name))
            .map(String::as_str)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.limits.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.limits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.limits.is_empty()
    }
}
