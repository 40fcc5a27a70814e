//! Label interning.
//!
//! Labels are full sentences used both as questions and as rule actions.
//! Inside a compiled rule set they are replaced by small integer ids so that
//! fact lookups and condition matching compare integers, not text.

use std::collections::HashMap;

/// Interned label handle, valid only within the interner that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LabelId(u32);

impl LabelId {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Bidirectional label ↔ id table.
#[derive(Debug, Clone, Default)]
pub struct LabelInterner {
    ids: HashMap<String, LabelId>,
    labels: Vec<String>,
}

impl LabelInterner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id for `label`, issuing a new one on first sight.
    pub fn intern(&mut self, label: &str) -> LabelId {
        if let Some(id) = self.ids.get(label) {
            return *id;
        }
        let id = LabelId(self.labels.len() as u32);
        self.labels.push(label.to_string());
        self.ids.insert(label.to_string(), id);
        id
    }

    pub fn get(&self, label: &str) -> Option<LabelId> {
        self.ids.get(label).copied()
    }

    /// Text of an interned label.
    pub fn resolve(&self, id: LabelId) -> &str {
        &self.labels[id.index()]
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// All issued ids in issue order.
    pub fn ids(&self) -> impl Iterator<Item = LabelId> + '_ {
        (0..self.labels.len()).map(|i| LabelId(i as u32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_returns_same_id_for_same_text() {
        let mut interner = LabelInterner::new();
        let a = interner.intern("applicant is a national");
        let b = interner.intern("applicant is a national");
        assert_eq!(a, b);
        assert_eq!(interner.len(), 1);
    }

    #[test]
    fn resolve_returns_original_text() {
        let mut interner = LabelInterner::new();
        let id = interner.intern("会社がEビザの条件を満たします");
        assert_eq!(interner.resolve(id), "会社がEビザの条件を満たします");
    }

    #[test]
    fn ids_follow_first_sight_order() {
        let mut interner = LabelInterner::new();
        interner.intern("b");
        interner.intern("a");
        let texts: Vec<&str> = interner.ids().map(|id| interner.resolve(id)).collect();
        assert_eq!(texts, vec!["b", "a"]);
        assert_eq!(interner.get("zzz"), None);
    }
}
