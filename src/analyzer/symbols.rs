use rustc_hash::FxHashSet;
use serde::{Serialize, Serializer};

use crate::ast::SymbolType;

/// `&` separates rest parameters and `%`, `%1`, `%&` are the arguments of `#(...)`.
/// Neither is ever classified.
pub fn is_special_token(name: &str) -> bool {
    name == "&" || name.starts_with('%')
}

/// Unique names in the order they were first seen.
#[derive(Debug, Clone, Default)]
pub struct SymbolSet {
    names: Vec<String>,
    seen: FxHashSet<String>,
}

impl SymbolSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the name was already present.
    pub fn insert<S: Into<String>>(&mut self, name: S) -> bool {
        let name = name.into();
        if self.seen.contains(&name) {
            return false;
        }

        self.seen.insert(name.clone());
        self.names.push(name);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.seen.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.names.clone()
    }
}

// the order of the names carries no meaning
impl PartialEq for SymbolSet {
    fn eq(&self, other: &Self) -> bool {
        self.seen == other.seen
    }
}

impl Serialize for SymbolSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.names.iter())
    }
}

impl<S: Into<String>> std::iter::FromIterator<S> for SymbolSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = SymbolSet::new();
        for name in iter {
            set.insert(name);
        }
        set
    }
}

/// Every symbol the analyzer classified, grouped by classification.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolInfo {
    pub built_ins: SymbolSet,
    pub locally_defined: SymbolSet,
    pub unknowns: SymbolSet,
}

impl SymbolInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, name: &str, symbol_type: SymbolType) {
        let set = match symbol_type {
            SymbolType::Builtin => &mut self.built_ins,
            SymbolType::Local => &mut self.locally_defined,
            SymbolType::Unknown => &mut self.unknowns,
        };

        set.insert(name);
    }

    pub fn get(&self, symbol_type: SymbolType) -> &SymbolSet {
        match symbol_type {
            SymbolType::Builtin => &self.built_ins,
            SymbolType::Local => &self.locally_defined,
            SymbolType::Unknown => &self.unknowns,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.built_ins.is_empty() && self.locally_defined.is_empty() && self.unknowns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_special_tokens() {
        assert!(is_special_token("&"));
        assert!(is_special_token("%"));
        assert!(is_special_token("%2"));
        assert!(is_special_token("%&"));
        assert!(!is_special_token("&rest"));
        assert!(!is_special_token("x%"));
    }

    #[test]
    fn test_symbol_set_keeps_first_occurrence_order() {
        let mut set = SymbolSet::new();

        assert!(set.insert("b"));
        assert!(set.insert("a"));
        assert!(!set.insert("b"));

        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_symbol_set_equality_ignores_order() {
        let lhs: SymbolSet = vec!["x", "y"].into_iter().collect();
        let rhs: SymbolSet = vec!["y", "x"].into_iter().collect();

        assert_eq!(lhs, rhs);
    }

    #[test]
    fn test_record_groups_by_classification() {
        let mut info = SymbolInfo::new();
        info.record("+", SymbolType::Builtin);
        info.record("x", SymbolType::Local);
        info.record("frob", SymbolType::Unknown);
        info.record("+", SymbolType::Builtin);

        assert_eq!(info.built_ins.to_vec(), vec!["+"]);
        assert!(info.get(SymbolType::Local).contains("x"));
        assert!(info.get(SymbolType::Unknown).contains("frob"));
    }

    #[test]
    fn test_serializes_with_camel_case_keys() {
        let mut info = SymbolInfo::new();
        info.record("inc", SymbolType::Builtin);

        let json = serde_json::to_value(&info).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"builtIns": ["inc"], "locallyDefined": [], "unknowns": []})
        );
    }
}
