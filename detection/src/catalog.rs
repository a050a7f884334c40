use std::collections::HashSet;

use crate::model::BiasRule;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("bias rule at position {position} has an empty id")]
    EmptyRuleId { position: usize },

    #[error("duplicate bias rule id: {0}")]
    DuplicateRuleId(String),
}

/// Ordered, immutable list of bias rules. Position is display order.
#[derive(Debug, Clone)]
pub struct RuleCatalog {
    rules: Vec<BiasRule>,
}

impl RuleCatalog {
    pub fn new(rules: Vec<BiasRule>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for (position, rule) in rules.iter().enumerate() {
            if rule.id.is_empty() {
                return Err(CatalogError::EmptyRuleId { position });
            }
            if !seen.insert(rule.id) {
                return Err(CatalogError::DuplicateRuleId(rule.id.to_string()));
            }
        }
        Ok(Self { rules })
    }

    pub fn rules(&self) -> &[BiasRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BiasRule> {
        self.rules.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SignalRecord;

    fn never(_: &SignalRecord) -> bool {
        false
    }

    fn rule(id: &'static str) -> BiasRule {
        BiasRule {
            id,
            name: id,
            description: "",
            explanation: "",
            advice: "",
            predicate: never,
        }
    }

    #[test]
    fn test_catalog_keeps_order() {
        let catalog = RuleCatalog::new(vec![rule("b"), rule("a"), rule("c")]).unwrap();
        let ids: Vec<_> = catalog.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let err = RuleCatalog::new(vec![rule("a"), rule("b"), rule("a")]).unwrap_err();
        assert_eq!(err, CatalogError::DuplicateRuleId("a".to_string()));
    }

    #[test]
    fn test_empty_id_rejected() {
        let err = RuleCatalog::new(vec![rule("a"), rule("")]).unwrap_err();
        assert_eq!(err, CatalogError::EmptyRuleId { position: 1 });
    }

    #[test]
    fn test_empty_catalog_is_allowed() {
        let catalog = RuleCatalog::new(Vec::new()).unwrap();
        assert!(catalog.is_empty());
    }
}
