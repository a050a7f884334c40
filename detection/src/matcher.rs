use crate::{catalog::RuleCatalog, model::{BiasRule, SignalRecord}};

/// Returns every rule whose predicate holds for `record`, in catalog order.
pub fn match_rules<'c>(record: &SignalRecord, catalog: &'c [BiasRule]) -> Vec<&'c BiasRule> {
    catalog
        .iter()
        .filter(|rule| rule.applies_to(record))
        .collect()
}

pub trait Matcher {
    fn matches(&self, record: &SignalRecord) -> Vec<&BiasRule>;
}

impl Matcher for RuleCatalog {
    fn matches(&self, record: &SignalRecord) -> Vec<&BiasRule> {
        match_rules(record, self.rules())
    }
}

impl Matcher for [BiasRule] {
    fn matches(&self, record: &SignalRecord) -> Vec<&BiasRule> {
        match_rules(record, self)
    }
}
