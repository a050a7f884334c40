use serde::Serialize;
use std::collections::BTreeMap;

/// Pure test over one analysis request's signals.
pub type Predicate = fn(&SignalRecord) -> bool;

/// Signals supplied for one product listing.
///
/// Built once through [`SignalRecordBuilder`] and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SignalRecord {
    item_name: String,
    price: f64,
    original_price: Option<f64>,
    flags: BTreeMap<String, bool>,
}

impl SignalRecord {
    pub fn builder(item_name: impl Into<String>, price: f64) -> SignalRecordBuilder {
        SignalRecordBuilder {
            record: SignalRecord {
                item_name: item_name.into(),
                price,
                ..Default::default()
            },
        }
    }

    pub fn item_name(&self) -> &str {
        &self.item_name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn original_price(&self) -> Option<f64> {
        self.original_price
    }

    /// Value of a named flag; a flag that was never supplied reads as `false`.
    pub fn flag(&self, name: &str) -> bool {
        self.flags.get(name).copied().unwrap_or(false)
    }

    /// Number of flags set to `true`.
    pub fn set_flag_count(&self) -> usize {
        self.flags.values().filter(|set| **set).count()
    }
}

pub struct SignalRecordBuilder {
    record: SignalRecord,
}

impl SignalRecordBuilder {
    pub fn original_price(mut self, original_price: Option<f64>) -> Self {
        self.record.original_price = original_price;
        self
    }

    pub fn flag(mut self, name: impl Into<String>, value: bool) -> Self {
        self.record.flags.insert(name.into(), value);
        self
    }

    pub fn flags<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names.into_iter().fold(self, |builder, name| builder.flag(name, true))
    }

    pub fn build(self) -> SignalRecord {
        self.record
    }
}

/// A cognitive bias explanation and the condition under which it applies.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BiasRule {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub explanation: &'static str,
    pub advice: &'static str,
    #[serde(skip)]
    pub predicate: Predicate,
}

impl BiasRule {
    pub fn applies_to(&self, record: &SignalRecord) -> bool {
        (self.predicate)(record)
    }
}

/// A recognized shopping-context checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SignalOption {
    pub id: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
}
