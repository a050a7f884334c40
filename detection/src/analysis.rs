use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt, sync::Arc};
use tracing::{debug, warn};

use crate::{
    catalog::RuleCatalog,
    currency::{Currency, CurrencyTable},
    matcher::Matcher,
    model::{BiasRule, SignalOption, SignalRecord},
};

pub const NOT_READY_MESSAGE: &str = "Enter item name and price to continue";
pub const NO_BIASES_MESSAGE: &str =
    "No obvious biases detected. This appears to be a straightforward purchase decision!";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("{}", NOT_READY_MESSAGE)]
    NotReady,

    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),
}

/// Raw form input as entered by the shopper.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    #[serde(default)]
    pub item_name: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub original_price: Option<String>,
    #[serde(default)]
    pub selected_options: HashMap<String, bool>,
    #[serde(default)]
    pub currency: Option<String>,
}

/// Parses a user-entered amount. Empty, malformed and non-finite input is absent.
pub fn parse_price(input: &str) -> Option<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
}

impl AnalysisRequest {
    pub fn is_ready(&self) -> bool {
        !self.item_name.trim().is_empty() && parse_price(&self.price).is_some()
    }

    /// Builds the signal record, keeping only options listed in `recognized`.
    pub fn to_record(&self, recognized: &[SignalOption]) -> Result<SignalRecord, AnalysisError> {
        if !self.is_ready() {
            return Err(AnalysisError::NotReady);
        }
        let price = parse_price(&self.price).ok_or(AnalysisError::NotReady)?;

        let mut builder = SignalRecord::builder(self.item_name.trim(), price)
            .original_price(self.original_price.as_deref().and_then(parse_price));

        for (name, value) in &self.selected_options {
            if recognized.iter().any(|option| option.id == name.as_str()) {
                builder = builder.flag(name.as_str(), *value);
            } else {
                warn!(option = %name, "Ignoring unrecognized shopping option");
            }
        }

        Ok(builder.build())
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub item_name: String,
    pub currency: &'static str,
    pub price: String,
    pub original_price: Option<String>,
    pub selected_count: usize,
    pub biases: Vec<BiasRule>,
    pub tactics_summary: String,
    pub bias_summary: String,
    pub analyzed_at: DateTime<Utc>,
}

pub fn tactics_summary(selected: usize) -> String {
    let suffix = if selected == 1 { "" } else { "s" };
    format!("{selected} marketing tactic{suffix} detected in listing")
}

pub fn bias_summary(detected: usize) -> String {
    match detected {
        0 => NO_BIASES_MESSAGE.to_string(),
        1 => "1 cognitive bias may be affecting your decision".to_string(),
        n => format!("{n} cognitive biases may be affecting your decision"),
    }
}

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} - {}", self.item_name, self.price)?;
        if let Some(original) = &self.original_price {
            writeln!(f, "Was: {original}")?;
        }
        writeln!(f, "{}", self.tactics_summary)?;
        writeln!(f, "{}", self.bias_summary)?;
        for bias in &self.biases {
            writeln!(f)?;
            writeln!(f, "{}", bias.name)?;
            writeln!(f, "  {}", bias.description)?;
            writeln!(f, "  What's happening: {}", bias.explanation)?;
            writeln!(f, "  Counter this bias: {}", bias.advice)?;
        }
        Ok(())
    }
}

/// Runs one analysis per request against a fixed catalog.
pub struct Analyzer {
    catalog: Arc<RuleCatalog>,
    options: Arc<Vec<SignalOption>>,
    currencies: Arc<CurrencyTable>,
}

impl Analyzer {
    pub fn new(
        catalog: RuleCatalog,
        options: Vec<SignalOption>,
        currencies: CurrencyTable,
    ) -> Self {
        Self {
            catalog: Arc::new(catalog),
            options: Arc::new(options),
            currencies: Arc::new(currencies),
        }
    }

    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    pub fn options(&self) -> &[SignalOption] {
        &self.options
    }

    pub fn currencies(&self) -> Arc<CurrencyTable> {
        Arc::clone(&self.currencies)
    }

    /// "Tracking N cognitive biases • M shopping scenarios"
    pub fn coverage_summary(&self) -> String {
        format!(
            "Tracking {} cognitive biases • {} shopping scenarios",
            self.catalog.len(),
            self.options.len()
        )
    }

    /// Analyzes one request. `fallback` is used when the request names no currency.
    pub fn analyze(
        &self,
        request: &AnalysisRequest,
        fallback: &Currency,
    ) -> Result<AnalysisReport, AnalysisError> {
        let record = request.to_record(&self.options)?;
        let currency = match request.currency.as_deref().map(str::trim) {
            Some(code) if !code.is_empty() => self
                .currencies
                .find_by_code(code)
                .ok_or_else(|| AnalysisError::UnknownCurrency(code.to_string()))?,
            _ => *fallback,
        };

        let biases: Vec<BiasRule> = self
            .catalog
            .matches(&record)
            .into_iter()
            .copied()
            .collect();
        debug!(
            item = record.item_name(),
            selected = record.set_flag_count(),
            matched = biases.len(),
            "Analyzed listing"
        );

        let selected_count = record.set_flag_count();
        Ok(AnalysisReport {
            item_name: record.item_name().to_string(),
            currency: currency.code,
            price: currency.format(record.price()),
            original_price: record.original_price().map(|amount| currency.format(amount)),
            selected_count,
            tactics_summary: tactics_summary(selected_count),
            bias_summary: bias_summary(biases.len()),
            biases,
            analyzed_at: Utc::now(),
        })
    }
}
