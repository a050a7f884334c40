use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::{sync::Arc, time::Duration};
use tokio::{sync::watch, task::JoinHandle};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Currency {
    pub code: &'static str,
    pub symbol: &'static str,
    pub name: &'static str,
    /// Two- and three-letter country codes using this currency
    pub countries: &'static [&'static str],
}

impl Currency {
    pub fn serves(&self, country: &str) -> bool {
        self.countries
            .iter()
            .any(|c| c.eq_ignore_ascii_case(country))
    }

    pub fn format(&self, amount: f64) -> String {
        format!("{}{:.2}", self.symbol, amount)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CurrencyError {
    #[error("currency table is empty")]
    EmptyTable,

    #[error("geolocation request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("geolocation response has no country code")]
    MissingCountry,
}

/// Ordered currency list; the first entry is the default.
#[derive(Debug, Clone)]
pub struct CurrencyTable {
    currencies: Vec<Currency>,
}

impl CurrencyTable {
    pub fn new(currencies: Vec<Currency>) -> Result<Self, CurrencyError> {
        if currencies.is_empty() {
            return Err(CurrencyError::EmptyTable);
        }
        Ok(Self { currencies })
    }

    pub fn default_currency(&self) -> Currency {
        self.currencies[0]
    }

    pub fn find_by_code(&self, code: &str) -> Option<Currency> {
        self.currencies
            .iter()
            .find(|c| c.code.eq_ignore_ascii_case(code))
            .copied()
    }

    pub fn find_by_country(&self, country: &str) -> Option<Currency> {
        self.currencies.iter().find(|c| c.serves(country)).copied()
    }

    pub fn currencies(&self) -> &[Currency] {
        &self.currencies
    }

    pub fn len(&self) -> usize {
        self.currencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.currencies.is_empty()
    }
}

/// Resolves the caller's country code.
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait CountryLocator: Send + Sync {
    async fn locate(&self) -> Result<String, CurrencyError>;
}

#[derive(Deserialize)]
struct GeoResponse {
    country_code: Option<String>,
}

/// Looks up the country through an ipapi-style JSON endpoint.
pub struct IpApiLocator {
    client: reqwest::Client,
    url: String,
}

impl IpApiLocator {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, CurrencyError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl CountryLocator for IpApiLocator {
    async fn locate(&self) -> Result<String, CurrencyError> {
        let response: GeoResponse = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        response
            .country_code
            .filter(|code| !code.trim().is_empty())
            .ok_or(CurrencyError::MissingCountry)
    }
}

/// Best-effort lookup. `None` on any failure or unknown country.
pub async fn detect_currency(
    locator: &dyn CountryLocator,
    table: &CurrencyTable,
) -> Option<Currency> {
    let country = match locator.locate().await {
        Ok(country) => country,
        Err(e) => {
            debug!(error = %e, "Using default currency");
            return None;
        }
    };

    match table.find_by_country(&country) {
        Some(currency) => {
            info!(country = %country, currency = currency.code, "Detected currency");
            Some(currency)
        }
        None => {
            debug!(country = %country, "No currency for country, using default");
            None
        }
    }
}

/// Runs [`detect_currency`] on a detached task.
///
/// The receiver starts at the table default and switches to the detected
/// currency whenever the lookup completes.
pub fn spawn_currency_detection(
    locator: Arc<dyn CountryLocator>,
    table: Arc<CurrencyTable>,
) -> (watch::Receiver<Currency>, JoinHandle<()>) {
    let (tx, rx) = watch::channel(table.default_currency());
    let handle = tokio::spawn(async move {
        if let Some(currency) = detect_currency(locator.as_ref(), &table).await {
            tx.send_replace(currency);
        }
    });
    (rx, handle)
}
