//! Shopping bias detector: the bias catalog, shopping options and currency
//! table, wired into the generic `detection` engine.

pub mod biases;
pub mod currencies;
pub mod options;

use detection::{
    analysis::Analyzer,
    catalog::CatalogError,
    currency::CurrencyError,
};

#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Currency(#[from] CurrencyError),
}

/// Analyzer over the shopping bias catalog, options and currencies.
pub fn analyzer() -> Result<Analyzer, SetupError> {
    Ok(Analyzer::new(
        biases::catalog()?,
        options::shopping_options(),
        currencies::currency_table()?,
    ))
}
