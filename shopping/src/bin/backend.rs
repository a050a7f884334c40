use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use detection::{
    currency::{IpApiLocator, spawn_currency_detection},
    executable_utils::{AppState, initialize_executable, initialize_tracing, run_backend},
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    println!("Starting backend...");
    let config = initialize_executable()?;
    initialize_tracing(&config.backend.log_level);
    tracing::info!(project = %config.common.project_name, "Loaded config");

    let analyzer = Arc::new(shopping::analyzer()?);
    tracing::info!("{}", analyzer.coverage_summary());

    let state = if config.currency.detect {
        let locator = IpApiLocator::new(
            config.currency.lookup_url.clone(),
            Duration::from_millis(config.currency.timeout_ms),
        )?;
        let (currency, _detection) =
            spawn_currency_detection(Arc::new(locator), analyzer.currencies());
        AppState::new(analyzer, currency)
    } else {
        AppState::with_default_currency(analyzer)
    };

    run_backend(config.backend, state).await
}
