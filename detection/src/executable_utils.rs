use axum::{
    Router,
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use common::config::{BackendConfig, Config};
use http::header::{HeaderValue, InvalidHeaderValue};
use metrics::{counter, histogram};
use std::{error::Error, sync::Arc, time::Instant};
use tokio::sync::watch;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    analysis::{AnalysisError, AnalysisRequest, Analyzer},
    currency::Currency,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to config file
    #[arg(short, long, default_value = "target/debug/config/total_config.yaml")]
    pub config: String,
}

/// Loads `.env`, parses the command line and reads the config file.
pub fn initialize_executable() -> Result<Config, Box<dyn Error + Send + Sync>> {
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("No .env loaded: {}", e);
    }

    let args = Args::parse();
    println!("Loading config from: {}", args.config);
    let config = Config::load(&args.config)?;
    Ok(config)
}

pub fn initialize_tracing(log_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[derive(Clone)]
pub struct AppState {
    analyzer: Arc<Analyzer>,
    currency: watch::Receiver<Currency>,
}

impl AppState {
    pub fn new(analyzer: Arc<Analyzer>, currency: watch::Receiver<Currency>) -> Self {
        Self { analyzer, currency }
    }

    /// State whose currency never changes from the table default.
    pub fn with_default_currency(analyzer: Arc<Analyzer>) -> Self {
        let (_, currency) = watch::channel(analyzer.currencies().default_currency());
        Self::new(analyzer, currency)
    }
}

pub fn cors_layer(allowed_origin: Option<&str>) -> Result<CorsLayer, InvalidHeaderValue> {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    Ok(match allowed_origin {
        Some(origin) => cors.allow_origin(origin.parse::<HeaderValue>()?),
        None => cors.allow_origin(Any),
    })
}

pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/api/biases", get(list_biases))
        .route("/api/options", get(list_options))
        .route("/api/currencies", get(list_currencies))
        .route("/api/currency", get(current_currency))
        .route("/api/analyze", post(analyze))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

pub async fn run_backend(
    config: BackendConfig,
    state: AppState,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let app = build_router(state, cors_layer(config.allowed_origin.as_deref())?);

    tracing::info!("Starting backend service at {}", config.server_address);
    let listener = tokio::net::TcpListener::bind(&config.server_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK").into_response()
}

async fn list_biases(State(state): State<AppState>) -> Response {
    Json(state.analyzer.catalog().rules()).into_response()
}

async fn list_options(State(state): State<AppState>) -> Response {
    Json(state.analyzer.options()).into_response()
}

async fn list_currencies(State(state): State<AppState>) -> Response {
    Json(state.analyzer.currencies().currencies()).into_response()
}

async fn current_currency(State(state): State<AppState>) -> Response {
    let currency = *state.currency.borrow();
    Json(currency).into_response()
}

fn status_for(error: &AnalysisError) -> StatusCode {
    match error {
        AnalysisError::NotReady => StatusCode::UNPROCESSABLE_ENTITY,
        AnalysisError::UnknownCurrency(_) => StatusCode::BAD_REQUEST,
    }
}

pub async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> Response {
    let t0 = Instant::now();
    let fallback = *state.currency.borrow();

    match state.analyzer.analyze(&request, &fallback) {
        Ok(report) => {
            counter!("bias_detector_analyses_total").increment(1);
            counter!("bias_detector_matches_total").increment(report.biases.len() as u64);
            histogram!("bias_detector_analyze_seconds").record(t0.elapsed().as_secs_f64());
            tracing::info!(
                item = %report.item_name,
                matched = report.biases.len(),
                "Analysis complete"
            );
            (StatusCode::OK, Json(report)).into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "Rejected analysis request");
            (status_for(&e), e.to_string()).into_response()
        }
    }
}
