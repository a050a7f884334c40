use std::time::Duration;

use axum::{Json, Router, http::StatusCode, routing::get};
use detection::currency::{CountryLocator, CurrencyError, IpApiLocator};
use serde_json::{Value, json};

/// Serves `router` on an ephemeral local port and returns its base URL.
async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", address)
}

fn geo_router() -> Router {
    Router::new()
        .route(
            "/json/",
            get(|| async { Json(json!({ "ip": "203.0.113.7", "country_code": "DE" })) }),
        )
        .route(
            "/limited/",
            get(|| async { Json(json!({ "error": true, "reason": "RateLimited" })) }),
        )
        .route("/blank/", get(|| async { Json(json!({ "country_code": "  " })) }))
        .route(
            "/broken/",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, Json(Value::Null)) }),
        )
}

async fn locate(path: &str) -> Result<String, CurrencyError> {
    let base = serve(geo_router()).await;
    let locator = IpApiLocator::new(format!("{}{}", base, path), Duration::from_secs(5))?;
    locator.locate().await
}

#[tokio::test]
async fn test_country_code_is_read_from_response() {
    assert_eq!(locate("/json/").await.unwrap(), "DE");
}

#[tokio::test]
async fn test_error_body_has_no_country() {
    let err = locate("/limited/").await.unwrap_err();
    assert!(matches!(err, CurrencyError::MissingCountry));
    assert_eq!(err.to_string(), "geolocation response has no country code");
}

#[tokio::test]
async fn test_blank_country_code_is_missing() {
    let err = locate("/blank/").await.unwrap_err();
    assert!(matches!(err, CurrencyError::MissingCountry));
}

#[tokio::test]
async fn test_error_status_is_request_error() {
    let err = locate("/broken/").await.unwrap_err();
    assert!(matches!(err, CurrencyError::Request(_)));
}

#[tokio::test]
async fn test_unreachable_service_is_request_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);

    let locator =
        IpApiLocator::new(format!("http://{}/json/", address), Duration::from_millis(500)).unwrap();
    let err = locator.locate().await.unwrap_err();
    assert!(matches!(err, CurrencyError::Request(_)));
}
