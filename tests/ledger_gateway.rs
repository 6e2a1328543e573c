//! Ledger Gateway Tests
//!
//! Runs a fake contract gateway on a local port and checks how the client
//! maps its answers, then reads a hotel through the whole stack.

use std::path::Path;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::extract::Path as UrlPath;
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower::ServiceExt;

use easybook::http_server::{HttpServer, HttpServerConfig};
use easybook::ledger::{self, ContractGateway, LedgerConfig, LedgerError, RatingLookup};
use easybook::models;
use easybook::rest_api::AppState;

// =============================================================================
// Fake Gateway
// =============================================================================

/// Answers `ReadHotel` by hotel id:
/// - `1` a valid document rated 4.5
/// - `2` an endorsement failure
/// - `3` a body that is not a hotel
/// - anything else is unknown
async fn evaluate(
    UrlPath((channel, contract)): UrlPath<(String, String)>,
    Json(body): Json<Value>,
) -> Response {
    assert_eq!(channel, "mychannel");
    assert_eq!(contract, "easybook");
    assert_eq!(body["function"], "ReadHotel");

    match body["args"][0].as_str().unwrap_or("") {
        "1" => Json(json!({
            "id": "1",
            "name": "Hotel Lumiere",
            "isActive": true,
            "rating": 4.5,
            "serviceLevels": []
        }))
        .into_response(),
        "2" => (StatusCode::INTERNAL_SERVER_ERROR, "endorsement failed").into_response(),
        "3" => Json(json!({"unexpected": true})).into_response(),
        _ => (StatusCode::NOT_FOUND, "hotel not found").into_response(),
    }
}

async fn spawn_gateway() -> LedgerConfig {
    let app = Router::new().route("/channels/:channel/contracts/:contract/evaluate", post(evaluate));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    LedgerConfig {
        enabled: true,
        endpoint: Some(format!("http://{}", addr)),
        ..Default::default()
    }
}

// =============================================================================
// Client Mapping
// =============================================================================

#[tokio::test]
async fn test_read_hotel() {
    let gateway = ContractGateway::new(&spawn_gateway().await).unwrap();

    let hotel = gateway.read_hotel(1).await.unwrap();
    assert_eq!(hotel.id, "1");
    assert!(hotel.is_active);
    assert_eq!(gateway.lookup_rating(1).await.unwrap(), 4.5);
}

#[tokio::test]
async fn test_gateway_failures() {
    let gateway = ContractGateway::new(&spawn_gateway().await).unwrap();

    assert_eq!(
        gateway.lookup_rating(2).await.unwrap_err(),
        LedgerError::Rejected {
            status: 500,
            message: "endorsement failed".to_string()
        }
    );
    assert!(matches!(
        gateway.lookup_rating(3).await.unwrap_err(),
        LedgerError::Decode(_)
    ));
    assert_eq!(
        gateway.lookup_rating(9).await.unwrap_err(),
        LedgerError::UnknownHotel(9)
    );
}

// =============================================================================
// End to End
// =============================================================================

#[tokio::test]
async fn test_hotel_read_uses_gateway_rating() {
    let config = spawn_gateway().await;

    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/booking.json");
    let fixtures: Value = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    let store = models::open_store().unwrap();
    store.seed(&fixtures).unwrap();

    let lookup: Arc<dyn RatingLookup> = ledger::from_config(&config).unwrap();
    let state = AppState::new(Arc::new(store), lookup);
    let app = HttpServer::with_config(HttpServerConfig::default(), state).router();

    let request = Request::builder()
        .uri("/v1/hotels/1")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let hotel: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(hotel["rating"], 4.5);

    // gateway error keeps the stored rating
    let request = Request::builder()
        .uri("/v1/hotels/2")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let hotel: Value = serde_json::from_slice(&bytes).unwrap();
    assert!((hotel["rating"].as_f64().unwrap() - 3.8).abs() < 1e-6);
}
