//! HTTP API Tests
//!
//! Drives the full router in-process with `tower::ServiceExt::oneshot`:
//! - Collection CRUD and error bodies
//! - Guest registration envelope
//! - Hotel search with ledger ratings
//! - Room reservation commit and rollback

use std::path::Path;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use easybook::http_server::{HttpServer, HttpServerConfig};
use easybook::ledger::{RatingLookup, StaticRatings};
use easybook::models::{self, Guest};
use argon2::password_hash::{PasswordHash, PasswordVerifier};
use argon2::Argon2;
use easybook::rest_api::password::hash_password;
use easybook::rest_api::AppState;
use easybook::store::Store;

// =============================================================================
// Helper Functions
// =============================================================================

fn fixture_store() -> Arc<Store> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/booking.json");
    let fixtures: Value = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    let store = models::open_store().unwrap();
    store.seed(&fixtures).unwrap();
    Arc::new(store)
}

fn app_with(store: Arc<Store>, ledger: Arc<dyn RatingLookup>) -> Router {
    HttpServer::with_config(HttpServerConfig::default(), AppState::new(store, ledger)).router()
}

fn app(store: Arc<Store>) -> Router {
    HttpServer::with_config(HttpServerConfig::default(), AppState::offline(store)).router()
}

async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

async fn post(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body)).await
}

fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

fn names(rows: &Value) -> Vec<&str> {
    rows.as_array()
        .unwrap()
        .iter()
        .map(|row| row["name"].as_str().unwrap())
        .collect()
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health() {
    let (status, body) = get(app(fixture_store()), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

// =============================================================================
// Collections
// =============================================================================

#[tokio::test]
async fn test_city_crud() {
    let store = fixture_store();

    let (status, city) = post(
        app(store.clone()),
        "/v1/cities",
        json!({"name": "Kyoto", "country": "JP"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(city["id"], 4);

    let (status, city) = get(app(store.clone()), "/v1/cities/4").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(city["name"], "Kyoto");

    // path id wins over the body id
    let (status, city) = send(
        app(store.clone()),
        Method::PUT,
        "/v1/cities/4",
        Some(json!({"id": 99, "name": "Kyoto", "country": "Japan"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(city["id"], 4);
    assert_eq!(city["country"], "Japan");

    let (status, body) = send(app(store.clone()), Method::DELETE, "/v1/cities/4", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"deleted": true, "id": 4}));

    let (status, body) = get(app(store), "/v1/cities/4").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 404);
    assert_eq!(body["error"], "no row found in 'city' with id 4");
}

#[tokio::test]
async fn test_list_with_query_parameters() {
    let (status, rows) = get(
        app(fixture_store()),
        "/v1/hotels?query=city.name:Paris&sortby=rating&order=desc&fields=id,name",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        rows,
        json!([
            {"id": 1, "name": "Hotel Lumiere"},
            {"id": 2, "name": "Etoile Suites"}
        ])
    );
}

#[tokio::test]
async fn test_list_errors_are_bad_requests() {
    let store = fixture_store();

    let (status, body) = get(app(store.clone()), "/v1/hotels?sortby=name&order=sideways").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);

    let (status, body) = get(app(store.clone()), "/v1/hotels?query=stars:5").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "unknown field 'stars' on table 'hotel'");

    let (status, _) = get(app(store), "/v1/rooms?query=price:cheap").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_duplicate_id_conflicts() {
    let (status, body) = post(
        app(fixture_store()),
        "/v1/cities",
        json!({"id": 1, "name": "Paris", "country": "FR"}),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 409);
}

#[tokio::test]
async fn test_undecodable_body() {
    let (status, body) = post(app(fixture_store()), "/v1/rooms", json!({"name": 7})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid request body"));
}

// =============================================================================
// Guest Registration
// =============================================================================

#[tokio::test]
async fn test_register_guest_with_password() {
    let store = fixture_store();
    let (status, body) = post(
        app(store.clone()),
        "/v1/guests",
        json!({
            "firstName": "Grace",
            "lastName": "Hopper",
            "email": "grace@example.com",
            "role": 1,
            "password": "cobol-1959",
            "confirmedPassword": "cobol-1959"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["code"], 100000);
    assert_eq!(body["message"], "success");
    assert_eq!(body["guest"]["id"], 3);
    assert!(body["guest"].get("password").is_none());

    let stored = store.get::<Guest>(3).unwrap();
    assert!(verify_password("cobol-1959", &stored.password));
    assert_ne!(stored.password, "cobol-1959");
}

#[tokio::test]
async fn test_register_guest_with_mismatched_password() {
    let store = fixture_store();
    let (status, body) = post(
        app(store.clone()),
        "/v1/guests",
        json!({
            "firstName": "Grace",
            "lastName": "Hopper",
            "email": "grace@example.com",
            "role": 1,
            "password": "one",
            "confirmedPassword": "two"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["code"], 100000);
    assert!(store.get::<Guest>(3).unwrap().password.is_empty());
}

#[tokio::test]
async fn test_register_guest_invalid_params() {
    let store = fixture_store();

    let (status, body) = post(app(store.clone()), "/v1/guests", json!({"firstName": "x"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"code": 100002, "message": "invalid parameters"}));

    let (status, body) = post(
        app(store.clone()),
        "/v1/guests",
        json!({"firstName": "", "lastName": "Hopper", "email": "g@example.com", "role": 1}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 100002);
    assert_eq!(store.count("guest").unwrap(), 2);
}

#[tokio::test]
async fn test_register_guest_with_taken_id() {
    let (status, body) = post(
        app(fixture_store()),
        "/v1/guests",
        json!({"id": 1, "firstName": "A", "lastName": "B", "email": "a@b.c", "role": 1}),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], 100003);
}

fn store_with_hashed_guest() -> Arc<Store> {
    let store = fixture_store();
    let mut ada = store.get::<Guest>(1).unwrap();
    ada.password = hash_password("analytical-engine").unwrap();
    store.update(ada).unwrap();
    store
}

#[tokio::test]
async fn test_guest_update_keeps_hash_without_password() {
    let store = store_with_hashed_guest();
    let (status, guest) = send(
        app(store.clone()),
        Method::PUT,
        "/v1/guests/1",
        Some(json!({"first_name": "Ada", "last_name": "King", "email": "ada@example.com", "role": 1})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(guest["last_name"], "King");
    assert!(guest.get("password").is_none());
    let stored = store.get::<Guest>(1).unwrap();
    assert!(verify_password("analytical-engine", &stored.password));
}

#[tokio::test]
async fn test_guest_update_never_stores_plaintext() {
    let store = store_with_hashed_guest();
    let body = json!({
        "first_name": "Ada",
        "last_name": "Lovelace",
        "email": "ada@example.com",
        "role": 1,
        "password": "plaintext"
    });

    // unconfirmed password is rejected and the old hash stays
    let (status, _) = send(app(store.clone()), Method::PUT, "/v1/guests/1", Some(body.clone())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let stored = store.get::<Guest>(1).unwrap();
    assert!(verify_password("analytical-engine", &stored.password));

    let mut body = body;
    body["confirmedPassword"] = json!("plaintext");
    let (status, _) = send(app(store.clone()), Method::PUT, "/v1/guests/1", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    let stored = store.get::<Guest>(1).unwrap();
    assert_ne!(stored.password, "plaintext");
    assert!(verify_password("plaintext", &stored.password));
}

// =============================================================================
// Timestamps
// =============================================================================

#[tokio::test]
async fn test_put_keeps_created_at() {
    let store = fixture_store();
    let (status, room) = post(
        app(store.clone()),
        "/v1/rooms",
        json!({
            "hotel": 1,
            "name": "301",
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = room["id"].as_i64().unwrap();

    let (status, room) = send(
        app(store),
        Method::PUT,
        &format!("/v1/rooms/{}", id),
        Some(json!({"hotel": 1, "name": "301B"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(room["name"], "301B");
    assert_eq!(room["created_at"], "2024-01-01T00:00:00Z");
    assert_ne!(room["updated_at"], "2024-01-01T00:00:00Z");
}

// =============================================================================
// Hotels and Search
// =============================================================================

#[tokio::test]
async fn test_get_hotel_overlays_ledger_rating() {
    let store = fixture_store();
    let ledger = Arc::new(StaticRatings::new([(1, 2.5)]));

    let (status, hotel) = get(app_with(store.clone(), ledger.clone()), "/v1/hotels/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(hotel["rating"], 2.5);

    // no ledger entry keeps the stored rating
    let (_, hotel) = get(app_with(store, ledger), "/v1/hotels/2").await;
    assert!((hotel["rating"].as_f64().unwrap() - 3.8).abs() < 1e-6);
}

#[tokio::test]
async fn test_search_orders_by_rating() {
    let (status, rows) = get(app(fixture_store()), "/v1/rpc/hotels/search?query=is_active:1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        names(&rows),
        vec!["Etoile Suites", "Hotel Lumiere", "Lotus Garden"]
    );
    // related selection embeds the city
    assert_eq!(rows[0]["city"]["name"], "Paris");
}

#[tokio::test]
async fn test_search_uses_ledger_and_projects_last() {
    let ledger = Arc::new(StaticRatings::new([(1, 1.0), (2, 5.0), (3, 3.0)]));
    let (status, rows) = get(
        app_with(fixture_store(), ledger),
        "/v1/rpc/hotels/search?query=is_active:1&fields=name,rating",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        rows,
        json!([
            {"name": "Hotel Lumiere", "rating": 1.0},
            {"name": "Lotus Garden", "rating": 3.0},
            {"name": "Etoile Suites", "rating": 5.0}
        ])
    );
}

#[tokio::test]
async fn test_search_syntax_error() {
    let (status, _) = get(app(fixture_store()), "/v1/rpc/hotels/search?query=broken").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Room Reservation
// =============================================================================

fn reserve_body(guest_id: i64, rooms: Value) -> Value {
    json!({
        "guestId": guest_id,
        "startDate": "2025-03-01",
        "endDate": "2025-03-04",
        "discountPercent": 10.0,
        "totalPrice": 1134.0,
        "rooms": rooms
    })
}

#[tokio::test]
async fn test_reserve_rooms() {
    let store = fixture_store();
    let (status, body) = post(
        app(store.clone()),
        "/v1/rpc/rooms/reserve",
        reserve_body(1, json!([1, 2])),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["code"], 100000);
    assert_eq!(body["reservation"]["id"], 1);
    assert_eq!(body["reservation"]["status"], 0);
    assert_eq!(body["reservation"]["start_date"], "2025-03-01");

    let (_, held) = get(app(store.clone()), "/v1/room_reserved?query=reservation.id:1&sortby=id").await;
    let prices: Vec<f64> = held
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["price"].as_f64().unwrap())
        .collect();
    assert_eq!(prices, vec![180.0, 240.0]);
    assert_eq!(store.count("reservation").unwrap(), 1);
}

#[tokio::test]
async fn test_reserve_missing_room_rolls_back() {
    let store = fixture_store();
    let (status, body) = post(
        app(store.clone()),
        "/v1/rpc/rooms/reserve",
        reserve_body(1, json!([1, 42])),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"code": 100003, "message": "create record failed"}));
    assert_eq!(store.count("reservation").unwrap(), 0);
    assert_eq!(store.count("room_reserved").unwrap(), 0);
}

#[tokio::test]
async fn test_reserve_unknown_guest() {
    let store = fixture_store();
    let (status, body) = post(
        app(store.clone()),
        "/v1/rpc/rooms/reserve",
        reserve_body(77, json!([1])),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 100003);
    assert_eq!(store.count("reservation").unwrap(), 0);
}

#[tokio::test]
async fn test_reserve_invalid_body() {
    let store = fixture_store();

    let (status, body) = post(app(store.clone()), "/v1/rpc/rooms/reserve", json!({"guestId": 1})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 100002);

    let (status, _) = post(
        app(store.clone()),
        "/v1/rpc/rooms/reserve",
        reserve_body(1, json!([])),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(store.count("reservation").unwrap(), 0);
}
