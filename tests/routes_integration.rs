//! Integration tests for the REST API endpoints.
//!
//! Each test drives the axum router over an in-memory repository and asserts
//! on status codes and response bodies, endpoint by endpoint.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use vuelos_rust::db::repositories::LocalRepository;
use vuelos_rust::db::repository::FullRepository;
use vuelos_rust::http::{create_router_with_cors, AppState, CorsSettings};

fn app() -> Router {
    let repo = Arc::new(LocalRepository::new()) as Arc<dyn FullRepository>;
    create_router_with_cors(AppState::new(repo), CorsSettings::default())
}

async fn request(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

async fn read_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn seed_destination(app: &Router, pais: &str, ciudad: &str) -> i64 {
    let response = request(
        app,
        Method::POST,
        "/destinos",
        Some(json!({ "pais": pais, "ciudad": ciudad })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    read_json(response).await["id"].as_i64().unwrap()
}

async fn seed_flight(app: &Router, origen: i64, destino: i64) -> i64 {
    let response = request(
        app,
        Method::POST,
        "/vuelos",
        Some(json!({
            "id_origen": origen,
            "id_destino": destino,
            "dia": "2024-07-15",
            "hora": "10:30:00"
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    read_json(response).await["id"].as_i64().unwrap()
}

// =========================================================
// Destinations
// =========================================================

#[tokio::test]
async fn test_list_destinations_starts_empty() {
    let app = app();

    let response = request(&app, Method::GET, "/destinos", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await, json!([]));
}

#[tokio::test]
async fn test_create_destination_returns_201_with_id() {
    let app = app();

    let response = request(
        &app,
        Method::POST,
        "/destinos",
        Some(json!({ "pais": "España", "ciudad": "Madrid" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = read_json(response).await;
    assert_eq!(body["message"], "Destino creado correctamente");
    assert_eq!(body["id"], 1);
}

#[tokio::test]
async fn test_get_destination_roundtrip() {
    let app = app();
    let id = seed_destination(&app, "España", "Madrid").await;

    let response = request(&app, Method::GET, &format!("/destinos/{}", id), None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    assert_eq!(body["id_destino"], id);
    assert_eq!(body["pais"], "España");
    assert_eq!(body["ciudad"], "Madrid");
}

#[tokio::test]
async fn test_get_missing_destination_responds_404() {
    let app = app();

    let response = request(&app, Method::GET, "/destinos/999", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = read_json(response).await;
    assert_eq!(body["message"], "Destino no encontrado");
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn test_update_destination() {
    let app = app();
    let id = seed_destination(&app, "España", "Madird").await;

    let response = request(
        &app,
        Method::PUT,
        &format!("/destinos/{}", id),
        Some(json!({ "pais": "España", "ciudad": "Madrid" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        read_json(response).await,
        json!({ "message": "Destino actualizado correctamente" })
    );

    let response = request(&app, Method::GET, &format!("/destinos/{}", id), None).await;
    assert_eq!(read_json(response).await["ciudad"], "Madrid");
}

#[tokio::test]
async fn test_update_missing_destination_still_reports_success() {
    let app = app();

    let response = request(
        &app,
        Method::PUT,
        "/destinos/999999",
        Some(json!({ "pais": "España", "ciudad": "Madrid" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        read_json(response).await["message"],
        "Destino actualizado correctamente"
    );
}

#[tokio::test]
async fn test_delete_destination_then_get_responds_404() {
    let app = app();
    let id = seed_destination(&app, "España", "Madrid").await;

    let response = request(&app, Method::DELETE, &format!("/destinos/{}", id), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        read_json(response).await,
        json!({ "message": "Destino eliminado correctamente" })
    );

    let response = request(&app, Method::GET, &format!("/destinos/{}", id), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_missing_destination_still_reports_success() {
    let app = app();

    let response = request(&app, Method::DELETE, "/destinos/424242", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        read_json(response).await["message"],
        "Destino eliminado correctamente"
    );
}

#[tokio::test]
async fn test_create_destination_with_missing_fields_is_client_error() {
    let app = app();

    let response = request(
        &app,
        Method::POST,
        "/destinos",
        Some(json!({ "pais": "España" })),
    )
    .await;
    assert!(response.status().is_client_error());
}

// =========================================================
// Flights
// =========================================================

#[tokio::test]
async fn test_create_flight_returns_201_with_id() {
    let app = app();
    let madrid = seed_destination(&app, "España", "Madrid").await;
    let paris = seed_destination(&app, "Francia", "París").await;

    let response = request(
        &app,
        Method::POST,
        "/vuelos",
        Some(json!({
            "id_origen": madrid,
            "id_destino": paris,
            "dia": "2024-07-15",
            "hora": "10:30:00",
            "imagen_url": "https://example.com/mad-cdg.jpg"
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = read_json(response).await;
    assert_eq!(body["message"], "Vuelo creado correctamente");
    assert_eq!(body["id"], 1);
}

#[tokio::test]
async fn test_get_flight_returns_raw_row() {
    let app = app();
    let madrid = seed_destination(&app, "España", "Madrid").await;
    let paris = seed_destination(&app, "Francia", "París").await;
    let id = seed_flight(&app, madrid, paris).await;

    let response = request(&app, Method::GET, &format!("/vuelos/{}", id), None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    assert_eq!(body["id_vuelo"], id);
    assert_eq!(body["id_origen"], madrid);
    assert_eq!(body["id_destino"], paris);
    assert_eq!(body["dia"], "2024-07-15");
    assert_eq!(body["hora"], "10:30:00");
    assert_eq!(body["imagen_url"], Value::Null);
    // The raw shape carries ids, not the joined country/city fields.
    assert!(body.get("origen_pais").is_none());
}

#[tokio::test]
async fn test_list_flights_returns_joined_shape() {
    let app = app();
    let madrid = seed_destination(&app, "España", "Madrid").await;
    let paris = seed_destination(&app, "Francia", "París").await;
    let id = seed_flight(&app, madrid, paris).await;

    let response = request(&app, Method::GET, "/vuelos", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    let flights = body.as_array().unwrap();
    assert_eq!(flights.len(), 1);

    let flight = &flights[0];
    assert_eq!(flight["id_vuelo"], id);
    assert_eq!(flight["origen_pais"], "España");
    assert_eq!(flight["origen_ciudad"], "Madrid");
    assert_eq!(flight["destino_pais"], "Francia");
    assert_eq!(flight["destino_ciudad"], "París");
    assert_eq!(flight["dia"], "2024-07-15");
    assert_eq!(flight["hora"], "10:30:00");
    // The joined shape replaces the foreign keys with resolved fields.
    assert!(flight.get("id_origen").is_none());
}

#[tokio::test]
async fn test_get_missing_flight_responds_404() {
    let app = app();

    let response = request(&app, Method::GET, "/vuelos/853", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        read_json(response).await,
        json!({ "message": "Vuelo no encontrado" })
    );
}

#[tokio::test]
async fn test_update_flight_route() {
    let app = app();
    let madrid = seed_destination(&app, "España", "Madrid").await;
    let paris = seed_destination(&app, "Francia", "París").await;
    let rome = seed_destination(&app, "Italia", "Roma").await;
    let id = seed_flight(&app, madrid, paris).await;

    let response = request(
        &app,
        Method::PUT,
        &format!("/vuelos/{}", id),
        Some(json!({ "id_origen": madrid, "id_destino": rome })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        read_json(response).await,
        json!({ "message": "Vuelo actualizado correctamente" })
    );

    let response = request(&app, Method::GET, &format!("/vuelos/{}", id), None).await;
    let body = read_json(response).await;
    assert_eq!(body["id_destino"], rome);
    // Day and time are untouched by route updates.
    assert_eq!(body["dia"], "2024-07-15");
}

#[tokio::test]
async fn test_update_missing_flight_still_reports_success() {
    let app = app();

    let response = request(
        &app,
        Method::PUT,
        "/vuelos/999999",
        Some(json!({ "id_origen": 1, "id_destino": 2 })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        read_json(response).await["message"],
        "Vuelo actualizado correctamente"
    );
}

#[tokio::test]
async fn test_delete_flight_then_get_responds_404() {
    let app = app();
    let madrid = seed_destination(&app, "España", "Madrid").await;
    let paris = seed_destination(&app, "Francia", "París").await;
    let id = seed_flight(&app, madrid, paris).await;

    let response = request(&app, Method::DELETE, &format!("/vuelos/{}", id), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        read_json(response).await,
        json!({ "message": "Vuelo eliminado correctamente" })
    );

    let response = request(&app, Method::GET, &format!("/vuelos/{}", id), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// =========================================================
// Service Endpoints
// =========================================================

#[tokio::test]
async fn test_health_reports_connected_database() {
    let app = app();

    let response = request(&app, Method::GET, "/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "connected");
    assert!(body["version"].as_str().is_some_and(|v| !v.is_empty()));
}

#[tokio::test]
async fn test_api_docs_served_on_both_paths() {
    let app = app();

    let response = request(&app, Method::GET, "/api-docs", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["openapi"], "3.0.0");
    assert_eq!(body["info"]["title"], "API de Vuelos y Destinos");

    let response = request(&app, Method::GET, "/api-docs/openapi.json", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["info"]["version"], "1.0.0");
}
