//! One handler per REST endpoint.
//!
//! Handlers stay thin. Each one calls the repository through [`AppState`]
//! and wraps the result in the agreed JSON envelope.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::{
    CreatedResponse, Destination, Flight, FlightItinerary, FlightRoute, HealthResponse,
    MessageResponse, NewDestination, NewFlight,
};
use super::error::AppError;
use super::state::AppState;
use crate::api::{DestinationId, FlightId};
use crate::db::repository::{DestinationRepository, FlightRepository, FullRepository};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// Messages mirror the wire contract consumed by the Angular frontend.
const DESTINATION_NOT_FOUND: &str = "Destino no encontrado";
const DESTINATION_CREATED: &str = "Destino creado correctamente";
const DESTINATION_UPDATED: &str = "Destino actualizado correctamente";
const DESTINATION_DELETED: &str = "Destino eliminado correctamente";
const FLIGHT_NOT_FOUND: &str = "Vuelo no encontrado";
const FLIGHT_CREATED: &str = "Vuelo creado correctamente";
const FLIGHT_UPDATED: &str = "Vuelo actualizado correctamente";
const FLIGHT_DELETED: &str = "Vuelo eliminado correctamente";

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the database
/// is reachable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let database = match state.repository.health_check().await {
        Ok(()) => "connected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database,
    }))
}

// =============================================================================
// Destinations
// =============================================================================

/// GET /destinos
///
/// List all destinations.
pub async fn list_destinations(State(state): State<AppState>) -> HandlerResult<Vec<Destination>> {
    let destinations = state.repository.list_destinations().await?;
    Ok(Json(destinations))
}

/// GET /destinos/{id}
///
/// Get a single destination by id. Responds 404 with "Destino no encontrado"
/// when the id matches no row.
pub async fn get_destination(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<Destination> {
    let destination = state
        .repository
        .get_destination(DestinationId::new(id))
        .await
        .map_err(|e| AppError::not_found_as(e, DESTINATION_NOT_FOUND))?;

    Ok(Json(destination))
}

/// POST /destinos
///
/// Create a new destination. Responds 201 with the assigned id.
pub async fn create_destination(
    State(state): State<AppState>,
    Json(request): Json<NewDestination>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    let id = state.repository.create_destination(&request).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse::new(DESTINATION_CREATED, id.value())),
    ))
}

/// PUT /destinos/{id}
///
/// Update a destination. Always reports success, even when the id matches
/// no row.
pub async fn update_destination(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<NewDestination>,
) -> HandlerResult<MessageResponse> {
    state
        .repository
        .update_destination(DestinationId::new(id), &request)
        .await?;

    Ok(Json(MessageResponse::new(DESTINATION_UPDATED)))
}

/// DELETE /destinos/{id}
///
/// Delete a destination. Always reports success, even when the id matches
/// no row.
pub async fn delete_destination(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<MessageResponse> {
    state
        .repository
        .delete_destination(DestinationId::new(id))
        .await?;

    Ok(Json(MessageResponse::new(DESTINATION_DELETED)))
}

// =============================================================================
// Flights
// =============================================================================

/// GET /vuelos
///
/// List all flights joined with their origin and destination rows. Flights
/// whose endpoints no longer exist are omitted by the inner join.
pub async fn list_flights(State(state): State<AppState>) -> HandlerResult<Vec<FlightItinerary>> {
    let flights = state.repository.list_flight_itineraries().await?;
    Ok(Json(flights))
}

/// GET /vuelos/{id}
///
/// Get a single flight by id in its raw form, with origin and destination
/// as ids. Responds 404 with "Vuelo no encontrado" when the id matches no row.
pub async fn get_flight(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<Flight> {
    let flight = state
        .repository
        .get_flight(FlightId::new(id))
        .await
        .map_err(|e| AppError::not_found_as(e, FLIGHT_NOT_FOUND))?;

    Ok(Json(flight))
}

/// POST /vuelos
///
/// Create a new flight. Responds 201 with the assigned id.
pub async fn create_flight(
    State(state): State<AppState>,
    Json(request): Json<NewFlight>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    let id = state.repository.create_flight(&request).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse::new(FLIGHT_CREATED, id.value())),
    ))
}

/// PUT /vuelos/{id}
///
/// Update the route of a flight. Only the origin and destination ids change;
/// day, time and image are left as they are. Always reports success.
pub async fn update_flight(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<FlightRoute>,
) -> HandlerResult<MessageResponse> {
    state
        .repository
        .update_flight_route(FlightId::new(id), &request)
        .await?;

    Ok(Json(MessageResponse::new(FLIGHT_UPDATED)))
}

/// DELETE /vuelos/{id}
///
/// Delete a flight. Always reports success, even when the id matches no row.
pub async fn delete_flight(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<MessageResponse> {
    state
        .repository
        .delete_flight(FlightId::new(id))
        .await?;

    Ok(Json(MessageResponse::new(FLIGHT_DELETED)))
}

// =============================================================================
// API Documentation
// =============================================================================

/// GET /api-docs and GET /api-docs/openapi.json
///
/// Serve the OpenAPI document describing the API.
pub async fn api_docs() -> Json<&'static serde_json::Value> {
    Json(super::openapi::document())
}
