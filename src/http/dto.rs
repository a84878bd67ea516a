//! Request and response bodies for the REST endpoints.
//!
//! The entity types come straight from [`crate::api`], which already derives
//! Serialize/Deserialize with the wire field names. This module adds the
//! envelope shapes: confirmation, creation, error and health bodies.

use serde::{Deserialize, Serialize};

pub use crate::api::{
    Destination, DestinationId, Flight, FlightId, FlightItinerary, FlightRoute, NewDestination,
    NewFlight,
};

/// Response carrying only a confirmation message.
///
/// Used by update and delete endpoints, which always report success
/// regardless of whether a row matched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Confirmation message
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Response for entity creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedResponse {
    /// Confirmation message
    pub message: String,
    /// Identifier assigned to the new row
    pub id: i64,
}

impl CreatedResponse {
    pub fn new(message: impl Into<String>, id: i64) -> Self {
        Self {
            message: message.into(),
            id,
        }
    }
}

/// Error response body for server-side failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error description
    pub error: String,
}

/// Body returned by the health endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `"ok"` when the service is up
    pub status: String,
    /// Crate version serving the request
    pub version: String,
    /// `"connected"`, or the repository error text
    pub database: String,
}
