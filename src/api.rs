//! Domain types shared by the HTTP layer and the storage backends.
//!
//! Everything here serializes to the JSON wire format directly: field names
//! are the Spanish database column names (`pais`, `ciudad`, `id_origen`, ...)
//! and ids serialize as plain integers.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Destination identifier (database primary key).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct DestinationId(pub i64);

/// Flight identifier (database primary key).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct FlightId(pub i64);

impl DestinationId {
    pub fn new(value: i64) -> Self {
        DestinationId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl FlightId {
    pub fn new(value: i64) -> Self {
        FlightId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for DestinationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::fmt::Display for FlightId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<DestinationId> for i64 {
    fn from(id: DestinationId) -> Self {
        id.0
    }
}
impl From<FlightId> for i64 {
    fn from(id: FlightId) -> Self {
        id.0
    }
}

/// A location record referenced by flights as origin or destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    /// Database ID (server-assigned on create)
    pub id_destino: DestinationId,
    /// Country name
    pub pais: String,
    /// City name
    pub ciudad: String,
}

impl Destination {
    pub fn new(id_destino: DestinationId, pais: String, ciudad: String) -> Self {
        Self {
            id_destino,
            pais,
            ciudad,
        }
    }
}

/// Fields accepted when creating or replacing a destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDestination {
    pub pais: String,
    pub ciudad: String,
}

impl NewDestination {
    pub fn new(pais: impl Into<String>, ciudad: impl Into<String>) -> Self {
        Self {
            pais: pais.into(),
            ciudad: ciudad.into(),
        }
    }
}

/// A scheduled trip between two destinations, as stored (raw foreign keys).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flight {
    /// Database ID (server-assigned on create)
    pub id_vuelo: FlightId,
    /// Origin destination ID
    pub id_origen: DestinationId,
    /// Arrival destination ID
    pub id_destino: DestinationId,
    /// Departure day
    pub dia: NaiveDate,
    /// Departure time
    pub hora: NaiveTime,
    /// Optional picture URL
    pub imagen_url: Option<String>,
}

/// Fields accepted when creating a flight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFlight {
    pub id_origen: DestinationId,
    pub id_destino: DestinationId,
    pub dia: NaiveDate,
    pub hora: NaiveTime,
    #[serde(default)]
    pub imagen_url: Option<String>,
}

/// Fields accepted when updating a flight. Only the endpoints are mutable;
/// day, time and image are fixed once the flight exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightRoute {
    pub id_origen: DestinationId,
    pub id_destino: DestinationId,
}

/// A flight with both endpoints resolved to their country/city fields.
///
/// This is the shape returned by the flight list operation. Flights whose
/// origin or destination no longer exists do not appear in it (inner-join
/// semantics); they remain retrievable as raw [`Flight`] rows by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightItinerary {
    pub id_vuelo: FlightId,
    pub origen_pais: String,
    pub origen_ciudad: String,
    pub destino_pais: String,
    pub destino_ciudad: String,
    pub dia: NaiveDate,
    pub hora: NaiveTime,
    pub imagen_url: Option<String>,
}
