//! Flight repository trait.
//!
//! Flights expose two read shapes: the list operation resolves both endpoint
//! ids against the destination table (inner join, so flights with dangling
//! references are silently excluded), while get-by-id returns the raw row
//! with foreign keys intact. Both shapes are part of the wire contract.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::{Flight, FlightId, FlightItinerary, FlightRoute, NewFlight};

/// Repository trait for flight operations.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait FlightRepository: Send + Sync {
    /// List all flights with origin and destination resolved to country/city.
    ///
    /// Flights whose `id_origen` or `id_destino` has no matching destination
    /// row do not appear in the result.
    async fn list_flight_itineraries(&self) -> RepositoryResult<Vec<FlightItinerary>>;

    /// Fetch a single flight by id, as stored (unresolved foreign keys).
    ///
    /// Returns `RepositoryError::NotFound` if no row matches.
    async fn get_flight(&self, id: FlightId) -> RepositoryResult<Flight>;

    /// Insert a new flight and return its generated id.
    ///
    /// Endpoint ids are not checked against the destination table here; a
    /// constrained backend may reject the insert, an unconstrained one will
    /// accept it and drop the flight from itinerary listings.
    async fn create_flight(&self, flight: &NewFlight) -> RepositoryResult<FlightId>;

    /// Re-point the origin/destination of an existing flight.
    ///
    /// Day, time and image are not updatable. Updating an id with no matching
    /// row is not an error; returns the affected-row count (0 or 1).
    async fn update_flight_route(
        &self,
        id: FlightId,
        route: &FlightRoute,
    ) -> RepositoryResult<usize>;

    /// Delete the flight with the given id.
    ///
    /// Deleting an id with no matching row is not an error; returns the
    /// affected-row count (0 or 1).
    async fn delete_flight(&self, id: FlightId) -> RepositoryResult<usize>;
}
