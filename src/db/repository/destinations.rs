//! Destination repository trait.
//!
//! Defines the CRUD operations for destination records. Destinations are
//! referenced by flights as origin or arrival endpoints, so deleting one can
//! leave dangling flights; see the flight trait for how reads handle that.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::{Destination, DestinationId, NewDestination};

/// Repository trait for destination operations.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait DestinationRepository: Send + Sync {
    /// List all destinations, ordered by id.
    ///
    /// # Returns
    /// * `Ok(Vec<Destination>)` - Every stored destination (may be empty)
    /// * `Err(RepositoryError)` - If the operation fails
    async fn list_destinations(&self) -> RepositoryResult<Vec<Destination>>;

    /// Fetch a single destination by id.
    ///
    /// # Arguments
    /// * `id` - The destination primary key
    ///
    /// # Returns
    /// * `Ok(Destination)` - The matching record
    /// * `Err(RepositoryError::NotFound)` - If no row matches
    async fn get_destination(&self, id: DestinationId) -> RepositoryResult<Destination>;

    /// Insert a new destination and return its generated id.
    ///
    /// # Arguments
    /// * `destination` - Country and city for the new record
    ///
    /// # Returns
    /// * `Ok(DestinationId)` - The server-assigned primary key
    /// * `Err(RepositoryError)` - If the insert fails
    async fn create_destination(
        &self,
        destination: &NewDestination,
    ) -> RepositoryResult<DestinationId>;

    /// Replace the country/city of the destination with the given id.
    ///
    /// Updating an id with no matching row is not an error.
    ///
    /// # Arguments
    /// * `id` - The destination primary key
    /// * `destination` - Replacement field values
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of rows affected (0 or 1)
    /// * `Err(RepositoryError)` - If the statement fails
    async fn update_destination(
        &self,
        id: DestinationId,
        destination: &NewDestination,
    ) -> RepositoryResult<usize>;

    /// Delete the destination with the given id.
    ///
    /// Deleting an id with no matching row is not an error.
    ///
    /// # Arguments
    /// * `id` - The destination primary key
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of rows affected (0 or 1)
    /// * `Err(RepositoryError)` - If the statement fails
    async fn delete_destination(&self, id: DestinationId) -> RepositoryResult<usize>;
}
