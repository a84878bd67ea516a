//! Repository trait definitions.
//!
//! The repository layer is the seam between HTTP handlers and a concrete
//! storage backend. Each entity gets its own trait; `FullRepository` is the
//! combined surface the server wires into application state.

pub mod destinations;
pub mod error;
pub mod flights;

pub use destinations::DestinationRepository;
pub use error::{ErrorContext, RepositoryError, RepositoryResult};
pub use flights::FlightRepository;

use async_trait::async_trait;

/// The complete repository surface required by the HTTP server.
///
/// Backends implement the per-entity traits plus a liveness probe. The server
/// holds this as `Arc<dyn FullRepository>` so tests can substitute the
/// in-memory backend.
#[async_trait]
pub trait FullRepository: DestinationRepository + FlightRepository + std::fmt::Debug {
    /// Verify the backing store is reachable.
    ///
    /// For the SQL backend this round-trips a trivial query through the pool;
    /// the in-memory backend always succeeds.
    async fn health_check(&self) -> RepositoryResult<()>;
}
