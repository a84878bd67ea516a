//! Storage layer for destinations and flights.
//!
//! All access goes through the repository traits, so the HTTP layer never
//! knows which backend serves a request. Two backends exist: Postgres
//! (Diesel with an r2d2 pool, behind the `postgres-repo` feature) and an
//! in-memory store for tests and database-less runs.
//!
//! ```text
//!            axum handlers
//!                  │
//!                  ▼
//!  DestinationRepository + FlightRepository
//!          (Arc<dyn FullRepository>)
//!                  │
//!        ┌─────────┴──────────┐
//!        ▼                    ▼
//!  PostgresRepository   LocalRepository
//!  (Diesel + r2d2)      (RwLock + BTreeMap)
//! ```
//!
//! Submodules:
//! - `repository`: trait definitions and [`RepositoryError`]
//! - `repositories`: the backend implementations
//! - `factory`: [`RepositoryFactory`] and [`RepositoryBuilder`]
//! - `repo_config`: `repository.toml` support
//!
//! # Usage
//!
//! ```ignore
//! use vuelos_rust::db;
//!
//! async fn example() -> anyhow::Result<()> {
//!     db::init_repository()?;
//!     let repo = db::get_repository()?;
//!     let destinations = repo.list_destinations().await?;
//!     Ok(())
//! }
//! ```

// At least one backend must be compiled in. Under --all-features Postgres
// takes precedence over the local store.
#[cfg(not(any(feature = "postgres-repo", feature = "local-repo")))]
compile_error!("Enable at least one repository backend feature.");

pub mod factory;
pub mod repo_config;
pub mod repositories;
pub mod repository;

// The real PostgresConfig lives next to the Diesel code. Builds without it
// still get inert placeholders so signatures mentioning these types compile.
#[cfg(feature = "postgres-repo")]
pub use repositories::postgres::{PoolStats, PostgresConfig};
#[cfg(not(feature = "postgres-repo"))]
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    _private: (),
}
#[cfg(not(feature = "postgres-repo"))]
#[derive(Debug, Clone, Default)]
pub struct PoolStats {
    _private: (),
}

pub use factory::{RepositoryBuilder, RepositoryFactory, RepositoryType};
pub use repo_config::RepositoryConfig;
pub use repositories::LocalRepository;
#[cfg(feature = "postgres-repo")]
pub use repositories::PostgresRepository;
pub use repository::{
    DestinationRepository, ErrorContext, FlightRepository, FullRepository, RepositoryError,
    RepositoryResult,
};

use anyhow::{Context, Result};
use std::sync::{Arc, OnceLock};

/// Process-wide repository instance.
static REPOSITORY: OnceLock<Arc<dyn FullRepository>> = OnceLock::new();

#[cfg(feature = "postgres-repo")]
fn create_selected_repository() -> RepositoryResult<Arc<dyn FullRepository>> {
    let config = PostgresConfig::from_env().map_err(RepositoryError::configuration)?;
    let repo = PostgresRepository::new(config)?;
    Ok(Arc::new(repo) as Arc<dyn FullRepository>)
}

#[cfg(all(feature = "local-repo", not(feature = "postgres-repo")))]
fn create_selected_repository() -> RepositoryResult<Arc<dyn FullRepository>> {
    Ok(RepositoryFactory::create_local())
}

/// Initialize the global repository for the compiled-in backend.
///
/// Calling it again after a successful init is a no-op.
pub fn init_repository() -> Result<()> {
    if REPOSITORY.get().is_some() {
        return Ok(());
    }

    let repo = create_selected_repository().context("Failed to initialize repository backend")?;
    let _ = REPOSITORY.set(repo);
    Ok(())
}

/// The global repository, initializing it on first use.
pub fn get_repository() -> Result<&'static Arc<dyn FullRepository>> {
    if REPOSITORY.get().is_none() {
        init_repository()?;
    }

    REPOSITORY
        .get()
        .context("Repository singleton is not initialized")
}
