//! Storage backend implementations.
//!
//! `local` keeps everything in memory and backs the tests; `postgres`
//! (behind the `postgres-repo` feature) persists through Diesel.

pub mod local;
#[cfg(feature = "postgres-repo")]
pub mod postgres;

pub use local::LocalRepository;
#[cfg(feature = "postgres-repo")]
pub use postgres::{PoolStats, PostgresConfig, PostgresRepository};
