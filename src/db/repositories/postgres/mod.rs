//! Postgres backend.
//!
//! Implements the repository traits over the `destinos` and `vuelos` tables
//! with Diesel. Connections come from an r2d2 pool, every operation runs on
//! the blocking thread pool, and transient failures are retried with a
//! doubling delay. Pending migrations run once at startup.
//!
//! Settings come from [`PostgresConfig`], usually via the environment:
//! `DATABASE_URL` (or `PG_DATABASE_URL`), `PG_POOL_MAX`, `PG_POOL_MIN`,
//! `PG_CONN_TIMEOUT_SEC`, `PG_IDLE_TIMEOUT_SEC`, `PG_MAX_RETRIES`,
//! `PG_RETRY_DELAY_MS`.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sql_query;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task;

use crate::api::{
    Destination, DestinationId, Flight, FlightId, FlightItinerary, FlightRoute, NewDestination,
    NewFlight,
};
use crate::db::repository::{
    DestinationRepository, ErrorContext, FlightRepository, FullRepository, RepositoryError,
    RepositoryResult,
};

mod models;
mod schema;

use models::*;
use schema::*;

type PgPool = Pool<ConnectionManager<PgConnection>>;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("src/db/repositories/postgres/migrations");

/// Connection and pool settings.
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    pub database_url: String,
    /// Upper bound on pooled connections.
    pub max_pool_size: u32,
    /// Connections kept open while idle.
    pub min_pool_size: u32,
    /// Seconds to wait for a free connection.
    pub connection_timeout_sec: u64,
    /// Seconds before an idle connection is closed.
    pub idle_timeout_sec: u64,
    /// Retry attempts for transient failures.
    pub max_retries: u32,
    /// First retry delay; doubles on every further attempt.
    pub retry_delay_ms: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            max_pool_size: 10,
            min_pool_size: 1,
            connection_timeout_sec: 30,
            idle_timeout_sec: 600,
            max_retries: 3,
            retry_delay_ms: 100,
        }
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl PostgresConfig {
    /// Read connection settings from the environment.
    ///
    /// `DATABASE_URL` (or `PG_DATABASE_URL`) is required. Every `PG_*` pool
    /// setting falls back to its default when unset or unparseable.
    pub fn from_env() -> Result<Self, String> {
        let database_url = std::env::var("DATABASE_URL")
            .or_else(|_| std::env::var("PG_DATABASE_URL"))
            .map_err(|_| "DATABASE_URL or PG_DATABASE_URL must be set".to_string())?;

        let defaults = Self::default();
        Ok(Self {
            database_url,
            max_pool_size: env_or("PG_POOL_MAX", defaults.max_pool_size),
            min_pool_size: env_or("PG_POOL_MIN", defaults.min_pool_size),
            connection_timeout_sec: env_or("PG_CONN_TIMEOUT_SEC", defaults.connection_timeout_sec),
            idle_timeout_sec: env_or("PG_IDLE_TIMEOUT_SEC", defaults.idle_timeout_sec),
            max_retries: env_or("PG_MAX_RETRIES", defaults.max_retries),
            retry_delay_ms: env_or("PG_RETRY_DELAY_MS", defaults.retry_delay_ms),
        })
    }

    /// Default settings with the given connection URL.
    pub fn with_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            ..Default::default()
        }
    }
}

/// Snapshot of pool state and query counters.
#[derive(Debug, Clone, Default)]
pub struct PoolStats {
    pub connections_in_use: u32,
    pub idle_connections: u32,
    pub total_connections: u32,
    pub max_size: u32,
    /// Queries attempted since startup.
    pub total_queries: u64,
    /// Queries that failed after exhausting retries.
    pub failed_queries: u64,
    /// Retry attempts performed.
    pub retried_operations: u64,
}

#[derive(Debug, Default)]
struct QueryMetrics {
    total: AtomicU64,
    failed: AtomicU64,
    retried: AtomicU64,
}

/// Diesel-backed repository.
///
/// Cheap to clone; all clones share the pool and the metrics counters.
#[derive(Clone, Debug)]
pub struct PostgresRepository {
    pool: PgPool,
    config: PostgresConfig,
    metrics: Arc<QueryMetrics>,
}

impl PostgresRepository {
    /// Build the pool and run pending migrations.
    pub fn new(config: PostgresConfig) -> RepositoryResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(&config.database_url);

        let pool = Pool::builder()
            .max_size(config.max_pool_size)
            .min_idle(Some(config.min_pool_size))
            .connection_timeout(Duration::from_secs(config.connection_timeout_sec))
            .idle_timeout(Some(Duration::from_secs(config.idle_timeout_sec)))
            // Validate connections before handing them out.
            .test_on_check_out(true)
            .build(manager)
            .map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("build_pool")
                        .with_details(format!("max_size={}", config.max_pool_size)),
                )
            })?;

        let mut conn = pool.get().map_err(|e| {
            RepositoryError::connection_with_context(
                e.to_string(),
                ErrorContext::new("run_migrations"),
            )
        })?;
        conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Migration failed: {}", e),
                ErrorContext::new("run_migrations"),
            )
        })?;
        drop(conn);

        Ok(Self {
            pool,
            config,
            metrics: Arc::new(QueryMetrics::default()),
        })
    }

    /// Run a blocking Diesel closure on the pool.
    ///
    /// Retryable failures (lost connections, timeouts, serialization
    /// conflicts) are attempted up to `max_retries` more times, sleeping a
    /// doubling delay in between.
    async fn run_query<T, F>(&self, f: F) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> RepositoryResult<T> + Send + Clone + 'static,
    {
        let pool = self.pool.clone();
        let metrics = Arc::clone(&self.metrics);
        let max_retries = self.config.max_retries;
        let base_delay_ms = self.config.retry_delay_ms;

        task::spawn_blocking(move || {
            let mut delay = Duration::from_millis(base_delay_ms);
            let mut last_error = None;

            for attempt in 0..=max_retries {
                if attempt > 0 {
                    metrics.retried.fetch_add(1, Ordering::Relaxed);
                    std::thread::sleep(delay);
                    delay *= 2;
                }

                let mut conn = match pool.get() {
                    Ok(conn) => conn,
                    Err(e) => {
                        let err = RepositoryError::connection_with_context(
                            e.to_string(),
                            ErrorContext::new("checkout_connection")
                                .with_details(format!("attempt={}", attempt + 1)),
                        );
                        if attempt == max_retries {
                            metrics.failed.fetch_add(1, Ordering::Relaxed);
                            return Err(err);
                        }
                        last_error = Some(err);
                        continue;
                    }
                };

                metrics.total.fetch_add(1, Ordering::Relaxed);
                match f.clone()(&mut conn) {
                    Ok(value) => return Ok(value),
                    Err(e) if e.is_retryable() && attempt < max_retries => {
                        last_error = Some(e);
                    }
                    Err(e) => {
                        metrics.failed.fetch_add(1, Ordering::Relaxed);
                        return Err(e);
                    }
                }
            }

            metrics.failed.fetch_add(1, Ordering::Relaxed);
            Err(last_error.unwrap_or_else(|| RepositoryError::timeout("Retry budget exhausted")))
        })
        .await
        .map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Task join error: {}", e),
                ErrorContext::new("spawn_blocking"),
            )
        })?
    }

    /// Pool state plus the query counters, for the health endpoint and
    /// operational checks.
    pub fn get_pool_stats(&self) -> PoolStats {
        let state = self.pool.state();
        PoolStats {
            connections_in_use: state.connections - state.idle_connections,
            idle_connections: state.idle_connections,
            total_connections: state.connections,
            max_size: self.config.max_pool_size,
            total_queries: self.metrics.total.load(Ordering::Relaxed),
            failed_queries: self.metrics.failed.load(Ordering::Relaxed),
            retried_operations: self.metrics.retried.load(Ordering::Relaxed),
        }
    }
}

#[async_trait]
impl DestinationRepository for PostgresRepository {
    async fn list_destinations(&self) -> RepositoryResult<Vec<Destination>> {
        self.run_query(|conn| {
            let rows = destinos::table
                .select(DestinationRow::as_select())
                .order(destinos::id_destino.asc())
                .load::<DestinationRow>(conn)
                .map_err(RepositoryError::from)?;
            Ok(rows.into_iter().map(Destination::from).collect())
        })
        .await
    }

    async fn get_destination(&self, id: DestinationId) -> RepositoryResult<Destination> {
        self.run_query(move |conn| {
            let row = destinos::table
                .filter(destinos::id_destino.eq(id.value()))
                .select(DestinationRow::as_select())
                .first::<DestinationRow>(conn)
                .optional()
                .map_err(RepositoryError::from)?;

            row.map(Destination::from).ok_or_else(|| {
                RepositoryError::not_found_with_context(
                    format!("Destination {} not found", id),
                    ErrorContext::new("get_destination")
                        .with_entity("destination")
                        .with_entity_id(id),
                )
            })
        })
        .await
    }

    async fn create_destination(
        &self,
        destination: &NewDestination,
    ) -> RepositoryResult<DestinationId> {
        let destination = destination.clone();
        self.run_query(move |conn| {
            let new_row = NewDestinationRow {
                pais: destination.pais.clone(),
                ciudad: destination.ciudad.clone(),
            };

            let id: i64 = diesel::insert_into(destinos::table)
                .values(&new_row)
                .returning(destinos::id_destino)
                .get_result(conn)
                .map_err(|e| RepositoryError::from(e).with_operation("create_destination"))?;

            Ok(DestinationId::new(id))
        })
        .await
    }

    async fn update_destination(
        &self,
        id: DestinationId,
        destination: &NewDestination,
    ) -> RepositoryResult<usize> {
        let destination = destination.clone();
        self.run_query(move |conn| {
            diesel::update(destinos::table.filter(destinos::id_destino.eq(id.value())))
                .set((
                    destinos::pais.eq(destination.pais.clone()),
                    destinos::ciudad.eq(destination.ciudad.clone()),
                ))
                .execute(conn)
                .map_err(|e| RepositoryError::from(e).with_operation("update_destination"))
        })
        .await
    }

    async fn delete_destination(&self, id: DestinationId) -> RepositoryResult<usize> {
        self.run_query(move |conn| {
            diesel::delete(destinos::table.filter(destinos::id_destino.eq(id.value())))
                .execute(conn)
                .map_err(|e| RepositoryError::from(e).with_operation("delete_destination"))
        })
        .await
    }
}

#[async_trait]
impl FlightRepository for PostgresRepository {
    async fn list_flight_itineraries(&self) -> RepositoryResult<Vec<FlightItinerary>> {
        self.run_query(|conn| {
            // destinos is joined twice, once per endpoint, so both sides need
            // an alias. The inner join drops flights with dangling endpoints.
            let (origen, destino) = diesel::alias!(destinos as origen, destinos as destino);

            let rows = vuelos::table
                .inner_join(
                    origen.on(vuelos::id_origen.eq(origen.field(destinos::id_destino))),
                )
                .inner_join(
                    destino.on(vuelos::id_destino.eq(destino.field(destinos::id_destino))),
                )
                .order(vuelos::id_vuelo.asc())
                .select((
                    vuelos::id_vuelo,
                    origen.field(destinos::pais),
                    origen.field(destinos::ciudad),
                    destino.field(destinos::pais),
                    destino.field(destinos::ciudad),
                    vuelos::dia,
                    vuelos::hora,
                    vuelos::imagen_url,
                ))
                .load::<(
                    i64,
                    String,
                    String,
                    String,
                    String,
                    NaiveDate,
                    NaiveTime,
                    Option<String>,
                )>(conn)
                .map_err(RepositoryError::from)?;

            let itineraries = rows
                .into_iter()
                .map(
                    |(
                        id_vuelo,
                        origen_pais,
                        origen_ciudad,
                        destino_pais,
                        destino_ciudad,
                        dia,
                        hora,
                        imagen_url,
                    )| {
                        FlightItinerary {
                            id_vuelo: FlightId::new(id_vuelo),
                            origen_pais,
                            origen_ciudad,
                            destino_pais,
                            destino_ciudad,
                            dia,
                            hora,
                            imagen_url,
                        }
                    },
                )
                .collect();

            Ok(itineraries)
        })
        .await
    }

    async fn get_flight(&self, id: FlightId) -> RepositoryResult<Flight> {
        self.run_query(move |conn| {
            let row = vuelos::table
                .filter(vuelos::id_vuelo.eq(id.value()))
                .select(FlightRow::as_select())
                .first::<FlightRow>(conn)
                .optional()
                .map_err(RepositoryError::from)?;

            row.map(Flight::from).ok_or_else(|| {
                RepositoryError::not_found_with_context(
                    format!("Flight {} not found", id),
                    ErrorContext::new("get_flight")
                        .with_entity("flight")
                        .with_entity_id(id),
                )
            })
        })
        .await
    }

    async fn create_flight(&self, flight: &NewFlight) -> RepositoryResult<FlightId> {
        let flight = flight.clone();
        self.run_query(move |conn| {
            let new_row = NewFlightRow {
                id_origen: flight.id_origen.value(),
                id_destino: flight.id_destino.value(),
                dia: flight.dia,
                hora: flight.hora,
                imagen_url: flight.imagen_url.clone(),
            };

            let id: i64 = diesel::insert_into(vuelos::table)
                .values(&new_row)
                .returning(vuelos::id_vuelo)
                .get_result(conn)
                .map_err(|e| RepositoryError::from(e).with_operation("create_flight"))?;

            Ok(FlightId::new(id))
        })
        .await
    }

    async fn update_flight_route(
        &self,
        id: FlightId,
        route: &FlightRoute,
    ) -> RepositoryResult<usize> {
        let route = *route;
        self.run_query(move |conn| {
            diesel::update(vuelos::table.filter(vuelos::id_vuelo.eq(id.value())))
                .set((
                    vuelos::id_origen.eq(route.id_origen.value()),
                    vuelos::id_destino.eq(route.id_destino.value()),
                ))
                .execute(conn)
                .map_err(|e| RepositoryError::from(e).with_operation("update_flight_route"))
        })
        .await
    }

    async fn delete_flight(&self, id: FlightId) -> RepositoryResult<usize> {
        self.run_query(move |conn| {
            diesel::delete(vuelos::table.filter(vuelos::id_vuelo.eq(id.value())))
                .execute(conn)
                .map_err(|e| RepositoryError::from(e).with_operation("delete_flight"))
        })
        .await
    }
}

#[async_trait]
impl FullRepository for PostgresRepository {
    async fn health_check(&self) -> RepositoryResult<()> {
        self.run_query(|conn| {
            sql_query("SELECT 1")
                .execute(conn)
                .map(|_| ())
                .map_err(RepositoryError::from)
        })
        .await
    }
}
