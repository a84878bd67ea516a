//! Route table and middleware stack.
//!
//! Builds the axum [`Router`]: the destination and flight CRUD routes, the
//! service endpoints, and the CORS, compression and tracing layers around
//! them.

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use super::handlers;
use super::state::AppState;

/// Origins allowed to call the API when `CORS_ALLOWED_ORIGINS` is not set.
const DEFAULT_ALLOWED_ORIGINS: [&str; 3] = [
    "http://localhost:4200",
    "http://172.17.22.103:4200",
    "http://172.17.40.7:4200",
];

/// CORS allow-list configuration.
#[derive(Debug, Clone)]
pub struct CorsSettings {
    /// Origins allowed to call the API
    pub allowed_origins: Vec<String>,
}

impl Default for CorsSettings {
    fn default() -> Self {
        Self {
            allowed_origins: DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl CorsSettings {
    /// Read the allow-list from `CORS_ALLOWED_ORIGINS` (comma-separated).
    ///
    /// Falls back to the default development origins when unset or empty.
    pub fn from_env() -> Self {
        match std::env::var("CORS_ALLOWED_ORIGINS") {
            Ok(raw) => {
                let origins = parse_origins(&raw);
                if origins.is_empty() {
                    Self::default()
                } else {
                    Self {
                        allowed_origins: origins,
                    }
                }
            }
            Err(_) => Self::default(),
        }
    }

    fn to_layer(&self) -> CorsLayer {
        let origins: Vec<HeaderValue> = self
            .allowed_origins
            .iter()
            .filter_map(|origin| match origin.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin, "ignoring invalid CORS origin");
                    None
                }
            })
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Build the application router, reading the CORS allow-list from the
/// environment.
pub fn create_router(state: AppState) -> Router {
    create_router_with_cors(state, CorsSettings::from_env())
}

/// Create the application router with an explicit CORS configuration.
pub fn create_router_with_cors(state: AppState, cors: CorsSettings) -> Router {
    Router::new()
        // Destination CRUD
        .route("/destinos", get(handlers::list_destinations))
        .route("/destinos", post(handlers::create_destination))
        .route("/destinos/{id}", get(handlers::get_destination))
        .route("/destinos/{id}", put(handlers::update_destination))
        .route("/destinos/{id}", delete(handlers::delete_destination))
        // Flight CRUD
        .route("/vuelos", get(handlers::list_flights))
        .route("/vuelos", post(handlers::create_flight))
        .route("/vuelos/{id}", get(handlers::get_flight))
        .route("/vuelos/{id}", put(handlers::update_flight))
        .route("/vuelos/{id}", delete(handlers::delete_flight))
        // Service endpoints
        .route("/health", get(handlers::health_check))
        .route("/api-docs", get(handlers::api_docs))
        .route("/api-docs/openapi.json", get(handlers::api_docs))
        // Request bodies are small JSON documents.
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors.to_layer())
        .with_state(state)
}
