//! HTTP surface of the flights backend.
//!
//! An axum server exposing destinations and flights as a REST API, plus a
//! health probe and a machine-readable OpenAPI document. Handlers reach the
//! storage layer only through [`AppState`], so the same router runs against
//! either backend.
//!
//! The wire contract is Spanish throughout: entity fields keep their
//! database names (`pais`, `ciudad`, `id_origen`, ...), outcomes arrive as
//! `{"message": ...}` and failures as `{"error": ...}`.

#[cfg(feature = "http-server")]
pub mod dto;
#[cfg(feature = "http-server")]
pub mod error;
#[cfg(feature = "http-server")]
pub mod handlers;
#[cfg(feature = "http-server")]
pub mod openapi;
#[cfg(feature = "http-server")]
pub mod router;
#[cfg(feature = "http-server")]
pub mod state;

#[cfg(feature = "http-server")]
pub use router::{create_router, create_router_with_cors, CorsSettings};
#[cfg(feature = "http-server")]
pub use state::AppState;
