//! Backend for a flight catalog: destinations (`destinos`) and the flights
//! (`vuelos`) connecting them, served as a JSON REST API.
//!
//! A destination is a country/city pair. A flight links two destinations and
//! carries a day, a departure time and an optional image URL. Flight listings
//! come back joined against both endpoints, so clients get city and country
//! names without extra round trips.
//!
//! Storage sits behind repository traits with two implementations: Postgres
//! through Diesel (feature `postgres-repo`) and an in-memory store (feature
//! `local-repo`). The axum server (feature `http-server`) adds CORS,
//! compression, request tracing and an OpenAPI 3.0 document at `/api-docs`.
//!
//! Module map:
//! - [`api`]: entity types and payload DTOs
//! - [`db`]: repository traits, backends and configuration
//! - [`http`]: router, handlers and error mapping

// RepositoryError embeds an ErrorContext, which makes Result payloads large.
#![allow(clippy::result_large_err)]

pub mod api;

pub mod db;

#[cfg(feature = "http-server")]
pub mod http;
