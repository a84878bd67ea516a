//! Tests for the repository error types.

use vuelos_rust::db::repository::{ErrorContext, RepositoryError, RepositoryResult};

// ==================== ErrorContext ====================

#[test]
fn test_context_starts_with_operation_only() {
    let ctx = ErrorContext::new("list_flights");
    assert_eq!(ctx.operation.as_deref(), Some("list_flights"));
    assert!(ctx.entity.is_none());
    assert!(ctx.entity_id.is_none());
    assert!(ctx.details.is_none());
    assert!(!ctx.retryable);
}

#[test]
fn test_context_builder_accumulates_fields() {
    let ctx = ErrorContext::new("update_flight_route")
        .with_entity("flight")
        .with_entity_id(7)
        .with_details("endpoints swapped")
        .retryable();

    assert_eq!(ctx.operation.as_deref(), Some("update_flight_route"));
    assert_eq!(ctx.entity.as_deref(), Some("flight"));
    assert_eq!(ctx.entity_id.as_deref(), Some("7"));
    assert_eq!(ctx.details.as_deref(), Some("endpoints swapped"));
    assert!(ctx.retryable);
}

#[test]
fn test_context_default_is_empty() {
    let ctx = ErrorContext::default();
    assert!(ctx.operation.is_none());
    assert!(ctx.entity.is_none());
    assert!(ctx.entity_id.is_none());
    assert!(ctx.details.is_none());
    assert!(!ctx.retryable);
}

#[test]
fn test_context_display_lists_set_fields() {
    let rendered = ErrorContext::new("get_destination")
        .with_entity("destination")
        .with_entity_id(123)
        .to_string();

    assert!(rendered.contains("operation=get_destination"));
    assert!(rendered.contains("entity=destination"));
    assert!(rendered.contains("id=123"));
    assert!(!rendered.contains("details="));
    assert!(!rendered.contains("retryable"));
}

#[test]
fn test_context_display_includes_details_and_retry_flag() {
    let rendered = ErrorContext::new("checkout_connection")
        .with_details("pool saturated")
        .retryable()
        .to_string();

    assert!(rendered.contains("details=pool saturated"));
    assert!(rendered.contains("retryable=true"));
}

#[test]
fn test_context_clone_keeps_fields() {
    let original = ErrorContext::new("delete_destination").with_entity("destination");
    let copy = original.clone();
    assert_eq!(copy.operation, original.operation);
    assert_eq!(copy.entity, original.entity);
}

// ==================== Constructors ====================

#[test]
fn test_connection_error_message_and_variant() {
    let err = RepositoryError::connection("connection refused");
    let rendered = err.to_string();
    assert!(rendered.contains("Connection error"));
    assert!(rendered.contains("connection refused"));
    assert!(matches!(err, RepositoryError::ConnectionError { .. }));
}

#[test]
fn test_connection_with_context_renders_operation() {
    let ctx = ErrorContext::new("build_pool").with_entity("database");
    let err = RepositoryError::connection_with_context("no route to host", ctx);
    let rendered = err.to_string();
    assert!(rendered.contains("no route to host"));
    assert!(rendered.contains("operation=build_pool"));
}

#[test]
fn test_query_error_message() {
    let err = RepositoryError::query("relation vuelos does not exist");
    assert!(err.to_string().contains("Query error"));
    assert!(err.to_string().contains("relation vuelos does not exist"));
}

#[test]
fn test_query_with_context_renders_operation() {
    let ctx = ErrorContext::new("list_flight_itineraries").with_entity("flight");
    let err = RepositoryError::query_with_context("join failed", ctx);
    assert!(err.to_string().contains("join failed"));
    assert!(err.to_string().contains("operation=list_flight_itineraries"));
}

#[test]
fn test_not_found_variant() {
    let err = RepositoryError::not_found("Flight 42 not found");
    assert!(err.to_string().contains("Not found"));
    assert!(matches!(err, RepositoryError::NotFound { .. }));
}

#[test]
fn test_not_found_with_context_renders_id() {
    let ctx = ErrorContext::new("get_flight").with_entity_id(42);
    let err = RepositoryError::not_found_with_context("Flight 42 not found", ctx);
    assert!(err.to_string().contains("id=42"));
}

#[test]
fn test_validation_error_message() {
    let err = RepositoryError::validation("hora is not a valid time");
    assert!(err.to_string().contains("validation error"));
    assert!(err.to_string().contains("hora is not a valid time"));
}

#[test]
fn test_configuration_error_message() {
    let err = RepositoryError::configuration("DATABASE_URL is not set");
    assert!(err.to_string().contains("Configuration error"));
    assert!(err.to_string().contains("DATABASE_URL is not set"));
}

#[test]
fn test_internal_error_message() {
    let err = RepositoryError::internal("row vanished mid-update");
    assert!(err.to_string().contains("Internal error"));
    assert!(err.to_string().contains("row vanished mid-update"));
}

#[test]
fn test_timeout_error_message() {
    let err = RepositoryError::timeout("gave up after 30s");
    assert!(err.to_string().contains("Timeout error"));
    assert!(err.to_string().contains("gave up after 30s"));
}

// ==================== Retryability ====================

#[test]
fn test_connection_and_timeout_are_retryable() {
    assert!(RepositoryError::connection("lost connection").is_retryable());
    assert!(RepositoryError::timeout("checkout timed out").is_retryable());
}

#[test]
fn test_query_retryability_follows_context() {
    assert!(!RepositoryError::query("syntax error").is_retryable());

    let serialization = RepositoryError::query_with_context(
        "could not serialize access",
        ErrorContext::new("update_flight_route").retryable(),
    );
    assert!(serialization.is_retryable());
}

#[test]
fn test_terminal_errors_are_not_retryable() {
    assert!(!RepositoryError::not_found("missing").is_retryable());
    assert!(!RepositoryError::validation("bad payload").is_retryable());
    assert!(!RepositoryError::configuration("bad url").is_retryable());
    assert!(!RepositoryError::internal("bug").is_retryable());
}

// ==================== Accessors ====================

#[test]
fn test_with_operation_overrides_context() {
    let err = RepositoryError::query("deadlock").with_operation("delete_flight");
    assert!(err.to_string().contains("operation=delete_flight"));
    assert_eq!(err.context().operation.as_deref(), Some("delete_flight"));
}

#[test]
fn test_context_accessor_exposes_fields() {
    let ctx = ErrorContext::new("create_destination").with_entity("destination");
    let err = RepositoryError::query_with_context("insert failed", ctx);
    assert_eq!(
        err.context().operation.as_deref(),
        Some("create_destination")
    );
    assert_eq!(err.context().entity.as_deref(), Some("destination"));
}

#[test]
fn test_debug_names_the_variant() {
    let err = RepositoryError::internal("boom");
    assert!(format!("{:?}", err).contains("InternalError"));
}

#[test]
fn test_repository_result_round_trip() {
    let ok: RepositoryResult<i64> = Ok(7);
    assert_eq!(ok.unwrap(), 7);

    let err: RepositoryResult<i64> = Err(RepositoryError::not_found("no such flight"));
    assert!(err.is_err());
}
