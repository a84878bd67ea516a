//! Shared state handed to every handler.

use std::sync::Arc;

use crate::db::repository::FullRepository;

/// Everything a handler needs to serve a request: the storage backend.
///
/// The state is cloned per request; the repository itself is shared
/// through the `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn FullRepository>,
}

impl AppState {
    pub fn new(repository: Arc<dyn FullRepository>) -> Self {
        Self { repository }
    }
}
