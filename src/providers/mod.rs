//! Backend collaborators for the guided session
//!
//! The session depends on two trait seams: the suggestion generator and the
//! dish catalog. The HTTP client implements both against the restaurant
//! REST backend.

pub mod base;
pub mod http;

pub use base::{
    ChatMessage, ChatRole, DishCatalog, SuggestionProvider, SuggestionRequest, SuggestionResponse,
};
pub use http::BackendClient;

#[cfg(test)]
pub use base::{MockDishCatalog, MockSuggestionProvider};

use crate::config::BackendConfig;
use crate::error::Result;
use std::sync::Arc;

/// Builds the shared backend client used for both suggestions and catalog
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be constructed.
pub fn create_backend(config: &BackendConfig) -> Result<Arc<BackendClient>> {
    Ok(Arc::new(BackendClient::new(config.clone())?))
}
