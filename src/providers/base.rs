//! Suggestion-provider trait and common wire types
//!
//! This module defines the contracts the conversation session depends on:
//! the suggestion generator and the dish catalog. Both are async trait
//! seams so the backend client can be swapped for test doubles.

use crate::error::Result;
use crate::menu::{Dish, DishSummary};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

#[cfg(test)]
use mockall::automock;

/// Sender of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl fmt::Display for ChatRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Assistant => write!(f, "assistant"),
        }
    }
}

/// A single chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    /// Creates a new user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    /// Creates a new assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Request sent to the suggestion generator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionRequest {
    #[serde(rename = "restaurantId")]
    pub restaurant_id: String,
    pub messages: Vec<ChatMessage>,
}

/// Response from the suggestion generator
///
/// `dish` is present when the backend identified a concrete dish for the
/// requested categories; `text` is always present and user-facing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionResponse {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dish: Option<DishSummary>,
}

/// Maps conversational context to a recommended dish and explanatory text
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SuggestionProvider: Send + Sync {
    /// Generates a suggestion for the given context
    ///
    /// # Errors
    ///
    /// Returns an error when the backend rejects the request or cannot be
    /// reached. Connectivity failures carry `"network"` in their message so
    /// callers can pick connectivity-specific user copy.
    async fn generate_suggestion(&self, request: &SuggestionRequest) -> Result<SuggestionResponse>;
}

/// Read access to the restaurant's dish catalog
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DishCatalog: Send + Sync {
    /// Fetches a full dish by id
    async fn dish_by_id(&self, dish_id: &str) -> Result<Dish>;

    /// Lists the dishes of a restaurant
    async fn dishes_for_restaurant(&self, restaurant_id: &str) -> Result<Vec<Dish>>;
}
