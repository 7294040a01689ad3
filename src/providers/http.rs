//! HTTP backend client
//!
//! Implements [`SuggestionProvider`] and [`DishCatalog`] against the
//! restaurant REST backend. The base URL is configurable so tests can point
//! the client at a mock server.

use crate::config::BackendConfig;
use crate::error::{GarcomError, Result};
use crate::menu::Dish;
use crate::providers::base::{DishCatalog, SuggestionProvider, SuggestionRequest, SuggestionResponse};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Client for the restaurant backend API
///
/// # Examples
///
/// ```no_run
/// use garcom::config::BackendConfig;
/// use garcom::providers::{BackendClient, SuggestionProvider, SuggestionRequest, ChatMessage};
///
/// # async fn example() -> garcom::error::Result<()> {
/// let client = BackendClient::new(BackendConfig::default())?;
/// let request = SuggestionRequest {
///     restaurant_id: "r1".to_string(),
///     messages: vec![ChatMessage::user("entrada, entrada_porcoes")],
/// };
/// let response = client.generate_suggestion(&request).await?;
/// println!("{}", response.text);
/// # Ok(())
/// # }
/// ```
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    /// Creates a client from backend configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: BackendConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self {
            client,
            base_url: config.api_base.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Wraps transport-level failures so the message carries `"network"`,
/// which the session's copy selection keys on.
fn network_error(context: &str, err: reqwest::Error) -> GarcomError {
    if err.is_connect() || err.is_timeout() {
        GarcomError::Provider(format!("network failure during {}: {}", context, err))
    } else {
        GarcomError::Provider(format!("{} failed: {}", context, err))
    }
}

#[async_trait]
impl SuggestionProvider for BackendClient {
    async fn generate_suggestion(&self, request: &SuggestionRequest) -> Result<SuggestionResponse> {
        tracing::debug!(
            restaurant_id = %request.restaurant_id,
            "requesting suggestion from backend"
        );

        let response = self
            .client
            .post(self.url("/ai/suggestions"))
            .json(request)
            .send()
            .await
            .map_err(|e| network_error("suggestion generation", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GarcomError::Provider(format!(
                "suggestion backend returned {}: {}",
                status, body
            ))
            .into());
        }

        let suggestion: SuggestionResponse = response
            .json()
            .await
            .map_err(|e| GarcomError::Provider(format!("invalid suggestion payload: {}", e)))?;

        tracing::debug!(has_dish = suggestion.dish.is_some(), "suggestion received");
        Ok(suggestion)
    }
}

#[async_trait]
impl DishCatalog for BackendClient {
    async fn dish_by_id(&self, dish_id: &str) -> Result<Dish> {
        let response = self
            .client
            .get(self.url(&format!("/dishes/{}", dish_id)))
            .send()
            .await
            .map_err(|e| network_error("dish lookup", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GarcomError::Catalog(format!(
                "dish '{}' lookup returned {}",
                dish_id, status
            ))
            .into());
        }

        let dish = response
            .json()
            .await
            .map_err(|e| GarcomError::Catalog(format!("invalid dish payload: {}", e)))?;
        Ok(dish)
    }

    async fn dishes_for_restaurant(&self, restaurant_id: &str) -> Result<Vec<Dish>> {
        let response = self
            .client
            .get(self.url(&format!("/restaurants/{}/dishes", restaurant_id)))
            .send()
            .await
            .map_err(|e| network_error("menu listing", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GarcomError::Catalog(format!(
                "menu listing for '{}' returned {}",
                restaurant_id, status
            ))
            .into());
        }

        let dishes = response
            .json()
            .await
            .map_err(|e| GarcomError::Catalog(format!("invalid menu payload: {}", e)))?;
        Ok(dishes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let config = BackendConfig {
            api_base: "http://localhost:3000/".to_string(),
            ..BackendConfig::default()
        };
        let client = BackendClient::new(config).unwrap();
        assert_eq!(client.url("/dishes/42"), "http://localhost:3000/dishes/42");
    }

    #[test]
    fn test_url_join() {
        let client = BackendClient::new(BackendConfig::default()).unwrap();
        assert!(client.url("/ai/suggestions").ends_with("/ai/suggestions"));
    }
}
