//! Menu domain types and the cart sink
//!
//! `Dish` mirrors the backend's dish resource. The cart is modeled as a
//! trait seam so the session can forward a suggested dish without caring
//! where it lands; the in-memory implementation increments quantity on
//! duplicate adds, which is what makes repeated add-to-cart calls safe
//! from the session's point of view.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

#[cfg(test)]
use mockall::automock;

/// A dish as served by the backend catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dish {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    #[serde(rename = "restaurantId")]
    pub restaurant_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
}

/// Minimal dish identification returned by the suggestion backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DishSummary {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl DishSummary {
    /// Degraded full dish used when the catalog lookup fails
    ///
    /// Price is unknown at this point, so it is reported as zero.
    pub fn into_partial_dish(self, restaurant_id: impl Into<String>) -> Dish {
        Dish {
            id: self.id,
            name: self.name,
            description: self.description,
            price: 0.0,
            restaurant_id: restaurant_id.into(),
            categories: None,
        }
    }
}

/// A dish plus quantity inside a cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub dish: Dish,
    pub quantity: u32,
}

/// Destination for dishes the user decides to order
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CartSink: Send + Sync {
    /// Adds one unit of the dish to the cart
    async fn add_to_cart(&self, dish: &Dish) -> Result<()>;
}

/// Process-local cart
///
/// Duplicate adds of the same dish id increment the quantity of the
/// existing item instead of creating a new one.
#[derive(Debug, Default)]
pub struct InMemoryCart {
    items: Mutex<Vec<CartItem>>,
}

impl InMemoryCart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current cart contents
    pub fn items(&self) -> Vec<CartItem> {
        self.items.lock().expect("cart mutex poisoned").clone()
    }

    /// Total price of the cart, quantities included
    pub fn total(&self) -> f64 {
        self.items
            .lock()
            .expect("cart mutex poisoned")
            .iter()
            .map(|item| item.dish.price * item.quantity as f64)
            .sum()
    }
}

#[async_trait]
impl CartSink for InMemoryCart {
    async fn add_to_cart(&self, dish: &Dish) -> Result<()> {
        let mut items = self.items.lock().expect("cart mutex poisoned");
        if let Some(item) = items.iter_mut().find(|item| item.dish.id == dish.id) {
            item.quantity += 1;
        } else {
            items.push(CartItem {
                dish: dish.clone(),
                quantity: 1,
            });
        }
        Ok(())
    }
}
