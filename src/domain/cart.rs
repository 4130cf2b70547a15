use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: String,
    pub name: String,
    pub quantity: u32,
    pub price: f64,
}

/// Per-user shopping cart, keyed by the owner's user id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub user_id: String,
    pub items: Vec<CartItem>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CartCreate {
    pub user_id: String,
}

impl Cart {
    pub fn empty(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            items: Vec::new(),
            updated_at: Utc::now(),
        }
    }

    pub fn total(&self) -> f64 {
        self.items.iter().map(|item| item.price * f64::from(item.quantity)).sum()
    }

    pub fn quantity_of(&self, product_id: &str) -> u32 {
        self.items
            .iter()
            .find(|item| item.product_id == product_id)
            .map_or(0, |item| item.quantity)
    }
}
