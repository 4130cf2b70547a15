use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A product review left by a customer who bought the product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub product_id: String,
    pub user_id: String,
    pub user_name: String,
    pub rating: u8,
    pub title: String,
    pub comment: String,
    pub verified: bool,
    pub helpful: u32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ReviewCreate {
    pub product_id: String,
    pub user_id: String,
    pub user_name: String,
    pub rating: u8,
    pub title: Option<String>,
    pub comment: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewUpdate {
    pub rating: Option<u8>,
    pub title: Option<String>,
    pub comment: Option<String>,
}
