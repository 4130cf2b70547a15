use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-user set of saved product ids, in the order they were added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wishlist {
    pub user_id: String,
    pub products: Vec<String>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct WishlistCreate {
    pub user_id: String,
}

impl Wishlist {
    pub fn empty(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            products: Vec::new(),
            updated_at: Utc::now(),
        }
    }
}
