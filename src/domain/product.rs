use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Represents a product in the catalog.
///
/// `stock` is the authoritative unit count. It only changes through
/// [`ProductAction`](crate::product_actor::ProductAction)s handled inside the product
/// actor, so a decrement is always checked against the current value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: String,
    pub description: String,
    pub price: f64,
    /// Maximum retail price, shown struck through next to `price`.
    pub mrp: f64,
    pub stock: u32,
    pub specifications: BTreeMap<String, String>,
    pub supplier: Option<SupplierInfo>,
    pub image_url: Option<String>,
    pub average_rating: f64,
    pub review_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierInfo {
    pub name: String,
    pub contact: Option<String>,
    pub email: Option<String>,
}

/// Params for creating a product.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreate {
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub mrp: Option<f64>,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub specifications: BTreeMap<String, String>,
    pub supplier: Option<SupplierInfo>,
    pub image_url: Option<String>,
}

/// Params for updating a product. Stock is not patchable here; it moves through
/// restock and the order lifecycle only.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub mrp: Option<f64>,
    pub specifications: Option<BTreeMap<String, String>>,
    pub supplier: Option<SupplierInfo>,
    pub image_url: Option<String>,
}

impl Product {
    /// Whole-number discount of `price` against `mrp`.
    pub fn discount_percent(&self) -> u32 {
        if self.mrp <= 0.0 || self.price >= self.mrp {
            return 0;
        }
        (((self.mrp - self.price) / self.mrp) * 100.0).round() as u32
    }

    pub fn matches(&self, category: Option<&str>, search: Option<&str>) -> bool {
        let category_ok = category.map_or(true, |c| self.category.eq_ignore_ascii_case(c));
        let search_ok = search.map_or(true, |term| {
            let term = term.to_lowercase();
            self.name.to_lowercase().contains(&term) || self.description.to_lowercase().contains(&term)
        });
        category_ok && search_ok
    }
}
