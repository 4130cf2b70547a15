use chrono::Utc;

use super::actions::{ProductAction, ProductActionResult};
use super::dtos::StockSnapshot;
use super::error::ProductError;
use crate::actor_framework::Entity;
use crate::domain::{Product, ProductCreate, ProductUpdate};

fn validate_price(field: &str, value: f64) -> Result<(), ProductError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ProductError::ValidationError(format!("{field} must be a non-negative number")))
    }
}

impl Entity for Product {
    type Id = String;
    type CreateParams = ProductCreate;
    type UpdateParams = ProductUpdate;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;
    type Error = ProductError;

    /// Creates a new Product from creation parameters.
    ///
    /// `mrp` defaults to `price` when absent.
    fn from_create_params(id: String, params: ProductCreate) -> Result<Self, ProductError> {
        if params.name.trim().is_empty() {
            return Err(ProductError::ValidationError("Product name required".to_string()));
        }
        if params.category.trim().is_empty() {
            return Err(ProductError::ValidationError("Product category required".to_string()));
        }
        validate_price("price", params.price)?;
        let mrp = params.mrp.unwrap_or(params.price);
        validate_price("mrp", mrp)?;

        let now = Utc::now();
        Ok(Self {
            id,
            name: params.name,
            category: params.category,
            description: params.description,
            price: params.price,
            mrp,
            stock: params.stock,
            specifications: params.specifications,
            supplier: params.supplier,
            image_url: params.image_url,
            average_rating: 0.0,
            review_count: 0,
            created_at: now,
            updated_at: now,
        })
    }

    /// Updates catalog fields. Stock is left to actions.
    fn on_update(&mut self, params: ProductUpdate) -> Result<(), ProductError> {
        if let Some(name) = params.name {
            if name.trim().is_empty() {
                return Err(ProductError::ValidationError("Product name required".to_string()));
            }
            self.name = name;
        }
        if let Some(category) = params.category {
            self.category = category;
        }
        if let Some(description) = params.description {
            self.description = description;
        }
        if let Some(price) = params.price {
            validate_price("price", price)?;
            self.price = price;
        }
        if let Some(mrp) = params.mrp {
            validate_price("mrp", mrp)?;
            self.mrp = mrp;
        }
        if let Some(specifications) = params.specifications {
            self.specifications = specifications;
        }
        if let Some(supplier) = params.supplier {
            self.supplier = Some(supplier);
        }
        if let Some(image_url) = params.image_url {
            self.image_url = Some(image_url);
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Handles product-specific actions.
    ///
    /// # Errors
    /// `ReserveStock` fails with `InsufficientStock` when the request exceeds the
    /// current level; `ReleaseStock`/`Restock` fail on `u32` overflow.
    fn handle_action(&mut self, action: ProductAction) -> Result<ProductActionResult, ProductError> {
        match action {
            ProductAction::CheckStock => Ok(ProductActionResult::StockLevel(StockSnapshot {
                product_id: self.id.clone(),
                name: self.name.clone(),
                price: self.price,
                stock: self.stock,
            })),
            ProductAction::ReserveStock(0) => Err(ProductError::InvalidQuantity(0)),
            ProductAction::ReserveStock(amount) => {
                let remaining = self.stock.checked_sub(amount).ok_or_else(|| ProductError::InsufficientStock {
                    product_id: self.id.clone(),
                    requested: amount,
                    available: self.stock,
                })?;
                self.stock = remaining;
                Ok(ProductActionResult::Reserved { remaining })
            }
            ProductAction::ReleaseStock(amount) => {
                self.stock = self
                    .stock
                    .checked_add(amount)
                    .ok_or_else(|| ProductError::StockOverflow(self.id.clone()))?;
                Ok(ProductActionResult::Released { stock: self.stock })
            }
            ProductAction::Restock(0) => Err(ProductError::InvalidQuantity(0)),
            ProductAction::Restock(amount) => {
                self.stock = self
                    .stock
                    .checked_add(amount)
                    .ok_or_else(|| ProductError::StockOverflow(self.id.clone()))?;
                self.updated_at = Utc::now();
                Ok(ProductActionResult::Restocked { stock: self.stock })
            }
            ProductAction::SetRating { average, count } => {
                self.average_rating = average;
                self.review_count = count;
                Ok(ProductActionResult::RatingUpdated)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fan(stock: u32) -> Product {
        let params = ProductCreate {
            name: "Ceiling Fan".into(),
            category: "Fans".into(),
            description: String::new(),
            price: 2499.0,
            mrp: Some(3199.0),
            stock,
            specifications: Default::default(),
            supplier: None,
            image_url: None,
        };
        Product::from_create_params("product_1".into(), params).unwrap()
    }

    #[test]
    fn test_reserve_is_compare_and_decrement() {
        let mut product = fan(2);
        assert_eq!(
            product.handle_action(ProductAction::ReserveStock(2)),
            Ok(ProductActionResult::Reserved { remaining: 0 })
        );
        assert_eq!(
            product.handle_action(ProductAction::ReserveStock(1)),
            Err(ProductError::InsufficientStock {
                product_id: "product_1".into(),
                requested: 1,
                available: 0,
            })
        );
        assert_eq!(product.stock, 0);
    }

    #[test]
    fn test_release_and_restock() {
        let mut product = fan(1);
        assert_eq!(
            product.handle_action(ProductAction::ReleaseStock(4)),
            Ok(ProductActionResult::Released { stock: 5 })
        );
        assert_eq!(
            product.handle_action(ProductAction::Restock(0)),
            Err(ProductError::InvalidQuantity(0))
        );

        product.stock = u32::MAX;
        assert!(matches!(
            product.handle_action(ProductAction::Restock(1)),
            Err(ProductError::StockOverflow(_))
        ));
    }

    #[test]
    fn test_mrp_defaults_to_price_and_discount() {
        let product = fan(0);
        assert_eq!(product.discount_percent(), 22);

        let params = ProductCreate {
            name: "LED Bulb".into(),
            category: "Lighting".into(),
            description: String::new(),
            price: 120.0,
            mrp: None,
            stock: 10,
            specifications: Default::default(),
            supplier: None,
            image_url: None,
        };
        let bulb = Product::from_create_params("product_2".into(), params).unwrap();
        assert_eq!(bulb.mrp, 120.0);
        assert_eq!(bulb.discount_percent(), 0);
    }

    #[test]
    fn test_update_rejects_negative_price() {
        let mut product = fan(1);
        let patch = ProductUpdate {
            price: Some(-1.0),
            ..Default::default()
        };
        assert!(matches!(product.on_update(patch), Err(ProductError::ValidationError(_))));
    }
}
