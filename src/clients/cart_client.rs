use tracing::{debug, info, instrument};

use crate::actor_framework::{FrameworkError, ResourceClient};
use crate::cart_actor::{CartAction, CartError};
use crate::clients::ProductClient;
use crate::domain::{Cart, CartCreate, CartItem, Product};

/// Client for the Cart actor. Stock limits are checked against the catalog
/// before a line is added or grown.
#[derive(Clone)]
pub struct CartClient {
    inner: ResourceClient<Cart>,
    product_client: ProductClient,
}

impl CartClient {
    pub fn new(inner: ResourceClient<Cart>, product_client: ProductClient) -> Self {
        Self { inner, product_client }
    }

    /// The user's cart, or an empty one if they never added anything.
    #[instrument(skip(self))]
    pub async fn get_cart(&self, user_id: String) -> Result<Cart, CartError> {
        debug!("Sending request");
        Ok(self.inner.get(user_id.clone()).await?.unwrap_or_else(|| Cart::empty(user_id)))
    }

    #[instrument(skip(self))]
    pub async fn add_item(&self, user_id: String, product_id: String, quantity: u32) -> Result<Cart, CartError> {
        debug!("Sending request");
        if quantity == 0 {
            return Err(CartError::InvalidQuantity(0));
        }

        let product = self.product(&product_id).await?;
        let cart = self.get_cart(user_id.clone()).await?;
        let requested = cart.quantity_of(&product_id).saturating_add(quantity);
        if requested > product.stock {
            return Err(CartError::InsufficientStock {
                requested,
                available: product.stock,
            });
        }

        self.ensure_cart(&user_id).await?;
        let item = CartItem {
            product_id: product.id,
            name: product.name,
            quantity,
            price: product.price,
        };
        let cart = self.inner.perform_action(user_id, CartAction::Add(item)).await?;
        info!(lines = cart.items.len(), "Item added to cart");
        Ok(cart)
    }

    /// Sets a line's quantity. Zero removes the line, negatives are rejected.
    #[instrument(skip(self))]
    pub async fn update_quantity(&self, user_id: String, product_id: String, quantity: i64) -> Result<Cart, CartError> {
        debug!("Sending request");
        let quantity = u32::try_from(quantity).map_err(|_| CartError::InvalidQuantity(quantity))?;
        if quantity > 0 {
            let product = self.product(&product_id).await?;
            if quantity > product.stock {
                return Err(CartError::InsufficientStock {
                    requested: quantity,
                    available: product.stock,
                });
            }
        }
        Ok(self
            .inner
            .perform_action(user_id, CartAction::SetQuantity { product_id, quantity })
            .await?)
    }

    #[instrument(skip(self))]
    pub async fn remove_item(&self, user_id: String, product_id: String) -> Result<Cart, CartError> {
        debug!("Sending request");
        Ok(self.inner.perform_action(user_id, CartAction::Remove(product_id)).await?)
    }

    #[instrument(skip(self))]
    pub async fn clear_cart(&self, user_id: String) -> Result<Cart, CartError> {
        debug!("Sending request");
        Ok(self.inner.perform_action(user_id, CartAction::Clear).await?)
    }

    async fn product(&self, product_id: &str) -> Result<Product, CartError> {
        self.product_client
            .get_product(product_id.to_string())
            .await
            .map_err(|e| CartError::ActorCommunicationError(e.to_string()))?
            .ok_or_else(|| CartError::ProductNotFound(product_id.to_string()))
    }

    async fn ensure_cart(&self, user_id: &str) -> Result<(), CartError> {
        let params = CartCreate {
            user_id: user_id.to_string(),
        };
        match self.inner.create(params).await {
            Ok(_) | Err(FrameworkError::AlreadyExists(_)) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProductCreate;
    use crate::{cart_actor, product_actor};

    async fn setup(stock: u32) -> (CartClient, String) {
        let (product_actor, product_client) = product_actor::new(10);
        tokio::spawn(product_actor.run());
        let (cart_actor, cart_inner) = cart_actor::new(10);
        tokio::spawn(cart_actor.run());

        let product = product_client
            .create_product(ProductCreate {
                name: "Ceiling Fan".into(),
                category: "fans".into(),
                description: String::new(),
                price: 2499.0,
                mrp: None,
                stock,
                specifications: Default::default(),
                supplier: None,
                image_url: None,
            })
            .await
            .unwrap();
        (CartClient::new(cart_inner, product_client), product.id)
    }

    #[tokio::test]
    async fn test_cumulative_quantity_limited_by_stock() {
        let (carts, product_id) = setup(3).await;

        carts.add_item("user_1".into(), product_id.clone(), 2).await.unwrap();
        let err = carts.add_item("user_1".into(), product_id.clone(), 2).await.unwrap_err();
        assert_eq!(
            err,
            CartError::InsufficientStock {
                requested: 4,
                available: 3,
            }
        );

        let cart = carts.add_item("user_1".into(), product_id.clone(), 1).await.unwrap();
        assert_eq!(cart.quantity_of(&product_id), 3);
        assert_eq!(cart.total(), 7497.0);
    }

    #[tokio::test]
    async fn test_missing_cart_and_unknown_product() {
        let (carts, _) = setup(3).await;

        assert!(carts.get_cart("user_2".into()).await.unwrap().items.is_empty());
        assert_eq!(carts.clear_cart("user_2".into()).await, Err(CartError::NotFound));
        assert_eq!(
            carts.add_item("user_2".into(), "product_99".into(), 1).await,
            Err(CartError::ProductNotFound("product_99".into()))
        );
        assert_eq!(
            carts.update_quantity("user_2".into(), "product_99".into(), -1).await,
            Err(CartError::InvalidQuantity(-1))
        );
    }
}
