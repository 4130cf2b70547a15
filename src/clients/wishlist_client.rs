use tracing::{debug, instrument, warn};

use crate::actor_framework::{FrameworkError, ResourceClient};
use crate::clients::ProductClient;
use crate::domain::{Product, Wishlist, WishlistCreate};
use crate::wishlist_actor::{WishlistAction, WishlistError};

#[derive(Clone)]
pub struct WishlistClient {
    inner: ResourceClient<Wishlist>,
    product_client: ProductClient,
}

impl WishlistClient {
    pub fn new(inner: ResourceClient<Wishlist>, product_client: ProductClient) -> Self {
        Self { inner, product_client }
    }

    #[instrument(skip(self))]
    pub async fn get_wishlist(&self, user_id: String) -> Result<Wishlist, WishlistError> {
        debug!("Sending request");
        Ok(self
            .inner
            .get(user_id.clone())
            .await?
            .unwrap_or_else(|| Wishlist::empty(user_id)))
    }

    /// Resolves the saved ids against the catalog. Products deleted since are skipped.
    #[instrument(skip(self))]
    pub async fn wishlist_products(&self, user_id: String) -> Result<Vec<Product>, WishlistError> {
        let wishlist = self.get_wishlist(user_id).await?;
        let mut products = Vec::with_capacity(wishlist.products.len());
        for product_id in wishlist.products {
            match self.product_client.get_product(product_id.clone()).await {
                Ok(Some(product)) => products.push(product),
                Ok(None) => debug!(%product_id, "Skipping deleted product"),
                Err(e) => {
                    warn!(error = %e, "Product lookup failed");
                    return Err(WishlistError::ActorCommunicationError(e.to_string()));
                }
            }
        }
        Ok(products)
    }

    #[instrument(skip(self))]
    pub async fn add_product(&self, user_id: String, product_id: String) -> Result<Wishlist, WishlistError> {
        debug!("Sending request");
        let exists = self
            .product_client
            .get_product(product_id.clone())
            .await
            .map_err(|e| WishlistError::ActorCommunicationError(e.to_string()))?
            .is_some();
        if !exists {
            return Err(WishlistError::ProductNotFound(product_id));
        }

        match self.inner.create(WishlistCreate { user_id: user_id.clone() }).await {
            Ok(_) | Err(FrameworkError::AlreadyExists(_)) => {}
            Err(e) => return Err(e.into()),
        }
        Ok(self.inner.perform_action(user_id, WishlistAction::Add(product_id)).await?)
    }

    #[instrument(skip(self))]
    pub async fn remove_product(&self, user_id: String, product_id: String) -> Result<Wishlist, WishlistError> {
        debug!("Sending request");
        Ok(self
            .inner
            .perform_action(user_id, WishlistAction::Remove(product_id))
            .await?)
    }

    #[instrument(skip(self))]
    pub async fn clear_wishlist(&self, user_id: String) -> Result<Wishlist, WishlistError> {
        debug!("Sending request");
        Ok(self.inner.perform_action(user_id, WishlistAction::Clear).await?)
    }
}
