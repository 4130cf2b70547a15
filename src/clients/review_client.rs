use tracing::{debug, info, instrument, warn};

use crate::actor_framework::ResourceClient;
use crate::clients::{OrderClient, ProductClient};
use crate::domain::{Review, ReviewCreate, ReviewUpdate, User};
use crate::product_actor::ProductError;
use crate::review_actor::{MarkHelpful, ReviewError};

/// Input for a new review; the author comes from the authenticated user.
#[derive(Debug, Clone)]
pub struct NewReview {
    pub product_id: String,
    pub rating: u8,
    pub title: Option<String>,
    pub comment: String,
}

/// Client for the Review actor. Keeps each product's rating aggregate in step
/// with its reviews.
#[derive(Clone)]
pub struct ReviewClient {
    inner: ResourceClient<Review>,
    product_client: ProductClient,
    order_client: OrderClient,
}

impl ReviewClient {
    pub fn new(inner: ResourceClient<Review>, product_client: ProductClient, order_client: OrderClient) -> Self {
        Self {
            inner,
            product_client,
            order_client,
        }
    }

    /// Reviews for a product, newest first.
    #[instrument(skip(self))]
    pub async fn list_for_product(&self, product_id: &str) -> Result<Vec<Review>, ReviewError> {
        debug!("Sending request");
        let mut reviews: Vec<Review> = self
            .inner
            .list()
            .await?
            .into_iter()
            .filter(|review| review.product_id == product_id)
            .collect();
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(reviews)
    }

    #[instrument(skip(self, user, review), fields(user_id = %user.id, product_id = %review.product_id))]
    pub async fn add_review(&self, user: &User, review: NewReview) -> Result<Review, ReviewError> {
        let product_exists = self
            .product_client
            .get_product(review.product_id.clone())
            .await
            .map_err(|e| ReviewError::ActorCommunicationError(e.to_string()))?
            .is_some();
        if !product_exists {
            return Err(ReviewError::ProductNotFound(review.product_id));
        }

        let purchased = self
            .order_client
            .has_purchased(&user.id, &review.product_id)
            .await
            .map_err(|e| ReviewError::ActorCommunicationError(e.to_string()))?;
        if !purchased {
            return Err(ReviewError::NotPurchased);
        }

        let product_id = review.product_id.clone();
        let id = self
            .inner
            .create(ReviewCreate {
                product_id: review.product_id,
                user_id: user.id.clone(),
                user_name: user.name.clone(),
                rating: review.rating,
                title: review.title,
                comment: review.comment,
            })
            .await?;
        info!(review_id = %id, "Review added");

        self.refresh_rating(&product_id).await?;
        self.inner.get(id.clone()).await?.ok_or(ReviewError::NotFound(id))
    }

    #[instrument(skip(self, user, update), fields(user_id = %user.id))]
    pub async fn update_review(&self, user: &User, id: String, update: ReviewUpdate) -> Result<Review, ReviewError> {
        let review = self.find(id.clone()).await?;
        if review.user_id != user.id {
            return Err(ReviewError::NotAuthor);
        }
        let updated = self.inner.update(id, update).await?;
        self.refresh_rating(&updated.product_id).await?;
        Ok(updated)
    }

    /// Authors may delete their own reviews; admins may delete any.
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    pub async fn delete_review(&self, user: &User, id: String) -> Result<(), ReviewError> {
        let review = self.find(id.clone()).await?;
        if review.user_id != user.id && !user.is_admin() {
            return Err(ReviewError::NotAuthor);
        }
        self.inner.delete(id).await?;
        info!(review_id = %review.id, "Review deleted");
        self.refresh_rating(&review.product_id).await
    }

    #[instrument(skip(self))]
    pub async fn mark_helpful(&self, id: String) -> Result<u32, ReviewError> {
        debug!("Sending request");
        Ok(self.inner.perform_action(id, MarkHelpful).await?)
    }

    async fn find(&self, id: String) -> Result<Review, ReviewError> {
        self.inner.get(id.clone()).await?.ok_or(ReviewError::NotFound(id))
    }

    /// Recomputes the average (one decimal) and count stored on the product.
    async fn refresh_rating(&self, product_id: &str) -> Result<(), ReviewError> {
        let reviews = self.list_for_product(product_id).await?;
        let count = reviews.len() as u32;
        let average = if count == 0 {
            0.0
        } else {
            let sum: u32 = reviews.iter().map(|review| u32::from(review.rating)).sum();
            (f64::from(sum) / f64::from(count) * 10.0).round() / 10.0
        };

        match self.product_client.set_rating(product_id.to_string(), average, count).await {
            Ok(()) => Ok(()),
            Err(ProductError::NotFound(_)) => {
                warn!(%product_id, "Product gone, rating not stored");
                Ok(())
            }
            Err(e) => Err(ReviewError::ActorCommunicationError(e.to_string())),
        }
    }
}
