use chrono::Utc;

use super::error::ReviewError;
use crate::actor_framework::Entity;
use crate::domain::{Review, ReviewCreate, ReviewUpdate};

fn validate_rating(rating: u8) -> Result<(), ReviewError> {
    if (1..=5).contains(&rating) {
        Ok(())
    } else {
        Err(ReviewError::ValidationError(format!("Rating must be between 1 and 5, got {rating}")))
    }
}

/// Bumps the helpful counter and returns the new count.
#[derive(Debug, Clone)]
pub struct MarkHelpful;

impl Entity for Review {
    type Id = String;
    type CreateParams = ReviewCreate;
    type UpdateParams = ReviewUpdate;
    type Action = MarkHelpful;
    type ActionResult = u32;
    type Error = ReviewError;

    /// Reviews are created only after the purchase check, so they start verified.
    fn from_create_params(id: String, params: ReviewCreate) -> Result<Self, ReviewError> {
        validate_rating(params.rating)?;
        if params.comment.trim().is_empty() {
            return Err(ReviewError::ValidationError("Comment required".to_string()));
        }

        let title = params
            .title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| format!("Review by {}", params.user_name));

        Ok(Self {
            id,
            product_id: params.product_id,
            user_id: params.user_id,
            user_name: params.user_name,
            rating: params.rating,
            title,
            comment: params.comment,
            verified: true,
            helpful: 0,
            created_at: Utc::now(),
        })
    }

    /// One review per user and product.
    fn natural_id(params: &ReviewCreate) -> Option<String> {
        Some(format!("review_{}_{}", params.product_id, params.user_id))
    }

    fn on_update(&mut self, params: ReviewUpdate) -> Result<(), ReviewError> {
        if let Some(rating) = params.rating {
            validate_rating(rating)?;
            self.rating = rating;
        }
        if let Some(title) = params.title {
            self.title = title;
        }
        if let Some(comment) = params.comment {
            if comment.trim().is_empty() {
                return Err(ReviewError::ValidationError("Comment required".to_string()));
            }
            self.comment = comment;
        }
        Ok(())
    }

    fn handle_action(&mut self, _action: MarkHelpful) -> Result<u32, ReviewError> {
        self.helpful = self.helpful.saturating_add(1);
        Ok(self.helpful)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(rating: u8) -> ReviewCreate {
        ReviewCreate {
            product_id: "product_1".into(),
            user_id: "user_1".into(),
            user_name: "Asha".into(),
            rating,
            title: None,
            comment: "Quiet and fast".into(),
        }
    }

    #[test]
    fn test_rating_bounds_and_default_title() {
        assert!(Review::from_create_params("review_1".into(), params(0)).is_err());
        assert!(Review::from_create_params("review_1".into(), params(6)).is_err());

        let review = Review::from_create_params("review_1".into(), params(5)).unwrap();
        assert_eq!(review.title, "Review by Asha");
        assert!(review.verified);
    }
}
