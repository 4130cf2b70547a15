use tracing::{error, info, warn};

use crate::catalog;
use crate::clients::{CartClient, OrderClient, ProductClient, ReviewClient, UserClient, WishlistClient};
use crate::config::Config;
use crate::domain::{Role, User, UserCreate};
use crate::payment::PaymentService;
use crate::user_actor::UserError;
use crate::{cart_actor, order_actor, product_actor, review_actor, user_actor, wishlist_actor};

use super::SystemError;

/// The application system that owns every actor.
///
/// Responsible for starting up actors, wiring their clients together, and handling shutdown.
pub struct StoreSystem {
    pub user_client: UserClient,
    pub product_client: ProductClient,
    pub order_client: OrderClient,
    pub cart_client: CartClient,
    pub wishlist_client: WishlistClient,
    pub review_client: ReviewClient,
    pub payments: PaymentService,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl StoreSystem {
    pub fn new(config: &Config) -> Self {
        let buffer = config.actor_buffer;

        let (user_actor, user_client) = user_actor::new(buffer);
        let (product_actor, product_client) = product_actor::new(buffer);
        let (cart_actor, cart_inner) = cart_actor::new(buffer);
        let (wishlist_actor, wishlist_inner) = wishlist_actor::new(buffer);
        let (order_actor, order_inner) = order_actor::new(buffer);
        let (review_actor, review_inner) = review_actor::new(buffer);

        let handles = vec![
            tokio::spawn(user_actor.run()),
            tokio::spawn(product_actor.run()),
            tokio::spawn(cart_actor.run()),
            tokio::spawn(wishlist_actor.run()),
            tokio::spawn(order_actor.run()),
            tokio::spawn(review_actor.run()),
        ];

        let cart_client = CartClient::new(cart_inner, product_client.clone());
        let wishlist_client = WishlistClient::new(wishlist_inner, product_client.clone());
        let order_client = OrderClient::new(
            order_inner,
            user_client.clone(),
            product_client.clone(),
            cart_client.clone(),
            config.pricing.clone(),
        );
        let review_client = ReviewClient::new(review_inner, product_client.clone(), order_client.clone());
        let payments = PaymentService::new(config.razorpay.clone(), config.upi.clone(), order_client.clone());

        info!(actors = handles.len(), buffer, "Store system started");

        Self {
            user_client,
            product_client,
            order_client,
            cart_client,
            wishlist_client,
            review_client,
            payments,
            handles,
        }
    }

    /// Seeds the sample catalog into an empty store and creates the configured admin.
    /// Returns the admin account when one is configured.
    pub async fn bootstrap(&self, config: &Config) -> Result<Option<User>, SystemError> {
        if config.seed_sample_catalog {
            let existing = self
                .product_client
                .list_products()
                .await
                .map_err(|e| SystemError::Seed(e.to_string()))?;
            if existing.is_empty() {
                let samples = catalog::sample_catalog();
                let count = samples.len();
                for params in samples {
                    self.product_client
                        .create_product(params)
                        .await
                        .map_err(|e| SystemError::Seed(e.to_string()))?;
                }
                info!(count, "Sample catalog seeded");
            }
        }

        let Some(admin) = &config.admin else {
            return Ok(None);
        };
        let params = UserCreate {
            name: admin.name.clone(),
            email: admin.email.clone(),
            role: Role::Admin,
        };
        match self.user_client.create_user(params).await {
            Ok(user) => {
                info!(user_id = %user.id, email = %user.email, "Admin account created");
                Ok(Some(user))
            }
            Err(UserError::AlreadyExists(email)) => {
                warn!(%email, "Admin account already exists");
                self.user_client
                    .find_by_email(&email)
                    .await
                    .map_err(|e| SystemError::Seed(e.to_string()))
            }
            Err(e) => Err(SystemError::Seed(e.to_string())),
        }
    }

    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down system...");
        // Actors stop once every client holding their sender is gone.
        drop(self.payments);
        drop(self.review_client);
        drop(self.order_client);
        drop(self.cart_client);
        drop(self.wishlist_client);
        drop(self.product_client);
        drop(self.user_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(SystemError::ActorFailed(format!("{e:?}")));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
