use std::sync::Arc;

use super::auth::JwtKeys;
use crate::app_system::StoreSystem;
use crate::clients::{CartClient, OrderClient, ProductClient, ReviewClient, UserClient, WishlistClient};
use crate::config::Config;
use crate::payment::PaymentService;

#[derive(Clone)]
pub struct AppState {
    pub users: UserClient,
    pub products: ProductClient,
    pub orders: OrderClient,
    pub carts: CartClient,
    pub wishlists: WishlistClient,
    pub reviews: ReviewClient,
    pub payments: PaymentService,
    pub jwt: Arc<JwtKeys>,
}

impl AppState {
    pub fn new(system: &StoreSystem, config: &Config) -> Self {
        Self {
            users: system.user_client.clone(),
            products: system.product_client.clone(),
            orders: system.order_client.clone(),
            carts: system.cart_client.clone(),
            wishlists: system.wishlist_client.clone(),
            reviews: system.review_client.clone(),
            payments: system.payments.clone(),
            jwt: Arc::new(JwtKeys::new(&config.jwt_secret, config.jwt_ttl_hours)),
        }
    }
}
