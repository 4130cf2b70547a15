//! Typed handles over the resource actors. Orchestration across actors
//! (checkout, reviews) lives here too.

#[macro_use]
mod macros;

mod cart_client;
mod order_client;
mod product_client;
mod review_client;
mod user_client;
mod wishlist_client;

pub use cart_client::CartClient;
pub use order_client::{OrderClient, OrderPage, Pagination, PlaceOrder, SalesSummary};
pub use product_client::ProductClient;
pub use review_client::{NewReview, ReviewClient};
pub use user_client::UserClient;
pub use wishlist_client::WishlistClient;
