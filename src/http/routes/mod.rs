pub mod admin;
pub mod cart;
pub mod health;
pub mod orders;
pub mod payment;
pub mod products;
pub mod reviews;
pub mod users;
pub mod wishlist;
