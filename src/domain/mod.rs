pub mod cart;
pub mod order;
pub mod product;
pub mod review;
pub mod user;
pub mod wishlist;

pub use cart::*;
pub use order::*;
pub use product::*;
pub use review::*;
pub use user::*;
pub use wishlist::*;
