use chrono::Utc;

use super::actions::WishlistAction;
use super::error::WishlistError;
use crate::actor_framework::Entity;
use crate::domain::{Wishlist, WishlistCreate};

impl Entity for Wishlist {
    type Id = String;
    type CreateParams = WishlistCreate;
    type UpdateParams = ();
    type Action = WishlistAction;
    type ActionResult = Wishlist;
    type Error = WishlistError;

    fn from_create_params(id: String, _params: WishlistCreate) -> Result<Self, WishlistError> {
        Ok(Wishlist::empty(id))
    }

    fn natural_id(params: &WishlistCreate) -> Option<String> {
        Some(params.user_id.clone())
    }

    fn on_update(&mut self, _params: ()) -> Result<(), WishlistError> {
        Ok(())
    }

    fn handle_action(&mut self, action: WishlistAction) -> Result<Wishlist, WishlistError> {
        match action {
            WishlistAction::Add(product_id) => {
                if self.products.contains(&product_id) {
                    return Err(WishlistError::AlreadyPresent(product_id));
                }
                self.products.push(product_id);
            }
            WishlistAction::Remove(product_id) => self.products.retain(|id| *id != product_id),
            WishlistAction::Clear => self.products.clear(),
        }
        self.updated_at = Utc::now();
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_is_set_like() {
        let mut wishlist = Wishlist::empty("user_1");
        wishlist.handle_action(WishlistAction::Add("product_1".into())).unwrap();
        assert_eq!(
            wishlist.handle_action(WishlistAction::Add("product_1".into())),
            Err(WishlistError::AlreadyPresent("product_1".into()))
        );

        let cleared = wishlist.handle_action(WishlistAction::Clear).unwrap();
        assert!(cleared.products.is_empty());
    }
}
