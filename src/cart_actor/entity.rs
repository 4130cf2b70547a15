use chrono::Utc;

use super::actions::CartAction;
use super::error::CartError;
use crate::actor_framework::Entity;
use crate::domain::{Cart, CartCreate};

impl Entity for Cart {
    type Id = String;
    type CreateParams = CartCreate;
    type UpdateParams = ();
    type Action = CartAction;
    type ActionResult = Cart;
    type Error = CartError;

    fn from_create_params(id: String, _params: CartCreate) -> Result<Self, CartError> {
        Ok(Cart::empty(id))
    }

    /// Carts are keyed by their owner.
    fn natural_id(params: &CartCreate) -> Option<String> {
        Some(params.user_id.clone())
    }

    fn on_update(&mut self, _params: ()) -> Result<(), CartError> {
        Ok(())
    }

    fn handle_action(&mut self, action: CartAction) -> Result<Cart, CartError> {
        match action {
            CartAction::Add(item) => {
                if item.quantity == 0 {
                    return Err(CartError::InvalidQuantity(0));
                }
                match self.items.iter_mut().find(|line| line.product_id == item.product_id) {
                    Some(line) => line.quantity = line.quantity.saturating_add(item.quantity),
                    None => self.items.push(item),
                }
            }
            CartAction::SetQuantity { product_id, quantity } => {
                let index = self
                    .items
                    .iter()
                    .position(|line| line.product_id == product_id)
                    .ok_or(CartError::ItemNotFound(product_id))?;
                if quantity == 0 {
                    self.items.remove(index);
                } else {
                    self.items[index].quantity = quantity;
                }
            }
            CartAction::Remove(product_id) => self.items.retain(|line| line.product_id != product_id),
            CartAction::Clear => self.items.clear(),
        }
        self.updated_at = Utc::now();
        Ok(self.clone())
    }
}
