use crate::domain::CartItem;

/// Custom actions for Cart entities. Each returns the updated cart.
#[derive(Debug, Clone)]
pub enum CartAction {
    /// Adds a line, or merges into the existing line for the same product.
    Add(CartItem),
    /// Replaces a line's quantity; zero removes the line.
    SetQuantity { product_id: String, quantity: u32 },
    Remove(String),
    Clear,
}
