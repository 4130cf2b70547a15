#[derive(Debug, Clone)]
pub enum WishlistAction {
    Add(String),
    Remove(String),
    Clear,
}
