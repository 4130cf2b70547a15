use super::dtos::StockSnapshot;

/// Custom actions for Product entities.
///
/// These actions represent domain-specific operations that can be performed
/// on a product beyond standard CRUD operations.
#[derive(Debug, Clone)]
pub enum ProductAction {
    /// Reads the current stock level without modifying it.
    CheckStock,
    /// Takes units out of stock for an order.
    ///
    /// # Errors
    /// Fails if the requested amount exceeds available stock. Nothing is decremented then.
    ReserveStock(u32),
    /// Puts previously reserved units back, e.g. when an order is cancelled.
    ReleaseStock(u32),
    /// Adds newly received units. Zero is rejected.
    Restock(u32),
    /// Stores the recomputed review aggregate.
    SetRating { average: f64, count: u32 },
}

/// Results from ProductActions - variants match 1:1 with ProductAction
#[derive(Debug, Clone, PartialEq)]
pub enum ProductActionResult {
    StockLevel(StockSnapshot),
    Reserved { remaining: u32 },
    Released { stock: u32 },
    Restocked { stock: u32 },
    RatingUpdated,
}
