use crate::domain::OrderStatus;

/// Custom actions for Order entities. Each returns the updated order.
#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Flips the order to `cancelled`. Succeeds at most once per order, which is what
    /// guarantees stock is given back exactly once.
    Cancel,
    /// Moves the order forward in the fulfilment lifecycle.
    AdvanceStatus(OrderStatus),
}
