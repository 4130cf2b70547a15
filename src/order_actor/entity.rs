use chrono::Utc;

use super::actions::OrderAction;
use super::error::OrderError;
use crate::actor_framework::Entity;
use crate::domain::{Order, OrderCreate, OrderStatus, PaymentMethod, PaymentStatus};

impl Entity for Order {
    type Id = String;
    type CreateParams = OrderCreate;
    type UpdateParams = ();
    type Action = OrderAction;
    type ActionResult = Order;
    type Error = OrderError;

    /// Creates a new Order from creation parameters.
    ///
    /// The order number is derived from the payment method, the placement date
    /// and the numeric part of the id, e.g. `COD-20250101-7`.
    fn from_create_params(id: String, params: OrderCreate) -> Result<Self, OrderError> {
        if params.items.is_empty() {
            return Err(OrderError::ValidationError("Order has no items".to_string()));
        }
        if let Some(item) = params.items.iter().find(|item| item.quantity == 0) {
            return Err(OrderError::ValidationError(format!(
                "Quantity must be at least 1 for {}",
                item.product_id
            )));
        }

        let now = Utc::now();
        let order_number = format!(
            "{}-{}-{}",
            params.payment.method.order_prefix(),
            now.format("%Y%m%d"),
            id.trim_start_matches("order_")
        );

        Ok(Self {
            id,
            order_number,
            user_id: params.user_id,
            items: params.items,
            customer: params.customer,
            summary: params.summary,
            status: params.status,
            payment_status: params.payment_status,
            payment: params.payment,
            created_at: now,
            updated_at: now,
        })
    }

    /// Orders are only changed through actions.
    fn on_update(&mut self, _params: ()) -> Result<(), OrderError> {
        Ok(())
    }

    /// Orders are never physically deleted.
    fn on_delete(&self) -> Result<(), OrderError> {
        Err(OrderError::ValidationError("Orders cannot be deleted".to_string()))
    }

    fn handle_action(&mut self, action: OrderAction) -> Result<Order, OrderError> {
        match action {
            OrderAction::Cancel => match self.status {
                OrderStatus::Shipped | OrderStatus::Delivered => Err(OrderError::NotCancellable(self.status)),
                OrderStatus::Cancelled => Err(OrderError::AlreadyCancelled),
                _ => {
                    self.status = OrderStatus::Cancelled;
                    if self.payment_status == PaymentStatus::Paid {
                        self.payment_status = PaymentStatus::Refunded;
                    }
                    self.updated_at = Utc::now();
                    Ok(self.clone())
                }
            },
            OrderAction::AdvanceStatus(OrderStatus::Cancelled) => Err(OrderError::ValidationError(
                "Use cancellation to cancel an order".to_string(),
            )),
            OrderAction::AdvanceStatus(to) => {
                let terminal = matches!(self.status, OrderStatus::Cancelled | OrderStatus::Delivered);
                if terminal || to <= self.status {
                    return Err(OrderError::InvalidTransition { from: self.status, to });
                }
                self.status = to;
                if to == OrderStatus::Delivered && self.payment.method == PaymentMethod::Cod {
                    self.payment_status = PaymentStatus::Paid;
                }
                self.updated_at = Utc::now();
                Ok(self.clone())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CustomerDetails, OrderItem, OrderSummary, PaymentDetails};

    fn cod_params(status: OrderStatus) -> OrderCreate {
        OrderCreate {
            user_id: "user_1".into(),
            items: vec![OrderItem {
                product_id: "product_1".into(),
                name: "Ceiling Fan".into(),
                quantity: 2,
                price: 2499.0,
            }],
            customer: CustomerDetails {
                first_name: "Asha".into(),
                last_name: "Rao".into(),
                email: "asha@example.com".into(),
                phone: "9000000000".into(),
                address: "12 MG Road".into(),
                city: "Pune".into(),
                state: "MH".into(),
                pincode: "411001".into(),
                landmark: None,
            },
            summary: OrderSummary {
                subtotal: 4998.0,
                shipping: 0.0,
                tax: 900.0,
                total: 5898.0,
                item_count: 2,
            },
            status,
            payment_status: PaymentStatus::Pending,
            payment: PaymentDetails {
                method: PaymentMethod::Cod,
                payment_id: "cod_1".into(),
                gateway_order_id: None,
                signature: None,
            },
        }
    }

    fn cod_order(status: OrderStatus) -> Order {
        Order::from_create_params("order_7".into(), cod_params(status)).unwrap()
    }

    #[test]
    fn test_order_number_format() {
        let order = cod_order(OrderStatus::Confirmed);
        assert!(order.order_number.starts_with("COD-"));
        assert!(order.order_number.ends_with("-7"));
    }

    #[test]
    fn test_cancel_only_once() {
        let mut order = cod_order(OrderStatus::Confirmed);
        assert_eq!(order.handle_action(OrderAction::Cancel).unwrap().status, OrderStatus::Cancelled);
        assert_eq!(order.handle_action(OrderAction::Cancel), Err(OrderError::AlreadyCancelled));
    }

    #[test]
    fn test_cannot_cancel_shipped() {
        let mut order = cod_order(OrderStatus::Shipped);
        assert_eq!(
            order.handle_action(OrderAction::Cancel),
            Err(OrderError::NotCancellable(OrderStatus::Shipped))
        );
    }

    #[test]
    fn test_status_moves_forward_only() {
        let mut order = cod_order(OrderStatus::Confirmed);
        order.handle_action(OrderAction::AdvanceStatus(OrderStatus::Shipped)).unwrap();
        assert_eq!(
            order.handle_action(OrderAction::AdvanceStatus(OrderStatus::Processing)),
            Err(OrderError::InvalidTransition {
                from: OrderStatus::Shipped,
                to: OrderStatus::Processing,
            })
        );

        let delivered = order.handle_action(OrderAction::AdvanceStatus(OrderStatus::Delivered)).unwrap();
        assert_eq!(delivered.payment_status, PaymentStatus::Paid);
    }

    #[test]
    fn test_units_sum_past_u32_max() {
        let mut params = cod_params(OrderStatus::Confirmed);
        params.items[0].quantity = u32::MAX;
        params.items.push(OrderItem {
            product_id: "product_2".into(),
            name: "LED Bulb".into(),
            quantity: 1,
            price: 99.0,
        });
        let order = Order::from_create_params("order_8".into(), params).unwrap();
        assert_eq!(order.units(), u64::from(u32::MAX) + 1);
    }

    #[test]
    fn test_empty_order_rejected() {
        let mut params = cod_params(OrderStatus::Pending);
        params.items.clear();
        assert!(matches!(
            Order::from_create_params("order_1".into(), params),
            Err(OrderError::ValidationError(_))
        ));
    }

    #[test]
    fn test_orders_cannot_be_deleted() {
        assert!(cod_order(OrderStatus::Pending).on_delete().is_err());
    }
}
