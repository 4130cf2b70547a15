use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{error, info, instrument, warn};

use crate::actor_framework::ResourceClient;
use crate::cart_actor::CartError;
use crate::clients::{CartClient, ProductClient, UserClient};
use crate::config::Pricing;
use crate::domain::{
    CustomerDetails, Order, OrderCreate, OrderItem, OrderStatus, PaymentDetails, PaymentStatus, User,
};
use crate::order_actor::{OrderAction, OrderError};
use crate::product_actor::{InsufficientItem, ProductError, StockLine, StockReport};

/// Everything needed to place an order, independent of how it was paid.
#[derive(Debug, Clone)]
pub struct PlaceOrder {
    pub user_id: String,
    pub items: Vec<StockLine>,
    pub customer: CustomerDetails,
    pub payment: PaymentDetails,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_orders: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderPage {
    pub orders: Vec<Order>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesSummary {
    pub total_orders: usize,
    pub by_status: BTreeMap<String, usize>,
    /// Sum of totals over orders that were not cancelled.
    pub gross_revenue: f64,
    /// Sum of totals over orders whose payment was collected.
    pub collected_revenue: f64,
    pub units_sold: u64,
}

fn newest_first(orders: &mut [Order]) {
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
}

/// Client for interacting with the Order actor.
///
/// This client handles the orchestration around an order: it validates the
/// user and the items, takes the stock, prices the order and gives the stock
/// back when an order is cancelled.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    user_client: UserClient,
    product_client: ProductClient,
    cart_client: CartClient,
    pricing: Pricing,
}

impl OrderClient {
    pub fn new(
        inner: ResourceClient<Order>,
        user_client: UserClient,
        product_client: ProductClient,
        cart_client: CartClient,
        pricing: Pricing,
    ) -> Self {
        Self {
            inner,
            user_client,
            product_client,
            cart_client,
            pricing,
        }
    }

    #[instrument(skip(self, request), fields(user_id = %request.user_id, method = ?request.payment.method))]
    pub async fn place_order(&self, request: PlaceOrder) -> Result<Order, OrderError> {
        info!("Processing place_order request");

        // Step 1: Validate user
        match self.user_client.get_user(request.user_id.clone()).await {
            Ok(Some(user)) => info!(user_name = %user.name, "User validation successful"),
            Ok(None) => {
                error!("User not found");
                return Err(OrderError::InvalidUser(request.user_id));
            }
            Err(e) => {
                error!(error = %e, "User validation failed");
                return Err(OrderError::InvalidUser(format!("User validation failed: {e}")));
            }
        }

        // Step 2: Validate order data
        if request.items.is_empty() {
            return Err(OrderError::ValidationError("No items in order".to_string()));
        }
        if let Some(field) = request.customer.missing_field() {
            return Err(OrderError::ValidationError(format!("{field} is required")));
        }

        // Step 3: Check availability
        let report = self.product_client.check_stock_availability(&request.items).await?;
        if !report.is_available() {
            warn!(message = %report.message(), "Order rejected");
            return Err(OrderError::InsufficientStock(report.insufficient));
        }

        // Step 4: Take the stock. This is the step that settles races between checkouts.
        if let Err(e) = self.product_client.reduce_stock(&report.lines).await {
            error!(error = %e, "Stock reduction failed");
            return Err(shortage(e, &report));
        }
        info!("Stock reserved successfully");

        // Step 5: Price from the snapshot taken with the stock check
        let items: Vec<OrderItem> = report
            .lines
            .iter()
            .zip(&report.snapshots)
            .map(|(line, snapshot)| OrderItem {
                product_id: line.product_id.clone(),
                name: snapshot.name.clone(),
                quantity: line.quantity,
                price: snapshot.price,
            })
            .collect();
        let summary = self.pricing.summarize(&items);

        // Step 6: Create the order, giving the stock back if that fails
        let payload = OrderCreate {
            user_id: request.user_id.clone(),
            items,
            customer: request.customer,
            summary,
            status: request.status,
            payment_status: request.payment_status,
            payment: request.payment,
        };
        let created = match self.inner.create(payload).await {
            Ok(id) => match self.inner.get(id.clone()).await {
                Ok(Some(order)) => Ok(order),
                Ok(None) => Err(OrderError::NotFound(id)),
                Err(e) => Err(OrderError::from(e)),
            },
            Err(e) => Err(OrderError::from(e)),
        };
        let order = match created {
            Ok(order) => order,
            Err(e) => {
                error!(error = %e, "Order creation failed, restoring stock");
                if let Err(restore_err) = self.product_client.restore_stock(&report.lines).await {
                    error!(error = %restore_err, "Stock restore failed, manual review required");
                }
                return Err(e);
            }
        };
        info!(order_id = %order.id, order_number = %order.order_number, total = order.summary.total, "Order placed");

        // Step 7: Empty the cart. The order stands even if this fails.
        match self.cart_client.clear_cart(request.user_id).await {
            Ok(_) | Err(CartError::NotFound) => {}
            Err(e) => warn!(error = %e, "Failed to clear cart after order"),
        }

        Ok(order)
    }

    /// Fetches an order the user may see. Other users' orders read as missing.
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    pub async fn get_order_for(&self, user: &User, order_id: String) -> Result<Order, OrderError> {
        match self.inner.get(order_id.clone()).await? {
            Some(order) if order.user_id == user.id || user.is_admin() => Ok(order),
            _ => Err(OrderError::NotFound(order_id)),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_user_orders(&self, user_id: &str, page: usize, limit: usize) -> Result<OrderPage, OrderError> {
        let page = page.max(1);
        let limit = limit.clamp(1, 100);

        let mut orders: Vec<Order> = self
            .inner
            .list()
            .await?
            .into_iter()
            .filter(|order| order.user_id == user_id)
            .collect();
        newest_first(&mut orders);

        let total_orders = orders.len();
        let total_pages = total_orders.div_ceil(limit);
        let orders = orders.into_iter().skip((page - 1) * limit).take(limit).collect();

        Ok(OrderPage {
            orders,
            pagination: Pagination {
                current_page: page,
                total_pages,
                total_orders,
                has_next: page < total_pages,
                has_prev: page > 1,
            },
        })
    }

    /// Cancels on behalf of the owner or an admin and gives the stock back.
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    pub async fn cancel_order(&self, user: &User, order_id: String) -> Result<Order, OrderError> {
        let order = self.get_order_for(user, order_id).await?;
        self.cancel_and_restore(order.id).await
    }

    /// Admin status change. `Cancelled` takes the cancellation path so stock is restored.
    #[instrument(skip(self))]
    pub async fn update_status(&self, order_id: String, status: OrderStatus) -> Result<Order, OrderError> {
        if status == OrderStatus::Cancelled {
            return self.cancel_and_restore(order_id).await;
        }
        let order = self
            .inner
            .perform_action(order_id, OrderAction::AdvanceStatus(status))
            .await?;
        info!(order_id = %order.id, status = status.as_str(), "Order status updated");
        Ok(order)
    }

    #[instrument(skip(self))]
    pub async fn list_orders_with_status(&self, status: Option<OrderStatus>) -> Result<Vec<Order>, OrderError> {
        let mut orders: Vec<Order> = self
            .inner
            .list()
            .await?
            .into_iter()
            .filter(|order| status.map_or(true, |s| order.status == s))
            .collect();
        newest_first(&mut orders);
        Ok(orders)
    }

    #[instrument(skip(self))]
    pub async fn sales_summary(&self) -> Result<SalesSummary, OrderError> {
        let orders = self.inner.list().await?;

        let mut by_status: BTreeMap<String, usize> =
            OrderStatus::ALL.iter().map(|s| (s.as_str().to_string(), 0)).collect();
        let mut summary = SalesSummary {
            total_orders: orders.len(),
            by_status: BTreeMap::new(),
            gross_revenue: 0.0,
            collected_revenue: 0.0,
            units_sold: 0,
        };

        for order in &orders {
            *by_status.entry(order.status.as_str().to_string()).or_default() += 1;
            if order.status != OrderStatus::Cancelled {
                summary.gross_revenue += order.summary.total;
                summary.units_sold += order.units();
            }
            if order.payment_status == PaymentStatus::Paid {
                summary.collected_revenue += order.summary.total;
            }
        }

        summary.by_status = by_status;
        Ok(summary)
    }

    /// Whether the user holds a live order containing the product.
    #[instrument(skip(self))]
    pub async fn has_purchased(&self, user_id: &str, product_id: &str) -> Result<bool, OrderError> {
        let orders = self.inner.list().await?;
        Ok(orders
            .iter()
            .any(|order| order.user_id == user_id && order.status.is_purchase() && order.contains_product(product_id)))
    }

    async fn cancel_and_restore(&self, order_id: String) -> Result<Order, OrderError> {
        // The actor lets exactly one Cancel through, so the restore below runs once per order.
        let order = self.inner.perform_action(order_id, OrderAction::Cancel).await?;
        info!(order_id = %order.id, "Order cancelled");

        let lines: Vec<StockLine> = order
            .items
            .iter()
            .map(|item| StockLine::new(item.product_id.clone(), item.quantity))
            .collect();
        if let Err(e) = self.product_client.restore_stock(&lines).await {
            error!(order_id = %order.id, error = %e, "Stock restore failed for cancelled order, manual review required");
            return Err(OrderError::StockUpdateFailed(e.to_string()));
        }
        info!(order_id = %order.id, "Stock restored");
        Ok(order)
    }
}

/// Converts a failed reduction into the error the caller sees, naming the product
/// from the snapshot rather than by id.
fn shortage(err: ProductError, report: &StockReport) -> OrderError {
    match err {
        ProductError::InsufficientStock {
            product_id,
            requested,
            available,
        } => {
            let name = report
                .snapshot(&product_id)
                .map_or_else(|| product_id.clone(), |s| s.name.clone());
            OrderError::InsufficientStock(vec![InsufficientItem {
                product_id,
                name,
                requested,
                available,
            }])
        }
        other => OrderError::from(other),
    }
}
