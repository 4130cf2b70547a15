use tracing::{debug, info, instrument, warn};

use crate::actor_framework::{FrameworkError, ResourceClient};
use crate::domain::{Product, ProductCreate, ProductUpdate};
use crate::product_actor::{
    merge_lines, InsufficientItem, ProductAction, ProductActionResult, ProductError, StockLine, StockReport,
    StockSnapshot,
};

fn unexpected() -> ProductError {
    ProductError::ActorCommunicationError("Unexpected result".to_string())
}

fn reject_zero_quantity(lines: &[StockLine]) -> Result<(), ProductError> {
    match lines.iter().find(|line| line.quantity == 0) {
        Some(_) => Err(ProductError::InvalidQuantity(0)),
        None => Ok(()),
    }
}

/// Client for interacting with the Product actor.
///
/// Besides catalog CRUD this is the stock manager: availability checks, order
/// reservations and their release all go through here.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl_basic_client!(ProductClient, Product, ProductError, product);

impl ProductClient {
    #[instrument(skip(self, params), fields(name = %params.name))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<Product, ProductError> {
        debug!("Sending request");
        let id = self.inner.create(params).await?;
        info!(product_id = %id, "Product created");
        self.get_product(id.clone()).await?.ok_or(ProductError::NotFound(id))
    }

    #[instrument(skip(self, update))]
    pub async fn update_product(&self, id: String, update: ProductUpdate) -> Result<Product, ProductError> {
        debug!("Sending request");
        Ok(self.inner.update(id, update).await?)
    }

    /// Catalog listing filtered by category and a free-text term, oldest first.
    #[instrument(skip(self))]
    pub async fn search_products(
        &self,
        category: Option<&str>,
        search: Option<&str>,
    ) -> Result<Vec<Product>, ProductError> {
        debug!("Sending request");
        let mut products: Vec<Product> = self
            .inner
            .list()
            .await?
            .into_iter()
            .filter(|product| product.matches(category, search))
            .collect();
        products.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(products)
    }

    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: String) -> Result<StockSnapshot, ProductError> {
        debug!("Sending request");
        match self.inner.perform_action(id, ProductAction::CheckStock).await? {
            ProductActionResult::StockLevel(snapshot) => Ok(snapshot),
            _ => Err(unexpected()),
        }
    }

    #[instrument(skip(self))]
    pub async fn restock(&self, id: String, quantity: u32) -> Result<u32, ProductError> {
        debug!("Sending request");
        match self.inner.perform_action(id, ProductAction::Restock(quantity)).await? {
            ProductActionResult::Restocked { stock } => {
                info!(stock, "Product restocked");
                Ok(stock)
            }
            _ => Err(unexpected()),
        }
    }

    #[instrument(skip(self))]
    pub async fn set_rating(&self, id: String, average: f64, count: u32) -> Result<(), ProductError> {
        debug!("Sending request");
        match self.inner.perform_action(id, ProductAction::SetRating { average, count }).await? {
            ProductActionResult::RatingUpdated => Ok(()),
            _ => Err(unexpected()),
        }
    }

    /// Reads stock for every requested product in one actor turn and reports
    /// which lines cannot be served. Unknown products fail the whole check.
    #[instrument(skip(self, lines), fields(lines = lines.len()))]
    pub async fn check_stock_availability(&self, lines: &[StockLine]) -> Result<StockReport, ProductError> {
        debug!("Sending request");
        reject_zero_quantity(lines)?;
        let lines = merge_lines(lines);
        let actions = lines
            .iter()
            .map(|line| (line.product_id.clone(), ProductAction::CheckStock))
            .collect();

        let snapshots = self
            .inner
            .perform_batch(actions)
            .await?
            .into_iter()
            .map(|result| match result {
                ProductActionResult::StockLevel(snapshot) => Ok(snapshot),
                _ => Err(unexpected()),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let insufficient: Vec<InsufficientItem> = lines
            .iter()
            .zip(&snapshots)
            .filter(|(line, snapshot)| line.quantity > snapshot.stock)
            .map(|(line, snapshot)| InsufficientItem {
                product_id: line.product_id.clone(),
                name: snapshot.name.clone(),
                requested: line.quantity,
                available: snapshot.stock,
            })
            .collect();

        if !insufficient.is_empty() {
            warn!(count = insufficient.len(), "Insufficient stock");
        }

        Ok(StockReport {
            lines,
            snapshots,
            insufficient,
        })
    }

    /// Decrements stock for every line, or for none of them.
    #[instrument(skip(self, lines), fields(lines = lines.len()))]
    pub async fn reduce_stock(&self, lines: &[StockLine]) -> Result<(), ProductError> {
        debug!("Sending request");
        reject_zero_quantity(lines)?;
        let actions = merge_lines(lines)
            .into_iter()
            .map(|line| (line.product_id, ProductAction::ReserveStock(line.quantity)))
            .collect();
        self.inner.perform_batch(actions).await?;
        info!("Stock reduced");
        Ok(())
    }

    /// Gives units back, e.g. after a cancellation. The lines of products that
    /// still exist are applied together; deleted products are skipped.
    #[instrument(skip(self, lines), fields(lines = lines.len()))]
    pub async fn restore_stock(&self, lines: &[StockLine]) -> Result<(), ProductError> {
        debug!("Sending request");
        reject_zero_quantity(lines)?;
        let mut lines = merge_lines(lines);

        // Each NotFound drops one line, so this ends after at most one retry per line.
        while !lines.is_empty() {
            let actions = lines
                .iter()
                .map(|line| (line.product_id.clone(), ProductAction::ReleaseStock(line.quantity)))
                .collect();
            match self.inner.perform_batch(actions).await {
                Ok(_) => {
                    info!(lines = lines.len(), "Stock restored");
                    return Ok(());
                }
                Err(FrameworkError::NotFound(product_id)) => {
                    warn!(%product_id, "Product no longer exists, skipping its stock");
                    let before = lines.len();
                    lines.retain(|line| line.product_id != product_id);
                    if lines.len() == before {
                        return Err(ProductError::NotFound(product_id));
                    }
                }
                Err(e) => return Err(e.into()),
            }
        }

        warn!("No remaining products to restore");
        Ok(())
    }
}
