use serde::{Deserialize, Serialize};

/// One `{productId, quantity}` pair handed to the stock operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockLine {
    pub product_id: String,
    pub quantity: u32,
}

impl StockLine {
    pub fn new(product_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
        }
    }
}

/// Catalog data read alongside the stock level.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockSnapshot {
    pub product_id: String,
    pub name: String,
    pub price: f64,
    pub stock: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsufficientItem {
    pub product_id: String,
    pub name: String,
    pub requested: u32,
    pub available: u32,
}

/// Outcome of a stock availability check. Each product appears once; duplicate
/// lines are merged before checking.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockReport {
    pub lines: Vec<StockLine>,
    pub snapshots: Vec<StockSnapshot>,
    pub insufficient: Vec<InsufficientItem>,
}

impl StockReport {
    pub fn is_available(&self) -> bool {
        self.insufficient.is_empty()
    }

    pub fn snapshot(&self, product_id: &str) -> Option<&StockSnapshot> {
        self.snapshots.iter().find(|s| s.product_id == product_id)
    }

    pub fn message(&self) -> String {
        match self.insufficient.as_slice() {
            [] => "All items are in stock".to_string(),
            [item] => format!(
                "Insufficient stock for {}. Available: {}, Requested: {}",
                item.name, item.available, item.requested
            ),
            items => format!("Insufficient stock for {} products", items.len()),
        }
    }
}

/// Sums quantities of lines that name the same product, keeping first-seen order.
pub fn merge_lines(lines: &[StockLine]) -> Vec<StockLine> {
    let mut merged: Vec<StockLine> = Vec::with_capacity(lines.len());
    for line in lines {
        match merged.iter_mut().find(|m| m.product_id == line.product_id) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(line.quantity),
            None => merged.push(line.clone()),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_lines_sums_duplicates_in_order() {
        let merged = merge_lines(&[
            StockLine::new("product_2", 1),
            StockLine::new("product_1", 2),
            StockLine::new("product_2", 3),
        ]);
        assert_eq!(merged, vec![StockLine::new("product_2", 4), StockLine::new("product_1", 2)]);
    }

    #[test]
    fn test_report_message() {
        let mut report = StockReport {
            lines: vec![],
            snapshots: vec![],
            insufficient: vec![],
        };
        assert!(report.is_available());

        report.insufficient.push(InsufficientItem {
            product_id: "product_1".into(),
            name: "Ceiling Fan".into(),
            requested: 3,
            available: 1,
        });
        assert_eq!(report.message(), "Insufficient stock for Ceiling Fan. Available: 1, Requested: 3");
    }
}
