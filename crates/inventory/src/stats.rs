//! Derived dashboard views.
//!
//! Every function here is a full rescan of the collections it is handed; the
//! catalog is small enough that nothing is cached or maintained incrementally.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use quantumstock_core::ValueObject;
use quantumstock_products::{Product, ProductId};

use crate::movement::StockMovement;

/// Dashboard snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_products: usize,
    pub low_stock_items: usize,
    /// Sum of `quantity * unit_price` in minor currency units.
    pub total_value: i64,
    pub recent_movements: usize,
}

impl ValueObject for DashboardStats {}

/// A product together with how many movements reference it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopMover {
    pub product: Product,
    pub movement_count: usize,
}

pub fn low_stock(products: &[Product]) -> impl Iterator<Item = &Product> {
    products.iter().filter(|p| p.is_low_stock())
}

pub fn total_value(products: &[Product]) -> i64 {
    products
        .iter()
        .fold(0i64, |acc, p| acc.saturating_add(p.stock_value()))
}

/// Movements stamped at or after `now - window`.
pub fn recent_movement_count(movements: &[StockMovement], now: DateTime<Utc>, window: Duration) -> usize {
    let since = now - window;
    movements.iter().filter(|m| m.timestamp >= since).count()
}

pub fn dashboard(
    products: &[Product],
    movements: &[StockMovement],
    now: DateTime<Utc>,
    window: Duration,
) -> DashboardStats {
    DashboardStats {
        total_products: products.len(),
        low_stock_items: low_stock(products).count(),
        total_value: total_value(products),
        recent_movements: recent_movement_count(movements, now, window),
    }
}

/// Rank products by movement count, highest first.
///
/// Products without movements take part with a count of zero. The sort is
/// stable, so equal counts keep catalog order.
pub fn top_movers(products: &[Product], movements: &[StockMovement], limit: usize) -> Vec<TopMover> {
    let mut counts: HashMap<ProductId, usize> = HashMap::new();
    for movement in movements {
        *counts.entry(movement.product_id).or_default() += 1;
    }

    let mut ranked: Vec<TopMover> = products
        .iter()
        .map(|product| TopMover {
            movement_count: counts.get(&product.id_typed()).copied().unwrap_or(0),
            product: product.clone(),
        })
        .collect();

    ranked.sort_by(|a, b| b.movement_count.cmp(&a.movement_count));
    ranked.truncate(limit);
    ranked
}
