//! Catalog search.

use serde::{Deserialize, Serialize};

use crate::Product;

/// Search over the catalog: case-insensitive substring match on name or SKU,
/// optionally restricted to low-stock products.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProductFilter {
    pub query: Option<String>,
    #[serde(default)]
    pub low_stock_only: bool,
}

impl ProductFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn low_stock() -> Self {
        Self {
            query: None,
            low_stock_only: true,
        }
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn matches(&self, product: &Product) -> bool {
        if self.low_stock_only && !product.is_low_stock() {
            return false;
        }
        match self.query.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(q) => {
                let q = q.to_lowercase();
                product.name().to_lowercase().contains(&q)
                    || product.sku().to_lowercase().contains(&q)
            }
        }
    }
}
