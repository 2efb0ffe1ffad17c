use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use quantumstock_core::{DomainError, DomainResult, Entity, EntityId};

/// Product identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub EntityId);

impl ProductId {
    pub fn new(id: EntityId) -> Self {
        Self(id)
    }

    /// Mint a fresh identifier.
    pub fn generate() -> Self {
        Self(EntityId::new())
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Catalog entry with its current stock level.
///
/// `quantity_in_stock` is not clamped: a permissive ledger may drive it below
/// zero if the caller hands it such a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    sku: String,
    name: String,
    quantity_in_stock: i64,
    unit_of_measure: String,
    low_stock_threshold: i64,
    location: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    sub_locations: Vec<String>,
    category: Option<String>,
    description: Option<String>,
    /// Price per unit in the smallest currency unit (e.g. cents).
    unit_price: Option<u64>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Input for creating a product: every field except id and timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NewProduct {
    pub sku: String,
    pub name: String,
    pub quantity_in_stock: i64,
    pub unit_of_measure: String,
    pub low_stock_threshold: i64,
    pub location: String,
    #[serde(default)]
    pub sub_locations: Vec<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub unit_price: Option<u64>,
}

/// Partial update. `None` leaves a field untouched; for optional attributes
/// `Some(None)` clears the value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProductPatch {
    pub sku: Option<String>,
    pub name: Option<String>,
    pub quantity_in_stock: Option<i64>,
    pub unit_of_measure: Option<String>,
    pub low_stock_threshold: Option<i64>,
    pub location: Option<String>,
    pub sub_locations: Option<Vec<String>>,
    pub category: Option<Option<String>>,
    pub description: Option<Option<String>>,
    pub unit_price: Option<Option<u64>>,
}

fn require_text(field: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

fn require_non_negative(field: &str, value: i64) -> DomainResult<()> {
    if value < 0 {
        return Err(DomainError::validation(format!("{field} cannot be negative")));
    }
    Ok(())
}

impl NewProduct {
    /// Field-level checks: required text present, quantities not negative.
    pub fn validate(&self) -> DomainResult<()> {
        require_text("sku", &self.sku)?;
        require_text("name", &self.name)?;
        require_text("unit of measure", &self.unit_of_measure)?;
        require_text("location", &self.location)?;
        require_non_negative("quantity in stock", self.quantity_in_stock)?;
        require_non_negative("low stock threshold", self.low_stock_threshold)?;
        Ok(())
    }
}

impl ProductPatch {
    /// Same rules as [`NewProduct::validate`], applied to the fields present.
    pub fn validate(&self) -> DomainResult<()> {
        if let Some(sku) = &self.sku {
            require_text("sku", sku)?;
        }
        if let Some(name) = &self.name {
            require_text("name", name)?;
        }
        if let Some(uom) = &self.unit_of_measure {
            require_text("unit of measure", uom)?;
        }
        if let Some(location) = &self.location {
            require_text("location", location)?;
        }
        if let Some(qty) = self.quantity_in_stock {
            require_non_negative("quantity in stock", qty)?;
        }
        if let Some(threshold) = self.low_stock_threshold {
            require_non_negative("low stock threshold", threshold)?;
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl Product {
    /// Build a product from creation input; both timestamps are `now`.
    pub fn create(id: ProductId, input: NewProduct, now: DateTime<Utc>) -> Self {
        Self {
            id,
            sku: input.sku,
            name: input.name,
            quantity_in_stock: input.quantity_in_stock,
            unit_of_measure: input.unit_of_measure,
            low_stock_threshold: input.low_stock_threshold,
            location: input.location,
            sub_locations: input.sub_locations,
            category: input.category,
            description: input.description,
            unit_price: input.unit_price,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuild a product with explicit timestamps (seed data, snapshots).
    pub fn restore(
        id: ProductId,
        input: NewProduct,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        let mut product = Self::create(id, input, created_at);
        product.updated_at = updated_at;
        product
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn sku(&self) -> &str {
        &self.sku
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity_in_stock(&self) -> i64 {
        self.quantity_in_stock
    }

    pub fn unit_of_measure(&self) -> &str {
        &self.unit_of_measure
    }

    pub fn low_stock_threshold(&self) -> i64 {
        self.low_stock_threshold
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn sub_locations(&self) -> &[String] {
        &self.sub_locations
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn unit_price(&self) -> Option<u64> {
        self.unit_price
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// At or below the alert threshold.
    pub fn is_low_stock(&self) -> bool {
        self.quantity_in_stock <= self.low_stock_threshold
    }

    /// `quantity_in_stock * unit_price`, with a missing price counting as zero.
    pub fn stock_value(&self) -> i64 {
        let price = i64::try_from(self.unit_price.unwrap_or(0)).unwrap_or(i64::MAX);
        self.quantity_in_stock.saturating_mul(price)
    }

    /// Overwrite every field present in `patch` and bump `updated_at`.
    pub fn apply_patch(&mut self, patch: ProductPatch, now: DateTime<Utc>) {
        let ProductPatch {
            sku,
            name,
            quantity_in_stock,
            unit_of_measure,
            low_stock_threshold,
            location,
            sub_locations,
            category,
            description,
            unit_price,
        } = patch;

        if let Some(v) = sku {
            self.sku = v;
        }
        if let Some(v) = name {
            self.name = v;
        }
        if let Some(v) = quantity_in_stock {
            self.quantity_in_stock = v;
        }
        if let Some(v) = unit_of_measure {
            self.unit_of_measure = v;
        }
        if let Some(v) = low_stock_threshold {
            self.low_stock_threshold = v;
        }
        if let Some(v) = location {
            self.location = v;
        }
        if let Some(v) = sub_locations {
            self.sub_locations = v;
        }
        if let Some(v) = category {
            self.category = v;
        }
        if let Some(v) = description {
            self.description = v;
        }
        if let Some(v) = unit_price {
            self.unit_price = v;
        }
        self.updated_at = now;
    }

    /// Set the stock level as the result of a movement.
    pub fn set_quantity(&mut self, quantity: i64, now: DateTime<Utc>) {
        self.quantity_in_stock = quantity;
        self.updated_at = now;
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
