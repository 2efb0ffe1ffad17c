use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use quantumstock_core::{ActorRef, DomainError, DomainResult, Entity, EntityId};
use quantumstock_products::{Product, ProductId};

/// Stock movement identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovementId(pub EntityId);

impl MovementId {
    pub fn new(id: EntityId) -> Self {
        Self(id)
    }

    pub fn generate() -> Self {
        Self(EntityId::new())
    }
}

impl core::fmt::Display for MovementId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Direction of a movement. The quantity itself is always a magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementKind {
    Inbound,
    Outbound,
}

impl MovementKind {
    /// Stock level after moving `quantity` units from `previous`.
    pub fn apply(self, previous: i64, quantity: i64) -> i64 {
        match self {
            MovementKind::Inbound => previous.saturating_add(quantity),
            MovementKind::Outbound => previous.saturating_sub(quantity),
        }
    }
}

impl core::fmt::Display for MovementKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MovementKind::Inbound => f.write_str("inbound"),
            MovementKind::Outbound => f.write_str("outbound"),
        }
    }
}

/// A recorded inbound or outbound change to a product's stock.
///
/// `previous_quantity` / `new_quantity` are the caller's snapshot at recording
/// time and are stored as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockMovement {
    pub id: MovementId,
    pub product_id: ProductId,
    #[serde(rename = "type")]
    pub kind: MovementKind,
    pub quantity: i64,
    pub previous_quantity: i64,
    pub new_quantity: i64,
    pub reason: String,
    pub supplier: Option<String>,
    pub destination: Option<String>,
    pub warehouse_clerk: ActorRef,
    pub timestamp: DateTime<Utc>,
    pub notes: Option<String>,
}

impl StockMovement {
    pub fn record(id: MovementId, input: NewMovement, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            product_id: input.product_id,
            kind: input.kind,
            quantity: input.quantity,
            previous_quantity: input.previous_quantity,
            new_quantity: input.new_quantity,
            reason: input.reason,
            supplier: input.supplier,
            destination: input.destination,
            warehouse_clerk: input.warehouse_clerk,
            timestamp,
            notes: input.notes,
        }
    }
}

impl Entity for StockMovement {
    type Id = MovementId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Input for recording a movement: every field except id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMovement {
    pub product_id: ProductId,
    #[serde(rename = "type")]
    pub kind: MovementKind,
    pub quantity: i64,
    pub previous_quantity: i64,
    pub new_quantity: i64,
    pub reason: String,
    pub supplier: Option<String>,
    pub destination: Option<String>,
    pub warehouse_clerk: ActorRef,
    pub notes: Option<String>,
}

impl NewMovement {
    /// Draft a movement against `product`'s current stock.
    pub fn against(
        product: &Product,
        kind: MovementKind,
        quantity: i64,
        reason: impl Into<String>,
        clerk: ActorRef,
    ) -> Self {
        let previous = product.quantity_in_stock();
        Self {
            product_id: product.id_typed(),
            kind,
            quantity,
            previous_quantity: previous,
            new_quantity: kind.apply(previous, quantity),
            reason: reason.into(),
            supplier: None,
            destination: None,
            warehouse_clerk: clerk,
            notes: None,
        }
    }

    pub fn inbound(product: &Product, quantity: i64, reason: impl Into<String>, clerk: ActorRef) -> Self {
        Self::against(product, MovementKind::Inbound, quantity, reason, clerk)
    }

    pub fn outbound(product: &Product, quantity: i64, reason: impl Into<String>, clerk: ActorRef) -> Self {
        Self::against(product, MovementKind::Outbound, quantity, reason, clerk)
    }

    pub fn with_supplier(mut self, supplier: impl Into<String>) -> Self {
        self.supplier = Some(supplier.into());
        self
    }

    pub fn with_destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Self-contained checks: positive quantity, a reason, consistent
    /// before/after snapshot, and no negative resulting stock.
    pub fn validate(&self) -> DomainResult<()> {
        if self.quantity <= 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }
        if self.reason.trim().is_empty() {
            return Err(DomainError::validation("reason cannot be empty"));
        }

        let expected = self.kind.apply(self.previous_quantity, self.quantity);
        if self.new_quantity != expected {
            return Err(DomainError::invariant(format!(
                "{} of {} from {} should leave {}, not {}",
                self.kind, self.quantity, self.previous_quantity, expected, self.new_quantity
            )));
        }

        if self.new_quantity < 0 {
            return Err(DomainError::invariant(format!(
                "cannot remove {} with only {} in stock",
                self.quantity, self.previous_quantity
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quantumstock_core::UserId;
    use quantumstock_products::NewProduct;

    fn clerk() -> ActorRef {
        ActorRef::new(UserId::new(), "Mike Clerk")
    }

    fn product_with(qty: i64) -> Product {
        Product::create(
            ProductId::generate(),
            NewProduct {
                sku: "SKU001".to_string(),
                name: "Wireless Headphones".to_string(),
                quantity_in_stock: qty,
                unit_of_measure: "units".to_string(),
                low_stock_threshold: 10,
                location: "A1-B2".to_string(),
                ..NewProduct::default()
            },
            Utc::now(),
        )
    }

    #[test]
    fn inbound_draft_adds_to_current_stock() {
        let product = product_with(25);
        let draft = NewMovement::inbound(&product, 10, "Restock", clerk()).with_supplier("TechSupplier Inc");

        assert_eq!(draft.product_id, product.id_typed());
        assert_eq!(draft.previous_quantity, 25);
        assert_eq!(draft.new_quantity, 35);
        assert_eq!(draft.supplier.as_deref(), Some("TechSupplier Inc"));
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn outbound_draft_subtracts_from_current_stock() {
        let product = product_with(50);
        let draft = NewMovement::outbound(&product, 25, "Customer order", clerk())
            .with_destination("Order #1001");

        assert_eq!(draft.kind, MovementKind::Outbound);
        assert_eq!(draft.new_quantity, 25);
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn validate_rejects_non_positive_quantity() {
        let product = product_with(5);
        let draft = NewMovement::inbound(&product, 0, "Restock", clerk());
        assert!(matches!(draft.validate(), Err(DomainError::Validation(_))));

        let draft = NewMovement::inbound(&product, -3, "Restock", clerk());
        assert!(matches!(draft.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn validate_rejects_blank_reason() {
        let product = product_with(5);
        let draft = NewMovement::inbound(&product, 1, "  ", clerk());
        assert!(matches!(draft.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn validate_rejects_inconsistent_snapshot() {
        let product = product_with(50);
        let mut draft = NewMovement::outbound(&product, 25, "Customer order", clerk());
        draft.new_quantity = 30;
        assert!(matches!(draft.validate(), Err(DomainError::InvariantViolation(_))));
    }

    #[test]
    fn validate_rejects_outbound_beyond_stock() {
        let product = product_with(3);
        let draft = NewMovement::outbound(&product, 4, "Customer order", clerk());
        assert_eq!(draft.new_quantity, -1);
        assert!(matches!(draft.validate(), Err(DomainError::InvariantViolation(_))));
    }

    #[test]
    fn kind_serializes_lowercase_under_type_key() {
        let product = product_with(3);
        let draft = NewMovement::inbound(&product, 4, "Restock", clerk());
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["type"], "inbound");
    }
}
