use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use quantumstock_events::Event;
use quantumstock_products::{Product, ProductId};

use crate::movement::StockMovement;

/// Notification emitted after the ledger applied a change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InventoryEvent {
    ProductAdded {
        product: Product,
    },
    ProductUpdated {
        product: Product,
    },
    ProductDeleted {
        product_id: ProductId,
        /// Whether a catalog entry was actually removed (movements may be
        /// purged for an id that no longer had one).
        product_removed: bool,
        movements_removed: usize,
        occurred_at: DateTime<Utc>,
    },
    StockMoved {
        movement: StockMovement,
        /// False when the movement references a product the ledger does not hold.
        product_updated: bool,
    },
}

impl InventoryEvent {
    /// The product this event is about.
    pub fn product_id(&self) -> ProductId {
        match self {
            InventoryEvent::ProductAdded { product } | InventoryEvent::ProductUpdated { product } => {
                product.id_typed()
            }
            InventoryEvent::ProductDeleted { product_id, .. } => *product_id,
            InventoryEvent::StockMoved { movement, .. } => movement.product_id,
        }
    }
}

impl Event for InventoryEvent {
    fn event_type(&self) -> &'static str {
        match self {
            InventoryEvent::ProductAdded { .. } => "inventory.product.added",
            InventoryEvent::ProductUpdated { .. } => "inventory.product.updated",
            InventoryEvent::ProductDeleted { .. } => "inventory.product.deleted",
            InventoryEvent::StockMoved { .. } => "inventory.stock.moved",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            InventoryEvent::ProductAdded { product } => product.created_at(),
            InventoryEvent::ProductUpdated { product } => product.updated_at(),
            InventoryEvent::ProductDeleted { occurred_at, .. } => *occurred_at,
            InventoryEvent::StockMoved { movement, .. } => movement.timestamp,
        }
    }
}
