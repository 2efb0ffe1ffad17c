//! The inventory ledger: authoritative in-memory product and movement lists.
//!
//! Every operation takes the ledger from one consistent snapshot to the next
//! inside a single `&mut self` call, so callers never observe a half-applied
//! change. Sharing across threads goes through [`crate::SharedLedger`].

use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use quantumstock_core::entity::position_of;
use quantumstock_core::{ActorRef, Clock, DomainError, DomainResult, SystemClock};
use quantumstock_events::{EventBus, EventEnvelope, InMemoryBusError};
use quantumstock_products::{NewProduct, Product, ProductFilter, ProductId, ProductPatch};

use crate::config::{LedgerConfig, ValidationPolicy};
use crate::event::InventoryEvent;
use crate::movement::{MovementId, MovementKind, NewMovement, StockMovement};
use crate::stats::{self, DashboardStats, TopMover};

/// Bus the ledger publishes change notifications on.
pub type LedgerBus = Arc<dyn EventBus<EventEnvelope<InventoryEvent>, Error = InMemoryBusError>>;

/// Outcome of [`Ledger::delete_product`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deletion {
    /// The removed catalog entry, `None` if the id was unknown.
    pub product: Option<Product>,
    pub movements_removed: usize,
}

impl Deletion {
    pub fn is_noop(&self) -> bool {
        self.product.is_none() && self.movements_removed == 0
    }
}

pub struct Ledger<C: Clock = SystemClock> {
    config: LedgerConfig,
    clock: C,
    products: Vec<Product>,
    movements: Vec<StockMovement>,
    bus: Option<LedgerBus>,
    sequence: u64,
}

impl Ledger<SystemClock> {
    pub fn new(config: LedgerConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl Default for Ledger<SystemClock> {
    fn default() -> Self {
        Self::new(LedgerConfig::default())
    }
}

impl<C: Clock> core::fmt::Debug for Ledger<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Ledger")
            .field("config", &self.config)
            .field("products", &self.products.len())
            .field("movements", &self.movements.len())
            .field("sequence", &self.sequence)
            .finish()
    }
}

impl<C: Clock> Ledger<C> {
    pub fn with_clock(config: LedgerConfig, clock: C) -> Self {
        Self {
            config,
            clock,
            products: Vec::new(),
            movements: Vec::new(),
            bus: None,
            sequence: 0,
        }
    }

    /// Publish an [`InventoryEvent`] for every applied change.
    pub fn with_event_bus(mut self, bus: LedgerBus) -> Self {
        self.bus = Some(bus);
        self
    }

    /// Replace the collections with a previously captured snapshot.
    ///
    /// Records are taken as-is: ids, timestamps and quantities are trusted.
    pub fn with_seed(mut self, products: Vec<Product>, movements: Vec<StockMovement>) -> Self {
        info!(
            products = products.len(),
            movements = movements.len(),
            "ledger seeded"
        );
        self.products = products;
        self.movements = movements;
        self
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn movements(&self) -> &[StockMovement] {
        &self.movements
    }

    pub fn product(&self, id: ProductId) -> Option<&Product> {
        position_of(&self.products, &id).map(|idx| &self.products[idx])
    }

    fn is_strict(&self) -> bool {
        self.config.validation == ValidationPolicy::Strict
    }

    // ─────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────

    /// Append a new product with a fresh id and `created_at = updated_at = now`.
    ///
    /// SKUs are not checked for uniqueness.
    pub fn add_product(&mut self, input: NewProduct) -> DomainResult<Product> {
        if self.is_strict() {
            input.validate().inspect_err(|e| warn!(error = %e, "product rejected"))?;
        }

        let product = Product::create(ProductId::generate(), input, self.clock.now());
        info!(product_id = %product.id_typed(), sku = product.sku(), name = product.name(), "product added");

        self.products.push(product.clone());
        self.publish(InventoryEvent::ProductAdded {
            product: product.clone(),
        });
        Ok(product)
    }

    /// Patch a product in place. Unknown ids are a no-op (`Ok(None)`).
    pub fn update_product(&mut self, id: ProductId, patch: ProductPatch) -> DomainResult<Option<Product>> {
        let Some(idx) = position_of(&self.products, &id) else {
            debug!(product_id = %id, "update ignored: unknown product");
            return Ok(None);
        };

        if self.is_strict() {
            patch.validate().inspect_err(|e| warn!(product_id = %id, error = %e, "update rejected"))?;
        }

        let now = self.clock.now();
        let product = &mut self.products[idx];
        product.apply_patch(patch, now);
        let updated = product.clone();

        info!(product_id = %id, "product updated");
        self.publish(InventoryEvent::ProductUpdated {
            product: updated.clone(),
        });
        Ok(Some(updated))
    }

    /// Remove a product and every movement that references it.
    ///
    /// Idempotent: a second call finds nothing to remove.
    pub fn delete_product(&mut self, id: ProductId) -> Deletion {
        let product = position_of(&self.products, &id).map(|idx| self.products.remove(idx));

        let before = self.movements.len();
        self.movements.retain(|m| m.product_id != id);
        let movements_removed = before - self.movements.len();

        let deletion = Deletion {
            product,
            movements_removed,
        };

        if deletion.is_noop() {
            debug!(product_id = %id, "delete ignored: unknown product");
            return deletion;
        }

        info!(product_id = %id, movements_removed, "product deleted");
        self.publish(InventoryEvent::ProductDeleted {
            product_id: id,
            product_removed: deletion.product.is_some(),
            movements_removed,
            occurred_at: self.clock.now(),
        });
        deletion
    }

    /// Record a movement and set the referenced product's stock to
    /// `input.new_quantity`.
    ///
    /// A movement for an unknown product is still recorded; no product changes.
    pub fn add_movement(&mut self, input: NewMovement) -> DomainResult<StockMovement> {
        let idx = position_of(&self.products, &input.product_id);

        if self.is_strict() {
            self.check_movement(&input, idx)
                .inspect_err(|e| warn!(product_id = %input.product_id, error = %e, "movement rejected"))?;
        }

        let now = self.clock.now();
        let movement = StockMovement::record(MovementId::generate(), input, now);

        match idx {
            Some(idx) => self.products[idx].set_quantity(movement.new_quantity, now),
            None => warn!(
                product_id = %movement.product_id,
                movement_id = %movement.id,
                "movement recorded for unknown product; stock untouched"
            ),
        }

        info!(
            movement_id = %movement.id,
            product_id = %movement.product_id,
            kind = %movement.kind,
            quantity = movement.quantity,
            new_quantity = movement.new_quantity,
            clerk = movement.warehouse_clerk.name.as_str(),
            "stock movement recorded"
        );

        self.movements.push(movement.clone());
        self.publish(InventoryEvent::StockMoved {
            movement: movement.clone(),
            product_updated: idx.is_some(),
        });
        Ok(movement)
    }

    fn check_movement(&self, input: &NewMovement, idx: Option<usize>) -> DomainResult<()> {
        input.validate()?;

        if let Some(idx) = idx {
            let current = self.products[idx].quantity_in_stock();
            if input.previous_quantity != current {
                return Err(DomainError::conflict(format!(
                    "movement assumes {} in stock but product has {}",
                    input.previous_quantity, current
                )));
            }
        }
        Ok(())
    }

    /// Draft a movement against the product's current stock.
    pub fn draft_movement(
        &self,
        product_id: ProductId,
        kind: MovementKind,
        quantity: i64,
        reason: impl Into<String>,
        clerk: ActorRef,
    ) -> DomainResult<NewMovement> {
        let product = self.product(product_id).ok_or_else(DomainError::not_found)?;
        Ok(NewMovement::against(product, kind, quantity, reason, clerk))
    }

    // ─────────────────────────────────────────────────────────────────────
    // Views
    // ─────────────────────────────────────────────────────────────────────

    /// Products at or below their threshold, in catalog order.
    pub fn low_stock_products(&self) -> Vec<&Product> {
        stats::low_stock(&self.products).collect()
    }

    /// Products ranked by number of movements, highest first.
    pub fn top_movers(&self, limit: usize) -> Vec<TopMover> {
        stats::top_movers(&self.products, &self.movements, limit)
    }

    /// [`Ledger::top_movers`] with the configured limit (5 by default).
    pub fn top_movers_default(&self) -> Vec<TopMover> {
        self.top_movers(self.config.top_movers_limit)
    }

    /// Dashboard snapshot, recomputed from scratch.
    pub fn dashboard_stats(&self) -> DashboardStats {
        stats::dashboard(
            &self.products,
            &self.movements,
            self.clock.now(),
            self.config.recent_window,
        )
    }

    /// Recompute the dashboard on demand (pull-to-refresh).
    pub fn refresh_stats(&self) -> DashboardStats {
        let stats = self.dashboard_stats();
        info!(
            total_products = stats.total_products,
            low_stock_items = stats.low_stock_items,
            total_value = stats.total_value,
            recent_movements = stats.recent_movements,
            "dashboard refreshed"
        );
        stats
    }

    pub fn search_products(&self, filter: &ProductFilter) -> Vec<&Product> {
        self.products.iter().filter(|p| filter.matches(p)).collect()
    }

    /// Movements of one product, in recording order.
    pub fn movements_for(&self, product_id: ProductId) -> Vec<&StockMovement> {
        self.movements
            .iter()
            .filter(|m| m.product_id == product_id)
            .collect()
    }

    /// Movement history, newest first, optionally restricted to one direction.
    pub fn movement_history(&self, kind: Option<MovementKind>) -> Vec<&StockMovement> {
        let mut history: Vec<&StockMovement> = self
            .movements
            .iter()
            .filter(|m| kind.is_none_or(|k| m.kind == k))
            .collect();
        history.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        history
    }

    fn publish(&mut self, event: InventoryEvent) {
        let Some(bus) = &self.bus else {
            return;
        };

        self.sequence += 1;
        let envelope = EventEnvelope::new(
            Uuid::now_v7(),
            event.product_id().0,
            "product",
            self.sequence,
            event,
        );

        if let Err(e) = bus.publish(envelope) {
            warn!(error = %e, sequence = self.sequence, "failed to publish inventory event");
        }
    }
}
