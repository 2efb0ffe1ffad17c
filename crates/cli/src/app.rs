//! Wires a signed-in session to a demo ledger and runs commands against it.

use std::sync::Arc;

use anyhow::{Context, anyhow};
use serde_json::{Value, json, to_value};
use tracing::{debug, info};

use quantumstock_auth::{Principal, Session, UserDirectory, authorize};
use quantumstock_core::{DomainError, SystemClock};
use quantumstock_events::{Event, EventBus, EventEnvelope, InMemoryEventBus, Subscription};
use quantumstock_inventory::{InventoryEvent, Ledger, LedgerBus, MovementKind, demo};
use quantumstock_products::{NewProduct, Product, ProductFilter};

use crate::command::Command;
use crate::config::AppConfig;

const DEMO_CLERK_EMAIL: &str = "clerk@quantumstock.com";

pub struct App {
    session: Session,
    ledger: Ledger,
    events: Subscription<EventEnvelope<InventoryEvent>>,
}

impl App {
    /// Sign in and load the demo catalog. The seeded movements are attributed
    /// to the directory's warehouse clerk regardless of who signs in.
    pub fn start(config: AppConfig) -> anyhow::Result<Self> {
        let directory = UserDirectory::demo();

        let mut session = Session::new();
        session
            .login(&directory, &config.email, &config.password)
            .with_context(|| format!("signing in as {}", config.email))?;

        let clerk = directory
            .find_by_email(DEMO_CLERK_EMAIL)
            .map(|account| account.principal().actor())
            .ok_or_else(|| anyhow!("demo directory has no warehouse clerk"))?;

        let bus: Arc<InMemoryEventBus<EventEnvelope<InventoryEvent>>> = Arc::new(InMemoryEventBus::new());
        let events = bus.subscribe();
        let bus: LedgerBus = bus;

        let ledger = demo::ledger(config.ledger, SystemClock, &clerk).with_event_bus(bus);
        info!(products = ledger.products().len(), "demo ledger loaded");

        Ok(Self {
            session,
            ledger,
            events,
        })
    }

    pub fn principal(&self) -> anyhow::Result<&Principal> {
        self.session.current().ok_or_else(|| anyhow!("not signed in"))
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Authorize and execute a command, returning its JSON output.
    pub fn run(&mut self, command: Command) -> anyhow::Result<Value> {
        let principal = self.principal()?;
        authorize(principal, &command.required_permission())?;
        let clerk = principal.actor();
        debug!(user = %clerk.id, ?command, "running command");

        let output = match command {
            Command::Dashboard => to_value(self.ledger.refresh_stats())?,
            Command::LowStock => to_value(self.ledger.low_stock_products())?,
            Command::TopMovers { limit } => match limit {
                Some(limit) => to_value(self.ledger.top_movers(limit))?,
                None => to_value(self.ledger.top_movers_default())?,
            },
            Command::Movements { kind } => to_value(self.ledger.movement_history(kind))?,
            Command::Search { query } => {
                to_value(self.ledger.search_products(&ProductFilter::all().with_query(query)))?
            }
            Command::Receive {
                sku,
                quantity,
                reason,
                supplier,
            } => {
                let product = self.find_sku(&sku)?;
                let mut draft =
                    self.ledger
                        .draft_movement(product.id_typed(), MovementKind::Inbound, quantity, reason, clerk)?;
                if let Some(supplier) = supplier {
                    draft = draft.with_supplier(supplier);
                }
                to_value(self.ledger.add_movement(draft)?)?
            }
            Command::Issue {
                sku,
                quantity,
                reason,
                destination,
            } => {
                let product = self.find_sku(&sku)?;
                let mut draft =
                    self.ledger
                        .draft_movement(product.id_typed(), MovementKind::Outbound, quantity, reason, clerk)?;
                if let Some(destination) = destination {
                    draft = draft.with_destination(destination);
                }
                to_value(self.ledger.add_movement(draft)?)?
            }
            Command::AddProduct {
                sku,
                name,
                quantity,
                unit_of_measure,
                threshold,
                location,
                unit_price,
            } => {
                if self.find_sku(&sku).is_ok() {
                    return Err(DomainError::conflict(format!("SKU {sku} already exists")).into());
                }
                let product = self.ledger.add_product(NewProduct {
                    sku,
                    name,
                    quantity_in_stock: quantity,
                    unit_of_measure,
                    low_stock_threshold: threshold,
                    location,
                    unit_price,
                    ..NewProduct::default()
                })?;
                to_value(product)?
            }
            Command::UpdateProduct { sku, patch } => {
                let id = self.find_sku(&sku)?.id_typed();
                let taken = |new_sku: &&str| self.find_sku(new_sku).is_ok_and(|other| other.id_typed() != id);
                if let Some(new_sku) = patch.sku.as_deref().filter(taken) {
                    return Err(DomainError::conflict(format!("SKU {new_sku} already exists")).into());
                }
                let product = self
                    .ledger
                    .update_product(id, patch)?
                    .ok_or_else(|| anyhow!("no product with SKU {sku}"))?;
                to_value(product)?
            }
            Command::Delete { sku } => {
                let id = self.find_sku(&sku)?.id_typed();
                let deletion = self.ledger.delete_product(id);
                json!({
                    "product": deletion.product,
                    "movements_removed": deletion.movements_removed,
                })
            }
        };

        Ok(output)
    }

    /// Events published since the last drain, logged as they are collected.
    pub fn drain_events(&self) -> Vec<EventEnvelope<InventoryEvent>> {
        let events = self.events.drain();
        for envelope in &events {
            info!(
                seq = envelope.sequence_number(),
                event_type = envelope.payload().event_type(),
                subject = %envelope.subject_id(),
                "ledger event"
            );
        }
        events
    }

    fn find_sku(&self, sku: &str) -> anyhow::Result<&Product> {
        self.ledger
            .products()
            .iter()
            .find(|p| p.sku().eq_ignore_ascii_case(sku.trim()))
            .ok_or_else(|| anyhow!("no product with SKU {sku}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quantumstock_auth::DEMO_PASSWORD;
    use quantumstock_inventory::LedgerConfig;
    use quantumstock_products::ProductPatch;

    fn app_as(email: &str) -> App {
        App::start(AppConfig {
            email: email.to_string(),
            password: DEMO_PASSWORD.to_string(),
            ledger: LedgerConfig::default(),
        })
        .unwrap()
    }

    #[test]
    fn wrong_password_does_not_start() {
        let result = App::start(AppConfig {
            email: "clerk@quantumstock.com".to_string(),
            password: "nope".to_string(),
            ledger: LedgerConfig::default(),
        });
        assert!(result.is_err());
    }

    #[test]
    fn dashboard_reports_demo_stats() {
        let mut app = app_as("clerk@quantumstock.com");
        let out = app.run(Command::Dashboard).unwrap();
        assert_eq!(out["total_products"], 4);
        assert_eq!(out["low_stock_items"], 2);
    }

    #[test]
    fn clerk_can_issue_stock_and_event_is_published() {
        let mut app = app_as("clerk@quantumstock.com");
        let out = app
            .run(Command::Issue {
                sku: "sku001".to_string(),
                quantity: 5,
                reason: "Customer order".to_string(),
                destination: Some("Order #1002".to_string()),
            })
            .unwrap();

        assert_eq!(out["type"], "outbound");
        assert_eq!(out["previous_quantity"], 25);
        assert_eq!(out["new_quantity"], 20);
        assert_eq!(out["warehouse_clerk"]["name"], "Mike Clerk");

        let events = app.drain_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].payload().event_type(), "inventory.stock.moved");
        assert!(app.drain_events().is_empty());
    }

    #[test]
    fn clerk_cannot_delete_products() {
        let mut app = app_as("clerk@quantumstock.com");
        let result = app.run(Command::Delete {
            sku: "SKU001".to_string(),
        });
        assert!(result.is_err());
        assert_eq!(app.ledger().products().len(), 4);
    }

    #[test]
    fn manager_delete_cascades_movements() {
        let mut app = app_as("manager@quantumstock.com");
        let out = app
            .run(Command::Delete {
                sku: "SKU001".to_string(),
            })
            .unwrap();
        assert_eq!(out["movements_removed"], 2);
        assert!(app.ledger().movements().is_empty());
    }

    #[test]
    fn manager_updates_product_and_low_stock_follows() {
        let mut app = app_as("manager@quantumstock.com");
        let patch = ProductPatch {
            quantity_in_stock: Some(40),
            ..ProductPatch::default()
        };
        let out = app
            .run(Command::UpdateProduct {
                sku: "SKU004".to_string(),
                patch,
            })
            .unwrap();

        assert_eq!(out["quantity_in_stock"], 40);
        assert_eq!(app.run(Command::LowStock).unwrap().as_array().unwrap().len(), 1);
        let events = app.drain_events();
        assert_eq!(events[0].payload().event_type(), "inventory.product.updated");
    }

    #[test]
    fn clerk_cannot_update_products() {
        let mut app = app_as("clerk@quantumstock.com");
        let result = app.run(Command::UpdateProduct {
            sku: "SKU004".to_string(),
            patch: ProductPatch {
                name: Some("Copy Paper".to_string()),
                ..ProductPatch::default()
            },
        });
        assert!(result.is_err());
    }

    #[test]
    fn renaming_onto_another_sku_is_rejected() {
        let mut app = app_as("admin@quantumstock.com");
        let result = app.run(Command::UpdateProduct {
            sku: "SKU004".to_string(),
            patch: ProductPatch {
                sku: Some("SKU001".to_string()),
                ..ProductPatch::default()
            },
        });
        assert!(result.is_err());
        assert!(app.drain_events().is_empty());
    }

    #[test]
    fn duplicate_sku_is_rejected() {
        let mut app = app_as("admin@quantumstock.com");
        let result = app.run(Command::AddProduct {
            sku: "SKU002".to_string(),
            name: "Another Chair".to_string(),
            quantity: 1,
            unit_of_measure: "units".to_string(),
            threshold: 0,
            location: "B3".to_string(),
            unit_price: None,
        });
        assert!(result.is_err());
    }

    #[test]
    fn strict_ledger_refuses_to_oversell() {
        let mut app = app_as("clerk@quantumstock.com");
        let result = app.run(Command::Issue {
            sku: "SKU004".to_string(),
            quantity: 10,
            reason: "Bulk order".to_string(),
            destination: None,
        });
        assert!(result.is_err());
        assert_eq!(app.run(Command::LowStock).unwrap().as_array().unwrap().len(), 2);
    }
}
