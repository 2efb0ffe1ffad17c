//! Demo catalog used by the CLI and by tests.
//!
//! Ids are fixed so that a demo session is reproducible.

use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use quantumstock_core::{ActorRef, Clock, EntityId};
use quantumstock_products::{NewProduct, Product, ProductId};

use crate::config::LedgerConfig;
use crate::ledger::Ledger;
use crate::movement::{MovementId, MovementKind, NewMovement, StockMovement};

fn day(month: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, month, d, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

fn product_id(n: u128) -> ProductId {
    ProductId(EntityId::from_uuid(Uuid::from_u128(n)))
}

fn movement_id(n: u128) -> MovementId {
    MovementId(EntityId::from_uuid(Uuid::from_u128(0x1000 + n)))
}

struct Row {
    n: u128,
    sku: &'static str,
    name: &'static str,
    qty: i64,
    uom: &'static str,
    threshold: i64,
    location: &'static str,
    category: &'static str,
    price_cents: u64,
}

const ROWS: [Row; 4] = [
    Row { n: 1, sku: "SKU001", name: "Wireless Headphones", qty: 25, uom: "units", threshold: 10, location: "A1-B2", category: "Electronics", price_cents: 9_999 },
    Row { n: 2, sku: "SKU002", name: "Office Chair", qty: 5, uom: "units", threshold: 8, location: "B3-C1", category: "Furniture", price_cents: 24_999 },
    Row { n: 3, sku: "SKU003", name: "Laptop Stand", qty: 15, uom: "units", threshold: 5, location: "A2-D1", category: "Accessories", price_cents: 4_999 },
    Row { n: 4, sku: "SKU004", name: "Printer Paper", qty: 3, uom: "boxes", threshold: 10, location: "C1-A3", category: "Office Supplies", price_cents: 1_299 },
];

/// Well-known id of the first demo product (the headphones).
pub fn headphones_id() -> ProductId {
    product_id(1)
}

pub fn products() -> Vec<Product> {
    ROWS.iter()
        .map(|row| {
            let d = row.n as u32;
            Product::restore(
                product_id(row.n),
                NewProduct {
                    sku: row.sku.to_string(),
                    name: row.name.to_string(),
                    quantity_in_stock: row.qty,
                    unit_of_measure: row.uom.to_string(),
                    low_stock_threshold: row.threshold,
                    location: row.location.to_string(),
                    sub_locations: Vec::new(),
                    category: Some(row.category.to_string()),
                    description: None,
                    unit_price: Some(row.price_cents),
                },
                day(1, d),
                day(1, 14 + d),
            )
        })
        .collect()
}

/// The headphones' receipt and first customer order, recorded by `clerk`.
pub fn movements(clerk: &ActorRef) -> Vec<StockMovement> {
    let receipt = NewMovement {
        product_id: headphones_id(),
        kind: MovementKind::Inbound,
        quantity: 50,
        previous_quantity: 0,
        new_quantity: 50,
        reason: "Initial stock".to_string(),
        supplier: Some("TechSupplier Inc".to_string()),
        destination: None,
        warehouse_clerk: clerk.clone(),
        notes: None,
    };
    let order = NewMovement {
        kind: MovementKind::Outbound,
        quantity: 25,
        previous_quantity: 50,
        new_quantity: 25,
        reason: "Customer order".to_string(),
        supplier: None,
        destination: Some("Order #1001".to_string()),
        ..receipt.clone()
    };

    vec![
        StockMovement::record(movement_id(1), receipt, day(1, 1)),
        StockMovement::record(movement_id(2), order, day(1, 15)),
    ]
}

/// A ledger pre-loaded with the demo catalog.
pub fn ledger<C: Clock>(config: LedgerConfig, clock: C, clerk: &ActorRef) -> Ledger<C> {
    Ledger::with_clock(config, clock).with_seed(products(), movements(clerk))
}
