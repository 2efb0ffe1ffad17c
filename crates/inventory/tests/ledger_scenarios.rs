//! End-to-end ledger scenarios.
//!
//! Verifies:
//! - the outbound-order walkthrough (stock, movement log, valuation, low stock)
//! - cascade deletes never leave orphaned movements
//! - derived views stay consistent with the collections after arbitrary edits

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;

use quantumstock_core::{ActorRef, Entity, ManualClock, UserId};
use quantumstock_inventory::{
    DashboardStats, Ledger, LedgerConfig, MovementKind, NewMovement, ValidationPolicy,
};
use quantumstock_products::{NewProduct, ProductFilter, ProductId, ProductPatch};

fn clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2024, 2, 1, 10, 0, 0).unwrap()))
}

fn mike() -> ActorRef {
    ActorRef::new(UserId::new(), "Mike")
}

fn item(sku: &str, qty: i64, threshold: i64, price: Option<u64>) -> NewProduct {
    NewProduct {
        sku: sku.to_string(),
        name: format!("Item {sku}"),
        quantity_in_stock: qty,
        unit_of_measure: "units".to_string(),
        low_stock_threshold: threshold,
        location: "A1".to_string(),
        unit_price: price,
        ..NewProduct::default()
    }
}

#[test]
fn outbound_customer_order_walkthrough() {
    let mut ledger = Ledger::with_clock(LedgerConfig::default(), clock());
    let product = ledger.add_product(item("SKU001", 50, 10, Some(10))).unwrap();

    let movement = ledger
        .add_movement(NewMovement {
            product_id: product.id_typed(),
            kind: MovementKind::Outbound,
            quantity: 25,
            previous_quantity: 50,
            new_quantity: 25,
            reason: "Customer order".to_string(),
            supplier: None,
            destination: None,
            warehouse_clerk: mike(),
            notes: None,
        })
        .unwrap();

    let stored = ledger.product(product.id_typed()).unwrap();
    assert_eq!(stored.quantity_in_stock(), 25);

    assert_eq!(ledger.movements().len(), 1);
    assert_eq!(ledger.movements()[0].id(), movement.id());
    assert_eq!(movement.product_id, product.id_typed());
    assert_eq!(movement.warehouse_clerk.name, "Mike");

    assert_eq!(ledger.dashboard_stats().total_value, 250);
    assert!(ledger.low_stock_products().is_empty());
}

#[test]
fn receiving_stock_clears_low_stock_alert() {
    let mut ledger = Ledger::with_clock(LedgerConfig::default(), clock());
    let paper = ledger.add_product(item("SKU004", 3, 10, Some(1_299))).unwrap();
    assert_eq!(ledger.low_stock_products().len(), 1);

    let draft = ledger
        .draft_movement(paper.id_typed(), MovementKind::Inbound, 20, "Replenishment", mike())
        .unwrap()
        .with_supplier("Paper Co");
    ledger.add_movement(draft).unwrap();

    assert!(ledger.low_stock_products().is_empty());
    assert!(ledger.search_products(&ProductFilter::low_stock()).is_empty());
    assert_eq!(ledger.product(paper.id_typed()).unwrap().quantity_in_stock(), 23);
}

#[test]
fn recent_movements_age_out_of_the_dashboard() {
    let clock = clock();
    let mut ledger = Ledger::with_clock(LedgerConfig::default(), clock.clone());
    let product = ledger.add_product(item("A", 10, 1, None)).unwrap();

    ledger
        .add_movement(NewMovement::inbound(&product, 1, "Restock", mike()))
        .unwrap();
    assert_eq!(ledger.dashboard_stats().recent_movements, 1);

    clock.advance(Duration::hours(24));
    assert_eq!(ledger.dashboard_stats().recent_movements, 1);

    clock.advance(Duration::seconds(1));
    assert_eq!(ledger.dashboard_stats().recent_movements, 0);
}

#[test]
fn permissive_policy_accepts_what_strict_rejects() {
    let draft_for = |ledger: &mut Ledger<Arc<ManualClock>>| {
        let product = ledger.add_product(item("A", 2, 1, None)).unwrap();
        NewMovement::outbound(&product, 5, "Shrinkage", mike())
    };

    let mut strict = Ledger::with_clock(LedgerConfig::default(), clock());
    let draft = draft_for(&mut strict);
    assert!(strict.add_movement(draft).is_err());

    let mut loose = Ledger::with_clock(
        LedgerConfig::default().with_validation(ValidationPolicy::Permissive),
        clock(),
    );
    let draft = draft_for(&mut loose);
    let movement = loose.add_movement(draft).unwrap();
    assert_eq!(movement.new_quantity, -3);
    assert_eq!(loose.products()[0].quantity_in_stock(), -3);
}

#[test]
fn top_movers_respect_configured_limit() {
    let config = LedgerConfig::default().with_top_movers_limit(2);
    let mut ledger = Ledger::with_clock(config, clock());
    for sku in ["A", "B", "C"] {
        ledger.add_product(item(sku, 0, 0, None)).unwrap();
    }
    assert_eq!(ledger.top_movers_default().len(), 2);
    assert_eq!(ledger.top_movers(5).len(), 3);
}

#[test]
fn empty_ledger_reports_zeroes() {
    let ledger = Ledger::new(LedgerConfig::default());
    assert_eq!(ledger.dashboard_stats(), DashboardStats::default());
    assert!(ledger.top_movers(5).is_empty());
    assert!(ledger.movement_history(None).is_empty());
}

#[derive(Debug, Clone)]
enum Op {
    Add { qty: i64, threshold: i64, price: Option<u64> },
    Update { idx: usize, qty: i64 },
    Delete { idx: usize },
    Move { idx: usize, inbound: bool, qty: i64 },
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0i64..500, 0i64..50, proptest::option::of(0u64..10_000))
            .prop_map(|(qty, threshold, price)| Op::Add { qty, threshold, price }),
        (0usize..16, 0i64..500).prop_map(|(idx, qty)| Op::Update { idx, qty }),
        (0usize..16).prop_map(|idx| Op::Delete { idx }),
        (0usize..16, any::<bool>(), 1i64..100).prop_map(|(idx, inbound, qty)| Op::Move { idx, inbound, qty }),
    ]
}

fn pick(ids: &[ProductId], idx: usize) -> ProductId {
    if ids.is_empty() {
        ProductId::generate()
    } else {
        ids[idx % ids.len()]
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 128, ..ProptestConfig::default() })]

    /// Property: after any sequence of edits the derived views agree with a
    /// direct rescan, and no movement points at a deleted product.
    #[test]
    fn derived_views_stay_consistent(ops in proptest::collection::vec(op(), 1..60)) {
        let clock = clock();
        let mut ledger = Ledger::with_clock(LedgerConfig::default(), clock.clone());
        let mut ids: Vec<ProductId> = Vec::new();
        let mut deleted: Vec<ProductId> = Vec::new();

        for (n, op) in ops.into_iter().enumerate() {
            clock.advance(Duration::minutes(1));
            match op {
                Op::Add { qty, threshold, price } => {
                    let p = ledger.add_product(item(&format!("P{n}"), qty, threshold, price)).unwrap();
                    prop_assert_eq!(p.created_at(), p.updated_at());
                    ids.push(p.id_typed());
                }
                Op::Update { idx, qty } => {
                    let id = pick(&ids, idx);
                    let patch = ProductPatch { quantity_in_stock: Some(qty), ..ProductPatch::default() };
                    if let Some(p) = ledger.update_product(id, patch).unwrap() {
                        prop_assert!(p.created_at() < p.updated_at());
                    }
                }
                Op::Delete { idx } => {
                    let id = pick(&ids, idx);
                    ledger.delete_product(id);
                    prop_assert!(ledger.delete_product(id).is_noop());
                    ids.retain(|i| *i != id);
                    deleted.push(id);
                }
                Op::Move { idx, inbound, qty } => {
                    let id = pick(&ids, idx);
                    let kind = if inbound { MovementKind::Inbound } else { MovementKind::Outbound };
                    if let Ok(draft) = ledger.draft_movement(id, kind, qty, "Adjustment", mike()) {
                        let expected = draft.new_quantity;
                        if ledger.add_movement(draft).is_ok() {
                            prop_assert_eq!(ledger.product(id).unwrap().quantity_in_stock(), expected);
                        }
                    }
                }
            }
        }

        let products = ledger.products();
        let expected_value: i64 = products
            .iter()
            .map(|p| p.quantity_in_stock() * p.unit_price().unwrap_or(0) as i64)
            .sum();
        let stats = ledger.dashboard_stats();
        prop_assert_eq!(stats.total_products, products.len());
        prop_assert_eq!(stats.total_value, expected_value);
        prop_assert_eq!(
            stats.low_stock_items,
            products.iter().filter(|p| p.quantity_in_stock() <= p.low_stock_threshold()).count()
        );

        let low: Vec<ProductId> = ledger.low_stock_products().iter().map(|p| p.id_typed()).collect();
        let rescan: Vec<ProductId> = products
            .iter()
            .filter(|p| p.quantity_in_stock() <= p.low_stock_threshold())
            .map(|p| p.id_typed())
            .collect();
        prop_assert_eq!(low, rescan);

        for id in &deleted {
            prop_assert!(ledger.movements().iter().all(|m| m.product_id != *id));
        }

        let top = ledger.top_movers(5);
        prop_assert!(top.len() <= 5);
        prop_assert!(top.windows(2).all(|w| w[0].movement_count >= w[1].movement_count));
        prop_assert_eq!(top, ledger.top_movers(5));
    }
}
