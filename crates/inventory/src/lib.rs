//! Inventory ledger.
//!
//! Owns the product catalog and the stock-movement history, applies movements
//! to stock levels and derives the dashboard views (low stock, top movers,
//! aggregate stats). Everything is in memory and synchronous; hosts that share
//! a ledger across threads use [`SharedLedger`].

pub mod config;
pub mod demo;
pub mod event;
pub mod ledger;
pub mod movement;
pub mod shared;
pub mod stats;

pub use config::{LedgerConfig, ValidationPolicy};
pub use event::InventoryEvent;
pub use ledger::{Deletion, Ledger, LedgerBus};
pub use movement::{MovementId, MovementKind, NewMovement, StockMovement};
pub use shared::SharedLedger;
pub use stats::{DashboardStats, TopMover};
