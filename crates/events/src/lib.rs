//! Ledger change events and their in-process distribution.
//!
//! The ledger is the source of truth; events are notifications for whoever
//! wants to react to a change (dashboards, audit logs, the CLI).

pub mod bus;
pub mod envelope;
pub mod event;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscription};
pub use envelope::EventEnvelope;
pub use event::Event;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
