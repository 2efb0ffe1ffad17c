//! `quantumstock-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the catalog, the
//! stock ledger and the auth boundary (no IO, no storage).

pub mod actor;
pub mod clock;
pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use actor::ActorRef;
pub use clock::{Clock, ManualClock, SystemClock};
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{EntityId, UserId};
pub use value_object::ValueObject;
