//! Denormalized actor identity.

use serde::{Deserialize, Serialize};

use crate::{UserId, ValueObject};

/// Who performed an operation, captured at the time it happened.
///
/// This is a snapshot: it is never looked up again, so renaming or removing
/// the user afterwards does not change historical records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorRef {
    pub id: UserId,
    pub name: String,
}

impl ActorRef {
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl ValueObject for ActorRef {}
