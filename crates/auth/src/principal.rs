use serde::{Deserialize, Serialize};

use quantumstock_core::{ActorRef, UserId};

use crate::{Permission, Role};

/// An authenticated user, resolved with the permissions of their role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub user_id: UserId,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub permissions: Vec<Permission>,
}

impl Principal {
    /// Identity snapshot stored on the records this principal creates.
    pub fn actor(&self) -> ActorRef {
        ActorRef::new(self.user_id, self.name.clone())
    }

    pub fn has_permission(&self, required: &Permission) -> bool {
        self.permissions
            .iter()
            .any(|p| p.is_wildcard() || p == required)
    }
}
