use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::Permission;

/// Role identifier used for RBAC.
///
/// Roles are opaque names; [`Role::grants`] maps the three built-in roles to
/// their permissions and grants nothing to any other name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(Cow<'static, str>);

impl Role {
    pub const ADMINISTRATOR: Role = Role(Cow::Borrowed("Administrator"));
    pub const MANAGER: Role = Role(Cow::Borrowed("Manager"));
    pub const WAREHOUSE_CLERK: Role = Role(Cow::Borrowed("Warehouse Clerk"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Permissions granted by this role.
    pub fn grants(&self) -> Vec<Permission> {
        match self.as_str() {
            "Administrator" => vec![Permission::ALL],
            "Manager" => vec![
                Permission::INVENTORY_READ,
                Permission::PRODUCTS_CREATE,
                Permission::PRODUCTS_UPDATE,
                Permission::PRODUCTS_DELETE,
                Permission::MOVEMENTS_RECORD,
            ],
            "Warehouse Clerk" => vec![Permission::INVENTORY_READ, Permission::MOVEMENTS_RECORD],
            _ => Vec::new(),
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clerk_can_record_but_not_edit() {
        let grants = Role::WAREHOUSE_CLERK.grants();
        assert!(grants.contains(&Permission::MOVEMENTS_RECORD));
        assert!(!grants.contains(&Permission::PRODUCTS_UPDATE));
    }

    #[test]
    fn unknown_role_grants_nothing() {
        assert!(Role::new("Auditor").grants().is_empty());
    }

    #[test]
    fn built_in_roles_compare_equal_to_owned_names() {
        assert_eq!(Role::new("Manager".to_string()), Role::MANAGER);
    }
}
