use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Something a signed-in user may do to the inventory, named
/// `<area>.<action>` (`products.update`, `movements.record`).
///
/// `*` is held by administrators and satisfies every check.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(Cow<'static, str>);

impl Permission {
    pub const ALL: Permission = Permission(Cow::Borrowed("*"));
    /// Dashboard, catalog and movement history.
    pub const INVENTORY_READ: Permission = Permission(Cow::Borrowed("inventory.read"));
    pub const PRODUCTS_CREATE: Permission = Permission(Cow::Borrowed("products.create"));
    pub const PRODUCTS_UPDATE: Permission = Permission(Cow::Borrowed("products.update"));
    pub const PRODUCTS_DELETE: Permission = Permission(Cow::Borrowed("products.delete"));
    /// Receiving and issuing stock.
    pub const MOVEMENTS_RECORD: Permission = Permission(Cow::Borrowed("movements.record"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_wildcard(&self) -> bool {
        self.0 == Self::ALL.0
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
