//! `quantumstock-auth`: who is acting, and what they may do.
//!
//! A fixed directory of demo accounts, role-based permissions and the
//! principal handed to the inventory ledger as the movement's clerk. Decoupled
//! from the ledger itself: the ledger never authenticates or authorizes.

pub mod authorize;
pub mod directory;
pub mod permissions;
pub mod principal;
pub mod roles;
pub mod session;

pub use authorize::{AuthzError, authorize};
pub use directory::{AuthError, DEMO_PASSWORD, UserAccount, UserDirectory};
pub use permissions::Permission;
pub use principal::Principal;
pub use roles::Role;
pub use session::Session;
