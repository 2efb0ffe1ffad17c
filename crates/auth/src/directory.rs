//! Fixed directory of demo accounts.

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use quantumstock_core::UserId;

use crate::{Principal, Role};

/// Password shared by every demo account.
pub const DEMO_PASSWORD: &str = "password123";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown email or wrong password; deliberately indistinguishable.
    #[error("invalid email or password")]
    InvalidCredentials,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserAccount {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    #[serde(skip)]
    password: String,
}

impl UserAccount {
    pub fn new(
        id: UserId,
        email: impl Into<String>,
        name: impl Into<String>,
        role: Role,
        password: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email: email.into(),
            name: name.into(),
            role,
            created_at,
            password: password.into(),
        }
    }

    pub fn principal(&self) -> Principal {
        Principal {
            user_id: self.id,
            email: self.email.clone(),
            name: self.name.clone(),
            permissions: self.role.grants(),
            role: self.role.clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    accounts: Vec<UserAccount>,
}

impl UserDirectory {
    pub fn new(accounts: Vec<UserAccount>) -> Self {
        Self { accounts }
    }

    /// Administrator, manager and warehouse clerk, all on [`DEMO_PASSWORD`].
    pub fn demo() -> Self {
        let created_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().unwrap_or_default();
        let account = |n: u128, email: &str, name: &str, role: Role| {
            UserAccount::new(
                UserId::from_uuid(Uuid::from_u128(n)),
                email,
                name,
                role,
                DEMO_PASSWORD,
                created_at,
            )
        };

        Self::new(vec![
            account(1, "admin@quantumstock.com", "John Admin", Role::ADMINISTRATOR),
            account(2, "manager@quantumstock.com", "Sarah Manager", Role::MANAGER),
            account(3, "clerk@quantumstock.com", "Mike Clerk", Role::WAREHOUSE_CLERK),
        ])
    }

    pub fn accounts(&self) -> &[UserAccount] {
        &self.accounts
    }

    pub fn find_by_email(&self, email: &str) -> Option<&UserAccount> {
        let email = email.trim();
        self.accounts
            .iter()
            .find(|a| a.email.eq_ignore_ascii_case(email))
    }

    pub fn login(&self, email: &str, password: &str) -> Result<Principal, AuthError> {
        match self.find_by_email(email) {
            Some(account) if account.password == password => {
                info!(user = %account.id, name = account.name.as_str(), role = %account.role, "login succeeded");
                Ok(account.principal())
            }
            _ => {
                warn!(email = email.trim(), "login failed");
                Err(AuthError::InvalidCredentials)
            }
        }
    }
}
