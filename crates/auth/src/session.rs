//! The signed-in user of a running app.

use tracing::info;

use crate::{AuthError, Principal, UserDirectory};

#[derive(Debug, Clone, Default)]
pub struct Session {
    current: Option<Principal>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sign in, replacing any current user. A failed attempt leaves the
    /// session untouched.
    pub fn login(
        &mut self,
        directory: &UserDirectory,
        email: &str,
        password: &str,
    ) -> Result<&Principal, AuthError> {
        let principal = directory.login(email, password)?;
        Ok(&*self.current.insert(principal))
    }

    pub fn logout(&mut self) {
        if let Some(p) = self.current.take() {
            info!(user = %p.user_id, "logged out");
        }
    }

    pub fn current(&self) -> Option<&Principal> {
        self.current.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }
}
