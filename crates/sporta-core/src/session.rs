//! Read-only session snapshot.

use std::sync::Arc;

use crate::tokens::AccessToken;
use crate::types::Role;

/// The caller's identity as the client sees it.
///
/// A snapshot is built once (at login or when the stored session is loaded)
/// and handed to every component that needs the role or bearer token. It is
/// never mutated; logging in again produces a new snapshot.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    role: Role,
    username: Option<String>,
    access_token: Option<AccessToken>,
}

impl SessionContext {
    /// A visitor without a session.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// An authenticated session.
    pub fn authenticated(role: Role, username: impl Into<String>, token: AccessToken) -> Self {
        Self {
            role,
            username: Some(username.into()),
            access_token: Some(token),
        }
    }

    /// Wrap in an `Arc` for sharing between controllers.
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn access_token(&self) -> Option<&AccessToken> {
        self.access_token.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }
}
