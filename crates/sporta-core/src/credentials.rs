//! Login credentials type.

use std::fmt;

use crate::{Error, Result};

/// Username and password for the token endpoint.
///
/// The password never appears in Debug output.
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Create new credentials.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Returns the username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the password.
    ///
    /// Use only when constructing the login request.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Reject empty fields before any request is made.
    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(Error::validation("username", "Please fill in username and password."));
        }
        if self.password.is_empty() {
            return Err(Error::validation("password", "Please fill in username and password."));
        }
        Ok(())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
