//! Account view models.

use serde::{Deserialize, Serialize};

use crate::traits::Identified;
use crate::types::Role;
use crate::{Error, Result};

use super::venue::required;

/// An account row of the users admin table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    #[serde(default, alias = "name")]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default = "default_role")]
    pub role: Role,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_role() -> Role {
    Role::User
}

fn default_active() -> bool {
    true
}

impl Identified for User {
    type Id = u64;

    fn id(&self) -> u64 {
        self.id
    }
}

/// The signed-in user's own account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default = "default_role")]
    pub role: Role,
    #[serde(default)]
    pub phone_number: Option<String>,
}

/// Body of the admin user create and update forms.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserForm {
    pub username: String,
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl UserForm {
    /// Check required fields and trim them.
    pub fn validated(mut self) -> Result<Self> {
        self.username = required("username", &self.username, "Name is required.")?;
        self.email = required("email", &self.email, "Email is required.")?;
        if self.role == Role::Anonymous {
            return Err(Error::validation("role", "Please select a role."));
        }
        Ok(self)
    }
}

/// Body of the profile update form.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

impl ProfileUpdate {
    /// Reject an update that changes nothing or blanks a field.
    pub fn validated(self) -> Result<Self> {
        if self.username.is_none() && self.email.is_none() && self.phone_number.is_none() {
            return Err(Error::validation("profile", "Nothing to update."));
        }
        let username = self
            .username
            .map(|u| required("username", &u, "Username is required."))
            .transpose()?;
        let email = self
            .email
            .map(|e| required("email", &e, "Email is required."))
            .transpose()?;
        Ok(Self {
            username,
            email,
            phone_number: self.phone_number.map(|p| p.trim().to_string()),
        })
    }
}

/// Body of the sign-up form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Registration {
    pub username: String,
    pub password: String,
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

impl Registration {
    pub fn validated(mut self) -> Result<Self> {
        self.username = required("username", &self.username, "Username is required.")?;
        self.email = required("email", &self.email, "Email is required.")?;
        if self.password.len() < 6 {
            return Err(Error::validation(
                "password",
                "Password must be at least 6 characters.",
            ));
        }
        if self.role == Role::Anonymous {
            return Err(Error::validation("role", "Please select a role."));
        }
        Ok(self)
    }
}

/// Counters on the admin dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemStats {
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub total_halls: u64,
    #[serde(default)]
    pub total_bookings: u64,
    #[serde(default)]
    pub confirmed_bookings: u64,
    #[serde(default)]
    pub pending_bookings: u64,
}
