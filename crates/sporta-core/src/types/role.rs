//! User role type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// The role string the backend attaches to every account.
///
/// `Anonymous` is the client-side role of a visitor without a session; the
/// backend never sends it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Role {
    SysAdmin,
    VenueManager,
    User,
    #[default]
    Anonymous,
}

impl Role {
    /// Returns the wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SysAdmin => "sys-admin",
            Role::VenueManager => "venue-manager",
            Role::User => "user",
            Role::Anonymous => "anonymous",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Role::SysAdmin => "System Admin",
            Role::VenueManager => "Venue Manager",
            Role::User => "Regular User",
            Role::Anonymous => "Guest",
        }
    }

    /// Returns true for roles that may open the management panel.
    pub fn is_staff(&self) -> bool {
        matches!(self, Role::SysAdmin | Role::VenueManager)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // The backend is inconsistent between dashes and underscores.
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "sys-admin" => Ok(Role::SysAdmin),
            "venue-manager" => Ok(Role::VenueManager),
            "user" => Ok(Role::User),
            "anonymous" | "" => Ok(Role::Anonymous),
            _ => Err(InvalidInputError::Role {
                value: s.to_string(),
            }
            .into()),
        }
    }
}

impl Serialize for Role {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wire_values() {
        assert_eq!("sys-admin".parse::<Role>().unwrap(), Role::SysAdmin);
        assert_eq!("venue-manager".parse::<Role>().unwrap(), Role::VenueManager);
        assert_eq!("user".parse::<Role>().unwrap(), Role::User);
    }

    #[test]
    fn accepts_underscore_spelling() {
        assert_eq!("sys_admin".parse::<Role>().unwrap(), Role::SysAdmin);
        assert_eq!("venue_manager".parse::<Role>().unwrap(), Role::VenueManager);
    }

    #[test]
    fn rejects_unknown_role() {
        assert!("root".parse::<Role>().is_err());
    }

    #[test]
    fn serde_uses_wire_form() {
        let json = serde_json::to_string(&Role::VenueManager).unwrap();
        assert_eq!(json, "\"venue-manager\"");
    }
}
