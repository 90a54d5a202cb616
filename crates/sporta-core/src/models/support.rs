//! Contact support and password recovery.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InvalidInputError;
use crate::{Error, Result};

use super::venue::required;

const FILL_REQUIRED: &str = "Please fill all required fields.";

/// Topic of a support request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactKind {
    #[default]
    Bug,
    Payment,
    Venue,
    Account,
    Other,
}

impl ContactKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactKind::Bug => "bug",
            ContactKind::Payment => "payment",
            ContactKind::Venue => "venue",
            ContactKind::Account => "account",
            ContactKind::Other => "other",
        }
    }
}

impl fmt::Display for ContactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContactKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bug" => Ok(ContactKind::Bug),
            "payment" => Ok(ContactKind::Payment),
            "venue" => Ok(ContactKind::Venue),
            "account" => Ok(ContactKind::Account),
            "other" => Ok(ContactKind::Other),
            _ => Err(InvalidInputError::Other {
                message: format!("unknown request type '{s}'"),
            }
            .into()),
        }
    }
}

/// Urgency of a support request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(InvalidInputError::Other {
                message: format!("unknown priority '{s}'"),
            }
            .into()),
        }
    }
}

/// Body of the contact support form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactMessage {
    pub subject: String,
    #[serde(rename = "type")]
    pub kind: ContactKind,
    pub priority: Priority,
    pub message: String,
}

impl ContactMessage {
    pub fn new(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            kind: ContactKind::default(),
            priority: Priority::default(),
            message: message.into(),
        }
    }

    /// Subject and message are both required.
    pub fn validated(mut self) -> Result<Self> {
        self.subject = required("subject", &self.subject, FILL_REQUIRED)?;
        self.message = required("message", &self.message, FILL_REQUIRED)?;
        Ok(self)
    }
}

/// Body of the forgot-password form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PasswordResetRequest {
    pub email: String,
}

impl PasswordResetRequest {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }

    pub fn validated(self) -> Result<Self> {
        let email = required("email", &self.email, "Please enter your email.")?;
        Ok(Self { email })
    }
}

/// Body of the reset-password form: the emailed code and the new password.
#[derive(Clone, PartialEq, Serialize)]
pub struct PasswordReset {
    pub email: String,
    pub code: String,
    pub new_password: String,
}

impl fmt::Debug for PasswordReset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordReset")
            .field("email", &self.email)
            .field("code", &"[REDACTED]")
            .field("new_password", &"[REDACTED]")
            .finish()
    }
}

impl PasswordReset {
    pub fn validated(self) -> Result<Self> {
        let email = required("email", &self.email, "Please enter your email.")?;
        let code = required("code", &self.code, "Please enter the code sent to your email.")?;
        if self.new_password.trim().len() < 6 {
            return Err(Error::validation(
                "new_password",
                "Password must be at least 6 characters.",
            ));
        }
        Ok(Self {
            email,
            code,
            new_password: self.new_password,
        })
    }
}

/// Result of the active users report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveUsers {
    #[serde(default)]
    pub count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn contact_body_uses_type_key() {
        let message = ContactMessage {
            kind: "Payment".parse().unwrap(),
            priority: Priority::High,
            ..ContactMessage::new(" Refund ", "Charged twice")
        }
        .validated()
        .unwrap();
        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({"subject": "Refund", "type": "payment", "priority": "high", "message": "Charged twice"})
        );
    }

    #[test]
    fn contact_requires_message() {
        let err = ContactMessage::new("Refund", "  ").validated().unwrap_err();
        assert_eq!(err.user_message(), "Please fill all required fields.");
    }

    #[test]
    fn forgot_password_requires_email() {
        let err = PasswordResetRequest::new("").validated().unwrap_err();
        assert_eq!(err.user_message(), "Please enter your email.");
    }

    #[test]
    fn reset_checks_code_then_password() {
        let reset = |code: &str, password: &str| PasswordReset {
            email: "sara@mail.com".into(),
            code: code.into(),
            new_password: password.into(),
        };
        assert_eq!(
            reset(" ", "secret123").validated().unwrap_err().user_message(),
            "Please enter the code sent to your email."
        );
        assert_eq!(
            reset("4821", "12345").validated().unwrap_err().user_message(),
            "Password must be at least 6 characters."
        );
        assert_eq!(reset(" 4821 ", "secret123").validated().unwrap().code, "4821");
    }

    #[test]
    fn reset_debug_hides_secrets() {
        let reset = PasswordReset {
            email: "sara@mail.com".into(),
            code: "4821".into(),
            new_password: "secret123".into(),
        };
        let debug = format!("{reset:?}");
        assert!(!debug.contains("4821"));
        assert!(!debug.contains("secret123"));
    }

    #[test]
    fn unknown_priority_rejected() {
        assert!("urgent".parse::<Priority>().is_err());
    }
}
