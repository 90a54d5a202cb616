//! Session storage for persisting login state.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use sporta_core::{AccessToken, RefreshToken, Role, SessionContext};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "SPORTA_DATA_DIR";

/// Stored session data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredSession {
    pub api: String,
    pub username: String,
    /// Role string as the backend reported it.
    pub role: String,
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl StoredSession {
    /// Build the read-only session snapshot for this login.
    ///
    /// A role the client does not know degrades to [`Role::Anonymous`].
    pub fn context(&self) -> SessionContext {
        let role = self.role.parse::<Role>().unwrap_or_else(|e| {
            warn!(role = %self.role, error = %e, "unknown role in session, treating as anonymous");
            Role::Anonymous
        });
        SessionContext::authenticated(role, &self.username, AccessToken::new(&self.access_token))
    }

    pub fn refresh_token(&self) -> Option<RefreshToken> {
        self.refresh_token.as_deref().map(RefreshToken::new)
    }
}

/// Get the session file path.
fn session_path() -> Result<PathBuf> {
    let data_dir = match std::env::var_os(DATA_DIR_ENV) {
        Some(dir) => PathBuf::from(dir),
        None => ProjectDirs::from("", "", "sporta")
            .context("Could not determine data directory")?
            .data_dir()
            .to_path_buf(),
    };

    fs::create_dir_all(&data_dir).context("Failed to create data directory")?;

    Ok(data_dir.join("session.json"))
}

/// Save a session to disk.
pub fn save_session(session: &StoredSession) -> Result<()> {
    let path = session_path()?;
    let json = serde_json::to_string_pretty(session)?;

    fs::write(&path, &json).context("Failed to write session file")?;

    // Set restrictive permissions (Unix only)
    #[cfg(unix)]
    {
        let mut perms = fs::metadata(&path)?.permissions();
        perms.set_mode(0o600);
        fs::set_permissions(&path, perms)?;
    }

    debug!(path = %path.display(), "session saved");
    Ok(())
}

/// Load a session from disk.
pub fn load_session() -> Result<Option<StoredSession>> {
    let path = session_path()?;

    if !path.exists() {
        return Ok(None);
    }

    let json = fs::read_to_string(&path).context("Failed to read session file")?;
    let stored = serde_json::from_str(&json).context("Invalid session file")?;
    Ok(Some(stored))
}

/// Load the session snapshot, anonymous when nobody is logged in.
pub fn load_context() -> Result<SessionContext> {
    Ok(load_session()?
        .map(|stored| stored.context())
        .unwrap_or_else(SessionContext::anonymous))
}

/// Clear the stored session. Returns false if there was none.
pub fn clear_session() -> Result<bool> {
    let path = session_path()?;

    if path.exists() {
        fs::remove_file(&path).context("Failed to remove session file")?;
        return Ok(true);
    }

    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(role: &str) -> StoredSession {
        StoredSession {
            api: "http://127.0.0.1:8000".into(),
            username: "sara".into(),
            role: role.into(),
            access_token: "tok".into(),
            refresh_token: None,
        }
    }

    #[test]
    fn known_role_is_kept() {
        assert_eq!(stored("sys_admin").context().role(), Role::SysAdmin);
        assert_eq!(stored("venue-manager").context().role(), Role::VenueManager);
    }

    #[test]
    fn unknown_role_is_anonymous() {
        let context = stored("superuser").context();
        assert_eq!(context.role(), Role::Anonymous);
        assert!(context.is_authenticated());
    }
}
