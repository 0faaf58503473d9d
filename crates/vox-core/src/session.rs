//! Session (access token) storage.
//!
//! The signed-in session lives in `<home>/session.json` with restricted
//! permissions (0600). The transport layer re-reads it for every outgoing
//! request; nothing caches the token in memory.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use vox_types::User;

/// Session cache filename.
const SESSION_FILE: &str = "session.json";

/// A stored sign-in: the bearer token plus the account it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub user: User,
}

/// Returns the path of the session file under the given home directory.
pub fn session_path(home: &Path) -> PathBuf {
    home.join(SESSION_FILE)
}

/// Loads the stored session, if any.
///
/// Returns `None` when no session file exists.
pub fn load(home: &Path) -> Result<Option<Session>> {
    let path = session_path(home);
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read session from {}", path.display()))?;
    let session = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse session from {}", path.display()))?;
    Ok(Some(session))
}

/// Saves the session to disk with restricted permissions (0600).
pub fn save(home: &Path, session: &Session) -> Result<()> {
    let path = session_path(home);

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let contents = serde_json::to_string_pretty(session).context("Failed to serialize session")?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(&path)
            .with_context(|| format!("Failed to open {} for writing", path.display()))?;
        file.write_all(contents.as_bytes())
            .with_context(|| format!("Failed to write to {}", path.display()))?;
    }

    #[cfg(not(unix))]
    {
        fs::write(&path, contents)
            .with_context(|| format!("Failed to write to {}", path.display()))?;
    }

    Ok(())
}

/// Removes the stored session.
///
/// Idempotent: returns `Ok(false)` when nothing was stored.
pub fn clear(home: &Path) -> Result<bool> {
    let path = session_path(home);
    if !path.exists() {
        return Ok(false);
    }

    fs::remove_file(&path)
        .with_context(|| format!("Failed to remove session at {}", path.display()))?;
    Ok(true)
}
