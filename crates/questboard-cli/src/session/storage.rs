//! Session storage for persisting login state.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;

use super::StoredSession;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Get the session file path.
fn session_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", "questboard").context("Could not determine data directory")?;

    let data_dir = dirs.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data directory")?;

    Ok(data_dir.join("session.json"))
}

/// Save a session to disk.
pub fn save_session(session: &StoredSession) -> Result<()> {
    save_to(&session_path()?, session)
}

/// Load a session from disk.
pub fn load_session() -> Result<Option<StoredSession>> {
    load_from(&session_path()?)
}

/// Clear the stored session. Returns true if one existed.
pub fn clear_session() -> Result<bool> {
    clear_at(&session_path()?)
}

fn save_to(path: &Path, session: &StoredSession) -> Result<()> {
    let json = serde_json::to_string_pretty(session)?;

    fs::write(path, &json).context("Failed to write session file")?;

    // Cookies are credentials
    #[cfg(unix)]
    {
        let mut perms = fs::metadata(path)?.permissions();
        perms.set_mode(0o600);
        fs::set_permissions(path, perms)?;
    }

    tracing::debug!(path = %path.display(), "session saved");
    Ok(())
}

fn load_from(path: &Path) -> Result<Option<StoredSession>> {
    if !path.exists() {
        return Ok(None);
    }

    let json = fs::read_to_string(path).context("Failed to read session file")?;
    let stored = serde_json::from_str(&json).context("Invalid session file")?;
    Ok(Some(stored))
}

fn clear_at(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(false);
    }
    fs::remove_file(path).context("Failed to remove session file")?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use questboard_core::BaseUrl;

    fn sample() -> StoredSession {
        StoredSession {
            base_url: BaseUrl::new("https://guild.example.com/quest-board").unwrap(),
            cookies: Some("session-token=abc".to_string()),
        }
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        save_to(&path, &sample()).unwrap();
        let loaded = load_from(&path).unwrap().unwrap();
        assert_eq!(loaded, sample());
    }

    #[test]
    fn missing_file_is_no_session() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_from(&dir.path().join("session.json")).unwrap().is_none());
        assert!(!clear_at(&dir.path().join("session.json")).unwrap());
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{not json").unwrap();
        assert!(load_from(&path).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn session_file_is_private() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        save_to(&path, &sample()).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn clear_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        save_to(&path, &sample()).unwrap();

        assert!(clear_at(&path).unwrap());
        assert!(!path.exists());
    }
}
