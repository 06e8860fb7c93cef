//! JSON-file `SessionStore` so a login survives between CLI invocations.

#[cfg(test)]
#[path = "session_file_test.rs"]
mod session_file_test;

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use helpdesk::{Session, SessionError, SessionStore};

const DEFAULT_FILE_NAME: &str = ".helpdesk-session.json";

#[derive(Clone, Debug)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// `$HOME/.helpdesk-session.json`, or the working directory without `HOME`.
pub fn default_session_path() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_default()
        .join(DEFAULT_FILE_NAME)
}

fn storage_error(err: &std::io::Error) -> SessionError {
    SessionError::Storage(err.to_string())
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Option<Session> {
        let raw = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "ignoring unreadable session file");
                None
            }
        }
    }

    fn save(&self, session: &Session) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| storage_error(&e))?;
        }
        let raw = serde_json::to_string_pretty(session)
            .map_err(|e| SessionError::Storage(e.to_string()))?;
        fs::write(&self.path, raw).map_err(|e| storage_error(&e))?;
        restrict_permissions(&self.path)
    }

    fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Err(err) if err.kind() != ErrorKind::NotFound => Err(storage_error(&err)),
            _ => Ok(()),
        }
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<(), SessionError> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(|e| storage_error(&e))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<(), SessionError> {
    Ok(())
}
