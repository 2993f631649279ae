/// Token persistence
///
/// The session keeps its bearer token under the key [`TOKEN_KEY`] in a
/// [`TokenStorage`]. [`FileTokenStorage`] survives restarts (one file per
/// key inside a directory); [`MemoryTokenStorage`] lives as long as the
/// value does.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::debug;

use crate::error::ClientResult;

/// Storage key for the bearer token
pub const TOKEN_KEY: &str = "token";

/// Where the session keeps its token between runs
pub trait TokenStorage: Send + Sync {
    /// Stored token, if any
    fn load(&self) -> ClientResult<Option<String>>;

    /// Replaces the stored token
    fn store(&self, token: &str) -> ClientResult<()>;

    /// Removes the stored token; clearing an empty storage is fine
    fn clear(&self) -> ClientResult<()>;
}

/// In-process storage
#[derive(Debug, Default)]
pub struct MemoryTokenStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryTokenStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl TokenStorage for MemoryTokenStorage {
    fn load(&self) -> ClientResult<Option<String>> {
        Ok(self.entries().get(TOKEN_KEY).cloned())
    }

    fn store(&self, token: &str) -> ClientResult<()> {
        self.entries()
            .insert(TOKEN_KEY.to_string(), token.to_string());
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        self.entries().remove(TOKEN_KEY);
        Ok(())
    }
}

/// File-backed storage: the token lives in `<dir>/token`
#[derive(Debug, Clone)]
pub struct FileTokenStorage {
    dir: PathBuf,
}

impl FileTokenStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the token file
    pub fn path(&self) -> PathBuf {
        self.dir.join(TOKEN_KEY)
    }
}

impl TokenStorage for FileTokenStorage {
    fn load(&self) -> ClientResult<Option<String>> {
        match fs::read_to_string(self.path()) {
            Ok(raw) => {
                let token = raw.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn store(&self, token: &str) -> ClientResult<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path(), token)?;
        debug!(path = %self.path().display(), "Stored session token");
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        match fs::remove_file(self.path()) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
