//! Persisted login session.
//!
//! A single global slot: the file holds the last logged-in email and is
//! read on startup to bypass the login screen. Last writer wins; there is
//! no expiry.

use std::fs;
use std::io;
use std::path::PathBuf;

use crate::error::Result;

#[derive(Clone, Debug)]
pub struct SessionManager {
    path: PathBuf,
}

impl SessionManager {
    /// Create a [`SessionManager`] persisting to the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Persist `email` as the current session.
    pub fn save(&self, email: &str) -> Result<()> {
        fs::write(&self.path, email)?;
        Ok(())
    }

    /// Log out by removing the session file.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    /// Email of the current session, or `None` when logged out.
    pub fn current(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let email = contents.trim();
                Ok((!email.is_empty()).then(|| email.to_owned()))
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}
