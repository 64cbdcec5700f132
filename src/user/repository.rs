//! Handle user record requests.

use std::path::PathBuf;

use crate::error::{CoreError, Result};
use crate::store::FlatFile;
use crate::user::User;

#[derive(Debug)]
pub struct UserRepository {
    file: FlatFile<User>,
}

impl UserRepository {
    /// Open a [`UserRepository`] backed by the file at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            file: FlatFile::open(path)?,
        })
    }

    /// Insert a [`User`], rejecting an already-registered email.
    ///
    /// On rejection neither the collection nor the backing file changes.
    pub fn add(&mut self, user: User) -> Result<()> {
        if self.find_by_email(&user.email).is_some() {
            return Err(CoreError::Duplicate {
                entity: "user",
                key: "email",
            });
        }
        self.file.push(user)
    }

    /// Find a user by email, case-insensitively.
    pub fn find_by_email(&self, email: &str) -> Option<&User> {
        self.file
            .find(|user| user.email.eq_ignore_ascii_case(email))
    }

    pub fn all(&self) -> &[User] {
        self.file.records()
    }

    pub fn len(&self) -> usize {
        self.file.len()
    }

    pub fn is_empty(&self) -> bool {
        self.file.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(email: &str) -> User {
        User {
            name: "Ada".into(),
            email: email.into(),
            password: "Passw0rd".into(),
            cnic: None,
            role: None,
        }
    }

    #[test]
    fn test_duplicate_email_leaves_store_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.txt");

        let mut users = UserRepository::open(&path).unwrap();
        users.add(user("ada@example.com")).unwrap();
        let saved = std::fs::read_to_string(&path).unwrap();

        let err = users.add(user("ADA@example.com")).unwrap_err();
        assert!(matches!(err, CoreError::Duplicate { .. }));
        assert_eq!(users.len(), 1);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), saved);
    }

    #[test]
    fn test_reload_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.txt");

        let mut users = UserRepository::open(&path).unwrap();
        users.add(user("ada@example.com")).unwrap();
        users.add(user("grace@example.com")).unwrap();

        let reloaded = UserRepository::open(&path).unwrap();
        assert_eq!(reloaded.all(), users.all());
    }

    #[test]
    fn test_find_is_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        let mut users =
            UserRepository::open(dir.path().join("users.txt")).unwrap();
        users.add(user("Ada@Example.com")).unwrap();

        assert!(users.find_by_email("ada@example.com").is_some());
        assert!(users.find_by_email("grace@example.com").is_none());
    }
}
