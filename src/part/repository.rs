//! Handle inventory part requests.

use std::path::PathBuf;

use validator::Validate;

use crate::error::{CoreError, Result};
use crate::part::Part;
use crate::store::FlatFile;

#[derive(Debug)]
pub struct PartRepository {
    file: FlatFile<Part>,
}

impl PartRepository {
    /// Open a [`PartRepository`] backed by the file at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            file: FlatFile::open(path)?,
        })
    }

    /// Insert a [`Part`], validating its fields and rejecting an
    /// already-registered name.
    pub fn add(&mut self, part: Part) -> Result<()> {
        part.validate()?;

        if self.find_by_name(&part.name).is_some() {
            return Err(CoreError::Duplicate {
                entity: "part",
                key: "name",
            });
        }
        self.file.push(part)
    }

    /// Find a part by name, case-insensitively.
    pub fn find_by_name(&self, name: &str) -> Option<&Part> {
        self.file.find(|part| part.name.eq_ignore_ascii_case(name))
    }

    /// Parts flagged as essential for machine operation.
    pub fn essentials(&self) -> Vec<&Part> {
        self.file.find_all(|part| part.is_essential)
    }

    pub fn all(&self) -> &[Part] {
        self.file.records()
    }

    pub fn len(&self) -> usize {
        self.file.len()
    }

    pub fn is_empty(&self) -> bool {
        self.file.is_empty()
    }
}
