//! Handle technician part-selection requests.
//!
//! An earlier implementation swallowed persistence failures here and
//! reported success anyway; failures now propagate to the caller.

use std::path::PathBuf;

use crate::error::Result;
use crate::selection::Selection;
use crate::store::FlatFile;

#[derive(Debug)]
pub struct SelectionRepository {
    file: FlatFile<Selection>,
}

impl SelectionRepository {
    /// Open a [`SelectionRepository`] backed by the file at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            file: FlatFile::open(path)?,
        })
    }

    /// Record the selected parts for `machine_code`, replacing any
    /// previous selection, and persist immediately.
    pub fn set(
        &mut self,
        machine_code: &str,
        part_names: Vec<String>,
    ) -> Result<()> {
        if let Some(selection) = self.file.find_mut(|selection| {
            selection.machine_code.eq_ignore_ascii_case(machine_code)
        }) {
            selection.part_names = part_names;
            return self.file.save();
        }

        self.file.push(Selection {
            machine_code: machine_code.to_owned(),
            part_names,
        })
    }

    /// Selected part names for `machine_code`, if any were recorded.
    pub fn parts_for(&self, machine_code: &str) -> Option<&[String]> {
        self.file
            .find(|selection| {
                selection.machine_code.eq_ignore_ascii_case(machine_code)
            })
            .map(|selection| selection.part_names.as_slice())
    }

    pub fn all(&self) -> &[Selection] {
        self.file.records()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_replace() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("selections.txt");

        let mut selections = SelectionRepository::open(&path).unwrap();
        selections
            .set("M001", vec!["O-Ring".into(), "Seal Kit".into()])
            .unwrap();
        selections.set("M002", vec!["Fuse".into()]).unwrap();

        assert_eq!(
            selections.parts_for("m001").unwrap(),
            ["O-Ring".to_owned(), "Seal Kit".to_owned()]
        );

        // replacing keeps one record per machine.
        selections.set("M001", vec!["Belt".into()]).unwrap();
        assert_eq!(selections.all().len(), 2);
        assert_eq!(
            selections.parts_for("M001").unwrap(),
            ["Belt".to_owned()]
        );

        let reloaded = SelectionRepository::open(&path).unwrap();
        assert_eq!(reloaded.all(), selections.all());
    }

    #[test]
    fn test_unknown_machine_has_no_selection() {
        let dir = tempfile::tempdir().unwrap();
        let selections =
            SelectionRepository::open(dir.path().join("selections.txt"))
                .unwrap();
        assert!(selections.parts_for("M009").is_none());
    }
}
