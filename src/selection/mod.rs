mod repository;

pub use repository::*;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::store::Record;

/// Parts a technician selected for one machine.
///
/// One record per machine code; re-selecting replaces the previous list.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub machine_code: String,
    pub part_names: Vec<String>,
}

impl Record for Selection {
    const FIELDS: usize = 2;

    fn to_fields(&self) -> Vec<String> {
        vec![self.machine_code.clone(), join_names(&self.part_names)]
    }

    fn from_fields(fields: &[String]) -> Result<Self> {
        Ok(Self {
            machine_code: fields[0].clone(),
            part_names: split_names(&fields[1]),
        })
    }
}

// Part names are comma-joined inside a single field; commas and
// backslashes inside a name are escaped so the list splits back exactly.

fn join_names(names: &[String]) -> String {
    names
        .iter()
        .map(|name| name.replace('\\', r"\\").replace(',', r"\,"))
        .collect::<Vec<_>>()
        .join(",")
}

fn split_names(joined: &str) -> Vec<String> {
    if joined.is_empty() {
        return Vec::new();
    }

    let mut names = Vec::new();
    let mut current = String::new();
    let mut chars = joined.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(escaped) => current.push(escaped),
                None => current.push('\\'),
            },
            ',' => names.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    names.push(current);

    names
}
