//! Handle machine record requests.

use std::path::PathBuf;

use crate::error::Result;
use crate::machine::Machine;
use crate::store::FlatFile;

/// Secondary identifier used alongside a machine code when searching.
///
/// One deployment of the original system keyed machines by (code, cnic,
/// owner), another by (code, name, owner); both lookups are supported.
#[derive(Clone, Copy, Debug)]
pub enum MachineIdent<'a> {
    Cnic(&'a str),
    Name(&'a str),
}

impl MachineIdent<'_> {
    fn matches(&self, machine: &Machine) -> bool {
        match self {
            MachineIdent::Cnic(cnic) => {
                machine.cnic.eq_ignore_ascii_case(cnic)
            },
            MachineIdent::Name(name) => {
                machine.name.eq_ignore_ascii_case(name)
            },
        }
    }
}

#[derive(Debug)]
pub struct MachineRepository {
    file: FlatFile<Machine>,
}

impl MachineRepository {
    /// Open a [`MachineRepository`] backed by the file at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            file: FlatFile::open(path)?,
        })
    }

    /// Register a machine and persist immediately.
    pub fn add(&mut self, machine: Machine) -> Result<()> {
        self.file.push(machine)
    }

    /// Find a machine owned by `owner`, matching `code` and `ident`.
    ///
    /// Identity fields are compared with case-insensitive exact match.
    pub fn find(
        &self,
        code: &str,
        ident: MachineIdent,
        owner: &str,
    ) -> Option<&Machine> {
        self.file.find(|machine| {
            machine.code.eq_ignore_ascii_case(code)
                && ident.matches(machine)
                && machine.registered_by.eq_ignore_ascii_case(owner)
        })
    }

    /// Mutable variant of [`MachineRepository::find`].
    ///
    /// The caller must [`MachineRepository::save`] afterwards.
    pub fn find_mut(
        &mut self,
        code: &str,
        ident: MachineIdent,
        owner: &str,
    ) -> Option<&mut Machine> {
        self.file.find_mut(|machine| {
            machine.code.eq_ignore_ascii_case(code)
                && ident.matches(machine)
                && machine.registered_by.eq_ignore_ascii_case(owner)
        })
    }

    /// All machines registered by `owner`, in registration order.
    pub fn registered_by(&self, owner: &str) -> Vec<&Machine> {
        self.file
            .find_all(|machine| {
                machine.registered_by.eq_ignore_ascii_case(owner)
            })
    }

    /// Rewrite the backing file after in-place mutation.
    pub fn save(&self) -> Result<()> {
        self.file.save()
    }

    pub fn all(&self) -> &[Machine] {
        self.file.records()
    }

    pub fn len(&self) -> usize {
        self.file.len()
    }

    pub fn is_empty(&self) -> bool {
        self.file.is_empty()
    }
}
