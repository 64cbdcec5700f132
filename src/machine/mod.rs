mod repository;
mod service;

pub use repository::*;
pub use service::*;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::store::Record;

/// Operability classification of a [`Machine`].
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize,
)]
pub enum Condition {
    #[default]
    Operational,
    OperationalWithCaution,
    UnderMaintenance,
    OutOfOrder,
    Critical,
}

impl Condition {
    /// Combine a stored condition with a freshly evaluated one.
    ///
    /// Under Maintenance followed by Critical escalates; Critical followed
    /// by Under Maintenance downgrades (a technician reporting fewer
    /// problems after partial repair). A zero-problem Operational verdict
    /// never clears Critical on its own: recovering from Critical requires
    /// an evaluation that lands on Under Maintenance first.
    pub fn merge(self, evaluated: Condition) -> Condition {
        match (self, evaluated) {
            (Condition::UnderMaintenance, Condition::Critical) => {
                Condition::Critical
            },
            (Condition::Critical, Condition::UnderMaintenance) => {
                Condition::UnderMaintenance
            },
            (Condition::Critical, _) => Condition::Critical,
            (_, evaluated) => evaluated,
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let label = match self {
            Condition::Operational => "Operational",
            Condition::OperationalWithCaution => "Operational with Caution",
            Condition::UnderMaintenance => "Under Maintenance",
            Condition::OutOfOrder => "Out of Order",
            Condition::Critical => "Critical",
        };
        write!(f, "{label}")
    }
}

impl std::str::FromStr for Condition {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        let condition = match s.to_ascii_lowercase().as_str() {
            "operational" => Condition::Operational,
            "operational with caution" => Condition::OperationalWithCaution,
            "under maintenance" => Condition::UnderMaintenance,
            "out of order" => Condition::OutOfOrder,
            "critical" => Condition::Critical,
            _ => {
                return Err(CoreError::Parse {
                    what: "condition",
                    value: s.to_owned(),
                });
            },
        };
        Ok(condition)
    }
}

/// Machine as saved on the machines file.
///
/// Machines are registered once and never deleted; assessment mutates
/// `condition` and `expected_recovery_time` only.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Machine {
    pub name: String,
    pub code: String,
    pub cnic: String,
    pub model: String,
    pub registration_date: chrono::NaiveDate,
    pub condition: Condition,
    /// Free-text estimate, e.g. "7 days" or "2 Weeks".
    pub expected_recovery_time: String,
    /// Email of the owning account.
    pub registered_by: String,
}

impl Record for Machine {
    const FIELDS: usize = 8;

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.code.clone(),
            self.cnic.clone(),
            self.model.clone(),
            self.registration_date.format("%Y-%m-%d").to_string(),
            self.condition.to_string(),
            self.expected_recovery_time.clone(),
            self.registered_by.clone(),
        ]
    }

    fn from_fields(fields: &[String]) -> Result<Self> {
        let registration_date =
            chrono::NaiveDate::parse_from_str(&fields[4], "%Y-%m-%d")
                .map_err(|_| CoreError::Parse {
                    what: "registration date",
                    value: fields[4].clone(),
                })?;

        Ok(Self {
            name: fields[0].clone(),
            code: fields[1].clone(),
            cnic: fields[2].clone(),
            model: fields[3].clone(),
            registration_date,
            condition: fields[5].parse()?,
            expected_recovery_time: fields[6].clone(),
            registered_by: fields[7].clone(),
        })
    }
}
