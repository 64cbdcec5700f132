//! Assessment service.
//!
//! Turns a count of reported problems into a persisted machine condition.

use crate::classify::RuleTable;
use crate::error::{CoreError, Result};
use crate::machine::{Condition, MachineIdent, MachineRepository};

/// Result of a persisted assessment.
#[derive(Clone, Debug, PartialEq)]
pub struct Assessment {
    /// Condition after merging with the previous one.
    pub condition: Condition,
    pub recovery_estimate: String,
    pub guidance: String,
}

/// Machine assessment manager.
#[derive(Clone, Debug)]
pub struct Assessor {
    rules: RuleTable,
}

impl Assessor {
    /// Create a new [`Assessor`] using `rules`.
    pub fn new(rules: RuleTable) -> Self {
        Self { rules }
    }

    /// Assess the machine matching (`code`, `ident`, `owner`).
    ///
    /// Classifies `problems` out of `total` checks, merges the verdict
    /// with the stored condition and persists the outcome. Fails with
    /// [`CoreError::NotFound`] when the machine is not registered and with
    /// [`CoreError::NoProblemSelected`] when the threshold profile is
    /// given an empty selection.
    pub fn assess(
        &self,
        machines: &mut MachineRepository,
        code: &str,
        ident: MachineIdent,
        owner: &str,
        problems: u32,
        total: u32,
    ) -> Result<Assessment> {
        // an unregistered machine is reported before the selection check.
        let machine = machines
            .find_mut(code, ident, owner)
            .ok_or(CoreError::NotFound { entity: "machine" })?;

        if problems == 0
            && matches!(self.rules, RuleTable::Thresholds(_))
        {
            return Err(CoreError::NoProblemSelected);
        }

        let verdict = self.rules.classify(problems, total);

        let merged = machine.condition.merge(verdict.condition);
        if merged == verdict.condition {
            machine.condition = merged;
            machine.expected_recovery_time =
                verdict.recovery_estimate.clone();
        }
        // when the merge keeps the stored condition, the stored recovery
        // estimate stays with it.

        let assessment = Assessment {
            condition: machine.condition,
            recovery_estimate: machine.expected_recovery_time.clone(),
            guidance: verdict.guidance,
        };

        machines.save()?;

        tracing::info!(
            code,
            owner,
            condition = %assessment.condition,
            "machine assessed"
        );

        Ok(assessment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::Machine;

    fn repository_with_pump(
        dir: &tempfile::TempDir,
    ) -> MachineRepository {
        let mut machines =
            MachineRepository::open(dir.path().join("machines.txt"))
                .unwrap();
        machines
            .add(Machine {
                name: "Pump1".into(),
                code: "M001".into(),
                cnic: "12345-1234567-1".into(),
                model: "X1".into(),
                registration_date: chrono::NaiveDate::from_ymd_opt(
                    2024, 3, 1,
                )
                .unwrap(),
                condition: Condition::Operational,
                expected_recovery_time: String::new(),
                registered_by: "ada@example.com".into(),
            })
            .unwrap();
        machines
    }

    #[test]
    fn test_fraction_profile_escalation_scenario() {
        let dir = tempfile::tempdir().unwrap();
        let mut machines = repository_with_pump(&dir);
        let assessor = Assessor::new(RuleTable::fraction_of_total());
        let ident = MachineIdent::Cnic("12345-1234567-1");

        // 3 of 5 problems: under maintenance.
        let assessment = assessor
            .assess(&mut machines, "M001", ident, "ada@example.com", 3, 5)
            .unwrap();
        assert_eq!(assessment.condition, Condition::UnderMaintenance);
        assert_eq!(assessment.recovery_estimate, "2 Weeks");

        // 5 of 5 problems: escalates to critical.
        let assessment = assessor
            .assess(&mut machines, "M001", ident, "ada@example.com", 5, 5)
            .unwrap();
        assert_eq!(assessment.condition, Condition::Critical);
        assert_eq!(assessment.recovery_estimate, "4 weeks");

        // a clean evaluation does not clear critical.
        let assessment = assessor
            .assess(&mut machines, "M001", ident, "ada@example.com", 0, 5)
            .unwrap();
        assert_eq!(assessment.condition, Condition::Critical);
        assert_eq!(assessment.recovery_estimate, "4 weeks");

        // a partial-problem re-assessment is an explicit downgrade.
        let assessment = assessor
            .assess(&mut machines, "M001", ident, "ada@example.com", 2, 5)
            .unwrap();
        assert_eq!(assessment.condition, Condition::UnderMaintenance);
        assert_eq!(assessment.recovery_estimate, "2 Weeks");

        // push it back to critical so the reload check below sees the
        // sticky state.
        assessor
            .assess(&mut machines, "M001", ident, "ada@example.com", 5, 5)
            .unwrap();

        // the merged outcome was persisted.
        let reloaded =
            MachineRepository::open(dir.path().join("machines.txt"))
                .unwrap();
        assert_eq!(
            reloaded.all()[0].condition,
            Condition::Critical
        );
    }

    #[test]
    fn test_threshold_profile_writes_condition() {
        let dir = tempfile::tempdir().unwrap();
        let mut machines = repository_with_pump(&dir);
        let assessor = Assessor::new(RuleTable::thresholds());

        let assessment = assessor
            .assess(
                &mut machines,
                "M001",
                MachineIdent::Name("Pump1"),
                "ada@example.com",
                4,
                7,
            )
            .unwrap();
        assert_eq!(assessment.condition, Condition::OutOfOrder);
        assert_eq!(assessment.recovery_estimate, "14 days");
        assert!(assessment.guidance.contains("out of service"));
    }

    #[test]
    fn test_threshold_profile_rejects_empty_selection() {
        let dir = tempfile::tempdir().unwrap();
        let mut machines = repository_with_pump(&dir);
        let assessor = Assessor::new(RuleTable::thresholds());

        let err = assessor
            .assess(
                &mut machines,
                "M001",
                MachineIdent::Cnic("12345-1234567-1"),
                "ada@example.com",
                0,
                7,
            )
            .unwrap_err();
        assert!(matches!(err, CoreError::NoProblemSelected));
        assert_eq!(machines.all()[0].condition, Condition::Operational);
    }

    #[test]
    fn test_unknown_machine_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut machines = repository_with_pump(&dir);
        let assessor = Assessor::new(RuleTable::fraction_of_total());

        let err = assessor
            .assess(
                &mut machines,
                "M002",
                MachineIdent::Cnic("12345-1234567-1"),
                "ada@example.com",
                2,
                5,
            )
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::NotFound { entity: "machine" }
        ));
    }

    #[test]
    fn test_unknown_machine_reported_before_empty_selection() {
        let dir = tempfile::tempdir().unwrap();
        let mut machines = repository_with_pump(&dir);
        let assessor = Assessor::new(RuleTable::thresholds());

        // both failures apply; the missing machine wins.
        let err = assessor
            .assess(
                &mut machines,
                "M999",
                MachineIdent::Cnic("12345-1234567-1"),
                "ada@example.com",
                0,
                7,
            )
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::NotFound { entity: "machine" }
        ));
    }
}
