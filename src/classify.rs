//! Rule-based condition classifier.
//!
//! Classification is a pure mapping from a count of reported problems to a
//! [`Verdict`]; persistence of the outcome belongs to the assessment
//! service. Two rule profiles exist because the original deployments
//! evolved two divergent tables; a custom ordered threshold table can also
//! be supplied through [`RuleTable::Thresholds`].

use crate::machine::Condition;

/// Outcome of classifying a set of reported problems.
#[derive(Clone, Debug, PartialEq)]
pub struct Verdict {
    pub condition: Condition,
    /// Free-text recovery estimate, e.g. "7 days".
    pub recovery_estimate: String,
    /// Operator guidance displayed alongside the result.
    pub guidance: String,
}

/// One threshold → outcome mapping.
#[derive(Clone, Debug, PartialEq)]
pub struct ThresholdRule {
    /// Minimum number of reported problems for this rule to apply.
    pub min_problems: u32,
    pub condition: Condition,
    pub recovery_estimate: &'static str,
    pub guidance: &'static str,
}

/// Ordered rule table mapping a problem count to a [`Verdict`].
#[derive(Clone, Debug, PartialEq)]
pub enum RuleTable {
    /// Fixed thresholds; the first rule whose minimum is reached wins, so
    /// rules must be ordered by descending `min_problems`.
    Thresholds(Vec<ThresholdRule>),
    /// Compare the problem count against the total number of checks.
    FractionOfTotal,
}

const FULLY_FUNCTIONAL: &str = "Fully Functional, no maintenance needed.";

impl RuleTable {
    /// Fixed-threshold profile.
    pub fn thresholds() -> Self {
        RuleTable::Thresholds(vec![
            ThresholdRule {
                min_problems: 4,
                condition: Condition::OutOfOrder,
                recovery_estimate: "14 days",
                guidance: "Critical issues detected. Machine must be taken \
                           out of service immediately. Contact maintenance \
                           team for a complete overhaul.",
            },
            ThresholdRule {
                min_problems: 2,
                condition: Condition::UnderMaintenance,
                recovery_estimate: "7 days",
                guidance: "Significant issues detected. Schedule \
                           maintenance within 48 hours. Reduce operational \
                           load until repairs are completed.",
            },
            ThresholdRule {
                min_problems: 1,
                condition: Condition::OperationalWithCaution,
                recovery_estimate: "3 days",
                guidance: "Minor issues detected. Machine can remain \
                           operational but schedule maintenance within the \
                           week. Monitor the identified problems closely.",
            },
        ])
    }

    /// Fraction-of-total profile.
    pub fn fraction_of_total() -> Self {
        RuleTable::FractionOfTotal
    }

    /// Classify `problems` reported issues out of `total` checks.
    pub fn classify(&self, problems: u32, total: u32) -> Verdict {
        match self {
            RuleTable::Thresholds(rules) => rules
                .iter()
                .find(|rule| problems >= rule.min_problems)
                .map(|rule| Verdict {
                    condition: rule.condition,
                    recovery_estimate: rule.recovery_estimate.to_owned(),
                    guidance: rule.guidance.to_owned(),
                })
                .unwrap_or_else(operational_verdict),
            RuleTable::FractionOfTotal => {
                if problems == 0 {
                    operational_verdict()
                } else if problems >= total {
                    Verdict {
                        condition: Condition::Critical,
                        recovery_estimate: "4 weeks".into(),
                        guidance: "Every check failed. Take the machine \
                                   out of service and request a full \
                                   technician overhaul."
                            .into(),
                    }
                } else {
                    Verdict {
                        condition: Condition::UnderMaintenance,
                        recovery_estimate: "2 Weeks".into(),
                        guidance: "Some checks failed. Schedule \
                                   maintenance and reduce operational load \
                                   until repairs are completed."
                            .into(),
                    }
                }
            },
        }
    }
}

fn operational_verdict() -> Verdict {
    Verdict {
        condition: Condition::Operational,
        recovery_estimate: FULLY_FUNCTIONAL.into(),
        guidance: "No problems reported.".into(),
    }
}

/// Known problem checks per equipment kind and sub-type.
///
/// The list drives the assessment checkboxes in the UI layer; its length
/// is the `total` passed to [`RuleTable::classify`].
pub fn problem_catalog(kind: &str, sub_type: &str) -> Vec<&'static str> {
    let mut problems = Vec::new();

    if kind.eq_ignore_ascii_case("hydraulic") {
        problems.extend([
            "Fluid Leakage",
            "Pressure Loss",
            "Overheating",
            "Unusual Noise",
            "Slow Operation",
        ]);
        if sub_type.eq_ignore_ascii_case("pump") {
            problems.extend(["Cavitation", "Bearing Failure"]);
        } else if sub_type.eq_ignore_ascii_case("valve") {
            problems.extend(["Sticking", "Contamination"]);
        } else if sub_type.eq_ignore_ascii_case("cylinder") {
            problems.extend(["Seal Damage", "Rod Bending"]);
        }
    } else if kind.eq_ignore_ascii_case("electrical") {
        problems.extend([
            "Overheating",
            "Unusual Noise",
            "Vibration",
            "Power Fluctuations",
        ]);
        if sub_type.eq_ignore_ascii_case("generator") {
            problems
                .extend(["Output Voltage Fluctuation", "Bearing Failure"]);
        } else if sub_type.eq_ignore_ascii_case("transformer") {
            problems.extend(["Insulation Breakdown", "Oil Leakage"]);
        } else if sub_type.eq_ignore_ascii_case("motor") {
            problems.extend(["Winding Damage", "Rotor Imbalance"]);
        }
    } else if kind.eq_ignore_ascii_case("mechanical") {
        problems.extend([
            "Vibration",
            "Unusual Noise",
            "Overheating",
            "Misalignment",
        ]);
        if sub_type.eq_ignore_ascii_case("engine") {
            problems.extend(["Low Compression", "Fuel System Issues"]);
        } else if sub_type.eq_ignore_ascii_case("compressor") {
            problems.extend(["Pressure Loss", "Belt Issues"]);
        } else if sub_type.eq_ignore_ascii_case("gearbox") {
            problems.extend(["Gear Tooth Wear", "Oil Contamination"]);
        }
    }

    problems
}
