//! Assignment conflict detection.
//!
//! Scans an assignment map against employee skills and reports hard
//! conflicts (an employee placed somewhere they are not qualified for)
//! and soft warnings (an employee spread over several columns or
//! entities).
//!
//! # Rules (per employee, in this order)
//!
//! 1. Each DAR column without a `DAR` or `Float` skill → skill mismatch.
//! 2. More than one DAR column → multiple-DAR warning.
//! 3. CPOE without the `CPOE` skill → skill mismatch.
//! 4. More than one new-incoming/cross-training entity combined →
//!    multiple-entity warning. DAR columns do not count here.
//!
//! Employees are visited in assignment-map order; no further sorting is
//! applied. Assignments for unknown employees are skipped.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::models::{find_employee, AssignmentMap, DarEntities, Employee, EntityField, Skill};

/// Skills that satisfy a DAR column when checking an existing assignment.
pub const DAR_CONFLICT_SKILLS: [Skill; 2] = [Skill::Dar, Skill::Float];

/// How serious a reported issue is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational only.
    Info,
    /// Worth a supervisor's attention.
    Warning,
    /// The assignment is not legal.
    Error,
}

/// The assignment field a conflict refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConflictField {
    /// DAR columns.
    Dars,
    /// CPOE.
    Cpoe,
}

/// Classification of conflicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    /// Employee lacks the skill the assignment requires.
    SkillMismatch,
}

/// An illegal assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conflict {
    /// Conflict category.
    #[serde(rename = "type")]
    pub kind: ConflictKind,
    /// Always [`Severity::Error`].
    pub severity: Severity,
    /// Affected employee.
    pub employee_id: String,
    /// Affected employee's display name.
    pub employee_name: String,
    /// Offending field.
    pub field: ConflictField,
    /// Offending DAR column (0-based), for DAR conflicts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dar_index: Option<usize>,
    /// Human-readable description.
    pub message: String,
}

/// One entity held by an employee, tagged by field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityAssignment {
    /// Field holding the entity.
    pub field: EntityField,
    /// Entity name.
    pub entity: String,
}

/// Classification of warnings, with their context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WarningKind {
    /// Employee holds several DAR columns.
    MultipleDars {
        /// Number of DAR columns.
        count: usize,
    },
    /// Employee holds several new-incoming/cross-training entities.
    MultipleEntities {
        /// Number of entities across both fields.
        count: usize,
        /// Every entity, in field order.
        entities: Vec<EntityAssignment>,
    },
}

/// A legal but questionable assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Warning {
    /// Warning category and context.
    #[serde(flatten)]
    pub kind: WarningKind,
    /// Always [`Severity::Warning`].
    pub severity: Severity,
    /// Affected employee.
    pub employee_id: String,
    /// Affected employee's display name.
    pub employee_name: String,
    /// Human-readable description.
    pub message: String,
}

/// Conflicts and warnings for an assignment map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConflictReport {
    /// Hard conflicts.
    pub conflicts: Vec<Conflict>,
    /// Soft warnings.
    pub warnings: Vec<Warning>,
}

impl Conflict {
    /// Creates a DAR skill mismatch.
    pub fn dar_skill_mismatch(employee: &Employee, dar_index: usize) -> Self {
        let name = employee.display_name();
        Self {
            kind: ConflictKind::SkillMismatch,
            severity: Severity::Error,
            employee_id: employee.id.clone(),
            employee_name: name.to_string(),
            field: ConflictField::Dars,
            dar_index: Some(dar_index),
            message: format!(
                "{name} is assigned to DAR {} but does not have the DAR or Float skill",
                dar_index + 1
            ),
        }
    }

    /// Creates a CPOE skill mismatch.
    pub fn cpoe_skill_mismatch(employee: &Employee) -> Self {
        let name = employee.display_name();
        Self {
            kind: ConflictKind::SkillMismatch,
            severity: Severity::Error,
            employee_id: employee.id.clone(),
            employee_name: name.to_string(),
            field: ConflictField::Cpoe,
            dar_index: None,
            message: format!("{name} is assigned to CPOE but does not have the CPOE skill"),
        }
    }
}

impl Warning {
    /// Creates a multiple-DAR warning.
    pub fn multiple_dars(employee: &Employee, count: usize) -> Self {
        let name = employee.display_name();
        Self {
            kind: WarningKind::MultipleDars { count },
            severity: Severity::Warning,
            employee_id: employee.id.clone(),
            employee_name: name.to_string(),
            message: format!("{name} is assigned to {count} DAR columns"),
        }
    }

    /// Creates a multiple-entity warning.
    pub fn multiple_entities(employee: &Employee, entities: Vec<EntityAssignment>) -> Self {
        let name = employee.display_name();
        let count = entities.len();
        let names = entities
            .iter()
            .map(|e| e.entity.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        Self {
            kind: WarningKind::MultipleEntities { count, entities },
            severity: Severity::Warning,
            employee_id: employee.id.clone(),
            employee_name: name.to_string(),
            message: format!("{name} is assigned to {count} entities: {names}"),
        }
    }

    /// Count carried by the warning.
    pub fn count(&self) -> usize {
        match &self.kind {
            WarningKind::MultipleDars { count } | WarningKind::MultipleEntities { count, .. } => {
                *count
            }
        }
    }
}

impl ConflictReport {
    /// Whether any conflict or warning was found.
    pub fn has_issues(&self) -> bool {
        !self.conflicts.is_empty() || !self.warnings.is_empty()
    }

    /// Total number of conflicts and warnings.
    pub fn issue_count(&self) -> usize {
        self.conflicts.len() + self.warnings.len()
    }

    /// Conflicts for one employee.
    pub fn conflicts_for(&self, employee_id: &str) -> Vec<&Conflict> {
        self.conflicts
            .iter()
            .filter(|c| c.employee_id == employee_id)
            .collect()
    }

    /// Warnings for one employee.
    pub fn warnings_for(&self, employee_id: &str) -> Vec<&Warning> {
        self.warnings
            .iter()
            .filter(|w| w.employee_id == employee_id)
            .collect()
    }
}

/// Detects skill conflicts and spread warnings.
///
/// Never fails: empty inputs produce an empty report.
#[instrument(level = "debug", skip_all, fields(assignments = assignments.len()))]
pub fn detect_conflicts(
    assignments: &AssignmentMap,
    employees: &[Employee],
    _dar_entities: &DarEntities,
) -> ConflictReport {
    let mut report = ConflictReport::default();

    for (employee_id, assignment) in assignments {
        let Some(employee) = find_employee(employees, employee_id) else {
            continue;
        };

        if !employee.has_any_skill(&DAR_CONFLICT_SKILLS) {
            for &dar_index in &assignment.dars {
                report
                    .conflicts
                    .push(Conflict::dar_skill_mismatch(employee, dar_index));
            }
        }

        if assignment.dars.len() > 1 {
            report
                .warnings
                .push(Warning::multiple_dars(employee, assignment.dars.len()));
        }

        if assignment.cpoe && !employee.has_skill(Skill::Cpoe) {
            report.conflicts.push(Conflict::cpoe_skill_mismatch(employee));
        }

        let entities: Vec<EntityAssignment> = assignment
            .tagged_entities()
            .map(|(field, name)| EntityAssignment {
                field,
                entity: name.to_string(),
            })
            .collect();
        if entities.len() > 1 {
            report
                .warnings
                .push(Warning::multiple_entities(employee, entities));
        }
    }

    debug!(
        conflicts = report.conflicts.len(),
        warnings = report.warnings.len(),
        "conflict scan complete"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Assignment;

    fn no_dar_entities() -> DarEntities {
        DarEntities::new()
    }

    fn map(entries: Vec<(&str, Assignment)>) -> AssignmentMap {
        entries
            .into_iter()
            .map(|(id, a)| (id.to_string(), a))
            .collect()
    }

    #[test]
    fn test_unskilled_employee_gets_one_conflict_per_dar_plus_cpoe() {
        let employees = vec![Employee::new("E1").with_name("Ada")];
        let assignments = map(vec![(
            "E1",
            Assignment::new()
                .with_dar(0)
                .with_dar(2)
                .with_dar(4)
                .with_cpoe(true),
        )]);

        let report = detect_conflicts(&assignments, &employees, &no_dar_entities());
        assert_eq!(report.conflicts.len(), 4);
        assert!(report
            .conflicts
            .iter()
            .all(|c| c.kind == ConflictKind::SkillMismatch && c.severity == Severity::Error));
        assert_eq!(
            report.conflicts.iter().filter(|c| c.field == ConflictField::Dars).count(),
            3
        );
        assert_eq!(report.conflicts[0].dar_index, Some(0));
        assert!(report.conflicts[1].message.contains("DAR 3"));
        assert_eq!(report.conflicts[3].field, ConflictField::Cpoe);
        assert!(report.has_issues());
    }

    #[test]
    fn test_float_skill_satisfies_dar_in_conflict_check() {
        let employees = vec![Employee::new("E1").with_skill(Skill::Float)];
        let assignments = map(vec![("E1", Assignment::new().with_dar(0).with_dar(1))]);

        let report = detect_conflicts(&assignments, &employees, &no_dar_entities());
        assert!(report.conflicts.is_empty());
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_trace_skill_does_not_satisfy_dar_in_conflict_check() {
        // Bulk assignment accepts Trace for DAR; the conflict check does not.
        let employees = vec![Employee::new("E1").with_skill(Skill::Trace)];
        let assignments = map(vec![("E1", Assignment::new().with_dar(0))]);

        let report = detect_conflicts(&assignments, &employees, &no_dar_entities());
        assert_eq!(report.conflicts.len(), 1);
        assert_eq!(report.conflicts[0].dar_index, Some(0));
    }

    #[test]
    fn test_multiple_dars_warning_independent_of_skill() {
        let qualified = Employee::new("Q").with_skill(Skill::Dar);
        let unqualified = Employee::new("U");
        let dars = Assignment::new().with_dar(0).with_dar(1).with_dar(2);
        let assignments = map(vec![("Q", dars.clone()), ("U", dars)]);

        let report =
            detect_conflicts(&assignments, &[qualified, unqualified], &no_dar_entities());
        assert_eq!(report.warnings.len(), 2);
        for w in &report.warnings {
            assert_eq!(w.kind, WarningKind::MultipleDars { count: 3 });
            assert_eq!(w.count(), 3);
            assert_eq!(w.severity, Severity::Warning);
        }
        assert_eq!(report.conflicts_for("U").len(), 3);
        assert!(report.conflicts_for("Q").is_empty());
    }

    #[test]
    fn test_multiple_entities_warning_spans_both_fields() {
        let employees = vec![Employee::new("E1").with_name("Ada")];
        let assignments = map(vec![(
            "E1",
            Assignment::new()
                .with_dar(0)
                .with_new_incoming(["North"])
                .with_cross_training(["South"]),
        )]);

        let report = detect_conflicts(&assignments, &employees, &no_dar_entities());
        let warnings = report.warnings_for("E1");
        assert_eq!(warnings.len(), 1);
        match &warnings[0].kind {
            WarningKind::MultipleEntities { count, entities } => {
                assert_eq!(*count, 2);
                assert_eq!(entities[0].field, EntityField::NewIncoming);
                assert_eq!(entities[1].field, EntityField::CrossTraining);
                assert_eq!(entities[1].entity, "South");
            }
            other => panic!("unexpected warning {other:?}"),
        }
        assert!(warnings[0].message.contains("North, South"));
    }

    #[test]
    fn test_legacy_whitespace_entity_counts_toward_warning() {
        let employees = vec![Employee::new("E1")];
        let a: Assignment =
            serde_json::from_str(r#"{"newIncoming":" ","crossTraining":["South"]}"#).unwrap();
        let assignments = map(vec![("E1", a)]);

        let report = detect_conflicts(&assignments, &employees, &no_dar_entities());
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].count(), 2);
    }

    #[test]
    fn test_single_entity_is_not_a_warning() {
        let employees = vec![Employee::new("E1")];
        let assignments = map(vec![("E1", Assignment::new().with_cross_training(["South"]))]);

        let report = detect_conflicts(&assignments, &employees, &no_dar_entities());
        assert!(!report.has_issues());
    }

    #[test]
    fn test_unknown_employee_skipped() {
        let assignments = map(vec![("ghost", Assignment::new().with_dar(0).with_cpoe(true))]);
        let report = detect_conflicts(&assignments, &[], &no_dar_entities());
        assert!(!report.has_issues());
        assert_eq!(report.issue_count(), 0);
    }

    #[test]
    fn test_empty_inputs() {
        let report = detect_conflicts(&AssignmentMap::new(), &[], &no_dar_entities());
        assert_eq!(report, ConflictReport::default());
    }

    #[test]
    fn test_order_follows_employee_id() {
        let employees = vec![Employee::new("B"), Employee::new("A")];
        let assignments = map(vec![
            ("B", Assignment::new().with_cpoe(true)),
            ("A", Assignment::new().with_cpoe(true)),
        ]);
        let report = detect_conflicts(&assignments, &employees, &no_dar_entities());
        let ids: Vec<_> = report.conflicts.iter().map(|c| c.employee_id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B"]);
    }

    #[test]
    fn test_dar_conflicts_in_ascending_column_order() {
        let employees = vec![Employee::new("E1")];
        let a: Assignment = serde_json::from_str(r#"{"dars":[2,0,2]}"#).unwrap();
        let assignments = map(vec![("E1", a)]);

        let report = detect_conflicts(&assignments, &employees, &no_dar_entities());
        let columns: Vec<_> = report.conflicts.iter().map(|c| c.dar_index).collect();
        assert_eq!(columns, vec![Some(0), Some(2)]);
        assert_eq!(report.warnings[0].count(), 2);
    }

    #[test]
    fn test_warning_serializes_with_type_tag() {
        let w = Warning::multiple_dars(&Employee::new("E1"), 2);
        let json = serde_json::to_value(&w).unwrap();
        assert_eq!(json["type"], "multiple_dars");
        assert_eq!(json["count"], 2);
        assert_eq!(json["severity"], "warning");
        assert_eq!(json["employeeId"], "E1");
    }
}
