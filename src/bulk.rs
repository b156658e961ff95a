//! Bulk assignment validation and application.
//!
//! A bulk assignment applies one assignment type to many selected
//! employees at once. Each employee is validated independently and lands
//! in exactly one of the two result lists, so a preview can show both the
//! employees that will change and the ones that will be skipped.
//!
//! # Eligibility
//!
//! | Type | Requirement |
//! |------|-------------|
//! | `dar` | `DAR` or `Trace` skill, and a DAR column chosen |
//! | `cpoe` | `CPOE` skill |
//! | `newIncoming`, `crossTraining`, `specialProjects` | at least one entity chosen for the batch |
//!
//! The DAR rule here accepts `Trace` and not `Float`, unlike
//! [`crate::analysis::detect_conflicts`] which accepts `Float` and not
//! `Trace`. Both rules are kept as they are.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

use crate::models::{find_employee, AssignmentMap, Employee, EntityField, Skill, SpecialProjects};

/// Skills that qualify an employee for a bulk DAR assignment.
pub const DAR_BULK_SKILLS: [Skill; 2] = [Skill::Dar, Skill::Trace];

/// Assignment type applied by a bulk operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BulkAssignmentType {
    /// Add a DAR column.
    Dar,
    /// Set CPOE.
    Cpoe,
    /// Replace new-incoming entities.
    NewIncoming,
    /// Replace cross-training entities.
    CrossTraining,
    /// Replace special projects.
    SpecialProjects,
}

impl BulkAssignmentType {
    /// Whether this type takes the batch's entity selection.
    pub fn uses_entities(self) -> bool {
        matches!(
            self,
            BulkAssignmentType::NewIncoming
                | BulkAssignmentType::CrossTraining
                | BulkAssignmentType::SpecialProjects
        )
    }
}

/// Parameters of one bulk operation, shared by every selected employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkAssignmentRequest {
    /// What to assign.
    #[serde(rename = "type")]
    pub assignment_type: BulkAssignmentType,
    /// Target DAR column for `dar`.
    #[serde(default)]
    pub dar_index: Option<usize>,
    /// Entity names for the entity-bearing types.
    #[serde(default)]
    pub entities: Vec<String>,
}

impl BulkAssignmentRequest {
    /// Creates a request with no parameters.
    pub fn new(assignment_type: BulkAssignmentType) -> Self {
        Self {
            assignment_type,
            dar_index: None,
            entities: Vec::new(),
        }
    }

    /// Assigns a DAR column.
    pub fn dar(dar_index: usize) -> Self {
        Self::new(BulkAssignmentType::Dar).with_dar_index(dar_index)
    }

    /// Assigns CPOE.
    pub fn cpoe() -> Self {
        Self::new(BulkAssignmentType::Cpoe)
    }

    /// Assigns entities to one of the entity-bearing types.
    pub fn entities<I, S>(assignment_type: BulkAssignmentType, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(assignment_type).with_entities(names)
    }

    /// Sets the DAR column.
    pub fn with_dar_index(mut self, dar_index: usize) -> Self {
        self.dar_index = Some(dar_index);
        self
    }

    /// Sets the entity selection.
    pub fn with_entities<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entities = names.into_iter().map(Into::into).collect();
        self
    }
}

/// An employee the batch will update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkAssignmentSuccess {
    /// Employee ID.
    pub employee_id: String,
    /// Display name.
    pub employee_name: String,
    /// Assignment type.
    #[serde(rename = "type")]
    pub assignment_type: BulkAssignmentType,
    /// DAR column for `dar`.
    pub dar_index: Option<usize>,
    /// Entity names for the entity-bearing types.
    pub entities: Vec<String>,
}

/// An employee the batch will skip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkAssignmentFailure {
    /// Employee ID.
    pub employee_id: String,
    /// Display name (the ID when the employee is unknown).
    pub employee_name: String,
    /// Why the employee is not eligible.
    pub reason: String,
}

/// Partition of the selected employees.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkAssignmentOutcome {
    /// Eligible employees.
    pub successful: Vec<BulkAssignmentSuccess>,
    /// Ineligible employees.
    pub failed: Vec<BulkAssignmentFailure>,
}

impl BulkAssignmentOutcome {
    /// Number of employees covered.
    pub fn len(&self) -> usize {
        self.successful.len() + self.failed.len()
    }

    /// Whether no employee was selected.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether applying the outcome would change anything.
    pub fn has_changes(&self) -> bool {
        !self.successful.is_empty()
    }

    /// Merges the successful records into a copy of `assignments`.
    ///
    /// - `dar` adds the column (no-op when already present)
    /// - `cpoe` sets the flag
    /// - entity types overwrite the field with the batch's entities
    pub fn apply_to(&self, assignments: &AssignmentMap) -> AssignmentMap {
        let mut next = assignments.clone();
        for success in &self.successful {
            let assignment = next.entry(success.employee_id.clone()).or_default();
            match success.assignment_type {
                BulkAssignmentType::Dar => {
                    if let Some(dar_index) = success.dar_index {
                        assignment.dars.insert(dar_index);
                    }
                }
                BulkAssignmentType::Cpoe => assignment.cpoe = true,
                BulkAssignmentType::NewIncoming => {
                    *assignment.entities_mut(EntityField::NewIncoming) = success.entities.clone();
                }
                BulkAssignmentType::CrossTraining => {
                    *assignment.entities_mut(EntityField::CrossTraining) = success.entities.clone();
                }
                BulkAssignmentType::SpecialProjects => {
                    assignment.special_projects =
                        Some(SpecialProjects::List(success.entities.clone()));
                }
            }
        }
        next
    }
}

/// Validates a bulk assignment for every selected employee.
///
/// `successful.len() + failed.len() == selected.len()` always holds.
/// Unknown employee IDs fail with "Employee not found".
pub fn validate_bulk_assignment(
    selected: &BTreeSet<String>,
    employees: &[Employee],
    request: &BulkAssignmentRequest,
) -> BulkAssignmentOutcome {
    let mut outcome = BulkAssignmentOutcome::default();

    for employee_id in selected {
        let Some(employee) = find_employee(employees, employee_id) else {
            outcome.failed.push(BulkAssignmentFailure {
                employee_id: employee_id.clone(),
                employee_name: employee_id.clone(),
                reason: "Employee not found".to_string(),
            });
            continue;
        };

        match ineligibility(employee, request) {
            Some(reason) => outcome.failed.push(BulkAssignmentFailure {
                employee_id: employee.id.clone(),
                employee_name: employee.display_name().to_string(),
                reason: reason.to_string(),
            }),
            None => outcome.successful.push(BulkAssignmentSuccess {
                employee_id: employee.id.clone(),
                employee_name: employee.display_name().to_string(),
                assignment_type: request.assignment_type,
                dar_index: match request.assignment_type {
                    BulkAssignmentType::Dar => request.dar_index,
                    _ => None,
                },
                entities: if request.assignment_type.uses_entities() {
                    request.entities.clone()
                } else {
                    Vec::new()
                },
            }),
        }
    }

    debug!(
        assignment_type = ?request.assignment_type,
        successful = outcome.successful.len(),
        failed = outcome.failed.len(),
        "bulk assignment validated"
    );
    outcome
}

fn ineligibility(employee: &Employee, request: &BulkAssignmentRequest) -> Option<&'static str> {
    match request.assignment_type {
        BulkAssignmentType::Dar if request.dar_index.is_none() => Some("No DAR column selected"),
        BulkAssignmentType::Dar if !employee.has_any_skill(&DAR_BULK_SKILLS) => {
            Some("Missing DAR or Trace skill")
        }
        BulkAssignmentType::Cpoe if !employee.has_skill(Skill::Cpoe) => Some("Missing CPOE skill"),
        t if t.uses_entities() && request.entities.is_empty() => Some("No entities selected"),
        _ => None,
    }
}
