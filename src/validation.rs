//! Input validation for loaded schedules.
//!
//! Checks structural integrity of the roster, the entity list, and a
//! schedule draft at the loading boundary. Analysis functions tolerate
//! all of these problems; validation exists so a host can surface them.
//! Detects:
//! - Duplicate employee IDs
//! - Duplicate entity names (availability keys on names)
//! - DAR column counts outside 3..=8
//! - DAR columns past the configured count
//! - Assignments naming unknown entities or employees

use std::collections::HashSet;

use crate::models::{Employee, Entity, ScheduleDraft, MAX_DAR_COUNT, MIN_DAR_COUNT};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two employees share an ID.
    DuplicateEmployeeId,
    /// Two entities share a name.
    DuplicateEntityName,
    /// DAR column count outside the supported range.
    InvalidDarCount,
    /// A DAR column index at or past the column count.
    DarIndexOutOfRange,
    /// A name that matches no entity.
    UnknownEntity,
    /// An assignment for an employee not in the roster.
    UnknownEmployee,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a roster, entity list, and draft together.
///
/// Checks:
/// 1. No duplicate employee IDs
/// 2. No duplicate entity names
/// 3. `dar_count` within 3..=8
/// 4. DAR entity columns and assigned DAR indices below `dar_count`
/// 5. Every entity name in DAR columns and assignments exists
/// 6. Every assignment belongs to a known employee
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(
    employees: &[Employee],
    entities: &[Entity],
    draft: &ScheduleDraft,
) -> ValidationResult {
    let mut errors = Vec::new();

    let mut employee_ids = HashSet::new();
    for e in employees {
        if !employee_ids.insert(e.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateEmployeeId,
                format!("Duplicate employee ID: {}", e.id),
            ));
        }
    }

    let mut entity_names = HashSet::new();
    for e in entities {
        if !entity_names.insert(e.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateEntityName,
                format!("Duplicate entity name: {}", e.name),
            ));
        }
    }

    if !(MIN_DAR_COUNT..=MAX_DAR_COUNT).contains(&draft.dar_count) {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidDarCount,
            format!(
                "DAR column count {} is outside {MIN_DAR_COUNT}..={MAX_DAR_COUNT}",
                draft.dar_count
            ),
        ));
    }

    // DAR column configuration
    for (&index, names) in &draft.dar_entities {
        if !draft.is_valid_dar_index(index) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DarIndexOutOfRange,
                format!("Entities bound to DAR {} but schedule has {} columns", index + 1, draft.dar_count),
            ));
        }
        for name in names {
            if !entity_names.contains(name.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownEntity,
                    format!("DAR {} references unknown entity '{name}'", index + 1),
                ));
            }
        }
    }

    // Assignments
    for (employee_id, assignment) in &draft.assignments {
        if !employee_ids.contains(employee_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownEmployee,
                format!("Assignment for unknown employee '{employee_id}'"),
            ));
        }
        for &index in &assignment.dars {
            if !draft.is_valid_dar_index(index) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DarIndexOutOfRange,
                    format!(
                        "Employee '{employee_id}' is assigned to DAR {} but schedule has {} columns",
                        index + 1,
                        draft.dar_count
                    ),
                ));
            }
        }
        for (field, name) in assignment.tagged_entities() {
            if !entity_names.contains(name) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownEntity,
                    format!(
                        "Employee '{employee_id}' {} references unknown entity '{name}'",
                        field.label()
                    ),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
