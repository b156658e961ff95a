//! Schedule editing session.
//!
//! [`ScheduleEditor`] is what an editable grid talks to. It owns the
//! assignment map inside an [`UndoRedoManager`], so every setter is one
//! undo step, and it exposes the analyses and pickers computed against
//! the current state.
//!
//! DAR column configuration (`dar_entities`, `dar_count`) belongs to the
//! schedule, not the history: changing it is not undoable.

use serde::Serialize;
use std::collections::BTreeSet;
use tracing::debug;

use crate::analysis::{detect_conflicts, ConflictReport, ImbalanceAnalyzer, ImbalanceReport};
use crate::availability::{available_entities_for_assignment, available_entities_for_dar};
use crate::bulk::{
    validate_bulk_assignment, BulkAssignmentOutcome, BulkAssignmentRequest, BulkAssignmentType,
};
use crate::config::{check_dar_count, EngineConfig};
use crate::error::ScheduleError;
use crate::history::UndoRedoManager;
use crate::models::{
    find_employee, Assignment, AssignmentMap, DarEntities, Employee, Entity, EntityField,
    ScheduleDraft, SpecialProjects,
};

/// Conflicts and workload imbalance for the current state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleAnalysis {
    /// Skill conflicts and spread warnings.
    pub conflicts: ConflictReport,
    /// Workload scores and outliers.
    pub workload: ImbalanceReport,
}

impl ScheduleAnalysis {
    /// Whether anything needs a banner.
    pub fn has_issues(&self) -> bool {
        self.conflicts.has_issues() || !self.workload.imbalances.is_empty()
    }
}

/// One editing session over a schedule draft.
#[derive(Debug, Clone)]
pub struct ScheduleEditor {
    employees: Vec<Employee>,
    entities: Vec<Entity>,
    dar_entities: DarEntities,
    dar_count: usize,
    history: UndoRedoManager<AssignmentMap>,
    analyzer: ImbalanceAnalyzer,
}

impl ScheduleEditor {
    /// Starts an empty schedule with `config.dar_count` columns.
    pub fn open_new(
        employees: Vec<Employee>,
        entities: Vec<Entity>,
        config: &EngineConfig,
    ) -> Result<Self, ScheduleError> {
        config.validate()?;
        let draft = ScheduleDraft::new().with_dar_count(config.dar_count);
        Self::open(employees, entities, draft, config)
    }

    /// Opens a stored draft for editing.
    ///
    /// The column count comes from the draft; `config.dar_count` only
    /// applies to schedules started with [`ScheduleEditor::open_new`].
    pub fn open(
        employees: Vec<Employee>,
        entities: Vec<Entity>,
        draft: ScheduleDraft,
        config: &EngineConfig,
    ) -> Result<Self, ScheduleError> {
        check_dar_count(draft.dar_count)?;
        let analyzer = ImbalanceAnalyzer::with_thresholds(config.overload_ratio, config.underload_ratio)?;

        debug!(
            employees = employees.len(),
            entities = entities.len(),
            assignments = draft.assignments.len(),
            dar_count = draft.dar_count,
            "schedule opened"
        );

        Ok(Self {
            employees,
            entities,
            dar_entities: draft.dar_entities,
            dar_count: draft.dar_count,
            history: UndoRedoManager::with_limit(draft.assignments, config.history_limit),
            analyzer,
        })
    }

    /// The current assignment map.
    pub fn assignments(&self) -> &AssignmentMap {
        self.history.current_state()
    }

    /// DAR column configuration.
    pub fn dar_entities(&self) -> &DarEntities {
        &self.dar_entities
    }

    /// Number of DAR columns.
    pub fn dar_count(&self) -> usize {
        self.dar_count
    }

    /// Roster.
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    /// Snapshot of the current state for persistence.
    pub fn to_draft(&self) -> ScheduleDraft {
        ScheduleDraft {
            assignments: self.assignments().clone(),
            dar_entities: self.dar_entities.clone(),
            dar_count: self.dar_count,
        }
    }

    // ======================== Assignment setters ========================

    /// Adds the DAR column if absent, removes it if present.
    pub fn toggle_dar(&mut self, employee_id: &str, dar_index: usize) -> Result<(), ScheduleError> {
        self.check_dar_index(dar_index)?;
        self.edit(employee_id, |a| {
            if !a.dars.remove(&dar_index) {
                a.dars.insert(dar_index);
            }
        })
    }

    /// Sets the CPOE flag.
    pub fn set_cpoe(&mut self, employee_id: &str, cpoe: bool) -> Result<(), ScheduleError> {
        self.edit(employee_id, |a| a.cpoe = cpoe)
    }

    /// Replaces one entity field.
    pub fn set_entities(
        &mut self,
        employee_id: &str,
        field: EntityField,
        names: Vec<String>,
    ) -> Result<(), ScheduleError> {
        self.edit(employee_id, |a| *a.entities_mut(field) = names)
    }

    /// Replaces special projects.
    pub fn set_special_projects(
        &mut self,
        employee_id: &str,
        projects: Option<SpecialProjects>,
    ) -> Result<(), ScheduleError> {
        self.edit(employee_id, |a| a.special_projects = projects)
    }

    /// Clears everything assigned to an employee.
    pub fn clear_assignment(&mut self, employee_id: &str) -> Result<(), ScheduleError> {
        self.edit(employee_id, |a| *a = Assignment::default())
    }

    fn edit<F>(&mut self, employee_id: &str, f: F) -> Result<(), ScheduleError>
    where
        F: FnOnce(&mut Assignment),
    {
        if find_employee(&self.employees, employee_id).is_none() {
            return Err(ScheduleError::UnknownEmployee(employee_id.to_string()));
        }
        let mut next = self.assignments().clone();
        f(next.entry(employee_id.to_string()).or_default());
        self.history.add_change(next);
        Ok(())
    }

    // ======================== Bulk assignment ========================

    /// Validates a bulk assignment against the current roster.
    pub fn preview_bulk(
        &self,
        selected: &BTreeSet<String>,
        request: &BulkAssignmentRequest,
    ) -> Result<BulkAssignmentOutcome, ScheduleError> {
        if request.assignment_type == BulkAssignmentType::Dar {
            if let Some(dar_index) = request.dar_index {
                self.check_dar_index(dar_index)?;
            }
        }
        Ok(validate_bulk_assignment(selected, &self.employees, request))
    }

    /// Applies a previewed batch as a single undo step.
    ///
    /// Returns `false` without touching history when nothing succeeded.
    pub fn apply_bulk(&mut self, outcome: &BulkAssignmentOutcome) -> bool {
        if !outcome.has_changes() {
            return false;
        }
        let next = outcome.apply_to(self.assignments());
        self.history.add_change(next);
        debug!(employees = outcome.successful.len(), "bulk assignment applied");
        true
    }

    // ======================== History ========================

    /// Steps back one edit.
    pub fn undo(&mut self) -> &AssignmentMap {
        self.history.undo()
    }

    /// Steps forward one edit.
    pub fn redo(&mut self) -> &AssignmentMap {
        self.history.redo()
    }

    /// Whether an undo step exists.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether a redo step exists.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// History manager, for stack sizes.
    pub fn history(&self) -> &UndoRedoManager<AssignmentMap> {
        &self.history
    }

    // ======================== DAR configuration ========================

    /// Binds entity names to a DAR column. Not undoable.
    pub fn set_dar_entities(&mut self, dar_index: usize, names: Vec<String>) -> Result<(), ScheduleError> {
        self.check_dar_index(dar_index)?;
        if names.is_empty() {
            self.dar_entities.remove(&dar_index);
        } else {
            self.dar_entities.insert(dar_index, names);
        }
        Ok(())
    }

    /// Changes the number of DAR columns. Not undoable.
    ///
    /// Shrinking does not rewrite existing assignments; columns past the
    /// new count show up in [`crate::validation::validate_input`].
    pub fn set_dar_count(&mut self, dar_count: usize) -> Result<(), ScheduleError> {
        check_dar_count(dar_count)?;
        self.dar_count = dar_count;
        Ok(())
    }

    fn check_dar_index(&self, dar_index: usize) -> Result<(), ScheduleError> {
        if dar_index < self.dar_count {
            Ok(())
        } else {
            Err(ScheduleError::DarIndexOutOfRange {
                index: dar_index,
                dar_count: self.dar_count,
            })
        }
    }

    // ======================== Derived views ========================

    /// Recomputes conflicts and workload for the current state.
    pub fn analyze(&self) -> ScheduleAnalysis {
        let assignments = self.assignments();
        ScheduleAnalysis {
            conflicts: detect_conflicts(assignments, &self.employees, &self.dar_entities),
            workload: self
                .analyzer
                .analyze(assignments, &self.employees, &self.dar_entities),
        }
    }

    /// Entities offered in a DAR column picker.
    pub fn dar_picker(&self, dar_index: usize) -> Vec<&Entity> {
        available_entities_for_dar(dar_index, &self.dar_entities, &self.entities)
    }

    /// Entities offered in an employee's entity picker.
    pub fn entity_picker(&self, employee_id: &str, field: EntityField) -> Vec<&Entity> {
        available_entities_for_assignment(
            employee_id,
            field,
            self.assignments(),
            &self.dar_entities,
            &self.entities,
        )
    }
}
