//! Schedule draft model.
//!
//! A draft is the persisted bundle a host stores for one schedule period:
//! the assignment map, the DAR column entity configuration, and the number
//! of DAR columns. The crate defines only its in-memory shape.

use serde::{Deserialize, Serialize};

use super::{Assignment, AssignmentMap, DarEntities};

/// Smallest supported number of DAR columns.
pub const MIN_DAR_COUNT: usize = 3;
/// Largest supported number of DAR columns.
pub const MAX_DAR_COUNT: usize = 8;
/// DAR column count for a freshly created schedule.
pub const DEFAULT_DAR_COUNT: usize = 4;

/// Assignments plus DAR configuration for one schedule period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDraft {
    /// Employee ID → assignment.
    #[serde(default)]
    pub assignments: AssignmentMap,
    /// DAR column index → entity names.
    #[serde(default)]
    pub dar_entities: DarEntities,
    /// Number of DAR columns (3..=8).
    #[serde(default = "default_dar_count")]
    pub dar_count: usize,
}

fn default_dar_count() -> usize {
    DEFAULT_DAR_COUNT
}

impl Default for ScheduleDraft {
    fn default() -> Self {
        Self {
            assignments: AssignmentMap::new(),
            dar_entities: DarEntities::new(),
            dar_count: DEFAULT_DAR_COUNT,
        }
    }
}

impl ScheduleDraft {
    /// Creates an empty draft with the default DAR column count.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the DAR column count.
    pub fn with_dar_count(mut self, dar_count: usize) -> Self {
        self.dar_count = dar_count;
        self
    }

    /// Binds entity names to a DAR column.
    pub fn with_dar_entities<I, S>(mut self, dar_index: usize, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dar_entities
            .insert(dar_index, names.into_iter().map(Into::into).collect());
        self
    }

    /// Sets one employee's assignment.
    pub fn with_assignment(mut self, employee_id: impl Into<String>, assignment: Assignment) -> Self {
        self.assignments.insert(employee_id.into(), assignment);
        self
    }

    /// Whether a DAR column index exists in this draft.
    pub fn is_valid_dar_index(&self, dar_index: usize) -> bool {
        dar_index < self.dar_count
    }

    /// Assignment for an employee, if any.
    pub fn assignment_for(&self, employee_id: &str) -> Option<&Assignment> {
        self.assignments.get(employee_id)
    }

    /// Employees assigned to a DAR column, in ID order.
    pub fn employees_on_dar(&self, dar_index: usize) -> Vec<&str> {
        self.assignments
            .iter()
            .filter(|(_, a)| a.dars.contains(&dar_index))
            .map(|(id, _)| id.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_defaults() {
        let d = ScheduleDraft::new();
        assert_eq!(d.dar_count, DEFAULT_DAR_COUNT);
        assert!(d.assignments.is_empty());
        assert!(d.is_valid_dar_index(3));
        assert!(!d.is_valid_dar_index(4));
    }

    #[test]
    fn test_employees_on_dar() {
        let d = ScheduleDraft::new()
            .with_assignment("B", Assignment::new().with_dar(0))
            .with_assignment("A", Assignment::new().with_dar(0).with_dar(2))
            .with_assignment("C", Assignment::new().with_dar(1));
        assert_eq!(d.employees_on_dar(0), vec!["A", "B"]);
        assert_eq!(d.employees_on_dar(3), Vec::<&str>::new());
        assert!(d.assignment_for("C").is_some());
    }

    #[test]
    fn test_deserialize_draft() {
        let d: ScheduleDraft = serde_json::from_str(
            r#"{"assignments":{"E1":{"dars":[0]}},"darEntities":{"0":["North"],"2":[]}}"#,
        )
        .unwrap();
        assert_eq!(d.dar_count, DEFAULT_DAR_COUNT);
        assert_eq!(d.dar_entities[&0], vec!["North".to_string()]);
        assert!(d.dar_entities[&2].is_empty());
        assert!(d.assignments["E1"].dars.contains(&0));
    }
}
