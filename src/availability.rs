//! Entity availability for assignment pickers.
//!
//! An entity name already used elsewhere in the schedule is not offered
//! again. Exclusion is by **name**, so entity names must be unique (see
//! [`crate::validation::validate_input`]).
//!
//! This is the only place the "one owner per entity" rule is applied; the
//! assignment map itself accepts duplicates.

use std::collections::HashSet;

use crate::models::{AssignmentMap, DarEntities, Entity, EntityField};

/// Entities that may be bound to a DAR column.
///
/// Names bound to any *other* DAR column are excluded. Names already on
/// `dar_index` stay available so the picker can show them as selected.
pub fn available_entities_for_dar<'a>(
    dar_index: usize,
    dar_entities: &DarEntities,
    entities: &'a [Entity],
) -> Vec<&'a Entity> {
    let taken: HashSet<&str> = dar_entities
        .iter()
        .filter(|(index, _)| **index != dar_index)
        .flat_map(|(_, names)| names.iter().map(String::as_str))
        .collect();

    filter_available(entities, &taken)
}

/// Entities that may be added to an employee's new-incoming or
/// cross-training list.
///
/// Excluded names:
/// - everything bound to any DAR column
/// - every other employee's new-incoming and cross-training entities
/// - the same employee's entities in the *other* field
///
/// The field being edited does not exclude its own selections.
pub fn available_entities_for_assignment<'a>(
    employee_id: &str,
    field: EntityField,
    assignments: &AssignmentMap,
    dar_entities: &DarEntities,
    entities: &'a [Entity],
) -> Vec<&'a Entity> {
    let mut taken: HashSet<&str> = dar_entities
        .values()
        .flat_map(|names| names.iter().map(String::as_str))
        .collect();

    for (id, assignment) in assignments {
        if id == employee_id {
            taken.extend(assignment.entities(field.other()).iter().map(String::as_str));
        } else {
            taken.extend(assignment.tagged_entities().map(|(_, name)| name));
        }
    }

    filter_available(entities, &taken)
}

fn filter_available<'a>(entities: &'a [Entity], taken: &HashSet<&str>) -> Vec<&'a Entity> {
    entities
        .iter()
        .filter(|e| !taken.contains(e.name.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Assignment;

    fn entities() -> Vec<Entity> {
        vec![
            Entity::new("1", "E1"),
            Entity::new("2", "E2"),
            Entity::new("3", "E3"),
            Entity::new("4", "E4"),
        ]
    }

    fn names(list: &[&Entity]) -> Vec<String> {
        list.iter().map(|e| e.name.clone()).collect()
    }

    #[test]
    fn test_dar_excludes_other_columns() {
        let dar_entities = DarEntities::from([(0, vec!["E1".to_string()])]);
        let all = entities()[..3].to_vec();

        let available = available_entities_for_dar(1, &dar_entities, &all);
        assert_eq!(names(&available), vec!["E2", "E3"]);
    }

    #[test]
    fn test_dar_keeps_own_selection() {
        let dar_entities = DarEntities::from([
            (0, vec!["E1".to_string()]),
            (1, vec!["E2".to_string()]),
        ]);
        let all = entities();

        let available = available_entities_for_dar(0, &dar_entities, &all);
        assert_eq!(names(&available), vec!["E1", "E3", "E4"]);
    }

    #[test]
    fn test_exclusion_is_by_name_not_id() {
        let dar_entities = DarEntities::from([(0, vec!["E1".to_string()])]);
        let all = vec![Entity::new("E1", "Other"), Entity::new("x", "E1")];

        let available = available_entities_for_dar(1, &dar_entities, &all);
        assert_eq!(names(&available), vec!["Other"]);
    }

    #[test]
    fn test_assignment_exclusions() {
        let dar_entities = DarEntities::from([(2, vec!["E1".to_string()])]);
        let mut assignments = AssignmentMap::new();
        assignments.insert(
            "me".into(),
            Assignment::new()
                .with_new_incoming(["E2"])
                .with_cross_training(["E3"]),
        );
        assignments.insert("other".into(), Assignment::new().with_cross_training(["E4"]));
        let all = entities();

        // Editing new-incoming: own E2 stays, own cross-training E3 is excluded.
        let available = available_entities_for_assignment(
            "me",
            EntityField::NewIncoming,
            &assignments,
            &dar_entities,
            &all,
        );
        assert_eq!(names(&available), vec!["E2"]);

        let available = available_entities_for_assignment(
            "me",
            EntityField::CrossTraining,
            &assignments,
            &dar_entities,
            &all,
        );
        assert_eq!(names(&available), vec!["E3"]);
    }

    #[test]
    fn test_assignment_for_unassigned_employee() {
        let assignments =
            AssignmentMap::from([("other".to_string(), Assignment::new().with_new_incoming(["E1"]))]);
        let all = entities();

        let available = available_entities_for_assignment(
            "new",
            EntityField::CrossTraining,
            &assignments,
            &DarEntities::new(),
            &all,
        );
        assert_eq!(names(&available), vec!["E2", "E3", "E4"]);
    }

    #[test]
    fn test_empty_entities() {
        let dar_entities = DarEntities::from([(0, vec!["E1".to_string()])]);
        assert!(available_entities_for_dar(0, &dar_entities, &[]).is_empty());
        assert!(available_entities_for_assignment(
            "me",
            EntityField::NewIncoming,
            &AssignmentMap::new(),
            &dar_entities,
            &[],
        )
        .is_empty());
    }
}
