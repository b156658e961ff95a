use std::collections::BTreeSet;

use proptest::prelude::*;
use proptest::test_runner::Config;
use staff_schedule::analysis::{calculate_workload, detect_conflicts};
use staff_schedule::bulk::{validate_bulk_assignment, BulkAssignmentRequest, BulkAssignmentType};
use staff_schedule::history::UndoRedoManager;
use staff_schedule::models::{
    Assignment, AssignmentMap, DarEntities, Employee, Skill, SpecialProjectFlags, SpecialProjects,
};

fn skill() -> impl Strategy<Value = Skill> {
    prop_oneof![
        Just(Skill::Dar),
        Just(Skill::Trace),
        Just(Skill::Cpoe),
        Just(Skill::Float),
    ]
}

fn special_projects() -> impl Strategy<Value = Option<SpecialProjects>> {
    prop_oneof![
        Just(None),
        "[ a-z]{0,6}".prop_map(|s| Some(SpecialProjects::Text(s))),
        prop::collection::vec("[a-z]{1,4}", 0..3).prop_map(|v| Some(SpecialProjects::List(v))),
        (any::<bool>(), any::<bool>(), any::<bool>(), prop::option::of("[ a-z]{0,4}")).prop_map(
            |(a, b, c, other)| {
                Some(SpecialProjects::Flags(SpecialProjectFlags {
                    three_p_email: a,
                    three_p_backup_email: b,
                    float: c,
                    other,
                }))
            }
        ),
    ]
}

fn assignment() -> impl Strategy<Value = Assignment> {
    (
        prop::collection::btree_set(0_usize..8, 0..5),
        any::<bool>(),
        prop::collection::vec("[A-Z][a-z]{0,5}", 0..4),
        prop::collection::vec("[A-Z][a-z]{0,5}", 0..4),
        special_projects(),
    )
        .prop_map(|(dars, cpoe, new_incoming, cross_training, special_projects)| Assignment {
            dars,
            cpoe,
            new_incoming,
            cross_training,
            special_projects,
        })
}

fn employee() -> impl Strategy<Value = Employee> {
    ("[a-z]{1,4}", prop::collection::btree_set(skill(), 0..4))
        .prop_map(|(id, skills)| Employee::new(id).with_skills(skills))
}

proptest! {
    #![proptest_config(Config::with_cases(128))]

    #[test]
    fn workload_is_deterministic_and_bounded(a in assignment()) {
        let d = DarEntities::new();
        let first = calculate_workload(Some(&a), &d);
        prop_assert_eq!(first, calculate_workload(Some(&a), &d));

        let upper = 3 * a.dars.len() as u32
            + 2
            + 2 * a.new_incoming.len() as u32
            + a.cross_training.len() as u32
            + 1;
        prop_assert!(first <= upper);
    }

    #[test]
    fn unskilled_conflicts_count_dars_plus_cpoe(
        dars in prop::collection::btree_set(0_usize..8, 0..6)
    ) {
        let employees = vec![Employee::new("E1")];
        let mut assignments = AssignmentMap::new();
        let mut a = Assignment::new().with_cpoe(true);
        a.dars = dars.clone();
        assignments.insert("E1".into(), a);

        let report = detect_conflicts(&assignments, &employees, &DarEntities::new());
        prop_assert_eq!(report.conflicts.len(), dars.len() + 1);
    }

    #[test]
    fn bulk_outcome_covers_every_selected_employee(
        employees in prop::collection::vec(employee(), 0..8),
        extra in prop::collection::btree_set("[a-z]{1,4}", 0..4),
        kind in prop_oneof![
            Just(BulkAssignmentType::Dar),
            Just(BulkAssignmentType::Cpoe),
            Just(BulkAssignmentType::NewIncoming),
            Just(BulkAssignmentType::CrossTraining),
            Just(BulkAssignmentType::SpecialProjects),
        ],
        dar_index in prop::option::of(0_usize..8),
        entities in prop::collection::vec("[A-Z]{1,3}", 0..3)
    ) {
        let mut selected: BTreeSet<String> = employees.iter().map(|e| e.id.clone()).collect();
        selected.extend(extra);

        let mut request = BulkAssignmentRequest::new(kind).with_entities(entities);
        request.dar_index = dar_index;

        let outcome = validate_bulk_assignment(&selected, &employees, &request);
        prop_assert_eq!(outcome.successful.len() + outcome.failed.len(), selected.len());

        let ok: BTreeSet<&str> = outcome.successful.iter().map(|s| s.employee_id.as_str()).collect();
        let failed: BTreeSet<&str> = outcome.failed.iter().map(|f| f.employee_id.as_str()).collect();
        prop_assert!(ok.is_disjoint(&failed));
    }

    #[test]
    fn undo_stack_never_exceeds_limit_through_changes(
        limit in 0_usize..10,
        changes in 0_usize..30
    ) {
        let mut history = UndoRedoManager::with_limit(0_usize, limit);
        for i in 1..=changes {
            history.add_change(i);
        }
        prop_assert_eq!(history.undo_stack_size(), changes.min(limit));
        prop_assert_eq!(*history.current_state(), changes);
        prop_assert!(!history.can_redo());
    }
}
