//! Assignment analysis: workload scoring, conflicts, and imbalance.
//!
//! Every report here is derived data. Recompute it from scratch after
//! each change to the assignment map; nothing is updated incrementally
//! or meant to be persisted.
//!
//! All analyses are O(employees × assignments) and cheap enough to run on
//! every edit.

mod conflicts;
mod imbalance;
mod workload;

pub use conflicts::{
    detect_conflicts, Conflict, ConflictField, ConflictKind, ConflictReport, EntityAssignment,
    Severity, Warning, WarningKind, DAR_CONFLICT_SKILLS,
};
pub use imbalance::{
    detect_workload_imbalances, EmployeeWorkload, Imbalance, ImbalanceAnalyzer, ImbalanceKind,
    ImbalanceReport, DEFAULT_OVERLOAD_RATIO, DEFAULT_UNDERLOAD_RATIO,
};
pub use workload::{
    calculate_workload, WorkloadBreakdown, CPOE_POINTS, CROSS_TRAINING_POINTS, DAR_POINTS,
    NEW_INCOMING_POINTS, SPECIAL_PROJECTS_POINTS,
};
