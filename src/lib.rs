//! Assignment engine for clinical staff schedules.
//!
//! Supervisors place employees into recurring task columns (DAR reviews,
//! CPOE, new-incoming and cross-training entities, special projects).
//! This crate decides which of those placements are legal, scores and
//! compares workloads, filters entity pickers, validates bulk
//! assignments, and keeps the undo/redo history of an editing session.
//!
//! It performs no I/O: hosts load employees, entities and drafts, call
//! into the crate, and render or persist what comes back.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Employee`, `Entity`, `Assignment`,
//!   `SpecialProjects`, `ScheduleDraft`
//! - **`analysis`**: Workload scoring, conflict detection, imbalance detection
//! - **`availability`**: Entity exclusion for DAR and employee pickers
//! - **`bulk`**: Per-employee validation and application of bulk assignments
//! - **`history`**: Bounded linear undo/redo over state snapshots
//! - **`editor`**: An editing session tying the above together
//! - **`validation`**: Input integrity checks at the loading boundary
//! - **`config`** / **`error`**: Session configuration and misuse errors
//!
//! # Example
//!
//! ```
//! use staff_schedule::analysis::{calculate_workload, detect_conflicts};
//! use staff_schedule::models::{Assignment, AssignmentMap, DarEntities, Employee, Skill};
//!
//! let employees = vec![Employee::new("E1").with_name("Ada").with_skill(Skill::Float)];
//! let mut assignments = AssignmentMap::new();
//! assignments.insert("E1".into(), Assignment::new().with_dar(0).with_dar(1));
//!
//! let report = detect_conflicts(&assignments, &employees, &DarEntities::new());
//! assert!(report.conflicts.is_empty());
//! assert_eq!(report.warnings.len(), 1);
//! assert_eq!(calculate_workload(assignments.get("E1"), &DarEntities::new()), 6);
//! ```

pub mod analysis;
pub mod availability;
pub mod bulk;
pub mod config;
pub mod editor;
pub mod error;
pub mod history;
pub mod models;
pub mod validation;

pub use config::EngineConfig;
pub use editor::{ScheduleAnalysis, ScheduleEditor};
pub use error::ScheduleError;
