//! Workload scoring.
//!
//! Collapses one employee's assignment into a scalar point total used for
//! badges and imbalance detection.
//!
//! # Scoring
//!
//! | Item | Points |
//! |------|--------|
//! | each DAR column | 3 |
//! | CPOE | 2 |
//! | each new-incoming entity | 2 |
//! | each cross-training entity | 1 |
//! | any special project | 1 (total) |
//!
//! The point values are shared with stored reports and must not drift.

use serde::{Deserialize, Serialize};

use crate::models::{Assignment, DarEntities};

/// Points per DAR column.
pub const DAR_POINTS: u32 = 3;
/// Points for CPOE.
pub const CPOE_POINTS: u32 = 2;
/// Points per new-incoming entity.
pub const NEW_INCOMING_POINTS: u32 = 2;
/// Points per cross-training entity.
pub const CROSS_TRAINING_POINTS: u32 = 1;
/// Points for having any special project.
pub const SPECIAL_PROJECTS_POINTS: u32 = 1;

/// Per-item points behind a workload score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadBreakdown {
    /// Points from DAR columns.
    pub dars: u32,
    /// Points from CPOE.
    pub cpoe: u32,
    /// Points from new-incoming entities.
    pub new_incoming: u32,
    /// Points from cross-training entities.
    pub cross_training: u32,
    /// Points from special projects.
    pub special_projects: u32,
}

impl WorkloadBreakdown {
    /// Scores an assignment item by item.
    ///
    /// `_dar_entities` is accepted for call-site symmetry with the other
    /// analyses; column bindings do not change the score.
    pub fn of(assignment: Option<&Assignment>, _dar_entities: &DarEntities) -> Self {
        let Some(a) = assignment else {
            return Self::default();
        };
        Self {
            dars: a.dars.len() as u32 * DAR_POINTS,
            cpoe: if a.cpoe { CPOE_POINTS } else { 0 },
            new_incoming: a.new_incoming.len() as u32 * NEW_INCOMING_POINTS,
            cross_training: a.cross_training.len() as u32 * CROSS_TRAINING_POINTS,
            special_projects: if a.has_special_projects() {
                SPECIAL_PROJECTS_POINTS
            } else {
                0
            },
        }
    }

    /// Sum of all items.
    pub fn total(&self) -> u32 {
        self.dars + self.cpoe + self.new_incoming + self.cross_training + self.special_projects
    }
}

/// Computes an employee's workload score.
///
/// Pure and total: a missing assignment scores 0.
pub fn calculate_workload(assignment: Option<&Assignment>, dar_entities: &DarEntities) -> u32 {
    WorkloadBreakdown::of(assignment, dar_entities).total()
}
