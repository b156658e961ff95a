//! Workload imbalance detection.
//!
//! Scores every active employee, averages the scores, and flags
//! employees whose workload is far from the average.
//!
//! # Algorithm
//!
//! 1. Drop archived employees.
//! 2. Score each remaining employee (no assignment → 0).
//! 3. `avg = sum / count`, or 0 when nobody is active.
//! 4. When `avg > 0`: `ratio = workload / avg`;
//!    `ratio > overload` → overloaded;
//!    `ratio < underload` and `workload > 0` → underloaded.
//!
//! Unassigned employees (workload 0) are never reported as underloaded.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

use super::workload::calculate_workload;
use super::Severity;
use crate::config::check_thresholds;
use crate::error::ScheduleError;
use crate::models::{Assignment, AssignmentMap, DarEntities, Employee};

/// Default ratio above which an employee is overloaded.
pub const DEFAULT_OVERLOAD_RATIO: f64 = 1.5;
/// Default ratio below which an employee is underloaded.
pub const DEFAULT_UNDERLOAD_RATIO: f64 = 0.5;

/// Direction of an imbalance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImbalanceKind {
    /// Well above the average.
    Overloaded,
    /// Well below the average, but not idle.
    Underloaded,
}

/// An employee whose workload is far from the cohort average.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Imbalance {
    /// Direction.
    #[serde(rename = "type")]
    pub kind: ImbalanceKind,
    /// `Warning` for overloaded, `Info` for underloaded.
    pub severity: Severity,
    /// Affected employee.
    pub employee_id: String,
    /// Affected employee's display name.
    pub employee_name: String,
    /// Employee's workload score.
    pub workload: u32,
    /// Cohort average workload.
    pub avg_workload: f64,
    /// `workload / avg_workload`.
    pub ratio: f64,
    /// Human-readable description.
    pub message: String,
}

/// One active employee's workload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeWorkload {
    /// Employee ID.
    pub employee_id: String,
    /// Display name.
    pub employee_name: String,
    /// Workload score.
    pub workload: u32,
    /// The scored assignment (empty when none was stored).
    pub assignment: Assignment,
}

/// Imbalances plus the per-employee workloads behind them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImbalanceReport {
    /// Flagged employees, in employee-list order.
    pub imbalances: Vec<Imbalance>,
    /// Employee ID → workload, active employees only.
    pub workload_map: BTreeMap<String, EmployeeWorkload>,
    /// Average workload over active employees (0 when none).
    pub avg_workload: f64,
}

impl ImbalanceReport {
    /// Overloaded employees.
    pub fn overloaded(&self) -> impl Iterator<Item = &Imbalance> {
        self.imbalances
            .iter()
            .filter(|i| i.kind == ImbalanceKind::Overloaded)
    }

    /// Underloaded employees.
    pub fn underloaded(&self) -> impl Iterator<Item = &Imbalance> {
        self.imbalances
            .iter()
            .filter(|i| i.kind == ImbalanceKind::Underloaded)
    }

    /// Workload score for an employee (0 when inactive or unknown).
    pub fn workload_of(&self, employee_id: &str) -> u32 {
        self.workload_map
            .get(employee_id)
            .map(|w| w.workload)
            .unwrap_or(0)
    }
}

/// Imbalance detector with configurable thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImbalanceAnalyzer {
    overload_ratio: f64,
    underload_ratio: f64,
}

impl Default for ImbalanceAnalyzer {
    fn default() -> Self {
        Self {
            overload_ratio: DEFAULT_OVERLOAD_RATIO,
            underload_ratio: DEFAULT_UNDERLOAD_RATIO,
        }
    }
}

impl ImbalanceAnalyzer {
    /// Creates an analyzer with the default 1.5 / 0.5 thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an analyzer with custom thresholds.
    pub fn with_thresholds(overload_ratio: f64, underload_ratio: f64) -> Result<Self, ScheduleError> {
        check_thresholds(overload_ratio, underload_ratio)?;
        Ok(Self {
            overload_ratio,
            underload_ratio,
        })
    }

    /// Overload threshold.
    pub fn overload_ratio(&self) -> f64 {
        self.overload_ratio
    }

    /// Underload threshold.
    pub fn underload_ratio(&self) -> f64 {
        self.underload_ratio
    }

    /// Scores active employees and flags outliers.
    #[instrument(level = "debug", skip_all, fields(employees = employees.len()))]
    pub fn analyze(
        &self,
        assignments: &AssignmentMap,
        employees: &[Employee],
        dar_entities: &DarEntities,
    ) -> ImbalanceReport {
        let active: Vec<&Employee> = employees.iter().filter(|e| !e.archived).collect();

        let scored: Vec<(&Employee, u32)> = active
            .iter()
            .map(|e| {
                let workload = calculate_workload(assignments.get(&e.id), dar_entities);
                (*e, workload)
            })
            .collect();

        let avg_workload = if scored.is_empty() {
            0.0
        } else {
            let total: u64 = scored.iter().map(|(_, w)| u64::from(*w)).sum();
            total as f64 / scored.len() as f64
        };

        let mut imbalances = Vec::new();
        if avg_workload > 0.0 {
            for &(employee, workload) in &scored {
                let ratio = f64::from(workload) / avg_workload;
                if ratio > self.overload_ratio {
                    imbalances.push(overloaded(employee, workload, avg_workload, ratio));
                } else if ratio < self.underload_ratio && workload > 0 {
                    imbalances.push(underloaded(employee, workload, avg_workload, ratio));
                }
            }
        }

        let workload_map = scored
            .into_iter()
            .map(|(employee, workload)| {
                let entry = EmployeeWorkload {
                    employee_id: employee.id.clone(),
                    employee_name: employee.display_name().to_string(),
                    workload,
                    assignment: assignments.get(&employee.id).cloned().unwrap_or_default(),
                };
                (employee.id.clone(), entry)
            })
            .collect();

        debug!(
            avg_workload,
            imbalances = imbalances.len(),
            "workload analysis complete"
        );

        ImbalanceReport {
            imbalances,
            workload_map,
            avg_workload,
        }
    }
}

fn overloaded(employee: &Employee, workload: u32, avg_workload: f64, ratio: f64) -> Imbalance {
    let name = employee.display_name();
    Imbalance {
        kind: ImbalanceKind::Overloaded,
        severity: Severity::Warning,
        employee_id: employee.id.clone(),
        employee_name: name.to_string(),
        workload,
        avg_workload,
        ratio,
        message: format!(
            "{name} has a high workload ({workload} points, {ratio:.1}x the average of {avg_workload:.1})"
        ),
    }
}

fn underloaded(employee: &Employee, workload: u32, avg_workload: f64, ratio: f64) -> Imbalance {
    let name = employee.display_name();
    Imbalance {
        kind: ImbalanceKind::Underloaded,
        severity: Severity::Info,
        employee_id: employee.id.clone(),
        employee_name: name.to_string(),
        workload,
        avg_workload,
        ratio,
        message: format!(
            "{name} has a light workload ({workload} points, {ratio:.1}x the average of {avg_workload:.1})"
        ),
    }
}

/// Detects imbalances with the default thresholds.
pub fn detect_workload_imbalances(
    assignments: &AssignmentMap,
    employees: &[Employee],
    dar_entities: &DarEntities,
) -> ImbalanceReport {
    ImbalanceAnalyzer::default().analyze(assignments, employees, dar_entities)
}
