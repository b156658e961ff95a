//! Employee model.
//!
//! Employees are the staff members that receive assignments. Each
//! employee carries a set of skills that determine which assignment
//! columns they may legally occupy.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A staff member that can be assigned to schedule columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Unique employee identifier.
    pub id: String,
    /// Human-readable name.
    #[serde(default)]
    pub name: String,
    /// Qualifications held by this employee.
    #[serde(default)]
    pub skills: BTreeSet<Skill>,
    /// Archived employees are excluded from workload analysis.
    #[serde(default)]
    pub archived: bool,
}

/// A qualification that gates assignment eligibility.
///
/// | Skill | Qualifies for |
/// |-------|---------------|
/// | `DAR` | DAR columns |
/// | `Trace` | DAR columns (bulk assignment only) |
/// | `CPOE` | CPOE |
/// | `Float` | DAR columns (conflict detection only) |
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Skill {
    /// Daily review work.
    #[serde(rename = "DAR")]
    Dar,
    /// Trace review work.
    Trace,
    /// Computerized provider order entry.
    #[serde(rename = "CPOE")]
    Cpoe,
    /// Blanket qualification covering DAR work.
    Float,
    /// Any skill string this crate does not recognise.
    #[serde(other)]
    Unknown,
}

impl Skill {
    /// Display label, matching the serialized form.
    pub fn label(&self) -> &'static str {
        match self {
            Skill::Dar => "DAR",
            Skill::Trace => "Trace",
            Skill::Cpoe => "CPOE",
            Skill::Float => "Float",
            Skill::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for Skill {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl Employee {
    /// Creates an active employee with no skills.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            skills: BTreeSet::new(),
            archived: false,
        }
    }

    /// Sets the employee name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds a skill.
    pub fn with_skill(mut self, skill: Skill) -> Self {
        self.skills.insert(skill);
        self
    }

    /// Adds several skills.
    pub fn with_skills(mut self, skills: impl IntoIterator<Item = Skill>) -> Self {
        self.skills.extend(skills);
        self
    }

    /// Marks the employee as archived.
    pub fn archived(mut self) -> Self {
        self.archived = true;
        self
    }

    /// Whether this employee holds a given skill.
    pub fn has_skill(&self, skill: Skill) -> bool {
        self.skills.contains(&skill)
    }

    /// Whether this employee holds any of the given skills.
    pub fn has_any_skill(&self, skills: &[Skill]) -> bool {
        skills.iter().any(|s| self.has_skill(*s))
    }

    /// Name used in messages, falling back to the ID when unnamed.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

/// Finds an employee by ID.
pub fn find_employee<'a>(employees: &'a [Employee], id: &str) -> Option<&'a Employee> {
    employees.iter().find(|e| e.id == id)
}
