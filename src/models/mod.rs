//! Staff scheduling domain models.
//!
//! Provides the plain data the analysis, availability, bulk-assignment
//! and history modules operate on. Hosts load these from storage; the
//! crate never mutates employees or entities.
//!
//! # Shapes
//!
//! | Type | Role |
//! |------|------|
//! | `Employee` | Staff member with skills |
//! | `Entity` | Facility/location, keyed by name |
//! | `Assignment` | Everything one employee is scheduled for |
//! | `AssignmentMap` | Employee ID → assignment |
//! | `DarEntities` | DAR column → entity names |
//! | `ScheduleDraft` | Persisted bundle of the above |

mod assignment;
mod draft;
mod employee;
mod entity;

pub use assignment::{
    Assignment, AssignmentMap, DarEntities, EntityField, SpecialProjectFlags, SpecialProjects,
};
pub use draft::{ScheduleDraft, DEFAULT_DAR_COUNT, MAX_DAR_COUNT, MIN_DAR_COUNT};
pub use employee::{find_employee, Employee, Skill};
pub use entity::Entity;
