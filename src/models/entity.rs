//! Entity (facility/location) model.
//!
//! Entities are attached to DAR columns or to an employee's new-incoming
//! and cross-training lists. For exclusion purposes an entity is
//! identified by its **name**, not its ID.

use serde::{Deserialize, Serialize};

/// A facility or location that work can be attributed to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entity {
    /// Storage identifier.
    pub id: String,
    /// Display name; the effective key for availability checks.
    pub name: String,
}

impl Entity {
    /// Creates a new entity.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Creates an entity whose ID equals its name.
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: name.clone(),
            name,
        }
    }
}
