//! Assignment model.
//!
//! An assignment records everything one employee is scheduled for in a
//! schedule period: DAR columns, CPOE, new-incoming and cross-training
//! entities, and special projects.
//!
//! Stored schedules carry several historical shapes for the same fields
//! (a single string where a list is expected, special projects stored as
//! an object, a list, or free text). Those shapes are normalized here at
//! the serde boundary so the analysis code only ever sees one form.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Employee ID → assignment. The unit of undo/redo history.
///
/// Iteration is in ascending employee-ID order, which is the ordering
/// contract for every report derived from the map.
pub type AssignmentMap = BTreeMap<String, Assignment>;

/// DAR column index → entity names bound to that column.
pub type DarEntities = BTreeMap<usize, Vec<String>>;

/// One employee's assignment for a schedule period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    /// DAR column indices (0-based).
    #[serde(default, deserialize_with = "null_as_default")]
    pub dars: BTreeSet<usize>,
    /// Assigned to CPOE.
    #[serde(default, deserialize_with = "null_as_default")]
    pub cpoe: bool,
    /// New-incoming entity names.
    #[serde(default, deserialize_with = "entity_list")]
    pub new_incoming: Vec<String>,
    /// Cross-training entity names.
    #[serde(default, deserialize_with = "entity_list")]
    pub cross_training: Vec<String>,
    /// Special projects, in whichever shape was stored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_projects: Option<SpecialProjects>,
}

/// The two entity-bearing assignment fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityField {
    /// New-incoming entities.
    NewIncoming,
    /// Cross-training entities.
    CrossTraining,
}

impl EntityField {
    /// The opposite entity field.
    pub fn other(self) -> Self {
        match self {
            EntityField::NewIncoming => EntityField::CrossTraining,
            EntityField::CrossTraining => EntityField::NewIncoming,
        }
    }

    /// Field name as it appears in stored assignments.
    pub fn label(self) -> &'static str {
        match self {
            EntityField::NewIncoming => "newIncoming",
            EntityField::CrossTraining => "crossTraining",
        }
    }
}

/// Special projects in any of their stored shapes.
///
/// Use [`SpecialProjects::normalize`] to obtain the canonical flag form and
/// [`SpecialProjects::is_active`] to test whether anything is assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpecialProjects {
    /// Legacy list of project names.
    List(Vec<String>),
    /// Legacy free-text description.
    Text(String),
    /// Canonical flag form.
    Flags(SpecialProjectFlags),
}

/// Canonical special-project flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialProjectFlags {
    /// Primary 3P email inbox.
    #[serde(default, rename = "threePEmail")]
    pub three_p_email: bool,
    /// Backup 3P email inbox.
    #[serde(default, rename = "threePBackupEmail")]
    pub three_p_backup_email: bool,
    /// Float coverage.
    #[serde(default)]
    pub float: bool,
    /// Free-text project. Non-string stored values load as `None`.
    #[serde(default, deserialize_with = "string_or_none")]
    pub other: Option<String>,
}

impl SpecialProjectFlags {
    /// Whether any flag is set or `other` holds non-blank text.
    pub fn is_active(&self) -> bool {
        self.three_p_email
            || self.three_p_backup_email
            || self.float
            || self.other.as_deref().is_some_and(|o| !o.trim().is_empty())
    }
}

impl SpecialProjects {
    /// Whether this value assigns any special project.
    ///
    /// - flags: any flag set, or `other` non-blank after trimming
    /// - list: non-empty
    /// - text: non-blank after trimming
    pub fn is_active(&self) -> bool {
        match self {
            SpecialProjects::Flags(flags) => flags.is_active(),
            SpecialProjects::List(items) => !items.is_empty(),
            SpecialProjects::Text(text) => !text.trim().is_empty(),
        }
    }

    /// Converts any stored shape to the canonical flag form.
    ///
    /// Lists are joined with `", "` into `other`; text moves to `other`.
    pub fn normalize(&self) -> SpecialProjectFlags {
        match self {
            SpecialProjects::Flags(flags) => flags.clone(),
            SpecialProjects::List(items) => SpecialProjectFlags {
                other: (!items.is_empty()).then(|| items.join(", ")),
                ..Default::default()
            },
            SpecialProjects::Text(text) => SpecialProjectFlags {
                other: Some(text.clone()),
                ..Default::default()
            },
        }
    }
}

impl Assignment {
    /// Creates an empty assignment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a DAR column.
    pub fn with_dar(mut self, dar_index: usize) -> Self {
        self.dars.insert(dar_index);
        self
    }

    /// Sets the CPOE flag.
    pub fn with_cpoe(mut self, cpoe: bool) -> Self {
        self.cpoe = cpoe;
        self
    }

    /// Sets the new-incoming entities.
    pub fn with_new_incoming<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.new_incoming = names.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the cross-training entities.
    pub fn with_cross_training<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cross_training = names.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the special projects.
    pub fn with_special_projects(mut self, projects: SpecialProjects) -> Self {
        self.special_projects = Some(projects);
        self
    }

    /// Entity names held in one entity field.
    pub fn entities(&self, field: EntityField) -> &[String] {
        match field {
            EntityField::NewIncoming => &self.new_incoming,
            EntityField::CrossTraining => &self.cross_training,
        }
    }

    /// Mutable access to one entity field.
    pub fn entities_mut(&mut self, field: EntityField) -> &mut Vec<String> {
        match field {
            EntityField::NewIncoming => &mut self.new_incoming,
            EntityField::CrossTraining => &mut self.cross_training,
        }
    }

    /// All entity names across both fields, tagged by field.
    pub fn tagged_entities(&self) -> impl Iterator<Item = (EntityField, &str)> {
        self.new_incoming
            .iter()
            .map(|n| (EntityField::NewIncoming, n.as_str()))
            .chain(
                self.cross_training
                    .iter()
                    .map(|n| (EntityField::CrossTraining, n.as_str())),
            )
    }

    /// Whether any special project is assigned.
    pub fn has_special_projects(&self) -> bool {
        self.special_projects
            .as_ref()
            .is_some_and(SpecialProjects::is_active)
    }

    /// Whether nothing is assigned.
    pub fn is_empty(&self) -> bool {
        self.dars.is_empty()
            && !self.cpoe
            && self.new_incoming.is_empty()
            && self.cross_training.is_empty()
            && !self.has_special_projects()
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EntityListRepr {
    Many(Vec<String>),
    One(String),
}

/// Accepts a list, a single legacy string, or null.
fn entity_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<EntityListRepr>::deserialize(deserializer)? {
        Some(EntityListRepr::Many(names)) => names,
        Some(EntityListRepr::One(name)) if !name.is_empty() => vec![name],
        _ => Vec::new(),
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OtherRepr {
    Text(String),
    Ignored(serde::de::IgnoredAny),
}

fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<OtherRepr>::deserialize(deserializer)? {
        Some(OtherRepr::Text(text)) => Some(text),
        Some(OtherRepr::Ignored(_)) | None => None,
    })
}
