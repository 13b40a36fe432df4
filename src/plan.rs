//! Pass planning: turn a requested pass list into a plan that is safe under a profile.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::profile::SafetyProfile;
use crate::unit::{Catalog, TransformationUnit};

/// The ordered, deduplicated list of units cleared to run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExecutionPlan {
    units: Vec<String>,
}

impl ExecutionPlan {
    pub fn names(&self) -> &[String] {
        &self.units
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.units.iter().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.units.iter().any(|u| u == name)
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn into_names(self) -> Vec<String> {
        self.units
    }
}

/// Why a requested unit could not be planned.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind")]
pub enum Rejection {
    #[error("unknown unit `{name}`")]
    UnknownUnit { name: String },

    #[error("unit `{name}` carries forbidden tags: {}", .tags.join(", "))]
    UnsafeUnit { name: String, tags: Vec<String> },
}

impl Rejection {
    /// Name of the requested unit this entry is about.
    pub fn name(&self) -> &str {
        match self {
            Rejection::UnknownUnit { name } | Rejection::UnsafeUnit { name, .. } => name,
        }
    }

    fn unsafe_unit(unit: &TransformationUnit, profile: &SafetyProfile) -> Self {
        Rejection::UnsafeUnit {
            name: unit.name.clone(),
            tags: profile
                .conflicts(unit)
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}

/// Every problem found while planning. Never carries a partial plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectionReport {
    pub profile: String,
    pub entries: Vec<Rejection>,
}

impl fmt::Display for RejectionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "profile `{}` rejected {} requested unit(s)",
            self.profile,
            self.entries.len()
        )?;
        for entry in &self.entries {
            write!(f, "\n  - {}", entry)?;
        }
        Ok(())
    }
}

impl std::error::Error for RejectionReport {}

/// Informational findings about a profile. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind")]
pub enum ProfileWarning {
    #[error("forbidden tag `{tag}` is not carried by any unit in the catalog")]
    DeadConstraint { tag: String },
}

/// Plan built from the catalog's defaults, with unsafe defaults left out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DefaultPlan {
    pub plan: ExecutionPlan,
    /// Default-enabled units the profile excluded, each as an `UnsafeUnit` entry
    pub excluded: Vec<Rejection>,
}

/// Build an execution plan from the requested unit names.
///
/// Names are processed in order. Unknown and unsafe names are collected into a
/// [`RejectionReport`], one entry per occurrence; if there is at least one, no plan
/// is returned. A safe name requested more than once keeps its first position.
pub fn build_plan<I, S>(
    catalog: &Catalog,
    requested: I,
    profile: &SafetyProfile,
) -> Result<ExecutionPlan, RejectionReport>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut units = Vec::new();
    let mut entries = Vec::new();

    for name in requested {
        let name = name.as_ref();
        match catalog.get(name) {
            None => entries.push(Rejection::UnknownUnit {
                name: name.to_string(),
            }),
            Some(unit) if !profile.allows(unit) => {
                entries.push(Rejection::unsafe_unit(unit, profile));
            }
            Some(unit) => {
                if seen.insert(unit.name.as_str()) {
                    units.push(unit.name.clone());
                }
            }
        }
    }

    if entries.is_empty() {
        Ok(ExecutionPlan { units })
    } else {
        Err(RejectionReport {
            profile: profile.name.clone(),
            entries,
        })
    }
}

/// Report forbidden tags that no unit in the catalog carries.
pub fn validate_profile(profile: &SafetyProfile, catalog: &Catalog) -> Vec<ProfileWarning> {
    let known = catalog.known_tags();
    profile
        .forbidden_tags
        .iter()
        .filter(|tag| !known.contains(tag.as_str()))
        .map(|tag| ProfileWarning::DeadConstraint { tag: tag.clone() })
        .collect()
}

/// Plan every default-enabled unit the profile allows, in catalog order.
pub fn default_plan(catalog: &Catalog, profile: &SafetyProfile) -> DefaultPlan {
    let mut units = Vec::new();
    let mut excluded = Vec::new();

    for unit in catalog.iter().filter(|u| u.default_enabled) {
        if profile.allows(unit) {
            units.push(unit.name.clone());
        } else {
            excluded.push(Rejection::unsafe_unit(unit, profile));
        }
    }

    DefaultPlan {
        plan: ExecutionPlan { units },
        excluded,
    }
}

/// A catalog and a profile bound together.
///
/// Both are read-only once built, so an engine can be shared between threads
/// (e.g. behind an `Arc`) and called concurrently.
#[derive(Debug, Clone)]
pub struct PolicyEngine {
    catalog: Catalog,
    profile: SafetyProfile,
}

impl PolicyEngine {
    pub fn new(catalog: Catalog, profile: SafetyProfile) -> Self {
        Self { catalog, profile }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn profile(&self) -> &SafetyProfile {
        &self.profile
    }

    pub fn build_plan<I, S>(&self, requested: I) -> Result<ExecutionPlan, RejectionReport>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        build_plan(&self.catalog, requested, &self.profile)
    }

    pub fn validate_profile(&self) -> Vec<ProfileWarning> {
        validate_profile(&self.profile, &self.catalog)
    }

    pub fn default_plan(&self) -> DefaultPlan {
        default_plan(&self.catalog, &self.profile)
    }
}
