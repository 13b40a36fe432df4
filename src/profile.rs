//! Safety profiles: named sets of forbidden risk tags.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::ScoresafeError;
use crate::unit::{TransformationUnit, is_printable_label};

/// A consumer's tolerance for semantic change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SafetyProfile {
    pub name: String,
    #[serde(default)]
    pub forbidden_tags: BTreeSet<String>,
}

impl SafetyProfile {
    pub fn new<I, S>(name: impl Into<String>, forbidden_tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            forbidden_tags: forbidden_tags.into_iter().map(Into::into).collect(),
        }
    }

    /// A profile that forbids nothing.
    pub fn permissive(name: impl Into<String>) -> Self {
        Self::new(name, std::iter::empty::<String>())
    }

    pub fn forbids(&self, tag: &str) -> bool {
        self.forbidden_tags.contains(tag)
    }

    /// Tags of `unit` that this profile forbids, in sorted order.
    pub fn conflicts<'u>(&self, unit: &'u TransformationUnit) -> Vec<&'u str> {
        unit.risk_tags
            .iter()
            .filter(|tag| self.forbidden_tags.contains(*tag))
            .map(String::as_str)
            .collect()
    }

    pub fn allows(&self, unit: &TransformationUnit) -> bool {
        unit.risk_tags.is_disjoint(&self.forbidden_tags)
    }

    /// Reject profiles that could not have been written on purpose.
    pub fn validate(&self) -> Result<(), ScoresafeError> {
        if !is_printable_label(&self.name) {
            return Err(ScoresafeError::InvalidProfile(
                "name must not be empty or contain control characters".into(),
            ));
        }
        if self.forbidden_tags.iter().any(|t| !is_printable_label(t)) {
            return Err(ScoresafeError::InvalidProfile(format!(
                "profile {:?} has a blank or unprintable forbidden tag",
                self.name
            )));
        }
        Ok(())
    }
}
