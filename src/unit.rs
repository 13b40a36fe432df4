//! Transformation units and the catalog that holds them.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::ScoresafeError;

/// Well-known risk tags carried by the built-in catalog.
pub mod tags {
    /// Renames, prefixes or removes `id` values.
    pub const ALTERS_IDENTIFIERS: &str = "alters-identifiers";
    /// Drops namespace declarations.
    pub const ALTERS_NAMESPACES: &str = "alters-namespaces";
    /// Rewrites or relocates CSS.
    pub const ALTERS_STYLES: &str = "alters-styles";
    /// Drops `width`, `height` or `viewBox`.
    pub const ALTERS_DIMENSIONS: &str = "alters-dimensions";
    /// Rewrites coordinates, transforms or shapes.
    pub const ALTERS_GEOMETRY: &str = "alters-geometry";
    /// Drops attributes the optimizer does not know, `data-*` included.
    pub const STRIPS_DATA_ATTRIBUTES: &str = "strips-data-attributes";
    /// Reshapes the element tree.
    pub const ALTERS_STRUCTURE: &str = "alters-structure";
    /// Reduces numeric precision outside path data.
    pub const ROUNDS_NUMBERS: &str = "rounds-numbers";
    /// Removes or rewrites presentation attributes.
    pub const ALTERS_PRESENTATION: &str = "alters-presentation";
    /// Removes non-rendering nodes (prolog, comments, metadata).
    pub const DROPS_CONTENT: &str = "drops-content";
}

/// One atomic document-rewriting operation known to the optimizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TransformationUnit {
    /// Stable name, e.g. `cleanupIds`
    pub name: String,
    /// Categories of semantic change this unit may introduce
    #[serde(default)]
    pub risk_tags: BTreeSet<String>,
    /// Whether the optimizer runs this unit when nothing is configured
    #[serde(default)]
    pub default_enabled: bool,
    /// Short human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl TransformationUnit {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            risk_tags: BTreeSet::new(),
            default_enabled: false,
            summary: None,
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.risk_tags.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn enabled_by_default(mut self, enabled: bool) -> Self {
        self.default_enabled = enabled;
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Check whether this unit carries a given tag.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.risk_tags.contains(tag)
    }

    /// Reject names and tags that cannot be written into a config file as-is.
    pub fn validate(&self) -> Result<(), ScoresafeError> {
        if !is_printable_label(&self.name) {
            return Err(ScoresafeError::InvalidUnit(format!(
                "name {:?} is blank or contains control characters",
                self.name
            )));
        }
        if let Some(tag) = self.risk_tags.iter().find(|t| !is_printable_label(t)) {
            return Err(ScoresafeError::InvalidUnit(format!(
                "unit {:?} has an invalid risk tag {:?}",
                self.name, tag
            )));
        }
        Ok(())
    }
}

/// Non-blank, and free of control characters and line separators.
pub(crate) fn is_printable_label(s: &str) -> bool {
    !s.trim().is_empty()
        && !s
            .chars()
            .any(|c| c.is_control() || c == '\u{2028}' || c == '\u{2029}')
}

/// An ordered set of transformation units, keyed by unique name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "CatalogFile", into = "CatalogFile")]
pub struct Catalog {
    units: Vec<TransformationUnit>,
    index: HashMap<String, usize>,
}

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    units: Vec<TransformationUnit>,
}

impl TryFrom<CatalogFile> for Catalog {
    type Error = ScoresafeError;

    fn try_from(file: CatalogFile) -> Result<Self, Self::Error> {
        Catalog::new(file.units)
    }
}

impl From<Catalog> for CatalogFile {
    fn from(catalog: Catalog) -> Self {
        CatalogFile {
            units: catalog.units,
        }
    }
}

impl Catalog {
    /// Build a catalog, keeping the given order. Names must be unique and valid.
    pub fn new(
        units: impl IntoIterator<Item = TransformationUnit>,
    ) -> Result<Self, ScoresafeError> {
        let mut catalog = Catalog::default();
        for unit in units {
            catalog.insert(unit)?;
        }
        Ok(catalog)
    }

    /// Build a catalog from a table whose names are known to be unique.
    pub(crate) fn from_static(units: Vec<TransformationUnit>) -> Self {
        let index: HashMap<_, _> = units
            .iter()
            .enumerate()
            .map(|(i, u)| (u.name.clone(), i))
            .collect();
        debug_assert_eq!(index.len(), units.len(), "duplicate unit name in table");
        Self { units, index }
    }

    fn insert(&mut self, unit: TransformationUnit) -> Result<(), ScoresafeError> {
        unit.validate()?;
        if self.index.contains_key(&unit.name) {
            return Err(ScoresafeError::DuplicateUnit(unit.name));
        }
        self.index.insert(unit.name.clone(), self.units.len());
        self.units.push(unit);
        Ok(())
    }

    /// Look up a unit by name.
    pub fn get(&self, name: &str) -> Option<&TransformationUnit> {
        self.index.get(name).map(|&i| &self.units[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Iterate over units in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &TransformationUnit> {
        self.units.iter()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Every risk tag carried by at least one unit.
    pub fn known_tags(&self) -> BTreeSet<&str> {
        self.units
            .iter()
            .flat_map(|u| u.risk_tags.iter().map(String::as_str))
            .collect()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a TransformationUnit;
    type IntoIter = std::slice::Iter<'a, TransformationUnit>;

    fn into_iter(self) -> Self::IntoIter {
        self.units.iter()
    }
}
