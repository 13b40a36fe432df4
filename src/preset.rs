//! Named presets: a safety profile plus the passes to request under it.

use crate::error::ScoresafeError;
use crate::profile::SafetyProfile;
use crate::unit::Catalog;
use crate::unit::tags::*;

/// Passes known to be harmless for LilyPond scores, in the order they should run.
pub const LILYPOND_PASSES: &[&str] = &[
    "removeDoctype",
    "removeComments",
    "removeMetadata",
    "cleanupAttrs",
    "removeEmptyAttrs",
    "removeEmptyContainers",
    "cleanupNumericValues",
    "collapseGroups",
    "removeUselessStrokeAndFill",
];

/// Names accepted by [`Preset::by_name`].
pub const PRESET_NAMES: &[&str] = &["lilypond", "permissive"];

#[derive(Debug, Clone)]
pub struct Preset {
    pub profile: SafetyProfile,
    pub requested: Vec<String>,
}

impl Preset {
    /// Conservative settings for LilyPond-generated scores.
    ///
    /// Scripts look notes up by `id` and `data-*` attributes, the page must keep
    /// its size and viewBox to scale, and note heads are matched by position.
    pub fn lilypond() -> Self {
        Self {
            profile: SafetyProfile::new(
                "lilypond",
                [
                    ALTERS_IDENTIFIERS,
                    ALTERS_NAMESPACES,
                    ALTERS_STYLES,
                    ALTERS_DIMENSIONS,
                    ALTERS_GEOMETRY,
                    STRIPS_DATA_ATTRIBUTES,
                ],
            ),
            requested: LILYPOND_PASSES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Everything the catalog enables by default, nothing forbidden.
    pub fn permissive(catalog: &Catalog) -> Self {
        Self {
            profile: SafetyProfile::permissive("permissive"),
            requested: catalog
                .iter()
                .filter(|u| u.default_enabled)
                .map(|u| u.name.clone())
                .collect(),
        }
    }

    pub fn by_name(name: &str, catalog: &Catalog) -> Result<Self, ScoresafeError> {
        match name {
            "lilypond" => Ok(Self::lilypond()),
            "permissive" => Ok(Self::permissive(catalog)),
            other => Err(ScoresafeError::UnknownPreset(other.to_string())),
        }
    }
}
