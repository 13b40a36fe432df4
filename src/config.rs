//! Loading profiles and catalogs from JSON or TOML files.

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::ScoresafeError;
use crate::profile::SafetyProfile;
use crate::unit::Catalog;

const MAX_CONFIG_BYTES: usize = 1024 * 1024;

fn load<T: DeserializeOwned>(path: &Path) -> Result<T, ScoresafeError> {
    let bytes = std::fs::read(path)?;
    if bytes.len() > MAX_CONFIG_BYTES {
        return Err(ScoresafeError::TooLarge {
            size: bytes.len(),
            max: MAX_CONFIG_BYTES,
        });
    }
    let raw = String::from_utf8(bytes).map_err(|e| e.utf8_error())?;
    let ext = path.extension().and_then(|s| s.to_str());
    let value = match ext {
        Some("json") => serde_json::from_str(&raw)?,
        Some("toml") => toml::from_str(&raw)?,
        other => {
            return Err(ScoresafeError::UnsupportedExtension(
                other.unwrap_or("").to_string(),
            ));
        }
    };
    tracing::debug!(path = %path.display(), "loaded config file");
    Ok(value)
}

/// Read and validate a safety profile.
pub fn load_profile(path: impl AsRef<Path>) -> Result<SafetyProfile, ScoresafeError> {
    let profile: SafetyProfile = load(path.as_ref())?;
    profile.validate()?;
    Ok(profile)
}

/// Read a catalog of transformation units. Every unit is validated on the way in.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Catalog, ScoresafeError> {
    load(path.as_ref())
}
