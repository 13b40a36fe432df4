//! scoresafe - pass planning for SVG minifiers
//!
//! scoresafe decides which optimizer passes may run on a document without
//! breaking what its consumers depend on: stable ids, namespaces, dimensions,
//! path precision. Passes are tagged with the kinds of change they make, a
//! safety profile forbids some of those tags, and a requested pass list is either
//! turned into an execution plan or rejected with every problem listed.
//!
//! The passes themselves belong to the optimizer (svgo, by default); this crate
//! never touches an SVG.

mod catalog;
mod config;
mod error;
mod export;
mod plan;
mod preset;
mod profile;
mod unit;

pub use config::*;
pub use error::*;
pub use export::*;
pub use plan::*;
pub use preset::*;
pub use profile::*;
pub use unit::*;

/// Plan a preset's requested passes against the built-in svgo catalog.
pub fn plan_preset(name: &str) -> Result<ExecutionPlan, ScoresafeError> {
    let catalog = Catalog::svgo();
    let preset = Preset::by_name(name, &catalog)?;
    Ok(build_plan(&catalog, &preset.requested, &preset.profile)?)
}
