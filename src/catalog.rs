//! The built-in catalog of svgo plugins.
//!
//! svgo does not publish what each plugin may break, so the risk tags here are a
//! judgment call, made from the point of view of engraved scores (LilyPond output
//! with scripted note lookups by `id`, `data-*` attributes and exact geometry).

use crate::unit::tags::*;
use crate::unit::{Catalog, TransformationUnit};

/// (name, enabled in `preset-default`, risk tags, summary)
type Entry = (&'static str, bool, &'static [&'static str], &'static str);

const SVGO_UNITS: &[Entry] = &[
    ("removeDoctype", true, &[DROPS_CONTENT], "remove the DOCTYPE declaration"),
    ("removeXMLProcInst", true, &[DROPS_CONTENT], "remove XML processing instructions"),
    ("removeComments", true, &[DROPS_CONTENT], "remove comments"),
    ("removeMetadata", true, &[DROPS_CONTENT], "remove <metadata>"),
    ("removeEditorsNSData", true, &[DROPS_CONTENT, ALTERS_NAMESPACES], "remove editor namespaces, elements and attributes"),
    ("cleanupAttrs", true, &[], "collapse whitespace inside attribute values"),
    ("mergeStyles", true, &[ALTERS_STYLES], "merge multiple <style> elements into one"),
    ("inlineStyles", true, &[ALTERS_STYLES], "move <style> rules into style attributes"),
    ("minifyStyles", true, &[ALTERS_STYLES], "minify <style> content and drop unused rules"),
    ("cleanupIds", true, &[ALTERS_IDENTIFIERS], "remove unused ids and shorten the rest"),
    ("removeUselessDefs", true, &[DROPS_CONTENT], "remove <defs> children without an id"),
    ("cleanupNumericValues", true, &[ROUNDS_NUMBERS], "round numbers and drop default px units"),
    ("convertColors", true, &[ALTERS_PRESENTATION], "shorten color values"),
    ("removeUnknownsAndDefaults", true, &[STRIPS_DATA_ATTRIBUTES, ALTERS_PRESENTATION], "remove unknown elements, unknown attributes and default values"),
    ("removeNonInheritableGroupAttrs", true, &[ALTERS_PRESENTATION], "remove non-inheritable presentation attributes from groups"),
    ("removeUselessStrokeAndFill", true, &[ALTERS_PRESENTATION], "remove stroke and fill that have no effect"),
    ("removeViewBox", true, &[ALTERS_DIMENSIONS], "remove viewBox when it matches width and height"),
    ("cleanupEnableBackground", true, &[ALTERS_PRESENTATION], "remove or tidy enable-background"),
    ("removeHiddenElems", true, &[DROPS_CONTENT, ALTERS_STRUCTURE], "remove hidden and zero-sized elements"),
    ("removeEmptyText", true, &[DROPS_CONTENT], "remove empty text elements"),
    ("convertShapeToPath", true, &[ALTERS_GEOMETRY], "convert basic shapes to paths"),
    ("convertEllipseToCircle", true, &[ALTERS_GEOMETRY], "convert round ellipses to circles"),
    ("moveElemsAttrsToGroup", true, &[ALTERS_STRUCTURE], "hoist shared attributes to the parent group"),
    ("moveGroupAttrsToElems", true, &[ALTERS_STRUCTURE, ALTERS_GEOMETRY], "push group transforms down to children"),
    ("collapseGroups", true, &[ALTERS_STRUCTURE], "collapse groups that serve no purpose"),
    ("convertPathData", true, &[ALTERS_GEOMETRY], "rewrite path data to shorter, rounded commands"),
    ("convertTransform", true, &[ALTERS_GEOMETRY], "collapse and round transforms"),
    ("removeEmptyAttrs", true, &[], "remove attributes with empty values"),
    ("removeEmptyContainers", true, &[ALTERS_STRUCTURE], "remove container elements without children"),
    ("mergePaths", true, &[ALTERS_GEOMETRY, ALTERS_STRUCTURE], "merge adjacent paths with equal attributes"),
    ("removeUnusedNS", true, &[ALTERS_NAMESPACES], "remove unused namespace declarations"),
    ("sortAttrs", true, &[], "sort attributes for better compression"),
    ("sortDefsChildren", true, &[ALTERS_STRUCTURE], "sort <defs> children for better compression"),
    ("removeTitle", true, &[DROPS_CONTENT], "remove <title>"),
    ("removeDesc", true, &[DROPS_CONTENT], "remove <desc>"),
    ("cleanupListOfValues", false, &[ROUNDS_NUMBERS], "round numeric lists such as viewBox and points"),
    ("convertStyleToAttrs", false, &[ALTERS_STYLES], "turn style declarations into attributes"),
    ("prefixIds", false, &[ALTERS_IDENTIFIERS, ALTERS_STYLES], "prefix ids and class names"),
    ("removeDimensions", false, &[ALTERS_DIMENSIONS], "remove width and height in favor of viewBox"),
    ("removeXMLNS", false, &[ALTERS_NAMESPACES], "remove the xmlns attribute for inline SVG"),
    ("removeRasterImages", false, &[DROPS_CONTENT], "remove raster image references"),
    ("removeScriptElement", false, &[DROPS_CONTENT], "remove <script> elements"),
    ("removeStyleElement", false, &[ALTERS_STYLES, DROPS_CONTENT], "remove <style> elements"),
    ("removeOffCanvasPaths", false, &[ALTERS_GEOMETRY, DROPS_CONTENT], "remove paths drawn outside the viewBox"),
    ("reusePaths", false, &[ALTERS_IDENTIFIERS, ALTERS_STRUCTURE], "replace repeated paths with <use> references"),
];

impl Catalog {
    /// svgo's plugins, in `preset-default` order followed by the opt-in plugins.
    pub fn svgo() -> Self {
        Catalog::from_static(
            SVGO_UNITS
                .iter()
                .map(|&(name, default_enabled, risk_tags, summary)| {
                    TransformationUnit::new(name)
                        .with_tags(risk_tags.iter().copied())
                        .enabled_by_default(default_enabled)
                        .with_summary(summary)
                })
                .collect(),
        )
    }
}
