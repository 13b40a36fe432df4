//! Render a plan as an svgo configuration module.

use minijinja::{AutoEscape, Environment, Error, ErrorKind, context};
use serde::Serialize;

use crate::error::ScoresafeError;
use crate::plan::ExecutionPlan;
use crate::profile::SafetyProfile;
use crate::unit::Catalog;

const TEMPLATE_NAME: &str = "svgo.config.js";

const TEMPLATE: &str = r#"// svgo.config.js - generated by scoresafe for profile {{ profile|quote }}
module.exports = {
  plugins: [
{% for name in plan %}    {{ name|quote }},
{% endfor %}{% if excluded %}
    // Unsafe under {{ profile|quote }}:
{% for unit in excluded %}    // {{ unit.name|quote }}, // {{ unit.tags|join(", ") }}
{% endfor %}{% endif %}  ]
};
"#;

#[derive(Serialize)]
struct Excluded<'a> {
    name: &'a str,
    tags: Vec<&'a str>,
}

/// JS string literal. JSON escaping covers every control character; the two
/// Unicode line separators are escaped as well since they end a `//` comment.
fn quote(value: String) -> Result<String, Error> {
    let literal = serde_json::to_string(&value)
        .map_err(|e| Error::new(ErrorKind::InvalidOperation, e.to_string()))?;
    Ok(literal
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029"))
}

/// Render `plan` as a `module.exports = { plugins: [...] }` file.
///
/// Catalog units that are not in the plan and conflict with `profile` are listed
/// as commented-out entries, annotated with the tags that rule them out.
pub fn render_svgo_config(
    plan: &ExecutionPlan,
    catalog: &Catalog,
    profile: &SafetyProfile,
) -> Result<String, ScoresafeError> {
    let mut env = Environment::new();
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env.add_filter("quote", quote);
    env.add_template(TEMPLATE_NAME, TEMPLATE)?;

    let excluded: Vec<_> = catalog
        .iter()
        .filter(|u| !plan.contains(&u.name))
        .map(|u| Excluded {
            name: &u.name,
            tags: profile.conflicts(u),
        })
        .filter(|e| !e.tags.is_empty())
        .collect();

    let tmpl = env.get_template(TEMPLATE_NAME)?;
    let rendered = tmpl.render(context! {
        profile => &profile.name,
        plan => plan.names(),
        excluded => excluded,
    })?;
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::build_plan;
    use crate::unit::{TransformationUnit, tags};

    #[test]
    fn test_quote() {
        assert_eq!(quote("cleanupAttrs".into()).unwrap(), r#""cleanupAttrs""#);
        assert_eq!(quote(r#"say "hi""#.into()).unwrap(), r#""say \"hi\"""#);
        assert_eq!(quote("a\rb".into()).unwrap(), r#""a\rb""#);
        assert_eq!(quote("a\u{2028}b".into()).unwrap(), r#""a\u2028b""#);
        assert_eq!(quote("a\u{2029}b".into()).unwrap(), r#""a\u2029b""#);
    }

    #[test]
    fn test_render_keeps_line_terminators_inside_comments() {
        let catalog = Catalog::new([
            TransformationUnit::new("cleanupAttrs"),
            TransformationUnit::new("cleanupIds").with_tags([tags::ALTERS_IDENTIFIERS]),
        ])
        .unwrap();
        let profile = SafetyProfile::new("x\rprocess.exit(1)", [tags::ALTERS_IDENTIFIERS]);
        let plan = build_plan(&catalog, ["cleanupAttrs"], &profile).unwrap();

        let out = render_svgo_config(&plan, &catalog, &profile).unwrap();
        assert!(!out.contains('\r'));
        assert!(!out.contains('\u{2028}') && !out.contains('\u{2029}'));
        for line in out.lines().filter(|l| l.contains("process.exit")) {
            assert!(line.trim_start().starts_with("//"), "live code: {line:?}");
        }
    }

    #[test]
    fn test_render_lists_plan_and_exclusions() {
        let catalog = Catalog::new([
            TransformationUnit::new("cleanupAttrs"),
            TransformationUnit::new("cleanupIds").with_tags([tags::ALTERS_IDENTIFIERS]),
            TransformationUnit::new("sortAttrs"),
        ])
        .unwrap();
        let profile = SafetyProfile::new("score", [tags::ALTERS_IDENTIFIERS]);
        let plan = build_plan(&catalog, ["cleanupAttrs"], &profile).unwrap();

        let out = render_svgo_config(&plan, &catalog, &profile).unwrap();
        let expected = r#"// svgo.config.js - generated by scoresafe for profile "score"
module.exports = {
  plugins: [
    "cleanupAttrs",

    // Unsafe under "score":
    // "cleanupIds", // alters-identifiers
  ]
};"#;
        assert_eq!(out.trim_end(), expected);
        assert!(!out.contains("sortAttrs"));
    }

    #[test]
    fn test_render_without_exclusions() {
        let catalog = Catalog::new([TransformationUnit::new("cleanupAttrs")]).unwrap();
        let profile = SafetyProfile::permissive("open");
        let plan = build_plan(&catalog, ["cleanupAttrs"], &profile).unwrap();

        let out = render_svgo_config(&plan, &catalog, &profile).unwrap();
        assert!(!out.contains("Unsafe under"));
        assert!(out.contains("    \"cleanupAttrs\",\n  ]"));
    }
}
