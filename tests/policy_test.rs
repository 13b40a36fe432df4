//! Planning behavior through the public API, against hand-built and built-in catalogs.

use scoresafe::{
    Catalog, LILYPOND_PASSES, Preset, ProfileWarning, Rejection, SafetyProfile,
    TransformationUnit, build_plan, default_plan, plan_preset, tags, validate_profile,
};

fn example_catalog() -> Catalog {
    Catalog::new([
        TransformationUnit::new("cleanupAttrs"),
        TransformationUnit::new("cleanupIds").with_tags([tags::ALTERS_IDENTIFIERS]),
    ])
    .unwrap()
}

fn example_profile() -> SafetyProfile {
    SafetyProfile::new("ids", [tags::ALTERS_IDENTIFIERS])
}

#[test]
fn test_mixed_request_is_rejected() {
    let report = build_plan(
        &example_catalog(),
        ["cleanupAttrs", "cleanupIds"],
        &example_profile(),
    )
    .unwrap_err();

    assert_eq!(report.entries.len(), 1);
    assert_eq!(
        report.entries[0],
        Rejection::UnsafeUnit {
            name: "cleanupIds".into(),
            tags: vec!["alters-identifiers".into()],
        }
    );
}

#[test]
fn test_duplicate_request() {
    let plan = build_plan(
        &example_catalog(),
        ["cleanupAttrs", "cleanupAttrs"],
        &example_profile(),
    )
    .unwrap();
    assert_eq!(plan.names(), ["cleanupAttrs"]);
}

#[test]
fn test_unknown_name_never_plans() {
    for request in [vec!["ghost"], vec!["cleanupAttrs", "ghost"], vec!["ghost", "ghost"]] {
        let report = build_plan(&example_catalog(), &request, &example_profile()).unwrap_err();
        assert!(
            report
                .entries
                .iter()
                .any(|e| matches!(e, Rejection::UnknownUnit { name } if name == "ghost")),
            "no UnknownUnit for {request:?}"
        );
    }
}

#[test]
fn test_every_unsafe_unit_listed() {
    let catalog = Catalog::svgo();
    let preset = Preset::lilypond();
    let request = [
        "removeComments",
        "cleanupIds",
        "cleanupAttrs",
        "convertPathData",
        "removeViewBox",
    ];

    let report = build_plan(&catalog, request, &preset.profile).unwrap_err();
    let names: Vec<_> = report.entries.iter().map(Rejection::name).collect();
    assert_eq!(names, ["cleanupIds", "convertPathData", "removeViewBox"]);
}

#[test]
fn test_dead_constraint_warning() {
    let profile = SafetyProfile::new("p", [tags::ALTERS_IDENTIFIERS, "nonexistent-tag"]);
    let warnings = validate_profile(&profile, &example_catalog());
    assert_eq!(
        warnings,
        [ProfileWarning::DeadConstraint {
            tag: "nonexistent-tag".into()
        }]
    );
}

/// Every plan the built-in catalog can produce respects the profile that built it.
#[test]
fn test_safety_invariant_over_builtin_catalog() {
    let catalog = Catalog::svgo();
    let all_names: Vec<_> = catalog.iter().map(|u| u.name.clone()).collect();
    let known: Vec<_> = catalog.known_tags().into_iter().collect();

    // Every single-tag profile plus every pair of tags.
    let mut profiles = vec![SafetyProfile::permissive("none")];
    for (i, a) in known.iter().enumerate() {
        profiles.push(SafetyProfile::new(*a, [*a]));
        for b in &known[i + 1..] {
            profiles.push(SafetyProfile::new(format!("{a}+{b}"), [*a, *b]));
        }
    }

    for profile in &profiles {
        let safe: Vec<_> = all_names
            .iter()
            .filter(|n| profile.allows(catalog.get(n).unwrap()))
            .collect();
        let plan = build_plan(&catalog, &safe, profile).unwrap();
        assert_eq!(plan.len(), safe.len());

        let defaults = default_plan(&catalog, profile);
        for name in plan.iter().chain(defaults.plan.iter()) {
            let unit = catalog.get(name).unwrap();
            assert!(
                profile.conflicts(unit).is_empty(),
                "{name} planned under {}",
                profile.name
            );
        }

        match build_plan(&catalog, &all_names, profile) {
            Ok(plan) => assert!(plan.iter().all(|n| profile.allows(catalog.get(n).unwrap()))),
            Err(report) => assert!(
                report
                    .entries
                    .iter()
                    .all(|e| matches!(e, Rejection::UnsafeUnit { .. }))
            ),
        }
    }
}

#[test]
fn test_lilypond_preset_reproduces_safe_list() {
    let plan = plan_preset("lilypond").unwrap();
    assert_eq!(plan.names(), LILYPOND_PASSES);
}

#[test]
fn test_lilypond_rejects_score_breaking_plugins() {
    let catalog = Catalog::svgo();
    let preset = Preset::lilypond();
    let avoided = [
        "cleanupIds",
        "removeUnusedNS",
        "mergeStyles",
        "inlineStyles",
        "removeDimensions",
        "removeViewBox",
        "convertPathData",
        "removeUnknownsAndDefaults",
    ];

    for name in avoided {
        let report = build_plan(&catalog, [name], &preset.profile).unwrap_err();
        assert!(
            matches!(&report.entries[..], [Rejection::UnsafeUnit { name: n, .. }] if n == name),
            "{name} should be unsafe under lilypond"
        );
    }
}

#[test]
fn test_lilypond_profile_has_no_dead_constraints() {
    let catalog = Catalog::svgo();
    let preset = Preset::lilypond();
    assert!(validate_profile(&preset.profile, &catalog).is_empty());
}

#[test]
fn test_permissive_preset_plans_all_defaults() {
    let catalog = Catalog::svgo();
    let plan = plan_preset("permissive").unwrap();
    let defaults = catalog.iter().filter(|u| u.default_enabled).count();
    assert_eq!(plan.len(), defaults);
}

#[test]
fn test_plan_serializes_as_name_list() {
    let plan = build_plan(
        &example_catalog(),
        ["cleanupAttrs"],
        &SafetyProfile::permissive("open"),
    )
    .unwrap();
    assert_eq!(serde_json::to_string(&plan).unwrap(), r#"["cleanupAttrs"]"#);
}
