use roadmap_core::models::client::Sex;
use roadmap_rules::catalog::{Publication, RuleCatalog, RuleDefinition};
use roadmap_rules::error::RuleError;
use roadmap_rules::metric::Metric;
use roadmap_rules::predicate::{Comparison, Predicate};

#[test]
fn builtin_catalog_loads_and_has_core_rules() {
    let catalog = RuleCatalog::builtin();
    for id in [
        "quick-E4E4",
        "quick-E4",
        "quick-nonE4",
        "quick-CZratio-14",
        "zinc-liposomalC",
        "quick-PROG-50-100",
        "quick-pregnenolone-101",
        "quick-DHEA-150",
        "quick-DHEA-151",
        "quick-cortisol-15",
        "vitamin-D-low",
        "vitamin-D-suboptimal",
        "CRP-elevated",
        "homocysteine-elevated",
        "quick-male-hormones",
        "quick-female-hormones",
    ] {
        assert!(catalog.contains(id), "missing rule {id}");
    }
    assert_eq!(catalog.get("quick-male-hormones").unwrap().gate, Some(Sex::Male));
}

#[test]
fn builtin_rule_ids_fit_template_tags() {
    for rule in RuleCatalog::builtin().iter() {
        assert!(
            rule.id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || "_.:-".contains(c)),
            "{} cannot be named in a template tag",
            rule.id
        );
    }
}

#[test]
fn catalog_json_round_trip_preserves_order() {
    let catalog = RuleCatalog::builtin();
    let json = catalog.to_json_pretty().unwrap();
    let reloaded = RuleCatalog::from_json(&json).unwrap();
    assert_eq!(reloaded.rules(), catalog.rules());
}

#[test]
fn duplicate_and_empty_ids_are_rejected() {
    let rule = RuleDefinition::new("dup", Predicate::always());
    let err = RuleCatalog::new(vec![rule.clone(), rule]).unwrap_err();
    assert!(matches!(err, RuleError::DuplicateRule(id) if id == "dup"));

    let err = RuleCatalog::new(vec![RuleDefinition::new("  ", Predicate::always())]).unwrap_err();
    assert!(matches!(err, RuleError::EmptyRuleId(0)));

    assert!(matches!(
        RuleCatalog::from_json("{\"id\": \"x\"}"),
        Err(RuleError::Serialization(_))
    ));
}

#[test]
fn json_rule_definitions_use_tagged_forms() {
    let catalog = RuleCatalog::from_json(
        r#"[{
            "id": "cz-high",
            "gate": "female",
            "when": {
                "type": "between",
                "metric": {"metric": "ratio", "numerator": "MIN_CU", "denominator": "MIN_ZN"},
                "low": 1.3,
                "high": 5.0,
                "low_inclusive": false
            },
            "publish": [
                {"placeholder": "cz", "from": "metric",
                 "metric": {"metric": "ratio", "numerator": "MIN_CU", "denominator": "MIN_ZN"},
                 "decimals": 1}
            ]
        }]"#,
    )
    .unwrap();

    let expected = RuleDefinition::new(
        "cz-high",
        Predicate::Between {
            metric: Metric::ratio("MIN_CU", "MIN_ZN"),
            low: 1.3,
            high: 5.0,
            low_inclusive: false,
            high_inclusive: true,
        },
    )
    .gated(Sex::Female)
    .publish(Publication::new(
        "cz",
        roadmap_rules::catalog::PublishSource::Metric {
            metric: Metric::ratio("MIN_CU", "MIN_ZN"),
            decimals: 1,
        },
    ));
    assert_eq!(catalog.get("cz-high"), Some(&expected));
}

#[test]
fn references_cover_predicate_gate_and_publications() {
    let rule = RuleDefinition::new(
        "mixed",
        Predicate::all([
            Predicate::lab("VIT_D25", Comparison::Lt, 30.0),
            Predicate::negate(Predicate::hhq("hh_taking_vitamin_d")),
            Predicate::compare(Metric::Bmi, Comparison::Ge, 25.0),
        ]),
    )
    .gated(Sex::Male)
    .publish(Publication::lab("zinc", "MIN_ZN"))
    .publish(Publication::genotype("genome"));

    let refs = rule.references();
    let labs: Vec<&str> = refs.labs.iter().map(String::as_str).collect();
    assert_eq!(labs, ["APO1", "APO2", "MIN_ZN", "VIT_D25"]);
    let hhq: Vec<&str> = refs.hhq.iter().map(String::as_str).collect();
    assert_eq!(hhq, ["hh-height", "hh-taking-vitamin-d", "hh-weight"]);
    assert!(refs.sex);
}
