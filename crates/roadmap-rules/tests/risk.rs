use roadmap_core::models::hhq::{HhqResponses, HhqValue};
use roadmap_rules::error::RuleError;
use roadmap_rules::risk::{RiskAxis, RiskWeights, readable_name};

fn answers(keys: &[&str]) -> HhqResponses {
    keys.iter().map(|k| (*k, HhqValue::Flag(true))).collect()
}

#[test]
fn four_single_axis_items_split_evenly() {
    let hhq = answers(&["hh-head-injury", "hh-stroke", "hh-diabetes", "hh-menopause"]);
    let profile = RiskWeights::builtin().profile(&hhq);

    assert_eq!(profile.score(RiskAxis::Traumatic), 1.0);
    assert_eq!(profile.score(RiskAxis::Vascular), 1.0);
    assert_eq!(profile.score(RiskAxis::Glycotoxic), 1.0);
    assert_eq!(profile.score(RiskAxis::Atrophic), 1.0);
    assert_eq!(profile.score(RiskAxis::Inflammatory), 0.0);
    assert_eq!(profile.score(RiskAxis::Toxic), 0.0);
    for axis in [
        RiskAxis::Atrophic,
        RiskAxis::Glycotoxic,
        RiskAxis::Vascular,
        RiskAxis::Traumatic,
    ] {
        assert_eq!(profile.percentage(axis), 25.0);
    }

    let ranking: Vec<RiskAxis> = profile.ranking.iter().map(|r| r.axis).collect();
    assert_eq!(
        ranking,
        vec![
            RiskAxis::Atrophic,
            RiskAxis::Glycotoxic,
            RiskAxis::Vascular,
            RiskAxis::Traumatic,
            RiskAxis::Inflammatory,
            RiskAxis::Toxic,
        ]
    );
    let top: Vec<RiskAxis> = profile.top(3).iter().map(|r| r.axis).collect();
    assert_eq!(
        top,
        vec![RiskAxis::Atrophic, RiskAxis::Glycotoxic, RiskAxis::Vascular]
    );
    assert_eq!(profile.details(RiskAxis::Traumatic), ["Head Injury"]);
    assert!(profile.details(RiskAxis::Toxic).is_empty());
}

#[test]
fn empty_or_false_answers_give_zero_profile() {
    let mut hhq = HhqResponses::new();
    hhq.set_flag("hh-stroke", false);
    hhq.set_text("hh-height", "170 cm");
    let profile = RiskWeights::builtin().profile(&hhq);

    assert_eq!(profile.total(), 0.0);
    assert!(profile.percentages.values().all(|p| *p == 0.0));
    assert!(profile.top(3).is_empty());
    let ranking: Vec<RiskAxis> = profile.ranking.iter().map(|r| r.axis).collect();
    assert_eq!(ranking, RiskAxis::ALL.to_vec());
}

#[test]
fn unknown_keys_contribute_nothing() {
    let hhq = answers(&["hh-stroke", "hh-not-a-question"]);
    let profile = RiskWeights::builtin().profile(&hhq);
    assert_eq!(profile.total(), 1.0);
    assert_eq!(profile.percentage(RiskAxis::Vascular), 100.0);
}

#[test]
fn details_keep_input_order() {
    let weights = RiskWeights::from_json(
        r#"{"hh-b": [1, 0, 0, 0, 0, 0], "hh-a": [2, 0, 0, 0, 0, 1]}"#,
    )
    .unwrap();
    let hhq = answers(&["hh-b", "hh-a"]);
    let profile = weights.profile(&hhq);

    assert_eq!(profile.details(RiskAxis::Inflammatory), ["B", "A"]);
    assert_eq!(profile.details(RiskAxis::Traumatic), ["A"]);
    assert_eq!(profile.score(RiskAxis::Inflammatory), 3.0);
    assert_eq!(profile.percentage(RiskAxis::Inflammatory), 75.0);
}

#[test]
fn underscore_keys_match_hyphenated_weights() {
    let weights = RiskWeights::builtin();
    assert_eq!(weights.weight("hh_stroke"), weights.weight("hh-stroke"));
    assert!(weights.weight("hh-stroke").is_some());
}

#[test]
fn rejects_negative_and_duplicate_weights() {
    let negative = RiskWeights::from_json(r#"{"hh-x": [0, -1, 0, 0, 0, 0]}"#);
    assert!(matches!(
        negative,
        Err(RuleError::InvalidWeight {
            axis: RiskAxis::Atrophic,
            ..
        })
    ));

    let duplicate = RiskWeights::new([
        ("hh-x".to_string(), [0.0; 6]),
        ("hh_x".to_string(), [0.0; 6]),
    ]);
    assert!(matches!(duplicate, Err(RuleError::DuplicateWeight(key)) if key == "hh-x"));

    let short = RiskWeights::from_json(r#"{"hh-x": [0, 1]}"#);
    assert!(matches!(short, Err(RuleError::Serialization(_))));
}

#[test]
fn readable_names() {
    assert_eq!(readable_name("hh-high-blood-pressure"), "High Blood Pressure");
    assert_eq!(readable_name("hh-tbi"), "Tbi");
    assert_eq!(readable_name("stroke"), "Stroke");
}

#[test]
fn axes_serialize_in_snake_case() {
    let json = serde_json::to_string(&RiskAxis::Glycotoxic).unwrap();
    assert_eq!(json, "\"glycotoxic\"");
    assert_eq!(RiskAxis::Traumatic.to_string(), "traumatic");
}
