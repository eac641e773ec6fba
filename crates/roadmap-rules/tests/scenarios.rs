use roadmap_core::ids::lab::*;
use roadmap_core::models::client::{Client, Sex};
use roadmap_core::models::diagnostic::{DiagnosticCode, Diagnostics};
use roadmap_core::models::hhq::HhqResponses;
use roadmap_core::models::lab::{LabPanel, LabValue, MthfrStatus, RawLabEntry};
use roadmap_labs::{CanonicalRegistry, Canonicalizer};
use roadmap_rules::{FactStore, RuleCatalog, RuleEngine, RuleOutcome};

fn panel(values: &[(&str, f64)]) -> LabPanel {
    values
        .iter()
        .map(|(id, v)| (id.to_string(), LabValue::numeric(*id, *v)))
        .collect()
}

fn evaluate(sex: Sex, labs: LabPanel, hhq: HhqResponses) -> (RuleOutcome, Diagnostics) {
    let engine = RuleEngine::new(RuleCatalog::builtin(), CanonicalRegistry::builtin());
    let facts = FactStore::new(Client::new("Test Client", sex), labs, hhq);
    let mut diagnostics = Diagnostics::new();
    let outcome = engine.evaluate(&facts, &mut diagnostics);
    (outcome, diagnostics)
}

#[test]
fn apoe_e4_homozygote_with_high_copper_zinc() {
    let mut labs = panel(&[(MIN_CU, 120.0), (MIN_ZN, 80.0)]);
    labs.insert(APO1.to_string(), LabValue::allele(APO1, 4));
    labs.insert(APO2.to_string(), LabValue::allele(APO2, 4));

    let (outcome, diagnostics) = evaluate(Sex::Female, labs, HhqResponses::new());

    assert!(outcome.flag("quick-E4E4"));
    assert!(outcome.flag("quick-apo-e4-genetics"));
    assert!(!outcome.flag("quick-E4"));
    assert!(!outcome.flag("quick-nonE4"));
    assert!(outcome.flag("quick-CZratio-14-elevated"));
    assert!(!outcome.flag("quick-CZratio-14"));
    assert!(!outcome.flag("zinc-liposomalC"));
    assert_eq!(outcome.substitution("cz-ratio"), Some("1.5"));
    assert_eq!(outcome.substitution("genome-type"), Some("E4/E4"));
    assert!(diagnostics.is_empty());
}

#[test]
fn copper_zinc_ratio_with_e3_allele() {
    let mut labs = panel(&[(MIN_CU, 120.0), (MIN_ZN, 80.0)]);
    labs.insert(APO1.to_string(), LabValue::allele(APO1, 3));
    labs.insert(APO2.to_string(), LabValue::allele(APO2, 4));

    let (outcome, _) = evaluate(Sex::Female, labs, HhqResponses::new());

    assert!(outcome.flag("quick-E4"));
    assert!(outcome.flag("quick-E4E3"));
    assert!(outcome.flag("quick-CZratio-14"));
    assert!(!outcome.flag("zinc-liposomalC"));
}

#[test]
fn copper_zinc_ratio_is_strictly_greater_than() {
    let labs = panel(&[(MIN_CU, 130.0), (MIN_ZN, 100.0)]);
    let (outcome, _) = evaluate(Sex::Male, labs, HhqResponses::new());
    assert!(!outcome.flag("quick-CZratio-14-elevated"));
    assert!(outcome.flag("quick-CZratio-14-optimal"));
}

#[test]
fn non_e4_needs_both_alleles() {
    let mut labs = LabPanel::new();
    labs.insert(APO1.to_string(), LabValue::allele(APO1, 3));
    let (outcome, _) = evaluate(Sex::Male, labs.clone(), HhqResponses::new());
    assert!(!outcome.flag("quick-nonE4"));
    assert!(!outcome.flag("quick-apoe-known"));
    assert_eq!(outcome.substitution("genome-type"), None);

    labs.insert(APO2.to_string(), LabValue::allele(APO2, 3));
    let (outcome, _) = evaluate(Sex::Male, labs, HhqResponses::new());
    assert!(outcome.flag("quick-nonE4"));
    assert_eq!(outcome.substitution("genome-type"), Some("E3/E3"));
}

#[test]
fn adrenal_categories() {
    let labs = panel(&[(NEURO_PREG, 75.0), (NEURO_DHEAS, 135.0), (NEURO_CORT, 12.0)]);
    let (outcome, diagnostics) = evaluate(Sex::Female, labs, HhqResponses::new());

    assert!(outcome.flag("quick-PROG-50-100"));
    assert!(outcome.flag("quick-DHEA-150"));
    assert!(outcome.flag("quick-cortisol-15"));
    assert!(!outcome.flag("quick-pregnenolone-101"));
    assert!(!outcome.flag("quick-DHEA-151"));
    assert!(!outcome.flag("quick-pregnenolone-50"));
    assert!(diagnostics.is_empty());
}

#[test]
fn adrenal_boundaries() {
    let labs = panel(&[(NEURO_PREG, 100.0), (NEURO_DHEAS, 150.0)]);
    let (outcome, _) = evaluate(Sex::Female, labs, HhqResponses::new());
    assert!(outcome.flag("quick-PROG-50-100"));
    assert!(!outcome.flag("quick-pregnenolone-101"));
    assert!(outcome.flag("quick-DHEA-151"));
    assert!(!outcome.flag("quick-DHEA-150"));

    let labs = panel(&[(NEURO_PREG, 50.0)]);
    let (outcome, _) = evaluate(Sex::Female, labs, HhqResponses::new());
    assert!(outcome.flag("quick-PROG-50-100"));
    assert!(!outcome.flag("quick-pregnenolone-50"));
}

fn canonical(sex: Sex, entries: &[RawLabEntry]) -> LabPanel {
    let mut diagnostics = Diagnostics::new();
    let labs = Canonicalizer::new(CanonicalRegistry::builtin()).canonicalize(
        entries,
        sex,
        &mut diagnostics,
    );
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    labs
}

#[test]
fn male_panel_is_suppressed_for_female_client() {
    let entries = [
        RawLabEntry::new("Testosterone", "250").with_unit("ng/dL"),
        RawLabEntry::new("Sex Horm Binding Glob", "60").with_unit("nmol/L"),
    ];

    let labs = canonical(Sex::Female, &entries);
    assert!(labs.contains_key(FHT_TT));
    let (outcome, _) = evaluate(Sex::Female, labs, HhqResponses::new());

    let catalog = RuleCatalog::builtin();
    for rule in catalog.iter().filter(|r| r.gate == Some(Sex::Male)) {
        assert!(!outcome.flag(&rule.id), "{} should be suppressed", rule.id);
        for publication in &rule.publish {
            assert_eq!(
                outcome.substitution(&publication.placeholder),
                None,
                "{} leaked from {}",
                publication.placeholder,
                rule.id
            );
        }
    }
    assert_eq!(outcome.substitution("testosterone-value"), None);
    assert_eq!(outcome.substitution("shbg-value"), None);
    assert!(outcome.flag("quick-female-testosterone"));
    assert_eq!(outcome.substitution("female-testosterone-value"), Some("250"));

    let labs = canonical(Sex::Male, &entries);
    let (outcome, _) = evaluate(Sex::Male, labs, HhqResponses::new());
    assert!(outcome.flag("quick-male-hormones"));
    assert!(outcome.flag("testosterone-low"));
    assert!(outcome.flag("quick-male-hormones-shbg"));
    assert!(outcome.flag("quick-male-hormones-hrt"));
    assert!(!outcome.flag("quick-female-testosterone"));
    assert_eq!(outcome.substitution("testosterone-value"), Some("250"));
    assert_eq!(outcome.substitution("female-testosterone-value"), None);
}

#[test]
fn unknown_sex_suppresses_both_hormone_sections() {
    let labs = panel(&[(MHT_TT, 250.0), (FHT_FSH, 40.0)]);
    let (outcome, _) = evaluate(Sex::Unknown, labs, HhqResponses::new());
    assert!(!outcome.flag("quick-male-hormones"));
    assert!(!outcome.flag("quick-female-hormones"));
    assert!(!outcome.flag("quick-female-hormones-hrt"));
}

#[test]
fn psa_blocks_male_hormone_replacement() {
    let labs = panel(&[(MHT_TT, 250.0), (MHT_PSA, 5.2)]);
    let (outcome, _) = evaluate(Sex::Male, labs, HhqResponses::new());
    assert!(outcome.flag("Quick-PSA"));
    assert!(!outcome.flag("quick-male-hormones-hrt"));
}

#[test]
fn vitamin_d_crp_and_homocysteine() {
    let labs = panel(&[(VIT_D25, 25.0), (INFLAM_CRP, 2.1), (INFLAM_HOMOCYS, 9.0)]);
    let (outcome, diagnostics) = evaluate(Sex::Female, labs, HhqResponses::new());

    assert!(outcome.flag("vitamin-D-low"));
    assert!(outcome.flag("vitamin-D-suboptimal"));
    assert!(outcome.flag("CRP-elevated"));
    assert!(outcome.flag("homocysteine-elevated"));
    assert!(outcome.flag("needs-methyl"));
    assert!(outcome.flag("D-less-30"));
    assert!(!outcome.flag("D-30-39"));
    assert_eq!(outcome.substitution("vitamin-d-value"), Some("25"));
    assert_eq!(outcome.substitution("vitamin-d-dose"), Some("10,000 iu"));
    assert_eq!(outcome.substitution("crp-value"), Some("2.1"));
    assert!(diagnostics.is_empty());
}

#[test]
fn vitamin_d_bands_are_half_open() {
    for (value, band) in [
        (30.0, "D-30-39"),
        (39.9, "D-30-39"),
        (40.0, "D-40-49"),
        (50.0, "D-50-55"),
        (55.0, "D-55-59"),
        (60.0, "D-optimal"),
    ] {
        let (outcome, _) = evaluate(Sex::Male, panel(&[(VIT_D25, value)]), HhqResponses::new());
        let matched: Vec<&str> = outcome
            .matched()
            .filter(|id| id.starts_with("D-"))
            .collect();
        assert_eq!(matched, vec![band], "vitamin D {value}");
    }
}

#[test]
fn missing_labs_publish_nothing() {
    let (outcome, diagnostics) = evaluate(Sex::Female, LabPanel::new(), HhqResponses::new());
    assert!(outcome.substitutions.is_empty());
    assert!(!outcome.flag("quick-VitD"));
    assert!(!outcome.flag("vitamin-D-low"));
    assert!(diagnostics.is_empty());
    assert_eq!(outcome.flags.len(), RuleCatalog::builtin().len());
}

#[test]
fn mthfr_variants_and_alcohol() {
    let mut labs = LabPanel::new();
    labs.insert(
        MTHFR_1.to_string(),
        LabValue::mthfr(MTHFR_1, MthfrStatus::Heterozygous),
    );
    labs.insert(MTHFR_2.to_string(), LabValue::mthfr(MTHFR_2, MthfrStatus::Normal));
    let mut hhq = HhqResponses::new();
    hhq.set_flag("hh-alcohol-consumption", true);

    let (outcome, _) = evaluate(Sex::Male, labs, hhq);
    assert!(outcome.flag("quick-MTHFR1"));
    assert!(!outcome.flag("quick-MTHFR2"));
    assert!(outcome.flag("has-MTHFR-variants"));
    assert!(!outcome.flag("mthfr-homozygous"));
    assert!(outcome.flag("quick-stopETOH"));
    assert_eq!(outcome.substitution("mthfr-c677t"), Some("heterozygous"));
    assert_eq!(outcome.substitution("mthfr-a1298c"), Some("normal"));
}

#[test]
fn homa_ir_and_bmi_are_derived() {
    let labs = panel(&[(METAB_INS, 9.0), (CHEM_GLU, 90.0)]);
    let mut hhq = HhqResponses::new();
    hhq.set_text("hh-height", "5'10\"");
    hhq.set_text("hh-weight", "200 lbs");

    let (outcome, _) = evaluate(Sex::Male, labs, hhq);
    assert_eq!(outcome.substitution("homa-ir-value"), Some("2"));
    assert!(!outcome.flag("HOMA-IR-elevated"));
    assert!(outcome.flag("insulin-elevated"));
    assert_eq!(outcome.substitution("bmi-value"), Some("28.7"));
    assert!(outcome.flag("quick-BMI-OSA"));
    assert!(!outcome.flag("quick-bmi-obese"));
}

#[test]
fn vitamin_e_row_bands() {
    let mut hhq = HhqResponses::new();
    hhq.set_flag("hh-blood-thinner", true);
    for (value, row, elevated, optimal) in [
        (10.0, true, false, false),
        (15.0, false, false, true),
        (20.0, false, false, true),
        (25.0, true, false, false),
        (35.0, false, true, false),
    ] {
        let (outcome, _) = evaluate(Sex::Female, panel(&[(VIT_E, value)]), hhq.clone());
        assert_eq!(outcome.flag("quick-vitE-row"), row, "vitamin E {value}");
        assert_eq!(outcome.flag("Quick-Thinner"), row, "vitamin E {value}");
        assert_eq!(outcome.flag("quick-vitE-row-elevated"), elevated);
        assert_eq!(outcome.flag("VitE12"), optimal);
    }
}

#[test]
fn catalog_lab_ids_missing_from_registry_are_reported() {
    let catalog = RuleCatalog::from_json(
        r#"[
            {"id": "ghost", "when": {"type": "compare", "metric": {"metric": "lab", "lab": "NOT_A_LAB"}, "op": "gt", "value": 1.0}},
            {"id": "ghost-negated", "when": {"type": "not", "not": {"type": "compare", "metric": {"metric": "lab", "lab": "NOT_A_LAB"}, "op": "gt", "value": 1.0}}},
            {"id": "real", "when": {"type": "compare", "metric": {"metric": "lab", "lab": "VIT_D25"}, "op": "lt", "value": 30.0}}
        ]"#,
    )
    .unwrap();
    let engine = RuleEngine::new(&catalog, CanonicalRegistry::builtin());
    let facts = FactStore::new(
        Client::new("Pat", Sex::Male),
        panel(&[(VIT_D25, 20.0)]),
        HhqResponses::new(),
    );
    let mut diagnostics = Diagnostics::new();
    let outcome = engine.evaluate(&facts, &mut diagnostics);

    assert!(!outcome.flag("ghost"));
    assert!(outcome.flag("ghost-negated"));
    assert!(outcome.flag("real"));
    assert_eq!(diagnostics.count(DiagnosticCode::UnknownFactId), 2);
}

#[test]
fn later_rules_win_publication_conflicts() {
    let catalog = RuleCatalog::from_json(
        r#"[
            {"id": "first", "when": {"type": "all", "all": []},
             "publish": [{"placeholder": "shared", "from": "text", "text": "one"}]},
            {"id": "second", "when": {"type": "all", "all": []},
             "publish": [{"placeholder": "shared", "from": "text", "text": "two"}]},
            {"id": "third", "when": {"type": "any", "any": []},
             "publish": [{"placeholder": "shared", "from": "text", "text": "three", "when_matched": true}]}
        ]"#,
    )
    .unwrap();
    let engine = RuleEngine::new(&catalog, CanonicalRegistry::builtin());
    let facts = FactStore::new(Client::new("Pat", Sex::Male), LabPanel::new(), HhqResponses::new());
    let outcome = engine.evaluate(&facts, &mut Diagnostics::new());
    assert_eq!(outcome.substitution("shared"), Some("two"));
}

#[test]
fn builtin_catalog_references_only_registered_labs() {
    let registry = CanonicalRegistry::builtin();
    for rule in RuleCatalog::builtin().iter() {
        for lab in rule.references().labs {
            assert!(registry.contains(&lab), "{} reads unknown lab {lab}", rule.id);
        }
    }
}
