use roadmap_core::models::client::{Client, Sex, parse_date};
use roadmap_core::models::diagnostic::DiagnosticCode;
use roadmap_core::models::hhq::HhqResponses;
use roadmap_core::models::lab::RawLabEntry;
use roadmap_engine::substitutions::risk_flag_names;
use roadmap_engine::{Registries, Roadmap, RoadmapError, RoadmapRequest};
use roadmap_render::Template;
use roadmap_rules::{RiskAxis, RuleCatalog};

fn connie() -> RoadmapRequest {
    let mut client = Client::new("Connie Brown", Sex::Female);
    client.dob = Some(parse_date("1960-03-15").unwrap());
    client.labs_date = Some(parse_date("2025-05-30").unwrap());

    let mut hhq = HhqResponses::new();
    for key in ["hh-head-injury", "hh-stroke", "hh-diabetes", "hh-menopause"] {
        hhq.set_flag(key, true);
    }

    RoadmapRequest {
        client,
        labs: vec![
            RawLabEntry::new("Vitamin D, 25-Hydroxy", "25").with_unit("ng/mL"),
            RawLabEntry::new("C-Reactive Protein, Cardiac", "2.1").with_unit("mg/L"),
            RawLabEntry::new("Homocyst(e)ine", "9").with_unit("umol/L"),
            RawLabEntry::new("APO E Genotyping Result", "E3/E4"),
        ],
        hhq,
        report_date: Some(parse_date("2025-06-10").unwrap()),
    }
}

#[test]
fn generates_a_complete_roadmap() {
    let output = Roadmap::builtin().generate(&connie());
    let text = &output.text;

    assert!(text.starts_with("# Brain Health Roadmap\n\nPrepared for Connie Brown on June 10, 2025.\nLabs collected May 30, 2025.\n"));
    assert!(text.contains("Dear Connie,"));
    assert!(text.contains("Your APOE genotype is **E3/E4**."));
    assert!(text.contains("You carry one copy of the APOE4 allele."));
    assert!(!text.contains("You carry two copies"));
    assert!(text.contains("Your vitamin D level is 25 ng/mL"));
    assert!(text.contains("This is deficient.\n"));
    assert!(text.contains("Start vitamin D3 10,000 iu daily"));
    assert!(text.contains("hs-CRP: 2.1 mg/L"));
    assert!(text.contains("Homocysteine: 9 umol/L"));
    assert!(text.contains("Use methylated B vitamins"));
    assert!(text.contains("## Female Hormones"));
    assert!(!text.contains("## Male Hormones"));
    assert!(!text.contains("{{"));

    assert!(text.contains("- **Atrophic** (25%): Menopause\n"));
    assert!(text.contains("- **Glycotoxic** (25%): Diabetes\n"));
    assert!(text.contains("- **Vascular** (25%): Stroke\n"));
    assert!(!text.contains("- **Traumatic**"));
    assert!(text.contains("Your leading risk area is **Atrophic** at 25%."));

    // The female panel was not drawn, so its three values are missing.
    let missing: Vec<&str> = output
        .diagnostics
        .iter()
        .map(|d| {
            assert_eq!(d.code, DiagnosticCode::MissingPlaceholder, "{d}");
            d.detail.as_str()
        })
        .collect();
    assert_eq!(missing.len(), 3);
    assert!(missing[0].contains("fsh-value"));
    assert!(missing[1].contains("estradiol-value"));
    assert!(missing[2].contains("progesterone-value"));

    assert_eq!(output.risk_profile.percentage(RiskAxis::Traumatic), 25.0);
    assert_eq!(output.risk_profile.percentage(RiskAxis::Toxic), 0.0);
}

#[test]
fn empty_request_still_renders() {
    let request = RoadmapRequest::new(Client::new("Pat", Sex::Unknown));
    let output = Roadmap::builtin().generate(&request);

    assert!(output.text.contains("Dear Pat,"));
    assert!(output.text.contains("## Inflammation"));
    assert!(!output.text.contains("Cognitive Risk Profile"));
    assert!(!output.text.contains("## Female Hormones"));
    assert_eq!(output.risk_profile.total(), 0.0);

    let codes: Vec<DiagnosticCode> = output.diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(
        codes,
        vec![DiagnosticCode::MissingPlaceholder, DiagnosticCode::MissingPlaceholder]
    );
}

#[test]
fn diagnostics_run_canonicalizer_then_renderer() {
    let mut request = connie();
    request.labs.insert(0, RawLabEntry::new("Mystery Panel", "1"));
    request.labs.push(RawLabEntry::new("Vitamin B12", "pending"));

    let output = Roadmap::builtin().generate(&request);
    let codes: Vec<DiagnosticCode> = output.diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(codes[0], DiagnosticCode::UnknownLabName);
    assert_eq!(codes[1], DiagnosticCode::UnparseableValue);
    assert!(codes[2..].iter().all(|c| *c == DiagnosticCode::MissingPlaceholder));
}

#[test]
fn builtin_template_names_only_known_rules() {
    let registries = Registries::builtin();
    let risk_flags = risk_flag_names();

    for (rule, line) in registries.template.section_refs() {
        assert!(
            registries.catalog.contains(rule) || risk_flags.iter().any(|f| f == rule),
            "line {line}: unknown rule {rule}"
        );
    }
}

#[test]
fn generation_is_deterministic() {
    let roadmap = Roadmap::builtin();
    let request = connie();
    assert_eq!(roadmap.generate(&request), roadmap.generate(&request));
}

#[test]
fn top_risk_count_limits_ranked_axes() {
    let output = Roadmap::builtin().with_top_risk_count(1).generate(&connie());
    assert!(output.text.contains("- **Atrophic** (25%)"));
    assert!(!output.text.contains("- **Glycotoxic**"));
}

#[test]
fn custom_template_and_catalog() {
    let catalog = RuleCatalog::from_json(
        r#"[
            {"id": "always", "when": {"type": "all", "all": []},
             "publish": [{"placeholder": "first-name", "from": "text", "text": "Friend"}]}
        ]"#,
    )
    .unwrap();
    let template = Template::parse(
        "Hi {{first-name}}, age {{client-age}}.\n{{#always}}\nyes\n{{/always}}\n{{#never-defined}}\nno\n{{/never-defined}}\n",
    )
    .unwrap();
    let roadmap = Roadmap::new(
        Registries::builtin()
            .with_catalog(catalog)
            .with_template(template),
    );

    let output = roadmap.generate(&connie());
    assert_eq!(output.text, "Hi Friend, age 65.\nyes\n");
    assert_eq!(output.diagnostics.len(), 1);
    assert!(output.diagnostics.contains(DiagnosticCode::UnknownRuleId));
}

#[test]
fn registries_load_from_sources() {
    let registries = Registries::from_sources(None, None, None, Some("{{#a}}x{{/a}}")).unwrap();
    assert_eq!(registries.template.rule_ids().into_iter().collect::<Vec<_>>(), ["a"]);
    assert_eq!(registries.catalog.len(), RuleCatalog::builtin().len());

    assert!(matches!(
        Registries::from_sources(None, None, None, Some("{{#a}}x")),
        Err(RoadmapError::Template(_))
    ));
    assert!(matches!(
        Registries::from_sources(None, Some("[{\"id\": \"\"}]"), None, None),
        Err(RoadmapError::Rules(_))
    ));
    assert!(matches!(
        Registries::from_sources(None, None, Some(r#"{"hh-x": [1, 1, 1, 1, 1, -1]}"#), None),
        Err(RoadmapError::Rules(_))
    ));
    assert!(matches!(
        Registries::from_sources(Some("not json"), None, None, None),
        Err(RoadmapError::Registry(_))
    ));
}

#[test]
fn request_json_accepts_numbers_and_lenient_sex() {
    let request = RoadmapRequest::from_json(
        r#"{
            "client": {"name": "Sam Lee", "sex": "M", "labs_date": "2025-05-30"},
            "labs": [
                {"test_name": "Testosterone", "value": 350, "unit": "ng/dL"},
                {"test_name": "Vitamin D, 25-Hydroxy", "value": "62"}
            ],
            "hhq": {"hh_sleep_apnea": true, "hh-height": "5'10\"", "hh-weight": 180},
            "report_date": "2025-06-10"
        }"#,
    )
    .unwrap();
    assert_eq!(request.client.sex, Sex::Male);
    assert!(request.hhq.is_true("hh-sleep-apnea"));

    let output = Roadmap::builtin().generate(&request);
    assert!(output.text.contains("## Male Hormones"));
    assert!(output.text.contains("Total testosterone 350 ng/dL"));
    assert!(output.text.contains("Sleep apnea lowers testosterone"));
    assert!(output.text.contains("This is optimal. Continue your current intake."));
    assert!(output.text.contains("Your BMI is 25.8."));
}

#[test]
fn male_values_stay_missing_for_female_client() {
    let template = Template::parse(
        "T={{testosterone-value}}\n{{#quick-female-testosterone}}\nF={{female-testosterone-value}}\n{{/quick-female-testosterone}}\n",
    )
    .unwrap();
    let roadmap = Roadmap::new(Registries::builtin().with_template(template));

    let mut request = RoadmapRequest::new(Client::new("Dana Reyes", Sex::Female));
    request.labs = vec![
        RawLabEntry::new("Testosterone", "250").with_unit("ng/dL"),
        RawLabEntry::new("Sex Horm Binding Glob", "60").with_unit("nmol/L"),
    ];

    let output = roadmap.generate(&request);
    assert_eq!(output.text, "T=\nF=250\n");
    assert_eq!(output.diagnostics.len(), 1);
    assert_eq!(output.diagnostics.count(DiagnosticCode::MissingPlaceholder), 1);
}
