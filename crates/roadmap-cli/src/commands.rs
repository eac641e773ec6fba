//! Command implementations behind the `roadmap` binary. Each takes its
//! inputs as strings and returns what the binary prints, so they can be
//! driven from tests without touching the filesystem.

use std::collections::BTreeSet;

use roadmap_core::models::client::parse_date;
use roadmap_core::models::hhq::HhqResponses;
use roadmap_engine::substitutions::risk_flag_names;
use roadmap_engine::{Registries, Roadmap, RoadmapOutput, RoadmapRequest};
use roadmap_render::Template;
use roadmap_rules::RiskProfile;
use roadmap_rules::risk::RankedAxis;
use serde::Serialize;

/// Generate a roadmap from request JSON. `report_date` overrides the date
/// carried by the request.
pub fn render(
    registries: Registries,
    top_risk_count: usize,
    request_json: &str,
    report_date: Option<&str>,
) -> eyre::Result<RoadmapOutput> {
    let mut request = RoadmapRequest::from_json(request_json)
        .map_err(|e| eyre::eyre!("invalid roadmap request: {e}"))?;
    if let Some(raw) = report_date {
        request.report_date = Some(parse_date(raw)?);
    }

    let roadmap = Roadmap::new(registries).with_top_risk_count(top_risk_count);
    Ok(roadmap.generate(&request))
}

/// What a template references, checked against the active catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateReport {
    pub rules: BTreeSet<String>,
    pub placeholders: BTreeSet<String>,
    /// Region names with no rule in the catalog and no built-in flag, with
    /// the line of their first use.
    pub unknown_rules: Vec<(String, usize)>,
}

impl TemplateReport {
    pub fn is_clean(&self) -> bool {
        self.unknown_rules.is_empty()
    }
}

pub fn check_template(registries: &Registries, source: &str) -> eyre::Result<TemplateReport> {
    let template = Template::parse(source)?;
    let builtin_flags: BTreeSet<String> = risk_flag_names().into_iter().collect();

    let mut seen = BTreeSet::new();
    let unknown_rules = template
        .section_refs()
        .into_iter()
        .filter(|(rule, _)| {
            !registries.catalog.contains(rule) && !builtin_flags.contains(*rule)
        })
        .filter(|(rule, _)| seen.insert(rule.to_string()))
        .map(|(rule, line)| (rule.to_string(), line))
        .collect();

    Ok(TemplateReport {
        rules: template.rule_ids().into_iter().map(str::to_string).collect(),
        placeholders: template
            .placeholders()
            .into_iter()
            .map(str::to_string)
            .collect(),
        unknown_rules,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskReport {
    pub profile: RiskProfile,
    pub top: Vec<RankedAxis>,
}

/// Risk profile of a questionnaire given as a JSON object of answers.
pub fn risk(registries: &Registries, hhq_json: &str, top: usize) -> eyre::Result<RiskReport> {
    let hhq: HhqResponses = serde_json::from_str(hhq_json)
        .map_err(|e| eyre::eyre!("invalid questionnaire answers: {e}"))?;
    let profile = registries.weights.profile(&hhq);
    let top = profile.top(top);
    Ok(RiskReport { profile, top })
}

pub fn catalog(registries: &Registries) -> eyre::Result<String> {
    Ok(registries.catalog.to_json_pretty()?)
}
