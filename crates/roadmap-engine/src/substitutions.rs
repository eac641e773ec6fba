//! Substitutions and flags the orchestrator adds next to the rule outputs.

use jiff::civil::Date;
use roadmap_core::models::client::Sex;
use roadmap_render::RenderContext;
use roadmap_rules::FactStore;
use roadmap_rules::format::format_number;
use roadmap_rules::risk::{RiskAxis, RiskProfile};

pub mod name {
    pub const CLIENT_NAME: &str = "client-name";
    pub const FIRST_NAME: &str = "first-name";
    pub const LAB_DATE: &str = "lab-date";
    pub const REPORT_DATE: &str = "report-date";
    pub const CLIENT_AGE: &str = "client-age";
    pub const CLIENT_SEX: &str = "client-sex";
    pub const RISK_PROFILE: &str = "risk-profile";
}

/// `May 30, 2025`
pub fn format_date(date: Date) -> String {
    date.strftime("%B %-d, %Y").to_string()
}

pub fn demographics(facts: &FactStore, context: &mut RenderContext) {
    let client = facts.client();
    context.substitute(name::CLIENT_NAME, client.name.clone());
    context.substitute(name::FIRST_NAME, client.first_name());
    if let Some(date) = client.labs_date {
        context.substitute(name::LAB_DATE, format_date(date));
    }
    if let Some(date) = facts.report_date() {
        context.substitute(name::REPORT_DATE, format_date(date));
    }
    if let Some(age) = facts.age() {
        context.substitute(name::CLIENT_AGE, age.to_string());
    }
    if client.sex != Sex::Unknown {
        context.substitute(name::CLIENT_SEX, client.sex.as_str());
    }
}

fn title(axis: RiskAxis) -> String {
    let name = axis.as_str();
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Per-axis scores, percentages and contributing items, the top `top_n`
/// ranked axes, and the `risk-profile` / `risk-<axis>-top` flags.
pub fn risk(profile: &RiskProfile, top_n: usize, context: &mut RenderContext) {
    let top = profile.top(top_n);

    for axis in RiskAxis::ALL {
        context.substitute(
            format!("risk-{axis}-score"),
            format_number(profile.score(axis), 2),
        );
        context.substitute(
            format!("risk-{axis}-percent"),
            format_number(profile.percentage(axis), 0),
        );
        context.substitute(
            format!("risk-{axis}-factors"),
            profile.details(axis).join(", "),
        );
        context.set_flag(
            format!("risk-{axis}-top"),
            top.iter().any(|ranked| ranked.axis == axis),
        );
    }

    for (rank, ranked) in top.iter().enumerate() {
        let n = rank + 1;
        context.substitute(format!("risk-top-{n}"), title(ranked.axis));
        context.substitute(
            format!("risk-top-{n}-percent"),
            format_number(ranked.percentage, 0),
        );
    }

    context.set_flag(name::RISK_PROFILE, !top.is_empty());
}

/// Every flag [`risk`] sets, for validating templates against.
pub fn risk_flag_names() -> Vec<String> {
    RiskAxis::ALL
        .iter()
        .map(|axis| format!("risk-{axis}-top"))
        .chain([name::RISK_PROFILE.to_string()])
        .collect()
}
