use jiff::civil::Date;
use roadmap_core::models::client::Client;
use roadmap_core::models::diagnostic::Diagnostics;
use roadmap_core::models::hhq::HhqResponses;
use roadmap_core::models::lab::RawLabEntry;
use roadmap_labs::Canonicalizer;
use roadmap_render::{RenderContext, render};
use roadmap_rules::{FactStore, RiskProfile, RuleEngine};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::registries::Registries;
use crate::substitutions;

pub const DEFAULT_TOP_RISK_COUNT: usize = 3;

/// Raw inputs for one roadmap, as handed over by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapRequest {
    pub client: Client,
    #[serde(default)]
    pub labs: Vec<RawLabEntry>,
    #[serde(default)]
    pub hhq: HhqResponses,
    /// Date printed on the report and used for the client's age. Never
    /// taken from the clock.
    #[serde(default)]
    pub report_date: Option<Date>,
}

impl RoadmapRequest {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            labs: Vec::new(),
            hhq: HhqResponses::new(),
            report_date: None,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct RoadmapOutput {
    pub text: String,
    pub diagnostics: Diagnostics,
    pub risk_profile: RiskProfile,
}

/// Roadmap generator over one set of registries.
///
/// Holds no per-invocation state; share it across threads freely.
pub struct Roadmap {
    registries: Registries,
    engine: RuleEngine,
    top_risk_count: usize,
}

impl Roadmap {
    pub fn new(registries: Registries) -> Self {
        let engine = RuleEngine::new(&registries.catalog, &registries.canonical);
        Self {
            registries,
            engine,
            top_risk_count: DEFAULT_TOP_RISK_COUNT,
        }
    }

    /// A generator over the built-in registries.
    pub fn builtin() -> Self {
        Self::new(Registries::builtin())
    }

    /// Number of ranked axes published as `risk-top-<n>`.
    pub fn with_top_risk_count(mut self, count: usize) -> Self {
        self.top_risk_count = count;
        self
    }

    pub fn registries(&self) -> &Registries {
        &self.registries
    }

    /// Generate the roadmap. Bad input data only ever adds diagnostics.
    pub fn generate(&self, request: &RoadmapRequest) -> RoadmapOutput {
        let span = tracing::info_span!(
            "roadmap",
            labs = request.labs.len(),
            hhq = request.hhq.len()
        );
        let _guard = span.enter();

        let mut diagnostics = Diagnostics::new();

        let labs = Canonicalizer::new(&self.registries.canonical).canonicalize(
            &request.labs,
            request.client.sex,
            &mut diagnostics,
        );
        let mut facts = FactStore::new(request.client.clone(), labs, request.hhq.clone());
        if let Some(date) = request.report_date {
            facts = facts.with_report_date(date);
        }

        let outcome = self.engine.evaluate(&facts, &mut diagnostics);
        let risk_profile = self.registries.weights.profile(facts.hhq_responses());

        let mut context = RenderContext::new();
        substitutions::demographics(&facts, &mut context);
        substitutions::risk(&risk_profile, self.top_risk_count, &mut context);
        context.flags.extend(outcome.flags);
        context.substitutions.extend(outcome.substitutions);

        let text = render(&self.registries.template, &context, &mut diagnostics);

        tracing::info!(
            canonical_labs = facts.labs().len(),
            rules_matched = context.flags.values().filter(|on| **on).count(),
            diagnostics = diagnostics.len(),
            "roadmap generated"
        );

        RoadmapOutput {
            text,
            diagnostics,
            risk_profile,
        }
    }
}
