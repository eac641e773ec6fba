use roadmap_labs::error::LabError;
use roadmap_render::error::TemplateError;
use roadmap_rules::error::RuleError;
use thiserror::Error;

/// Registry load failures. Data-quality problems never surface here; they
/// are reported as diagnostics on the output.
#[derive(Debug, Error)]
pub enum RoadmapError {
    #[error("canonical registry: {0}")]
    Registry(#[from] LabError),

    #[error("rule catalog or risk weights: {0}")]
    Rules(#[from] RuleError),

    #[error("template: {0}")]
    Template(#[from] TemplateError),
}
