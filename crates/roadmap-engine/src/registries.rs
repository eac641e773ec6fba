use std::sync::LazyLock;

use roadmap_labs::CanonicalRegistry;
use roadmap_render::Template;
use roadmap_rules::{RiskWeights, RuleCatalog};

use crate::error::RoadmapError;

/// Source of the roadmap template compiled into this crate.
pub const BUILTIN_TEMPLATE: &str = include_str!("../templates/roadmap.md");

static TEMPLATE: LazyLock<Template> = LazyLock::new(|| {
    Template::parse(BUILTIN_TEMPLATE)
        .unwrap_or_else(|e| panic!("built-in roadmap template is invalid: {e}"))
});

/// The four static tables that make up the configuration surface.
///
/// Each can be swapped independently; nothing else changes behavior.
#[derive(Debug, Clone)]
pub struct Registries {
    pub canonical: CanonicalRegistry,
    pub catalog: RuleCatalog,
    pub weights: RiskWeights,
    pub template: Template,
}

impl Registries {
    /// The built-in registries.
    ///
    /// # Panics
    ///
    /// Panics if a compiled-in table fails validation, which is a bug in
    /// this workspace rather than a runtime condition.
    pub fn builtin() -> Self {
        Self {
            canonical: CanonicalRegistry::builtin().clone(),
            catalog: RuleCatalog::builtin().clone(),
            weights: RiskWeights::builtin().clone(),
            template: TEMPLATE.clone(),
        }
    }

    /// Registries loaded from JSON and template sources. `None` keeps the
    /// built-in table.
    pub fn from_sources(
        canonical: Option<&str>,
        catalog: Option<&str>,
        weights: Option<&str>,
        template: Option<&str>,
    ) -> Result<Self, RoadmapError> {
        let builtin = Self::builtin();
        Ok(Self {
            canonical: canonical
                .map(CanonicalRegistry::from_json)
                .transpose()?
                .unwrap_or(builtin.canonical),
            catalog: catalog
                .map(RuleCatalog::from_json)
                .transpose()?
                .unwrap_or(builtin.catalog),
            weights: weights
                .map(RiskWeights::from_json)
                .transpose()?
                .unwrap_or(builtin.weights),
            template: template
                .map(Template::parse)
                .transpose()?
                .unwrap_or(builtin.template),
        })
    }

    pub fn with_template(mut self, template: Template) -> Self {
        self.template = template;
        self
    }

    pub fn with_catalog(mut self, catalog: RuleCatalog) -> Self {
        self.catalog = catalog;
        self
    }
}
