use std::collections::HashMap;
use std::sync::LazyLock;

use roadmap_core::ids::lab::{APO1, APO2};
use roadmap_core::models::client::Sex;
use roadmap_labs::genotype::encode_apoe;
use serde::{Deserialize, Serialize};

use crate::error::RuleError;
use crate::facts::FactStore;
use crate::format::format_number;
use crate::metric::Metric;
use crate::predicate::{Predicate, References};

fn default_decimals() -> u8 {
    2
}

/// Where a published substitution value comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "from", rename_all = "snake_case")]
pub enum PublishSource {
    /// A lab value or derived metric, rounded and formatted.
    Metric {
        metric: Metric,
        #[serde(default = "default_decimals")]
        decimals: u8,
    },
    /// The APOE genotype as `E3/E4`, from both allele ids.
    Genotype,
    /// An MTHFR variant status word.
    Mthfr { lab: String },
    /// Fixed text, usually paired with `when_matched`.
    Text { text: String },
}

/// One substitution entry a rule may publish.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Publication {
    pub placeholder: String,
    #[serde(flatten)]
    pub source: PublishSource,
    /// Publish only when the rule's predicate holds. Otherwise the value is
    /// published whenever its source is present and the gate passes.
    #[serde(default)]
    pub when_matched: bool,
}

impl Publication {
    pub fn metric(placeholder: &str, metric: Metric) -> Self {
        Self::new(
            placeholder,
            PublishSource::Metric {
                metric,
                decimals: default_decimals(),
            },
        )
    }

    pub fn lab(placeholder: &str, id: &str) -> Self {
        Self::metric(placeholder, Metric::lab(id))
    }

    pub fn genotype(placeholder: &str) -> Self {
        Self::new(placeholder, PublishSource::Genotype)
    }

    pub fn mthfr(placeholder: &str, id: &str) -> Self {
        Self::new(placeholder, PublishSource::Mthfr { lab: id.to_string() })
    }

    /// Fixed text published only when the rule matches.
    pub fn text(placeholder: &str, text: &str) -> Self {
        Self {
            when_matched: true,
            ..Self::new(placeholder, PublishSource::Text { text: text.to_string() })
        }
    }

    pub fn new(placeholder: &str, source: PublishSource) -> Self {
        Self {
            placeholder: placeholder.to_string(),
            source,
            when_matched: false,
        }
    }

    /// The formatted value, or `None` when the source is absent.
    pub fn value(&self, facts: &FactStore) -> Option<String> {
        match &self.source {
            PublishSource::Metric { metric, decimals } => {
                metric.eval(facts).map(|v| format_number(v, *decimals))
            }
            PublishSource::Genotype => {
                Some(encode_apoe(facts.allele(APO1)?, facts.allele(APO2)?))
            }
            PublishSource::Mthfr { lab } => facts.mthfr(lab).map(|s| s.as_str().to_string()),
            PublishSource::Text { text } => Some(text.clone()),
        }
    }

    pub fn references(&self) -> References {
        let mut refs = References::default();
        self.collect(&mut refs);
        refs
    }

    fn collect(&self, refs: &mut References) {
        match &self.source {
            PublishSource::Metric { metric, .. } => {
                refs.labs.extend(metric.labs().into_iter().map(str::to_string));
                refs.hhq.extend(metric.hhq_keys().into_iter().map(str::to_string));
            }
            PublishSource::Genotype => {
                refs.labs.insert(APO1.to_string());
                refs.labs.insert(APO2.to_string());
            }
            PublishSource::Mthfr { lab } => {
                refs.labs.insert(lab.clone());
            }
            PublishSource::Text { .. } => {}
        }
    }
}

/// A named content control: a boolean flag plus optional substitutions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleDefinition {
    pub id: String,
    /// When set, the rule is false with no publications unless the client
    /// has this sex.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gate: Option<Sex>,
    pub when: Predicate,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub publish: Vec<Publication>,
}

impl RuleDefinition {
    pub fn new(id: &str, when: Predicate) -> Self {
        Self {
            id: id.to_string(),
            gate: None,
            when,
            publish: Vec::new(),
        }
    }

    pub fn gated(mut self, sex: Sex) -> Self {
        self.gate = Some(sex);
        self
    }

    pub fn publish(mut self, publication: Publication) -> Self {
        self.publish.push(publication);
        self
    }

    pub fn gate_passes(&self, facts: &FactStore) -> bool {
        self.gate.is_none_or(|sex| facts.sex() == sex)
    }

    /// Lab ids and questionnaire keys read by the predicate, the gate and
    /// the publications.
    pub fn references(&self) -> References {
        let mut refs = self.when.references();
        refs.sex |= self.gate.is_some();
        for publication in &self.publish {
            publication.collect(&mut refs);
        }
        refs
    }
}

/// Ordered, validated rule catalog. Declared order is evaluation order and
/// decides conflicts between publications (last writer wins).
#[derive(Debug, Clone)]
pub struct RuleCatalog {
    rules: Vec<RuleDefinition>,
    index: HashMap<String, usize>,
}

static BUILTIN: LazyLock<RuleCatalog> = LazyLock::new(|| {
    RuleCatalog::new(crate::builtin::rules())
        .unwrap_or_else(|e| panic!("built-in rule catalog is invalid: {e}"))
});

impl RuleCatalog {
    pub fn new(rules: Vec<RuleDefinition>) -> Result<Self, RuleError> {
        let mut index = HashMap::with_capacity(rules.len());
        for (i, rule) in rules.iter().enumerate() {
            if rule.id.trim().is_empty() {
                return Err(RuleError::EmptyRuleId(i));
            }
            if index.insert(rule.id.clone(), i).is_some() {
                return Err(RuleError::DuplicateRule(rule.id.clone()));
            }
        }
        Ok(Self { rules, index })
    }

    /// Load from a JSON array of rule definitions.
    pub fn from_json(json: &str) -> Result<Self, RuleError> {
        let rules: Vec<RuleDefinition> = serde_json::from_str(json)?;
        Self::new(rules)
    }

    pub fn to_json_pretty(&self) -> Result<String, RuleError> {
        Ok(serde_json::to_string_pretty(&self.rules)?)
    }

    /// The catalog compiled into this crate.
    ///
    /// # Panics
    ///
    /// Panics on first use if the built-in rules contain a duplicate or
    /// empty id, which is a bug in [`crate::builtin`].
    pub fn builtin() -> &'static RuleCatalog {
        &BUILTIN
    }

    pub fn get(&self, id: &str) -> Option<&RuleDefinition> {
        self.index.get(id).map(|&i| &self.rules[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn rules(&self) -> &[RuleDefinition] {
        &self.rules
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RuleDefinition> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
