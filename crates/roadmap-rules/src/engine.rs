use std::collections::{BTreeMap, BTreeSet};

use roadmap_core::models::diagnostic::{DiagnosticCode, Diagnostics};
use roadmap_labs::CanonicalRegistry;
use serde::Serialize;

use crate::catalog::{RuleCatalog, RuleDefinition};
use crate::facts::FactStore;

/// Flags and substitutions produced by one evaluation of the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RuleOutcome {
    pub flags: BTreeMap<String, bool>,
    pub substitutions: BTreeMap<String, String>,
}

impl RuleOutcome {
    pub fn flag(&self, id: &str) -> bool {
        self.flags.get(id).copied().unwrap_or(false)
    }

    pub fn substitution(&self, name: &str) -> Option<&str> {
        self.substitutions.get(name).map(String::as_str)
    }

    /// Ids of rules that matched, in id order.
    pub fn matched(&self) -> impl Iterator<Item = &str> {
        self.flags
            .iter()
            .filter(|(_, on)| **on)
            .map(|(id, _)| id.as_str())
    }
}

struct CompiledRule {
    rule: RuleDefinition,
    unknown_labs: BTreeSet<String>,
}

/// Evaluates a [`RuleCatalog`] against fact stores.
///
/// Lab ids the catalog names but the canonical registry does not know are
/// found once, at construction. Predicates reading them are treated as
/// false and each evaluation reports them as `UNKNOWN_FACT_ID`.
pub struct RuleEngine {
    rules: Vec<CompiledRule>,
}

impl RuleEngine {
    pub fn new(catalog: &RuleCatalog, registry: &CanonicalRegistry) -> Self {
        let rules = catalog
            .iter()
            .map(|rule| {
                let unknown_labs: BTreeSet<String> = rule
                    .references()
                    .labs
                    .into_iter()
                    .filter(|id| !registry.contains(id))
                    .collect();
                let mut rule = rule.clone();
                if !unknown_labs.is_empty() {
                    tracing::warn!(
                        rule = %rule.id,
                        unknown = ?unknown_labs,
                        "rule references lab ids missing from the registry"
                    );
                    rule.when = rule.when.without_labs(&unknown_labs);
                    rule.publish
                        .retain(|p| p.references().labs.is_disjoint(&unknown_labs));
                }
                CompiledRule { rule, unknown_labs }
            })
            .collect();
        Self { rules }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Evaluate every rule once, in catalog order.
    pub fn evaluate(&self, facts: &FactStore, diagnostics: &mut Diagnostics) -> RuleOutcome {
        let mut outcome = RuleOutcome::default();

        for CompiledRule { rule, unknown_labs } in &self.rules {
            for id in unknown_labs {
                diagnostics.push(
                    DiagnosticCode::UnknownFactId,
                    format!("rule '{}' reads unknown lab id '{id}'", rule.id),
                );
            }

            if !rule.gate_passes(facts) {
                outcome.flags.insert(rule.id.clone(), false);
                continue;
            }

            let matched = rule.when.eval(facts);
            outcome.flags.insert(rule.id.clone(), matched);

            for publication in &rule.publish {
                if publication.when_matched && !matched {
                    continue;
                }
                if let Some(value) = publication.value(facts) {
                    outcome
                        .substitutions
                        .insert(publication.placeholder.clone(), value);
                }
            }

            tracing::trace!(rule = %rule.id, matched, "rule evaluated");
        }

        tracing::debug!(
            rules = self.rules.len(),
            matched = outcome.matched().count(),
            substitutions = outcome.substitutions.len(),
            "rule catalog evaluated"
        );
        outcome
    }
}
