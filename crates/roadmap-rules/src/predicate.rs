use std::collections::BTreeSet;

use roadmap_core::models::client::Sex;
use roadmap_core::models::hhq::normalize_key;
use roadmap_core::models::lab::MthfrStatus;
use serde::{Deserialize, Serialize};

use crate::facts::FactStore;
use crate::metric::Metric;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    Gt,
    Ge,
    Lt,
    Le,
    Eq,
    Ne,
}

impl Comparison {
    pub fn holds<T: PartialOrd>(self, lhs: T, rhs: T) -> bool {
        match self {
            Comparison::Gt => lhs > rhs,
            Comparison::Ge => lhs >= rhs,
            Comparison::Lt => lhs < rhs,
            Comparison::Le => lhs <= rhs,
            Comparison::Eq => lhs == rhs,
            Comparison::Ne => lhs != rhs,
        }
    }
}

fn inclusive() -> bool {
    true
}

/// The rule predicate language.
///
/// Evaluation never fails. A leaf whose input is missing or of the wrong
/// kind is `false`; composition then proceeds as usual, so `Not` of such a
/// leaf is `true`. Use [`Predicate::Absent`] to test for missing data
/// explicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Predicate {
    Compare {
        metric: Metric,
        op: Comparison,
        value: f64,
    },
    Between {
        metric: Metric,
        low: f64,
        high: f64,
        #[serde(default = "inclusive")]
        low_inclusive: bool,
        #[serde(default = "inclusive")]
        high_inclusive: bool,
    },
    /// The metric has a value.
    Known { metric: Metric },
    /// APOE allele comparison against one of the allele ids.
    Allele { lab: String, op: Comparison, allele: u8 },
    /// MTHFR variant status is one of `statuses`.
    Mthfr {
        lab: String,
        statuses: Vec<MthfrStatus>,
    },
    /// Questionnaire flag answered `true`.
    Hhq { key: String },
    Sex { sex: Sex },
    /// Lab missing from the panel.
    Absent { lab: String },
    All { all: Vec<Predicate> },
    Any { any: Vec<Predicate> },
    Not { not: Box<Predicate> },
}

/// Facts a predicate or rule reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct References {
    pub labs: BTreeSet<String>,
    pub hhq: BTreeSet<String>,
    pub sex: bool,
}

impl References {
    pub fn merge(&mut self, other: References) {
        self.labs.extend(other.labs);
        self.hhq.extend(other.hhq);
        self.sex |= other.sex;
    }

    fn add_metric(&mut self, metric: &Metric) {
        self.labs.extend(metric.labs().into_iter().map(str::to_string));
        self.hhq.extend(metric.hhq_keys().into_iter().map(str::to_string));
    }
}

impl Predicate {
    pub fn always() -> Self {
        Predicate::All { all: Vec::new() }
    }

    pub fn never() -> Self {
        Predicate::Any { any: Vec::new() }
    }

    pub fn compare(metric: Metric, op: Comparison, value: f64) -> Self {
        Predicate::Compare { metric, op, value }
    }

    /// Threshold on a single lab.
    pub fn lab(id: &str, op: Comparison, value: f64) -> Self {
        Self::compare(Metric::lab(id), op, value)
    }

    pub fn known(metric: Metric) -> Self {
        Predicate::Known { metric }
    }

    /// A numeric value is present for the lab.
    pub fn has(id: &str) -> Self {
        Self::known(Metric::lab(id))
    }

    /// Inclusive range on a metric.
    pub fn between(metric: Metric, low: f64, high: f64) -> Self {
        Predicate::Between {
            metric,
            low,
            high,
            low_inclusive: true,
            high_inclusive: true,
        }
    }

    /// `low <= value < high`.
    pub fn half_open(metric: Metric, low: f64, high: f64) -> Self {
        Predicate::Between {
            metric,
            low,
            high,
            low_inclusive: true,
            high_inclusive: false,
        }
    }

    pub fn allele(id: &str, op: Comparison, allele: u8) -> Self {
        Predicate::Allele {
            lab: id.to_string(),
            op,
            allele,
        }
    }

    pub fn mthfr(id: &str, statuses: &[MthfrStatus]) -> Self {
        Predicate::Mthfr {
            lab: id.to_string(),
            statuses: statuses.to_vec(),
        }
    }

    pub fn hhq(key: &str) -> Self {
        Predicate::Hhq {
            key: normalize_key(key),
        }
    }

    /// True if any of the questionnaire flags is set.
    pub fn any_hhq(keys: &[&str]) -> Self {
        Self::any(keys.iter().map(|k| Self::hhq(k)))
    }

    pub fn sex(sex: Sex) -> Self {
        Predicate::Sex { sex }
    }

    pub fn absent(id: &str) -> Self {
        Predicate::Absent { lab: id.to_string() }
    }

    pub fn all(parts: impl IntoIterator<Item = Predicate>) -> Self {
        Predicate::All {
            all: parts.into_iter().collect(),
        }
    }

    pub fn any(parts: impl IntoIterator<Item = Predicate>) -> Self {
        Predicate::Any {
            any: parts.into_iter().collect(),
        }
    }

    pub fn negate(inner: Predicate) -> Self {
        Predicate::Not {
            not: Box::new(inner),
        }
    }

    pub fn eval(&self, facts: &FactStore) -> bool {
        match self {
            Predicate::Compare { metric, op, value } => {
                metric.eval(facts).is_some_and(|v| op.holds(v, *value))
            }
            Predicate::Between {
                metric,
                low,
                high,
                low_inclusive,
                high_inclusive,
            } => metric.eval(facts).is_some_and(|v| {
                let above = if *low_inclusive { v >= *low } else { v > *low };
                let below = if *high_inclusive { v <= *high } else { v < *high };
                above && below
            }),
            Predicate::Known { metric } => metric.eval(facts).is_some(),
            Predicate::Allele { lab, op, allele } => facts
                .allele(lab)
                .is_some_and(|found| op.holds(found, *allele)),
            Predicate::Mthfr { lab, statuses } => facts
                .mthfr(lab)
                .is_some_and(|status| statuses.contains(&status)),
            Predicate::Hhq { key } => facts.hhq(key),
            Predicate::Sex { sex } => facts.sex() == *sex,
            Predicate::Absent { lab } => !facts.has_lab(lab),
            Predicate::All { all } => all.iter().all(|p| p.eval(facts)),
            Predicate::Any { any } => any.iter().any(|p| p.eval(facts)),
            Predicate::Not { not } => !not.eval(facts),
        }
    }

    pub fn references(&self) -> References {
        let mut refs = References::default();
        self.collect(&mut refs);
        refs
    }

    fn collect(&self, refs: &mut References) {
        match self {
            Predicate::Compare { metric, .. }
            | Predicate::Between { metric, .. }
            | Predicate::Known { metric } => {
                refs.add_metric(metric);
            }
            Predicate::Allele { lab, .. }
            | Predicate::Mthfr { lab, .. }
            | Predicate::Absent { lab } => {
                refs.labs.insert(lab.clone());
            }
            Predicate::Hhq { key } => {
                refs.hhq.insert(normalize_key(key));
            }
            Predicate::Sex { .. } => refs.sex = true,
            Predicate::All { all: parts } | Predicate::Any { any: parts } => {
                for part in parts {
                    part.collect(refs);
                }
            }
            Predicate::Not { not } => not.collect(refs),
        }
    }

    /// Copy of this predicate with every leaf that reads one of `labs`
    /// replaced by [`Predicate::never`].
    pub fn without_labs(&self, labs: &BTreeSet<String>) -> Predicate {
        let reads = |ids: &BTreeSet<&str>| ids.iter().any(|id| labs.contains(*id));
        match self {
            Predicate::Compare { metric, .. }
            | Predicate::Between { metric, .. }
            | Predicate::Known { metric }
                if reads(&metric.labs()) =>
            {
                Predicate::never()
            }
            Predicate::Allele { lab, .. }
            | Predicate::Mthfr { lab, .. }
            | Predicate::Absent { lab }
                if labs.contains(lab) =>
            {
                Predicate::never()
            }
            Predicate::All { all } => Predicate::all(all.iter().map(|p| p.without_labs(labs))),
            Predicate::Any { any } => Predicate::any(any.iter().map(|p| p.without_labs(labs))),
            Predicate::Not { not } => Predicate::negate(not.without_labs(labs)),
            other => other.clone(),
        }
    }
}
