use std::collections::BTreeSet;

use roadmap_core::ids::hhq;
use serde::{Deserialize, Serialize};

use crate::facts::FactStore;

/// A numeric quantity read from, or derived from, the fact store.
///
/// Every derived metric is absent when any input is absent or
/// non-numeric, or when a denominator is zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "metric", rename_all = "snake_case")]
pub enum Metric {
    /// A lab value by canonical id.
    Lab { lab: String },
    /// `numerator / denominator`, e.g. the copper:zinc ratio.
    Ratio {
        numerator: String,
        denominator: String,
    },
    /// Product of labs divided by a constant, e.g. HOMA-IR.
    Product { factors: Vec<String>, divisor: f64 },
    /// Body-mass index from the height and weight answers.
    Bmi,
}

impl Metric {
    pub fn lab(id: &str) -> Self {
        Metric::Lab { lab: id.to_string() }
    }

    pub fn ratio(numerator: &str, denominator: &str) -> Self {
        Metric::Ratio {
            numerator: numerator.to_string(),
            denominator: denominator.to_string(),
        }
    }

    pub fn product(factors: &[&str], divisor: f64) -> Self {
        Metric::Product {
            factors: factors.iter().map(|f| f.to_string()).collect(),
            divisor,
        }
    }

    pub fn eval(&self, facts: &FactStore) -> Option<f64> {
        let value = match self {
            Metric::Lab { lab } => facts.number(lab)?,
            Metric::Ratio {
                numerator,
                denominator,
            } => {
                let den = facts.number(denominator)?;
                if den == 0.0 {
                    return None;
                }
                facts.number(numerator)? / den
            }
            Metric::Product { factors, divisor } => {
                if *divisor == 0.0 || factors.is_empty() {
                    return None;
                }
                let mut product = 1.0;
                for id in factors {
                    product *= facts.number(id)?;
                }
                product / divisor
            }
            Metric::Bmi => facts.bmi()?,
        };
        value.is_finite().then_some(value)
    }

    /// Canonical lab ids this metric reads.
    pub fn labs(&self) -> BTreeSet<&str> {
        match self {
            Metric::Lab { lab } => BTreeSet::from([lab.as_str()]),
            Metric::Ratio {
                numerator,
                denominator,
            } => BTreeSet::from([numerator.as_str(), denominator.as_str()]),
            Metric::Product { factors, .. } => factors.iter().map(String::as_str).collect(),
            Metric::Bmi => BTreeSet::new(),
        }
    }

    /// Questionnaire keys this metric reads.
    pub fn hhq_keys(&self) -> BTreeSet<&str> {
        match self {
            Metric::Bmi => BTreeSet::from([hhq::HEIGHT, hhq::WEIGHT]),
            _ => BTreeSet::new(),
        }
    }
}
