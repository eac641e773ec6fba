use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::LazyLock;

use roadmap_core::models::hhq::{HhqResponses, normalize_key};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::RuleError;

/// The six risk axes, in their declared order. The order breaks ties when
/// ranking.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum RiskAxis {
    Inflammatory,
    Atrophic,
    Glycotoxic,
    Toxic,
    Vascular,
    Traumatic,
}

impl RiskAxis {
    pub const ALL: [RiskAxis; 6] = [
        RiskAxis::Inflammatory,
        RiskAxis::Atrophic,
        RiskAxis::Glycotoxic,
        RiskAxis::Toxic,
        RiskAxis::Vascular,
        RiskAxis::Traumatic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskAxis::Inflammatory => "inflammatory",
            RiskAxis::Atrophic => "atrophic",
            RiskAxis::Glycotoxic => "glycotoxic",
            RiskAxis::Toxic => "toxic",
            RiskAxis::Vascular => "vascular",
            RiskAxis::Traumatic => "traumatic",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for RiskAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-axis contribution of one questionnaire item, in [`RiskAxis::ALL`]
/// order.
pub type WeightTuple = [f64; 6];

/// Questionnaire key → weight tuple.
#[derive(Debug, Clone)]
pub struct RiskWeights {
    weights: HashMap<String, WeightTuple>,
}

static BUILTIN: LazyLock<RiskWeights> = LazyLock::new(|| {
    RiskWeights::new(builtin_weights())
        .unwrap_or_else(|e| panic!("built-in risk weights are invalid: {e}"))
});

impl RiskWeights {
    pub fn new(
        entries: impl IntoIterator<Item = (String, WeightTuple)>,
    ) -> Result<Self, RuleError> {
        let mut weights = HashMap::new();
        for (raw_key, tuple) in entries {
            let key = normalize_key(&raw_key);
            for (axis, value) in RiskAxis::ALL.iter().zip(tuple) {
                if !value.is_finite() || value < 0.0 {
                    return Err(RuleError::InvalidWeight {
                        key,
                        axis: *axis,
                        value,
                    });
                }
            }
            if weights.insert(key.clone(), tuple).is_some() {
                return Err(RuleError::DuplicateWeight(key));
            }
        }
        Ok(Self { weights })
    }

    /// Load from a JSON object mapping keys to six-element arrays.
    pub fn from_json(json: &str) -> Result<Self, RuleError> {
        let entries: BTreeMap<String, WeightTuple> = serde_json::from_str(json)?;
        Self::new(entries)
    }

    /// The weight table compiled into this crate.
    ///
    /// # Panics
    ///
    /// Panics on first use if the built-in table holds an invalid weight.
    pub fn builtin() -> &'static RiskWeights {
        &BUILTIN
    }

    pub fn weight(&self, key: &str) -> Option<&WeightTuple> {
        self.weights.get(&normalize_key(key))
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Aggregate the `true` answers into a risk profile. Unknown keys
    /// contribute nothing.
    pub fn profile(&self, hhq: &HhqResponses) -> RiskProfile {
        let mut scores = [0.0_f64; 6];
        let mut details: BTreeMap<RiskAxis, Vec<String>> =
            RiskAxis::ALL.iter().map(|a| (*a, Vec::new())).collect();

        for key in hhq.positive_keys() {
            let Some(tuple) = self.weights.get(key) else {
                continue;
            };
            let name = readable_name(key);
            for axis in RiskAxis::ALL {
                let weight = tuple[axis.index()];
                scores[axis.index()] += weight;
                if weight > 0.0 {
                    details.entry(axis).or_default().push(name.clone());
                }
            }
        }

        RiskProfile::from_scores(scores, details)
    }
}

/// One entry of the ranking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RankedAxis {
    pub axis: RiskAxis,
    pub percentage: f64,
}

/// Six-axis risk scores, their share of the total, the ranking and the
/// contributing questionnaire items per axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RiskProfile {
    pub scores: BTreeMap<RiskAxis, f64>,
    pub percentages: BTreeMap<RiskAxis, f64>,
    /// All six axes by percentage, highest first; ties keep declared order.
    pub ranking: Vec<RankedAxis>,
    pub details: BTreeMap<RiskAxis, Vec<String>>,
}

impl RiskProfile {
    fn from_scores(scores: [f64; 6], details: BTreeMap<RiskAxis, Vec<String>>) -> Self {
        let total: f64 = scores.iter().sum();
        let percent = |score: f64| if total > 0.0 { score / total * 100.0 } else { 0.0 };

        let mut ranking: Vec<RankedAxis> = RiskAxis::ALL
            .iter()
            .map(|&axis| RankedAxis {
                axis,
                percentage: percent(scores[axis.index()]),
            })
            .collect();
        // Stable, so equal percentages stay in declared order.
        ranking.sort_by(|a, b| b.percentage.total_cmp(&a.percentage));

        Self {
            scores: RiskAxis::ALL
                .iter()
                .map(|&a| (a, scores[a.index()]))
                .collect(),
            percentages: RiskAxis::ALL
                .iter()
                .map(|&a| (a, percent(scores[a.index()])))
                .collect(),
            ranking,
            details,
        }
    }

    pub fn score(&self, axis: RiskAxis) -> f64 {
        self.scores.get(&axis).copied().unwrap_or(0.0)
    }

    pub fn percentage(&self, axis: RiskAxis) -> f64 {
        self.percentages.get(&axis).copied().unwrap_or(0.0)
    }

    pub fn total(&self) -> f64 {
        self.scores.values().sum()
    }

    pub fn details(&self, axis: RiskAxis) -> &[String] {
        self.details.get(&axis).map_or(&[], Vec::as_slice)
    }

    /// First `n` ranked axes with a strictly positive percentage.
    pub fn top(&self, n: usize) -> Vec<RankedAxis> {
        self.ranking
            .iter()
            .filter(|r| r.percentage > 0.0)
            .take(n)
            .copied()
            .collect()
    }
}

/// `hh-high-blood-pressure` → `High Blood Pressure`.
pub fn readable_name(key: &str) -> String {
    let stem = key.strip_prefix("hh-").unwrap_or(key);
    stem.split('-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

fn builtin_weights() -> Vec<(String, WeightTuple)> {
    const TABLE: &[(&str, WeightTuple)] = &[
        // Vascular
        ("hh-leg-lung-clots", [0.0, 0.0, 0.0, 0.0, 1.0, 0.0]),
        ("hh-dvt-pulmonary-embolism", [0.0, 0.0, 0.0, 0.0, 1.0, 0.0]),
        ("hh-blood-clots", [0.0, 0.0, 0.0, 0.0, 1.0, 0.0]),
        ("hh-pulmonary-embolism", [0.0, 0.0, 0.0, 0.0, 1.0, 0.0]),
        ("hh-heart-attack", [0.0, 0.0, 0.0, 0.0, 1.0, 0.0]),
        ("hh-stroke", [0.0, 0.0, 0.0, 0.0, 1.0, 0.0]),
        ("hh-tia", [0.0, 0.0, 0.0, 0.0, 1.0, 0.0]),
        ("hh-stroke-tia", [0.0, 0.0, 0.0, 0.0, 1.0, 0.0]),
        ("hh-atherosclerosis", [0.0, 0.0, 0.0, 0.0, 1.0, 0.0]),
        ("hh-high-blood-pressure", [0.0, 0.0, 0.0, 0.0, 0.5, 0.0]),
        ("hh-cardiac-bypass", [0.0, 0.0, 0.0, 0.0, 1.0, 0.0]),
        ("hh-angioplasty", [0.0, 0.0, 0.0, 0.0, 1.0, 0.0]),
        ("hh-cardiac-stent", [0.0, 0.0, 0.0, 0.0, 1.0, 0.0]),
        ("hh-atrial-fibrillation", [0.0, 0.0, 0.0, 0.0, 0.5, 0.0]),
        // Toxic
        ("hh-electroshock-therapy", [0.0, 0.25, 0.0, 0.5, 0.25, 0.0]),
        ("hh-welding-soldering", [0.0, 0.0, 0.0, 1.0, 0.0, 0.0]),
        ("hh-work-home-mold", [0.0, 0.0, 0.0, 1.0, 0.0, 0.0]),
        ("hh-mold-exposure", [0.0, 0.0, 0.0, 1.0, 0.0, 0.0]),
        ("hh-chemical-exposure", [0.0, 0.0, 0.0, 1.0, 0.0, 0.0]),
        ("hh-pesticide-exposure", [0.0, 0.0, 0.0, 1.0, 0.0, 0.0]),
        ("hh-heavy-metal-exposure", [0.0, 0.0, 0.0, 1.0, 0.0, 0.0]),
        ("hh-mercury-exposure", [0.0, 0.0, 0.0, 1.0, 0.0, 0.0]),
        ("hh-lead-exposure", [0.0, 0.0, 0.0, 1.0, 0.0, 0.0]),
        ("hh-asbestos-exposure", [0.0, 0.0, 0.0, 1.0, 0.0, 0.0]),
        ("hh-occupational-chemicals", [0.0, 0.0, 0.0, 1.0, 0.0, 0.0]),
        ("hh-solvent-exposure", [0.0, 0.0, 0.0, 1.0, 0.0, 0.0]),
        // Inflammatory
        ("hh-anti-inflam-meds", [1.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
        ("hh-frequent-ibuprofen", [1.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
        ("hh-frequent-nsaid", [1.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
        ("hh-chronic-pain", [1.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
        ("hh-arthritis", [1.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
        ("hh-autoimmune-disease", [1.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
        ("hh-inflammatory-bowel", [1.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
        ("hh-crohns-disease", [1.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
        ("hh-ulcerative-colitis", [1.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
        ("hh-celiac-disease", [1.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
        ("hh-food-allergies", [0.5, 0.0, 0.0, 0.0, 0.0, 0.0]),
        ("hh-chronic-allergies", [0.5, 0.0, 0.0, 0.0, 0.0, 0.0]),
        // Traumatic
        ("hh-head-injury", [0.0, 0.0, 0.0, 0.0, 0.0, 1.0]),
        ("hh-concussion", [0.0, 0.0, 0.0, 0.0, 0.0, 1.0]),
        ("hh-traumatic-brain-injury", [0.0, 0.0, 0.0, 0.0, 0.0, 1.0]),
        ("hh-tbi", [0.0, 0.0, 0.0, 0.0, 0.0, 1.0]),
        ("hh-multiple-concussions", [0.0, 0.0, 0.0, 0.0, 0.0, 1.5]),
        ("hh-sports-head-injury", [0.0, 0.0, 0.0, 0.0, 0.0, 1.0]),
        ("hh-car-accident-head", [0.0, 0.0, 0.0, 0.0, 0.0, 1.0]),
        ("hh-fall-head-injury", [0.0, 0.0, 0.0, 0.0, 0.0, 1.0]),
        // Glycotoxic
        ("hh-diabetes", [0.0, 0.0, 1.0, 0.0, 0.0, 0.0]),
        ("hh-type-2-diabetes", [0.0, 0.0, 1.0, 0.0, 0.0, 0.0]),
        ("hh-insulin-resistance", [0.0, 0.0, 1.0, 0.0, 0.0, 0.0]),
        ("hh-metabolic-syndrome", [0.0, 0.0, 1.0, 0.0, 0.0, 0.0]),
        ("hh-high-blood-sugar", [0.0, 0.0, 0.5, 0.0, 0.0, 0.0]),
        ("hh-frequent-carb-sugar", [0.0, 0.0, 0.5, 0.0, 0.0, 0.0]),
        ("hh-sugar-cravings", [0.0, 0.0, 0.5, 0.0, 0.0, 0.0]),
        ("hh-processed-foods", [0.0, 0.0, 0.5, 0.0, 0.0, 0.0]),
        // Atrophic
        ("hh-menopause", [0.0, 1.0, 0.0, 0.0, 0.0, 0.0]),
        ("hh-postmenopausal", [0.0, 1.0, 0.0, 0.0, 0.0, 0.0]),
        ("hh-low-testosterone", [0.0, 1.0, 0.0, 0.0, 0.0, 0.0]),
        ("hh-hormone-deficiency", [0.0, 1.0, 0.0, 0.0, 0.0, 0.0]),
        ("hh-thyroid-disease", [0.0, 0.5, 0.0, 0.0, 0.0, 0.0]),
        ("hh-hypothyroid", [0.0, 0.5, 0.0, 0.0, 0.0, 0.0]),
        ("hh-nutrient-deficiency", [0.0, 0.5, 0.0, 0.0, 0.0, 0.0]),
        ("hh-poor-diet", [0.0, 0.5, 0.0, 0.0, 0.0, 0.0]),
        ("hh-malabsorption", [0.0, 0.5, 0.0, 0.0, 0.0, 0.0]),
        ("hh-weight-loss-surgery", [0.0, 0.5, 0.0, 0.0, 0.0, 0.0]),
        ("hh-bowel-surgery", [0.0, 0.5, 0.0, 0.0, 0.0, 0.0]),
    ];
    TABLE
        .iter()
        .map(|(key, tuple)| (key.to_string(), *tuple))
        .collect()
}
