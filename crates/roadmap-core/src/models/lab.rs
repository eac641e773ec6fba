use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

/// One lab result as emitted by the upstream extractor, before any
/// name mapping or value parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawLabEntry {
    pub test_name: String,
    #[serde(deserialize_with = "string_or_number")]
    pub value: String,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub reference_range: Option<String>,
}

impl RawLabEntry {
    pub fn new(test_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            test_name: test_name.into(),
            value: value.into(),
            unit: None,
            reference_range: None,
        }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn with_reference_range(mut self, range: impl Into<String>) -> Self {
        self.reference_range = Some(range.into());
        self
    }
}

/// Extractors emit numbers both as JSON numbers and as strings.
fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Bool(b) => Ok(b.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "lab value must be a string or number, got {other}"
        ))),
    }
}

/// Comparator prefix found on censored results such as `<1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Qualifier {
    LessThan,
    AtMost,
    GreaterThan,
    AtLeast,
}

impl Qualifier {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "<" => Some(Qualifier::LessThan),
            "<=" => Some(Qualifier::AtMost),
            ">" => Some(Qualifier::GreaterThan),
            ">=" => Some(Qualifier::AtLeast),
            _ => None,
        }
    }
}

/// Inclusive bounds of a reference interval; either side may be open.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReferenceRange {
    pub low: Option<f64>,
    pub high: Option<f64>,
}

impl ReferenceRange {
    pub fn new(low: Option<f64>, high: Option<f64>) -> Self {
        Self { low, high }
    }

    /// Parse `a-b`, `<b`, `<=b`, `>a` and `>=a` forms. Whitespace is ignored.
    pub fn parse(raw: &str) -> Option<Self> {
        let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
        if compact.is_empty() {
            return None;
        }
        if let Some(rest) = compact.strip_prefix("<=").or_else(|| compact.strip_prefix('<')) {
            return parse_decimal(rest).map(|high| Self::new(None, Some(high)));
        }
        if let Some(rest) = compact.strip_prefix(">=").or_else(|| compact.strip_prefix('>')) {
            return parse_decimal(rest).map(|low| Self::new(Some(low), None));
        }
        // Skip a leading sign so "-1.0-2.0" splits on the separator, not the sign.
        let split_at = compact
            .char_indices()
            .skip(1)
            .find(|(_, c)| *c == '-')
            .map(|(i, _)| i)?;
        let low = parse_decimal(&compact[..split_at])?;
        let high = parse_decimal(&compact[split_at + 1..])?;
        (low <= high).then_some(Self::new(Some(low), Some(high)))
    }

    pub fn contains(&self, value: f64) -> bool {
        self.low.is_none_or(|low| value >= low) && self.high.is_none_or(|high| value <= high)
    }
}

fn parse_decimal(raw: &str) -> Option<f64> {
    raw.replace(',', "").parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Zygosity of one MTHFR variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum MthfrStatus {
    Normal,
    Heterozygous,
    Homozygous,
}

impl MthfrStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MthfrStatus::Normal => "normal",
            MthfrStatus::Heterozygous => "heterozygous",
            MthfrStatus::Homozygous => "homozygous",
        }
    }
}

impl fmt::Display for MthfrStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The parsed content of a lab result.
///
/// Numerics and categorical results are kept apart so that a threshold
/// comparison against a genotype can only ever be false, never a coercion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum LabReading {
    Numeric {
        value: f64,
        qualifier: Option<Qualifier>,
    },
    /// One APOE allele, 2, 3 or 4.
    Allele { allele: u8 },
    Mthfr { status: MthfrStatus },
    /// A categorical result that could not be decoded. Present, but never
    /// satisfies a predicate.
    Unparsed { raw: String },
}

/// A canonical lab fact: at most one per canonical id in a panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LabValue {
    pub id: String,
    pub reading: LabReading,
    pub unit: Option<String>,
    pub reference_range: Option<ReferenceRange>,
}

impl LabValue {
    pub fn numeric(id: impl Into<String>, value: f64) -> Self {
        Self {
            id: id.into(),
            reading: LabReading::Numeric {
                value,
                qualifier: None,
            },
            unit: None,
            reference_range: None,
        }
    }

    pub fn allele(id: impl Into<String>, allele: u8) -> Self {
        Self {
            id: id.into(),
            reading: LabReading::Allele { allele },
            unit: None,
            reference_range: None,
        }
    }

    pub fn mthfr(id: impl Into<String>, status: MthfrStatus) -> Self {
        Self {
            id: id.into(),
            reading: LabReading::Mthfr { status },
            unit: None,
            reference_range: None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self.reading {
            LabReading::Numeric { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn as_allele(&self) -> Option<u8> {
        match self.reading {
            LabReading::Allele { allele } => Some(allele),
            _ => None,
        }
    }

    pub fn as_mthfr(&self) -> Option<MthfrStatus> {
        match self.reading {
            LabReading::Mthfr { status } => Some(status),
            _ => None,
        }
    }

    /// Whether the value falls outside its reference interval, when both
    /// are known.
    pub fn out_of_range(&self) -> Option<bool> {
        let value = self.as_number()?;
        let range = self.reference_range?;
        Some(!range.contains(value))
    }
}

/// Canonical lab values keyed by canonical id. Ordered so that iteration
/// is stable across runs.
pub type LabPanel = BTreeMap<String, LabValue>;
