use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Severity {
    Info,
    Warning,
}

/// Stable machine-readable diagnostic codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum DiagnosticCode {
    UnknownLabName,
    UnparseableValue,
    DuplicateLab,
    UnitMismatch,
    UnknownFactId,
    UnknownRuleId,
    MissingPlaceholder,
}

impl DiagnosticCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticCode::UnknownLabName => "UNKNOWN_LAB_NAME",
            DiagnosticCode::UnparseableValue => "UNPARSEABLE_VALUE",
            DiagnosticCode::DuplicateLab => "DUPLICATE_LAB",
            DiagnosticCode::UnitMismatch => "UNIT_MISMATCH",
            DiagnosticCode::UnknownFactId => "UNKNOWN_FACT_ID",
            DiagnosticCode::UnknownRuleId => "UNKNOWN_RULE_ID",
            DiagnosticCode::MissingPlaceholder => "MISSING_PLACEHOLDER",
        }
    }

    pub fn default_severity(&self) -> Severity {
        match self {
            DiagnosticCode::DuplicateLab | DiagnosticCode::UnitMismatch => Severity::Info,
            _ => Severity::Warning,
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: DiagnosticCode,
    pub detail: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Info => "info",
            Severity::Warning => "warning",
        };
        write!(f, "{level} [{}]: {}", self.code, self.detail)
    }
}

/// Ordered collection of diagnostics for one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic at the code's default severity.
    pub fn push(&mut self, code: DiagnosticCode, detail: impl Into<String>) {
        self.0.push(Diagnostic {
            severity: code.default_severity(),
            code,
            detail: detail.into(),
        });
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.0.extend(other.0);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn count(&self, code: DiagnosticCode) -> usize {
        self.0.iter().filter(|d| d.code == code).count()
    }

    pub fn contains(&self, code: DiagnosticCode) -> bool {
        self.count(code) > 0
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter().filter(|d| d.severity == Severity::Warning)
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.0
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
