use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// Biological sex as recorded for the client.
///
/// Drives hormone-panel name mapping and the sex gate of rules. Upstream
/// systems spell it many ways (`"F"`, `"female"`, `"Male"`); anything
/// unrecognised deserializes to [`Sex::Unknown`] instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Sex {
    Female,
    Male,
    #[default]
    Unknown,
}

impl Sex {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "f" | "female" | "woman" => Sex::Female,
            "m" | "male" | "man" => Sex::Male,
            _ => Sex::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Female => "female",
            Sex::Male => "male",
            Sex::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Sex {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(Sex::parse).unwrap_or_default())
    }
}

/// Client demographics for one roadmap invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Client {
    pub name: String,
    #[serde(default)]
    pub sex: Sex,
    #[serde(default)]
    pub dob: Option<jiff::civil::Date>,
    #[serde(default)]
    pub labs_date: Option<jiff::civil::Date>,
}

impl Client {
    pub fn new(name: impl Into<String>, sex: Sex) -> Self {
        Self {
            name: name.into(),
            sex,
            dob: None,
            labs_date: None,
        }
    }

    /// First whitespace-delimited token of the display name.
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or("")
    }

    /// Whole years between date of birth and `on`. `None` without a DOB or
    /// when `on` precedes it.
    pub fn age_on(&self, on: jiff::civil::Date) -> Option<i16> {
        let dob = self.dob?;
        let mut years = on.year() - dob.year();
        if (on.month(), on.day()) < (dob.month(), dob.day()) {
            years -= 1;
        }
        (years >= 0).then_some(years)
    }
}

/// Parse an ISO `YYYY-MM-DD` date, mapping failures into [`CoreError`].
pub fn parse_date(raw: &str) -> Result<jiff::civil::Date, CoreError> {
    raw.trim()
        .parse::<jiff::civil::Date>()
        .map_err(|e| CoreError::InvalidDate {
            value: raw.to_string(),
            reason: e.to_string(),
        })
}
