use jiff::civil::Date;
use roadmap_core::ids::hhq;
use roadmap_core::models::client::{Client, Sex};
use roadmap_core::models::hhq::HhqResponses;
use roadmap_core::models::lab::{LabPanel, LabValue, MthfrStatus};

use crate::body;

/// Demographic field names understood by [`FactStore::demographic`].
pub mod field {
    pub const NAME: &str = "name";
    pub const FIRST_NAME: &str = "first-name";
    pub const SEX: &str = "sex";
    pub const DOB: &str = "dob";
    pub const LABS_DATE: &str = "labs-date";
    pub const AGE: &str = "age";
}

/// Immutable snapshot of everything a rule may look at.
///
/// Every lookup is total: a missing lab is `None`, a missing questionnaire
/// answer is `false`, and the threshold helpers are `false` unless the lab
/// is present and numeric.
#[derive(Debug, Clone, PartialEq)]
pub struct FactStore {
    client: Client,
    labs: LabPanel,
    hhq: HhqResponses,
    report_date: Option<Date>,
}

impl FactStore {
    pub fn new(client: Client, labs: LabPanel, hhq: HhqResponses) -> Self {
        Self {
            client,
            labs,
            hhq,
            report_date: None,
        }
    }

    /// Date the report is generated for; needed for age.
    pub fn with_report_date(mut self, date: Date) -> Self {
        self.report_date = Some(date);
        self
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn sex(&self) -> Sex {
        self.client.sex
    }

    pub fn labs(&self) -> &LabPanel {
        &self.labs
    }

    pub fn hhq_responses(&self) -> &HhqResponses {
        &self.hhq
    }

    pub fn report_date(&self) -> Option<Date> {
        self.report_date
    }

    /// Demographic field by name, see [`field`].
    pub fn demographic(&self, name: &str) -> Option<String> {
        match name {
            field::NAME => Some(self.client.name.clone()),
            field::FIRST_NAME => Some(self.client.first_name().to_string()),
            field::SEX => Some(self.client.sex.as_str().to_string()),
            field::DOB => self.client.dob.map(|d| d.to_string()),
            field::LABS_DATE => self.client.labs_date.map(|d| d.to_string()),
            field::AGE => self.age().map(|a| a.to_string()),
            _ => None,
        }
    }

    pub fn age(&self) -> Option<i16> {
        self.client.age_on(self.report_date?)
    }

    pub fn lab(&self, id: &str) -> Option<&LabValue> {
        self.labs.get(id)
    }

    pub fn has_lab(&self, id: &str) -> bool {
        self.labs.contains_key(id)
    }

    pub fn number(&self, id: &str) -> Option<f64> {
        self.lab(id).and_then(LabValue::as_number)
    }

    pub fn allele(&self, id: &str) -> Option<u8> {
        self.lab(id).and_then(LabValue::as_allele)
    }

    pub fn mthfr(&self, id: &str) -> Option<MthfrStatus> {
        self.lab(id).and_then(LabValue::as_mthfr)
    }

    /// Questionnaire flag; absent and non-boolean answers read as `false`.
    pub fn hhq(&self, key: &str) -> bool {
        self.hhq.is_true(key)
    }

    pub fn above(&self, id: &str, threshold: f64) -> bool {
        self.number(id).is_some_and(|v| v > threshold)
    }

    pub fn below(&self, id: &str, threshold: f64) -> bool {
        self.number(id).is_some_and(|v| v < threshold)
    }

    /// Inclusive on both ends.
    pub fn between(&self, id: &str, low: f64, high: f64) -> bool {
        self.number(id).is_some_and(|v| v >= low && v <= high)
    }

    /// BMI from the free-text height and weight answers.
    pub fn bmi(&self) -> Option<f64> {
        let height = self.hhq.text(hhq::HEIGHT)?;
        let weight = self.hhq.text(hhq::WEIGHT)?;
        body::bmi(height, weight)
    }
}
