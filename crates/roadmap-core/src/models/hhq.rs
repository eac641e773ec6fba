use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CoreError;

/// A single questionnaire answer. Almost every item is a yes/no flag; a
/// couple (height, weight) carry free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HhqValue {
    Flag(bool),
    Text(String),
}

/// Health History Questionnaire responses in submission order.
///
/// Keys are normalised to the hyphenated spelling on insert
/// (`hh_head_injury` becomes `hh-head-injury`). Only `Flag(true)` counts as
/// a positive answer; a missing key and `Flag(false)` are indistinguishable
/// to every reader.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HhqResponses {
    entries: Vec<(String, HhqValue)>,
}

impl HhqResponses {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Insert or overwrite an answer. An overwritten key keeps its
    /// original position.
    pub fn insert(&mut self, key: &str, value: HhqValue) {
        let key = normalize_key(key);
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    pub fn set_flag(&mut self, key: &str, value: bool) {
        self.insert(key, HhqValue::Flag(value));
    }

    pub fn set_text(&mut self, key: &str, value: impl Into<String>) {
        self.insert(key, HhqValue::Text(value.into()));
    }

    pub fn get(&self, key: &str) -> Option<&HhqValue> {
        let key = normalize_key(key);
        self.entries.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    pub fn is_true(&self, key: &str) -> bool {
        matches!(self.get(key), Some(HhqValue::Flag(true)))
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        match self.get(key) {
            Some(HhqValue::Text(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &HhqValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Keys answered `true`, in submission order.
    pub fn positive_keys(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|(_, v)| matches!(v, HhqValue::Flag(true)))
            .map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: AsRef<str>> FromIterator<(K, HhqValue)> for HhqResponses {
    fn from_iter<I: IntoIterator<Item = (K, HhqValue)>>(iter: I) -> Self {
        let mut responses = HhqResponses::new();
        for (key, value) in iter {
            responses.insert(key.as_ref(), value);
        }
        responses
    }
}

/// Canonical key spelling: trimmed, underscores replaced by hyphens.
pub fn normalize_key(raw: &str) -> String {
    raw.trim().replace('_', "-")
}

impl Serialize for HhqResponses {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for HhqResponses {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ResponsesVisitor)
    }
}

struct ResponsesVisitor;

impl<'de> Visitor<'de> for ResponsesVisitor {
    type Value = HhqResponses;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of questionnaire variable ids to booleans or text")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut responses = HhqResponses::new();
        while let Some((key, value)) = access.next_entry::<String, serde_json::Value>()? {
            // Nulls are unanswered items; numbers are kept as text.
            let value = match value {
                serde_json::Value::Bool(b) => HhqValue::Flag(b),
                serde_json::Value::String(s) => HhqValue::Text(s),
                serde_json::Value::Number(n) => HhqValue::Text(n.to_string()),
                serde_json::Value::Null
                | serde_json::Value::Array(_)
                | serde_json::Value::Object(_) => continue,
            };
            responses.insert(&key, value);
        }
        Ok(responses)
    }
}
