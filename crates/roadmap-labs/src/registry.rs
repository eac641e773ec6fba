use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

use roadmap_core::models::client::Sex;
use roadmap_core::models::lab::ReferenceRange;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::LabError;
use crate::units;

/// How the raw value of a canonical lab is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum LabKind {
    #[default]
    Numeric,
    /// A single APOE allele (`4` or `E4`).
    Allele,
    /// An MTHFR variant description.
    Mthfr,
    /// A combined APOE genotype (`E3/E4`) that is split into the two
    /// allele ids.
    ApoeGenotype,
}

/// Registry entry for one canonical lab id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LabDefinition {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub range: Option<ReferenceRange>,
    #[serde(default)]
    pub kind: LabKind,
}

/// Multiply a value reported in `from` by `factor` to reach the
/// definition's expected unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitConversion {
    pub id: String,
    pub from: String,
    pub factor: f64,
}

/// Declarative form of the registry, as stored in JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistryData {
    pub definitions: Vec<LabDefinition>,
    /// Raw extractor name → canonical id. Case- and punctuation-sensitive.
    pub names: BTreeMap<String, String>,
    /// Hormone names whose canonical id depends on the client's sex.
    #[serde(default)]
    pub male_overlay: BTreeMap<String, String>,
    #[serde(default)]
    pub female_overlay: BTreeMap<String, String>,
    #[serde(default)]
    pub conversions: Vec<UnitConversion>,
}

/// Validated, immutable name and definition tables.
#[derive(Debug, Clone)]
pub struct CanonicalRegistry {
    data: RegistryData,
    index: HashMap<String, usize>,
}

static BUILTIN: LazyLock<CanonicalRegistry> = LazyLock::new(|| {
    CanonicalRegistry::new(crate::builtin::registry_data())
        .unwrap_or_else(|e| panic!("built-in canonical registry is invalid: {e}"))
});

impl CanonicalRegistry {
    /// Validate `data` and build the lookup index.
    pub fn new(data: RegistryData) -> Result<Self, LabError> {
        let mut index = HashMap::with_capacity(data.definitions.len());
        for (i, def) in data.definitions.iter().enumerate() {
            if index.insert(def.id.clone(), i).is_some() {
                return Err(LabError::DuplicateDefinition(def.id.clone()));
            }
        }

        let tables = [
            ("name table", &data.names),
            ("male overlay", &data.male_overlay),
            ("female overlay", &data.female_overlay),
        ];
        for (table, map) in tables {
            if let Some((name, id)) = map.iter().find(|(_, id)| !index.contains_key(*id)) {
                return Err(LabError::UnknownTarget {
                    table,
                    name: name.clone(),
                    id: id.clone(),
                });
            }
        }

        for conv in &data.conversions {
            if !index.contains_key(&conv.id) {
                return Err(LabError::UnknownTarget {
                    table: "conversions",
                    name: conv.from.clone(),
                    id: conv.id.clone(),
                });
            }
            if !conv.factor.is_finite() || conv.factor <= 0.0 {
                return Err(LabError::InvalidConversion {
                    id: conv.id.clone(),
                    from: conv.from.clone(),
                    factor: conv.factor,
                });
            }
        }

        Ok(Self { data, index })
    }

    pub fn from_json(json: &str) -> Result<Self, LabError> {
        let data: RegistryData = serde_json::from_str(json)?;
        Self::new(data)
    }

    /// The registry compiled into this crate.
    ///
    /// # Panics
    ///
    /// Panics on first use if the built-in tables fail validation, which
    /// is a bug in [`crate::builtin`].
    pub fn builtin() -> &'static CanonicalRegistry {
        &BUILTIN
    }

    pub fn data(&self) -> &RegistryData {
        &self.data
    }

    pub fn definitions(&self) -> &[LabDefinition] {
        &self.data.definitions
    }

    pub fn definition(&self, id: &str) -> Option<&LabDefinition> {
        self.index.get(id).map(|&i| &self.data.definitions[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Resolve a raw test name to its definition.
    ///
    /// Lookup order: the primary name table, then canonical ids themselves
    /// (so canonical input passes through unchanged), then the hormone
    /// overlay for the client's sex. An unknown sex never resolves a
    /// hormone name.
    pub fn resolve(&self, raw_name: &str, sex: Sex) -> Option<&LabDefinition> {
        let name = raw_name.trim();
        if let Some(id) = self.data.names.get(name) {
            return self.definition(id);
        }
        if let Some(def) = self.definition(name) {
            return Some(def);
        }
        let overlay = match sex {
            Sex::Male => &self.data.male_overlay,
            Sex::Female => &self.data.female_overlay,
            Sex::Unknown => return None,
        };
        overlay.get(name).and_then(|id| self.definition(id))
    }

    /// Whether `raw_name` only resolves through a sex overlay.
    pub fn is_hormone_name(&self, raw_name: &str) -> bool {
        let name = raw_name.trim();
        self.data.male_overlay.contains_key(name) || self.data.female_overlay.contains_key(name)
    }

    /// Conversion factor from `unit` to the expected unit of `id`, if known.
    pub fn conversion(&self, id: &str, unit: &str) -> Option<f64> {
        self.data
            .conversions
            .iter()
            .find(|c| c.id == id && units::same_unit(&c.from, unit))
            .map(|c| c.factor)
    }
}
