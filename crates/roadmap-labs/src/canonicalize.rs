use roadmap_core::ids::lab::{APO1, APO2};
use roadmap_core::models::client::Sex;
use roadmap_core::models::diagnostic::{DiagnosticCode, Diagnostics};
use roadmap_core::models::lab::{LabPanel, LabReading, LabValue, RawLabEntry, ReferenceRange};

use crate::genotype;
use crate::numeric::parse_numeric;
use crate::registry::{CanonicalRegistry, LabDefinition, LabKind};
use crate::units;

/// Translates raw extractor entries into a canonical [`LabPanel`].
///
/// Nothing here fails: unknown names and unreadable values are dropped or
/// kept as [`LabReading::Unparsed`], and each such decision is recorded as
/// a diagnostic.
#[derive(Debug, Clone, Copy)]
pub struct Canonicalizer<'a> {
    registry: &'a CanonicalRegistry,
}

impl<'a> Canonicalizer<'a> {
    pub fn new(registry: &'a CanonicalRegistry) -> Self {
        Self { registry }
    }

    pub fn canonicalize(
        &self,
        entries: &[RawLabEntry],
        sex: Sex,
        diagnostics: &mut Diagnostics,
    ) -> LabPanel {
        let mut panel = LabPanel::new();

        for entry in entries {
            let Some(def) = self.registry.resolve(&entry.test_name, sex) else {
                let name = entry.test_name.trim();
                tracing::debug!(test_name = %name, sex = %sex, "dropping unmapped lab entry");
                if sex == Sex::Unknown && self.registry.is_hormone_name(name) {
                    diagnostics.push(
                        DiagnosticCode::UnknownLabName,
                        format!("'{name}' is a sex-specific hormone and client sex is unknown"),
                    );
                } else {
                    diagnostics.push(DiagnosticCode::UnknownLabName, format!("'{name}'"));
                }
                continue;
            };

            match def.kind {
                LabKind::Numeric => {
                    if let Some(value) = self.numeric_value(def, entry, diagnostics) {
                        insert(&mut panel, value, diagnostics);
                    }
                }
                LabKind::Allele => {
                    let reading = match genotype::decode_allele(&entry.value) {
                        Some(allele) => LabReading::Allele { allele },
                        None => unparsed(def, entry, diagnostics),
                    };
                    insert(&mut panel, categorical(&def.id, reading), diagnostics);
                }
                LabKind::Mthfr => {
                    let reading = match genotype::decode_mthfr(&entry.value) {
                        Some(status) => LabReading::Mthfr { status },
                        None => unparsed(def, entry, diagnostics),
                    };
                    insert(&mut panel, categorical(&def.id, reading), diagnostics);
                }
                LabKind::ApoeGenotype => {
                    let (first, second) = match genotype::decode_apoe(&entry.value) {
                        Some((a, b)) => (
                            LabReading::Allele { allele: a },
                            LabReading::Allele { allele: b },
                        ),
                        None => {
                            let reading = unparsed(def, entry, diagnostics);
                            (reading.clone(), reading)
                        }
                    };
                    insert(&mut panel, categorical(APO1, first), diagnostics);
                    insert(&mut panel, categorical(APO2, second), diagnostics);
                }
            }
        }

        tracing::debug!(
            entries = entries.len(),
            canonical = panel.len(),
            "canonicalized lab entries"
        );
        panel
    }

    fn numeric_value(
        &self,
        def: &LabDefinition,
        entry: &RawLabEntry,
        diagnostics: &mut Diagnostics,
    ) -> Option<LabValue> {
        let Some(parsed) = parse_numeric(&entry.value) else {
            tracing::warn!(id = %def.id, value = %entry.value, "unparseable numeric lab value");
            diagnostics.push(
                DiagnosticCode::UnparseableValue,
                format!("{}: '{}' from '{}'", def.id, entry.value, entry.test_name.trim()),
            );
            return None;
        };

        let mut value = parsed.value;
        let mut range = entry
            .reference_range
            .as_deref()
            .and_then(ReferenceRange::parse);
        let mut unit = entry
            .unit
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .map(str::to_string);

        match (unit.as_deref(), def.unit.as_deref()) {
            (Some(given), Some(expected)) if !units::same_unit(given, expected) => {
                match self.registry.conversion(&def.id, given) {
                    Some(factor) => {
                        value *= factor;
                        range = range.map(|r| {
                            ReferenceRange::new(r.low.map(|v| v * factor), r.high.map(|v| v * factor))
                        });
                        unit = Some(expected.to_string());
                    }
                    None => {
                        diagnostics.push(
                            DiagnosticCode::UnitMismatch,
                            format!("{}: reported in '{given}', expected '{expected}'", def.id),
                        );
                    }
                }
            }
            (None, Some(expected)) => unit = Some(expected.to_string()),
            _ => {}
        }

        let consistent = match (unit.as_deref(), def.unit.as_deref()) {
            (Some(a), Some(b)) => units::same_unit(a, b),
            (a, b) => a == b,
        };
        if range.is_none() && consistent {
            range = def.range;
        }

        let lab = LabValue {
            id: def.id.clone(),
            reading: LabReading::Numeric {
                value,
                qualifier: parsed.qualifier,
            },
            unit,
            reference_range: range,
        };
        if lab.out_of_range() == Some(true) {
            tracing::debug!(id = %def.id, value, "lab value outside reference range");
        }
        Some(lab)
    }
}

fn unparsed(def: &LabDefinition, entry: &RawLabEntry, diagnostics: &mut Diagnostics) -> LabReading {
    tracing::warn!(id = %def.id, value = %entry.value, "undecodable categorical lab value");
    diagnostics.push(
        DiagnosticCode::UnparseableValue,
        format!("{}: '{}' kept undecoded", def.id, entry.value),
    );
    LabReading::Unparsed {
        raw: entry.value.trim().to_string(),
    }
}

fn categorical(id: &str, reading: LabReading) -> LabValue {
    LabValue {
        id: id.to_string(),
        reading,
        unit: None,
        reference_range: None,
    }
}

/// Last write wins, in input order.
fn insert(panel: &mut LabPanel, value: LabValue, diagnostics: &mut Diagnostics) {
    if panel.contains_key(&value.id) {
        diagnostics.push(
            DiagnosticCode::DuplicateLab,
            format!("{} reported more than once; keeping the later value", value.id),
        );
    }
    panel.insert(value.id.clone(), value);
}
