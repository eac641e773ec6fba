//! Built-in registry tables for LabCorp-style extractor output.

use std::collections::BTreeMap;

use roadmap_core::ids::lab::*;
use roadmap_core::models::lab::ReferenceRange;

use crate::registry::{LabDefinition, LabKind, RegistryData, UnitConversion};

/// Id of the combined APOE genotype entry, split into [`APO1`] and [`APO2`].
pub const APOE_GENOTYPE: &str = "APOE";

fn numeric(id: &str, label: &str, unit: &str, low: Option<f64>, high: Option<f64>) -> LabDefinition {
    LabDefinition {
        id: id.to_string(),
        label: label.to_string(),
        unit: (!unit.is_empty()).then(|| unit.to_string()),
        range: (low.is_some() || high.is_some()).then_some(ReferenceRange::new(low, high)),
        kind: LabKind::Numeric,
    }
}

fn categorical(id: &str, label: &str, kind: LabKind) -> LabDefinition {
    LabDefinition {
        id: id.to_string(),
        label: label.to_string(),
        unit: None,
        range: None,
        kind,
    }
}

fn definitions() -> Vec<LabDefinition> {
    vec![
        numeric(CBC_WBC, "WBC", "x10E3/uL", Some(3.4), Some(10.8)),
        numeric(CBC_RBC, "RBC", "x10E6/uL", Some(3.77), Some(5.8)),
        numeric(CBC_HGB, "Hemoglobin", "g/dL", Some(11.1), Some(17.7)),
        numeric(CBC_HCT, "Hematocrit", "%", Some(34.0), Some(51.0)),
        numeric(CBC_MCV, "MCV", "fL", Some(79.0), Some(97.0)),
        numeric(CBC_PLT, "Platelets", "x10E3/uL", Some(150.0), Some(450.0)),
        numeric(CBC_NEUT_ABS, "Neutrophils (Absolute)", "x10E3/uL", Some(1.4), Some(7.0)),
        numeric(CBC_LYMPH_ABS, "Lymphs (Absolute)", "x10E3/uL", Some(0.7), Some(3.1)),
        numeric(CHEM_GLU, "Glucose", "mg/dL", Some(70.0), Some(99.0)),
        numeric(CHEM_BUN, "BUN", "mg/dL", Some(6.0), Some(24.0)),
        numeric(CHEM_CREAT, "Creatinine", "mg/dL", Some(0.57), Some(1.27)),
        numeric(CHEM_EGFR, "eGFR", "mL/min/1.73", Some(59.0), None),
        numeric(CHEM_NA, "Sodium", "mmol/L", Some(134.0), Some(144.0)),
        numeric(CHEM_K, "Potassium", "mmol/L", Some(3.5), Some(5.2)),
        numeric(CHEM_CL, "Chloride", "mmol/L", Some(96.0), Some(106.0)),
        numeric(CHEM_CA, "Calcium", "mg/dL", Some(8.7), Some(10.2)),
        numeric(LFT_ALB, "Albumin", "g/dL", Some(3.8), Some(4.9)),
        numeric(LFT_ALT, "ALT (SGPT)", "IU/L", Some(0.0), Some(44.0)),
        numeric(LFT_AST, "AST (SGOT)", "IU/L", Some(0.0), Some(40.0)),
        numeric(LFT_ALKP, "Alkaline Phosphatase", "IU/L", Some(44.0), Some(121.0)),
        numeric(LFT_TBILI, "Bilirubin, Total", "mg/dL", Some(0.0), Some(1.2)),
        numeric(LIPID_CHOL, "Cholesterol, Total", "mg/dL", Some(100.0), Some(199.0)),
        numeric(LIPID_TRIG, "Triglycerides", "mg/dL", Some(0.0), Some(149.0)),
        numeric(LIPID_HDL, "HDL Cholesterol", "mg/dL", Some(39.0), None),
        numeric(LIPID_LDL, "LDL Chol Calc (NIH)", "mg/dL", Some(0.0), Some(99.0)),
        numeric(THY_TSH, "TSH", "uIU/mL", Some(0.45), Some(4.5)),
        numeric(THY_T3F, "Triiodothyronine (T3), Free", "pg/mL", Some(2.0), Some(4.4)),
        numeric(THY_T4F, "T4, Free (Direct)", "ng/dL", Some(0.82), Some(1.77)),
        numeric(THY_RT3, "Reverse T3, Serum", "ng/dL", Some(9.2), Some(24.1)),
        numeric(THY_TPOAB, "Thyroid Peroxidase (TPO) Ab", "IU/mL", Some(0.0), Some(34.0)),
        numeric(THY_TGAB, "Thyroglobulin Antibody", "IU/mL", Some(0.0), Some(0.9)),
        numeric(NEURO_PREG, "Pregnenolone, MS", "ng/dL", Some(22.0), Some(237.0)),
        numeric(NEURO_DHEAS, "DHEA-Sulfate", "ug/dL", None, None),
        numeric(NEURO_CORT, "Cortisol - AM", "ug/dL", Some(6.2), Some(19.4)),
        numeric(VIT_D25, "Vitamin D, 25-Hydroxy", "ng/mL", Some(30.0), Some(100.0)),
        numeric(VIT_B12, "Vitamin B12", "pg/mL", Some(232.0), Some(1245.0)),
        numeric(VIT_E, "Vitamin E (Alpha Tocopherol)", "mg/L", Some(5.9), Some(19.4)),
        numeric(VIT_FOLATE, "Folate (Folic Acid), Serum", "ng/mL", Some(3.0), None),
        numeric(MIN_ZN, "Zinc, Plasma or Serum", "ug/dL", Some(44.0), Some(115.0)),
        numeric(MIN_CU, "Copper, Serum or Plasma", "ug/dL", Some(63.7), Some(140.0)),
        numeric(MIN_SE, "Selenium, Serum/Plasma", "ug/L", Some(93.0), Some(198.0)),
        numeric(MIN_MG_RBC, "Magnesium, RBC", "mg/dL", Some(4.2), Some(6.8)),
        numeric(INFLAM_CRP, "C-Reactive Protein, Cardiac", "mg/L", Some(0.0), Some(3.0)),
        numeric(INFLAM_URIC, "Uric Acid", "mg/dL", Some(3.8), Some(8.4)),
        numeric(INFLAM_HOMOCYS, "Homocyst(e)ine", "umol/L", Some(0.0), Some(14.5)),
        numeric(METAB_INS, "Insulin", "uIU/mL", Some(2.6), Some(24.9)),
        numeric(METAB_HBA1C, "Hemoglobin A1c", "%", Some(4.8), Some(5.6)),
        numeric(METAB_GLUT, "Total Glutathione", "umol/L", None, None),
        numeric(OMEGA_CHECK, "OmegaCheck(TM)", "% by wt", Some(5.4), None),
        numeric(OMEGA_6_3_RATIO, "Omega-6/Omega-3 Ratio", "", Some(3.7), Some(14.4)),
        numeric(OMEGA_3_TOT, "Omega-3 total", "%", None, None),
        numeric(OMEGA_6_TOT, "Omega-6 total", "%", None, None),
        numeric(OMEGA_AA, "Arachidonic Acid", "%", Some(8.6), Some(15.6)),
        numeric(OMEGA_AA_EPA, "Arachidonic Acid/EPA Ratio", "", Some(3.7), Some(40.7)),
        categorical(APOE_GENOTYPE, "APO E Genotyping Result", LabKind::ApoeGenotype),
        categorical(APO1, "APOE allele 1", LabKind::Allele),
        categorical(APO2, "APOE allele 2", LabKind::Allele),
        categorical(MTHFR_1, "MTHFR C677T", LabKind::Mthfr),
        categorical(MTHFR_2, "MTHFR A1298C", LabKind::Mthfr),
        numeric(MHT_TT, "Testosterone", "ng/dL", Some(264.0), Some(916.0)),
        numeric(MHT_FREE_T, "Free Testosterone", "pg/mL", Some(8.7), Some(25.1)),
        numeric(MHT_SHBG, "Sex Horm Binding Glob", "nmol/L", Some(16.5), Some(55.9)),
        numeric(MHT_PSA, "Prostate Specific Ag", "ng/mL", Some(0.0), Some(4.0)),
        numeric(MHT_LH, "LH", "mIU/mL", Some(1.7), Some(8.6)),
        numeric(MHT_FSH, "FSH", "mIU/mL", Some(1.5), Some(12.4)),
        numeric(MHT_PROL, "Prolactin", "ng/mL", Some(4.0), Some(15.2)),
        numeric(MHT_DHT, "Dihydrotestosterone", "pg/mL", Some(112.0), Some(955.0)),
        numeric(MHT_E2, "Estradiol", "pg/mL", Some(7.6), Some(42.6)),
        numeric(MHT_E1, "Estrone", "pg/mL", None, None),
        numeric(FHT_FSH, "FSH", "mIU/mL", None, None),
        numeric(FHT_E2, "Estradiol", "pg/mL", None, None),
        numeric(FHT_PROG, "Progesterone", "ng/mL", None, None),
        numeric(FHT_TT, "Testosterone", "ng/dL", Some(8.0), Some(48.0)),
        numeric(FHT_E1, "Estrone", "pg/mL", None, None),
        numeric(FHT_PROL, "Prolactin", "ng/mL", Some(4.8), Some(23.3)),
        numeric(FHT_LH, "LH", "mIU/mL", None, None),
        numeric(FHT_SHBG, "Sex Horm Binding Glob", "nmol/L", Some(24.7), Some(122.0)),
        numeric(FHT_DHT, "Dihydrotestosterone", "pg/mL", None, Some(300.0)),
    ]
}

fn table(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(raw, id)| (raw.to_string(), id.to_string()))
        .collect()
}

fn names() -> BTreeMap<String, String> {
    table(&[
        ("WBC", CBC_WBC),
        ("RBC", CBC_RBC),
        ("Hemoglobin", CBC_HGB),
        ("Hematocrit", CBC_HCT),
        ("MCV", CBC_MCV),
        ("Platelets", CBC_PLT),
        ("Neutrophils (Absolute)", CBC_NEUT_ABS),
        ("Lymphs (Absolute)", CBC_LYMPH_ABS),
        ("Glucose", CHEM_GLU),
        ("BUN", CHEM_BUN),
        ("Creatinine", CHEM_CREAT),
        ("eGFR", CHEM_EGFR),
        ("Sodium", CHEM_NA),
        ("Potassium", CHEM_K),
        ("Chloride", CHEM_CL),
        ("Calcium", CHEM_CA),
        ("Albumin", LFT_ALB),
        ("ALT (SGPT)", LFT_ALT),
        ("AST (SGOT)", LFT_AST),
        ("Alkaline Phosphatase", LFT_ALKP),
        ("Bilirubin, Total", LFT_TBILI),
        ("Cholesterol, Total", LIPID_CHOL),
        ("Triglycerides", LIPID_TRIG),
        ("HDL Cholesterol", LIPID_HDL),
        ("LDL Chol Calc (NIH)", LIPID_LDL),
        ("TSH", THY_TSH),
        ("Triiodothyronine (T3), Free", THY_T3F),
        ("T4, Free (Direct)", THY_T4F),
        ("Reverse T3, Serum", THY_RT3),
        ("Thyroid Peroxidase (TPO) Ab", THY_TPOAB),
        ("Thyroglobulin Antibody", THY_TGAB),
        ("Pregnenolone, MS", NEURO_PREG),
        ("DHEA-Sulfate", NEURO_DHEAS),
        ("Cortisol - AM", NEURO_CORT),
        ("Cortisol", NEURO_CORT),
        ("Vitamin D, 25-Hydroxy", VIT_D25),
        ("Vitamin B12", VIT_B12),
        ("Vitamin E (Alpha Tocopherol)", VIT_E),
        ("Folate (Folic Acid), Serum", VIT_FOLATE),
        ("Zinc, Plasma or Serum", MIN_ZN),
        ("Copper, Serum or Plasma", MIN_CU),
        ("Selenium, Serum/Plasma", MIN_SE),
        ("Magnesium, RBC", MIN_MG_RBC),
        ("C-Reactive Protein, Cardiac", INFLAM_CRP),
        ("Uric Acid", INFLAM_URIC),
        ("Homocyst(e)ine", INFLAM_HOMOCYS),
        ("Insulin", METAB_INS),
        ("Hemoglobin A1c", METAB_HBA1C),
        ("Total Glutathione", METAB_GLUT),
        ("OmegaCheck(TM)", OMEGA_CHECK),
        ("Omega-6/Omega-3 Ratio", OMEGA_6_3_RATIO),
        ("Omega-3 total", OMEGA_3_TOT),
        ("Omega-6 total", OMEGA_6_TOT),
        ("Arachidonic Acid", OMEGA_AA),
        ("Arachidonic Acid/EPA Ratio", OMEGA_AA_EPA),
        ("APO E Genotyping Result", APOE_GENOTYPE),
        ("MTHFR C677T", MTHFR_1),
        ("MTHFR A1298C", MTHFR_2),
        ("Prostate Specific Ag", MHT_PSA),
    ])
}

fn male_overlay() -> BTreeMap<String, String> {
    table(&[
        ("Testosterone", MHT_TT),
        ("Testosterone, Total, LC/MS", MHT_TT),
        ("Free Testosterone", MHT_FREE_T),
        ("Sex Horm Binding Glob", MHT_SHBG),
        ("LH", MHT_LH),
        ("FSH", MHT_FSH),
        ("Prolactin", MHT_PROL),
        ("Dihydrotestosterone", MHT_DHT),
        ("Estradiol", MHT_E2),
        ("Estrone", MHT_E1),
    ])
}

fn female_overlay() -> BTreeMap<String, String> {
    table(&[
        ("FSH", FHT_FSH),
        ("Estradiol", FHT_E2),
        ("Progesterone", FHT_PROG),
        ("Testosterone", FHT_TT),
        ("Testosterone, Total, LC/MS", FHT_TT),
        ("Estrone", FHT_E1),
        ("Prolactin", FHT_PROL),
        ("LH", FHT_LH),
        ("Sex Horm Binding Glob", FHT_SHBG),
        ("Dihydrotestosterone", FHT_DHT),
    ])
}

fn conversions() -> Vec<UnitConversion> {
    [
        (VIT_D25, "nmol/L", 0.4006),
        (CHEM_GLU, "mmol/L", 18.016),
        (LIPID_CHOL, "mmol/L", 38.67),
        (LIPID_HDL, "mmol/L", 38.67),
        (LIPID_LDL, "mmol/L", 38.67),
        (LIPID_TRIG, "mmol/L", 88.57),
        (MHT_TT, "nmol/L", 28.84),
        (FHT_TT, "nmol/L", 28.84),
        (VIT_B12, "pmol/L", 1.355),
        (INFLAM_CRP, "mg/dL", 10.0),
        (VIT_FOLATE, "nmol/L", 0.4413),
    ]
    .into_iter()
    .map(|(id, from, factor)| UnitConversion {
        id: id.to_string(),
        from: from.to_string(),
        factor,
    })
    .collect()
}

/// The declarative tables behind [`crate::CanonicalRegistry::builtin`].
pub fn registry_data() -> RegistryData {
    RegistryData {
        definitions: definitions(),
        names: names(),
        male_overlay: male_overlay(),
        female_overlay: female_overlay(),
        conversions: conversions(),
    }
}
