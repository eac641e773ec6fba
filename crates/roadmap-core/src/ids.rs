//! Canonical identifiers shared by the registry, the rule catalog and the
//! template.

/// Canonical lab variable ids.
pub mod lab {
    // Complete blood count
    pub const CBC_WBC: &str = "CBC_WBC";
    pub const CBC_RBC: &str = "CBC_RBC";
    pub const CBC_HGB: &str = "CBC_HGB";
    pub const CBC_HCT: &str = "CBC_HCT";
    pub const CBC_MCV: &str = "CBC_MCV";
    pub const CBC_PLT: &str = "CBC_PLT";
    pub const CBC_NEUT_ABS: &str = "CBC_NEUT_ABS";
    pub const CBC_LYMPH_ABS: &str = "CBC_LYMPH_ABS";

    // Chemistry
    pub const CHEM_GLU: &str = "CHEM_GLU";
    pub const CHEM_BUN: &str = "CHEM_BUN";
    pub const CHEM_CREAT: &str = "CHEM_CREAT";
    pub const CHEM_EGFR: &str = "CHEM_EGFR";
    pub const CHEM_NA: &str = "CHEM_NA";
    pub const CHEM_K: &str = "CHEM_K";
    pub const CHEM_CL: &str = "CHEM_CL";
    pub const CHEM_CA: &str = "CHEM_CA";

    // Liver function
    pub const LFT_ALB: &str = "LFT_ALB";
    pub const LFT_ALT: &str = "LFT_ALT";
    pub const LFT_AST: &str = "LFT_AST";
    pub const LFT_ALKP: &str = "LFT_ALKP";
    pub const LFT_TBILI: &str = "LFT_TBILI";

    // Lipids
    pub const LIPID_CHOL: &str = "LIPID_CHOL";
    pub const LIPID_TRIG: &str = "LIPID_TRIG";
    pub const LIPID_HDL: &str = "LIPID_HDL";
    pub const LIPID_LDL: &str = "LIPID_LDL";

    // Thyroid
    pub const THY_TSH: &str = "THY_TSH";
    pub const THY_T3F: &str = "THY_T3F";
    pub const THY_T4F: &str = "THY_T4F";
    pub const THY_RT3: &str = "THY_RT3";
    pub const THY_TPOAB: &str = "THY_TPOAB";
    pub const THY_TGAB: &str = "THY_TGAB";

    // Neurologically active and adrenal hormones
    pub const NEURO_PREG: &str = "NEURO_PREG";
    pub const NEURO_DHEAS: &str = "NEURO_DHEAS";
    pub const NEURO_CORT: &str = "NEURO_CORT";

    // Vitamins
    pub const VIT_D25: &str = "VIT_D25";
    pub const VIT_B12: &str = "VIT_B12";
    pub const VIT_E: &str = "VIT_E";
    pub const VIT_FOLATE: &str = "VIT_FOLATE";

    // Minerals
    pub const MIN_ZN: &str = "MIN_ZN";
    pub const MIN_CU: &str = "MIN_CU";
    pub const MIN_SE: &str = "MIN_SE";
    pub const MIN_MG_RBC: &str = "MIN_MG_RBC";

    // Inflammation
    pub const INFLAM_CRP: &str = "INFLAM_CRP";
    pub const INFLAM_URIC: &str = "INFLAM_URIC";
    pub const INFLAM_HOMOCYS: &str = "INFLAM_HOMOCYS";

    // Metabolic
    pub const METAB_INS: &str = "METAB_INS";
    pub const METAB_HBA1C: &str = "METAB_HBA1C";
    pub const METAB_GLUT: &str = "METAB_GLUT";

    // Omega fatty acids
    pub const OMEGA_CHECK: &str = "OMEGA_CHECK";
    pub const OMEGA_6_3_RATIO: &str = "OMEGA_6_3_RATIO";
    pub const OMEGA_3_TOT: &str = "OMEGA_3_TOT";
    pub const OMEGA_6_TOT: &str = "OMEGA_6_TOT";
    pub const OMEGA_AA: &str = "OMEGA_AA";
    pub const OMEGA_AA_EPA: &str = "OMEGA_AA_EPA";

    // Genetics
    pub const APO1: &str = "APO1";
    pub const APO2: &str = "APO2";
    pub const MTHFR_1: &str = "MTHFR_1";
    pub const MTHFR_2: &str = "MTHFR_2";

    // Male hormone panel
    pub const MHT_TT: &str = "MHt_TT";
    pub const MHT_FREE_T: &str = "MHt_FREE_T";
    pub const MHT_SHBG: &str = "MHt_SHBG";
    pub const MHT_PSA: &str = "MHt_PSA";
    pub const MHT_LH: &str = "MHt_LH";
    pub const MHT_FSH: &str = "MHt_FSH";
    pub const MHT_PROL: &str = "MHt_PROL";
    pub const MHT_DHT: &str = "MHt_DHT";
    pub const MHT_E2: &str = "MHt_E2";
    pub const MHT_E1: &str = "MHt_E1";

    // Female hormone panel
    pub const FHT_FSH: &str = "FHt_FSH";
    pub const FHT_E2: &str = "FHt_E2";
    pub const FHT_PROG: &str = "FHt_PROG";
    pub const FHT_TT: &str = "FHt_TT";
    pub const FHT_E1: &str = "FHt_E1";
    pub const FHT_PROL: &str = "FHt_PROL";
    pub const FHT_LH: &str = "FHt_LH";
    pub const FHT_SHBG: &str = "FHt_SHBG";
    pub const FHT_DHT: &str = "FHt_DHT";
}

/// Questionnaire variable ids referenced by code. Most questionnaire ids
/// only appear in the rule catalog and weight table.
pub mod hhq {
    pub const HEIGHT: &str = "hh-height";
    pub const WEIGHT: &str = "hh-weight";

    /// Items whose value is free text rather than a flag.
    pub const FREE_TEXT: [&str; 2] = [HEIGHT, WEIGHT];
}
