//! The built-in content-control catalog.
//!
//! Rule ids double as template region names, so they keep the spelling the
//! roadmap template has always used.

use roadmap_core::ids::lab::*;
use roadmap_core::models::client::Sex;
use roadmap_core::models::lab::MthfrStatus::{Heterozygous, Homozygous};

use crate::catalog::{Publication, PublishSource, RuleDefinition};
use crate::metric::Metric;
use crate::predicate::Comparison::{self, Eq, Ge, Gt, Le, Lt, Ne};
use crate::predicate::Predicate;

/// Substitution names published by the built-in catalog.
pub mod placeholder {
    pub const GENOME_TYPE: &str = "genome-type";
    pub const MTHFR_C677T: &str = "mthfr-c677t";
    pub const MTHFR_A1298C: &str = "mthfr-a1298c";
    pub const COPPER: &str = "copper-value";
    pub const ZINC: &str = "zinc-value";
    pub const CZ_RATIO: &str = "cz-ratio";
    pub const VITAMIN_D: &str = "vitamin-d-value";
    pub const VITAMIN_D_DOSE: &str = "vitamin-d-dose";
    pub const CRP: &str = "crp-value";
    pub const HOMOCYSTEINE: &str = "homocysteine-value";
    pub const URIC_ACID: &str = "uric-acid-value";
    pub const PREGNENOLONE: &str = "pregnenolone-value";
    pub const DHEA: &str = "dhea-value";
    pub const CORTISOL: &str = "cortisol-value";
    pub const B12: &str = "b12-value";
    pub const FOLATE: &str = "folate-value";
    pub const VITAMIN_E: &str = "vitamin-e-value";
    pub const MAG_RBC: &str = "mag-rbc-value";
    pub const SELENIUM: &str = "selenium-value";
    pub const GLUTATHIONE: &str = "glutathione-level";
    pub const OMEGA_CHECK: &str = "omega-check-value";
    pub const OMEGA_RATIO: &str = "omega-63-ratio-value";
    pub const AA_EPA: &str = "aaepa-ratio-value";
    pub const AA: &str = "aa-level-value";
    pub const GLUCOSE: &str = "glucose-value";
    pub const INSULIN: &str = "insulin-value";
    pub const A1C: &str = "a1c-value";
    pub const HOMA_IR: &str = "homa-ir-value";
    pub const CHOLESTEROL: &str = "cholesterol-value";
    pub const TRIGLYCERIDES: &str = "triglyceride-value";
    pub const HDL: &str = "hdl-value";
    pub const LDL: &str = "ldl-value";
    pub const TRIG_HDL: &str = "trig-hdl-ratio";
    pub const TSH: &str = "tsh-value";
    pub const FREE_T3: &str = "ft3-value";
    pub const FREE_T4: &str = "ft4-value";
    pub const REVERSE_T3: &str = "rt3-value";
    pub const TPO: &str = "tpo-value";
    pub const TGAB: &str = "tgab-value";
    pub const EGFR: &str = "egfr-value";
    pub const TESTOSTERONE: &str = "testosterone-value";
    pub const FREE_TESTOSTERONE: &str = "free-testosterone-value";
    pub const SHBG: &str = "shbg-value";
    pub const PSA: &str = "psa-value";
    pub const FSH: &str = "fsh-value";
    pub const ESTRADIOL: &str = "estradiol-value";
    pub const PROGESTERONE: &str = "progesterone-value";
    pub const FEMALE_TESTOSTERONE: &str = "female-testosterone-value";
    pub const BMI: &str = "bmi-value";
}

use placeholder as ph;

const COPPER_ZINC_LIMIT: f64 = 1.3;
const HOMA_DIVISOR: f64 = 405.0;

fn rule(id: &str, when: Predicate) -> RuleDefinition {
    RuleDefinition::new(id, when)
}

/// Rule that holds whenever the lab has a numeric value and publishes it.
fn display(id: &str, lab: &str, name: &str) -> RuleDefinition {
    rule(id, Predicate::has(lab)).publish(Publication::lab(name, lab))
}

fn lab(id: &str, op: Comparison, value: f64) -> Predicate {
    Predicate::lab(id, op, value)
}

fn cz_ratio() -> Metric {
    Metric::ratio(MIN_CU, MIN_ZN)
}

fn homa_ir() -> Metric {
    Metric::product(&[METAB_INS, CHEM_GLU], HOMA_DIVISOR)
}

/// (APO1 = 4 ∧ APO2 ≤ 3) ∨ (APO1 ≤ 3 ∧ APO2 = 4)
fn e4_heterozygote() -> Predicate {
    Predicate::any([
        Predicate::all([
            Predicate::allele(APO1, Eq, 4),
            Predicate::allele(APO2, Le, 3),
        ]),
        Predicate::all([
            Predicate::allele(APO1, Le, 3),
            Predicate::allele(APO2, Eq, 4),
        ]),
    ])
}

fn e4_carrier() -> Predicate {
    Predicate::any([Predicate::allele(APO1, Eq, 4), Predicate::allele(APO2, Eq, 4)])
}

fn e4_homozygote() -> Predicate {
    Predicate::all([Predicate::allele(APO1, Eq, 4), Predicate::allele(APO2, Eq, 4)])
}

fn mthfr_variant() -> Predicate {
    Predicate::any([
        Predicate::mthfr(MTHFR_1, &[Heterozygous, Homozygous]),
        Predicate::mthfr(MTHFR_2, &[Heterozygous, Homozygous]),
    ])
}

fn vitamin_d_band(id: &str, low: f64, high: f64, dose: &str) -> RuleDefinition {
    rule(id, Predicate::half_open(Metric::lab(VIT_D25), low, high))
        .publish(Publication::text(ph::VITAMIN_D_DOSE, dose))
}

fn any_symptom(keys: &[&str]) -> Predicate {
    Predicate::any_hhq(keys)
}

pub fn rules() -> Vec<RuleDefinition> {
    let mut rules = Vec::new();
    rules.extend(apoe());
    rules.extend(mthfr());
    rules.extend(vitamin_d());
    rules.extend(inflammation());
    rules.extend(adrenal());
    rules.extend(nutrients());
    rules.extend(omega());
    rules.extend(blood_sugar());
    rules.extend(lipids_and_chemistry());
    rules.extend(thyroid());
    rules.extend(male_hormones());
    rules.extend(female_hormones());
    rules.extend(body_weight());
    rules.extend(history());
    rules
}

fn apoe() -> Vec<RuleDefinition> {
    let cz_high = Predicate::compare(cz_ratio(), Gt, COPPER_ZINC_LIMIT);
    vec![
        rule(
            "quick-apoe-known",
            Predicate::all([
                Predicate::allele(APO1, Ge, 2),
                Predicate::allele(APO2, Ge, 2),
            ]),
        )
        .publish(Publication::genotype(ph::GENOME_TYPE)),
        rule("quick-E4E4", e4_homozygote()),
        rule("quick-E4", e4_heterozygote()),
        rule(
            "quick-E4E3",
            Predicate::any([
                Predicate::all([
                    Predicate::allele(APO1, Eq, 4),
                    Predicate::allele(APO2, Eq, 3),
                ]),
                Predicate::all([
                    Predicate::allele(APO1, Eq, 3),
                    Predicate::allele(APO2, Eq, 4),
                ]),
            ]),
        ),
        rule(
            "quick-nonE4",
            Predicate::all([
                Predicate::allele(APO1, Ne, 4),
                Predicate::allele(APO2, Ne, 4),
            ]),
        ),
        rule("quick-apo-e4-genetics", e4_carrier()),
        rule(
            "quick-sugars-APOE4",
            Predicate::all([
                e4_carrier(),
                any_symptom(&["hh-frequent-carb-sugar", "hh-sugar-cravings", "hh-likes-sugar"]),
            ]),
        ),
        display("quick-copper", MIN_CU, ph::COPPER),
        display("quick-zinc", MIN_ZN, ph::ZINC),
        rule("quick-CZratio", Predicate::known(cz_ratio()))
            .publish(Publication::metric(ph::CZ_RATIO, cz_ratio())),
        rule("quick-CZratio-14-elevated", cz_high.clone()),
        rule(
            "quick-CZratio-14-optimal",
            Predicate::compare(cz_ratio(), Le, COPPER_ZINC_LIMIT),
        ),
        rule(
            "quick-CZratio-14",
            Predicate::all([
                cz_high.clone(),
                Predicate::any([
                    Predicate::allele(APO1, Le, 3),
                    Predicate::allele(APO2, Le, 3),
                ]),
            ]),
        ),
        rule(
            "zinc-liposomalC",
            Predicate::all([
                cz_high,
                Predicate::allele(APO1, Lt, 4),
                Predicate::allele(APO2, Lt, 4),
            ]),
        ),
    ]
}

fn mthfr() -> Vec<RuleDefinition> {
    vec![
        rule(
            "quick-MTHFR1",
            Predicate::mthfr(MTHFR_1, &[Heterozygous, Homozygous]),
        )
        .publish(Publication::mthfr(ph::MTHFR_C677T, MTHFR_1)),
        rule(
            "quick-MTHFR2",
            Predicate::mthfr(MTHFR_2, &[Heterozygous, Homozygous]),
        )
        .publish(Publication::mthfr(ph::MTHFR_A1298C, MTHFR_2)),
        rule("has-MTHFR-variants", mthfr_variant()),
        rule(
            "mthfr-homozygous",
            Predicate::any([
                Predicate::mthfr(MTHFR_1, &[Homozygous]),
                Predicate::mthfr(MTHFR_2, &[Homozygous]),
            ]),
        ),
        rule(
            "needs-methyl",
            Predicate::any([mthfr_variant(), lab(INFLAM_HOMOCYS, Gt, 7.0)]),
        ),
        rule(
            "quick-stopETOH",
            Predicate::all([
                mthfr_variant(),
                any_symptom(&["hh-alcohol-consumption", "hh-alcohol-4days"]),
            ]),
        ),
    ]
}

fn vitamin_d() -> Vec<RuleDefinition> {
    let below_optimal = lab(VIT_D25, Lt, 60.0);
    let taking_d = Predicate::hhq("hh-taking-vitamin-d");
    vec![
        display("quick-VitD", VIT_D25, ph::VITAMIN_D),
        rule("vitamin-D-low", lab(VIT_D25, Lt, 30.0)),
        rule("vitamin-D-suboptimal", lab(VIT_D25, Lt, 50.0)),
        rule("D-less-30", lab(VIT_D25, Lt, 30.0))
            .publish(Publication::text(ph::VITAMIN_D_DOSE, "10,000 iu")),
        vitamin_d_band("D-30-39", 30.0, 40.0, "8,000 iu"),
        vitamin_d_band("D-40-49", 40.0, 50.0, "4,000 iu"),
        vitamin_d_band("D-50-55", 50.0, 55.0, "2,000 iu"),
        vitamin_d_band("D-55-59", 55.0, 60.0, "2,000 iu"),
        rule("D-optimal", lab(VIT_D25, Ge, 60.0)),
        rule(
            "quick-VitD-row",
            Predicate::all([below_optimal.clone(), Predicate::negate(taking_d.clone())]),
        ),
        rule(
            "quick-VitD-row-takingD",
            Predicate::all([below_optimal, taking_d]),
        ),
    ]
}

fn inflammation() -> Vec<RuleDefinition> {
    vec![
        display("quick-CRP", INFLAM_CRP, ph::CRP),
        rule("CRP-elevated", lab(INFLAM_CRP, Gt, 1.0)),
        rule(
            "quick-crp-omega",
            Predicate::all([lab(INFLAM_CRP, Gt, 1.0), lab(OMEGA_CHECK, Lt, 5.4)]),
        ),
        display("quick-homocysteine", INFLAM_HOMOCYS, ph::HOMOCYSTEINE),
        rule("homocysteine-elevated", lab(INFLAM_HOMOCYS, Gt, 7.0)),
        rule("quick-Homo12", lab(INFLAM_HOMOCYS, Gt, 12.0)),
        rule("quick-Homo15", lab(INFLAM_HOMOCYS, Gt, 15.0)),
        rule(
            "alcohol-homocys-B12-compound",
            Predicate::all([
                lab(INFLAM_HOMOCYS, Gt, 7.0),
                lab(VIT_B12, Lt, 500.0),
                Predicate::hhq("hh-alcohol-consumption"),
            ]),
        ),
        display("quick-uric-acid", INFLAM_URIC, ph::URIC_ACID),
        rule("uric-acid-elevated", lab(INFLAM_URIC, Gt, 6.0)),
        rule(
            "UAAcid-Gout",
            Predicate::all([lab(INFLAM_URIC, Gt, 6.0), Predicate::hhq("hh-gout")]),
        ),
        rule(
            "quick-uric-acid-ETOH",
            Predicate::all([
                lab(INFLAM_URIC, Gt, 6.0),
                Predicate::hhq("hh-alcohol-consumption"),
            ]),
        ),
    ]
}

fn adrenal() -> Vec<RuleDefinition> {
    vec![
        display("quick-pregnenolone-lab-value", NEURO_PREG, ph::PREGNENOLONE),
        rule("quick-pregnenolone-50", lab(NEURO_PREG, Lt, 50.0)),
        rule(
            "quick-PROG-50-100",
            Predicate::between(Metric::lab(NEURO_PREG), 50.0, 100.0),
        ),
        rule("quick-pregnenolone-101", lab(NEURO_PREG, Gt, 100.0)),
        display("quick-dhea-lab-value", NEURO_DHEAS, ph::DHEA),
        rule("quick-DHEA-150", lab(NEURO_DHEAS, Lt, 150.0)),
        rule("quick-DHEA-151", lab(NEURO_DHEAS, Ge, 150.0)),
        display("quick-cortisol-lab-value", NEURO_CORT, ph::CORTISOL),
        rule("quick-cortisol-15", lab(NEURO_CORT, Lt, 15.0)),
        rule("quick-cortisol-high", lab(NEURO_CORT, Gt, 25.0)),
        rule(
            "neurological-hormone-support",
            Predicate::any([
                lab(NEURO_PREG, Lt, 50.0),
                lab(NEURO_DHEAS, Lt, 150.0),
                lab(NEURO_CORT, Lt, 15.0),
            ]),
        ),
    ]
}

fn nutrients() -> Vec<RuleDefinition> {
    let vit_e_row = Predicate::any([
        lab(VIT_E, Lt, 12.0),
        Predicate::Between {
            metric: Metric::lab(VIT_E),
            low: 20.0,
            high: 30.0,
            low_inclusive: false,
            high_inclusive: true,
        },
    ]);
    vec![
        display("quick-B12-value", VIT_B12, ph::B12),
        rule("quick-B12-low", lab(VIT_B12, Lt, 500.0)),
        display("quick-folic-acid-value", VIT_FOLATE, ph::FOLATE),
        display("quick-vitE", VIT_E, ph::VITAMIN_E),
        rule("VitE12", Predicate::between(Metric::lab(VIT_E), 12.0, 20.0)),
        rule("quick-vitE-row", vit_e_row.clone()),
        rule("quick-vitE-row-elevated", lab(VIT_E, Gt, 30.0)),
        rule(
            "Quick-Thinner",
            Predicate::all([
                vit_e_row,
                any_symptom(&["hh-blood-thinner", "hh-warfarin"]),
            ]),
        ),
        display("quick-MagRBC", MIN_MG_RBC, ph::MAG_RBC),
        rule("quick-MagRBC-low", lab(MIN_MG_RBC, Lt, 5.2)),
        rule("quick-MagRBC-optimal", lab(MIN_MG_RBC, Ge, 5.2)),
        display("quick-selenium", MIN_SE, ph::SELENIUM),
        rule("quick-selenium-low", lab(MIN_SE, Lt, 125.0)),
        rule("quick-selen-110", lab(MIN_SE, Lt, 110.0)),
        rule("quick-selenium-optimal", lab(MIN_SE, Ge, 125.0)),
        display("quick-glutathione", METAB_GLUT, ph::GLUTATHIONE),
        rule("glutathione-low", lab(METAB_GLUT, Lt, 300.0)),
    ]
}

fn omega() -> Vec<RuleDefinition> {
    let check_low = lab(OMEGA_CHECK, Lt, 5.4);
    let ratio_high = lab(OMEGA_6_3_RATIO, Gt, 4.0);
    let aa_epa_high = lab(OMEGA_AA_EPA, Gt, 8.0);
    vec![
        display("omega-check-display", OMEGA_CHECK, ph::OMEGA_CHECK),
        rule("omega-check-low", check_low.clone()),
        display("omega-63-ratio-display", OMEGA_6_3_RATIO, ph::OMEGA_RATIO),
        rule("omega-63-ratio-elevated", ratio_high.clone()),
        display("arachidonic-acid-epa-ratio-display", OMEGA_AA_EPA, ph::AA_EPA),
        rule("arachidonic-acid-epa-elevated", aa_epa_high.clone()),
        display("arachidonic-acid-level-display", OMEGA_AA, ph::AA),
        rule(
            "omega-neurological-suboptimal",
            Predicate::all([
                Predicate::any([check_low, ratio_high, aa_epa_high]),
                any_symptom(&["hh-brain-fog", "hh-memory-problems", "hh-depression"]),
            ]),
        ),
        rule(
            "Taking-an-OMEGA",
            any_symptom(&["hh-taking-fish-oil", "hh-taking-omega3", "hh-takes-fish-oil"]),
        ),
        rule(
            "Quick-krill",
            any_symptom(&["hh-taking-krill-oil", "hh-supplement-krill", "hh-krill-oil"]),
        ),
    ]
}

fn blood_sugar() -> Vec<RuleDefinition> {
    vec![
        display("quick-glucose", CHEM_GLU, ph::GLUCOSE),
        rule("glucose-elevated", lab(CHEM_GLU, Gt, 99.0)),
        display("quick-fasting-insulin", METAB_INS, ph::INSULIN),
        rule("insulin-elevated", lab(METAB_INS, Gt, 7.0)),
        display("quick-a1c", METAB_HBA1C, ph::A1C),
        rule("quick-A1c-below-56", lab(METAB_HBA1C, Lt, 5.6)),
        rule("quick-A1c-56", lab(METAB_HBA1C, Gt, 5.6)),
        rule("lab-a1c-L2b", lab(METAB_HBA1C, Ge, 5.7)),
        rule("quick-A1c-6", lab(METAB_HBA1C, Gt, 6.0)),
        rule(
            "quick-A1c-E4-elevated",
            Predicate::all([e4_heterozygote(), lab(METAB_HBA1C, Gt, 5.5)]),
        ),
        rule(
            "quick-A1c-E4E4-elevated",
            Predicate::all([e4_homozygote(), lab(METAB_HBA1C, Gt, 5.3)]),
        ),
        rule("quick-homa-IR", Predicate::known(homa_ir()))
            .publish(Publication::metric(ph::HOMA_IR, homa_ir())),
        rule("HOMA-IR-elevated", Predicate::compare(homa_ir(), Gt, 2.0)),
        rule(
            "quick-diabetes-risk",
            Predicate::any([
                lab(CHEM_GLU, Gt, 99.0),
                lab(METAB_HBA1C, Ge, 5.7),
                Predicate::compare(homa_ir(), Gt, 2.0),
                any_symptom(&["hh-diabetes", "hh-insulin-resistance", "hh-metabolic-syndrome"]),
            ]),
        ),
    ]
}

fn lipids_and_chemistry() -> Vec<RuleDefinition> {
    let trig_hdl = Metric::ratio(LIPID_TRIG, LIPID_HDL);
    vec![
        rule(
            "quick-lipids",
            Predicate::any([
                Predicate::has(LIPID_CHOL),
                Predicate::has(LIPID_TRIG),
                Predicate::has(LIPID_HDL),
                Predicate::has(LIPID_LDL),
            ]),
        )
        .publish(Publication::lab(ph::CHOLESTEROL, LIPID_CHOL))
        .publish(Publication::lab(ph::TRIGLYCERIDES, LIPID_TRIG))
        .publish(Publication::lab(ph::HDL, LIPID_HDL))
        .publish(Publication::lab(ph::LDL, LIPID_LDL)),
        rule("quick-trig-hdl", Predicate::known(trig_hdl.clone()))
            .publish(Publication::metric(ph::TRIG_HDL, trig_hdl.clone())),
        rule("trig-hdl-elevated", Predicate::compare(trig_hdl, Gt, 2.0)),
        display("quick-egfr", CHEM_EGFR, ph::EGFR),
        rule("kidney-fn", lab(CHEM_EGFR, Lt, 60.0)),
        rule("kidney-fn-30", lab(CHEM_EGFR, Lt, 30.0)),
        rule(
            "quick-lytes",
            Predicate::any([
                lab(CHEM_NA, Lt, 135.0),
                lab(CHEM_NA, Gt, 145.0),
                lab(CHEM_K, Lt, 3.5),
                lab(CHEM_K, Gt, 5.0),
                lab(CHEM_CA, Gt, 10.2),
            ]),
        ),
        rule(
            "ALT-alcohol",
            Predicate::all([
                Predicate::any([lab(LFT_ALT, Gt, 40.0), lab(LFT_AST, Gt, 40.0)]),
                Predicate::hhq("hh-alcohol-consumption"),
            ]),
        ),
        rule("quick-anemia", lab(CBC_HGB, Lt, 12.0)),
        rule("quick-macrocytosis", lab(CBC_MCV, Gt, 95.0)),
        rule("quick-platelets-low", lab(CBC_PLT, Lt, 150.0)),
    ]
}

fn thyroid() -> Vec<RuleDefinition> {
    let tsh_high = lab(THY_TSH, Gt, 7.0);
    let thyroid_row = Predicate::all([
        Predicate::any([
            lab(THY_TSH, Gt, 2.5),
            lab(THY_T3F, Lt, 3.2),
            lab(THY_T4F, Lt, 1.3),
        ]),
        Predicate::negate(tsh_high.clone()),
    ]);
    vec![
        rule(
            "quick-thyroid-values",
            Predicate::any([
                Predicate::has(THY_TSH),
                Predicate::has(THY_T3F),
                Predicate::has(THY_T4F),
            ]),
        )
        .publish(Publication::lab(ph::TSH, THY_TSH))
        .publish(Publication::lab(ph::FREE_T3, THY_T3F))
        .publish(Publication::lab(ph::FREE_T4, THY_T4F))
        .publish(Publication::lab(ph::REVERSE_T3, THY_RT3))
        .publish(Publication::lab(ph::TPO, THY_TPOAB))
        .publish(Publication::lab(ph::TGAB, THY_TGAB)),
        rule("quick-TSH-7", tsh_high),
        rule(
            "thyroid-optimal",
            Predicate::all([
                Predicate::between(Metric::lab(THY_TSH), 0.4, 2.5),
                Predicate::between(Metric::lab(THY_T3F), 3.2, 4.2),
                Predicate::between(Metric::lab(THY_T4F), 1.3, 1.8),
            ]),
        ),
        rule("low-TSH", lab(THY_TSH, Lt, 0.4)),
        rule(
            "TSH-T3-rT3",
            Predicate::all([
                lab(THY_TSH, Gt, 2.5),
                Predicate::any([lab(THY_T3F, Lt, 3.6), lab(THY_RT3, Gt, 15.0)]),
            ]),
        ),
        rule("quick-reverseT3", lab(THY_RT3, Gt, 15.0)),
        rule(
            "quick-hashimotos",
            Predicate::any([
                lab(THY_TPOAB, Gt, 34.0),
                lab(THY_TGAB, Gt, 1.0),
                Predicate::hhq("hh-hashimotos"),
            ]),
        ),
        rule("thyroid-row", thyroid_row.clone()),
        rule(
            "quick-fatigue",
            Predicate::all([
                thyroid_row,
                any_symptom(&["hh-fatigue", "hh-chronic-fatigue", "hh-low-energy"]),
            ]),
        ),
        rule("quick-takes-thyroid", Predicate::hhq("hh-takes-thyroid-medicine")),
    ]
}

fn male_hormones() -> Vec<RuleDefinition> {
    let low_t = Predicate::any([lab(MHT_TT, Lt, 400.0), lab(MHT_FREE_T, Lt, 12.0)]);
    let male = |id: &str, when: Predicate| rule(id, when).gated(Sex::Male);
    vec![
        male("quick-male-hormones", Predicate::always())
            .publish(Publication::lab(ph::TESTOSTERONE, MHT_TT))
            .publish(Publication::lab(ph::FREE_TESTOSTERONE, MHT_FREE_T))
            .publish(Publication::lab(ph::SHBG, MHT_SHBG))
            .publish(Publication::lab(ph::PSA, MHT_PSA)),
        male("testosterone-low", lab(MHT_TT, Lt, 400.0)),
        male("free-testosterone-low", lab(MHT_FREE_T, Lt, 12.0)),
        male("quick-male-hormones-shbg", lab(MHT_SHBG, Gt, 45.0)),
        male("Quick-PSA", lab(MHT_PSA, Gt, 4.0)),
        male(
            "quick-male-hormones-hrt",
            Predicate::all([
                Predicate::negate(lab(MHT_PSA, Gt, 4.0)),
                Predicate::any([
                    low_t.clone(),
                    any_symptom(&[
                        "hh-takes-lupron",
                        "hh-traumatic-brain-injury",
                        "hh-concussion",
                    ]),
                ]),
            ]),
        ),
        male("quick-LUPRON", Predicate::hhq("hh-takes-lupron")),
        male(
            "quick-sleep-hormones",
            any_symptom(&["hh-sleep-apnea", "hh-uses-cpap", "hh-snoring"]),
        ),
        male(
            "quick-using-TRT",
            any_symptom(&["hh-takes-testosterone", "hh-hormone-replacement"]),
        ),
        male(
            "quick-age-related-decline",
            Predicate::all([
                any_symptom(&["hh-age-over-65", "hh-age-over-50"]),
                Predicate::any([
                    low_t,
                    any_symptom(&["hh-low-energy", "hh-muscle-weakness"]),
                ]),
            ]),
        ),
    ]
}

fn female_hormones() -> Vec<RuleDefinition> {
    let female = |id: &str, when: Predicate| rule(id, when).gated(Sex::Female);
    vec![
        female("quick-female-hormones", Predicate::always())
            .publish(Publication::lab(ph::FSH, FHT_FSH))
            .publish(Publication::lab(ph::ESTRADIOL, FHT_E2))
            .publish(Publication::lab(ph::PROGESTERONE, FHT_PROG)),
        display(
            "quick-female-testosterone",
            FHT_TT,
            ph::FEMALE_TESTOSTERONE,
        )
        .gated(Sex::Female),
        female(
            "quick-female-hormones-hrt",
            Predicate::any([
                lab(FHT_FSH, Gt, 20.0),
                lab(FHT_E2, Lt, 50.0),
                lab(FHT_PROG, Lt, 1.0),
                any_symptom(&[
                    "hh-natural-menopause",
                    "hh-perimenopause",
                    "hh-hot-flashes",
                    "hh-breast-cancer",
                    "hh-depression",
                    "hh-frequent-uti",
                    "hh-t-hysterectomy-before40",
                ]),
            ]),
        ),
        female(
            "quick-using-HRT",
            any_symptom(&[
                "hh-takes-estrogen",
                "hh-takes-progesterone",
                "hh-hormone-replacement-therapy",
            ]),
        ),
        female("Quick-Breast-CA", Predicate::hhq("hh-breast-cancer")),
        female(
            "BreastCA-Insomnia-Anxiety",
            Predicate::all([
                Predicate::hhq("hh-breast-cancer"),
                any_symptom(&["hh-insomnia", "hh-anxiety"]),
            ]),
        ),
        female(
            "Quick-Hormone-Mood-Disorder",
            any_symptom(&["hh-depression", "hh-anxiety", "hh-mood-changes"]),
        ),
        female(
            "Prometrium-Sleep",
            any_symptom(&["hh-insomnia", "hh-cant-stay-asleep", "hh-sleep-problems"]),
        ),
        female("Freq-UTI", Predicate::hhq("hh-frequent-uti")),
    ]
}

fn body_weight() -> Vec<RuleDefinition> {
    vec![
        rule("quick-bmi", Predicate::known(Metric::Bmi)).publish(Publication::new(
            ph::BMI,
            PublishSource::Metric {
                metric: Metric::Bmi,
                decimals: 1,
            },
        )),
        rule(
            "quick-bmi-underweight",
            Predicate::compare(Metric::Bmi, Lt, 18.5),
        ),
        rule("quick-bmi20", Predicate::half_open(Metric::Bmi, 18.5, 25.0)),
        rule("quick-BMI-OSA", Predicate::compare(Metric::Bmi, Ge, 25.0)),
        rule("quick-bmi-obese", Predicate::compare(Metric::Bmi, Ge, 30.0)),
    ]
}

fn history() -> Vec<RuleDefinition> {
    vec![
        rule("quick-brain-fog", Predicate::hhq("hh-brain-fog")),
        rule(
            "quick-memory-issues",
            any_symptom(&["hh-memory-problems", "hh-memory-loss"]),
        ),
        rule(
            "quick-depression-mood-disorder",
            any_symptom(&["hh-depression", "hh-anxiety"]),
        ),
        rule(
            "quick-concussion",
            any_symptom(&[
                "hh-concussion",
                "hh-head-injury",
                "hh-traumatic-brain-injury",
                "hh-tbi",
                "hh-multiple-concussions",
            ]),
        ),
        rule(
            "quick-tbi",
            any_symptom(&["hh-traumatic-brain-injury", "hh-tbi"]),
        ),
        rule(
            "Quick-Modafinil",
            Predicate::all([
                any_symptom(&["hh-traumatic-brain-injury", "hh-tbi"]),
                any_symptom(&["hh-brain-fog", "hh-memory-problems"]),
            ]),
        ),
        rule(
            "autoimmune-disease-section",
            any_symptom(&[
                "hh-autoimmune-disease",
                "hh-arthritis",
                "hh-rheumatoid-arthritis",
                "hh-celiac-disease",
                "hh-hashimotos",
                "hh-crohns-disease",
                "hh-ulcerative-colitis",
            ]),
        ),
        rule(
            "quick-stroke",
            any_symptom(&["hh-stroke", "hh-tia", "hh-stroke-tia"]),
        ),
        rule(
            "quick-diabetes",
            any_symptom(&["hh-diabetes", "hh-type-2-diabetes", "hh-metabolic-syndrome"]),
        ),
    ]
}
