//! Feature Catalog - Centralized Feature Definition
//!
//! Every measurement the form collects, in the order the form shows them.
//! Ranges and defaults here drive both the HTML controls and server-side
//! validation (see `input.rs`, which must stay in sync).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::locale::Locale;

/// Total number of features
pub const FEATURE_COUNT: usize = 10;

// ============================================================================
// IDENTIFIERS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FeatureId {
    #[serde(rename = "egfr")]
    Egfr,
    #[serde(rename = "serum_creatinine")]
    SerumCreatinine,
    #[serde(rename = "blood_urea_nitrogen")]
    BloodUreaNitrogen,
    #[serde(rename = "E_over_e_prime")]
    EOverEPrime,
    #[serde(rename = "nt_probnp")]
    NtProbnp,
    #[serde(rename = "nyha_class")]
    NyhaClass,
    #[serde(rename = "d_dimer")]
    DDimer,
    #[serde(rename = "serum_uric_acid")]
    SerumUricAcid,
    #[serde(rename = "homocysteine")]
    Homocysteine,
    #[serde(rename = "hs_crp")]
    HsCrp,
}

impl FeatureId {
    /// Form order
    pub const ALL: [FeatureId; FEATURE_COUNT] = [
        FeatureId::Egfr,
        FeatureId::SerumCreatinine,
        FeatureId::BloodUreaNitrogen,
        FeatureId::EOverEPrime,
        FeatureId::NtProbnp,
        FeatureId::NyhaClass,
        FeatureId::DDimer,
        FeatureId::SerumUricAcid,
        FeatureId::Homocysteine,
        FeatureId::HsCrp,
    ];

    /// Identifier used by the training run and the artifacts
    pub fn as_str(self) -> &'static str {
        match self {
            FeatureId::Egfr => "egfr",
            FeatureId::SerumCreatinine => "serum_creatinine",
            FeatureId::BloodUreaNitrogen => "blood_urea_nitrogen",
            FeatureId::EOverEPrime => "E_over_e_prime",
            FeatureId::NtProbnp => "nt_probnp",
            FeatureId::NyhaClass => "nyha_class",
            FeatureId::DDimer => "d_dimer",
            FeatureId::SerumUricAcid => "serum_uric_acid",
            FeatureId::Homocysteine => "homocysteine",
            FeatureId::HsCrp => "hs_crp",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|id| id.as_str() == name)
    }

    pub fn spec(self) -> &'static FeatureSpec {
        &CATALOG[self.index()]
    }

    /// Position in form order
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn display_name(self, locale: Locale) -> &'static str {
        match locale {
            Locale::Zh => match self {
                FeatureId::Egfr => "eGFR (mL/min/1.73m2)",
                FeatureId::SerumCreatinine => "血肌酐 (μmol/L)",
                FeatureId::BloodUreaNitrogen => "尿素氮 (mmol/L)",
                FeatureId::EOverEPrime => "E/e' (左室充盈压)",
                FeatureId::NtProbnp => "NT-proBNP (pg/mL)",
                FeatureId::NyhaClass => "NYHA 心功能分级",
                FeatureId::DDimer => "D-二聚体 (mg/L)",
                FeatureId::SerumUricAcid => "血尿酸 (μmol/L)",
                FeatureId::Homocysteine => "同型半胱氨酸 (μmol/L)",
                FeatureId::HsCrp => "hs-CRP (mg/L)",
            },
            Locale::En => match self {
                FeatureId::Egfr => "eGFR (mL/min/1.73m2)",
                FeatureId::SerumCreatinine => "Serum creatinine (μmol/L)",
                FeatureId::BloodUreaNitrogen => "Blood urea nitrogen (mmol/L)",
                FeatureId::EOverEPrime => "E/e' (LV filling pressure)",
                FeatureId::NtProbnp => "NT-proBNP (pg/mL)",
                FeatureId::NyhaClass => "NYHA functional class",
                FeatureId::DDimer => "D-dimer (mg/L)",
                FeatureId::SerumUricAcid => "Serum uric acid (μmol/L)",
                FeatureId::Homocysteine => "Homocysteine (μmol/L)",
                FeatureId::HsCrp => "hs-CRP (mg/L)",
            },
        }
    }
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeatureId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| format!("unknown feature '{}'", s))
    }
}

// ============================================================================
// GROUPS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureGroup {
    Renal,
    Cardiac,
    Biomarker,
}

impl FeatureGroup {
    pub const ALL: [FeatureGroup; 3] = [FeatureGroup::Renal, FeatureGroup::Cardiac, FeatureGroup::Biomarker];

    pub fn title(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (FeatureGroup::Renal, Locale::Zh) => "核心肾脏指标",
            (FeatureGroup::Cardiac, Locale::Zh) => "核心心脏指标",
            (FeatureGroup::Biomarker, Locale::Zh) => "生物标志物",
            (FeatureGroup::Renal, Locale::En) => "Core renal markers",
            (FeatureGroup::Cardiac, Locale::En) => "Core cardiac markers",
            (FeatureGroup::Biomarker, Locale::En) => "Biomarkers",
        }
    }

    pub fn members(self) -> impl Iterator<Item = &'static FeatureSpec> {
        CATALOG.iter().filter(move |spec| spec.group == self)
    }
}

// ============================================================================
// CONTROLS
// ============================================================================

/// Input control of one measurement
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Control {
    Number { min: f64, max: f64, step: f64 },
    Choice { options: &'static [u8] },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureSpec {
    pub id: FeatureId,
    pub group: FeatureGroup,
    pub control: Control,
    pub default: f64,
}

impl FeatureSpec {
    /// Whether the control can represent `value`
    pub fn accepts(&self, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        match self.control {
            Control::Number { min, max, .. } => value >= min && value <= max,
            Control::Choice { options } => options.iter().any(|&o| f64::from(o) == value),
        }
    }
}

/// Step of float inputs without an explicit one
const FINE_STEP: f64 = 0.01;

/// NYHA functional classes
pub const NYHA_CLASSES: &[u8] = &[1, 2, 3, 4];

/// The authoritative catalog, indexed by `FeatureId::index`
static CATALOG: [FeatureSpec; FEATURE_COUNT] = [
    // === Renal ===
    FeatureSpec {
        id: FeatureId::Egfr,
        group: FeatureGroup::Renal,
        control: Control::Number { min: 5.0, max: 150.0, step: 1.0 },
        default: 30.0,
    },
    FeatureSpec {
        id: FeatureId::SerumCreatinine,
        group: FeatureGroup::Renal,
        control: Control::Number { min: 20.0, max: 1000.0, step: FINE_STEP },
        default: 150.0,
    },
    FeatureSpec {
        id: FeatureId::BloodUreaNitrogen,
        group: FeatureGroup::Renal,
        control: Control::Number { min: 1.0, max: 50.0, step: FINE_STEP },
        default: 10.0,
    },
    // === Cardiac ===
    FeatureSpec {
        id: FeatureId::EOverEPrime,
        group: FeatureGroup::Cardiac,
        control: Control::Number { min: 1.0, max: 50.0, step: FINE_STEP },
        default: 15.0,
    },
    FeatureSpec {
        id: FeatureId::NtProbnp,
        group: FeatureGroup::Cardiac,
        control: Control::Number { min: 10.0, max: 35000.0, step: 100.0 },
        default: 2000.0,
    },
    FeatureSpec {
        id: FeatureId::NyhaClass,
        group: FeatureGroup::Cardiac,
        control: Control::Choice { options: NYHA_CLASSES },
        default: 3.0,
    },
    // === Biomarkers ===
    FeatureSpec {
        id: FeatureId::DDimer,
        group: FeatureGroup::Biomarker,
        control: Control::Number { min: 0.0, max: 20.0, step: 0.1 },
        default: 0.5,
    },
    FeatureSpec {
        id: FeatureId::SerumUricAcid,
        group: FeatureGroup::Biomarker,
        control: Control::Number { min: 50.0, max: 1000.0, step: FINE_STEP },
        default: 400.0,
    },
    FeatureSpec {
        id: FeatureId::Homocysteine,
        group: FeatureGroup::Biomarker,
        control: Control::Number { min: 1.0, max: 100.0, step: FINE_STEP },
        default: 15.0,
    },
    FeatureSpec {
        id: FeatureId::HsCrp,
        group: FeatureGroup::Biomarker,
        control: Control::Number { min: 0.0, max: 200.0, step: FINE_STEP },
        default: 5.0,
    },
];

pub fn catalog() -> &'static [FeatureSpec] {
    &CATALOG
}
