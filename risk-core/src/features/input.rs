//! Patient Input - the operator's ten measurements
//!
//! Bounds mirror `catalog.rs`; `test_bounds_match_catalog` keeps them honest.

use std::borrow::Cow;

use serde::de::{self, Deserializer, Unexpected};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::catalog::{FeatureId, FEATURE_COUNT};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
#[validate(schema(function = "validate_finite"))]
pub struct PatientInput {
    // === Renal ===
    #[validate(range(min = 5.0, max = 150.0))]
    pub egfr: f64,
    #[validate(range(min = 20.0, max = 1000.0))]
    pub serum_creatinine: f64,
    #[validate(range(min = 1.0, max = 50.0))]
    pub blood_urea_nitrogen: f64,

    // === Cardiac ===
    #[serde(rename = "E_over_e_prime")]
    #[validate(range(min = 1.0, max = 50.0))]
    pub e_over_e_prime: f64,
    #[validate(range(min = 10.0, max = 35000.0))]
    pub nt_probnp: f64,
    #[serde(deserialize_with = "whole_class")]
    #[validate(range(min = 1, max = 4))]
    pub nyha_class: u8,

    // === Biomarkers ===
    #[validate(range(min = 0.0, max = 20.0))]
    pub d_dimer: f64,
    #[validate(range(min = 50.0, max = 1000.0))]
    pub serum_uric_acid: f64,
    #[validate(range(min = 1.0, max = 100.0))]
    pub homocysteine: f64,
    #[validate(range(min = 0.0, max = 200.0))]
    pub hs_crp: f64,
}

impl Default for PatientInput {
    fn default() -> Self {
        Self {
            egfr: 30.0,
            serum_creatinine: 150.0,
            blood_urea_nitrogen: 10.0,
            e_over_e_prime: 15.0,
            nt_probnp: 2000.0,
            nyha_class: 3,
            d_dimer: 0.5,
            serum_uric_acid: 400.0,
            homocysteine: 15.0,
            hs_crp: 5.0,
        }
    }
}

impl PatientInput {
    pub fn get(&self, id: FeatureId) -> f64 {
        match id {
            FeatureId::Egfr => self.egfr,
            FeatureId::SerumCreatinine => self.serum_creatinine,
            FeatureId::BloodUreaNitrogen => self.blood_urea_nitrogen,
            FeatureId::EOverEPrime => self.e_over_e_prime,
            FeatureId::NtProbnp => self.nt_probnp,
            FeatureId::NyhaClass => f64::from(self.nyha_class),
            FeatureId::DDimer => self.d_dimer,
            FeatureId::SerumUricAcid => self.serum_uric_acid,
            FeatureId::Homocysteine => self.homocysteine,
            FeatureId::HsCrp => self.hs_crp,
        }
    }

    /// Set one measurement. NYHA class is rounded to the nearest class.
    pub fn set(&mut self, id: FeatureId, value: f64) {
        match id {
            FeatureId::Egfr => self.egfr = value,
            FeatureId::SerumCreatinine => self.serum_creatinine = value,
            FeatureId::BloodUreaNitrogen => self.blood_urea_nitrogen = value,
            FeatureId::EOverEPrime => self.e_over_e_prime = value,
            FeatureId::NtProbnp => self.nt_probnp = value,
            FeatureId::NyhaClass => self.nyha_class = value.round().clamp(0.0, f64::from(u8::MAX)) as u8,
            FeatureId::DDimer => self.d_dimer = value,
            FeatureId::SerumUricAcid => self.serum_uric_acid = value,
            FeatureId::Homocysteine => self.homocysteine = value,
            FeatureId::HsCrp => self.hs_crp = value,
        }
    }

    pub fn with(mut self, id: FeatureId, value: f64) -> Self {
        self.set(id, value);
        self
    }

    /// Values in form order
    pub fn values(&self) -> [(FeatureId, f64); FEATURE_COUNT] {
        FeatureId::ALL.map(|id| (id, self.get(id)))
    }
}

/// NYHA class as any whole number, so `3` and `3.0` are the same class.
/// The 1..=4 bound is left to validation.
fn whole_class<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if value.fract() != 0.0 || !(0.0..=f64::from(u8::MAX)).contains(&value) {
        return Err(de::Error::invalid_value(Unexpected::Float(value), &"a whole NYHA class"));
    }
    Ok(value as u8)
}

fn validate_finite(input: &PatientInput) -> Result<(), ValidationError> {
    if let Some((id, _)) = input.values().iter().find(|(_, v)| !v.is_finite()) {
        let mut err = ValidationError::new("not_finite");
        err.message = Some(Cow::Owned(format!("{} must be a finite number", id)));
        return Err(err);
    }
    Ok(())
}
