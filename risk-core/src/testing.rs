//! Shared test fixtures: a deterministic background sample and a reference
//! scaler + logistic regression model, generated per feature id so any
//! column order yields a consistently permuted model.

use std::path::Path;

use ndarray::{Array2, Axis};

use crate::constants::{DEFAULT_BACKGROUND_FILE, DEFAULT_FEATURES_FILE, DEFAULT_MODEL_FILE};
use crate::features::{Control, FeatureId, FeatureLayout};
use crate::model::{
    CalibratedClassifier, CalibratedMember, Calibrator, Classifier, Estimator, LogisticRegression,
    Pipeline, StandardScaler, Step,
};

/// Column order of the reference training run
pub const TRAINING_ORDER: [&str; 10] = [
    "egfr",
    "E_over_e_prime",
    "d_dimer",
    "serum_creatinine",
    "nyha_class",
    "serum_uric_acid",
    "blood_urea_nitrogen",
    "nt_probnp",
    "homocysteine",
    "hs_crp",
];

pub fn training_layout() -> FeatureLayout {
    FeatureLayout::from_names(&TRAINING_ORDER).unwrap()
}

fn weight(id: FeatureId) -> f64 {
    match id {
        FeatureId::Egfr => -0.62,
        FeatureId::SerumCreatinine => 0.41,
        FeatureId::BloodUreaNitrogen => 0.28,
        FeatureId::EOverEPrime => 0.53,
        FeatureId::NtProbnp => 0.47,
        FeatureId::NyhaClass => 0.58,
        FeatureId::DDimer => 0.36,
        FeatureId::SerumUricAcid => 0.19,
        FeatureId::Homocysteine => 0.24,
        FeatureId::HsCrp => 0.13,
    }
}

fn spread(id: FeatureId) -> f64 {
    match id {
        FeatureId::Egfr => 20.0,
        FeatureId::SerumCreatinine => 80.0,
        FeatureId::BloodUreaNitrogen => 5.0,
        FeatureId::EOverEPrime => 5.0,
        FeatureId::NtProbnp => 1500.0,
        FeatureId::NyhaClass => 1.0,
        FeatureId::DDimer => 0.4,
        FeatureId::SerumUricAcid => 100.0,
        FeatureId::Homocysteine => 6.0,
        FeatureId::HsCrp => 4.0,
    }
}

fn bounds(id: FeatureId) -> (f64, f64) {
    match id.spec().control {
        Control::Number { min, max, .. } => (min, max),
        Control::Choice { options } => (
            f64::from(options[0]),
            f64::from(options[options.len() - 1]),
        ),
    }
}

/// Deterministic rows in `layout` order
pub fn background(layout: &FeatureLayout, rows: usize) -> Array2<f64> {
    Array2::from_shape_fn((rows, layout.len()), |(r, c)| {
        let id = layout.ids()[c];
        let offset = ((r * 7 + id.index() * 3) % 11) as f64 - 5.0;
        let (min, max) = bounds(id);
        let value = (id.spec().default + spread(id) * offset / 5.0).clamp(min, max);
        if id == FeatureId::NyhaClass { value.round() } else { value }
    })
}

/// Scaler fitted on `data` (population standard deviation)
pub fn fitted_scaler(data: &Array2<f64>) -> StandardScaler {
    let mean = data.mean_axis(Axis(0)).unwrap();
    let scale = data.std_axis(Axis(0), 0.0);
    StandardScaler { mean: mean.to_vec(), scale: scale.to_vec() }
}

pub fn linear(layout: &FeatureLayout) -> LogisticRegression {
    LogisticRegression::new(layout.ids().iter().map(|&id| weight(id)).collect(), -0.4)
}

fn pipeline_with_names(layout: &FeatureLayout, data: &Array2<f64>, scaler: &str, clf: &str) -> Pipeline {
    Pipeline::new(vec![
        (scaler, Step::StandardScaler(fitted_scaler(data))),
        (clf, Step::LogisticRegression(linear(layout))),
    ])
}

pub fn pipeline_classifier(layout: &FeatureLayout, data: &Array2<f64>) -> Classifier {
    Classifier::Pipeline(pipeline_with_names(layout, data, "scaler", "clf"))
}

/// Pipeline whose steps do not carry the names attribution looks for
pub fn unnamed_pipeline_classifier(layout: &FeatureLayout, data: &Array2<f64>) -> Classifier {
    Classifier::Pipeline(pipeline_with_names(layout, data, "standardscaler", "logisticregression"))
}

pub fn calibrated_classifier(layout: &FeatureLayout, data: &Array2<f64>) -> Classifier {
    let member = |a: f64, b: f64| CalibratedMember {
        estimator: Estimator::Pipeline(pipeline_with_names(layout, data, "scaler", "clf")),
        calibrator: Calibrator::Sigmoid { a, b },
    };
    Classifier::Calibrated(CalibratedClassifier {
        calibrated_classifiers: vec![member(-1.1, 0.05), member(-0.9, -0.05)],
    })
}

/// Write the three artifacts into `dir`
pub fn write_artifacts(dir: &Path, classifier: &Classifier, layout: &FeatureLayout, data: &Array2<f64>) {
    let rows: Vec<Vec<f64>> = data.outer_iter().map(|r| r.to_vec()).collect();
    std::fs::write(dir.join(DEFAULT_MODEL_FILE), serde_json::to_vec_pretty(classifier).unwrap()).unwrap();
    std::fs::write(dir.join(DEFAULT_BACKGROUND_FILE), serde_json::to_vec(&rows).unwrap()).unwrap();
    std::fs::write(dir.join(DEFAULT_FEATURES_FILE), serde_json::to_vec(&layout.names()).unwrap()).unwrap();
}
