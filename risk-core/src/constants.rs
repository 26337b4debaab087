//! Central Configuration Constants
//!
//! Single source of truth for artifact names, step names and report thresholds.

/// Serialized classifier
pub const DEFAULT_MODEL_FILE: &str = "final_model.json";

/// Background sample drawn from the training set
pub const DEFAULT_BACKGROUND_FILE: &str = "train_data_sample.json";

/// Ordered feature identifiers used at training time
pub const DEFAULT_FEATURES_FILE: &str = "feature_names.json";

/// Label of the readmission class
pub const POSITIVE_CLASS: i64 = 1;

/// Pipeline step holding the preprocessing transform
pub const SCALER_STEP: &str = "scaler";

/// Pipeline step holding the linear estimator
pub const ESTIMATOR_STEP: &str = "clf";

/// Percentages below this are low risk
pub const LOW_RISK_BELOW: f64 = 30.0;

/// Percentages from this upwards are high risk
pub const HIGH_RISK_FROM: f64 = 70.0;

/// Rows shown in the waterfall chart
pub const WATERFALL_MAX_DISPLAY: usize = 10;

/// Engine version
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
