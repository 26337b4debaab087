//! Model Module - Trained Classifier
//!
//! The classifier artifact is a tagged variant over a plain logistic
//! regression, a scaler + estimator pipeline, or a calibration wrapper.
//! Callers only see the `ProbabilisticClassifier` capability.

pub mod calibration;
pub mod classifier;
pub mod inference;
pub mod linear;
pub mod pipeline;
pub mod scaler;

// Re-export common types
pub use calibration::{CalibratedClassifier, CalibratedMember, Calibrator};
pub use classifier::{Classifier, Estimator, LinearScorer, Probabilities, ProbabilisticClassifier};
pub use inference::{predict, ModelError, PredictionResult};
pub use linear::{sigmoid, LogisticRegression};
pub use pipeline::{NamedStep, Pipeline, Step};
pub use scaler::StandardScaler;
