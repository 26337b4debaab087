//! Features Module - Patient Measurements
//!
//! - `catalog` - the ten measurements, their ranges, defaults and labels
//! - `layout` - column order recorded by the training run
//! - `input` - validated operator input
//! - `vector` - one row ordered for the model

pub mod catalog;
pub mod input;
pub mod layout;
pub mod vector;

// Re-export common types
pub use catalog::{catalog, Control, FeatureGroup, FeatureId, FeatureSpec, FEATURE_COUNT};
pub use input::PatientInput;
pub use layout::{FeatureLayout, LayoutError};
pub use vector::FeatureVector;
