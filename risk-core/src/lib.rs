//! HFpEF + CKD Readmission Risk Engine
//!
//! Loads a trained linear classifier, scores one patient and decomposes the
//! score into additive per-feature contributions.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │  artifacts   │──►│   features   │──►│    model     │──►│   explain    │
//! │ (load+cache) │   │ (input, row) │   │ (inference)  │   │ (attribution)│
//! └──────────────┘   └──────────────┘   └──────────────┘   └──────┬───────┘
//!                                                                 ▼
//!                                                          ┌──────────────┐
//!                                                          │    report    │
//!                                                          └──────────────┘
//! ```

pub mod artifacts;
pub mod constants;
pub mod error;
pub mod explain;
pub mod features;
pub mod locale;
pub mod model;
pub mod pipeline;
pub mod report;

#[cfg(test)]
pub(crate) mod testing;

pub use artifacts::{ArtifactPaths, ResourceCache, Resources};
pub use error::EvaluationError;
pub use features::{FeatureId, PatientInput};
pub use locale::Locale;
pub use pipeline::{evaluate, Evaluation};
