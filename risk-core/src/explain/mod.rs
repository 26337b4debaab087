//! Explain Module - Additive Attribution
//!
//! Decomposes one prediction of a linear scorer into per-feature
//! contributions relative to a background distribution.

pub mod engine;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export common types
pub use engine::{explain, LinearExplainer};
pub use types::{Attribution, AttributionError, FeatureContribution};
