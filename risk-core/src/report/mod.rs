//! Report Module - presentation of one evaluation
//!
//! Everything here is locale dependent; the numbers come unchanged from
//! `pipeline::Evaluation`.

pub mod summary;
pub mod tier;
pub mod waterfall;

use serde::Serialize;

use crate::constants::WATERFALL_MAX_DISPLAY;
use crate::features::FeatureId;
use crate::locale::Locale;
use crate::pipeline::Evaluation;

pub use summary::{Direction, Summary};
pub use tier::{format_percentage, RiskTier};
pub use waterfall::{WaterfallBar, WaterfallChart};

/// Probability card
#[derive(Debug, Clone, Serialize)]
pub struct RiskCard {
    pub probability: f64,
    pub percentage: String,
    pub tier: RiskTier,
    pub tier_label: &'static str,
    pub color: &'static str,
}

impl RiskCard {
    pub fn new(probability: f64, locale: Locale) -> Self {
        let tier = RiskTier::from_percentage(probability * 100.0);
        Self {
            probability,
            percentage: format_percentage(probability),
            tier,
            tier_label: tier.label(locale),
            color: tier.color(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct InputEcho {
    pub feature: FeatureId,
    pub display_name: &'static str,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AttributionPanel {
    Ready {
        baseline: f64,
        output: f64,
        waterfall: WaterfallChart,
        summary: Option<Summary>,
    },
    Failed {
        message: &'static str,
        reason: String,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    pub locale: Locale,
    pub risk: RiskCard,
    pub inputs: Vec<InputEcho>,
    pub attribution: AttributionPanel,
    pub footnote: &'static str,
}

impl EvaluationReport {
    pub fn new(evaluation: &Evaluation, locale: Locale) -> Self {
        let strings = locale.strings();

        let inputs = evaluation.features.ids().iter()
            .zip(evaluation.features.values())
            .map(|(&feature, &value)| InputEcho {
                feature,
                display_name: feature.display_name(locale),
                value,
            })
            .collect();

        let attribution = match &evaluation.attribution {
            Ok(a) => AttributionPanel::Ready {
                baseline: a.baseline,
                output: a.output(),
                waterfall: WaterfallChart::build(a, locale, WATERFALL_MAX_DISPLAY),
                summary: Summary::from_attribution(a, locale),
            },
            Err(e) => AttributionPanel::Failed {
                message: strings.attribution_failed,
                reason: e.to_string(),
            },
        };

        Self {
            locale,
            risk: RiskCard::new(evaluation.probability, locale),
            inputs,
            attribution,
            footnote: strings.footnote,
        }
    }
}
