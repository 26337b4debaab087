//! Waterfall layout of an attribution
//!
//! Bars are listed top to bottom by descending |contribution|. Positions
//! accumulate from the bottom: the lowest bar starts at the baseline and the
//! top bar ends at the model output.

use serde::Serialize;

use crate::explain::Attribution;
use crate::features::FeatureId;
use crate::locale::Locale;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaterfallBar {
    pub label: String,
    /// `None` for the folded "other features" bar
    pub feature: Option<FeatureId>,
    pub value: Option<f64>,
    pub contribution: f64,
    pub start: f64,
    pub end: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaterfallChart {
    pub baseline: f64,
    pub output: f64,
    pub bars: Vec<WaterfallBar>,
}

impl WaterfallChart {
    pub fn build(attribution: &Attribution, locale: Locale, max_display: usize) -> Self {
        let sorted = attribution.by_magnitude();
        let max_display = max_display.max(1);

        let mut bars: Vec<WaterfallBar> = Vec::with_capacity(sorted.len().min(max_display));
        let (shown, rest) = if sorted.len() > max_display {
            sorted.split_at(max_display - 1)
        } else {
            (&sorted[..], &[][..])
        };

        for c in shown {
            bars.push(WaterfallBar {
                label: c.feature.display_name(locale).to_string(),
                feature: Some(c.feature),
                value: Some(c.value),
                contribution: c.contribution,
                start: 0.0,
                end: 0.0,
            });
        }

        if !rest.is_empty() {
            bars.push(WaterfallBar {
                label: locale.strings().other_features.replace("{n}", &rest.len().to_string()),
                feature: None,
                value: None,
                contribution: rest.iter().map(|c| c.contribution).sum(),
                start: 0.0,
                end: 0.0,
            });
        }

        let mut running = attribution.baseline;
        for bar in bars.iter_mut().rev() {
            bar.start = running;
            bar.end = running + bar.contribution;
            running = bar.end;
        }

        Self { baseline: attribution.baseline, output: running, bars }
    }

    /// Smallest and largest position touched by the chart
    pub fn extent(&self) -> (f64, f64) {
        self.bars.iter()
            .flat_map(|b| [b.start, b.end])
            .chain([self.baseline, self.output])
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)))
    }
}
