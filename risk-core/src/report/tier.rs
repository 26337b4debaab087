//! Qualitative risk tiers

use serde::Serialize;

use crate::constants::{HIGH_RISK_FROM, LOW_RISK_BELOW};
use crate::locale::Locale;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Low,
    Intermediate,
    High,
}

impl RiskTier {
    /// Step function of the unrounded percentage
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage < LOW_RISK_BELOW {
            RiskTier::Low
        } else if percentage < HIGH_RISK_FROM {
            RiskTier::Intermediate
        } else {
            RiskTier::High
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            RiskTier::Low => "green",
            RiskTier::Intermediate => "orange",
            RiskTier::High => "red",
        }
    }

    pub fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (RiskTier::Low, Locale::Zh) => "低风险",
            (RiskTier::Intermediate, Locale::Zh) => "中风险 (灰色地带)",
            (RiskTier::High, Locale::Zh) => "高风险",
            (RiskTier::Low, Locale::En) => "Low risk",
            (RiskTier::Intermediate, Locale::En) => "Intermediate risk (grey zone)",
            (RiskTier::High, Locale::En) => "High risk",
        }
    }
}

/// `0.4567` -> `"45.7%"`
pub fn format_percentage(probability: f64) -> String {
    format!("{:.1}%", probability * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(RiskTier::from_percentage(0.0), RiskTier::Low);
        assert_eq!(RiskTier::from_percentage(29.9), RiskTier::Low);
        assert_eq!(RiskTier::from_percentage(30.0), RiskTier::Intermediate);
        assert_eq!(RiskTier::from_percentage(69.9), RiskTier::Intermediate);
        assert_eq!(RiskTier::from_percentage(70.0), RiskTier::High);
        assert_eq!(RiskTier::from_percentage(100.0), RiskTier::High);
    }

    #[test]
    fn test_tier_is_monotonic() {
        let mut previous = RiskTier::Low;
        for step in 0..=1000 {
            let tier = RiskTier::from_percentage(step as f64 / 10.0);
            let rank = |t: RiskTier| t as u8;
            assert!(rank(tier) >= rank(previous));
            previous = tier;
        }
    }

    #[test]
    fn test_colors_and_labels() {
        assert_eq!(RiskTier::Low.color(), "green");
        assert_eq!(RiskTier::Intermediate.color(), "orange");
        assert_eq!(RiskTier::High.color(), "red");
        assert_eq!(RiskTier::High.label(Locale::Zh), "高风险");
        assert_eq!(RiskTier::Low.label(Locale::En), "Low risk");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.4567), "45.7%");
        assert_eq!(format_percentage(0.0), "0.0%");
        assert_eq!(format_percentage(1.0), "100.0%");
    }
}
