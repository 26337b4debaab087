//! One-sentence interpretation of the strongest contribution

use serde::Serialize;

use crate::explain::Attribution;
use crate::features::FeatureId;
use crate::locale::Locale;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Increased,
    Decreased,
}

impl Direction {
    pub fn of(contribution: f64) -> Self {
        if contribution > 0.0 {
            Direction::Increased
        } else {
            Direction::Decreased
        }
    }

    pub fn word(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Direction::Increased, Locale::Zh) => "增加",
            (Direction::Decreased, Locale::Zh) => "降低",
            (Direction::Increased, Locale::En) => "increased",
            (Direction::Decreased, Locale::En) => "decreased",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub feature: FeatureId,
    pub display_name: &'static str,
    pub direction: Direction,
    pub direction_word: &'static str,
    pub contribution: f64,
    /// `|contribution| x 100`, one decimal, with `%`
    pub magnitude: String,
    pub sentence: String,
}

impl Summary {
    pub fn from_attribution(attribution: &Attribution, locale: Locale) -> Option<Self> {
        let top = attribution.top()?;
        let display_name = top.feature.display_name(locale);
        let direction = Direction::of(top.contribution);
        let direction_word = direction.word(locale);
        let magnitude = format!("{:.1}%", top.contribution.abs() * 100.0);

        let sentence = match locale {
            Locale::Zh => format!(
                "根据模型分析，对该患者风险影响最大的因素是 {}，它使再入院概率{}了 {}。",
                display_name, direction_word, magnitude
            ),
            Locale::En => format!("{} {} the probability by {}.", display_name, direction_word, magnitude),
        };

        Some(Self {
            feature: top.feature,
            display_name,
            direction,
            direction_word,
            contribution: top.contribution,
            magnitude,
            sentence,
        })
    }
}
