//! Query parameters

use hfpef_risk_core::Locale;
use serde::Deserialize;

/// `?lang=zh|en`
#[derive(Debug, Default, Deserialize)]
pub struct LangQuery {
    pub lang: Option<String>,
}

impl LangQuery {
    /// Requested locale; unknown codes fall back to `default`
    pub fn locale(&self, default: Locale) -> Locale {
        match self.lang.as_deref().map(str::parse::<Locale>) {
            Some(Ok(locale)) => locale,
            Some(Err(e)) => {
                tracing::debug!("Ignoring {}", e);
                default
            }
            None => default,
        }
    }
}
