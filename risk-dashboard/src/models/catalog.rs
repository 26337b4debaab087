//! Feature catalog response

use hfpef_risk_core::features::{catalog, Control, FeatureGroup, FeatureId};
use hfpef_risk_core::Locale;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct FeatureEntry {
    pub id: FeatureId,
    pub display_name: &'static str,
    pub group: FeatureGroup,
    pub group_title: &'static str,
    pub control: Control,
    pub default: f64,
}

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub locale: Locale,
    pub features: Vec<FeatureEntry>,
}

impl CatalogResponse {
    pub fn new(locale: Locale) -> Self {
        let features = catalog()
            .iter()
            .map(|spec| FeatureEntry {
                id: spec.id,
                display_name: spec.id.display_name(locale),
                group: spec.group,
                group_title: spec.group.title(locale),
                control: spec.control,
                default: spec.default,
            })
            .collect();
        Self { locale, features }
    }
}
