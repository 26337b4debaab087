//! Dashboard page: grouped input form on the left, results on the right

use std::fmt;

use hfpef_risk_core::features::{Control, FeatureGroup, FeatureSpec};
use hfpef_risk_core::report::{AttributionPanel, EvaluationReport};
use hfpef_risk_core::{Locale, PatientInput};

use super::{Escaped, WaterfallSvg};

const STYLE: &str = "\
body{margin:0;font-family:sans-serif;display:flex;min-height:100vh;color:#262730}\
aside{width:320px;background:#f0f2f6;padding:24px;box-sizing:border-box}\
main{flex:1;padding:32px 48px}\
fieldset{border:none;padding:0;margin:0 0 18px}\
legend{font-weight:bold;margin-bottom:8px}\
label{display:block;font-size:14px;margin:8px 0 4px}\
input,select{width:100%;padding:6px;box-sizing:border-box}\
button{width:100%;padding:10px;font-size:16px;margin-top:8px;cursor:pointer}\
button:disabled{cursor:not-allowed;opacity:.5}\
.lang{float:right}\
.banner{padding:14px;border-radius:6px;margin:16px 0}\
.banner.error{background:#ffe9e9;color:#7d1a1a}\
.banner.warning{background:#fff6dd;color:#7a5a00}\
.info{background:#e8f2fc;color:#0b4a8b;padding:14px;border-radius:6px}\
.result{display:flex;gap:32px}\
.result .card-col{flex:1}\
.result .chart-col{flex:2}\
.card{text-align:center;border:2px solid;padding:20px;border-radius:10px}\
.card .pct{font-size:50px;font-weight:bold}\
";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerLevel {
    Error,
    Warning,
}

impl BannerLevel {
    fn class(self) -> &'static str {
        match self {
            BannerLevel::Error => "error",
            BannerLevel::Warning => "warning",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Banner {
    pub level: BannerLevel,
    pub message: String,
}

pub struct DashboardPage<'a> {
    pub locale: Locale,
    /// Values shown in the form
    pub input: &'a PatientInput,
    pub banner: Option<Banner>,
    pub report: Option<&'a EvaluationReport>,
    pub evaluate_enabled: bool,
}

impl DashboardPage<'_> {
    fn other_locale(&self) -> Locale {
        match self.locale {
            Locale::Zh => Locale::En,
            Locale::En => Locale::Zh,
        }
    }

    fn write_control(&self, f: &mut fmt::Formatter<'_>, spec: &FeatureSpec) -> fmt::Result {
        let name = spec.id.as_str();
        let value = self.input.get(spec.id);
        write!(
            f,
            r#"<label for="{name}">{label}</label>"#,
            name = name,
            label = Escaped(spec.id.display_name(self.locale)),
        )?;
        match spec.control {
            Control::Number { min, max, step } => write!(
                f,
                r#"<input type="number" id="{name}" name="{name}" min="{min}" max="{max}" step="{step}" value="{value}" required>"#,
                name = name,
                min = min,
                max = max,
                step = step,
                value = value,
            ),
            Control::Choice { options } => {
                write!(f, r#"<select id="{name}" name="{name}">"#, name = name)?;
                for &option in options {
                    let selected = if f64::from(option) == value { " selected" } else { "" };
                    write!(f, r#"<option value="{o}"{s}>{o}</option>"#, o = option, s = selected)?;
                }
                f.write_str("</select>")
            }
        }
    }

    fn write_sidebar(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let strings = self.locale.strings();
        write!(
            f,
            r#"<aside><h2>{}</h2><form method="post" action="/evaluate?lang={}">"#,
            Escaped(strings.sidebar_header),
            self.locale.code(),
        )?;
        for group in FeatureGroup::ALL {
            write!(f, "<fieldset><legend>{}</legend>", Escaped(group.title(self.locale)))?;
            for spec in group.members() {
                self.write_control(f, spec)?;
            }
            f.write_str("</fieldset>")?;
        }
        write!(
            f,
            r#"<button type="submit"{}>{}</button></form></aside>"#,
            if self.evaluate_enabled { "" } else { " disabled" },
            Escaped(strings.evaluate_button),
        )
    }

    fn write_report(&self, f: &mut fmt::Formatter<'_>, report: &EvaluationReport) -> fmt::Result {
        let strings = self.locale.strings();
        let risk = &report.risk;

        write!(
            f,
            r#"<section class="result"><div class="card-col"><h2>{heading}</h2><div class="card" style="border-color:{color}"><div class="pct" style="color:{color}">{pct}</div><h3>{label}</h3></div><p class="info">{note}</p></div>"#,
            heading = Escaped(strings.result_heading),
            color = risk.color,
            pct = Escaped(&risk.percentage),
            label = Escaped(risk.tier_label),
            note = Escaped(report.footnote),
        )?;

        write!(f, r#"<div class="chart-col"><h2>{}</h2>"#, Escaped(strings.attribution_heading))?;
        match &report.attribution {
            AttributionPanel::Ready { waterfall, .. } => write!(f, "{}", WaterfallSvg(waterfall))?,
            AttributionPanel::Failed { message, reason } => write!(
                f,
                r#"<div class="banner error">{}: {}</div>"#,
                Escaped(message),
                Escaped(reason),
            )?,
        }
        f.write_str("</div></section>")?;

        if let AttributionPanel::Ready { summary: Some(summary), .. } = &report.attribution {
            write!(
                f,
                "<hr><h2>{}</h2><p>{}</p>",
                Escaped(strings.report_heading),
                Escaped(&summary.sentence),
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for DashboardPage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let strings = self.locale.strings();

        write!(
            f,
            r#"<!DOCTYPE html><html lang="{lang}"><head><meta charset="utf-8"><meta name="viewport" content="width=device-width, initial-scale=1"><title>{title}</title><style>{style}</style></head><body>"#,
            lang = self.locale.html_lang(),
            title = Escaped(strings.page_title),
            style = STYLE,
        )?;

        self.write_sidebar(f)?;

        let other = self.other_locale();
        write!(
            f,
            r#"<main><a class="lang" href="/?lang={code}">{switch}</a><h1>{heading}</h1><p>{subtitle}</p>"#,
            code = other.code(),
            switch = Escaped(strings.switch_language),
            heading = Escaped(strings.heading),
            subtitle = Escaped(strings.subtitle),
        )?;

        if let Some(banner) = &self.banner {
            write!(
                f,
                r#"<div class="banner {}">{}</div>"#,
                banner.level.class(),
                Escaped(&banner.message),
            )?;
        }

        match self.report {
            Some(report) => self.write_report(f, report)?,
            None if self.banner.is_none() => write!(f, r#"<p class="info">{}</p>"#, Escaped(strings.idle_hint))?,
            None => {}
        }

        f.write_str("</main></body></html>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hfpef_risk_core::explain::AttributionError;
    use hfpef_risk_core::features::{FeatureLayout, FeatureVector};
    use hfpef_risk_core::Evaluation;

    fn page<'a>(locale: Locale, input: &'a PatientInput) -> DashboardPage<'a> {
        DashboardPage { locale, input, banner: None, report: None, evaluate_enabled: true }
    }

    #[test]
    fn test_idle_page() {
        let input = PatientInput::default();
        let html = page(Locale::Zh, &input).to_string();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"lang="zh-CN""#));
        assert!(html.contains("核心肾脏指标"));
        assert!(html.contains(r#"name="E_over_e_prime""#));
        assert!(html.contains(r#"<option value="3" selected>3</option>"#));
        assert!(html.contains(r#"name="nt_probnp" min="10" max="35000" step="100" value="2000""#));
        assert!(html.contains(r#"href="/?lang=en""#));
        assert!(html.contains("开始评估"));
        assert!(!html.contains(" disabled>"));
    }

    #[test]
    fn test_banner_disables_form() {
        let input = PatientInput::default();
        let mut page = page(Locale::En, &input);
        page.banner = Some(Banner { level: BannerLevel::Error, message: "<missing>".to_string() });
        page.evaluate_enabled = false;
        let html = page.to_string();

        assert!(html.contains(r#"<div class="banner error">&lt;missing&gt;</div>"#));
        assert!(html.contains(" disabled>"));
        assert!(!html.contains(r#"class="info">👈"#));
    }

    #[test]
    fn test_failed_attribution_still_shows_probability() {
        let input = PatientInput::default();
        let evaluation = Evaluation {
            features: FeatureVector::arrange(&input, &FeatureLayout::form_order()),
            probability: 0.81,
            inference_time_us: 5,
            attribution: Err(AttributionError::MissingStep("scaler".to_string())),
        };
        let report = EvaluationReport::new(&evaluation, Locale::En);
        let mut page = page(Locale::En, &input);
        page.report = Some(&report);
        let html = page.to_string();

        assert!(html.contains("81.0%"));
        assert!(html.contains("High risk"));
        assert!(html.contains("Feature attribution failed"));
        assert!(!html.contains("<svg"));
    }
}
