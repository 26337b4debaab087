//! Locale tables
//!
//! The Chinese and English dashboards differ only in the strings below.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Zh,
    En,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::Zh, Locale::En];

    pub fn code(self) -> &'static str {
        match self {
            Locale::Zh => "zh",
            Locale::En => "en",
        }
    }

    /// Value for the HTML `lang` attribute
    pub fn html_lang(self) -> &'static str {
        match self {
            Locale::Zh => "zh-CN",
            Locale::En => "en",
        }
    }

    pub fn strings(self) -> &'static Strings {
        match self {
            Locale::Zh => &ZH,
            Locale::En => &EN,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLocale(pub String);

impl fmt::Display for UnknownLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown locale '{}'", self.0)
    }
}

impl std::error::Error for UnknownLocale {}

impl FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zh" | "zh-cn" | "cn" => Ok(Locale::Zh),
            "en" | "en-us" | "en-gb" => Ok(Locale::En),
            other => Err(UnknownLocale(other.to_string())),
        }
    }
}

/// User-facing strings of one dashboard variant
#[derive(Debug)]
pub struct Strings {
    pub page_title: &'static str,
    pub heading: &'static str,
    pub subtitle: &'static str,
    pub sidebar_header: &'static str,
    pub evaluate_button: &'static str,
    pub idle_hint: &'static str,
    pub result_heading: &'static str,
    pub attribution_heading: &'static str,
    pub report_heading: &'static str,
    pub footnote: &'static str,
    pub resources_unavailable: &'static str,
    pub inference_failed: &'static str,
    pub attribution_failed: &'static str,
    pub invalid_input: &'static str,
    pub unreadable_input: &'static str,
    pub other_features: &'static str,
    pub switch_language: &'static str,
}

static ZH: Strings = Strings {
    page_title: "HFpEF合并CKD再入院风险预测",
    heading: "❤️ HFpEF合并CKD再入院风险智能评估系统",
    subtitle: "基于 Logistic Regression 与 SHAP 可解释性算法",
    sidebar_header: "🏥 患者临床指标输入",
    evaluate_button: "🚀 开始评估",
    idle_hint: "👈 请在左侧侧边栏输入患者指标，然后点击“开始评估”。",
    result_heading: "预测结果",
    attribution_heading: "风险归因分析 (SHAP)",
    report_heading: "🤖 AI 分析报告",
    footnote: "注：该概率指患者在出院后1年内发生因心衰再入院的可能性。",
    resources_unavailable: "⚠️ 未找到模型文件！请确保 final_model.json, train_data_sample.json, feature_names.json 在模型目录下。",
    inference_failed: "模型结构异常，无法调用 predict_proba",
    attribution_failed: "特征贡献度计算失败",
    invalid_input: "输入指标超出允许范围",
    unreadable_input: "输入指标格式无效",
    other_features: "其他 {n} 个特征",
    switch_language: "English",
};

static EN: Strings = Strings {
    page_title: "HFpEF with CKD Readmission Risk Prediction",
    heading: "❤️ HFpEF with CKD Readmission Risk Assessment",
    subtitle: "Logistic Regression with SHAP explainability",
    sidebar_header: "🏥 Patient clinical measurements",
    evaluate_button: "🚀 Evaluate",
    idle_hint: "👈 Enter the patient's measurements in the sidebar, then click \"Evaluate\".",
    result_heading: "Prediction",
    attribution_heading: "Risk attribution (SHAP)",
    report_heading: "🤖 AI analysis report",
    footnote: "Note: the probability is the likelihood of heart-failure readmission within one year of discharge.",
    resources_unavailable: "⚠️ Model files not found! Make sure final_model.json, train_data_sample.json and feature_names.json are in the model directory.",
    inference_failed: "The model could not produce a probability",
    attribution_failed: "Feature attribution failed",
    invalid_input: "A measurement is outside its allowed range",
    unreadable_input: "A measurement could not be read",
    other_features: "{n} other features",
    switch_language: "中文",
};
