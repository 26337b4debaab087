//! HTML views
//!
//! Pages are `Display` implementations written straight into the response
//! string. Every user-visible string goes through `Escaped`.

pub mod chart;
pub mod page;

use std::fmt;

pub use chart::WaterfallSvg;
pub use page::{Banner, BannerLevel, DashboardPage};

/// HTML-escaped text
pub struct Escaped<'a>(pub &'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0.chars() {
            match c {
                '&' => f.write_str("&amp;")?,
                '<' => f.write_str("&lt;")?,
                '>' => f.write_str("&gt;")?,
                '"' => f.write_str("&quot;")?,
                '\'' => f.write_str("&#39;")?,
                c => write!(f, "{}", c)?,
            }
        }
        Ok(())
    }
}

/// Compact number for chart labels: integers without decimals, others up to
/// three decimals
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{:.0}", value);
    }
    let text = format!("{:.3}", value);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}
