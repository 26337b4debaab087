//! Waterfall chart as inline SVG

use std::fmt;

use hfpef_risk_core::report::WaterfallChart;

use super::{format_number, Escaped};

const WIDTH: f64 = 760.0;
const LABEL_WIDTH: f64 = 320.0;
const RIGHT_PAD: f64 = 48.0;
const ROW_HEIGHT: f64 = 30.0;
const BAR_HEIGHT: f64 = 20.0;
const TOP: f64 = 36.0;
const BOTTOM: f64 = 44.0;

const INCREASE: &str = "#ff0051";
const DECREASE: &str = "#008bfb";

pub struct WaterfallSvg<'a>(pub &'a WaterfallChart);

impl WaterfallSvg<'_> {
    /// Horizontal position of a model-output value
    fn scale(&self) -> impl Fn(f64) -> f64 {
        let (lo, hi) = self.0.extent();
        let pad = (hi - lo).max(1e-6) * 0.08;
        let (lo, hi) = (lo - pad, hi + pad);
        let plot = WIDTH - LABEL_WIDTH - RIGHT_PAD;
        move |v| LABEL_WIDTH + (v - lo) / (hi - lo) * plot
    }
}

impl fmt::Display for WaterfallSvg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let chart = self.0;
        let x = self.scale();
        let plot_bottom = TOP + chart.bars.len() as f64 * ROW_HEIGHT;
        let height = plot_bottom + BOTTOM;

        write!(
            f,
            r#"<svg class="waterfall" xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" width="100%" role="img" font-family="sans-serif" font-size="12">"#,
            w = WIDTH,
            h = height,
        )?;

        // f(x) on top, E[f(X)] below the axis
        let (bx, ox) = (x(chart.baseline), x(chart.output));
        write!(
            f,
            r##"<line x1="{bx:.1}" y1="{top:.1}" x2="{bx:.1}" y2="{bottom:.1}" stroke="#999" stroke-dasharray="4 3"/>"##,
            bx = bx,
            top = TOP,
            bottom = plot_bottom,
        )?;
        write!(
            f,
            r##"<text x="{bx:.1}" y="{y:.1}" text-anchor="middle" fill="#555">E[f(X)] = {v:.3}</text>"##,
            bx = bx,
            y = plot_bottom + 30.0,
            v = chart.baseline,
        )?;
        write!(
            f,
            r##"<line x1="{ox:.1}" y1="{y1:.1}" x2="{ox:.1}" y2="{y2:.1}" stroke="#999" stroke-dasharray="4 3"/>"##,
            ox = ox,
            y1 = TOP - 8.0,
            y2 = plot_bottom,
        )?;
        write!(
            f,
            r##"<text x="{ox:.1}" y="{y:.1}" text-anchor="middle" fill="#555">f(x) = {v:.3}</text>"##,
            ox = ox,
            y = TOP - 14.0,
            v = chart.output,
        )?;

        for (i, bar) in chart.bars.iter().enumerate() {
            let row_top = TOP + i as f64 * ROW_HEIGHT;
            let y = row_top + (ROW_HEIGHT - BAR_HEIGHT) / 2.0;
            let (x0, x1) = (x(bar.start), x(bar.end));
            let (left, right) = (x0.min(x1), x0.max(x1));
            let color = if bar.contribution > 0.0 { INCREASE } else { DECREASE };

            write!(
                f,
                r#"<rect x="{left:.1}" y="{y:.1}" width="{w:.1}" height="{h:.1}" fill="{color}"/>"#,
                left = left,
                y = y,
                w = (right - left).max(1.0),
                h = BAR_HEIGHT,
                color = color,
            )?;

            let text_y = row_top + ROW_HEIGHT / 2.0 + 4.0;
            write!(
                f,
                r##"<text x="{lx:.1}" y="{ty:.1}" text-anchor="end" fill="#333">"##,
                lx = LABEL_WIDTH - 8.0,
                ty = text_y,
            )?;
            match bar.value {
                Some(value) => write!(f, "{} = {}", format_number(value), Escaped(&bar.label))?,
                None => write!(f, "{}", Escaped(&bar.label))?,
            }
            f.write_str("</text>")?;

            let (tx, anchor) = if bar.contribution > 0.0 { (right + 4.0, "start") } else { (left - 4.0, "end") };
            write!(
                f,
                r#"<text x="{tx:.1}" y="{ty:.1}" text-anchor="{anchor}" fill="{color}">{c:+.2}</text>"#,
                tx = tx,
                ty = text_y,
                anchor = anchor,
                color = color,
                c = bar.contribution,
            )?;
        }

        write!(
            f,
            r##"<line x1="{x1:.1}" y1="{y:.1}" x2="{x2:.1}" y2="{y:.1}" stroke="#333"/>"##,
            x1 = LABEL_WIDTH,
            x2 = WIDTH - RIGHT_PAD,
            y = plot_bottom,
        )?;
        f.write_str("</svg>")
    }
}
