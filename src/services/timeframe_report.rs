//! One-line EMA trend and pattern summary per timeframe.

use crate::services::patterns::{detect_double_bottom, detect_double_top};
use crate::services::signals::ema;
use crate::types::{Series, Timeframe};
use serde::Serialize;

/// Bars needed for the EMA trend label.
const MIN_TREND_BARS: usize = 50;

/// Summary row for one timeframe.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeframeDetail {
    pub timeframe: Timeframe,
    pub trend: String,
    pub double_top: bool,
    pub double_bottom: bool,
}

impl TimeframeDetail {
    /// `**{name}**: `{trend}` {patterns}`
    pub fn render(&self) -> String {
        let mut patterns = String::new();
        if self.double_top {
            patterns.push_str("**⚠️ Wトップ** ");
        }
        if self.double_bottom {
            patterns.push_str("**💎 Wボトム** ");
        }
        format!(
            "**{}**: `{}` {}",
            self.timeframe.display_name(),
            self.trend,
            patterns
        )
    }
}

/// Build the detail for one series; `None` if it is empty.
pub fn timeframe_detail(timeframe: Timeframe, series: &Series) -> Option<TimeframeDetail> {
    let close = series.last_close()?;

    let trend = if series.len() < MIN_TREND_BARS {
        "データ不足".to_string()
    } else {
        trend_label(series, close).to_string()
    };

    let (double_top, double_bottom) = if series.len() > MIN_TREND_BARS {
        (
            detect_double_top(series, 0.03, 100).detected,
            detect_double_bottom(series, 0.03, 100).detected,
        )
    } else {
        (false, false)
    };

    Some(TimeframeDetail {
        timeframe,
        trend,
        double_top,
        double_bottom,
    })
}

fn trend_label(series: &Series, close: f64) -> &'static str {
    let last = |window| ema(series, window).and_then(|v| v.last());
    let (Some(ema20), Some(ema50), Some(ema200)) = (last(20), last(50), last(200)) else {
        return "→ 混在";
    };

    if close > ema20 && ema20 > ema50 && ema50 > ema200 {
        "🔼 上昇 (価格 > EMA20 > 50 > 200)"
    } else if close < ema20 && ema20 < ema50 && ema50 < ema200 {
        "🔽 下落 (価格 < EMA20 < 50 < 200)"
    } else if close > ema200 {
        "↗️ 上昇 (EMA200上)"
    } else if close < ema200 {
        "↘️ 下落 (EMA200下)"
    } else {
        "→ 混在"
    }
}

/// Details for every non-empty series, coarsest timeframe first.
pub fn timeframe_details<'a>(
    series: impl IntoIterator<Item = (Timeframe, &'a Series)>,
) -> Vec<TimeframeDetail> {
    let mut details: Vec<TimeframeDetail> = series
        .into_iter()
        .filter_map(|(tf, s)| timeframe_detail(tf, s))
        .collect();
    details.sort_by(|a, b| b.timeframe.cmp(&a.timeframe));
    details
}

/// Rendered rows joined by newlines.
pub fn render_details(details: &[TimeframeDetail]) -> String {
    details
        .iter()
        .map(TimeframeDetail::render)
        .collect::<Vec<_>>()
        .join("\n")
}
