//! Average bar range indicator.

use super::sma::Sma;
use crate::services::signals::{Indicator, IndicatorValues};
use crate::types::{Bar, Series};

/// Average high-low range over a trailing window.
///
/// Comparing a short window against a longer one flags volatility
/// expansion: a 3-bar average well above the 20-bar average means the
/// market has started to move.
pub struct AverageRange {
    period: usize,
}

impl AverageRange {
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    /// Mean range of the most recent `period` bars, or of all bars when
    /// fewer exist.
    pub fn recent(&self, bars: &[Bar]) -> Option<f64> {
        if self.period == 0 || bars.is_empty() {
            return None;
        }
        let start = bars.len().saturating_sub(self.period);
        let window = &bars[start..];
        Some(window.iter().map(Bar::range).sum::<f64>() / window.len() as f64)
    }
}

impl Indicator for AverageRange {
    fn id(&self) -> String {
        format!("range{}", self.period)
    }

    fn min_periods(&self) -> usize {
        self.period
    }

    fn compute(&self, series: &Series) -> Option<IndicatorValues> {
        if self.period == 0 {
            return None;
        }
        let ranges: Vec<f64> = series.bars().iter().map(Bar::range).collect();
        Some(IndicatorValues::new(Sma::rolling_mean(&ranges, self.period)))
    }
}
