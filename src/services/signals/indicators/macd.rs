//! MACD line (fast EMA minus slow EMA).

use super::ema::Ema;
use crate::services::signals::{Indicator, IndicatorValues};
use crate::types::Series;

/// MACD line indicator.
///
/// `EMA(fast) - EMA(slow)` of close. Both EMAs are seeded with the first
/// close, so the line is defined on every bar. The middle-term scorer reads
/// its last-bar slope as a momentum proxy.
pub struct Macd {
    fast_period: usize,
    slow_period: usize,
}

impl Default for Macd {
    fn default() -> Self {
        Self {
            fast_period: 12,
            slow_period: 26,
        }
    }
}

impl Macd {
    pub fn new(fast_period: usize, slow_period: usize) -> Self {
        Self {
            fast_period,
            slow_period,
        }
    }
}

impl Indicator for Macd {
    fn id(&self) -> String {
        format!("macd{}_{}", self.fast_period, self.slow_period)
    }

    fn min_periods(&self) -> usize {
        1
    }

    fn compute(&self, series: &Series) -> Option<IndicatorValues> {
        if self.fast_period == 0 || self.slow_period == 0 {
            return None;
        }
        let closes = series.closes();
        let fast = IndicatorValues::new(Ema::calculate_ema(&closes, self.fast_period));
        let slow = IndicatorValues::new(Ema::calculate_ema(&closes, self.slow_period));
        Some(fast.minus(&slow))
    }
}
