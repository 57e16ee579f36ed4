//! Relative Strength Index (RSI) indicator.

use crate::services::signals::{defined, Indicator, IndicatorValues};
use crate::types::Series;

/// RSI (Relative Strength Index) indicator.
///
/// Simple (non-smoothed) mean of gains over mean of losses across the
/// trailing `period` close-to-close deltas, mapped to 0-100:
/// - Below 30: Oversold
/// - Above 70: Overbought
///
/// The first `period` values are undefined. A window without losses
/// saturates at 100.
pub struct Rsi {
    period: usize,
}

impl Default for Rsi {
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    /// Calculate RSI from raw closes.
    pub(crate) fn calculate_rsi(closes: &[f64], period: usize) -> Vec<Option<f64>> {
        let mut out = vec![None; closes.len()];
        if period == 0 || closes.len() <= period {
            return out;
        }

        let mut gains = Vec::with_capacity(closes.len());
        let mut losses = Vec::with_capacity(closes.len());
        gains.push(0.0);
        losses.push(0.0);
        for i in 1..closes.len() {
            let change = closes[i] - closes[i - 1];
            if change > 0.0 {
                gains.push(change);
                losses.push(0.0);
            } else {
                gains.push(0.0);
                losses.push(-change);
            }
        }

        for i in period..closes.len() {
            let window = i + 1 - period..=i;
            let avg_gain = gains[window.clone()].iter().sum::<f64>() / period as f64;
            let avg_loss = losses[window].iter().sum::<f64>() / period as f64;

            out[i] = if avg_loss == 0.0 {
                Some(100.0)
            } else {
                let rs = avg_gain / avg_loss;
                defined(100.0 - (100.0 / (1.0 + rs)))
            };
        }

        out
    }
}

impl Indicator for Rsi {
    fn id(&self) -> String {
        format!("rsi{}", self.period)
    }

    fn min_periods(&self) -> usize {
        self.period + 1
    }

    fn compute(&self, series: &Series) -> Option<IndicatorValues> {
        if self.period == 0 {
            return None;
        }
        if series.len() < self.min_periods() {
            return Some(IndicatorValues::undefined(series.len()));
        }
        Some(IndicatorValues::new(Self::calculate_rsi(
            &series.closes(),
            self.period,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Bar;

    fn create_uptrend_candles(count: usize) -> Series {
        let bars = (0..count)
            .map(|i| {
                let base = 100.0 + i as f64 * 1.5;
                Bar {
                    time: 1_000_000 + i as i64 * 60,
                    open: base,
                    high: base + 2.0,
                    low: base - 1.0,
                    close: base + 1.0,
                    volume: Some(1000.0),
                }
            })
            .collect();
        Series::new(bars).unwrap()
    }

    fn create_zigzag_candles(count: usize) -> Series {
        let bars = (0..count)
            .map(|i| {
                let close = 100.0 + if i % 2 == 0 { 2.0 } else { -1.0 } + i as f64 * 0.1;
                Bar {
                    time: 1_000_000 + i as i64 * 60,
                    open: close,
                    high: close + 1.0,
                    low: close - 1.0,
                    close,
                    volume: None,
                }
            })
            .collect();
        Series::new(bars).unwrap()
    }

    #[test]
    fn test_rsi_id_and_min_periods() {
        let rsi = Rsi::default();
        assert_eq!(rsi.id(), "rsi14");
        assert_eq!(rsi.min_periods(), 15);
    }

    #[test]
    fn test_rsi_warmup_undefined() {
        let series = create_zigzag_candles(30);
        let rsi = Rsi::default().compute(&series).unwrap();
        assert!(rsi.values()[..14].iter().all(|v| v.is_none()));
        assert!(rsi.get(14).is_some());
    }

    #[test]
    fn test_rsi_saturates_without_losses() {
        let series = create_uptrend_candles(30);
        let rsi = Rsi::default().compute(&series).unwrap();
        assert_eq!(rsi.last(), Some(100.0));
    }

    #[test]
    fn test_rsi_value_range() {
        let series = create_zigzag_candles(60);
        let rsi = Rsi::default().compute(&series).unwrap();
        for value in rsi.values().iter().flatten() {
            assert!((0.0..=100.0).contains(value), "RSI out of range: {value}");
        }
    }

    #[test]
    fn test_rsi_insufficient_data() {
        let series = create_uptrend_candles(10);
        let rsi = Rsi::default().compute(&series).unwrap();
        assert!(rsi.last().is_none());
    }
}
