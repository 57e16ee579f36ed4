//! Simple Moving Average (SMA) indicator.

use crate::services::signals::{defined, Indicator, IndicatorValues};
use crate::types::Series;

/// SMA (Simple Moving Average) indicator.
///
/// Arithmetic mean of close over a trailing window. The first
/// `period - 1` values are undefined.
pub struct Sma {
    period: usize,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    /// Rolling mean over raw values.
    pub(crate) fn rolling_mean(values: &[f64], period: usize) -> Vec<Option<f64>> {
        if period == 0 {
            return vec![None; values.len()];
        }
        (0..values.len())
            .map(|i| {
                if i + 1 < period {
                    return None;
                }
                let window = &values[i + 1 - period..=i];
                defined(window.iter().sum::<f64>() / period as f64)
            })
            .collect()
    }
}

impl Indicator for Sma {
    fn id(&self) -> String {
        format!("sma{}", self.period)
    }

    fn min_periods(&self) -> usize {
        self.period
    }

    fn compute(&self, series: &Series) -> Option<IndicatorValues> {
        if self.period == 0 {
            return None;
        }
        if series.len() < self.min_periods() {
            return Some(IndicatorValues::undefined(series.len()));
        }
        Some(IndicatorValues::new(Self::rolling_mean(
            &series.closes(),
            self.period,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Bar;

    fn create_candles(closes: &[f64]) -> Series {
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Bar {
                time: 1_000_000 + i as i64 * 3600,
                open: close,
                high: close + 1.0,
                low: close - 1.0,
                close,
                volume: Some(1000.0),
            })
            .collect();
        Series::new(bars).unwrap()
    }

    #[test]
    fn test_sma_id() {
        assert_eq!(Sma::new(20).id(), "sma20");
        assert_eq!(Sma::new(50).min_periods(), 50);
    }

    #[test]
    fn test_sma_warmup_undefined() {
        let series = create_candles(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let sma = Sma::new(3).compute(&series).unwrap();
        assert_eq!(sma.len(), 5);
        assert_eq!(sma.get(0), None);
        assert_eq!(sma.get(1), None);
        assert_eq!(sma.get(2), Some(2.0));
        assert_eq!(sma.last(), Some(4.0));
    }

    #[test]
    fn test_sma_zero_window_unavailable() {
        let series = create_candles(&[1.0, 2.0]);
        assert!(Sma::new(0).compute(&series).is_none());
    }

    #[test]
    fn test_sma_series_shorter_than_window() {
        let series = create_candles(&[1.0, 2.0]);
        let sma = Sma::new(5).compute(&series).unwrap();
        assert!(sma.values().iter().all(|v| v.is_none()));
    }
}
