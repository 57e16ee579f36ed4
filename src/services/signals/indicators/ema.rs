//! Exponential Moving Average (EMA) indicator.

use crate::services::signals::{defined, Indicator, IndicatorValues};
use crate::types::Series;

/// EMA (Exponential Moving Average) indicator.
///
/// Smoothing factor `2 / (period + 1)`, seeded with the first close and
/// without warm-up bias correction, so every bar has a value.
pub struct Ema {
    period: usize,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    /// EMA over raw values.
    pub(crate) fn calculate_ema(values: &[f64], period: usize) -> Vec<Option<f64>> {
        let multiplier = 2.0 / (period as f64 + 1.0);
        let mut out = Vec::with_capacity(values.len());
        let mut ema: Option<f64> = None;

        for &value in values {
            let next = match ema {
                None => value,
                Some(prev) => (value - prev) * multiplier + prev,
            };
            ema = Some(next);
            out.push(defined(next));
        }

        out
    }
}

impl Indicator for Ema {
    fn id(&self) -> String {
        format!("ema{}", self.period)
    }

    fn min_periods(&self) -> usize {
        1
    }

    fn compute(&self, series: &Series) -> Option<IndicatorValues> {
        if self.period == 0 {
            return None;
        }
        Some(IndicatorValues::new(Self::calculate_ema(
            &series.closes(),
            self.period,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ema_seeded_with_first_value() {
        let ema = Ema::calculate_ema(&[10.0, 20.0], 3);
        assert_eq!(ema[0], Some(10.0));
        // alpha = 0.5
        assert_eq!(ema[1], Some(15.0));
    }

    #[test]
    fn test_ema_defined_everywhere() {
        let values: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
        let ema = Ema::calculate_ema(&values, 200);
        assert!(ema.iter().all(|v| v.is_some()));
    }

    #[test]
    fn test_ema_constant_series() {
        let ema = Ema::calculate_ema(&[5.0; 10], 4);
        assert!(ema.iter().all(|v| (v.unwrap() - 5.0).abs() < 1e-12));
    }
}
