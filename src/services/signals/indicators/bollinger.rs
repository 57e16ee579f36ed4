//! Bollinger Bands indicator.

use super::sma::Sma;
use crate::services::signals::{defined, Indicator, IndicatorValues};
use crate::types::Series;
use serde::Serialize;

/// Bollinger Bands indicator.
///
/// Consists of:
/// - Middle band: SMA(period)
/// - Upper band: SMA + k * StdDev
/// - Lower band: SMA - k * StdDev
///
/// StdDev is the trailing sample standard deviation of close. The
/// indicator value is the bandwidth `(upper - lower) / middle`, which the
/// volatility-regime dashboard compares against its own rolling mean.
pub struct BollingerBands {
    period: usize,
    std_dev_multiplier: f64,
}

impl Default for BollingerBands {
    fn default() -> Self {
        Self {
            period: 20,
            std_dev_multiplier: 2.0,
        }
    }
}

/// Middle, upper and lower bands.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BollingerOutput {
    pub middle: IndicatorValues,
    pub upper: IndicatorValues,
    pub lower: IndicatorValues,
}

impl BollingerOutput {
    /// `(upper - lower) / middle` per bar.
    pub fn bandwidth(&self) -> IndicatorValues {
        let values = (0..self.middle.len())
            .map(|i| {
                match (self.upper.get(i), self.lower.get(i), self.middle.get(i)) {
                    (Some(u), Some(l), Some(m)) if m != 0.0 => defined((u - l) / m),
                    _ => None,
                }
            })
            .collect();
        IndicatorValues::new(values)
    }
}

impl BollingerBands {
    pub fn new(period: usize, std_dev_multiplier: f64) -> Self {
        Self {
            period,
            std_dev_multiplier,
        }
    }

    /// Sample standard deviation (n - 1 denominator).
    fn std_dev(values: &[f64], mean: f64) -> Option<f64> {
        if values.len() < 2 {
            return None;
        }
        let variance: f64 =
            values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
        defined(variance.sqrt())
    }

    /// All three bands, or `None` for a zero window.
    pub fn bands(&self, series: &Series) -> Option<BollingerOutput> {
        if self.period == 0 {
            return None;
        }

        let closes = series.closes();
        let middle = Sma::rolling_mean(&closes, self.period);
        let mut upper = Vec::with_capacity(closes.len());
        let mut lower = Vec::with_capacity(closes.len());

        for (i, mean) in middle.iter().enumerate() {
            let band = mean.and_then(|mean| {
                let window = &closes[i + 1 - self.period..=i];
                Self::std_dev(window, mean).map(|sd| (mean, sd))
            });
            match band {
                Some((mean, sd)) => {
                    upper.push(defined(mean + self.std_dev_multiplier * sd));
                    lower.push(defined(mean - self.std_dev_multiplier * sd));
                }
                None => {
                    upper.push(None);
                    lower.push(None);
                }
            }
        }

        Some(BollingerOutput {
            middle: IndicatorValues::new(middle),
            upper: IndicatorValues::new(upper),
            lower: IndicatorValues::new(lower),
        })
    }
}

impl Indicator for BollingerBands {
    fn id(&self) -> String {
        format!("bbw{}", self.period)
    }

    fn min_periods(&self) -> usize {
        self.period
    }

    fn compute(&self, series: &Series) -> Option<IndicatorValues> {
        self.bands(series).map(|bands| bands.bandwidth())
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
                time: i as i64 * 86400,
                open: close,
                high: close,
                low: close,
                close,
                volume: None,
            })
            .collect();
        Series::new(bars).unwrap()
    }

    #[test]
    fn test_bands_bracket_middle() {
        let closes: Vec<f64> = (0..40).map(|i| 100.0 + (i as f64 * 0.7).sin() * 3.0).collect();
        let bands = BollingerBands::default().bands(&create_candles(&closes)).unwrap();
        for i in 19..40 {
            let (u, m, l) = (
                bands.upper.get(i).unwrap(),
                bands.middle.get(i).unwrap(),
                bands.lower.get(i).unwrap(),
            );
            assert!(u >= m && m >= l);
        }
        assert!(bands.upper.get(18).is_none());
    }

    #[test]
    fn test_sample_std_dev() {
        // mean 3, sample variance 2.5
        let bands = BollingerBands::new(5, 1.0)
            .bands(&create_candles(&[1.0, 2.0, 3.0, 4.0, 5.0]))
            .unwrap();
        let upper = bands.upper.last().unwrap();
        assert!((upper - (3.0 + 2.5f64.sqrt())).abs() < 1e-9);
    }

    #[test]
    fn test_flat_series_zero_bandwidth() {
        let bands = BollingerBands::default().bands(&create_candles(&[50.0; 25])).unwrap();
        assert_eq!(bands.bandwidth().last(), Some(0.0));
    }
}
