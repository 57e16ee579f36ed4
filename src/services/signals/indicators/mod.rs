//! Technical indicator implementations.

pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod range;
pub mod rsi;
pub mod sma;

pub use bollinger::{BollingerBands, BollingerOutput};
pub use ema::Ema;
pub use macd::Macd;
pub use range::AverageRange;
pub use rsi::Rsi;
pub use sma::Sma;

use super::{Indicator, IndicatorValues};
use crate::types::Series;
use tracing::trace;

fn column(indicator: impl Indicator, series: &Series) -> Option<IndicatorValues> {
    if series.len() < indicator.min_periods() {
        trace!(
            "{} needs {} bars, series has {}",
            indicator.id(),
            indicator.min_periods(),
            series.len()
        );
    }
    indicator.compute(series)
}

/// Simple moving average of close.
pub fn sma(series: &Series, window: usize) -> Option<IndicatorValues> {
    column(Sma::new(window), series)
}

/// Exponential moving average of close.
pub fn ema(series: &Series, window: usize) -> Option<IndicatorValues> {
    column(Ema::new(window), series)
}

/// Relative strength index of close.
pub fn rsi(series: &Series, window: usize) -> Option<IndicatorValues> {
    column(Rsi::new(window), series)
}

/// Bollinger bands of close.
pub fn bollinger_bands(series: &Series, window: usize, num_std: f64) -> Option<BollingerOutput> {
    BollingerBands::new(window, num_std).bands(series)
}

/// Fast EMA minus slow EMA.
pub fn macd_line(series: &Series, fast: usize, slow: usize) -> Option<IndicatorValues> {
    column(Macd::new(fast, slow), series)
}
