//! Technical indicators and the single-series classifiers built on them.

pub mod entry;
pub mod indicators;
pub mod top_down;

pub use entry::{determine_entry_signals, entry_signals_for, EntryColumns};
pub use indicators::{bollinger_bands, ema, macd_line, rsi, sma, BollingerOutput};
pub use top_down::analyze_top_down;

use crate::types::Series;
use serde::Serialize;

/// Trait for per-bar indicators over a series.
pub trait Indicator {
    /// Unique identifier, e.g. `ema20`.
    fn id(&self) -> String;

    /// Bars needed before the first defined value.
    fn min_periods(&self) -> usize;

    /// One value per bar; `None` if the indicator is unavailable for these
    /// parameters.
    fn compute(&self, series: &Series) -> Option<IndicatorValues>;
}

/// Indicator output aligned 1:1 with the bars of its series.
///
/// Entries are `None` until enough history has accumulated.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct IndicatorValues {
    values: Vec<Option<f64>>,
}

impl IndicatorValues {
    pub fn new(values: Vec<Option<f64>>) -> Self {
        Self { values }
    }

    /// A column of `len` undefined values.
    pub fn undefined(len: usize) -> Self {
        Self {
            values: vec![None; len],
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied().flatten()
    }

    /// Value at the latest bar.
    pub fn last(&self) -> Option<f64> {
        self.values.last().copied().flatten()
    }

    /// Value one bar before the latest.
    pub fn previous(&self) -> Option<f64> {
        let n = self.values.len();
        if n < 2 {
            return None;
        }
        self.values[n - 2]
    }

    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    /// Element-wise `self - other`, defined where both sides are.
    pub fn minus(&self, other: &IndicatorValues) -> IndicatorValues {
        let values = self
            .values
            .iter()
            .zip(other.values.iter())
            .map(|(a, b)| match (a, b) {
                (Some(a), Some(b)) => Some(a - b),
                _ => None,
            })
            .collect();
        IndicatorValues { values }
    }
}

/// Keep finite values only.
pub(crate) fn defined(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}
