//! Per-bar buy/sell/wait labels from SMA crossovers and RSI extremes.

use super::indicators::{rsi, sma};
use super::IndicatorValues;
use crate::config::EntryConfig;
use crate::types::{EntrySignal, Series};

/// Precomputed indicator columns, aligned with the series they came from.
///
/// Any missing column disables the rule that needs it.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntryColumns<'a> {
    pub sma_fast: Option<&'a IndicatorValues>,
    pub sma_slow: Option<&'a IndicatorValues>,
    pub rsi: Option<&'a IndicatorValues>,
}

/// Label every bar.
///
/// A crossover of the fast SMA through the slow one wins: golden cross buys,
/// dead cross sells. Bars without a crossover fall back to RSI extremes.
pub fn determine_entry_signals(
    len: usize,
    columns: EntryColumns<'_>,
    oversold: f64,
    overbought: f64,
) -> Vec<EntrySignal> {
    (0..len)
        .map(|i| {
            if let Some(signal) = crossover_at(&columns, i) {
                return signal;
            }
            match columns.rsi.and_then(|r| r.get(i)) {
                Some(value) if value < oversold => EntrySignal::Buy,
                Some(value) if value > overbought => EntrySignal::Sell,
                _ => EntrySignal::Wait,
            }
        })
        .collect()
}

fn crossover_at(columns: &EntryColumns<'_>, i: usize) -> Option<EntrySignal> {
    if i == 0 {
        return None;
    }
    let (fast, slow) = (columns.sma_fast?, columns.sma_slow?);
    let (prev_fast, prev_slow) = (fast.get(i - 1)?, slow.get(i - 1)?);
    let (cur_fast, cur_slow) = (fast.get(i)?, slow.get(i)?);

    if prev_fast < prev_slow && cur_fast > cur_slow {
        Some(EntrySignal::Buy)
    } else if prev_fast > prev_slow && cur_fast < cur_slow {
        Some(EntrySignal::Sell)
    } else {
        None
    }
}

/// Compute the columns from `series` and label every bar.
pub fn entry_signals_for(series: &Series, config: &EntryConfig) -> Vec<EntrySignal> {
    let fast = sma(series, config.sma_fast);
    let slow = sma(series, config.sma_slow);
    let rsi = rsi(series, config.rsi_window);
    let columns = EntryColumns {
        sma_fast: fast.as_ref(),
        sma_slow: slow.as_ref(),
        rsi: rsi.as_ref(),
    };
    determine_entry_signals(series.len(), columns, config.oversold, config.overbought)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(v: &[Option<f64>]) -> IndicatorValues {
        IndicatorValues::new(v.to_vec())
    }

    #[test]
    fn test_golden_and_dead_cross() {
        let fast = values(&[Some(1.0), Some(3.0), Some(3.0), Some(1.0)]);
        let slow = values(&[Some(2.0), Some(2.0), Some(2.0), Some(2.0)]);
        let signals = determine_entry_signals(
            4,
            EntryColumns {
                sma_fast: Some(&fast),
                sma_slow: Some(&slow),
                rsi: None,
            },
            30.0,
            70.0,
        );
        assert_eq!(
            signals,
            vec![
                EntrySignal::Wait,
                EntrySignal::Buy,
                EntrySignal::Wait,
                EntrySignal::Sell
            ]
        );
    }

    #[test]
    fn test_crossover_beats_rsi() {
        let fast = values(&[Some(1.0), Some(3.0)]);
        let slow = values(&[Some(2.0), Some(2.0)]);
        let rsi = values(&[Some(50.0), Some(85.0)]);
        let signals = determine_entry_signals(
            2,
            EntryColumns {
                sma_fast: Some(&fast),
                sma_slow: Some(&slow),
                rsi: Some(&rsi),
            },
            30.0,
            70.0,
        );
        assert_eq!(signals[1], EntrySignal::Buy);
    }

    #[test]
    fn test_rsi_extremes_without_crossover() {
        let rsi = values(&[Some(25.0), None, Some(75.0), Some(50.0)]);
        let signals = determine_entry_signals(
            4,
            EntryColumns {
                rsi: Some(&rsi),
                ..Default::default()
            },
            30.0,
            70.0,
        );
        assert_eq!(
            signals,
            vec![
                EntrySignal::Buy,
                EntrySignal::Wait,
                EntrySignal::Sell,
                EntrySignal::Wait
            ]
        );
    }
}
