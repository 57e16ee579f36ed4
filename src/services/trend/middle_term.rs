//! Weekly structure plus daily momentum scorer.

use crate::config::MiddleTrendConfig;
use crate::services::signals::{bollinger_bands, ema, macd_line, rsi, IndicatorValues};
use crate::types::{
    DailyMomentum, MiddleTrendReport, Series, Strategy, VolatilityRegime, WeeklyStructure,
};
use tracing::debug;

/// Score the weekly / daily pair.
///
/// Needs at least one weekly bar and two daily bars (for the MACD slope);
/// otherwise returns [`MiddleTrendReport::insufficient_data`].
pub fn analyze_middle_trend(
    weekly: &Series,
    daily: &Series,
    config: &MiddleTrendConfig,
) -> MiddleTrendReport {
    let (Some(weekly_close), true) = (weekly.last_close(), daily.len() >= 2) else {
        return MiddleTrendReport::insufficient_data();
    };

    let weekly_structure = weekly_structure(weekly, weekly_close, config);

    let oversold = rsi(daily, config.rsi_window)
        .and_then(|v| v.last())
        .is_some_and(|r| r < config.oversold);
    let daily_momentum = daily_momentum(daily, oversold, config);
    let volatility = volatility_regime(daily, config);

    let strategy = if weekly_structure.is_uptrend_intact() {
        if daily_momentum.is_declining() {
            if oversold {
                Strategy::DipBuy
            } else {
                Strategy::WaitForBottom
            }
        } else if volatility == VolatilityRegime::HighVolatility {
            Strategy::CautiousTrendFollow
        } else {
            Strategy::Hold
        }
    } else if oversold {
        Strategy::ReboundPlay
    } else {
        Strategy::StandAside
    };

    debug!(
        "Middle trend: {:?} / {:?} / {:?} -> {:?}",
        weekly_structure, daily_momentum, volatility, strategy
    );

    MiddleTrendReport {
        dashboard_1_weekly: weekly_structure,
        dashboard_2_daily: daily_momentum,
        dashboard_3_volatility: volatility,
        dashboard_4_strategy: strategy,
        final_prediction: strategy.narrative().to_string(),
    }
}

fn weekly_structure(weekly: &Series, close: f64, config: &MiddleTrendConfig) -> WeeklyStructure {
    let last = |window| ema(weekly, window).and_then(|v| v.last());
    match (
        last(config.weekly_fast),
        last(config.weekly_mid),
        last(config.weekly_slow),
    ) {
        (Some(fast), Some(mid), Some(slow)) if fast > mid && mid > slow => {
            if close > fast {
                WeeklyStructure::StableUptrend
            } else if close > slow {
                WeeklyStructure::PullbackInUptrend
            } else {
                WeeklyStructure::TrendBreaking
            }
        }
        _ => WeeklyStructure::RangeOrDowntrend,
    }
}

fn daily_momentum(daily: &Series, oversold: bool, config: &MiddleTrendConfig) -> DailyMomentum {
    let macd = macd_line(daily, config.macd_fast, config.macd_slow);
    let (Some(current), Some(previous)) = (
        macd.as_ref().and_then(|m| m.last()),
        macd.as_ref().and_then(|m| m.previous()),
    ) else {
        return DailyMomentum::Unknown;
    };

    if current < previous {
        if oversold {
            DailyMomentum::OverheatedDecline
        } else {
            DailyMomentum::StrongSellingPressure
        }
    } else if current > 0.0 {
        DailyMomentum::StableUpMomentum
    } else {
        DailyMomentum::RecoverySigns
    }
}

/// Current bandwidth against its own trailing mean. Too little history to
/// compare reads as a normal regime.
fn volatility_regime(daily: &Series, config: &MiddleTrendConfig) -> VolatilityRegime {
    let Some(bands) = bollinger_bands(daily, config.bollinger_window, config.bollinger_std) else {
        return VolatilityRegime::Normal;
    };
    let bandwidth = bands.bandwidth();
    let (Some(current), Some(average)) = (
        bandwidth.last(),
        trailing_mean(&bandwidth, config.bandwidth_mean_window),
    ) else {
        return VolatilityRegime::Normal;
    };

    if current > average * config.high_volatility_ratio {
        VolatilityRegime::HighVolatility
    } else if current < average * config.squeeze_ratio {
        VolatilityRegime::Squeeze
    } else {
        VolatilityRegime::Normal
    }
}

/// Mean of the last `window` values; undefined if any of them is.
fn trailing_mean(values: &IndicatorValues, window: usize) -> Option<f64> {
    if window == 0 || values.len() < window {
        return None;
    }
    let tail = &values.values()[values.len() - window..];
    let sum = tail.iter().try_fold(0.0, |acc, v| v.map(|v| acc + v))?;
    Some(sum / window as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Bar;

    fn create_candles(closes: impl Iterator<Item = f64>, step: i64) -> Series {
        let bars = closes
            .enumerate()
            .map(|(i, close)| Bar {
                time: i as i64 * step,
                open: close,
                high: close + 1.0,
                low: close - 1.0,
                close,
                volume: None,
            })
            .collect();
        Series::new(bars).unwrap()
    }

    #[test]
    fn test_insufficient_inputs() {
        let weekly = create_candles((0..60).map(|i| 100.0 + i as f64), 604800);
        let daily = create_candles(std::iter::once(100.0), 86400);
        let report = analyze_middle_trend(&weekly, &daily, &MiddleTrendConfig::default());
        assert_eq!(report, MiddleTrendReport::insufficient_data());

        let report =
            analyze_middle_trend(&Series::empty(), &weekly, &MiddleTrendConfig::default());
        assert_eq!(report.dashboard_4_strategy, Strategy::Wait);
    }

    #[test]
    fn test_steady_uptrend_holds() {
        let weekly = create_candles((0..80).map(|i| 100.0 + i as f64 * 2.0), 604800);
        let daily = create_candles((0..80).map(|i| 100.0 + i as f64), 86400);
        let report = analyze_middle_trend(&weekly, &daily, &MiddleTrendConfig::default());
        assert_eq!(report.dashboard_1_weekly, WeeklyStructure::StableUptrend);
        assert_eq!(report.dashboard_2_daily, DailyMomentum::StableUpMomentum);
        assert_eq!(report.dashboard_4_strategy, Strategy::Hold);
        assert_eq!(report.final_prediction, Strategy::Hold.narrative());
    }

    #[test]
    fn test_broken_weekly_with_oversold_daily() {
        let weekly = create_candles((0..80).map(|i| 300.0 - i as f64), 604800);
        let daily = create_candles((0..80).map(|i| 300.0 - i as f64 * 2.0), 86400);
        let report = analyze_middle_trend(&weekly, &daily, &MiddleTrendConfig::default());
        assert_eq!(report.dashboard_1_weekly, WeeklyStructure::RangeOrDowntrend);
        assert_eq!(report.dashboard_4_strategy, Strategy::ReboundPlay);
    }

    #[test]
    fn test_short_daily_history_reads_normal() {
        let daily = create_candles((0..10).map(|i| 100.0 + i as f64), 86400);
        assert_eq!(
            volatility_regime(&daily, &MiddleTrendConfig::default()),
            VolatilityRegime::Normal
        );

        let report = analyze_middle_trend(&daily, &daily, &MiddleTrendConfig::default());
        assert_eq!(report.dashboard_3_volatility, VolatilityRegime::Normal);
    }

    #[test]
    fn test_trailing_mean() {
        let values = IndicatorValues::new(vec![None, Some(1.0), Some(3.0)]);
        assert_eq!(trailing_mean(&values, 2), Some(2.0));
        assert_eq!(trailing_mean(&values, 3), None);
    }
}
