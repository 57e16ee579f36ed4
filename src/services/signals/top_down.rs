//! Daily-trend plus hourly-state classifier.

use super::indicators::{rsi, sma};
use crate::config::TopDownConfig;
use crate::types::{DailyTrend, HourlyTrend, Series, TopDownAction, TopDownReport};

const NO_DATA: &str = "データがありません。";
const NO_DIRECTION: &str = "明確な方向感が出るまで待機推奨。";

/// Combine the daily SMA structure with the hourly close and RSI.
///
/// Undefined indicator values never satisfy a comparison, so a short
/// history lands in the range / wait branches.
pub fn analyze_top_down(daily: &Series, hourly: &Series, config: &TopDownConfig) -> TopDownReport {
    let (Some(daily_close), Some(hourly_close)) = (daily.last_close(), hourly.last_close()) else {
        return TopDownReport {
            signal: TopDownAction::Wait,
            prediction: NO_DATA.to_string(),
            daily_trend: DailyTrend::Unknown,
            hourly_trend: HourlyTrend::Unknown,
            hourly_rsi: None,
        };
    };

    let daily_fast = sma(daily, config.sma_fast).and_then(|v| v.last());
    let daily_slow = sma(daily, config.sma_slow).and_then(|v| v.last());
    let daily_trend = match (daily_fast, daily_slow) {
        (Some(fast), Some(slow)) if daily_close > fast && fast > slow => DailyTrend::Up,
        (Some(fast), Some(slow)) if daily_close < fast && fast < slow => DailyTrend::Down,
        _ => DailyTrend::Range,
    };

    let hourly_rsi = rsi(hourly, config.rsi_window).and_then(|v| v.last());
    let hourly_trend = match sma(hourly, config.sma_fast).and_then(|v| v.last()) {
        Some(fast) if hourly_close > fast => HourlyTrend::ShortUp,
        Some(fast) if hourly_close < fast => HourlyTrend::ShortDown,
        _ => HourlyTrend::Range,
    };

    let (signal, prediction) = match (daily_trend, hourly_trend) {
        (DailyTrend::Up, HourlyTrend::ShortUp) => {
            if hourly_rsi.is_some_and(|r| r < config.overbought) {
                (
                    TopDownAction::StrongBuy,
                    "長期・短期共に上昇トレンド。押し目買いの好機。直近高値を目指す展開を予想。",
                )
            } else {
                (
                    TopDownAction::BuyOnDip,
                    "トレンドは強いが短期的に過熱感あり。少し調整が入ったところを狙いたい。",
                )
            }
        }
        (DailyTrend::Down, HourlyTrend::ShortDown) => {
            if hourly_rsi.is_some_and(|r| r > config.oversold) {
                (
                    TopDownAction::StrongSell,
                    "長期・短期共に下降トレンド。戻り売り優勢。直近安値を更新する展開を予想。",
                )
            } else {
                (
                    TopDownAction::SellOnRally,
                    "下落トレンド継続中だが、短期的に売られすぎ。一時的な反発に注意。",
                )
            }
        }
        (DailyTrend::Up, HourlyTrend::ShortDown) => (
            TopDownAction::Wait,
            "長期的には上昇だが、短期的には調整局面。サポートラインでの反発を確認できれば買い。",
        ),
        (DailyTrend::Down, HourlyTrend::ShortUp) => (
            TopDownAction::Wait,
            "長期的には下降だが、短期的には反発局面。レジスタンスラインでの反落を確認できれば売り。",
        ),
        _ => (TopDownAction::Wait, NO_DIRECTION),
    };

    TopDownReport {
        signal,
        prediction: prediction.to_string(),
        daily_trend,
        hourly_trend,
        hourly_rsi,
    }
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
    fn test_empty_input_waits() {
        let daily = create_candles((0..60).map(|i| 100.0 + i as f64), 86400);
        let report = analyze_top_down(&daily, &Series::empty(), &TopDownConfig::default());
        assert_eq!(report.signal, TopDownAction::Wait);
        assert_eq!(report.prediction, NO_DATA);
        assert_eq!(report.daily_trend, DailyTrend::Unknown);
        assert_eq!(report.hourly_trend, HourlyTrend::Unknown);
    }

    #[test]
    fn test_overbought_uptrend_waits_for_dip() {
        // Monotonic rise: RSI saturates at 100.
        let daily = create_candles((0..60).map(|i| 100.0 + i as f64), 86400);
        let hourly = create_candles((0..40).map(|i| 100.0 + i as f64 * 0.5), 3600);
        let report = analyze_top_down(&daily, &hourly, &TopDownConfig::default());
        assert_eq!(report.daily_trend, DailyTrend::Up);
        assert_eq!(report.hourly_trend, HourlyTrend::ShortUp);
        assert_eq!(report.signal, TopDownAction::BuyOnDip);
    }

    #[test]
    fn test_downtrend_with_short_rebound() {
        let daily = create_candles((0..60).map(|i| 200.0 - i as f64), 86400);
        let hourly = create_candles(
            (0..40).map(|i| if i < 30 { 150.0 - i as f64 } else { 120.0 + (i - 30) as f64 * 3.0 }),
            3600,
        );
        let report = analyze_top_down(&daily, &hourly, &TopDownConfig::default());
        assert_eq!(report.daily_trend, DailyTrend::Down);
        assert_eq!(report.hourly_trend, HourlyTrend::ShortUp);
        assert_eq!(report.signal, TopDownAction::Wait);
        assert!(report.prediction.contains("反発局面"));
    }

    #[test]
    fn test_short_history_is_range() {
        let daily = create_candles((0..10).map(|i| 100.0 + i as f64), 86400);
        let hourly = create_candles((0..10).map(|i| 100.0 + i as f64), 3600);
        let report = analyze_top_down(&daily, &hourly, &TopDownConfig::default());
        assert_eq!(report.daily_trend, DailyTrend::Range);
        assert_eq!(report.hourly_trend, HourlyTrend::Range);
        assert_eq!(report.prediction, NO_DIRECTION);
    }
}
