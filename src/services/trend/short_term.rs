//! Four-dashboard short-horizon scorer.
//!
//! The short-term and advanced scorers share this engine and differ only in
//! their [`TrendScorerConfig`]: which sentiment checks run, and where the
//! surge bucket starts.

use crate::config::{SentimentMode, TrendScorerConfig};
use crate::services::patterns::{detect_double_bottom, detect_double_top};
use crate::services::signals::indicators::AverageRange;
use crate::services::signals::{ema, rsi};
use crate::types::{
    MomentumState, Prediction, RiskLevel, SentimentState, Series, TrendScore, TrendState,
    VolatilityState,
};
use tracing::debug;

/// Short-term scorer with its default parameters.
pub fn analyze_short_trend(daily: &Series, h4: &Series, h1: &Series) -> TrendScore {
    score_trend(daily, h4, h1, &TrendScorerConfig::short_term())
}

/// Advanced scorer with its default parameters.
pub fn analyze_advanced_trend(daily: &Series, h4: &Series, h1: &Series) -> TrendScore {
    score_trend(daily, h4, h1, &TrendScorerConfig::advanced())
}

/// Score the daily / 4-hour / 1-hour stack.
///
/// Any empty series yields [`TrendScore::insufficient_data`]. The daily
/// series only gates the call.
pub fn score_trend(
    daily: &Series,
    h4: &Series,
    h1: &Series,
    config: &TrendScorerConfig,
) -> TrendScore {
    if daily.is_empty() {
        return TrendScore::insufficient_data();
    }
    let (Some(h4_close), Some(h1_close)) = (h4.last_close(), h1.last_close()) else {
        return TrendScore::insufficient_data();
    };

    let trend = perfect_order(h4, h4_close, config);
    let momentum = momentum(h1, h1_close, config);
    let (volatility, factor) = volatility(h1, config);
    let sentiment = sentiment(h1, h1_close, config);

    let raw = trend.contribution() + momentum.contribution() + sentiment.contribution();
    let score = raw as f64 * factor;

    let (final_prediction, risk_level) = if score <= config.crash_threshold {
        (Prediction::CrashAcceleration, RiskLevel::Extreme)
    } else if score >= config.surge_threshold {
        (Prediction::SurgeAcceleration, RiskLevel::High)
    } else if score < 0.0 {
        (Prediction::ContinuedDecline, RiskLevel::Medium)
    } else {
        (Prediction::Rebound, RiskLevel::Low)
    };

    debug!(
        "Trend score {} ({:?}, x{}) -> {}",
        score,
        sentiment,
        factor,
        final_prediction.label()
    );

    TrendScore {
        dashboard_1_trend: trend,
        dashboard_2_momentum: momentum,
        dashboard_3_volatility: volatility,
        dashboard_4_sentiment: sentiment,
        score,
        final_prediction,
        risk_level,
        comment: comment(config.sentiment, final_prediction).to_string(),
    }
}

fn perfect_order(h4: &Series, close: f64, config: &TrendScorerConfig) -> TrendState {
    let last = |window| ema(h4, window).and_then(|v| v.last());
    let (Some(fast), Some(mid), Some(slow)) = (
        last(config.ema_fast),
        last(config.ema_mid),
        last(config.ema_slow),
    ) else {
        return TrendState::Mixed;
    };

    if close < fast && fast < mid && mid < slow {
        TrendState::BearishPerfectOrder
    } else if close > fast && fast > mid && mid > slow {
        TrendState::BullishPerfectOrder
    } else {
        TrendState::Mixed
    }
}

fn momentum(h1: &Series, close: f64, config: &TrendScorerConfig) -> MomentumState {
    let Some(average) = ema(h1, config.momentum_ema).and_then(|v| v.last()) else {
        return MomentumState::Calm;
    };
    let distance = (close - average) / average;
    if distance < -config.momentum_threshold {
        MomentumState::StrongDown
    } else if distance > config.momentum_threshold {
        MomentumState::StrongUp
    } else {
        MomentumState::Calm
    }
}

/// Volatility state and the score multiplier it implies.
fn volatility(h1: &Series, config: &TrendScorerConfig) -> (VolatilityState, f64) {
    let recent = AverageRange::new(config.range_recent).recent(h1.bars());
    let baseline = AverageRange::new(config.range_baseline).recent(h1.bars());
    match (recent, baseline) {
        (Some(recent), Some(baseline)) if recent > baseline * config.breakout_ratio => {
            (VolatilityState::Breakout, config.amplification)
        }
        _ => (VolatilityState::Stable, 1.0),
    }
}

fn sentiment(h1: &Series, close: f64, config: &TrendScorerConfig) -> SentimentState {
    let pattern = config.pattern;
    let top = detect_double_top(h1, pattern.threshold, pattern.lookback);

    match config.sentiment {
        SentimentMode::Full => {
            if top.is_formed() {
                return if top.detected {
                    SentimentState::NecklineBreakdown
                } else {
                    SentimentState::NecklineDefense
                };
            }
            let bottom = detect_double_bottom(h1, pattern.threshold, pattern.lookback);
            if bottom.is_formed() {
                return if bottom.detected {
                    SentimentState::NecklineBreakout
                } else {
                    SentimentState::BottomForming
                };
            }
            if let Some(cue) = reversal_cue(h1, close, config) {
                return cue;
            }
        }
        // Only a broken top neckline counts here.
        SentimentMode::BreachOnly => {
            if top.detected {
                return SentimentState::NecklineBreakdown;
            }
        }
    }

    key_levels(h1, close, config)
}

/// Pin-bar, RSI divergence and EMA200 support, strongest first.
fn reversal_cue(h1: &Series, close: f64, config: &TrendScorerConfig) -> Option<SentimentState> {
    let rsi_values = rsi(h1, config.rsi_window);
    let current_rsi = rsi_values.as_ref().and_then(|v| v.last());

    let on_support = ema(h1, config.ema_slow)
        .and_then(|v| v.last())
        .is_some_and(|average| ((close - average) / average).abs() < config.support_band);

    let last = h1.last()?;
    let shadow = last.lower_shadow();
    let is_pinbar = shadow > 0.0 && shadow >= last.body() * config.pinbar_body_ratio;
    if is_pinbar && (current_rsi.is_some_and(|r| r < config.pinbar_rsi) || on_support) {
        return Some(SentimentState::PinBarReversal);
    }

    // Swing low of the recent window, first occurrence.
    let window = h1.tail(config.divergence_lookback);
    let offset = h1.len() - window.len();
    let swing = window
        .iter()
        .enumerate()
        .fold(None::<(usize, f64)>, |best, (i, bar)| match best {
            Some((_, low)) if low <= bar.low => best,
            _ => Some((i, bar.low)),
        });
    if let Some((i, swing_low)) = swing {
        let swing_rsi = rsi_values.as_ref().and_then(|v| v.get(offset + i));
        let diverging = match (current_rsi, swing_rsi) {
            (Some(now), Some(then)) => now >= then + config.divergence_points,
            _ => false,
        };
        if close <= swing_low && diverging {
            return Some(SentimentState::RsiDivergence);
        }
    }

    on_support.then_some(SentimentState::Ema200Support)
}

fn key_levels(h1: &Series, close: f64, config: &TrendScorerConfig) -> SentimentState {
    let window = h1.tail(config.extreme_lookback);
    let low = window.iter().map(|b| b.low).fold(f64::INFINITY, f64::min);
    let high = window.iter().map(|b| b.high).fold(f64::NEG_INFINITY, f64::max);

    if close <= low {
        SentimentState::NewLow
    } else if close >= high {
        SentimentState::NewHigh
    } else {
        SentimentState::Range
    }
}

fn comment(mode: SentimentMode, prediction: Prediction) -> &'static str {
    match (mode, prediction) {
        (SentimentMode::Full, Prediction::CrashAcceleration) => {
            "長期下降トレンド、重要ライン割れ、ボラティリティ拡大が全て揃いました。トレンドの底が見えません。"
        }
        (SentimentMode::Full, Prediction::SurgeAcceleration) => {
            "レジスタンス突破、または強力なサポートからの急反発（V字回復）が発生しています。"
        }
        (SentimentMode::Full, Prediction::ContinuedDecline) => {
            "下落バイアスが強いですが、反発の予兆がないかセンチメント（ピンバー等）を注視してください。"
        }
        (SentimentMode::Full, _) => {
            "買い圧力が優勢です。押し目買いやレンジ下限での反発の好機となる可能性があります。"
        }
        (SentimentMode::BreachOnly, Prediction::CrashAcceleration) => {
            "重要ラインを割り込み、ボラティリティが急増しています。トレンドの底が見えません。"
        }
        (SentimentMode::BreachOnly, Prediction::SurgeAcceleration) => {
            "レジスタンスを突破し、強い上昇モメンタムが発生しています。"
        }
        (SentimentMode::BreachOnly, Prediction::ContinuedDecline) => {
            "下落バイアスが強いですが、本格的な加速にはまだ至っていません。"
        }
        (SentimentMode::BreachOnly, _) => "買い圧力が優勢、またはレンジ下限での反発が見られます。",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Bar;

    fn bar(i: usize, open: f64, high: f64, low: f64, close: f64) -> Bar {
        Bar {
            time: i as i64 * 3600,
            open,
            high,
            low,
            close,
            volume: Some(100.0),
        }
    }

    fn flat_candles(count: usize, price: f64) -> Vec<Bar> {
        (0..count)
            .map(|i| bar(i, price - 0.5, price + 1.0, price - 1.0, price))
            .collect()
    }

    #[test]
    fn test_empty_series_returns_sentinel() {
        let h1 = Series::new(flat_candles(30, 100.0)).unwrap();
        let result = score_trend(&Series::empty(), &h1, &h1, &TrendScorerConfig::short_term());
        assert!(result.is_insufficient());
        assert_eq!(result.final_prediction, Prediction::Wait);
        assert_eq!(result.risk_level, RiskLevel::Medium);
    }

    #[test]
    fn test_flat_market_is_calm_range() {
        let series = Series::new(flat_candles(60, 100.0)).unwrap();
        let result = score_trend(&series, &series, &series, &TrendScorerConfig::short_term());
        assert_eq!(result.dashboard_1_trend, TrendState::Mixed);
        assert_eq!(result.dashboard_2_momentum, MomentumState::Calm);
        assert_eq!(result.dashboard_3_volatility, VolatilityState::Stable);
        // Close sits on EMA200 of a flat series.
        assert_eq!(result.dashboard_4_sentiment, SentimentState::Ema200Support);
        assert_eq!(result.score, 2.0);
        assert_eq!(result.final_prediction, Prediction::Rebound);
        assert_eq!(result.risk_level, RiskLevel::Low);
    }

    #[test]
    fn test_breach_only_skips_support_cue() {
        let series = Series::new(flat_candles(60, 100.0)).unwrap();
        let result = score_trend(&series, &series, &series, &TrendScorerConfig::advanced());
        assert_eq!(result.dashboard_4_sentiment, SentimentState::Range);
        assert_eq!(result.score, 0.0);
        assert_eq!(
            result.comment,
            "買い圧力が優勢、またはレンジ下限での反発が見られます。"
        );
    }

    #[test]
    fn test_range_expansion_amplifies() {
        let mut bars = flat_candles(40, 100.0);
        for (i, b) in bars.iter_mut().enumerate().skip(37) {
            *b = bar(i, 100.0, 110.0, 90.0, 100.0);
        }
        let series = Series::new(bars).unwrap();
        let (state, factor) = volatility(&series, &TrendScorerConfig::short_term());
        assert_eq!(state, VolatilityState::Breakout);
        assert_eq!(factor, 1.5);
    }

    #[test]
    fn test_pinbar_on_support() {
        let mut bars = flat_candles(60, 100.0);
        // Long lower wick, tiny body, close on the flat EMA200.
        bars[59] = bar(59, 100.0, 100.1, 97.0, 100.05);
        let series = Series::new(bars).unwrap();
        assert_eq!(
            reversal_cue(&series, 100.05, &TrendScorerConfig::short_term()),
            Some(SentimentState::PinBarReversal)
        );
    }

    #[test]
    fn test_new_high_and_low() {
        let config = TrendScorerConfig::short_term();
        let series = Series::new(flat_candles(60, 100.0)).unwrap();
        assert_eq!(key_levels(&series, 101.0, &config), SentimentState::NewHigh);
        assert_eq!(key_levels(&series, 99.0, &config), SentimentState::NewLow);
        assert_eq!(key_levels(&series, 100.0, &config), SentimentState::Range);
    }
}
