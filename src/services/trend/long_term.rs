//! Monthly cross-asset scorer.

use crate::config::LongTrendConfig;
use crate::services::signals::ema;
use crate::types::{
    Allocation, CurrencyTrend, LongTrendReport, MacroView, MetalTrend, RatioReadings,
    SecondaryValuation, Series, TertiaryValuation,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Monthly series that accompany the primary metal. Any may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroPeers {
    /// Secondary metal (silver).
    #[serde(default)]
    pub silver: Option<Series>,
    /// Tertiary metal (platinum).
    #[serde(default)]
    pub platinum: Option<Series>,
    /// Currency-strength index.
    #[serde(default)]
    pub dxy: Option<Series>,
    /// Inflation-protected bond proxy.
    #[serde(default)]
    pub tips: Option<Series>,
}

/// Last close of a peer series, if it has one.
fn peer_close(series: &Option<Series>) -> Option<(&Series, f64)> {
    let series = series.as_ref()?;
    series.last_close().map(|close| (series, close))
}

fn last_ema(series: &Series, window: usize) -> Option<f64> {
    ema(series, window).and_then(|v| v.last())
}

/// Score the monthly metal trend together with the macro peers.
///
/// An empty `gold` series yields [`LongTrendReport::insufficient_data`].
/// A missing peer adds nothing to the portfolio score.
pub fn analyze_long_trend(
    gold: &Series,
    peers: &MacroPeers,
    config: &LongTrendConfig,
) -> LongTrendReport {
    let Some(close) = gold.last_close() else {
        return LongTrendReport::insufficient_data();
    };

    let metal_trend = match (
        last_ema(gold, config.ema_fast),
        last_ema(gold, config.ema_slow),
    ) {
        (Some(fast), Some(slow)) if close > fast && fast > slow => MetalTrend::LongTermUptrend,
        (Some(fast), Some(slow)) if close < fast && fast < slow => MetalTrend::Correction,
        _ => MetalTrend::Neutral,
    };

    let currency_trend = match peer_close(&peers.dxy) {
        Some((dxy, dxy_close)) => match last_ema(dxy, config.currency_ema) {
            Some(average) if dxy_close < average => CurrencyTrend::WeakCurrency,
            _ => CurrencyTrend::StrongCurrency,
        },
        None => CurrencyTrend::Unknown,
    };

    let ratios = RatioReadings {
        secondary: peer_close(&peers.silver).map(|(_, silver)| {
            let gsr = close / silver;
            let valuation = if gsr > config.secondary_cheap {
                SecondaryValuation::HistoricallyCheap
            } else if gsr < config.secondary_rich {
                SecondaryValuation::RichlyValued
            } else {
                SecondaryValuation::Fair
            };
            (valuation, gsr)
        }),
        tertiary: peer_close(&peers.platinum).map(|(_, platinum)| {
            let gpr = close / platinum;
            let valuation = if gpr > config.tertiary_deep_discount {
                TertiaryValuation::DeepDiscount
            } else if gpr > config.tertiary_cheap {
                TertiaryValuation::Cheap
            } else {
                TertiaryValuation::Expensive
            };
            (valuation, gpr)
        }),
    };

    let macro_view = match peer_close(&peers.tips) {
        Some((tips, tips_close)) => match last_ema(tips, config.bond_ema) {
            Some(average) if tips_close > average => MacroView::FallingRealYields,
            _ => MacroView::RisingRealYields,
        },
        None => MacroView::Neutral,
    };

    let mut score = 0;
    if metal_trend == MetalTrend::LongTermUptrend {
        score += 2;
    }
    if currency_trend == CurrencyTrend::WeakCurrency {
        score += 1;
    }
    if ratios.any_cheap() {
        score += 1;
    }
    if macro_view == MacroView::FallingRealYields {
        score += 2;
    }
    let allocation = Allocation::from_score(score);

    debug!("Long trend portfolio score {} -> {:?}", score, allocation);

    LongTrendReport {
        dashboard_1_currency: format!("{} / {}", metal_trend.label(), currency_trend.label()),
        dashboard_2_ratio: ratios.summary(),
        dashboard_3_macro: macro_view,
        dashboard_4_portfolio: allocation,
        final_prediction: allocation.narrative().to_string(),
        metal_trend: Some(metal_trend),
        currency_trend: Some(currency_trend),
        ratios: Some(ratios),
        portfolio_score: score,
    }
}
