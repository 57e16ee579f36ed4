//! Double-top / double-bottom detection on closing prices.
//!
//! Both detectors run the same pass: find the two most recent extremes in
//! the lookback window, require them to match within `threshold`, take the
//! opposite extreme between them as the neckline, and fire only once the
//! current close has crossed it.

mod double_bottom;
mod double_top;
pub mod peaks;

pub use double_bottom::detect_double_bottom;
pub use double_top::detect_double_top;

use crate::types::{Bar, Series};

/// Minimum bar separation between two extremes.
pub const MIN_PEAK_DISTANCE: usize = 10;

/// Minimum prominence of an extreme, in price units.
pub const MIN_PROMINENCE: f64 = 5.0;

/// Which side of the price the extremes are searched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Peaks,
    Troughs,
}

#[derive(Debug, Clone, PartialEq)]
enum PairSearch {
    Insufficient,
    Diverge {
        first: f64,
        second: f64,
        diff_ratio: f64,
    },
    Matched {
        first: f64,
        second: f64,
        neckline: f64,
    },
}

/// Closes of the last `lookback` bars; zero means no limit.
fn window_closes(series: &Series, lookback: usize) -> Vec<f64> {
    let bars = if lookback == 0 {
        series.bars()
    } else {
        series.tail(lookback)
    };
    bars.iter().map(|b: &Bar| b.close).collect()
}

fn search_pair(prices: &[f64], side: Side, threshold: f64) -> PairSearch {
    let found = match side {
        Side::Peaks => peaks::find_peaks(prices, MIN_PEAK_DISTANCE, MIN_PROMINENCE),
        Side::Troughs => {
            let inverted: Vec<f64> = prices.iter().map(|p| -p).collect();
            peaks::find_peaks(&inverted, MIN_PEAK_DISTANCE, MIN_PROMINENCE)
        }
    };

    let &[.., first_idx, second_idx] = found.as_slice() else {
        return PairSearch::Insufficient;
    };
    let (first, second) = (prices[first_idx], prices[second_idx]);

    let diff_ratio = (first - second).abs() / first;
    if diff_ratio > threshold {
        return PairSearch::Diverge {
            first,
            second,
            diff_ratio,
        };
    }

    let between = &prices[first_idx..second_idx];
    let neckline = match side {
        Side::Peaks => between.iter().copied().fold(f64::INFINITY, f64::min),
        Side::Troughs => between.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    };

    PairSearch::Matched {
        first,
        second,
        neckline,
    }
}

/// `0.0123` as `"1.23%"`.
fn format_ratio_pct(ratio: f64) -> String {
    format!("{:.2}%", ratio * 100.0)
}
