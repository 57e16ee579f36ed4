//! Double-top / double-bottom detection over hourly closes

use metal_analyzer::services::{detect_double_bottom, detect_double_top};
use metal_analyzer::types::*;

/// Piecewise-linear closes through `(bar, price)` anchors.
fn path(anchors: &[(usize, f64)]) -> Vec<f64> {
    let mut closes = Vec::new();
    for pair in anchors.windows(2) {
        let ((i0, p0), (i1, p1)) = (pair[0], pair[1]);
        for i in i0..i1 {
            let t = (i - i0) as f64 / (i1 - i0) as f64;
            closes.push(p0 + (p1 - p0) * t);
        }
    }
    if let Some(&(_, last)) = anchors.last() {
        closes.push(last);
    }
    closes
}

fn hourly(closes: &[f64]) -> Series {
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| Bar {
            time: 1_700_000_000 + i as i64 * 3600,
            open: close,
            high: close + 2.0,
            low: close - 2.0,
            close,
            volume: Some(1000.0),
        })
        .collect();
    Series::new(bars).unwrap()
}

#[test]
fn test_double_top_confirmed() {
    let closes = path(&[(0, 2450.0), (40, 2500.0), (65, 2400.0), (90, 2510.0), (119, 2390.0)]);
    assert_eq!(closes.len(), 120);

    let result = detect_double_top(&hourly(&closes), 0.03, 100);
    assert!(result.detected);
    assert_eq!(result.status, PatternStatus::Confirmed);
    assert_eq!(result.first_extreme, Some(2500.0));
    assert_eq!(result.second_extreme, Some(2510.0));
    assert_eq!(result.neckline, Some(2400.0));
    assert!(result.narrative.contains("2500.00"));
    assert!(result.narrative.contains("2510.00"));
    assert!(result.narrative.contains("2400.00"));
}

#[test]
fn test_double_top_forming_above_neckline() {
    let closes = path(&[(0, 2450.0), (40, 2500.0), (65, 2400.0), (90, 2510.0), (119, 2410.0)]);

    let result = detect_double_top(&hourly(&closes), 0.03, 100);
    assert!(!result.detected);
    assert_eq!(result.status, PatternStatus::Forming);
    assert!(result.is_formed());
    assert!(result.narrative.contains("ネックライン: 2400.00"));
    assert!(result.narrative.contains("現在値: 2410.00"));
}

#[test]
fn test_double_top_threshold_rejects_uneven_peaks() {
    let closes = path(&[(0, 2450.0), (40, 2500.0), (65, 2400.0), (90, 2510.0), (119, 2390.0)]);

    // 10 / 2500 = 0.4% apart
    let result = detect_double_top(&hourly(&closes), 0.001, 100);
    assert!(!result.detected);
    assert!(matches!(
        result.status,
        PatternStatus::ExtremesDiverge { .. }
    ));
    assert!(result.narrative.contains("0.40%"));
}

#[test]
fn test_double_bottom_confirmed() {
    let closes = path(&[(0, 2450.0), (40, 2400.0), (65, 2500.0), (90, 2390.0), (119, 2510.0)]);

    let result = detect_double_bottom(&hourly(&closes), 0.03, 100);
    assert!(result.detected);
    assert_eq!(result.status, PatternStatus::Confirmed);
    assert_eq!(result.first_extreme, Some(2400.0));
    assert_eq!(result.second_extreme, Some(2390.0));
    assert_eq!(result.neckline, Some(2500.0));
    assert!(result.narrative.contains("2400.00"));
    assert!(result.narrative.contains("2390.00"));
    assert!(result.narrative.contains("2500.00"));
}

#[test]
fn test_double_bottom_forming_below_neckline() {
    let closes = path(&[(0, 2450.0), (40, 2400.0), (65, 2500.0), (90, 2390.0), (119, 2490.0)]);

    let result = detect_double_bottom(&hourly(&closes), 0.03, 100);
    assert!(!result.detected);
    assert_eq!(result.status, PatternStatus::Forming);
}

#[test]
fn test_top_and_bottom_on_same_series_are_independent() {
    let closes = path(&[(0, 2450.0), (40, 2500.0), (65, 2400.0), (90, 2510.0), (119, 2390.0)]);
    let series = hourly(&closes);

    // Only one trough (bar 65) in the window.
    let bottom = detect_double_bottom(&series, 0.03, 100);
    assert!(!bottom.detected);
    assert_eq!(bottom.status, PatternStatus::InsufficientPeaks);
}

#[test]
fn test_lookback_limits_window() {
    let closes = path(&[(0, 2450.0), (40, 2500.0), (65, 2400.0), (90, 2510.0), (119, 2390.0)]);

    // The last 60 bars hold only the second peak.
    let result = detect_double_top(&hourly(&closes), 0.03, 60);
    assert!(!result.detected);
    assert_eq!(result.status, PatternStatus::InsufficientPeaks);
}

#[test]
fn test_detection_is_repeatable() {
    let closes = path(&[(0, 2450.0), (40, 2500.0), (65, 2400.0), (90, 2510.0), (119, 2390.0)]);
    let series = hourly(&closes);
    assert_eq!(
        detect_double_top(&series, 0.03, 100),
        detect_double_top(&series, 0.03, 100)
    );
}
