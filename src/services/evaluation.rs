//! Prediction evaluation
//!
//! Grades the short-term scorer against realized daily moves:
//! - Next-day move bucketing (surge / crash / range)
//! - Per-prediction verdicts
//! - Significant-move screening
//! - Walk-forward replay over in-memory history

use crate::config::TrendScorerConfig;
use crate::services::registry::resample;
use crate::services::trend::score_trend;
use crate::types::{
    EvaluationRecord, EvaluationSummary, MoveOutcome, Prediction, Series, SignificantMove,
    Timeframe, Verdict,
};
use tracing::{debug, info};

/// Close-to-close change, in percent, that counts as a large move.
pub const MOVE_THRESHOLD_PCT: f64 = 2.0;

/// Minimum daily and hourly history before a day is graded.
pub const MIN_HISTORY_BARS: usize = 50;

const DAY_SECONDS: i64 = 86_400;

/// Bucket a percentage change.
pub fn classify_move(change_pct: f64) -> MoveOutcome {
    if change_pct >= MOVE_THRESHOLD_PCT {
        MoveOutcome::Surge
    } else if change_pct <= -MOVE_THRESHOLD_PCT {
        MoveOutcome::Crash
    } else {
        MoveOutcome::Range
    }
}

/// Grade a prediction against the move that followed it.
pub fn grade(prediction: Prediction, outcome: MoveOutcome) -> Verdict {
    match (outcome, prediction) {
        (MoveOutcome::Surge, Prediction::SurgeAcceleration | Prediction::Rebound)
        | (MoveOutcome::Crash, Prediction::CrashAcceleration | Prediction::ContinuedDecline) => {
            Verdict::Success
        }
        (MoveOutcome::Surge | MoveOutcome::Crash, Prediction::Wait) => Verdict::MissedNeutral,
        (MoveOutcome::Surge | MoveOutcome::Crash, _) => Verdict::WrongDirection,
        (MoveOutcome::Range, p) if p.is_acceleration() => Verdict::FalseAlarm,
        (MoveOutcome::Range, _) => Verdict::QuietSuccess,
    }
}

fn change_pct(previous: f64, current: f64) -> f64 {
    (current - previous) / previous * 100.0
}

/// Bars whose close-to-close change is at least `threshold_pct` in
/// magnitude, newest first.
pub fn significant_moves(daily: &Series, threshold_pct: f64) -> Vec<SignificantMove> {
    let mut moves: Vec<SignificantMove> = daily
        .bars()
        .windows(2)
        .filter_map(|pair| {
            let pct = change_pct(pair[0].close, pair[1].close);
            (pct.abs() >= threshold_pct).then(|| SignificantMove {
                time: pair[1].time,
                close: pair[1].close,
                change_pct: pct,
                outcome: if pct > 0.0 {
                    MoveOutcome::Surge
                } else {
                    MoveOutcome::Crash
                },
            })
        })
        .collect();
    moves.reverse();
    moves
}

/// Replay the scorer day by day from `from_time` and grade each call
/// against the next day's close.
///
/// Each day sees the daily bars up to itself and the hourly bars up to the
/// end of that day; the 4-hour series is rebuilt from that hourly slice.
/// Days with less than [`MIN_HISTORY_BARS`] of either history are skipped.
pub fn walk_forward(
    daily: &Series,
    hourly: &Series,
    config: &TrendScorerConfig,
    from_time: i64,
) -> EvaluationSummary {
    let mut summary = EvaluationSummary::default();
    let Some(four_hour_seconds) = Timeframe::FourHours.bucket_seconds() else {
        return summary;
    };

    for pair in daily.bars().windows(2) {
        let (today, next) = (pair[0], pair[1]);
        if today.time < from_time {
            continue;
        }

        let daily_slice = daily.slice_until(today.time);
        let hourly_slice = hourly.slice_until(today.time + DAY_SECONDS - 1);
        if daily_slice.len() < MIN_HISTORY_BARS || hourly_slice.len() < MIN_HISTORY_BARS {
            debug!("Skipping {}: not enough history", today.time);
            continue;
        }
        let four_hour = resample(&hourly_slice, four_hour_seconds);

        let score = score_trend(&daily_slice, &four_hour, &hourly_slice, config);
        let next_change_pct = change_pct(today.close, next.close);
        let outcome = classify_move(next_change_pct);
        let verdict = grade(score.final_prediction, outcome);

        summary.total += 1;
        if verdict.is_success() {
            summary.successes += 1;
        }
        summary.records.push(EvaluationRecord {
            time: today.time,
            next_change_pct,
            outcome,
            prediction: score.final_prediction,
            verdict,
        });
    }

    info!(
        "Walk-forward graded {} days, {} successes",
        summary.total, summary.successes
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Bar;

    fn daily(closes: &[f64]) -> Series {
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Bar {
                time: i as i64 * DAY_SECONDS,
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
    fn test_classify_move_boundaries() {
        assert_eq!(classify_move(2.0), MoveOutcome::Surge);
        assert_eq!(classify_move(-2.0), MoveOutcome::Crash);
        assert_eq!(classify_move(1.99), MoveOutcome::Range);
    }

    #[test]
    fn test_grade() {
        assert_eq!(
            grade(Prediction::Rebound, MoveOutcome::Surge),
            Verdict::Success
        );
        assert_eq!(
            grade(Prediction::ContinuedDecline, MoveOutcome::Crash),
            Verdict::Success
        );
        assert_eq!(
            grade(Prediction::Wait, MoveOutcome::Crash),
            Verdict::MissedNeutral
        );
        assert_eq!(
            grade(Prediction::Rebound, MoveOutcome::Crash),
            Verdict::WrongDirection
        );
        assert_eq!(
            grade(Prediction::SurgeAcceleration, MoveOutcome::Range),
            Verdict::FalseAlarm
        );
        assert_eq!(
            grade(Prediction::ContinuedDecline, MoveOutcome::Range),
            Verdict::QuietSuccess
        );
    }

    #[test]
    fn test_significant_moves_newest_first() {
        let moves = significant_moves(&daily(&[100.0, 103.0, 103.5, 100.0]), 2.0);
        assert_eq!(moves.len(), 2);
        assert_eq!(moves[0].outcome, MoveOutcome::Crash);
        assert_eq!(moves[0].time, 3 * DAY_SECONDS);
        assert_eq!(moves[1].outcome, MoveOutcome::Surge);
    }

    #[test]
    fn test_walk_forward_requires_history() {
        let d = daily(&[100.0; 10]);
        let summary = walk_forward(&d, &d, &TrendScorerConfig::short_term(), 0);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.accuracy_pct(), None);
    }

    /// Flat hourly bars closing on their lows, 24 per day.
    fn flat_hourly(days: usize) -> Series {
        let bars = (0..days * 24)
            .map(|i| Bar {
                time: i as i64 * 3600,
                open: 100.0,
                high: 101.0,
                low: 100.0,
                close: 100.0,
                volume: Some(10.0),
            })
            .collect();
        Series::new(bars).unwrap()
    }

    #[test]
    fn test_walk_forward_grades_each_day() {
        let mut closes = vec![100.0; 50];
        closes.extend([103.0, 95.0, 96.0]);
        let d = daily(&closes);
        let h1 = flat_hourly(closes.len());

        let summary = walk_forward(&d, &h1, &TrendScorerConfig::short_term(), 0);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.successes, 2);

        let times: Vec<i64> = summary.records.iter().map(|r| r.time).collect();
        assert_eq!(times, vec![49 * DAY_SECONDS, 50 * DAY_SECONDS, 51 * DAY_SECONDS]);
        // Flat hourly data sits on its EMA200 every day.
        assert!(summary
            .records
            .iter()
            .all(|r| r.prediction == Prediction::Rebound));

        let outcomes: Vec<(MoveOutcome, Verdict)> = summary
            .records
            .iter()
            .map(|r| (r.outcome, r.verdict))
            .collect();
        assert_eq!(
            outcomes,
            vec![
                (MoveOutcome::Surge, Verdict::Success),
                (MoveOutcome::Crash, Verdict::WrongDirection),
                (MoveOutcome::Range, Verdict::QuietSuccess),
            ]
        );
        assert!((summary.records[0].next_change_pct - 3.0).abs() < 1e-9);

        let accuracy = summary.accuracy_pct().unwrap();
        assert!((accuracy - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_walk_forward_starts_at_from_time() {
        let mut closes = vec![100.0; 50];
        closes.extend([103.0, 95.0, 96.0]);
        let d = daily(&closes);
        let h1 = flat_hourly(closes.len());

        let summary = walk_forward(&d, &h1, &TrendScorerConfig::short_term(), 51 * DAY_SECONDS);
        assert_eq!(summary.total, 1);
        assert_eq!(summary.records[0].verdict, Verdict::QuietSuccess);
        assert_eq!(summary.accuracy_pct(), Some(100.0));
    }
}
