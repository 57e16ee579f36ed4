use super::Prediction;
use serde::{Deserialize, Serialize};

/// Realized next-bar move, bucketed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveOutcome {
    Surge,
    Crash,
    Range,
}

/// Grade of a prediction against the realized move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Direction matched a large move.
    Success,
    /// No strong call on a quiet day.
    QuietSuccess,
    /// Waited through a large move.
    MissedNeutral,
    /// Called the opposite direction.
    WrongDirection,
    /// Acceleration call on a quiet day.
    FalseAlarm,
}

impl Verdict {
    pub fn is_success(&self) -> bool {
        matches!(self, Verdict::Success | Verdict::QuietSuccess)
    }
}

/// One graded day of a walk-forward run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    /// Time of the analyzed daily bar.
    pub time: i64,
    /// Close-to-close change of the following bar, in percent.
    pub next_change_pct: f64,
    pub outcome: MoveOutcome,
    pub prediction: Prediction,
    pub verdict: Verdict,
}

/// Aggregate of a walk-forward run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationSummary {
    pub records: Vec<EvaluationRecord>,
    pub successes: usize,
    pub total: usize,
}

impl EvaluationSummary {
    /// Hit rate in percent, `None` when nothing was graded.
    pub fn accuracy_pct(&self) -> Option<f64> {
        if self.total == 0 {
            None
        } else {
            Some(self.successes as f64 / self.total as f64 * 100.0)
        }
    }
}

/// A bar whose close-to-close change exceeded the screening threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignificantMove {
    pub time: i64,
    pub close: f64,
    pub change_pct: f64,
    pub outcome: MoveOutcome,
}
