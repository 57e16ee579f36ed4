use serde::{Deserialize, Serialize};

/// Chart pattern kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    DoubleTop,
    DoubleBottom,
}

/// How far a detection pass got.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum PatternStatus {
    /// Nothing to analyze.
    NoData,
    /// Fewer than two extremes in the lookback window.
    InsufficientPeaks,
    /// The two latest extremes differ by more than the threshold.
    ExtremesDiverge { diff_ratio: f64 },
    /// Extremes matched but the neckline has not been crossed yet.
    Forming,
    /// Extremes matched and the current close crossed the neckline.
    Confirmed,
}

/// Outcome of a double-top / double-bottom detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternDetection {
    pub kind: PatternKind,
    pub status: PatternStatus,
    /// True only when the neckline has been crossed.
    pub detected: bool,
    /// Older of the two matched peaks (troughs for a bottom).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_extreme: Option<f64>,
    /// Newer of the two matched peaks (troughs for a bottom).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub second_extreme: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neckline: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_price: Option<f64>,
    pub narrative: String,
}

impl PatternDetection {
    pub(crate) fn rejected(kind: PatternKind, status: PatternStatus, narrative: String) -> Self {
        Self {
            kind,
            status,
            detected: false,
            first_extreme: None,
            second_extreme: None,
            neckline: None,
            current_price: None,
            narrative,
        }
    }

    /// Two matched extremes exist, whether or not the neckline broke.
    pub fn is_formed(&self) -> bool {
        matches!(self.status, PatternStatus::Forming | PatternStatus::Confirmed)
    }

    /// `(detected, narrative)` pair.
    pub fn as_pair(&self) -> (bool, &str) {
        (self.detected, &self.narrative)
    }
}
