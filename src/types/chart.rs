use crate::error::{AnalyzerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Bar timeframe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "15m")]
    FifteenMinutes,
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "4h")]
    FourHours,
    #[serde(rename = "1d")]
    Daily,
    #[serde(rename = "1wk")]
    Weekly,
    #[serde(rename = "1mo")]
    Monthly,
}

impl Timeframe {
    /// All timeframes, finest first.
    pub const ALL: [Timeframe; 6] = [
        Timeframe::FifteenMinutes,
        Timeframe::OneHour,
        Timeframe::FourHours,
        Timeframe::Daily,
        Timeframe::Weekly,
        Timeframe::Monthly,
    ];

    /// Canonical short label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::FifteenMinutes => "15m",
            Timeframe::OneHour => "1h",
            Timeframe::FourHours => "4h",
            Timeframe::Daily => "1d",
            Timeframe::Weekly => "1wk",
            Timeframe::Monthly => "1mo",
        }
    }

    /// Name used in the per-timeframe report.
    pub fn display_name(&self) -> &'static str {
        match self {
            Timeframe::FifteenMinutes => "15M",
            Timeframe::OneHour => "1H",
            Timeframe::FourHours => "4H",
            Timeframe::Daily => "Daily",
            Timeframe::Weekly => "Weekly",
            Timeframe::Monthly => "Monthly",
        }
    }

    /// Fixed bucket width in seconds. Calendar timeframes have none.
    pub fn bucket_seconds(&self) -> Option<i64> {
        match self {
            Timeframe::FifteenMinutes => Some(900),
            Timeframe::OneHour => Some(3600),
            Timeframe::FourHours => Some(14400),
            Timeframe::Daily => Some(86400),
            Timeframe::Weekly | Timeframe::Monthly => None,
        }
    }

    /// Finer timeframe this one may be resampled from when absent.
    pub fn derived_from(&self) -> Option<Timeframe> {
        match self {
            Timeframe::FourHours => Some(Timeframe::OneHour),
            Timeframe::OneHour => Some(Timeframe::FifteenMinutes),
            _ => None,
        }
    }
}

impl FromStr for Timeframe {
    type Err = AnalyzerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "15m" | "15min" => Ok(Timeframe::FifteenMinutes),
            "1h" | "60m" | "hourly" => Ok(Timeframe::OneHour),
            "4h" | "4hourly" => Ok(Timeframe::FourHours),
            "1d" | "d" | "daily" => Ok(Timeframe::Daily),
            "1wk" | "1w" | "weekly" => Ok(Timeframe::Weekly),
            "1mo" | "monthly" => Ok(Timeframe::Monthly),
            _ => Err(AnalyzerError::UnknownTimeframe(s.to_string())),
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// OHLCV bar. `time` is the bar open in unix seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
}

impl Bar {
    /// High minus low.
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// Absolute distance between open and close.
    pub fn body(&self) -> f64 {
        (self.close - self.open).abs()
    }

    /// Distance from the lower end of the body down to the low.
    pub fn lower_shadow(&self) -> f64 {
        self.close.min(self.open) - self.low
    }
}

/// Ordered bars of a single timeframe with strictly increasing timestamps.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Series {
    bars: Vec<Bar>,
}

impl Series {
    /// Validate ordering and wrap the bars.
    pub fn new(bars: Vec<Bar>) -> Result<Self> {
        for (index, pair) in bars.windows(2).enumerate() {
            let (previous, time) = (pair[0].time, pair[1].time);
            if time == previous {
                return Err(AnalyzerError::DuplicateTimestamp {
                    index: index + 1,
                    time,
                });
            }
            if time < previous {
                return Err(AnalyzerError::UnorderedTimestamps {
                    index: index + 1,
                    previous,
                    time,
                });
            }
        }
        Ok(Self { bars })
    }

    /// Wrap bars already known to be strictly increasing in time.
    pub(crate) fn from_ordered(bars: Vec<Bar>) -> Self {
        debug_assert!(bars.windows(2).all(|w| w[0].time < w[1].time));
        Self { bars }
    }

    /// Empty series.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a series from column-oriented data.
    ///
    /// Headers are given as level lists so that multi-level headers such as
    /// `["Close", "GC=F"]` can be flattened to their first level. Open, High,
    /// Low and Close are mandatory; Volume is optional.
    pub fn from_columns<S: AsRef<str>>(
        times: Vec<i64>,
        columns: Vec<(Vec<S>, Vec<f64>)>,
    ) -> Result<Self> {
        let expected = times.len();
        let mut flat: Vec<(String, Vec<f64>)> = Vec::with_capacity(columns.len());
        for (header, values) in columns {
            let name = header
                .first()
                .map(|level| level.as_ref().to_string())
                .unwrap_or_default();
            if values.len() != expected {
                return Err(AnalyzerError::LengthMismatch {
                    column: name,
                    expected,
                    actual: values.len(),
                });
            }
            // First occurrence wins when flattening collapses two headers.
            if !flat.iter().any(|(existing, _)| *existing == name) {
                flat.push((name, values));
            }
        }

        let take = |name: &str| -> Option<&Vec<f64>> {
            flat.iter().find(|(n, _)| n == name).map(|(_, v)| v)
        };
        let required = |name: &str| {
            take(name).ok_or_else(|| AnalyzerError::MissingColumn(name.to_string()))
        };

        let open = required("Open")?;
        let high = required("High")?;
        let low = required("Low")?;
        let close = required("Close")?;
        let volume = take("Volume");

        let bars = times
            .iter()
            .enumerate()
            .map(|(i, &time)| Bar {
                time,
                open: open[i],
                high: high[i],
                low: low[i],
                close: close[i],
                volume: volume.map(|v| v[i]),
            })
            .collect();

        Self::new(bars)
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }

    /// Close of the most recent bar.
    pub fn last_close(&self) -> Option<f64> {
        self.bars.last().map(|b| b.close)
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// The most recent `n` bars (all of them if fewer).
    pub fn tail(&self, n: usize) -> &[Bar] {
        let start = self.bars.len().saturating_sub(n);
        &self.bars[start..]
    }

    /// Copy of every bar with `time <= until`.
    pub fn slice_until(&self, until: i64) -> Series {
        let end = self.bars.partition_point(|b| b.time <= until);
        Series {
            bars: self.bars[..end].to_vec(),
        }
    }
}

impl<'de> Deserialize<'de> for Series {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bars = Vec::<Bar>::deserialize(deserializer)?;
        Series::new(bars).map_err(serde::de::Error::custom)
    }
}
