use crate::types::{Bar, Series, Timeframe};
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info};

/// OHLCV bucket for a time period.
#[derive(Debug, Clone)]
struct OhlcBucket {
    time: i64,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: Option<f64>,
}

impl OhlcBucket {
    fn new(time: i64, bar: &Bar) -> Self {
        Self {
            time,
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            volume: bar.volume,
        }
    }

    fn update(&mut self, bar: &Bar) {
        self.high = self.high.max(bar.high);
        self.low = self.low.min(bar.low);
        self.close = bar.close;
        if let Some(v) = bar.volume {
            self.volume = Some(self.volume.unwrap_or(0.0) + v);
        }
    }

    fn to_bar(&self) -> Bar {
        Bar {
            time: self.time,
            open: self.open,
            high: self.high,
            low: self.low,
            close: self.close,
            volume: self.volume,
        }
    }
}

/// Aggregate `series` into epoch-aligned buckets of `bucket_seconds`.
///
/// Open is the first bar's open, high the max, low the min, close the last
/// close, volume the sum. Buckets with no bars are not emitted.
pub fn resample(series: &Series, bucket_seconds: i64) -> Series {
    if bucket_seconds <= 0 {
        return Series::empty();
    }

    let mut buckets: Vec<OhlcBucket> = Vec::new();
    for bar in series.bars() {
        let bucket_time = bar.time.div_euclid(bucket_seconds) * bucket_seconds;
        match buckets.last_mut() {
            Some(last) if last.time == bucket_time => last.update(bar),
            _ => buckets.push(OhlcBucket::new(bucket_time, bar)),
        }
    }

    Series::from_ordered(buckets.iter().map(OhlcBucket::to_bar).collect())
}

/// Series per timeframe, with coarser timeframes derivable from finer ones.
///
/// Caller-supplied series are never modified. Derived series are either
/// returned by value ([`derive_or_get`](Self::derive_or_get)) or cached
/// explicitly ([`fill_derived`](Self::fill_derived)). A cached series is
/// dropped as soon as any timeframe it was built from is re-registered.
#[derive(Debug, Clone, Default)]
pub struct TimeframeRegistry {
    series: BTreeMap<Timeframe, Series>,
    /// Keys of `series` that were filled by resampling.
    derived: BTreeSet<Timeframe>,
}

impl TimeframeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a series, replacing any previous one for the timeframe.
    ///
    /// Cached series derived from `timeframe`, directly or through another
    /// derived series, are evicted.
    pub fn insert(&mut self, timeframe: Timeframe, series: Series) {
        debug!("Registered {} bars for {}", series.len(), timeframe);
        self.derived.remove(&timeframe);
        self.series.insert(timeframe, series);

        let stale: Vec<Timeframe> = self
            .derived
            .iter()
            .copied()
            .filter(|&tf| builds_on(tf, timeframe))
            .collect();
        for tf in stale {
            debug!("Evicting derived {} after new {} data", tf, timeframe);
            self.derived.remove(&tf);
            self.series.remove(&tf);
        }
    }

    /// The series for `timeframe` was filled by resampling.
    pub fn is_derived(&self, timeframe: Timeframe) -> bool {
        self.derived.contains(&timeframe)
    }

    pub fn get(&self, timeframe: Timeframe) -> Option<&Series> {
        self.series.get(&timeframe)
    }

    /// A non-empty series is registered for the timeframe.
    pub fn contains(&self, timeframe: Timeframe) -> bool {
        self.series.get(&timeframe).is_some_and(|s| !s.is_empty())
    }

    /// The registered series, or one resampled from the finer timeframe it
    /// derives from. Does not modify the registry.
    pub fn derive_or_get(&self, timeframe: Timeframe) -> Option<Cow<'_, Series>> {
        if let Some(series) = self.series.get(&timeframe).filter(|s| !s.is_empty()) {
            return Some(Cow::Borrowed(series));
        }

        let source = timeframe.derived_from()?;
        let bucket_seconds = timeframe.bucket_seconds()?;
        let finer = self.series.get(&source).filter(|s| !s.is_empty())?;
        Some(Cow::Owned(resample(finer, bucket_seconds)))
    }

    /// Cache the derived series for `timeframe` if none is registered.
    ///
    /// Returns true if a series is available afterwards. Repeated calls with
    /// the same finer data leave the registry unchanged.
    pub fn fill_derived(&mut self, timeframe: Timeframe) -> bool {
        if self.contains(timeframe) {
            return true;
        }
        let Some(Cow::Owned(derived)) = self.derive_or_get(timeframe) else {
            return false;
        };
        info!(
            "Derived {} bars for {} from finer data",
            derived.len(),
            timeframe
        );
        self.series.insert(timeframe, derived);
        self.derived.insert(timeframe);
        true
    }

    /// Registered timeframes, finest first.
    pub fn timeframes(&self) -> Vec<Timeframe> {
        self.series.keys().copied().collect()
    }

    /// Registered series, finest first.
    pub fn iter(&self) -> impl Iterator<Item = (Timeframe, &Series)> {
        self.series.iter().map(|(tf, s)| (*tf, s))
    }
}

/// `source` lies on the derivation chain of `timeframe`.
fn builds_on(timeframe: Timeframe, source: Timeframe) -> bool {
    let mut current = timeframe.derived_from();
    while let Some(tf) = current {
        if tf == source {
            return true;
        }
        current = tf.derived_from();
    }
    false
}
