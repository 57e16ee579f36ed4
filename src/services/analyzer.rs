use crate::config::{AnalyzerConfig, TrendScorerConfig};
use crate::error::Result;
use crate::services::evaluation::{significant_moves, walk_forward, MOVE_THRESHOLD_PCT};
use crate::services::patterns::{detect_double_bottom, detect_double_top};
use crate::services::registry::TimeframeRegistry;
use crate::services::signals::{analyze_top_down, entry_signals_for};
use crate::services::timeframe_report::{render_details, timeframe_details, TimeframeDetail};
use crate::services::trend::{analyze_long_trend, analyze_middle_trend, score_trend, MacroPeers};
use crate::types::{
    EntrySignal, EvaluationSummary, LongTrendReport, MiddleTrendReport, PatternDetection,
    PatternKind, PatternStatus, Series, SignificantMove, Timeframe, TopDownReport, TrendScore,
};
use std::borrow::Cow;
use tracing::{debug, warn};

/// Entry point tying the registry to every scorer.
///
/// Missing timeframes never produce errors: each operation falls back to its
/// insufficient-data result and logs a warning.
#[derive(Debug, Clone)]
pub struct MetalAnalyzer {
    ticker: String,
    config: AnalyzerConfig,
    registry: TimeframeRegistry,
}

impl MetalAnalyzer {
    /// Create an analyzer with default parameters.
    pub fn new(ticker: impl Into<String>) -> Self {
        let config = AnalyzerConfig {
            ticker: ticker.into(),
            ..AnalyzerConfig::default()
        };
        Self::with_config(config)
    }

    pub fn with_config(config: AnalyzerConfig) -> Self {
        Self {
            ticker: config.ticker.clone(),
            config,
            registry: TimeframeRegistry::new(),
        }
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn registry(&self) -> &TimeframeRegistry {
        &self.registry
    }

    /// Register a series under a timeframe label such as `"Daily"` or `"1h"`.
    pub fn add_timeframe_data(&mut self, label: &str, series: Series) -> Result<()> {
        let timeframe: Timeframe = label.parse()?;
        self.add_series(timeframe, series);
        Ok(())
    }

    pub fn add_series(&mut self, timeframe: Timeframe, series: Series) {
        self.registry.insert(timeframe, series);
    }

    fn series(&self, timeframe: Timeframe) -> Option<Cow<'_, Series>> {
        let series = self.registry.derive_or_get(timeframe);
        if series.is_none() {
            warn!("{}: no {} data", self.ticker, timeframe);
        }
        series
    }

    /// Run a four-dashboard scorer, caching derived 1h / 4h series first.
    fn score(&mut self, config: &TrendScorerConfig) -> TrendScore {
        self.registry.fill_derived(Timeframe::OneHour);
        self.registry.fill_derived(Timeframe::FourHours);

        let (Some(daily), Some(h4), Some(h1)) = (
            self.series(Timeframe::Daily),
            self.series(Timeframe::FourHours),
            self.series(Timeframe::OneHour),
        ) else {
            return TrendScore::insufficient_data();
        };
        score_trend(&daily, &h4, &h1, config)
    }

    pub fn analyze_short_trend(&mut self) -> TrendScore {
        debug!("{}: short-term trend", self.ticker);
        let config = self.config.short_term.clone();
        self.score(&config)
    }

    pub fn analyze_advanced_trend(&mut self) -> TrendScore {
        debug!("{}: advanced trend", self.ticker);
        let config = self.config.advanced.clone();
        self.score(&config)
    }

    pub fn analyze_middle_trend(&self) -> MiddleTrendReport {
        let (Some(weekly), Some(daily)) = (
            self.series(Timeframe::Weekly),
            self.series(Timeframe::Daily),
        ) else {
            return MiddleTrendReport::insufficient_data();
        };
        analyze_middle_trend(&weekly, &daily, &self.config.middle)
    }

    /// Score the registered monthly series against its macro peers.
    pub fn analyze_long_trend(&self, peers: &MacroPeers) -> LongTrendReport {
        let Some(monthly) = self.series(Timeframe::Monthly) else {
            return LongTrendReport::insufficient_data();
        };
        analyze_long_trend(&monthly, peers, &self.config.long)
    }

    pub fn analyze_top_down(&self) -> TopDownReport {
        let empty = Series::empty();
        let daily = self.series(Timeframe::Daily);
        let hourly = self.series(Timeframe::OneHour);
        analyze_top_down(
            daily.as_deref().unwrap_or(&empty),
            hourly.as_deref().unwrap_or(&empty),
            &self.config.top_down,
        )
    }

    /// Double top on the hourly series.
    pub fn detect_double_top(&self) -> PatternDetection {
        let pattern = self.config.pattern;
        match self.series(Timeframe::OneHour) {
            Some(h1) => detect_double_top(&h1, pattern.threshold, pattern.lookback),
            None => no_data(PatternKind::DoubleTop),
        }
    }

    /// Double bottom on the hourly series.
    pub fn detect_double_bottom(&self) -> PatternDetection {
        let pattern = self.config.pattern;
        match self.series(Timeframe::OneHour) {
            Some(h1) => detect_double_bottom(&h1, pattern.threshold, pattern.lookback),
            None => no_data(PatternKind::DoubleBottom),
        }
    }

    /// Entry labels for every bar of a timeframe; empty if it is missing.
    pub fn entry_signals(&self, timeframe: Timeframe) -> Vec<EntrySignal> {
        self.series(timeframe)
            .map(|s| entry_signals_for(&s, &self.config.entry))
            .unwrap_or_default()
    }

    /// Per-timeframe summary of the registered series.
    pub fn timeframe_details(&self) -> Vec<TimeframeDetail> {
        timeframe_details(self.registry.iter())
    }

    pub fn timeframe_report(&self) -> String {
        render_details(&self.timeframe_details())
    }

    /// Walk the short-term scorer forward over the registered daily and
    /// hourly history, grading every day from `from_time` on.
    pub fn evaluate(&self, from_time: i64) -> Option<EvaluationSummary> {
        let daily = self.series(Timeframe::Daily)?;
        let hourly = self.series(Timeframe::OneHour)?;
        Some(walk_forward(
            &daily,
            &hourly,
            &self.config.short_term,
            from_time,
        ))
    }

    /// Daily closes that moved at least [`MOVE_THRESHOLD_PCT`], newest first.
    pub fn significant_moves(&self) -> Vec<SignificantMove> {
        self.series(Timeframe::Daily)
            .map(|daily| significant_moves(&daily, MOVE_THRESHOLD_PCT))
            .unwrap_or_default()
    }
}

fn no_data(kind: PatternKind) -> PatternDetection {
    PatternDetection::rejected(
        kind,
        PatternStatus::NoData,
        "分析対象のデータがありません".to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalyzerError;

    #[test]
    fn test_unknown_label_rejected() {
        let mut analyzer = MetalAnalyzer::new("GC=F");
        let err = analyzer
            .add_timeframe_data("3d", Series::empty())
            .unwrap_err();
        assert!(matches!(err, AnalyzerError::UnknownTimeframe(_)));
    }

    #[test]
    fn test_missing_data_sentinels() {
        let mut analyzer = MetalAnalyzer::new("GC=F");
        assert!(analyzer.analyze_short_trend().is_insufficient());
        assert!(analyzer.analyze_advanced_trend().is_insufficient());
        assert_eq!(
            analyzer.analyze_middle_trend(),
            MiddleTrendReport::insufficient_data()
        );
        assert_eq!(
            analyzer.analyze_long_trend(&MacroPeers::default()),
            LongTrendReport::insufficient_data()
        );
        assert_eq!(analyzer.detect_double_top().status, PatternStatus::NoData);
        assert!(analyzer.entry_signals(Timeframe::Daily).is_empty());
        assert_eq!(analyzer.timeframe_report(), "");
        assert!(analyzer.evaluate(0).is_none());
    }
}
