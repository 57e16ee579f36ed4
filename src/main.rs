use anyhow::Context;
use chrono::{DateTime, NaiveDate, Utc};
use metal_analyzer::config::AnalyzerConfig;
use metal_analyzer::services::{MacroPeers, MetalAnalyzer, TimeframeDetail};
use metal_analyzer::types::{
    EvaluationSummary, LongTrendReport, MiddleTrendReport, PatternDetection, Series,
    SignificantMove, TopDownReport, TrendScore,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::{self, Read};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Input read from stdin.
#[derive(Debug, Deserialize)]
struct MarketSnapshot {
    #[serde(default)]
    ticker: Option<String>,
    /// Series keyed by timeframe label (`"1d"`, `"Daily"`, `"1h"`, ...).
    timeframes: BTreeMap<String, Series>,
    #[serde(default)]
    peers: Option<MacroPeers>,
    /// Grade the short-term scorer from this date on.
    #[serde(default)]
    evaluate_from: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
struct AnalysisReport {
    ticker: String,
    generated_at: DateTime<Utc>,
    short_term: TrendScore,
    advanced: TrendScore,
    middle_term: MiddleTrendReport,
    long_term: LongTrendReport,
    top_down: TopDownReport,
    double_top: PatternDetection,
    double_bottom: PatternDetection,
    timeframes: Vec<TimeframeDetail>,
    significant_moves: Vec<SignificantMove>,
    #[serde(skip_serializing_if = "Option::is_none")]
    evaluation: Option<EvaluationSummary>,
}

fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "metal_analyzer=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read snapshot from stdin")?;
    let snapshot: MarketSnapshot =
        serde_json::from_str(&input).context("invalid market snapshot")?;

    let mut config = AnalyzerConfig::from_env();
    if let Some(ticker) = snapshot.ticker {
        config.ticker = ticker;
    }
    info!("Analyzing {}", config.ticker);

    let mut analyzer = MetalAnalyzer::with_config(config);
    for (label, series) in snapshot.timeframes {
        analyzer
            .add_timeframe_data(&label, series)
            .with_context(|| format!("timeframe {label}"))?;
    }

    let evaluation = snapshot
        .evaluate_from
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .and_then(|start| analyzer.evaluate(start.and_utc().timestamp()));

    let report = AnalysisReport {
        ticker: analyzer.ticker().to_string(),
        generated_at: Utc::now(),
        short_term: analyzer.analyze_short_trend(),
        advanced: analyzer.analyze_advanced_trend(),
        middle_term: analyzer.analyze_middle_trend(),
        long_term: analyzer.analyze_long_trend(&snapshot.peers.unwrap_or_default()),
        top_down: analyzer.analyze_top_down(),
        double_top: analyzer.detect_double_top(),
        double_bottom: analyzer.detect_double_bottom(),
        timeframes: analyzer.timeframe_details(),
        significant_moves: analyzer.significant_moves(),
        evaluation,
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
