use std::env;

/// Double-top / double-bottom detection parameters.
///
/// Peak separation and prominence are fixed by the detector itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatternConfig {
    /// Maximum relative difference between the two extremes.
    pub threshold: f64,
    /// Number of most recent bars inspected.
    pub lookback: usize,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            threshold: 0.03,
            lookback: 100,
        }
    }
}

/// Which sentiment checks a four-dashboard scorer runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentMode {
    /// Patterns (forming or confirmed), pin-bar, RSI divergence, EMA200
    /// support, then 50-bar extremes.
    Full,
    /// A confirmed double-top neckline break, then 50-bar extremes.
    BreachOnly,
}

/// Parameters of the short-term and advanced four-dashboard scorers.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendScorerConfig {
    pub sentiment: SentimentMode,
    /// EMA windows for the 4-hour perfect order.
    pub ema_fast: usize,
    pub ema_mid: usize,
    pub ema_slow: usize,
    /// EMA window for 1-hour momentum.
    pub momentum_ema: usize,
    /// Relative distance from the EMA that counts as strong momentum.
    pub momentum_threshold: f64,
    /// Bars in the recent and baseline range averages.
    pub range_recent: usize,
    pub range_baseline: usize,
    /// Recent/baseline range ratio that marks a breakout.
    pub breakout_ratio: f64,
    /// Score multiplier while breaking out.
    pub amplification: f64,
    /// Bars scanned for new highs and lows.
    pub extreme_lookback: usize,
    pub rsi_window: usize,
    /// Lower shadow must be at least this many bodies.
    pub pinbar_body_ratio: f64,
    /// RSI under which a pin-bar counts as a reversal.
    pub pinbar_rsi: f64,
    /// Relative band around EMA200 treated as support.
    pub support_band: f64,
    pub divergence_lookback: usize,
    /// Minimum RSI improvement over the swing low.
    pub divergence_points: f64,
    /// Score at or below which the crash bucket fires.
    pub crash_threshold: f64,
    /// Score at or above which the surge bucket fires.
    pub surge_threshold: f64,
    pub pattern: PatternConfig,
}

impl TrendScorerConfig {
    /// Short-term scorer: full sentiment checks, surge at +5.
    pub fn short_term() -> Self {
        Self {
            sentiment: SentimentMode::Full,
            ema_fast: 20,
            ema_mid: 50,
            ema_slow: 200,
            momentum_ema: 20,
            momentum_threshold: 0.005,
            range_recent: 3,
            range_baseline: 20,
            breakout_ratio: 1.5,
            amplification: 1.5,
            extreme_lookback: 50,
            rsi_window: 14,
            pinbar_body_ratio: 2.0,
            pinbar_rsi: 45.0,
            support_band: 0.002,
            divergence_lookback: 15,
            divergence_points: 3.0,
            crash_threshold: -6.0,
            surge_threshold: 5.0,
            pattern: PatternConfig::default(),
        }
    }

    /// Advanced scorer: breach-only sentiment, surge at +6.
    pub fn advanced() -> Self {
        Self {
            sentiment: SentimentMode::BreachOnly,
            surge_threshold: 6.0,
            ..Self::short_term()
        }
    }
}

impl Default for TrendScorerConfig {
    fn default() -> Self {
        Self::short_term()
    }
}

/// Weekly/daily scorer parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct MiddleTrendConfig {
    pub weekly_fast: usize,
    pub weekly_mid: usize,
    pub weekly_slow: usize,
    pub rsi_window: usize,
    pub oversold: f64,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub bollinger_window: usize,
    pub bollinger_std: f64,
    /// Window of the bandwidth's own rolling mean.
    pub bandwidth_mean_window: usize,
    pub high_volatility_ratio: f64,
    pub squeeze_ratio: f64,
}

impl Default for MiddleTrendConfig {
    fn default() -> Self {
        Self {
            weekly_fast: 13,
            weekly_mid: 26,
            weekly_slow: 52,
            rsi_window: 14,
            oversold: 35.0,
            macd_fast: 12,
            macd_slow: 26,
            bollinger_window: 20,
            bollinger_std: 2.0,
            bandwidth_mean_window: 20,
            high_volatility_ratio: 1.3,
            squeeze_ratio: 0.8,
        }
    }
}

/// Monthly cross-asset scorer parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct LongTrendConfig {
    pub ema_fast: usize,
    pub ema_slow: usize,
    pub currency_ema: usize,
    pub bond_ema: usize,
    /// Primary/secondary ratio above which the secondary is cheap.
    pub secondary_cheap: f64,
    /// Primary/secondary ratio below which the secondary is rich.
    pub secondary_rich: f64,
    pub tertiary_deep_discount: f64,
    pub tertiary_cheap: f64,
}

impl Default for LongTrendConfig {
    fn default() -> Self {
        Self {
            ema_fast: 12,
            ema_slow: 24,
            currency_ema: 12,
            bond_ema: 12,
            secondary_cheap: 80.0,
            secondary_rich: 60.0,
            tertiary_deep_discount: 2.0,
            tertiary_cheap: 1.0,
        }
    }
}

/// SMA-crossover / RSI-extreme entry labelling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntryConfig {
    pub sma_fast: usize,
    pub sma_slow: usize,
    pub rsi_window: usize,
    pub oversold: f64,
    pub overbought: f64,
}

impl Default for EntryConfig {
    fn default() -> Self {
        Self {
            sma_fast: 20,
            sma_slow: 50,
            rsi_window: 14,
            oversold: 30.0,
            overbought: 70.0,
        }
    }
}

/// Daily/hourly top-down classifier parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TopDownConfig {
    pub sma_fast: usize,
    pub sma_slow: usize,
    pub rsi_window: usize,
    pub overbought: f64,
    pub oversold: f64,
}

impl Default for TopDownConfig {
    fn default() -> Self {
        Self {
            sma_fast: 20,
            sma_slow: 50,
            rsi_window: 14,
            overbought: 70.0,
            oversold: 30.0,
        }
    }
}

/// Analyzer configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzerConfig {
    /// Instrument being analyzed.
    pub ticker: String,
    pub pattern: PatternConfig,
    pub short_term: TrendScorerConfig,
    pub advanced: TrendScorerConfig,
    pub middle: MiddleTrendConfig,
    pub long: LongTrendConfig,
    pub entry: EntryConfig,
    pub top_down: TopDownConfig,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            ticker: "GC=F".to_string(),
            pattern: PatternConfig::default(),
            short_term: TrendScorerConfig::short_term(),
            advanced: TrendScorerConfig::advanced(),
            middle: MiddleTrendConfig::default(),
            long: LongTrendConfig::default(),
            entry: EntryConfig::default(),
            top_down: TopDownConfig::default(),
        }
    }
}

impl AnalyzerConfig {
    /// Defaults overridden by environment variables where present.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(ticker) = env::var("ANALYZER_TICKER") {
            if !ticker.trim().is_empty() {
                config.ticker = ticker;
            }
        }

        let threshold = parse_env("PATTERN_THRESHOLD").unwrap_or(config.pattern.threshold);
        let lookback = parse_env("PATTERN_LOOKBACK").unwrap_or(config.pattern.lookback);
        config.pattern = PatternConfig {
            threshold,
            lookback,
        };
        config.short_term.pattern = config.pattern;
        config.advanced.pattern = config.pattern;

        if let Some(rsi_window) = parse_env::<usize>("RSI_WINDOW").filter(|w| *w > 0) {
            config.short_term.rsi_window = rsi_window;
            config.advanced.rsi_window = rsi_window;
            config.middle.rsi_window = rsi_window;
            config.entry.rsi_window = rsi_window;
            config.top_down.rsi_window = rsi_window;
        }

        config
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.trim().parse().ok())
}
