//! Vocabulary of the short-horizon classifiers.
//!
//! Every variant serializes to the fixed label downstream formatters match
//! on, so a serialized report is the flat `dashboard_* / final_prediction /
//! risk_level / comment` mapping.

use serde::{Deserialize, Serialize};

/// Dashboard 1: EMA perfect order on the 4-hour series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrendState {
    #[serde(rename = "パーフェクトオーダー (強気下降)")]
    BearishPerfectOrder,
    #[serde(rename = "パーフェクトオーダー (強気上昇)")]
    BullishPerfectOrder,
    #[serde(rename = "トレンド転換点/混在")]
    Mixed,
    #[serde(rename = "不明")]
    Unknown,
}

impl TrendState {
    pub fn label(&self) -> &'static str {
        match self {
            TrendState::BearishPerfectOrder => "パーフェクトオーダー (強気下降)",
            TrendState::BullishPerfectOrder => "パーフェクトオーダー (強気上昇)",
            TrendState::Mixed => "トレンド転換点/混在",
            TrendState::Unknown => "不明",
        }
    }

    /// Signed weight in the aggregate score.
    pub fn contribution(&self) -> i32 {
        match self {
            TrendState::BearishPerfectOrder => -3,
            TrendState::BullishPerfectOrder => 3,
            TrendState::Mixed | TrendState::Unknown => 0,
        }
    }
}

/// Dashboard 2: distance of the 1-hour close from its EMA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MomentumState {
    #[serde(rename = "下落の勢い強い")]
    StrongDown,
    #[serde(rename = "上昇の勢い強い")]
    StrongUp,
    #[serde(rename = "穏やか")]
    Calm,
    #[serde(rename = "不明")]
    Unknown,
}

impl MomentumState {
    pub fn label(&self) -> &'static str {
        match self {
            MomentumState::StrongDown => "下落の勢い強い",
            MomentumState::StrongUp => "上昇の勢い強い",
            MomentumState::Calm => "穏やか",
            MomentumState::Unknown => "不明",
        }
    }

    pub fn contribution(&self) -> i32 {
        match self {
            MomentumState::StrongDown => -1,
            MomentumState::StrongUp => 1,
            MomentumState::Calm | MomentumState::Unknown => 0,
        }
    }
}

/// Dashboard 3: recent bar ranges against their baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VolatilityState {
    #[serde(rename = "ブレイクアウト/加速中")]
    Breakout,
    #[serde(rename = "安定")]
    Stable,
    #[serde(rename = "不明")]
    Unknown,
}

impl VolatilityState {
    pub fn label(&self) -> &'static str {
        match self {
            VolatilityState::Breakout => "ブレイクアウト/加速中",
            VolatilityState::Stable => "安定",
            VolatilityState::Unknown => "不明",
        }
    }
}

/// Dashboard 4: key lines, chart patterns and reversal cues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentState {
    #[serde(rename = "重要ライン割れ (暴落確定)")]
    NecklineBreakdown,
    #[serde(rename = "重要ラインでの攻防 (Top)")]
    NecklineDefense,
    #[serde(rename = "Wボトム ネックライン上抜け (反発確定)")]
    NecklineBreakout,
    #[serde(rename = "Wボトム形成中 (反発期待)")]
    BottomForming,
    #[serde(rename = "強力な反発シグナル (Pinbar + Support)")]
    PinBarReversal,
    #[serde(rename = "RSIダイバージェンス (底打ち示唆)")]
    RsiDivergence,
    #[serde(rename = "200EMAサポート (押し目)")]
    Ema200Support,
    #[serde(rename = "新安値更新")]
    NewLow,
    #[serde(rename = "新高値更新")]
    NewHigh,
    #[serde(rename = "レンジ内")]
    Range,
    #[serde(rename = "不明")]
    Unknown,
}

impl SentimentState {
    pub fn label(&self) -> &'static str {
        match self {
            SentimentState::NecklineBreakdown => "重要ライン割れ (暴落確定)",
            SentimentState::NecklineDefense => "重要ラインでの攻防 (Top)",
            SentimentState::NecklineBreakout => "Wボトム ネックライン上抜け (反発確定)",
            SentimentState::BottomForming => "Wボトム形成中 (反発期待)",
            SentimentState::PinBarReversal => "強力な反発シグナル (Pinbar + Support)",
            SentimentState::RsiDivergence => "RSIダイバージェンス (底打ち示唆)",
            SentimentState::Ema200Support => "200EMAサポート (押し目)",
            SentimentState::NewLow => "新安値更新",
            SentimentState::NewHigh => "新高値更新",
            SentimentState::Range => "レンジ内",
            SentimentState::Unknown => "不明",
        }
    }

    pub fn contribution(&self) -> i32 {
        match self {
            SentimentState::NecklineBreakdown => -5,
            SentimentState::NecklineBreakout => 5,
            SentimentState::PinBarReversal => 4,
            SentimentState::RsiDivergence => 3,
            SentimentState::BottomForming | SentimentState::Ema200Support => 2,
            SentimentState::NewHigh => 2,
            SentimentState::NewLow => -2,
            SentimentState::NecklineDefense | SentimentState::Range | SentimentState::Unknown => 0,
        }
    }
}

/// Final categorical prediction of the four-dashboard scorers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Prediction {
    #[serde(rename = "様子見")]
    Wait,
    #[serde(rename = "⚠️ 大暴落加速 (Great Crash Acceleration)")]
    CrashAcceleration,
    #[serde(rename = "🚀 急騰加速 (Surge Acceleration)")]
    SurgeAcceleration,
    #[serde(rename = "続落注意")]
    ContinuedDecline,
    #[serde(rename = "底堅い/反発")]
    Rebound,
}

impl Prediction {
    pub fn label(&self) -> &'static str {
        match self {
            Prediction::Wait => "様子見",
            Prediction::CrashAcceleration => "⚠️ 大暴落加速 (Great Crash Acceleration)",
            Prediction::SurgeAcceleration => "🚀 急騰加速 (Surge Acceleration)",
            Prediction::ContinuedDecline => "続落注意",
            Prediction::Rebound => "底堅い/反発",
        }
    }

    /// Acceleration buckets are the strong calls.
    pub fn is_acceleration(&self) -> bool {
        matches!(
            self,
            Prediction::CrashAcceleration | Prediction::SurgeAcceleration
        )
    }
}

/// Ordinal risk attached to a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(rename = "低")]
    Low,
    #[serde(rename = "中")]
    Medium,
    #[serde(rename = "高い")]
    High,
    #[serde(rename = "極めて高い")]
    Extreme,
}

impl RiskLevel {
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "低",
            RiskLevel::Medium => "中",
            RiskLevel::High => "高い",
            RiskLevel::Extreme => "極めて高い",
        }
    }
}

/// Result of the short-term or advanced four-dashboard scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendScore {
    pub dashboard_1_trend: TrendState,
    pub dashboard_2_momentum: MomentumState,
    pub dashboard_3_volatility: VolatilityState,
    pub dashboard_4_sentiment: SentimentState,
    /// Aggregate after volatility amplification.
    pub score: f64,
    pub final_prediction: Prediction,
    pub risk_level: RiskLevel,
    pub comment: String,
}

impl TrendScore {
    /// Returned when any required series is empty.
    pub fn insufficient_data() -> Self {
        Self {
            dashboard_1_trend: TrendState::Unknown,
            dashboard_2_momentum: MomentumState::Unknown,
            dashboard_3_volatility: VolatilityState::Unknown,
            dashboard_4_sentiment: SentimentState::Unknown,
            score: 0.0,
            final_prediction: Prediction::Wait,
            risk_level: RiskLevel::Medium,
            comment: INSUFFICIENT_DATA.to_string(),
        }
    }

    pub fn is_insufficient(&self) -> bool {
        self.comment == INSUFFICIENT_DATA
    }
}

/// Comment carried by every insufficient-data sentinel.
pub const INSUFFICIENT_DATA: &str = "十分なデータがありません。";

/// Per-bar entry label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntrySignal {
    Buy,
    Sell,
    Wait,
}

impl EntrySignal {
    /// +1 / -1 / 0 encoding.
    pub fn value(&self) -> i8 {
        match self {
            EntrySignal::Buy => 1,
            EntrySignal::Sell => -1,
            EntrySignal::Wait => 0,
        }
    }
}

/// Combined daily/hourly signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TopDownAction {
    #[serde(rename = "様子見 (Wait)")]
    Wait,
    #[serde(rename = "買い (STRONG BUY)")]
    StrongBuy,
    #[serde(rename = "買い検討 (Wait for Dip)")]
    BuyOnDip,
    #[serde(rename = "売り (STRONG SELL)")]
    StrongSell,
    #[serde(rename = "売り検討 (Wait for Pullback)")]
    SellOnRally,
}

impl TopDownAction {
    pub fn label(&self) -> &'static str {
        match self {
            TopDownAction::Wait => "様子見 (Wait)",
            TopDownAction::StrongBuy => "買い (STRONG BUY)",
            TopDownAction::BuyOnDip => "買い検討 (Wait for Dip)",
            TopDownAction::StrongSell => "売り (STRONG SELL)",
            TopDownAction::SellOnRally => "売り検討 (Wait for Pullback)",
        }
    }
}

/// Daily trend from SMA ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DailyTrend {
    #[serde(rename = "上昇 (Uptrend)")]
    Up,
    #[serde(rename = "下降 (Downtrend)")]
    Down,
    #[serde(rename = "レンジ/不明")]
    Range,
    #[serde(rename = "不明")]
    Unknown,
}

/// Hourly state from close vs SMA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HourlyTrend {
    #[serde(rename = "短期上昇")]
    ShortUp,
    #[serde(rename = "短期下降")]
    ShortDown,
    #[serde(rename = "レンジ/不明")]
    Range,
    #[serde(rename = "不明")]
    Unknown,
}

/// Output of the top-down classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopDownReport {
    pub signal: TopDownAction,
    pub prediction: String,
    pub daily_trend: DailyTrend,
    pub hourly_trend: HourlyTrend,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hourly_rsi: Option<f64>,
}
