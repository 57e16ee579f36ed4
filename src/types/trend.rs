//! Vocabulary of the middle-term (weekly/daily) and long-term (monthly,
//! cross-asset) scorers.

use serde::{Deserialize, Serialize};

/// Weekly EMA structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeeklyStructure {
    #[serde(rename = "強気トレンド (Deep Snow 安定)")]
    StableUptrend,
    #[serde(rename = "調整局面だがトレンド維持 (Deep Snow 継続)")]
    PullbackInUptrend,
    #[serde(rename = "トレンド崩壊の危機 (雪解け警戒)")]
    TrendBreaking,
    #[serde(rename = "レンジ/下降トレンド")]
    RangeOrDowntrend,
    #[serde(rename = "不明")]
    Unknown,
}

impl WeeklyStructure {
    /// The long uptrend still stands.
    pub fn is_uptrend_intact(&self) -> bool {
        matches!(
            self,
            WeeklyStructure::StableUptrend | WeeklyStructure::PullbackInUptrend
        )
    }
}

/// Daily RSI / MACD-slope reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DailyMomentum {
    #[serde(rename = "下落過熱 (売られすぎ水準)")]
    OverheatedDecline,
    #[serde(rename = "下落圧力強 (表層雪崩発生中)")]
    StrongSellingPressure,
    #[serde(rename = "上昇モメンタム (安定)")]
    StableUpMomentum,
    #[serde(rename = "回復の兆し (雪崩停止)")]
    RecoverySigns,
    #[serde(rename = "不明")]
    Unknown,
}

impl DailyMomentum {
    pub fn is_declining(&self) -> bool {
        matches!(
            self,
            DailyMomentum::OverheatedDecline | DailyMomentum::StrongSellingPressure
        )
    }
}

/// Daily Bollinger bandwidth regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VolatilityRegime {
    #[serde(rename = "⚠️ 高ボラティリティ (Warsh Mode)")]
    HighVolatility,
    #[serde(rename = "収縮 (Squeeze)")]
    Squeeze,
    #[serde(rename = "通常 (Normal)")]
    Normal,
    #[serde(rename = "不明")]
    Unknown,
}

/// Decision-tree outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    #[serde(rename = "★ 戦略的買い (Deep Dip Buy)")]
    DipBuy,
    #[serde(rename = "押し目待ち (Wait for Bottom)")]
    WaitForBottom,
    #[serde(rename = "慎重なトレンドフォロー")]
    CautiousTrendFollow,
    #[serde(rename = "継続保有 (Hold)")]
    Hold,
    #[serde(rename = "リバウンド狙い (短期)")]
    ReboundPlay,
    #[serde(rename = "売り/静観")]
    StandAside,
    #[serde(rename = "様子見")]
    Wait,
}

impl Strategy {
    pub fn narrative(&self) -> &'static str {
        match self {
            Strategy::DipBuy => "長期トレンドは維持されています。短期的な急落は「表層雪崩」であり、絶好の買い場となる可能性があります（根雪は溶けていません）。",
            Strategy::WaitForBottom => "長期は上ですが、短期的な下げ止まりを待つべきです。落ちてくるナイフに注意。",
            Strategy::CautiousTrendFollow => "トレンドは上ですが、ボラティリティが高まっています（Warsh Mode）。ポジションサイズを落としてついていく局面です。",
            Strategy::Hold => "長期・短期ともに安定しています。利益を伸ばすフェーズです。",
            Strategy::ReboundPlay => "全体的なトレンドは弱いため、短期的な自律反発狙いに留めるべきです。",
            Strategy::StandAside => "長期トレンドが弱く、積極的な買い場ではありません。",
            Strategy::Wait => "",
        }
    }
}

/// Result of the middle-term scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MiddleTrendReport {
    pub dashboard_1_weekly: WeeklyStructure,
    pub dashboard_2_daily: DailyMomentum,
    pub dashboard_3_volatility: VolatilityRegime,
    pub dashboard_4_strategy: Strategy,
    pub final_prediction: String,
}

impl MiddleTrendReport {
    pub fn insufficient_data() -> Self {
        Self {
            dashboard_1_weekly: WeeklyStructure::Unknown,
            dashboard_2_daily: DailyMomentum::Unknown,
            dashboard_3_volatility: VolatilityRegime::Unknown,
            dashboard_4_strategy: Strategy::Wait,
            final_prediction: super::INSUFFICIENT_DATA.to_string(),
        }
    }
}

/// Primary metal against its monthly EMAs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetalTrend {
    #[serde(rename = "長期上昇 (通貨価値下落)")]
    LongTermUptrend,
    #[serde(rename = "長期調整")]
    Correction,
    #[serde(rename = "中立")]
    Neutral,
}

impl MetalTrend {
    pub fn label(&self) -> &'static str {
        match self {
            MetalTrend::LongTermUptrend => "長期上昇 (通貨価値下落)",
            MetalTrend::Correction => "長期調整",
            MetalTrend::Neutral => "中立",
        }
    }
}

/// Currency index against its monthly EMA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CurrencyTrend {
    #[serde(rename = "ドル安トレンド (金に追い風)")]
    WeakCurrency,
    #[serde(rename = "ドル高傾向 (金に逆風)")]
    StrongCurrency,
    #[serde(rename = "不明")]
    Unknown,
}

impl CurrencyTrend {
    pub fn label(&self) -> &'static str {
        match self {
            CurrencyTrend::WeakCurrency => "ドル安トレンド (金に追い風)",
            CurrencyTrend::StrongCurrency => "ドル高傾向 (金に逆風)",
            CurrencyTrend::Unknown => "不明",
        }
    }
}

/// Primary/secondary metal ratio bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecondaryValuation {
    HistoricallyCheap,
    Fair,
    RichlyValued,
}

/// Primary/tertiary metal ratio bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TertiaryValuation {
    DeepDiscount,
    Cheap,
    Expensive,
}

/// Relative-value readings; absent peers are skipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatioReadings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary: Option<(SecondaryValuation, f64)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tertiary: Option<(TertiaryValuation, f64)>,
}

impl RatioReadings {
    /// Either peer screens as cheap against the primary metal.
    pub fn any_cheap(&self) -> bool {
        matches!(self.secondary, Some((SecondaryValuation::HistoricallyCheap, _)))
            || matches!(
                self.tertiary,
                Some((TertiaryValuation::DeepDiscount | TertiaryValuation::Cheap, _))
            )
    }

    /// Narrative list, one entry per available ratio.
    pub fn narratives(&self) -> Vec<String> {
        let mut out = Vec::new();
        if let Some((valuation, gsr)) = self.secondary {
            out.push(match valuation {
                SecondaryValuation::HistoricallyCheap => format!("銀が歴史的割安 (GSR: {gsr:.1})"),
                SecondaryValuation::RichlyValued => format!("銀の割安感解消 (GSR: {gsr:.1})"),
                SecondaryValuation::Fair => format!("GSR適正圏 (GSR: {gsr:.1})"),
            });
        }
        if let Some((valuation, ratio)) = self.tertiary {
            out.push(match valuation {
                TertiaryValuation::DeepDiscount => format!("プラチナ超割安 (倍率: {ratio:.1})"),
                TertiaryValuation::Cheap => format!("プラチナ割安 (倍率: {ratio:.1})"),
                TertiaryValuation::Expensive => format!("プラチナ高値 (倍率: {ratio:.1})"),
            });
        }
        out
    }

    /// Joined narrative, or the data-shortage marker.
    pub fn summary(&self) -> String {
        let parts = self.narratives();
        if parts.is_empty() {
            "データ不足".to_string()
        } else {
            parts.join(", ")
        }
    }
}

/// Bond-proxy reading of real yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MacroView {
    #[serde(rename = "実質金利低下傾向 (金に強力な追い風)")]
    FallingRealYields,
    #[serde(rename = "実質金利上昇傾向 (金の上値重い)")]
    RisingRealYields,
    #[serde(rename = "中立")]
    Neutral,
    #[serde(rename = "不明")]
    Unknown,
}

/// Recommended allocation band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Allocation {
    #[serde(rename = "20-25% (積極投資)")]
    Aggressive,
    #[serde(rename = "10-15% (買い増し推奨)")]
    Accumulate,
    #[serde(rename = "5% (最低限のヘッジ)")]
    MinimumHedge,
    #[serde(rename = "不明")]
    Unknown,
}

impl Allocation {
    /// Band for a portfolio score.
    pub fn from_score(score: i32) -> Self {
        match score {
            s if s >= 5 => Allocation::Aggressive,
            s if s >= 3 => Allocation::Accumulate,
            _ => Allocation::MinimumHedge,
        }
    }

    pub fn narrative(&self) -> &'static str {
        match self {
            Allocation::Aggressive => "全指標が好転しています。法定通貨のリスクヘッジとして、そして値上がり益を狙う資産として最大級の組み入れを推奨します。銀やプラチナへの分散も効果的です。",
            Allocation::Accumulate => "ファンダメンタルズは良好です。押し目を見つけてポートフォリオの比率を高めるべき局面です。",
            Allocation::MinimumHedge => "マクロ環境は逆風ですが、保険としての保有は継続すべきです。積極的な買い増しはマクロ指標の好転を待ちましょう。",
            Allocation::Unknown => "",
        }
    }
}

/// Result of the long-term scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LongTrendReport {
    /// `"{metal trend} / {currency trend}"`.
    pub dashboard_1_currency: String,
    pub dashboard_2_ratio: String,
    pub dashboard_3_macro: MacroView,
    pub dashboard_4_portfolio: Allocation,
    pub final_prediction: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metal_trend: Option<MetalTrend>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_trend: Option<CurrencyTrend>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ratios: Option<RatioReadings>,
    pub portfolio_score: i32,
}

impl LongTrendReport {
    /// Returned when the primary metal series is empty.
    pub fn insufficient_data() -> Self {
        Self {
            dashboard_1_currency: "不明".to_string(),
            dashboard_2_ratio: "不明".to_string(),
            dashboard_3_macro: MacroView::Unknown,
            dashboard_4_portfolio: Allocation::Unknown,
            final_prediction: "金のデータが不足しています。".to_string(),
            metal_trend: None,
            currency_trend: None,
            ratios: None,
            portfolio_score: 0,
        }
    }
}
