pub mod analyzer;
pub mod evaluation;
pub mod patterns;
pub mod registry;
pub mod signals;
pub mod timeframe_report;
pub mod trend;

pub use analyzer::MetalAnalyzer;
pub use evaluation::{classify_move, grade, significant_moves, walk_forward};
pub use patterns::{detect_double_bottom, detect_double_top};
pub use registry::{resample, TimeframeRegistry};
pub use signals::{
    analyze_top_down, determine_entry_signals, entry_signals_for, Indicator, IndicatorValues,
};
pub use timeframe_report::{timeframe_details, TimeframeDetail};
pub use trend::{
    analyze_advanced_trend, analyze_long_trend, analyze_middle_trend, analyze_short_trend,
    score_trend, MacroPeers,
};
