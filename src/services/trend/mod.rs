//! Multi-timeframe trend scorers.

pub mod long_term;
pub mod middle_term;
pub mod short_term;

pub use long_term::{analyze_long_trend, MacroPeers};
pub use middle_term::analyze_middle_trend;
pub use short_term::{analyze_advanced_trend, analyze_short_trend, score_trend};
