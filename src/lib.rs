//! Metal Analyzer - multi-timeframe trend and risk scoring for precious-metal price series

pub mod config;
pub mod error;
pub mod services;
pub mod types;

// Re-export commonly used types
pub use config::AnalyzerConfig;
pub use error::{AnalyzerError, Result};
pub use services::{MacroPeers, MetalAnalyzer, TimeframeRegistry};
pub use types::*;
