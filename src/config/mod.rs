// src/config/mod.rs
pub mod analyzer;

pub use analyzer::{
    AnalysisConfig, AnalyzerConfig, FetchConfig, ENV_CONFIG_PATH, ENV_MIN_REVIEWS,
};
