//! Campaign performance analysis engine — metric normalization, diagnostic
//! scoring, threshold-rule issue detection, recommendation generation, and
//! account-level aggregation.

pub mod account;
pub mod analyzer;
pub mod issues;
pub mod metrics;
pub mod recommend;
pub mod score;

pub use analyzer::{AnalysisReport, CampaignAnalyzer};
pub use issues::CampaignObservation;
pub use metrics::DerivedMetrics;
