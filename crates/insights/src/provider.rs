//! Seam between the analysis engine and the upstream advertising platform.

use crate::time_range::TimeRange;
use adpulse_core::error::AnalysisResult;
use adpulse_core::types::{CampaignRecord, CampaignStatus, InsightRow};

/// Source of campaign metadata and dated insight rows.
///
/// Retrieval, pagination, and authentication live behind this trait; the
/// engine only ever sees plain records. Implementations must be safe to
/// share across request handlers.
pub trait InsightsProvider: Send + Sync {
    /// List campaigns for an account, optionally filtered by status.
    fn campaigns(
        &self,
        account_id: &str,
        status: Option<CampaignStatus>,
    ) -> AnalysisResult<Vec<CampaignRecord>>;

    /// Dated insight rows for one campaign over the requested window.
    fn insights(&self, campaign_id: &str, range: &TimeRange) -> AnalysisResult<Vec<InsightRow>>;
}
