//! One-shot account analysis pipeline.
//!
//! Per-campaign work is independent of every other campaign; the
//! aggregation step only runs once all per-campaign analyses exist.
//! Failures isolate at the campaign boundary: a campaign that cannot be
//! analyzed is logged and skipped, never aborting the account run.

use crate::issues::{self, CampaignObservation};
use crate::metrics::DerivedMetrics;
use crate::{account, recommend, score};
use adpulse_core::config::ThresholdConfig;
use adpulse_core::error::{AnalysisError, AnalysisResult};
use adpulse_core::types::{AccountAnalysis, CampaignAnalysis, CampaignRecord, CampaignStatus, RawInsightRecord};
use adpulse_insights::{InsightsProvider, TimeRange};
use chrono::Utc;
use tracing::{debug, warn};

/// Outcome of an account analysis run.
#[derive(Debug, Clone)]
pub enum AnalysisReport {
    /// Full report over at least one analyzable campaign.
    Complete(AccountAnalysis),
    /// Nothing to analyze; carries the user-facing message.
    NoData { message: String },
}

/// Campaign analysis engine. Thresholds are injected at construction and
/// never change afterward, so one analyzer is safe to share across
/// requests and distinct analyzers can run with different configurations.
pub struct CampaignAnalyzer {
    thresholds: ThresholdConfig,
}

impl CampaignAnalyzer {
    pub fn new(thresholds: ThresholdConfig) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &ThresholdConfig {
        &self.thresholds
    }

    /// Analyze all active campaigns in an account over the given window.
    ///
    /// Only a campaign-listing failure propagates; everything downstream
    /// degrades to skipping the affected campaign.
    pub fn analyze_account(
        &self,
        provider: &dyn InsightsProvider,
        account_id: &str,
        range: &TimeRange,
    ) -> AnalysisResult<AnalysisReport> {
        let campaigns = provider
            .campaigns(account_id, Some(CampaignStatus::Active))
            .map_err(|e| AnalysisError::Aggregation(format!("failed to get campaigns: {e}")))?;

        if campaigns.is_empty() {
            return Ok(AnalysisReport::NoData {
                message: "No active campaigns found to analyze".to_string(),
            });
        }

        let mut analyses = Vec::with_capacity(campaigns.len());
        for campaign in &campaigns {
            match self.analyze_campaign(provider, campaign, range) {
                Ok(analysis) => analyses.push(analysis),
                Err(e) => {
                    warn!(campaign_id = %campaign.id, error = %e, "Skipping campaign");
                }
            }
        }

        if analyses.is_empty() {
            return Ok(AnalysisReport::NoData {
                message: "No campaign data available for analysis".to_string(),
            });
        }

        debug!(
            account_id,
            analyzed = analyses.len(),
            skipped = campaigns.len() - analyses.len(),
            "Aggregating campaign analyses"
        );
        Ok(AnalysisReport::Complete(account::aggregate(
            analyses,
            &self.thresholds,
        )))
    }

    fn analyze_campaign(
        &self,
        provider: &dyn InsightsProvider,
        campaign: &CampaignRecord,
        range: &TimeRange,
    ) -> AnalysisResult<CampaignAnalysis> {
        if campaign.id.is_empty() {
            return Err(AnalysisError::Input("campaign record has no id".to_string()));
        }

        let rows = provider
            .insights(&campaign.id, range)
            .map_err(|e| AnalysisError::UpstreamFetch(e.to_string()))?;

        // Most recent row wins when the window spans multiple dates.
        let latest = rows
            .iter()
            .max_by(|a, b| a.date_start.cmp(&b.date_start))
            .ok_or_else(|| AnalysisError::Computation {
                campaign_id: campaign.id.clone(),
                message: "no insight rows in window".to_string(),
            })?;

        let record = RawInsightRecord::from_row(latest);
        let derived = DerivedMetrics::from_record(&record);
        let days_running = days_running(campaign, range);

        let performance_score = score::compute_score(
            record.spend,
            derived.roas,
            derived.ctr,
            record.conversions,
            &self.thresholds,
        );

        let obs = CampaignObservation {
            spend: record.spend,
            roas: derived.roas,
            ctr: derived.ctr,
            cpc: derived.cpc,
            conversions: record.conversions,
            days_running,
        };
        let issues = issues::detect_issues(&obs, &self.thresholds);
        let recommendations = recommend::generate(&obs, &issues, &self.thresholds);

        Ok(CampaignAnalysis {
            campaign_id: campaign.id.clone(),
            campaign_name: campaign.name.clone(),
            spend: record.spend,
            impressions: record.impressions,
            clicks: record.clicks,
            conversions: record.conversions,
            conversion_value: record.conversion_value,
            ctr: derived.ctr,
            cpc: derived.cpc,
            cpm: derived.cpm,
            roas: derived.roas,
            status: campaign.status,
            days_running,
            performance_score,
            issues,
            recommendations,
        })
    }
}

/// Days the campaign has been live, capped at the window upper bound.
/// Unknown creation times count as the full window; the lifetime preset
/// has no cap and falls back to 30 when the age is also unknown.
fn days_running(campaign: &CampaignRecord, range: &TimeRange) -> u32 {
    let cap = range.window_days();
    let age = campaign
        .created_time
        .map(|created| (Utc::now() - created).num_days().max(0) as u32);
    match (age, cap) {
        (Some(age), Some(cap)) => age.min(cap),
        (Some(age), None) => age,
        (None, Some(cap)) => cap,
        (None, None) => 30,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn make_campaign(created_days_ago: Option<i64>) -> CampaignRecord {
        CampaignRecord {
            id: "c1".to_string(),
            name: "Test".to_string(),
            status: CampaignStatus::Active,
            created_time: created_days_ago.map(|d| Utc::now() - Duration::days(d)),
        }
    }

    #[test]
    fn test_days_running_capped_by_window() {
        let campaign = make_campaign(Some(90));
        assert_eq!(days_running(&campaign, &TimeRange::Last30d), 30);
        assert_eq!(days_running(&campaign, &TimeRange::Last7d), 7);
    }

    #[test]
    fn test_days_running_young_campaign() {
        let campaign = make_campaign(Some(3));
        assert_eq!(days_running(&campaign, &TimeRange::Last30d), 3);
    }

    #[test]
    fn test_days_running_without_created_time() {
        let campaign = make_campaign(None);
        assert_eq!(days_running(&campaign, &TimeRange::Last30d), 30);
        assert_eq!(days_running(&campaign, &TimeRange::Last14d), 14);
        // Lifetime has no cap; unknown age falls back to 30.
        assert_eq!(days_running(&campaign, &TimeRange::Lifetime), 30);
    }

    #[test]
    fn test_days_running_lifetime_uses_raw_age() {
        let campaign = make_campaign(Some(200));
        assert_eq!(days_running(&campaign, &TimeRange::Lifetime), 200);
    }
}
