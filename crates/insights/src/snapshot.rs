//! In-memory snapshot of campaign and insight data. Serves as the
//! provider implementation behind the ingest endpoint, startup fixtures,
//! and tests.

use crate::provider::InsightsProvider;
use crate::time_range::TimeRange;
use adpulse_core::error::{AnalysisError, AnalysisResult};
use adpulse_core::types::{CampaignRecord, CampaignStatus, InsightRow};
use chrono::NaiveDate;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

/// Normalize an account id to the `act_`-prefixed form the platform uses.
pub fn normalize_account_id(account_id: &str) -> AnalysisResult<String> {
    let trimmed = account_id.trim();
    if trimmed.is_empty() {
        return Err(AnalysisError::Input("account id cannot be empty".to_string()));
    }
    if trimmed.starts_with("act_") {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("act_{trimmed}"))
    }
}

/// Snapshot document for one account: campaigns plus date-keyed insight
/// rows per campaign. This is the fixture file format and the ingest
/// endpoint payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountSnapshot {
    pub account_id: String,
    #[serde(default)]
    pub campaigns: Vec<CampaignSnapshot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignSnapshot {
    pub campaign: CampaignRecord,
    /// Insight rows keyed by `YYYY-MM-DD` date.
    #[serde(default)]
    pub insights: BTreeMap<String, InsightRow>,
}

/// DashMap-backed snapshot store.
pub struct SnapshotProvider {
    /// Account id → campaign records.
    campaigns: DashMap<String, Vec<CampaignRecord>>,
    /// Campaign id → date → insight row.
    insights: DashMap<String, BTreeMap<String, InsightRow>>,
}

impl SnapshotProvider {
    pub fn new() -> Self {
        Self {
            campaigns: DashMap::new(),
            insights: DashMap::new(),
        }
    }

    /// Load one account snapshot, replacing any prior data for its
    /// campaigns. Returns the number of campaigns loaded.
    pub fn load_account(&self, snapshot: AccountSnapshot) -> AnalysisResult<usize> {
        let account_id = normalize_account_id(&snapshot.account_id)?;
        let mut records = Vec::with_capacity(snapshot.campaigns.len());
        for entry in snapshot.campaigns {
            self.insights.insert(entry.campaign.id.clone(), entry.insights);
            records.push(entry.campaign);
        }
        let count = records.len();
        self.campaigns.insert(account_id.clone(), records);
        info!(account_id = %account_id, campaigns = count, "Account snapshot loaded");
        Ok(count)
    }

    /// Load a JSON fixture file holding a list of account snapshots.
    /// Returns the number of accounts loaded.
    pub fn load_fixture(&self, path: &Path) -> AnalysisResult<usize> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AnalysisError::Config(format!("cannot read fixture {}: {e}", path.display()))
        })?;
        let snapshots: Vec<AccountSnapshot> = serde_json::from_str(&raw)?;
        let count = snapshots.len();
        for snapshot in snapshots {
            self.load_account(snapshot)?;
        }
        Ok(count)
    }

    /// Insert or replace a single campaign record for an account.
    pub fn put_campaign(&self, account_id: &str, record: CampaignRecord) -> AnalysisResult<()> {
        let account_id = normalize_account_id(account_id)?;
        let mut entry = self.campaigns.entry(account_id).or_default();
        entry.retain(|c| c.id != record.id);
        entry.push(record);
        Ok(())
    }

    /// Insert or replace the insight rows for one campaign.
    pub fn put_insights(&self, campaign_id: &str, rows: BTreeMap<String, InsightRow>) {
        self.insights.insert(campaign_id.to_string(), rows);
    }
}

impl Default for SnapshotProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightsProvider for SnapshotProvider {
    fn campaigns(
        &self,
        account_id: &str,
        status: Option<CampaignStatus>,
    ) -> AnalysisResult<Vec<CampaignRecord>> {
        let account_id = normalize_account_id(account_id)?;
        let records = self
            .campaigns
            .get(&account_id)
            .map(|entry| entry.clone())
            .unwrap_or_default();
        Ok(match status {
            Some(wanted) => records.into_iter().filter(|c| c.status == wanted).collect(),
            None => records,
        })
    }

    fn insights(&self, campaign_id: &str, range: &TimeRange) -> AnalysisResult<Vec<InsightRow>> {
        let rows = self
            .insights
            .get(campaign_id)
            .map(|entry| entry.clone())
            .unwrap_or_default();
        // BTreeMap iteration keeps rows in date order.
        Ok(rows
            .into_iter()
            .filter(|(date, _)| {
                NaiveDate::parse_from_str(date, "%Y-%m-%d")
                    .map(|d| range.contains(d))
                    .unwrap_or(false)
            })
            .map(|(_, row)| row)
            .collect())
    }
}
