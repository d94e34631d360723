use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ─── Input Records ──────────────────────────────────────────────────────

/// Campaign metadata as supplied by the retrieval layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub status: CampaignStatus,
    /// Creation timestamp, when the platform reports one.
    #[serde(default)]
    pub created_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CampaignStatus {
    Active,
    #[default]
    Paused,
    Deleted,
    Archived,
}

/// One dated measurement as returned by the insights API. Numeric fields
/// arrive as strings on the wire ("12.34"), occasionally as bare numbers,
/// and may be absent entirely.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InsightRow {
    #[serde(default)]
    pub spend: serde_json::Value,
    #[serde(default)]
    pub impressions: serde_json::Value,
    #[serde(default)]
    pub clicks: serde_json::Value,
    #[serde(default)]
    pub conversions: serde_json::Value,
    #[serde(default)]
    pub conversion_value: serde_json::Value,
    #[serde(default)]
    pub date_start: String,
    #[serde(default)]
    pub date_stop: String,
}

/// A normalized measurement: every numeric field parsed, with missing or
/// unparsable values coalesced to zero.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RawInsightRecord {
    pub spend: f64,
    pub impressions: u64,
    pub clicks: u64,
    pub conversions: u64,
    pub conversion_value: f64,
    pub date_start: Option<NaiveDate>,
    pub date_stop: Option<NaiveDate>,
}

impl RawInsightRecord {
    /// Normalize a wire row. Fails closed: bad numeric fields become zero,
    /// never an error.
    pub fn from_row(row: &InsightRow) -> Self {
        Self {
            spend: coalesce_f64(&row.spend),
            impressions: coalesce_u64(&row.impressions),
            clicks: coalesce_u64(&row.clicks),
            conversions: coalesce_u64(&row.conversions),
            conversion_value: coalesce_f64(&row.conversion_value),
            date_start: parse_date(&row.date_start),
            date_stop: parse_date(&row.date_stop),
        }
    }
}

fn coalesce_f64(value: &serde_json::Value) -> f64 {
    match value {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(0.0),
        serde_json::Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

fn coalesce_u64(value: &serde_json::Value) -> u64 {
    match value {
        serde_json::Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().map(|f| f.max(0.0) as u64))
            .unwrap_or(0),
        serde_json::Value::String(s) => {
            let trimmed = s.trim();
            trimmed
                .parse::<u64>()
                .ok()
                .or_else(|| trimmed.parse::<f64>().ok().map(|f| f.max(0.0) as u64))
                .unwrap_or(0)
        }
        _ => 0,
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

// ─── Analysis Results ───────────────────────────────────────────────────

/// Diagnostic tag attached to a campaign by the issue detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueTag {
    NegativeRoi,
    LowCtr,
    HighCpc,
    LowConversions,
    NoSpend,
}

impl IssueTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueTag::NegativeRoi => "negative_roi",
            IssueTag::LowCtr => "low_ctr",
            IssueTag::HighCpc => "high_cpc",
            IssueTag::LowConversions => "low_conversions",
            IssueTag::NoSpend => "no_spend",
        }
    }
}

/// Full analysis of a single campaign over the requested window. Built
/// once per run and never mutated afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignAnalysis {
    pub campaign_id: String,
    pub campaign_name: String,
    pub spend: f64,
    pub impressions: u64,
    pub clicks: u64,
    pub conversions: u64,
    pub conversion_value: f64,
    pub ctr: f64,
    pub cpc: f64,
    pub cpm: f64,
    pub roas: f64,
    pub status: CampaignStatus,
    pub days_running: u32,
    pub performance_score: f64,
    pub issues: Vec<IssueTag>,
    pub recommendations: Vec<String>,
}

/// Coarse qualitative account health bucket, derived from average ROAS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountHealth {
    Excellent,
    Good,
    Fair,
    #[serde(rename = "Needs Attention")]
    NeedsAttention,
    #[serde(rename = "No Data")]
    NoData,
}

impl AccountHealth {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountHealth::Excellent => "Excellent",
            AccountHealth::Good => "Good",
            AccountHealth::Fair => "Fair",
            AccountHealth::NeedsAttention => "Needs Attention",
            AccountHealth::NoData => "No Data",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Sort rank: high items first.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    PauseCampaign,
    ReviewCreative,
    IncreaseBudget,
}

/// Prioritized operational action tied to one campaign. Scoped to a
/// single analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionItem {
    pub priority: Priority,
    pub action: ActionKind,
    pub campaign_id: String,
    pub campaign_name: String,
    pub reason: String,
}

/// Account-level rollup of per-campaign analyses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountAnalysis {
    pub total_spend: f64,
    pub total_conversions: u64,
    pub average_roas: f64,
    pub account_health: AccountHealth,
    pub top_performers: Vec<CampaignAnalysis>,
    pub underperformers: Vec<CampaignAnalysis>,
    pub recommendations: Vec<String>,
    pub action_items: Vec<ActionItem>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_string_fields() {
        let row = InsightRow {
            spend: json!("125.50"),
            impressions: json!("10000"),
            clicks: json!("250"),
            conversions: json!("12"),
            conversion_value: json!("430.00"),
            date_start: "2025-06-01".to_string(),
            date_stop: "2025-06-30".to_string(),
        };
        let record = RawInsightRecord::from_row(&row);
        assert_eq!(record.spend, 125.50);
        assert_eq!(record.impressions, 10000);
        assert_eq!(record.clicks, 250);
        assert_eq!(record.conversions, 12);
        assert_eq!(record.conversion_value, 430.00);
        assert!(record.date_start.is_some());
    }

    #[test]
    fn test_normalize_numeric_fields() {
        let row = InsightRow {
            spend: json!(125.5),
            impressions: json!(10000),
            clicks: json!(250),
            conversions: json!(12),
            conversion_value: json!(430.0),
            ..Default::default()
        };
        let record = RawInsightRecord::from_row(&row);
        assert_eq!(record.spend, 125.5);
        assert_eq!(record.impressions, 10000);
    }

    #[test]
    fn test_normalize_fails_closed() {
        let row = InsightRow {
            spend: json!("not-a-number"),
            impressions: serde_json::Value::Null,
            clicks: json!(true),
            date_start: "garbage".to_string(),
            ..Default::default()
        };
        let record = RawInsightRecord::from_row(&row);
        assert_eq!(record.spend, 0.0);
        assert_eq!(record.impressions, 0);
        assert_eq!(record.clicks, 0);
        assert_eq!(record.conversions, 0);
        assert!(record.date_start.is_none());
    }

    #[test]
    fn test_issue_tag_serialization() {
        assert_eq!(
            serde_json::to_string(&IssueTag::NegativeRoi).unwrap(),
            "\"negative_roi\""
        );
        assert_eq!(IssueTag::NoSpend.as_str(), "no_spend");
    }

    #[test]
    fn test_account_health_serialization() {
        assert_eq!(
            serde_json::to_string(&AccountHealth::NeedsAttention).unwrap(),
            "\"Needs Attention\""
        );
        assert_eq!(
            serde_json::to_string(&AccountHealth::NoData).unwrap(),
            "\"No Data\""
        );
    }

    #[test]
    fn test_campaign_status_wire_format() {
        let status: CampaignStatus = serde_json::from_str("\"ACTIVE\"").unwrap();
        assert_eq!(status, CampaignStatus::Active);
    }

    #[test]
    fn test_priority_rank_ordering() {
        assert!(Priority::High.rank() < Priority::Medium.rank());
        assert!(Priority::Medium.rank() < Priority::Low.rank());
    }
}
