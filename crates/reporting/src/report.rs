//! Shapes engine output into the transport response.

use crate::format::{format_currency, format_roas, format_score};
use adpulse_analysis::AnalysisReport;
use adpulse_core::types::{AccountAnalysis, AccountHealth, ActionItem, CampaignAnalysis, IssueTag};
use serde::{Deserialize, Serialize};

/// Top-level envelope for an account analysis request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<AnalysisBody>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalysisResponse {
    pub fn from_report(report: &AnalysisReport) -> Self {
        let body = match report {
            AnalysisReport::Complete(analysis) => {
                AnalysisBody::Report(Box::new(format_account_report(analysis)))
            }
            AnalysisReport::NoData { message } => AnalysisBody::NoData(NoDataBody {
                message: message.clone(),
                total_spend: 0.0,
                total_conversions: 0,
                average_roas: 0.0,
                account_health: AccountHealth::NoData,
            }),
        };
        Self {
            success: true,
            analysis: Some(body),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            analysis: None,
            error: Some(error.into()),
        }
    }
}

/// Body of a successful analysis. The no-data variant keeps the summary
/// fields flat with zeros, matching the empty-account contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalysisBody {
    Report(Box<AccountReportBody>),
    NoData(NoDataBody),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoDataBody {
    pub message: String,
    pub total_spend: f64,
    pub total_conversions: u64,
    pub average_roas: f64,
    pub account_health: AccountHealth,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountReportBody {
    pub summary: AccountSummary,
    pub top_performers: Vec<TopPerformerRow>,
    pub underperformers: Vec<UnderperformerRow>,
    pub recommendations: Vec<String>,
    pub action_items: Vec<ActionItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountSummary {
    pub total_spend: String,
    pub total_conversions: u64,
    pub average_roas: String,
    pub account_health: AccountHealth,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopPerformerRow {
    pub campaign_id: String,
    pub campaign_name: String,
    pub roas: String,
    pub spend: String,
    pub conversions: u64,
    pub performance_score: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnderperformerRow {
    pub campaign_id: String,
    pub campaign_name: String,
    pub roas: String,
    pub spend: String,
    pub conversions: u64,
    pub issues: Vec<IssueTag>,
    pub recommendation: String,
}

/// Shape a full account analysis for transport.
pub fn format_account_report(analysis: &AccountAnalysis) -> AccountReportBody {
    AccountReportBody {
        summary: AccountSummary {
            total_spend: format_currency(analysis.total_spend),
            total_conversions: analysis.total_conversions,
            average_roas: format_roas(analysis.average_roas),
            account_health: analysis.account_health,
        },
        top_performers: analysis
            .top_performers
            .iter()
            .map(top_performer_row)
            .collect(),
        underperformers: analysis
            .underperformers
            .iter()
            .map(underperformer_row)
            .collect(),
        recommendations: analysis.recommendations.clone(),
        action_items: analysis.action_items.clone(),
    }
}

fn top_performer_row(campaign: &CampaignAnalysis) -> TopPerformerRow {
    TopPerformerRow {
        campaign_id: campaign.campaign_id.clone(),
        campaign_name: campaign.campaign_name.clone(),
        roas: format_roas(campaign.roas),
        spend: format_currency(campaign.spend),
        conversions: campaign.conversions,
        performance_score: format_score(campaign.performance_score),
        reason: "High ROAS and consistent performance".to_string(),
    }
}

fn underperformer_row(campaign: &CampaignAnalysis) -> UnderperformerRow {
    UnderperformerRow {
        campaign_id: campaign.campaign_id.clone(),
        campaign_name: campaign.campaign_name.clone(),
        roas: format_roas(campaign.roas),
        spend: format_currency(campaign.spend),
        conversions: campaign.conversions,
        issues: campaign.issues.clone(),
        recommendation: "Consider pausing or adjusting targeting".to_string(),
    }
}
