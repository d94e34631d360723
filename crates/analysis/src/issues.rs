//! Threshold-rule issue detection.
//!
//! Detection is an ordered table of independent predicates. A campaign
//! may match any number of rules, and the table order is part of the
//! contract: tags are appended in table order, and the recommendation
//! mapping follows the same order.

use adpulse_core::config::ThresholdConfig;
use adpulse_core::types::IssueTag;

/// Per-campaign observation the rules evaluate against.
#[derive(Debug, Clone, Copy, Default)]
pub struct CampaignObservation {
    pub spend: f64,
    pub roas: f64,
    pub ctr: f64,
    pub cpc: f64,
    pub conversions: u64,
    pub days_running: u32,
}

/// One detection rule: the tag it emits and the predicate that fires it.
pub struct IssueRule {
    pub tag: IssueTag,
    pub applies: fn(&CampaignObservation, &ThresholdConfig) -> bool,
}

/// The detection table, in evaluation order.
pub const ISSUE_RULES: &[IssueRule] = &[
    // Spending more than it earns, with enough spend to matter.
    IssueRule {
        tag: IssueTag::NegativeRoi,
        applies: |obs, _| obs.roas < 1.0 && obs.spend > 50.0,
    },
    // Under half a percent CTR once the campaign has real delivery.
    IssueRule {
        tag: IssueTag::LowCtr,
        applies: |obs, _| obs.ctr < 0.005 && obs.spend > 25.0,
    },
    IssueRule {
        tag: IssueTag::HighCpc,
        applies: |obs, t| obs.cpc > t.high_cpc && obs.spend > 100.0,
    },
    // Too few conversions after a week of delivery.
    IssueRule {
        tag: IssueTag::LowConversions,
        applies: |obs, t| obs.conversions < t.low_conversions && obs.days_running > 7,
    },
    // Campaign may not be delivering at all.
    IssueRule {
        tag: IssueTag::NoSpend,
        applies: |obs, _| obs.spend == 0.0,
    },
];

/// Evaluate every rule in order, collecting the tags that fire.
pub fn detect_issues(obs: &CampaignObservation, thresholds: &ThresholdConfig) -> Vec<IssueTag> {
    ISSUE_RULES
        .iter()
        .filter(|rule| (rule.applies)(obs, thresholds))
        .map(|rule| rule.tag)
        .collect()
}
