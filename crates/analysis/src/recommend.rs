//! Issue-driven recommendation mapping.

use crate::issues::CampaignObservation;
use adpulse_core::config::ThresholdConfig;
use adpulse_core::types::IssueTag;

/// Fixed issue → recommendation texts, in detection order. Each matched
/// issue contributes all of its texts. The no-spend tag intentionally
/// maps to nothing: there is no delivery to optimize.
const ISSUE_RECOMMENDATIONS: &[(IssueTag, &[&str])] = &[
    (
        IssueTag::NegativeRoi,
        &[
            "Consider pausing campaign - negative return on investment",
            "Review targeting and creative to improve performance",
        ],
    ),
    (
        IssueTag::LowCtr,
        &[
            "Test different ad creative or copy",
            "Review audience targeting for relevance",
        ],
    ),
    (
        IssueTag::HighCpc,
        &[
            "Consider bid strategy adjustments",
            "Review audience size and competition",
        ],
    ),
    (
        IssueTag::LowConversions,
        &[
            "Review landing page experience",
            "Test different call-to-action buttons",
        ],
    ),
];

/// Map detected issues to recommendations. When no issue-driven text
/// applies, fall back to growth suggestions for campaigns that are
/// doing well; the fallbacks are checked in order and at most one fires.
pub fn generate(
    obs: &CampaignObservation,
    issues: &[IssueTag],
    thresholds: &ThresholdConfig,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    for (tag, texts) in ISSUE_RECOMMENDATIONS {
        if issues.contains(tag) {
            recommendations.extend(texts.iter().map(|t| t.to_string()));
        }
    }

    if recommendations.is_empty() && obs.roas > thresholds.good_roas {
        recommendations.push("Campaign performing well - consider increasing budget".to_string());
    }
    if recommendations.is_empty() && obs.ctr > thresholds.good_ctr / 100.0 {
        recommendations.push("Good engagement - test audience expansion".to_string());
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issues::detect_issues;

    fn thresholds() -> ThresholdConfig {
        ThresholdConfig::default()
    }

    #[test]
    fn test_negative_roi_gets_pause_suggestion() {
        let obs = CampaignObservation {
            spend: 200.0,
            roas: 0.0,
            ..Default::default()
        };
        let issues = detect_issues(&obs, &thresholds());
        let recs = generate(&obs, &issues, &thresholds());
        assert!(recs.iter().any(|r| r.contains("pausing campaign")));
    }

    #[test]
    fn test_each_issue_contributes_two_texts_in_order() {
        let obs = CampaignObservation {
            spend: 200.0,
            roas: 0.4,
            ctr: 0.002,
            ..Default::default()
        };
        let issues = vec![IssueTag::NegativeRoi, IssueTag::LowCtr];
        let recs = generate(&obs, &issues, &thresholds());
        assert_eq!(recs.len(), 4);
        assert!(recs[0].contains("pausing campaign"));
        assert!(recs[2].contains("ad creative or copy"));
    }

    #[test]
    fn test_roas_fallback_preempts_ctr_fallback() {
        let obs = CampaignObservation {
            spend: 100.0,
            roas: 4.0,
            ctr: 0.03,
            conversions: 20,
            ..Default::default()
        };
        let recs = generate(&obs, &[], &thresholds());
        assert_eq!(
            recs,
            vec!["Campaign performing well - consider increasing budget"]
        );
    }

    #[test]
    fn test_ctr_fallback_fires_alone() {
        let obs = CampaignObservation {
            spend: 100.0,
            roas: 2.0,
            ctr: 0.03,
            conversions: 20,
            ..Default::default()
        };
        let recs = generate(&obs, &[], &thresholds());
        assert_eq!(recs, vec!["Good engagement - test audience expansion"]);
    }

    #[test]
    fn test_fallbacks_suppressed_by_issue_recommendations() {
        let obs = CampaignObservation {
            spend: 200.0,
            roas: 4.0,
            ctr: 0.03,
            conversions: 1,
            days_running: 30,
            ..Default::default()
        };
        let issues = vec![IssueTag::LowConversions];
        let recs = generate(&obs, &issues, &thresholds());
        assert_eq!(recs.len(), 2);
        assert!(recs.iter().all(|r| !r.contains("increasing budget")));
    }

    #[test]
    fn test_no_spend_alone_yields_nothing() {
        let obs = CampaignObservation::default();
        let issues = detect_issues(&obs, &thresholds());
        assert_eq!(issues, vec![IssueTag::NoSpend]);
        assert!(generate(&obs, &issues, &thresholds()).is_empty());
    }
}
