//! Account-level aggregation: totals, health classification, performer
//! ranking, account recommendations, and prioritized action items.

use adpulse_core::config::ThresholdConfig;
use adpulse_core::types::{
    AccountAnalysis, AccountHealth, ActionItem, ActionKind, CampaignAnalysis, Priority,
};
use std::cmp::Ordering;

/// One action-item rule: the predicate that fires it and the item it
/// emits. Rules are evaluated per campaign, in table order.
struct ActionRule {
    priority: Priority,
    action: ActionKind,
    applies: fn(&CampaignAnalysis, &ThresholdConfig) -> bool,
    reason: fn(&CampaignAnalysis) -> String,
}

const ACTION_RULES: &[ActionRule] = &[
    ActionRule {
        priority: Priority::High,
        action: ActionKind::PauseCampaign,
        applies: |c, _| c.roas < 1.0 && c.spend > 100.0,
        reason: |c| {
            format!(
                "Negative ROI ({:.2}x) after significant spend (${:.2})",
                c.roas, c.spend
            )
        },
    },
    ActionRule {
        priority: Priority::Medium,
        action: ActionKind::ReviewCreative,
        applies: |c, _| c.ctr < 0.005 && c.spend > 50.0,
        reason: |c| format!("Very low CTR ({:.2}%) despite spend", c.ctr * 100.0),
    },
    ActionRule {
        priority: Priority::Low,
        action: ActionKind::IncreaseBudget,
        applies: |c, t| c.roas > t.good_roas && c.performance_score > 80.0,
        reason: |c| {
            format!(
                "High-performing campaign (ROAS: {:.2}x, Score: {:.0})",
                c.roas, c.performance_score
            )
        },
    },
];

/// Roll per-campaign analyses into the account report.
///
/// The caller must short-circuit to a No Data result before calling with
/// an empty list.
pub fn aggregate(analyses: Vec<CampaignAnalysis>, thresholds: &ThresholdConfig) -> AccountAnalysis {
    debug_assert!(!analyses.is_empty());

    let total_spend: f64 = analyses.iter().map(|a| a.spend).sum();
    let total_conversions: u64 = analyses.iter().map(|a| a.conversions).sum();
    let average_roas = analyses.iter().map(|a| a.roas).sum::<f64>() / analyses.len() as f64;

    // Both lists are prefixes of independent stable sorts of the same
    // vector; a campaign can appear in both when six or fewer exist.
    let mut descending = analyses.clone();
    descending.sort_by(|a, b| {
        b.performance_score
            .partial_cmp(&a.performance_score)
            .unwrap_or(Ordering::Equal)
    });
    let top_performers: Vec<CampaignAnalysis> = descending.into_iter().take(3).collect();

    let mut ascending = analyses.clone();
    ascending.sort_by(|a, b| {
        a.performance_score
            .partial_cmp(&b.performance_score)
            .unwrap_or(Ordering::Equal)
    });
    let underperformers: Vec<CampaignAnalysis> = ascending.into_iter().take(3).collect();

    let recommendations = account_recommendations(&analyses, thresholds);
    let action_items = generate_action_items(&analyses, thresholds);
    let account_health = determine_health(average_roas, thresholds);

    AccountAnalysis {
        total_spend,
        total_conversions,
        average_roas,
        account_health,
        top_performers,
        underperformers,
        recommendations,
        action_items,
    }
}

/// Account health from average ROAS. Breakpoints at 1.0, 2.0, and the
/// configured good-ROAS mark.
pub fn determine_health(average_roas: f64, thresholds: &ThresholdConfig) -> AccountHealth {
    if average_roas >= thresholds.good_roas {
        AccountHealth::Excellent
    } else if average_roas >= 2.0 {
        AccountHealth::Good
    } else if average_roas >= 1.0 {
        AccountHealth::Fair
    } else {
        AccountHealth::NeedsAttention
    }
}

/// Account-level recommendations. Each rule is independent and emits at
/// most one string; the fallback fires only when nothing else did.
fn account_recommendations(
    analyses: &[CampaignAnalysis],
    thresholds: &ThresholdConfig,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    let negative_roi = analyses
        .iter()
        .filter(|a| a.roas < 1.0 && a.spend > 50.0)
        .count();
    if negative_roi > 0 {
        recommendations.push(format!(
            "Pause {negative_roi} underperforming campaigns with negative ROI"
        ));
    }

    // Only the ROAS leader can earn a budget call-out.
    let mut by_roas: Vec<&CampaignAnalysis> = analyses.iter().collect();
    by_roas.sort_by(|a, b| b.roas.partial_cmp(&a.roas).unwrap_or(Ordering::Equal));
    if let Some(best) = by_roas.first() {
        if best.roas > thresholds.good_roas {
            recommendations.push(format!(
                "Increase budget for top performer: {}",
                best.campaign_name
            ));
        }
    }

    let low_ctr = analyses
        .iter()
        .filter(|a| a.ctr < 0.005 && a.spend > 25.0)
        .count();
    if low_ctr > 0 {
        recommendations.push(format!(
            "Review creative for {low_ctr} campaigns with very low CTR"
        ));
    }

    if recommendations.is_empty() {
        recommendations.push("Account performing well - consider testing new campaigns".to_string());
    }

    recommendations
}

/// Evaluate the action-item rule table per campaign, then stably sort by
/// priority rank so generation order survives within each priority.
fn generate_action_items(
    analyses: &[CampaignAnalysis],
    thresholds: &ThresholdConfig,
) -> Vec<ActionItem> {
    let mut items: Vec<ActionItem> = Vec::new();

    for analysis in analyses {
        for rule in ACTION_RULES {
            if (rule.applies)(analysis, thresholds) {
                items.push(ActionItem {
                    priority: rule.priority,
                    action: rule.action,
                    campaign_id: analysis.campaign_id.clone(),
                    campaign_name: analysis.campaign_name.clone(),
                    reason: (rule.reason)(analysis),
                });
            }
        }
    }

    items.sort_by_key(|item| item.priority.rank());
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use adpulse_core::types::CampaignStatus;

    fn make_analysis(id: &str, score: f64) -> CampaignAnalysis {
        CampaignAnalysis {
            campaign_id: id.to_string(),
            campaign_name: format!("Campaign {id}"),
            spend: 0.0,
            impressions: 0,
            clicks: 0,
            conversions: 0,
            conversion_value: 0.0,
            ctr: 0.0,
            cpc: 0.0,
            cpm: 0.0,
            roas: 0.0,
            status: CampaignStatus::Active,
            days_running: 30,
            performance_score: score,
            issues: vec![],
            recommendations: vec![],
        }
    }

    fn thresholds() -> ThresholdConfig {
        ThresholdConfig::default()
    }

    #[test]
    fn test_top_and_bottom_overlap_for_small_sets() {
        let analyses: Vec<CampaignAnalysis> = [10.0, 20.0, 30.0, 40.0, 50.0]
            .iter()
            .enumerate()
            .map(|(i, score)| make_analysis(&format!("c{i}"), *score))
            .collect();

        let report = aggregate(analyses, &thresholds());

        let top: Vec<f64> = report
            .top_performers
            .iter()
            .map(|a| a.performance_score)
            .collect();
        let bottom: Vec<f64> = report
            .underperformers
            .iter()
            .map(|a| a.performance_score)
            .collect();
        assert_eq!(top, vec![50.0, 40.0, 30.0]);
        assert_eq!(bottom, vec![10.0, 20.0, 30.0]);
        // Score 30 sits in both lists; selection is not deduplicated.
        assert_eq!(report.top_performers[2].campaign_id, "c2");
        assert_eq!(report.underperformers[2].campaign_id, "c2");
    }

    #[test]
    fn test_sorts_are_stable_on_ties() {
        let analyses = vec![
            make_analysis("first", 60.0),
            make_analysis("second", 60.0),
            make_analysis("third", 60.0),
        ];
        let report = aggregate(analyses, &thresholds());
        let ids: Vec<&str> = report
            .top_performers
            .iter()
            .map(|a| a.campaign_id.as_str())
            .collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_health_is_monotonic_in_average_roas() {
        let t = thresholds();
        assert_eq!(determine_health(0.5, &t), AccountHealth::NeedsAttention);
        assert_eq!(determine_health(1.0, &t), AccountHealth::Fair);
        assert_eq!(determine_health(2.0, &t), AccountHealth::Good);
        assert_eq!(determine_health(3.0, &t), AccountHealth::Excellent);
        assert_eq!(determine_health(10.0, &t), AccountHealth::Excellent);
    }

    #[test]
    fn test_average_roas_is_arithmetic_mean() {
        let mut a = make_analysis("a", 60.0);
        a.roas = 1.0;
        let mut b = make_analysis("b", 70.0);
        b.roas = 3.0;
        let report = aggregate(vec![a, b], &thresholds());
        assert_eq!(report.average_roas, 2.0);
        assert_eq!(report.account_health, AccountHealth::Good);
    }

    #[test]
    fn test_account_recommendations_fire_independently() {
        let mut loser = make_analysis("loser", 50.0);
        loser.roas = 0.4;
        loser.spend = 200.0;
        loser.ctr = 0.002;

        let mut winner = make_analysis("winner", 95.0);
        winner.roas = 4.5;
        winner.spend = 300.0;
        winner.ctr = 0.03;

        let report = aggregate(vec![loser, winner], &thresholds());
        assert_eq!(report.recommendations.len(), 3);
        assert!(report.recommendations[0].contains("Pause 1 underperforming"));
        assert!(report.recommendations[1].contains("top performer: Campaign winner"));
        assert!(report.recommendations[2].contains("Review creative for 1 campaigns"));
    }

    #[test]
    fn test_quiet_account_gets_fallback_recommendation() {
        let mut steady = make_analysis("steady", 70.0);
        steady.roas = 2.0;
        steady.spend = 80.0;
        steady.ctr = 0.015;
        let report = aggregate(vec![steady], &thresholds());
        assert_eq!(
            report.recommendations,
            vec!["Account performing well - consider testing new campaigns"]
        );
    }

    #[test]
    fn test_action_items_sorted_high_to_low() {
        // Listed so the low-priority item is generated before the high one.
        let mut scaler = make_analysis("scaler", 90.0);
        scaler.roas = 4.0;
        scaler.spend = 50.0;
        scaler.ctr = 0.02;

        let mut burner = make_analysis("burner", 50.0);
        burner.roas = 0.2;
        burner.spend = 500.0;
        burner.ctr = 0.01;

        let report = aggregate(vec![scaler, burner], &thresholds());
        let priorities: Vec<Priority> = report.action_items.iter().map(|i| i.priority).collect();
        assert_eq!(priorities, vec![Priority::High, Priority::Low]);
        assert_eq!(report.action_items[0].campaign_id, "burner");
        assert_eq!(report.action_items[0].action, ActionKind::PauseCampaign);
    }

    #[test]
    fn test_one_campaign_can_emit_multiple_items() {
        let mut c = make_analysis("both", 50.0);
        c.roas = 0.5;
        c.spend = 300.0;
        c.ctr = 0.001;
        let report = aggregate(vec![c], &thresholds());
        assert_eq!(report.action_items.len(), 2);
        assert_eq!(report.action_items[0].priority, Priority::High);
        assert_eq!(report.action_items[1].priority, Priority::Medium);
        assert!(report.action_items[1].reason.contains("Very low CTR (0.10%)"));
    }
}
