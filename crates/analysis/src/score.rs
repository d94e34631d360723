//! Composite campaign performance score.

use adpulse_core::config::ThresholdConfig;

/// Compute the diagnostic performance score for a campaign.
///
/// Starts from a base of 50 and adds bucketed contributions for ROAS,
/// CTR, conversion volume, and spend efficiency, capped at 100. Every
/// contribution is non-negative, so the realized range is [50, 100].
pub fn compute_score(
    spend: f64,
    roas: f64,
    ctr: f64,
    conversions: u64,
    thresholds: &ThresholdConfig,
) -> f64 {
    let mut score: f64 = 50.0;

    // ROAS contribution (strongest signal)
    if roas >= thresholds.good_roas {
        score += 40.0;
    } else if roas >= 2.0 {
        score += 25.0;
    } else if roas >= 1.0 {
        score += 10.0;
    } else if roas > 0.0 {
        score += 5.0;
    }

    // CTR contribution; good_ctr is configured in percent
    if ctr >= thresholds.good_ctr / 100.0 {
        score += 30.0;
    } else if ctr >= 0.01 {
        score += 20.0;
    } else if ctr >= 0.005 {
        score += 10.0;
    }

    // Conversion volume
    if conversions >= 50 {
        score += 20.0;
    } else if conversions >= 20 {
        score += 15.0;
    } else if conversions >= 10 {
        score += 10.0;
    } else if conversions >= 5 {
        score += 5.0;
    }

    // Spend efficiency, only meaningful with both spend and conversions
    if spend > 0.0 && conversions > 0 {
        let cost_per_conversion = spend / conversions as f64;
        if cost_per_conversion <= 20.0 {
            score += 10.0;
        } else if cost_per_conversion <= 50.0 {
            score += 5.0;
        }
    }

    score.min(100.0)
}
