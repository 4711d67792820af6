//! Score-to-tier presentation and histogram aggregation.

use serde::Serialize;

use super::domain::{RiskTier, ScoredApplicant};

/// Lower and upper bounds of the conventional score scale.
pub const SCORE_FLOOR: i32 = 300;
pub const SCORE_CEILING: i32 = 850;

/// Visual emphasis class attached to a tier presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreEmphasis {
    Success,
    Warning,
    Destructive,
    Muted,
}

/// How one applicant's classification is shown to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TierPresentation {
    pub label: &'static str,
    pub emphasis: ScoreEmphasis,
    pub headline: &'static str,
    pub guidance: &'static str,
}

/// Presentation for a tier, or for the distinct not-yet-scored state when
/// the tier is absent. "Not scored" is never conflated with low risk.
pub fn present_tier(tier: Option<RiskTier>) -> TierPresentation {
    match tier {
        Some(RiskTier::Low) => TierPresentation {
            label: RiskTier::Low.label(),
            emphasis: ScoreEmphasis::Success,
            headline: "Excellent Credit",
            guidance: "Strong financial health and low risk. Ideal for lending.",
        },
        Some(RiskTier::Medium) => TierPresentation {
            label: RiskTier::Medium.label(),
            emphasis: ScoreEmphasis::Warning,
            headline: "Good Credit",
            guidance: "Moderate risk profile. Consider additional verification before lending.",
        },
        Some(tier @ (RiskTier::High | RiskTier::VeryHigh)) => TierPresentation {
            label: tier.label(),
            emphasis: ScoreEmphasis::Destructive,
            headline: "High Risk",
            guidance: "Elevated risk factors detected. Proceed with caution or require collateral.",
        },
        None => TierPresentation {
            label: "NOT SCORED",
            emphasis: ScoreEmphasis::Muted,
            headline: "Not Yet Scored",
            guidance: "Request a score to classify this applicant.",
        },
    }
}

/// Presentation for a hydrated applicant. Falls back to the not-scored
/// presentation when the score/tier pair is incomplete.
pub fn present_applicant(applicant: &ScoredApplicant) -> TierPresentation {
    present_tier(applicant.scored().map(|(_, tier)| tier))
}

/// Fraction of the 300..=850 scale covered by a score, clamped to [0, 1]
/// so anomalous backend data cannot produce a broken progress bar.
pub fn progress_fraction(score: i32) -> f64 {
    let span = f64::from(SCORE_CEILING - SCORE_FLOOR);
    (f64::from(score - SCORE_FLOOR) / span).clamp(0.0, 1.0)
}

/// The four fixed histogram buckets. Disjoint and exhaustive over the
/// score scale; unscored applicants fall in no bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBucket {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl ScoreBucket {
    pub const ALL: [ScoreBucket; 4] = [
        ScoreBucket::Poor,
        ScoreBucket::Fair,
        ScoreBucket::Good,
        ScoreBucket::Excellent,
    ];

    pub const fn range_label(self) -> &'static str {
        match self {
            ScoreBucket::Poor => "300-549",
            ScoreBucket::Fair => "550-649",
            ScoreBucket::Good => "650-749",
            ScoreBucket::Excellent => "750-850",
        }
    }

    pub const fn grade(self) -> &'static str {
        match self {
            ScoreBucket::Poor => "Poor",
            ScoreBucket::Fair => "Fair",
            ScoreBucket::Good => "Good",
            ScoreBucket::Excellent => "Excellent",
        }
    }

    pub fn for_score(score: i32) -> ScoreBucket {
        if score < 550 {
            ScoreBucket::Poor
        } else if score < 650 {
            ScoreBucket::Fair
        } else if score < 750 {
            ScoreBucket::Good
        } else {
            ScoreBucket::Excellent
        }
    }
}

/// One bucket of the score distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BucketCount {
    pub bucket: ScoreBucket,
    pub range: &'static str,
    pub count: usize,
}

/// Aggregate statistics over the full applicant collection. Always computed
/// from the complete current roster, never patched incrementally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total: usize,
    pub scored: usize,
    /// Mean over scored applicants, rounded half away from zero; 0 when no
    /// applicant is scored.
    pub average_score: i32,
    /// Applicants whose tier is high or very_high.
    pub needs_attention: usize,
    pub distribution: [BucketCount; 4],
}

pub fn dashboard_stats(applicants: &[ScoredApplicant]) -> DashboardStats {
    let mut counts = [0usize; 4];
    let mut sum: i64 = 0;
    let mut scored = 0usize;

    for applicant in applicants {
        if let Some(score) = applicant.credit_score {
            scored += 1;
            sum += i64::from(score);
            counts[ScoreBucket::for_score(score) as usize] += 1;
        }
    }

    let average_score = if scored > 0 {
        (sum as f64 / scored as f64).round() as i32
    } else {
        0
    };

    let needs_attention = applicants
        .iter()
        .filter(|applicant| applicant.risk_tier.is_some_and(RiskTier::is_high_risk))
        .count();

    let distribution = ScoreBucket::ALL.map(|bucket| BucketCount {
        bucket,
        range: bucket.range_label(),
        count: counts[bucket as usize],
    });

    DashboardStats {
        total: applicants.len(),
        scored,
        average_score,
        needs_attention,
        distribution,
    }
}

/// Dashboard tier filter: everything, or one tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierFilter {
    All,
    Tier(RiskTier),
}

impl TierFilter {
    pub fn matches(self, applicant: &ScoredApplicant) -> bool {
        match self {
            TierFilter::All => true,
            TierFilter::Tier(tier) => applicant.risk_tier == Some(tier),
        }
    }
}

pub fn filter_applicants(
    applicants: &[ScoredApplicant],
    filter: TierFilter,
) -> Vec<&ScoredApplicant> {
    applicants
        .iter()
        .filter(|applicant| filter.matches(applicant))
        .collect()
}
