use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier assigned to an applicant by the scoring backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicantId(pub String);

impl fmt::Display for ApplicantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Financial history facet of an applicant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialFacet {
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    pub savings: f64,
    #[serde(default)]
    pub existing_loans: f64,
    #[serde(default)]
    pub payment_history_score: u8,
}

/// Social signal facet of an applicant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialFacet {
    #[serde(default)]
    pub social_connections: u32,
    #[serde(default)]
    pub community_engagement_score: u8,
    #[serde(default)]
    pub references_count: u32,
    #[serde(default)]
    pub online_reputation_score: u8,
}

/// Gig-economy activity facet of an applicant.
///
/// `platforms` keeps its submission order and any repeated names; platform
/// repetition can itself be a signal and is never deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GigFacet {
    #[serde(default)]
    pub platforms: Vec<String>,
    #[serde(default)]
    pub total_gigs_completed: u32,
    #[serde(default)]
    pub average_rating: f64,
    #[serde(default)]
    pub active_months: u32,
    #[serde(default)]
    pub income_consistency_score: u8,
}

/// A fully validated applicant record, assembled atomically from the four
/// facets and sent to the backend exactly once. Identity fields sit at the
/// top level and the remaining facets nest under their wire keys, matching
/// `POST /ingest/applicant`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantSubmission {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub financial_data: FinancialFacet,
    pub social_data: SocialFacet,
    pub gig_data: GigFacet,
}

/// Discrete creditworthiness classification, ordered by severity.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl RiskTier {
    pub const fn wire_name(self) -> &'static str {
        match self {
            RiskTier::Low => "low",
            RiskTier::Medium => "medium",
            RiskTier::High => "high",
            RiskTier::VeryHigh => "very_high",
        }
    }

    /// Display label: the wire name with underscores replaced by spaces,
    /// upper-cased.
    pub const fn label(self) -> &'static str {
        match self {
            RiskTier::Low => "LOW",
            RiskTier::Medium => "MEDIUM",
            RiskTier::High => "HIGH",
            RiskTier::VeryHigh => "VERY HIGH",
        }
    }

    /// High and VeryHigh feed one needs-attention aggregate; they stay
    /// distinct everywhere else.
    pub const fn is_high_risk(self) -> bool {
        matches!(self, RiskTier::High | RiskTier::VeryHigh)
    }
}

/// An applicant as hydrated from `GET /ingest/applicants`. The backend is
/// the system of record; `credit_score` and `risk_tier` are both absent
/// until the applicant has been scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredApplicant {
    pub id: ApplicantId,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub financial_data: Option<FinancialFacet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_data: Option<SocialFacet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gig_data: Option<GigFacet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_score: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_tier: Option<RiskTier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ScoredApplicant {
    /// Score and tier together, or nothing. The backend guarantees the two
    /// arrive as a pair; a mismatched record presents as not scored rather
    /// than leaking a half-scored state.
    pub fn scored(&self) -> Option<(i32, RiskTier)> {
        match (self.credit_score, self.risk_tier) {
            (Some(score), Some(tier)) => Some((score, tier)),
            _ => None,
        }
    }
}

/// One ranked contribution to a score prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureImportance {
    pub feature: String,
    /// Fraction in [0, 1], rendered as a percentage.
    pub importance: f64,
    pub value: FeatureValue,
}

/// Feature values arrive as either numbers or free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Number(f64),
    Text(String),
}

impl FeatureValue {
    /// Numbers render to two decimal places; text renders verbatim.
    pub fn rendered(&self) -> String {
        match self {
            FeatureValue::Number(value) => format!("{value:.2}"),
            FeatureValue::Text(value) => value.clone(),
        }
    }
}

/// Response shape of `POST /predict/score`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScorePrediction {
    pub score: i32,
    pub risk_tier: RiskTier,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub feature_importances: Vec<FeatureImportance>,
}
