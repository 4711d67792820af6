//! Applicant intake, risk classification, and scoring-backend access.

pub mod domain;
pub mod gateway;
pub mod http;
pub mod intake;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicantId, ApplicantSubmission, FeatureImportance, FeatureValue, FinancialFacet, GigFacet,
    RiskTier, ScorePrediction, ScoredApplicant, SocialFacet,
};
pub use gateway::{BackendError, ScoringBackend};
pub use http::HttpScoringBackend;
pub use intake::{
    ApplicantDraft, FacetKind, FacetViolation, FinancialForm, GigForm, IdentityForm,
    IntakeRejection, SocialForm,
};
pub use scoring::{
    dashboard_stats, filter_applicants, present_applicant, present_tier, progress_fraction,
    BucketCount, DashboardStats, ScoreBucket, ScoreEmphasis, TierFilter, TierPresentation,
};
pub use service::{ApplicantService, WorkflowError};
