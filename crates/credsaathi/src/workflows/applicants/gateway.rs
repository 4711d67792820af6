//! The scoring-backend boundary. The console depends on this trait, never on
//! a concrete transport, so tests and the offline demo can run against an
//! in-memory implementation.

use async_trait::async_trait;

use super::domain::{ApplicantId, ApplicantSubmission, ScorePrediction, ScoredApplicant};
use crate::workflows::insights::InsightReport;

/// Errors surfaced at the backend boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    /// 401-class response; the caller clears the credential store and
    /// redirects to sign-in regardless of which endpoint was in flight.
    #[error("credential rejected by the scoring backend")]
    Unauthorized,
    /// Network-level failure before a response arrived.
    #[error("scoring backend unreachable: {0}")]
    Transport(String),
    /// Non-success response; `detail` carries the backend-provided message
    /// when present, else a generic fallback.
    #[error("{detail}")]
    Rejected { status: u16, detail: String },
}

#[async_trait]
pub trait ScoringBackend: Send + Sync {
    /// `POST /ingest/applicant`: store one assembled submission.
    async fn submit_applicant(
        &self,
        submission: &ApplicantSubmission,
    ) -> Result<(), BackendError>;

    /// `GET /ingest/applicants`: the full roster, in backend order.
    async fn list_applicants(&self) -> Result<Vec<ScoredApplicant>, BackendError>;

    /// `POST /predict/score`: score one applicant by id.
    async fn predict_score(
        &self,
        applicant_id: &ApplicantId,
    ) -> Result<ScorePrediction, BackendError>;

    /// `POST /insights/generate`: free-form report for one applicant.
    async fn generate_insights(
        &self,
        applicant: &ScoredApplicant,
    ) -> Result<InsightReport, BackendError>;
}
