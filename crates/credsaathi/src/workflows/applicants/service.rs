use std::sync::Arc;

use tracing::{info, warn};

use super::domain::{ApplicantId, ApplicantSubmission, ScorePrediction, ScoredApplicant};
use super::gateway::{BackendError, ScoringBackend};
use super::intake::{self, ApplicantDraft, IntakeRejection};
use crate::session::SessionContext;
use crate::workflows::insights::InsightReport;

/// Service composing intake validation, the backend gateway, and the
/// session's credential handling. One instance per session.
pub struct ApplicantService<B> {
    backend: Arc<B>,
    session: SessionContext,
}

/// Error raised by applicant workflow operations.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Intake(#[from] IntakeRejection),
    /// The backend rejected the credential; it has been cleared and the
    /// operator must sign in again.
    #[error("session expired: credential cleared, sign in again")]
    AuthExpired,
    #[error("no applicant with id {0}")]
    UnknownApplicant(ApplicantId),
    #[error(transparent)]
    Backend(BackendError),
}

impl<B: ScoringBackend + 'static> ApplicantService<B> {
    pub fn new(backend: Arc<B>, session: SessionContext) -> Self {
        Self { backend, session }
    }

    /// Validate all four facets and submit atomically. The backend is
    /// contacted exactly once, and only when every facet passes.
    pub async fn submit(&self, draft: ApplicantDraft) -> Result<ApplicantSubmission, WorkflowError> {
        let submission = intake::assemble(draft)?;
        self.authorized(self.backend.submit_applicant(&submission).await)?;
        info!(email = %submission.email, "applicant submitted");
        Ok(submission)
    }

    /// The full applicant roster in backend order.
    pub async fn roster(&self) -> Result<Vec<ScoredApplicant>, WorkflowError> {
        self.authorized(self.backend.list_applicants().await)
    }

    /// Request a score, then re-fetch the full roster so every aggregate is
    /// recomputed from current data rather than patched in place.
    pub async fn score(
        &self,
        applicant_id: &ApplicantId,
    ) -> Result<(ScorePrediction, Vec<ScoredApplicant>), WorkflowError> {
        let prediction = self.authorized(self.backend.predict_score(applicant_id).await)?;
        info!(applicant = %applicant_id, score = prediction.score, "score received");
        let roster = self.roster().await?;
        Ok((prediction, roster))
    }

    /// Fetch the insight report for one applicant, resolved from the current
    /// roster so the backend receives the hydrated record it expects.
    pub async fn insights(
        &self,
        applicant_id: &ApplicantId,
    ) -> Result<(ScoredApplicant, InsightReport), WorkflowError> {
        let roster = self.roster().await?;
        let applicant = roster
            .into_iter()
            .find(|candidate| &candidate.id == applicant_id)
            .ok_or_else(|| WorkflowError::UnknownApplicant(applicant_id.clone()))?;

        let report = self.authorized(self.backend.generate_insights(&applicant).await)?;
        Ok((applicant, report))
    }

    /// Uniform 401 handling for every backend call: clear the credential
    /// store once and surface `AuthExpired`. No retry reuses the stale
    /// credential.
    fn authorized<T>(&self, result: Result<T, BackendError>) -> Result<T, WorkflowError> {
        match result {
            Ok(value) => Ok(value),
            Err(BackendError::Unauthorized) => {
                warn!("backend rejected credential; clearing session");
                self.session.credentials().clear();
                Err(WorkflowError::AuthExpired)
            }
            Err(other) => Err(WorkflowError::Backend(other)),
        }
    }
}
