//! HTTP implementation of the scoring-backend gateway.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::json;

use super::domain::{ApplicantId, ApplicantSubmission, ScorePrediction, ScoredApplicant};
use super::gateway::{BackendError, ScoringBackend};
use crate::session::SessionContext;
use crate::workflows::insights::InsightReport;

/// Gateway speaking the backend's REST contract, attaching the session's
/// bearer credential to every request.
pub struct HttpScoringBackend {
    client: Client,
    session: SessionContext,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

#[derive(Debug, Deserialize)]
struct InsightsEnvelope {
    insights: InsightReport,
}

impl HttpScoringBackend {
    pub fn new(session: SessionContext) -> Self {
        Self {
            client: Client::new(),
            session,
        }
    }

    async fn execute(&self, builder: RequestBuilder) -> Result<Response, BackendError> {
        let builder = match self.session.credentials().token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        };

        let response = builder
            .send()
            .await
            .map_err(|err| BackendError::Transport(err.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(BackendError::Unauthorized);
        }
        if !status.is_success() {
            let detail = response
                .json::<ErrorBody>()
                .await
                .map(|body| body.detail)
                .unwrap_or_else(|_| format!("scoring backend returned {status}"));
            return Err(BackendError::Rejected {
                status: status.as_u16(),
                detail,
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl ScoringBackend for HttpScoringBackend {
    async fn submit_applicant(
        &self,
        submission: &ApplicantSubmission,
    ) -> Result<(), BackendError> {
        let request = self
            .client
            .post(self.session.endpoint("/ingest/applicant"))
            .json(submission);
        self.execute(request).await?;
        Ok(())
    }

    async fn list_applicants(&self) -> Result<Vec<ScoredApplicant>, BackendError> {
        let request = self.client.get(self.session.endpoint("/ingest/applicants"));
        self.execute(request)
            .await?
            .json()
            .await
            .map_err(|err| BackendError::Transport(err.to_string()))
    }

    async fn predict_score(
        &self,
        applicant_id: &ApplicantId,
    ) -> Result<ScorePrediction, BackendError> {
        let request = self
            .client
            .post(self.session.endpoint("/predict/score"))
            .json(&json!({ "applicant_id": applicant_id }));
        self.execute(request)
            .await?
            .json()
            .await
            .map_err(|err| BackendError::Transport(err.to_string()))
    }

    async fn generate_insights(
        &self,
        applicant: &ScoredApplicant,
    ) -> Result<InsightReport, BackendError> {
        let request = self
            .client
            .post(self.session.endpoint("/insights/generate"))
            .json(applicant);
        let envelope: InsightsEnvelope = self
            .execute(request)
            .await?
            .json()
            .await
            .map_err(|err| BackendError::Transport(err.to_string()))?;
        Ok(envelope.insights)
    }
}
