use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;

use crate::workflows::applicants::domain::{
    ApplicantId, ApplicantSubmission, FeatureImportance, FeatureValue, RiskTier, ScorePrediction,
    ScoredApplicant,
};
use crate::workflows::applicants::gateway::{BackendError, ScoringBackend};
use crate::workflows::applicants::intake::{
    ApplicantDraft, FinancialForm, GigForm, IdentityForm, SocialForm,
};
use crate::workflows::insights::InsightReport;

pub(super) fn valid_draft() -> ApplicantDraft {
    ApplicantDraft {
        identity: IdentityForm {
            name: "Asha Verma".to_string(),
            email: "asha@example.com".to_string(),
            phone: Some("+91 9876543210".to_string()),
        },
        financial: FinancialForm {
            monthly_income: 42_000.0,
            monthly_expenses: 23_500.0,
            savings: 80_000.0,
            existing_loans: 0.0,
            payment_history_score: 72,
        },
        social: SocialForm {
            social_connections: 180,
            community_engagement_score: 55,
            references_count: 3,
            online_reputation_score: 64,
        },
        gig: GigForm {
            platforms: "Uber, Swiggy".to_string(),
            total_gigs_completed: 240,
            average_rating: 4.6,
            active_months: 18,
            income_consistency_score: 70,
        },
    }
}

pub(super) fn applicant(
    id: &str,
    credit_score: Option<i32>,
    risk_tier: Option<RiskTier>,
) -> ScoredApplicant {
    ScoredApplicant {
        id: ApplicantId(id.to_string()),
        name: format!("Applicant {id}"),
        email: format!("{id}@example.com"),
        phone: None,
        financial_data: None,
        social_data: None,
        gig_data: None,
        credit_score,
        risk_tier,
        created_at: None,
        updated_at: None,
    }
}

pub(super) fn prediction(score: i32, risk_tier: RiskTier) -> ScorePrediction {
    ScorePrediction {
        score,
        risk_tier,
        confidence: Some(0.85),
        feature_importances: vec![FeatureImportance {
            feature: "Monthly Income".to_string(),
            importance: 0.45,
            value: FeatureValue::Number(42_000.0),
        }],
    }
}

pub(super) fn sample_report() -> InsightReport {
    json!({
        "financial_health": { "savings_rate": "12%" },
        "dashboard_output": { "recommendation": "approve" }
    })
    .as_object()
    .cloned()
    .expect("object literal")
}

/// Recording stub for the backend boundary. When `fail_with` is set, every
/// call returns that error.
#[derive(Default)]
pub(super) struct StubBackend {
    pub submissions: Mutex<Vec<ApplicantSubmission>>,
    pub roster: Mutex<Vec<ScoredApplicant>>,
    pub scripted_prediction: Mutex<Option<ScorePrediction>>,
    pub fail_with: Mutex<Option<BackendError>>,
    pub calls: Mutex<Vec<&'static str>>,
}

impl StubBackend {
    pub(super) fn with_roster(roster: Vec<ScoredApplicant>) -> Self {
        Self {
            roster: Mutex::new(roster),
            ..Self::default()
        }
    }

    pub(super) fn fail_all_with(&self, error: BackendError) {
        *self.fail_with.lock().expect("stub mutex poisoned") = Some(error);
    }

    pub(super) fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().expect("stub mutex poisoned").clone()
    }

    fn record(&self, call: &'static str) -> Result<(), BackendError> {
        self.calls.lock().expect("stub mutex poisoned").push(call);
        match self.fail_with.lock().expect("stub mutex poisoned").clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ScoringBackend for StubBackend {
    async fn submit_applicant(
        &self,
        submission: &ApplicantSubmission,
    ) -> Result<(), BackendError> {
        self.record("submit")?;
        self.submissions
            .lock()
            .expect("stub mutex poisoned")
            .push(submission.clone());
        Ok(())
    }

    async fn list_applicants(&self) -> Result<Vec<ScoredApplicant>, BackendError> {
        self.record("list")?;
        Ok(self.roster.lock().expect("stub mutex poisoned").clone())
    }

    async fn predict_score(
        &self,
        _applicant_id: &ApplicantId,
    ) -> Result<ScorePrediction, BackendError> {
        self.record("predict")?;
        Ok(self
            .scripted_prediction
            .lock()
            .expect("stub mutex poisoned")
            .clone()
            .unwrap_or_else(|| prediction(702, RiskTier::Medium)))
    }

    async fn generate_insights(
        &self,
        _applicant: &ScoredApplicant,
    ) -> Result<InsightReport, BackendError> {
        self.record("insights")?;
        Ok(sample_report())
    }
}
