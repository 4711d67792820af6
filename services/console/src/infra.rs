use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use credsaathi::workflows::applicants::{
    ApplicantId, ApplicantSubmission, BackendError, FeatureImportance, FeatureValue, FinancialFacet,
    RiskTier, ScorePrediction, ScoredApplicant, ScoringBackend,
};
use credsaathi::workflows::insights::InsightReport;
use serde_json::json;

pub(crate) fn parse_tier(raw: &str) -> Result<RiskTier, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "low" => Ok(RiskTier::Low),
        "medium" => Ok(RiskTier::Medium),
        "high" => Ok(RiskTier::High),
        "very_high" | "very-high" => Ok(RiskTier::VeryHigh),
        other => Err(format!(
            "unknown tier '{other}', expected low, medium, high, or very_high"
        )),
    }
}

/// Offline scoring backend for the demo. Applicants live in insertion order,
/// scoring mutates the stored record, and both the score and the report are
/// deterministic functions of the submitted data.
#[derive(Default)]
pub(crate) struct InMemoryScoringBackend {
    applicants: Mutex<Vec<ScoredApplicant>>,
    sequence: AtomicU64,
}

impl InMemoryScoringBackend {
    /// Linear stand-in for the real regression model, over the same three
    /// normalized inputs, clipped to the conventional 300..=850 scale.
    fn stub_score(financial: &FinancialFacet) -> i32 {
        let income = financial.monthly_income / 100_000.0;
        let expenses = financial.monthly_expenses / 100_000.0;
        let savings = financial.savings / 50_000.0;

        let raw = 380.0 + income * 620.0 - expenses * 410.0 + savings * 160.0
            + f64::from(financial.payment_history_score) * 1.2;
        (raw.round() as i32).clamp(300, 850)
    }

    fn tier_for(score: i32) -> RiskTier {
        if score >= 750 {
            RiskTier::Low
        } else if score >= 650 {
            RiskTier::Medium
        } else if score >= 550 {
            RiskTier::High
        } else {
            RiskTier::VeryHigh
        }
    }

    /// Ranked by a fixed importance profile, descending.
    fn feature_importances(financial: &FinancialFacet) -> Vec<FeatureImportance> {
        vec![
            FeatureImportance {
                feature: "Monthly Income".to_string(),
                importance: 0.45,
                value: FeatureValue::Number(financial.monthly_income),
            },
            FeatureImportance {
                feature: "Savings".to_string(),
                importance: 0.30,
                value: FeatureValue::Number(financial.savings),
            },
            FeatureImportance {
                feature: "Monthly Expenses".to_string(),
                importance: 0.25,
                value: FeatureValue::Number(financial.monthly_expenses),
            },
        ]
    }

    fn not_found() -> BackendError {
        BackendError::Rejected {
            status: 404,
            detail: "Applicant not found or access denied".to_string(),
        }
    }
}

#[async_trait::async_trait]
impl ScoringBackend for InMemoryScoringBackend {
    async fn submit_applicant(&self, submission: &ApplicantSubmission) -> Result<(), BackendError> {
        let seq = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        let now = chrono::Utc::now();
        self.applicants
            .lock()
            .expect("backend mutex poisoned")
            .push(ScoredApplicant {
                id: ApplicantId(format!("app-{seq:06}")),
                name: submission.name.clone(),
                email: submission.email.clone(),
                phone: submission.phone.clone(),
                financial_data: Some(submission.financial_data.clone()),
                social_data: Some(submission.social_data.clone()),
                gig_data: Some(submission.gig_data.clone()),
                credit_score: None,
                risk_tier: None,
                created_at: Some(now),
                updated_at: Some(now),
            });
        Ok(())
    }

    async fn list_applicants(&self) -> Result<Vec<ScoredApplicant>, BackendError> {
        Ok(self
            .applicants
            .lock()
            .expect("backend mutex poisoned")
            .clone())
    }

    async fn predict_score(
        &self,
        applicant_id: &ApplicantId,
    ) -> Result<ScorePrediction, BackendError> {
        let mut guard = self.applicants.lock().expect("backend mutex poisoned");
        let applicant = guard
            .iter_mut()
            .find(|candidate| &candidate.id == applicant_id)
            .ok_or_else(Self::not_found)?;
        let financial = applicant
            .financial_data
            .clone()
            .ok_or_else(Self::not_found)?;

        let score = Self::stub_score(&financial);
        let tier = Self::tier_for(score);
        applicant.credit_score = Some(score);
        applicant.risk_tier = Some(tier);
        applicant.updated_at = Some(chrono::Utc::now());

        Ok(ScorePrediction {
            score,
            risk_tier: tier,
            confidence: Some(0.85),
            feature_importances: Self::feature_importances(&financial),
        })
    }

    async fn generate_insights(
        &self,
        applicant: &ScoredApplicant,
    ) -> Result<InsightReport, BackendError> {
        let financial = applicant.financial_data.clone().unwrap_or_default();
        let gig = applicant.gig_data.clone().unwrap_or_default();
        let surplus = financial.monthly_income - financial.monthly_expenses;
        let savings_months = if financial.monthly_expenses > 0.0 {
            financial.savings / financial.monthly_expenses
        } else {
            0.0
        };

        let (recommendation, reasoning) = match applicant.risk_tier {
            Some(RiskTier::Low) => ("approve", "Strong repayment capacity and stable history."),
            Some(RiskTier::Medium) => (
                "approve_with_conditions",
                "Adequate capacity; verify income sources before disbursal.",
            ),
            Some(RiskTier::High) => (
                "manual_review",
                "Thin margins against expenses; request collateral or a guarantor.",
            ),
            Some(RiskTier::VeryHigh) => (
                "decline",
                "Repayment capacity does not support the requested exposure.",
            ),
            None => (
                "score_first",
                "No score on record; run a prediction before any decision.",
            ),
        };

        let report = json!({
            "financial_health": {
                "monthly_surplus": surplus,
                "savings_runway_months": format!("{savings_months:.1}"),
                "existing_loans": financial.existing_loans,
                "payment_history_score": financial.payment_history_score,
            },
            "work_performance": {
                "platforms": gig.platforms,
                "total_gigs_completed": gig.total_gigs_completed,
                "average_rating": gig.average_rating,
                "active_months": gig.active_months,
            },
            "behavioral_signals": {
                "income_consistency_score": gig.income_consistency_score,
                "payment_discipline": if financial.payment_history_score >= 70 { "steady" } else { "irregular" },
            },
            "identity_and_fraud": {
                "email_on_record": applicant.email,
                "phone_on_record": applicant.phone.clone().unwrap_or_else(|| "not provided".to_string()),
            },
            "network_insights": {
                "social_connections": applicant.social_data.as_ref().map_or(0, |social| social.social_connections),
                "references_count": applicant.social_data.as_ref().map_or(0, |social| social.references_count),
            },
            "risk_assessment": {
                "credit_score": applicant.credit_score,
                "risk_tier": applicant.risk_tier.map(|tier| tier.wire_name()),
            },
            "dashboard_output": {
                "recommendation": recommendation,
                "reasoning": reasoning,
                "confidence": 0.85,
                "top_factors": ["monthly_income", "monthly_expenses", "savings", "payment_history", "income_consistency"],
            },
        });
        report
            .as_object()
            .cloned()
            .ok_or_else(|| BackendError::Transport("report was not an object".to_string()))
    }
}
