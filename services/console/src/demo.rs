use std::sync::Arc;

use clap::Args;
use credsaathi::error::AppError;
use credsaathi::session::{InMemoryCredentialStore, SessionContext};
use credsaathi::workflows::applicants::{
    filter_applicants, ApplicantDraft, ApplicantService, FinancialForm, GigForm, IdentityForm,
    SocialForm, TierFilter,
};

use crate::infra::InMemoryScoringBackend;
use crate::render;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Skip the borrower intelligence report portion of the demo
    #[arg(long)]
    pub(crate) skip_insights: bool,
}

fn seed_drafts() -> Vec<ApplicantDraft> {
    vec![
        draft(
            "Asha Verma",
            "asha@example.com",
            "Uber, Swiggy",
            62_000.0,
            28_000.0,
            180_000.0,
            82,
        ),
        draft(
            "Vikram Rao",
            "vikram@example.com",
            "Zomato",
            24_000.0,
            19_500.0,
            15_000.0,
            48,
        ),
        draft(
            "Meera Pillai",
            "meera@example.com",
            "Urban Company, Ola",
            38_000.0,
            21_000.0,
            64_000.0,
            67,
        ),
    ]
}

fn draft(
    name: &str,
    email: &str,
    platforms: &str,
    income: f64,
    expenses: f64,
    savings: f64,
    payment_history: i64,
) -> ApplicantDraft {
    ApplicantDraft {
        identity: IdentityForm {
            name: name.to_string(),
            email: email.to_string(),
            phone: None,
        },
        financial: FinancialForm {
            monthly_income: income,
            monthly_expenses: expenses,
            savings,
            existing_loans: 0.0,
            payment_history_score: payment_history,
        },
        social: SocialForm {
            social_connections: 150,
            community_engagement_score: 60,
            references_count: 2,
            online_reputation_score: 58,
        },
        gig: GigForm {
            platforms: platforms.to_string(),
            total_gigs_completed: 180,
            average_rating: 4.5,
            active_months: 14,
            income_consistency_score: 62,
        },
    }
}

/// Seeded end-to-end walk through intake, scoring, and insights against the
/// in-memory backend. No network access.
pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    println!("CredSaathi workflow demo (offline backend)");

    let backend = Arc::new(InMemoryScoringBackend::default());
    let session = SessionContext::new(
        "http://demo.invalid",
        Arc::new(InMemoryCredentialStore::with_token("demo-session")),
    );
    let service = ApplicantService::new(backend, session);

    for seed in seed_drafts() {
        let submission = service.submit(seed).await.map_err(AppError::from)?;
        println!("- Ingested {}", submission.name);
    }

    let roster = service.roster().await.map_err(AppError::from)?;
    render::dashboard(&roster);

    println!("\nScoring every applicant...");
    let mut last_scored = None;
    for applicant in &roster {
        let (prediction, _) = service.score(&applicant.id).await.map_err(AppError::from)?;
        println!(
            "- {}: {} ({})",
            applicant.name,
            prediction.score,
            prediction.risk_tier.label()
        );
        last_scored = Some((applicant.id.clone(), prediction));
    }

    let refreshed = service.roster().await.map_err(AppError::from)?;
    render::dashboard(&refreshed);
    render::roster(
        &filter_applicants(&refreshed, TierFilter::All),
        TierFilter::All,
    );

    if let Some((applicant_id, prediction)) = last_scored {
        render::score_card(&prediction);

        if !args.skip_insights {
            let (applicant, report) = service
                .insights(&applicant_id)
                .await
                .map_err(AppError::from)?;
            render::report(&applicant, &report);
        }
    }

    Ok(())
}
