use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use credsaathi::config::AppConfig;
use tracing::info;
use credsaathi::error::AppError;
use credsaathi::session::SessionContext;
use credsaathi::telemetry;
use credsaathi::workflows::applicants::{
    filter_applicants, ApplicantDraft, ApplicantId, ApplicantService, HttpScoringBackend, RiskTier,
    TierFilter,
};

use crate::demo::{run_demo, DemoArgs};
use crate::infra::parse_tier;
use crate::render;

#[derive(Parser, Debug)]
#[command(
    name = "CredSaathi Console",
    about = "Submit, score, and review loan applicants from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the applicant roster with aggregate statistics (default command)
    Dashboard(DashboardArgs),
    /// Validate a draft from a JSON file and submit it for ingestion
    Submit(SubmitArgs),
    /// Request a credit score for an applicant and refresh the dashboard
    Score(ScoreArgs),
    /// Generate and render the borrower intelligence report for an applicant
    Insights(InsightsArgs),
    /// Run an offline end-to-end demo against an in-memory backend
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct DashboardArgs {
    /// Only list applicants in one tier (low, medium, high, very_high)
    #[arg(long, value_parser = parse_tier)]
    pub(crate) tier: Option<RiskTier>,
}

#[derive(Args, Debug)]
pub(crate) struct SubmitArgs {
    /// Path to a JSON file holding the applicant draft
    pub(crate) file: PathBuf,
}

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Backend-assigned applicant id
    pub(crate) applicant_id: String,
}

#[derive(Args, Debug)]
pub(crate) struct InsightsArgs {
    /// Backend-assigned applicant id
    pub(crate) applicant_id: String,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config)?;

    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Dashboard(DashboardArgs::default()));

    // The demo never touches the network; everything else shares one
    // authorized session against the configured backend.
    match command {
        Command::Demo(args) => run_demo(args).await,
        online => {
            info!(?config.environment, backend = %config.backend.base_url, "console session ready");
            let session = SessionContext::from_config(&config.backend);
            let backend = Arc::new(HttpScoringBackend::new(session.clone()));
            let service = ApplicantService::new(backend, session);

            match online {
                Command::Dashboard(args) => run_dashboard(&service, args).await,
                Command::Submit(args) => run_submit(&service, args).await,
                Command::Score(args) => run_score(&service, args).await,
                Command::Insights(args) => run_insights(&service, args).await,
                Command::Demo(_) => unreachable!("handled above"),
            }
        }
    }
}

async fn run_dashboard(
    service: &ApplicantService<HttpScoringBackend>,
    args: DashboardArgs,
) -> Result<(), AppError> {
    println!("Fetching applicant roster...");
    let roster = service.roster().await.map_err(AppError::from)?;

    render::dashboard(&roster);

    let filter = match args.tier {
        Some(tier) => TierFilter::Tier(tier),
        None => TierFilter::All,
    };
    render::roster(&filter_applicants(&roster, filter), filter);
    Ok(())
}

async fn run_submit(
    service: &ApplicantService<HttpScoringBackend>,
    args: SubmitArgs,
) -> Result<(), AppError> {
    info!(file = %args.file.display(), "loading applicant draft");
    let raw = std::fs::read_to_string(&args.file)?;
    let draft: ApplicantDraft = serde_json::from_str(&raw)?;

    println!("Submitting applicant...");
    let submission = service.submit(draft).await.map_err(AppError::from)?;
    println!("Applicant '{}' submitted for ingestion.", submission.name);
    if !submission.gig_data.platforms.is_empty() {
        println!("  Platforms: {}", submission.gig_data.platforms.join(", "));
    }
    Ok(())
}

async fn run_score(
    service: &ApplicantService<HttpScoringBackend>,
    args: ScoreArgs,
) -> Result<(), AppError> {
    let applicant_id = ApplicantId(args.applicant_id);
    info!(applicant = %applicant_id, "requesting score");
    println!("Requesting score for {applicant_id}...");
    let (prediction, roster) = service.score(&applicant_id).await.map_err(AppError::from)?;

    render::score_card(&prediction);
    render::dashboard(&roster);
    Ok(())
}

async fn run_insights(
    service: &ApplicantService<HttpScoringBackend>,
    args: InsightsArgs,
) -> Result<(), AppError> {
    let applicant_id = ApplicantId(args.applicant_id);
    info!(applicant = %applicant_id, "requesting insight report");
    println!("Generating borrower intelligence report for {applicant_id}...");
    let (applicant, report) = service
        .insights(&applicant_id)
        .await
        .map_err(AppError::from)?;

    render::report(&applicant, &report);
    Ok(())
}
