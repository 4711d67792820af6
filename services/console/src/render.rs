//! Terminal rendering for dashboards, score cards, and insight reports.

use credsaathi::workflows::applicants::{
    dashboard_stats, present_applicant, present_tier, progress_fraction, ScoreBucket,
    ScorePrediction, ScoredApplicant, TierFilter,
};
use credsaathi::workflows::insights::{sections, InsightReport, Rendered};

const BAR_WIDTH: usize = 24;

fn bar(fraction: f64, width: usize) -> String {
    let filled = ((fraction * width as f64).round() as usize).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Aggregate statistics over the roster: totals, mean score, attention
/// count, and the four-bucket score distribution.
pub(crate) fn dashboard(roster: &[ScoredApplicant]) {
    let stats = dashboard_stats(roster);

    println!("\nApplicant dashboard");
    println!(
        "- {} applicants | {} scored | {} need attention",
        stats.total, stats.scored, stats.needs_attention
    );
    if stats.scored > 0 {
        println!("- Average score: {}", stats.average_score);
    } else {
        println!("- Average score: n/a (no applicant scored yet)");
    }

    println!("Score distribution:");
    let peak = stats
        .distribution
        .iter()
        .map(|bucket| bucket.count)
        .max()
        .unwrap_or(0);
    for bucket in &stats.distribution {
        let fraction = if peak > 0 {
            bucket.count as f64 / peak as f64
        } else {
            0.0
        };
        println!(
            "  {:9} {:7} {} {}",
            bucket.bucket.grade(),
            bucket.range,
            bar(fraction, BAR_WIDTH),
            bucket.count
        );
    }
}

/// One line per applicant, newest data as the backend returned it.
pub(crate) fn roster(applicants: &[&ScoredApplicant], filter: TierFilter) {
    match filter {
        TierFilter::All => println!("\nApplicants:"),
        TierFilter::Tier(tier) => println!("\nApplicants in tier {}:", tier.label()),
    }
    if applicants.is_empty() {
        println!("  (none)");
        return;
    }
    for applicant in applicants {
        let presentation = present_applicant(applicant);
        let score = match applicant.scored() {
            Some((score, _)) => score.to_string(),
            None => "-".to_string(),
        };
        println!(
            "  {} | {} | score {} | {}",
            applicant.id, applicant.name, score, presentation.label
        );
    }
}

/// Score card with the 300..=850 progress bar and the bucket range guide.
pub(crate) fn score_card(prediction: &ScorePrediction) {
    let presentation = present_tier(Some(prediction.risk_tier));

    println!("\n{} ({})", presentation.headline, presentation.label);
    println!(
        "  Score {} [{}]",
        prediction.score,
        bar(progress_fraction(prediction.score), BAR_WIDTH)
    );
    if let Some(confidence) = prediction.confidence {
        println!("  Confidence: {:.0}%", confidence * 100.0);
    }
    println!("  {}", presentation.guidance);

    println!("  Range guide:");
    for bucket in ScoreBucket::ALL {
        let marker = if ScoreBucket::for_score(prediction.score) == bucket {
            "->"
        } else {
            "  "
        };
        println!("   {} {:9} {}", marker, bucket.grade(), bucket.range_label());
    }

    if !prediction.feature_importances.is_empty() {
        println!("  Contributing factors:");
        for factor in &prediction.feature_importances {
            println!(
                "    - {}: {} ({:.0}% weight)",
                factor.feature,
                factor.value.rendered(),
                factor.importance * 100.0
            );
        }
    }
}

/// Full borrower intelligence report, one table per section in backend
/// order. The dashboard section gets a distinguished heading.
pub(crate) fn report(applicant: &ScoredApplicant, report: &InsightReport) {
    let presentation = present_applicant(applicant);
    println!(
        "\nBorrower intelligence report for {} ({})",
        applicant.name, presentation.label
    );

    for section in sections(report) {
        if section.emphasized {
            println!("\n== Decision & Summary ==");
        } else {
            println!("\n{}", section.title);
        }
        rendered(&section.body, 1);
    }
}

fn rendered(value: &Rendered, depth: usize) {
    let pad = "  ".repeat(depth);
    match value {
        Rendered::Text(text) => println!("{pad}{text}"),
        Rendered::Rows(rows) => {
            for row in rows {
                match &row.value {
                    Rendered::Text(text) => println!("{pad}{}: {text}", row.label),
                    nested => {
                        println!("{pad}{}:", row.label);
                        rendered(nested, depth + 1);
                    }
                }
            }
        }
        Rendered::Items(items) => {
            for item in items {
                rendered(item, depth);
            }
        }
    }
}
