//! Facet validation and atomic submission assembly.
//!
//! Each facet is validated independently; only when all four pass does the
//! assembler emit an [`ApplicantSubmission`]. A rejection names every facet
//! that failed together with its field-level violations, so the operator can
//! fix the whole draft in one pass.

use serde::Deserialize;

use super::domain::{ApplicantSubmission, FinancialFacet, GigFacet, SocialFacet};

/// Raw operator input for one applicant, prior to any validation. Numeric
/// fields are deliberately wide so range violations surface as field
/// messages instead of deserialization failures.
#[derive(Debug, Clone, Deserialize)]
pub struct ApplicantDraft {
    pub identity: IdentityForm,
    pub financial: FinancialForm,
    pub social: SocialForm,
    pub gig: GigForm,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdentityForm {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FinancialForm {
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    pub savings: f64,
    #[serde(default)]
    pub existing_loans: f64,
    #[serde(default)]
    pub payment_history_score: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SocialForm {
    #[serde(default)]
    pub social_connections: i64,
    #[serde(default)]
    pub community_engagement_score: i64,
    #[serde(default)]
    pub references_count: i64,
    #[serde(default)]
    pub online_reputation_score: i64,
}

/// Gig facet input. `platforms` is the free-text comma-separated field as
/// typed by the operator; derivation happens during validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GigForm {
    #[serde(default)]
    pub platforms: String,
    #[serde(default)]
    pub total_gigs_completed: i64,
    #[serde(default)]
    pub average_rating: f64,
    #[serde(default)]
    pub active_months: i64,
    #[serde(default)]
    pub income_consistency_score: i64,
}

/// Which facet a violation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacetKind {
    Identity,
    Financial,
    Social,
    Gig,
}

impl FacetKind {
    pub const fn label(self) -> &'static str {
        match self {
            FacetKind::Identity => "identity",
            FacetKind::Financial => "financial",
            FacetKind::Social => "social",
            FacetKind::Gig => "gig",
        }
    }
}

/// Field-level validation failures surfaced to the operator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FacetViolation {
    #[error("name must be at least 2 characters")]
    NameTooShort,
    #[error("invalid email address")]
    InvalidEmail,
    #[error("monthly income must be positive")]
    NonPositiveIncome,
    #[error("{field} cannot be negative")]
    NegativeAmount { field: &'static str },
    #[error("{field} must be between 0 and {max}")]
    OutOfRange { field: &'static str, max: u32 },
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
}

/// All violations for one facet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetFailure {
    pub facet: FacetKind,
    pub violations: Vec<FacetViolation>,
}

/// Raised when any facet fails validation; the backend is never contacted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("submission rejected: {}", self.summary())]
pub struct IntakeRejection {
    pub failures: Vec<FacetFailure>,
}

impl IntakeRejection {
    fn summary(&self) -> String {
        self.failures
            .iter()
            .map(|failure| {
                let details = failure
                    .violations
                    .iter()
                    .map(|violation| violation.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{} facet ({details})", failure.facet.label())
            })
            .collect::<Vec<_>>()
            .join("; ")
    }

    pub fn failed_facets(&self) -> Vec<FacetKind> {
        self.failures.iter().map(|failure| failure.facet).collect()
    }
}

/// Validate all four facets and assemble the submission. All-or-nothing:
/// every facet is checked even after the first failure so the rejection
/// reports the complete picture.
pub fn assemble(draft: ApplicantDraft) -> Result<ApplicantSubmission, IntakeRejection> {
    let mut failures = Vec::new();

    let identity = match validate_identity(draft.identity) {
        Ok(identity) => Some(identity),
        Err(violations) => {
            failures.push(FacetFailure {
                facet: FacetKind::Identity,
                violations,
            });
            None
        }
    };

    let financial = match validate_financial(&draft.financial) {
        Ok(facet) => Some(facet),
        Err(violations) => {
            failures.push(FacetFailure {
                facet: FacetKind::Financial,
                violations,
            });
            None
        }
    };

    let social = match validate_social(&draft.social) {
        Ok(facet) => Some(facet),
        Err(violations) => {
            failures.push(FacetFailure {
                facet: FacetKind::Social,
                violations,
            });
            None
        }
    };

    let gig = match validate_gig(&draft.gig) {
        Ok(facet) => Some(facet),
        Err(violations) => {
            failures.push(FacetFailure {
                facet: FacetKind::Gig,
                violations,
            });
            None
        }
    };

    match (identity, financial, social, gig) {
        (Some((name, email, phone)), Some(financial_data), Some(social_data), Some(gig_data)) => {
            Ok(ApplicantSubmission {
                name,
                email,
                phone,
                financial_data,
                social_data,
                gig_data,
            })
        }
        _ => Err(IntakeRejection { failures }),
    }
}

/// Split the free-text platforms field on commas, trimming whitespace and
/// discarding empty tokens. Order is preserved and duplicates are kept.
pub fn split_platforms(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

fn validate_identity(
    form: IdentityForm,
) -> Result<(String, String, Option<String>), Vec<FacetViolation>> {
    let mut violations = Vec::new();

    let name = form.name.trim().to_string();
    if name.chars().count() < 2 {
        violations.push(FacetViolation::NameTooShort);
    }

    let email = form.email.trim().to_string();
    if !is_valid_email(&email) {
        violations.push(FacetViolation::InvalidEmail);
    }

    let phone = form
        .phone
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty());

    if violations.is_empty() {
        Ok((name, email, phone))
    } else {
        Err(violations)
    }
}

fn validate_financial(form: &FinancialForm) -> Result<FinancialFacet, Vec<FacetViolation>> {
    let mut violations = Vec::new();

    for (field, value) in [
        ("monthly_income", form.monthly_income),
        ("monthly_expenses", form.monthly_expenses),
        ("savings", form.savings),
        ("existing_loans", form.existing_loans),
    ] {
        if !value.is_finite() {
            violations.push(FacetViolation::NotFinite { field });
        }
    }

    if form.monthly_income.is_finite() && form.monthly_income <= 0.0 {
        violations.push(FacetViolation::NonPositiveIncome);
    }
    for (field, value) in [
        ("monthly_expenses", form.monthly_expenses),
        ("savings", form.savings),
        ("existing_loans", form.existing_loans),
    ] {
        if value.is_finite() && value < 0.0 {
            violations.push(FacetViolation::NegativeAmount { field });
        }
    }

    let payment_history_score = match hundred_scale("payment_history_score", form.payment_history_score)
    {
        Ok(score) => score,
        Err(violation) => {
            violations.push(violation);
            0
        }
    };

    if violations.is_empty() {
        Ok(FinancialFacet {
            monthly_income: form.monthly_income,
            monthly_expenses: form.monthly_expenses,
            savings: form.savings,
            existing_loans: form.existing_loans,
            payment_history_score,
        })
    } else {
        Err(violations)
    }
}

fn validate_social(form: &SocialForm) -> Result<SocialFacet, Vec<FacetViolation>> {
    let mut violations = Vec::new();

    let social_connections = match counter("social_connections", form.social_connections) {
        Ok(count) => count,
        Err(violation) => {
            violations.push(violation);
            0
        }
    };
    let references_count = match counter("references_count", form.references_count) {
        Ok(count) => count,
        Err(violation) => {
            violations.push(violation);
            0
        }
    };
    let community_engagement_score =
        match hundred_scale("community_engagement_score", form.community_engagement_score) {
            Ok(score) => score,
            Err(violation) => {
                violations.push(violation);
                0
            }
        };
    let online_reputation_score =
        match hundred_scale("online_reputation_score", form.online_reputation_score) {
            Ok(score) => score,
            Err(violation) => {
                violations.push(violation);
                0
            }
        };

    if violations.is_empty() {
        Ok(SocialFacet {
            social_connections,
            community_engagement_score,
            references_count,
            online_reputation_score,
        })
    } else {
        Err(violations)
    }
}

fn validate_gig(form: &GigForm) -> Result<GigFacet, Vec<FacetViolation>> {
    let mut violations = Vec::new();

    let total_gigs_completed = match counter("total_gigs_completed", form.total_gigs_completed) {
        Ok(count) => count,
        Err(violation) => {
            violations.push(violation);
            0
        }
    };
    let active_months = match counter("active_months", form.active_months) {
        Ok(count) => count,
        Err(violation) => {
            violations.push(violation);
            0
        }
    };
    let income_consistency_score =
        match hundred_scale("income_consistency_score", form.income_consistency_score) {
            Ok(score) => score,
            Err(violation) => {
                violations.push(violation);
                0
            }
        };

    if !form.average_rating.is_finite() {
        violations.push(FacetViolation::NotFinite {
            field: "average_rating",
        });
    } else if !(0.0..=5.0).contains(&form.average_rating) {
        violations.push(FacetViolation::OutOfRange {
            field: "average_rating",
            max: 5,
        });
    }

    if violations.is_empty() {
        Ok(GigFacet {
            platforms: split_platforms(&form.platforms),
            total_gigs_completed,
            average_rating: form.average_rating,
            active_months,
            income_consistency_score,
        })
    } else {
        Err(violations)
    }
}

fn counter(field: &'static str, value: i64) -> Result<u32, FacetViolation> {
    u32::try_from(value).map_err(|_| {
        if value < 0 {
            FacetViolation::NegativeAmount { field }
        } else {
            FacetViolation::OutOfRange {
                field,
                max: u32::MAX,
            }
        }
    })
}

fn hundred_scale(field: &'static str, value: i64) -> Result<u8, FacetViolation> {
    if (0..=100).contains(&value) {
        Ok(value as u8)
    } else {
        Err(FacetViolation::OutOfRange { field, max: 100 })
    }
}

/// Minimal email syntax check: one `@`, non-empty local part, dotted domain
/// with no whitespace. Deliverability is the backend's problem.
fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && !host.starts_with('.') && !tld.is_empty()
}
