//! Insight-report normalization.
//!
//! The backend returns a schema-less JSON document per applicant. This
//! module converts any such value into a uniform tree of labelled rows for
//! tabular presentation, without ever failing on well-formed JSON.

mod normalizer;
mod report;

pub use normalizer::{normalize, Rendered, ReportRow};
pub use report::{sections, InsightReport, ReportSection, DASHBOARD_SECTION};
