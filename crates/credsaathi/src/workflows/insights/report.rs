use serde::Serialize;
use serde_json::Value;

use super::normalizer::{display_label, normalize, Rendered};

/// A backend-produced insight report: section name to arbitrary JSON value.
/// The `preserve_order` map keeps section and key order as received, which
/// is a presentation contract, not an accident.
pub type InsightReport = serde_json::Map<String, Value>;

/// Section name that receives distinguished visual emphasis. Its value is
/// normalized exactly like every other section.
pub const DASHBOARD_SECTION: &str = "dashboard_output";

/// One normalized top-level section of an insight report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportSection {
    pub name: String,
    /// Section name with underscores replaced by spaces.
    pub title: String,
    /// Set for [`DASHBOARD_SECTION`]; emphasis is the caller's concern.
    pub emphasized: bool,
    pub body: Rendered,
}

/// Normalize every section of a report, in order. A single oddly shaped
/// section degrades to its string form inside `normalize` and never stops
/// the remaining sections from rendering.
pub fn sections(report: &InsightReport) -> Vec<ReportSection> {
    report
        .iter()
        .map(|(name, value)| ReportSection {
            name: name.clone(),
            title: display_label(name),
            emphasized: name == DASHBOARD_SECTION,
            body: normalize(value),
        })
        .collect()
}
