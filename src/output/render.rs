//! Plain-text rendering of a report for terminal output.

use crate::models::{SourceName, SourceOutcome};
use crate::scoring::Criterion;

use super::LegitimacyReport;

pub fn render_text(report: &LegitimacyReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("Company: {}\n", report.request.company_name()));
    out.push_str(&format!("CIN:     {}\n", report.request.corporate_id()));
    out.push_str(&format!("GSTIN:   {}\n\n", report.request.tax_id()));

    out.push_str(&format!("Status:         {}\n", report.status));
    out.push_str(&format!("Classification: {}\n", report.classification));

    if report.is_invalid() {
        out.push_str("\nInput errors:\n");
        for err in &report.field_errors {
            out.push_str(&format!("  - {}\n", err));
        }
        return out;
    }

    if let Some(confidence) = report.confidence {
        out.push_str(&format!("Confidence:     {}\n", confidence));
    }
    if let Some(total) = report.total_score {
        out.push_str(&format!("Total score:    {}/{}\n", total, report.max_score));
    }
    if let Some(timing) = &report.timing {
        out.push_str(&format!(
            "Duration:       {:.2}s\n",
            timing.elapsed_ms as f64 / 1000.0
        ));
    }

    if let Some(breakdown) = &report.breakdown {
        out.push_str("\nScore breakdown:\n");
        for criterion in Criterion::ALL {
            out.push_str(&format!(
                "  {:<20} {:>3}/{}\n",
                criterion.to_string(),
                breakdown.get(criterion),
                criterion.max_points()
            ));
        }
    }

    if !report.flags.green.is_empty() {
        out.push_str(&format!("\nGreen flags ({}):\n", report.flags.green.len()));
        for flag in &report.flags.green {
            out.push_str(&format!("  + {}\n", flag));
        }
    }
    if !report.flags.red.is_empty() {
        out.push_str(&format!("\nRed flags ({}):\n", report.flags.red.len()));
        for flag in &report.flags.red {
            out.push_str(&format!("  - {}\n", flag));
        }
    }

    out.push_str("\nSources:\n");
    for source in SourceName::ALL {
        let line = match report.detailed_results.get(&source).map(|r| &r.outcome) {
            Some(SourceOutcome::Found(_)) => "found".to_string(),
            Some(SourceOutcome::Failed(err)) => format!("failed ({})", err),
            None => "not run".to_string(),
        };
        out.push_str(&format!("  {:<26} {}\n", source.label(), line));
    }

    out
}
