//! Run artifacts and leaderboard rendering.

use anyhow::{Context, Result};
use std::path::Path;

use factbench_store::RegistryEntry;

use crate::domain::result::BenchmarkRun;

fn fmt_accuracy(accuracy: Option<f64>) -> String {
    match accuracy {
        Some(a) => format!("{:.1}%", a * 100.0),
        None => "n/a".to_string(),
    }
}

/// Render a markdown leaderboard from registry entries, best accuracy
/// first (undefined accuracy sorts last).
pub fn render_leaderboard_md(entries: &[RegistryEntry]) -> String {
    let mut rows: Vec<&RegistryEntry> = entries.iter().collect();
    rows.sort_by(|a, b| {
        b.accuracy
            .partial_cmp(&a.accuracy)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.date.cmp(&b.date))
    });

    let mut out = String::new();
    out.push_str("# Leaderboard\n\n");
    out.push_str("| # | Model | Accuracy | Halluc. | Refused | Hardware | Date |\n");
    out.push_str("|---|-------|----------|---------|---------|----------|------|\n");
    for (i, e) in rows.iter().enumerate() {
        out.push_str(&format!(
            "| {} | `{}` | {} | {} | {} | {} | {} |\n",
            i + 1,
            e.model_id,
            fmt_accuracy(e.accuracy),
            e.hallucinated_count,
            e.refused_count,
            e.hardware,
            e.date.format("%Y-%m-%d"),
        ));
    }
    out
}

/// Render a markdown summary of one run: overall accuracy, per-domain
/// breakdown, hallucination tallies.
pub fn render_run_summary_md(run: &BenchmarkRun) -> String {
    let agg = &run.aggregates;
    let mut out = String::new();
    out.push_str(&format!("# Run `{}`\n\n", run.run_id));
    out.push_str(&format!(
        "- model: `{}`\n- hardware: {}\n- accuracy: {} ({}/{} graded, {} skipped)\n\n",
        run.model_id,
        run.hardware,
        fmt_accuracy(agg.accuracy),
        agg.correct_count,
        agg.graded_count,
        agg.skipped_count,
    ));

    if !agg.per_domain_accuracy.is_empty() {
        out.push_str("## Per-domain accuracy\n");
        for (domain, accuracy) in &agg.per_domain_accuracy {
            out.push_str(&format!(
                "- {}: {}\n",
                domain,
                fmt_accuracy(Some(*accuracy))
            ));
        }
        out.push('\n');
    }

    let labeled = agg.hallucinated_count + agg.refused_count + agg.unclear_count;
    if labeled > 0 {
        out.push_str(&format!(
            "## Hallucination stress-tests ({labeled} tasks)\n\
             - hallucinated: {}\n- refused/corrected: {}\n- unclear: {}\n",
            agg.hallucinated_count, agg.refused_count, agg.unclear_count,
        ));
    }
    out
}

/// Write a run as pretty JSON.
pub fn write_run_json(path: &Path, run: &BenchmarkRun) -> Result<()> {
    let content = serde_json::to_string_pretty(run).context("serialize run artifact")?;
    std::fs::write(path, content).with_context(|| format!("write {:?}", path))?;
    Ok(())
}

/// Read a run back from a JSON artifact.
pub fn read_run_json(path: &Path) -> Result<BenchmarkRun> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("read {:?}", path))?;
    serde_json::from_str(&content).context("parse run artifact")
}
