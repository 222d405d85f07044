//! Markdown summary generation
//!
//! Writes a human-readable report of one crawl run: when it ran, why it
//! stopped, what it recorded and which targets failed.

use crate::output::summary::CrawlSummary;
use crate::output::OutputResult;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes the markdown summary for `summary` to `output_path`
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote markdown summary
/// * `Err(OutputError)` - Failed to write summary
pub fn generate_markdown_summary(summary: &CrawlSummary, output_path: &Path) -> OutputResult<()> {
    let markdown = format_markdown_summary(summary);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a crawl summary as markdown
pub fn format_markdown_summary(summary: &CrawlSummary) -> String {
    let mut md = String::new();

    md.push_str("# Cinegraph Crawl Summary\n\n");

    // Run metadata
    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Started**: {}\n", summary.started_at.to_rfc3339()));
    if let Some(finished) = &summary.finished_at {
        md.push_str(&format!("- **Finished**: {}\n", finished.to_rfc3339()));
    }
    if let Some(duration) = summary.duration_seconds() {
        md.push_str(&format!(
            "- **Duration**: {} seconds ({:.2} minutes)\n",
            duration,
            duration as f64 / 60.0
        ));
    }
    md.push_str(&format!("- **Stopped**: {}\n", summary.stop_reason.as_str()));
    if let Some(hash) = &summary.config_hash {
        md.push_str(&format!("- **Config Hash**: {}\n", hash));
    }
    md.push('\n');

    md.push_str("## Overall Statistics\n\n");
    md.push_str(&format!(
        "- **Targets Dequeued**: {}\n",
        summary.targets_dequeued
    ));
    md.push_str(&format!("- **People Recorded**: {}\n", summary.people_recorded));
    md.push_str(&format!("- **Credits Found**: {}\n", summary.works_credited));
    md.push_str(&format!("- **Total Failures**: {}\n", summary.total_failures()));
    md.push_str(&format!(
        "- **Still Queued**: {}\n",
        summary.frontier_remaining
    ));
    md.push_str(&format!(
        "- **Success Rate**: {:.2}%\n\n",
        summary.success_rate()
    ));

    md.push_str("## Target Outcomes\n\n");
    md.push_str("| Outcome | Count |\n");
    md.push_str("|---------|-------|\n");
    for (label, count) in [
        ("Recorded", summary.people_recorded),
        ("Work (unanalyzed)", summary.works_unanalyzed),
        ("Already visited", summary.already_visited),
        ("Fetch failed", summary.fetch_failures),
        ("Fetch timeout", summary.fetch_timeouts),
        ("Fetch cancelled", summary.fetch_cancelled),
        ("Filmography missing", summary.filmography_missing),
        ("Filmography page failed", summary.reference_page_failures),
        ("Graph sink failed", summary.sink_failures),
    ] {
        md.push_str(&format!("| {} | {} |\n", label, count));
    }
    md.push('\n');

    if !summary.failed_targets.is_empty() {
        md.push_str("## Failed Targets\n\n");
        md.push_str("| URL | Reason |\n");
        md.push_str("|-----|--------|\n");
        for (url, label) in &summary.failed_targets {
            md.push_str(&format!("| {} | {} |\n", url, label));
        }
        md.push('\n');
    }

    md
}
