//! CLI output formatting

use crate::core::Workflow;
use crate::plugin::{Plugin, PluginMethodInfo};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

// Re-export style
pub use console::style;
use console::Emoji;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "!");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", "> ");

/// Create a progress bar
pub fn create_progress_bar(total: usize) -> ProgressBar {
    let progress = ProgressBar::new(total as u64);
    let bar_style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    progress.set_style(bar_style);
    progress.enable_steady_tick(Duration::from_millis(100));
    progress
}

/// One-line summary of an evaluated workflow
pub fn format_workflow_summary(workflow: &Workflow) -> String {
    let steps: usize = workflow.jobs.values().map(|j| j.steps.len()).sum();
    format!(
        "{} {} ({} triggers, {} jobs, {} steps)",
        ROCKET,
        style(&workflow.name).bold(),
        style(workflow.on.len()).cyan(),
        style(workflow.jobs.len()).cyan(),
        style(steps).cyan()
    )
}

/// Job names with their runner and dependencies, one per line
pub fn format_jobs(workflow: &Workflow) -> String {
    workflow
        .jobs
        .values()
        .map(|job| {
            let runner = job.runs_on.as_deref().unwrap_or("-");
            let mut line = format!(
                "  {} on {} ({} steps)",
                style(&job.name).bold(),
                style(runner).dim(),
                job.steps.len()
            );
            if let Some(needs) = &job.needs {
                line.push_str(&format!(" needs {}", style(needs.join(", ")).cyan()));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Plugin header line
pub fn format_plugin(plugin: &Plugin) -> String {
    let mut line = format!(
        "{} {} {}",
        INFO,
        style(&plugin.name).bold(),
        style(format!("v{}", plugin.version)).dim()
    );
    if !plugin.description.is_empty() {
        line.push_str(&format!(" - {}", plugin.description));
    }
    line
}

/// Step builder description with its example, if any
pub fn format_method(info: &PluginMethodInfo) -> String {
    let mut text = format!("  {}  {}", style(&info.name).cyan(), info.description);
    if let Some(example) = &info.example {
        text.push_str(&format!("\n    {}", style(example).dim()));
    }
    text
}
