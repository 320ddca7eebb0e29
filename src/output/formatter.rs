use std::io::IsTerminal;
use owo_colors::OwoColorize;

use crate::update::{Job, JobSummary, RunSummary};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

fn status_text(summary: &JobSummary) -> &'static str {
    if summary.changed {
        "updated"
    } else {
        "unchanged"
    }
}

/// One line for a finished job: "✓ Classic leaderboard: updated (3 developers ...)"
pub fn format_job_success(summary: &JobSummary, use_colors: bool) -> String {
    if use_colors {
        format!(
            "{} {}: {} ({})",
            "✓".green(),
            summary.job.to_string().bold(),
            status_text(summary).cyan(),
            summary.detail
        )
    } else {
        format!(
            "✓ {}: {} ({})",
            summary.job,
            status_text(summary),
            summary.detail
        )
    }
}

/// One line for a failed job, with the full error chain
pub fn format_job_failure(job: Job, error: &anyhow::Error, use_colors: bool) -> String {
    if use_colors {
        format!(
            "{} {}: {}",
            "✗".red(),
            job.to_string().bold(),
            format!("{:#}", error).red()
        )
    } else {
        format!("✗ {}: {:#}", job, error)
    }
}

/// Per-job lines followed by "Jobs: 3 run, 2 succeeded, 1 failed"
pub fn format_run_summary(summary: &RunSummary, use_colors: bool) -> String {
    let mut lines: Vec<String> = summary
        .results
        .iter()
        .map(|(job, result)| match result {
            Ok(s) => format_job_success(s, use_colors),
            Err(e) => format_job_failure(*job, e, use_colors),
        })
        .collect();

    let run = summary.results.len();
    let succeeded = summary.succeeded();
    let failed = summary.failed();

    let totals = if use_colors {
        let failed_text = if failed > 0 {
            failed.red().bold().to_string()
        } else {
            failed.to_string()
        };
        format!(
            "Jobs: {} run, {} succeeded, {} failed",
            run,
            succeeded.green(),
            failed_text
        )
    } else {
        format!(
            "Jobs: {} run, {} succeeded, {} failed",
            run, succeeded, failed
        )
    };

    lines.push(String::new());
    lines.push(totals);
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn success(job: Job, changed: bool) -> JobSummary {
        JobSummary {
            job,
            changed,
            detail: "2 contributors".to_string(),
        }
    }

    #[test]
    fn test_format_job_success_plain() {
        assert_eq!(
            format_job_success(&success(Job::Badges, true), false),
            "✓ Contributor badges: updated (2 contributors)"
        );
        assert_eq!(
            format_job_success(&success(Job::Badges, false), false),
            "✓ Contributor badges: unchanged (2 contributors)"
        );
    }

    #[test]
    fn test_format_job_failure_includes_context() {
        let error = anyhow::anyhow!("no anchor").context("Failed to update README.md");
        assert_eq!(
            format_job_failure(Job::Classic, &error, false),
            "✗ Classic leaderboard: Failed to update README.md: no anchor"
        );
    }

    #[test]
    fn test_format_run_summary_counts() {
        let summary = RunSummary {
            results: vec![
                (Job::Classic, Ok(success(Job::Classic, true))),
                (Job::Packages, Err(anyhow::anyhow!("boom"))),
                (Job::Badges, Ok(success(Job::Badges, false))),
            ],
        };
        let out = format_run_summary(&summary, false);
        assert!(out.contains("✗ Package leaderboard: boom"));
        assert!(out.ends_with("Jobs: 3 run, 2 succeeded, 1 failed"));
    }

    #[test]
    fn test_colored_output_has_escapes() {
        let out = format_job_success(&success(Job::Classic, true), true);
        assert!(out.contains("\x1b["));
    }
}
