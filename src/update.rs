use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::badges::{collect_badge_stats, write_badges};
use crate::config::Config;
use crate::ranking::{aggregate, aggregate_by_package};
use crate::readme::{update_readme, RegionRegistry, CLASSIC_REGION, PACKAGE_REGION};
use crate::render::{render_classic_section, render_package_section};
use crate::scan::{scan_classic, scan_packages};
use crate::sponsors::SponsorSource;

/// One of the generation jobs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Job {
    Classic,
    Packages,
    Badges,
}

impl Job {
    pub const ALL: [Job; 3] = [Job::Classic, Job::Packages, Job::Badges];

    /// Whether the job renders sponsor marks
    pub fn needs_sponsors(self) -> bool {
        matches!(self, Job::Classic | Job::Packages)
    }
}

impl fmt::Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Job::Classic => "Classic leaderboard",
            Job::Packages => "Package leaderboard",
            Job::Badges => "Contributor badges",
        };
        f.write_str(name)
    }
}

/// Everything a job needs: where the repository is and how to render it
pub struct UpdateContext {
    pub root: PathBuf,
    pub config: Config,
    pub regions: RegionRegistry,
}

impl UpdateContext {
    pub fn new(root: impl Into<PathBuf>, config: Config) -> Self {
        Self {
            root: root.into(),
            config,
            regions: RegionRegistry::default(),
        }
    }

    pub fn readme_path(&self) -> PathBuf {
        self.root.join(&self.config.scan.readme_file)
    }

    pub fn badges_path(&self) -> PathBuf {
        self.root.join(&self.config.badges.dir)
    }

    fn root(&self) -> &Path {
        &self.root
    }
}

/// What a successful job did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSummary {
    pub job: Job,
    pub changed: bool,
    pub detail: String,
}

/// Rebuild the classic leaderboard region of the README
pub fn update_classic(ctx: &UpdateContext, sponsors: &BTreeSet<String>) -> Result<JobSummary> {
    let scan = scan_classic(ctx.root(), &ctx.config.scan)?;
    let ranked = aggregate(scan.completions.iter().cloned());
    tracing::info!(
        challenges = scan.total(),
        developers = ranked.len(),
        "aggregated classic challenges"
    );

    let body = render_classic_section(
        &ranked,
        &scan,
        &ctx.config.tiers.classic_table(),
        sponsors,
        &ctx.config.leaderboard,
    );
    let changed = update_readme(&ctx.readme_path(), &ctx.regions, CLASSIC_REGION, &body)?;

    Ok(JobSummary {
        job: Job::Classic,
        changed,
        detail: format!(
            "{} developers across {} challenges",
            ranked.len(),
            scan.total()
        ),
    })
}

/// Rebuild the package leaderboard region of the README
pub fn update_packages(ctx: &UpdateContext, sponsors: &BTreeSet<String>) -> Result<JobSummary> {
    let scan = scan_packages(ctx.root(), &ctx.config.scan)?;
    let ranked = aggregate(scan.completions.iter().cloned());
    let by_package = aggregate_by_package(scan.completions.iter());
    tracing::info!(
        packages = scan.packages.len(),
        learners = ranked.len(),
        "aggregated package challenges"
    );

    let body = render_package_section(
        &ranked,
        &by_package,
        &scan,
        &ctx.config.tiers.package_table(),
        sponsors,
        &ctx.config.leaderboard,
    );
    let changed = update_readme(&ctx.readme_path(), &ctx.regions, PACKAGE_REGION, &body)?;

    Ok(JobSummary {
        job: Job::Packages,
        changed,
        detail: format!(
            "{} learners across {} packages",
            ranked.len(),
            scan.packages.len()
        ),
    })
}

/// Regenerate every contributor's badge files
pub fn generate_badges(ctx: &UpdateContext) -> Result<JobSummary> {
    let classic = scan_classic(ctx.root(), &ctx.config.scan)?;
    let packages = scan_packages(ctx.root(), &ctx.config.scan)?;
    let stats = collect_badge_stats(&classic, &packages);

    let dir = ctx.badges_path();
    let report = write_badges(
        &dir,
        &stats,
        &ctx.config.tiers.badge_table(),
        &ctx.config.repository,
        &ctx.config.badges.dir,
    )
    .with_context(|| format!("Failed to write badges to {}", dir.display()))?;

    let mut detail = format!("{} contributors", report.generated);
    if !report.skipped.is_empty() {
        detail.push_str(&format!(", {} skipped", report.skipped.len()));
    }

    Ok(JobSummary {
        job: Job::Badges,
        changed: report.changed,
        detail,
    })
}

/// Run one job with an already fetched sponsor list
pub fn run_job_with(ctx: &UpdateContext, job: Job, sponsors: &BTreeSet<String>) -> Result<JobSummary> {
    tracing::debug!(%job, "running job");
    match job {
        Job::Classic => update_classic(ctx, sponsors),
        Job::Packages => update_packages(ctx, sponsors),
        Job::Badges => generate_badges(ctx),
    }
}

/// Run one job, looking up sponsors first when the job shows them
pub async fn run_job<S: SponsorSource>(
    ctx: &UpdateContext,
    job: Job,
    source: &S,
) -> Result<JobSummary> {
    let sponsors = if job.needs_sponsors() {
        source.fetch_sponsors().await
    } else {
        BTreeSet::new()
    };
    run_job_with(ctx, job, &sponsors)
}

/// Results of running several jobs
#[derive(Debug)]
pub struct RunSummary {
    pub results: Vec<(Job, Result<JobSummary>)>,
}

impl RunSummary {
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|(_, r)| r.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.succeeded()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed() == 0
    }
}

/// Run every job in order. A failing job does not stop the ones after it.
/// Sponsors are fetched once and shared by both leaderboards.
pub async fn run_all<S: SponsorSource>(ctx: &UpdateContext, source: &S) -> RunSummary {
    let sponsors = source.fetch_sponsors().await;

    let results = Job::ALL
        .iter()
        .map(|&job| {
            let result = run_job_with(ctx, job, &sponsors);
            if let Err(ref e) = result {
                tracing::error!(%job, error = %format!("{:#}", e), "job failed");
            }
            (job, result)
        })
        .collect();

    RunSummary { results }
}
