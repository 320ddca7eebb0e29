//! Contributor profile badges: SVG cards, shields.io endpoints and
//! markdown collections written under the badges directory.

pub mod markdown;
pub mod shields;
pub mod svg;

pub use markdown::{render_instructions, render_static_badges, render_user_badges_markdown};
pub use shields::{render_shields_json, shields_endpoint, ShieldsEndpoint};
pub use svg::{color_scheme, render_card_svg, render_compact_svg, ColorScheme};

use anyhow::Result;
use std::collections::BTreeMap;
use std::path::Path;

use crate::config::RepositoryConfig;
use crate::ranking::{completion_rate, TierRule, TierTable};
use crate::scan::{ClassicScan, PackageScan};
use crate::storage::write_if_changed;

/// Number of contributors listed in the badges README gallery
const GALLERY_SIZE: usize = 4;

/// Badge inputs for one contributor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeStats {
    pub username: String,
    /// Classic challenges completed
    pub solved: u32,
    /// Classic challenges available
    pub total: u32,
    /// Completed challenges per package
    pub packages: BTreeMap<String, u32>,
}

impl BadgeStats {
    pub fn tier<'a>(&self, table: &'a TierTable) -> &'a TierRule {
        table.lookup(self.solved as usize, self.total as usize)
    }

    /// Classic completion rate with one decimal place, without the percent sign
    pub fn rate_text(&self) -> String {
        format!("{:.1}", completion_rate(self.solved as usize, self.total as usize))
    }

    pub fn has_packages(&self) -> bool {
        !self.packages.is_empty()
    }

    pub fn package_solved(&self) -> u32 {
        self.packages.values().sum()
    }
}

fn stats_entry<'a>(
    by_user: &'a mut BTreeMap<String, BadgeStats>,
    username: &str,
    total: u32,
) -> &'a mut BadgeStats {
    by_user
        .entry(username.to_string())
        .or_insert_with(|| BadgeStats {
            username: username.to_string(),
            solved: 0,
            total,
            packages: BTreeMap::new(),
        })
}

/// One `BadgeStats` per user with any classic or package completion,
/// sorted by username
pub fn collect_badge_stats(classic: &ClassicScan, packages: &PackageScan) -> Vec<BadgeStats> {
    let total = classic.total() as u32;
    let mut by_user: BTreeMap<String, BadgeStats> = BTreeMap::new();

    for record in &classic.completions {
        stats_entry(&mut by_user, &record.username, total).solved += 1;
    }
    for record in &packages.completions {
        if let Some(ref package) = record.package {
            *stats_entry(&mut by_user, &record.username, total)
                .packages
                .entry(package.clone())
                .or_default() += 1;
        }
    }

    by_user.into_values().collect()
}

/// Whether a username can be used as a file name stem in the badges directory
pub fn is_safe_username(username: &str) -> bool {
    !username.is_empty()
        && !username.contains("..")
        && !username.starts_with('.')
        && !username
            .chars()
            .any(|c| c == '/' || c == '\\' || c == ':' || c.is_control())
}

/// Outcome of a badge generation run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BadgeReport {
    pub generated: usize,
    pub skipped: Vec<String>,
    /// Whether any file on disk was written
    pub changed: bool,
}

/// Write every badge file for `stats` into `dir`, plus `static_badges.md`
/// and `README.md`. Files whose content did not change are left alone.
pub fn write_badges(
    dir: &Path,
    stats: &[BadgeStats],
    tiers: &TierTable,
    repo: &RepositoryConfig,
    badges_dir: &str,
) -> Result<BadgeReport> {
    let mut report = BadgeReport::default();

    for user in stats {
        if !is_safe_username(&user.username) {
            tracing::warn!(username = %user.username, "skipping badges for unsafe username");
            report.skipped.push(user.username.clone());
            continue;
        }

        let tier = user.tier(tiers);
        let endpoint = shields_endpoint(user, tier, &repo.name);
        let name = &user.username;

        report.changed |=
            write_if_changed(&dir.join(format!("{}.json", name)), &render_shields_json(&endpoint)?)?;
        report.changed |=
            write_if_changed(&dir.join(format!("{}.svg", name)), &render_card_svg(user, tier, repo))?;
        report.changed |= write_if_changed(
            &dir.join(format!("{}_compact.svg", name)),
            &render_compact_svg(user, tier, repo),
        )?;
        report.changed |= write_if_changed(
            &dir.join(format!("{}_badges.md", name)),
            &render_user_badges_markdown(user, tier, repo, badges_dir),
        )?;

        tracing::debug!(username = %name, solved = user.solved, "generated badges");
        report.generated += 1;
    }

    report.changed |=
        write_if_changed(&dir.join("static_badges.md"), &render_static_badges(tiers, repo))?;

    let mut gallery: Vec<&BadgeStats> = stats
        .iter()
        .filter(|s| is_safe_username(&s.username) && s.solved > 0)
        .collect();
    gallery.sort_by(|a, b| b.solved.cmp(&a.solved).then_with(|| a.username.cmp(&b.username)));
    gallery.truncate(GALLERY_SIZE);
    report.changed |= write_if_changed(
        &dir.join("README.md"),
        &render_instructions(tiers, repo, badges_dir, &gallery),
    )?;

    tracing::info!(generated = report.generated, skipped = report.skipped.len(), "badges written");
    Ok(report)
}
