use std::collections::{BTreeMap, BTreeSet};

use super::{avatar_url, profile_url, rank_label, sponsor_suffix};
use crate::config::LeaderboardConfig;
use crate::ranking::TierTable;
use crate::readme::{PACKAGE_END, PACKAGE_START};
use crate::scan::PackageScan;
use crate::scoreboard::UserTotals;

const PROGRESS_CELLS: usize = 10;

const EMPTY_MESSAGE: &str =
    "No completed package challenges yet. Be the first to solve a package challenge!";

/// Capitalize the first letter of every alphabetic run:
/// "gin" -> "Gin", "go-redis" -> "Go-Redis"
pub fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut at_word_start = true;
    for c in name.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

/// Ten 🟩/⬜ cells plus a whole percentage: "🟩🟩🟩⬜⬜⬜⬜⬜⬜⬜ 33%".
/// An empty package renders as ten empty cells.
pub fn progress_bar(completed: usize, total: usize) -> String {
    if total == 0 {
        return "⬜".repeat(PROGRESS_CELLS);
    }

    let progress = completed as f64 / total as f64;
    let filled = ((progress * PROGRESS_CELLS as f64) as usize).min(PROGRESS_CELLS);
    format!(
        "{}{} {:.0}%",
        "🟩".repeat(filled),
        "⬜".repeat(PROGRESS_CELLS - filled),
        progress * 100.0
    )
}

/// "**gin**: 2 • **gorm**: 1"
fn package_breakdown(user: &UserTotals) -> String {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for package in user.challenges.iter().filter_map(|c| c.package.as_deref()) {
        *counts.entry(package).or_default() += 1;
    }
    counts
        .iter()
        .map(|(package, count)| format!("**{}**: {}", package, count))
        .collect::<Vec<_>>()
        .join(" • ")
}

fn overall_table(
    ranked: &[UserTotals],
    tiers: &TierTable,
    sponsors: &BTreeSet<String>,
    top: usize,
) -> Vec<String> {
    let mut lines = vec![
        "| 🏅 | Developer | Total Solved | Packages | Achievement | Challenge Distribution |".to_string(),
        "|:---:|:---:|:---:|:---:|:---:|:---|".to_string(),
    ];

    for (i, user) in ranked.iter().take(top).enumerate() {
        let package_count = user.package_count();
        let profile = format!(
            r#"<img src="{}" width="24" height="24" style="border-radius: 50%;"><br/>**[{}]({})**{}"#,
            avatar_url(&user.username),
            user.username,
            profile_url(&user.username),
            sponsor_suffix(&user.username, sponsors),
        );
        lines.push(format!(
            "| {} | {} | **{}** | **{}** pkg{} | {} | {} |",
            rank_label(i + 1),
            profile,
            user.count(),
            package_count,
            if package_count == 1 { "" } else { "s" },
            tiers.lookup_count(user.count()).label(),
            package_breakdown(user),
        ));
    }

    lines.extend([
        String::new(),
        r#"<div align="center">"#.to_string(),
        String::new(),
        "🚀 **Package Challenges** - Learn Go packages through practical, real-world scenarios"
            .to_string(),
        String::new(),
        "</div>".to_string(),
    ]);
    lines
}

fn per_package_tables(
    by_package: &BTreeMap<String, Vec<UserTotals>>,
    scan: &PackageScan,
    sponsors: &BTreeSet<String>,
    top: usize,
) -> Vec<String> {
    let mut lines = Vec::new();

    for (package, users) in by_package.iter().filter(|(_, users)| !users.is_empty()) {
        let total = scan.challenges_in(package);
        lines.extend([
            format!("#### {} Package", title_case(package)),
            String::new(),
            "| Rank | Developer | Completed | Progress |".to_string(),
            "|:---:|:---:|:---:|:---|".to_string(),
        ]);

        for (i, user) in users.iter().take(top).enumerate() {
            lines.push(format!(
                "| {} | **[{}]({})**{} | {}/{} | {} |",
                rank_label(i + 1),
                user.username,
                profile_url(&user.username),
                sponsor_suffix(&user.username, sponsors),
                user.count(),
                total,
                progress_bar(user.count(), total),
            ));
        }
        lines.push(String::new());
    }

    lines
}

/// Render the package leaderboard region, from its heading through the
/// end marker line.
///
/// `ranked` is the overall ranking across packages and `by_package` the
/// per-package rankings, both already in rank order.
pub fn render_package_section(
    ranked: &[UserTotals],
    by_package: &BTreeMap<String, Vec<UserTotals>>,
    scan: &PackageScan,
    tiers: &TierTable,
    sponsors: &BTreeSet<String>,
    config: &LeaderboardConfig,
) -> String {
    let mut lines: Vec<String> = vec![
        PACKAGE_START.to_string(),
        String::new(),
        "Master Go packages through hands-on challenges! Each package offers a structured learning path with real-world scenarios.".to_string(),
        String::new(),
        "> **Note**: The data below is automatically updated by GitHub Actions when package challenge scoreboards change.".to_string(),
        String::new(),
    ];

    if ranked.is_empty() {
        lines.push(EMPTY_MESSAGE.to_string());
    } else {
        lines.extend(overall_table(ranked, tiers, sponsors, config.package_top));
    }

    lines.extend([
        String::new(),
        "### 📦 Per-Package Progress".to_string(),
        String::new(),
    ]);
    lines.extend(per_package_tables(by_package, scan, sponsors, config.per_package_top));

    lines.extend([
        "### 📊 Package Challenge Statistics".to_string(),
        String::new(),
        format!("- **Total Package Challenges Available**: {}", scan.total_challenges()),
        format!("- **Active Package Learners**: {}", ranked.len()),
        format!(
            "- **Available Packages**: {} ({})",
            scan.packages.len(),
            scan.package_names().join(", ")
        ),
    ]);

    if let Some(top) = ranked.first() {
        lines.push(format!(
            "- **Most Package Challenges Solved**: {} by {}",
            top.count(),
            top.username
        ));
    }

    lines.extend([String::new(), PACKAGE_END.to_string(), String::new()]);
    lines.join("\n")
}
