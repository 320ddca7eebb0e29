use super::BadgeStats;
use crate::config::RepositoryConfig;
use crate::ranking::{TierRule, TierTable};

/// Escape text for a shields.io static badge path segment
fn shields_text(text: &str) -> String {
    text.replace('-', "--").replace(' ', "_")
}

fn static_badge(alt: &str, label: &str, message: &str, color: &str, logo: &str, link: &str) -> String {
    format!(
        "[![{}](https://img.shields.io/badge/{}-{}-{}?style=for-the-badge&logo={}&logoColor=white)]({})",
        alt,
        shields_text(label),
        message,
        color,
        logo,
        link
    )
}

/// Per-user `<user>_badges.md` collection
pub fn render_user_badges_markdown(
    stats: &BadgeStats,
    tier: &TierRule,
    repo: &RepositoryConfig,
    badges_dir: &str,
) -> String {
    let url = repo.url();
    let user = &stats.username;
    let rate = stats.rate_text();

    let card = repo.raw_url(&format!("{}/{}.svg", badges_dir, user));
    let compact = repo.raw_url(&format!("{}/{}_compact.svg", badges_dir, user));
    let endpoint = repo.raw_url(&format!("{}/{}.json", badges_dir, user));

    let mut lines = vec![
        format!("## 🏆 {} Achievements", repo.name),
        String::new(),
        "### 🎨 Custom Badges".to_string(),
        format!("*Click any badge to visit the {} repository!*", repo.name),
        String::new(),
        format!("[![{} Achievement Card]({})]({})", repo.name, card, url),
        String::new(),
        format!("[![{} Compact]({})]({})", repo.name, compact, url),
        String::new(),
        "### 🔄 Dynamic Shields.io Badge".to_string(),
        format!(
            "[![{}](https://img.shields.io/endpoint?url={}&style=for-the-badge&logo=go&logoColor=white)]({})",
            repo.name, endpoint, url
        ),
        String::new(),
        "### 📊 Static Badges Collection".to_string(),
        static_badge(
            "Challenges Solved",
            "Go Challenges",
            &format!("{}%2F{}", stats.solved, stats.total),
            "brightgreen",
            "go",
            &url,
        ),
        static_badge(
            "Achievement Level",
            "Level",
            &shields_text(&tier.label()),
            &tier.color,
            "trophy",
            &url,
        ),
        static_badge(
            "Completion Rate",
            "Completion",
            &format!("{}%25", rate),
            &tier.color,
            "checkmarx",
            &url,
        ),
    ];

    if stats.has_packages() {
        lines.push(static_badge(
            "Package Challenges",
            "Package Challenges",
            &format!(
                "{}_across_{}_packages",
                stats.package_solved(),
                stats.packages.len()
            ),
            "purple",
            "package",
            &url,
        ));
    }

    lines.extend([
        String::new(),
        "### 🔗 Repository Link Badge".to_string(),
        static_badge(
            &format!("{} Repository", repo.name),
            "View Repository",
            &shields_text(&repo.name),
            "blue",
            "github",
            &url,
        ),
        String::new(),
        "---".to_string(),
        String::new(),
        "### 📈 Your Achievement Summary".to_string(),
        String::new(),
        format!("**👤 Username:** @{}  ", user),
        format!("**🏅 Achievement Level:** {} **{} Developer**  ", tier.emoji, tier.name),
        format!(
            "**📊 Classic Challenges:** {}/{} ({}% complete)  ",
            stats.solved, stats.total, rate
        ),
        format!("**🔗 Repository:** [{}]({})  ", repo.name, url),
    ]);

    if stats.has_packages() {
        lines.push(format!(
            "**📦 Package Challenges:** {} across {} packages",
            stats.package_solved(),
            stats.packages.len()
        ));
    }

    lines.push(String::new());
    lines.join("\n")
}

/// `static_badges.md`: a contributor badge plus one per tier
pub fn render_static_badges(tiers: &TierTable, repo: &RepositoryConfig) -> String {
    let url = repo.url();
    let mut badges = vec![(
        "Contributor".to_string(),
        static_badge(
            &format!("{} Contributor", repo.name),
            &repo.name,
            "Contributor",
            "blue",
            "go",
            &url,
        ),
    )];

    // Lowest tier first
    for rule in tiers.rules().iter().rev() {
        badges.push((
            rule.name.clone(),
            static_badge(
                &format!("{} {}", repo.name, rule.name),
                &repo.name,
                &shields_text(&rule.label()),
                &rule.color,
                "go",
                &url,
            ),
        ));
    }

    let mut out = String::from("# Static Badge Templates\n\nThese badges can be used by any contributor:\n\n");
    for (name, badge) in badges {
        out.push_str(&format!("## {}\n```markdown\n{}\n```\n{}\n\n", name, badge, badge));
    }
    out
}

fn requirement(rule: &TierRule) -> String {
    if rule.min_rate > 0.0 {
        format!("{}+ challenges ({}%+)", rule.min_count, rule.min_rate)
    } else {
        format!("{}+ challenges", rule.min_count)
    }
}

/// `badges/README.md`: how to use the generated badges.
///
/// `gallery` lists example contributors, best first.
pub fn render_instructions(
    tiers: &TierTable,
    repo: &RepositoryConfig,
    badges_dir: &str,
    gallery: &[&BadgeStats],
) -> String {
    let url = repo.url();
    let card = repo.raw_url(&format!("{}/YOUR_USERNAME.svg", badges_dir));
    let compact = repo.raw_url(&format!("{}/YOUR_USERNAME_compact.svg", badges_dir));
    let endpoint = repo.raw_url(&format!("{}/YOUR_USERNAME.json", badges_dir));

    let mut lines = vec![
        format!("# 🏆 {} Profile Badges", repo.name),
        String::new(),
        format!(
            "This directory contains profile badges that contributors can use to showcase their achievements in the {} repository.",
            repo.name
        ),
        String::new(),
        "## 📄 Files Generated For Each User".to_string(),
        String::new(),
        "- `USERNAME.svg` - **Full-size card badge** (350×120px) with complete stats".to_string(),
        "- `USERNAME_compact.svg` - **Compact horizontal badge** (400×60px) for README headers".to_string(),
        "- `USERNAME.json` - **Dynamic badge data** for shields.io integration".to_string(),
        "- `USERNAME_badges.md` - **Complete collection** with all badge types ready to copy".to_string(),
        String::new(),
        "## 🎯 Badge Types & Usage".to_string(),
        String::new(),
        "### 1. 🎨 Full-Size Card Badge".to_string(),
        String::new(),
        "```markdown".to_string(),
        format!("![{} Achievement]({})", repo.name, card),
        "```".to_string(),
        String::new(),
        "### 2. ⚡ Compact Horizontal Badge".to_string(),
        String::new(),
        "```markdown".to_string(),
        format!("![{} Compact]({})", repo.name, compact),
        "```".to_string(),
        String::new(),
        "### 3. 🔄 Dynamic Shields.io Badge".to_string(),
        String::new(),
        "```markdown".to_string(),
        format!(
            "![{}](https://img.shields.io/endpoint?url={}&style=for-the-badge&logo=go&logoColor=white)",
            repo.name, endpoint
        ),
        "```".to_string(),
        String::new(),
        "### 4. 📊 Static Template Badges".to_string(),
        String::new(),
        "See [static_badges.md](./static_badges.md).".to_string(),
        String::new(),
        "## 🏅 Achievement System".to_string(),
        String::new(),
        "| Level | Requirements | Badge Color |".to_string(),
        "|-------|-------------|-------------|".to_string(),
    ];

    for rule in tiers.rules().iter().rev() {
        lines.push(format!(
            "| {} **{}** | {} | {} |",
            rule.emoji,
            rule.name,
            requirement(rule),
            rule.color
        ));
    }

    lines.extend([
        String::new(),
        "## 🚀 Getting Your Badges".to_string(),
        String::new(),
        format!("1. Fork the [{}]({}) repository", repo.name, url),
        "2. Solve at least one challenge and submit your solution via pull request".to_string(),
        "3. Once merged, your badge files appear in this directory".to_string(),
        "4. Copy the markdown from `YOUR_USERNAME_badges.md` into your profile".to_string(),
        String::new(),
    ]);

    if !gallery.is_empty() {
        lines.extend(["## 🎉 Badge Gallery".to_string(), String::new()]);
        for stats in gallery {
            lines.push(format!(
                "- [{user} badges](./{user}_badges.md) - {}/{} challenges",
                stats.solved,
                stats.total,
                user = stats.username
            ));
        }
        lines.push(String::new());
    }

    lines.extend([
        "---".to_string(),
        String::new(),
        format!("**Repository**: [{}]({})", repo.name, url),
        String::new(),
    ]);
    lines.join("\n")
}
