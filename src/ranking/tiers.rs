use serde::{Deserialize, Serialize};

/// One achievement tier.
///
/// A user reaches the tier when both `count >= min_count` and
/// `completion rate >= min_rate` (percent) hold.
///
/// Example YAML:
/// ```yaml
/// - { name: Master, emoji: "🔥", min_count: 20, color: "#dc3545" }
/// - { name: Expert, emoji: "🎯", min_count: 15, min_rate: 50, color: blue }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TierRule {
    pub name: String,
    pub emoji: String,
    pub min_count: u32,

    #[serde(default)]
    pub min_rate: f64,

    /// CSS color for leaderboards, shields.io color name for badges
    pub color: String,
}

impl TierRule {
    fn new(name: &str, emoji: &str, min_count: u32, min_rate: f64, color: &str) -> Self {
        Self {
            name: name.to_string(),
            emoji: emoji.to_string(),
            min_count,
            min_rate,
            color: color.to_string(),
        }
    }

    /// "🔥 Master"
    pub fn label(&self) -> String {
        format!("{} {}", self.emoji, self.name)
    }
}

/// Immutable tier lookup table, ordered highest tier first.
#[derive(Debug, Clone, PartialEq)]
pub struct TierTable {
    rules: Vec<TierRule>,
}

impl TierTable {
    /// Build a table from rules in any order. Rules are sorted by
    /// `min_count` then `min_rate`, highest first. An empty rule list
    /// gets a single catch-all tier so lookups always succeed.
    pub fn new(mut rules: Vec<TierRule>) -> Self {
        if rules.is_empty() {
            rules.push(TierRule::new("Beginner", "🌱", 0, 0.0, "#28a745"));
        }
        rules.sort_by(|a, b| {
            b.min_count
                .cmp(&a.min_count)
                .then(b.min_rate.partial_cmp(&a.min_rate).unwrap_or(std::cmp::Ordering::Equal))
        });
        Self { rules }
    }

    pub fn rules(&self) -> &[TierRule] {
        &self.rules
    }

    /// Find the highest tier reached. Falls back to the lowest tier.
    pub fn lookup(&self, count: usize, total: usize) -> &TierRule {
        let rate = completion_rate(count, total);
        self.rules
            .iter()
            .find(|rule| count >= rule.min_count as usize && rate >= rule.min_rate)
            .unwrap_or_else(|| &self.rules[self.rules.len() - 1])
    }

    /// Lookup by count alone, for tables without rate requirements
    pub fn lookup_count(&self, count: usize) -> &TierRule {
        self.rules
            .iter()
            .find(|rule| count >= rule.min_count as usize)
            .unwrap_or_else(|| &self.rules[self.rules.len() - 1])
    }
}

/// Completion rate in percent (0 when there is nothing to complete)
pub fn completion_rate(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

/// Completion rate with one decimal place: 20 of 30 -> "66.7%"
pub fn format_rate(count: usize, total: usize) -> String {
    format!("{:.1}%", completion_rate(count, total))
}

/// Tiers shown in the classic leaderboard
pub fn default_classic_tiers() -> Vec<TierRule> {
    vec![
        TierRule::new("Master", "🔥", 20, 0.0, "#dc3545"),
        TierRule::new("Expert", "⭐", 15, 0.0, "#fd7e14"),
        TierRule::new("Advanced", "💪", 10, 0.0, "#6f42c1"),
        TierRule::new("Intermediate", "🚀", 5, 0.0, "#20c997"),
        TierRule::new("Beginner", "🌱", 0, 0.0, "#28a745"),
    ]
}

/// Tiers shown in the package leaderboard
pub fn default_package_tiers() -> Vec<TierRule> {
    vec![
        TierRule::new("Package Master", "🔥", 15, 0.0, "#dc3545"),
        TierRule::new("Package Expert", "⭐", 10, 0.0, "#fd7e14"),
        TierRule::new("Package Advanced", "💪", 5, 0.0, "#6f42c1"),
        TierRule::new("Package Intermediate", "🚀", 3, 0.0, "#20c997"),
        TierRule::new("Package Beginner", "🌱", 0, 0.0, "#28a745"),
    ]
}

/// Tiers used for profile badges; these also require a completion rate
pub fn default_badge_tiers() -> Vec<TierRule> {
    vec![
        TierRule::new("Master", "🏆", 20, 65.0, "gold"),
        TierRule::new("Expert", "🎯", 15, 50.0, "blue"),
        TierRule::new("Advanced", "⚡", 10, 30.0, "orange"),
        TierRule::new("Beginner", "🌱", 1, 0.0, "97ca00"),
    ]
}
