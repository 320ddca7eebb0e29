use serde::{Deserialize, Serialize};

use crate::ranking::{
    default_badge_tiers, default_classic_tiers, default_package_tiers, TierRule, TierTable,
};

/// Top-level configuration, read from `scoreboard.yaml`.
///
/// Every section is optional; missing sections fall back to the defaults
/// below.
///
/// Example YAML:
/// ```yaml
/// repository:
///   name: Go Interview Practice
///   slug: RezaSi/go-interview-practice
/// leaderboard:
///   top: 10
///   split_progress: true
/// sponsors:
///   enabled: false
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct Config {
    pub repository: RepositoryConfig,
    pub scan: ScanConfig,
    pub leaderboard: LeaderboardConfig,
    pub tiers: TiersConfig,
    pub sponsors: SponsorsConfig,
    pub badges: BadgesConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct RepositoryConfig {
    /// Display name used in badges
    pub name: String,
    /// GitHub "owner/name"
    pub slug: String,
    pub branch: String,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            name: "Go Interview Practice".to_string(),
            slug: "RezaSi/go-interview-practice".to_string(),
            branch: "main".to_string(),
        }
    }
}

impl RepositoryConfig {
    pub fn url(&self) -> String {
        format!("https://github.com/{}", self.slug)
    }

    /// Raw file URL on the configured branch
    pub fn raw_url(&self, path: &str) -> String {
        format!(
            "https://raw.githubusercontent.com/{}/{}/{}",
            self.slug, self.branch, path
        )
    }

    /// Name in shields.io static badge form ("Go_Interview_Practice")
    pub fn badge_name(&self) -> String {
        self.name.replace(' ', "_")
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct ScanConfig {
    /// Glob matched against challenge directory names
    pub challenge_pattern: String,
    pub packages_dir: String,
    pub scoreboard_file: String,
    pub readme_file: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            challenge_pattern: "challenge-*".to_string(),
            packages_dir: "packages".to_string(),
            scoreboard_file: "SCOREBOARD.md".to_string(),
            readme_file: "README.md".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct LeaderboardConfig {
    /// Rows in the classic leaderboard
    pub top: usize,
    /// Rows in the overall package leaderboard
    pub package_top: usize,
    /// Rows per package in the per-package breakdown
    pub per_package_top: usize,
    /// Split the per-challenge progress glyphs over two lines
    pub split_progress: bool,
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self {
            top: 10,
            package_top: 10,
            per_package_top: 5,
            split_progress: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct TiersConfig {
    pub classic: Vec<TierRule>,
    pub packages: Vec<TierRule>,
    pub badges: Vec<TierRule>,
}

impl Default for TiersConfig {
    fn default() -> Self {
        Self {
            classic: default_classic_tiers(),
            packages: default_package_tiers(),
            badges: default_badge_tiers(),
        }
    }
}

impl TiersConfig {
    pub fn classic_table(&self) -> TierTable {
        TierTable::new(self.classic.clone())
    }

    pub fn package_table(&self) -> TierTable {
        TierTable::new(self.packages.clone())
    }

    pub fn badge_table(&self) -> TierTable {
        TierTable::new(self.badges.clone())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct SponsorsConfig {
    pub enabled: bool,
    /// Public sponsors page scraped for usernames
    pub url: String,
    /// Account being sponsored; never listed as its own sponsor
    pub owner: String,
    pub timeout_secs: u64,
    pub cache_ttl_secs: u64,
}

impl Default for SponsorsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            url: "https://github.com/sponsors/RezaSi".to_string(),
            owner: "RezaSi".to_string(),
            timeout_secs: 10,
            cache_ttl_secs: 3600,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct BadgesConfig {
    /// Output directory, relative to the repository root
    pub dir: String,
}

impl Default for BadgesConfig {
    fn default() -> Self {
        Self {
            dir: "badges".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.leaderboard.top, 10);
        assert_eq!(config.scan.challenge_pattern, "challenge-*");
        assert_eq!(config.tiers.classic.len(), 5);
        assert!(config.sponsors.enabled);
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = Config::default();
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: Config = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_config_parse() {
        let yaml = r#"
leaderboard:
  top: 3
sponsors:
  enabled: false
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.leaderboard.top, 3);
        assert_eq!(config.leaderboard.per_package_top, 5);
        assert!(!config.sponsors.enabled);
        assert_eq!(config.sponsors.timeout_secs, 10);
        assert_eq!(config.repository, RepositoryConfig::default());
    }

    #[test]
    fn test_custom_tiers_parse() {
        let yaml = r##"
tiers:
  classic:
    - { name: Hero, emoji: "🦸", min_count: 2, color: "#000000" }
    - { name: Rookie, emoji: "🐣", min_count: 0, color: "#ffffff" }
"##;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        let table = config.tiers.classic_table();
        assert_eq!(table.lookup_count(2).name, "Hero");
        assert_eq!(table.lookup_count(1).name, "Rookie");
        // Untouched tables keep their defaults
        assert_eq!(config.tiers.badges, default_badge_tiers());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = "leaderboard:\n  rows: 3\n";
        assert!(serde_saphyr::from_str::<Config>(yaml).is_err());
    }

    #[test]
    fn test_repository_urls() {
        let repo = RepositoryConfig::default();
        assert_eq!(repo.url(), "https://github.com/RezaSi/go-interview-practice");
        assert_eq!(
            repo.raw_url("badges/alice.svg"),
            "https://raw.githubusercontent.com/RezaSi/go-interview-practice/main/badges/alice.svg"
        );
        assert_eq!(repo.badge_name(), "Go_Interview_Practice");
    }
}
