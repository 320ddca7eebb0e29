use std::collections::HashSet;

use super::schema::Config;
use crate::ranking::TierRule;

fn validate_tiers(section: &str, rules: &[TierRule], errors: &mut Vec<String>) {
    if rules.is_empty() {
        errors.push(format!("tiers.{}: must define at least one tier", section));
        return;
    }

    let mut thresholds = HashSet::new();
    for (i, rule) in rules.iter().enumerate() {
        if rule.name.trim().is_empty() {
            errors.push(format!("tiers.{}[{}].name: must not be empty", section, i));
        }
        if !(0.0..=100.0).contains(&rule.min_rate) {
            errors.push(format!(
                "tiers.{}[{}].min_rate: {} is outside 0-100",
                section, i, rule.min_rate
            ));
        }
        // Same (count, rate) twice makes lookup order ambiguous
        let key = (rule.min_count, rule.min_rate.to_bits());
        if !thresholds.insert(key) {
            errors.push(format!(
                "tiers.{}[{}]: duplicate threshold min_count={} min_rate={}",
                section, i, rule.min_count, rule.min_rate
            ));
        }
    }
}

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if config.scan.challenge_pattern.trim().is_empty() {
        errors.push("scan.challenge_pattern: must not be empty".to_string());
    } else if let Err(e) = glob::Pattern::new(&config.scan.challenge_pattern) {
        errors.push(format!(
            "scan.challenge_pattern: invalid glob '{}' - {}",
            config.scan.challenge_pattern, e
        ));
    }
    if config.scan.scoreboard_file.trim().is_empty() {
        errors.push("scan.scoreboard_file: must not be empty".to_string());
    }
    if config.scan.readme_file.trim().is_empty() {
        errors.push("scan.readme_file: must not be empty".to_string());
    }

    if config.leaderboard.top == 0 {
        errors.push("leaderboard.top: must be at least 1".to_string());
    }
    if config.leaderboard.package_top == 0 {
        errors.push("leaderboard.package_top: must be at least 1".to_string());
    }
    if config.leaderboard.per_package_top == 0 {
        errors.push("leaderboard.per_package_top: must be at least 1".to_string());
    }

    validate_tiers("classic", &config.tiers.classic, &mut errors);
    validate_tiers("packages", &config.tiers.packages, &mut errors);
    validate_tiers("badges", &config.tiers.badges, &mut errors);

    if config.sponsors.enabled {
        if config.sponsors.timeout_secs == 0 {
            errors.push("sponsors.timeout_secs: must be at least 1".to_string());
        }
        if !config.sponsors.url.starts_with("http://") && !config.sponsors.url.starts_with("https://") {
            errors.push(format!("sponsors.url: '{}' is not an http(s) URL", config.sponsors.url));
        }
    }

    if config.badges.dir.trim().is_empty() {
        errors.push("badges.dir: must not be empty".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(name: &str, min_count: u32, min_rate: f64) -> TierRule {
        TierRule {
            name: name.to_string(),
            emoji: "*".to_string(),
            min_count,
            min_rate,
            color: "blue".to_string(),
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_zero_top_rejected() {
        let mut config = Config::default();
        config.leaderboard.top = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].contains("leaderboard.top"));
    }

    #[test]
    fn test_invalid_glob_rejected() {
        let mut config = Config::default();
        config.scan.challenge_pattern = "challenge-[".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].contains("scan.challenge_pattern"));
    }

    #[test]
    fn test_empty_tier_table_rejected() {
        let mut config = Config::default();
        config.tiers.packages = vec![];
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].contains("tiers.packages"));
    }

    #[test]
    fn test_duplicate_threshold_rejected() {
        let mut config = Config::default();
        config.tiers.classic = vec![rule("A", 5, 0.0), rule("B", 5, 0.0)];
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].contains("tiers.classic[1]"));
    }

    #[test]
    fn test_rate_out_of_range_rejected() {
        let mut config = Config::default();
        config.tiers.badges = vec![rule("A", 5, 120.0)];
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].contains("tiers.badges[0].min_rate"));
    }

    #[test]
    fn test_sponsor_settings_ignored_when_disabled() {
        let mut config = Config::default();
        config.sponsors.enabled = false;
        config.sponsors.timeout_secs = 0;
        config.sponsors.url = String::new();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = Config::default();
        config.leaderboard.top = 0; // Error 1
        config.sponsors.timeout_secs = 0; // Error 2
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
