use anyhow::{Context, Result};
use glob::Pattern;
use std::fs;
use std::path::{Path, PathBuf};

use super::title::challenge_title;
use crate::config::ScanConfig;
use crate::scoreboard::{parse_scoreboard_file, CompletionRecord};

/// A discovered challenge directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    pub id: String, // directory name
    pub title: String,
    pub number: Option<u32>,
    pub package: Option<String>,
    pub dir: PathBuf,
}

/// Result of scanning the classic challenges at the repository root
#[derive(Debug, Clone, Default)]
pub struct ClassicScan {
    /// Sorted by challenge number
    pub challenges: Vec<Challenge>,
    pub completions: Vec<CompletionRecord>,
}

impl ClassicScan {
    /// Number of available challenges, with or without a scoreboard
    pub fn total(&self) -> usize {
        self.challenges.len()
    }
}

/// One package directory and its challenges
#[derive(Debug, Clone)]
pub struct PackageInfo {
    pub name: String,
    pub challenges: Vec<Challenge>,
}

/// Result of scanning `packages/*/challenge-*`
#[derive(Debug, Clone, Default)]
pub struct PackageScan {
    /// Sorted by package name
    pub packages: Vec<PackageInfo>,
    pub completions: Vec<CompletionRecord>,
}

impl PackageScan {
    pub fn total_challenges(&self) -> usize {
        self.packages.iter().map(|p| p.challenges.len()).sum()
    }

    /// Number of challenges in one package (0 for unknown packages)
    pub fn challenges_in(&self, package: &str) -> usize {
        self.packages
            .iter()
            .find(|p| p.name == package)
            .map_or(0, |p| p.challenges.len())
    }

    pub fn package_names(&self) -> Vec<&str> {
        self.packages.iter().map(|p| p.name.as_str()).collect()
    }
}

/// Digits right after "challenge-": "challenge-12" -> 12,
/// "challenge-3-migrations" -> 3
pub fn challenge_number(name: &str) -> Option<u32> {
    let rest = name.strip_prefix("challenge-")?;
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

/// Subdirectories of `parent` whose name matches `pattern`, sorted by name
fn matching_dirs(parent: &Path, pattern: &Pattern) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(parent)
        .with_context(|| format!("Failed to list directory {}", parent.display()))?;

    let mut dirs = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to list directory {}", parent.display()))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        if pattern.matches(&entry.file_name().to_string_lossy()) {
            dirs.push(path);
        }
    }
    dirs.sort();
    Ok(dirs)
}

fn challenge_pattern(config: &ScanConfig) -> Result<Pattern> {
    Pattern::new(&config.challenge_pattern)
        .with_context(|| format!("Invalid challenge pattern '{}'", config.challenge_pattern))
}

/// Describe one challenge directory and collect its completions
fn scan_challenge(
    dir: PathBuf,
    package: Option<&str>,
    config: &ScanConfig,
    completions: &mut Vec<CompletionRecord>,
) -> Challenge {
    let id = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let challenge = Challenge {
        number: challenge_number(&id),
        title: challenge_title(&dir, &config.readme_file),
        package: package.map(str::to_string),
        id,
        dir,
    };

    let scoreboard = challenge.dir.join(&config.scoreboard_file);
    if !scoreboard.exists() {
        tracing::debug!(challenge = %challenge.id, "no scoreboard");
        return challenge;
    }

    let users = parse_scoreboard_file(&scoreboard);
    tracing::info!(
        package = package.unwrap_or("-"),
        challenge = %challenge.id,
        completed = users.len(),
        "scanned scoreboard"
    );

    completions.extend(users.into_iter().map(|username| CompletionRecord {
        username,
        challenge_id: challenge.id.clone(),
        title: challenge.title.clone(),
        package: challenge.package.clone(),
    }));
    challenge
}

/// Scan classic challenges (`<root>/challenge-N`).
///
/// Directories matching the pattern but without a numeric id are skipped
/// since the leaderboard orders challenges by number.
pub fn scan_classic(root: &Path, config: &ScanConfig) -> Result<ClassicScan> {
    let pattern = challenge_pattern(config)?;
    let mut scan = ClassicScan::default();

    for dir in matching_dirs(root, &pattern)? {
        let challenge = scan_challenge(dir, None, config, &mut scan.completions);
        if challenge.number.is_none() {
            tracing::warn!(challenge = %challenge.id, "classic challenge without a number, skipping");
            scan.completions.retain(|c| c.challenge_id != challenge.id);
            continue;
        }
        scan.challenges.push(challenge);
    }

    scan.challenges
        .sort_by(|a, b| a.number.cmp(&b.number).then_with(|| a.id.cmp(&b.id)));
    tracing::info!(challenges = scan.total(), "classic scan complete");
    Ok(scan)
}

/// Scan package challenges (`<root>/packages/<pkg>/challenge-*`).
///
/// A missing packages directory yields an empty scan.
pub fn scan_packages(root: &Path, config: &ScanConfig) -> Result<PackageScan> {
    let pattern = challenge_pattern(config)?;
    let packages_dir = root.join(&config.packages_dir);
    let mut scan = PackageScan::default();

    if !packages_dir.is_dir() {
        tracing::warn!(path = %packages_dir.display(), "no packages directory found");
        return Ok(scan);
    }

    let any = Pattern::new("*").context("Invalid package pattern")?;
    for package_dir in matching_dirs(&packages_dir, &any)? {
        let name = package_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let challenges = matching_dirs(&package_dir, &pattern)?
            .into_iter()
            .map(|dir| scan_challenge(dir, Some(&name), config, &mut scan.completions))
            .collect();

        scan.packages.push(PackageInfo { name, challenges });
    }

    tracing::info!(
        packages = scan.packages.len(),
        challenges = scan.total_challenges(),
        "package scan complete"
    );
    Ok(scan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_challenge(parent: &Path, name: &str, scoreboard: Option<&str>) {
        let dir = parent.join(name);
        fs::create_dir_all(&dir).unwrap();
        if let Some(content) = scoreboard {
            fs::write(dir.join("SCOREBOARD.md"), content).unwrap();
        }
    }

    #[test]
    fn test_challenge_number() {
        assert_eq!(challenge_number("challenge-12"), Some(12));
        assert_eq!(challenge_number("challenge-3-migrations"), Some(3));
        assert_eq!(challenge_number("challenge-x"), None);
        assert_eq!(challenge_number("readme"), None);
    }

    #[test]
    fn test_scan_classic_orders_numerically() {
        let root = TempDir::new().unwrap();
        write_challenge(root.path(), "challenge-10", Some("| alice | 3 | 3 |\n"));
        write_challenge(root.path(), "challenge-2", Some("| alice | 3 | 3 |\n| bob | 3 | 3 |\n"));
        write_challenge(root.path(), "challenge-1", None);
        fs::create_dir(root.path().join("docs")).unwrap();
        fs::write(root.path().join("challenge-99"), "a file, not a dir").unwrap();

        let scan = scan_classic(root.path(), &ScanConfig::default()).unwrap();

        let ids: Vec<_> = scan.challenges.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["challenge-1", "challenge-2", "challenge-10"]);
        assert_eq!(scan.total(), 3);
        assert_eq!(scan.completions.len(), 3);
    }

    #[test]
    fn test_scan_classic_skips_unnumbered() {
        let root = TempDir::new().unwrap();
        write_challenge(root.path(), "challenge-template", Some("| alice | 3 | 3 |\n"));
        write_challenge(root.path(), "challenge-1", Some("| bob | 3 | 3 |\n"));

        let scan = scan_classic(root.path(), &ScanConfig::default()).unwrap();
        assert_eq!(scan.total(), 1);
        assert_eq!(scan.completions.len(), 1);
        assert_eq!(scan.completions[0].username, "bob");
    }

    #[test]
    fn test_scan_classic_uses_readme_title() {
        let root = TempDir::new().unwrap();
        write_challenge(root.path(), "challenge-1", Some("| alice | 3 | 3 |\n"));
        fs::write(
            root.path().join("challenge-1").join("README.md"),
            "# Challenge 1: Sum of Two Numbers\n",
        )
        .unwrap();

        let scan = scan_classic(root.path(), &ScanConfig::default()).unwrap();
        assert_eq!(scan.challenges[0].title, "Sum of Two Numbers");
        assert_eq!(scan.completions[0].title, "Sum of Two Numbers");
    }

    #[test]
    fn test_scan_packages() {
        let root = TempDir::new().unwrap();
        let packages = root.path().join("packages");
        write_challenge(&packages.join("gin"), "challenge-1-basic-routing", Some("| alice | 5 | 5 |\n"));
        write_challenge(&packages.join("gin"), "challenge-2-middleware", None);
        write_challenge(&packages.join("cobra"), "challenge-1-basic-cli", Some("| bob | 2 | 5 |\n"));
        fs::write(packages.join("README.md"), "# Packages\n").unwrap();

        let scan = scan_packages(root.path(), &ScanConfig::default()).unwrap();

        assert_eq!(scan.package_names(), vec!["cobra", "gin"]);
        assert_eq!(scan.total_challenges(), 3);
        assert_eq!(scan.challenges_in("gin"), 2);
        assert_eq!(scan.challenges_in("fiber"), 0);
        assert_eq!(scan.completions.len(), 1);
        assert_eq!(scan.completions[0].package.as_deref(), Some("gin"));
    }

    #[test]
    fn test_scan_packages_without_directory() {
        let root = TempDir::new().unwrap();
        let scan = scan_packages(root.path(), &ScanConfig::default()).unwrap();
        assert!(scan.packages.is_empty());
        assert_eq!(scan.total_challenges(), 0);
    }

    #[test]
    fn test_custom_pattern() {
        let root = TempDir::new().unwrap();
        write_challenge(root.path(), "challenge-1", Some("| alice | 1 | 1 |\n"));
        write_challenge(root.path(), "challenge-2", Some("| alice | 1 | 1 |\n"));
        let config = ScanConfig {
            challenge_pattern: "challenge-1".to_string(),
            ..ScanConfig::default()
        };
        let scan = scan_classic(root.path(), &config).unwrap();
        assert_eq!(scan.total(), 1);
    }
}
