mod schema;
mod validation;

pub use schema::{
    BadgesConfig, Config, LeaderboardConfig, RepositoryConfig, ScanConfig, SponsorsConfig,
    TiersConfig,
};
pub use validation::validate_config;

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file looked up in the repository root when none is given
pub const DEFAULT_CONFIG_FILE: &str = "scoreboard.yaml";

/// Get the default config file path (<root>/scoreboard.yaml)
pub fn get_config_path(root: &Path) -> PathBuf {
    root.join(DEFAULT_CONFIG_FILE)
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional explicit path. If None, `<root>/scoreboard.yaml` is
///   used when present and built-in defaults otherwise.
/// * `root` - Repository root
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>, root: &Path) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                anyhow::bail!("Config file not found at {}", p.display());
            }
            p
        }
        None => {
            let default_path = get_config_path(root);
            if !default_path.exists() {
                return Ok(Config::default());
            }
            default_path
        }
    };

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", config_path.display()))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_default_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = load_config(None, dir.path()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = TempDir::new().unwrap();
        let result = load_config(Some(dir.path().join("nope.yaml")), dir.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_default_file_is_picked_up() {
        let dir = TempDir::new().unwrap();
        fs::write(get_config_path(dir.path()), "leaderboard:\n  top: 4\n").unwrap();
        let config = load_config(None, dir.path()).unwrap();
        assert_eq!(config.leaderboard.top, 4);
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.yaml");
        fs::write(&path, "leaderboard: [unclosed").unwrap();
        let err = load_config(Some(path), dir.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("invalid YAML"));
    }
}
