mod region;

pub use region::{
    Anchor, ManagedRegion, RegionRegistry, SpliceError, CLASSIC_END, CLASSIC_REGION,
    CLASSIC_START, PACKAGE_END, PACKAGE_REGION, PACKAGE_START,
};

use anyhow::{Context, Result};
use std::path::Path;

/// Splice `body` into the named region of the README at `path`.
///
/// Returns whether the file changed. A missing README or a document with
/// no usable anchor is an error and leaves the file untouched.
pub fn update_readme(
    path: &Path,
    registry: &RegionRegistry,
    region: &str,
    body: &str,
) -> Result<bool> {
    let document = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read README at {}", path.display()))?;

    let updated = registry
        .apply(&document, region, body)
        .with_context(|| format!("Failed to update {}", path.display()))?;

    let changed = crate::storage::write_if_changed(path, &updated)?;
    if changed {
        tracing::info!(path = %path.display(), region, "README updated");
    } else {
        tracing::debug!(path = %path.display(), region, "README unchanged");
    }
    Ok(changed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn body() -> String {
        format!("{}\n\ntable\n\n{}\n", CLASSIC_START, CLASSIC_END)
    }

    #[test]
    fn test_update_readme_inserts_then_is_stable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("README.md");
        std::fs::write(&path, "# Repo\n\n## Key Features\n\n- one\n").unwrap();

        let registry = RegionRegistry::default();
        assert!(update_readme(&path, &registry, CLASSIC_REGION, &body()).unwrap());
        let first = std::fs::read_to_string(&path).unwrap();
        assert!(!update_readme(&path, &registry, CLASSIC_REGION, &body()).unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), first);
    }

    #[test]
    fn test_update_readme_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("README.md");
        let result = update_readme(&path, &RegionRegistry::default(), CLASSIC_REGION, &body());
        assert!(result.is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_update_readme_no_anchor_leaves_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("README.md");
        let original = "# Repo\n\nNo sections here\n";
        std::fs::write(&path, original).unwrap();

        let err = update_readme(&path, &RegionRegistry::default(), CLASSIC_REGION, &body())
            .unwrap_err();
        assert!(err.downcast_ref::<SpliceError>().is_some());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), original);
    }
}
