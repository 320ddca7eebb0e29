use regex::Regex;
use std::fs;
use std::path::Path;
use once_cell::sync::Lazy;

/// Heading-like lines tried in order on every line of a challenge README
static TITLE_PATTERNS: Lazy<[Regex; 3]> = Lazy::new(|| {
    [
        Regex::new(r"^#\s+(.+?)$").expect("valid regex"),
        Regex::new(r"^\*\*(.+?)\*\*").expect("valid regex"),
        Regex::new(r"Challenge \d+:\s*(.+?)$").expect("valid regex"),
    ]
});

static CHALLENGE_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Challenge \d+:\s*").expect("valid regex"));

/// Extract a title from README content, best effort.
///
/// The first line matching any heading pattern wins; a leading
/// "Challenge N:" is stripped from the match.
pub fn title_from_readme(content: &str) -> Option<String> {
    for line in content.lines() {
        let line = line.trim();
        for pattern in TITLE_PATTERNS.iter() {
            let Some(captures) = pattern.captures(line) else {
                continue;
            };
            let raw = captures.get(1).map_or("", |m| m.as_str()).trim();
            let title = CHALLENGE_PREFIX.replace_all(raw, "").trim().to_string();
            if !title.is_empty() {
                return Some(title);
            }
        }
    }
    None
}

/// "challenge-12" -> "Challenge 12"
pub fn title_from_dir_name(name: &str) -> String {
    name.replace("challenge-", "Challenge ")
}

/// Title of a challenge directory: from its README if possible,
/// otherwise derived from the directory name.
pub fn challenge_title(dir: &Path, readme_file: &str) -> String {
    let from_readme = fs::read_to_string(dir.join(readme_file))
        .ok()
        .and_then(|content| title_from_readme(&content));

    from_readme.unwrap_or_else(|| {
        let name = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        title_from_dir_name(&name)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_markdown_heading() {
        let content = "# Challenge 1: Sum of Two Numbers\n\nWrite a function...";
        assert_eq!(title_from_readme(content), Some("Sum of Two Numbers".to_string()));
    }

    #[test]
    fn test_plain_heading() {
        assert_eq!(title_from_readme("# Binary Search\n"), Some("Binary Search".to_string()));
    }

    #[test]
    fn test_bold_title() {
        let content = "Some intro\n**Reverse a String** is easy\n";
        assert_eq!(title_from_readme(content), Some("Reverse a String".to_string()));
    }

    #[test]
    fn test_challenge_prefix_anywhere() {
        let content = "Welcome to Challenge 7: Bank Account\n";
        assert_eq!(title_from_readme(content), Some("Bank Account".to_string()));
    }

    #[test]
    fn test_subheading_is_not_title() {
        assert_eq!(title_from_readme("## Requirements\n"), None);
    }

    #[test]
    fn test_empty_title_is_skipped() {
        let content = "# Challenge 3: \n# Word Frequency\n";
        assert_eq!(title_from_readme(content), Some("Word Frequency".to_string()));
    }

    #[test]
    fn test_dir_name_fallback() {
        assert_eq!(title_from_dir_name("challenge-12"), "Challenge 12");
        assert_eq!(title_from_dir_name("challenge-1-basic-routing"), "Challenge 1-basic-routing");
    }

    #[test]
    fn test_challenge_title_without_readme() {
        let root = TempDir::new().unwrap();
        let dir = root.path().join("challenge-4");
        std::fs::create_dir(&dir).unwrap();
        assert_eq!(challenge_title(&dir, "README.md"), "Challenge 4");
    }

    #[test]
    fn test_challenge_title_from_readme() {
        let root = TempDir::new().unwrap();
        let dir = root.path().join("challenge-4");
        std::fs::create_dir(&dir).unwrap();
        std::fs::write(dir.join("README.md"), "# Challenge 4: Concurrent BFS\n").unwrap();
        assert_eq!(challenge_title(&dir, "README.md"), "Concurrent BFS");
    }
}
