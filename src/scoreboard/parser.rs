use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use super::types::ScoreRow;

/// Placeholder written into freshly created scoreboards
const PLACEHOLDER_USERNAME: &str = "------";

/// Header, separator and heading lines carry no scores
fn is_structural_line(line: &str) -> bool {
    line.trim().is_empty() || line.contains("Username") || line.contains("---") || line.starts_with('#')
}

/// Keep only ASCII digits ("6 tests" -> "6") and parse the rest.
/// Returns None when no digits are left or the number overflows.
fn extract_count(field: &str) -> Option<u32> {
    let digits: String = field.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

fn is_placeholder(username: &str) -> bool {
    username.is_empty()
        || username == PLACEHOLDER_USERNAME
        || username.chars().all(|c| c.is_ascii_digit())
}

/// Parse a single table line into a row.
///
/// Returns None for structural lines, lines with too few columns,
/// placeholder usernames and unparseable counts. Unparseable counts are
/// logged since they usually mean a hand-edited scoreboard went wrong.
pub fn parse_row(line: &str) -> Option<ScoreRow> {
    if is_structural_line(line) || !line.contains('|') {
        return None;
    }

    // "| alice | 5 | 5 |" -> ["", "alice", "5", "5", ""]
    let parts: Vec<&str> = line.split('|').map(str::trim).collect();
    if parts.len() < 4 {
        return None;
    }

    let username = parts[1];
    if is_placeholder(username) {
        return None;
    }

    let (Some(passed), Some(total)) = (extract_count(parts[2]), extract_count(parts[3])) else {
        tracing::warn!(username, line, "could not parse test results, skipping row");
        return None;
    };

    if total == 0 {
        tracing::debug!(username, "row has zero total tests, skipping");
        return None;
    }

    Some(ScoreRow {
        username: username.to_string(),
        passed,
        total,
    })
}

/// Parse every valid row of a scoreboard document
pub fn parse_rows(content: &str) -> Vec<ScoreRow> {
    content.lines().filter_map(parse_row).collect()
}

/// Usernames that passed all tests. Duplicate rows collapse into one entry.
pub fn completed_users(content: &str) -> BTreeSet<String> {
    parse_rows(content)
        .into_iter()
        .filter(|row| {
            let done = row.is_completion();
            tracing::debug!(
                username = %row.username,
                passed = row.passed,
                total = row.total,
                completed = done,
                "scoreboard row"
            );
            done
        })
        .map(|row| row.username)
        .collect()
}

/// Read a scoreboard file and return the usernames that completed it.
///
/// A missing file is not an error and yields an empty set. Any other read
/// failure is logged and also yields an empty set so one broken file never
/// aborts a whole scan.
pub fn parse_scoreboard_file(path: &Path) -> BTreeSet<String> {
    match fs::read_to_string(path) {
        Ok(content) => completed_users(&content),
        Err(e) if e.kind() == ErrorKind::NotFound => BTreeSet::new(),
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "failed to read scoreboard");
            BTreeSet::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = "\
# Scoreboard for challenge-1
| Username   | Passed Tests | Total Tests |
|------------|--------------|-------------|
| alice | 6 | 6 |
| bob | 4 | 6 |
| carol | 6 tests | 6 tests |
";

    #[test]
    fn test_simple_completion_set() {
        let users = completed_users("| alice | 5 | 5 |\n| bob | 3 | 5 |");
        assert_eq!(users.into_iter().collect::<Vec<_>>(), vec!["alice"]);
    }

    #[test]
    fn test_header_and_separator_skipped() {
        let rows = parse_rows(SAMPLE);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].username, "alice");
    }

    #[test]
    fn test_counts_with_trailing_text() {
        let row = parse_row("| carol | 6 tests | 6 tests |").unwrap();
        assert_eq!(row.passed, 6);
        assert_eq!(row.total, 6);
        assert!(row.is_completion());
    }

    #[test]
    fn test_duplicate_rows_collapse() {
        let users = completed_users("| alice | 5 | 5 |\n| alice | 5 | 5 |\n| alice | 2 | 5 |");
        assert_eq!(users.len(), 1);
        assert!(users.contains("alice"));
    }

    #[test]
    fn test_zero_total_is_not_completion() {
        assert!(completed_users("| alice | 0 | 0 |").is_empty());
        assert!(parse_row("| alice | 0 | 0 |").is_none());
    }

    #[test]
    fn test_placeholder_and_numeric_usernames_skipped() {
        assert!(parse_row("| ------ | 5 | 5 |").is_none());
        assert!(parse_row("| 12345 | 5 | 5 |").is_none());
        assert!(parse_row("|  | 5 | 5 |").is_none());
    }

    #[test]
    fn test_non_numeric_counts_skipped() {
        assert!(parse_row("| alice | n/a | 5 |").is_none());
        assert!(parse_row("| alice | 5 | pending |").is_none());
        // Scan continues past the bad row
        let users = completed_users("| alice | n/a | 5 |\n| bob | 5 | 5 |");
        assert!(users.contains("bob"));
        assert!(!users.contains("alice"));
    }

    #[test]
    fn test_overflowing_count_skipped() {
        assert!(parse_row("| alice | 99999999999 | 99999999999 |").is_none());
    }

    #[test]
    fn test_too_few_columns_skipped() {
        assert!(parse_row("| alice | 5").is_none());
        assert!(parse_row("alice 5 5").is_none());
    }

    #[test]
    fn test_extra_columns_allowed() {
        let row = parse_row("| alice | 5 | 5 | 2024-01-01 | notes |").unwrap();
        assert!(row.is_completion());
    }

    #[test]
    fn test_missing_file_yields_empty_set() {
        let dir = TempDir::new().unwrap();
        let users = parse_scoreboard_file(&dir.path().join("SCOREBOARD.md"));
        assert!(users.is_empty());
    }

    #[test]
    fn test_parse_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("SCOREBOARD.md");
        std::fs::write(&path, SAMPLE).unwrap();

        let users = parse_scoreboard_file(&path);
        assert_eq!(users.into_iter().collect::<Vec<_>>(), vec!["alice", "carol"]);
    }
}
