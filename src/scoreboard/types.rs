use std::collections::BTreeSet;

/// One parsed row of a `SCOREBOARD.md` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreRow {
    pub username: String,
    pub passed: u32,
    pub total: u32,
}

impl ScoreRow {
    /// A row counts as a completion only when every test passed
    pub fn is_completion(&self) -> bool {
        self.total > 0 && self.passed == self.total
    }
}

/// A user having completed one challenge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRecord {
    pub username: String,
    pub challenge_id: String, // directory name, e.g. "challenge-12"
    pub title: String,
    pub package: Option<String>, // None for classic challenges
}

/// Everything one user completed, accumulated during a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserTotals {
    pub username: String,
    pub challenges: Vec<CompletionRecord>,
    pub packages: BTreeSet<String>,
}

impl UserTotals {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            challenges: Vec::new(),
            packages: BTreeSet::new(),
        }
    }

    /// Number of completed challenges
    pub fn count(&self) -> usize {
        self.challenges.len()
    }

    /// Number of distinct packages with at least one completion
    pub fn package_count(&self) -> usize {
        self.packages.len()
    }

    /// Record a completion. A second record for the same challenge is ignored.
    pub fn record(&mut self, record: CompletionRecord) {
        let duplicate = self
            .challenges
            .iter()
            .any(|c| c.challenge_id == record.challenge_id && c.package == record.package);
        if duplicate {
            return;
        }
        if let Some(ref package) = record.package {
            self.packages.insert(package.clone());
        }
        self.challenges.push(record);
    }

    /// Whether the user completed the given challenge id (ignoring package)
    pub fn has_completed(&self, challenge_id: &str) -> bool {
        self.challenges.iter().any(|c| c.challenge_id == challenge_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, package: Option<&str>) -> CompletionRecord {
        CompletionRecord {
            username: "alice".to_string(),
            challenge_id: id.to_string(),
            title: format!("Title of {}", id),
            package: package.map(str::to_string),
        }
    }

    #[test]
    fn test_score_row_completion() {
        let row = ScoreRow { username: "alice".to_string(), passed: 5, total: 5 };
        assert!(row.is_completion());

        let partial = ScoreRow { username: "bob".to_string(), passed: 3, total: 5 };
        assert!(!partial.is_completion());

        let empty = ScoreRow { username: "carol".to_string(), passed: 0, total: 0 };
        assert!(!empty.is_completion());
    }

    #[test]
    fn test_user_totals_ignores_duplicate_challenge() {
        let mut totals = UserTotals::new("alice");
        totals.record(record("challenge-1", None));
        totals.record(record("challenge-1", None));
        totals.record(record("challenge-2", None));
        assert_eq!(totals.count(), 2);
        assert!(totals.has_completed("challenge-2"));
        assert!(!totals.has_completed("challenge-3"));
    }

    #[test]
    fn test_user_totals_tracks_packages() {
        let mut totals = UserTotals::new("alice");
        totals.record(record("challenge-1-basic-routing", Some("gin")));
        totals.record(record("challenge-2-middleware", Some("gin")));
        totals.record(record("challenge-1-crud-operations", Some("gorm")));
        // Same directory name in two packages are distinct challenges
        totals.record(record("challenge-1-basic-routing", Some("fiber")));

        assert_eq!(totals.count(), 4);
        assert_eq!(totals.package_count(), 3);
    }
}
