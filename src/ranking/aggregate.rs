use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use crate::scoreboard::{CompletionRecord, UserTotals};

/// Ranking order: more completions first, ties broken alphabetically.
pub fn rank_order(a: &UserTotals, b: &UserTotals) -> Ordering {
    b.count()
        .cmp(&a.count())
        .then_with(|| a.username.cmp(&b.username))
}

/// Accumulate completion records into per-user totals, ranked.
pub fn aggregate<I>(records: I) -> Vec<UserTotals>
where
    I: IntoIterator<Item = CompletionRecord>,
{
    let mut by_user: HashMap<String, UserTotals> = HashMap::new();
    for record in records {
        by_user
            .entry(record.username.clone())
            .or_insert_with(|| UserTotals::new(record.username.clone()))
            .record(record);
    }

    let mut ranked: Vec<UserTotals> = by_user.into_values().collect();
    ranked.sort_by(rank_order);
    ranked
}

/// Rank users separately within each package. Classic records
/// (without a package) are ignored.
pub fn aggregate_by_package<'a, I>(records: I) -> BTreeMap<String, Vec<UserTotals>>
where
    I: IntoIterator<Item = &'a CompletionRecord>,
{
    let mut grouped: BTreeMap<String, Vec<CompletionRecord>> = BTreeMap::new();
    for record in records {
        if let Some(ref package) = record.package {
            grouped.entry(package.clone()).or_default().push(record.clone());
        }
    }

    grouped
        .into_iter()
        .map(|(package, records)| (package, aggregate(records)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completion(user: &str, id: &str) -> CompletionRecord {
        CompletionRecord {
            username: user.to_string(),
            challenge_id: id.to_string(),
            title: id.to_string(),
            package: None,
        }
    }

    fn package_completion(user: &str, package: &str, id: &str) -> CompletionRecord {
        CompletionRecord {
            package: Some(package.to_string()),
            ..completion(user, id)
        }
    }

    fn names(ranked: &[UserTotals]) -> Vec<&str> {
        ranked.iter().map(|u| u.username.as_str()).collect()
    }

    #[test]
    fn test_sorted_by_count_descending() {
        let ranked = aggregate(vec![
            completion("bob", "challenge-1"),
            completion("alice", "challenge-1"),
            completion("alice", "challenge-2"),
            completion("carol", "challenge-1"),
            completion("carol", "challenge-2"),
            completion("carol", "challenge-3"),
        ]);
        assert_eq!(names(&ranked), vec!["carol", "alice", "bob"]);
        assert_eq!(ranked[0].count(), 3);
    }

    #[test]
    fn test_ties_broken_alphabetically() {
        let ranked = aggregate(vec![
            completion("zed", "challenge-1"),
            completion("amy", "challenge-1"),
            completion("Bob", "challenge-1"),
        ]);
        // Byte order: uppercase sorts before lowercase
        assert_eq!(names(&ranked), vec!["Bob", "amy", "zed"]);
    }

    #[test]
    fn test_rank_order_is_total() {
        let ranked = aggregate(vec![
            completion("b", "challenge-1"),
            completion("a", "challenge-2"),
            completion("c", "challenge-1"),
            completion("c", "challenge-2"),
        ]);
        for pair in ranked.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!(
                a.count() > b.count() || (a.count() == b.count() && a.username < b.username)
            );
            assert_eq!(rank_order(a, b), Ordering::Less);
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate(Vec::new()).is_empty());
    }

    #[test]
    fn test_aggregate_by_package() {
        let records = vec![
            completion("alice", "challenge-1"),
            package_completion("alice", "gin", "challenge-1-basic-routing"),
            package_completion("bob", "gin", "challenge-1-basic-routing"),
            package_completion("bob", "gin", "challenge-2-middleware"),
            package_completion("alice", "gorm", "challenge-1-crud-operations"),
        ];
        let by_package = aggregate_by_package(&records);

        assert_eq!(by_package.keys().collect::<Vec<_>>(), vec!["gin", "gorm"]);
        assert_eq!(names(&by_package["gin"]), vec!["bob", "alice"]);
        assert_eq!(names(&by_package["gorm"]), vec!["alice"]);
    }
}
