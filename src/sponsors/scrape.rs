use regex::Regex;
use std::collections::BTreeSet;
use once_cell::sync::Lazy;

/// Avatar images on the sponsors page carry `alt="@username"`
static AVATAR_ALT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"alt="@([a-zA-Z0-9][a-zA-Z0-9\-]*)""#).expect("valid regex"));

/// Profile links, used only when no avatars were found
static PROFILE_HREF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"href="/([a-zA-Z0-9][a-zA-Z0-9\-]+)""#).expect("valid regex"));

/// GitHub paths that look like usernames in href attributes
const RESERVED_PATHS: &[&str] = &["sponsors", "github"];

/// Extract sponsor usernames from the sponsors page HTML.
/// The sponsored account itself is never listed.
pub fn scrape_sponsors(html: &str, owner: &str) -> BTreeSet<String> {
    let from_avatars: BTreeSet<String> = AVATAR_ALT
        .captures_iter(html)
        .filter_map(|c| c.get(1).map(|m| m.as_str().to_string()))
        .filter(|name| name != owner)
        .collect();

    if !from_avatars.is_empty() {
        return from_avatars;
    }

    PROFILE_HREF
        .captures_iter(html)
        .filter_map(|c| c.get(1).map(|m| m.as_str().to_string()))
        .filter(|name| name != owner && !RESERVED_PATHS.contains(&name.as_str()) && name.len() > 2)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scrape_avatars() {
        let html = r#"
            <img src="a.png" alt="@alice" class="avatar">
            <img src="b.png" alt="@bob-smith" class="avatar">
            <img src="o.png" alt="@RezaSi" class="avatar">
            <img src="a.png" alt="@alice" class="avatar">
        "#;
        let sponsors = scrape_sponsors(html, "RezaSi");
        assert_eq!(sponsors.into_iter().collect::<Vec<_>>(), vec!["alice", "bob-smith"]);
    }

    #[test]
    fn test_scrape_falls_back_to_links() {
        let html = r#"
            <a href="/carol">carol</a>
            <a href="/sponsors">Sponsors</a>
            <a href="/github">GitHub</a>
            <a href="/ab">too short</a>
            <a href="/RezaSi">owner</a>
        "#;
        let sponsors = scrape_sponsors(html, "RezaSi");
        assert_eq!(sponsors.into_iter().collect::<Vec<_>>(), vec!["carol"]);
    }

    #[test]
    fn test_links_ignored_when_avatars_present() {
        let html = r#"<img alt="@alice"><a href="/carol">carol</a>"#;
        let sponsors = scrape_sponsors(html, "RezaSi");
        assert!(!sponsors.contains("carol"));
    }

    #[test]
    fn test_scrape_empty_page() {
        assert!(scrape_sponsors("<html></html>", "RezaSi").is_empty());
    }
}
