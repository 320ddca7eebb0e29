pub mod classic;
pub mod packages;

pub use classic::render_classic_section;
pub use packages::{progress_bar, render_package_section, title_case};

use std::collections::BTreeSet;

/// Marker shown next to sponsors in both leaderboards
pub const SPONSOR_MARK: &str = "💖";

pub fn profile_url(username: &str) -> String {
    format!("https://github.com/{}", username)
}

pub fn avatar_url(username: &str) -> String {
    format!("https://github.com/{}.png", username)
}

/// 🥇🥈🥉 for the podium, the plain number otherwise (1-based)
pub fn rank_label(rank: usize) -> String {
    match rank {
        1 => "🥇".to_string(),
        2 => "🥈".to_string(),
        3 => "🥉".to_string(),
        n => n.to_string(),
    }
}

/// " 💖" for sponsors, empty otherwise
pub fn sponsor_suffix(username: &str, sponsors: &BTreeSet<String>) -> String {
    if sponsors.contains(username) {
        format!(" {}", SPONSOR_MARK)
    } else {
        String::new()
    }
}

/// Escape text for HTML element content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_label() {
        assert_eq!(rank_label(1), "🥇");
        assert_eq!(rank_label(3), "🥉");
        assert_eq!(rank_label(4), "4");
    }

    #[test]
    fn test_sponsor_suffix() {
        let sponsors: BTreeSet<String> = ["alice".to_string()].into();
        assert_eq!(sponsor_suffix("alice", &sponsors), " 💖");
        assert_eq!(sponsor_suffix("bob", &sponsors), "");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a<b>&\"c\""), "a&lt;b&gt;&amp;&quot;c&quot;");
        assert_eq!(escape_html("plain-name"), "plain-name");
    }
}
