use super::BadgeStats;
use crate::config::RepositoryConfig;
use crate::ranking::TierRule;
use crate::render::escape_html;

/// Solved count from which badges carry a star
pub const STAR_THRESHOLD: u32 = 20;

const CARD_FONT: &str = "SF Pro Display,-apple-system,BlinkMacSystemFont,Segoe UI,sans-serif";
const COMPACT_FONT: &str = "-apple-system,BlinkMacSystemFont,Segoe UI,sans-serif";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorScheme {
    pub primary: &'static str,
    pub secondary: &'static str,
    pub accent: &'static str,
}

const BLUE: ColorScheme = ColorScheme {
    primary: "#4A90E2",
    secondary: "#357ABD",
    accent: "#2E5F87",
};

/// Gradient colours for a tier colour name; unknown names get blue
pub fn color_scheme(color: &str) -> ColorScheme {
    match color {
        "gold" => ColorScheme {
            primary: "#FFD700",
            secondary: "#FFA500",
            accent: "#FF8C00",
        },
        "orange" => ColorScheme {
            primary: "#FF8C42",
            secondary: "#FF6B1A",
            accent: "#E55A00",
        },
        "97ca00" => ColorScheme {
            primary: "#97CA00",
            secondary: "#7BA428",
            accent: "#5F7E1F",
        },
        _ => BLUE,
    }
}

/// Width in pixels of a progress bar `full` pixels wide
fn progress_width(solved: u32, total: u32, full: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    ((solved as f64 / total as f64) * full as f64) as u32
}

/// 350×120 profile card
pub fn render_card_svg(stats: &BadgeStats, tier: &TierRule, repo: &RepositoryConfig) -> String {
    let scheme = color_scheme(&tier.color);
    let username = escape_html(&stats.username);
    let font = CARD_FONT;

    let mut svg = format!(
        r##"<svg width="350" height="120" xmlns="http://www.w3.org/2000/svg">
  <defs>
    <linearGradient id="cardGradient" x1="0%" y1="0%" x2="100%" y2="100%">
      <stop offset="0%" style="stop-color:#f8f9fa;stop-opacity:1" />
      <stop offset="100%" style="stop-color:#e9ecef;stop-opacity:1" />
    </linearGradient>
    <linearGradient id="headerGradient" x1="0%" y1="0%" x2="100%" y2="0%">
      <stop offset="0%" style="stop-color:{primary};stop-opacity:1" />
      <stop offset="100%" style="stop-color:{secondary};stop-opacity:1" />
    </linearGradient>
    <linearGradient id="progressGradient" x1="0%" y1="0%" x2="100%" y2="0%">
      <stop offset="0%" style="stop-color:{accent};stop-opacity:1" />
      <stop offset="100%" style="stop-color:{primary};stop-opacity:1" />
    </linearGradient>
    <filter id="dropshadow" x="-20%" y="-20%" width="140%" height="140%">
      <feDropShadow dx="2" dy="2" stdDeviation="3" flood-color="#00000020"/>
    </filter>
  </defs>
  <rect width="350" height="120" fill="url(#cardGradient)" rx="12" filter="url(#dropshadow)"/>
  <rect width="350" height="35" fill="url(#headerGradient)" rx="12"/>
  <rect width="350" height="25" fill="url(#headerGradient)"/>
  <text x="15" y="15" font-family="{font}" font-size="10" font-weight="600" fill="white" opacity="0.9">{repo_title}</text>
  <text x="15" y="27" font-family="{font}" font-size="8" fill="white" opacity="0.8">github.com/{slug}</text>
  <text x="320" y="22" font-family="{font}" font-size="16" text-anchor="middle" fill="white">{emoji}</text>
  <text x="15" y="58" font-family="{font}" font-size="14" font-weight="700" fill="#212529">@{username}</text>
  <text x="15" y="75" font-family="{font}" font-size="12" font-weight="600" fill="{primary}">{emoji} {level} Developer</text>
  <text x="15" y="95" font-family="{font}" font-size="10" font-weight="500" fill="#6c757d">Classic Challenges</text>
  <rect x="15" y="100" width="140" height="6" fill="#e9ecef" rx="3"/>
  <rect x="15" y="100" width="{width}" height="6" fill="url(#progressGradient)" rx="3"/>
  <text x="160" y="106" font-family="{font}" font-size="9" font-weight="600" fill="#495057">{solved}/{total} ({rate}%)</text>"##,
        primary = scheme.primary,
        secondary = scheme.secondary,
        accent = scheme.accent,
        font = font,
        repo_title = escape_html(&repo.name.to_uppercase()),
        slug = escape_html(&repo.slug),
        emoji = tier.emoji,
        level = escape_html(&tier.name),
        username = username,
        width = progress_width(stats.solved, stats.total, 140),
        solved = stats.solved,
        total = stats.total,
        rate = stats.rate_text(),
    );

    if stats.has_packages() {
        svg.push_str(&format!(
            r##"
  <text x="190" y="58" font-family="{font}" font-size="10" font-weight="500" fill="#6c757d">Package Challenges</text>
  <text x="190" y="72" font-family="{font}" font-size="12" font-weight="600" fill="{secondary}">{solved} across {count} packages</text>
  <circle cx="195" cy="82" r="3" fill="{primary}" opacity="0.8"/>
  <circle cx="205" cy="82" r="3" fill="{secondary}" opacity="0.8"/>
  <circle cx="215" cy="82" r="3" fill="{accent}" opacity="0.8"/>"##,
            font = font,
            primary = scheme.primary,
            secondary = scheme.secondary,
            accent = scheme.accent,
            solved = stats.package_solved(),
            count = stats.packages.len(),
        ));
    } else {
        svg.push_str(&format!(
            r##"
  <text x="190" y="65" font-family="{font}" font-size="10" font-weight="500" fill="#6c757d">Ready for</text>
  <text x="190" y="78" font-family="{font}" font-size="12" font-weight="600" fill="{secondary}">Package Challenges!</text>"##,
            font = font,
            secondary = scheme.secondary,
        ));
    }

    if stats.solved >= STAR_THRESHOLD {
        svg.push_str(&format!(
            r##"
  <circle cx="320" cy="85" r="8" fill="{primary}" opacity="0.2"/>
  <text x="320" y="89" font-family="{font}" font-size="10" text-anchor="middle" fill="{primary}" font-weight="700">★</text>"##,
            font = font,
            primary = scheme.primary,
        ));
    }

    svg.push_str("\n</svg>");
    svg
}

/// Indicator glyph in the compact badge, by classic solved count
fn compact_indicator(solved: u32) -> &'static str {
    match solved {
        n if n >= STAR_THRESHOLD => "⭐",
        15.. => "🎯",
        10.. => "⚡",
        _ => "🌱",
    }
}

/// 400×60 horizontal badge
pub fn render_compact_svg(stats: &BadgeStats, tier: &TierRule, repo: &RepositoryConfig) -> String {
    let scheme = color_scheme(&tier.color);
    let font = COMPACT_FONT;

    let mut svg = format!(
        r##"<svg width="400" height="60" xmlns="http://www.w3.org/2000/svg">
  <defs>
    <linearGradient id="compactGradient" x1="0%" y1="0%" x2="100%" y2="0%">
      <stop offset="0%" style="stop-color:{primary};stop-opacity:1" />
      <stop offset="100%" style="stop-color:{secondary};stop-opacity:1" />
    </linearGradient>
    <linearGradient id="compactBg" x1="0%" y1="0%" x2="0%" y2="100%">
      <stop offset="0%" style="stop-color:#ffffff;stop-opacity:1" />
      <stop offset="100%" style="stop-color:#f8f9fa;stop-opacity:1" />
    </linearGradient>
    <filter id="shadow" x="-10%" y="-10%" width="120%" height="120%">
      <feDropShadow dx="1" dy="1" stdDeviation="2" flood-color="#00000015"/>
    </filter>
  </defs>
  <rect width="400" height="60" fill="url(#compactBg)" rx="8" filter="url(#shadow)"/>
  <rect width="6" height="60" fill="url(#compactGradient)" rx="8"/>
  <text x="20" y="20" font-family="{font}" font-size="12" font-weight="700" fill="#212529">🐹 {repo_name}</text>
  <text x="20" y="38" font-family="{font}" font-size="11" fill="#6c757d">@{username}</text>
  <text x="20" y="52" font-family="{font}" font-size="10" font-weight="600" fill="{primary}">{emoji} {level} Developer</text>
  <text x="220" y="20" font-family="{font}" font-size="10" font-weight="500" fill="#495057">Classic Progress</text>
  <rect x="220" y="25" width="100" height="4" fill="#e9ecef" rx="2"/>
  <rect x="220" y="25" width="{width}" height="4" fill="url(#compactGradient)" rx="2"/>
  <text x="220" y="42" font-family="{font}" font-size="10" font-weight="600" fill="#495057">{solved}/{total} ({rate}%)</text>"##,
        primary = scheme.primary,
        secondary = scheme.secondary,
        font = font,
        repo_name = escape_html(&repo.name),
        username = escape_html(&stats.username),
        emoji = tier.emoji,
        level = escape_html(&tier.name),
        width = progress_width(stats.solved, stats.total, 100),
        solved = stats.solved,
        total = stats.total,
        rate = stats.rate_text(),
    );

    if stats.has_packages() {
        svg.push_str(&format!(
            r##"
  <text x="220" y="54" font-family="{font}" font-size="9" fill="{secondary}">📦 {solved} package challenges</text>"##,
            font = font,
            secondary = scheme.secondary,
            solved = stats.package_solved(),
        ));
    }

    svg.push_str(&format!(
        r##"
  <circle cx="365" cy="30" r="12" fill="{primary}" opacity="0.1"/>
  <text x="365" y="34" font-family="{font}" font-size="12" text-anchor="middle" fill="{primary}">{indicator}</text>
</svg>"##,
        font = font,
        primary = scheme.primary,
        indicator = compact_indicator(stats.solved),
    ));
    svg
}
