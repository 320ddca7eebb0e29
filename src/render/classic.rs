use std::collections::BTreeSet;

use super::{avatar_url, escape_html, profile_url, rank_label, sponsor_suffix};
use crate::config::LeaderboardConfig;
use crate::ranking::{format_rate, TierTable};
use crate::readme::{CLASSIC_END, CLASSIC_START};
use crate::scan::{Challenge, ClassicScan};
use crate::scoreboard::UserTotals;

const EMPTY_MESSAGE: &str = "No completed challenges yet. Be the first to solve a challenge!";

const STYLE: &str = r#"<style>
  .leaderboard-table { border-collapse: collapse; width: 100%; max-width: 1000px; margin: 20px 0; border-radius: 12px; overflow: hidden; }
  .leaderboard-table th, .leaderboard-table td { border: none; padding: 15px 10px; text-align: center; }
  .leaderboard-table thead tr { background: linear-gradient(135deg, #667eea, #764ba2); color: white; }
  .leaderboard-table .left-align { text-align: left; }
  .rank-badge { width: 35px; height: 35px; border-radius: 50%; display: flex; align-items: center; justify-content: center; margin: 0 auto; font-size: 14px; font-weight: bold; }
  .profile-cell { display: flex; align-items: center; }
  .profile-img { width: 40px; height: 40px; border-radius: 50%; margin-right: 12px; }
  .username { font-weight: 600; color: #2c3e50; font-size: 16px; }
  .github-link { color: #6c757d; text-decoration: none; font-size: 12px; }
  .stat-number { font-weight: 700; font-size: 20px; }
  .stat-label { color: #6c757d; font-size: 12px; }
  .achievement-badge { color: white; padding: 6px 12px; border-radius: 20px; font-size: 12px; font-weight: 500; }
  .progress-indicators { line-height: 1.2; max-width: 300px; }
  .challenge-indicator { display: inline-block; width: 18px; height: 18px; border-radius: 3px; margin: 1px; text-align: center; line-height: 18px; font-size: 10px; }
  .challenge-completed { background: #28a745; color: white; font-weight: bold; }
  .challenge-not-completed { background: #e9ecef; color: #6c757d; }
  @media (max-width: 968px) { .progress-col { display: none; } }
  @media (max-width: 768px) { .achievement-col { display: none; } }
  @media (max-width: 480px) { .rate-col { display: none; } }
</style>"#;

const TABLE_HEAD: &str = r#"<div align="center">
<table class="leaderboard-table">
  <thead>
    <tr>
      <th>🏅 Rank</th>
      <th class="left-align">👤 Developer</th>
      <th>🎯 Solved</th>
      <th class="rate-col">📊 Rate</th>
      <th class="achievement-col">🏅 Achievement</th>
      <th class="progress-col left-align">📈 Progress</th>
    </tr>
  </thead>
  <tbody>"#;

const LEGEND: &str = r#"<div align="center">
  <strong>Legend:</strong>
  <span class="challenge-indicator challenge-completed">✓</span> Completed
  <span class="challenge-indicator challenge-not-completed">•</span> Not completed
</div>"#;

fn rank_style(rank: usize) -> &'static str {
    match rank {
        1 => "background: linear-gradient(135deg, #ffd700, #ffed4e); color: #333;",
        2 | 3 => "background: linear-gradient(135deg, #c0c0c0, #e8e8e8); color: #333;",
        4..=10 => "background: linear-gradient(135deg, #cd7f32, #daa520); color: white;",
        _ => "background: linear-gradient(135deg, #6c757d, #495057); color: white;",
    }
}

/// One ✓/• glyph per numbered challenge, ascending by number, split into
/// two lines when `split` is set
fn progress_glyphs(user: &UserTotals, challenges: &[&Challenge], split: bool) -> String {
    let glyphs: Vec<String> = challenges
        .iter()
        .map(|ch| {
            let number = ch.number.unwrap_or_default();
            if user.has_completed(&ch.id) {
                format!(
                    r#"<span title="Challenge {}: Completed" class="challenge-indicator challenge-completed">✓</span>"#,
                    number
                )
            } else {
                format!(
                    r#"<span title="Challenge {}: Not completed" class="challenge-indicator challenge-not-completed">•</span>"#,
                    number
                )
            }
        })
        .collect();

    if split && glyphs.len() > 1 {
        let half = glyphs.len().div_ceil(2);
        format!("{}<br/>{}", glyphs[..half].concat(), glyphs[half..].concat())
    } else {
        glyphs.concat()
    }
}

fn render_row(
    rank: usize,
    user: &UserTotals,
    challenges: &[&Challenge],
    total: usize,
    tiers: &TierTable,
    sponsors: &BTreeSet<String>,
    split: bool,
) -> String {
    let name = escape_html(&user.username);
    let tier = tiers.lookup(user.count(), total);
    let background = if rank % 2 == 0 { "#f8f9fa" } else { "white" };

    format!(
        r#"
    <tr style="background: {background}; border-bottom: 1px solid #dee2e6;">
      <td>
        <div class="rank-badge" style="{style}">{rank}</div>
      </td>
      <td class="left-align">
        <div class="profile-cell">
          <img src="{avatar}" alt="{name}" class="profile-img">
          <div>
            <div class="username">{name}{sponsor}</div>
            <a href="{profile}" class="github-link">View Profile</a>
          </div>
        </div>
      </td>
      <td>
        <div class="stat-number" style="color: #667eea;">{count}</div>
        <div class="stat-label">challenges</div>
      </td>
      <td class="rate-col">
        <div class="stat-number" style="color: #28a745; font-size: 16px;">{rate}</div>
        <div class="stat-label">complete</div>
      </td>
      <td class="achievement-col">
        <span class="achievement-badge" style="background: {color};">{tier}</span>
      </td>
      <td class="progress-col left-align">
        <div class="progress-indicators">
          {glyphs}
        </div>
      </td>
    </tr>"#,
        background = background,
        style = rank_style(rank),
        rank = rank_label(rank),
        avatar = escape_html(&avatar_url(&user.username)),
        profile = escape_html(&profile_url(&user.username)),
        name = name,
        sponsor = sponsor_suffix(&user.username, sponsors),
        count = user.count(),
        rate = format_rate(user.count(), total),
        color = escape_html(&tier.color),
        tier = tier.label(),
        glyphs = progress_glyphs(user, challenges, split),
    )
}

/// Render the classic leaderboard region, from its heading through the
/// end marker line.
///
/// `ranked` must already be in rank order; only the first
/// `config.top` users are listed but all count as active developers.
pub fn render_classic_section(
    ranked: &[UserTotals],
    scan: &ClassicScan,
    tiers: &TierTable,
    sponsors: &BTreeSet<String>,
    config: &LeaderboardConfig,
) -> String {
    let total = scan.total();
    let mut numbered: Vec<&Challenge> = scan.challenges.iter().filter(|c| c.number.is_some()).collect();
    numbered.sort_by_key(|c| c.number);

    let mut lines: Vec<String> = vec![
        CLASSIC_START.to_string(),
        String::new(),
        "Our most accomplished Go developers, ranked by number of challenges completed:".to_string(),
        String::new(),
        "> 📝 **Note**: The data below is automatically updated by GitHub Actions when challenge scoreboards change.".to_string(),
        String::new(),
    ];

    if ranked.is_empty() {
        lines.push(EMPTY_MESSAGE.to_string());
    } else {
        let mut table = String::new();
        table.push_str(STYLE);
        table.push_str("\n\n");
        table.push_str(TABLE_HEAD);
        for (i, user) in ranked.iter().take(config.top).enumerate() {
            table.push_str(&render_row(
                i + 1,
                user,
                &numbered,
                total,
                tiers,
                sponsors,
                config.split_progress,
            ));
        }
        table.push_str("\n  </tbody>\n</table>\n</div>\n\n");
        table.push_str(LEGEND);
        lines.push(table);
    }

    let most_solved = match ranked.first() {
        Some(top) => format!("{} by {}", top.count(), top.username),
        None => "0 by N/A".to_string(),
    };

    lines.extend([
        String::new(),
        format!("*Updated automatically based on {} available challenges*", total),
        String::new(),
        "### 🎯 Challenge Progress Overview".to_string(),
        String::new(),
        format!("- **Total Challenges Available**: {}", total),
        format!("- **Active Developers**: {}", ranked.len()),
        format!("- **Most Challenges Solved**: {}", most_solved),
        String::new(),
        CLASSIC_END.to_string(),
        String::new(),
    ]);

    lines.join("\n")
}
