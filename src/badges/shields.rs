use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::BadgeStats;
use crate::ranking::TierRule;

/// shields.io endpoint badge payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShieldsEndpoint {
    pub schema_version: u8,
    pub label: String,
    pub message: String,
    pub color: String,
    pub style: String,
}

/// Endpoint data: "🏆 Master (20/30)" in the tier colour
pub fn shields_endpoint(stats: &BadgeStats, tier: &TierRule, label: &str) -> ShieldsEndpoint {
    ShieldsEndpoint {
        schema_version: 1,
        label: label.to_string(),
        message: format!("{} {} ({}/{})", tier.emoji, tier.name, stats.solved, stats.total),
        color: tier.color.clone(),
        style: "for-the-badge".to_string(),
    }
}

/// Pretty-printed endpoint JSON
pub fn render_shields_json(endpoint: &ShieldsEndpoint) -> Result<String> {
    serde_json::to_string_pretty(endpoint).context("Failed to serialize badge endpoint")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::{default_badge_tiers, TierTable};
    use std::collections::BTreeMap;

    #[test]
    fn test_shields_endpoint_fields() {
        let stats = BadgeStats {
            username: "alice".to_string(),
            solved: 20,
            total: 30,
            packages: BTreeMap::new(),
        };
        let table = TierTable::new(default_badge_tiers());
        let endpoint = shields_endpoint(&stats, stats.tier(&table), "Go Interview Practice");
        let json = render_shields_json(&endpoint).unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["schemaVersion"], 1);
        assert_eq!(value["label"], "Go Interview Practice");
        assert_eq!(value["message"], "🏆 Master (20/30)");
        assert_eq!(value["color"], "gold");
        assert_eq!(value["style"], "for-the-badge");
        assert!(json.contains('\n'));
    }
}
