pub mod aggregate;
pub mod tiers;

pub use aggregate::{aggregate, aggregate_by_package, rank_order};
pub use tiers::{
    completion_rate, default_badge_tiers, default_classic_tiers, default_package_tiers,
    format_rate, TierRule, TierTable,
};
