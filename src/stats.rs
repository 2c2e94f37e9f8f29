//! Stat resolution — folds owned upgrades and prestige bonuses into a
//! single effective-stats snapshot.
//!
//! Resolution is a pure function of (owned upgrade set, prestige-upgrade
//! levels). Nothing here is cached: callers re-derive on demand, so a stale
//! snapshot cannot exist. Upgrade effects apply in catalog order, never in
//! acquisition order.

use std::collections::{BTreeMap, BTreeSet};

use crate::catalog::{
    prestige_upgrade_by_id, DropperKind, PrestigeEffect, UpgradeEffect, ALL_UPGRADES,
};

/// Click cooldown can never drop below this, whatever upgrades are owned.
pub const MIN_CLICK_COOLDOWN: f64 = 0.1;

/// Fully-resolved multiplier/bonus snapshot. Derived, never persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct EffectiveStats {
    /// Global multiplier on dropper production.
    pub cps_multiplier: f64,
    /// Coins granted per manual click (before boost multipliers).
    pub click_power: f64,
    /// Per-dropper production multipliers. Absent key = 1.0.
    pub dropper_multipliers: BTreeMap<DropperKind, f64>,
    /// Automatic clicks per second.
    pub auto_click_cps: f64,
    /// Fraction of base cost refunded on sale.
    pub sell_modifier: f64,
    /// Seconds between accepted manual clicks.
    pub click_cooldown: f64,
    /// Multiplier on dropper purchase costs.
    pub cost_modifier: f64,
}

impl Default for EffectiveStats {
    fn default() -> Self {
        Self {
            cps_multiplier: 1.0,
            click_power: 1.0,
            dropper_multipliers: BTreeMap::new(),
            auto_click_cps: 0.0,
            sell_modifier: 0.5,
            click_cooldown: 0.7,
            cost_modifier: 1.0,
        }
    }
}

impl EffectiveStats {
    /// Production multiplier for one dropper kind.
    pub fn dropper_multiplier(&self, kind: DropperKind) -> f64 {
        self.dropper_multipliers.get(&kind).copied().unwrap_or(1.0)
    }
}

/// Permanent bonuses derived from prestige-upgrade levels. Applied to the
/// stat baseline before regular upgrades, and read directly by the prestige
/// reset and the production engine.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PrestigeBonuses {
    pub click_power_bonus: f64,
    /// Basic Droppers granted after a prestige reset.
    pub starting_droppers: u32,
    /// Added to the 0.05 per-point prestige multiplier.
    pub prestige_point_bonus: f64,
    /// Auto-click rate that survives resets.
    pub permanent_auto_click: f64,
}

/// Fold prestige-upgrade levels into their combined bonuses. Unknown ids
/// and zero levels contribute nothing.
pub fn prestige_bonuses(levels: &BTreeMap<String, u32>) -> PrestigeBonuses {
    let mut bonuses = PrestigeBonuses::default();
    for (id, &level) in levels {
        if level == 0 {
            continue;
        }
        let Some(def) = prestige_upgrade_by_id(id) else {
            continue;
        };
        match def.effect {
            PrestigeEffect::ClickPowerPerLevel(per) => {
                bonuses.click_power_bonus += per * f64::from(level);
            }
            PrestigeEffect::StartingDroppers(n) => bonuses.starting_droppers += n,
            PrestigeEffect::PrestigePointBonus(b) => bonuses.prestige_point_bonus += b,
            PrestigeEffect::AutoClickPerLevel(per) => {
                bonuses.permanent_auto_click += per * f64::from(level);
            }
        }
    }
    bonuses
}

/// Resolve the effective stats for a set of owned upgrades and the given
/// prestige bonuses.
///
/// Starts from the baseline, applies prestige bonuses, then applies each
/// owned upgrade in `ALL_UPGRADES` order. Per-dropper multipliers merge per
/// key; the cooldown only ever decreases, floored at
/// [`MIN_CLICK_COOLDOWN`].
pub fn resolve(owned: &BTreeSet<String>, bonuses: &PrestigeBonuses) -> EffectiveStats {
    let mut stats = EffectiveStats {
        click_power: 1.0 + bonuses.click_power_bonus,
        auto_click_cps: bonuses.permanent_auto_click,
        ..EffectiveStats::default()
    };

    for def in ALL_UPGRADES {
        if !owned.contains(def.id) {
            continue;
        }
        match def.effect {
            UpgradeEffect::ProductionMult(m) => stats.cps_multiplier *= m,
            UpgradeEffect::ClickMult(m) => stats.click_power *= m,
            UpgradeEffect::ClickAdd(a) => stats.click_power += a,
            UpgradeEffect::DropperMult(kind, m) => {
                *stats.dropper_multipliers.entry(kind).or_insert(1.0) *= m;
            }
            UpgradeEffect::CostMult(m) => stats.cost_modifier *= m,
            UpgradeEffect::AutoClickAdd(a) => stats.auto_click_cps += a,
            UpgradeEffect::SellRefundSet(f) => stats.sell_modifier = f,
            UpgradeEffect::CooldownSub(s) => {
                stats.click_cooldown = (stats.click_cooldown - s).max(MIN_CLICK_COOLDOWN);
            }
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(ids: &[&str]) -> BTreeSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn baseline_matches_defaults() {
        let stats = resolve(&BTreeSet::new(), &PrestigeBonuses::default());
        assert_eq!(stats, EffectiveStats::default());
    }

    #[test]
    fn production_multipliers_compose() {
        let stats = resolve(&owned(&["u1", "u2"]), &PrestigeBonuses::default());
        assert!((stats.cps_multiplier - 6.0).abs() < 1e-9); // 2 * 3
    }

    #[test]
    fn click_effects_apply_in_catalog_order() {
        // Catalog order is u4 (x2), u5 (x5), u13 (+1): (1*2*5)+1 = 11.
        // Acquisition order must not matter.
        let stats = resolve(&owned(&["u13", "u4", "u5"]), &PrestigeBonuses::default());
        assert!((stats.click_power - 11.0).abs() < 1e-9);
    }

    #[test]
    fn dropper_multiplier_merges_per_key() {
        let stats = resolve(&owned(&["u6"]), &PrestigeBonuses::default());
        assert!((stats.dropper_multiplier(DropperKind::Basic) - 2.0).abs() < 1e-9);
        assert!((stats.dropper_multiplier(DropperKind::Improved) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn cooldown_reduces_with_floor() {
        let stats = resolve(&owned(&["u11", "u12"]), &PrestigeBonuses::default());
        assert!((stats.click_cooldown - 0.3).abs() < 1e-9);

        // Floor check via repeated application on an already-low cooldown.
        let mut low = EffectiveStats {
            click_cooldown: 0.2,
            ..EffectiveStats::default()
        };
        low.click_cooldown = (low.click_cooldown - 0.2).max(MIN_CLICK_COOLDOWN);
        assert!((low.click_cooldown - MIN_CLICK_COOLDOWN).abs() < 1e-9);
    }

    #[test]
    fn sell_and_cost_upgrades() {
        let stats = resolve(&owned(&["u8", "u10"]), &PrestigeBonuses::default());
        assert!((stats.cost_modifier - 0.9).abs() < 1e-9);
        assert!((stats.sell_modifier - 0.75).abs() < 1e-9);
    }

    #[test]
    fn prestige_bonuses_apply_before_upgrades() {
        let mut levels = BTreeMap::new();
        levels.insert("p1".to_string(), 2u32); // +6 click power
        let bonuses = prestige_bonuses(&levels);
        assert!((bonuses.click_power_bonus - 6.0).abs() < 1e-9);

        // u4 doubles the boosted baseline: (1 + 6) * 2 = 14.
        let stats = resolve(&owned(&["u4"]), &bonuses);
        assert!((stats.click_power - 14.0).abs() < 1e-9);
    }

    #[test]
    fn prestige_bonus_fold() {
        let mut levels = BTreeMap::new();
        levels.insert("p2".to_string(), 1u32);
        levels.insert("p3".to_string(), 1u32);
        levels.insert("p4".to_string(), 1u32);
        levels.insert("zombie".to_string(), 3u32); // unknown id ignored
        let bonuses = prestige_bonuses(&levels);
        assert_eq!(bonuses.starting_droppers, 3);
        assert!((bonuses.prestige_point_bonus - 0.02).abs() < 1e-9);
        assert!((bonuses.permanent_auto_click - 1.0).abs() < 1e-9);
    }

    #[test]
    fn zero_levels_contribute_nothing() {
        let mut levels = BTreeMap::new();
        levels.insert("p1".to_string(), 0u32);
        assert_eq!(prestige_bonuses(&levels), PrestigeBonuses::default());
    }

    #[test]
    fn resolve_is_deterministic() {
        let ids = owned(&["u1", "u3", "u5", "u8", "u10", "u11"]);
        let mut levels = BTreeMap::new();
        levels.insert("p1".to_string(), 3u32);
        let bonuses = prestige_bonuses(&levels);
        assert_eq!(resolve(&ids, &bonuses), resolve(&ids, &bonuses));
    }
}
