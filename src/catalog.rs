//! Static game catalog: droppers, upgrades, boosts, prestige upgrades and
//! missions. Immutable reference data — all runtime state lives in
//! [`crate::state::GameState`].
//!
//! Effects are closed enums with numeric parameters, interpreted by
//! [`crate::stats::resolve`] and the operations in [`crate::logic`]. The
//! order of `ALL_UPGRADES` is the stat-resolution order and must not be
//! reshuffled.

use serde::{Deserialize, Serialize};

/// Rarity tier of a dropper. Ordered; the grouping key for auto-sell
/// thresholds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
    Mythic,
}

impl Rarity {
    /// All rarities in ascending order.
    pub fn all() -> &'static [Rarity] {
        &[
            Rarity::Common,
            Rarity::Uncommon,
            Rarity::Rare,
            Rarity::Epic,
            Rarity::Legendary,
            Rarity::Mythic,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
            Rarity::Mythic => "Mythic",
        }
    }

    pub fn from_str(s: &str) -> Option<Rarity> {
        Rarity::all().iter().find(|r| r.as_str() == s).copied()
    }
}

/// Kinds of coin droppers (passive generators).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DropperKind {
    Basic,
    Improved,
    Advanced,
    Superior,
    Elite,
    Master,
}

impl DropperKind {
    /// All dropper kinds in shop/display order.
    pub fn all() -> &'static [DropperKind] {
        &[
            DropperKind::Basic,
            DropperKind::Improved,
            DropperKind::Advanced,
            DropperKind::Superior,
            DropperKind::Elite,
            DropperKind::Master,
        ]
    }

    /// Stable catalog id (also used in external tooling).
    pub fn id(&self) -> &'static str {
        match self {
            DropperKind::Basic => "d1",
            DropperKind::Improved => "d2",
            DropperKind::Advanced => "d3",
            DropperKind::Superior => "d4",
            DropperKind::Elite => "d5",
            DropperKind::Master => "d6",
        }
    }

    /// Display name. Also the key under which owned counts are persisted.
    pub fn name(&self) -> &'static str {
        match self {
            DropperKind::Basic => "Basic Dropper",
            DropperKind::Improved => "Improved Dropper",
            DropperKind::Advanced => "Advanced Dropper",
            DropperKind::Superior => "Superior Dropper",
            DropperKind::Elite => "Elite Dropper",
            DropperKind::Master => "Master Dropper",
        }
    }

    /// Purchase cost before the cost multiplier. Flat — owning more units
    /// does not raise the price.
    pub fn base_cost(&self) -> f64 {
        match self {
            DropperKind::Basic => 15.0,
            DropperKind::Improved => 100.0,
            DropperKind::Advanced => 1_100.0,
            DropperKind::Superior => 12_000.0,
            DropperKind::Elite => 130_000.0,
            DropperKind::Master => 1_400_000.0,
        }
    }

    /// Coins per second per owned unit, before any multipliers.
    pub fn base_cps(&self) -> f64 {
        match self {
            DropperKind::Basic => 1.0,
            DropperKind::Improved => 5.0,
            DropperKind::Advanced => 25.0,
            DropperKind::Superior => 120.0,
            DropperKind::Elite => 600.0,
            DropperKind::Master => 3_000.0,
        }
    }

    pub fn rarity(&self) -> Rarity {
        match self {
            DropperKind::Basic => Rarity::Common,
            DropperKind::Improved => Rarity::Uncommon,
            DropperKind::Advanced => Rarity::Rare,
            DropperKind::Superior => Rarity::Epic,
            DropperKind::Elite => Rarity::Legendary,
            DropperKind::Master => Rarity::Mythic,
        }
    }

    /// Reverse lookup from the persisted name key.
    pub fn from_name(name: &str) -> Option<DropperKind> {
        DropperKind::all().iter().find(|k| k.name() == name).copied()
    }
}

// ── Upgrades ──────────────────────────────────────────────────────────

/// What a one-shot upgrade does to the effective stats.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UpgradeEffect {
    /// Multiply the global production multiplier.
    ProductionMult(f64),
    /// Multiply click power.
    ClickMult(f64),
    /// Add to click power.
    ClickAdd(f64),
    /// Multiply one dropper kind's production (merges per key).
    DropperMult(DropperKind, f64),
    /// Multiply the dropper purchase-cost modifier.
    CostMult(f64),
    /// Add flat auto-clicks per second.
    AutoClickAdd(f64),
    /// Set the sale refund fraction.
    SellRefundSet(f64),
    /// Reduce the click cooldown by a number of seconds (floor applies).
    CooldownSub(f64),
}

/// A one-time purchasable upgrade. Ownership is a membership set — buying
/// twice is meaningless.
pub struct UpgradeDef {
    pub id: &'static str,
    pub name: &'static str,
    pub cost: f64,
    pub effect: UpgradeEffect,
}

/// Full upgrade catalog. The slice order is the order effects are applied
/// by the stat resolver, regardless of purchase order.
pub static ALL_UPGRADES: &[UpgradeDef] = &[
    UpgradeDef {
        id: "u1",
        name: "Sturdy Conveyor",
        cost: 1_000.0,
        effect: UpgradeEffect::ProductionMult(2.0),
    },
    UpgradeDef {
        id: "u2",
        name: "Golden Gears",
        cost: 10_000.0,
        effect: UpgradeEffect::ProductionMult(3.0),
    },
    UpgradeDef {
        id: "u3",
        name: "Coin Magnet",
        cost: 100_000.0,
        effect: UpgradeEffect::ProductionMult(5.0),
    },
    UpgradeDef {
        id: "u4",
        name: "Hardened Mouse",
        cost: 500.0,
        effect: UpgradeEffect::ClickMult(2.0),
    },
    UpgradeDef {
        id: "u5",
        name: "Steel Fingers",
        cost: 5_000.0,
        effect: UpgradeEffect::ClickMult(5.0),
    },
    UpgradeDef {
        id: "u13",
        name: "Firm Fingers",
        cost: 1_000.0,
        effect: UpgradeEffect::ClickAdd(1.0),
    },
    UpgradeDef {
        id: "u6",
        name: "Basic Dropper Tuning",
        cost: 800.0,
        effect: UpgradeEffect::DropperMult(DropperKind::Basic, 2.0),
    },
    UpgradeDef {
        id: "u7",
        name: "Improved Dropper Tuning",
        cost: 4_000.0,
        effect: UpgradeEffect::DropperMult(DropperKind::Improved, 2.0),
    },
    UpgradeDef {
        id: "u8",
        name: "Efficient Blueprints",
        cost: 75_000.0,
        effect: UpgradeEffect::CostMult(0.9),
    },
    UpgradeDef {
        id: "u9",
        name: "Auto Clicker",
        cost: 25_000.0,
        effect: UpgradeEffect::AutoClickAdd(1.0),
    },
    UpgradeDef {
        id: "u10",
        name: "Recycling Center",
        cost: 50_000.0,
        effect: UpgradeEffect::SellRefundSet(0.75),
    },
    UpgradeDef {
        id: "u11",
        name: "Quick Hands",
        cost: 3_000.0,
        effect: UpgradeEffect::CooldownSub(0.2),
    },
    UpgradeDef {
        id: "u12",
        name: "Rapid Clicking",
        cost: 12_000.0,
        effect: UpgradeEffect::CooldownSub(0.2),
    },
];

pub fn upgrade_by_id(id: &str) -> Option<&'static UpgradeDef> {
    ALL_UPGRADES.iter().find(|u| u.id == id)
}

// ── Boosts ────────────────────────────────────────────────────────────

/// Effect category of a purchasable boost.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BoostEffect {
    /// Multiplies total production while the timer runs.
    ProductionMult(f64),
    /// Multiplies click power while the timer runs.
    ClickMult(f64),
    /// One-shot grant of this many seconds worth of production.
    InstantProduction(f64),
}

/// A temporary or instantaneous purchasable effect.
pub struct BoostDef {
    pub id: &'static str,
    pub name: &'static str,
    pub cost: f64,
    /// Timer length in seconds. `None` means the effect fires instantly.
    pub duration_secs: Option<u32>,
    pub effect: BoostEffect,
}

pub static ALL_BOOSTS: &[BoostDef] = &[
    BoostDef {
        id: "b1",
        name: "Coin Rush",
        cost: 500_000.0,
        duration_secs: Some(30),
        effect: BoostEffect::ProductionMult(2.0),
    },
    BoostDef {
        id: "b2",
        name: "Click Frenzy",
        cost: 250_000.0,
        duration_secs: Some(15),
        effect: BoostEffect::ClickMult(10.0),
    },
    BoostDef {
        id: "b3",
        name: "Time Warp",
        cost: 1_000_000.0,
        duration_secs: None,
        effect: BoostEffect::InstantProduction(3_600.0),
    },
];

pub fn boost_by_id(id: &str) -> Option<&'static BoostDef> {
    ALL_BOOSTS.iter().find(|b| b.id == id)
}

// ── Prestige upgrades ─────────────────────────────────────────────────

/// Cost in prestige points as a function of the current level.
#[derive(Clone, Copy, Debug)]
pub enum CostCurve {
    Flat(u64),
    /// `base + level` — grows by one point per level owned.
    Linear { base: u64 },
}

impl CostCurve {
    pub fn at_level(&self, level: u32) -> u64 {
        match self {
            CostCurve::Flat(c) => *c,
            CostCurve::Linear { base } => base + u64::from(level),
        }
    }
}

/// Permanent bonus granted per prestige-upgrade level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PrestigeEffect {
    /// Flat click power per level.
    ClickPowerPerLevel(f64),
    /// Basic Droppers granted after each prestige reset (any level > 0).
    StartingDroppers(u32),
    /// Additive bonus to the per-point prestige multiplier (any level > 0).
    PrestigePointBonus(f64),
    /// Auto-clicks per second per level, surviving resets.
    AutoClickPerLevel(f64),
}

/// A repeatable (up to `max_level`) prestige-point purchase.
pub struct PrestigeUpgradeDef {
    pub id: &'static str,
    pub name: &'static str,
    pub cost: CostCurve,
    /// `None` means the level is unbounded.
    pub max_level: Option<u32>,
    pub effect: PrestigeEffect,
}

pub static ALL_PRESTIGE_UPGRADES: &[PrestigeUpgradeDef] = &[
    PrestigeUpgradeDef {
        id: "p1",
        name: "Golden Touch",
        cost: CostCurve::Linear { base: 1 },
        max_level: None,
        effect: PrestigeEffect::ClickPowerPerLevel(3.0),
    },
    PrestigeUpgradeDef {
        id: "p2",
        name: "Ancient Wisdom",
        cost: CostCurve::Flat(5),
        max_level: Some(1),
        effect: PrestigeEffect::StartingDroppers(3),
    },
    PrestigeUpgradeDef {
        id: "p3",
        name: "Pact of Plenty",
        cost: CostCurve::Flat(10),
        max_level: Some(1),
        effect: PrestigeEffect::PrestigePointBonus(0.02),
    },
    PrestigeUpgradeDef {
        id: "p4",
        name: "Eternal Automation",
        cost: CostCurve::Flat(15),
        max_level: Some(1),
        effect: PrestigeEffect::AutoClickPerLevel(1.0),
    },
];

pub fn prestige_upgrade_by_id(id: &str) -> Option<&'static PrestigeUpgradeDef> {
    ALL_PRESTIGE_UPGRADES.iter().find(|u| u.id == id)
}

// ── Missions ──────────────────────────────────────────────────────────

/// A one-shot milestone keyed to lifetime coin earnings. Claimed strictly
/// in list order.
pub struct MissionDef {
    pub id: &'static str,
    pub name: &'static str,
    /// Lifetime-earned threshold. Strictly increasing across the list.
    pub goal: f64,
    pub reward: f64,
}

pub static ALL_MISSIONS: &[MissionDef] = &[
    MissionDef { id: "m1", name: "Beginner's Luck", goal: 1e2, reward: 50.0 },
    MissionDef { id: "m2", name: "First Steps", goal: 1e3, reward: 250.0 },
    MissionDef { id: "m3", name: "Small Fortune", goal: 1e4, reward: 1_500.0 },
    MissionDef { id: "m4", name: "Coins Into Mountains", goal: 1e5, reward: 10_000.0 },
    MissionDef { id: "m5", name: "Coin Collector", goal: 1e6, reward: 75_000.0 },
    MissionDef { id: "m6", name: "Millionaire", goal: 1e7, reward: 500_000.0 },
    MissionDef { id: "m7", name: "Billionaire", goal: 1e8, reward: 3_000_000.0 },
    MissionDef { id: "m8", name: "Coin Monarch", goal: 1e9, reward: 20_000_000.0 },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dropper_name_roundtrip() {
        for kind in DropperKind::all() {
            assert_eq!(DropperKind::from_name(kind.name()), Some(*kind));
        }
        assert_eq!(DropperKind::from_name("No Such Dropper"), None);
    }

    #[test]
    fn rarity_str_roundtrip() {
        for r in Rarity::all() {
            assert_eq!(Rarity::from_str(r.as_str()), Some(*r));
        }
        assert_eq!(Rarity::from_str("Junk"), None);
    }

    #[test]
    fn rarities_are_ordered() {
        let all = Rarity::all();
        for pair in all.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn upgrade_ids_unique() {
        for (i, u) in ALL_UPGRADES.iter().enumerate() {
            assert!(
                ALL_UPGRADES[i + 1..].iter().all(|v| v.id != u.id),
                "duplicate upgrade id {}",
                u.id
            );
        }
    }

    #[test]
    fn upgrade_lookup() {
        assert_eq!(upgrade_by_id("u10").map(|u| u.name), Some("Recycling Center"));
        assert!(upgrade_by_id("u99").is_none());
    }

    #[test]
    fn mission_goals_strictly_increase() {
        for pair in ALL_MISSIONS.windows(2) {
            assert!(pair[0].goal < pair[1].goal);
        }
    }

    #[test]
    fn boost_durations() {
        assert_eq!(boost_by_id("b1").and_then(|b| b.duration_secs), Some(30));
        assert_eq!(boost_by_id("b3").and_then(|b| b.duration_secs), None);
    }

    #[test]
    fn prestige_cost_curves() {
        let p1 = prestige_upgrade_by_id("p1").unwrap();
        assert_eq!(p1.cost.at_level(0), 1);
        assert_eq!(p1.cost.at_level(4), 5);
        let p3 = prestige_upgrade_by_id("p3").unwrap();
        assert_eq!(p3.cost.at_level(0), 10);
        assert_eq!(p3.cost.at_level(1), 10);
    }
}
