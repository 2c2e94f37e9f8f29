//! Mutable runtime game state and derived-rate helpers.

use std::collections::{BTreeMap, BTreeSet};

use crate::catalog::{boost_by_id, BoostEffect, DropperKind, Rarity};
use crate::stats::{self, EffectiveStats, PrestigeBonuses};

/// Coins (and lifetime-earned) a fresh or freshly-prestiged game starts
/// with.
pub const STARTING_COINS: f64 = 100.0;

/// Per-point production bonus of the prestige multiplier, before the p3
/// pact bonus.
pub const PRESTIGE_POINT_RATE: f64 = 0.05;

/// Production multipliers contributed by currently active boosts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoostMultipliers {
    pub production: f64,
    pub click: f64,
}

/// Full mutable state of one game session.
///
/// Everything here is plain data; the operations live in [`crate::logic`].
/// Derived values (effective stats, production rates) are recomputed on
/// demand rather than cached.
#[derive(Clone, Debug)]
pub struct GameState {
    /// Spendable coin balance. Fractional — production accrues in tenths.
    pub coins: f64,
    /// Owned dropper counts. A missing key means zero; entries are removed
    /// when a count reaches zero.
    pub droppers: BTreeMap<DropperKind, u32>,
    /// Ids of owned one-shot upgrades.
    pub purchased_upgrades: BTreeSet<String>,
    /// Active boost id → remaining whole seconds. Entries at zero are
    /// removed by the boost tick.
    pub active_boosts: BTreeMap<String, u32>,
    /// Golden idol balance.
    pub prestige_points: u64,
    /// Prestige-upgrade id → level.
    pub prestige_upgrade_levels: BTreeMap<String, u32>,
    /// Lifetime coins ever earned. Never decreases except at prestige.
    pub total_coins_earned: f64,
    /// Index of the next unclaimed mission.
    pub mission_index: usize,
    /// Per-rarity auto-sell thresholds. A missing key disables the rarity.
    pub auto_sell_limits: BTreeMap<Rarity, u32>,
    /// Seconds until the next manual click is accepted. Transient.
    pub click_cooldown_left: f64,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        Self {
            coins: STARTING_COINS,
            droppers: BTreeMap::new(),
            purchased_upgrades: BTreeSet::new(),
            active_boosts: BTreeMap::new(),
            prestige_points: 0,
            prestige_upgrade_levels: BTreeMap::new(),
            total_coins_earned: STARTING_COINS,
            mission_index: 0,
            auto_sell_limits: BTreeMap::new(),
            click_cooldown_left: 0.0,
        }
    }

    /// Owned count for one dropper kind (absence ≡ zero).
    pub fn dropper_count(&self, kind: DropperKind) -> u32 {
        self.droppers.get(&kind).copied().unwrap_or(0)
    }

    /// Credit earnings: raises both the balance and the lifetime total.
    pub(crate) fn earn(&mut self, amount: f64) {
        self.coins += amount;
        self.total_coins_earned += amount;
    }

    /// Combined prestige bonuses from owned prestige-upgrade levels.
    pub fn prestige_bonuses(&self) -> PrestigeBonuses {
        stats::prestige_bonuses(&self.prestige_upgrade_levels)
    }

    /// Re-derive the effective stats from scratch.
    pub fn effective_stats(&self) -> EffectiveStats {
        stats::resolve(&self.purchased_upgrades, &self.prestige_bonuses())
    }

    /// Multipliers from boosts whose timers are still running. Distinct
    /// boost ids of the same category stack multiplicatively.
    pub fn boost_multipliers(&self) -> BoostMultipliers {
        let mut m = BoostMultipliers { production: 1.0, click: 1.0 };
        for (id, &left) in &self.active_boosts {
            if left == 0 {
                continue;
            }
            match boost_by_id(id).map(|b| b.effect) {
                Some(BoostEffect::ProductionMult(f)) => m.production *= f,
                Some(BoostEffect::ClickMult(f)) => m.click *= f,
                Some(BoostEffect::InstantProduction(_)) | None => {}
            }
        }
        m
    }

    /// `1 + points × (0.05 + pact bonus)`.
    pub fn prestige_multiplier(&self, bonuses: &PrestigeBonuses) -> f64 {
        1.0 + self.prestige_points as f64 * (PRESTIGE_POINT_RATE + bonuses.prestige_point_bonus)
    }

    /// Dropper production before global multipliers: Σ count × base cps ×
    /// per-dropper multiplier.
    pub fn base_cps(&self, stats: &EffectiveStats) -> f64 {
        self.droppers
            .iter()
            .map(|(kind, &count)| {
                f64::from(count) * kind.base_cps() * stats.dropper_multiplier(*kind)
            })
            .sum()
    }

    /// Total coins per second: dropper production under all multipliers,
    /// plus auto-clicks at click power (deliberately outside the production
    /// multipliers).
    pub fn total_cps(&self, stats: &EffectiveStats) -> f64 {
        let bonuses = self.prestige_bonuses();
        let boosts = self.boost_multipliers();
        let dropper_cps = self.base_cps(stats)
            * stats.cps_multiplier
            * boosts.production
            * self.prestige_multiplier(&bonuses);
        dropper_cps + stats.auto_click_cps * stats.click_power
    }

    /// Convenience: total cps with freshly-resolved stats.
    pub fn current_cps(&self) -> f64 {
        self.total_cps(&self.effective_stats())
    }
}
