//! Game operations — pure functions over [`GameState`], no rendering / IO.
//!
//! Every purchase-style operation rejects silently (returns `false` or a
//! zero quantity, mutating nothing) when funds or quantities are
//! insufficient, so callers can retry the same call later without recovery
//! logic.

use crate::catalog::{
    boost_by_id, prestige_upgrade_by_id, upgrade_by_id, BoostEffect, DropperKind, Rarity,
    ALL_MISSIONS,
};
use crate::state::{GameState, STARTING_COINS};

/// Production ticks per second.
pub const TICKS_PER_SEC: u32 = 10;

/// Lifetime earnings needed per unit under the prestige square root.
pub const PRESTIGE_GAIN_UNIT: f64 = 1e8;

// ── Production tick ───────────────────────────────────────────────────

/// Advance production by `delta_ticks` ticks (at 10 ticks/sec).
///
/// Credits `total cps / 10` per tick to both the balance and lifetime
/// earnings, winds down the click cooldown, and runs a single mission
/// check — at most one mission completes per call.
pub fn tick(state: &mut GameState, delta_ticks: u32) {
    if delta_ticks == 0 {
        return;
    }
    let seconds = f64::from(delta_ticks) / f64::from(TICKS_PER_SEC);
    let stats = state.effective_stats();
    let earned = state.total_cps(&stats) * seconds;
    state.earn(earned);

    if state.click_cooldown_left > 0.0 {
        state.click_cooldown_left = (state.click_cooldown_left - seconds).max(0.0);
    }

    check_mission(state);
}

// ── Manual click ──────────────────────────────────────────────────────

/// Manual click: grants click power × active click multiplier, then arms
/// the cooldown gate. A click while the gate is armed is dropped.
/// Returns whether the click was accepted.
pub fn click(state: &mut GameState) -> bool {
    if state.click_cooldown_left > 0.0 {
        return false;
    }
    let stats = state.effective_stats();
    let power = stats.click_power * state.boost_multipliers().click;
    state.earn(power);
    state.click_cooldown_left = stats.click_cooldown;
    true
}

// ── Droppers (buy / sell / auto-sell) ─────────────────────────────────

/// Current purchase cost of one dropper (base cost × cost multiplier).
pub fn dropper_cost(state: &GameState, kind: DropperKind) -> f64 {
    kind.base_cost() * state.effective_stats().cost_modifier
}

/// Buy one dropper. Silent no-op when the balance is short. A successful
/// buy immediately re-applies the auto-sell thresholds.
pub fn buy_dropper(state: &mut GameState, kind: DropperKind) -> bool {
    let cost = dropper_cost(state, kind);
    if state.coins < cost {
        return false;
    }
    state.coins -= cost;
    *state.droppers.entry(kind).or_insert(0) += 1;
    run_auto_sell(state);
    true
}

/// Sell up to `quantity` droppers of one kind. The quantity is clamped to
/// the owned count; refunds base cost × sale fraction per unit. Refunds do
/// not count toward lifetime earnings. Returns the number actually sold.
pub fn sell_droppers(state: &mut GameState, kind: DropperKind, quantity: u32) -> u32 {
    let owned = state.dropper_count(kind);
    let selling = quantity.min(owned);
    if selling == 0 {
        return 0;
    }
    let refund = kind.base_cost() * state.effective_stats().sell_modifier * f64::from(selling);
    state.coins += refund;
    set_dropper_count(state, kind, owned - selling);
    selling
}

/// Sell a single dropper of the given kind.
pub fn sell_one(state: &mut GameState, kind: DropperKind) -> bool {
    sell_droppers(state, kind, 1) == 1
}

/// Sell every owned dropper of the given kind.
pub fn sell_all(state: &mut GameState, kind: DropperKind) -> u32 {
    sell_droppers(state, kind, u32::MAX)
}

/// Set or clear the auto-sell threshold for a rarity, then re-apply the
/// thresholds so a limit below the current count sells the excess at once.
pub fn set_auto_sell_limit(state: &mut GameState, rarity: Rarity, limit: Option<u32>) {
    match limit {
        Some(n) => {
            state.auto_sell_limits.insert(rarity, n);
        }
        None => {
            state.auto_sell_limits.remove(&rarity);
        }
    }
    run_auto_sell(state);
}

/// Sell the excess above every active per-rarity threshold in one batch.
/// Returns the total refund credited. Selling only moves counts down toward
/// their thresholds, so this can never retrigger itself.
pub fn run_auto_sell(state: &mut GameState) -> f64 {
    let sell_modifier = state.effective_stats().sell_modifier;
    let mut total_refund = 0.0;
    for kind in DropperKind::all() {
        let Some(&limit) = state.auto_sell_limits.get(&kind.rarity()) else {
            continue;
        };
        let owned = state.dropper_count(*kind);
        if owned > limit {
            let excess = owned - limit;
            total_refund += kind.base_cost() * sell_modifier * f64::from(excess);
            set_dropper_count(state, *kind, limit);
        }
    }
    state.coins += total_refund;
    total_refund
}

/// Zero and absence are equivalent: a count of zero drops the entry.
fn set_dropper_count(state: &mut GameState, kind: DropperKind, count: u32) {
    if count == 0 {
        state.droppers.remove(&kind);
    } else {
        state.droppers.insert(kind, count);
    }
}

// ── Upgrades ──────────────────────────────────────────────────────────

/// Buy a one-shot upgrade by id. Rejected if unknown, already owned, or
/// unaffordable. Ownership is a membership set, so the operation is
/// idempotent.
pub fn buy_upgrade(state: &mut GameState, id: &str) -> bool {
    let Some(def) = upgrade_by_id(id) else {
        return false;
    };
    if state.purchased_upgrades.contains(def.id) || state.coins < def.cost {
        return false;
    }
    state.coins -= def.cost;
    state.purchased_upgrades.insert(def.id.to_string());
    true
}

// ── Boosts ────────────────────────────────────────────────────────────

/// Buy a boost by id. A timed boost cannot be re-purchased while its timer
/// is still running. An instantaneous boost grants seconds-of-production
/// computed from the rate *before* the cost deduction.
pub fn buy_boost(state: &mut GameState, id: &str) -> bool {
    let Some(def) = boost_by_id(id) else {
        return false;
    };
    if def.duration_secs.is_some() && state.active_boosts.contains_key(def.id) {
        return false;
    }
    if state.coins < def.cost {
        return false;
    }

    match def.duration_secs {
        Some(duration) => {
            state.coins -= def.cost;
            state.active_boosts.insert(def.id.to_string(), duration);
        }
        None => {
            // Rate captured before the deduction; the two are independent
            // quantities and must stay that way.
            let rate = state.current_cps();
            state.coins -= def.cost;
            if let BoostEffect::InstantProduction(seconds) = def.effect {
                state.earn(rate * seconds);
            }
        }
    }
    true
}

/// Advance boost timers by one second; entries reaching zero are removed.
/// Driven at 1 Hz, independently of the production tick.
pub fn tick_boosts(state: &mut GameState) {
    for left in state.active_boosts.values_mut() {
        *left = left.saturating_sub(1);
    }
    state.active_boosts.retain(|_, left| *left > 0);
}

// ── Missions ──────────────────────────────────────────────────────────

/// Check the next unclaimed mission against lifetime earnings. Completes
/// at most one mission per call even though the reward itself raises
/// lifetime earnings — the next mission is evaluated on the next call, not
/// recursively. Returns the reward when one was granted.
pub fn check_mission(state: &mut GameState) -> Option<f64> {
    let mission = ALL_MISSIONS.get(state.mission_index)?;
    if state.total_coins_earned < mission.goal {
        return None;
    }
    state.earn(mission.reward);
    state.mission_index += 1;
    Some(mission.reward)
}

// ── Prestige ──────────────────────────────────────────────────────────

/// Golden idols gained for a given lifetime-earned total:
/// `floor(sqrt(lifetime / 1e8))`.
pub fn prestige_gain(total_earned: f64) -> u64 {
    if total_earned < PRESTIGE_GAIN_UNIT {
        return 0;
    }
    (total_earned / PRESTIGE_GAIN_UNIT).sqrt().floor() as u64
}

/// Perform the prestige reset. No-op (returning 0) when the gain would be
/// zero. Transient progress — coins, droppers, upgrades, boosts, lifetime
/// earnings, mission index — resets; prestige points, prestige-upgrade
/// levels and auto-sell settings carry over. Returns the idols gained.
pub fn prestige(state: &mut GameState) -> u64 {
    let gain = prestige_gain(state.total_coins_earned);
    if gain == 0 {
        return 0;
    }
    let bonuses = state.prestige_bonuses();
    state.prestige_points += gain;
    state.coins = STARTING_COINS;
    state.total_coins_earned = STARTING_COINS;
    state.droppers.clear();
    if bonuses.starting_droppers > 0 {
        state.droppers.insert(DropperKind::Basic, bonuses.starting_droppers);
    }
    state.purchased_upgrades.clear();
    state.active_boosts.clear();
    state.mission_index = 0;
    state.click_cooldown_left = 0.0;
    run_auto_sell(state);
    tracing::info!(gain, total = state.prestige_points, "prestige reset");
    gain
}

/// Buy one level of a prestige upgrade with golden idols. Rejected at max
/// level or when the idol balance is short.
pub fn buy_prestige_upgrade(state: &mut GameState, id: &str) -> bool {
    let Some(def) = prestige_upgrade_by_id(id) else {
        return false;
    };
    let level = state
        .prestige_upgrade_levels
        .get(def.id)
        .copied()
        .unwrap_or(0);
    if def.max_level.is_some_and(|max| level >= max) {
        return false;
    }
    let cost = def.cost.at_level(level);
    if state.prestige_points < cost {
        return false;
    }
    state.prestige_points -= cost;
    state.prestige_upgrade_levels.insert(def.id.to_string(), level + 1);
    true
}
