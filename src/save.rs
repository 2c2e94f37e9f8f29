//! Save/load mapping to the persisted JSON snapshot.
//!
//! The snapshot is a single JSON blob with camelCase keys. Missing fields
//! fall back to their documented defaults, malformed JSON counts as "no
//! save present", and unknown dropper/upgrade ids are ignored on restore —
//! persistence problems never surface into the simulation. Active boosts
//! and the click cooldown are transient and deliberately absent from the
//! snapshot.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{upgrade_by_id, DropperKind, Rarity};
use crate::logic;
use crate::state::{GameState, STARTING_COINS};

/// Failure to serialize a snapshot. Callers log and skip the write.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("snapshot serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// The persisted snapshot shape. Field names and value shapes are the
/// external contract; auto-sell thresholds are stored as strings (empty or
/// absent = disabled).
#[derive(Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SaveData {
    pub coins: f64,
    pub droppers: BTreeMap<String, u32>,
    pub purchased_upgrades: Vec<String>,
    pub prestige_points: u64,
    pub purchased_prestige_upgrades: BTreeMap<String, u32>,
    pub total_coins_earned: f64,
    pub current_mission_index: usize,
    pub auto_sell_settings: BTreeMap<String, String>,
}

impl Default for SaveData {
    fn default() -> Self {
        Self {
            coins: STARTING_COINS,
            droppers: BTreeMap::new(),
            purchased_upgrades: Vec::new(),
            prestige_points: 0,
            purchased_prestige_upgrades: BTreeMap::new(),
            total_coins_earned: STARTING_COINS,
            current_mission_index: 0,
            auto_sell_settings: BTreeMap::new(),
        }
    }
}

/// Extract the persistable snapshot from the runtime state.
pub fn extract(state: &GameState) -> SaveData {
    SaveData {
        coins: state.coins,
        droppers: state
            .droppers
            .iter()
            .map(|(kind, &count)| (kind.name().to_string(), count))
            .collect(),
        purchased_upgrades: state.purchased_upgrades.iter().cloned().collect(),
        prestige_points: state.prestige_points,
        purchased_prestige_upgrades: state.prestige_upgrade_levels.clone(),
        total_coins_earned: state.total_coins_earned,
        current_mission_index: state.mission_index,
        auto_sell_settings: state
            .auto_sell_limits
            .iter()
            .map(|(rarity, limit)| (rarity.as_str().to_string(), limit.to_string()))
            .collect(),
    }
}

/// Rebuild a runtime state from a snapshot. Unknown dropper names, upgrade
/// ids, rarities and unparsable threshold strings are dropped; restoring then
/// re-applies the auto-sell thresholds, mirroring a threshold that was
/// active when the save was written.
pub fn apply(save: SaveData) -> GameState {
    let mut state = GameState::new();
    state.coins = save.coins;
    state.total_coins_earned = save.total_coins_earned;
    state.prestige_points = save.prestige_points;
    state.prestige_upgrade_levels = save.purchased_prestige_upgrades;
    state.mission_index = save.current_mission_index;

    for id in save.purchased_upgrades {
        if upgrade_by_id(&id).is_some() {
            state.purchased_upgrades.insert(id);
        } else {
            tracing::warn!(%id, "dropping unknown upgrade entry from save");
        }
    }

    for (name, count) in save.droppers {
        if count == 0 {
            continue;
        }
        match DropperKind::from_name(&name) {
            Some(kind) => {
                state.droppers.insert(kind, count);
            }
            None => tracing::warn!(%name, "dropping unknown dropper entry from save"),
        }
    }

    for (rarity_str, raw) in save.auto_sell_settings {
        let Some(rarity) = Rarity::from_str(&rarity_str) else {
            tracing::warn!(rarity = %rarity_str, "dropping unknown auto-sell rarity");
            continue;
        };
        // Empty or unparsable (incl. negative) input disables the rarity.
        if let Ok(limit) = raw.trim().parse::<u32>() {
            state.auto_sell_limits.insert(rarity, limit);
        }
    }

    logic::run_auto_sell(&mut state);
    state
}

/// Serialize the state to the snapshot JSON.
pub fn to_json(state: &GameState) -> Result<String, SaveError> {
    Ok(serde_json::to_string(&extract(state))?)
}

/// Parse a snapshot. Malformed JSON is logged and treated as "no save
/// present"; the caller starts a fresh game.
pub fn from_json(json: &str) -> Option<GameState> {
    match serde_json::from_str::<SaveData>(json) {
        Ok(save) => Some(apply(save)),
        Err(err) => {
            tracing::warn!(%err, "discarding unreadable save");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ALL_MISSIONS;

    fn populated_state() -> GameState {
        let mut state = GameState::new();
        state.coins = 123_456.5;
        state.total_coins_earned = 9_876_543.25;
        state.droppers.insert(DropperKind::Basic, 12);
        state.droppers.insert(DropperKind::Elite, 2);
        state.purchased_upgrades.insert("u1".to_string());
        state.purchased_upgrades.insert("u9".to_string());
        state.prestige_points = 7;
        state.prestige_upgrade_levels.insert("p1".to_string(), 3);
        state.mission_index = 4;
        state.auto_sell_limits.insert(Rarity::Common, 20);
        state
    }

    #[test]
    fn roundtrip_preserves_fields_and_production_rate() {
        let original = populated_state();
        let json = to_json(&original).unwrap();
        let restored = from_json(&json).unwrap();

        assert!((restored.coins - original.coins).abs() < 1e-9);
        assert!((restored.total_coins_earned - original.total_coins_earned).abs() < 1e-9);
        assert_eq!(restored.droppers, original.droppers);
        assert_eq!(restored.purchased_upgrades, original.purchased_upgrades);
        assert_eq!(restored.prestige_points, 7);
        assert_eq!(restored.prestige_upgrade_levels, original.prestige_upgrade_levels);
        assert_eq!(restored.mission_index, 4);
        assert_eq!(restored.auto_sell_limits, original.auto_sell_limits);
        assert!((restored.current_cps() - original.current_cps()).abs() < 1e-9);
    }

    #[test]
    fn snapshot_uses_contract_keys() {
        let json = to_json(&populated_state()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value.get("coins").is_some());
        assert!(value.get("purchasedUpgrades").is_some());
        assert!(value.get("totalCoinsEarned").is_some());
        assert!(value.get("currentMissionIndex").is_some());
        assert_eq!(
            value["droppers"]["Basic Dropper"],
            serde_json::Value::from(12)
        );
        assert_eq!(
            value["autoSellSettings"]["Common"],
            serde_json::Value::from("20")
        );
        // Transient fields must not leak into the snapshot.
        assert!(value.get("activeBoosts").is_none());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let restored = from_json("{}").unwrap();
        assert!((restored.coins - 100.0).abs() < 1e-9);
        assert!((restored.total_coins_earned - 100.0).abs() < 1e-9);
        assert!(restored.droppers.is_empty());
        assert_eq!(restored.mission_index, 0);
    }

    #[test]
    fn partial_snapshot_keeps_known_fields() {
        let restored =
            from_json(r#"{"coins": 500.0, "droppers": {"Basic Dropper": 3}}"#).unwrap();
        assert!((restored.coins - 500.0).abs() < 1e-9);
        assert_eq!(restored.dropper_count(DropperKind::Basic), 3);
        assert_eq!(restored.prestige_points, 0);
    }

    #[test]
    fn malformed_json_is_no_save() {
        assert!(from_json("not json at all {{{").is_none());
        assert!(from_json("").is_none());
    }

    #[test]
    fn unknown_entries_are_dropped() {
        let restored = from_json(
            r#"{
                "droppers": {"Haunted Dropper": 9, "Basic Dropper": 1},
                "purchasedUpgrades": ["u1", "u99"],
                "autoSellSettings": {"Shiny": "5", "Common": "oops", "Rare": "3"}
            }"#,
        )
        .unwrap();
        assert_eq!(restored.droppers.len(), 1);
        assert_eq!(restored.dropper_count(DropperKind::Basic), 1);
        assert!(restored.purchased_upgrades.contains("u1"));
        assert!(!restored.purchased_upgrades.contains("u99"));
        // "Shiny" is not a rarity; "oops" does not parse; only Rare sticks.
        assert_eq!(restored.auto_sell_limits.len(), 1);
        assert_eq!(restored.auto_sell_limits.get(&Rarity::Rare), Some(&3));
    }

    #[test]
    fn negative_threshold_string_disables_rarity() {
        let restored =
            from_json(r#"{"autoSellSettings": {"Common": "-4"}}"#).unwrap();
        assert!(restored.auto_sell_limits.is_empty());
    }

    #[test]
    fn restore_reapplies_auto_sell() {
        let restored = from_json(
            r#"{
                "droppers": {"Basic Dropper": 10},
                "autoSellSettings": {"Common": "6"}
            }"#,
        )
        .unwrap();
        assert_eq!(restored.dropper_count(DropperKind::Basic), 6);
    }

    #[test]
    fn unknown_top_level_fields_are_ignored() {
        let restored = from_json(r#"{"coins": 42.0, "futureField": [1, 2, 3]}"#).unwrap();
        assert!((restored.coins - 42.0).abs() < 1e-9);
    }

    #[test]
    fn zero_count_entries_not_persisted_or_restored() {
        let restored = from_json(r#"{"droppers": {"Basic Dropper": 0}}"#).unwrap();
        assert!(restored.droppers.is_empty());

        let mut state = GameState::new();
        state.droppers.insert(DropperKind::Basic, 1);
        logic::sell_one(&mut state, DropperKind::Basic);
        let save = extract(&state);
        assert!(save.droppers.is_empty());
    }

    #[test]
    fn roundtrip_after_real_play() {
        let mut state = GameState::new();
        state.coins = 1e6;
        for _ in 0..5 {
            logic::buy_dropper(&mut state, DropperKind::Improved);
        }
        logic::buy_upgrade(&mut state, "u4");
        logic::tick(&mut state, 25);
        assert!(state.mission_index < ALL_MISSIONS.len());

        let json = to_json(&state).unwrap();
        let restored = from_json(&json).unwrap();
        assert!((restored.current_cps() - state.current_cps()).abs() < 1e-9);
        assert_eq!(restored.mission_index, state.mission_index);
    }
}
