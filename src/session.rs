//! Cooperative single-threaded driver for one running game.
//!
//! [`Session`] owns the state, the 10 Hz production clock and the autosave
//! debounce, and derives the 1 Hz boost tick from the production tick. The
//! host calls [`Session::update`] with the current wall-clock time each
//! frame and routes player input through the mutation wrappers, which mark
//! the state dirty for the autosave.

use crate::catalog::{DropperKind, Rarity};
use crate::logic::{self, TICKS_PER_SEC};
use crate::state::GameState;
use crate::time::{Debounce, TickClock};

/// Quiet period after the last mutation before an autosave is due.
const AUTOSAVE_DELAY_MS: f64 = 1_000.0;

pub struct Session {
    pub state: GameState,
    clock: TickClock,
    autosave: Debounce,
    /// Production ticks accumulated towards the next boost second.
    boost_carry: u32,
    /// Timestamp of the most recent `update`, reused by the mutation
    /// wrappers so callers do not pass the clock around.
    now_ms: f64,
}

impl Session {
    pub fn new() -> Self {
        Self::with_state(GameState::new())
    }

    /// Resume from a restored state (e.g. a loaded save).
    pub fn with_state(state: GameState) -> Self {
        Self {
            state,
            clock: TickClock::new(TICKS_PER_SEC),
            autosave: Debounce::new(AUTOSAVE_DELAY_MS),
            boost_carry: 0,
            now_ms: 0.0,
        }
    }

    /// Advance the simulation to `now_ms`. Runs however many production
    /// ticks elapsed, winds boost timers down one second per ten production
    /// ticks, and marks the state dirty if anything was earned.
    pub fn update(&mut self, now_ms: f64) {
        self.now_ms = now_ms;
        let ticks = self.clock.update(now_ms);
        if ticks == 0 {
            return;
        }

        let earned_before = self.state.total_coins_earned;
        logic::tick(&mut self.state, ticks);

        self.boost_carry += ticks;
        while self.boost_carry >= TICKS_PER_SEC {
            self.boost_carry -= TICKS_PER_SEC;
            logic::tick_boosts(&mut self.state);
        }

        if self.state.total_coins_earned > earned_before {
            self.autosave.touch(now_ms);
        }
    }

    /// True once per quiet period after the last mutation; the host writes
    /// the snapshot when this fires.
    pub fn autosave_due(&mut self, now_ms: f64) -> bool {
        self.autosave.fire(now_ms)
    }

    // ── Mutation wrappers ──────────────────────────────────────────────

    pub fn click(&mut self) -> bool {
        let changed = logic::click(&mut self.state);
        self.dirty_if(changed)
    }

    pub fn buy_dropper(&mut self, kind: DropperKind) -> bool {
        let changed = logic::buy_dropper(&mut self.state, kind);
        self.dirty_if(changed)
    }

    pub fn sell_droppers(&mut self, kind: DropperKind, quantity: u32) -> u32 {
        let sold = logic::sell_droppers(&mut self.state, kind, quantity);
        if sold > 0 {
            self.autosave.touch(self.now_ms);
        }
        sold
    }

    pub fn set_auto_sell_limit(&mut self, rarity: Rarity, limit: Option<u32>) {
        logic::set_auto_sell_limit(&mut self.state, rarity, limit);
        self.autosave.touch(self.now_ms);
    }

    pub fn buy_upgrade(&mut self, id: &str) -> bool {
        let changed = logic::buy_upgrade(&mut self.state, id);
        self.dirty_if(changed)
    }

    pub fn buy_boost(&mut self, id: &str) -> bool {
        let changed = logic::buy_boost(&mut self.state, id);
        self.dirty_if(changed)
    }

    pub fn buy_prestige_upgrade(&mut self, id: &str) -> bool {
        let changed = logic::buy_prestige_upgrade(&mut self.state, id);
        self.dirty_if(changed)
    }

    pub fn prestige(&mut self) -> u64 {
        let gained = logic::prestige(&mut self.state);
        if gained > 0 {
            self.autosave.touch(self.now_ms);
        }
        gained
    }

    fn dirty_if(&mut self, changed: bool) -> bool {
        if changed {
            self.autosave.touch(self.now_ms);
        }
        changed
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
