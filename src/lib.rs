//! Simulation core of Coin Temple Tycoon, an incremental temple-building
//! game: droppers produce coins on a fixed 10 Hz tick, one-shot upgrades
//! and timed boosts multiply the flow, missions pay out milestone rewards,
//! and a prestige reset converts lifetime earnings into golden idols that
//! permanently speed up the next run.
//!
//! The crate is UI-agnostic. [`state::GameState`] is plain data, every game
//! operation is a free function in [`logic`] over `&mut GameState`, and
//! [`session::Session`] ties the tick clock, the boost timers and the
//! debounced autosave together for a host that feeds it wall-clock time.
//! Persistence lives in [`save`] as a versionless camelCase JSON snapshot.

pub mod catalog;
pub mod logic;
pub mod save;
pub mod session;
pub mod state;
pub mod stats;
pub mod time;

pub use catalog::{DropperKind, Rarity};
pub use session::Session;
pub use state::GameState;
pub use stats::EffectiveStats;
