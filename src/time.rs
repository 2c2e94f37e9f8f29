//! Wall-clock plumbing: a fixed-timestep tick clock and a write debounce.
//!
//! The host feeds wall-clock milliseconds; the clock converts the variable
//! deltas into discrete 100 ms production ticks so the simulation stays
//! deterministic and testable without real timers.

/// Fixed-timestep accumulator. Converts variable frame deltas into a whole
/// number of game ticks, carrying the remainder forward.
pub struct TickClock {
    ms_per_tick: f64,
    accumulator: f64,
    last_timestamp: Option<f64>,
    /// Total ticks handed out since creation.
    pub total_ticks: u64,
}

/// Largest delta consumed in one update. Keeps a backgrounded session from
/// replaying its whole absence as one burst.
const MAX_DELTA_MS: f64 = 500.0;

impl TickClock {
    /// `ticks_per_sec`: game ticks per real-time second (10 for the
    /// production tick).
    pub fn new(ticks_per_sec: u32) -> Self {
        Self {
            ms_per_tick: 1_000.0 / f64::from(ticks_per_sec),
            accumulator: 0.0,
            last_timestamp: None,
            total_ticks: 0,
        }
    }

    /// Feed the current wall-clock time in milliseconds; returns how many
    /// whole ticks elapsed. The first call anchors the clock and returns 0.
    pub fn update(&mut self, now_ms: f64) -> u32 {
        let delta = match self.last_timestamp {
            Some(prev) => (now_ms - prev).clamp(0.0, MAX_DELTA_MS),
            None => 0.0,
        };
        self.last_timestamp = Some(now_ms);

        self.accumulator += delta;
        let ticks = (self.accumulator / self.ms_per_tick) as u32;
        self.accumulator -= f64::from(ticks) * self.ms_per_tick;
        self.total_ticks += u64::from(ticks);
        ticks
    }
}

/// Trailing-edge debounce for the autosave: fires once a quiet period has
/// passed since the most recent touch, coalescing bursts of mutations into
/// a single write.
pub struct Debounce {
    delay_ms: f64,
    deadline: Option<f64>,
}

impl Debounce {
    pub fn new(delay_ms: f64) -> Self {
        Self { delay_ms, deadline: None }
    }

    /// Register a mutation at `now_ms`; pushes the pending deadline out.
    pub fn touch(&mut self, now_ms: f64) {
        self.deadline = Some(now_ms + self.delay_ms);
    }

    /// True exactly once per quiet period, when the deadline has passed.
    pub fn fire(&mut self, now_ms: f64) -> bool {
        match self.deadline {
            Some(deadline) if now_ms >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }
}
