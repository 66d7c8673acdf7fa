//=========================================================================
// Frame Clock
//=========================================================================
//
// Fixed-step time source shared with scenes through GlobalContext.
//
// Architecture:
//   CoreSystemsOrchestrator ── advance(dt) ──> FrameClock
//                                                 │
//   Scene::update() ── ctx.clock.delta() ─────────┘
//                  └─ Timer::tick(delta) → fired?
//
// All game timing (fades, delayed calls, breathing phases) advances by
// the tick delta, never by wall-clock reads, so tests can step time
// deterministically.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

//=== FrameClock ==========================================================

/// Per-tick time information.
///
/// Advanced once per tick by the orchestrator before systems update.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    delta: Duration,
    elapsed: Duration,
    frame: u64,
}

impl FrameClock {
    /// Creates a clock at frame zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances the clock by one tick of length `delta`.
    pub fn advance(&mut self, delta: Duration) {
        self.delta = delta;
        self.elapsed += delta;
        self.frame += 1;
    }

    /// Duration of the current tick.
    pub fn delta(&self) -> Duration {
        self.delta
    }

    /// Total simulated time since start.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Number of ticks advanced so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }
}

//=== Timer ===============================================================

/// One-shot countdown, the tick-driven equivalent of a delayed call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    remaining: Duration,
    fired: bool,
}

impl Timer {
    /// Starts a timer that fires after `duration`.
    pub fn new(duration: Duration) -> Self {
        Self {
            remaining: duration,
            fired: false,
        }
    }

    /// Advances the timer. Returns `true` exactly once, on the tick the
    /// remaining time reaches zero.
    pub fn tick(&mut self, delta: Duration) -> bool {
        if self.fired {
            return false;
        }
        self.remaining = self.remaining.saturating_sub(delta);
        if self.remaining.is_zero() {
            self.fired = true;
            return true;
        }
        false
    }

    /// Time left before the timer fires.
    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }
}

//=== Tests ===============================================================
