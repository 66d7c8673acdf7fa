//=========================================================================
// Fade
//=========================================================================
//
// Tick-driven camera fade with completion events.
//
// Architecture:
//   fade_out(d) → advance(dt)* → Some(FadeEvent::OutComplete)
//   fade_in(d)  → advance(dt)* → Some(FadeEvent::InComplete)
//
// The completion event is reported on exactly one tick. Scene switches
// are gated on `OutComplete`, so the outgoing scene is fully faded
// before the next scene's `on_enter` runs.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

//=== FadeEvent ===========================================================

/// Reported once when a running fade finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeEvent {
    InComplete,
    OutComplete,
}

//=== Fade ================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    In,
    Out,
}

#[derive(Debug, Clone, Copy)]
struct Running {
    direction: Direction,
    duration: Duration,
    elapsed: Duration,
}

/// Opacity animation between fully visible (alpha 1.0) and black (0.0).
#[derive(Debug, Clone, Copy)]
pub struct Fade {
    running: Option<Running>,
    alpha: f32,
}

impl Fade {
    /// Creates an idle, fully visible fade.
    pub fn new() -> Self {
        Self {
            running: None,
            alpha: 1.0,
        }
    }

    //--- Control ----------------------------------------------------------

    /// Starts fading from black to visible.
    pub fn fade_in(&mut self, duration: Duration) {
        self.alpha = 0.0;
        self.start(Direction::In, duration);
    }

    /// Starts fading from visible to black.
    pub fn fade_out(&mut self, duration: Duration) {
        self.start(Direction::Out, duration);
    }

    /// Cancels any running fade and restores full visibility.
    pub fn reset(&mut self) {
        self.running = None;
        self.alpha = 1.0;
    }

    fn start(&mut self, direction: Direction, duration: Duration) {
        self.running = Some(Running {
            direction,
            duration,
            elapsed: Duration::ZERO,
        });
    }

    //--- Update -----------------------------------------------------------

    /// Advances the running fade by `delta`.
    ///
    /// Returns the completion event on the tick the fade finishes.
    pub fn advance(&mut self, delta: Duration) -> Option<FadeEvent> {
        let running = self.running.as_mut()?;
        running.elapsed += delta;

        let progress = if running.duration.is_zero() {
            1.0
        } else {
            (running.elapsed.as_secs_f32() / running.duration.as_secs_f32()).min(1.0)
        };

        self.alpha = match running.direction {
            Direction::In => progress,
            Direction::Out => 1.0 - progress,
        };

        if progress < 1.0 {
            return None;
        }

        let direction = running.direction;
        self.running = None;
        Some(match direction {
            Direction::In => FadeEvent::InComplete,
            Direction::Out => FadeEvent::OutComplete,
        })
    }

    //--- Queries ----------------------------------------------------------

    /// Current opacity in `[0.0, 1.0]`.
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Returns `true` while a fade-out is in progress.
    pub fn is_fading_out(&self) -> bool {
        matches!(self.running, Some(Running { direction: Direction::Out, .. }))
    }
}

impl Default for Fade {
    fn default() -> Self {
        Self::new()
    }
}

//=== Tests ===============================================================
