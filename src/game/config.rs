//=========================================================================
// Journey Configuration
//=========================================================================
//
// Timing, thresholds and layout shared by every journey scene.
//
// Built once at launch with the same consuming-builder style as
// `EngineBuilder`, then shared read-only through `SceneServices`.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

//=== Internal Dependencies ===============================================

use super::modules::CompletionPolicy;

//=== Geometry ============================================================

/// Axis-aligned rectangle given by its centre and size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zone {
    pub center: (f32, f32),
    pub size: (f32, f32),
}

impl Zone {
    pub fn contains(&self, x: f32, y: f32) -> bool {
        let (cx, cy) = self.center;
        let (w, h) = self.size;
        (x - cx).abs() <= w / 2.0 && (y - cy).abs() <= h / 2.0
    }
}

/// Ellipse given by its centre and radii.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipse {
    pub center: (f32, f32),
    pub radii: (f32, f32),
}

impl Ellipse {
    pub fn contains(&self, x: f32, y: f32) -> bool {
        let dx = (x - self.center.0) / self.radii.0;
        let dy = (y - self.center.1) / self.radii.1;
        dx * dx + dy * dy <= 1.0
    }
}

//=== BreathPattern =======================================================

/// Phase lengths of one guided breathing cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreathPattern {
    pub inhale: Duration,
    pub hold: Duration,
    pub exhale: Duration,
    /// Pause before the next cycle starts on its own.
    pub rest: Duration,
}

impl Default for BreathPattern {
    fn default() -> Self {
        Self {
            inhale: Duration::from_secs(4),
            hold: Duration::from_secs(4),
            exhale: Duration::from_secs(6),
            rest: Duration::from_millis(1500),
        }
    }
}

//=== JourneyConfig =======================================================

#[derive(Debug, Clone, PartialEq)]
pub struct JourneyConfig {
    /// Fade duration used for scene changes.
    pub scene_transition: Duration,
    /// Pause between recording a module and leaving it.
    pub continue_delay: Duration,
    pub policy: CompletionPolicy,
    pub breath: BreathPattern,
    /// Where memory stars may be placed.
    pub constellation: Zone,
    /// Where ripples may be cast.
    pub ripple_pool: Ellipse,
}

impl Default for JourneyConfig {
    fn default() -> Self {
        Self {
            scene_transition: Duration::from_millis(500),
            continue_delay: Duration::from_millis(600),
            policy: CompletionPolicy::default(),
            breath: BreathPattern::default(),
            constellation: Zone {
                center: (640.0, 550.0),
                size: (900.0, 500.0),
            },
            ripple_pool: Ellipse {
                center: (640.0, 520.0),
                radii: (300.0, 150.0),
            },
        }
    }
}

impl JourneyConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// # Panics
    ///
    /// Panics if `duration` is zero.
    pub fn with_scene_transition(mut self, duration: Duration) -> Self {
        assert!(!duration.is_zero(), "scene transition must be positive");
        self.scene_transition = duration;
        self
    }

    /// # Panics
    ///
    /// Panics if `delay` is zero.
    pub fn with_continue_delay(mut self, delay: Duration) -> Self {
        assert!(!delay.is_zero(), "continue delay must be positive");
        self.continue_delay = delay;
        self
    }

    pub fn with_policy(mut self, policy: CompletionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// # Panics
    ///
    /// Panics if any active phase is zero. The rest may be zero.
    pub fn with_breath_pattern(mut self, breath: BreathPattern) -> Self {
        assert!(
            !breath.inhale.is_zero() && !breath.hold.is_zero() && !breath.exhale.is_zero(),
            "breath phases must be positive"
        );
        self.breath = breath;
        self
    }

    pub fn with_constellation(mut self, zone: Zone) -> Self {
        self.constellation = zone;
        self
    }

    pub fn with_ripple_pool(mut self, pool: Ellipse) -> Self {
        self.ripple_pool = pool;
        self
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timings() {
        let config = JourneyConfig::new();
        assert_eq!(config.scene_transition, Duration::from_millis(500));
        assert_eq!(config.continue_delay, Duration::from_millis(600));
        assert_eq!(config.breath.exhale, Duration::from_secs(6));
    }

    #[test]
    fn zone_bounds_are_inclusive() {
        let zone = JourneyConfig::new().constellation;
        assert!(zone.contains(640.0, 550.0));
        assert!(zone.contains(190.0, 300.0));
        assert!(!zone.contains(189.0, 550.0));
        assert!(!zone.contains(640.0, 801.0));
    }

    #[test]
    fn ellipse_containment() {
        let pool = JourneyConfig::new().ripple_pool;
        assert!(pool.contains(640.0, 520.0));
        assert!(pool.contains(940.0, 520.0));
        assert!(!pool.contains(900.0, 650.0));
    }

    #[test]
    #[should_panic(expected = "continue delay must be positive")]
    fn zero_continue_delay_panics() {
        let _ = JourneyConfig::new().with_continue_delay(Duration::ZERO);
    }
}
