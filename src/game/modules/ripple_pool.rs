//=========================================================================
// Module 9: Ripple Pool
//=========================================================================
//
// Each click inside the pool casts a ripple and reveals the next
// reflection prompt. An intention can be written; without one the
// default intention is recorded.
//
//=========================================================================

use std::time::Duration;

use super::policy::CompletionPolicy;
use super::{store_text, Interaction, ModuleActivity, ModuleAnswers, ModuleId, PromptContext};
use crate::game::config::Ellipse;
use crate::game::modal::ModalRequest;

//=== Constants ===========================================================

const REFLECTIONS: [&str; 3] = [
    "What have you learned about yourself through this emotion?",
    "How might understanding this emotion help your relationships?",
    "What intention will you set moving forward?",
];

pub const DEFAULT_INTENTION: &str = "Moving forward with greater emotional awareness";

/// Pixels per second a ripple ring grows.
const RIPPLE_SPEED: f32 = 120.0;
/// Alpha lost per second.
const RIPPLE_FADE: f32 = 0.6;

//=== Ripple ==============================================================

/// Expanding ring drawn where the player clicked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ripple {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub alpha: f32,
}

//=== RipplePool ==========================================================

#[derive(Debug, Clone, PartialEq)]
pub struct RipplePool {
    pool: Ellipse,
    target: usize,
    cast: usize,
    rings: Vec<Ripple>,
    intention: String,
}

impl RipplePool {
    pub fn new(pool: Ellipse, target: usize) -> Self {
        Self {
            pool,
            target,
            cast: 0,
            rings: Vec::new(),
            intention: String::new(),
        }
    }

    pub fn ripples(&self) -> usize {
        self.cast
    }

    /// Rings still visible.
    pub fn rings(&self) -> &[Ripple] {
        &self.rings
    }

    /// Reflection prompts revealed so far.
    pub fn revealed_reflections(&self) -> impl Iterator<Item = &'static str> {
        REFLECTIONS.iter().copied().cycle().take(self.cast)
    }
}

impl ModuleActivity for RipplePool {
    fn module(&self) -> ModuleId {
        ModuleId::RipplePool
    }

    fn reset(&mut self) {
        *self = Self::new(self.pool, self.target);
    }

    fn handle(&mut self, interaction: Interaction) -> bool {
        let Interaction::Place { x, y } = interaction else {
            return false;
        };
        if self.cast >= self.target || !self.pool.contains(x, y) {
            return false;
        }
        self.cast += 1;
        self.rings.push(Ripple { x, y, radius: 0.0, alpha: 1.0 });
        true
    }

    fn tick(&mut self, delta: Duration) {
        let dt = delta.as_secs_f32();
        let max_radius = self.pool.radii.0;
        for ring in &mut self.rings {
            ring.radius += RIPPLE_SPEED * dt;
            ring.alpha -= RIPPLE_FADE * dt;
        }
        self.rings.retain(|ring| ring.alpha > 0.0 && ring.radius <= max_radius);
    }

    fn text_slots(&self) -> usize {
        1
    }

    fn prompt(&self, slot: usize, context: &PromptContext) -> Option<ModalRequest> {
        (slot == 0).then(|| {
            ModalRequest::new("Set Your Intention")
                .with_guidance(context.presentation.module(ModuleId::RipplePool).instructions)
                .with_placeholder(DEFAULT_INTENTION)
                .with_initial_value(self.intention.clone())
        })
    }

    fn apply_text(&mut self, slot: usize, text: String) -> bool {
        slot == 0 && store_text(&mut self.intention, text)
    }

    fn can_complete(&self, policy: &CompletionPolicy) -> bool {
        self.cast >= policy.ripples
    }

    fn answers(&self) -> ModuleAnswers {
        let intention = if self.intention.trim().is_empty() {
            DEFAULT_INTENTION.to_string()
        } else {
            self.intention.clone()
        };
        ModuleAnswers::RipplePool {
            ripples: self.cast,
            synthesis_insights: format!("Completed {} reflections", self.cast),
            intention,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
