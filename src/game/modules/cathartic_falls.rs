//=========================================================================
// Module 6: Cathartic Falls
//=========================================================================
//
// Guided breathing followed by a free-writing journal.
//
// Breathing timeline:
// ```text
//   Breathe ─> Inhale ─> Hold ─> Exhale ─┬─> Rest ─> Inhale ...
//                                        └─> Idle (target reached)
// ```
//
// Phases advance on tick deltas. Input during a running cycle is
// ignored, and the next cycle starts on its own after the rest.
//
//=========================================================================

use std::time::Duration;

use super::policy::{word_count, CompletionPolicy};
use super::{store_text, Interaction, ModuleActivity, ModuleAnswers, ModuleId, PromptContext};
use crate::game::config::BreathPattern;
use crate::game::modal::ModalRequest;
use crate::game::profile::AgeGroup;

//=== BreathPhase =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreathPhase {
    Idle,
    Inhale,
    Hold,
    Exhale,
    Rest,
}

impl BreathPhase {
    /// Cue shown to the player.
    pub fn cue(self) -> &'static str {
        match self {
            BreathPhase::Idle => "Press space to begin",
            BreathPhase::Inhale => "Breathe in...",
            BreathPhase::Hold => "Hold...",
            BreathPhase::Exhale => "Breathe out...",
            BreathPhase::Rest => "Rest...",
        }
    }
}

//=== CatharticFalls ======================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatharticFalls {
    pattern: BreathPattern,
    target: u32,
    phase: BreathPhase,
    in_phase: Duration,
    cycles: u32,
    journal: String,
}

impl CatharticFalls {
    pub fn new(pattern: BreathPattern, target: u32) -> Self {
        Self {
            pattern,
            target,
            phase: BreathPhase::Idle,
            in_phase: Duration::ZERO,
            cycles: 0,
            journal: String::new(),
        }
    }

    pub fn phase(&self) -> BreathPhase {
        self.phase
    }

    pub fn cycles(&self) -> u32 {
        self.cycles
    }

    fn phase_length(&self, phase: BreathPhase) -> Option<Duration> {
        match phase {
            BreathPhase::Idle => None,
            BreathPhase::Inhale => Some(self.pattern.inhale),
            BreathPhase::Hold => Some(self.pattern.hold),
            BreathPhase::Exhale => Some(self.pattern.exhale),
            BreathPhase::Rest => Some(self.pattern.rest),
        }
    }

    fn next_phase(&mut self) -> BreathPhase {
        match self.phase {
            BreathPhase::Idle => BreathPhase::Idle,
            BreathPhase::Inhale => BreathPhase::Hold,
            BreathPhase::Hold => BreathPhase::Exhale,
            BreathPhase::Exhale => {
                self.cycles += 1;
                if self.cycles < self.target {
                    BreathPhase::Rest
                } else {
                    BreathPhase::Idle
                }
            }
            BreathPhase::Rest => BreathPhase::Inhale,
        }
    }
}

impl ModuleActivity for CatharticFalls {
    fn module(&self) -> ModuleId {
        ModuleId::CatharticFalls
    }

    fn reset(&mut self) {
        *self = Self::new(self.pattern, self.target);
    }

    fn handle(&mut self, interaction: Interaction) -> bool {
        if interaction != Interaction::Breathe
            || self.phase != BreathPhase::Idle
            || self.cycles >= self.target
        {
            return false;
        }
        self.phase = BreathPhase::Inhale;
        self.in_phase = Duration::ZERO;
        true
    }

    fn tick(&mut self, delta: Duration) {
        self.in_phase += delta;
        while let Some(length) = self.phase_length(self.phase) {
            if self.in_phase < length {
                return;
            }
            self.in_phase -= length;
            self.phase = self.next_phase();
        }
        self.in_phase = Duration::ZERO;
    }

    fn text_slots(&self) -> usize {
        1
    }

    fn prompt(&self, slot: usize, context: &PromptContext) -> Option<ModalRequest> {
        let title = match context.presentation.age_group {
            AgeGroup::Teen => "Emotional Reflection",
            AgeGroup::Adult => "Feelings Journal",
        };
        (slot == 0).then(|| {
            ModalRequest::new(title)
                .with_guidance(context.presentation.module(ModuleId::CatharticFalls).instructions)
                .with_placeholder("Write freely without judgment...")
                .with_initial_value(self.journal.clone())
                .with_min_words(context.policy.journal_min_words)
        })
    }

    fn apply_text(&mut self, slot: usize, text: String) -> bool {
        slot == 0 && store_text(&mut self.journal, text)
    }

    fn can_complete(&self, policy: &CompletionPolicy) -> bool {
        self.cycles >= policy.breath_cycles && word_count(&self.journal) >= policy.journal_min_words
    }

    fn answers(&self) -> ModuleAnswers {
        ModuleAnswers::CatharticFalls {
            breath_cycles: self.cycles,
            journal_entry: self.journal.clone(),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
