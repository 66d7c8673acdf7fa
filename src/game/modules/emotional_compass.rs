//=========================================================================
// Module 7: Emotional Compass
//=========================================================================
//
// Eight trigger points around a compass, plus the emotion's trajectory
// written as past, present and future.
//
//=========================================================================

use super::policy::{is_answered, CompletionPolicy};
use super::{store_text, Interaction, ModuleActivity, ModuleAnswers, ModuleId, PromptContext};
use crate::game::modal::ModalRequest;
use crate::game::profile::AgeGroup;

//=== Triggers ============================================================

/// Trigger identifiers in compass order, starting at north.
pub const TRIGGERS: [&str; 8] = [
    "social",
    "work",
    "family",
    "health",
    "relationships",
    "finances",
    "future",
    "self",
];

/// (adult title, teen title, guidance) per trajectory slot.
const TRAJECTORIES: [(&str, &str, &str); 3] = [
    (
        "Past: Origins",
        "Journey Through Time: Past",
        "When did you first feel this way, and what brought it on?",
    ),
    (
        "Present: Current State",
        "Journey Through Time: Present",
        "How often does it appear now, how strong is it, and how is it affecting your days?",
    ),
    (
        "Future: Projected Path",
        "Journey Through Time: Future",
        "Where might it go if nothing changes, and where would you like it to go instead?",
    ),
];

//=== EmotionalCompass ====================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EmotionalCompass {
    /// Trigger indices in selection order.
    triggers: Vec<usize>,
    trajectory: [String; 3],
}

impl EmotionalCompass {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_triggers(&self) -> Vec<String> {
        self.triggers.iter().map(|&i| TRIGGERS[i].to_string()).collect()
    }
}

impl ModuleActivity for EmotionalCompass {
    fn module(&self) -> ModuleId {
        ModuleId::EmotionalCompass
    }

    fn reset(&mut self) {
        *self = Self::new();
    }

    fn handle(&mut self, interaction: Interaction) -> bool {
        let Interaction::Select(index) = interaction else {
            return false;
        };
        if index >= TRIGGERS.len() {
            return false;
        }
        match self.triggers.iter().position(|&i| i == index) {
            Some(pos) => {
                self.triggers.remove(pos);
            }
            None => self.triggers.push(index),
        }
        true
    }

    fn text_slots(&self) -> usize {
        TRAJECTORIES.len()
    }

    fn prompt(&self, slot: usize, context: &PromptContext) -> Option<ModalRequest> {
        let (adult, teen, guidance) = TRAJECTORIES.get(slot)?;
        let title = match context.presentation.age_group {
            AgeGroup::Teen => teen,
            AgeGroup::Adult => adult,
        };
        Some(
            ModalRequest::new(*title)
                .with_guidance(*guidance)
                .with_placeholder("Describe the trajectory...")
                .with_initial_value(self.trajectory[slot].clone()),
        )
    }

    fn apply_text(&mut self, slot: usize, text: String) -> bool {
        match self.trajectory.get_mut(slot) {
            Some(field) => store_text(field, text),
            None => false,
        }
    }

    fn can_complete(&self, policy: &CompletionPolicy) -> bool {
        self.triggers.len() >= policy.min_triggers
            && self.trajectory.iter().all(|entry| is_answered(entry))
    }

    fn answers(&self) -> ModuleAnswers {
        let [past, present, future] = self.trajectory.clone();
        ModuleAnswers::EmotionalCompass {
            triggers: self.selected_triggers(),
            trajectory_past: past,
            trajectory_present: present,
            trajectory_future: future,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
