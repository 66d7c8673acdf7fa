//=========================================================================
// Module 3: Embodiment
//=========================================================================
//
// Body map with eight toggleable parts and five body-language questions.
// Only the questions gate completion; the map is descriptive.
//
//=========================================================================

use super::policy::{is_answered, CompletionPolicy};
use super::{store_text, Interaction, ModuleActivity, ModuleAnswers, ModuleId, PromptContext};
use crate::game::modal::ModalRequest;
use crate::game::profile::AgeGroup;

//=== Body Map ============================================================

pub const BODY_PARTS: [&str; 8] = [
    "Head",
    "Neck/Throat",
    "Chest/Heart",
    "Stomach/Gut",
    "Left Arm",
    "Right Arm",
    "Left Leg",
    "Right Leg",
];

/// (label, prompt) for each body-language question, in slot order.
const QUESTIONS: [(&str, &str); 5] = [
    ("Where do you feel it?", "Where in your body do you feel this emotion?"),
    (
        "What does it feel like?",
        "What physical sensations do you notice? (achy, tight, butterflies, warm, cold, etc.)",
    ),
    ("If it could talk?", "If that part of your body could talk, what would it say?"),
    ("If it could ask?", "If that part of your body could ask for something, what would it ask for?"),
    ("What action?", "If that part of your body could take action, what would it do?"),
];

//=== BodyLanguage ========================================================

/// Answers to the five body-language questions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BodyLanguage {
    pub where_feeling: String,
    pub what_feels_like: String,
    pub if_could_talk: String,
    pub if_could_ask: String,
    pub action_would_take: String,
}

impl BodyLanguage {
    fn slot(&self, slot: usize) -> Option<&String> {
        match slot {
            0 => Some(&self.where_feeling),
            1 => Some(&self.what_feels_like),
            2 => Some(&self.if_could_talk),
            3 => Some(&self.if_could_ask),
            4 => Some(&self.action_would_take),
            _ => None,
        }
    }

    fn slot_mut(&mut self, slot: usize) -> Option<&mut String> {
        match slot {
            0 => Some(&mut self.where_feeling),
            1 => Some(&mut self.what_feels_like),
            2 => Some(&mut self.if_could_talk),
            3 => Some(&mut self.if_could_ask),
            4 => Some(&mut self.action_would_take),
            _ => None,
        }
    }

    /// Number of questions with a non-blank answer.
    pub fn answered(&self) -> usize {
        (0..QUESTIONS.len())
            .filter_map(|slot| self.slot(slot))
            .filter(|answer| is_answered(answer))
            .count()
    }
}

//=== Embodiment ==========================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Embodiment {
    /// Indices into `BODY_PARTS`, in selection order.
    selected: Vec<usize>,
    responses: BodyLanguage,
}

impl Embodiment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_parts(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.selected.iter().map(|&index| BODY_PARTS[index])
    }

    pub fn responses(&self) -> &BodyLanguage {
        &self.responses
    }
}

impl ModuleActivity for Embodiment {
    fn module(&self) -> ModuleId {
        ModuleId::Embodiment
    }

    fn reset(&mut self) {
        *self = Self::new();
    }

    fn handle(&mut self, interaction: Interaction) -> bool {
        let Interaction::Select(index) = interaction else {
            return false;
        };
        if index >= BODY_PARTS.len() {
            return false;
        }
        match self.selected.iter().position(|&i| i == index) {
            Some(pos) => {
                self.selected.remove(pos);
            }
            None => self.selected.push(index),
        }
        true
    }

    fn text_slots(&self) -> usize {
        QUESTIONS.len()
    }

    fn prompt(&self, slot: usize, context: &PromptContext) -> Option<ModalRequest> {
        let (label, question) = QUESTIONS.get(slot)?;
        let current = self.responses.slot(slot)?;
        let placeholder = if context.presentation.age_group == AgeGroup::Teen {
            "Listen to what your body is telling you..."
        } else {
            "Write your thoughts..."
        };
        Some(
            ModalRequest::new(*label)
                .with_guidance(*question)
                .with_placeholder(placeholder)
                .with_initial_value(current.clone()),
        )
    }

    fn apply_text(&mut self, slot: usize, text: String) -> bool {
        match self.responses.slot_mut(slot) {
            Some(field) => store_text(field, text),
            None => false,
        }
    }

    fn can_complete(&self, _policy: &CompletionPolicy) -> bool {
        self.responses.answered() == QUESTIONS.len()
    }

    fn answers(&self) -> ModuleAnswers {
        ModuleAnswers::Embodiment {
            body_location: self.selected_parts().collect::<Vec<_>>().join(", "),
            body_language: self.responses.clone(),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
