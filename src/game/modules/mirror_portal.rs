//=========================================================================
// Module 5: Mirror Portal
//=========================================================================
//
// Four perspective cards the player can reveal, and a reverse letter
// written from someone else's point of view. Only the letter gates
// completion.
//
//=========================================================================

use super::policy::{word_count, CompletionPolicy};
use super::{store_text, Interaction, ModuleActivity, ModuleAnswers, ModuleId, PromptContext};
use crate::game::modal::ModalRequest;

//=== Perspectives ========================================================

/// A card's (id, question, reframe).
pub const PERSPECTIVES: [(&str, &str, &str); 4] = [
    (
        "friend",
        "What would a caring friend say?",
        "This feeling shows how much you care. It is okay to feel it, and you are stronger than you think.",
    ),
    (
        "future",
        "How will I feel about this in a week?",
        "This intensity will pass. Time and distance change how things look, and I can handle this.",
    ),
    (
        "lesson",
        "What can I learn from this?",
        "This emotion points at something that matters to me. Every feeling carries some wisdom.",
    ),
    (
        "growth",
        "How is this helping me grow?",
        "Living through this builds my capacity. I am becoming more resilient and more self-aware.",
    ),
];

//=== MirrorPortal ========================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MirrorPortal {
    revealed: [bool; 4],
    reverse_letter: String,
}

impl MirrorPortal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed.iter().filter(|&&shown| shown).count()
    }

    pub fn is_revealed(&self, card: usize) -> bool {
        self.revealed.get(card).copied().unwrap_or(false)
    }
}

impl ModuleActivity for MirrorPortal {
    fn module(&self) -> ModuleId {
        ModuleId::MirrorPortal
    }

    fn reset(&mut self) {
        *self = Self::new();
    }

    /// `Select(i)` reveals card `i`. Cards stay revealed.
    fn handle(&mut self, interaction: Interaction) -> bool {
        let Interaction::Select(card) = interaction else {
            return false;
        };
        match self.revealed.get_mut(card) {
            Some(shown) if !*shown => {
                *shown = true;
                true
            }
            _ => false,
        }
    }

    fn text_slots(&self) -> usize {
        1
    }

    fn prompt(&self, slot: usize, context: &PromptContext) -> Option<ModalRequest> {
        (slot == 0).then(|| {
            ModalRequest::new("The Mirror Portal")
                .with_guidance(context.presentation.module(ModuleId::MirrorPortal).instructions)
                .with_placeholder("Write as them, to yourself...")
                .with_initial_value(self.reverse_letter.clone())
                .with_min_words(context.policy.reverse_letter_min_words)
        })
    }

    fn apply_text(&mut self, slot: usize, text: String) -> bool {
        slot == 0 && store_text(&mut self.reverse_letter, text)
    }

    fn can_complete(&self, policy: &CompletionPolicy) -> bool {
        word_count(&self.reverse_letter) >= policy.reverse_letter_min_words
    }

    fn answers(&self) -> ModuleAnswers {
        ModuleAnswers::MirrorPortal {
            perspective_choice: format!("Explored {} perspectives", self.revealed_count()),
            reverse_letter: self.reverse_letter.clone(),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
