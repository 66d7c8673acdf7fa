//=========================================================================
// Module 4: Speaking Stone
//=========================================================================
//
// One expressive letter, gated on a minimum word count.
//
//=========================================================================

use super::policy::{word_count, CompletionPolicy};
use super::{store_text, ModuleActivity, ModuleAnswers, ModuleId, PromptContext};
use crate::game::modal::ModalRequest;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpeakingStone {
    letter: String,
}

impl SpeakingStone {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn word_count(&self) -> usize {
        word_count(&self.letter)
    }

    /// Words still needed before the letter counts.
    pub fn words_remaining(&self, policy: &CompletionPolicy) -> usize {
        policy.letter_min_words.saturating_sub(self.word_count())
    }
}

impl ModuleActivity for SpeakingStone {
    fn module(&self) -> ModuleId {
        ModuleId::SpeakingStone
    }

    fn reset(&mut self) {
        self.letter.clear();
    }

    fn text_slots(&self) -> usize {
        1
    }

    fn prompt(&self, slot: usize, context: &PromptContext) -> Option<ModalRequest> {
        (slot == 0).then(|| {
            ModalRequest::new(format!("Express Your {} Emotion", context.emotion.display_name()))
                .with_guidance(context.presentation.module(ModuleId::SpeakingStone).instructions)
                .with_placeholder("Dear ...")
                .with_initial_value(self.letter.clone())
                .with_min_words(context.policy.letter_min_words)
        })
    }

    fn apply_text(&mut self, slot: usize, text: String) -> bool {
        slot == 0 && store_text(&mut self.letter, text)
    }

    fn can_complete(&self, policy: &CompletionPolicy) -> bool {
        self.word_count() >= policy.letter_min_words
    }

    fn answers(&self) -> ModuleAnswers {
        ModuleAnswers::SpeakingStone {
            letter: self.letter.clone(),
            word_count: self.word_count(),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
