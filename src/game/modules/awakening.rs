//=========================================================================
// Module 1: Awakening
//=========================================================================
//
// Intensity slider (0 to 10, starting at 5) with optional or required
// written elaboration.
//
//=========================================================================

use super::policy::{word_count, CompletionPolicy, Elaboration};
use super::{store_text, Interaction, ModuleActivity, ModuleAnswers, ModuleId, PromptContext};
use crate::game::modal::ModalRequest;

//=== Constants ===========================================================

const DEFAULT_INTENSITY: u8 = 5;
const MAX_INTENSITY: u8 = 10;

const LABELS: [&str; 11] = [
    "None",
    "Barely There",
    "Slight",
    "Mild",
    "Noticeable",
    "Moderate",
    "Strong",
    "Very Strong",
    "Intense",
    "Overwhelming",
    "Extreme",
];

//=== Awakening ===========================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Awakening {
    intensity: u8,
    description: String,
}

impl Awakening {
    pub fn new() -> Self {
        Self {
            intensity: DEFAULT_INTENSITY,
            description: String::new(),
        }
    }

    pub fn intensity(&self) -> u8 {
        self.intensity
    }

    /// Word label for the current slider position.
    pub fn label(&self) -> &'static str {
        LABELS[usize::from(self.intensity.min(MAX_INTENSITY))]
    }

    /// Slider fill as a percentage.
    pub fn percent(&self) -> u8 {
        self.intensity * 10
    }
}

impl Default for Awakening {
    fn default() -> Self {
        Self::new()
    }
}

impl ModuleActivity for Awakening {
    fn module(&self) -> ModuleId {
        ModuleId::Awakening
    }

    fn reset(&mut self) {
        *self = Self::new();
    }

    fn handle(&mut self, interaction: Interaction) -> bool {
        let before = self.intensity;
        match interaction {
            Interaction::Raise => self.intensity = (self.intensity + 1).min(MAX_INTENSITY),
            Interaction::Lower => self.intensity = self.intensity.saturating_sub(1),
            _ => {}
        }
        before != self.intensity
    }

    fn text_slots(&self) -> usize {
        1
    }

    fn prompt(&self, slot: usize, context: &PromptContext) -> Option<ModalRequest> {
        if slot != 0 {
            return None;
        }
        let request = ModalRequest::new("Describe Your Intensity")
            .with_guidance(context.presentation.module(ModuleId::Awakening).instructions)
            .with_placeholder(format!(
                "How does {} at {}% show up in your day?",
                context.emotion,
                self.percent()
            ))
            .with_initial_value(self.description.clone());
        Some(match context.policy.awakening_elaboration {
            Elaboration::Required { min_words } => request.with_min_words(min_words),
            Elaboration::Optional => request,
        })
    }

    fn apply_text(&mut self, slot: usize, text: String) -> bool {
        slot == 0 && store_text(&mut self.description, text)
    }

    fn can_complete(&self, policy: &CompletionPolicy) -> bool {
        match policy.awakening_elaboration {
            Elaboration::Optional => true,
            Elaboration::Required { min_words } => word_count(&self.description) >= min_words,
        }
    }

    fn answers(&self) -> ModuleAnswers {
        let intensity_description = if self.description.trim().is_empty() {
            self.label().to_string()
        } else {
            self.description.clone()
        };
        ModuleAnswers::Awakening {
            intensity: self.intensity,
            intensity_description,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::emotion::EmotionId;
    use crate::game::theme::Presentation;

    #[test]
    fn slider_is_clamped() {
        let mut awakening = Awakening::new();
        assert_eq!((awakening.intensity(), awakening.label()), (5, "Moderate"));

        for _ in 0..20 {
            awakening.handle(Interaction::Raise);
        }
        assert_eq!((awakening.intensity(), awakening.label()), (10, "Extreme"));
        assert!(!awakening.handle(Interaction::Raise));

        for _ in 0..20 {
            awakening.handle(Interaction::Lower);
        }
        assert_eq!((awakening.intensity(), awakening.label()), (0, "None"));
    }

    #[test]
    fn required_elaboration_blocks_until_written() {
        let policy = CompletionPolicy::default();
        let mut awakening = Awakening::new();
        assert!(!awakening.can_complete(&policy));

        awakening.apply_text(0, "tight".into());
        assert!(awakening.can_complete(&policy));
    }

    #[test]
    fn optional_elaboration_records_label() {
        let policy = CompletionPolicy::default().with_awakening_elaboration(Elaboration::Optional);
        let mut awakening = Awakening::new();
        awakening.handle(Interaction::Raise);

        assert!(awakening.can_complete(&policy));
        assert_eq!(
            awakening.answers(),
            ModuleAnswers::Awakening { intensity: 6, intensity_description: "Strong".into() }
        );
    }

    #[test]
    fn prompt_hint_follows_elaboration_policy() {
        let mut context = PromptContext {
            emotion: EmotionId::Nervous,
            presentation: Presentation::resolve(None),
            policy: CompletionPolicy::default(),
        };
        let awakening = Awakening::new();
        assert_eq!(awakening.prompt(0, &context).unwrap().min_words, Some(1));

        context.policy = context
            .policy
            .with_awakening_elaboration(Elaboration::Required { min_words: 12 });
        assert_eq!(awakening.prompt(0, &context).unwrap().min_words, Some(12));

        context.policy = context.policy.with_awakening_elaboration(Elaboration::Optional);
        assert_eq!(awakening.prompt(0, &context).unwrap().min_words, None);
        assert!(awakening.prompt(1, &context).is_none());
    }

    #[test]
    fn reset_restores_defaults() {
        let mut awakening = Awakening::new();
        awakening.handle(Interaction::Lower);
        awakening.apply_text(0, "calm".into());
        awakening.reset();
        assert_eq!(awakening, Awakening::new());
    }
}
