//=========================================================================
// Module 2: Memory Constellation
//=========================================================================
//
// The player places a star for each memory inside the constellation
// zone, then writes the associations those memories bring up.
//
//=========================================================================

use super::policy::{is_answered, CompletionPolicy};
use super::{store_text, Interaction, ModuleActivity, ModuleAnswers, ModuleId, PromptContext};
use crate::game::config::Zone;
use crate::game::modal::ModalRequest;

//=== MemoryConstellation =================================================

#[derive(Debug, Clone, PartialEq)]
pub struct MemoryConstellation {
    zone: Zone,
    stars: Vec<(f32, f32)>,
    associations: String,
}

impl MemoryConstellation {
    pub fn new(zone: Zone) -> Self {
        Self {
            zone,
            stars: Vec::new(),
            associations: String::new(),
        }
    }

    /// Placed stars in placement order.
    pub fn stars(&self) -> &[(f32, f32)] {
        &self.stars
    }
}

impl ModuleActivity for MemoryConstellation {
    fn module(&self) -> ModuleId {
        ModuleId::MemoryConstellation
    }

    fn reset(&mut self) {
        self.stars.clear();
        self.associations.clear();
    }

    fn handle(&mut self, interaction: Interaction) -> bool {
        match interaction {
            Interaction::Place { x, y } if self.zone.contains(x, y) => {
                self.stars.push((x, y));
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
            ModalRequest::new("Memory Associations")
                .with_guidance(context.presentation.module(ModuleId::MemoryConstellation).instructions)
                .with_placeholder(format!("What do your {} memories have in common?", self.stars.len()))
                .with_initial_value(self.associations.clone())
        })
    }

    fn apply_text(&mut self, slot: usize, text: String) -> bool {
        slot == 0 && store_text(&mut self.associations, text)
    }

    fn can_complete(&self, policy: &CompletionPolicy) -> bool {
        self.stars.len() >= policy.min_memories && is_answered(&self.associations)
    }

    fn answers(&self) -> ModuleAnswers {
        ModuleAnswers::MemoryConstellation {
            memory_count: self.stars.len(),
            memory_associations: self.associations.clone(),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
