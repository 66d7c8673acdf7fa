//=========================================================================
// Module State Machine
//=========================================================================
//
// The nine journey modules, their answer records and the completion
// action that moves a session forward.
//
// Architecture:
// ```text
//   Module(1) ─> Module(2) ─> ... ─> Module(9) ─> Complete
//       │            │                   │
//   ModuleActivity (interactions, text slots, predicate, answers)
//       │
//   complete_module() ── predicate holds ──> ProgressStore::complete_module
// ```
//
// The machine is linear and forward-only. Each interactive module is a
// `ModuleActivity` hosted by `ModuleScene`. Module 8 is completed by an
// external collaborator and is hosted by `WisdomTreeScene` instead.
//
//=========================================================================

//=== Module Declarations =================================================

mod awakening;
mod cathartic_falls;
mod embodiment;
mod emotional_compass;
mod memory_constellation;
mod mirror_portal;
mod policy;
mod ripple_pool;
mod scene;
mod speaking_stone;
mod wisdom_tree;

//=== Public API ==========================================================

pub use awakening::Awakening;
pub use cathartic_falls::{BreathPhase, CatharticFalls};
pub use embodiment::{BodyLanguage, Embodiment, BODY_PARTS};
pub use emotional_compass::{EmotionalCompass, TRIGGERS};
pub use memory_constellation::MemoryConstellation;
pub use mirror_portal::{MirrorPortal, PERSPECTIVES};
pub use policy::{word_count, CompletionPolicy, Elaboration};
pub use ripple_pool::{Ripple, RipplePool, DEFAULT_INTENTION};
pub use scene::ModuleScene;
pub use speaking_stone::SpeakingStone;
pub use wisdom_tree::{ExternalModuleReport, ExternalModuleSender, ReportError, WisdomTreeScene};

//=== External Dependencies ===============================================

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use super::emotion::EmotionId;
use super::modal::ModalRequest;
use super::progress::{ProgressError, ProgressHandle};
use super::theme::Presentation;

//=== ModuleId ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModuleId {
    Awakening,
    MemoryConstellation,
    Embodiment,
    SpeakingStone,
    MirrorPortal,
    CatharticFalls,
    EmotionalCompass,
    WisdomTree,
    RipplePool,
}

impl ModuleId {
    pub const ALL: [ModuleId; 9] = [
        ModuleId::Awakening,
        ModuleId::MemoryConstellation,
        ModuleId::Embodiment,
        ModuleId::SpeakingStone,
        ModuleId::MirrorPortal,
        ModuleId::CatharticFalls,
        ModuleId::EmotionalCompass,
        ModuleId::WisdomTree,
        ModuleId::RipplePool,
    ];

    /// Position in the journey, 1 to 9.
    pub fn number(self) -> u8 {
        match self {
            ModuleId::Awakening => 1,
            ModuleId::MemoryConstellation => 2,
            ModuleId::Embodiment => 3,
            ModuleId::SpeakingStone => 4,
            ModuleId::MirrorPortal => 5,
            ModuleId::CatharticFalls => 6,
            ModuleId::EmotionalCompass => 7,
            ModuleId::WisdomTree => 8,
            ModuleId::RipplePool => 9,
        }
    }

    pub fn from_number(number: u8) -> Option<ModuleId> {
        Self::ALL.get(usize::from(number).checked_sub(1)?).copied()
    }

    /// Stage reached after completing this module.
    pub fn next(self) -> Stage {
        match Self::from_number(self.number() + 1) {
            Some(module) => Stage::Module(module),
            None => Stage::Complete,
        }
    }

    /// Name used by the companion when describing where the player is.
    pub fn companion_label(self) -> &'static str {
        match self {
            ModuleId::Awakening => "The Awakening Circle (Mood Meter)",
            ModuleId::MemoryConstellation => "The Memory Constellation (Associations)",
            ModuleId::Embodiment => "The Reflection Mirror (Body Awareness)",
            ModuleId::SpeakingStone => "The Speaking Stone (Letter Writing)",
            ModuleId::MirrorPortal => "The Mirror Portal (Reverse Letter)",
            ModuleId::CatharticFalls => "The Cathartic Falls (Breathing & Journal)",
            ModuleId::EmotionalCompass => "The Emotional Compass (Trajectories)",
            ModuleId::WisdomTree => "The Wisdom Tree (Integration)",
            ModuleId::RipplePool => "The Ripple Pool (Intentions)",
        }
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "module {} ({:?})", self.number(), self)
    }
}

//=== Stage ===============================================================

/// Where a session stands: inside a module or finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Module(ModuleId),
    Complete,
}

impl Stage {
    /// 1 to 9 for modules, 10 once complete.
    pub fn number(self) -> u8 {
        match self {
            Stage::Module(module) => module.number(),
            Stage::Complete => 10,
        }
    }

    pub fn module(self) -> Option<ModuleId> {
        match self {
            Stage::Module(module) => Some(module),
            Stage::Complete => None,
        }
    }
}

impl Default for Stage {
    fn default() -> Self {
        Stage::Module(ModuleId::Awakening)
    }
}

//=== Answer Records ======================================================

/// Answers collected by one module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleAnswers {
    Awakening {
        intensity: u8,
        intensity_description: String,
    },
    MemoryConstellation {
        memory_count: usize,
        memory_associations: String,
    },
    Embodiment {
        /// Selected body parts joined with ", ".
        body_location: String,
        body_language: BodyLanguage,
    },
    SpeakingStone {
        letter: String,
        word_count: usize,
    },
    MirrorPortal {
        perspective_choice: String,
        reverse_letter: String,
    },
    CatharticFalls {
        breath_cycles: u32,
        journal_entry: String,
    },
    EmotionalCompass {
        triggers: Vec<String>,
        trajectory_past: String,
        trajectory_present: String,
        trajectory_future: String,
    },
    /// Opaque fields reported by the external collaborator.
    WisdomTree {
        fields: BTreeMap<String, String>,
    },
    RipplePool {
        ripples: usize,
        synthesis_insights: String,
        intention: String,
    },
}

impl ModuleAnswers {
    /// Module this answer set belongs to.
    pub fn module(&self) -> ModuleId {
        match self {
            ModuleAnswers::Awakening { .. } => ModuleId::Awakening,
            ModuleAnswers::MemoryConstellation { .. } => ModuleId::MemoryConstellation,
            ModuleAnswers::Embodiment { .. } => ModuleId::Embodiment,
            ModuleAnswers::SpeakingStone { .. } => ModuleId::SpeakingStone,
            ModuleAnswers::MirrorPortal { .. } => ModuleId::MirrorPortal,
            ModuleAnswers::CatharticFalls { .. } => ModuleId::CatharticFalls,
            ModuleAnswers::EmotionalCompass { .. } => ModuleId::EmotionalCompass,
            ModuleAnswers::WisdomTree { .. } => ModuleId::WisdomTree,
            ModuleAnswers::RipplePool { .. } => ModuleId::RipplePool,
        }
    }
}

/// Stored result of a completed module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleRecord {
    pub emotion_selected: EmotionId,
    pub answers: ModuleAnswers,
}

//=== ModuleActivity ======================================================

/// Pointer and key interactions a module can receive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Interaction {
    /// Primary click at window coordinates.
    Place { x: f32, y: f32 },
    /// Toggle or reveal item `i`.
    Select(usize),
    Raise,
    Lower,
    Breathe,
}

/// Read-only context for building dialog requests.
#[derive(Debug, Clone, Copy)]
pub struct PromptContext {
    pub emotion: EmotionId,
    pub presentation: Presentation,
    pub policy: CompletionPolicy,
}

/// The interactive half of a module scene.
///
/// Free text arrives through numbered slots: the scene asks for
/// `prompt(slot)`, shows it through the modal bridge and hands the
/// submitted text back to `apply_text(slot)`. Blank text leaves the slot
/// unchanged.
pub trait ModuleActivity: Send + 'static {
    fn module(&self) -> ModuleId;

    /// Clears all collected state. Called on every scene entry.
    fn reset(&mut self);

    /// Applies one interaction. Returns `true` if state changed.
    fn handle(&mut self, _interaction: Interaction) -> bool {
        false
    }

    /// Advances time-driven state.
    fn tick(&mut self, _delta: Duration) {}

    fn text_slots(&self) -> usize;

    /// Dialog request for `slot`, or `None` if the slot is unavailable.
    fn prompt(&self, slot: usize, context: &PromptContext) -> Option<ModalRequest>;

    /// Stores submitted text. Returns `true` if the slot changed.
    fn apply_text(&mut self, slot: usize, text: String) -> bool;

    fn can_complete(&self, policy: &CompletionPolicy) -> bool;

    fn answers(&self) -> ModuleAnswers;
}

/// Stores `text` in `field` unless it is blank. Returns `true` on change.
pub(crate) fn store_text(field: &mut String, text: String) -> bool {
    if !policy::is_answered(&text) || *field == text {
        return false;
    }
    *field = text;
    true
}

//=== Completion ==========================================================

/// Outcome of the completion action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Answers were stored and the session advanced to `next`.
    Recorded { next: Stage },
    /// The predicate does not hold. Nothing was written.
    NotReady,
    /// The store refused the record.
    Failed(ProgressError),
}

/// Checks the predicate, then records the answers and advances the stage.
pub fn complete_module(
    activity: &dyn ModuleActivity,
    emotion: EmotionId,
    policy: &CompletionPolicy,
    progress: &ProgressHandle,
) -> Completion {
    let module = activity.module();

    if !activity.can_complete(policy) {
        debug!(target: "journey", "{} not ready to complete", module);
        return Completion::NotReady;
    }

    let record = ModuleRecord {
        emotion_selected: emotion,
        answers: activity.answers(),
    };

    match progress.complete_module(module, record) {
        Ok(next) => {
            info!(target: "journey", "Completed {} for '{}', next stage {}", module, emotion, next.number());
            Completion::Recorded { next }
        }
        Err(e) => {
            warn!(target: "journey", "Could not record {}: {}", module, e);
            Completion::Failed(e)
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
