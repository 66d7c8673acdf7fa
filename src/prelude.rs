//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use emotion_explorer::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine core
pub use crate::engine::{Engine, EngineBuilder};

// Global systems and context
pub use crate::core::globals::{GlobalContext, GlobalSystems};

// Input system
pub use crate::core::input::{Action, InputContext, KeyCode, Modifiers, MouseButton};

// Scene system
pub use crate::core::scene::{Fade, FadeEvent, Scene, SceneKey, SceneTransition};
pub use crate::core::time::{FrameClock, Timer};

// Message bus
pub use crate::core::message_bus::MessageBus;

// Journey
pub use crate::game::companion::{Companion, CompanionContext, CompanionService};
pub use crate::game::config::JourneyConfig;
pub use crate::game::controls::JourneyAction;
pub use crate::game::emotion::EmotionId;
pub use crate::game::hub::HubController;
pub use crate::game::modal::{ModalBridge, ModalOutcome, ModalRequest};
pub use crate::game::modules::{CompletionPolicy, ModuleAnswers, ModuleId, Stage};
pub use crate::game::profile::{AgeGroup, PlayerProfile, SharedProfile};
pub use crate::game::progress::ProgressHandle;
pub use crate::game::{launch, JourneyHandles, SceneId};
