//=========================================================================
// Global Context
//=========================================================================
//
// Shared data container for scenes.
//
// Contains state data that scenes read/write:
// - input_state: Low-level input state (keys, mouse, modifiers)
// - message_bus: This tick's actions and scene requests
// - scene_transitions: Command queue for scene changes
// - clock: Fixed-step frame time
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::input::{InputEvent, StateTracker};
use crate::core::message_bus::MessageBus;
use crate::core::scene::{SceneKey, TransitionQueue};
use crate::core::time::FrameClock;

//=== GlobalContext =======================================================

/// Shared context data accessible to scenes during updates.
///
/// Separates scene-accessible data from the systems that own logic.
pub struct GlobalContext<S: SceneKey> {
    /// Raw input state for queries that have no action binding.
    pub input_state: StateTracker,

    /// Per-type message queues. Mapped actions are republished here
    /// every tick.
    pub message_bus: MessageBus,

    /// Scenes queue transitions here. The scene manager applies them at
    /// the tick boundary.
    pub scene_transitions: TransitionQueue<S>,

    /// Fixed-step clock, advanced before systems update.
    pub clock: FrameClock,

    /// Input batches received this tick. Consumed by the input system.
    pub(crate) frame_events: Vec<Vec<InputEvent>>,
}

impl<S: SceneKey> GlobalContext<S> {
    /// Creates a new context with empty state.
    pub(crate) fn new() -> Self {
        Self {
            input_state: StateTracker::new(),
            message_bus: MessageBus::new(),
            scene_transitions: TransitionQueue::new(),
            clock: FrameClock::new(),
            frame_events: Vec::new(),
        }
    }
}
