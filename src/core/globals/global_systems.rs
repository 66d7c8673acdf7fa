//=========================================================================
// Global Systems
//=========================================================================
//
// Container for engine-level systems with logic.
//
// Contains systems that process input, manage scenes, and coordinate
// game logic. Systems operate on GlobalContext data.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::GlobalContext;
use crate::core::input::{Action, InputContext, InputSystem};
use crate::core::scene::{SceneKey, SceneManager};

//=== GlobalSystems =======================================================

/// Container for engine-level logic systems.
///
/// # Available Systems
///
/// - `input`: Input system with context-aware action mapping
/// - `scene_manager`: Stack-based scene lifecycle manager
pub struct GlobalSystems<S: SceneKey, A: Action> {
    pub input: InputSystem<A>,
    pub scene_manager: SceneManager<S>,
    started: bool,
}

impl<S: SceneKey, A: Action> GlobalSystems<S, A> {
    /// Creates a new systems container with default-initialized systems.
    ///
    /// Access from applications goes through [`crate::Engine::init`].
    pub(crate) fn new() -> Self {
        Self {
            input: InputSystem::new(),
            scene_manager: SceneManager::new(),
            started: false,
        }
    }

    //--- Update Loop ------------------------------------------------------

    /// Updates all engine systems for the current tick.
    ///
    /// # Processing Pipeline
    ///
    /// 1. **Start**: Enters the default scenes on the first tick
    /// 2. **Input Processing**: Converts platform events to state and actions
    /// 3. **Action Publishing**: Clears stale actions, publishes fresh ones
    /// 4. **Scene Update**: Updates active scenes
    /// 5. **Context Switches**: Applies `InputContext` requests from scenes
    /// 6. **Transition Processing**: Applies queued scene transitions
    pub(crate) fn update(&mut self, context: &mut GlobalContext<S>) {
        if !self.started {
            self.started = true;
            self.scene_manager.start(context);
            self.apply_context_switches(context);
        }

        let batches = std::mem::take(&mut context.frame_events);
        self.input.process_frame(&mut context.input_state, &batches);

        context.message_bus.clear::<A>();
        for action in self.input.actions() {
            context.message_bus.push(*action);
        }

        self.scene_manager.update(context);
        self.apply_context_switches(context);

        self.scene_manager.process_transitions(context);
        self.apply_context_switches(context);
    }

    fn apply_context_switches(&mut self, context: &mut GlobalContext<S>) {
        // Last request wins
        if let Some(requested) = context.message_bus.drain::<InputContext>().pop() {
            self.input.set_context(requested);
        }
    }
}
