//=========================================================================
// Input System
//
// Turns each tick's raw platform events into tracked input state and
// high-level actions.
//
// Architecture:
// ```text
//   frame_events ──> StateTracker (held / pressed / released, pointer)
//        │
//        └──> ActionMapper (active InputContext) ──> actions: Vec<A>
// ```
//
// The system is owned by GlobalSystems. Actions are republished on the
// message bus every tick, so scenes only ever see the current frame's.
//
//=========================================================================

//=== Module Declarations =================================================

mod action;
mod action_mapper;
pub mod event;
mod state_tracker;

//=== Public API ==========================================================

pub use action::{Action, InputContext};
pub use event::{InputEvent, KeyCode, Modifiers, MouseButton};
pub use state_tracker::StateTracker;

//=== External Dependencies ===============================================

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use action_mapper::ActionMapper;

//=== InputSystem =========================================================

/// High-level input system with context-aware action bindings.
pub struct InputSystem<A: Action> {
    mapper: ActionMapper<A>,
    actions: Vec<A>,
}

impl<A: Action> InputSystem<A> {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        Self {
            mapper: ActionMapper::new(),
            actions: Vec::new(),
        }
    }

    //--- Binding API ------------------------------------------------------

    /// Binds a key (no modifiers) to an action in `context`.
    pub fn bind_key(&mut self, key: KeyCode, action: A, context: InputContext) {
        self.mapper.bind_key_with_mods(key, Modifiers::NONE, action, context);
    }

    /// Binds a key chord to an action in `context`.
    pub fn bind_key_with_mods(
        &mut self,
        key: KeyCode,
        modifiers: Modifiers,
        action: A,
        context: InputContext,
    ) {
        self.mapper.bind_key_with_mods(key, modifiers, action, context);
    }

    /// Binds a mouse button (no modifiers) to an action in `context`.
    pub fn bind_mouse(&mut self, button: MouseButton, action: A, context: InputContext) {
        self.mapper.bind_mouse_with_mods(button, Modifiers::NONE, action, context);
    }

    pub fn unbind_key(&mut self, key: KeyCode, context: InputContext) {
        self.mapper.unbind_key(key, context);
    }

    pub fn clear_context(&mut self, context: InputContext) {
        self.mapper.clear_context(context);
    }

    //--- Context ----------------------------------------------------------

    pub fn set_context(&mut self, context: InputContext) {
        if self.mapper.current_context() != context {
            debug!(target: "input", "Input context switched to {:?}", context);
            self.mapper.set_context(context);
        }
    }

    pub fn context(&self) -> InputContext {
        self.mapper.current_context()
    }

    //--- Frame Processing -------------------------------------------------

    /// Applies one tick's worth of event batches.
    ///
    /// Updates `state` and rebuilds the action list for this tick.
    pub(crate) fn process_frame(&mut self, state: &mut StateTracker, batches: &[Vec<InputEvent>]) {
        self.actions.clear();
        state.clear();

        for batch in batches {
            state.process_events(batch);
            self.actions
                .extend(batch.iter().filter_map(|event| self.mapper.map_event(event)));
        }

        state.finalize_frame();

        if !self.actions.is_empty() {
            trace!(target: "input", "Mapped actions: {:?}", self.actions);
        }
    }

    /// Actions mapped during the last processed frame, in input order.
    pub fn actions(&self) -> &[A] {
        &self.actions
    }
}

impl<A: Action> Default for InputSystem<A> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestAction {
        Continue,
        Place,
        Choose,
    }

    impl Action for TestAction {}

    fn key_down(key: KeyCode) -> InputEvent {
        InputEvent::KeyDown { key, modifiers: Modifiers::NONE }
    }

    #[test]
    fn actions_follow_input_order_across_batches() {
        let mut input = InputSystem::new();
        let mut state = StateTracker::new();
        input.bind_key(KeyCode::Enter, TestAction::Continue, InputContext::Primary);
        input.bind_mouse(MouseButton::Left, TestAction::Place, InputContext::Primary);

        let click = InputEvent::MouseButtonDown { button: MouseButton::Left, modifiers: Modifiers::NONE };
        input.process_frame(&mut state, &[vec![click], vec![key_down(KeyCode::Enter)]]);

        assert_eq!(input.actions(), &[TestAction::Place, TestAction::Continue]);
        assert!(state.is_key_pressed(KeyCode::Enter));
    }

    #[test]
    fn actions_reset_each_frame() {
        let mut input = InputSystem::new();
        let mut state = StateTracker::new();
        input.bind_key(KeyCode::Enter, TestAction::Continue, InputContext::Primary);

        input.process_frame(&mut state, &[vec![key_down(KeyCode::Enter)]]);
        input.process_frame(&mut state, &[]);

        assert!(input.actions().is_empty());
    }

    #[test]
    fn context_switch_changes_mapping() {
        let hub = InputContext::custom(0);
        let mut input = InputSystem::new();
        let mut state = StateTracker::new();
        input.bind_key(KeyCode::KeyA, TestAction::Choose, hub);

        input.process_frame(&mut state, &[vec![key_down(KeyCode::KeyA)]]);
        assert!(input.actions().is_empty());

        input.set_context(hub);
        let release = InputEvent::KeyUp { key: KeyCode::KeyA, modifiers: Modifiers::NONE };
        input.process_frame(&mut state, &[vec![release, key_down(KeyCode::KeyA)]]);
        assert_eq!(input.actions(), &[TestAction::Choose]);
    }
}
