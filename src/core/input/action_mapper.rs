//=========================================================================
// Action Mapper
//=========================================================================
//
// Maps raw input events to game actions based on bindings and context.
//
// Architecture:
//   (key/button, modifiers, context) → HashMap → Action
//
// Only bindings in the active context resolve to actions.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

//=== Internal Dependencies ===============================================

use super::{
    action::{Action, InputContext},
    event::{InputEvent, KeyCode, Modifiers, MouseButton},
};

//=== ActionMapper ========================================================

pub(crate) struct ActionMapper<A: Action> {
    key_bindings: HashMap<(KeyCode, Modifiers, InputContext), A>,
    mouse_bindings: HashMap<(MouseButton, Modifiers, InputContext), A>,
    current_context: InputContext,
}

impl<A: Action> ActionMapper<A> {
    /// Creates a mapper with Primary context active and no bindings.
    pub(crate) fn new() -> Self {
        Self {
            key_bindings: HashMap::new(),
            mouse_bindings: HashMap::new(),
            current_context: InputContext::Primary,
        }
    }

    //--- Binding API ------------------------------------------------------

    pub(crate) fn bind_key_with_mods(
        &mut self,
        key: KeyCode,
        modifiers: Modifiers,
        action: A,
        context: InputContext,
    ) {
        self.key_bindings.insert((key, modifiers, context), action);
    }

    pub(crate) fn bind_mouse_with_mods(
        &mut self,
        button: MouseButton,
        modifiers: Modifiers,
        action: A,
        context: InputContext,
    ) {
        self.mouse_bindings.insert((button, modifiers, context), action);
    }

    /// Removes every key binding for `key` in `context`, any modifiers.
    pub(crate) fn unbind_key(&mut self, key: KeyCode, context: InputContext) {
        self.key_bindings.retain(|&(k, _, ctx), _| !(k == key && ctx == context));
    }

    /// Clears all bindings for a context.
    pub(crate) fn clear_context(&mut self, context: InputContext) {
        self.key_bindings.retain(|&(_, _, ctx), _| ctx != context);
        self.mouse_bindings.retain(|&(_, _, ctx), _| ctx != context);
    }

    //--- Event Mapping ----------------------------------------------------

    /// Maps a press event to an action in the active context.
    ///
    /// Releases and pointer movement never produce actions.
    pub(crate) fn map_event(&self, event: &InputEvent) -> Option<A> {
        match event {
            InputEvent::KeyDown { key, modifiers } => self
                .key_bindings
                .get(&(*key, *modifiers, self.current_context))
                .copied(),
            InputEvent::MouseButtonDown { button, modifiers } => self
                .mouse_bindings
                .get(&(*button, *modifiers, self.current_context))
                .copied(),
            _ => None,
        }
    }

    //--- Context ----------------------------------------------------------

    pub(crate) fn set_context(&mut self, context: InputContext) {
        self.current_context = context;
    }

    pub(crate) fn current_context(&self) -> InputContext {
        self.current_context
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
        Choose,
        Place,
    }

    impl Action for TestAction {}

    const HUB: InputContext = InputContext::custom(0);

    fn key_down(key: KeyCode) -> InputEvent {
        InputEvent::KeyDown { key, modifiers: Modifiers::NONE }
    }

    #[test]
    fn bound_key_maps_in_active_context() {
        let mut mapper = ActionMapper::new();
        mapper.bind_key_with_mods(KeyCode::Enter, Modifiers::NONE, TestAction::Continue, InputContext::Primary);

        assert_eq!(mapper.map_event(&key_down(KeyCode::Enter)), Some(TestAction::Continue));
        assert_eq!(mapper.map_event(&key_down(KeyCode::Space)), None);
    }

    #[test]
    fn same_key_differs_per_context() {
        let mut mapper = ActionMapper::new();
        mapper.bind_key_with_mods(KeyCode::KeyA, Modifiers::NONE, TestAction::Continue, InputContext::Primary);
        mapper.bind_key_with_mods(KeyCode::KeyA, Modifiers::NONE, TestAction::Choose, HUB);

        assert_eq!(mapper.map_event(&key_down(KeyCode::KeyA)), Some(TestAction::Continue));

        mapper.set_context(HUB);
        assert_eq!(mapper.current_context(), HUB);
        assert_eq!(mapper.map_event(&key_down(KeyCode::KeyA)), Some(TestAction::Choose));
    }

    #[test]
    fn modifiers_must_match_exactly() {
        let mut mapper = ActionMapper::new();
        mapper.bind_key_with_mods(KeyCode::Enter, Modifiers::CTRL, TestAction::Continue, InputContext::Primary);

        assert_eq!(mapper.map_event(&key_down(KeyCode::Enter)), None);
        let ctrl_enter = InputEvent::KeyDown { key: KeyCode::Enter, modifiers: Modifiers::CTRL };
        assert_eq!(mapper.map_event(&ctrl_enter), Some(TestAction::Continue));
    }

    #[test]
    fn mouse_press_maps_but_release_does_not() {
        let mut mapper = ActionMapper::new();
        mapper.bind_mouse_with_mods(MouseButton::Left, Modifiers::NONE, TestAction::Place, InputContext::Primary);

        let down = InputEvent::MouseButtonDown { button: MouseButton::Left, modifiers: Modifiers::NONE };
        let up = InputEvent::MouseButtonUp { button: MouseButton::Left, modifiers: Modifiers::NONE };
        assert_eq!(mapper.map_event(&down), Some(TestAction::Place));
        assert_eq!(mapper.map_event(&up), None);
    }

    #[test]
    fn unbind_and_clear_context() {
        let mut mapper = ActionMapper::new();
        mapper.bind_key_with_mods(KeyCode::KeyA, Modifiers::NONE, TestAction::Choose, HUB);
        mapper.bind_key_with_mods(KeyCode::KeyA, Modifiers::SHIFT, TestAction::Choose, HUB);
        mapper.bind_key_with_mods(KeyCode::KeyB, Modifiers::NONE, TestAction::Choose, HUB);
        mapper.set_context(HUB);

        mapper.unbind_key(KeyCode::KeyA, HUB);
        assert_eq!(mapper.map_event(&key_down(KeyCode::KeyA)), None);
        assert_eq!(mapper.map_event(&key_down(KeyCode::KeyB)), Some(TestAction::Choose));

        mapper.clear_context(HUB);
        assert_eq!(mapper.map_event(&key_down(KeyCode::KeyB)), None);
    }
}
