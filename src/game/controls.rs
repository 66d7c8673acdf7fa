//=========================================================================
// Journey Controls
//=========================================================================
//
// Actions and default key bindings for the journey.
//
// Two input contexts are used:
//   MODULE_CONTEXT (Primary) : inside a module scene
//   HUB_CONTEXT (Custom 0)   : emotion picker
//
// Letter keys pick an emotion in the hub but toggle items inside a
// module, which is why the hub has its own context.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::input::{Action, InputContext, InputSystem, KeyCode, MouseButton};

//=== JourneyAction =======================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JourneyAction {
    /// Complete the module if its predicate holds.
    Continue,
    /// Close the active dialog, or leave the module for the hub.
    Dismiss,
    /// Open the dialog for text slot `n` (zero-based).
    Write(u8),
    /// Primary click at the pointer position.
    Place,
    /// Toggle or reveal item `n`.
    Select(u8),
    Raise,
    Lower,
    Breathe,
    /// Pick emotion `n` in the hub catalogue.
    Choose(u8),
}

impl Action for JourneyAction {}

//=== Contexts ============================================================

pub const MODULE_CONTEXT: InputContext = InputContext::Primary;
pub const HUB_CONTEXT: InputContext = InputContext::Custom(0);

//=== Bindings ============================================================

/// Installs the default bindings for both contexts.
pub fn bind_journey_controls(input: &mut InputSystem<JourneyAction>) {
    //--- Module -----------------------------------------------------------
    input.bind_key(KeyCode::Enter, JourneyAction::Continue, MODULE_CONTEXT);
    input.bind_key(KeyCode::Escape, JourneyAction::Dismiss, MODULE_CONTEXT);
    input.bind_key(KeyCode::Space, JourneyAction::Breathe, MODULE_CONTEXT);
    input.bind_key(KeyCode::ArrowUp, JourneyAction::Raise, MODULE_CONTEXT);
    input.bind_key(KeyCode::ArrowRight, JourneyAction::Raise, MODULE_CONTEXT);
    input.bind_key(KeyCode::ArrowDown, JourneyAction::Lower, MODULE_CONTEXT);
    input.bind_key(KeyCode::ArrowLeft, JourneyAction::Lower, MODULE_CONTEXT);
    input.bind_mouse(MouseButton::Left, JourneyAction::Place, MODULE_CONTEXT);

    for (slot, key) in (0u8..).zip(KeyCode::DIGITS) {
        input.bind_key(key, JourneyAction::Write(slot), MODULE_CONTEXT);
    }
    for (item, key) in (0u8..).zip(KeyCode::LETTERS.into_iter().take(8)) {
        input.bind_key(key, JourneyAction::Select(item), MODULE_CONTEXT);
    }

    //--- Hub --------------------------------------------------------------
    for (emotion, key) in (0u8..).zip(KeyCode::LETTERS.into_iter().take(16)) {
        input.bind_key(key, JourneyAction::Choose(emotion), HUB_CONTEXT);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{InputEvent, Modifiers, StateTracker};

    fn press(input: &mut InputSystem<JourneyAction>, key: KeyCode) -> Vec<JourneyAction> {
        let mut state = StateTracker::new();
        let down = InputEvent::KeyDown { key, modifiers: Modifiers::NONE };
        input.process_frame(&mut state, &[vec![down]]);
        input.actions().to_vec()
    }

    #[test]
    fn letters_depend_on_context() {
        let mut input = InputSystem::new();
        bind_journey_controls(&mut input);

        assert_eq!(press(&mut input, KeyCode::KeyC), vec![JourneyAction::Select(2)]);
        assert!(press(&mut input, KeyCode::KeyM).is_empty());

        input.set_context(HUB_CONTEXT);
        assert_eq!(press(&mut input, KeyCode::KeyC), vec![JourneyAction::Choose(2)]);
        assert_eq!(press(&mut input, KeyCode::KeyP), vec![JourneyAction::Choose(15)]);
        assert!(press(&mut input, KeyCode::Enter).is_empty());
    }

    #[test]
    fn digits_open_text_slots() {
        let mut input = InputSystem::new();
        bind_journey_controls(&mut input);
        assert_eq!(press(&mut input, KeyCode::Digit1), vec![JourneyAction::Write(0)]);
        assert_eq!(press(&mut input, KeyCode::Digit5), vec![JourneyAction::Write(4)]);
    }
}
