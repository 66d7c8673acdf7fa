//=========================================================================
// State Tracker
//=========================================================================
//
// Low-level input state with per-frame deltas.
//
// Architecture:
//   InputEvent → process_events() → HashSet (keys/buttons held) → query
//
// Frame lifecycle: clear() → process_events() → finalize_frame() → query
//
// Scenes use this for raw queries that are not worth an action binding,
// mostly the pointer position when a `Place` action fires.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

//=== Internal Dependencies ===============================================

use super::event::{InputEvent, KeyCode, Modifiers, MouseButton};

//=== StateTracker ========================================================

/// Tracks held keys/buttons and the keys pressed or released this frame.
#[derive(Debug, Default)]
pub struct StateTracker {
    //--- Persistent State ------------------------------------------------
    keys_down: HashSet<KeyCode>,
    buttons_down: HashSet<MouseButton>,
    mouse_position: (f32, f32),
    modifiers: Modifiers,

    //--- Frame Deltas ----------------------------------------------------
    keys_pressed: HashSet<KeyCode>,
    keys_released: HashSet<KeyCode>,
    buttons_pressed: HashSet<MouseButton>,
    buttons_released: HashSet<MouseButton>,
    mouse_delta: (f32, f32),
    last_mouse_position: (f32, f32),
}

impl StateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Frame Processing -------------------------------------------------

    /// Clears frame-specific deltas.
    pub(super) fn clear(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.buttons_pressed.clear();
        self.buttons_released.clear();
        self.last_mouse_position = self.mouse_position;
    }

    pub(super) fn process_events(&mut self, events: &[InputEvent]) {
        for event in events {
            self.process_event(event);
        }
    }

    /// Computes the mouse delta for the frame.
    pub(super) fn finalize_frame(&mut self) {
        self.mouse_delta = (
            self.mouse_position.0 - self.last_mouse_position.0,
            self.mouse_position.1 - self.last_mouse_position.1,
        );
    }

    fn process_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::KeyDown { key, modifiers } => {
                self.modifiers = *modifiers;
                // Auto-repeat does not count as a new press
                if self.keys_down.insert(*key) {
                    self.keys_pressed.insert(*key);
                }
            }
            InputEvent::KeyUp { key, modifiers } => {
                self.modifiers = *modifiers;
                if self.keys_down.remove(key) {
                    self.keys_released.insert(*key);
                }
            }
            InputEvent::MouseButtonDown { button, modifiers } => {
                self.modifiers = *modifiers;
                if self.buttons_down.insert(*button) {
                    self.buttons_pressed.insert(*button);
                }
            }
            InputEvent::MouseButtonUp { button, modifiers } => {
                self.modifiers = *modifiers;
                if self.buttons_down.remove(button) {
                    self.buttons_released.insert(*button);
                }
            }
            InputEvent::MouseMoved { x, y } => {
                self.mouse_position = (*x, *y);
            }
            InputEvent::Unidentified => {}
        }
    }

    //--- Keyboard ---------------------------------------------------------

    /// `true` only on the frame the key went down.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// `true` while the key is held.
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// `true` only on the frame the key went up.
    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.keys_released.contains(&key)
    }

    //--- Mouse ------------------------------------------------------------

    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.buttons_pressed.contains(&button)
    }

    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }

    pub fn is_button_released(&self, button: MouseButton) -> bool {
        self.buttons_released.contains(&button)
    }

    /// Pointer position in window pixels, top-left origin.
    pub fn mouse_position(&self) -> (f32, f32) {
        self.mouse_position
    }

    pub fn mouse_delta(&self) -> (f32, f32) {
        self.mouse_delta
    }

    //--- Modifiers --------------------------------------------------------

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn key_down(key: KeyCode) -> InputEvent {
        InputEvent::KeyDown { key, modifiers: Modifiers::NONE }
    }

    fn key_up(key: KeyCode) -> InputEvent {
        InputEvent::KeyUp { key, modifiers: Modifiers::NONE }
    }

    fn frame(tracker: &mut StateTracker, events: &[InputEvent]) {
        tracker.clear();
        tracker.process_events(events);
        tracker.finalize_frame();
    }

    #[test]
    fn key_pressed_only_on_transition_frame() {
        let mut tracker = StateTracker::new();

        frame(&mut tracker, &[key_down(KeyCode::Enter)]);
        assert!(tracker.is_key_pressed(KeyCode::Enter));
        assert!(tracker.is_key_down(KeyCode::Enter));

        frame(&mut tracker, &[]);
        assert!(!tracker.is_key_pressed(KeyCode::Enter));
        assert!(tracker.is_key_down(KeyCode::Enter));

        frame(&mut tracker, &[key_up(KeyCode::Enter)]);
        assert!(tracker.is_key_released(KeyCode::Enter));
        assert!(!tracker.is_key_down(KeyCode::Enter));
    }

    #[test]
    fn repeated_key_down_is_not_a_new_press() {
        let mut tracker = StateTracker::new();
        frame(&mut tracker, &[key_down(KeyCode::Space)]);
        frame(&mut tracker, &[key_down(KeyCode::Space)]);

        assert!(!tracker.is_key_pressed(KeyCode::Space));
        assert!(tracker.is_key_down(KeyCode::Space));
    }

    #[test]
    fn fast_tap_captures_both_transitions() {
        let mut tracker = StateTracker::new();
        frame(&mut tracker, &[key_down(KeyCode::KeyA), key_up(KeyCode::KeyA)]);

        assert!(tracker.is_key_pressed(KeyCode::KeyA));
        assert!(tracker.is_key_released(KeyCode::KeyA));
        assert!(!tracker.is_key_down(KeyCode::KeyA));
    }

    #[test]
    fn mouse_position_and_delta() {
        let mut tracker = StateTracker::new();
        frame(&mut tracker, &[InputEvent::MouseMoved { x: 100.0, y: 100.0 }]);
        frame(&mut tracker, &[InputEvent::MouseMoved { x: 150.0, y: 120.0 }]);

        assert_eq!(tracker.mouse_position(), (150.0, 120.0));
        assert_eq!(tracker.mouse_delta(), (50.0, 20.0));

        frame(&mut tracker, &[]);
        assert_eq!(tracker.mouse_delta(), (0.0, 0.0));
    }

    #[test]
    fn button_press_and_release() {
        let mut tracker = StateTracker::new();
        let down = InputEvent::MouseButtonDown { button: MouseButton::Left, modifiers: Modifiers::NONE };
        let up = InputEvent::MouseButtonUp { button: MouseButton::Left, modifiers: Modifiers::NONE };

        frame(&mut tracker, &[down]);
        assert!(tracker.is_button_pressed(MouseButton::Left));

        frame(&mut tracker, &[up]);
        assert!(tracker.is_button_released(MouseButton::Left));
        assert!(!tracker.is_button_down(MouseButton::Left));
    }

    #[test]
    fn modifiers_follow_latest_event() {
        let mut tracker = StateTracker::new();
        frame(&mut tracker, &[InputEvent::KeyDown { key: KeyCode::KeyS, modifiers: Modifiers::CTRL }]);
        assert_eq!(tracker.modifiers(), Modifiers::CTRL);
    }
}
