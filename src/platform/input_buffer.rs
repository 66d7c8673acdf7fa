//=========================================================================
// Input Buffer
//
// Per-redraw store for input collected by the platform thread.
//
// Responsibilities:
// - Keep discrete inputs (keys, buttons) in arrival order
// - Drop immediate duplicates (key auto-repeat floods)
// - Coalesce continuous inputs so only the last pointer position is sent
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::collections::HashSet;

//=== Internal Modules ====================================================

use crate::core::input::InputEvent;

//=== InputBuffer =========================================================

pub(crate) struct InputBuffer {
    discrete: Vec<InputEvent>,
    continuous: HashSet<InputEvent>,
}

impl InputBuffer {
    pub(crate) fn new() -> Self {
        Self {
            discrete: Vec::with_capacity(32),
            continuous: HashSet::with_capacity(4),
        }
    }

    /// Replaces any earlier event of the same kind.
    pub(crate) fn push_continuous(&mut self, event: InputEvent) {
        self.continuous.replace(event);
    }

    /// Appends an event unless it repeats the previous one.
    pub(crate) fn push_discrete(&mut self, event: InputEvent) {
        if self.discrete.last() != Some(&event) {
            self.discrete.push(event);
        }
    }

    /// Takes both halves, or `None` when nothing was buffered.
    pub(crate) fn drain(&mut self) -> Option<(Vec<InputEvent>, Vec<InputEvent>)> {
        if self.is_empty() {
            return None;
        }
        let discrete = std::mem::take(&mut self.discrete);
        let continuous = self.continuous.drain().collect();
        Some((discrete, continuous))
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.discrete.is_empty() && self.continuous.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{KeyCode, Modifiers};

    fn key_down(key: KeyCode) -> InputEvent {
        InputEvent::KeyDown { key, modifiers: Modifiers::NONE }
    }

    #[test]
    fn immediate_duplicates_are_dropped() {
        let mut buffer = InputBuffer::new();
        buffer.push_discrete(key_down(KeyCode::Space));
        buffer.push_discrete(key_down(KeyCode::Space));
        buffer.push_discrete(key_down(KeyCode::Enter));
        buffer.push_discrete(key_down(KeyCode::Space));

        let (discrete, _) = buffer.drain().unwrap();
        assert_eq!(discrete.len(), 3);
    }

    #[test]
    fn pointer_moves_keep_last_position() {
        let mut buffer = InputBuffer::new();
        buffer.push_continuous(InputEvent::MouseMoved { x: 10.0, y: 10.0 });
        buffer.push_continuous(InputEvent::MouseMoved { x: 20.0, y: 30.0 });

        let (_, continuous) = buffer.drain().unwrap();
        match continuous.as_slice() {
            [InputEvent::MouseMoved { x, y }] => assert_eq!((*x, *y), (20.0, 30.0)),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn drain_empties_buffer() {
        let mut buffer = InputBuffer::new();
        assert!(buffer.drain().is_none());

        buffer.push_discrete(key_down(KeyCode::KeyA));
        assert!(buffer.drain().is_some());
        assert!(buffer.is_empty());
        assert!(buffer.drain().is_none());
    }
}
