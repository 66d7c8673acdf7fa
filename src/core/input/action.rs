//=========================================================================
// Action Trait & Input Context
//=========================================================================
//
// Actions: opaque identifiers routed by the engine, interpreted by scenes.
// Contexts: separate binding sets for separate screens (hub vs module).
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt::Debug;
use std::hash::Hash;

//=== Action Trait ========================================================

/// Marker trait for game-defined action enums.
///
/// Actions are mapped from raw input by [`super::InputSystem`] and
/// published on the message bus once per tick.
pub trait Action: 'static + Send + Copy + Eq + Hash + Debug {}

//=== InputContext ========================================================

/// Identifies which set of input bindings is currently active.
///
/// The same key can mean different things on different screens, e.g.
/// a letter key picks an emotion in the hub but toggles a body part in
/// a module. Raw queries on the state tracker ignore the context.
///
/// Scenes request a switch by pushing an `InputContext` onto the
/// message bus. The switch is applied after the scene update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputContext {
    /// Default context.
    #[default]
    Primary,

    /// User-defined context.
    Custom(u32),
}

impl InputContext {
    #[inline]
    pub const fn custom(id: u32) -> Self {
        Self::Custom(id)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
