//=========================================================================
// Scene System
//=========================================================================
//
// Manages scene lifecycle and stack-based scene switching.
//
// Architecture:
//   SceneManager
//     ├─ scenes: HashMap<S, Box<dyn Scene<S>>>
//     └─ stack: Vec<S>
//
// Flow:
//   update() → collect_active_scenes() → Scene::update()
//   process_transitions() → on_exit()/on_enter() at tick boundary
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::globals::GlobalContext;

//=== Module Declarations =================================================

mod fade;
mod scene_manager;
mod transition_queue;

//=== Public API ==========================================================

pub use fade::{Fade, FadeEvent};
pub use scene_manager::{SceneKey, SceneManager, SceneTransition};
pub use transition_queue::TransitionQueue;

//=== Scene Trait =========================================================

/// Defines scene behavior with lifecycle hooks and update logic.
///
/// Scenes are registered in SceneManager and activated via the scene
/// stack. A scene instance persists between activations, so `on_enter`
/// is responsible for resetting whatever state must not carry over.
///
/// Scenes get mutable access to the shared context: they read actions
/// from the message bus, read the frame clock, and queue transitions.
pub trait Scene<S: SceneKey>: Send {
    /// Called when scene enters the active stack.
    fn on_enter(&mut self, _context: &mut GlobalContext<S>) {}

    /// Called when scene exits the active stack.
    fn on_exit(&mut self, _context: &mut GlobalContext<S>) {}

    /// Called every tick while scene is active on stack.
    fn update(&mut self, context: &mut GlobalContext<S>);

    /// Whether scenes below this one should receive updates.
    ///
    /// Transparent scenes (e.g., overlays) allow underlying scenes
    /// to continue updating. Opaque scenes block updates to lower stack.
    fn is_transparent(&self) -> bool {
        false
    }
}
