//=========================================================================
// Scene Manager
//=========================================================================
//
// Manages scene registration, stack operations, and lifecycle.
//
// Scenes are stored in a HashMap by key and referenced via a stack
// of keys. This allows scenes to maintain state between activations.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use super::Scene;
use crate::core::globals::GlobalContext;

//=== Scene Transition ====================================================

/// Encapsulates scene stack operations.
///
/// Transitions are queued on [`GlobalContext::scene_transitions`] and
/// applied by the manager at the tick boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SceneTransition<K: SceneKey> {
    /// Adds a new scene to the top of the stack.
    Push(K),

    /// Removes a specific scene from the stack by key.
    Remove(K),

    /// Replaces a specific scene with another scene.
    Replace(K, K),

    /// Clears all scenes from the stack.
    Clear,

    /// No transition occurs.
    #[default]
    Empty,
}

//=== Scene Key Trait =====================================================

/// Marker trait for scene identifiers.
///
/// Scene keys uniquely identify scenes in the SceneManager's HashMap.
/// Typically implemented by game-specific enums.
pub trait SceneKey: Clone + Copy + Eq + Hash + Debug + Send + 'static {}

//=== Scene Manager =======================================================

/// Manages scene lifecycle and stack-based scene switching.
///
/// Scenes are registered once and referenced by key. The scene stack
/// determines which scenes are active, with the topmost scene receiving
/// input priority.
pub struct SceneManager<S: SceneKey> {
    scenes: HashMap<S, Box<dyn Scene<S>>>,
    stack: Vec<S>,
}

impl<S: SceneKey> SceneManager<S> {
    //--- Construction -----------------------------------------------------

    /// Creates a new scene manager with an empty stack.
    pub fn new() -> Self {
        Self {
            scenes: HashMap::new(),
            stack: Vec::new(),
        }
    }

    //--- Registration -----------------------------------------------------

    /// Registers a scene with the manager.
    ///
    /// Scenes must be registered before being pushed to the stack.
    /// Registering the same key twice replaces the earlier scene.
    pub fn register_scene<T>(&mut self, key: S, scene: T)
    where
        T: Scene<S> + 'static,
    {
        if self.scenes.insert(key, Box::new(scene)).is_some() {
            warn!(target: "scene", "Scene {:?} was already registered and has been replaced", key);
        }
    }

    /// Registers a scene and places it on the stack as the starting scene.
    ///
    /// `on_enter` is deferred until [`SceneManager::start`].
    pub fn register_default<T>(&mut self, key: S, scene: T)
    where
        T: Scene<S> + 'static,
    {
        self.register_scene(key, scene);

        if self.stack.contains(&key) {
            warn!(target: "scene", "Scene {:?} is already in the stack", key);
        } else {
            debug!(target: "scene", "Registered scene {:?} as default", key);
            self.stack.push(key);
        }
    }

    /// Calls `on_enter` on the scenes placed by `register_default`.
    pub fn start(&mut self, context: &mut GlobalContext<S>) {
        let initial: Vec<S> = self.stack.clone();
        for key in initial {
            info!(target: "scene", "Starting scene {:?}", key);
            match self.scenes.get_mut(&key) {
                Some(scene) => scene.on_enter(context),
                None => warn!(target: "scene", "Initial scene {:?} not registered", key),
            }
        }
    }

    //--- Queries ----------------------------------------------------------

    /// Returns the topmost scene key, if any.
    pub fn active(&self) -> Option<S> {
        self.stack.last().copied()
    }

    /// Returns the current stack, bottom first.
    pub fn stack(&self) -> &[S] {
        &self.stack
    }

    pub fn is_registered(&self, key: S) -> bool {
        self.scenes.contains_key(&key)
    }

    //--- Update Loop ------------------------------------------------------

    /// Updates all transparent scenes and the topmost opaque scene.
    pub fn update(&mut self, context: &mut GlobalContext<S>) {
        if self.stack.is_empty() {
            return;
        }

        for key in self.collect_active_scenes() {
            if let Some(scene) = self.scenes.get_mut(&key) {
                scene.update(context);
            }
        }
    }

    //--- Transition Processing --------------------------------------------

    /// Applies every transition queued this tick, in FIFO order.
    ///
    /// Transitions queued from inside `on_enter`/`on_exit` are left for
    /// the next tick boundary.
    pub fn process_transitions(&mut self, context: &mut GlobalContext<S>) {
        for transition in context.scene_transitions.take() {
            match transition {
                SceneTransition::Push(key) => self.push_internal(key, context),
                SceneTransition::Remove(key) => self.remove_internal(key, context),
                SceneTransition::Replace(old_key, new_key) => {
                    self.replace_internal(old_key, new_key, context)
                }
                SceneTransition::Clear => self.clear_internal(context),
                SceneTransition::Empty => {}
            }
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn push_internal(&mut self, key: S, context: &mut GlobalContext<S>) {
        if self.stack.contains(&key) {
            warn!(target: "scene", "Scene {:?} is already in the stack, skipping push", key);
            return;
        }

        let Some(scene) = self.scenes.get_mut(&key) else {
            warn!(target: "scene", "Attempted to push unregistered scene {:?}", key);
            return;
        };

        debug!(target: "scene", "Pushing scene {:?} onto stack", key);
        self.stack.push(key);
        scene.on_enter(context);
    }

    fn remove_internal(&mut self, key: S, context: &mut GlobalContext<S>) {
        let Some(pos) = self.stack.iter().position(|&k| k == key) else {
            debug!(target: "scene", "Scene {:?} not found in stack, skipping removal", key);
            return;
        };

        debug!(target: "scene", "Removing scene {:?} from stack at position {}", key, pos);
        self.stack.remove(pos);

        if let Some(scene) = self.scenes.get_mut(&key) {
            scene.on_exit(context);
        }
    }

    fn replace_internal(&mut self, old_key: S, new_key: S, context: &mut GlobalContext<S>) {
        let Some(pos) = self.stack.iter().position(|&k| k == old_key) else {
            warn!(target: "scene", "Scene {:?} not found in stack, skipping replacement", old_key);
            return;
        };

        if self.stack.contains(&new_key) {
            warn!(target: "scene", "Scene {:?} is already in the stack, skipping replacement", new_key);
            return;
        }

        if !self.scenes.contains_key(&new_key) {
            warn!(target: "scene", "Attempted to replace with unregistered scene {:?}", new_key);
            return;
        }

        info!(target: "scene", "Replacing scene {:?} with {:?}", old_key, new_key);

        if let Some(scene) = self.scenes.get_mut(&old_key) {
            scene.on_exit(context);
        }

        self.stack[pos] = new_key;

        if let Some(scene) = self.scenes.get_mut(&new_key) {
            scene.on_enter(context);
        }
    }

    fn clear_internal(&mut self, context: &mut GlobalContext<S>) {
        debug!(target: "scene", "Clearing all scenes from stack");

        for key in std::mem::take(&mut self.stack) {
            if let Some(scene) = self.scenes.get_mut(&key) {
                scene.on_exit(context);
            }
        }
    }

    fn collect_active_scenes(&self) -> Vec<S> {
        let mut active = Vec::new();

        // Top-down, stop at first opaque scene
        for &key in self.stack.iter().rev() {
            active.insert(0, key);

            if let Some(scene) = self.scenes.get(&key) {
                if !scene.is_transparent() {
                    break;
                }
            }
        }

        active
    }
}

impl<S: SceneKey> Default for SceneManager<S> {
    fn default() -> Self {
        Self::new()
    }
}

//=== Tests ===============================================================
