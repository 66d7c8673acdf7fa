//=========================================================================
// Core Systems Orchestrator
//
// Central coordinator for all engine subsystems running on the logic
// (non-platform) thread.
//
// Responsibilities:
// - Own GlobalSystems (input, scenes) and GlobalContext (shared data)
// - Receive platform events over the crossbeam channel
// - Advance the frame clock and tick systems at a fixed rate (TPS)
//
// Notes:
// The orchestrator runs independently from the platform layer. All game
// scenes live here. Other threads (dialog UI, external collaborators)
// reach them only through the thread-safe handles the game layer hands
// out, never by touching the orchestrator.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod globals;
pub mod input;
pub mod message_bus;
pub(crate) mod platform_bridge;
pub mod scene;
pub mod time;

//=== Public API ==========================================================

pub use globals::{GlobalContext, GlobalSystems};
pub use input::{Action, InputContext};
pub use scene::{Scene, SceneKey, SceneTransition};

//=== External Dependencies ===============================================

use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;
use log::{debug, info};

//=== Internal Dependencies ===============================================

use input::InputEvent;
use platform_bridge::{EventCollector, PlatformEvent, TickControl};

//=== CoreSystemsOrchestrator =============================================

/// Owns the logic-thread state and drives it one tick at a time.
pub(crate) struct CoreSystemsOrchestrator<S: SceneKey, A: Action> {
    systems: GlobalSystems<S, A>,
    context: GlobalContext<S>,
}

impl<S: SceneKey, A: Action> CoreSystemsOrchestrator<S, A> {
    //--- Construction -----------------------------------------------------

    /// Creates all core systems but does not start the logic thread.
    pub(crate) fn new() -> Self {
        Self {
            systems: GlobalSystems::new(),
            context: GlobalContext::new(),
        }
    }

    /// Gives the application one-time access to the systems.
    pub(crate) fn init_systems<F>(&mut self, init_fn: F)
    where
        F: FnOnce(&mut GlobalSystems<S, A>),
    {
        init_fn(&mut self.systems);
    }

    //--- Tick -------------------------------------------------------------

    /// Runs one fixed step: hand over input, advance time, update systems.
    pub(crate) fn tick(&mut self, batches: Vec<Vec<InputEvent>>, delta: Duration) {
        self.context.frame_events = batches;
        self.context.clock.advance(delta);
        self.systems.update(&mut self.context);
    }

    //--- spawn_core_thread() ---------------------------------------------

    /// Spawns the logic thread, ticking at `tps` until the platform
    /// closes the window or drops the sender.
    pub(crate) fn spawn_core_thread(
        mut self,
        receiver: Receiver<PlatformEvent>,
        tps: f64,
    ) -> thread::JoinHandle<()> {
        let frame_duration = Duration::from_secs_f64(1.0 / tps);

        thread::spawn(move || {
            let mut collector = EventCollector::new(receiver);
            info!("Core thread running at {} TPS", tps);

            loop {
                let frame_start = Instant::now();

                //--- Step 1: Gather platform events ------------------------
                if collector.collect_frame() == TickControl::Exit {
                    info!("Core thread exiting");
                    break;
                }

                //--- Step 2: Update systems --------------------------------
                self.tick(collector.take_batches(), frame_duration);

                //--- Step 3: Maintain fixed pacing -------------------------
                let elapsed = frame_start.elapsed();
                if elapsed < frame_duration {
                    thread::sleep(frame_duration - elapsed);
                } else {
                    debug!("Tick overran budget by {:?}", elapsed - frame_duration);
                }
            }
        })
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn systems(&self) -> &GlobalSystems<S, A> {
        &self.systems
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{KeyCode, Modifiers};
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Key {
        Main,
    }

    impl SceneKey for Key {}

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Act {
        Continue,
    }

    impl Action for Act {}

    struct Counter {
        seen: Arc<Mutex<Vec<(u64, usize)>>>,
    }

    impl Scene<Key> for Counter {
        fn update(&mut self, ctx: &mut GlobalContext<Key>) {
            let actions = ctx.message_bus.read::<Act>().len();
            self.seen.lock().unwrap().push((ctx.clock.frame(), actions));
        }
    }

    #[test]
    fn tick_advances_clock_and_publishes_actions() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut orchestrator = CoreSystemsOrchestrator::<Key, Act>::new();
        orchestrator.init_systems(|systems| {
            systems.input.bind_key(KeyCode::Enter, Act::Continue, InputContext::Primary);
            systems.scene_manager.register_default(Key::Main, Counter { seen: Arc::clone(&seen) });
        });

        let enter = InputEvent::KeyDown { key: KeyCode::Enter, modifiers: Modifiers::NONE };
        orchestrator.tick(vec![vec![enter]], Duration::from_millis(16));
        orchestrator.tick(Vec::new(), Duration::from_millis(16));

        assert_eq!(*seen.lock().unwrap(), vec![(1, 1), (2, 0)]);
        assert_eq!(orchestrator.systems().scene_manager.active(), Some(Key::Main));
    }

    #[test]
    fn core_thread_stops_on_window_closed() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let orchestrator = CoreSystemsOrchestrator::<Key, Act>::new();
        let handle = orchestrator.spawn_core_thread(rx, 240.0);

        tx.send(PlatformEvent::WindowClosed).unwrap();

        assert!(handle.join().is_ok());
    }
}
