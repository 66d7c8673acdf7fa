//=========================================================================
// Emotion Explorer: Library Root
//
// Control core for a guided emotion-exploration game.
//
// Responsibilities:
// - Expose the runtime (`Engine`, `EngineBuilder`)
// - Expose the scene, input and message systems in `core`
// - Expose the journey itself (hub, modules, progress, modal bridge)
//   in `game`
// - Keep the winit integration in `platform` private
//
// Typical usage:
// ```no_run
// use emotion_explorer::game::{self, config::JourneyConfig, profile::SharedProfile};
//
// let (engine, handles) = game::launch(JourneyConfig::new(), SharedProfile::new());
// engine.run();
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the engine systems: input mapping, message bus, scenes,
// fades and the frame clock.
//
// `game` builds the journey on top of them.
//
pub mod core;
pub mod game;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` owns the OS window and event loop. `engine` wires the
// platform and core threads together.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder};
