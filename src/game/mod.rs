//=========================================================================
// Journey
//=========================================================================
//
// The emotion-exploration game built on the core scene system.
//
// Architecture:
// ```text
//   HubScene ── Choose(i) ──> ProgressStore::start_emotion_journey
//      │                              │
//      │ transition_after             ▼ Stage
//      ▼                       HubController::route
//   ModuleScene<Activity> ... WisdomTreeScene ... ModuleScene<RipplePool>
//      │          ▲                   ▲
//      │          │ PendingText       │ ExternalModuleReport
//      ▼          │                   │
//   ModalBridge <── UI layer      external collaborator
// ```
//
// Scenes run on the core thread. The UI layer and collaborators hold
// the handles in `JourneyHandles`.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod companion;
pub mod config;
pub mod controls;
pub mod emotion;
pub mod hub;
pub mod modal;
pub mod modules;
pub mod profile;
pub mod progress;
pub mod scene_base;
pub mod theme;

//=== External Dependencies ===============================================

use std::sync::Arc;

use log::info;

//=== Internal Dependencies ===============================================

use crate::core::{GlobalSystems, SceneKey};
use crate::engine::{Engine, EngineBuilder};

use config::JourneyConfig;
use controls::{bind_journey_controls, JourneyAction};
use hub::HubScene;
use modal::ModalBridge;
use modules::{
    Awakening, CatharticFalls, Embodiment, EmotionalCompass, ExternalModuleSender,
    MemoryConstellation, MirrorPortal, ModuleActivity, ModuleId, ModuleScene, RipplePool,
    SpeakingStone, WisdomTreeScene,
};
use profile::SharedProfile;
use progress::ProgressHandle;
use scene_base::SceneServices;

//=== SceneId =============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneId {
    Hub,
    Module(ModuleId),
}

impl SceneKey for SceneId {}

//=== Registration ========================================================

/// Binds the journey controls and registers the hub and all nine module
/// scenes. Returns the sender that completes module 8.
pub fn register_journey(
    systems: &mut GlobalSystems<SceneId, JourneyAction>,
    services: &SceneServices,
) -> ExternalModuleSender {
    let (wisdom_tree, sender) = WisdomTreeScene::new(services.clone());
    install(systems, services, wisdom_tree);
    sender
}

fn install(
    systems: &mut GlobalSystems<SceneId, JourneyAction>,
    services: &SceneServices,
    wisdom_tree: WisdomTreeScene,
) {
    bind_journey_controls(&mut systems.input);

    let config = &services.config;
    let policy = config.policy;
    let scenes = &mut systems.scene_manager;

    scenes.register_default(SceneId::Hub, HubScene::new(services.clone()));
    register_module(scenes, Awakening::new(), services);
    register_module(scenes, MemoryConstellation::new(config.constellation), services);
    register_module(scenes, Embodiment::new(), services);
    register_module(scenes, SpeakingStone::new(), services);
    register_module(scenes, MirrorPortal::new(), services);
    register_module(scenes, CatharticFalls::new(config.breath, policy.breath_cycles), services);
    register_module(scenes, EmotionalCompass::new(), services);
    scenes.register_scene(SceneId::Module(ModuleId::WisdomTree), wisdom_tree);
    register_module(scenes, RipplePool::new(config.ripple_pool, policy.ripples), services);

    info!(target: "journey", "Registered hub and {} module scenes", ModuleId::ALL.len());
}

fn register_module<A: ModuleActivity>(
    scenes: &mut crate::core::scene::SceneManager<SceneId>,
    activity: A,
    services: &SceneServices,
) {
    let key = SceneId::Module(activity.module());
    scenes.register_scene(key, ModuleScene::new(activity, services.clone()));
}

//=== Launch ==============================================================

/// Handles the UI layer and collaborators use while the engine runs.
#[derive(Clone)]
pub struct JourneyHandles {
    pub progress: ProgressHandle,
    pub modal: ModalBridge,
    pub profile: SharedProfile,
    pub module_reports: ExternalModuleSender,
}

/// Builds an engine with the whole journey registered.
///
/// ```no_run
/// use emotion_explorer::game::{self, config::JourneyConfig, profile::SharedProfile};
///
/// let (engine, handles) = game::launch(JourneyConfig::new(), SharedProfile::new());
/// // hand `handles.modal` to the dialog layer, then:
/// engine.run();
/// ```
pub fn launch(
    config: JourneyConfig,
    profile: SharedProfile,
) -> (Engine<SceneId, JourneyAction>, JourneyHandles) {
    let services = SceneServices::new(config, Arc::new(profile.clone()));
    let (wisdom_tree, module_reports) = WisdomTreeScene::new(services.clone());

    let handles = JourneyHandles {
        progress: services.progress.clone(),
        modal: services.modal.clone(),
        profile,
        module_reports,
    };

    let engine = EngineBuilder::new()
        .build()
        .init(move |systems| install(systems, &services, wisdom_tree));

    (engine, handles)
}

//=========================================================================
// Journey Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{InputEvent, KeyCode, Modifiers, MouseButton};
    use crate::core::GlobalContext;
    use emotion::EmotionId;
    use hub::HubController;
    use modules::{BodyLanguage, ExternalModuleReport, ModuleAnswers, Stage};
    use std::time::Duration;

    const TICK: Duration = Duration::from_millis(100);

    struct Harness {
        systems: GlobalSystems<SceneId, JourneyAction>,
        context: GlobalContext<SceneId>,
        services: SceneServices,
        reports: ExternalModuleSender,
    }

    impl Harness {
        fn new() -> Self {
            Self::with_config(JourneyConfig::new())
        }

        fn with_config(config: JourneyConfig) -> Self {
            let services = SceneServices::new(config, Arc::new(SharedProfile::new()));
            let mut systems = GlobalSystems::new();
            let reports = register_journey(&mut systems, &services);
            Self {
                systems,
                context: GlobalContext::new(),
                services,
                reports,
            }
        }

        //--- Driving ------------------------------------------------------

        fn step(&mut self, events: Vec<InputEvent>) {
            self.context.frame_events = vec![events];
            self.context.clock.advance(TICK);
            self.systems.update(&mut self.context);
        }

        fn idle(&mut self, ticks: usize) {
            for _ in 0..ticks {
                self.step(Vec::new());
            }
        }

        fn press(&mut self, key: KeyCode) {
            self.step(vec![
                InputEvent::KeyDown { key, modifiers: Modifiers::NONE },
                InputEvent::KeyUp { key, modifiers: Modifiers::NONE },
            ]);
        }

        fn click(&mut self, x: f32, y: f32) {
            let button = MouseButton::Left;
            self.step(vec![
                InputEvent::MouseMoved { x, y },
                InputEvent::MouseButtonDown { button, modifiers: Modifiers::NONE },
                InputEvent::MouseButtonUp { button, modifiers: Modifiers::NONE },
            ]);
        }

        /// Opens text slot `slot` and submits `text` as the dialog layer would.
        fn write(&mut self, slot: usize, text: &str) {
            self.press(KeyCode::DIGITS[slot]);
            let view = self.services.modal.current().expect("dialog should be open");
            assert!(self.services.modal.submit(view.id, text));
            self.idle(1);
        }

        fn choose(&mut self, emotion: EmotionId) {
            let index = HubController::catalog().iter().position(|&e| e == emotion).unwrap();
            self.press(KeyCode::LETTERS[index]);
        }

        /// Ticks until `scene` is active. Returns the number of ticks taken.
        fn wait_for(&mut self, scene: SceneId) -> usize {
            for ticks in 0..100 {
                if self.active() == Some(scene) {
                    return ticks;
                }
                self.idle(1);
            }
            panic!("{:?} never became active, still at {:?}", scene, self.active());
        }

        fn continue_to(&mut self, module: ModuleId) {
            self.press(KeyCode::Enter);
            self.wait_for(SceneId::Module(module));
        }

        //--- Queries ------------------------------------------------------

        fn active(&self) -> Option<SceneId> {
            self.systems.scene_manager.active()
        }

        fn recorded(&self, module: ModuleId) -> Option<ModuleAnswers> {
            let session = self.services.progress.current_session()?;
            session.answers.get(&module).map(|record| record.answers.clone())
        }
    }

    fn words(count: usize) -> String {
        (0..count).map(|i| format!("w{}", i)).collect::<Vec<_>>().join(" ")
    }

    fn at(module: ModuleId) -> SceneId {
        SceneId::Module(module)
    }

    //--- Full Journey -----------------------------------------------------

    #[test]
    fn joy_journey_completes_all_nine_modules() {
        let mut h = Harness::new();
        h.idle(1);
        assert_eq!(h.active(), Some(SceneId::Hub));

        h.choose(EmotionId::Joy);
        h.wait_for(at(ModuleId::Awakening));

        // 1: intensity 7 with a description
        h.press(KeyCode::ArrowUp);
        h.press(KeyCode::ArrowUp);
        h.write(0, "warm and bright");
        h.continue_to(ModuleId::MemoryConstellation);

        // 2: three stars inside the constellation zone
        h.click(500.0, 500.0);
        h.click(640.0, 550.0);
        h.click(800.0, 600.0);
        h.write(0, "summer and old friends");
        h.continue_to(ModuleId::Embodiment);

        // 3: two body parts and all five questions
        h.press(KeyCode::KeyA);
        h.press(KeyCode::KeyC);
        for (slot, answer) in ["chest", "light", "keep going", "more time", "dance"].iter().enumerate() {
            h.write(slot, answer);
        }
        h.continue_to(ModuleId::SpeakingStone);

        // 4: ten-word letter
        h.write(0, &words(10));
        h.continue_to(ModuleId::MirrorPortal);

        // 5: two perspectives and a thirty-word reverse letter
        h.press(KeyCode::KeyA);
        h.press(KeyCode::KeyB);
        h.write(0, &words(30));
        h.continue_to(ModuleId::CatharticFalls);

        // 6: three breathing cycles and a twenty-word journal
        h.press(KeyCode::Space);
        h.idle(460);
        h.write(0, &words(20));
        h.continue_to(ModuleId::EmotionalCompass);

        // 7: two triggers and three trajectories
        h.press(KeyCode::KeyA);
        h.press(KeyCode::KeyB);
        h.write(0, "since spring");
        h.write(1, "most mornings");
        h.write(2, "steady");
        h.continue_to(ModuleId::WisdomTree);

        // 8: reported by the collaborator
        let insight = ExternalModuleReport::new(EmotionId::Joy).with_field("wisdom_insight", "joy is shared");
        h.reports.report(insight).unwrap();
        h.wait_for(at(ModuleId::RipplePool));

        // 9: three ripples, default intention
        for _ in 0..3 {
            h.click(640.0, 520.0);
        }
        h.press(KeyCode::Enter);
        h.wait_for(SceneId::Hub);

        let session = h.services.progress.current_session().unwrap();
        assert_eq!(session.emotion_id, EmotionId::Joy);
        assert_eq!(session.current_module(), 10);
        assert!(session.is_complete());
        assert_eq!(session.answers.len(), 9);
        assert!(session.answers.values().all(|r| r.emotion_selected == EmotionId::Joy));

        assert_eq!(
            h.recorded(ModuleId::Awakening),
            Some(ModuleAnswers::Awakening { intensity: 7, intensity_description: "warm and bright".into() })
        );
        assert_eq!(
            h.recorded(ModuleId::MemoryConstellation),
            Some(ModuleAnswers::MemoryConstellation {
                memory_count: 3,
                memory_associations: "summer and old friends".into(),
            })
        );
        assert_eq!(
            h.recorded(ModuleId::Embodiment),
            Some(ModuleAnswers::Embodiment {
                body_location: "Head, Chest/Heart".into(),
                body_language: BodyLanguage {
                    where_feeling: "chest".into(),
                    what_feels_like: "light".into(),
                    if_could_talk: "keep going".into(),
                    if_could_ask: "more time".into(),
                    action_would_take: "dance".into(),
                },
            })
        );
        assert_eq!(
            h.recorded(ModuleId::SpeakingStone),
            Some(ModuleAnswers::SpeakingStone { letter: words(10), word_count: 10 })
        );
        assert_eq!(
            h.recorded(ModuleId::CatharticFalls),
            Some(ModuleAnswers::CatharticFalls { breath_cycles: 3, journal_entry: words(20) })
        );
        assert_eq!(
            h.recorded(ModuleId::EmotionalCompass),
            Some(ModuleAnswers::EmotionalCompass {
                triggers: vec!["social".into(), "work".into()],
                trajectory_past: "since spring".into(),
                trajectory_present: "most mornings".into(),
                trajectory_future: "steady".into(),
            })
        );
        assert_eq!(
            h.recorded(ModuleId::RipplePool),
            Some(ModuleAnswers::RipplePool {
                ripples: 3,
                synthesis_insights: "Completed 3 reflections".into(),
                intention: modules::DEFAULT_INTENTION.into(),
            })
        );
    }

    //--- Navigation -------------------------------------------------------

    #[test]
    fn hub_resumes_at_next_module() {
        let mut h = Harness::new();
        h.choose(EmotionId::Sad);
        h.wait_for(at(ModuleId::Awakening));
        h.write(0, "heavy");
        h.continue_to(ModuleId::MemoryConstellation);

        h.press(KeyCode::Escape);
        h.wait_for(SceneId::Hub);
        h.choose(EmotionId::Angry);
        h.wait_for(at(ModuleId::Awakening));
        h.press(KeyCode::Escape);
        h.wait_for(SceneId::Hub);

        h.choose(EmotionId::Sad);
        h.wait_for(at(ModuleId::MemoryConstellation));
        assert_eq!(h.services.progress.current_session().unwrap().current_module(), 2);
        assert_eq!(h.services.progress.sessions().len(), 2);
    }

    #[test]
    fn next_scene_enters_only_after_fade_out() {
        let mut h = Harness::new();
        h.choose(EmotionId::Joy);
        h.wait_for(at(ModuleId::Awakening));
        h.write(0, "fine");

        h.press(KeyCode::Enter);
        assert!(h.recorded(ModuleId::Awakening).is_some());
        // continue delay (6 ticks) then the fade-out (5 ticks)
        let ticks = h.wait_for(at(ModuleId::MemoryConstellation));
        assert_eq!(ticks, 11);
    }

    //--- Gating -----------------------------------------------------------

    #[test]
    fn constellation_needs_three_memories() {
        let mut h = Harness::new();
        h.choose(EmotionId::Lonely);
        h.wait_for(at(ModuleId::Awakening));
        h.write(0, "quiet");
        h.continue_to(ModuleId::MemoryConstellation);

        h.click(640.0, 550.0);
        h.click(700.0, 550.0);
        h.write(0, "empty rooms");
        h.press(KeyCode::Enter);
        h.idle(20);
        assert_eq!(h.recorded(ModuleId::MemoryConstellation), None);
        assert_eq!(h.active(), Some(at(ModuleId::MemoryConstellation)));

        // outside the zone does not count
        h.click(10.0, 10.0);
        h.press(KeyCode::Enter);
        assert_eq!(h.recorded(ModuleId::MemoryConstellation), None);

        h.click(600.0, 600.0);
        h.continue_to(ModuleId::Embodiment);
        assert_eq!(
            h.recorded(ModuleId::MemoryConstellation),
            Some(ModuleAnswers::MemoryConstellation {
                memory_count: 3,
                memory_associations: "empty rooms".into(),
            })
        );
    }

    #[test]
    fn speaking_stone_word_boundary() {
        let mut h = Harness::new();
        h.choose(EmotionId::Anxious);
        h.wait_for(at(ModuleId::Awakening));
        h.services.progress.skip_to(Stage::Module(ModuleId::SpeakingStone));
        h.press(KeyCode::Escape);
        h.wait_for(SceneId::Hub);
        h.choose(EmotionId::Anxious);
        h.wait_for(at(ModuleId::SpeakingStone));

        h.write(0, &words(9));
        h.press(KeyCode::Enter);
        h.idle(20);
        assert_eq!(h.recorded(ModuleId::SpeakingStone), None);

        h.write(0, &words(10));
        h.continue_to(ModuleId::MirrorPortal);
        assert_eq!(
            h.recorded(ModuleId::SpeakingStone),
            Some(ModuleAnswers::SpeakingStone { letter: words(10), word_count: 10 })
        );
    }

    #[test]
    fn cancelled_and_empty_dialogs_keep_previous_text() {
        let mut h = Harness::new();
        h.choose(EmotionId::Guilty);
        h.wait_for(at(ModuleId::Awakening));
        h.write(0, "sharp");

        // escape closes the dialog without touching the answer
        h.press(KeyCode::Digit1);
        assert!(h.services.modal.is_open());
        h.press(KeyCode::Escape);
        h.idle(1);
        assert!(!h.services.modal.is_open());
        assert_eq!(h.active(), Some(at(ModuleId::Awakening)));

        h.write(0, "");
        h.continue_to(ModuleId::MemoryConstellation);
        assert_eq!(
            h.recorded(ModuleId::Awakening),
            Some(ModuleAnswers::Awakening { intensity: 5, intensity_description: "sharp".into() })
        );
    }

    #[test]
    fn leaving_a_scene_sweeps_its_dialog() {
        let mut h = Harness::new();
        h.choose(EmotionId::Stuck);
        h.wait_for(at(ModuleId::Awakening));
        h.press(KeyCode::Digit1);
        assert!(h.services.modal.is_open());

        h.context.scene_transitions.push(crate::core::SceneTransition::Replace(
            at(ModuleId::Awakening),
            SceneId::Hub,
        ));
        h.systems.scene_manager.process_transitions(&mut h.context);

        assert_eq!(h.active(), Some(SceneId::Hub));
        assert!(!h.services.modal.is_open());
    }

    #[test]
    fn optional_elaboration_records_label() {
        let policy = modules::CompletionPolicy::default()
            .with_awakening_elaboration(modules::Elaboration::Optional);
        let mut h = Harness::with_config(JourneyConfig::new().with_policy(policy));
        h.choose(EmotionId::Playful);
        h.wait_for(at(ModuleId::Awakening));
        h.continue_to(ModuleId::MemoryConstellation);

        match h.recorded(ModuleId::Awakening) {
            Some(ModuleAnswers::Awakening { intensity: 5, intensity_description }) => {
                assert!(!intensity_description.is_empty());
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn every_scene_is_registered() {
        let h = Harness::new();
        let scenes = &h.systems.scene_manager;
        assert!(scenes.is_registered(SceneId::Hub));
        for module in ModuleId::ALL {
            assert!(scenes.is_registered(SceneId::Module(module)), "{} missing", module);
        }
    }

    //--- Launch -----------------------------------------------------------

    #[test]
    fn launch_shares_handles_with_scenes() {
        let (_engine, handles) = launch(JourneyConfig::new(), SharedProfile::new());
        handles.progress.start_emotion_journey(EmotionId::Hopeful);
        assert!(handles.progress.current_session().is_some());
        assert!(!handles.modal.is_open());
        assert!(handles.module_reports.report(ExternalModuleReport::new(EmotionId::Hopeful)).is_ok());
    }
}
