//=========================================================================
// Hub / Navigation
//=========================================================================
//
// Emotion picker and journey routing.
//
// Choosing an emotion starts or resumes its session in the progress
// store, then routes to the scene for the session's stage:
//
//   Stage::Module(m) ─> SceneId::Module(m)   (after the continue delay)
//   Stage::Complete  ─> stay in the hub with a notice
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use log::{debug, info};

//=== Internal Dependencies ===============================================

use super::controls::{JourneyAction, HUB_CONTEXT};
use super::emotion::EmotionId;
use super::modules::Stage;
use super::progress::ProgressHandle;
use super::scene_base::{SceneBase, SceneServices};
use super::SceneId;
use crate::core::{GlobalContext, Scene};

const NOTICE_TTL: Duration = Duration::from_secs(3);

//=== HubController =======================================================

/// Stateless navigation rules shared by the hub and module scenes.
pub struct HubController;

impl HubController {
    /// The emotions offered in the hub, in display order.
    pub fn catalog() -> &'static [EmotionId] {
        &EmotionId::ALL
    }

    /// Scene that hosts `stage`.
    pub fn route(stage: Stage) -> SceneId {
        match stage {
            Stage::Module(module) => SceneId::Module(module),
            Stage::Complete => SceneId::Hub,
        }
    }

    /// Starts or resumes the journey for `emotion` and returns where it
    /// continues.
    pub fn begin(progress: &ProgressHandle, emotion: EmotionId) -> SceneId {
        let session = progress.start_emotion_journey(emotion);
        info!(
            target: "journey",
            "Journey for '{}' at stage {}",
            emotion,
            session.current_module()
        );
        Self::route(session.current)
    }
}

//=== HubScene ============================================================

pub struct HubScene {
    base: SceneBase,
}

impl HubScene {
    pub fn new(services: SceneServices) -> Self {
        Self {
            base: SceneBase::new(SceneId::Hub, services),
        }
    }

    pub fn base(&self) -> &SceneBase {
        &self.base
    }

    fn choose(&mut self, index: usize) {
        let Some(&emotion) = HubController::catalog().get(index) else {
            debug!(target: "journey", "No emotion at hub slot {}", index);
            return;
        };

        self.base.set_emotion(emotion);
        match HubController::begin(self.base.progress(), emotion) {
            SceneId::Hub => {
                self.base.notify(
                    format!("Your {} journey is complete", emotion.display_name()),
                    NOTICE_TTL,
                );
            }
            target => {
                let delay = self.base.config().continue_delay;
                self.base.transition_after(delay, target);
            }
        }
    }
}

impl Scene<SceneId> for HubScene {
    fn on_enter(&mut self, context: &mut GlobalContext<SceneId>) {
        context.message_bus.push(HUB_CONTEXT);
        self.base.enter();
        self.base.initialize_theme();
        info!(target: "journey", "Entered hub");
    }

    fn on_exit(&mut self, _context: &mut GlobalContext<SceneId>) {
        self.base.shutdown();
    }

    fn update(&mut self, context: &mut GlobalContext<SceneId>) {
        self.base.advance(context);

        let actions = context.message_bus.read::<JourneyAction>().to_vec();
        for action in actions {
            if self.base.is_transitioning() {
                break;
            }
            if let JourneyAction::Choose(index) = action {
                self.choose(usize::from(index));
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
