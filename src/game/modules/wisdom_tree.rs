//=========================================================================
// Module 8: Wisdom Tree
//=========================================================================
//
// The Wisdom Tree's interaction runs outside the core. The collaborator
// that drives it sends one `ExternalModuleReport` through an
// `ExternalModuleSender` when the player finishes, and this scene turns
// that report into the module 8 record.
//
// Each report names the emotion it was produced for. Reports are held
// until the scene is active for that emotion, so a report sent while the
// player is away is recorded on their return. Only the first matching
// report per visit is recorded. Later ones for the same emotion are
// dropped.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use crossbeam_channel::{unbounded, Receiver, Sender};
use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use super::scene::enter_module;
use super::{ModuleAnswers, ModuleId, ModuleRecord};
use crate::core::{GlobalContext, Scene};
use crate::game::controls::{JourneyAction, MODULE_CONTEXT};
use crate::game::emotion::EmotionId;
use crate::game::hub::HubController;
use crate::game::scene_base::{SceneBase, SceneServices};
use crate::game::SceneId;

const WAITING_TTL: Duration = Duration::from_secs(2);

//=== Reports =============================================================

/// Answers produced by the external Wisdom Tree collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalModuleReport {
    pub emotion: EmotionId,
    pub fields: BTreeMap<String, String>,
}

impl ExternalModuleReport {
    pub fn new(emotion: EmotionId) -> Self {
        Self {
            emotion,
            fields: BTreeMap::new(),
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportError {
    /// The Wisdom Tree scene no longer exists.
    Disconnected,
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportError::Disconnected => write!(f, "wisdom tree scene is gone"),
        }
    }
}

impl std::error::Error for ReportError {}

/// Handle the collaborator uses to finish module 8. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ExternalModuleSender {
    tx: Sender<ExternalModuleReport>,
}

impl ExternalModuleSender {
    pub fn report(&self, report: ExternalModuleReport) -> Result<(), ReportError> {
        self.tx.send(report).map_err(|_| ReportError::Disconnected)
    }
}

//=== WisdomTreeScene =====================================================

pub struct WisdomTreeScene {
    base: SceneBase,
    reports: Receiver<ExternalModuleReport>,
    held: Vec<ExternalModuleReport>,
    emotion: Option<EmotionId>,
    completed: bool,
}

impl WisdomTreeScene {
    /// Creates the scene and the sender the collaborator reports through.
    pub fn new(services: SceneServices) -> (Self, ExternalModuleSender) {
        let (tx, rx) = unbounded();
        let scene = Self {
            base: SceneBase::new(SceneId::Module(ModuleId::WisdomTree), services),
            reports: rx,
            held: Vec::new(),
            emotion: None,
            completed: false,
        };
        (scene, ExternalModuleSender { tx })
    }

    pub fn base(&self) -> &SceneBase {
        &self.base
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    fn poll_report(&mut self) {
        if self.completed || self.base.is_transitioning() {
            return;
        }
        let Some(emotion) = self.emotion else {
            return;
        };

        // A disconnected reporter just means module 8 can no longer finish.
        self.held.extend(self.reports.try_iter());
        let Some(index) = self.held.iter().position(|r| r.emotion == emotion) else {
            return;
        };
        let report = self.held.remove(index);

        let record = ModuleRecord {
            emotion_selected: emotion,
            answers: ModuleAnswers::WisdomTree { fields: report.fields },
        };
        match self.base.progress().complete_module(ModuleId::WisdomTree, record) {
            Ok(next) => {
                info!(target: "journey", "Wisdom tree recorded for '{}'", emotion);
                self.completed = true;
                self.drop_reports_for(emotion);
                let delay = self.base.config().continue_delay;
                self.base.transition_after(delay, HubController::route(next));
            }
            Err(e) => warn!(target: "journey", "Could not record wisdom tree: {}", e),
        }
    }

    fn drop_reports_for(&mut self, emotion: EmotionId) {
        let before = self.held.len();
        self.held.retain(|r| r.emotion != emotion);
        let dropped = before - self.held.len();
        if dropped > 0 {
            debug!(target: "journey", "Dropped {} extra wisdom tree report(s) for '{}'", dropped, emotion);
        }
    }

    fn apply(&mut self, action: JourneyAction) {
        if self.base.is_transitioning() {
            return;
        }
        match action {
            JourneyAction::Dismiss => {
                let fade = self.base.config().scene_transition;
                self.base.transition_to_scene(SceneId::Hub, fade);
            }
            JourneyAction::Continue if !self.completed => {
                self.base.notify("The Wisdom Tree is still listening", WAITING_TTL);
            }
            _ => {}
        }
    }
}

//=== Scene Implementation ================================================

impl Scene<SceneId> for WisdomTreeScene {
    fn on_enter(&mut self, context: &mut GlobalContext<SceneId>) {
        context.message_bus.push(MODULE_CONTEXT);
        self.completed = false;
        self.emotion = enter_module(&mut self.base);
        info!(target: "journey", "Entered {} ({:?})", ModuleId::WisdomTree, self.emotion);
    }

    fn on_exit(&mut self, _context: &mut GlobalContext<SceneId>) {
        self.base.shutdown();
    }

    fn update(&mut self, context: &mut GlobalContext<SceneId>) {
        self.base.advance(context);
        self.poll_report();

        let actions = context.message_bus.read::<JourneyAction>().to_vec();
        for action in actions {
            self.apply(action);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
