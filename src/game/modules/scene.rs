//=========================================================================
// Module Scene
//=========================================================================
//
// Generic scene hosting one `ModuleActivity`.
//
// Per tick:
//   1. SceneBase::advance (fades, delayed transitions, notices)
//   2. Activity::tick
//   3. Poll the outstanding text request, apply a submitted answer
//   4. Apply this tick's JourneyActions
//
// While a dialog is open only Dismiss is honoured. Once a module is
// recorded the scene latches and ignores further Continue presses until
// it is entered again.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use log::{debug, info};

//=== Internal Dependencies ===============================================

use super::{complete_module, Completion, Interaction, ModuleActivity, PromptContext};
use crate::core::{GlobalContext, Scene};
use crate::game::controls::{JourneyAction, MODULE_CONTEXT};
use crate::game::emotion::EmotionId;
use crate::game::hub::HubController;
use crate::game::modal::{ModalOutcome, PendingText};
use crate::game::scene_base::{ButtonSpec, SceneBase, SceneServices};
use crate::game::SceneId;

/// How long the "no emotion selected" notice stays up.
const NOTICE_TTL: Duration = Duration::from_secs(3);

//=== Shared Entry Logic ==================================================

/// Looks up the active session's emotion and colours the scene with it.
/// Without a session the player is sent back to the hub.
pub(super) fn enter_module(base: &mut SceneBase) -> Option<EmotionId> {
    base.enter();
    base.initialize_theme();

    match base.progress().current_session() {
        Some(session) => {
            base.set_emotion(session.emotion_id);
            Some(session.emotion_id)
        }
        None => {
            base.notify("Choose an emotion in the hub to begin", NOTICE_TTL);
            let delay = base.config().continue_delay;
            base.transition_after(delay, SceneId::Hub);
            None
        }
    }
}

//=== ModuleScene =========================================================

pub struct ModuleScene<A: ModuleActivity> {
    base: SceneBase,
    activity: A,
    emotion: Option<EmotionId>,
    pending: Option<(usize, PendingText)>,
    completed: bool,
}

impl<A: ModuleActivity> ModuleScene<A> {
    pub fn new(activity: A, services: SceneServices) -> Self {
        Self {
            base: SceneBase::new(SceneId::Module(activity.module()), services),
            activity,
            emotion: None,
            pending: None,
            completed: false,
        }
    }

    pub fn activity(&self) -> &A {
        &self.activity
    }

    pub fn base(&self) -> &SceneBase {
        &self.base
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Continue button, dimmed until the predicate holds.
    pub fn continue_button(&mut self) -> ButtonSpec {
        let ready = !self.completed && self.activity.can_complete(&self.base.config().policy);
        self.base.button("Continue", ready)
    }

    //--- Actions ----------------------------------------------------------

    fn apply(&mut self, action: JourneyAction, pointer: (f32, f32)) {
        if self.base.is_transitioning() {
            return;
        }
        if self.pending.is_some() {
            if action == JourneyAction::Dismiss {
                self.base.cancel_text();
            }
            return;
        }

        match action {
            JourneyAction::Continue => self.try_complete(),
            JourneyAction::Dismiss => {
                info!(target: "journey", "Leaving {} for the hub", self.activity.module());
                let fade = self.base.config().scene_transition;
                self.base.transition_to_scene(SceneId::Hub, fade);
            }
            JourneyAction::Write(slot) => self.open_slot(usize::from(slot)),
            JourneyAction::Place => {
                let (x, y) = pointer;
                self.activity.handle(Interaction::Place { x, y });
            }
            JourneyAction::Select(item) => {
                self.activity.handle(Interaction::Select(usize::from(item)));
            }
            JourneyAction::Raise => {
                self.activity.handle(Interaction::Raise);
            }
            JourneyAction::Lower => {
                self.activity.handle(Interaction::Lower);
            }
            JourneyAction::Breathe => {
                self.activity.handle(Interaction::Breathe);
            }
            JourneyAction::Choose(_) => {}
        }
    }

    fn open_slot(&mut self, slot: usize) {
        let Some(emotion) = self.emotion else {
            return;
        };
        if slot >= self.activity.text_slots() {
            return;
        }
        let context = PromptContext {
            emotion,
            presentation: self.base.initialize_theme(),
            policy: self.base.config().policy,
        };
        if let Some(request) = self.activity.prompt(slot, &context) {
            self.pending = Some((slot, self.base.request_text(request)));
        }
    }

    fn poll_text(&mut self) {
        let Some((slot, pending)) = self.pending.as_mut() else {
            return;
        };
        let slot = *slot;
        match pending.poll() {
            Some(ModalOutcome::Submitted(text)) => {
                if self.activity.apply_text(slot, text) {
                    debug!(target: "journey", "{} slot {} updated", self.activity.module(), slot);
                }
                self.pending = None;
            }
            Some(ModalOutcome::Cancelled) => {
                debug!(target: "journey", "{} slot {} cancelled", self.activity.module(), slot);
                self.pending = None;
            }
            None => {}
        }
    }

    fn try_complete(&mut self) {
        let Some(emotion) = self.emotion else {
            return;
        };
        if self.completed {
            return;
        }

        let config = self.base.config();
        let policy = config.policy;
        let delay = config.continue_delay;

        if let Completion::Recorded { next } =
            complete_module(&self.activity, emotion, &policy, self.base.progress())
        {
            self.completed = true;
            self.base.transition_after(delay, HubController::route(next));
        }
    }
}

//=== Scene Implementation ================================================

impl<A: ModuleActivity> Scene<SceneId> for ModuleScene<A> {
    fn on_enter(&mut self, context: &mut GlobalContext<SceneId>) {
        context.message_bus.push(MODULE_CONTEXT);
        self.activity.reset();
        self.pending = None;
        self.completed = false;
        self.emotion = enter_module(&mut self.base);
        info!(target: "journey", "Entered {} ({:?})", self.activity.module(), self.emotion);
    }

    fn on_exit(&mut self, _context: &mut GlobalContext<SceneId>) {
        self.pending = None;
        self.base.shutdown();
    }

    fn update(&mut self, context: &mut GlobalContext<SceneId>) {
        self.base.advance(context);
        self.activity.tick(context.clock.delta());
        self.poll_text();

        let pointer = context.input_state.mouse_position();
        let actions = context.message_bus.read::<JourneyAction>().to_vec();
        for action in actions {
            self.apply(action, pointer);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
