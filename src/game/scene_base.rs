//=========================================================================
// Scene Base
//=========================================================================
//
// Shared behaviour for every journey scene: presentation lookup, emotion
// colour, fades, delayed and fade-gated transitions, widget descriptors,
// modal access and teardown.
//
// Architecture:
// ```text
//   transition_after(delay, target)
//        │  Timer
//        ▼
//   transition_to_scene(target, d) ── Fade::fade_out(d)
//        │
//        ▼  FadeEvent::OutComplete (same tick)
//   SceneTransition::Replace(self, target) ──> SceneManager
// ```
//
// Scenes compose a `SceneBase` and call `advance` at the top of their
// update. The replace is queued only on the tick the fade-out finishes,
// so the next scene's `on_enter` always runs after it.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info};

//=== Internal Dependencies ===============================================

use super::config::JourneyConfig;
use super::emotion::{color_for_name, Color, EmotionId};
use super::modal::{ModalBridge, ModalRequest, PendingText};
use super::profile::{AgeGroup, CharacterDraft, PlayerProfile, ProfileSource};
use super::progress::ProgressHandle;
use super::theme::Presentation;
use super::SceneId;
use crate::core::scene::{Fade, FadeEvent, SceneTransition};
use crate::core::time::Timer;
use crate::core::GlobalContext;

const PROFILE_NOTICE_TTL: Duration = Duration::from_secs(3);

//=== SceneServices =======================================================

/// Handles injected into every journey scene.
#[derive(Clone)]
pub struct SceneServices {
    pub progress: ProgressHandle,
    pub modal: ModalBridge,
    pub profile: Arc<dyn ProfileSource>,
    pub config: Arc<JourneyConfig>,
}

impl SceneServices {
    pub fn new(config: JourneyConfig, profile: Arc<dyn ProfileSource>) -> Self {
        Self {
            progress: ProgressHandle::new(),
            modal: ModalBridge::new(),
            profile,
            config: Arc::new(config),
        }
    }
}

//=== Widget Descriptors ==================================================

/// Everything the renderer needs to draw a button.
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonSpec {
    pub label: String,
    pub fill: Color,
    pub text_color: Color,
    pub border_radius: u8,
    pub alpha: f32,
    pub interactive: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextSpec {
    pub content: String,
    pub size: f32,
    pub color: Color,
    pub font: &'static str,
}

/// Transient inline message that dismisses itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    remaining: Timer,
}

impl Notice {
    pub fn remaining(&self) -> Duration {
        self.remaining.remaining()
    }
}

//=== SceneBase ===========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingTransition {
    Delayed { timer: Timer, target: SceneId },
    FadingOut { target: SceneId },
}

pub struct SceneBase {
    id: SceneId,
    services: SceneServices,
    presentation: Option<Presentation>,
    emotion: Option<EmotionId>,
    color: Color,
    fade: Fade,
    transition: Option<PendingTransition>,
    notices: Vec<Notice>,
}

impl SceneBase {
    pub fn new(id: SceneId, services: SceneServices) -> Self {
        Self {
            id,
            services,
            presentation: None,
            emotion: None,
            color: EmotionId::Joy.color(),
            fade: Fade::new(),
            transition: None,
            notices: Vec::new(),
        }
    }

    //--- Accessors --------------------------------------------------------

    pub fn id(&self) -> SceneId {
        self.id
    }

    pub fn services(&self) -> &SceneServices {
        &self.services
    }

    pub fn config(&self) -> &JourneyConfig {
        &self.services.config
    }

    pub fn progress(&self) -> &ProgressHandle {
        &self.services.progress
    }

    //--- Lifecycle --------------------------------------------------------

    /// Resets per-visit state and starts the entry fade.
    pub fn enter(&mut self) {
        self.presentation = None;
        self.transition = None;
        self.notices.clear();
        self.fade.fade_in(self.services.config.scene_transition);
    }

    /// Cancels this scene's dialogs and pending transitions. Safe to call
    /// more than once.
    pub fn shutdown(&mut self) -> usize {
        let swept = self.services.modal.sweep(self.id);
        self.fade.reset();
        self.transition = None;
        self.notices.clear();
        swept
    }

    //--- Presentation -----------------------------------------------------

    /// Resolves theme and copy from the player profile. The result is
    /// cached until the next `enter`.
    pub fn initialize_theme(&mut self) -> Presentation {
        if let Some(presentation) = self.presentation {
            return presentation;
        }
        let profile = self.services.profile.profile();
        let presentation = Presentation::resolve(profile.as_ref());
        debug!(target: "scene", "{:?} resolved {:?} presentation", self.id, presentation.age_group);
        self.presentation = Some(presentation);
        presentation
    }

    pub fn is_teen(&mut self) -> bool {
        self.initialize_theme().age_group == AgeGroup::Teen
    }

    pub fn is_adult(&mut self) -> bool {
        !self.is_teen()
    }

    //--- Emotion ----------------------------------------------------------

    pub fn set_emotion(&mut self, emotion: EmotionId) {
        self.emotion = Some(emotion);
        self.color = emotion.color();
    }

    /// Lenient variant. Unknown names keep no emotion and use joy's colour.
    pub fn set_emotion_named(&mut self, name: &str) {
        self.emotion = name.parse().ok();
        self.color = color_for_name(name);
    }

    pub fn emotion(&self) -> Option<EmotionId> {
        self.emotion
    }

    pub fn color(&self) -> Color {
        self.color
    }

    //--- Fades & Transitions ----------------------------------------------

    pub fn fade_in(&mut self, duration: Duration) {
        self.fade.fade_in(duration);
    }

    pub fn fade_out(&mut self, duration: Duration) {
        self.fade.fade_out(duration);
    }

    pub fn alpha(&self) -> f32 {
        self.fade.alpha()
    }

    /// Fades out, then replaces this scene with `target`.
    ///
    /// Returns `false` if a fade-out transition is already running.
    pub fn transition_to_scene(&mut self, target: SceneId, duration: Duration) -> bool {
        if matches!(self.transition, Some(PendingTransition::FadingOut { .. })) {
            debug!(target: "scene", "{:?} already leaving, ignoring transition to {:?}", self.id, target);
            return false;
        }
        debug!(target: "scene", "{:?} fading out towards {:?}", self.id, target);
        self.fade.fade_out(duration);
        self.transition = Some(PendingTransition::FadingOut { target });
        true
    }

    /// Waits `delay`, then calls `transition_to_scene` with the configured
    /// fade. Replaces any earlier delayed transition.
    pub fn transition_after(&mut self, delay: Duration, target: SceneId) {
        if matches!(self.transition, Some(PendingTransition::FadingOut { .. })) {
            return;
        }
        self.transition = Some(PendingTransition::Delayed {
            timer: Timer::new(delay),
            target,
        });
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    /// Advances fades, timers and notices by this tick's delta.
    pub fn advance(&mut self, context: &mut GlobalContext<SceneId>) {
        let delta = context.clock.delta();
        self.advance_by(delta, context);
    }

    fn advance_by(&mut self, delta: Duration, context: &mut GlobalContext<SceneId>) {
        for notice in &mut self.notices {
            notice.remaining.tick(delta);
        }
        self.notices.retain(|notice| !notice.remaining.has_fired());

        if let (Some(FadeEvent::OutComplete), Some(PendingTransition::FadingOut { target })) =
            (self.fade.advance(delta), self.transition)
        {
            info!(target: "scene", "Fade-out complete, {:?} -> {:?}", self.id, target);
            context.scene_transitions.push(SceneTransition::Replace(self.id, target));
            self.transition = None;
            return;
        }

        if let Some(PendingTransition::Delayed { mut timer, target }) = self.transition {
            if timer.tick(delta) {
                let duration = self.services.config.scene_transition;
                self.transition = None;
                self.transition_to_scene(target, duration);
            } else {
                self.transition = Some(PendingTransition::Delayed { timer, target });
            }
        }
    }

    //--- Modal Access -----------------------------------------------------

    pub fn request_text(&self, request: ModalRequest) -> PendingText {
        self.services.modal.request_text(self.id, request)
    }

    /// Escape-key path for this scene's active dialog.
    pub fn cancel_text(&self) -> bool {
        self.services.modal.cancel_active_for(self.id)
    }

    //--- Widgets ----------------------------------------------------------

    /// Button coloured from the emotion. Disabled buttons are dimmed.
    pub fn button(&mut self, label: impl Into<String>, enabled: bool) -> ButtonSpec {
        let theme = self.initialize_theme().theme;
        ButtonSpec {
            label: label.into(),
            fill: self.color,
            text_color: theme.text,
            border_radius: theme.border_radius,
            alpha: if enabled { 1.0 } else { 0.5 },
            interactive: enabled,
        }
    }

    pub fn text(&mut self, content: impl Into<String>, size: f32) -> TextSpec {
        let theme = self.initialize_theme().theme;
        TextSpec {
            content: content.into(),
            size,
            color: theme.text,
            font: theme.primary_font,
        }
    }

    /// Shows `message` for `ttl`.
    pub fn notify(&mut self, message: impl Into<String>, ttl: Duration) {
        let message = message.into();
        info!(target: "scene", "{:?} notice: {}", self.id, message);
        self.notices.push(Notice {
            message,
            remaining: Timer::new(ttl),
        });
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    //--- Character --------------------------------------------------------

    /// Validates a character draft. A rejected draft becomes a notice.
    pub fn finish_character(&mut self, draft: CharacterDraft) -> Option<PlayerProfile> {
        match draft.finish() {
            Ok(profile) => {
                self.presentation = None;
                Some(profile)
            }
            Err(e) => {
                self.notify(e.to_string(), PROFILE_NOTICE_TTL);
                None
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::modules::ModuleId;
    use crate::game::profile::NoProfile;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const ME: SceneId = SceneId::Module(ModuleId::Awakening);
    const NEXT: SceneId = SceneId::Module(ModuleId::MemoryConstellation);
    const TICK: Duration = Duration::from_millis(100);

    struct CountingProfile {
        reads: AtomicUsize,
        age_group: AgeGroup,
    }

    impl ProfileSource for CountingProfile {
        fn profile(&self) -> Option<PlayerProfile> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            Some(PlayerProfile {
                name: "Nia".into(),
                age_group: self.age_group,
                companion_name: "Sage".into(),
                avatar: None,
            })
        }
    }

    fn base() -> SceneBase {
        SceneBase::new(ME, SceneServices::new(JourneyConfig::new(), Arc::new(NoProfile)))
    }

    fn step(base: &mut SceneBase, ctx: &mut GlobalContext<SceneId>) {
        ctx.clock.advance(TICK);
        base.advance(ctx);
    }

    //--- Presentation -----------------------------------------------------

    #[test]
    fn theme_is_resolved_once_per_entry() {
        let profile = Arc::new(CountingProfile { reads: AtomicUsize::new(0), age_group: AgeGroup::Teen });
        let services = SceneServices::new(JourneyConfig::new(), profile.clone());
        let mut base = SceneBase::new(ME, services);

        assert!(base.is_teen());
        assert!(!base.is_adult());
        base.button("Continue", true);
        assert_eq!(profile.reads.load(Ordering::SeqCst), 1);

        base.enter();
        base.initialize_theme();
        assert_eq!(profile.reads.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn missing_profile_is_adult() {
        let mut base = base();
        assert!(base.is_adult());
    }

    #[test]
    fn blank_character_name_becomes_notice() {
        let mut base = base();
        assert_eq!(base.finish_character(CharacterDraft::default()), None);
        assert_eq!(base.notices()[0].message, "Please enter your name");

        let draft = CharacterDraft { name: "Nia".into(), ..CharacterDraft::default() };
        let profile = base.finish_character(draft).unwrap();
        assert_eq!(profile.companion_name, CharacterDraft::DEFAULT_COMPANION);
        assert_eq!(base.notices().len(), 1);
    }

    #[test]
    fn unknown_emotion_name_uses_joy_colour() {
        let mut base = base();
        base.set_emotion_named("wistful");
        assert_eq!(base.color(), EmotionId::Joy.color());
        assert_eq!(base.emotion(), None);

        base.set_emotion(EmotionId::Angry);
        assert_eq!(base.color(), EmotionId::Angry.color());
    }

    //--- Transitions ------------------------------------------------------

    #[test]
    fn replace_is_queued_only_after_fade_out_completes() {
        let mut base = base();
        let mut ctx = GlobalContext::new();
        base.transition_to_scene(NEXT, Duration::from_millis(300));

        step(&mut base, &mut ctx);
        step(&mut base, &mut ctx);
        assert!(ctx.scene_transitions.is_empty());
        assert!(base.alpha() > 0.0);

        step(&mut base, &mut ctx);
        assert_eq!(ctx.scene_transitions.take(), vec![SceneTransition::Replace(ME, NEXT)]);
        assert_eq!(base.alpha(), 0.0);
        assert!(!base.is_transitioning());
    }

    #[test]
    fn second_transition_is_ignored_while_leaving() {
        let mut base = base();
        assert!(base.transition_to_scene(NEXT, TICK));
        assert!(!base.transition_to_scene(SceneId::Hub, TICK));

        let mut ctx = GlobalContext::new();
        step(&mut base, &mut ctx);
        assert_eq!(ctx.scene_transitions.take(), vec![SceneTransition::Replace(ME, NEXT)]);
    }

    #[test]
    fn delayed_transition_waits_then_fades() {
        let mut base = base();
        let mut ctx = GlobalContext::new();
        base.transition_after(Duration::from_millis(600), NEXT);

        for _ in 0..6 {
            step(&mut base, &mut ctx);
        }
        assert!(ctx.scene_transitions.is_empty());

        // 500 ms fade at 100 ms per tick
        for _ in 0..5 {
            step(&mut base, &mut ctx);
        }
        assert_eq!(ctx.scene_transitions.len(), 1);
    }

    #[test]
    fn shutdown_drops_pending_work_and_dialogs() {
        let mut base = base();
        let mut pending = base.request_text(ModalRequest::new("Describe"));
        base.transition_after(TICK, NEXT);
        base.notify("hello", Duration::from_secs(3));

        assert_eq!(base.shutdown(), 1);
        assert_eq!(base.shutdown(), 0);
        assert!(!base.is_transitioning());
        assert!(base.notices().is_empty());
        assert!(pending.poll().is_some());
    }

    //--- Widgets ----------------------------------------------------------

    #[test]
    fn disabled_button_is_dimmed() {
        let mut base = base();
        base.set_emotion(EmotionId::Sad);

        let on = base.button("Continue", true);
        let off = base.button("Continue", false);
        assert_eq!((on.alpha, on.interactive), (1.0, true));
        assert_eq!((off.alpha, off.interactive), (0.5, false));
        assert_eq!(on.fill, EmotionId::Sad.color());
        assert_eq!(on.border_radius, 8);
    }

    #[test]
    fn notices_expire() {
        let mut base = base();
        let mut ctx = GlobalContext::new();
        base.notify("Please enter your name", Duration::from_millis(250));

        step(&mut base, &mut ctx);
        step(&mut base, &mut ctx);
        assert_eq!(base.notices().len(), 1);
        step(&mut base, &mut ctx);
        assert!(base.notices().is_empty());
    }

    #[test]
    fn text_uses_theme_font() {
        let mut base = base();
        let text = base.text("Hello", 24.0);
        assert_eq!(text.font, "Inter, sans-serif");
    }
}
