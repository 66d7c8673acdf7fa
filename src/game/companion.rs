//=========================================================================
// Companion Chat
//=========================================================================
//
// Request/response seam for the companion character.
//
// Reply order:
//   1. Crisis keywords  -> fixed safety message, service never called
//   2. No service       -> canned fallback
//   3. Service reply    -> returned as is
//   4. Service error    -> warn + canned fallback
//
// Fallbacks rotate in order. The conversation window sent with each
// request holds the last 10 messages.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::VecDeque;
use std::fmt;

use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use super::emotion::EmotionId;
use super::modules::ModuleId;
use super::profile::AgeGroup;

//=== Constants ===========================================================

const HISTORY_WINDOW: usize = 10;
const EXCERPT_CHARS: usize = 100;

const CRISIS_KEYWORDS: [&str; 7] = [
    "suicide",
    "kill myself",
    "end my life",
    "self-harm",
    "self harm",
    "hurt myself",
    "want to die",
];

pub const CRISIS_RESPONSE: &str = "It sounds like you are carrying something really heavy, and \
you deserve support right now. Please reach out to someone you trust, or contact a local crisis \
line or emergency services. You do not have to go through this alone.";

const FALLBACKS: [&str; 5] = [
    "I'm here with you. Tell me more about what you're experiencing right now.",
    "That sounds meaningful. Can you help me understand more about what this feeling is like for you?",
    "I want to understand better. What's it like to experience this?",
    "Take your time. I'm listening.",
    "Your feelings are valid. What else would you like to explore about this?",
];

//=== Messages ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    Player,
    Companion,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub speaker: Speaker,
    pub text: String,
}

/// Where the player is when they talk to the companion.
#[derive(Debug, Clone, Default)]
pub struct CompanionContext {
    pub age_group: AgeGroup,
    pub emotion: Option<EmotionId>,
    pub module: Option<ModuleId>,
    pub recent_writing: Option<String>,
}

/// Everything a service needs to produce one reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanionRequest {
    pub system_prompt: String,
    pub history: Vec<ChatMessage>,
    pub message: String,
}

//=== Service =============================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompanionError {
    /// The service could not be reached.
    Unavailable(String),
    /// The service answered with something unusable.
    InvalidResponse(String),
}

impl fmt::Display for CompanionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompanionError::Unavailable(reason) => {
                write!(f, "companion service unavailable: {}", reason)
            }
            CompanionError::InvalidResponse(reason) => {
                write!(f, "invalid companion response: {}", reason)
            }
        }
    }
}

impl std::error::Error for CompanionError {}

/// Backend that turns a request into a reply, typically an LLM client.
pub trait CompanionService: Send {
    fn send(&self, request: &CompanionRequest) -> Result<String, CompanionError>;
}

//=== Companion ===========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    Safety,
    Service,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanionReply {
    pub text: String,
    pub source: ReplySource,
}

pub struct Companion<S: CompanionService> {
    service: Option<S>,
    history: VecDeque<ChatMessage>,
    next_fallback: usize,
}

impl<S: CompanionService> Companion<S> {
    pub fn new(service: S) -> Self {
        Self {
            service: Some(service),
            history: VecDeque::new(),
            next_fallback: 0,
        }
    }

    /// Companion that answers only with fallbacks.
    pub fn offline() -> Self {
        info!(target: "companion", "No companion service configured, using fallback replies");
        Self {
            service: None,
            history: VecDeque::new(),
            next_fallback: 0,
        }
    }

    pub fn history(&self) -> impl Iterator<Item = &ChatMessage> {
        self.history.iter()
    }

    /// Replies to `message` and records both sides of the exchange.
    pub fn respond(&mut self, message: &str, context: &CompanionContext) -> CompanionReply {
        let reply = self.reply_to(message, context);
        self.remember(Speaker::Player, message.to_string());
        self.remember(Speaker::Companion, reply.text.clone());
        reply
    }

    fn reply_to(&mut self, message: &str, context: &CompanionContext) -> CompanionReply {
        if is_crisis(message) {
            warn!(target: "companion", "Crisis keywords detected, returning safety message");
            return CompanionReply {
                text: CRISIS_RESPONSE.to_string(),
                source: ReplySource::Safety,
            };
        }

        let Some(service) = &self.service else {
            return self.fallback();
        };

        let request = CompanionRequest {
            system_prompt: system_prompt(context),
            history: self.history.iter().cloned().collect(),
            message: message.to_string(),
        };

        match service.send(&request) {
            Ok(text) => {
                debug!(target: "companion", "Service replied with {} chars", text.len());
                CompanionReply { text, source: ReplySource::Service }
            }
            Err(e) => {
                warn!(target: "companion", "{}", e);
                self.fallback()
            }
        }
    }

    fn fallback(&mut self) -> CompanionReply {
        let text = FALLBACKS[self.next_fallback % FALLBACKS.len()];
        self.next_fallback = self.next_fallback.wrapping_add(1);
        CompanionReply {
            text: text.to_string(),
            source: ReplySource::Fallback,
        }
    }

    fn remember(&mut self, speaker: Speaker, text: String) {
        self.history.push_back(ChatMessage { speaker, text });
        while self.history.len() > HISTORY_WINDOW {
            self.history.pop_front();
        }
    }
}

//=== Helpers =============================================================

fn is_crisis(message: &str) -> bool {
    let lower = message.to_lowercase();
    CRISIS_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
}

/// Builds the system prompt for the current context.
pub fn system_prompt(context: &CompanionContext) -> String {
    let voice = match context.age_group {
        AgeGroup::Adult => "professional, therapeutic and evidence-based",
        AgeGroup::Teen => "adventure-themed, mystical and encouraging, like a wise guide on a quest",
    };

    let mut prompt = format!(
        "You are a compassionate companion in the Emotion Explorer journey. \
         Your voice is {}. Validate feelings, keep replies to a few sentences \
         and never give medical advice.\n\nCurrent session:\n",
        voice
    );
    if let Some(emotion) = context.emotion {
        prompt.push_str(&format!("- Exploring: {}\n", emotion));
    }
    if let Some(module) = context.module {
        prompt.push_str(&format!("- Current module: {}\n", module.companion_label()));
    }
    if let Some(writing) = context.recent_writing.as_deref().filter(|w| !w.trim().is_empty()) {
        let excerpt: String = writing.chars().take(EXCERPT_CHARS).collect();
        prompt.push_str(&format!("- Recently wrote: \"{}...\"\n", excerpt));
    }
    prompt
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    struct Recording {
        calls: Arc<AtomicUsize>,
        last: Arc<Mutex<Option<CompanionRequest>>>,
        reply: Result<String, CompanionError>,
    }

    impl CompanionService for Recording {
        fn send(&self, request: &CompanionRequest) -> Result<String, CompanionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last.lock().unwrap() = Some(request.clone());
            self.reply.clone()
        }
    }

    fn companion(
        reply: Result<String, CompanionError>,
    ) -> (Companion<Recording>, Arc<AtomicUsize>, Arc<Mutex<Option<CompanionRequest>>>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let last = Arc::new(Mutex::new(None));
        let service = Recording { calls: calls.clone(), last: last.clone(), reply };
        (Companion::new(service), calls, last)
    }

    #[test]
    fn crisis_never_reaches_service() {
        let (mut companion, calls, _) = companion(Ok("hello".into()));
        let reply = companion.respond("Sometimes I want to END MY LIFE", &CompanionContext::default());

        assert_eq!(reply.source, ReplySource::Safety);
        assert_eq!(reply.text, CRISIS_RESPONSE);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn service_errors_rotate_fallbacks() {
        let (mut companion, calls, _) =
            companion(Err(CompanionError::Unavailable("offline".into())));
        let context = CompanionContext::default();

        let first = companion.respond("hi", &context);
        let second = companion.respond("still there?", &context);
        assert_eq!(first.source, ReplySource::Fallback);
        assert_eq!(first.text, FALLBACKS[0]);
        assert_eq!(second.text, FALLBACKS[1]);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn offline_companion_uses_fallbacks() {
        let mut companion = Companion::<Recording>::offline();
        let reply = companion.respond("hi", &CompanionContext::default());
        assert_eq!(reply.source, ReplySource::Fallback);
    }

    #[test]
    fn history_window_holds_last_ten() {
        let (mut companion, _, last) = companion(Ok("ok".into()));
        let context = CompanionContext::default();
        for i in 0..8 {
            companion.respond(&format!("message {}", i), &context);
        }
        assert_eq!(companion.history().count(), 10);
        assert_eq!(companion.history().next().unwrap().text, "message 3");

        let request = last.lock().unwrap().clone().unwrap();
        assert_eq!(request.history.len(), 10);
        assert_eq!(request.message, "message 7");
    }

    #[test]
    fn prompt_names_voice_emotion_and_module() {
        let context = CompanionContext {
            age_group: AgeGroup::Teen,
            emotion: Some(EmotionId::Anxious),
            module: Some(ModuleId::SpeakingStone),
            recent_writing: Some("x".repeat(150)),
        };
        let prompt = system_prompt(&context);

        assert!(prompt.contains("quest"));
        assert!(prompt.contains("Exploring: anxious"));
        assert!(prompt.contains("The Speaking Stone (Letter Writing)"));
        assert!(prompt.contains(&format!("\"{}...\"", "x".repeat(100))));
        assert!(!prompt.contains(&"x".repeat(101)));
    }
}
