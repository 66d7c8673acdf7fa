//=========================================================================
// Progress Store
//=========================================================================
//
// In-memory journey state: one session per explored emotion.
//
// Architecture:
//   ProgressHandle (Arc<Mutex>) ──> ProgressStore
//                                     ├─ sessions: EmotionId → EmotionSession
//                                     └─ active: Option<EmotionId>
//
// Sessions are created on first selection and never deleted. Starting a
// different emotion only changes which session is active. Nothing here
// outlives the process.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use log::{debug, info};

//=== Internal Dependencies ===============================================

use super::emotion::EmotionId;
use super::modules::{ModuleId, ModuleRecord, Stage};

//=== EmotionSession ======================================================

/// Journey state for one emotion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmotionSession {
    pub emotion_id: EmotionId,
    pub current: Stage,
    pub answers: BTreeMap<ModuleId, ModuleRecord>,
}

impl EmotionSession {
    fn new(emotion_id: EmotionId) -> Self {
        Self {
            emotion_id,
            current: Stage::default(),
            answers: BTreeMap::new(),
        }
    }

    /// 1 to 9 while in progress, 10 once complete.
    pub fn current_module(&self) -> u8 {
        self.current.number()
    }

    pub fn is_complete(&self) -> bool {
        self.current == Stage::Complete
    }
}

//=== ProgressError =======================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressError {
    /// No emotion has been started.
    NoActiveSession,
    /// The record's answers belong to a different module.
    AnswerMismatch { module: ModuleId, answers: ModuleId },
    /// The record was written for an emotion other than the active one.
    EmotionMismatch { session: EmotionId, record: EmotionId },
}

impl fmt::Display for ProgressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgressError::NoActiveSession => write!(f, "no active emotion session"),
            ProgressError::AnswerMismatch { module, answers } => {
                write!(f, "answers for {} cannot be stored under {}", answers, module)
            }
            ProgressError::EmotionMismatch { session, record } => {
                write!(f, "record for '{}' cannot be stored in the '{}' session", record, session)
            }
        }
    }
}

impl std::error::Error for ProgressError {}

//=== ProgressStore =======================================================

#[derive(Debug, Default)]
pub struct ProgressStore {
    sessions: BTreeMap<EmotionId, EmotionSession>,
    active: Option<EmotionId>,
}

impl ProgressStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resumes or creates the session for `emotion` and makes it active.
    pub fn start_emotion_journey(&mut self, emotion: EmotionId) -> &EmotionSession {
        self.active = Some(emotion);
        self.sessions.entry(emotion).or_insert_with(|| {
            info!(target: "progress", "Starting new journey for '{}'", emotion);
            EmotionSession::new(emotion)
        })
    }

    /// Stores `record` for `module` in the active session and advances
    /// its stage to the module after it. A later write for the same
    /// module replaces the earlier one. The record's emotion must be the
    /// active session's emotion.
    pub fn complete_module(
        &mut self,
        module: ModuleId,
        record: ModuleRecord,
    ) -> Result<Stage, ProgressError> {
        let answers = record.answers.module();
        if answers != module {
            return Err(ProgressError::AnswerMismatch { module, answers });
        }

        let session = self
            .active
            .and_then(|emotion| self.sessions.get_mut(&emotion))
            .ok_or(ProgressError::NoActiveSession)?;

        if record.emotion_selected != session.emotion_id {
            return Err(ProgressError::EmotionMismatch {
                session: session.emotion_id,
                record: record.emotion_selected,
            });
        }

        if session.answers.insert(module, record).is_some() {
            debug!(target: "progress", "Replaced earlier answers for {}", module);
        }
        session.current = module.next();

        Ok(session.current)
    }

    //--- Queries ----------------------------------------------------------

    pub fn current_session(&self) -> Option<&EmotionSession> {
        self.active.and_then(|emotion| self.sessions.get(&emotion))
    }

    pub fn session(&self, emotion: EmotionId) -> Option<&EmotionSession> {
        self.sessions.get(&emotion)
    }

    /// All sessions in emotion order.
    pub fn sessions(&self) -> impl Iterator<Item = &EmotionSession> {
        self.sessions.values()
    }
}

//=== ProgressHandle ======================================================

/// Cloneable, thread-safe handle shared by scenes and the UI layer.
///
/// Accessors return owned snapshots so no lock is held across calls.
#[derive(Debug, Clone, Default)]
pub struct ProgressHandle {
    inner: Arc<Mutex<ProgressStore>>,
}

impl ProgressHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Locks the store. A poisoned lock is recovered.
    pub fn lock(&self) -> MutexGuard<'_, ProgressStore> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn start_emotion_journey(&self, emotion: EmotionId) -> EmotionSession {
        self.lock().start_emotion_journey(emotion).clone()
    }

    pub fn complete_module(
        &self,
        module: ModuleId,
        record: ModuleRecord,
    ) -> Result<Stage, ProgressError> {
        self.lock().complete_module(module, record)
    }

    pub fn current_session(&self) -> Option<EmotionSession> {
        self.lock().current_session().cloned()
    }

    pub fn session(&self, emotion: EmotionId) -> Option<EmotionSession> {
        self.lock().session(emotion).cloned()
    }

    pub fn sessions(&self) -> Vec<EmotionSession> {
        self.lock().sessions().cloned().collect()
    }

    /// Moves the active session straight to `stage`.
    #[cfg(test)]
    pub(crate) fn skip_to(&self, stage: Stage) {
        let mut store = self.lock();
        if let Some(emotion) = store.active {
            if let Some(session) = store.sessions.get_mut(&emotion) {
                session.current = stage;
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
