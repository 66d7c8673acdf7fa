//=========================================================================
// Modal Bridge
//=========================================================================
//
// Connects scenes on the core thread to the text-input dialog owned by
// the UI layer.
//
// Architecture:
// ```text
//   Core thread                          UI thread
//   ┌──────────────────────┐             ┌─────────────────────┐
//   │ Scene                │             │ Dialog layer        │
//   │  request_text() ─────┼──> queue ──>│  current()          │
//   │  PendingText::poll() │<── channel ─┤  submit() / cancel()│
//   └──────────────────────┘             └─────────────────────┘
// ```
//
// At most one request is active. Later requests wait in FIFO order and
// are promoted when the active one resolves. Every request resolves
// exactly once, either by the UI or by `sweep` when its scene is torn
// down. Scenes poll their `PendingText` each tick and never block.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use crossbeam_channel::{bounded, Receiver, Sender, TryRecvError};
use log::{debug, info, trace};

//=== Internal Dependencies ===============================================

use super::SceneId;

//=== Request Types =======================================================

/// Unique identifier of one text request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

/// What the dialog should show.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ModalRequest {
    pub title: String,
    pub placeholder: String,
    pub guidance: String,
    pub initial_value: String,
    /// Display hint for the dialog's word counter. Not enforced here.
    pub min_words: Option<usize>,
}

impl ModalRequest {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_guidance(mut self, guidance: impl Into<String>) -> Self {
        self.guidance = guidance.into();
        self
    }

    pub fn with_initial_value(mut self, value: impl Into<String>) -> Self {
        self.initial_value = value.into();
        self
    }

    pub fn with_min_words(mut self, words: usize) -> Self {
        self.min_words = Some(words);
        self
    }
}

/// Snapshot of the active dialog for the UI layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalView {
    pub id: RequestId,
    pub owner: SceneId,
    pub request: ModalRequest,
}

/// How a request was resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalOutcome {
    /// Trimmed text. May be empty, which callers treat as "no answer".
    Submitted(String),
    Cancelled,
}

//=== PendingText =========================================================

/// Caller's side of one request. Poll it once per tick.
#[derive(Debug)]
pub struct PendingText {
    id: RequestId,
    reply: Receiver<ModalOutcome>,
    resolved: bool,
}

impl PendingText {
    pub fn id(&self) -> RequestId {
        self.id
    }

    /// Returns the outcome on the first poll after resolution, then
    /// `None` forever. A bridge dropped mid-request reads as `Cancelled`.
    pub fn poll(&mut self) -> Option<ModalOutcome> {
        if self.resolved {
            return None;
        }
        match self.reply.try_recv() {
            Ok(outcome) => {
                self.resolved = true;
                Some(outcome)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.resolved = true;
                Some(ModalOutcome::Cancelled)
            }
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved
    }
}

//=== ModalBridge =========================================================

struct Entry {
    id: RequestId,
    owner: SceneId,
    request: ModalRequest,
    reply: Sender<ModalOutcome>,
}

impl Entry {
    fn resolve(self, outcome: ModalOutcome) {
        if self.reply.send(outcome).is_err() {
            trace!(target: "modal", "Request {:?} resolved after its caller went away", self.id);
        }
    }
}

#[derive(Default)]
struct BridgeState {
    next_id: u64,
    active: Option<Entry>,
    queue: VecDeque<Entry>,
}

impl BridgeState {
    fn promote(&mut self) {
        if self.active.is_some() {
            return;
        }
        self.active = self.queue.pop_front();
        if let Some(entry) = &self.active {
            info!(target: "modal", "Modal open: '{}' ({:?})", entry.request.title, entry.id);
        }
    }

    fn take_active(&mut self, id: RequestId) -> Option<Entry> {
        match &self.active {
            Some(entry) if entry.id == id => self.active.take(),
            _ => None,
        }
    }
}

/// Cloneable, thread-safe queue of text requests.
#[derive(Clone, Default)]
pub struct ModalBridge {
    inner: Arc<Mutex<BridgeState>>,
}

impl ModalBridge {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, BridgeState> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    //--- Scene Side -------------------------------------------------------

    /// Queues a request owned by `owner`. It becomes active right away
    /// when no other dialog is open.
    pub fn request_text(&self, owner: SceneId, request: ModalRequest) -> PendingText {
        let (reply, receiver) = bounded(1);
        let mut state = self.state();

        state.next_id += 1;
        let id = RequestId(state.next_id);
        debug!(target: "modal", "Queued request {:?} '{}' for {:?}", id, request.title, owner);

        state.queue.push_back(Entry { id, owner, request, reply });
        state.promote();

        PendingText {
            id,
            reply: receiver,
            resolved: false,
        }
    }

    /// Escape-key path. Cancels the active dialog only if `owner` owns it.
    pub fn cancel_active_for(&self, owner: SceneId) -> bool {
        let id = match &self.state().active {
            Some(entry) if entry.owner == owner => entry.id,
            _ => return false,
        };
        self.cancel(id)
    }

    /// Cancels every active and queued request owned by `owner`.
    ///
    /// Returns how many were cancelled. A second call returns 0.
    pub fn sweep(&self, owner: SceneId) -> usize {
        let mut state = self.state();
        let mut swept = Vec::new();

        if state.active.as_ref().is_some_and(|entry| entry.owner == owner) {
            swept.extend(state.active.take());
        }

        let (mine, others): (VecDeque<Entry>, VecDeque<Entry>) =
            std::mem::take(&mut state.queue).into_iter().partition(|entry| entry.owner == owner);
        state.queue = others;
        swept.extend(mine);

        state.promote();
        drop(state);

        let count = swept.len();
        if count > 0 {
            debug!(target: "modal", "Swept {} request(s) owned by {:?}", count, owner);
        }
        for entry in swept {
            entry.resolve(ModalOutcome::Cancelled);
        }
        count
    }

    //--- UI Side ----------------------------------------------------------

    /// The dialog the UI should be showing, if any.
    pub fn current(&self) -> Option<ModalView> {
        self.state().active.as_ref().map(|entry| ModalView {
            id: entry.id,
            owner: entry.owner,
            request: entry.request.clone(),
        })
    }

    pub fn is_open(&self) -> bool {
        self.state().active.is_some()
    }

    /// Number of requests waiting behind the active one.
    pub fn queued(&self) -> usize {
        self.state().queue.len()
    }

    /// Submits text for the active request. Returns `false` for a stale id.
    pub fn submit(&self, id: RequestId, text: &str) -> bool {
        self.resolve(id, ModalOutcome::Submitted(text.trim().to_string()))
    }

    /// Cancels the active request. Returns `false` for a stale id.
    pub fn cancel(&self, id: RequestId) -> bool {
        self.resolve(id, ModalOutcome::Cancelled)
    }

    fn resolve(&self, id: RequestId, outcome: ModalOutcome) -> bool {
        let mut state = self.state();
        let Some(entry) = state.take_active(id) else {
            debug!(target: "modal", "Ignoring resolution for inactive request {:?}", id);
            return false;
        };
        let how = match outcome {
            ModalOutcome::Submitted(_) => "submitted",
            ModalOutcome::Cancelled => "cancelled",
        };
        info!(target: "modal", "Modal closed: {:?} {}", id, how);
        state.promote();
        drop(state);

        entry.resolve(outcome);
        true
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::modules::ModuleId;

    const STONE: SceneId = SceneId::Module(ModuleId::SpeakingStone);
    const PORTAL: SceneId = SceneId::Module(ModuleId::MirrorPortal);

    #[test]
    fn only_first_request_is_visible() {
        let bridge = ModalBridge::new();
        let mut first = bridge.request_text(STONE, ModalRequest::new("Letter"));
        let mut second = bridge.request_text(STONE, ModalRequest::new("Second"));

        assert_eq!(bridge.current().map(|v| v.id), Some(first.id()));
        assert_eq!(bridge.queued(), 1);

        assert!(bridge.submit(first.id(), "  dear me  "));
        assert_eq!(first.poll(), Some(ModalOutcome::Submitted("dear me".into())));
        assert_eq!(bridge.current().map(|v| v.id), Some(second.id()));

        assert!(bridge.cancel(second.id()));
        assert_eq!(second.poll(), Some(ModalOutcome::Cancelled));
        assert!(!bridge.is_open());
    }

    #[test]
    fn outcome_is_delivered_once() {
        let bridge = ModalBridge::new();
        let mut pending = bridge.request_text(STONE, ModalRequest::new("Letter"));
        assert_eq!(pending.poll(), None);

        bridge.submit(pending.id(), "");
        assert_eq!(pending.poll(), Some(ModalOutcome::Submitted(String::new())));
        assert_eq!(pending.poll(), None);
        assert!(pending.is_resolved());
    }

    #[test]
    fn stale_ids_are_rejected() {
        let bridge = ModalBridge::new();
        let first = bridge.request_text(STONE, ModalRequest::new("a"));
        let second = bridge.request_text(STONE, ModalRequest::new("b"));

        assert!(!bridge.submit(second.id(), "queued, not active"));
        assert!(bridge.submit(first.id(), "ok"));
        assert!(!bridge.submit(first.id(), "again"));
    }

    #[test]
    fn cancel_active_for_checks_owner() {
        let bridge = ModalBridge::new();
        let mut pending = bridge.request_text(STONE, ModalRequest::new("a"));

        assert!(!bridge.cancel_active_for(PORTAL));
        assert!(bridge.cancel_active_for(STONE));
        assert_eq!(pending.poll(), Some(ModalOutcome::Cancelled));
    }

    #[test]
    fn sweep_cancels_owned_requests_and_promotes_others() {
        let bridge = ModalBridge::new();
        let mut mine = bridge.request_text(STONE, ModalRequest::new("a"));
        let theirs = bridge.request_text(PORTAL, ModalRequest::new("b"));
        let mut mine_queued = bridge.request_text(STONE, ModalRequest::new("c"));

        assert_eq!(bridge.sweep(STONE), 2);
        assert_eq!(bridge.sweep(STONE), 0);

        assert_eq!(mine.poll(), Some(ModalOutcome::Cancelled));
        assert_eq!(mine_queued.poll(), Some(ModalOutcome::Cancelled));
        assert_eq!(bridge.current().map(|v| v.id), Some(theirs.id()));
        assert_eq!(bridge.queued(), 0);
    }

    #[test]
    fn dropped_bridge_reads_as_cancelled() {
        let bridge = ModalBridge::new();
        let mut pending = bridge.request_text(STONE, ModalRequest::new("a"));
        drop(bridge);
        assert_eq!(pending.poll(), Some(ModalOutcome::Cancelled));
    }

    #[test]
    fn dropped_caller_does_not_block_resolution() {
        let bridge = ModalBridge::new();
        let pending = bridge.request_text(STONE, ModalRequest::new("a"));
        let id = pending.id();
        drop(pending);
        assert!(bridge.submit(id, "nobody listens"));
        assert!(!bridge.is_open());
    }

    #[test]
    fn ui_thread_can_resolve() {
        let bridge = ModalBridge::new();
        let mut pending = bridge.request_text(STONE, ModalRequest::new("a").with_min_words(10));

        let ui = bridge.clone();
        std::thread::spawn(move || {
            let view = ui.current().unwrap();
            assert_eq!(view.request.min_words, Some(10));
            ui.submit(view.id, "from the ui");
        })
        .join()
        .unwrap();

        assert_eq!(pending.poll(), Some(ModalOutcome::Submitted("from the ui".into())));
    }
}
