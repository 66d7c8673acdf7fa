//=========================================================================
// Message Bus
//=========================================================================
//
// Type-safe multi-consumer message queue for inter-system communication.
//
// Architecture:
//   InputSystem ── push<A>() ──┐
//   Scenes ── push<InputContext>() ──> HashMap<TypeId, Vec<M>>
//                                            ↓
//   Scenes / GlobalSystems ←── read<M>() (shared)
//                                            ↓
//   GlobalSystems ─────────→ clear<M>() at tick boundary
//
// Pattern: push → read (N consumers) → clear → repeat
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::TypeId;
use std::collections::HashMap;

//=== Internal Dependencies ===============================================

use super::message_queue::MessageQueue;

//=== Public API ==========================================================

/// Marker trait for types that can be sent through the MessageBus.
///
/// Automatically implemented for all types that are Send + 'static.
pub trait Message: Send + 'static {}

impl<T: Send + 'static> Message for T {}

//=== MessageBus ==========================================================

/// Type-safe message queue for batched inter-system communication.
///
/// Maintains separate queues per message type. Actions mapped from
/// input land here each tick, and scenes post requests (such as input
/// context switches) that the systems apply after the scene update.
#[derive(Default)]
pub struct MessageBus {
    queues: HashMap<TypeId, Box<dyn MessageQueue>>,
}

impl MessageBus {
    /// Creates a new empty message bus.
    pub fn new() -> Self {
        Self {
            queues: HashMap::new(),
        }
    }

    //--- Message Operations -----------------------------------------------

    /// Pushes a message into the queue for its type.
    pub fn push<M: Message>(&mut self, msg: M) {
        let queue = self
            .queues
            .entry(TypeId::of::<M>())
            .or_insert_with(|| Box::new(Vec::<M>::new()));

        // Entries are keyed by TypeId, so the downcast always matches.
        if let Some(queue) = queue.as_any_mut().downcast_mut::<Vec<M>>() {
            queue.push(msg);
        }
    }

    /// Returns a slice of all messages of type M currently queued.
    ///
    /// Multiple consumers may read the same messages within a tick.
    pub fn read<M: Message>(&self) -> &[M] {
        self.queue::<M>().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Removes and returns every message of type M.
    pub fn drain<M: Message>(&mut self) -> Vec<M> {
        self.queues
            .get_mut(&TypeId::of::<M>())
            .and_then(|q| q.as_any_mut().downcast_mut::<Vec<M>>())
            .map(|v| v.drain(..).collect())
            .unwrap_or_default()
    }

    //--- Query API --------------------------------------------------------

    /// Returns true if there are any messages of type M queued.
    pub fn has_messages<M: Message>(&self) -> bool {
        self.count::<M>() > 0
    }

    /// Returns the number of messages of type M currently queued.
    pub fn count<M: Message>(&self) -> usize {
        self.queue::<M>().map(Vec::len).unwrap_or(0)
    }

    //--- Clearing ---------------------------------------------------------

    /// Clears all messages of type M, preserving allocated capacity.
    pub fn clear<M: Message>(&mut self) {
        if let Some(queue) = self.queues.get_mut(&TypeId::of::<M>()) {
            queue.clear_queue();
        }
    }

    /// Clears all queues for all message types, preserving capacity.
    pub fn clear_all(&mut self) {
        for queue in self.queues.values_mut() {
            queue.clear_queue();
        }
    }

    fn queue<M: Message>(&self) -> Option<&Vec<M>> {
        self.queues
            .get(&TypeId::of::<M>())
            .and_then(|q| q.as_any().downcast_ref::<Vec<M>>())
    }
}

//=========================================================================
// Tests
//=========================================================================
