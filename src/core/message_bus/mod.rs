//=========================================================================
// Message Bus
//=========================================================================
//
// Typed per-frame message queues shared by systems and scenes.
//
// Components:
// - `message_bus`: The bus and the `Message` marker trait
// - `message_queue`: Type-erased queue storage
//
//=========================================================================

//=== Module Declarations =================================================

mod message_bus;
mod message_queue;

//=== Public API ==========================================================

pub use message_bus::{Message, MessageBus};
