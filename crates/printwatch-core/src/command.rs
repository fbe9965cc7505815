//! Host command interface
//!
//! Service invocation is fire-and-forget: the host offers no completion
//! signal and no return value. The outcome of a command is observed
//! indirectly through the next store update (or not at all).

use crate::entity::EntityId;

/// Sink for service calls into the host dashboard.
///
/// Implementations forward `(domain, action, entity)` to the host's
/// service layer. No retry logic belongs here; a command that had no
/// effect simply leaves the store unchanged.
pub trait CommandSink {
    /// Invoke a host service against a single entity.
    fn invoke(&self, domain: &str, action: &str, entity: &EntityId);
}

/// Press a button entity (`button.press`).
pub fn press_button(sink: &dyn CommandSink, entity: &EntityId) {
    sink.invoke("button", "press", entity);
}
