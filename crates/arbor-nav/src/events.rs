//! Controller notifications and the observer list that delivers them.

use arbor_scene::NodeId;
use std::fmt;

/// Notifications emitted by navigation controllers.
///
/// Firing order is part of the contract: `Deselect` fires before the
/// history it belongs to is cleared, `Select` fires after the history has
/// been seeded, and `Navigate` fires on arrival, before the closing
/// `TransitionChange`.
#[derive(Clone, Debug, PartialEq)]
pub enum NavEvent {
    /// A new node was selected.
    Select { node: NodeId },
    /// The active selection was cleared.
    Deselect,
    /// The camera arrived at a new observed location.
    Navigate { targets: Vec<NodeId> },
    /// An animation started or finished.
    TransitionChange { transitioning: bool },
}

/// A plain callback list.
///
/// Callbacks run synchronously on the frame loop. A panicking callback
/// unwinds into the embedding application's frame handling; nothing is
/// caught or swallowed here.
#[derive(Default)]
pub struct Observers {
    callbacks: Vec<Box<dyn FnMut(&NavEvent)>>,
}

impl Observers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback for every subsequent event.
    pub fn subscribe(&mut self, callback: impl FnMut(&NavEvent) + 'static) {
        self.callbacks.push(Box::new(callback));
    }

    /// Deliver `event` to every callback, in subscription order.
    pub fn emit(&mut self, event: &NavEvent) {
        for callback in &mut self.callbacks {
            callback(event);
        }
    }
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("callbacks", &self.callbacks.len())
            .finish()
    }
}
