//! Broadcast hub with drop-to-unsubscribe bindings.

use crate::event::{PointerEvent, scroll_lines, window_to_ndc};
use glam::Vec2;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};
use tracing::trace;
use winit::event::{MouseButton, MouseScrollDelta};

type EventQueue = Rc<RefCell<VecDeque<PointerEvent>>>;

/// A live subscription to an [`InputHub`].
///
/// The hub only holds a weak reference: dropping the binding is the one and
/// only unsubscription, which makes double-removal unrepresentable.
#[derive(Debug)]
pub struct InputBinding {
    queue: EventQueue,
}

impl InputBinding {
    /// Take all events queued since the last drain, oldest first.
    pub fn drain(&self) -> Vec<PointerEvent> {
        self.queue.borrow_mut().drain(..).collect()
    }
}

/// Fan-out point between the window loop and connected controllers.
///
/// Owns the viewport size so cursor positions are delivered already in
/// normalized device coordinates. Single-threaded by design: everything
/// runs on the render/event loop.
#[derive(Debug)]
pub struct InputHub {
    subscribers: Vec<Weak<RefCell<VecDeque<PointerEvent>>>>,
    width: f32,
    height: f32,
}

impl InputHub {
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            subscribers: Vec::new(),
            width,
            height,
        }
    }

    /// Register a new subscriber. Events dispatched after this call are
    /// queued on the returned binding until drained.
    pub fn subscribe(&mut self) -> InputBinding {
        let queue: EventQueue = Rc::new(RefCell::new(VecDeque::new()));
        self.subscribers.push(Rc::downgrade(&queue));
        InputBinding { queue }
    }

    /// Number of live subscribers (dropped bindings are pruned lazily).
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .iter()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }

    /// Current viewport size.
    #[must_use]
    pub fn viewport(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// Forward a cursor position in window coordinates.
    pub fn cursor_moved(&mut self, x: f32, y: f32) {
        let ndc = window_to_ndc(Vec2::new(x, y), self.width, self.height);
        self.dispatch(PointerEvent::CursorMoved { ndc });
    }

    /// Forward a button press.
    pub fn button_pressed(&mut self, button: MouseButton) {
        self.dispatch(PointerEvent::ButtonPressed { button });
    }

    /// Forward a scroll wheel delta.
    pub fn wheel(&mut self, delta: MouseScrollDelta) {
        self.dispatch(PointerEvent::Wheel {
            lines: scroll_lines(delta),
        });
    }

    /// Record a viewport resize and notify subscribers.
    pub fn resized(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.dispatch(PointerEvent::Resized { width, height });
    }

    fn dispatch(&mut self, event: PointerEvent) {
        trace!(?event, "dispatch pointer event");
        self.subscribers.retain(|weak| match weak.upgrade() {
            Some(queue) => {
                queue.borrow_mut().push_back(event);
                true
            }
            None => false,
        });
    }
}
