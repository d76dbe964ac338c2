//! Deferred event queue for decoupled UI → engine communication.
//!
//! Architecture:
//! - Widgets never touch the session. They emit typed events.
//! - The app drains the queue once per frame via `poll()` and routes each
//!   event to its handler (see `main_events`).
//!
//! Everything runs on the UI thread, so the queue is a shared
//! `Rc<RefCell<..>>` rather than a lock.

use log::warn;
use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

/// Maximum events in queue before oldest are evicted
const MAX_QUEUE_SIZE: usize = 1000;

/// Marker trait for events
pub trait Event: Any + 'static {
    fn as_any(&self) -> &dyn Any;
    fn type_name(&self) -> &'static str;
}

// Blanket impl for all qualifying types
impl<T: Any + 'static> Event for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// Boxed event for queue storage
pub type BoxedEvent = Box<dyn Event>;

type Queue = Rc<RefCell<Vec<BoxedEvent>>>;

fn push_bounded(queue: &Queue, event: BoxedEvent) {
    let mut queue = queue.borrow_mut();
    if queue.len() >= MAX_QUEUE_SIZE {
        let evict_count = queue.len() / 2;
        warn!("EventBus queue full ({} events), evicting oldest {}", queue.len(), evict_count);
        queue.drain(0..evict_count);
    }
    queue.push(event);
}

/// Event queue owned by the app
#[derive(Clone, Default)]
pub struct EventBus {
    queue: Queue,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit<E: Event>(&self, event: E) {
        push_bounded(&self.queue, Box::new(event));
    }

    /// Emit boxed event (for dynamic dispatch)
    pub fn emit_boxed(&self, event: BoxedEvent) {
        push_bounded(&self.queue, event);
    }

    /// Take all queued events, oldest first
    pub fn poll(&self) -> Vec<BoxedEvent> {
        std::mem::take(&mut *self.queue.borrow_mut())
    }

    pub fn queue_len(&self) -> usize {
        self.queue.borrow().len()
    }
}

/// Helper: downcast BoxedEvent to concrete type
///
/// IMPORTANT: Must explicitly deref to `dyn Event` before calling `as_any()`.
/// Without explicit deref, the blanket impl `Event for Box<dyn Event>` intercepts
/// the call and returns `&dyn Any` containing `Box<dyn Event>` instead of the
/// original type, causing downcast to always fail.
#[inline]
pub fn downcast_event<E: Event>(event: &BoxedEvent) -> Option<&E> {
    (**event).as_any().downcast_ref::<E>()
}
