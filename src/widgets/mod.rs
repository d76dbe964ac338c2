//! UI Widgets - modular, reusable UI components
//!
//! Each widget is self-contained and communicates via EventBus

pub mod file_dialogs;
pub mod frames;
pub mod preview;
pub mod properties;
pub mod status;
pub mod text_editor;
pub mod transport;

use crate::core::event_bus::{BoxedEvent, Event};

/// Widget result - all actions via events
#[derive(Default)]
pub struct WidgetActions {
    pub hovered: bool,
    pub events: Vec<BoxedEvent>,
}

impl WidgetActions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push event to be dispatched
    pub fn send<E: Event>(&mut self, event: E) {
        self.events.push(Box::new(event));
    }
}
