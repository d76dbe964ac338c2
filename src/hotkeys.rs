//! Keyboard shortcuts.
//!
//! Bindings map a key combo string (`"Ctrl+Shift+S"`) to an action; the app
//! turns the action into the matching event.

use eframe::egui;
use std::collections::HashMap;

use crate::core::document_events::*;
use crate::core::event_bus::BoxedEvent;
use crate::core::player_events::{StopEvent, TogglePlayPauseEvent};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HotkeyAction {
    NewDocument,
    Open,
    Save,
    SaveAs,
    ExportGif,
    ToggleTextEditor,
    ToggleHelp,
    TogglePlayPause,
    Stop,
}

impl HotkeyAction {
    pub fn to_event(self) -> BoxedEvent {
        match self {
            HotkeyAction::NewDocument => Box::new(NewDocumentEvent),
            HotkeyAction::Open => Box::new(OpenDocumentDialogEvent),
            HotkeyAction::Save => Box::new(SaveDocumentEvent),
            HotkeyAction::SaveAs => Box::new(SaveDocumentAsEvent),
            HotkeyAction::ExportGif => Box::new(ExportGifDialogEvent),
            HotkeyAction::ToggleTextEditor => Box::new(ToggleTextEditorEvent),
            HotkeyAction::ToggleHelp => Box::new(ToggleHelpEvent),
            HotkeyAction::TogglePlayPause => Box::new(TogglePlayPauseEvent),
            HotkeyAction::Stop => Box::new(StopEvent),
        }
    }
}

/// Hotkey handler for managing keyboard shortcuts
#[derive(Debug)]
pub struct HotkeyHandler {
    bindings: HashMap<String, HotkeyAction>,
}

impl Default for HotkeyHandler {
    fn default() -> Self {
        let mut handler = Self {
            bindings: HashMap::new(),
        };
        handler.setup_default_bindings();
        handler
    }
}

impl HotkeyHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_binding(&mut self, key: &str, action: HotkeyAction) {
        self.bindings.insert(key.to_string(), action);
    }

    pub fn setup_default_bindings(&mut self) {
        use HotkeyAction::*;
        self.add_binding("F1", ToggleHelp);
        self.add_binding("Ctrl+N", NewDocument);
        self.add_binding("Ctrl+O", Open);
        self.add_binding("Ctrl+S", Save);
        self.add_binding("Ctrl+Shift+S", SaveAs);
        self.add_binding("Ctrl+E", ExportGif);
        self.add_binding("Ctrl+T", ToggleTextEditor);
        self.add_binding("Space", TogglePlayPause);
        self.add_binding("Escape", Stop);
    }

    pub fn handle_key(&self, key: &str) -> Option<HotkeyAction> {
        self.bindings.get(key).copied()
    }

    /// Look up `key` with a modifier prefix (`Ctrl+`, `Shift+`, `Alt+`)
    pub fn handle_key_with_modifiers(
        &self,
        key: &str,
        ctrl: bool,
        shift: bool,
        alt: bool,
    ) -> Option<HotkeyAction> {
        let mut key_combo = String::new();
        if ctrl {
            key_combo.push_str("Ctrl+");
        }
        if shift {
            key_combo.push_str("Shift+");
        }
        if alt {
            key_combo.push_str("Alt+");
        }
        key_combo.push_str(key);
        self.handle_key(&key_combo)
    }

    /// First bound key press this frame.
    ///
    /// While a text field has focus only Ctrl combos and function keys fire,
    /// so typing a space or pressing Escape stays with the field.
    pub fn handle_input(&self, input: &egui::InputState, text_focus: bool) -> Option<HotkeyAction> {
        for event in &input.events {
            if let egui::Event::Key {
                key,
                pressed: true,
                repeat: false,
                modifiers,
                ..
            } = event
            {
                let key_str = format!("{:?}", key);
                let is_function_key = key_str.starts_with('F') && key_str.len() > 1;
                if text_focus && !modifiers.command && !is_function_key {
                    continue;
                }
                if let Some(action) = self.handle_key_with_modifiers(
                    &key_str,
                    modifiers.command,
                    modifiers.shift,
                    modifiers.alt,
                ) {
                    return Some(action);
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::event_bus::downcast_event;

    #[test]
    fn test_default_bindings() {
        let handler = HotkeyHandler::new();
        assert_eq!(
            handler.handle_key_with_modifiers("S", true, false, false),
            Some(HotkeyAction::Save)
        );
        assert_eq!(
            handler.handle_key_with_modifiers("S", true, true, false),
            Some(HotkeyAction::SaveAs)
        );
        assert_eq!(
            handler.handle_key_with_modifiers("T", true, false, false),
            Some(HotkeyAction::ToggleTextEditor)
        );
        assert_eq!(handler.handle_key("Space"), Some(HotkeyAction::TogglePlayPause));
        assert_eq!(handler.handle_key_with_modifiers("S", false, false, false), None);
    }

    #[test]
    fn test_action_event() {
        let event = HotkeyAction::ExportGif.to_event();
        assert!(downcast_event::<ExportGifDialogEvent>(&event).is_some());
        let event = HotkeyAction::Stop.to_event();
        assert!(downcast_event::<StopEvent>(&event).is_some());
    }
}
