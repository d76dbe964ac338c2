//! Application module - EditorApp and related functionality.
//!
//! - `events` - event bus dispatch, keyboard input, native file dialogs
//! - `run` - the eframe::App implementation (per-frame update and layout)
//! - `settings` - persisted user settings

mod events;
mod run;
mod settings;

pub use settings::AppSettings;

use log::info;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::event_bus::EventBus;
use crate::core::player::Player;
use crate::core::session::EditSession;
use crate::dialogs::{AddFrameDialog, Notice, NoticeQueue};
use crate::hotkeys::HotkeyHandler;
use crate::widgets::preview::PreviewState;
use crate::widgets::properties::PropertiesForm;
use crate::widgets::status::StatusBar;
use crate::widgets::text_editor::TextEditorState;

pub const APP_NAME: &str = "TexAnim";

/// Window title for the open file
pub fn window_title(file: Option<&Path>) -> String {
    match file.and_then(|p| p.file_name()) {
        Some(name) => format!("{} - {}", APP_NAME, name.to_string_lossy()),
        None => APP_NAME.to_string(),
    }
}

/// Main application state.
///
/// Only `settings` and the preview zoom survive a restart; the document is
/// always reopened from disk.
#[derive(Serialize, Deserialize)]
#[serde(default)]
pub struct EditorApp {
    pub settings: AppSettings,
    pub preview: PreviewState,
    #[serde(skip)]
    pub session: EditSession,
    #[serde(skip)]
    pub player: Player,
    /// Global event bus for application-wide events
    #[serde(skip)]
    pub event_bus: EventBus,
    #[serde(skip)]
    pub hotkeys: HotkeyHandler,
    #[serde(skip)]
    pub properties: PropertiesForm,
    #[serde(skip)]
    pub text_editor: TextEditorState,
    #[serde(skip)]
    pub add_frame_dialog: AddFrameDialog,
    #[serde(skip)]
    pub notices: NoticeQueue,
    #[serde(skip)]
    pub status_bar: StatusBar,
    /// Frame index currently in the preview
    #[serde(skip)]
    pub shown_frame: Option<usize>,
    #[serde(skip)]
    pub show_help: bool,
    /// Start playback once the first frame is up (CLI --autoplay)
    #[serde(skip)]
    pub autoplay_pending: bool,
    #[serde(skip)]
    pub title: String,
}

impl Default for EditorApp {
    fn default() -> Self {
        Self {
            settings: AppSettings::default(),
            preview: PreviewState::new(),
            session: EditSession::new(),
            player: Player::new(),
            event_bus: EventBus::new(),
            hotkeys: HotkeyHandler::new(),
            properties: PropertiesForm::new(),
            text_editor: TextEditorState::new(),
            add_frame_dialog: AddFrameDialog::new(),
            notices: NoticeQueue::new(),
            status_bar: StatusBar::new(),
            shown_frame: None,
            show_help: false,
            autoplay_pending: false,
            title: String::new(),
        }
    }
}

impl EditorApp {
    /// Directory file dialogs start in
    pub fn dialog_dir(&self) -> Option<PathBuf> {
        self.session
            .file()
            .and_then(|f| f.parent())
            .map(Path::to_path_buf)
            .or_else(|| self.settings.last_dir.clone())
    }

    pub fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    /// Queue a document to open on the first frame
    pub fn open_on_start(&mut self, path: PathBuf, autoplay: bool) {
        info!("Opening {} on startup", path.display());
        self.event_bus
            .emit(crate::core::document_events::OpenDocumentEvent(path));
        self.autoplay_pending = autoplay;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_title() {
        assert_eq!(window_title(None), "TexAnim");
        assert_eq!(
            window_title(Some(Path::new("/a/b/walk.yaml"))),
            "TexAnim - walk.yaml"
        );
    }

    #[test]
    fn test_persisted_state_skips_runtime() {
        let mut app = EditorApp::default();
        app.settings.fps = 24;
        app.preview.set_zoom(2.0);
        app.show_help = true;
        let json = serde_json::to_string(&app).unwrap();
        let back: EditorApp = serde_json::from_str(&json).unwrap();
        assert_eq!(back.settings.fps, 24);
        assert_eq!(back.preview.zoom, 2.0);
        assert!(!back.show_help);
        assert!(!back.session.has_document());
    }
}
