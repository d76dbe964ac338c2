//! Application event handling.
//!
//! Every event emitted by a widget, hotkey or dialog ends up in
//! [`handle_app_event`]. Engine failures are turned into notices here, at the
//! boundary of the action that triggered them; the session keeps its previous
//! state. Work that needs the egui context or a native dialog (uploading a
//! texture, picking a file) is returned in [`EventResult`] and done by the app.

use log::{debug, info, warn};
use std::path::Path;

use crate::app::AppSettings;
use crate::core::document_events::*;
use crate::core::event_bus::{BoxedEvent, downcast_event};
use crate::core::export::ExportSettings;
use crate::core::player::Player;
use crate::core::player_events::*;
use crate::core::session::EditSession;
use crate::dialogs::{AddFrameDialog, Notice};
use crate::error::{EditorError, Result};
use crate::widgets::text_editor::TextEditorState;

/// Result of handling an app event - may contain deferred actions
#[derive(Debug, Default)]
pub struct EventResult {
    /// Frame to put in the preview
    pub display_frame: Option<usize>,
    /// Document replaced: drop cached textures
    pub clear_preview: bool,
    pub notices: Vec<Notice>,
    pub status: Option<String>,
    pub show_open_dialog: bool,
    pub show_save_dialog: bool,
    pub show_export_dialog: bool,
}

impl EventResult {
    fn fail(&mut self, err: &EditorError) {
        warn!("{}", err);
        self.notices.push(Notice::from(err));
    }

    /// Record the outcome of a fallible action
    fn check<T>(&mut self, outcome: Result<T>) -> Option<T> {
        match outcome {
            Ok(v) => Some(v),
            Err(e) => {
                self.fail(&e);
                None
            }
        }
    }
}

fn remember_dir(settings: &mut AppSettings, path: &Path) {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        settings.last_dir = Some(dir.to_path_buf());
    }
}

/// Handle a single app event (called from the app's event loop).
/// Returns Some(result) if the event was handled, None otherwise.
pub fn handle_app_event(
    event: &BoxedEvent,
    session: &mut EditSession,
    player: &mut Player,
    settings: &mut AppSettings,
    text_editor: &TextEditorState,
    add_frame_dialog: &mut AddFrameDialog,
    show_help: &mut bool,
) -> Option<EventResult> {
    let mut result = EventResult::default();
    let frame_count = session.frame_count();

    // === Playback Control ===
    if downcast_event::<TogglePlayPauseEvent>(event).is_some() {
        if let Some(Some(frame)) = result.check(player.toggle(frame_count)) {
            result.display_frame = Some(frame);
        }
        return Some(result);
    }
    if downcast_event::<StartEvent>(event).is_some() {
        if let Some(frame) = result.check(player.start(frame_count)) {
            result.display_frame = Some(frame);
        }
        return Some(result);
    }
    if downcast_event::<PauseEvent>(event).is_some() {
        player.pause();
        return Some(result);
    }
    if downcast_event::<StopEvent>(event).is_some() {
        let frame = player.stop();
        if frame_count > 0 {
            result.display_frame = Some(frame);
        }
        return Some(result);
    }
    if let Some(e) = downcast_event::<ShowFrameEvent>(event) {
        if e.0 < frame_count {
            result.display_frame = Some(e.0);
        }
        return Some(result);
    }
    if let Some(e) = downcast_event::<SetFpsEvent>(event) {
        player.set_fps(e.0);
        settings.fps = player.fps();
        debug!("FPS set to {}", settings.fps);
        return Some(result);
    }
    if let Some(e) = downcast_event::<SetLoopEvent>(event) {
        player.set_loop_enabled(e.0);
        settings.loop_enabled = e.0;
        return Some(result);
    }

    // === Document Management ===
    if downcast_event::<NewDocumentEvent>(event).is_some() {
        player.stop();
        if result.check(session.new_document()).is_some() {
            result.clear_preview = true;
            result.status = Some("New animation".into());
        }
        return Some(result);
    }
    if downcast_event::<OpenDocumentDialogEvent>(event).is_some() {
        result.show_open_dialog = true;
        return Some(result);
    }
    if let Some(e) = downcast_event::<OpenDocumentEvent>(event) {
        if result.check(session.open(&e.0)).is_some() {
            player.stop();
            remember_dir(settings, &e.0);
            result.clear_preview = true;
            if session.frame_count() > 0 {
                result.display_frame = Some(0);
            } else {
                result
                    .notices
                    .push(Notice::warning("No Animations", "No texture frames found in this document."));
            }
            result.status = Some(format!("Opened {}", e.0.display()));
        }
        return Some(result);
    }
    if downcast_event::<SaveDocumentEvent>(event).is_some() {
        if session.file().is_none() {
            result.show_save_dialog = true;
        } else if let Some(path) = result.check(session.save_text(&text_editor.buffer, None)) {
            result.status = Some(format!("Saved {}", path.display()));
        }
        return Some(result);
    }
    if downcast_event::<SaveDocumentAsEvent>(event).is_some() {
        if session.has_document() {
            result.show_save_dialog = true;
        } else {
            result.fail(&EditorError::NotFound("no document open".into()));
        }
        return Some(result);
    }
    if let Some(e) = downcast_event::<SaveDocumentToEvent>(event) {
        if let Some(path) = result.check(session.save_text(&text_editor.buffer, Some(e.0.clone()))) {
            remember_dir(settings, &path);
            result.status = Some(format!("Saved {}", path.display()));
        }
        return Some(result);
    }
    if downcast_event::<ExportGifDialogEvent>(event).is_some() {
        if frame_count == 0 {
            result.fail(&EditorError::Export("no animation frames available to export".into()));
        } else {
            result.show_export_dialog = true;
        }
        return Some(result);
    }
    if let Some(e) = downcast_event::<ExportGifEvent>(event) {
        let export = ExportSettings {
            output: e.0.clone(),
            delay_ms: player.period_ms(),
            loop_forever: player.loop_enabled(),
        };
        if let Some(report) = result.check(session.export_gif(&export)) {
            info!("Exported {} frames to {}", report.frames_written, report.output.display());
            let mut message = format!(
                "Exported {} frames to {}",
                report.frames_written,
                report.output.display()
            );
            if !report.skipped.is_empty() {
                message.push_str(&format!("\n{} frames skipped (texture not found).", report.skipped.len()));
            }
            result.notices.push(Notice::info("Export Complete", message));
        }
        return Some(result);
    }

    // === Frame List ===
    if downcast_event::<ShowAddFrameDialogEvent>(event).is_some() {
        if session.has_document() {
            add_frame_dialog.open();
        } else {
            result.fail(&EditorError::NotFound("no document open".into()));
        }
        return Some(result);
    }
    if let Some(e) = downcast_event::<AddFrameEvent>(event) {
        if let Some(true) = result.check(session.add_frame(&e.0)) {
            result.display_frame = Some(session.frame_count() - 1);
        }
        return Some(result);
    }
    if let Some(e) = downcast_event::<DeleteFrameEvent>(event) {
        result.check(session.delete_frame(e.0));
        return Some(result);
    }
    if let Some(e) = downcast_event::<ReorderFrameEvent>(event) {
        if let Some(true) = result.check(session.reorder_frame(e.from, e.to)) {
            result.display_frame = Some(e.to);
        }
        return Some(result);
    }

    // === Properties ===
    if let Some(e) = downcast_event::<SetPropertyEvent>(event) {
        result.check(session.set_property(&e.0));
        return Some(result);
    }

    // === View ===
    if downcast_event::<ToggleTextEditorEvent>(event).is_some() {
        settings.show_text_editor = !settings.show_text_editor;
        return Some(result);
    }
    if downcast_event::<ToggleHelpEvent>(event).is_some() {
        *show_help = !*show_help;
        return Some(result);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogs::NoticeLevel;
    use std::fs;
    use std::path::PathBuf;

    const ANIM: &str = "\
Name: ''
Loop: false
FrameCount: 1
MaterialAnimConfigs:
- Name: m
  TexturePatternInfos:
  - Name: _a0
    IsConstant: false
    CurveData:
      KeyFrames:
        '0': t/a
        '1': t/b
        '2': t/c
";

    struct Harness {
        _dir: tempfile::TempDir,
        path: PathBuf,
        session: EditSession,
        player: Player,
        settings: AppSettings,
        text_editor: TextEditorState,
        add_frame: AddFrameDialog,
        show_help: bool,
    }

    impl Harness {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("anim.yaml");
            fs::write(&path, ANIM).unwrap();
            Self {
                _dir: dir,
                path,
                session: EditSession::new(),
                player: Player::new(),
                settings: AppSettings::default(),
                text_editor: TextEditorState::new(),
                add_frame: AddFrameDialog::new(),
                show_help: false,
            }
        }

        fn send<E: crate::core::event_bus::Event>(&mut self, event: E) -> EventResult {
            let event: BoxedEvent = Box::new(event);
            let result = handle_app_event(
                &event,
                &mut self.session,
                &mut self.player,
                &mut self.settings,
                &self.text_editor,
                &mut self.add_frame,
                &mut self.show_help,
            )
            .expect("event handled");
            self.text_editor.sync(self.session.text(), self.session.revision());
            result
        }

        fn open(&mut self) -> EventResult {
            let path = self.path.clone();
            self.send(OpenDocumentEvent(path))
        }
    }

    #[test]
    fn test_unknown_event_not_handled() {
        struct Unrelated;
        let mut h = Harness::new();
        let event: BoxedEvent = Box::new(Unrelated);
        assert!(
            handle_app_event(
                &event,
                &mut h.session,
                &mut h.player,
                &mut h.settings,
                &h.text_editor,
                &mut h.add_frame,
                &mut h.show_help,
            )
            .is_none()
        );
    }

    #[test]
    fn test_open_displays_first_frame() {
        let mut h = Harness::new();
        let result = h.open();
        assert_eq!(result.display_frame, Some(0));
        assert!(result.clear_preview);
        assert!(result.notices.is_empty());
        assert_eq!(h.session.frame_count(), 3);
        assert_eq!(h.settings.last_dir.as_deref(), h.path.parent());
    }

    #[test]
    fn test_open_without_frames_warns() {
        let mut h = Harness::new();
        fs::write(&h.path, "Name: empty\n").unwrap();
        let result = h.open();
        assert_eq!(result.display_frame, None);
        assert_eq!(result.notices.len(), 1);
        assert_eq!(result.notices[0].level, NoticeLevel::Warning);
    }

    #[test]
    fn test_open_parse_error_is_notice() {
        let mut h = Harness::new();
        fs::write(&h.path, "a: [1").unwrap();
        let result = h.open();
        assert_eq!(result.notices.len(), 1);
        assert_eq!(result.notices[0].title, "Parse Error");
        assert!(!h.session.has_document());
    }

    #[test]
    fn test_failed_open_keeps_playback() {
        let mut h = Harness::new();
        h.open();
        h.send(StartEvent);
        assert!(h.player.is_playing());

        let missing = h.path.with_file_name("missing.yaml");
        let result = h.send(OpenDocumentEvent(missing));
        assert_eq!(result.notices.len(), 1);
        assert!(h.player.is_playing());
        assert_eq!(h.session.file(), Some(h.path.as_path()));
        assert_eq!(h.session.frame_count(), 3);
    }

    #[test]
    fn test_play_without_frames_reports() {
        let mut h = Harness::new();
        let result = h.send(TogglePlayPauseEvent);
        assert_eq!(result.notices.len(), 1);
        assert!(!h.player.is_playing());
    }

    #[test]
    fn test_toggle_and_stop() {
        let mut h = Harness::new();
        h.open();
        let result = h.send(TogglePlayPauseEvent);
        assert_eq!(result.display_frame, Some(0));
        assert!(h.player.is_playing());
        h.player.tick(3);
        let result = h.send(TogglePlayPauseEvent);
        assert_eq!(result.display_frame, None);
        assert_eq!(h.player.current_frame(3), Some(1));
        let result = h.send(StopEvent);
        assert_eq!(result.display_frame, Some(0));
        assert_eq!(h.player.current_frame(3), Some(0));
    }

    #[test]
    fn test_rate_and_loop_are_remembered() {
        let mut h = Harness::new();
        h.send(SetFpsEvent(500));
        assert_eq!(h.settings.fps, 120);
        h.send(SetLoopEvent(true));
        assert!(h.settings.loop_enabled);
        assert!(h.player.loop_enabled());
    }

    #[test]
    fn test_frame_edits_flow_through_session() {
        let mut h = Harness::new();
        h.open();
        let result = h.send(ReorderFrameEvent { from: 0, to: 2 });
        assert_eq!(result.display_frame, Some(2));
        assert_eq!(h.session.frames(), ["t/b", "t/c", "t/a"]);

        let result = h.send(AddFrameEvent("t/d".into()));
        assert_eq!(result.display_frame, Some(3));
        h.send(DeleteFrameEvent(0));
        assert_eq!(h.session.frames(), ["t/c", "t/a", "t/d"]);
        assert!(fs::read_to_string(&h.path).unwrap().contains("t/d"));
    }

    #[test]
    fn test_add_frame_dialog_needs_document() {
        let mut h = Harness::new();
        let result = h.send(ShowAddFrameDialogEvent);
        assert_eq!(result.notices.len(), 1);
        assert!(!h.add_frame.is_open());
        h.open();
        h.send(ShowAddFrameDialogEvent);
        assert!(h.add_frame.is_open());
    }

    #[test]
    fn test_save_uses_editor_buffer() {
        let mut h = Harness::new();
        h.open();
        h.text_editor.buffer = ANIM.replace("t/c", "t/z");
        let result = h.send(SaveDocumentEvent);
        assert!(result.notices.is_empty());
        assert!(fs::read_to_string(&h.path).unwrap().contains("t/z"));
        assert_eq!(h.session.frames()[2], "t/z");
    }

    #[test]
    fn test_save_invalid_text_keeps_file() {
        let mut h = Harness::new();
        h.open();
        let before = fs::read_to_string(&h.path).unwrap();
        h.text_editor.buffer = "a: [1".into();
        let result = h.send(SaveDocumentEvent);
        assert_eq!(result.notices[0].title, "Parse Error");
        assert_eq!(fs::read_to_string(&h.path).unwrap(), before);
    }

    #[test]
    fn test_save_new_document_asks_for_path() {
        let mut h = Harness::new();
        h.send(NewDocumentEvent);
        let result = h.send(SaveDocumentEvent);
        assert!(result.show_save_dialog);

        let target = h.path.with_file_name("fresh.yaml");
        let result = h.send(SaveDocumentToEvent(target.clone()));
        assert!(result.notices.is_empty());
        assert!(target.is_file());
        assert_eq!(h.session.file(), Some(target.as_path()));
    }

    #[test]
    fn test_export_dialog_requires_frames() {
        let mut h = Harness::new();
        let result = h.send(ExportGifDialogEvent);
        assert!(!result.show_export_dialog);
        assert_eq!(result.notices[0].title, "Export Error");
        h.open();
        let result = h.send(ExportGifDialogEvent);
        assert!(result.show_export_dialog);
    }

    #[test]
    fn test_export_without_textures_fails() {
        let mut h = Harness::new();
        h.open();
        let output = h.path.with_file_name("out.gif");
        let result = h.send(ExportGifEvent(output.clone()));
        assert_eq!(result.notices[0].title, "Export Error");
        assert!(!output.exists());
    }

    #[test]
    fn test_view_toggles() {
        let mut h = Harness::new();
        h.send(ToggleTextEditorEvent);
        assert!(h.settings.show_text_editor);
        h.send(ToggleHelpEvent);
        assert!(h.show_help);
    }
}
