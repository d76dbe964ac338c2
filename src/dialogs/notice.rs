//! Blocking notices.
//!
//! Every failed user action ends up here as one modal message. Notices queue
//! up and are shown one at a time; an identical notice already waiting is not
//! queued twice (a missing texture during playback would otherwise stack one
//! per tick).

use eframe::egui;
use std::collections::VecDeque;

use crate::error::EditorError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: title.into(),
            message: message.into(),
        }
    }
}

impl From<&EditorError> for Notice {
    fn from(err: &EditorError) -> Self {
        let level = match err {
            EditorError::NotFound(_) => NoticeLevel::Warning,
            _ => NoticeLevel::Error,
        };
        Self {
            level,
            title: err.title().to_string(),
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Default)]
pub struct NoticeQueue {
    pending: VecDeque<Notice>,
}

impl NoticeQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notice: Notice) {
        if !self.pending.contains(&notice) {
            self.pending.push_back(notice);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn current(&self) -> Option<&Notice> {
        self.pending.front()
    }

    pub fn dismiss(&mut self) -> Option<Notice> {
        self.pending.pop_front()
    }

    /// Show the front notice as a modal. Enter, Escape or OK dismisses it.
    pub fn render(&mut self, ctx: &egui::Context) {
        let Some(notice) = self.pending.front() else {
            return;
        };
        let (icon, color) = match notice.level {
            NoticeLevel::Info => ("ℹ", ctx.style().visuals.hyperlink_color),
            NoticeLevel::Warning => ("⚠", ctx.style().visuals.warn_fg_color),
            NoticeLevel::Error => ("✖", ctx.style().visuals.error_fg_color),
        };

        let mut dismissed = false;
        let response = egui::Modal::new(egui::Id::new("notice_modal")).show(ctx, |ui| {
            ui.set_max_width(420.0);
            ui.horizontal(|ui| {
                ui.colored_label(color, icon);
                ui.heading(&notice.title);
            });
            ui.separator();
            ui.label(&notice.message);
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
                if self.pending.len() > 1 {
                    ui.weak(format!("{} more", self.pending.len() - 1));
                }
            });
            if ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                dismissed = true;
            }
        });
        if dismissed || response.should_close() {
            self.pending.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_error() {
        let notice = Notice::from(&EditorError::NotFound("texture a/b".into()));
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert_eq!(notice.title, "Not Found");
        assert!(notice.message.contains("a/b"));

        let notice = Notice::from(&EditorError::Parse("bad".into()));
        assert_eq!(notice.level, NoticeLevel::Error);
    }

    #[test]
    fn test_queue_dedupes_waiting_notices() {
        let mut queue = NoticeQueue::new();
        queue.push(Notice::warning("Not Found", "a"));
        queue.push(Notice::warning("Not Found", "a"));
        queue.push(Notice::info("Export", "done"));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.dismiss().map(|n| n.message), Some("a".to_string()));
        queue.push(Notice::warning("Not Found", "a"));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.current().map(|n| n.level), Some(NoticeLevel::Info));
    }
}
