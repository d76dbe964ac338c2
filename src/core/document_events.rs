//! Document and frame-list events.

use std::path::PathBuf;

use crate::entities::document::Property;

// === Document Management ===

#[derive(Clone, Debug)]
pub struct NewDocumentEvent;

/// Show file picker, then open
#[derive(Clone, Debug)]
pub struct OpenDocumentDialogEvent;

#[derive(Clone, Debug)]
pub struct OpenDocumentEvent(pub PathBuf);

/// Save the editor text to the open file (or ask for one)
#[derive(Clone, Debug)]
pub struct SaveDocumentEvent;

#[derive(Clone, Debug)]
pub struct SaveDocumentAsEvent;

/// Save the editor text to this path (after a save-as dialog)
#[derive(Clone, Debug)]
pub struct SaveDocumentToEvent(pub PathBuf);

#[derive(Clone, Debug)]
pub struct ExportGifDialogEvent;

#[derive(Clone, Debug)]
pub struct ExportGifEvent(pub PathBuf);

// === Frame List ===

#[derive(Clone, Debug)]
pub struct ShowAddFrameDialogEvent;

#[derive(Clone, Debug)]
pub struct AddFrameEvent(pub String);

#[derive(Clone, Debug)]
pub struct DeleteFrameEvent(pub usize);

/// Move frame `from` so it lands at index `to`
#[derive(Clone, Debug)]
pub struct ReorderFrameEvent {
    pub from: usize,
    pub to: usize,
}

// === Properties ===

#[derive(Clone, Debug)]
pub struct SetPropertyEvent(pub Property);

// === View ===

#[derive(Clone, Debug)]
pub struct ToggleTextEditorEvent;

#[derive(Clone, Debug)]
pub struct ToggleHelpEvent;
