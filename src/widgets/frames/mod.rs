//! Frame list panel
//!
//! Ordered animation frames with drag-and-drop reordering, plus the set of
//! distinct textures the document references.

pub mod frames_ui;

pub use frames_ui::render;
