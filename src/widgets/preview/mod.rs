//! Frame preview widget
//!
//! Displays the current frame texture centred over a checkered background.

mod preview;
pub mod preview_ui;

pub use preview::{PreviewState, ZOOM_MAX, ZOOM_MIN};
pub use preview_ui::render;
