//! Property form widget
//!
//! Edits the animation's top-level fields and material names. Every commit
//! is sent as a `SetPropertyEvent`; the form itself never writes the document.

mod properties;
pub mod properties_ui;

pub use properties::PropertiesForm;
pub use properties_ui::render;
