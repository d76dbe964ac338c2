//! Core engine modules - session, player, events, export
//!
//! These modules form the editing engine, independent of UI.

pub mod document_events;
pub mod event_bus;
pub mod export;
pub mod player;
pub mod player_events;
pub mod session;
pub mod textures;

// Re-exports for convenience
pub use event_bus::EventBus;
pub use export::{ExportReport, ExportSettings};
pub use player::Player;
pub use session::EditSession;
