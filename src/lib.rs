//! TexAnim - texture animation editor library
//!
//! Re-exports all modules for use by the binary target.

// Core engine (session, player, events, export)
pub mod core;

// Document model
pub mod entities;

// App modules
pub mod app;
pub mod cli;
pub mod config;
pub mod dialogs;
pub mod error;
pub mod help;
pub mod hotkeys;
pub mod main_events;
pub mod widgets;

// Re-export commonly used types
pub use app::EditorApp;
pub use core::event_bus::{BoxedEvent, EventBus, downcast_event};
pub use core::player::Player;
pub use core::session::EditSession;
pub use entities::{Document, Node, Property};
pub use error::{EditorError, Result};
