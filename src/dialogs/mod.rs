//! Modal dialogs: frame path entry and blocking notices.

pub mod add_frame;
pub mod notice;

pub use add_frame::AddFrameDialog;
pub use notice::{Notice, NoticeLevel, NoticeQueue};
