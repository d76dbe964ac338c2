//! Player and playback events.

// === Playback Control ===

/// Start from frame 0
#[derive(Clone, Debug)]
pub struct StartEvent;

#[derive(Clone, Debug)]
pub struct PauseEvent;

#[derive(Clone, Debug)]
pub struct StopEvent;

#[derive(Clone, Debug)]
pub struct TogglePlayPauseEvent;

/// Show a frame without playing (frame list click)
#[derive(Clone, Debug)]
pub struct ShowFrameEvent(pub usize);

// === Settings ===

#[derive(Clone, Debug)]
pub struct SetFpsEvent(pub u32);

#[derive(Clone, Debug)]
pub struct SetLoopEvent(pub bool);
