//! Playback controller for the frame list.
//!
//! **Architecture**: Player does NOT own the frame list. Every operation that
//! depends on it receives the current frame count, so structural edits made
//! during playback are honoured on the next tick.
//!
//! # States
//!
//! - **Stopped**: index 0, no ticking
//! - **Playing**: ticking every `1000 / fps` ms (integer division)
//! - **Paused**: no ticking, index preserved
//!
//! # Tick
//!
//! Each tick advances the index by one. Past the last frame the index wraps to
//! 0 when looping, otherwise playback stops and rewinds to 0.
//!
//! # Clock
//!
//! [`Player::update`] is called from the UI loop with the current time and
//! fires at most one tick once a full period has elapsed. [`Player::tick`] is
//! the clock-free step used by tests and by any external tick source.

use log::{info, trace};
use std::time::{Duration, Instant};

use crate::error::{EditorError, Result};

pub const FPS_MIN: u32 = 1;
pub const FPS_MAX: u32 = 120;
pub const FPS_DEFAULT: u32 = 30;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// What a tick did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    /// Moved to this frame (display it)
    Advanced(usize),
    /// Passed the end and wrapped to frame 0 (display it)
    Wrapped,
    /// Passed the end without loop: now Stopped at index 0
    Finished,
}

impl Tick {
    /// Frame index to display after this tick
    pub fn frame(self) -> usize {
        match self {
            Tick::Advanced(i) => i,
            Tick::Wrapped | Tick::Finished => 0,
        }
    }
}

/// Playback state manager (does NOT own frames)
#[derive(Clone, Debug)]
pub struct Player {
    state: PlaybackState,
    current: usize,
    fps: u32,
    loop_enabled: bool,
    /// Time of the last tick or (re)start of the interval (runtime-only)
    last_tick: Option<Instant>,
}

impl Player {
    pub fn new() -> Self {
        Self {
            state: PlaybackState::Stopped,
            current: 0,
            fps: FPS_DEFAULT,
            loop_enabled: false,
            last_tick: None,
        }
    }

    // === Accessors ===

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Current frame index; `None` when there are no frames
    pub fn current_frame(&self, frame_count: usize) -> Option<usize> {
        (frame_count > 0).then(|| self.current.min(frame_count - 1))
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn loop_enabled(&self) -> bool {
        self.loop_enabled
    }

    pub fn set_loop_enabled(&mut self, enabled: bool) {
        self.loop_enabled = enabled;
        info!("Loop {}", if enabled { "enabled" } else { "disabled" });
    }

    /// Tick period in milliseconds: `1000 / fps`, truncated
    pub fn period_ms(&self) -> u64 {
        1000 / u64::from(self.fps)
    }

    pub fn period(&self) -> Duration {
        Duration::from_millis(self.period_ms())
    }

    /// Set rate (clamped to 1..=120). While playing the interval restarts
    /// immediately at the new period; the current index is kept.
    pub fn set_fps(&mut self, fps: u32) {
        self.fps = fps.clamp(FPS_MIN, FPS_MAX);
        if self.is_playing() {
            self.last_tick = Some(Instant::now());
            trace!("Interval restarted at {}ms", self.period_ms());
        }
    }

    // === Transitions ===

    /// Start from Stopped or Paused. Always restarts at frame 0.
    /// Returns the frame to display.
    pub fn start(&mut self, frame_count: usize) -> Result<usize> {
        if frame_count == 0 {
            return Err(EditorError::NotFound("no animation frames available".into()));
        }
        self.current = 0;
        self.state = PlaybackState::Playing;
        self.last_tick = Some(Instant::now());
        info!("Playback started: {} frames at {} fps", frame_count, self.fps);
        Ok(0)
    }

    /// Playing → Paused, index preserved
    pub fn pause(&mut self) {
        if self.is_playing() {
            self.state = PlaybackState::Paused;
            self.last_tick = None;
            trace!("Paused at frame {}", self.current);
        }
    }

    /// Any state → Stopped at frame 0. Returns the frame to display.
    pub fn stop(&mut self) -> usize {
        if self.state != PlaybackState::Stopped {
            trace!("Playback stopped");
        }
        self.state = PlaybackState::Stopped;
        self.current = 0;
        self.last_tick = None;
        0
    }

    /// Pause when playing, otherwise start
    pub fn toggle(&mut self, frame_count: usize) -> Result<Option<usize>> {
        if self.is_playing() {
            self.pause();
            Ok(None)
        } else {
            self.start(frame_count).map(Some)
        }
    }

    /// Advance one frame. No-op (None) unless Playing.
    pub fn tick(&mut self, frame_count: usize) -> Option<Tick> {
        if !self.is_playing() {
            return None;
        }
        self.current += 1;
        if self.current >= frame_count {
            if self.loop_enabled && frame_count > 0 {
                trace!("Frame loop: -> 0");
                self.current = 0;
                return Some(Tick::Wrapped);
            }
            trace!("Reached end, stopping");
            self.stop();
            return Some(Tick::Finished);
        }
        Some(Tick::Advanced(self.current))
    }

    /// Drive ticks from the host clock. Fires at most one tick per call.
    pub fn update(&mut self, now: Instant, frame_count: usize) -> Option<Tick> {
        if !self.is_playing() {
            return None;
        }
        let last = *self.last_tick.get_or_insert(now);
        if now.duration_since(last) >= self.period() {
            self.last_tick = Some(now);
            return self.tick(frame_count);
        }
        None
    }

    /// Time left until the next tick is due
    pub fn until_next_tick(&self, now: Instant) -> Option<Duration> {
        let last = self.last_tick?;
        if !self.is_playing() {
            return None;
        }
        Some(self.period().saturating_sub(now.duration_since(last)))
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_requires_frames() {
        let mut p = Player::new();
        assert!(matches!(p.start(0), Err(EditorError::NotFound(_))));
        assert_eq!(p.state(), PlaybackState::Stopped);
    }

    #[test]
    fn test_no_loop_runs_to_end_and_stops() {
        let mut p = Player::new();
        p.set_fps(10);
        assert_eq!(p.start(5).unwrap(), 0);
        for _ in 0..4 {
            p.tick(5);
        }
        assert_eq!(p.current_frame(5), Some(4));
        assert_eq!(p.state(), PlaybackState::Playing);

        assert_eq!(p.tick(5), Some(Tick::Finished));
        assert_eq!(p.state(), PlaybackState::Stopped);
        assert_eq!(p.current_frame(5), Some(0));
        assert_eq!(p.tick(5), None);
    }

    #[test]
    fn test_loop_wraps() {
        let mut p = Player::new();
        p.set_loop_enabled(true);
        p.start(3).unwrap();
        let ticks: Vec<Tick> = (0..10).filter_map(|_| p.tick(3)).collect();
        assert_eq!(ticks[2], Tick::Wrapped);
        assert_eq!(p.current_frame(3), Some(10 % 3));
        assert_eq!(p.state(), PlaybackState::Playing);
    }

    #[test]
    fn test_pause_keeps_index_and_start_rewinds() {
        let mut p = Player::new();
        p.start(4).unwrap();
        p.tick(4);
        p.tick(4);
        p.pause();
        assert_eq!(p.state(), PlaybackState::Paused);
        assert_eq!(p.current_frame(4), Some(2));
        assert_eq!(p.tick(4), None);

        assert_eq!(p.toggle(4).unwrap(), Some(0));
        assert_eq!(p.current_frame(4), Some(0));
        assert_eq!(p.toggle(4).unwrap(), None);
        assert_eq!(p.state(), PlaybackState::Paused);
    }

    #[test]
    fn test_stop_from_paused() {
        let mut p = Player::new();
        p.start(4).unwrap();
        p.tick(4);
        p.pause();
        assert_eq!(p.stop(), 0);
        assert_eq!(p.state(), PlaybackState::Stopped);
        assert_eq!(p.current_frame(4), Some(0));
    }

    #[test]
    fn test_period_truncates() {
        let mut p = Player::new();
        p.set_fps(3);
        assert_eq!(p.period_ms(), 333);
        p.set_fps(7);
        assert_eq!(p.period_ms(), 142);
        p.set_fps(0);
        assert_eq!(p.fps(), 1);
        assert_eq!(p.period_ms(), 1000);
        p.set_fps(500);
        assert_eq!(p.fps(), 120);
        assert_eq!(p.period_ms(), 8);
    }

    #[test]
    fn test_rate_change_keeps_index() {
        let mut p = Player::new();
        p.start(6).unwrap();
        p.tick(6);
        p.tick(6);
        p.set_fps(60);
        assert_eq!(p.current_frame(6), Some(2));
        assert!(p.is_playing());
    }

    #[test]
    fn test_update_fires_after_period() {
        let mut p = Player::new();
        p.set_fps(10);
        p.start(3).unwrap();
        let t0 = Instant::now();
        p.last_tick = Some(t0);
        assert_eq!(p.update(t0 + Duration::from_millis(50), 3), None);
        assert_eq!(
            p.update(t0 + Duration::from_millis(100), 3),
            Some(Tick::Advanced(1))
        );
        assert_eq!(
            p.until_next_tick(t0 + Duration::from_millis(130)),
            Some(Duration::from_millis(70))
        );
    }

    #[test]
    fn test_shrinking_frame_list_during_playback() {
        let mut p = Player::new();
        p.start(5).unwrap();
        p.tick(5);
        p.tick(5);
        // List shrank to two frames: next tick passes the end
        assert_eq!(p.tick(2), Some(Tick::Finished));
        assert_eq!(p.current_frame(2), Some(0));
    }

    #[test]
    fn test_current_frame_empty() {
        let p = Player::new();
        assert_eq!(p.current_frame(0), None);
    }
}
