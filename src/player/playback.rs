//! Simulated playback clock
//!
//! The watch screen has no real video pipeline: a one-second tick advances
//! the position while playing, and everything shown on screen is derived
//! from that position.

use std::time::Duration;

/// Runtime of the simulated feature (2h 2min)
pub const DEFAULT_TOTAL_SECS: u32 = 7320;

/// Inactivity before the transport controls are hidden
pub const DEFAULT_IDLE_HIDE: Duration = Duration::from_secs(3);

/// Playback state of one watch session
///
/// Invariant: `position_secs <= total_secs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackState {
    position_secs: u32,
    total_secs: u32,
    is_playing: bool,
    is_muted: bool,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new(DEFAULT_TOTAL_SECS)
    }
}

impl PlaybackState {
    /// Fresh session: playing, unmuted, at the start
    pub fn new(total_secs: u32) -> Self {
        Self {
            position_secs: 0,
            total_secs,
            is_playing: true,
            is_muted: false,
        }
    }

    pub fn position_secs(&self) -> u32 {
        self.position_secs
    }

    pub fn total_secs(&self) -> u32 {
        self.total_secs
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn is_muted(&self) -> bool {
        self.is_muted
    }

    /// Advance one second if playing. Clamps at the end without pausing.
    pub fn tick(&mut self) {
        if self.is_playing {
            self.position_secs = self.position_secs.saturating_add(1).min(self.total_secs);
        }
    }

    /// Flip between playing and paused
    pub fn toggle_play(&mut self) {
        self.is_playing = !self.is_playing;
    }

    pub fn toggle_mute(&mut self) {
        self.is_muted = !self.is_muted;
    }

    /// Completion in percent (0.0 - 100.0)
    pub fn progress_percent(&self) -> f64 {
        if self.total_secs == 0 {
            return 0.0;
        }
        self.position_secs as f64 / self.total_secs as f64 * 100.0
    }

    /// Whether the clock has reached the end
    pub fn is_finished(&self) -> bool {
        self.position_secs >= self.total_secs
    }

    /// Formatted elapsed time
    pub fn elapsed_label(&self) -> String {
        format_timestamp(self.position_secs)
    }

    /// Formatted total runtime
    pub fn total_label(&self) -> String {
        format_timestamp(self.total_secs)
    }
}

/// Format seconds as `H:MM:SS`, or `M:SS` below one hour
pub fn format_timestamp(seconds: u32) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}

/// Visibility of the on-screen transport controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlsOverlay {
    visible: bool,
    /// Never hide on idle
    pinned: bool,
}

impl ControlsOverlay {
    /// Controls start visible. A pinned overlay ignores idle timeouts.
    pub fn new(pinned: bool) -> Self {
        Self {
            visible: true,
            pinned,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    /// Pointer moved or key pressed
    pub fn reveal(&mut self) {
        self.visible = true;
    }

    /// Idle timer fired
    pub fn hide(&mut self) {
        if !self.pinned {
            self.visible = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_playing() {
        let state = PlaybackState::default();
        assert!(state.is_playing());
        assert!(!state.is_muted());
        assert_eq!(state.position_secs(), 0);
        assert_eq!(state.total_secs(), DEFAULT_TOTAL_SECS);
    }

    #[test]
    fn test_tick_advances_only_while_playing() {
        let mut state = PlaybackState::new(100);
        state.tick();
        state.tick();
        assert_eq!(state.position_secs(), 2);

        state.toggle_play();
        state.tick();
        assert_eq!(state.position_secs(), 2);
    }

    #[test]
    fn test_tick_clamps_without_pausing() {
        let mut state = PlaybackState::new(3);
        for _ in 0..10 {
            state.tick();
        }
        assert_eq!(state.position_secs(), 3);
        assert!(state.is_playing());
        assert!(state.is_finished());
    }

    #[test]
    fn test_zero_length_runtime() {
        let mut state = PlaybackState::new(0);
        state.tick();
        assert_eq!(state.position_secs(), 0);
        assert_eq!(state.progress_percent(), 0.0);
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0), "0:00");
        assert_eq!(format_timestamp(65), "1:05");
        assert_eq!(format_timestamp(3661), "1:01:01");
        assert_eq!(format_timestamp(7320), "2:02:00");
        assert_eq!(format_timestamp(599), "9:59");
    }

    #[test]
    fn test_mute_does_not_touch_clock() {
        let mut state = PlaybackState::new(10);
        state.tick();
        state.toggle_mute();
        assert!(state.is_muted());
        assert_eq!(state.position_secs(), 1);
    }

    #[test]
    fn test_overlay_pinned_never_hides() {
        let mut overlay = ControlsOverlay::new(true);
        overlay.hide();
        assert!(overlay.is_visible());

        let mut overlay = ControlsOverlay::new(false);
        overlay.hide();
        assert!(!overlay.is_visible());
        overlay.reveal();
        assert!(overlay.is_visible());
    }
}
