//! Playback infrastructure
//!
//! - Embed: YouTube link to embed URL normalization
//! - Playback: simulated playback clock and controls overlay
//! - Timers: tick and idle timers scoped to a watch session

pub mod embed;
pub mod playback;
pub mod timers;

pub use embed::{embed_url, extract_video_id, EmbedProfile};
pub use playback::{format_timestamp, ControlsOverlay, PlaybackState};
pub use timers::{TimerEvent, WatchTimers};
