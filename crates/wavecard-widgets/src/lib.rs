//! Iced widgets for audio playback with waveform visualization
//!
//! This crate provides the view layer over `wavecard-core`: a reusable audio
//! player panel with transport controls, time labels, cover artwork, and a
//! slot for the waveform surface an engine renders into.
//!
//! ## Architecture (iced 0.14 patterns)
//!
//! Following idiomatic iced patterns, this crate separates concerns:
//!
//! - **State** ([`AudioPlayer`]): owns the engine adapter and playback state,
//!   mutated in `update`/`poll` on the UI thread
//! - **View functions**: pure functions of the latest state, returning
//!   `Element<AudioPlayerMessage>`
//! - **Pure derivations** ([`ControlSet`]): the affordance set for a control
//!   variant, testable without a renderer
//!
//! ## Usage
//!
//! ```ignore
//! // In your application state:
//! let player = AudioPlayer::new(engine, AudioPlayerConfig {
//!     source: Some(AudioSource::with_cover(url, cover)),
//!     control_variant: ControlVariant::Full,
//!     ..AudioPlayerConfig::default()
//! });
//!
//! // In your tick handler (events are polled on the UI thread):
//! player.poll();
//!
//! // In your view function:
//! player.view(None).map(Message::Player)
//! ```

pub mod button_styles;
pub mod controls;
pub mod player;
pub mod theme;
pub mod time_labels;

pub use controls::{control_set, transport_controls, ControlSet, ControlVariant};
pub use player::{AudioPlayer, AudioPlayerConfig, AudioPlayerMessage, WaveformSlot};
pub use time_labels::time_labels;
