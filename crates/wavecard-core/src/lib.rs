//! Wavecard Core - engine-agnostic audio playback controller primitives
//!
//! This crate holds everything the UI layer needs that does not depend on a
//! rendering toolkit:
//!
//! - **Engine capability surface** (`engine`): the [`WaveformEngine`] trait
//!   describing an external waveform-visualization engine
//!   (create/load/subscribe/command/destroy), plus [`EngineAdapter`] which
//!   owns instance lifecycle and filters stale event deliveries.
//! - **Playback state machine** (`playback`): readiness, play/pause,
//!   current/total time, driven purely by engine events.
//! - **Source identity** (`source`): deterministic container ids derived
//!   from source URLs, binding one render container to one engine instance.
//! - **Time labels** (`time`): seconds to "M:SS" formatting with a one-slot
//!   memo.
//!
//! All state transitions run on the caller's thread. Engines may use worker
//! threads internally, but deliveries land in an mpsc sink that the adapter
//! drains during the host's update cycle, so no locking is needed anywhere
//! in this crate.

pub mod engine;
pub mod playback;
pub mod source;
pub mod time;

pub use engine::{
    EngineAdapter, EngineConfig, EngineEvent, EngineHandle, EngineNotice, EventSink, InstanceId,
    WaveformEngine,
};
pub use engine::headless::{HeadlessCommand, HeadlessEngine, HeadlessOp};
pub use playback::{PlaybackError, PlaybackPhase, PlaybackState};
pub use source::{container_id, source_id, AudioSource};
pub use time::{format_time, TimeLabel};
