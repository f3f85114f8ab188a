//! Playback state machine
//!
//! Tracks readiness, play/pause, and current/total time for one mounted
//! audio source. The store is driven exclusively by engine events (already
//! filtered for instance identity by the adapter) and by the controller's
//! own lifecycle calls; it never talks to the engine itself.
//!
//! Phases:
//!
//! ```text
//! Uninitialized ──create+load──▶ Loading ──Ready──▶ ReadyPaused ⇄ ReadyPlaying
//!       ▲                          │
//!       │                          └──Error──▶ Failed
//!       └───────────── teardown (from any phase)
//! ```
//!
//! `Finish` while playing stays in `ReadyPlaying`: playback loops by
//! design, the controller reissues a restart command.

use thiserror::Error;

/// Lifecycle phase of the mounted source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackPhase {
    /// No engine instance exists (initial state, and after teardown)
    #[default]
    Uninitialized,
    /// create+load issued, waiting for the engine to report readiness
    Loading,
    /// Decoded and renderable, not playing
    ReadyPaused,
    /// Decoded and renderable, playing
    ReadyPlaying,
    /// The engine reported a load failure; a retry may re-attach
    Failed,
}

/// Errors absorbed by the controller while applying engine events
///
/// Nothing here propagates to the host: the controller logs and keeps the
/// previous phase.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlaybackError {
    /// The engine reported readiness with a duration that cannot be used
    #[error("engine reported an unusable duration: {value}")]
    InvalidDuration { value: f64 },
}

/// Playback state for one mounted source
///
/// Invariants: `current_time <= total_time` once the total is known;
/// `total_time` is set exactly once, when the engine reports readiness.
/// State is discarded (not retained) across instances.
#[derive(Debug, Clone, Default)]
pub struct PlaybackState {
    phase: PlaybackPhase,
    current_time: f64,
    total_time: f64,
}

impl PlaybackState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> PlaybackPhase {
        self.phase
    }

    /// Current position in seconds
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Total duration in seconds (0.0 until the engine reports readiness)
    pub fn total_time(&self) -> f64 {
        self.total_time
    }

    /// Whether the source is decoded and transport commands are meaningful
    pub fn is_ready(&self) -> bool {
        matches!(
            self.phase,
            PlaybackPhase::ReadyPaused | PlaybackPhase::ReadyPlaying
        )
    }

    pub fn is_playing(&self) -> bool {
        self.phase == PlaybackPhase::ReadyPlaying
    }

    /// Record that create+load was issued for a fresh instance
    pub fn begin_loading(&mut self) {
        self.phase = PlaybackPhase::Loading;
        self.current_time = 0.0;
        self.total_time = 0.0;
    }

    /// Apply the engine's readiness report
    ///
    /// Accepted only while `Loading`; a duplicate ready is ignored so the
    /// total is set exactly once. An unusable duration leaves the phase at
    /// `Loading` so a later successful ready can still apply.
    pub fn ready(&mut self, duration: f64) -> Result<(), PlaybackError> {
        if self.phase != PlaybackPhase::Loading {
            log::debug!(
                "ignoring ready({duration}) in phase {:?}: total is set exactly once",
                self.phase
            );
            return Ok(());
        }
        if !duration.is_finite() || duration < 0.0 {
            return Err(PlaybackError::InvalidDuration { value: duration });
        }
        self.total_time = duration;
        self.current_time = 0.0;
        self.phase = PlaybackPhase::ReadyPaused;
        Ok(())
    }

    /// Engine started playing
    pub fn play(&mut self) {
        if self.is_ready() {
            self.phase = PlaybackPhase::ReadyPlaying;
        }
    }

    /// Engine paused
    pub fn pause(&mut self) {
        if self.is_ready() {
            self.phase = PlaybackPhase::ReadyPaused;
        }
    }

    /// Engine reached the end of the source
    ///
    /// Returns `true` when the controller should issue an auto-restart:
    /// playback loops rather than stopping, so the phase stays
    /// `ReadyPlaying`.
    pub fn finish(&mut self) -> bool {
        self.phase == PlaybackPhase::ReadyPlaying
    }

    /// Engine progress report
    ///
    /// Accepted only while ready; clamped so the position never exceeds the
    /// known total. Non-finite positions are dropped.
    pub fn progress(&mut self, position: f64) {
        if !self.is_ready() || !position.is_finite() {
            return;
        }
        self.current_time = position.max(0.0).min(self.total_time);
    }

    /// Engine reported a load failure
    pub fn fail(&mut self) {
        self.phase = PlaybackPhase::Failed;
    }

    /// Discard all state (unmount or source replacement)
    pub fn teardown(&mut self) {
        *self = Self::default();
    }
}
