//! Waveform engine capability surface
//!
//! The external waveform engine decodes an audio source and renders its
//! visual waveform plus low-level transport primitives. Any engine
//! satisfying the [`WaveformEngine`] capability set is substitutable behind
//! one adapter implementation per engine choice; the controller never
//! depends on a concrete engine.
//!
//! ## Event delivery
//!
//! Engines deliver [`EngineNotice`] values into the [`EventSink`] registered
//! at `subscribe` time. The adapter drains the matching receiver on the UI
//! thread during the host's update cycle, so every state transition runs on
//! the UI thread regardless of how the engine is scheduled internally.

pub mod adapter;
pub mod headless;

use std::sync::mpsc::Sender;

pub use adapter::EngineAdapter;

/// Sink an engine delivers notices into
pub type EventSink = Sender<EngineNotice>;

/// Identity of one engine instance
///
/// Minted by the engine at `create` time, unique for the engine's lifetime.
/// The adapter uses it to reject deliveries from instances it has already
/// destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstanceId(u64);

impl InstanceId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Opaque handle to a live engine instance
///
/// Owned exclusively by one adapter; at most one live handle per adapter at
/// any time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineHandle {
    /// Instance identity, checked against every delivered notice
    pub instance: InstanceId,
    /// Container the instance renders into
    pub container_id: String,
}

/// Lifecycle and progress events emitted by an engine instance
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// Decode finished; the source is renderable and `duration` is known
    Ready { duration: f64 },
    /// Playback started
    Play,
    /// Playback paused
    Pause,
    /// Playback reached the end of the source
    Finish,
    /// Position report, emitted repeatedly while playing
    Progress { position: f64 },
    /// The source could not be loaded
    Error { message: String },
}

/// One event delivery, tagged with the emitting instance
#[derive(Debug, Clone, PartialEq)]
pub struct EngineNotice {
    pub instance: InstanceId,
    pub event: EngineEvent,
}

impl EngineNotice {
    pub fn new(instance: InstanceId, event: EngineEvent) -> Self {
        Self { instance, event }
    }
}

/// Fixed visualization configuration handed to `create`
///
/// Colors are CSS color strings, the common denominator across engine
/// implementations.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Width of one rendered bar in pixels
    pub bar_width: f32,
    /// Gap between bars in pixels
    pub bar_gap: f32,
    /// Minimum rendered bar height in pixels
    pub bar_min_height: f32,
    /// Vertical scale applied to normalized peaks
    pub bar_height: f32,
    /// Playback cursor width in pixels
    pub cursor_width: f32,
    /// Render surface height in pixels
    pub height: f32,
    /// Color of the not-yet-played portion
    pub wave_color: String,
    /// Color of the already-played portion
    pub progress_color: String,
    /// Playback cursor color
    pub cursor_color: String,
    /// Re-render on container resize
    pub responsive: bool,
    /// Loop the selection/source on finish
    pub looping: bool,
    /// Direct seeking by clicking inside the waveform. Must stay disabled:
    /// all click interaction routes through the wrapping surface toggle.
    pub interact: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            bar_width: 1.8,
            bar_gap: 3.0,
            bar_min_height: 8.0,
            bar_height: 5.0,
            cursor_width: 1.0,
            height: 100.0,
            wave_color: "#ccc".to_string(),
            progress_color: "#666".to_string(),
            cursor_color: "transparent".to_string(),
            responsive: true,
            looping: true,
            interact: false,
        }
    }
}

/// Capability surface of an external waveform engine
///
/// Operations are fire-and-forget: nothing blocks, and completion of `load`
/// is signaled later through the subscribed sink, never by a return value.
#[cfg_attr(test, mockall::automock)]
pub trait WaveformEngine {
    /// Construct a rendering instance bound to `container_id`
    ///
    /// Returns `None` when the engine has no rendering surface available
    /// (headless environment); in that case no further operation may be
    /// attempted. Rendering capability is a property injected into engine
    /// constructors, never read from an ambient global.
    fn create(&mut self, container_id: &str, config: &EngineConfig) -> Option<EngineHandle>;

    /// Begin asynchronous decode and render of `url`
    fn load(&mut self, handle: &EngineHandle, url: &str);

    /// Register the sink the instance delivers its notices into
    fn subscribe(&mut self, handle: &EngineHandle, sink: EventSink);

    /// Toggle between playing and paused
    fn play_pause(&mut self, handle: &EngineHandle);

    /// Skip forward by `seconds`
    fn skip_forward(&mut self, handle: &EngineHandle, seconds: f64);

    /// Skip backward by `seconds`
    fn skip_backward(&mut self, handle: &EngineHandle, seconds: f64);

    /// Rewind to the start and play
    ///
    /// Issued by the controller when the engine reports `Finish`: playback
    /// loops rather than stopping.
    fn restart(&mut self, handle: &EngineHandle);

    /// Release the instance
    ///
    /// The engine must drop the subscribed sink before releasing anything
    /// else; after `destroy` returns, no delivery for this instance may
    /// occur.
    fn destroy(&mut self, handle: EngineHandle);
}
