//! Engine instance lifecycle ownership
//!
//! [`EngineAdapter`] wraps a [`WaveformEngine`] and enforces the two
//! invariants the controller relies on:
//!
//! 1. **Teardown before create.** At most one instance is live per adapter.
//!    Attaching a new source destroys the old instance (unsubscribing its
//!    sink) before the new `create` is issued, so a stale instance's late
//!    `Ready`/`Progress` can never race state meant for its successor.
//! 2. **Identity-checked delivery.** Every polled notice is checked against
//!    the current instance id before it is surfaced. This covers engines
//!    that do not honor strict post-destroy silence.
//!
//! Transport commands forward only while an instance is live *and* has
//! reported readiness, matching the controller's "no handle until ready"
//! contract.

use std::sync::mpsc::{self, Receiver};

use crate::source::container_id as source_container_id;

use super::{EngineConfig, EngineEvent, EngineHandle, EngineNotice, WaveformEngine};

struct LiveInstance {
    handle: EngineHandle,
    events: Receiver<EngineNotice>,
    loaded: bool,
}

/// Owns at most one live engine instance and its event stream
pub struct EngineAdapter<E: WaveformEngine> {
    engine: E,
    config: EngineConfig,
    live: Option<LiveInstance>,
}

impl<E: WaveformEngine> EngineAdapter<E> {
    /// Wrap an engine with the default visualization configuration
    pub fn new(engine: E) -> Self {
        Self::with_config(engine, EngineConfig::default())
    }

    pub fn with_config(engine: E, config: EngineConfig) -> Self {
        Self {
            engine,
            config,
            live: None,
        }
    }

    /// Destroy any current instance, then create+subscribe+load for `url`
    ///
    /// Returns `true` when an instance was created (the caller should enter
    /// its loading phase). Returns `false` when the engine declined —
    /// headless environment — in which case nothing was created and no event
    /// will ever arrive.
    pub fn attach(&mut self, url: &str) -> bool {
        // Old instance goes away before the new create is issued
        self.teardown();

        let container = source_container_id(url);
        let Some(handle) = self.engine.create(&container, &self.config) else {
            log::debug!("engine declined create for #{container}: no rendering surface");
            return false;
        };

        let (tx, rx) = mpsc::channel();
        self.engine.subscribe(&handle, tx);
        self.engine.load(&handle, url);
        log::info!(
            "waveform instance {} attached to #{container}",
            handle.instance.raw()
        );

        self.live = Some(LiveInstance {
            handle,
            events: rx,
            loaded: false,
        });
        true
    }

    /// Drain events delivered since the last poll
    ///
    /// Deliveries carrying a stale instance id are dropped here and never
    /// reach the state machine.
    pub fn poll_events(&mut self) -> Vec<EngineEvent> {
        let Some(live) = &self.live else {
            return Vec::new();
        };

        let mut events = Vec::new();
        while let Ok(notice) = live.events.try_recv() {
            if notice.instance != live.handle.instance {
                log::debug!(
                    "dropping event from stale instance {} (current is {})",
                    notice.instance.raw(),
                    live.handle.instance.raw()
                );
                continue;
            }
            events.push(notice.event);
        }
        events
    }

    /// Record that the current instance reported readiness
    ///
    /// Until this is called, transport commands are dropped.
    pub fn mark_loaded(&mut self) {
        if let Some(live) = &mut self.live {
            live.loaded = true;
        }
    }

    pub fn is_live(&self) -> bool {
        self.live.is_some()
    }

    pub fn is_loaded(&self) -> bool {
        self.live.as_ref().is_some_and(|live| live.loaded)
    }

    /// Container id of the live instance, if any
    pub fn container_id(&self) -> Option<&str> {
        self.live.as_ref().map(|live| live.handle.container_id.as_str())
    }

    pub fn play_pause(&mut self) {
        if let Some(live) = ready_instance(&self.live) {
            self.engine.play_pause(&live);
        }
    }

    pub fn skip_forward(&mut self, seconds: f64) {
        if let Some(live) = ready_instance(&self.live) {
            self.engine.skip_forward(&live, seconds);
        }
    }

    pub fn skip_backward(&mut self, seconds: f64) {
        if let Some(live) = ready_instance(&self.live) {
            self.engine.skip_backward(&live, seconds);
        }
    }

    /// Rewind-and-play, issued on `Finish` to keep playback looping
    pub fn restart(&mut self) {
        if let Some(live) = ready_instance(&self.live) {
            self.engine.restart(&live);
        }
    }

    /// Destroy the current instance, if any
    ///
    /// The engine unsubscribes (drops the sink) before releasing; dropping
    /// our receiver discards anything still queued.
    pub fn teardown(&mut self) {
        if let Some(live) = self.live.take() {
            log::info!(
                "destroying waveform instance {}",
                live.handle.instance.raw()
            );
            self.engine.destroy(live.handle);
        }
    }

    /// Access the wrapped engine (scripting, tests)
    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }
}

/// Clone of the live handle when commands may be forwarded
///
/// Commands are meaningful only after readiness; before that they are
/// silently dropped, mirroring a controller that has no handle yet.
fn ready_instance(live: &Option<LiveInstance>) -> Option<EngineHandle> {
    live.as_ref()
        .filter(|live| live.loaded)
        .map(|live| live.handle.clone())
}

impl<E: WaveformEngine> Drop for EngineAdapter<E> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::super::headless::{HeadlessEngine, HeadlessOp};
    use super::super::{EngineEvent, MockWaveformEngine};
    use super::*;

    const TRACK: &str = "https://example.com/track.mp3";
    const OTHER: &str = "https://example.com/other.mp3";

    fn attached() -> EngineAdapter<HeadlessEngine> {
        let mut adapter = EngineAdapter::new(HeadlessEngine::new(true));
        assert!(adapter.attach(TRACK));
        adapter
    }

    #[test]
    fn test_attach_creates_subscribes_loads() {
        let adapter = attached();
        let ops = adapter.engine().ops();
        assert!(matches!(ops[0], HeadlessOp::Create(_)));
        assert!(matches!(ops[1], HeadlessOp::Subscribe(_)));
        assert!(matches!(ops[2], HeadlessOp::Load(_, ref url) if url == TRACK));
    }

    #[test]
    fn test_headless_create_declines() {
        let mut adapter = EngineAdapter::new(HeadlessEngine::new(false));
        assert!(!adapter.attach(TRACK));
        assert!(!adapter.is_live());
        assert!(adapter.poll_events().is_empty());
        // No command may reach an engine that never created an instance
        adapter.play_pause();
        assert!(adapter.engine().ops().is_empty());
    }

    #[test]
    fn test_headless_create_declines_mock() {
        // Same property expressed as trait-level expectations: a declined
        // create means no other capability is ever invoked.
        let mut engine = MockWaveformEngine::new();
        engine.expect_create().times(1).returning(|_, _| None);
        engine.expect_load().times(0);
        engine.expect_subscribe().times(0);
        engine.expect_play_pause().times(0);
        engine.expect_destroy().times(0);

        let mut adapter = EngineAdapter::new(engine);
        assert!(!adapter.attach(TRACK));
        adapter.play_pause();
        adapter.teardown();
    }

    #[test]
    fn test_reattach_destroys_before_create() {
        let mut adapter = attached();
        let first = adapter.engine().ops()[0].instance();

        assert!(adapter.attach(OTHER));
        let ops = adapter.engine().ops();
        let destroy_at = ops
            .iter()
            .position(|op| matches!(op, HeadlessOp::Destroy(id) if *id == first))
            .expect("old instance destroyed");
        let create_at = ops
            .iter()
            .rposition(|op| matches!(op, HeadlessOp::Create(_)))
            .expect("new instance created");
        assert!(
            destroy_at < create_at,
            "destroy of the old instance must precede the new create"
        );
    }

    #[test]
    fn test_commands_dropped_until_loaded() {
        let mut adapter = attached();
        adapter.play_pause();
        adapter.skip_forward(5.0);
        assert!(adapter.engine().commands().is_empty());

        adapter.mark_loaded();
        adapter.play_pause();
        assert_eq!(adapter.engine().commands().len(), 1);
    }

    #[test]
    fn test_poll_delivers_current_instance_events() {
        let mut adapter = attached();
        let id = adapter.engine().ops()[0].instance();
        adapter
            .engine()
            .emit(id, EngineEvent::Ready { duration: 120.0 });

        let events = adapter.poll_events();
        assert_eq!(events, vec![EngineEvent::Ready { duration: 120.0 }]);
    }

    #[test]
    fn test_stale_delivery_is_dropped() {
        // A sloppy engine keeps delivering into the newest sink even for
        // instances that were already destroyed.
        let mut adapter = EngineAdapter::new(HeadlessEngine::sloppy());
        assert!(adapter.attach(TRACK));
        let old = adapter.engine().ops()[0].instance();

        assert!(adapter.attach(OTHER));
        adapter
            .engine()
            .emit(old, EngineEvent::Ready { duration: 99.0 });

        assert!(
            adapter.poll_events().is_empty(),
            "stale ready must not surface"
        );
    }

    #[test]
    fn test_destroy_silences_pending_events() {
        let mut adapter = attached();
        let id = adapter.engine().ops()[0].instance();
        adapter
            .engine()
            .emit(id, EngineEvent::Ready { duration: 120.0 });

        adapter.teardown();
        assert!(adapter.poll_events().is_empty());
        assert!(!adapter.is_live());
    }

    #[test]
    fn test_drop_destroys_instance() {
        let engine;
        {
            let mut adapter = attached();
            adapter.mark_loaded();
            // Clones share the recorded operation log
            engine = adapter.engine().clone();
        }
        assert!(
            engine
                .ops()
                .iter()
                .any(|op| matches!(op, HeadlessOp::Destroy(_))),
            "dropping the adapter must destroy the live instance"
        );
    }
}
