//! Audio player panel
//!
//! [`AudioPlayer`] is the controller binding one audio source to one
//! waveform engine instance:
//!
//! - owns the [`EngineAdapter`] and with it the instance lifecycle
//!   (teardown-before-create on source change, destroy on drop)
//! - applies polled engine events to the [`PlaybackState`] machine
//! - dispatches transport commands for user input
//! - renders one of two layout variants (compact overlay panel or expanded
//!   two-column grid) from the latest state
//!
//! Everything runs on the UI thread inside the host's update/tick cycle.

mod message;
mod view;

pub use message::AudioPlayerMessage;
pub use view::WaveformSlot;

use iced::widget::image;
use iced::Element;
use serde::{Deserialize, Serialize};

use wavecard_core::{
    AudioSource, EngineAdapter, EngineEvent, PlaybackPhase, PlaybackState, TimeLabel,
    WaveformEngine,
};

use crate::controls::ControlVariant;

/// Seconds advanced/rewound by one skip command
pub const AUDIO_SKIP_SECONDS: f64 = 5.0;

/// Caller configuration for the audio player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioPlayerConfig {
    /// Audio source; absent means a perpetual loading indicator
    pub source: Option<AudioSource>,
    /// Which transport affordances exist
    pub control_variant: ControlVariant,
    /// Flip icon/button color treatment for dark surroundings
    pub inverted: bool,
    /// Compact overlay presentation instead of the expanded grid
    pub compact: bool,
    /// Clicking the panel surface toggles play/pause
    pub playable: bool,
    /// Skip amount for the forward/reverse affordances
    pub skip_seconds: f64,
    /// Content type of the source, carried through for hosts that route
    /// non-audio attachments to a file-fallback renderer. No playback
    /// semantics.
    pub content_type: Option<String>,
}

impl Default for AudioPlayerConfig {
    fn default() -> Self {
        Self {
            source: None,
            control_variant: ControlVariant::default(),
            inverted: false,
            compact: false,
            playable: false,
            skip_seconds: AUDIO_SKIP_SECONDS,
            content_type: None,
        }
    }
}

/// Controller and view state for one mounted audio source
pub struct AudioPlayer<E: WaveformEngine> {
    config: AudioPlayerConfig,
    adapter: EngineAdapter<E>,
    playback: PlaybackState,
    /// Failure message from the engine, shown by the retry view
    failure: Option<String>,
    cover: Option<image::Handle>,
    current_label: TimeLabel,
    total_label: TimeLabel,
}

impl<E: WaveformEngine> AudioPlayer<E> {
    /// Create the player and mount its configured source
    pub fn new(engine: E, config: AudioPlayerConfig) -> Self {
        let mut player = Self {
            config,
            adapter: EngineAdapter::new(engine),
            playback: PlaybackState::new(),
            failure: None,
            cover: None,
            current_label: TimeLabel::new(),
            total_label: TimeLabel::new(),
        };
        player.mount();
        player
    }

    /// Replace the audio source
    ///
    /// The current instance is destroyed and playback state discarded
    /// *before* anything is created for the new source; the position is
    /// therefore already zero when the new readiness report arrives.
    pub fn set_source(&mut self, source: Option<AudioSource>) {
        if self.config.source == source {
            return;
        }
        self.adapter.teardown();
        self.playback.teardown();
        self.failure = None;
        self.config.source = source;
        self.mount();
    }

    /// Unmount: destroy the instance and discard playback state
    pub fn unmount(&mut self) {
        self.adapter.teardown();
        self.playback.teardown();
        self.failure = None;
    }

    fn mount(&mut self) {
        self.current_label = TimeLabel::new();
        self.total_label = TimeLabel::new();
        self.cover = self
            .config
            .source
            .as_ref()
            .and_then(|source| source.cover_image_url.as_deref())
            .map(image::Handle::from_path);

        let Some(source) = self.config.source.clone() else {
            return;
        };
        if self.adapter.attach(&source.url) {
            self.playback.begin_loading();
        }
    }

    /// Drain engine events and apply them to the playback state
    ///
    /// Call once per host tick. Stale-instance deliveries were already
    /// dropped by the adapter; everything surfacing here belongs to the
    /// current instance.
    pub fn poll(&mut self) {
        for event in self.adapter.poll_events() {
            self.apply(event);
        }
        let current = self.playback.current_time();
        let total = self.playback.total_time();
        self.current_label.update(current);
        self.total_label.update(total);
    }

    fn apply(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::Ready { duration } => match self.playback.ready(duration) {
                Ok(()) => self.adapter.mark_loaded(),
                Err(err) => log::error!("ignoring readiness report: {err}"),
            },
            EngineEvent::Play => self.playback.play(),
            EngineEvent::Pause => self.playback.pause(),
            EngineEvent::Finish => {
                // Looping contract: finishing restarts playback immediately
                if self.playback.finish() {
                    self.adapter.restart();
                }
            }
            EngineEvent::Progress { position } => self.playback.progress(position),
            EngineEvent::Error { message } => {
                log::warn!("engine load failed: {message}");
                self.playback.fail();
                self.failure = Some(message);
            }
        }
    }

    /// Handle a user-input message
    pub fn update(&mut self, message: AudioPlayerMessage) {
        match message {
            AudioPlayerMessage::PlayPause => self.adapter.play_pause(),
            AudioPlayerMessage::SkipBackward => {
                self.adapter.skip_backward(self.config.skip_seconds)
            }
            AudioPlayerMessage::SkipForward => self.adapter.skip_forward(self.config.skip_seconds),
            AudioPlayerMessage::SurfaceClicked => {
                if self.config.playable {
                    self.adapter.play_pause();
                }
            }
            AudioPlayerMessage::Retry => {
                if self.playback.phase() == PlaybackPhase::Failed {
                    self.failure = None;
                    self.playback.teardown();
                    self.mount();
                }
            }
        }
    }

    /// Build the player element
    ///
    /// `waveform` is the slot for the surface the engine renders into; pass
    /// `None` to get a blank surface of the configured height. The factory
    /// may be called more than once per layout pass (responsive collapse),
    /// so it is taken as a boxed `Fn` rather than a one-shot element.
    pub fn view<'a>(&'a self, waveform: WaveformSlot<'a>) -> Element<'a, AudioPlayerMessage> {
        view::player_view(self, waveform)
    }

    pub fn config(&self) -> &AudioPlayerConfig {
        &self.config
    }

    pub fn playback(&self) -> &PlaybackState {
        &self.playback
    }

    /// Failure message from the engine, if the load failed
    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    pub(crate) fn cover_handle(&self) -> Option<&image::Handle> {
        self.cover.as_ref()
    }

    pub fn has_cover(&self) -> bool {
        self.cover.is_some()
    }

    /// Rendered "M:SS" labels for (elapsed, total)
    pub fn time_texts(&self) -> (&str, &str) {
        (self.current_label.text(), self.total_label.text())
    }

    /// Access the wrapped engine (scripting, tests)
    pub fn engine(&self) -> &E {
        self.adapter.engine()
    }

    pub fn engine_mut(&mut self) -> &mut E {
        self.adapter.engine_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wavecard_core::{HeadlessCommand, HeadlessEngine, HeadlessOp, InstanceId};

    const TRACK: &str = "https://example.com/track.mp3";
    const OTHER: &str = "https://example.com/other.mp3";

    fn player_for(url: &str) -> AudioPlayer<HeadlessEngine> {
        AudioPlayer::new(
            HeadlessEngine::new(true),
            AudioPlayerConfig {
                source: Some(AudioSource::new(url)),
                ..AudioPlayerConfig::default()
            },
        )
    }

    fn current_instance(player: &AudioPlayer<HeadlessEngine>) -> InstanceId {
        player
            .engine()
            .ops()
            .iter()
            .rev()
            .find_map(|op| match op {
                HeadlessOp::Create(id) => Some(*id),
                _ => None,
            })
            .expect("an instance was created")
    }

    fn ready_player(url: &str, duration: f64) -> AudioPlayer<HeadlessEngine> {
        let mut player = player_for(url);
        let id = current_instance(&player);
        player
            .engine()
            .emit(id, EngineEvent::Ready { duration });
        player.poll();
        player
    }

    #[test]
    fn test_mount_begins_loading() {
        let player = player_for(TRACK);
        assert_eq!(player.playback().phase(), PlaybackPhase::Loading);
    }

    #[test]
    fn test_absent_source_stays_uninitialized() {
        let player = AudioPlayer::new(
            HeadlessEngine::new(true),
            AudioPlayerConfig::default(),
        );
        assert_eq!(player.playback().phase(), PlaybackPhase::Uninitialized);
        assert!(player.engine().ops().is_empty());
    }

    #[test]
    fn test_ready_reaches_paused_with_duration() {
        let player = ready_player(TRACK, 120.0);
        assert_eq!(player.playback().phase(), PlaybackPhase::ReadyPaused);
        assert_eq!(player.playback().total_time(), 120.0);
        assert_eq!(player.playback().current_time(), 0.0);
    }

    #[test]
    fn test_play_event_starts_playing() {
        let mut player = ready_player(TRACK, 120.0);
        let id = current_instance(&player);
        player.engine().emit(id, EngineEvent::Play);
        player.poll();
        assert_eq!(player.playback().phase(), PlaybackPhase::ReadyPlaying);
    }

    #[test]
    fn test_finish_restarts_and_keeps_playing() {
        let mut player = ready_player(TRACK, 120.0);
        let id = current_instance(&player);
        player.engine().emit(id, EngineEvent::Play);
        player.engine().emit(id, EngineEvent::Finish);
        player.poll();

        assert_eq!(player.playback().phase(), PlaybackPhase::ReadyPlaying);
        assert!(
            player
                .engine()
                .commands()
                .contains(&HeadlessCommand::Restart),
            "finishing must reissue playback"
        );
    }

    #[test]
    fn test_stale_ready_after_replacement_is_ignored() {
        // A sloppy engine delivers the old instance's late ready into the
        // newest sink; the identity check must drop it.
        let mut player = AudioPlayer::new(
            HeadlessEngine::sloppy(),
            AudioPlayerConfig {
                source: Some(AudioSource::new(TRACK)),
                ..AudioPlayerConfig::default()
            },
        );
        let old = current_instance(&player);

        player.set_source(Some(AudioSource::new(OTHER)));
        player.engine().emit(old, EngineEvent::Ready { duration: 99.0 });
        player.poll();

        assert_eq!(player.playback().phase(), PlaybackPhase::Loading);
        assert_eq!(player.playback().total_time(), 0.0);
    }

    #[test]
    fn test_source_replacement_resets_before_new_ready() {
        let mut player = ready_player(TRACK, 120.0);
        let id = current_instance(&player);
        player.engine().emit(id, EngineEvent::Play);
        player.engine().emit(id, EngineEvent::Progress { position: 60.0 });
        player.poll();
        assert_eq!(player.playback().current_time(), 60.0);

        player.set_source(Some(AudioSource::new(OTHER)));
        assert_eq!(player.playback().phase(), PlaybackPhase::Loading);
        assert_eq!(player.playback().current_time(), 0.0);
        assert_eq!(player.playback().total_time(), 0.0);

        // Old instance destroyed before the new create
        let ops = player.engine().ops();
        let destroy_at = ops
            .iter()
            .position(|op| matches!(op, HeadlessOp::Destroy(i) if *i == id))
            .unwrap();
        let create_at = ops
            .iter()
            .rposition(|op| matches!(op, HeadlessOp::Create(_)))
            .unwrap();
        assert!(destroy_at < create_at);
    }

    #[test]
    fn test_commands_dropped_before_ready() {
        let mut player = player_for(TRACK);
        player.update(AudioPlayerMessage::PlayPause);
        player.update(AudioPlayerMessage::SkipForward);
        assert!(player.engine().commands().is_empty());
    }

    #[test]
    fn test_skip_commands_use_configured_amount() {
        let mut player = ready_player(TRACK, 120.0);
        player.update(AudioPlayerMessage::SkipForward);
        player.update(AudioPlayerMessage::SkipBackward);
        assert_eq!(
            player.engine().commands(),
            vec![
                HeadlessCommand::SkipForward(AUDIO_SKIP_SECONDS),
                HeadlessCommand::SkipBackward(AUDIO_SKIP_SECONDS),
            ]
        );
    }

    #[test]
    fn test_surface_click_respects_playable() {
        let mut player = ready_player(TRACK, 120.0);
        player.update(AudioPlayerMessage::SurfaceClicked);
        assert!(player.engine().commands().is_empty());

        let mut playable = AudioPlayer::new(
            HeadlessEngine::new(true),
            AudioPlayerConfig {
                source: Some(AudioSource::new(TRACK)),
                playable: true,
                ..AudioPlayerConfig::default()
            },
        );
        let id = current_instance(&playable);
        playable.engine().emit(id, EngineEvent::Ready { duration: 10.0 });
        playable.poll();
        playable.update(AudioPlayerMessage::SurfaceClicked);
        assert_eq!(
            playable.engine().commands(),
            vec![HeadlessCommand::PlayPause]
        );
    }

    #[test]
    fn test_invalid_duration_keeps_loading_until_good_ready() {
        let mut player = player_for(TRACK);
        let id = current_instance(&player);
        player
            .engine()
            .emit(id, EngineEvent::Ready { duration: f64::NAN });
        player.poll();
        assert_eq!(player.playback().phase(), PlaybackPhase::Loading);

        player.engine().emit(id, EngineEvent::Ready { duration: 42.0 });
        player.poll();
        assert_eq!(player.playback().phase(), PlaybackPhase::ReadyPaused);
        assert_eq!(player.playback().total_time(), 42.0);
    }

    #[test]
    fn test_error_event_fails_and_retry_reattaches() {
        let mut player = player_for(TRACK);
        let id = current_instance(&player);
        player.engine().emit(
            id,
            EngineEvent::Error {
                message: "decode failed".to_string(),
            },
        );
        player.poll();
        assert_eq!(player.playback().phase(), PlaybackPhase::Failed);
        assert_eq!(player.failure(), Some("decode failed"));

        player.update(AudioPlayerMessage::Retry);
        assert_eq!(player.playback().phase(), PlaybackPhase::Loading);
        assert!(player.failure().is_none());
        assert!(current_instance(&player) != id);
    }

    #[test]
    fn test_headless_environment_never_creates() {
        let player = AudioPlayer::new(
            HeadlessEngine::new(false),
            AudioPlayerConfig {
                source: Some(AudioSource::new(TRACK)),
                ..AudioPlayerConfig::default()
            },
        );
        assert_eq!(player.playback().phase(), PlaybackPhase::Uninitialized);
        assert!(player.engine().ops().is_empty());
    }

    #[test]
    fn test_time_labels_follow_progress() {
        let mut player = ready_player(TRACK, 125.0);
        let id = current_instance(&player);
        player.engine().emit(id, EngineEvent::Play);
        player.engine().emit(id, EngineEvent::Progress { position: 65.4 });
        player.poll();
        assert_eq!(player.time_texts(), ("1:05", "2:05"));
    }
}
