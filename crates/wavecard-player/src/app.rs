//! Main iced application for the wavecard demo player
//!
//! Holds the audio player widget bound to a scripted engine, polls engine
//! events on a timer tick, and fills the waveform slot with synthesized
//! bars.

use std::time::Duration;

use iced::widget::container;
use iced::{time, Element, Fill, Subscription, Task};

use wavecard_widgets::{AudioPlayer, AudioPlayerMessage};

use crate::config::PlayerConfig;
use crate::engine::ScriptedEngine;
use crate::waveform_view::{synthesize_peaks, waveform_bars};

/// Bars in the synthesized waveform pattern
const PEAK_COUNT: usize = 400;

/// Application state
pub struct App {
    player: AudioPlayer<ScriptedEngine>,
    /// Bar pattern for the current source
    peaks: Vec<f32>,
}

/// Messages that can be sent to the application
#[derive(Debug, Clone)]
pub enum Message {
    /// Tick for periodic UI updates (engine event polling)
    Tick,
    /// Audio player interaction
    Player(AudioPlayerMessage),
}

impl App {
    /// Create the application from loaded configuration
    pub fn new(config: PlayerConfig) -> Self {
        let engine = ScriptedEngine::new(config.simulation);
        let player = AudioPlayer::new(engine, config.playback);
        let peaks = player
            .config()
            .source
            .as_ref()
            .map(|source| synthesize_peaks(&source.url, PEAK_COUNT))
            .unwrap_or_default();
        Self { player, peaks }
    }

    /// Update application state
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Tick => self.player.poll(),
            Message::Player(player_message) => self.player.update(player_message),
        }
        Task::none()
    }

    /// Subscribe to periodic updates
    pub fn subscription(&self) -> Subscription<Message> {
        // Poll engine events at ~30fps
        time::every(Duration::from_millis(33)).map(|_| Message::Tick)
    }

    /// Build the view
    pub fn view(&self) -> Element<'_, Message> {
        let playback = self.player.playback();
        let progress = if playback.total_time() > 0.0 {
            (playback.current_time() / playback.total_time()) as f32
        } else {
            0.0
        };

        let peaks = &self.peaks;
        let card = self
            .player
            .view(Some(Box::new(move || waveform_bars(peaks, progress))));

        container(card.map(Message::Player))
            .width(Fill)
            .height(Fill)
            .padding(24)
            .into()
    }
}
