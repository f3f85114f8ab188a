//! Messages produced by the audio player's interactive surface

/// User-input messages for the audio player
///
/// Engine events are not messages: the host polls them into the player via
/// [`super::AudioPlayer::poll`] during its tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioPlayerMessage {
    /// Play/pause toggle pressed
    PlayPause,
    /// Reverse (skip backward) pressed
    SkipBackward,
    /// Forward (skip ahead) pressed
    SkipForward,
    /// The wrapping panel surface was clicked
    ///
    /// Toggles play/pause when the player is configured playable; never
    /// seeks.
    SurfaceClicked,
    /// Retry after a reported load failure
    Retry,
}
