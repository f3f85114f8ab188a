//! Synthesized waveform bars for the demo
//!
//! The scripted engine decodes nothing, so the demo fills the player's
//! waveform slot with a deterministic bar pattern derived from the source
//! id. Bars left of the playhead use the progress color, the rest the wave
//! color — the same split a real engine renders.

use iced::widget::canvas::{Canvas, Frame, Geometry, Program};
use iced::{mouse, Color, Element, Fill, Point, Rectangle, Size, Theme};

use wavecard_core::{source_id, EngineConfig};
use wavecard_widgets::theme::{PROGRESS_COLOR, WAVE_COLOR, WAVEFORM_HEIGHT};

/// Derive a stable bar-height pattern from the source id
///
/// Hex digits of the id map to normalized peaks, repeated to `count` bars.
pub fn synthesize_peaks(url: &str, count: usize) -> Vec<f32> {
    let id = source_id(url);
    id.bytes()
        .filter_map(|byte| (byte as char).to_digit(16))
        .map(|digit| digit as f32 / 15.0)
        .cycle()
        .take(count)
        .collect()
}

struct BarsCanvas<'a> {
    peaks: &'a [f32],
    /// Played fraction of the track (0.0 to 1.0)
    progress: f32,
    config: EngineConfig,
}

impl<Message> Program<Message> for BarsCanvas<'_> {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        if self.peaks.is_empty() {
            return vec![frame.into_geometry()];
        }

        let step = self.config.bar_width + self.config.bar_gap;
        let bars = (bounds.width / step).floor().max(1.0) as usize;
        let mid = bounds.height / 2.0;
        let scale = self.config.bar_height * (bounds.height / 2.0) / 5.0;

        for bar in 0..bars {
            let x = bar as f32 * step;
            let peak = self.peaks[bar % self.peaks.len()];
            let half = (peak * scale).max(self.config.bar_min_height / 2.0);
            let color = if (x + self.config.bar_width) / bounds.width <= self.progress {
                PROGRESS_COLOR
            } else {
                WAVE_COLOR
            };
            frame.fill_rectangle(
                Point::new(x, mid - half),
                Size::new(self.config.bar_width, half * 2.0),
                color,
            );
        }

        // Playback cursor (transparent by default, matching the engine config)
        if self.config.cursor_width > 0.0 {
            frame.fill_rectangle(
                Point::new(self.progress * bounds.width, 0.0),
                Size::new(self.config.cursor_width, bounds.height),
                Color::TRANSPARENT,
            );
        }

        vec![frame.into_geometry()]
    }
}

/// Build the bar-pattern element for the player's waveform slot
pub fn waveform_bars<'a, Message: 'a>(peaks: &'a [f32], progress: f32) -> Element<'a, Message> {
    Canvas::new(BarsCanvas {
        peaks,
        progress: progress.clamp(0.0, 1.0),
        config: EngineConfig::default(),
    })
    .width(Fill)
    .height(WAVEFORM_HEIGHT)
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peaks_are_deterministic() {
        let a = synthesize_peaks("demo://track", 64);
        let b = synthesize_peaks("demo://track", 64);
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.iter().all(|peak| (0.0..=1.0).contains(peak)));
    }

    #[test]
    fn test_distinct_sources_get_distinct_patterns() {
        let a = synthesize_peaks("demo://track", 64);
        let b = synthesize_peaks("demo://other", 64);
        assert_ne!(a, b);
    }
}
