//! Layout variants for the audio player panel
//!
//! Two structural compositions, selected by the `compact` flag:
//!
//! - **Compact**: a single rounded panel. Cover art (when present) renders
//!   full-bleed behind everything and the waveform surface is hidden;
//!   controls float over the bottom-right corner. Clicking anywhere on the
//!   panel toggles play/pause (when playable) — it never seeks.
//! - **Expanded**: a two-column grid with a fixed-width cover column and a
//!   flexible player column, collapsing to a single column below the narrow
//!   breakpoint.
//!
//! In both modes a loading indicator shows until the engine reports
//! readiness, and an absent source means the indicator shows forever.

use iced::alignment::{Horizontal, Vertical};
use iced::widget::{
    button, center, column, container, image, mouse_area, responsive, row, stack, text, Space,
};
use iced::{Border, Center, Color, ContentFit, Element, Fill};

use wavecard_core::{PlaybackPhase, WaveformEngine};

use crate::controls::{control_set, transport_controls, ControlVariant};
use crate::theme;
use crate::time_labels::time_labels;

use super::{AudioPlayer, AudioPlayerMessage};

/// Slot for the surface the engine renders into
///
/// A factory rather than an element: the expanded layout rebuilds on every
/// responsive pass, so the slot must be callable repeatedly.
pub type WaveformSlot<'a> = Option<Box<dyn Fn() -> Element<'a, AudioPlayerMessage> + 'a>>;

/// Borrowed view of a slot, callable without consuming it
type SlotRef<'a, 'b> = Option<&'b dyn Fn() -> Element<'a, AudioPlayerMessage>>;

/// What the panel body currently shows
enum Body<'a> {
    Loading,
    Ready,
    Failed(&'a str),
}

pub(super) fn player_view<'a, E: WaveformEngine>(
    player: &'a AudioPlayer<E>,
    waveform: WaveformSlot<'a>,
) -> Element<'a, AudioPlayerMessage> {
    if player.config().compact {
        compact_view(player, waveform)
    } else {
        expanded_view(player, waveform)
    }
}

fn body_of<E: WaveformEngine>(player: &AudioPlayer<E>) -> Body<'_> {
    match player.playback().phase() {
        PlaybackPhase::ReadyPaused | PlaybackPhase::ReadyPlaying => Body::Ready,
        PlaybackPhase::Failed => Body::Failed(player.failure().unwrap_or("load failed")),
        _ => Body::Loading,
    }
}

// =============================================================================
// Compact: overlay panel
// =============================================================================

fn compact_view<'a, E: WaveformEngine>(
    player: &'a AudioPlayer<E>,
    waveform: WaveformSlot<'a>,
) -> Element<'a, AudioPlayerMessage> {
    let config = player.config();
    let has_cover = player.has_cover();

    // The waveform surface is hidden entirely while cover art is shown
    let mut inner = column![].spacing(16).align_x(Center).width(Fill);
    if !has_cover {
        inner = inner.push(waveform_surface(waveform.as_deref()));
    }

    let mut overlay_controls = None;
    let body = body_of(player);
    if let Body::Ready = body {
        if config.control_variant == ControlVariant::Full {
            let (current, total) = player.time_texts();
            inner = inner.push(time_labels(current, total, config.inverted));
        }

        let set = control_set(config.control_variant, true, has_cover);
        if let Some(controls) = transport_controls(
            set,
            player.playback().is_playing(),
            config.inverted,
            AudioPlayerMessage::PlayPause,
            AudioPlayerMessage::SkipBackward,
            AudioPlayerMessage::SkipForward,
        ) {
            if set.overlay {
                overlay_controls = Some(controls);
            } else {
                inner = inner.push(controls);
            }
        }
    }

    let mut layers = stack![].width(Fill).height(Fill);
    if let Some(handle) = player.cover_handle() {
        layers = layers.push(
            image(handle.clone())
                .content_fit(ContentFit::Contain)
                .width(Fill)
                .height(Fill),
        );
    }
    layers = layers.push(center(inner));
    match body {
        Body::Loading => layers = layers.push(center(loading_indicator(config.inverted))),
        Body::Failed(message) => layers = layers.push(center(failure_notice(message))),
        Body::Ready => {}
    }
    if let Some(controls) = overlay_controls {
        // Floating transport anchored to the bottom-right corner
        layers = layers.push(
            container(controls)
                .width(Fill)
                .height(Fill)
                .align_x(Horizontal::Right)
                .align_y(Vertical::Bottom)
                .padding(theme::OVERLAY_INSET),
        );
    }

    mouse_area(panel_frame(layers.into(), 0.0))
        .on_press(AudioPlayerMessage::SurfaceClicked)
        .into()
}

// =============================================================================
// Expanded: two-column grid
// =============================================================================

fn expanded_view<'a, E: WaveformEngine>(
    player: &'a AudioPlayer<E>,
    waveform: WaveformSlot<'a>,
) -> Element<'a, AudioPlayerMessage> {
    responsive(move |size| {
        let panel = expanded_panel(player, waveform.as_deref());
        let Some(handle) = player.cover_handle() else {
            return panel;
        };

        let cover = container(
            image(handle.clone())
                .content_fit(ContentFit::Contain)
                .width(theme::COVER_MAX_SIZE)
                .height(theme::COVER_MAX_SIZE),
        )
        .width(theme::COVER_COLUMN_WIDTH)
        .align_x(Horizontal::Center);

        // Collapse the grid to a single column on narrow viewports
        if size.width < theme::NARROW_BREAKPOINT {
            column![cover.width(Fill), panel]
                .spacing(theme::GRID_GAP_NARROW)
                .width(Fill)
                .align_x(Center)
                .into()
        } else {
            row![cover, panel]
                .spacing(theme::GRID_GAP)
                .width(Fill)
                .align_y(Center)
                .into()
        }
    })
    .into()
}

fn expanded_panel<'a, E: WaveformEngine>(
    player: &'a AudioPlayer<E>,
    waveform: SlotRef<'a, '_>,
) -> Element<'a, AudioPlayerMessage> {
    let config = player.config();

    if config.source.is_none() {
        return panel_frame(
            center(loading_indicator(config.inverted)).into(),
            theme::PANEL_PADDING,
        );
    }

    let mut inner = column![waveform_surface(waveform)]
        .spacing(16)
        .align_x(Center)
        .width(Fill);

    let body = body_of(player);
    let stacked: Element<'a, AudioPlayerMessage> = match body {
        Body::Ready => {
            if config.control_variant == ControlVariant::Full {
                let (current, total) = player.time_texts();
                inner = inner.push(time_labels(current, total, config.inverted));
            }
            let set = control_set(config.control_variant, false, player.has_cover());
            if let Some(controls) = transport_controls(
                set,
                player.playback().is_playing(),
                config.inverted,
                AudioPlayerMessage::PlayPause,
                AudioPlayerMessage::SkipBackward,
                AudioPlayerMessage::SkipForward,
            ) {
                inner = inner.push(controls);
            }
            inner.into()
        }
        Body::Loading => stack![inner, center(loading_indicator(config.inverted))]
            .width(Fill)
            .into(),
        Body::Failed(message) => stack![inner, center(failure_notice(message))]
            .width(Fill)
            .into(),
    };

    let surface = mouse_area(stacked).on_press(AudioPlayerMessage::SurfaceClicked);
    panel_frame(surface.into(), theme::PANEL_PADDING)
}

// =============================================================================
// Shared pieces
// =============================================================================

/// The surface an engine instance renders into
///
/// Hosts supply a factory for their engine's widget; without one the slot is
/// a blank strip of the configured height.
fn waveform_surface<'a>(slot: SlotRef<'a, '_>) -> Element<'a, AudioPlayerMessage> {
    match slot {
        Some(build) => build(),
        None => container(Space::new())
            .width(Fill)
            .height(theme::WAVEFORM_HEIGHT)
            .into(),
    }
}

/// Rounded white panel with a soft drop shadow
fn panel_frame(content: Element<'_, AudioPlayerMessage>, padding: f32) -> Element<'_, AudioPlayerMessage> {
    container(content)
        .width(Fill)
        .padding(padding)
        .style(|_theme| container::Style {
            background: Some(iced::Background::Color(theme::PANEL_BACKGROUND)),
            border: Border {
                color: Color::TRANSPARENT,
                width: 0.0,
                radius: theme::PANEL_RADIUS.into(),
            },
            shadow: theme::PANEL_SHADOW,
            ..Default::default()
        })
        .into()
}

fn loading_indicator<'a>(inverted: bool) -> Element<'a, AudioPlayerMessage> {
    let color = if inverted {
        theme::MUTED_TEXT_INVERTED
    } else {
        theme::MUTED_TEXT
    };
    text("Loading…").size(14).color(color).into()
}

/// Failure notice with a retry affordance
fn failure_notice(message: &str) -> Element<'_, AudioPlayerMessage> {
    column![
        text("Playback unavailable").size(14),
        text(message.to_string()).size(12).color(theme::MUTED_TEXT),
        button(text("Retry").size(14))
            .padding(8)
            .style(button::primary)
            .on_press(AudioPlayerMessage::Retry),
    ]
    .spacing(8)
    .align_x(Center)
    .into()
}
