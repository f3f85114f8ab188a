//! Transport button styling
//!
//! Circular buttons with a soft white glow, in three treatments:
//! - **toggle**: the play/pause button, filled (dark on light surfaces,
//!   light when `inverted`)
//! - **ghost**: the skip buttons, transparent background, glyph only
//!
//! Use with `.style(move |_theme, status| toggle_style(status, inverted))`.

use iced::widget::button::{Status, Style};
use iced::{Background, Border, Color, Shadow, Vector};

/// Filled toggle background on light surfaces
const TOGGLE_BG: Color = Color::from_rgb(0.1, 0.1, 0.1);

/// Filled toggle background when inverted (light on dark surfaces)
const TOGGLE_BG_INVERTED: Color = Color::from_rgb(0.96, 0.96, 0.96);

/// Soft white glow around transport buttons
const GLOW: Shadow = Shadow {
    color: Color::from_rgba(1.0, 1.0, 1.0, 0.8),
    offset: Vector::new(0.0, 0.0),
    blur_radius: 14.0,
};

/// Radius large enough to render any button fully round
const ROUND: f32 = 999.0;

/// Lighten a color by a factor (0.0-1.0)
fn lighten(color: Color, factor: f32) -> Color {
    Color::from_rgb(
        (color.r + factor).min(1.0),
        (color.g + factor).min(1.0),
        (color.b + factor).min(1.0),
    )
}

/// Darken a color by a factor (0.0-1.0)
fn darken(color: Color, factor: f32) -> Color {
    Color::from_rgb(
        (color.r * (1.0 - factor)).max(0.0),
        (color.g * (1.0 - factor)).max(0.0),
        (color.b * (1.0 - factor)).max(0.0),
    )
}

fn round_style(background: Option<Color>, glyph: Color) -> Style {
    Style {
        background: background.map(Background::Color),
        text_color: glyph,
        border: Border {
            color: Color::TRANSPARENT,
            width: 0.0,
            radius: ROUND.into(),
        },
        shadow: GLOW,
        snap: false,
    }
}

/// Glyph color for the given surface treatment
pub fn glyph_color(inverted: bool) -> Color {
    if inverted {
        Color::WHITE
    } else {
        Color::from_rgb(0.1, 0.1, 0.1)
    }
}

/// Style for the play/pause toggle button
pub fn toggle_style(status: Status, inverted: bool) -> Style {
    let (bg, glyph) = if inverted {
        (TOGGLE_BG_INVERTED, Color::from_rgb(0.1, 0.1, 0.1))
    } else {
        (TOGGLE_BG, Color::WHITE)
    };
    match status {
        Status::Active => round_style(Some(bg), glyph),
        Status::Hovered => round_style(Some(lighten(bg, 0.08)), glyph),
        Status::Pressed => round_style(Some(darken(bg, 0.15)), glyph),
        Status::Disabled => round_style(Some(darken(bg, 0.3)), MUTED_GLYPH),
    }
}

/// Style for the skip (reverse/forward) buttons
pub fn ghost_style(status: Status, inverted: bool) -> Style {
    let glyph = glyph_color(inverted);
    match status {
        Status::Active => round_style(None, glyph),
        Status::Hovered => round_style(Some(Color::from_rgba(0.5, 0.5, 0.5, 0.15)), glyph),
        Status::Pressed => round_style(Some(Color::from_rgba(0.5, 0.5, 0.5, 0.3)), glyph),
        Status::Disabled => round_style(None, MUTED_GLYPH),
    }
}

const MUTED_GLYPH: Color = Color::from_rgb(0.5, 0.5, 0.5);
