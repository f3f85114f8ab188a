//! Shared theme constants for wavecard UI components
//!
//! Colors and layout metrics used by the player panel, transport controls,
//! and time labels.

use iced::{Color, Shadow, Vector};

/// Color of the not-yet-played waveform portion (#ccc)
pub const WAVE_COLOR: Color = Color::from_rgb(0.8, 0.8, 0.8);

/// Color of the already-played waveform portion (#666)
pub const PROGRESS_COLOR: Color = Color::from_rgb(0.4, 0.4, 0.4);

/// Player panel background
pub const PANEL_BACKGROUND: Color = Color::WHITE;

/// Player panel corner radius
pub const PANEL_RADIUS: f32 = 20.0;

/// Soft drop shadow under the player panel
pub const PANEL_SHADOW: Shadow = Shadow {
    color: Color::from_rgba(0.0, 0.0, 0.0, 0.05),
    offset: Vector::new(0.0, 5.0),
    blur_radius: 10.0,
};

/// Dimmed text for loading indicators and secondary labels
pub const MUTED_TEXT: Color = Color::from_rgb(0.5, 0.5, 0.5);

/// Muted text on dark (inverted) surfaces
pub const MUTED_TEXT_INVERTED: Color = Color::from_rgb(0.75, 0.75, 0.75);

/// Height of the waveform render surface in pixels
pub const WAVEFORM_HEIGHT: f32 = 100.0;

/// Fixed cover column width in the expanded grid
pub const COVER_COLUMN_WIDTH: f32 = 400.0;

/// Maximum cover artwork size inside its column
pub const COVER_MAX_SIZE: f32 = 380.0;

/// Gap between the cover column and the player column
pub const GRID_GAP: f32 = 32.0;

/// Grid gap once the layout collapses to a single column
pub const GRID_GAP_NARROW: f32 = 16.0;

/// Viewport width below which the expanded grid collapses
pub const NARROW_BREAKPOINT: f32 = 768.0;

/// Inset of the floating control overlay from the panel corner
pub const OVERLAY_INSET: f32 = 16.0;

/// Inner padding of the expanded player panel
pub const PANEL_PADDING: f32 = 32.0;
