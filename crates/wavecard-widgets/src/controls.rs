//! Transport control surface
//!
//! The control surface is a pure function of the player's state and
//! configuration. [`control_set`] derives *which* affordances exist and how
//! they are sized/positioned; [`transport_controls`] turns a set into iced
//! widgets. The derivation is separate so the affordance policy is testable
//! without a renderer.

use iced::widget::{button, row, text};
use iced::{Center, Element};
use serde::{Deserialize, Serialize};

use crate::button_styles::{ghost_style, glyph_color, toggle_style};

/// Which transport affordances are rendered
///
/// Purely a rendering/input concern: the playback state machine is identical
/// for every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ControlVariant {
    /// Reverse, play/pause toggle, forward
    Full,
    /// Play/pause toggle only
    #[default]
    PlayPause,
    /// No controls, no handlers
    None,
}

/// Affordance set derived from variant and layout context
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlSet {
    /// Skip-backward affordance exists
    pub reverse: bool,
    /// Play/pause toggle exists
    pub toggle: bool,
    /// Skip-forward affordance exists
    pub forward: bool,
    /// Icon glyph size in pixels
    pub icon_size: f32,
    /// Button padding in pixels
    pub padding: f32,
    /// Float the controls over the bottom-right corner instead of laying
    /// them out inline
    pub overlay: bool,
}

impl ControlSet {
    /// No affordances at all
    pub fn is_empty(&self) -> bool {
        !(self.reverse || self.toggle || self.forward)
    }
}

/// Derive the affordance set
///
/// Controls shrink (18px icons, 16px padding) and float bottom-right only
/// when a compact panel carries cover artwork; everywhere else they are
/// full-size (36px icons, 32px padding) and inline.
pub fn control_set(variant: ControlVariant, compact: bool, has_cover: bool) -> ControlSet {
    let small = compact && has_cover;
    let (icon_size, padding) = if small { (18.0, 16.0) } else { (36.0, 32.0) };
    let (reverse, toggle, forward) = match variant {
        ControlVariant::Full => (true, true, true),
        ControlVariant::PlayPause => (false, true, false),
        ControlVariant::None => (false, false, false),
    };
    ControlSet {
        reverse,
        toggle,
        forward,
        icon_size,
        padding,
        overlay: small,
    }
}

/// Build the transport control row for an affordance set
///
/// Returns `None` for an empty set: nothing is rendered and no handler is
/// attached. The caller positions the row according to `set.overlay`.
pub fn transport_controls<'a, Message: Clone + 'a>(
    set: ControlSet,
    is_playing: bool,
    inverted: bool,
    on_play_pause: Message,
    on_reverse: Message,
    on_forward: Message,
) -> Option<Element<'a, Message>> {
    if set.is_empty() {
        return None;
    }

    let glyph = move |symbol: &'a str| text(symbol).size(set.icon_size).color(glyph_color(inverted));

    let mut controls = row![].spacing(4.0).align_y(Center);

    if set.reverse {
        controls = controls.push(
            button(glyph("◀◀"))
                .padding(set.padding)
                .style(move |_theme, status| ghost_style(status, inverted))
                .on_press(on_reverse),
        );
    }

    if set.toggle {
        let symbol = if is_playing { "⏸" } else { "▶" };
        controls = controls.push(
            button(text(symbol).size(set.icon_size))
                .padding(set.padding)
                .style(move |_theme, status| toggle_style(status, inverted))
                .on_press(on_play_pause),
        );
    }

    if set.forward {
        controls = controls.push(
            button(glyph("▶▶"))
                .padding(set.padding)
                .style(move |_theme, status| ghost_style(status, inverted))
                .on_press(on_forward),
        );
    }

    Some(controls.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_variant_has_zero_affordances() {
        for compact in [false, true] {
            for has_cover in [false, true] {
                let set = control_set(ControlVariant::None, compact, has_cover);
                assert!(set.is_empty());
                assert!(!set.reverse && !set.toggle && !set.forward);
            }
        }
    }

    #[test]
    fn test_playpause_variant_is_toggle_only() {
        for compact in [false, true] {
            for has_cover in [false, true] {
                let set = control_set(ControlVariant::PlayPause, compact, has_cover);
                assert!(set.toggle);
                assert!(!set.reverse, "play/pause never exposes reverse");
                assert!(!set.forward, "play/pause never exposes forward");
            }
        }
    }

    #[test]
    fn test_full_variant_has_all_affordances() {
        let set = control_set(ControlVariant::Full, false, false);
        assert!(set.reverse && set.toggle && set.forward);
    }

    #[test]
    fn test_sizing_policy() {
        // Small floating controls only for compact panels with cover art
        let small = control_set(ControlVariant::Full, true, true);
        assert_eq!(small.icon_size, 18.0);
        assert_eq!(small.padding, 16.0);
        assert!(small.overlay);

        for (compact, has_cover) in [(false, false), (false, true), (true, false)] {
            let set = control_set(ControlVariant::Full, compact, has_cover);
            assert_eq!(set.icon_size, 36.0);
            assert_eq!(set.padding, 32.0);
            assert!(!set.overlay);
        }
    }

    #[test]
    fn test_empty_set_renders_nothing() {
        let set = control_set(ControlVariant::None, true, true);
        let element: Option<Element<'_, ()>> =
            transport_controls(set, false, false, (), (), ());
        assert!(element.is_none());
    }
}
