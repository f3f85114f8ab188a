//! Elapsed/total time label row
//!
//! Shown only for the full control variant: elapsed on the left, total on
//! the right, space between.

use iced::widget::{row, text, Space};
use iced::{Element, Fill};

use crate::theme::{MUTED_TEXT, MUTED_TEXT_INVERTED};

/// Build the time label row from pre-rendered "M:SS" strings
pub fn time_labels<'a, Message: 'a>(
    current: &str,
    total: &str,
    inverted: bool,
) -> Element<'a, Message> {
    let color = if inverted { MUTED_TEXT_INVERTED } else { MUTED_TEXT };
    row![
        text(current.to_string()).size(14).color(color),
        Space::new().width(Fill),
        text(total.to_string()).size(14).color(color),
    ]
    .width(Fill)
    .padding(8)
    .into()
}
