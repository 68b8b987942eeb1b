//! View layer for bot UI components
//!
//! Turns the transport-agnostic button layouts produced by the core into
//! Telegram keyboards.

use sightseer_core::view::{AttractionView, DefaultAttractionView, InlineKeyboard};
use teloxide::types::{
    ButtonRequest, InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup,
};

/// Convert a core button layout into an inline keyboard.
///
/// Each button carries its action's callback payload.
#[must_use]
pub fn inline_markup(keyboard: &InlineKeyboard) -> InlineKeyboardMarkup {
    let rows: Vec<Vec<InlineKeyboardButton>> = keyboard
        .rows
        .iter()
        .filter(|row| !row.is_empty())
        .map(|row| {
            row.iter()
                .map(|button| {
                    InlineKeyboardButton::callback(button.label.clone(), button.action.to_payload())
                })
                .collect()
        })
        .collect();
    InlineKeyboardMarkup::new(rows)
}

/// Reply keyboard with a single button that shares the user's location.
///
/// # Examples
///
/// ```
/// use sightseer_transport_telegram::bot::views::location_keyboard;
/// let keyboard = location_keyboard();
/// assert_eq!(keyboard.keyboard.len(), 1);
/// ```
#[must_use]
pub fn location_keyboard() -> KeyboardMarkup {
    let keyboard = vec![vec![KeyboardButton::new(
        DefaultAttractionView::share_location_label(),
    )
    .request(ButtonRequest::Location)]];
    KeyboardMarkup::new(keyboard).resize_keyboard()
}
