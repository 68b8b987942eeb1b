use crate::bot::messaging::send_reply;
use crate::bot::views::location_keyboard;
use anyhow::Result;
use sightseer_core::view::{AttractionView, DefaultAttractionView};
use sightseer_core::{AttractionBrowser, ConversationId, Reply};
use std::sync::Arc;
use teloxide::{prelude::*, types::ParseMode, utils::command::BotCommands};
use tracing::info;

// Helper function to get user name from Message
fn get_user_name(msg: &Message) -> String {
    if let Some(ref user) = msg.from {
        if let Some(ref username) = user.username {
            return username.clone();
        }
        if !user.first_name.is_empty() {
            return user.first_name.clone();
        }
    }
    "Unknown".to_string()
}

/// Safe extraction of user ID from a message.
/// Returns 0 if the user information is missing.
pub fn get_user_id_safe(msg: &Message) -> i64 {
    msg.from.as_ref().map_or(0, |u| u.id.0.cast_signed())
}

/// Search results are kept per chat.
#[must_use]
pub fn conversation_of(msg: &Message) -> ConversationId {
    ConversationId(msg.chat.id.0)
}

/// Supported commands for the bot
#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Supported commands:")]
pub enum Command {
    /// Start the bot and show welcome message
    #[command(description = "Start the bot.")]
    Start,
    /// Show usage hints
    #[command(description = "How to search for attractions.")]
    Help,
}

/// Start handler
///
/// # Errors
///
/// Returns an error if the welcome message cannot be sent.
pub async fn start(bot: Bot, msg: Message) -> Result<()> {
    let user_id = get_user_id_safe(&msg);
    let user_name = get_user_name(&msg);

    info!("User {user_id} ({user_name}) initiated /start command.");

    bot.send_message(msg.chat.id, DefaultAttractionView::welcome_message())
        .parse_mode(ParseMode::Html)
        .reply_markup(location_keyboard())
        .await?;
    Ok(())
}

/// Help handler
///
/// # Errors
///
/// Returns an error if the help message cannot be sent.
pub async fn help(bot: Bot, msg: Message) -> Result<()> {
    bot.send_message(msg.chat.id, DefaultAttractionView::help_message())
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}

/// Treats any non-command text as a city name.
///
/// # Errors
///
/// Returns an error if the reply cannot be sent.
pub async fn handle_city_text(bot: Bot, msg: Message, browser: Arc<AttractionBrowser>) -> Result<()> {
    let text = msg.text().unwrap_or_default();

    // Unknown commands fall through the command filter
    let reply = if text.starts_with('/') {
        info!(
            "User {} sent unknown command: {text}",
            get_user_id_safe(&msg)
        );
        Reply::plain(DefaultAttractionView::help_message())
    } else {
        browser.search_city(conversation_of(&msg), text).await
    };

    send_reply(&bot, msg.chat.id, &reply).await
}

/// Searches around a shared location.
///
/// # Errors
///
/// Returns an error if the reply cannot be sent.
pub async fn handle_location(
    bot: Bot,
    msg: Message,
    browser: Arc<AttractionBrowser>,
) -> Result<()> {
    let Some(location) = msg.location() else {
        return Ok(());
    };

    let reply = browser
        .search_location(conversation_of(&msg), location.latitude, location.longitude)
        .await;
    send_reply(&bot, msg.chat.id, &reply).await
}

/// Anything that is neither text nor a location.
///
/// # Errors
///
/// Returns an error if the prompt cannot be sent.
pub async fn handle_unsupported(bot: Bot, msg: Message) -> Result<()> {
    info!(
        "User {} sent an unsupported message kind",
        get_user_id_safe(&msg)
    );
    send_reply(
        &bot,
        msg.chat.id,
        &Reply::plain(DefaultAttractionView::empty_city_prompt()),
    )
    .await
}
