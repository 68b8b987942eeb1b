use crate::bot::messaging::send_reply;
use anyhow::{anyhow, Result};
use sightseer_core::{AttractionBrowser, ConversationId};
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::info;

/// Handles presses on result page buttons.
///
/// The query is always answered first so the client stops its spinner; the
/// outcome is sent as a new message to the chat the button belongs to.
///
/// # Errors
///
/// Returns an error if the originating chat is unknown or the reply cannot
/// be sent.
pub async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    browser: Arc<AttractionBrowser>,
) -> Result<()> {
    let _ = bot.answer_callback_query(q.id.clone()).await;

    let Some(data) = q.data.as_deref() else {
        return Ok(());
    };

    let user_id = q.from.id.0.cast_signed();
    let chat_id = q
        .message
        .as_ref()
        .map(|msg| msg.chat().id)
        .ok_or_else(|| anyhow!("Callback message missing chat id"))?;

    info!("User {user_id} pressed {data}");

    let reply = browser.handle_callback(ConversationId(chat_id.0), data).await;
    send_reply(&bot, chat_id, &reply).await
}
