//! Common messaging utilities for Telegram bot.
//!
//! Sends rendered replies as HTML and splits texts that would exceed
//! Telegram's message limit.

use crate::bot::views::inline_markup;
use anyhow::Result;
use sightseer_core::Reply;
use teloxide::prelude::*;
use teloxide::types::{ChatId, ParseMode};

/// Maximum message length for Telegram with safety margin.
/// The official limit is 4096 characters.
pub const TELEGRAM_MESSAGE_LIMIT: usize = 4000;

/// Sends a reply, attaching its keyboard to the last part.
///
/// # Errors
///
/// Returns an error if any part fails to send.
pub async fn send_reply(bot: &Bot, chat_id: ChatId, reply: &Reply) -> Result<()> {
    let parts = split_message(&reply.text, TELEGRAM_MESSAGE_LIMIT);
    let last = parts.len().saturating_sub(1);

    for (i, part) in parts.into_iter().enumerate() {
        let mut request = bot.send_message(chat_id, part).parse_mode(ParseMode::Html);
        if i == last {
            if let Some(keyboard) = &reply.keyboard {
                request = request.reply_markup(inline_markup(keyboard));
            }
        }
        request.await?;
    }

    Ok(())
}

/// Splits `text` into parts of at most `limit` characters.
///
/// Lines are kept whole where possible. An overlong line is broken at
/// whitespace outside HTML tags; only a single token longer than `limit` is
/// cut mid-token. Rendered messages keep each element on one line, so parts
/// stay valid HTML.
///
/// # Examples
///
/// ```
/// use sightseer_transport_telegram::bot::messaging::split_message;
/// assert_eq!(split_message("one\ntwo", 5), vec!["one", "two"]);
/// ```
#[must_use]
pub fn split_message(text: &str, limit: usize) -> Vec<String> {
    let limit = limit.max(1);
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for line in text.split('\n') {
        let line_len = line.chars().count();
        let joined_len = if current.is_empty() {
            line_len
        } else {
            current_len + 1 + line_len
        };

        if joined_len <= limit {
            if !current.is_empty() {
                current.push('\n');
            }
            current.push_str(line);
            current_len = joined_len;
            continue;
        }

        push_part(&mut parts, std::mem::take(&mut current));
        current_len = 0;

        if line_len <= limit {
            current.push_str(line);
            current_len = line_len;
        } else {
            for piece in split_line(line, limit) {
                push_part(&mut parts, piece);
            }
        }
    }

    push_part(&mut parts, current);
    parts
}

fn push_part(parts: &mut Vec<String>, part: String) {
    let trimmed = part.trim_end();
    if !trimmed.trim_start().is_empty() {
        parts.push(trimmed.to_string());
    }
}

fn split_line(line: &str, limit: usize) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut len = 0;

    for word in tokens(line) {
        let word_len = word.chars().count();
        if len + word_len > limit && !current.is_empty() {
            pieces.push(std::mem::take(&mut current));
            len = 0;
        }

        if word_len <= limit {
            current.push_str(word);
            len += word_len;
            continue;
        }

        for ch in word.chars() {
            if len == limit {
                pieces.push(std::mem::take(&mut current));
                len = 0;
            }
            current.push(ch);
            len += 1;
        }
    }

    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}

/// Splits after whitespace that is not inside a `<...>` tag.
///
/// Escaped text never contains a raw `<`, so every `<` opens markup.
fn tokens(line: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut in_tag = false;

    for (i, ch) in line.char_indices() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if c.is_whitespace() && !in_tag => {
                let end = i + c.len_utf8();
                tokens.push(&line[start..end]);
                start = end;
            }
            _ => {}
        }
    }

    if start < line.len() {
        tokens.push(&line[start..]);
    }
    tokens
}
