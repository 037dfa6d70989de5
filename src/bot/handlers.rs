//! Telegram handlers: fixed command replies and the link-submission flow.
//!
//! The submission flow mirrors the service contract: record activity, run
//! the cooldown gate, validate, post a `Fetching…` status message, then
//! either edit it into an error notice or replace it with the rendered
//! download list.

use crate::config::FOOTER;
use crate::relay::{format, ratelimit::Decision, Relay, RelayError};
use crate::state::Liveness;
use anyhow::Result;
use chrono::Utc;
use std::sync::Arc;
use teloxide::{
    prelude::*,
    types::{LinkPreviewOptions, ParseMode},
    utils::command::BotCommands,
};
use tracing::{debug, info, warn};

/// Supported slash commands
#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Supported commands:")]
pub enum Command {
    /// Greeting and usage hint
    #[command(description = "Start the bot.")]
    Start,
    /// Usage hint
    #[command(description = "How to use the bot.")]
    Help,
}

/// Stable per-user identifier, `None` for channel posts and other
/// userless updates.
#[must_use]
pub fn user_id(msg: &Message) -> Option<i64> {
    msg.from.as_ref().map(|u| u.id.0.cast_signed())
}

/// `/start` reply.
pub async fn start(bot: Bot, msg: Message) -> Result<()> {
    bot.send_message(msg.chat.id, format!("Send me a Terabox link.\n{FOOTER}"))
        .await?;
    Ok(())
}

/// `/help` reply.
pub async fn help(bot: Bot, msg: Message) -> Result<()> {
    bot.send_message(
        msg.chat.id,
        format!("Just send a Terabox share link.\n{FOOTER}"),
    )
    .await?;
    Ok(())
}

/// Fixed user-facing notice for each pipeline failure.
fn error_reply(err: &RelayError) -> String {
    let body = match err {
        RelayError::InvalidInput => "Invalid link.".to_string(),
        RelayError::NoItems => "No downloadable items.".to_string(),
        RelayError::Fetch(e) => format!("Error: {e}"),
    };
    format!("{body}\n{FOOTER}")
}

/// Handles a non-command text message as a share-link submission.
///
/// Every failure is converted to a reply; nothing here takes the process
/// down.
pub async fn handle_link(
    bot: Bot,
    msg: Message,
    relay: Arc<Relay>,
    liveness: Arc<Liveness>,
) -> Result<()> {
    liveness.mark_user_activity(Utc::now().timestamp()).await;

    let Some(user_id) = user_id(&msg) else {
        return Ok(());
    };

    if let Decision::Cooldown { remaining_secs } = relay.gate(user_id).await {
        info!(user_id, remaining_secs, "submission rate limited");
        bot.send_message(
            msg.chat.id,
            format!("Slow down. Try again in {remaining_secs}s.\n{FOOTER}"),
        )
        .await?;
        return Ok(());
    }

    let text = msg.text().unwrap_or_default();
    if text.trim().is_empty() {
        bot.send_message(msg.chat.id, error_reply(&RelayError::InvalidInput))
            .await?;
        return Ok(());
    }

    let status = bot.send_message(msg.chat.id, "Fetching…").await?;

    match relay.resolve(text).await {
        Ok(items) => {
            info!(user_id, count = items.len(), "submission resolved");
            // Best effort: if Telegram rejects this edit the result message
            // below is still delivered.
            if let Err(e) = bot.edit_message_text(msg.chat.id, status.id, "Done.").await {
                debug!("status edit failed (discarded): {e}");
            }
            bot.send_message(msg.chat.id, format::render(&items))
                .parse_mode(ParseMode::Html)
                .link_preview_options(LinkPreviewOptions {
                    is_disabled: true,
                    url: None,
                    prefer_small_media: false,
                    prefer_large_media: false,
                    show_above_text: false,
                })
                .await?;
        }
        Err(err) => {
            if let RelayError::Fetch(e) = &err {
                warn!(user_id, "resolver fetch failed: {e}");
            }
            bot.edit_message_text(msg.chat.id, status.id, error_reply(&err))
                .await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_parse() {
        assert!(matches!(
            Command::parse("/start", "teralink_bot"),
            Ok(Command::Start)
        ));
        assert!(matches!(
            Command::parse("/help", "teralink_bot"),
            Ok(Command::Help)
        ));
        assert!(Command::parse("https://terabox.com/s/abc", "teralink_bot").is_err());
    }

    #[test]
    fn test_error_replies_carry_footer() {
        assert_eq!(
            error_reply(&RelayError::InvalidInput),
            "Invalid link.\n— Powered by @Regnis"
        );
        assert_eq!(
            error_reply(&RelayError::NoItems),
            "No downloadable items.\n— Powered by @Regnis"
        );
    }
}
