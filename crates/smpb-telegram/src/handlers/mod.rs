//! Telegram update handlers.

use std::sync::Arc;

use teloxide::prelude::*;

use crate::router::AppState;

mod commands;

pub async fn handle_message(_bot: Bot, msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    if let Some(text) = msg.text() {
        if text.starts_with('/') {
            return commands::handle_command(msg, state).await;
        }
    }

    // Non-command chatter is ignored; the bot only answers chapter commands.
    Ok(())
}
