use std::sync::Arc;

use teloxide::prelude::*;

use tracing::info;

use smpb_core::domain::{ChatId, DeliveryMode};

use crate::router::AppState;

const USAGE: &str = "Commands:\n\
/chapter <id> - send a chapter as photo albums\n\
/chapterzip <id> - send a chapter as a ZIP archive\n\
\n\
The id is the 20-digit number from the chapter URL.";

fn parse_command(text: &str) -> (String, String) {
    // Telegram may send `/cmd@botname arg1 ...`
    let mut parts = text.trim().splitn(2, char::is_whitespace);
    let first = parts.next().unwrap_or("").trim();
    let rest = parts.next().unwrap_or("").trim().to_string();

    let cmd = first
        .trim_start_matches('/')
        .split('@')
        .next()
        .unwrap_or("")
        .to_lowercase();

    (cmd, rest)
}

pub async fn handle_command(msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    let (cmd, args) = parse_command(text);

    let chat_id = ChatId(msg.chat.id.0);
    let username = msg
        .from()
        .and_then(|u| u.username.clone())
        .unwrap_or_else(|| "unknown".to_string());

    match cmd.as_str() {
        "chapter" => {
            info!("chapter {args:?} requested by {username}");
            state
                .pipeline
                .deliver(chat_id, &args, DeliveryMode::Album)
                .await;
        }
        "chapterzip" => {
            info!("chapter {args:?} requested as zip by {username}");
            state
                .pipeline
                .deliver(chat_id, &args, DeliveryMode::Archive)
                .await;
        }
        _ => {
            // /start, /help, and anything unrecognized all get the usage text.
            let _ = state.messenger.send_text(chat_id, USAGE).await;
        }
    }

    Ok(())
}
