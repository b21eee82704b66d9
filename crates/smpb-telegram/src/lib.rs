//! Telegram adapter (teloxide).
//!
//! This crate implements the `smpb-core` MediaPort over the Telegram Bot API.
//! Byte-stream attachments become multipart uploads with explicit filenames;
//! URL attachments are passed through for Telegram to fetch itself.

use async_trait::async_trait;

use teloxide::{
    prelude::*,
    types::{InputFile, InputMedia, InputMediaPhoto},
};

use tokio::time::sleep;

pub mod handlers;
pub mod router;

use smpb_core::{
    domain::{ChatId, MessageId, MessageRef},
    errors::Error,
    messaging::{
        port::{MediaPort, ALBUM_MAX, ALBUM_MIN},
        types::{ChatAction, MediaItem, MediaSource, OutgoingDocument},
    },
    Result,
};

#[derive(Clone)]
pub struct TelegramMessenger {
    bot: Bot,
}

impl TelegramMessenger {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    pub fn bot(&self) -> Bot {
        self.bot.clone()
    }

    fn tg_chat(chat_id: ChatId) -> teloxide::types::ChatId {
        teloxide::types::ChatId(chat_id.0)
    }

    fn map_err(e: teloxide::RequestError) -> Error {
        Error::External(format!("telegram error: {e}"))
    }

    async fn with_retry<T, Fut>(&self, mut op: impl FnMut() -> Fut) -> Result<T>
    where
        Fut: std::future::IntoFuture<Output = std::result::Result<T, teloxide::RequestError>>,
        Fut::IntoFuture: Send,
    {
        const MAX_RETRIES: usize = 1;
        let mut attempts = 0usize;
        loop {
            match op().await {
                Ok(v) => return Ok(v),
                Err(e) => match e {
                    teloxide::RequestError::RetryAfter(d) if attempts < MAX_RETRIES => {
                        attempts += 1;
                        sleep(d).await;
                        continue;
                    }
                    other => return Err(Self::map_err(other)),
                },
            }
        }
    }
}

fn input_file(source: MediaSource) -> Result<InputFile> {
    match source {
        MediaSource::Url(raw) => {
            let url = url::Url::parse(&raw)
                .map_err(|e| Error::External(format!("invalid media url {raw}: {e}")))?;
            Ok(InputFile::url(url))
        }
        MediaSource::Bytes { data, file_name } => Ok(InputFile::memory(data).file_name(file_name)),
    }
}

#[async_trait]
impl MediaPort for TelegramMessenger {
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<MessageRef> {
        let msg = self
            .with_retry(|| self.bot.send_message(Self::tg_chat(chat_id), text.to_string()))
            .await?;

        Ok(MessageRef {
            chat_id,
            message_id: MessageId(msg.id.0),
        })
    }

    async fn send_photo(&self, chat_id: ChatId, item: MediaItem) -> Result<MessageRef> {
        let file = input_file(item.source)?;
        let msg = self
            .with_retry(|| {
                self.bot
                    .send_photo(Self::tg_chat(chat_id), file.clone())
                    .caption(item.caption.clone())
            })
            .await?;

        Ok(MessageRef {
            chat_id,
            message_id: MessageId(msg.id.0),
        })
    }

    async fn send_album(&self, chat_id: ChatId, items: Vec<MediaItem>) -> Result<MessageRef> {
        // Contract violation, not a recoverable condition: callers chunk
        // before calling.
        assert!(
            (ALBUM_MIN..=ALBUM_MAX).contains(&items.len()),
            "album must contain {ALBUM_MIN}-{ALBUM_MAX} items, got {}",
            items.len()
        );

        let media = items
            .into_iter()
            .map(|item| {
                let file = input_file(item.source)?;
                Ok(InputMedia::Photo(
                    InputMediaPhoto::new(file).caption(item.caption),
                ))
            })
            .collect::<Result<Vec<_>>>()?;

        let msgs = self
            .with_retry(|| {
                self.bot
                    .send_media_group(Self::tg_chat(chat_id), media.clone())
            })
            .await?;

        let first = msgs
            .first()
            .ok_or_else(|| Error::External("empty media group response".to_string()))?;

        Ok(MessageRef {
            chat_id,
            message_id: MessageId(first.id.0),
        })
    }

    async fn send_document(&self, chat_id: ChatId, doc: OutgoingDocument) -> Result<MessageRef> {
        let file = InputFile::memory(doc.data).file_name(doc.file_name);
        let msg = self
            .with_retry(|| self.bot.send_document(Self::tg_chat(chat_id), file.clone()))
            .await?;

        Ok(MessageRef {
            chat_id,
            message_id: MessageId(msg.id.0),
        })
    }

    async fn send_chat_action(&self, chat_id: ChatId, action: ChatAction) -> Result<()> {
        let tg_action = match action {
            ChatAction::UploadPhoto => teloxide::types::ChatAction::UploadPhoto,
            ChatAction::UploadDocument => teloxide::types::ChatAction::UploadDocument,
        };
        self.with_retry(|| self.bot.send_chat_action(Self::tg_chat(chat_id), tg_action))
            .await?;
        Ok(())
    }
}
