use async_trait::async_trait;

use crate::{
    domain::{ChatId, MessageRef},
    messaging::types::{ChatAction, MediaItem, OutgoingDocument},
    Result,
};

/// Albums are limited to ten photos per Telegram message.
pub const ALBUM_MAX: usize = 10;
/// And the API rejects albums of fewer than two items.
pub const ALBUM_MIN: usize = 2;

/// Outbound media port.
///
/// Telegram is the only implementation today; the pipeline depends on this
/// trait instead of a concrete client so tests can drive it with a recorder
/// and so byte-stream attachments stay a first-class input rather than a
/// client subclass hack.
#[async_trait]
pub trait MediaPort: Send + Sync {
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<MessageRef>;

    async fn send_photo(&self, chat_id: ChatId, item: MediaItem) -> Result<MessageRef>;

    /// Send 2..=10 items as one album. Fewer or more is a caller bug:
    /// implementations assert the bound rather than report it, callers must
    /// chunk first.
    async fn send_album(&self, chat_id: ChatId, items: Vec<MediaItem>) -> Result<MessageRef>;

    async fn send_document(&self, chat_id: ChatId, doc: OutgoingDocument) -> Result<MessageRef>;

    async fn send_chat_action(&self, chat_id: ChatId, action: ChatAction) -> Result<()>;
}
