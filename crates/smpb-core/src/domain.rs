/// Telegram chat id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChatId(pub i64);

/// Telegram message id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageId(pub i32);

/// A stable reference to a Telegram message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageRef {
    pub chat_id: ChatId,
    pub message_id: MessageId,
}

/// One successfully scraped chapter: series title, chapter label, and the
/// page image URLs in reading order. `pages` is never empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChapterResult {
    pub title: String,
    pub chapter: String,
    pub pages: Vec<String>,
}

/// How a fetched chapter is delivered to the chat.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeliveryMode {
    /// Photo albums of up to ten pages each.
    Album,
    /// A single ZIP document with one entry per page.
    Archive,
}
