use async_trait::async_trait;

use crate::{domain::ChapterResult, Result};

/// Port for the source site.
///
/// `fetch_chapter` re-authenticates on every call when credentials are
/// configured; there is no session reuse across chapters.
#[async_trait]
pub trait ChapterSource: Send + Sync {
    async fn fetch_chapter(&self, chapter_id: &str) -> Result<ChapterResult>;

    /// Download one page image. A non-success HTTP status resolves to
    /// `Ok(None)` so archive assembly can skip the page; transport failures
    /// are real errors.
    async fn fetch_page(&self, url: &str) -> Result<Option<Vec<u8>>>;
}
