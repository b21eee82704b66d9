//! Chapter delivery pipeline: validate → fetch → announce → deliver.
//!
//! One invocation per chat command. All failures are caught at
//! [`ChapterPipeline::deliver`]; the chat gets the user-facing message and
//! the operator log gets the cause.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::{
    archive::ChapterArchive,
    domain::{ChapterResult, ChatId, DeliveryMode},
    errors::Error,
    messaging::{
        port::{MediaPort, ALBUM_MAX},
        types::{ChatAction, MediaItem, OutgoingDocument},
    },
    ports::ChapterSource,
    utils::is_chapter_id,
    Result,
};

pub struct ChapterPipeline {
    source: Arc<dyn ChapterSource>,
    messenger: Arc<dyn MediaPort>,
}

impl ChapterPipeline {
    pub fn new(source: Arc<dyn ChapterSource>, messenger: Arc<dyn MediaPort>) -> Self {
        Self { source, messenger }
    }

    /// Run one delivery and report any failure to the chat. This is the
    /// error boundary: nothing propagates past it.
    pub async fn deliver(&self, chat_id: ChatId, chapter_id: &str, mode: DeliveryMode) {
        if let Err(err) = self.run(chat_id, chapter_id, mode).await {
            error!("chapter {chapter_id} delivery failed: {err}");
            if let Err(send_err) = self.messenger.send_text(chat_id, &err.user_message()).await {
                error!("could not report failure to chat {}: {send_err}", chat_id.0);
            }
        }
    }

    async fn run(&self, chat_id: ChatId, chapter_id: &str, mode: DeliveryMode) -> Result<()> {
        // Reject bad ids before touching the network.
        if !is_chapter_id(chapter_id) {
            return Err(Error::InvalidChapterId);
        }

        let chapter = self.source.fetch_chapter(chapter_id).await?;

        self.messenger
            .send_text(chat_id, &format!("{} - {}", chapter.title, chapter.chapter))
            .await?;

        match mode {
            DeliveryMode::Album => self.deliver_album(chat_id, &chapter).await?,
            DeliveryMode::Archive => self.deliver_archive(chat_id, &chapter).await?,
        }

        info!("sent chapter {chapter_id} with {} pages", chapter.pages.len());
        Ok(())
    }

    async fn deliver_album(&self, chat_id: ChatId, chapter: &ChapterResult) -> Result<()> {
        let _ = self
            .messenger
            .send_chat_action(chat_id, ChatAction::UploadPhoto)
            .await;

        let items: Vec<MediaItem> = chapter
            .pages
            .iter()
            .enumerate()
            .map(|(i, url)| MediaItem::url(url.clone(), (i + 1).to_string()))
            .collect();

        // Page order is preserved; a trailing batch of one cannot go out as
        // an album, so it is sent as a plain photo.
        for batch in items.chunks(ALBUM_MAX) {
            if batch.len() == 1 {
                self.messenger.send_photo(chat_id, batch[0].clone()).await?;
            } else {
                self.messenger.send_album(chat_id, batch.to_vec()).await?;
            }
        }
        Ok(())
    }

    async fn deliver_archive(&self, chat_id: ChatId, chapter: &ChapterResult) -> Result<()> {
        self.messenger
            .send_text(chat_id, "Creating ZIP archive, please wait...")
            .await?;
        let _ = self
            .messenger
            .send_chat_action(chat_id, ChatAction::UploadDocument)
            .await;

        let mut archive = ChapterArchive::new();
        for url in &chapter.pages {
            match self.source.fetch_page(url).await? {
                Some(image) => archive.add_page(&image)?,
                None => warn!("skipping unavailable page {url}"),
            }
        }

        let skipped = chapter.pages.len() - archive.entry_count();
        if skipped > 0 {
            warn!("archive is missing {skipped} of {} pages", chapter.pages.len());
        }

        let doc = OutgoingDocument {
            data: archive.finish()?,
            file_name: format!("{}_{}.zip", chapter.title, chapter.chapter),
        };
        self.messenger.send_document(chat_id, doc).await?;
        Ok(())
    }
}
