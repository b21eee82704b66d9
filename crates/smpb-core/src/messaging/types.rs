/// Where a media item's bytes come from.
///
/// `Url` items are referenced remotely and fetched by Telegram itself;
/// `Bytes` items are uploaded as multipart file parts with an explicit
/// filename, which is what lets locally built content ride along in an
/// album next to remote URLs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MediaSource {
    Url(String),
    Bytes { data: Vec<u8>, file_name: String },
}

/// One photo in a delivery: its source plus the caption shown under it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaItem {
    pub source: MediaSource,
    pub caption: String,
}

impl MediaItem {
    pub fn url(url: impl Into<String>, caption: impl Into<String>) -> Self {
        Self {
            source: MediaSource::Url(url.into()),
            caption: caption.into(),
        }
    }
}

/// An in-memory document upload (the ZIP archive). Sent as
/// `application/zip` with the given filename.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutgoingDocument {
    pub data: Vec<u8>,
    pub file_name: String,
}

/// Outgoing "chat action" (upload indicators).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChatAction {
    UploadPhoto,
    UploadDocument,
}
