/// Core error type for the bot.
///
/// Adapter crates map their library errors into this type so the pipeline can
/// handle failures consistently (user-facing message vs. operator log).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("Invalid chapter id. It must be a 20-digit number.")]
    InvalidChapterId,

    #[error("Login failed. Check your credentials.")]
    LoginFailed,

    /// The chapter exists but the account is not entitled to read it. The
    /// source site signals this by omitting the page data from the episode
    /// JSON, so it surfaces during nested-key traversal.
    #[error("Chapter not purchased")]
    ChapterUnavailable,

    /// The page layout did not match the expected structure (missing title,
    /// episode label, page data, or zero qualifying pages). Usually means the
    /// site changed its markup.
    #[error("{0}")]
    ChapterParse(String),

    #[error("malformed chapter data: {0}")]
    MalformedData(#[from] serde_json::Error),

    #[error("network error: {0}")]
    Network(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("external error: {0}")]
    External(String),
}

impl Error {
    /// The text relayed to the chat when this error reaches the pipeline
    /// boundary. Domain failures keep their own message; transport and
    /// parsing internals collapse to a generic line.
    pub fn user_message(&self) -> String {
        match self {
            Error::InvalidChapterId
            | Error::LoginFailed
            | Error::ChapterUnavailable
            | Error::ChapterParse(_) => self.to_string(),
            Error::Network(_) => "Network error. Please try again later.".to_string(),
            Error::MalformedData(_) => "Failed to parse chapter data.".to_string(),
            _ => "An error occurred. Please try again.".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
