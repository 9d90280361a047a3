/// Errors produced while fetching pages, comparing them, or talking to the
/// narrative service.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The page could not be retrieved.
    #[error("failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },

    /// The server answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    /// Markup could not be turned into a content record.
    #[error("failed to parse page: {0}")]
    Parse(String),

    /// A page taking part in a comparison has no extracted content.
    #[error("no content available for {url}")]
    MissingContent { url: String },

    /// The text-generation service could not be reached or rejected the request.
    #[error("narrative service failed: {0}")]
    Narrative(String),

    /// Narrative mode was requested without an API key.
    #[error("narrative analysis requires an API key")]
    MissingApiKey,

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
