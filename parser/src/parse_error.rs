use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Network error, status = {0}")]
    NetworkError(reqwest::StatusCode),
    #[error(transparent)]
    NetworkErrorUnknown(#[from] reqwest::Error),
    #[error("Cloudflare's I'm Under Attack Mode")]
    CloudflareIUAM,
    #[error("Invalid url: {0}")]
    InvalidUrl(String),
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),
    #[error("No chapter link matched selector '{0}'")]
    MissingChapterHref(String),
    #[error("Failed to make '{0}' absolute")]
    FailedToMakeAbsolute(String),
    #[error("Chapter feed is empty")]
    EmptyFeed,
    #[error("Unexpected feed shape: {0}")]
    MalformedFeed(#[from] serde_json::Error),
    #[error("Malformed chapter version: {0:?}")]
    MalformedVersion(String),
}

pub type Result<T> = core::result::Result<T, ParseError>;
