use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LookupError {
    #[error("lookup transport failed: {0}")]
    Transport(String),

    #[error("malformed lookup response: {0}")]
    MalformedResponse(String),

    #[error("principal directory unavailable")]
    Unavailable,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FavoriteError {
    #[error("favorite storage error: {0}")]
    Storage(String),
}
