use thiserror::Error;

#[derive(Error, Debug)]
pub enum GhseekError {
    #[error("user not found: {0}")]
    NotFound(String),

    #[error("github error: {0}")]
    GitHub(String),

    #[error("a GitHub token is required for this action (set GITHUB_TOKEN)")]
    TokenRequired,

    #[error("config error: {0}")]
    Config(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("logging error: {0}")]
    Logging(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GhseekError>;
