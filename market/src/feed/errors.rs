use corelib::SnapshotError;
use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum FeedError {
    /// Connection, timeout or body-read failure.
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    #[error("unexpected http status {status}")]
    Protocol { status: u16 },

    #[error("response body is not a sequence (got {0})")]
    NotASequence(&'static str),

    #[error("malformed response body: {0}")]
    Malformed(String),
}

impl FeedError {
    pub fn transport(e: impl Into<BoxError>) -> Self {
        FeedError::Transport(e.into())
    }

    /// Short label for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            FeedError::Transport(_) => "transport",
            FeedError::Protocol { .. } => "protocol",
            FeedError::NotASequence(_) | FeedError::Malformed(_) => "malformed",
        }
    }
}

impl From<reqwest::Error> for FeedError {
    fn from(e: reqwest::Error) -> Self {
        FeedError::Transport(Box::new(e))
    }
}

impl From<SnapshotError> for FeedError {
    fn from(e: SnapshotError) -> Self {
        match e {
            SnapshotError::NotASequence(kind) => FeedError::NotASequence(kind),
            SnapshotError::Decode(e) => FeedError::Malformed(e.to_string()),
        }
    }
}
