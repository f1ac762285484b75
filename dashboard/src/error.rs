use market::FeedError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("feed client setup failed: {0}")]
    FeedClient(#[from] FeedError),
}
