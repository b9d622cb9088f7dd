use thiserror::Error;

use crate::prompts::{Category, Language};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A countdown of zero seconds was requested.
    #[error("countdown duration must be greater than zero")]
    InvalidConfiguration,

    #[error("a countdown is already in progress")]
    SessionActive,

    #[error("storage unavailable: {0}")]
    Persistence(#[from] std::io::Error),

    #[error("malformed stored data: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("no prompts for {category} in {language}")]
    EmptyCatalogPartition { language: Language, category: Category },

    #[error("failed to initialize logging: {0}")]
    Logging(String),
}
