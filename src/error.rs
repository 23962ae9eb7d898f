pub mod reporting;

use crate::reader;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures while turning external input into nodes. Analysis problems are not
/// errors, they are reported in the analysis result.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    ReadError(#[from] reader::Error),

    #[error("invalid JSON syntax tree: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    IoError(#[from] std::io::Error),
}
