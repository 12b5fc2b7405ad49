use arbor_dom::DomError;
use thiserror::Error;

/// Result type for parsing
pub type ParseResult<T> = Result<T, ParseError>;

/// HTML parse error
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read markup: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to build tree: {0}")]
    Dom(#[from] DomError),
}
