use arbor_dom::DomError;
use arbor_html::ParseError;
use arbor_select::SelectorError;
use thiserror::Error;

/// Result type for document operations
pub type Result<T> = std::result::Result<T, Error>;

/// Any failure surfaced by a [`crate::Document`]
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Dom(#[from] DomError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Selector(#[from] SelectorError),
}
