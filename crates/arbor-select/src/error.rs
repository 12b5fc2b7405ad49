use thiserror::Error;

/// Result type for selector compilation
pub type SelectorResult<T> = Result<T, SelectorError>;

/// Selector compilation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,

    #[error("unexpected {found:?} at offset {offset}")]
    UnexpectedChar { offset: usize, found: char },

    #[error("unexpected end of selector, expected {expected}")]
    UnexpectedEnd { expected: &'static str },

    #[error("unsupported pseudo-class :{0}")]
    UnsupportedPseudoClass(String),

    #[error("pseudo-elements are not supported: ::{0}")]
    PseudoElement(String),

    #[error("invalid An+B expression {0:?}")]
    InvalidNth(String),

    #[error(":not() nested deeper than {limit} levels")]
    TooDeep { limit: usize },
}
