use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BencodeError {
    #[error("Unexpected end of input")]
    UnexpectedEnd,

    #[error("Invalid Integer {0}")]
    InvalidInteger(String),

    #[error("Invalid Format {0}")]
    InvalidFormat(String),

    #[error("Declared length {declared} exceeds {remaining} remaining bytes")]
    LengthOverrun { declared: usize, remaining: usize },

    #[error("Nesting deeper than {0} levels")]
    TooDeep(usize),

    #[error("Duplicate dictionary key {0:?}")]
    DuplicateKey(String),

    #[error("{0} trailing bytes after value")]
    TrailingBytes(usize),
}
