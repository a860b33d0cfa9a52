use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WireError {
    #[error("segment is not terminated by ')'")]
    UnterminatedSegment,
    #[error("segment has no name")]
    EmptySegment,
    #[error("unexpected text outside a segment: {0:?}")]
    StrayText(String),
    #[error("value of '{key}' is not a number: {value:?}")]
    BadNumber { key: String, value: String },
    #[error("'{key}' carries {got} values, expected {expected}")]
    WrongArity {
        key: &'static str,
        expected: usize,
        got: usize,
    },
    #[error("'{key}' carries no value")]
    MissingValue { key: String },
}
