use thiserror::Error;

#[derive(Debug, Error)]
pub enum LinkError {
    #[error("link closed")]
    Closed,
    #[error("frame timeout")]
    Timeout,
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LinkError>;
