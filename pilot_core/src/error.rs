use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum DriverError {
    #[error("link error: {0}")]
    Link(String),
    #[error("link closed")]
    Closed,
    #[error("timeout waiting for frame")]
    Timeout,
    #[error("protocol error: {0}")]
    Protocol(#[from] pilot_protocol::WireError),
}

#[derive(Debug, Error, Clone)]
pub enum BuildError {
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
}

pub type Result<T> = eyre::Result<T>;
pub use eyre::Report;
