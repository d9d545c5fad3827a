// shared/src/lib.rs

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("not found")]
    NotFound,
    #[error("timed out after {0:?}")]
    Timeout(std::time::Duration),
    #[error("internal: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;

pub mod config;
