#![deny(clippy::all)]

pub mod cache_client;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use cache_client::CacheClient;
pub use domain::{Todo, TodoId};
pub use error::{RetrievalError, SourceError};
pub use ports::{CacheStore, TodoSource};
pub use service::TodoRetrievalService;
