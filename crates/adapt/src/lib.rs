// crates/adapt/src/lib.rs

//! Adapters behind the `serve` seams: the HTTP content client, the in-memory
//! fixture store, and the CDN image URL builder.

pub mod groq;
pub mod http;
pub mod image;
pub mod store;

pub use http::SanityClient;
pub use image::CdnImageBuilder;
pub use store::InMemoryContentStore;

use serve::Error as ServeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("content store answered {status}: {message}")]
    Status { status: u16, message: String },

    #[error("response has no `result` member")]
    MissingResult,

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid fixture at line {line}: {reason}")]
    InvalidFixture { line: usize, reason: String },

    #[error("unbound query parameter `${0}`")]
    UnboundParam(String),
}

impl From<Error> for ServeError {
    fn from(err: Error) -> Self {
        ServeError::source(err)
    }
}
