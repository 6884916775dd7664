// crates/serve/src/lib.rs

//! Storage-agnostic content pipeline.
//!
//! Nothing in this crate knows where documents live or how image URLs are
//! minted. Both are injected through the traits in [`source`]; the adapt
//! crate provides the HTTP and in-memory implementations.

pub mod cache;
pub mod content;
pub mod mapper;
pub mod service;
pub mod source;

use http::StatusCode;
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("content source error: {0}")]
    Source(#[source] BoxError),

    #[error("malformed image reference: {0}")]
    MalformedImage(String),

    #[error("malformed slug: {0}")]
    MalformedSlug(String),

    #[error("cannot shape `{kind}` view model: {source}")]
    Shape {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Wrap a transport or store failure.
    pub fn source(err: impl Into<BoxError>) -> Self {
        Error::Source(err.into())
    }

    pub fn to_status(&self) -> StatusCode {
        match self {
            Error::Source(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_failures_map_to_bad_gateway() {
        let err = Error::source("connection refused");
        assert_eq!(err.to_status(), StatusCode::BAD_GATEWAY);
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn data_corruption_maps_to_internal_error() {
        let err = Error::MalformedImage("image-bad".into());
        assert_eq!(err.to_status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
