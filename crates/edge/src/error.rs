// crates/edge/src/error.rs

use adapt::Error as AdaptError;
use http::StatusCode;
use serve::Error as ServeError;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("adapt error: {0}")]
    AdaptError(#[from] AdaptError),

    #[error("serve error: {0}")]
    ServeError(#[from] ServeError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown content kind `{0}`")]
    UnknownKind(String),

    #[error("`{0}` needs a slug")]
    SlugRequired(&'static str),

    #[error("`{0}` does not take a slug")]
    UnexpectedSlug(&'static str),
}

impl Error {
    pub fn to_status(&self) -> StatusCode {
        match self {
            Error::ServeError(e) => e.to_status(),
            Error::AdaptError(_) => StatusCode::BAD_GATEWAY,
            Error::UnknownKind(_) | Error::UnexpectedSlug(_) => StatusCode::NOT_FOUND,
            Error::SlugRequired(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
