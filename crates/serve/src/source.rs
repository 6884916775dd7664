// crates/serve/src/source.rs

//! Seams to the outside world.

use async_trait::async_trait;
use domain::{image::ImageTransform, query::Query};
use serde_json::Value as Json;

use crate::Result;

/// Executes a structured query against a content store.
///
/// Returns whatever the query shape implies: an object or `null` for
/// `First`, an array for `All`, a number for `Count`. Transport failures are
/// returned as [`Error::Source`](crate::Error::Source) and never retried.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn fetch(&self, query: &Query) -> Result<Json>;
}

/// Turns an image descriptor into a final asset URL.
///
/// Must be deterministic. Callers never pass an absent image; a present but
/// malformed descriptor is an error.
#[cfg_attr(test, mockall::automock)]
pub trait ImageUrlBuilder: Send + Sync {
    fn build(&self, image: &Json, transform: &ImageTransform) -> Result<String>;
}
