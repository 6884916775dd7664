// crates/serve/src/content/mod.rs

//! One module per content type: its field map, its query, its fetch.
//!
//! Every fetch is `query → ContentSource → Mapper`. The query's projection is
//! derived from the same field map the mapper walks.

pub mod blog;
pub mod contact;
pub mod faq;
pub mod footer;
pub mod portfolio;
pub mod process;
pub mod services;
pub mod site;
pub mod trusted;

use domain::{query::Query, Locale, LocalizedResolver};
use serde_json::Value as Json;
use tracing::debug;

use crate::{
    mapper::Mapper,
    source::{ContentSource, ImageUrlBuilder},
    Result,
};

/// Everything a fetch needs, borrowed from the owning service.
#[derive(Clone, Copy)]
pub struct Deps<'a> {
    pub source: &'a dyn ContentSource,
    pub images: &'a dyn ImageUrlBuilder,
    pub resolver: LocalizedResolver,
}

impl<'a> Deps<'a> {
    pub fn new(source: &'a dyn ContentSource, images: &'a dyn ImageUrlBuilder) -> Self {
        Self {
            source,
            images,
            resolver: LocalizedResolver::default(),
        }
    }

    pub fn with_resolver(mut self, resolver: LocalizedResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn mapper(&self, locale: Locale) -> Mapper<'a> {
        Mapper::new(self.resolver, self.images, locale)
    }

    pub async fn fetch(&self, query: &Query) -> Result<Json> {
        debug!(shape = ?query.shape, params = query.params.len(), "querying content source");
        self.source.fetch(query).await
    }
}
