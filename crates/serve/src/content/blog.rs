// crates/serve/src/content/blog.rs

//! Blog posts. Every query here starts from `Query::published`, so the
//! count, the list and the detail page agree on what is visible.

use domain::field::{projection, FieldKind, FieldSpec, Variant};
use domain::image::{Fit, ImageTransform};
use domain::query::{Query, PUBLISHED_AT};
use domain::view::blog::{BlogPostDetail, BlogPostListItem};
use domain::Locale;
use serde_json::Value as Json;

use super::Deps;
use crate::{Error, Result};

pub const DOC_TYPE: &str = "blogPost";

const LIST_IMAGE: ImageTransform = ImageTransform::sized(800, 450).fit(Fit::Clip);
const DETAIL_IMAGE: ImageTransform = ImageTransform::sized(1200, 630).fit(Fit::Clip);

pub const LIST: &[FieldSpec] = &[
    FieldSpec::plain("_id").rename("id"),
    FieldSpec::text("title"),
    FieldSpec::new("slug", FieldKind::Slug),
    FieldSpec::text("excerpt"),
    FieldSpec::image("mainImage", LIST_IMAGE),
    FieldSpec::plain_or(PUBLISHED_AT, ""),
];

// ─────────────────────────────────────────────────────────────────────────────
// Sections
// ─────────────────────────────────────────────────────────────────────────────

const PARAGRAPH: &[FieldSpec] = &[FieldSpec::localized("content")];

const HEADING: &[FieldSpec] = &[
    FieldSpec::plain_or("level", "h2"),
    FieldSpec::opt_text("text"),
];

const IMAGE: &[FieldSpec] = &[
    FieldSpec::image("image", ImageTransform::width(1200).fit(Fit::Max)),
    FieldSpec::opt_text("caption"),
];

const QUOTE: &[FieldSpec] = &[FieldSpec::opt_text("quote"), FieldSpec::opt_text("author")];

const LIST_SECTION: &[FieldSpec] = &[FieldSpec::new("items", FieldKind::TextList)];

const CALLOUT: &[FieldSpec] = &[
    FieldSpec::opt_text("text"),
    FieldSpec::plain_or("variant", "info"),
];

const SECTIONS: &[Variant] = &[
    Variant {
        tag: "paragraphSection",
        fields: PARAGRAPH,
    },
    Variant {
        tag: "headingSection",
        fields: HEADING,
    },
    Variant {
        tag: "imageSection",
        fields: IMAGE,
    },
    Variant {
        tag: "quoteSection",
        fields: QUOTE,
    },
    Variant {
        tag: "listSection",
        fields: LIST_SECTION,
    },
    Variant {
        tag: "calloutSection",
        fields: CALLOUT,
    },
];

pub const DETAIL: &[FieldSpec] = &[
    FieldSpec::plain("_id").rename("id"),
    FieldSpec::text("title"),
    FieldSpec::new("slug", FieldKind::Slug),
    FieldSpec::text("excerpt"),
    FieldSpec::image("mainImage", DETAIL_IMAGE),
    FieldSpec::plain_or(PUBLISHED_AT, ""),
    FieldSpec::new("sections", FieldKind::Sections(SECTIONS)),
];

// ─────────────────────────────────────────────────────────────────────────────
// Queries
// ─────────────────────────────────────────────────────────────────────────────

pub fn count_query() -> Query {
    Query::published(DOC_TYPE).count()
}

/// Newest first; undated posts sort as if published now.
pub fn list_query() -> Query {
    Query::published(DOC_TYPE)
        .order_desc(PUBLISHED_AT, true)
        .project(projection(LIST))
}

pub fn detail_query(slug: &str) -> Query {
    Query::published(DOC_TYPE)
        .slug(slug)
        .first()
        .project(projection(DETAIL))
}

// ─────────────────────────────────────────────────────────────────────────────
// Fetches
// ─────────────────────────────────────────────────────────────────────────────

/// Number of published posts. Bypasses the mapper; `null` counts as zero.
#[tracing::instrument(skip_all)]
pub async fn fetch_count(deps: &Deps<'_>) -> Result<u64> {
    match deps.fetch(&count_query()).await? {
        Json::Null => Ok(0),
        Json::Number(n) => n
            .as_u64()
            .ok_or_else(|| Error::source(format!("invalid post count: {n}"))),
        other => Err(Error::source(format!("invalid post count: {other}"))),
    }
}

#[tracing::instrument(skip_all)]
pub async fn fetch_list(deps: &Deps<'_>, locale: Locale) -> Result<Vec<BlogPostListItem>> {
    let raw = deps.fetch(&list_query()).await?;
    deps.mapper(locale).many(DOC_TYPE, &raw, LIST)
}

#[tracing::instrument(skip_all, fields(slug = %slug))]
pub async fn fetch_detail(
    deps: &Deps<'_>,
    slug: &str,
    locale: Locale,
) -> Result<Option<BlogPostDetail>> {
    let raw = deps.fetch(&detail_query(slug)).await?;
    deps.mapper(locale).one(DOC_TYPE, &raw, DETAIL)
}
