// crates/serve/src/content/trusted.rs

use domain::field::{projection, FieldKind, FieldSpec};
use domain::image::ImageTransform;
use domain::query::Query;
use domain::view::trusted::TrustedBySection;
use domain::Locale;

use super::Deps;
use crate::Result;

pub const DOC_TYPE: &str = "trustedBy";

const COMPANY: &[FieldSpec] = &[
    FieldSpec::plain_or("name", ""),
    FieldSpec::new(
        "logo",
        FieldKind::Image {
            transform: ImageTransform::sized(260, 80),
            border: false,
            alt_from: Some("name"),
        },
    ),
    FieldSpec::new(
        "projectSlug",
        FieldKind::Alias {
            field: "project",
            path: "slug.current",
        },
    ),
    FieldSpec::plain("url"),
];

pub const FIELDS: &[FieldSpec] = &[
    FieldSpec::text("heading"),
    FieldSpec::opt_text("subtitle"),
    FieldSpec::each("companies", COMPANY),
];

pub fn query() -> Query {
    Query::of_type(DOC_TYPE).first().project(projection(FIELDS))
}

#[tracing::instrument(skip_all)]
pub async fn fetch(deps: &Deps<'_>, locale: Locale) -> Result<Option<TrustedBySection>> {
    let raw = deps.fetch(&query()).await?;
    deps.mapper(locale).one(DOC_TYPE, &raw, FIELDS)
}
