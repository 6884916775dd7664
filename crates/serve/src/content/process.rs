// crates/serve/src/content/process.rs

//! The home-page process timeline and the dedicated process page.

use domain::field::{projection, Fallback, FieldKind, FieldSpec};
use domain::image::{Fit, ImageTransform};
use domain::query::Query;
use domain::view::process::{HomepageProcess, ProcessPage};
use domain::Locale;

use super::Deps;
use crate::Result;

pub const HOMEPAGE_TYPE: &str = "homepageProcess";
pub const PAGE_TYPE: &str = "processPage";

const DEFAULT_COLOR: &str = "#00f0ff";

const CTA_TITLE: &str = "Gotowy na start?";
const CTA_DESCRIPTION: &str =
    "Każdy wielki projekt zaczyna się od pierwszego kroku. Porozmawiajmy o Twoich celach.";
const CTA_BUTTON: &str = "Skontaktuj się";

const GROUP: &[FieldSpec] = &[
    FieldSpec::new("id", FieldKind::Index),
    FieldSpec::text("name").rename("title"),
    FieldSpec::new("shortName", FieldKind::Text(Fallback::Field("name"))).rename("shortTitle"),
    FieldSpec::text("description"),
    FieldSpec::plain_or("iconKey", "").rename("icon"),
    FieldSpec::plain_or("color", DEFAULT_COLOR),
    FieldSpec::new("details", FieldKind::TextEach("text")),
];

pub const HOMEPAGE: &[FieldSpec] = &[
    FieldSpec::text("heading"),
    FieldSpec::text("subtitle"),
    FieldSpec::each("groups", GROUP),
];

const SECTION: &[FieldSpec] = &[
    FieldSpec::new("id", FieldKind::Index),
    FieldSpec::text("title"),
    FieldSpec::text("description"),
    FieldSpec::new(
        "image",
        FieldKind::Image {
            transform: ImageTransform::width(1200),
            border: true,
            alt_from: None,
        },
    ),
    FieldSpec::plain("iconKey").rename("icon"),
    FieldSpec::plain_or("color", DEFAULT_COLOR),
    FieldSpec::new("details", FieldKind::TextEach("text")),
];

const CTA: &[FieldSpec] = &[
    FieldSpec::text_or("ctaTitle", CTA_TITLE).rename("title"),
    FieldSpec::text_or("ctaDescription", CTA_DESCRIPTION).rename("description"),
    FieldSpec::text_or("ctaButtonText", CTA_BUTTON).rename("buttonText"),
    FieldSpec::new("link", FieldKind::LocalePath("/kontakt")),
];

pub const PAGE: &[FieldSpec] = &[
    FieldSpec::text("heading"),
    FieldSpec::text("intro"),
    FieldSpec::image(
        "heroImage",
        ImageTransform::sized(1920, 1080)
            .fit(Fit::Clip)
            .ignore_params(),
    ),
    FieldSpec::each("sections", SECTION),
    FieldSpec::new("cta", FieldKind::Group(CTA)),
];

pub fn homepage_query() -> Query {
    Query::of_type(HOMEPAGE_TYPE)
        .first()
        .project(projection(HOMEPAGE))
}

pub fn page_query() -> Query {
    Query::of_type(PAGE_TYPE).first().project(projection(PAGE))
}

#[tracing::instrument(skip_all)]
pub async fn fetch_homepage(deps: &Deps<'_>, locale: Locale) -> Result<Option<HomepageProcess>> {
    let raw = deps.fetch(&homepage_query()).await?;
    deps.mapper(locale).one(HOMEPAGE_TYPE, &raw, HOMEPAGE)
}

#[tracing::instrument(skip_all)]
pub async fn fetch_page(deps: &Deps<'_>, locale: Locale) -> Result<Option<ProcessPage>> {
    let raw = deps.fetch(&page_query()).await?;
    deps.mapper(locale).one(PAGE_TYPE, &raw, PAGE)
}
