// crates/serve/src/content/portfolio.rs

//! Portfolio section, project detail pages and the full project list.

use domain::field::{projection, FieldKind, FieldSpec, Variant};
use domain::image::{Fit, ImageTransform};
use domain::query::Query;
use domain::view::portfolio::{PortfolioSection, Project, ProjectDetail};
use domain::Locale;

use super::Deps;
use crate::Result;

pub const SECTION_TYPE: &str = "portfolioSection";
pub const DOC_TYPE: &str = "project";

const DEFAULT_GRID_SPAN: &str = "md:col-span-1 md:row-span-1";

const CARD_IMAGE: ImageTransform = ImageTransform::sized(800, 600);
const DETAIL_IMAGE: ImageTransform = ImageTransform::sized(1200, 800).fit(Fit::Clip);

/// A project as a card in a grid or list.
pub const CARD: &[FieldSpec] = &[
    FieldSpec::plain("_id").rename("id"),
    FieldSpec::text("title"),
    FieldSpec::new("slug", FieldKind::Slug),
    FieldSpec::image("mainImage", CARD_IMAGE).rename("image"),
    FieldSpec::plain_or("gridSpan", DEFAULT_GRID_SPAN),
    FieldSpec::opt_text("description"),
    FieldSpec::new("category", FieldKind::CategoryKey),
    FieldSpec::new("categoryLabel", FieldKind::CategoryLabel),
];

pub const SECTION: &[FieldSpec] = &[
    FieldSpec::plain("_id").rename("id"),
    FieldSpec::text("heading"),
    FieldSpec::opt_text("description"),
    FieldSpec::new("projects", FieldKind::RefEach(CARD)),
];

// ─────────────────────────────────────────────────────────────────────────────
// Detail page sections
// ─────────────────────────────────────────────────────────────────────────────

const HERO: &[FieldSpec] = &[
    FieldSpec::opt_text("title"),
    FieldSpec::opt_text("subtitle"),
    FieldSpec::image(
        "backgroundImage",
        ImageTransform::sized(1920, 1080).fit(Fit::Clip),
    ),
];

const DESCRIPTION: &[FieldSpec] = &[FieldSpec::localized("content")];

const GALLERY: &[FieldSpec] = &[
    FieldSpec::opt_text("title"),
    FieldSpec::new("images", FieldKind::Images(ImageTransform::width(1200))),
];

const SPEC_ROW: &[FieldSpec] = &[FieldSpec::opt_text("label"), FieldSpec::opt_text("value")];

const SPECS: &[FieldSpec] = &[
    FieldSpec::opt_text("title"),
    FieldSpec::each("specs", SPEC_ROW),
];

const FEATURE: &[FieldSpec] = &[
    FieldSpec::opt_text("title"),
    FieldSpec::opt_text("description"),
    FieldSpec::plain("icon"),
];

const FEATURES: &[FieldSpec] = &[
    FieldSpec::opt_text("title"),
    FieldSpec::each("features", FEATURE),
];

const GRID_ITEM: &[FieldSpec] = &[
    FieldSpec::image("image", CARD_IMAGE),
    FieldSpec::opt_text("title"),
    FieldSpec::opt_text("description"),
];

const IMAGE_GRID: &[FieldSpec] = &[
    FieldSpec::opt_text("title"),
    FieldSpec::each("items", GRID_ITEM),
];

const SECTIONS: &[Variant] = &[
    Variant {
        tag: "heroSection",
        fields: HERO,
    },
    Variant {
        tag: "descriptionSection",
        fields: DESCRIPTION,
    },
    Variant {
        tag: "gallerySection",
        fields: GALLERY,
    },
    Variant {
        tag: "specsSection",
        fields: SPECS,
    },
    Variant {
        tag: "featuresSection",
        fields: FEATURES,
    },
    Variant {
        tag: "imageGridSection",
        fields: IMAGE_GRID,
    },
];

pub const DETAIL: &[FieldSpec] = &[
    FieldSpec::plain("_id").rename("id"),
    FieldSpec::text("title"),
    FieldSpec::new("slug", FieldKind::Slug),
    FieldSpec::image("mainImage", DETAIL_IMAGE).rename("image"),
    FieldSpec::plain_or("gridSpan", DEFAULT_GRID_SPAN),
    FieldSpec::opt_text("description"),
    FieldSpec::new("category", FieldKind::CategoryKey),
    FieldSpec::new("categoryLabel", FieldKind::CategoryLabel),
    FieldSpec::new("sections", FieldKind::Sections(SECTIONS)),
    FieldSpec::plain("publishedAt"),
    FieldSpec::new("seo", FieldKind::Seo),
];

// ─────────────────────────────────────────────────────────────────────────────
// Queries
// ─────────────────────────────────────────────────────────────────────────────

pub fn section_query() -> Query {
    Query::of_type(SECTION_TYPE)
        .first()
        .project(projection(SECTION))
}

pub fn detail_query(slug: &str) -> Query {
    Query::of_type(DOC_TYPE)
        .slug(slug)
        .first()
        .project(projection(DETAIL))
}

pub fn list_query() -> Query {
    let mut fields = projection(CARD);
    fields.push(domain::query::ProjField::Field(
        domain::query::PUBLISHED_AT.to_owned(),
    ));
    Query::of_type(DOC_TYPE)
        .order_desc(domain::query::PUBLISHED_AT, false)
        .project(fields)
}

// ─────────────────────────────────────────────────────────────────────────────
// Fetches
// ─────────────────────────────────────────────────────────────────────────────

#[tracing::instrument(skip_all)]
pub async fn fetch_section(deps: &Deps<'_>, locale: Locale) -> Result<Option<PortfolioSection>> {
    let raw = deps.fetch(&section_query()).await?;
    deps.mapper(locale).one(SECTION_TYPE, &raw, SECTION)
}

#[tracing::instrument(skip_all, fields(slug = %slug))]
pub async fn fetch_detail(
    deps: &Deps<'_>,
    slug: &str,
    locale: Locale,
) -> Result<Option<ProjectDetail>> {
    let raw = deps.fetch(&detail_query(slug)).await?;
    deps.mapper(locale).one(DOC_TYPE, &raw, DETAIL)
}

#[tracing::instrument(skip_all)]
pub async fn fetch_all(deps: &Deps<'_>, locale: Locale) -> Result<Vec<Project>> {
    let raw = deps.fetch(&list_query()).await?;
    deps.mapper(locale).many(DOC_TYPE, &raw, CARD)
}
