// crates/serve/src/content/services.rs

use domain::field::{projection, FieldSpec};
use domain::query::Query;
use domain::view::services::ServicesSection;
use domain::Locale;

use super::Deps;
use crate::Result;

pub const DOC_TYPE: &str = "servicesSection";

const SERVICE: &[FieldSpec] = &[
    FieldSpec::plain("iconKey"),
    FieldSpec::text("title"),
    FieldSpec::text("description"),
];

pub const FIELDS: &[FieldSpec] = &[
    FieldSpec::plain("_id").rename("id"),
    FieldSpec::text("heading"),
    FieldSpec::opt_text("intro"),
    FieldSpec::each("services", SERVICE),
];

pub fn query() -> Query {
    Query::of_type(DOC_TYPE).first().project(projection(FIELDS))
}

#[tracing::instrument(skip_all)]
pub async fn fetch(deps: &Deps<'_>, locale: Locale) -> Result<Option<ServicesSection>> {
    let raw = deps.fetch(&query()).await?;
    deps.mapper(locale).one(DOC_TYPE, &raw, FIELDS)
}
