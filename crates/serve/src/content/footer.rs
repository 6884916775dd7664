// crates/serve/src/content/footer.rs

use domain::field::{projection, FieldSpec};
use domain::query::Query;
use domain::view::footer::FooterData;
use domain::Locale;

use super::Deps;
use crate::Result;

/// Footer content lives on the site settings singleton.
pub const DOC_TYPE: &str = "siteSettings";
pub const DOC_ID: &str = "siteSettings";

const CONTACT_ITEM: &[FieldSpec] = &[
    FieldSpec::plain_or("icon", "Mail"),
    FieldSpec::text("text"),
    FieldSpec::plain_or("url", "#"),
];

const SOCIAL_LINK: &[FieldSpec] = &[
    FieldSpec::plain_or("icon", "Linkedin"),
    FieldSpec::plain_or("url", "#"),
];

pub const FIELDS: &[FieldSpec] = &[
    FieldSpec::text_or(
        "footerDescription",
        "Twój zewnętrzny dział R&D. Od pomysłu do seryjnej produkcji.",
    )
    .rename("description"),
    FieldSpec::each("footerContactItems", CONTACT_ITEM).rename("contactItems"),
    FieldSpec::each("footerSocialLinks", SOCIAL_LINK).rename("socialLinks"),
];

pub fn query() -> Query {
    Query::of_type(DOC_TYPE)
        .id(DOC_ID)
        .first()
        .project(projection(FIELDS))
}

#[tracing::instrument(skip_all)]
pub async fn fetch(deps: &Deps<'_>, locale: Locale) -> Result<Option<FooterData>> {
    let raw = deps.fetch(&query()).await?;
    deps.mapper(locale).one("footer", &raw, FIELDS)
}
