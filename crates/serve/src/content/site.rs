// crates/serve/src/content/site.rs

use domain::field::{projection, FieldKind, FieldSpec};
use domain::query::Query;
use domain::view::site::SiteSettings;
use domain::Locale;

use super::Deps;
use crate::{mapper::OG_IMAGE, Result};

pub const DOC_TYPE: &str = "siteSettings";
pub const DOC_ID: &str = "siteSettings";

const fn page_seo(name: &'static str) -> FieldSpec {
    FieldSpec::new(name, FieldKind::Seo)
}

pub const FIELDS: &[FieldSpec] = &[
    FieldSpec::plain_or("siteName", "NeGeTe"),
    FieldSpec::new("defaultOgImage", FieldKind::ImageUrl(OG_IMAGE)),
    page_seo("homePageSeo"),
    page_seo("faqPageSeo"),
    page_seo("contactPageSeo"),
    page_seo("blogListPageSeo"),
    page_seo("realizacjeListPageSeo"),
    page_seo("processPageSeo"),
];

pub fn query() -> Query {
    Query::of_type(DOC_TYPE)
        .id(DOC_ID)
        .first()
        .project(projection(FIELDS))
}

#[tracing::instrument(skip_all)]
pub async fn fetch(deps: &Deps<'_>, locale: Locale) -> Result<Option<SiteSettings>> {
    let raw = deps.fetch(&query()).await?;
    deps.mapper(locale).one(DOC_TYPE, &raw, FIELDS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::testing::{image, Canned, FakeImages};
    use serde_json::json;

    #[tokio::test]
    async fn per_page_seo_is_none_when_empty() {
        let source = Canned::new(json!({
            "defaultOgImage": image("image-og-1200x630-png"),
            "homePageSeo": { "metaTitlePl": "Strona główna", "metaTitleEn": "Home" },
            "faqPageSeo": { "metaTitlePl": "", "metaDescriptionEn": null },
            "contactPageSeo": { "metaDescriptionPl": "Napisz do nas" },
            "processPageSeo": { "ogImage": image("image-p-1x1-png") }
        }));
        let deps = Deps::new(&source, &FakeImages);

        let s = fetch(&deps, Locale::En).await.unwrap().unwrap();
        assert_eq!(s.site_name, "NeGeTe");
        assert_eq!(
            s.default_og_image.as_deref(),
            Some("img:image-og-1200x630-png:1200x630")
        );
        assert_eq!(
            s.home_page_seo.as_ref().unwrap().meta_title.as_deref(),
            Some("Home")
        );
        assert!(s.faq_page_seo.is_none());
        assert_eq!(
            s.contact_page_seo.as_ref().unwrap().meta_description.as_deref(),
            Some("Napisz do nas")
        );
        assert!(s.blog_list_page_seo.is_none());
        assert!(s.realizacje_list_page_seo.is_none());
        assert_eq!(
            s.process_page_seo.as_ref().unwrap().og_image.as_deref(),
            Some("img:image-p-1x1-png:1200x630")
        );
    }
}
