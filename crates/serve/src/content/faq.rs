// crates/serve/src/content/faq.rs

use domain::field::{projection, FieldKind, FieldSpec};
use domain::query::Query;
use domain::view::faq::FaqSection;
use domain::Locale;

use super::Deps;
use crate::Result;

pub const DOC_TYPE: &str = "faqSection";

const ITEM: &[FieldSpec] = &[
    FieldSpec::new("id", FieldKind::Index),
    FieldSpec::text("question"),
    FieldSpec::text("answer"),
];

pub const FIELDS: &[FieldSpec] = &[
    FieldSpec::text_or("heading", "FAQ"),
    FieldSpec::opt_text("subtitle"),
    FieldSpec::each("items", ITEM),
];

pub fn query() -> Query {
    Query::of_type(DOC_TYPE).first().project(projection(FIELDS))
}

/// A section without questions is treated as no section at all.
#[tracing::instrument(skip_all)]
pub async fn fetch(deps: &Deps<'_>, locale: Locale) -> Result<Option<FaqSection>> {
    let raw = deps.fetch(&query()).await?;
    let section: Option<FaqSection> = deps.mapper(locale).one(DOC_TYPE, &raw, FIELDS)?;
    Ok(section.filter(|s| !s.items.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::testing::{Canned, FakeImages};
    use serde_json::json;

    #[tokio::test]
    async fn empty_faq_is_none() {
        for raw in [json!(null), json!({ "headingPl": "Pytania" }), json!({ "items": [] })] {
            let source = Canned::new(raw);
            let deps = Deps::new(&source, &FakeImages);
            assert!(fetch(&deps, Locale::Pl).await.unwrap().is_none());
        }
    }

    #[tokio::test]
    async fn items_are_numbered_and_heading_defaults() {
        let source = Canned::new(json!({
            "items": [
                { "questionPl": "Ile to kosztuje?", "answerPl": "To zależy." },
                { "questionPl": "Jak długo?", "questionEn": "How long?" }
            ]
        }));
        let deps = Deps::new(&source, &FakeImages);

        let faq = fetch(&deps, Locale::En).await.unwrap().unwrap();
        assert_eq!(faq.heading, "FAQ");
        assert!(faq.subtitle.is_none());
        assert_eq!(faq.items[0].id, 0);
        assert_eq!(faq.items[0].answer, "To zależy.");
        assert_eq!(faq.items[1].id, 1);
        assert_eq!(faq.items[1].question, "How long?");
        assert_eq!(faq.items[1].answer, "");
    }
}
