// crates/serve/src/content/contact.rs

use domain::field::{projection, FieldKind, FieldSpec};
use domain::image::ImageTransform;
use domain::query::Query;
use domain::view::contact::ContactSection;
use domain::Locale;

use super::Deps;
use crate::Result;

pub const DOC_TYPE: &str = "contactSection";

const PERSON: &[FieldSpec] = &[
    FieldSpec::text("name"),
    FieldSpec::opt_text("role"),
    FieldSpec::new("image", FieldKind::ImageUrl(ImageTransform::sized(800, 800))),
    FieldSpec::plain("email"),
    FieldSpec::opt_text("bio"),
];

pub const FIELDS: &[FieldSpec] = &[
    FieldSpec::text_or("heading", "Kontakt"),
    FieldSpec::opt_text("subtitle"),
    FieldSpec::each("people", PERSON),
    FieldSpec::text_or("nameLabel", "Imię"),
    FieldSpec::text_or("companyLabel", "Nazwa firmy"),
    FieldSpec::text("messageLabel"),
    FieldSpec::text_or("submitButton", "Wyślij wiadomość"),
    FieldSpec::text_or(
        "successMessage",
        "Dziękujemy! Twoja wiadomość została wysłana. Skontaktujemy się z Tobą wkrótce.",
    ),
    FieldSpec::text_or(
        "errorMessage",
        "Wystąpił błąd. Spróbuj ponownie lub skontaktuj się bezpośrednio przez email.",
    ),
    FieldSpec::text_or("requiredError", "To pole jest wymagane"),
    FieldSpec::text_or("invalidEmail", "Podaj prawidłowy adres email"),
];

pub fn query() -> Query {
    Query::of_type(DOC_TYPE).first().project(projection(FIELDS))
}

#[tracing::instrument(skip_all)]
pub async fn fetch(deps: &Deps<'_>, locale: Locale) -> Result<Option<ContactSection>> {
    let raw = deps.fetch(&query()).await?;
    deps.mapper(locale).one(DOC_TYPE, &raw, FIELDS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::testing::{Canned, FakeImages};
    use serde_json::json;

    #[tokio::test]
    async fn labels_default_to_polish_literals() {
        let source = Canned::new(json!({
            "submitButtonEn": "Send",
            "people": [
                { "namePl": "Anna", "rolePl": "Inżynier", "email": "anna@example.com",
                  "image": { "asset": { "_ref": "image-anna-900x900-jpg" } } },
                { "namePl": "Jan" }
            ]
        }));
        let deps = Deps::new(&source, &FakeImages);

        let c = fetch(&deps, Locale::En).await.unwrap().unwrap();
        assert_eq!(c.heading, "Kontakt");
        assert_eq!(c.name_label, "Imię");
        assert_eq!(c.message_label, "");
        assert_eq!(c.submit_button, "Send");
        assert_eq!(c.invalid_email, "Podaj prawidłowy adres email");

        assert_eq!(c.people.len(), 2);
        assert_eq!(
            c.people[0].image.as_deref(),
            Some("img:image-anna-900x900-jpg:800x800")
        );
        assert_eq!(c.people[0].email.as_deref(), Some("anna@example.com"));
        assert!(c.people[1].image.is_none());
        assert!(c.people[1].role.is_none());
    }
}
