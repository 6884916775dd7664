// crates/domain/src/field.rs

//! Declarative field maps.
//!
//! Each content type describes its fields once, as a static list of
//! [`FieldSpec`]s. The generic mapper walks the list to build a view model and
//! [`projection`] walks the same list to decide which raw fields the query
//! must return, so the query and the mapping cannot drift apart.

use crate::image::ImageTransform;
use crate::locale::LOCALES;
use crate::query::{ProjField, Projection};

/// What a bilingual text field resolves to when neither locale has a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    Literal(&'static str),
    /// Resolve another bilingual field instead (then `""`).
    Field(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    /// Bilingual text, always present.
    Text(Fallback),
    /// Bilingual text, omitted when absent in both locales.
    OptText,
    /// Bilingual value of any JSON shape (rich text blocks), omitted when absent.
    Localized,
    /// Bilingual array selected as a whole, `[]` when absent.
    TextList,
    /// Array of objects each holding one bilingual text field; resolves to a
    /// list of strings, `[]` when absent.
    TextEach(&'static str),
    /// Locale-independent value, optionally defaulted.
    Plain(Option<&'static str>),
    /// `true` only when the raw value is exactly `true`.
    Flag,
    /// `{ current }` or a bare string, `""` when absent.
    Slug,
    /// Position of the element within its parent array.
    Index,
    /// Image descriptor resolved to `{ url, alt }`; omitted when absent.
    Image {
        transform: ImageTransform,
        /// Carry the descriptor's `withBorder` flag.
        border: bool,
        /// Sibling field whose value is the alt text of last resort.
        alt_from: Option<&'static str>,
    },
    /// Image descriptor resolved to a bare URL; omitted when absent.
    ImageUrl(ImageTransform),
    /// Array of image descriptors, each resolved to `{ url, alt }`.
    Images(ImageTransform),
    /// Array of objects, each mapped with the nested fields; `[]` when absent.
    Each(&'static [FieldSpec]),
    /// Array of references, dereferenced then mapped like `Each`.
    RefEach(&'static [FieldSpec]),
    /// Nested view object built from fields of the *same* record.
    Group(&'static [FieldSpec]),
    /// Value read through a single reference (`field->path`); omitted when absent.
    Alias {
        field: &'static str,
        path: &'static str,
    },
    /// Display label from `customCategory` or the category vocabulary.
    CategoryLabel,
    /// Raw category: `customCategory`, else `category`.
    CategoryKey,
    /// SEO block; omitted when title, description and image are all absent.
    Seo,
    /// Array of tagged objects, mapped by their `_type`.
    Sections(&'static [Variant]),
    /// Locale-prefixed site path, e.g. `/en/kontakt`.
    LocalePath(&'static str),
}

/// One member of a tagged section array.
#[derive(Debug, Clone, Copy)]
pub struct Variant {
    pub tag: &'static str,
    pub fields: &'static [FieldSpec],
}

/// Tag key carried by every section element.
pub const SECTION_TAG: &str = "_type";

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Raw field name (logical base name for bilingual fields).
    pub source: &'static str,
    /// Key in the view model.
    pub target: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn new(source: &'static str, kind: FieldKind) -> Self {
        Self {
            source,
            target: source,
            kind,
        }
    }

    pub const fn rename(mut self, target: &'static str) -> Self {
        self.target = target;
        self
    }

    pub const fn text(name: &'static str) -> Self {
        Self::new(name, FieldKind::Text(Fallback::Literal("")))
    }

    pub const fn text_or(name: &'static str, fallback: &'static str) -> Self {
        Self::new(name, FieldKind::Text(Fallback::Literal(fallback)))
    }

    pub const fn opt_text(name: &'static str) -> Self {
        Self::new(name, FieldKind::OptText)
    }

    pub const fn localized(name: &'static str) -> Self {
        Self::new(name, FieldKind::Localized)
    }

    pub const fn plain(name: &'static str) -> Self {
        Self::new(name, FieldKind::Plain(None))
    }

    pub const fn plain_or(name: &'static str, default: &'static str) -> Self {
        Self::new(name, FieldKind::Plain(Some(default)))
    }

    pub const fn image(name: &'static str, transform: ImageTransform) -> Self {
        Self::new(
            name,
            FieldKind::Image {
                transform,
                border: false,
                alt_from: None,
            },
        )
    }

    pub const fn each(name: &'static str, fields: &'static [FieldSpec]) -> Self {
        Self::new(name, FieldKind::Each(fields))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Projection derivation
// ─────────────────────────────────────────────────────────────────────────────

/// Raw fields a query must return for the given field map.
pub fn projection(fields: &[FieldSpec]) -> Projection {
    let mut out = Projection::default();
    for spec in fields {
        project_spec(spec, &mut out);
    }
    out
}

fn push_bilingual(base: &str, out: &mut Projection) {
    for locale in LOCALES {
        out.push(ProjField::Field(locale.field(base)));
    }
}

fn project_spec(spec: &FieldSpec, out: &mut Projection) {
    match spec.kind {
        FieldKind::Text(fallback) => {
            push_bilingual(spec.source, out);
            if let Fallback::Field(other) = fallback {
                push_bilingual(other, out);
            }
        }
        FieldKind::OptText | FieldKind::Localized | FieldKind::TextList => {
            push_bilingual(spec.source, out)
        }
        FieldKind::TextEach(base) => {
            let mut inner = Projection::default();
            push_bilingual(base, &mut inner);
            out.push(ProjField::Each(spec.source.to_owned(), inner))
        }
        FieldKind::Image { alt_from, .. } => {
            out.push(ProjField::Field(spec.source.to_owned()));
            if let Some(sibling) = alt_from {
                out.push(ProjField::Field(sibling.to_owned()));
            }
        }
        FieldKind::Plain(_)
        | FieldKind::Flag
        | FieldKind::Slug
        | FieldKind::ImageUrl(_)
        | FieldKind::Images(_)
        | FieldKind::Seo
        | FieldKind::Sections(_) => out.push(ProjField::Field(spec.source.to_owned())),
        FieldKind::Each(nested) => {
            out.push(ProjField::Each(spec.source.to_owned(), projection(nested)))
        }
        FieldKind::RefEach(nested) => out.push(ProjField::DerefEach(
            spec.source.to_owned(),
            projection(nested),
        )),
        FieldKind::Group(nested) => {
            for field in projection(nested).0 {
                out.push(field);
            }
        }
        FieldKind::Alias { field, path } => out.push(ProjField::DerefPath {
            alias: spec.source.to_owned(),
            field: field.to_owned(),
            path: path.to_owned(),
        }),
        FieldKind::CategoryLabel | FieldKind::CategoryKey => {
            out.push(ProjField::Field("category".to_owned()));
            out.push(ProjField::Field("customCategory".to_owned()));
        }
        FieldKind::Index | FieldKind::LocalePath(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ITEM: &[FieldSpec] = &[
        FieldSpec::plain("iconKey"),
        FieldSpec::text("title"),
        FieldSpec::new("shortTitle", FieldKind::Text(Fallback::Field("title"))),
    ];

    const SECTION: &[FieldSpec] = &[
        FieldSpec::plain("_id").rename("id"),
        FieldSpec::text("heading"),
        FieldSpec::each("items", ITEM),
        FieldSpec::new("id", FieldKind::Index),
        FieldSpec::new("categoryLabel", FieldKind::CategoryLabel),
        FieldSpec::new("category", FieldKind::CategoryKey),
    ];

    fn names(p: &Projection) -> Vec<&str> {
        p.fields().iter().map(ProjField::output_name).collect()
    }

    #[test]
    fn bilingual_fields_project_both_locales() {
        let p = projection(SECTION);
        assert_eq!(
            names(&p),
            vec![
                "_id",
                "headingPl",
                "headingEn",
                "items",
                "category",
                "customCategory"
            ]
        );
    }

    #[test]
    fn nested_arrays_project_their_own_fields() {
        let p = projection(SECTION);
        let items = p
            .fields()
            .iter()
            .find_map(|f| match f {
                ProjField::Each(n, inner) if n == "items" => Some(inner.clone()),
                _ => None,
            })
            .expect("items projection");
        assert_eq!(
            names(&items),
            vec!["iconKey", "titlePl", "titleEn", "shortTitlePl", "shortTitleEn"]
        );
    }

    #[test]
    fn group_merges_into_parent_projection() {
        const CTA: &[FieldSpec] = &[FieldSpec::text("ctaTitle").rename("title")];
        const PAGE: &[FieldSpec] = &[
            FieldSpec::text("heading"),
            FieldSpec::new("cta", FieldKind::Group(CTA)),
        ];
        assert_eq!(
            names(&projection(PAGE)),
            vec!["headingPl", "headingEn", "ctaTitlePl", "ctaTitleEn"]
        );
    }

    #[test]
    fn alias_projects_dereference() {
        const COMPANY: &[FieldSpec] = &[FieldSpec::new(
            "projectSlug",
            FieldKind::Alias {
                field: "project",
                path: "slug.current",
            },
        )];
        let p = projection(COMPANY);
        assert_eq!(
            p.fields(),
            &[ProjField::DerefPath {
                alias: "projectSlug".into(),
                field: "project".into(),
                path: "slug.current".into(),
            }]
        );
    }
}
