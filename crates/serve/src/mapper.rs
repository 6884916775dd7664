// crates/serve/src/mapper.rs

//! Generic field-map mapper.
//!
//! Walks a static `&[FieldSpec]` over one raw record and produces a resolved
//! JSON object, which is then deserialized into the typed view model. Every
//! content type goes through here; none of them resolves fields by hand.
//!
//! Absence is soft (fallbacks, omitted keys, empty arrays). Corruption is
//! loud: a malformed slug or image descriptor, or a resolved object that does
//! not fit its view model, is an error.

use domain::category::category_label;
use domain::field::{Fallback, FieldKind, FieldSpec, Variant, SECTION_TAG};
use domain::image::{Fit, ImageTransform};
use domain::{Locale, LocalizedResolver};
use serde::de::DeserializeOwned;
use serde_json::{Map as JsonMap, Value as Json};
use tracing::debug;

use crate::{source::ImageUrlBuilder, Error, Result};

/// Transform applied to every SEO share image.
pub const OG_IMAGE: ImageTransform = ImageTransform::sized(1200, 630).fit(Fit::Clip);

const ALT: &str = "alt";
const WITH_BORDER: &str = "withBorder";
const CATEGORY: &str = "category";
const CUSTOM_CATEGORY: &str = "customCategory";

pub struct Mapper<'a> {
    resolver: LocalizedResolver,
    images: &'a dyn ImageUrlBuilder,
    locale: Locale,
}

impl<'a> Mapper<'a> {
    pub fn new(resolver: LocalizedResolver, images: &'a dyn ImageUrlBuilder, locale: Locale) -> Self {
        Self {
            resolver,
            images,
            locale,
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Map a single-document result.
    ///
    /// `null` means "no such document" and yields `Ok(None)` before any field
    /// is read or any image URL is built.
    pub fn one<T: DeserializeOwned>(
        &self,
        kind: &'static str,
        record: &Json,
        fields: &[FieldSpec],
    ) -> Result<Option<T>> {
        if record.is_null() {
            return Ok(None);
        }
        let object = self.object(record, fields, None)?;
        shape(kind, Json::Object(object)).map(Some)
    }

    /// Map a list result. `null` is an empty list; `null` elements (dangling
    /// references) are skipped.
    pub fn many<T: DeserializeOwned>(
        &self,
        kind: &'static str,
        records: &Json,
        fields: &[FieldSpec],
    ) -> Result<Vec<T>> {
        let items = match records {
            Json::Null => return Ok(Vec::new()),
            Json::Array(items) => items,
            _ => {
                return Err(Error::Shape {
                    kind,
                    source: serde::de::Error::custom("expected a list of records"),
                })
            }
        };

        items
            .iter()
            .filter(|record| !record.is_null())
            .map(|record| {
                let object = self.object(record, fields, None)?;
                shape(kind, Json::Object(object))
            })
            .collect()
    }

    /// Resolve every declared field of `record`. Keys of absent optional
    /// fields are left out.
    pub fn object(
        &self,
        record: &Json,
        fields: &[FieldSpec],
        index: Option<usize>,
    ) -> Result<JsonMap<String, Json>> {
        let mut out = JsonMap::new();
        for spec in fields {
            if let Some(value) = self.field(record, spec, index)? {
                out.insert(spec.target.to_owned(), value);
            }
        }
        Ok(out)
    }

    fn field(&self, record: &Json, spec: &FieldSpec, index: Option<usize>) -> Result<Option<Json>> {
        let src = spec.source;
        let locale = self.locale;
        let r = &self.resolver;

        let value = match spec.kind {
            FieldKind::Text(Fallback::Literal(fallback)) => {
                Some(Json::String(r.text(record, src, locale, fallback)))
            }
            FieldKind::Text(Fallback::Field(other)) => Some(Json::String(
                r.opt_text(record, src, locale)
                    .or_else(|| r.opt_text(record, other, locale))
                    .unwrap_or_default(),
            )),
            FieldKind::OptText => r.opt_text(record, src, locale).map(Json::String),
            FieldKind::Localized => r.pick(record, src, locale).cloned(),
            FieldKind::TextList => Some(Json::Array(r.list(record, src, locale))),
            FieldKind::TextEach(base) => Some(Json::Array(
                elements(record, src)
                    .map(|item| Json::String(r.text(item, base, locale, "")))
                    .collect(),
            )),
            FieldKind::Plain(default) => plain(record, src)
                .cloned()
                .or_else(|| default.map(|d| Json::String(d.to_owned()))),
            FieldKind::Flag => Some(Json::Bool(is_true(record, src))),
            FieldKind::Slug => Some(Json::String(slug(record.get(src))?)),
            FieldKind::Index => Some(Json::from(index.unwrap_or(0))),
            FieldKind::Image {
                transform,
                border,
                alt_from,
            } => match present(record, src) {
                Some(image) => {
                    let alt_fallback = alt_from
                        .and_then(|sibling| record.get(sibling))
                        .and_then(Json::as_str)
                        .unwrap_or("");
                    Some(self.image(image, &transform, alt_fallback, border)?)
                }
                None => None,
            },
            FieldKind::ImageUrl(transform) => match present(record, src) {
                Some(image) => Some(Json::String(self.images.build(image, &transform)?)),
                None => None,
            },
            FieldKind::Images(transform) => Some(Json::Array(
                elements(record, src)
                    .filter(|image| !image.is_null())
                    .map(|image| self.image(image, &transform, "", false))
                    .collect::<Result<_>>()?,
            )),
            FieldKind::Each(nested) => Some(Json::Array(
                elements(record, src)
                    .enumerate()
                    .map(|(i, item)| self.object(item, nested, Some(i)).map(Json::Object))
                    .collect::<Result<_>>()?,
            )),
            FieldKind::RefEach(nested) => Some(Json::Array(
                elements(record, src)
                    .filter(|item| !item.is_null())
                    .enumerate()
                    .map(|(i, item)| self.object(item, nested, Some(i)).map(Json::Object))
                    .collect::<Result<_>>()?,
            )),
            FieldKind::Group(nested) => Some(Json::Object(self.object(record, nested, index)?)),
            FieldKind::Alias { .. } => present(record, src).cloned(),
            FieldKind::CategoryLabel => category_label(
                str_field(record, CATEGORY),
                str_field(record, CUSTOM_CATEGORY),
                locale,
            )
            .map(Json::String),
            FieldKind::CategoryKey => str_field(record, CUSTOM_CATEGORY)
                .filter(|c| !c.is_empty())
                .or_else(|| str_field(record, CATEGORY).filter(|c| !c.is_empty()))
                .map(|c| Json::String(c.to_owned())),
            FieldKind::Seo => match present(record, src) {
                Some(seo) => self.seo(seo)?,
                None => None,
            },
            FieldKind::Sections(variants) => Some(Json::Array(
                elements(record, src)
                    .filter(|section| !section.is_null())
                    .enumerate()
                    .map(|(i, section)| self.section(section, variants, i))
                    .collect::<Result<_>>()?,
            )),
            FieldKind::LocalePath(path) => {
                Some(Json::String(format!("/{}{}", locale.code(), path)))
            }
        };

        Ok(value)
    }

    /// `{ url, alt }` (plus `withBorder` when asked for) for a present image.
    fn image(
        &self,
        image: &Json,
        transform: &ImageTransform,
        alt_fallback: &str,
        border: bool,
    ) -> Result<Json> {
        let url = self.images.build(image, transform)?;

        let mut out = JsonMap::new();
        out.insert("url".to_owned(), Json::String(url));
        out.insert(
            ALT.to_owned(),
            Json::String(self.resolver.text(image, ALT, self.locale, alt_fallback)),
        );
        if border {
            out.insert(WITH_BORDER.to_owned(), Json::Bool(is_true(image, WITH_BORDER)));
        }
        Ok(Json::Object(out))
    }

    /// SEO block, or `None` when title, description and share image are all
    /// absent.
    fn seo(&self, seo: &Json) -> Result<Option<Json>> {
        let mut out = JsonMap::new();
        if let Some(title) = self.resolver.opt_text(seo, "metaTitle", self.locale) {
            out.insert("metaTitle".to_owned(), Json::String(title));
        }
        if let Some(description) = self.resolver.opt_text(seo, "metaDescription", self.locale) {
            out.insert("metaDescription".to_owned(), Json::String(description));
        }
        if let Some(image) = present(seo, "ogImage") {
            out.insert(
                "ogImage".to_owned(),
                Json::String(self.images.build(image, &OG_IMAGE)?),
            );
        }
        Ok((!out.is_empty()).then_some(Json::Object(out)))
    }

    /// One tagged section. Unknown tags keep only their tag.
    fn section(&self, section: &Json, variants: &[Variant], index: usize) -> Result<Json> {
        let tag = section
            .get(SECTION_TAG)
            .and_then(Json::as_str)
            .unwrap_or_default();

        let mut out = match variants.iter().find(|v| v.tag == tag) {
            Some(variant) => self.object(section, variant.fields, Some(index))?,
            None => {
                debug!(tag, "unknown section type, keeping tag only");
                JsonMap::new()
            }
        };
        out.insert(SECTION_TAG.to_owned(), Json::String(tag.to_owned()));
        Ok(Json::Object(out))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

fn shape<T: DeserializeOwned>(kind: &'static str, value: Json) -> Result<T> {
    serde_json::from_value(value).map_err(|source| Error::Shape { kind, source })
}

/// Elements of an array field; nothing when the field is absent or not an
/// array.
fn elements<'r>(record: &'r Json, key: &str) -> impl Iterator<Item = &'r Json> + 'r {
    record
        .get(key)
        .and_then(Json::as_array)
        .into_iter()
        .flatten()
}

fn present<'r>(record: &'r Json, key: &str) -> Option<&'r Json> {
    record.get(key).filter(|v| !v.is_null())
}

/// Present and not an empty string.
fn plain<'r>(record: &'r Json, key: &str) -> Option<&'r Json> {
    present(record, key).filter(|v| v.as_str() != Some(""))
}

fn str_field<'r>(record: &'r Json, key: &str) -> Option<&'r str> {
    record.get(key).and_then(Json::as_str)
}

fn is_true(record: &Json, key: &str) -> bool {
    record.get(key) == Some(&Json::Bool(true))
}

/// Slug from `{ current }` or a bare string.
///
/// A missing slug, or a slug object without `current`, is `""`. Any other
/// shape is corrupt data.
pub fn slug(value: Option<&Json>) -> Result<String> {
    match value {
        None | Some(Json::Null) => Ok(String::new()),
        Some(Json::String(s)) => Ok(s.clone()),
        Some(Json::Object(obj)) => match obj.get("current") {
            None | Some(Json::Null) => Ok(String::new()),
            Some(Json::String(s)) => Ok(s.clone()),
            Some(other) => Err(Error::MalformedSlug(other.to_string())),
        },
        Some(other) => Err(Error::MalformedSlug(other.to_string())),
    }
}
