// crates/adapt/src/store/mod.rs

//! In-memory content store.
//!
//! Holds an export of the remote dataset and answers the same structured
//! queries the HTTP client sends, evaluated locally: filters (including the
//! publication gate against the wall clock), ordering, shape, projection and
//! reference resolution. Useful offline and in tests.

mod eval;
mod project;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value as Json;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

use domain::query::{Query, Shape};
use serve::source::ContentSource;

use crate::Error;
use eval::{apply_order, eval_filter, Scope};

/// Draft documents share the published id behind this prefix.
const DRAFT_PREFIX: &str = "drafts.";

#[derive(Debug, Clone, Default)]
pub struct InMemoryContentStore {
    docs: Vec<Json>,
    by_id: HashMap<String, usize>,
}

impl InMemoryContentStore {
    /// Drafts are dropped; only published documents are queryable.
    pub fn new(docs: Vec<Json>) -> Self {
        let docs: Vec<Json> = docs
            .into_iter()
            .filter(|doc| {
                let draft = id_of(doc).is_some_and(|id| id.starts_with(DRAFT_PREFIX));
                if draft {
                    debug!(id = ?id_of(doc), "skipping draft document");
                }
                !draft
            })
            .collect();

        let by_id = docs
            .iter()
            .enumerate()
            .filter_map(|(i, doc)| id_of(doc).map(|id| (id.to_owned(), i)))
            .collect();

        Self { docs, by_id }
    }

    /// Load a dataset export: either one JSON array of documents or NDJSON,
    /// one document per line.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let docs = parse_export(&text)?;
        info!(path = %path.display(), documents = docs.len(), "loaded content fixtures");
        Ok(Self::new(docs))
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Json> {
        self.by_id.get(id).and_then(|&i| self.docs.get(i))
    }

    /// Follow `{ "_ref": id }`. Dangling references resolve to nothing.
    pub(crate) fn deref(&self, reference: &Json) -> Option<&Json> {
        reference
            .get("_ref")
            .and_then(Json::as_str)
            .and_then(|id| self.get(id))
    }

    /// Run `query` as of `now`.
    pub fn run(&self, query: &Query, now: DateTime<Utc>) -> Result<Json, Error> {
        let scope = Scope {
            params: &query.params,
            now,
        };

        let mut matched = Vec::new();
        for doc in &self.docs {
            if eval_filter(&query.filter, doc, &scope)? {
                matched.push(doc);
            }
        }
        apply_order(&mut matched, &query.order, &scope);

        let shape = |doc: &Json| match &query.projection {
            Some(p) => project::project(doc, p, self),
            None => doc.clone(),
        };

        Ok(match query.shape {
            Shape::Count => Json::from(matched.len()),
            Shape::First => matched.first().map_or(Json::Null, |doc| shape(*doc)),
            Shape::All => Json::Array(matched.into_iter().map(shape).collect()),
        })
    }
}

#[async_trait]
impl ContentSource for InMemoryContentStore {
    async fn fetch(&self, query: &Query) -> serve::Result<Json> {
        Ok(self.run(query, Utc::now())?)
    }
}

fn id_of(doc: &Json) -> Option<&str> {
    doc.get("_id").and_then(Json::as_str)
}

fn parse_export(text: &str) -> Result<Vec<Json>, Error> {
    if text.trim_start().starts_with('[') {
        return Ok(serde_json::from_str(text)?);
    }

    let mut docs = Vec::new();
    for (i, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let doc: Json = serde_json::from_str(line).map_err(|e| Error::InvalidFixture {
            line: i + 1,
            reason: e.to_string(),
        })?;
        if !doc.is_object() {
            return Err(Error::InvalidFixture {
                line: i + 1,
                reason: "expected a JSON object".into(),
            });
        }
        docs.push(doc);
    }
    Ok(docs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use domain::field::{FieldKind, FieldSpec};
    use domain::query::{ProjField, Projection, PUBLISHED_AT};
    use serde_json::json;
    use std::io::Write;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn blog() -> InMemoryContentStore {
        InMemoryContentStore::new(vec![
            json!({ "_id": "past", "_type": "blogPost", "publishedAt": "2025-01-01T00:00:00Z",
                    "titlePl": "Stary", "slug": { "current": "past" } }),
            json!({ "_id": "future", "_type": "blogPost", "publishedAt": "2099-01-01T00:00:00Z",
                    "titlePl": "Przyszły", "slug": { "current": "future" } }),
            json!({ "_id": "undated", "_type": "blogPost",
                    "titlePl": "Bez daty", "slug": { "current": "undated" } }),
            json!({ "_id": "drafts.past", "_type": "blogPost", "titlePl": "Szkic" }),
            json!({ "_id": "faq", "_type": "faqSection" }),
        ])
    }

    fn ids(v: &Json) -> Vec<&str> {
        v.as_array()
            .unwrap()
            .iter()
            .map(|d| d["_id"].as_str().unwrap())
            .collect()
    }

    // ─────────────────────────────────────────────────────────────
    // publication gate
    // ─────────────────────────────────────────────────────────────

    #[test]
    fn count_list_and_detail_agree_on_visibility() {
        let store = blog();

        let count = Query::published("blogPost").count();
        assert_eq!(store.run(&count, now()).unwrap(), json!(2));

        let list = Query::published("blogPost").order_desc(PUBLISHED_AT, true);
        assert_eq!(ids(&store.run(&list, now()).unwrap()), vec!["undated", "past"]);

        let future = Query::published("blogPost").slug("future").first();
        assert_eq!(store.run(&future, now()).unwrap(), Json::Null);

        let past = Query::published("blogPost").slug("past").first();
        assert_eq!(store.run(&past, now()).unwrap()["_id"], "past");
    }

    #[test]
    fn drafts_are_not_queryable() {
        let store = blog();
        assert_eq!(store.len(), 4);
        assert!(store.get("drafts.past").is_none());
    }

    #[test]
    fn first_on_no_match_is_null() {
        let q = Query::of_type("contactSection").first();
        assert_eq!(blog().run(&q, now()).unwrap(), Json::Null);
    }

    // ─────────────────────────────────────────────────────────────
    // projection and references
    // ─────────────────────────────────────────────────────────────

    fn portfolio() -> InMemoryContentStore {
        InMemoryContentStore::new(vec![
            json!({ "_id": "p1", "_type": "project", "titlePl": "Farma", "slug": { "current": "farma" },
                    "secret": "x" }),
            json!({ "_id": "p2", "_type": "project", "titlePl": "Most" }),
            json!({ "_id": "section", "_type": "portfolioSection", "headingPl": "Realizacje",
                    "projects": [ { "_ref": "p2" }, { "_ref": "gone" }, { "_ref": "p1" } ] }),
            json!({ "_id": "trusted", "_type": "trustedBy",
                    "companies": [
                        { "name": "ACME", "project": { "_ref": "p1" } },
                        { "name": "Solo" }
                    ] }),
        ])
    }

    #[test]
    fn dereferenced_arrays_keep_order_and_null_dangling_refs() {
        let q = Query::of_type("portfolioSection").first().project(Projection(vec![
            ProjField::Field("headingPl".into()),
            ProjField::DerefEach(
                "projects".into(),
                Projection(vec![
                    ProjField::Field("_id".into()),
                    ProjField::Field("titlePl".into()),
                ]),
            ),
        ]));
        let out = portfolio().run(&q, now()).unwrap();
        assert_eq!(
            out,
            json!({
                "headingPl": "Realizacje",
                "projects": [
                    { "_id": "p2", "titlePl": "Most" },
                    null,
                    { "_id": "p1", "titlePl": "Farma" }
                ]
            })
        );
    }

    #[test]
    fn aliased_dereference_inside_nested_array() {
        let companies: &[FieldSpec] = &[
            FieldSpec::plain("name"),
            FieldSpec::new(
                "projectSlug",
                FieldKind::Alias {
                    field: "project",
                    path: "slug.current",
                },
            ),
        ];
        let q = Query::of_type("trustedBy").first().project(Projection(vec![
            ProjField::Each("companies".into(), domain::field::projection(companies)),
        ]));
        let out = portfolio().run(&q, now()).unwrap();
        assert_eq!(
            out["companies"],
            json!([{ "name": "ACME", "projectSlug": "farma" }, { "name": "Solo" }])
        );
    }

    #[test]
    fn unprojected_fields_are_dropped() {
        let q = Query::of_type("project")
            .id("p1")
            .first()
            .project(Projection(vec![ProjField::Field("titlePl".into())]));
        assert_eq!(portfolio().run(&q, now()).unwrap(), json!({ "titlePl": "Farma" }));
    }

    #[test]
    fn slug_object_without_current_still_matches_nothing() {
        let store = InMemoryContentStore::new(vec![
            json!({ "_id": "a", "_type": "project", "slug": { "current": null } }),
        ]);
        let q = Query::of_type("project").slug("").first();
        assert_eq!(store.run(&q, now()).unwrap(), Json::Null);
    }

    // ─────────────────────────────────────────────────────────────
    // loading
    // ─────────────────────────────────────────────────────────────

    #[test]
    fn loads_json_array_export() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"_id":"a","_type":"faqSection"}},{{"_id":"b","_type":"faqSection"}}]"#)
            .unwrap();

        let store = InMemoryContentStore::from_path(file.path()).unwrap();
        assert_eq!(store.len(), 2);
        assert!(store.get("b").is_some());
    }

    #[test]
    fn loads_ndjson_export() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"_id":"a","_type":"faqSection"}}"#).unwrap();
        writeln!(file).unwrap();
        writeln!(file, r#"{{"_id":"drafts.a","_type":"faqSection"}}"#).unwrap();
        writeln!(file, r#"{{"_id":"c","_type":"footer"}}"#).unwrap();

        let store = InMemoryContentStore::from_path(file.path()).unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn bad_ndjson_line_is_reported_with_its_number() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"_id":"a"}}"#).unwrap();
        writeln!(file, "not json").unwrap();

        match InMemoryContentStore::from_path(file.path()) {
            Err(Error::InvalidFixture { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected fixture error, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let res = InMemoryContentStore::from_path(dir.path().join("nope.ndjson"));
        assert!(matches!(res, Err(Error::Io(_))));
    }

    // ─────────────────────────────────────────────────────────────
    // end to end through the pipeline
    // ─────────────────────────────────────────────────────────────

    struct Urls;

    impl serve::source::ImageUrlBuilder for Urls {
        fn build(
            &self,
            image: &Json,
            _: &domain::image::ImageTransform,
        ) -> serve::Result<String> {
            Ok(format!("img:{}", image["asset"]["_ref"].as_str().unwrap_or("?")))
        }
    }

    #[tokio::test]
    async fn blog_pipeline_over_fixtures() {
        use serve::content::{blog, Deps};

        let store = InMemoryContentStore::new(vec![
            json!({ "_id": "a", "_type": "blogPost", "publishedAt": "2024-01-01T00:00:00Z",
                    "titlePl": "Pierwszy", "titleEn": "First", "slug": { "current": "first" } }),
            json!({ "_id": "b", "_type": "blogPost", "publishedAt": "2999-01-01T00:00:00Z",
                    "titlePl": "Później", "slug": { "current": "later" } }),
            json!({ "_id": "c", "_type": "blogPost", "titlePl": "Szkic bez daty",
                    "slug": { "current": null } }),
        ]);
        let deps = Deps::new(&store, &Urls);

        assert_eq!(blog::fetch_count(&deps).await.unwrap(), 2);

        let list = blog::fetch_list(&deps, domain::Locale::En).await.unwrap();
        let titles: Vec<_> = list.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Szkic bez daty", "First"]);
        assert_eq!(list[0].slug, "");

        assert!(blog::fetch_detail(&deps, "later", domain::Locale::Pl)
            .await
            .unwrap()
            .is_none());
    }
}
