// crates/adapt/src/store/project.rs

use serde_json::{Map, Value as Json};

use domain::query::{ProjField, Projection};

use super::eval::field_value;
use super::InMemoryContentStore;

/// Shape a matched document the way the remote store would answer the same
/// projection. Absent fields are left out rather than written as `null`.
pub(crate) fn project(doc: &Json, projection: &Projection, store: &InMemoryContentStore) -> Json {
    let Json::Object(source) = doc else {
        return doc.clone();
    };
    if projection.is_empty() {
        return doc.clone();
    }

    let mut out = Map::new();
    for field in projection.fields() {
        let value = match field {
            ProjField::Field(name) => source.get(name).cloned(),
            ProjField::Each(name, inner) => source.get(name).map(|items| match items {
                Json::Array(items) => Json::Array(
                    items
                        .iter()
                        .map(|item| project(item, inner, store))
                        .collect(),
                ),
                other => other.clone(),
            }),
            ProjField::DerefEach(name, inner) => source.get(name).map(|items| match items {
                Json::Array(items) => Json::Array(
                    items
                        .iter()
                        .map(|item| match store.deref(item) {
                            Some(target) => project(target, inner, store),
                            None => Json::Null,
                        })
                        .collect(),
                ),
                _ => Json::Null,
            }),
            ProjField::DerefPath { field, path, .. } => source
                .get(field)
                .and_then(|r| store.deref(r))
                .and_then(|target| field_value(target, path))
                .cloned(),
        };

        if let Some(value) = value.filter(|v| !v.is_null()) {
            out.insert(field.output_name().to_owned(), value);
        }
    }
    Json::Object(out)
}
