// crates/domain/src/query.rs

//! Structured content queries.
//!
//! A `Query` is what the pipeline hands to a content source. It is plain data:
//! the HTTP adapter renders it to the remote store's query language and the
//! in-memory store evaluates it directly, so both honour the same filters
//! (in particular the publication gate).

use serde::{Deserialize, Serialize};
use serde_json::Value as Json;
use std::collections::BTreeMap;

/// Field the publication gate is evaluated on.
pub const PUBLISHED_AT: &str = "publishedAt";

// ─────────────────────────────────────────────────────────────────────────────
// Filter tree
// ─────────────────────────────────────────────────────────────────────────────

/// Comparison operations on a single field path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CmpOp {
    Eq(Json),
    Ne(Json),
    Gt(Json),
    Gte(Json),
    Lt(Json),
    Lte(Json),
    In(Vec<Json>),
    Exists(bool),
    /// Equality against a named parameter binding (`$name`).
    EqParam(String),
    /// Less than or equal to the instant the query is executed.
    LteNow,
}

/// A single field expression: `<path> <op>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldExpr {
    pub path: String, // e.g. "_type", "slug.current"
    pub op: CmpOp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Filter {
    And(Vec<Filter>),
    Or(Vec<Filter>),
    Field(FieldExpr),
}

impl Filter {
    pub fn field(path: impl Into<String>, op: CmpOp) -> Self {
        Filter::Field(FieldExpr {
            path: path.into(),
            op,
        })
    }

    /// `_type == doc_type`
    pub fn of_type(doc_type: &str) -> Self {
        Self::field("_type", CmpOp::Eq(Json::String(doc_type.to_owned())))
    }

    /// Publication gate: a document is visible when it has no publish date or
    /// the publish date is not in the future.
    pub fn published() -> Self {
        Filter::Or(vec![
            Self::field(PUBLISHED_AT, CmpOp::Exists(false)),
            Self::field(PUBLISHED_AT, CmpOp::LteNow),
        ])
    }

    /// Conjunction that flattens nested `And`s.
    pub fn and(self, other: Filter) -> Self {
        match (self, other) {
            (Filter::And(mut a), Filter::And(b)) => {
                a.extend(b);
                Filter::And(a)
            }
            (Filter::And(mut a), f) => {
                a.push(f);
                Filter::And(a)
            }
            (f, Filter::And(mut b)) => {
                b.insert(0, f);
                Filter::And(b)
            }
            (a, b) => Filter::And(vec![a, b]),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Ordering, shape, projection
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub field: String,
    pub descending: bool,
    /// Documents without the field sort as if it held the current instant.
    pub missing_as_now: bool,
}

/// How many results the query yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Shape {
    /// First match or `null`.
    First,
    /// Every match, as an array.
    #[default]
    All,
    /// Number of matches.
    Count,
}

/// Which fields of each matched document are returned.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Projection(pub Vec<ProjField>);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProjField {
    /// `name`: the field as stored.
    Field(String),
    /// `name[]{...}`: each element of an array, projected.
    Each(String, Projection),
    /// `name[]->{...}`: each element of a reference array, dereferenced then
    /// projected.
    DerefEach(String, Projection),
    /// `"alias": name->path`: follow a single reference and read a path on
    /// the target document.
    DerefPath {
        alias: String,
        field: String,
        path: String,
    },
}

impl Projection {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> &[ProjField] {
        &self.0
    }

    /// Add a field unless an entry with the same output name already exists.
    pub fn push(&mut self, field: ProjField) {
        let name = field.output_name().to_owned();
        if !self.0.iter().any(|f| f.output_name() == name) {
            self.0.push(field);
        }
    }
}

impl ProjField {
    /// Key the projected value is stored under.
    pub fn output_name(&self) -> &str {
        match self {
            ProjField::Field(n) | ProjField::Each(n, _) | ProjField::DerefEach(n, _) => n,
            ProjField::DerefPath { alias, .. } => alias,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Query
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    pub filter: Filter,
    pub order: Vec<Order>,
    pub shape: Shape,
    pub projection: Option<Projection>,
    pub params: BTreeMap<String, Json>,
}

impl Query {
    /// All documents of one type.
    pub fn of_type(doc_type: &str) -> Self {
        Self {
            filter: Filter::of_type(doc_type),
            order: Vec::new(),
            shape: Shape::All,
            projection: None,
            params: BTreeMap::new(),
        }
    }

    /// All *published* documents of one type. Every surface that lists,
    /// counts or looks up time-gated content starts from here.
    pub fn published(doc_type: &str) -> Self {
        Self::of_type(doc_type).filter(Filter::published())
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = self.filter.and(filter);
        self
    }

    /// `_id == id`
    pub fn id(self, id: &str) -> Self {
        self.filter(Filter::field("_id", CmpOp::Eq(Json::String(id.to_owned()))))
    }

    /// `slug.current == $slug`, with `slug` bound as a parameter.
    pub fn slug(self, slug: &str) -> Self {
        self.filter(Filter::field(
            "slug.current",
            CmpOp::EqParam("slug".to_owned()),
        ))
        .bind("slug", Json::String(slug.to_owned()))
    }

    pub fn bind(mut self, name: &str, value: Json) -> Self {
        self.params.insert(name.to_owned(), value);
        self
    }

    pub fn order_desc(mut self, field: &str, missing_as_now: bool) -> Self {
        self.order.push(Order {
            field: field.to_owned(),
            descending: true,
            missing_as_now,
        });
        self
    }

    pub fn first(mut self) -> Self {
        self.shape = Shape::First;
        self
    }

    pub fn count(mut self) -> Self {
        self.shape = Shape::Count;
        self.projection = None;
        self
    }

    pub fn project(mut self, projection: Projection) -> Self {
        self.projection = Some(projection);
        self
    }
}
