// crates/adapt/src/store/eval.rs

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value as Json;
use std::cmp::Ordering;
use std::collections::BTreeMap;

use domain::query::{CmpOp, Filter, Order};

use crate::Error;

/// What a filter is evaluated against besides the document itself.
pub(crate) struct Scope<'a> {
    pub params: &'a BTreeMap<String, Json>,
    pub now: DateTime<Utc>,
}

impl Scope<'_> {
    fn now_json(&self) -> Json {
        Json::String(self.now.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

/// Resolve a dotted field path (e.g. "slug.current") into a nested value.
///
/// `null` counts as undefined, matching `defined()` in the store.
pub(crate) fn field_value<'a>(doc: &'a Json, path: &str) -> Option<&'a Json> {
    let mut current = doc;
    for part in path.split('.') {
        current = current.get(part)?;
    }
    (!current.is_null()).then_some(current)
}

/// Order two scalars. Strings that both read as timestamps compare as
/// instants; otherwise strings compare lexically and numbers numerically.
pub(crate) fn compare(a: &Json, b: &Json) -> Option<Ordering> {
    match (a, b) {
        (Json::Number(na), Json::Number(nb)) => na.as_f64()?.partial_cmp(&nb.as_f64()?),
        (Json::String(sa), Json::String(sb)) => match (timestamp(sa), timestamp(sb)) {
            (Some(ta), Some(tb)) => Some(ta.cmp(&tb)),
            _ => Some(sa.cmp(sb)),
        },
        (Json::Bool(ba), Json::Bool(bb)) => Some(ba.cmp(bb)),
        _ => None,
    }
}

fn timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

fn eval_cmp(op: &CmpOp, actual: Option<&Json>, scope: &Scope<'_>) -> Result<bool, Error> {
    use CmpOp::*;

    let ordered = |expected: &Json, accept: fn(Ordering) -> bool| {
        actual
            .and_then(|a| compare(a, expected))
            .is_some_and(accept)
    };

    Ok(match op {
        Eq(expected) => actual == Some(expected),
        Ne(expected) => actual != Some(expected),
        Gt(expected) => ordered(expected, Ordering::is_gt),
        Gte(expected) => ordered(expected, Ordering::is_ge),
        Lt(expected) => ordered(expected, Ordering::is_lt),
        Lte(expected) => ordered(expected, Ordering::is_le),
        In(list) => actual.is_some_and(|a| list.contains(a)),
        Exists(flag) => actual.is_some() == *flag,
        EqParam(name) => {
            let bound = scope
                .params
                .get(name)
                .ok_or_else(|| Error::UnboundParam(name.clone()))?;
            actual == Some(bound)
        }
        LteNow => ordered(&scope.now_json(), Ordering::is_le),
    })
}

/// Evaluate a full filter against a document.
pub(crate) fn eval_filter(filter: &Filter, doc: &Json, scope: &Scope<'_>) -> Result<bool, Error> {
    match filter {
        Filter::Field(expr) => eval_cmp(&expr.op, field_value(doc, &expr.path), scope),
        Filter::And(filters) => {
            for f in filters {
                if !eval_filter(f, doc, scope)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        Filter::Or(filters) => {
            for f in filters {
                if eval_filter(f, doc, scope)? {
                    return Ok(true);
                }
            }
            Ok(false)
        }
    }
}

/// Apply ordering clauses in place. Stable, so ties keep document order.
pub(crate) fn apply_order(docs: &mut [&Json], order: &[Order], scope: &Scope<'_>) {
    if order.is_empty() || docs.len() <= 1 {
        return;
    }

    let now = scope.now_json();
    docs.sort_by(|a, b| {
        for clause in order {
            let ord = compare_keys(sort_key(a, clause, &now), sort_key(b, clause, &now));
            if ord != Ordering::Equal {
                return if clause.descending { ord.reverse() } else { ord };
            }
        }
        Ordering::Equal
    });
}

fn sort_key<'a>(doc: &'a Json, clause: &Order, now: &'a Json) -> Option<&'a Json> {
    match field_value(doc, &clause.field) {
        None if clause.missing_as_now => Some(now),
        key => key,
    }
}

/// Missing values sort before present ones.
fn compare_keys(a: Option<&Json>, b: Option<&Json>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(va), Some(vb)) => compare(va, vb).unwrap_or(Ordering::Equal),
    }
}
