// crates/adapt/src/groq.rs

//! Renders a structured [`Query`] to the remote store's query language.
//!
//! Parameters are never inlined; `EqParam` renders as `$name` and the client
//! sends the bound value alongside the query.

use domain::query::{CmpOp, FieldExpr, Filter, Order, ProjField, Projection, Query, Shape};
use serde_json::Value as Json;

pub fn render(query: &Query) -> String {
    let mut out = format!("*[{}]", filter(&query.filter));

    if !query.order.is_empty() {
        let clauses: Vec<String> = query.order.iter().map(order).collect();
        out.push_str(&format!(" | order({})", clauses.join(", ")));
    }

    if query.shape == Shape::First {
        out.push_str("[0]");
    }

    if let Some(p) = &query.projection {
        if !p.is_empty() {
            out.push(' ');
            out.push_str(&projection(p));
        }
    }

    match query.shape {
        Shape::Count => format!("count({out})"),
        _ => out,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Filters
// ─────────────────────────────────────────────────────────────────────────────

fn filter(f: &Filter) -> String {
    match f {
        Filter::Field(expr) => field_expr(expr),
        Filter::And(parts) if parts.is_empty() => "true".to_owned(),
        Filter::Or(parts) if parts.is_empty() => "false".to_owned(),
        Filter::And(parts) => parts
            .iter()
            .map(|p| match p {
                Filter::Or(inner) if inner.len() > 1 => format!("({})", filter(p)),
                _ => filter(p),
            })
            .collect::<Vec<_>>()
            .join(" && "),
        Filter::Or(parts) => parts
            .iter()
            .map(|p| match p {
                Filter::And(inner) if inner.len() > 1 => format!("({})", filter(p)),
                _ => filter(p),
            })
            .collect::<Vec<_>>()
            .join(" || "),
    }
}

fn field_expr(expr: &FieldExpr) -> String {
    let path = &expr.path;
    match &expr.op {
        CmpOp::Eq(v) => format!("{path} == {}", literal(v)),
        CmpOp::Ne(v) => format!("{path} != {}", literal(v)),
        CmpOp::Gt(v) => format!("{path} > {}", literal(v)),
        CmpOp::Gte(v) => format!("{path} >= {}", literal(v)),
        CmpOp::Lt(v) => format!("{path} < {}", literal(v)),
        CmpOp::Lte(v) => format!("{path} <= {}", literal(v)),
        CmpOp::In(values) => {
            let items: Vec<String> = values.iter().map(literal).collect();
            format!("{path} in [{}]", items.join(", "))
        }
        CmpOp::Exists(true) => format!("defined({path})"),
        CmpOp::Exists(false) => format!("!defined({path})"),
        CmpOp::EqParam(name) => format!("{path} == ${name}"),
        CmpOp::LteNow => format!("{path} <= now()"),
    }
}

/// JSON and the query language share literal syntax for scalars and arrays.
fn literal(v: &Json) -> String {
    v.to_string()
}

fn order(o: &Order) -> String {
    let dir = if o.descending { "desc" } else { "asc" };
    if o.missing_as_now {
        format!("coalesce({}, now()) {dir}", o.field)
    } else {
        format!("{} {dir}", o.field)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Projections
// ─────────────────────────────────────────────────────────────────────────────

fn projection(p: &Projection) -> String {
    let fields: Vec<String> = p.fields().iter().map(proj_field).collect();
    format!("{{{}}}", fields.join(", "))
}

fn proj_field(f: &ProjField) -> String {
    match f {
        ProjField::Field(name) => name.clone(),
        ProjField::Each(name, inner) if inner.is_empty() => name.clone(),
        ProjField::Each(name, inner) => format!("{name}[]{}", projection(inner)),
        ProjField::DerefEach(name, inner) if inner.is_empty() => format!("{name}[]->"),
        ProjField::DerefEach(name, inner) => format!("{name}[]->{}", projection(inner)),
        ProjField::DerefPath { alias, field, path } => format!("\"{alias}\": {field}->{path}"),
    }
}
