//! Predicate compilation - recursive descent over the filter tree.
//!
//! Each leaf filter renders through an operator template with its value
//! quoted per `(value kind, bucketed type)`. A filter with no usable
//! value compiles to empty text and is dropped by its parent group; a
//! group joins its surviving children with its boolean operator and is
//! parenthesized unless it is the outermost node.

use crate::model::{
    BucketedType, Filter, FilterNode, FilterOperator, FilterValue, GroupOperator, ValueKind,
};

/// Whether a node contributes anything to a WHERE clause.
///
/// Null-test operators always count. A decimal filter counts iff its
/// value is numeric-coercible - including the literal zero, an
/// intentional asymmetry against the generic truthiness rule. A date
/// filter counts iff its value is truthy; anything else counts iff the
/// value (or any list element) is truthy.
pub fn has_usable_value(node: &FilterNode) -> bool {
    match node {
        FilterNode::Filter(f) => filter_has_usable_value(f),
        FilterNode::Group(g) => g.filters.iter().any(has_usable_value),
    }
}

fn filter_has_usable_value(f: &Filter) -> bool {
    match f.operator {
        FilterOperator::IsNull | FilterOperator::IsNotNull => true,
        _ => match f.data_type {
            BucketedType::Decimal => match &f.value {
                FilterValue::List(items) => items.iter().any(|v| v.as_f64().is_some()),
                v => v.as_f64().is_some(),
            },
            BucketedType::Date => f.value.is_truthy(),
            BucketedType::String => f.value.is_truthy(),
        },
    }
}

/// Compile a filter tree node to predicate text. The node is treated as
/// outermost: a group at this level is not parenthesized.
pub fn compile_predicate(node: &FilterNode) -> String {
    compile_node(node, true)
}

fn compile_node(node: &FilterNode, outermost: bool) -> String {
    match node {
        FilterNode::Filter(f) => compile_filter(f),
        FilterNode::Group(g) => {
            let joiner = match g.operator {
                GroupOperator::And => " and ",
                GroupOperator::Or => " or ",
            };
            let parts: Vec<String> = g
                .filters
                .iter()
                .map(|child| compile_node(child, false))
                .filter(|text| !text.is_empty())
                .collect();
            if parts.is_empty() {
                return String::new();
            }
            let joined = parts.join(joiner);
            if outermost {
                joined
            } else {
                format!("({})", joined)
            }
        }
    }
}

fn compile_filter(f: &Filter) -> String {
    if !filter_has_usable_value(f) {
        return String::new();
    }
    match f.operator {
        FilterOperator::Equal => format!("{} = {}", f.code, render_value(f)),
        FilterOperator::NotEqual => format!("{} <> {}", f.code, render_value(f)),
        FilterOperator::In => format!("{} in ({})", f.code, render_list(f)),
        FilterOperator::NotIn => format!("{} not in ({})", f.code, render_list(f)),
        FilterOperator::Greater => format!("{} > {}", f.code, render_value(f)),
        FilterOperator::GreaterOrEqual => format!("{} >= {}", f.code, render_value(f)),
        FilterOperator::Less => format!("{} < {}", f.code, render_value(f)),
        FilterOperator::LessOrEqual => format!("{} <= {}", f.code, render_value(f)),
        FilterOperator::Top => {
            let n = raw_text(&f.value);
            format!("TOPN({}, {}) <= {}", f.code, n, n)
        }
        FilterOperator::Bottom => {
            let n = raw_text(&f.value);
            format!("BOTTOMN({}, {}) <= {}", f.code, n, n)
        }
        FilterOperator::Like => format!("{} LIKE {}", f.code, render_value(f)),
        FilterOperator::Contains => {
            format!("{} LIKE {}", f.code, quote_string(&format!("%{}%", raw_text(&f.value))))
        }
        FilterOperator::Starts => {
            format!("{} LIKE {}", f.code, quote_string(&format!("{}%", raw_text(&f.value))))
        }
        FilterOperator::Ends => {
            format!("{} LIKE {}", f.code, quote_string(&format!("%{}", raw_text(&f.value))))
        }
        FilterOperator::IsNull => format!("{} IS NULL", f.code),
        FilterOperator::IsNotNull => format!("{} IS NOT NULL", f.code),
    }
}

/// Render the filter's value as a single literal.
fn render_value(f: &Filter) -> String {
    render_scalar(f, &f.value)
}

/// Render a list value for `in`/`not in`, quoting each element by the
/// same rule as a scalar.
fn render_list(f: &Filter) -> String {
    match &f.value {
        FilterValue::List(items) => items
            .iter()
            .map(|v| render_scalar(f, v))
            .collect::<Vec<_>>()
            .join(", "),
        v => render_scalar(f, v),
    }
}

fn render_scalar(f: &Filter, value: &FilterValue) -> String {
    match f.value_kind {
        ValueKind::RepositoryVariable => format!("VALUEOF({})", raw_text(value)),
        ValueKind::SessionVariable => format!("VALUEOF(NQ_SESSION.{})", raw_text(value)),
        ValueKind::Expression => raw_text(value),
        ValueKind::Value => match f.data_type {
            BucketedType::String => match value {
                FilterValue::String(s) => quote_string(s),
                other => raw_text(other),
            },
            BucketedType::Date => match value {
                FilterValue::Date(d) => format!("date '{}'", d.format("%Y-%m-%d")),
                FilterValue::String(s) => format!("date '{}'", s),
                other => raw_text(other),
            },
            BucketedType::Decimal => raw_text(value),
        },
    }
}

/// Single-quote a string literal, doubling embedded quotes.
fn quote_string(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

/// The value's unquoted text, used inside LIKE patterns, rank counts,
/// and pass-through kinds.
fn raw_text(value: &FilterValue) -> String {
    match value {
        FilterValue::Null => String::new(),
        FilterValue::Int(n) => n.to_string(),
        FilterValue::Float(x) => x.to_string(),
        FilterValue::Date(d) => d.format("%Y-%m-%d").to_string(),
        FilterValue::String(s) => s.clone(),
        FilterValue::List(items) => items
            .iter()
            .map(raw_text)
            .collect::<Vec<_>>()
            .join(", "),
    }
}
