//! Result mapping - renaming the transport's positional columns.
//!
//! The transport returns rows keyed `"Column0".."ColumnN"` in criteria
//! order. `map_results` renames each key to the semantic name declared
//! by the query's criteria; a key missing from a row surfaces as an
//! explicit null under the semantic name.

use serde_json::{Map, Value};

use crate::model::{BucketedType, Query};

/// A single result record as handed over by the transport.
pub type ResultRow = Map<String, Value>;

/// Pass-through wire corrections applied while mapping.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultOptions {
    /// Legacy servers deliver decimal columns scaled up by 10^9; set
    /// this to divide them back down.
    pub legacy_scale: bool,
}

/// Rename positional columns to the query's criterion names.
pub fn map_results(query: &Query, rows: Vec<ResultRow>) -> Vec<ResultRow> {
    map_results_with(query, rows, ResultOptions::default())
}

/// [`map_results`] with explicit wire-correction options.
pub fn map_results_with(
    query: &Query,
    mut rows: Vec<ResultRow>,
    options: ResultOptions,
) -> Vec<ResultRow> {
    for row in rows.iter_mut() {
        for (i, criterion) in query.criteria.iter().enumerate() {
            let key = format!("Column{}", i);
            match row.remove(&key) {
                Some(mut value) => {
                    if options.legacy_scale && criterion.bucket() == BucketedType::Decimal {
                        value = descale(value);
                    }
                    row.insert(criterion.name.clone(), value);
                }
                None => {
                    row.insert(criterion.name.clone(), Value::Null);
                }
            }
        }
    }
    rows
}

fn descale(value: Value) -> Value {
    let numeric = match &value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    };
    match numeric.and_then(|n| serde_json::Number::from_f64(n / 1e9)) {
        Some(n) => Value::Number(n),
        None => value,
    }
}
