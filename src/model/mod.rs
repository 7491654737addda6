//! The query data model: typed columns, filter trees, sort directives,
//! and the `Query` that owns them.

mod column;
mod error;
mod filter;
mod query;

pub use column::{BucketedType, Column, ColumnDataType};
pub use error::ValidationError;
pub use filter::{
    Filter, FilterGroup, FilterKind, FilterNode, FilterOperator, FilterValue, GroupOperator,
    ValueKind,
};
pub use query::{Query, Sort, SortDirection, SortTarget, DEFAULT_MAX_ROWS};
