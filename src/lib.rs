//! # lsql
//!
//! Typed query model, filter merge protocol, and logical SQL compiler
//! for analytic dashboards.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │       Collaborators (prompts, interactions, drills)      │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [merge protocol]
//! ┌─────────────────────────────────────────────────────────┐
//! │        Query (columns + filter tree + sort + cap)        │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [compiler]
//! ┌─────────────────────────────────────────────────────────┐
//! │                   Logical SQL text                       │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [transport, out of scope]
//! ┌─────────────────────────────────────────────────────────┐
//! │        Positional rows  ──[result mapper]──▶ rows        │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! The crate executes nothing itself: the compiled text goes to a
//! transport collaborator, whose positional result rows come back
//! through [`results::map_results`].

pub mod merge;
pub mod model;
pub mod results;
pub mod sql;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::merge::{prune_prompted, replace_filter, replace_filter_by_id, MergeOutcome};
    pub use crate::model::{
        BucketedType, Column, ColumnDataType, Filter, FilterGroup, FilterKind, FilterNode,
        FilterOperator, FilterValue, GroupOperator, Query, Sort, SortDirection, SortTarget,
        ValidationError, ValueKind,
    };
    pub use crate::results::{map_results, map_results_with, ResultOptions, ResultRow};
    pub use crate::sql::{compile_predicate, expand_variables, has_usable_value, CompileContext};
}

// Also export at crate root for convenience
pub use merge::{prune_prompted, replace_filter, replace_filter_by_id, MergeOutcome};
pub use model::{Column, Filter, FilterGroup, FilterNode, FilterOperator, Query};
pub use results::{map_results, ResultRow};
pub use sql::CompileContext;
