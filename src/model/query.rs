//! Queries and sort directives.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::column::Column;
use super::error::ValidationError;
use super::filter::FilterNode;

/// Default row cap applied when a query does not specify one.
pub const DEFAULT_MAX_ROWS: u64 = 2000;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Keyword spelling used in compiled query text.
    pub fn keyword(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl FromStr for SortDirection {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(ValidationError::UnknownSortDirection(other.to_string())),
        }
    }
}

/// What a sort directive points at: a criterion by name, or directly a
/// 1-based position in the criteria list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SortTarget {
    Position(u64),
    Name(String),
}

/// An ordering directive on a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sort {
    pub target: SortTarget,
    pub direction: SortDirection,
}

impl Sort {
    pub fn by_name(name: &str, direction: SortDirection) -> Self {
        Self {
            target: SortTarget::Name(name.to_string()),
            direction,
        }
    }

    pub fn by_position(position: u64, direction: SortDirection) -> Self {
        Self {
            target: SortTarget::Position(position),
            direction,
        }
    }

    /// Resolve the target to a 1-based position in `criteria`. A name is
    /// matched against criterion names; a name that spells an integer is
    /// taken as a position directly.
    pub fn position_in(&self, criteria: &[Column]) -> Option<u64> {
        match &self.target {
            SortTarget::Position(p) => Some(*p),
            SortTarget::Name(name) => {
                if let Some(i) = criteria.iter().position(|c| c.name == *name) {
                    Some(i as u64 + 1)
                } else {
                    name.parse().ok()
                }
            }
        }
    }
}

/// A query: the SELECT criteria, a filter tree, sort directives, and a
/// row cap. The criteria order is the only source of truth for positional
/// result mapping and for the implicit sort-by-position.
///
/// A query exclusively owns its filter list; the merge protocol mutates
/// it in place through [`filters_mut`](Query::filters_mut), so callers
/// observe each other's merges in call order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[must_use = "builders have no effect until used"]
pub struct Query {
    pub criteria: Vec<Column>,
    #[serde(default)]
    pub filters: Vec<FilterNode>,
    #[serde(default)]
    pub sort: Vec<Sort>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    subject_area: Option<String>,
    #[serde(default = "default_max_rows")]
    pub max_rows: u64,
}

fn default_max_rows() -> u64 {
    DEFAULT_MAX_ROWS
}

impl Query {
    pub fn new(criteria: Vec<Column>) -> Self {
        Self {
            criteria,
            filters: Vec::new(),
            sort: Vec::new(),
            subject_area: None,
            max_rows: DEFAULT_MAX_ROWS,
        }
    }

    pub fn with_filters(mut self, filters: Vec<FilterNode>) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_sort(mut self, sort: Vec<Sort>) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_subject_area(mut self, subject_area: &str) -> Self {
        self.subject_area = Some(subject_area.to_string());
        self
    }

    pub fn with_max_rows(mut self, max_rows: u64) -> Self {
        self.max_rows = max_rows;
        self
    }

    /// The namespace queried FROM: explicit if set, else the first
    /// criterion's subject area.
    pub fn subject_area(&self) -> &str {
        match &self.subject_area {
            Some(sa) => sa,
            None => self
                .criteria
                .first()
                .map(|c| c.subject_area.as_str())
                .unwrap_or(""),
        }
    }

    /// In-place access to the filter tree for the merge protocol.
    pub fn filters_mut(&mut self) -> &mut Vec<FilterNode> {
        &mut self.filters
    }
}
