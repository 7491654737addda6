//! Filters - leaf predicates and recursive boolean groups.
//!
//! A filter tree is a list of `FilterNode`s owned exclusively by its
//! `Query`. Every node is either a leaf `Filter` or a `FilterGroup`
//! combining children with `and`/`or`; both the predicate compiler and
//! the merge protocol match on the node exhaustively, so adding a new
//! predicate kind is a compile-time-checked change.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::column::{BucketedType, Column};
use super::error::ValidationError;

/// The fixed operator set. Anything outside this set is rejected when the
/// persisted spelling is parsed, so the compiler never sees an unknown
/// operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterOperator {
    Equal,
    NotEqual,
    In,
    NotIn,
    Greater,
    GreaterOrEqual,
    Less,
    LessOrEqual,
    Top,
    Bottom,
    Like,
    Contains,
    Starts,
    Ends,
    IsNull,
    IsNotNull,
}

impl FilterOperator {
    /// The predicate shape this operator produces. Pure function of the
    /// operator.
    pub fn kind(&self) -> FilterKind {
        match self {
            FilterOperator::In | FilterOperator::NotIn => FilterKind::List,
            FilterOperator::Top | FilterOperator::Bottom => FilterKind::Rank,
            _ => FilterKind::Comparison,
        }
    }
}

impl FromStr for FilterOperator {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "equal" => Ok(FilterOperator::Equal),
            "notEqual" => Ok(FilterOperator::NotEqual),
            "in" => Ok(FilterOperator::In),
            "notIn" => Ok(FilterOperator::NotIn),
            "greater" => Ok(FilterOperator::Greater),
            "greaterOrEqual" => Ok(FilterOperator::GreaterOrEqual),
            "less" => Ok(FilterOperator::Less),
            "lessOrEqual" => Ok(FilterOperator::LessOrEqual),
            "top" => Ok(FilterOperator::Top),
            "bottom" => Ok(FilterOperator::Bottom),
            "like" => Ok(FilterOperator::Like),
            "contains" => Ok(FilterOperator::Contains),
            "starts" => Ok(FilterOperator::Starts),
            "ends" => Ok(FilterOperator::Ends),
            "isNull" => Ok(FilterOperator::IsNull),
            "isNotNull" => Ok(FilterOperator::IsNotNull),
            other => Err(ValidationError::UnknownOperator(other.to_string())),
        }
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FilterOperator::Equal => "equal",
            FilterOperator::NotEqual => "notEqual",
            FilterOperator::In => "in",
            FilterOperator::NotIn => "notIn",
            FilterOperator::Greater => "greater",
            FilterOperator::GreaterOrEqual => "greaterOrEqual",
            FilterOperator::Less => "less",
            FilterOperator::LessOrEqual => "lessOrEqual",
            FilterOperator::Top => "top",
            FilterOperator::Bottom => "bottom",
            FilterOperator::Like => "like",
            FilterOperator::Contains => "contains",
            FilterOperator::Starts => "starts",
            FilterOperator::Ends => "ends",
            FilterOperator::IsNull => "isNull",
            FilterOperator::IsNotNull => "isNotNull",
        };
        f.write_str(s)
    }
}

/// Predicate shape, derived from the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    Comparison,
    List,
    Rank,
}

/// How the filter value is interpreted when quoted into query text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValueKind {
    /// A literal value, quoted per the filter's bucketed type.
    #[default]
    Value,
    /// A raw expression passed through unquoted.
    Expression,
    /// Resolved server-side: `VALUEOF(<name>)`.
    RepositoryVariable,
    /// Resolved server-side: `VALUEOF(NQ_SESSION.<name>)`.
    SessionVariable,
}

impl FromStr for ValueKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "value" => Ok(ValueKind::Value),
            "expression" => Ok(ValueKind::Expression),
            "repositoryVariable" => Ok(ValueKind::RepositoryVariable),
            "sessionVariable" => Ok(ValueKind::SessionVariable),
            other => Err(ValidationError::UnknownValueKind(other.to_string())),
        }
    }
}

/// A filter's comparison value: a scalar or a list of scalars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Null,
    Int(i64),
    Float(f64),
    Date(NaiveDate),
    String(String),
    List(Vec<FilterValue>),
}

impl FilterValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FilterValue::Null)
    }

    /// Numeric coercion: integers and floats directly, strings via parse.
    /// Zero coerces successfully - the decimal usability rule depends on
    /// that.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FilterValue::Int(n) => Some(*n as f64),
            FilterValue::Float(f) => Some(*f),
            FilterValue::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Truthiness in the dashboard sense: null, the empty string, numeric
    /// zero, and the empty list are absent; a list counts if any element
    /// does; a date always counts.
    pub fn is_truthy(&self) -> bool {
        match self {
            FilterValue::Null => false,
            FilterValue::Int(n) => *n != 0,
            FilterValue::Float(f) => *f != 0.0,
            FilterValue::Date(_) => true,
            FilterValue::String(s) => !s.is_empty(),
            FilterValue::List(items) => items.iter().any(FilterValue::is_truthy),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        FilterValue::String(s.to_string())
    }
}

impl From<i64> for FilterValue {
    fn from(n: i64) -> Self {
        FilterValue::Int(n)
    }
}

impl From<f64> for FilterValue {
    fn from(f: f64) -> Self {
        FilterValue::Float(f)
    }
}

impl From<NaiveDate> for FilterValue {
    fn from(d: NaiveDate) -> Self {
        FilterValue::Date(d)
    }
}

impl<T: Into<FilterValue>> From<Vec<T>> for FilterValue {
    fn from(items: Vec<T>) -> Self {
        FilterValue::List(items.into_iter().map(Into::into).collect())
    }
}

/// A leaf predicate against a single column expression.
///
/// `code` is copied from the column at construction and never changes
/// afterwards; `column_id` is the stable identity used for id-based
/// replacement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[must_use = "builders have no effect until used"]
pub struct Filter {
    pub code: String,
    pub operator: FilterOperator,
    pub value: FilterValue,
    #[serde(default)]
    pub value_kind: ValueKind,
    pub data_type: BucketedType,
    #[serde(default)]
    pub column_id: String,
    /// Contributed by a prompt/interaction/drill rather than authored
    /// explicitly.
    #[serde(default)]
    pub global: bool,
    /// Never silently overwritten by the merge protocol.
    #[serde(default)]
    pub protected: bool,
    #[serde(default)]
    pub subject_area: String,
}

impl Filter {
    /// Build a filter against `column`. Fails if the column's expression
    /// code is empty. A missing value defaults per bucket (`[]` for
    /// string, `0` for decimal, null for date), and a scalar value for a
    /// list-kind operator is coerced into a one-element list.
    pub fn new(
        column: &Column,
        value: Option<FilterValue>,
        operator: FilterOperator,
        value_kind: ValueKind,
    ) -> Result<Self, ValidationError> {
        if column.code.is_empty() {
            return Err(ValidationError::EmptyColumnCode);
        }
        let data_type = column.bucket();
        let mut value = value.unwrap_or_else(|| match data_type {
            BucketedType::String => FilterValue::List(Vec::new()),
            BucketedType::Decimal => FilterValue::Int(0),
            BucketedType::Date => FilterValue::Null,
        });
        if operator.kind() == FilterKind::List && !matches!(value, FilterValue::List(_)) {
            value = FilterValue::List(vec![value]);
        }
        Ok(Self {
            code: column.code.clone(),
            operator,
            value,
            value_kind,
            data_type,
            column_id: column.id.clone(),
            global: false,
            protected: false,
            subject_area: column.subject_area.clone(),
        })
    }

    /// Convenience constructor with the default `in` operator and literal
    /// value kind.
    pub fn from_column(column: &Column, value: Option<FilterValue>) -> Result<Self, ValidationError> {
        Self::new(column, value, FilterOperator::In, ValueKind::Value)
    }

    /// Predicate shape, derived from the operator.
    pub fn kind(&self) -> FilterKind {
        self.operator.kind()
    }

    pub fn with_global(mut self, global: bool) -> Self {
        self.global = global;
        self
    }

    pub fn with_protected(mut self, protected: bool) -> Self {
        self.protected = protected;
        self
    }
}

/// Boolean combinator for a filter group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupOperator {
    And,
    Or,
}

impl FromStr for GroupOperator {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "and" => Ok(GroupOperator::And),
            "or" => Ok(GroupOperator::Or),
            other => Err(ValidationError::UnknownGroupOperator(other.to_string())),
        }
    }
}

impl fmt::Display for GroupOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GroupOperator::And => "and",
            GroupOperator::Or => "or",
        })
    }
}

/// A recursive boolean combination of filters, arbitrary depth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterGroup {
    pub operator: GroupOperator,
    pub filters: Vec<FilterNode>,
}

impl FilterGroup {
    pub fn new(operator: GroupOperator, filters: Vec<FilterNode>) -> Self {
        Self { operator, filters }
    }

    pub fn and(filters: Vec<FilterNode>) -> Self {
        Self::new(GroupOperator::And, filters)
    }

    pub fn or(filters: Vec<FilterNode>) -> Self {
        Self::new(GroupOperator::Or, filters)
    }
}

/// A node in a filter tree: a leaf predicate or a boolean group.
///
/// Every variant must be handled in the predicate compiler and the merge
/// protocol - the compiler enforces this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterNode {
    Filter(Filter),
    Group(FilterGroup),
}

impl From<Filter> for FilterNode {
    fn from(f: Filter) -> Self {
        FilterNode::Filter(f)
    }
}

impl From<FilterGroup> for FilterNode {
    fn from(g: FilterGroup) -> Self {
        FilterNode::Group(g)
    }
}
