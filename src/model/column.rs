//! Columns - typed references to queryable expressions.
//!
//! A `Column` is created by the upstream metadata/form collaborator and is
//! immutable enough that the compiler may assume `code` is stable once a
//! filter references it. The concrete data type is bucketed three ways
//! (string/decimal/date) to select quoting and defaulting rules.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::ValidationError;

/// Concrete data type of a column, as reported by the remote engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnDataType {
    Char,
    Varchar,
    Integer,
    Double,
    Numeric,
    Date,
    Timestamp,
}

impl ColumnDataType {
    /// Collapse the concrete type into the 3-way bucket that drives
    /// quoting and value defaulting.
    pub fn bucket(&self) -> BucketedType {
        match self {
            ColumnDataType::Char | ColumnDataType::Varchar => BucketedType::String,
            ColumnDataType::Integer | ColumnDataType::Double | ColumnDataType::Numeric => {
                BucketedType::Decimal
            }
            ColumnDataType::Date | ColumnDataType::Timestamp => BucketedType::Date,
        }
    }
}

impl FromStr for ColumnDataType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "char" => Ok(ColumnDataType::Char),
            "varchar" => Ok(ColumnDataType::Varchar),
            "integer" => Ok(ColumnDataType::Integer),
            "double" => Ok(ColumnDataType::Double),
            "numeric" => Ok(ColumnDataType::Numeric),
            "date" => Ok(ColumnDataType::Date),
            "timestamp" => Ok(ColumnDataType::Timestamp),
            other => Err(ValidationError::UnknownDataType(other.to_string())),
        }
    }
}

impl fmt::Display for ColumnDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ColumnDataType::Char => "char",
            ColumnDataType::Varchar => "varchar",
            ColumnDataType::Integer => "integer",
            ColumnDataType::Double => "double",
            ColumnDataType::Numeric => "numeric",
            ColumnDataType::Date => "date",
            ColumnDataType::Timestamp => "timestamp",
        };
        f.write_str(s)
    }
}

/// The 3-way simplification of a column type used by filters and the
/// predicate compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BucketedType {
    String,
    Decimal,
    Date,
}

/// A typed reference to a queryable expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[must_use = "builders have no effect until used"]
pub struct Column {
    /// Stable identity distinct from `code`, used for id-based filter
    /// replacement across renames/edits of the underlying expression.
    #[serde(default)]
    pub id: String,
    /// Expression text, e.g. a qualified field reference like `"Sales"."Revenue"`.
    pub code: String,
    /// Semantic name, used to rename positional result columns.
    pub name: String,
    pub data_type: ColumnDataType,
    /// `"none"` or an aggregate name (`"sum"`, `"avg"`, ...).
    #[serde(default = "default_aggregation")]
    pub aggregation_rule: String,
    /// Source namespace the column belongs to.
    #[serde(default)]
    pub subject_area: String,
    /// Companion sort expression, if the column sorts by something other
    /// than itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_format: Option<String>,
}

fn default_aggregation() -> String {
    "none".to_string()
}

impl Column {
    pub fn new(code: &str, name: &str, data_type: ColumnDataType) -> Self {
        Self {
            id: String::new(),
            code: code.into(),
            name: name.into(),
            data_type,
            aggregation_rule: default_aggregation(),
            subject_area: String::new(),
            sort_key: None,
            data_format: None,
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_aggregation(mut self, rule: &str) -> Self {
        self.aggregation_rule = rule.into();
        self
    }

    pub fn with_subject_area(mut self, subject_area: &str) -> Self {
        self.subject_area = subject_area.into();
        self
    }

    pub fn with_sort_key(mut self, sort_key: &str) -> Self {
        self.sort_key = Some(sort_key.into());
        self
    }

    pub fn with_data_format(mut self, format: &str) -> Self {
        self.data_format = Some(format.into());
        self
    }

    /// The 3-way bucket of this column's concrete type.
    pub fn bucket(&self) -> BucketedType {
        self.data_type.bucket()
    }
}
