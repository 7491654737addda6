//! Query compilation - `Query` to logical SQL text.
//!
//! Compilation is deterministic and pure in `(query, context)`:
//!
//! ```text
//! SELECT <expr>[, <expr>...]
//! FROM "<subject area>"
//! [WHERE <predicate>]
//! [ORDER BY <ordinal> <dir> NULLS LAST[, ...]]
//! FETCH FIRST <max rows> ROWS ONLY
//! ```

use super::predicate::{compile_predicate, has_usable_value};
use super::variables::{expand_variables, CompileContext};
use crate::model::{FilterGroup, FilterNode, Query, SortDirection};

impl Query {
    /// Compile this query to logical SQL.
    ///
    /// The WHERE clause is emitted only when the filter tree holds at
    /// least one usable value; multiple top-level nodes are implicitly
    /// wrapped in a single `and` group, so two bare filters compile
    /// byte-for-byte identically to one explicit `and` group over them.
    pub fn compile(&self, ctx: &CompileContext) -> String {
        let select: Vec<String> = self
            .criteria
            .iter()
            .map(|c| expand_variables(&c.code, ctx))
            .collect();

        let mut sql = format!(
            "SELECT {} FROM \"{}\"",
            select.join(", "),
            self.subject_area()
        );

        if let Some(predicate) = self.compile_where() {
            sql.push_str(&format!(" WHERE {}", predicate));
        }

        if let Some(order_by) = self.compile_order_by() {
            sql.push_str(&format!(" ORDER BY {}", order_by));
        }

        sql.push_str(&format!(" FETCH FIRST {} ROWS ONLY", self.max_rows));
        sql
    }

    fn compile_where(&self) -> Option<String> {
        if self.filters.is_empty() || !self.filters.iter().any(has_usable_value) {
            return None;
        }
        let text = match self.filters.as_slice() {
            [single] => compile_predicate(single),
            many => {
                // Implicit top-level grouping: bare siblings combine with and.
                let group = FilterGroup::and(many.to_vec());
                compile_predicate(&FilterNode::Group(group))
            }
        };
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    fn compile_order_by(&self) -> Option<String> {
        let terms: Vec<String> = if self.sort.is_empty() {
            // No explicit sort: order by each criterion's position.
            (1..=self.criteria.len())
                .map(|pos| format!("{} {} NULLS LAST", pos, SortDirection::Asc.keyword()))
                .collect()
        } else {
            self.sort
                .iter()
                .filter_map(|s| {
                    s.position_in(&self.criteria)
                        .map(|pos| format!("{} {} NULLS LAST", pos, s.direction.keyword()))
                })
                .collect()
        };
        if terms.is_empty() {
            None
        } else {
            Some(terms.join(", "))
        }
    }
}
