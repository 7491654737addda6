//! The filter merge protocol.
//!
//! Several uncoordinated callers (prompts, visual interactions, drill
//! paths, deep links) contribute or withdraw filters from a query's
//! shared filter list. The three operations here arbitrate that
//! ownership: replace by expression code, replace by stable column id,
//! and prune by provenance. All of them mutate the list in place, so
//! callers observe each other's effects in call order.

use crate::model::{Filter, FilterNode, FilterOperator, FilterValue};

/// Three-way control signal from a replace operation. Not an error:
/// callers branch on it.
///
/// - `Unreplaced`: no node matched; the caller appends the filter itself.
/// - `Replaced`: a matching node was overwritten in place.
/// - `Refused`: a matching node is protected and was left untouched; the
///   caller must not append.
///
/// When a walk touches several matches the strongest signal wins:
/// `Refused` over `Replaced` over `Unreplaced`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MergeOutcome {
    Unreplaced,
    Replaced,
    Refused,
}

/// Depth-first replace-by-identity: overwrite every unprotected filter
/// whose `code` equals `new_filter.code` with a copy of `new_filter`.
///
/// Trees holding multiple nodes with the same code get last-write-wins
/// per node; callers must not assume more than one match is intended.
pub fn replace_filter(filters: &mut Vec<FilterNode>, new_filter: &Filter) -> MergeOutcome {
    let mut outcome = MergeOutcome::Unreplaced;
    for node in filters.iter_mut() {
        match node {
            FilterNode::Filter(f) => {
                if f.code == new_filter.code {
                    if f.protected {
                        outcome = outcome.max(MergeOutcome::Refused);
                    } else {
                        *f = new_filter.clone();
                        outcome = outcome.max(MergeOutcome::Replaced);
                    }
                }
            }
            FilterNode::Group(g) => {
                outcome = outcome.max(replace_filter(&mut g.filters, new_filter));
            }
        }
    }
    outcome
}

/// Depth-first replace-by-stable-id: on a `column_id` match, set the
/// filter's value, clear its prompted provenance, and set the operator
/// only when one is supplied. Protected filters refuse, untouched.
pub fn replace_filter_by_id(
    filters: &mut Vec<FilterNode>,
    column_id: &str,
    new_operator: Option<FilterOperator>,
    new_value: &FilterValue,
) -> MergeOutcome {
    let mut outcome = MergeOutcome::Unreplaced;
    for node in filters.iter_mut() {
        match node {
            FilterNode::Filter(f) => {
                if f.column_id == column_id {
                    if f.protected {
                        outcome = outcome.max(MergeOutcome::Refused);
                    } else {
                        f.value = new_value.clone();
                        f.global = false;
                        if let Some(op) = new_operator {
                            f.operator = op;
                        }
                        outcome = outcome.max(MergeOutcome::Replaced);
                    }
                }
            }
            FilterNode::Group(g) => {
                outcome = outcome.max(replace_filter_by_id(
                    &mut g.filters,
                    column_id,
                    new_operator,
                    new_value,
                ));
            }
        }
    }
    outcome
}

/// Remove, in place and at any depth, every filter contributed by a
/// prompt (`global`) that is not protected. A group emptied by the
/// recursion is removed with it. Idempotent.
pub fn prune_prompted(filters: &mut Vec<FilterNode>) {
    // Collect indices first, splice in reverse so earlier indices stay
    // valid.
    let mut doomed = Vec::new();
    for (i, node) in filters.iter_mut().enumerate() {
        match node {
            FilterNode::Filter(f) => {
                if f.global && !f.protected {
                    doomed.push(i);
                }
            }
            FilterNode::Group(g) => {
                prune_prompted(&mut g.filters);
                if g.filters.is_empty() {
                    doomed.push(i);
                }
            }
        }
    }
    for i in doomed.into_iter().rev() {
        filters.remove(i);
    }
}
