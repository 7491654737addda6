//! Logical SQL generation.
//!
//! - [`compile`] - `Query::compile`, SELECT/FROM/WHERE/ORDER BY assembly
//! - [`predicate`] - recursive predicate compiler and literal quoting
//! - [`variables`] - presentation-variable placeholder expansion

pub mod compile;
pub mod predicate;
pub mod variables;

pub use predicate::{compile_predicate, has_usable_value};
pub use variables::{expand_variables, CompileContext};
