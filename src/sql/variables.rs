//! Presentation-variable placeholder expansion in criterion expressions.
//!
//! Three placeholder shapes are recognized:
//!
//! - `@{name}` - the bound value, verbatim
//! - `@{name}{default}` - the bound value, or `default` if unbound
//! - `@{name}{default}{mode}` - `mode` controls multi-value rendering:
//!   `outer` emits one quoted comma-joined literal (`'a, b'`), `inner`
//!   emits individually quoted literals (`'a', 'b'`)

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::HashMap;

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"@\{([A-Za-z_][A-Za-z0-9_.]*)\}(?:\{([^{}]*)\})?(?:\{(outer|inner)\})?")
        .expect("placeholder regex is valid")
});

/// Variable bindings the compiler resolves placeholders against.
///
/// An explicit context keeps compilation a pure function of
/// `(query, context)` - there is no ambient session state.
#[derive(Debug, Clone, Default)]
pub struct CompileContext {
    variables: HashMap<String, Vec<String>>,
}

impl CompileContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a single-valued variable.
    pub fn bind(mut self, name: &str, value: &str) -> Self {
        self.variables
            .insert(name.to_string(), vec![value.to_string()]);
        self
    }

    /// Bind a multi-valued variable.
    pub fn bind_all(mut self, name: &str, values: Vec<String>) -> Self {
        self.variables.insert(name.to_string(), values);
        self
    }

    pub fn values(&self, name: &str) -> Option<&[String]> {
        self.variables.get(name).map(Vec::as_slice)
    }
}

/// Substitute every placeholder in `expr` against `ctx`.
pub fn expand_variables(expr: &str, ctx: &CompileContext) -> String {
    PLACEHOLDER
        .replace_all(expr, |caps: &Captures<'_>| {
            let name = &caps[1];
            let default = caps.get(2).map(|m| m.as_str()).unwrap_or("");
            let mode = caps.get(3).map(|m| m.as_str());
            match ctx.values(name) {
                Some(values) => render_values(values, mode),
                None => default.to_string(),
            }
        })
        .into_owned()
}

fn render_values(values: &[String], mode: Option<&str>) -> String {
    match mode {
        Some("outer") => format!("'{}'", values.join(", ").replace('\'', "''")),
        Some("inner") => values
            .iter()
            .map(|v| format!("'{}'", v.replace('\'', "''")))
            .collect::<Vec<_>>()
            .join(", "),
        _ => values.join(", "),
    }
}
