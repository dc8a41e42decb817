//! `math_tool`: lossy sanitize, then evaluate.
//!
//! Every character outside `0-9 + - * / % . ( )` and space is dropped before evaluation, so
//! `"2^3"` becomes `"23"`. Stripping can change an expression's meaning; that is accepted.

mod eval;

use tracing::{debug, error, info};

pub(crate) fn is_allowed(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '+' | '-' | '*' | '/' | '%' | '.' | '(' | ')' | ' ')
}

/// Keeps only the characters [`is_allowed`] accepts, in order.
pub(crate) fn sanitize(expression: &str) -> String {
    expression.chars().filter(|c| is_allowed(*c)).collect()
}

/// Evaluates `expression` and returns the result, or a string starting with `Error: `.
pub fn math_tool(expression: &str) -> String {
    info!(expression = %expression, "calculating math expression");
    let cleaned = sanitize(expression);
    debug!(original = %expression, cleaned = %cleaned, "sanitized expression");

    if cleaned.is_empty() {
        error!(expression = %expression, "expression has no valid characters");
        return format!(
            "Error: Expression '{}' contains no valid mathematical operations",
            expression
        );
    }

    match eval::evaluate(&cleaned) {
        Ok(value) => {
            let out = value.to_string();
            info!(expression = %expression, result = %out, "math result");
            out
        }
        Err(e) => {
            error!(expression = %expression, error = %e, "math evaluation failed");
            format!("Error: {}", e)
        }
    }
}
