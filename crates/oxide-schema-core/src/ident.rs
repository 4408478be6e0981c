//! Identifier validation.

use std::sync::LazyLock;

use regex::Regex;

static SNAKE_CASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z][a-z0-9]*(_[a-z0-9]+)*$").expect("Invalid snake_case regex")
});

/// Returns whether `name` is a lowercase, underscore-delimited identifier
/// such as `user_id` or `order_items2`.
#[must_use]
pub fn is_snake_case(name: &str) -> bool {
    SNAKE_CASE.is_match(name)
}
