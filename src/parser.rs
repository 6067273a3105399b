//! Comma-separated index lists as typed into the roster editor.
//!
//! Students carry their seating wishes as raw text ("1, 3,5"). Values are
//! 1-based on input; generator requests want them 0-based.

/// Parses `"1, 2,x,4"` into `[1, 2, 4]`.
///
/// Tokens are trimmed and anything that is not an integer is dropped.
/// Order and duplicates are kept. Empty or missing input yields an empty
/// list.
pub fn parse_comma_list(input: Option<&str>) -> Vec<i64> {
    let Some(s) = input else {
        return Vec::new();
    };
    if s.is_empty() {
        return Vec::new();
    }

    s.split(',')
        .filter_map(|token| token.trim().parse::<i64>().ok())
        .collect()
}

/// Same as [`parse_comma_list`] but shifted to 0-based indices.
pub fn parse_zero_based(input: Option<&str>) -> Vec<i64> {
    parse_comma_list(input)
        .into_iter()
        .map(|n| n - 1)
        .collect()
}
