//! Filter predicate evaluation for `[?(@.prop OP literal)]`.
//!
//! Both sides are compared as numbers when both parse as `f64`, otherwise as
//! case-insensitive strings. Elements that are not objects, or that lack the
//! property, never match.

use super::ast::{FilterExpression, FilterOperator};
use crate::document::node::JsonValue;
use std::cmp::Ordering;

/// Returns true if `element` satisfies the filter.
pub fn matches(element: &JsonValue, filter: &FilterExpression) -> bool {
    let JsonValue::Object(fields) = element else {
        return false;
    };
    let Some(value) = fields.get(&filter.property) else {
        return false;
    };

    let ordering = compare_values(&value.to_text(), &filter.literal);
    match filter.operator {
        FilterOperator::Equal => ordering == Ordering::Equal,
        FilterOperator::NotEqual => ordering != Ordering::Equal,
        FilterOperator::Greater => ordering == Ordering::Greater,
        FilterOperator::GreaterOrEqual => ordering != Ordering::Less,
        FilterOperator::Less => ordering == Ordering::Less,
        FilterOperator::LessOrEqual => ordering != Ordering::Greater,
    }
}

/// Compares two canonical value texts.
pub fn compare_values(left: &str, right: &str) -> Ordering {
    if let (Some(l), Some(r)) = (parse_number(left), parse_number(right)) {
        return compare_numbers(l, r);
    }
    compare_ignore_case(left, right)
}

/// Ordinal comparison after folding each character to upper case on its own.
///
/// Characters whose upper case is more than one character (`ß`) are left as
/// they are, so `"straße"` and `"STRASSE"` differ.
pub fn compare_ignore_case(left: &str, right: &str) -> Ordering {
    left.chars().map(fold_char).cmp(right.chars().map(fold_char))
}

pub fn eq_ignore_case(left: &str, right: &str) -> bool {
    compare_ignore_case(left, right) == Ordering::Equal
}

fn fold_char(ch: char) -> char {
    let mut upper = ch.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(single), None) => single,
        _ => ch,
    }
}

/// Removes whitespace and surrounding quote or backslash characters from a
/// filter literal: `"fiction"`, `'fiction'` and `\"fiction\"` all become
/// `fiction`.
pub fn strip_literal(raw: &str) -> String {
    raw.trim()
        .trim_matches(|ch| matches!(ch, '"' | '\'' | '\\'))
        .to_string()
}

fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok()
}

/// NaN sorts below every number and equal to itself.
fn compare_numbers(left: f64, right: f64) -> Ordering {
    match left.partial_cmp(&right) {
        Some(ordering) => ordering,
        None => match (left.is_nan(), right.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Less,
            _ => Ordering::Greater,
        },
    }
}
