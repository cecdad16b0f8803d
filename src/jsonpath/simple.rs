//! Fallback walker for plain dot/bracket paths such as `$.store.book[0].title`.
//!
//! Only property names, `[n]` and `[*]` are understood. Unlike the segment
//! evaluator, a bracket without a closing `]` is an error rather than an
//! empty match.

use super::error::JsonPathError;
use crate::document::node::JsonValue;

/// Walks `query` from `root` and returns the selected nodes in order.
pub fn evaluate_simple<'a>(
    root: &'a JsonValue,
    query: &str,
) -> Result<Vec<&'a JsonValue>, JsonPathError> {
    if query == "$" {
        return Ok(vec![root]);
    }

    let path = query
        .strip_prefix("$.")
        .or_else(|| query.strip_prefix('$'))
        .unwrap_or(query);

    let mut current = vec![root];
    for part in path.split('.') {
        if part.trim().is_empty() {
            continue;
        }
        if current.is_empty() {
            break;
        }

        let mut next = Vec::new();
        for node in current {
            match part.find('[') {
                Some(open) => {
                    let index = bracket_content(part, open)?;
                    let name = &part[..open];
                    let target = if name.is_empty() { Some(node) } else { node.get(name) };
                    if let Some(items) = target.and_then(JsonValue::as_array) {
                        select(items, index, &mut next);
                    }
                }
                None => next.extend(node.get(part)),
            }
        }
        current = next;
    }

    Ok(current)
}

/// Text between the first `[` and the last `]` of a part.
fn bracket_content(part: &str, open: usize) -> Result<&str, JsonPathError> {
    match part.rfind(']') {
        Some(close) if close > open => Ok(part[open + 1..close].trim()),
        _ => Err(JsonPathError::UnclosedBracket {
            segment: part.to_string(),
        }),
    }
}

fn select<'a>(items: &'a [JsonValue], index: &str, out: &mut Vec<&'a JsonValue>) {
    if index == "*" {
        out.extend(items);
        return;
    }
    // Anything that is not an integer selects nothing.
    if let Ok(idx) = index.parse::<i64>() {
        if let Some(item) = usize::try_from(idx).ok().and_then(|i| items.get(i)) {
            out.push(item);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parser::parse_value;

    fn sample() -> JsonValue {
        parse_value(&serde_json::json!({
            "store": {
                "book": [
                    {"title": "Sayings of the Century"},
                    {"title": "Sword of Honour"}
                ]
            },
            "tags": ["a", "b"]
        }))
    }

    fn titles(root: &JsonValue, query: &str) -> Vec<String> {
        evaluate_simple(root, query)
            .unwrap()
            .into_iter()
            .map(JsonValue::to_text)
            .collect()
    }

    #[test]
    fn test_root() {
        let root = sample();
        let results = evaluate_simple(&root, "$").unwrap();
        assert_eq!(results, vec![&root]);
    }

    #[test]
    fn test_property_and_index() {
        let root = sample();
        assert_eq!(titles(&root, "$.store.book[1].title"), vec!["Sword of Honour"]);
        assert_eq!(titles(&root, "store.book[0].title"), vec!["Sayings of the Century"]);
    }

    #[test]
    fn test_wildcard_index() {
        let root = sample();
        assert_eq!(titles(&root, "$.tags[*]"), vec!["a", "b"]);
        assert_eq!(titles(&root, "$.tags[ 1 ]"), vec!["b"]);
    }

    #[test]
    fn test_out_of_range_and_non_numeric_select_nothing() {
        let root = sample();
        assert!(titles(&root, "$.tags[5]").is_empty());
        assert!(titles(&root, "$.tags[-1]").is_empty());
        assert!(titles(&root, "$.tags[x]").is_empty());
        assert!(titles(&root, "$.store[0]").is_empty());
    }

    #[test]
    fn test_missing_property_is_empty() {
        let root = sample();
        assert!(titles(&root, "$.nothing.here").is_empty());
    }

    #[test]
    fn test_unclosed_bracket_is_error() {
        let root = sample();
        let err = evaluate_simple(&root, "$.store.book[invalid syntax").unwrap_err();
        assert_eq!(
            err,
            JsonPathError::UnclosedBracket {
                segment: "book[invalid syntax".to_string()
            }
        );
    }

    #[test]
    fn test_unclosed_bracket_after_empty_set_is_not_reached() {
        let root = sample();
        assert!(evaluate_simple(&root, "$.missing.book[0").unwrap().is_empty());
    }
}
