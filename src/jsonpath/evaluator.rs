use super::ast::{JsonPath, PathFunction, PathSegment};
use super::filter;
use crate::document::node::{JsonNumber, JsonValue};
use std::borrow::Cow;

/// A candidate produced while evaluating a path: either a node of the source
/// tree or a value synthesized by a function such as `length()`.
pub type Candidate<'a> = Cow<'a, JsonValue>;

pub struct Evaluator<'a> {
    root: &'a JsonValue,
}

impl<'a> Evaluator<'a> {
    pub fn new(root: &'a JsonValue) -> Self {
        Evaluator { root }
    }

    /// Evaluates a parsed path against the root.
    ///
    /// Segments are applied left to right. Once no candidates remain the
    /// remaining segments are skipped; an empty result is not an error.
    pub fn evaluate(&self, path: &JsonPath) -> Vec<Candidate<'a>> {
        let mut current: Vec<Candidate<'a>> = vec![Cow::Borrowed(self.root)];

        for segment in &path.segments {
            if current.is_empty() {
                break;
            }
            current = apply_segment(current, segment);
        }

        current
    }
}

/// Applies one segment to every candidate and concatenates the outputs in
/// candidate order.
pub fn apply_segment<'a>(candidates: Vec<Candidate<'a>>, segment: &PathSegment) -> Vec<Candidate<'a>> {
    let mut next = Vec::new();
    for candidate in candidates {
        match candidate {
            Cow::Borrowed(node) => next.extend(evaluate_segment(node, segment)),
            // Children of a synthesized value cannot borrow from the tree.
            Cow::Owned(node) => next.extend(
                evaluate_segment(&node, segment)
                    .into_iter()
                    .map(|c| Cow::Owned(c.into_owned())),
            ),
        }
    }
    next
}

fn evaluate_segment<'a>(node: &'a JsonValue, segment: &PathSegment) -> Vec<Candidate<'a>> {
    match segment {
        PathSegment::Property(name) => borrowed(node.get(name)),
        PathSegment::Wildcard => borrowed(node.children()),
        PathSegment::RecursiveDescentAll => borrowed(descendants(node)),
        PathSegment::RecursiveDescentProperty(name) => borrowed(find_property(node, name)),
        PathSegment::ArrayWildcard => borrowed(node.as_array().into_iter().flatten()),
        PathSegment::ArrayIndex(idx) => borrowed(node.as_array().and_then(|items| items.get(*idx))),
        PathSegment::ArraySlice(start, end) => match node.as_array() {
            Some(items) => borrowed(slice(items, *start, *end)),
            None => vec![],
        },
        PathSegment::ArrayMultiIndex(indices) => match node.as_array() {
            Some(items) => borrowed(indices.iter().filter_map(|idx| items.get(*idx))),
            None => vec![],
        },
        PathSegment::ArrayFilter(expr) => borrowed(
            node.as_array()
                .into_iter()
                .flatten()
                .filter(|item| filter::matches(item, expr)),
        ),
        PathSegment::Function(function) => apply_function(node, function)
            .map(Cow::Owned)
            .into_iter()
            .collect(),
        PathSegment::Unrecognized(_) => vec![],
    }
}

fn borrowed<'a>(nodes: impl IntoIterator<Item = &'a JsonValue>) -> Vec<Candidate<'a>> {
    nodes.into_iter().map(Cow::Borrowed).collect()
}

/// Clamps both bounds into `[0, len]`; an inverted range is empty.
fn slice(items: &[JsonValue], start: Option<usize>, end: Option<usize>) -> &[JsonValue] {
    let len = items.len();
    let start = start.unwrap_or(0).min(len);
    let end = end.unwrap_or(len).min(len);
    if start >= end {
        &[]
    } else {
        &items[start..end]
    }
}

/// The node itself followed by every descendant, in pre-order.
fn descendants(node: &JsonValue) -> Vec<&JsonValue> {
    let mut results = Vec::new();
    let mut stack = vec![node];
    while let Some(current) = stack.pop() {
        results.push(current);
        stack.extend(current.children().rev());
    }
    results
}

/// Values of every property called `name` at any depth, in pre-order.
fn find_property<'a>(node: &'a JsonValue, name: &str) -> Vec<&'a JsonValue> {
    let mut results = Vec::new();
    let mut stack = vec![node];
    while let Some(current) = stack.pop() {
        if let Some(value) = current.get(name) {
            results.push(value);
        }
        stack.extend(current.children().rev());
    }
    results
}

/// Computes a function's single synthesized value, or `None` for an
/// unknown function.
fn apply_function(node: &JsonValue, function: &PathFunction) -> Option<JsonValue> {
    match function {
        PathFunction::Length => {
            let len = match node {
                JsonValue::Object(fields) => fields.len(),
                JsonValue::Array(items) => items.len(),
                JsonValue::String(s) => s.chars().count(),
                _ => 0,
            };
            Some(JsonValue::Number(JsonNumber::Integer(len as i64)))
        }
        PathFunction::Keys => {
            let keys = match node {
                JsonValue::Object(fields) => fields
                    .keys()
                    .map(|key| JsonValue::String(key.clone()))
                    .collect(),
                _ => Vec::new(),
            };
            Some(JsonValue::Array(keys))
        }
        PathFunction::Values => {
            let values = match node {
                JsonValue::Object(fields) => fields.values().cloned().collect(),
                JsonValue::Array(items) => items.clone(),
                _ => Vec::new(),
            };
            Some(JsonValue::Array(values))
        }
        PathFunction::Unknown(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jsonpath::parser::Parser;
    use indexmap::IndexMap;

    fn make_test_tree() -> JsonValue {
        let items = vec![
            JsonValue::from("a"),
            JsonValue::from("b"),
            JsonValue::from("c"),
        ];

        let mut nested = IndexMap::new();
        nested.insert("name".to_string(), JsonValue::from("inner"));

        let mut obj = IndexMap::new();
        obj.insert("name".to_string(), JsonValue::from("test"));
        obj.insert("age".to_string(), JsonValue::from(42));
        obj.insert("items".to_string(), JsonValue::Array(items));
        obj.insert("child".to_string(), JsonValue::Object(nested));

        JsonValue::Object(obj)
    }

    fn eval(tree: &JsonValue, query: &str) -> Vec<JsonValue> {
        let path = Parser::parse(query);
        Evaluator::new(tree)
            .evaluate(&path)
            .into_iter()
            .map(Cow::into_owned)
            .collect()
    }

    #[test]
    fn test_evaluate_root() {
        let tree = make_test_tree();
        let results = eval(&tree, "$");
        assert_eq!(results, vec![tree.clone()]);
    }

    #[test]
    fn test_evaluate_property() {
        let tree = make_test_tree();
        assert_eq!(eval(&tree, "$.name"), vec![JsonValue::from("test")]);
    }

    #[test]
    fn test_evaluate_wildcard() {
        let tree = make_test_tree();
        assert_eq!(eval(&tree, "$.*").len(), 4);
        assert_eq!(eval(&tree, "$.items.*").len(), 3);
        assert!(eval(&tree, "$.name.*").is_empty());
    }

    #[test]
    fn test_evaluate_descendants_include_self() {
        let tree = make_test_tree();
        // root, name, age, items, a, b, c, child, child.name
        let results = eval(&tree, "$..");
        assert_eq!(results.len(), 9);
        assert_eq!(results[0], tree);
        assert_eq!(results[4], JsonValue::from("a"));
        assert_eq!(results[8], JsonValue::from("inner"));
    }

    #[test]
    fn test_evaluate_recursive_property_in_pre_order() {
        let tree = make_test_tree();
        assert_eq!(
            eval(&tree, "$..name"),
            vec![JsonValue::from("test"), JsonValue::from("inner")]
        );
    }

    #[test]
    fn test_evaluate_array_ops() {
        let tree = make_test_tree();
        assert_eq!(eval(&tree, "$.items[1]"), vec![JsonValue::from("b")]);
        assert!(eval(&tree, "$.items[3]").is_empty());
        assert_eq!(eval(&tree, "$.items[*]").len(), 3);
        assert_eq!(
            eval(&tree, "$.items[2,0,7]"),
            vec![JsonValue::from("c"), JsonValue::from("a")]
        );
    }

    #[test]
    fn test_evaluate_slice_clamps() {
        let tree = make_test_tree();
        assert_eq!(eval(&tree, "$.items[1:]").len(), 2);
        assert_eq!(eval(&tree, "$.items[:2]").len(), 2);
        assert_eq!(eval(&tree, "$.items[1:100]").len(), 2);
        assert!(eval(&tree, "$.items[2:1]").is_empty());
        assert!(eval(&tree, "$.items[5:9]").is_empty());
    }

    #[test]
    fn test_array_ops_ignore_non_arrays() {
        let tree = make_test_tree();
        assert!(eval(&tree, "$.child[0]").is_empty());
        assert!(eval(&tree, "$.child[*]").is_empty());
        assert!(eval(&tree, "$.name[0:1]").is_empty());
    }

    #[test]
    fn test_unrecognized_bracket_is_empty() {
        let tree = make_test_tree();
        assert!(eval(&tree, "$.items[invalid syntax").is_empty());
        assert!(eval(&tree, "$.items[-1]").is_empty());
    }

    #[test]
    fn test_functions() {
        let tree = make_test_tree();
        assert_eq!(eval(&tree, "$.items.length()"), vec![JsonValue::from(3)]);
        assert_eq!(eval(&tree, "$.name.length()"), vec![JsonValue::from(4)]);
        assert_eq!(eval(&tree, "$.age.length()"), vec![JsonValue::from(0)]);
        assert_eq!(
            eval(&tree, "$.child.keys()"),
            vec![JsonValue::Array(vec![JsonValue::from("name")])]
        );
        assert_eq!(
            eval(&tree, "$.items.keys()"),
            vec![JsonValue::Array(vec![])]
        );
        assert_eq!(
            eval(&tree, "$.child.values()"),
            vec![JsonValue::Array(vec![JsonValue::from("inner")])]
        );
        assert!(eval(&tree, "$.items.sum()").is_empty());
    }

    #[test]
    fn test_segments_after_function_apply_to_synthesized_value() {
        let tree = make_test_tree();
        assert_eq!(eval(&tree, "$.child.keys()[0]"), vec![JsonValue::from("name")]);
    }

    #[test]
    fn test_evaluate_no_match_stops_early() {
        let tree = make_test_tree();
        assert!(eval(&tree, "$.missing..name[0]").is_empty());
    }
}
