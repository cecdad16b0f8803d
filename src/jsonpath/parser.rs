//! JSONPath query string parser.
//!
//! Parsing happens in two steps. [`segment_path`] cuts the path into raw
//! tokens (`store`, `[0]`, `..price`, `length()`), then [`classify_segment`]
//! turns each token into a [`PathSegment`] by its literal shape. A query is
//! parsed once; evaluation never looks at the raw text again.

use super::ast::{FilterExpression, FilterOperator, JsonPath, PathFunction, PathSegment};
use super::filter::strip_literal;

/// Parser for JSONPath query strings.
pub struct Parser;

impl Parser {
    /// Parses the query string into a JsonPath.
    ///
    /// Parsing never fails: tokens with no recognized shape become
    /// [`PathSegment::Unrecognized`] and select nothing. A leading `$` is
    /// optional. `$` alone (or an empty path) yields no
    /// segments, which evaluates to the root.
    pub fn parse(query: &str) -> JsonPath {
        let path = query.strip_prefix('$').unwrap_or(query);
        let segments = segment_path(path)
            .iter()
            .map(|token| classify_segment(token))
            .collect();
        JsonPath::new(segments)
    }
}

/// Splits a path (root marker already removed) into raw segment tokens.
///
/// Bracket groups are kept whole, including nested brackets. A `..` starts a
/// recursive-descent token that absorbs the name following it, so `..price`
/// is one token. A single `.` only separates.
pub fn segment_path(path: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut in_brackets = false;
    let mut depth: isize = 0;
    let mut chars = path.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '[' => {
                if !in_brackets && !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
                in_brackets = true;
                depth += 1;
                current.push(ch);
            }
            ']' => {
                current.push(ch);
                depth -= 1;
                if depth == 0 {
                    in_brackets = false;
                    segments.push(std::mem::take(&mut current));
                }
            }
            '.' if !in_brackets => {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
                if chars.peek() == Some(&'.') {
                    chars.next();
                    current.push_str("..");
                }
            }
            _ => current.push(ch),
        }
    }

    if !current.is_empty() {
        segments.push(current);
    }

    segments
}

/// Classifies one raw token into a path segment.
///
/// Shapes are checked in priority order: `..`, `..name`, `*`, a bracket
/// group, `name()`, and finally a plain property name.
pub fn classify_segment(token: &str) -> PathSegment {
    if token == ".." {
        return PathSegment::RecursiveDescentAll;
    }
    if let Some(name) = token.strip_prefix("..") {
        return PathSegment::RecursiveDescentProperty(name.to_string());
    }
    if token == "*" {
        return PathSegment::Wildcard;
    }
    if token.len() >= 2 && token.starts_with('[') && token.ends_with(']') {
        return classify_bracket(&token[1..token.len() - 1]);
    }
    if let Some(name) = token.strip_suffix("()") {
        if is_word(name) {
            return PathSegment::Function(PathFunction::from_name(name));
        }
    }
    PathSegment::Property(token.to_string())
}

/// Classifies the contents of a `[...]` group.
fn classify_bracket(inner: &str) -> PathSegment {
    if inner == "*" {
        return PathSegment::ArrayWildcard;
    }

    if is_digits(inner) {
        return PathSegment::ArrayIndex(parse_index(inner));
    }

    if let Some((start, end)) = inner.split_once(':') {
        let bound_ok = |s: &str| s.is_empty() || is_digits(s);
        if bound_ok(start) && bound_ok(end) {
            let start = (!start.is_empty()).then(|| parse_index(start));
            let end = (!end.is_empty()).then(|| parse_index(end));
            return PathSegment::ArraySlice(start, end);
        }
    }

    if inner.split(',').all(is_digits) {
        return PathSegment::ArrayMultiIndex(inner.split(',').map(parse_index).collect());
    }

    if let Some(filter) = parse_filter(inner) {
        return PathSegment::ArrayFilter(filter);
    }

    PathSegment::Unrecognized(inner.to_string())
}

/// Parses `?(@.property OP literal)`.
fn parse_filter(inner: &str) -> Option<FilterExpression> {
    let body = inner.strip_prefix("?(@.")?.strip_suffix(')')?;
    let mut scanner = Scanner::new(body);

    let property = scanner.take_while(|ch| !ch.is_whitespace() && !is_operator_char(ch));
    if property.is_empty() {
        return None;
    }

    scanner.skip_whitespace();
    let operator = FilterOperator::parse(scanner.take_while(is_operator_char))?;

    scanner.skip_whitespace();
    let literal = scanner.rest();
    if literal.trim().is_empty() {
        return None;
    }

    Some(FilterExpression {
        property: property.to_string(),
        operator,
        literal: strip_literal(literal),
    })
}

/// Cursor over the body of a filter expression.
struct Scanner<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, position: 0 }
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    /// Consumes characters while `pred` holds and returns them.
    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.position;
        while let Some(ch) = self.peek() {
            if !pred(ch) {
                break;
            }
            self.position += ch.len_utf8();
        }
        &self.input[start..self.position]
    }

    fn skip_whitespace(&mut self) {
        self.take_while(char::is_whitespace);
    }

    fn rest(&self) -> &'a str {
        &self.input[self.position..]
    }
}

fn is_operator_char(ch: char) -> bool {
    matches!(ch, '<' | '>' | '=' | '!')
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn is_word(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|ch| ch.is_alphanumeric() || ch == '_')
}

/// Parses a run of ASCII digits. Values past `usize::MAX` saturate, so they
/// select nothing as an index and clamp as a slice bound.
fn parse_index(s: &str) -> usize {
    s.parse::<usize>().unwrap_or(usize::MAX)
}
