//! Abstract syntax tree types for JSONPath expressions.

use std::fmt;

/// A segment in a JSONPath expression.
#[derive(Debug, Clone, PartialEq)]
pub enum PathSegment {
    /// Named child (`.name` or `name`)
    Property(String),
    /// Direct children of objects and arrays (`*`)
    Wildcard,
    /// The node itself and every node below it (`..`)
    RecursiveDescentAll,
    /// A named property at any depth (`..name`)
    RecursiveDescentProperty(String),
    /// All array elements (`[*]`)
    ArrayWildcard,
    /// Array index (`[0]`)
    ArrayIndex(usize),
    /// Array slice (`[start:end]`), both bounds optional
    ArraySlice(Option<usize>, Option<usize>),
    /// Explicit index list (`[0,2,5]`), in the order written
    ArrayMultiIndex(Vec<usize>),
    /// Comparison filter (`[?(@.price < 10)]`)
    ArrayFilter(FilterExpression),
    /// Function call (`length()`)
    Function(PathFunction),
    /// Bracket content matching no supported shape; selects nothing
    Unrecognized(String),
}

/// A single `@.property OP literal` comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterExpression {
    pub property: String,
    pub operator: FilterOperator,
    pub literal: String,
}

/// Comparison operators accepted inside a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    /// `==` or `=`
    Equal,
    NotEqual,
    Greater,
    GreaterOrEqual,
    Less,
    LessOrEqual,
}

impl FilterOperator {
    /// Parses an operator token. Both `==` and `=` mean equality.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "==" | "=" => Some(FilterOperator::Equal),
            "!=" => Some(FilterOperator::NotEqual),
            ">" => Some(FilterOperator::Greater),
            ">=" => Some(FilterOperator::GreaterOrEqual),
            "<" => Some(FilterOperator::Less),
            "<=" => Some(FilterOperator::LessOrEqual),
            _ => None,
        }
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            FilterOperator::Equal => "==",
            FilterOperator::NotEqual => "!=",
            FilterOperator::Greater => ">",
            FilterOperator::GreaterOrEqual => ">=",
            FilterOperator::Less => "<",
            FilterOperator::LessOrEqual => "<=",
        };
        f.write_str(symbol)
    }
}

/// Functions callable as the last step of a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathFunction {
    Length,
    Keys,
    Values,
    /// Any other name; evaluates to nothing
    Unknown(String),
}

impl PathFunction {
    /// Resolves a function name case-insensitively.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "length" => PathFunction::Length,
            "keys" => PathFunction::Keys,
            "values" => PathFunction::Values,
            _ => PathFunction::Unknown(name.to_string()),
        }
    }
}

/// A complete JSONPath expression.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonPath {
    /// Segments that make up the path, in source order.
    pub segments: Vec<PathSegment>,
}

impl JsonPath {
    /// Creates a new JSONPath with the given segments.
    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }
}
