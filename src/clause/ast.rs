//! Output types for the clause parser.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A normalized filter condition: `key <comparator> value`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Clause {
    pub key: String,
    pub comparator: Comparator,
    pub value: ClauseValue,
}

impl Clause {
    pub fn new(key: impl Into<String>, comparator: Comparator, value: ClauseValue) -> Self {
        Clause {
            key: key.into(),
            comparator,
            value,
        }
    }
}

/// Comparison operator carried by a clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Comparator {
    #[default]
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = "LIKE")]
    Like,
}

impl Comparator {
    pub const ALL: [Comparator; 7] = [
        Comparator::Gt,
        Comparator::Ge,
        Comparator::Lt,
        Comparator::Le,
        Comparator::Ne,
        Comparator::Eq,
        Comparator::Like,
    ];

    /// Symbol handed to the downstream query builder.
    pub fn symbol(self) -> &'static str {
        match self {
            Comparator::Eq => "=",
            Comparator::Ne => "!=",
            Comparator::Gt => ">",
            Comparator::Ge => ">=",
            Comparator::Lt => "<",
            Comparator::Le => "<=",
            Comparator::Like => "LIKE",
        }
    }

    /// Short code used in query values, e.g. `gt` in `price=gt:23`.
    pub fn token(self) -> &'static str {
        match self {
            Comparator::Eq => "eq",
            Comparator::Ne => "df",
            Comparator::Gt => "gt",
            Comparator::Ge => "gte",
            Comparator::Lt => "lt",
            Comparator::Le => "lte",
            Comparator::Like => "lk",
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Comparator {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        ComparatorTable::standard()
            .lookup(value)
            .ok_or_else(|| format!("unknown comparator token: {value}"))
    }
}

/// Immutable mapping from comparator tokens to comparators.
#[derive(Debug, Clone, Copy)]
pub struct ComparatorTable {
    entries: &'static [(&'static str, Comparator)],
}

static STANDARD_TABLE: ComparatorTable = ComparatorTable::new(&[
    ("gt", Comparator::Gt),
    ("gte", Comparator::Ge),
    ("lt", Comparator::Lt),
    ("lte", Comparator::Le),
    ("df", Comparator::Ne),
    ("eq", Comparator::Eq),
    ("lk", Comparator::Like),
]);

impl ComparatorTable {
    pub const fn new(entries: &'static [(&'static str, Comparator)]) -> Self {
        ComparatorTable { entries }
    }

    /// The table every query value is read against: `gt gte lt lte df eq lk`.
    pub fn standard() -> &'static ComparatorTable {
        &STANDARD_TABLE
    }

    /// Exact, case-sensitive token lookup.
    pub fn lookup(&self, token: &str) -> Option<Comparator> {
        self.entries
            .iter()
            .find(|(candidate, _)| *candidate == token)
            .map(|(_, comparator)| *comparator)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&'static str, Comparator)> + '_ {
        self.entries.iter().copied()
    }
}

/// A typed operand.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int(n) => write!(f, "{}", n),
            Scalar::Float(n) => write!(f, "{}", n),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Int(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

/// Clause operand: one scalar, or a list when the raw value was comma-separated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ClauseValue {
    Scalar(Scalar),
    List(Vec<Scalar>),
}

impl ClauseValue {
    pub fn is_list(&self) -> bool {
        matches!(self, ClauseValue::List(_))
    }
}

impl From<Scalar> for ClauseValue {
    fn from(value: Scalar) -> Self {
        ClauseValue::Scalar(value)
    }
}

impl From<i64> for ClauseValue {
    fn from(value: i64) -> Self {
        ClauseValue::Scalar(Scalar::Int(value))
    }
}

impl From<f64> for ClauseValue {
    fn from(value: f64) -> Self {
        ClauseValue::Scalar(Scalar::Float(value))
    }
}

impl From<&str> for ClauseValue {
    fn from(value: &str) -> Self {
        ClauseValue::Scalar(Scalar::from(value))
    }
}

impl From<Vec<Scalar>> for ClauseValue {
    fn from(values: Vec<Scalar>) -> Self {
        ClauseValue::List(values)
    }
}
